use clap::{Parser, Subcommand};
use spice_site::contact::ContactForm;
use spice_site::content::{self, Catalog};
use spice_site::generate::{self, AssetUrls};
use spice_site::types::Section;
use spice_site::{config, output, sections};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "spice-site")]
#[command(about = "Static site generator for a single-page spice brand site")]
#[command(long_about = "\
Static site generator for a single-page spice brand site

Builds one index.html with five anchored sections (Home, About, Products,
Process, Contact), scroll reveal animations, and a contact form that opens
the inquiry in a messaging app.

Content structure:

  content/
  ├── config.toml      # Brand, colors, navigation, contact, reveal (optional)
  ├── catalog.toml     # Spices, steps, features, channels (optional, merged over stock)
  └── assets/          # Every image the catalog references → copied to dist/assets/
      ├── logo.png
      ├── hero-minimal.jpg
      ├── srilanka.png
      └── spice-*.jpg

Run 'spice-site gen-config' or 'spice-site gen-catalog' to print the
documented stock files.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate config, catalog and assets without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the stock catalog.toml
    GenCatalog,
    /// Print the reveal rule table
    Rules {
        /// Only this section (home, about, products, process, contact)
        section: Option<Section>,
        /// Print the JSON embedded in the page instead
        #[arg(long)]
        json: bool,
    },
    /// Print the messaging link the contact form would open
    ContactLink {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (site_config, catalog) = load(&cli.source)?;
            println!("==> Generating {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, &site_config, &catalog)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (_, catalog) = load(&cli.source)?;
            let assets = AssetUrls::resolve(&cli.source, &catalog)?;
            log::debug!("{} assets present", assets.len());
            output::print_check_output(&catalog, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenCatalog => {
            print!("{}", Catalog::stock_toml());
        }
        Command::Rules { section, json } => {
            let (site_config, catalog) = load(&cli.source)?;
            let mut table = sections::page_rules(&catalog, &site_config);
            if let Some(only) = section {
                table.retain(|s, _| *s == only);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for (i, (section, rules)) in table.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    output::print_rules(*section, rules);
                }
            }
        }
        Command::ContactLink {
            name,
            email,
            phone,
            message,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let mut form = ContactForm::new(&name, &email, &phone, &message);
            let redirect = form.submit(&site_config.contact)?;
            println!("{}", redirect.url);
        }
    }

    Ok(())
}

/// Load and validate config and catalog from the content directory.
fn load(source: &Path) -> Result<(config::SiteConfig, Catalog), Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    let catalog = content::load_catalog(source)?;
    Ok((site_config, catalog))
}
