//! HTML site generation.
//!
//! Renders the single page from the site config and the content catalog and
//! writes it, together with the copied assets, to the output directory.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html        # The whole site: markup, inline CSS, inline JS, rule table
//! └── assets/
//!     ├── logo.png
//!     ├── hero-minimal.jpg
//!     ├── srilanka.png
//!     └── spice-*.jpg
//! ```
//!
//! ## Page Layout
//!
//! Navigation → Hero (`#home`) → About (`#about`) → Products (`#products`)
//! → Process (`#process`) → Contact (`#contact`) → Footer.
//!
//! ## CSS and JavaScript
//!
//! Static files are embedded at compile time and inlined into the page:
//! - `static/style.css`: layout and components (colors injected from config)
//! - `static/reveal.js`: applies the serialized reveal rules on scroll
//! - `static/nav.js`: header style toggle, smooth scrolling, mobile menu
//! - `static/contact.js`: builds the messaging redirect from the form
//!
//! The reveal rule table is embedded as JSON in
//! `<script type="application/json" id="reveal-rules">`.
//!
//! ## Assets
//!
//! Every image the catalog references must exist under `content/assets/`;
//! a missing one fails the build. Asset URLs carry a short content hash
//! (`assets/logo.png?v=3f2a9c1d`) so redeploys bust browser caches.

use crate::config::{self, SiteConfig};
use crate::contact::Field;
use crate::content::{Catalog, Spice};
use crate::icons::Icon;
use crate::sections::{self, ids};
use crate::types::Section;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("missing asset: {0}")]
    MissingAsset(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const REVEAL_JS: &str = include_str!("../static/reveal.js");
const NAV_JS: &str = include_str!("../static/nav.js");
const CONTACT_JS: &str = include_str!("../static/contact.js");

/// Asset path (relative to `content/assets/`) → URL used in the page.
#[derive(Debug, Clone, Default)]
pub struct AssetUrls(BTreeMap<String, String>);

impl AssetUrls {
    /// Hash every referenced asset under `source/assets`.
    ///
    /// Fails with [`GenerateError::MissingAsset`] on the first absent file.
    pub fn resolve(source: &Path, catalog: &Catalog) -> Result<Self, GenerateError> {
        let assets_dir = source.join("assets");
        let mut urls = BTreeMap::new();
        for rel in catalog.asset_paths() {
            let path = assets_dir.join(rel);
            if !path.is_file() {
                return Err(GenerateError::MissingAsset(path));
            }
            let digest = Sha256::digest(fs::read(&path)?);
            let hash = format!("{:x}", digest);
            urls.insert(rel.to_string(), format!("assets/{}?v={}", rel, &hash[..8]));
        }
        Ok(Self(urls))
    }

    /// URL for `rel`. Unresolved paths fall back to the plain asset path.
    pub fn url(&self, rel: &str) -> String {
        self.0
            .get(rel)
            .cloned()
            .unwrap_or_else(|| format!("assets/{rel}"))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What a build produced, for CLI output.
#[derive(Debug)]
pub struct GenerateReport {
    pub index: PathBuf,
    /// Rule count per section, in page order.
    pub sections: Vec<(Section, usize)>,
    pub spices: usize,
    pub steps: usize,
    pub assets_copied: usize,
}

pub fn generate(
    source: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    catalog: &Catalog,
) -> Result<GenerateReport, GenerateError> {
    let assets = AssetUrls::resolve(source, catalog)?;

    fs::create_dir_all(output_dir)?;
    let assets_copied = copy_assets(&source.join("assets"), &output_dir.join("assets"))?;

    let rules = sections::page_rules(catalog, config);
    let rules_json = serde_json::to_string(&rules)?;
    let page = render_page(config, catalog, &assets, &rules_json);
    let index = output_dir.join("index.html");
    fs::write(&index, page.into_string())?;
    log::info!("wrote {}", index.display());

    Ok(GenerateReport {
        index,
        sections: rules.iter().map(|(s, r)| (*s, r.len())).collect(),
        spices: catalog.spices.len(),
        steps: catalog.steps.len(),
        assets_copied,
    })
}

/// Copy everything under `src` to `dst`, preserving relative paths.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir yields paths under its root");
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            log::debug!("copied {}", rel.display());
            copied += 1;
        }
    }
    Ok(copied)
}

/// JSON is embedded in a `<script>` element; `</` must not close it early.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup, scripts: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                (scripts)
            }
        }
    }
}

fn section_heading(id: &str, text: &str) -> Markup {
    html! {
        h2.section-heading id=(id) { (text) }
    }
}

fn rule_line(id: Option<&str>) -> Markup {
    html! {
        div.rule-line id=[id] {}
    }
}

/// Fixed header: logo, section links, order button, mobile menu.
pub fn render_nav(config: &SiteConfig, catalog: &Catalog, assets: &AssetUrls) -> Markup {
    html! {
        nav.site-nav id="site-nav" data-threshold=(config.navigation.scroll_threshold) {
            div.nav-bar {
                button.nav-brand type="button" data-scroll-to=(Section::Home.anchor()) {
                    img.nav-logo src=(assets.url(&catalog.assets.logo)) alt="Logo";
                    span.nav-name { (config.brand.name) }
                }
                div.nav-links {
                    @for item in &catalog.nav {
                        button.nav-link type="button" data-scroll-to=(item.target.anchor()) {
                            (item.label)
                        }
                    }
                    button.btn.btn-hero type="button" data-scroll-to=(Section::Contact.anchor()) {
                        "ORDER"
                    }
                }
                button.nav-toggle type="button" aria-label="Menu" aria-expanded="false" {
                    span.icon-open { (Icon::Menu.render("icon")) }
                    span.icon-close { (Icon::Close.render("icon")) }
                }
            }
            div.nav-menu id="nav-menu" hidden {
                @for item in &catalog.nav {
                    button.nav-link type="button" data-scroll-to=(item.target.anchor()) {
                        (item.label)
                    }
                }
                button.btn.btn-hero.btn-block type="button" data-scroll-to=(Section::Contact.anchor()) {
                    "ORDER NOW"
                }
            }
        }
    }
}

fn render_hero(config: &SiteConfig, catalog: &Catalog, assets: &AssetUrls) -> Markup {
    html! {
        section.hero id=(Section::Home.anchor()) {
            div.hero-background {
                img src=(assets.url(&catalog.assets.hero_background)) alt="Premium spices";
            }
            div.hero-content {
                img.hero-logo id=(ids::HERO_LOGO) src=(assets.url(&catalog.assets.hero_logo))
                    alt={ (config.brand.name) " logo" };
                div.rule-line.short id=(ids::HERO_LINE_1) {}
                h1.hero-title id=(ids::HERO_TITLE) { (config.brand.name) }
                div.rule-line.wide id=(ids::HERO_LINE_2) {}
                p.hero-subtitle id=(ids::HERO_SUBTITLE) { (config.brand.tagline) }
                button.btn.btn-hero.btn-large id=(ids::HERO_CTA) type="button"
                    data-scroll-to=(Section::Products.anchor()) {
                    "EXPLORE COLLECTION"
                }
            }
            button.scroll-indicator type="button" aria-label="Scroll to products"
                data-scroll-to=(Section::Products.anchor()) {
                (Icon::ArrowDown.render("icon bounce"))
            }
        }
    }
}

fn render_about(catalog: &Catalog, assets: &AssetUrls) -> Markup {
    let parser = Parser::new(&catalog.story.body);
    let mut story_html = String::new();
    md_html::push_html(&mut story_html, parser);

    html! {
        section.about id=(Section::About.anchor()) {
            div.container {
                div.map-block {
                    (section_heading(ids::MAP_HEADING, &catalog.story.map_heading))
                    div.spice-map id=(ids::MAP) {
                        img.map-image src=(assets.url(&catalog.assets.map)) alt="Map";
                        @for (i, marker) in catalog.markers.iter().enumerate() {
                            @let style = format!("top: {}%; left: {}%", marker.top, marker.left);
                            div.spice-marker id=(ids::marker(i)) style=(style) {
                                @if let Some(spice) = catalog.find_spice(&marker.spice) {
                                    img src=(assets.url(&spice.image)) alt=(spice.name);
                                }
                                span { (marker.spice) }
                            }
                        }
                    }
                }
                div.story {
                    (section_heading(ids::ABOUT_HEADING, &catalog.story.heading))
                    (rule_line(Some(ids::ABOUT_LINE)))
                    div.story-text id=(ids::ABOUT_TEXT) {
                        (PreEscaped(story_html))
                    }
                }
                div.feature-grid {
                    @for (i, feature) in catalog.features.iter().enumerate() {
                        div.feature-card id=(ids::feature(i)) {
                            (feature.icon.render("icon feature-icon"))
                            h3 { (feature.title) }
                            p { (feature.description) }
                        }
                    }
                }
            }
        }
    }
}

fn render_spice(i: usize, spice: &Spice, is_last: bool, assets: &AssetUrls) -> Markup {
    let even = i % 2 == 0;
    html! {
        div.spice-row data-slug=(spice.slug()) {
            @if !is_last {
                div.spice-line id=(ids::spice_line(i)) {}
            }
            article.spice-card.even[even].odd[!even] id=(ids::spice_card(i)) {
                div.spice-media {
                    img.spice-image id=(ids::spice_image(i)) src=(assets.url(&spice.image))
                        alt=(spice.name) loading="lazy";
                    span.spice-number { (format!("{:02}", i + 1)) }
                }
                div.spice-content id=(ids::spice_content(i)) {
                    h3 { (spice.name) }
                    p.scientific-name { (spice.scientific_name) }
                    (rule_line(None))
                    p.spice-description { (spice.description) }
                    dl.spice-facts {
                        div {
                            dt { "Origin" }
                            dd { (spice.origin) }
                        }
                        div {
                            dt { "Uses" }
                            dd { (spice.uses.join(", ")) }
                        }
                    }
                }
            }
        }
    }
}

fn render_products(catalog: &Catalog, assets: &AssetUrls) -> Markup {
    let count = catalog.spices.len();
    html! {
        section.products id=(Section::Products.anchor()) {
            div.container {
                div.section-intro {
                    (section_heading(ids::PRODUCTS_HEADING, "OUR COLLECTION"))
                    (rule_line(None))
                    p.section-subtitle id=(ids::PRODUCTS_SUBTITLE) {
                        "Each spice tells a story of tradition, carefully sourced and processed to preserve its authentic character"
                    }
                }
                div.spice-list {
                    @for (i, spice) in catalog.spices.iter().enumerate() {
                        (render_spice(i, spice, i + 1 == count, assets))
                    }
                }
            }
        }
    }
}

fn render_process(catalog: &Catalog) -> Markup {
    html! {
        section.process id=(Section::Process.anchor()) {
            div.container {
                div.section-intro {
                    (section_heading(ids::PROCESS_HEADING, "OUR PROCESS"))
                    (rule_line(Some(ids::PROCESS_LINE)))
                    p.section-subtitle {
                        "From seed to shelf, every step is carefully orchestrated to deliver unparalleled quality"
                    }
                }
                div.timeline {
                    div.timeline-track {
                        div.timeline-fill id=(ids::PROCESS_TIMELINE) {}
                    }
                    @for (i, step) in catalog.steps.iter().enumerate() {
                        @let even = i % 2 == 0;
                        div.step.even[even].odd[!even] id=(ids::step(i)) {
                            div.step-body {
                                span.step-number { (step.number()) }
                                h3 { (step.title) }
                                (rule_line(None))
                                p { (step.description) }
                            }
                            div.step-icon id=(ids::step_icon(i)) {
                                (step.icon.render("icon"))
                            }
                            div.step-spacer {}
                        }
                    }
                    div.timeline-end {
                        (Icon::ArrowRight.render("icon pulse"))
                    }
                }
            }
        }
    }
}

/// The contact form. Field order and names follow [`Field::ALL`].
pub fn render_contact_form(config: &SiteConfig) -> Markup {
    let placeholder = |field: Field| match field {
        Field::Name => "Your Name",
        Field::Email => "your@email.com",
        Field::Phone => "Your Phone",
        Field::Message => "Tell us about your requirements...",
    };
    html! {
        form.contact-form id=(ids::CONTACT_FORM)
            data-redirect-base=(config.contact.redirect_base())
            data-greeting=(config.contact.greeting)
            data-notice=(config.contact.notice) {
            @for field in Field::ALL {
                @let id = format!("contact-{}", field.key());
                div.form-field {
                    label for=(id) { (field.label()) }
                    @match field {
                        Field::Message => {
                            textarea id=(id) name=(field.key()) rows="6"
                                placeholder=(placeholder(field)) data-label=(field.label()) required {}
                        }
                        Field::Email => {
                            input id=(id) name=(field.key()) type="email"
                                placeholder=(placeholder(field)) data-label=(field.label()) required;
                        }
                        Field::Phone => {
                            input id=(id) name=(field.key()) type="tel"
                                placeholder=(placeholder(field)) data-label=(field.label()) required;
                        }
                        Field::Name => {
                            input id=(id) name=(field.key()) type="text"
                                placeholder=(placeholder(field)) data-label=(field.label()) required;
                        }
                    }
                }
            }
            button.btn.btn-hero.btn-block type="submit" {
                "SEND INQUIRY "
                (Icon::Send.render("icon"))
            }
        }
    }
}

fn render_contact(config: &SiteConfig, catalog: &Catalog) -> Markup {
    html! {
        section.contact id=(Section::Contact.anchor()) {
            div.container {
                div.section-intro {
                    (section_heading(ids::CONTACT_HEADING, "GET IN TOUCH"))
                    (rule_line(Some(ids::CONTACT_LINE)))
                    p.section-subtitle {
                        "Ready to experience premium quality? Contact us today to place your order"
                    }
                }
                div.contact-grid {
                    div.contact-info id=(ids::CONTACT_INFO) {
                        h3 { "CONTACT INFORMATION" }
                        (rule_line(None))
                        ul.channels {
                            @for channel in &catalog.channels {
                                li.channel {
                                    span.channel-icon { (channel.icon.render("icon")) }
                                    div {
                                        p.channel-label { (channel.label) }
                                        @if let Some(href) = &channel.href {
                                            @if channel.external {
                                                a href=(href) target="_blank" rel="noopener" { (channel.value) }
                                            } @else {
                                                a href=(href) { (channel.value) }
                                            }
                                        } @else {
                                            p { (channel.value) }
                                        }
                                    }
                                }
                            }
                        }
                        @if !catalog.story.why_choose_us.is_empty() {
                            div.why-us {
                                h4 { "WHY CHOOSE US" }
                                ul {
                                    @for reason in &catalog.story.why_choose_us {
                                        li { (reason) }
                                    }
                                }
                            }
                        }
                    }
                    (render_contact_form(config))
                }
            }
            div.toast id="toast" role="status" aria-live="polite" hidden {}
        }
    }
}

fn render_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            div.rule-line.faint {}
            p.footer-copy { (config.brand.footer) }
            p.footer-since {
                "Bringing authentic flavors to your table since " (config.brand.since)
            }
        }
    }
}

/// Render the whole page.
pub fn render_page(
    config: &SiteConfig,
    catalog: &Catalog,
    assets: &AssetUrls,
    rules_json: &str,
) -> Markup {
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);

    let content = html! {
        (render_nav(config, catalog, assets))
        main {
            (render_hero(config, catalog, assets))
            (render_about(catalog, assets))
            (render_products(catalog, assets))
            (render_process(catalog))
            (render_contact(config, catalog))
        }
        (render_footer(config))
    };

    let scripts = html! {
        script type="application/json" id="reveal-rules" {
            (PreEscaped(script_safe_json(rules_json)))
        }
        script { (PreEscaped(REVEAL_JS)) }
        script { (PreEscaped(NAV_JS)) }
        script { (PreEscaped(CONTACT_JS)) }
    };

    base_document(&config.brand.name, &css, content, scripts)
}

// ============================================================================
// Tests
// ============================================================================
