//! End-to-end tests driving the built `spice-site` binary.
//!
//! Each test copies the fixture content into a temp directory, writes
//! placeholder assets, and runs a CLI command against it.

use spice_site::content::{self, Catalog};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

/// Copy the fixture config and catalog and write every referenced asset.
fn setup_source() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in ["config.toml", "catalog.toml"] {
        fs::copy(fixture_dir().join(name), tmp.path().join(name)).unwrap();
    }
    let catalog = content::load_catalog(tmp.path()).unwrap();
    write_assets(tmp.path(), &catalog);
    tmp
}

fn write_assets(root: &Path, catalog: &Catalog) {
    let assets = root.join("assets");
    fs::create_dir_all(&assets).unwrap();
    for path in catalog.asset_paths() {
        fs::write(assets.join(path), format!("placeholder for {path}")).unwrap();
    }
}

fn run(source: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spice-site"))
        .arg("--source")
        .arg(source)
        .args(args)
        .output()
        .expect("failed to run spice-site")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn build_writes_single_page_and_assets() {
    let source = setup_source();
    let out = TempDir::new().unwrap();
    let result = run(
        source.path(),
        &["build", "--output", out.path().to_str().unwrap()],
    );
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("<title>FIXTURE SPICES</title>"));
    for anchor in ["home", "about", "products", "process", "contact"] {
        assert!(html.contains(&format!(r#"id="{anchor}""#)), "missing #{anchor}");
    }
    assert!(html.contains(r#"data-threshold="80""#));
    assert!(html.contains(r#"data-redirect-base="https://wa.me/15550001111""#));
    assert!(html.contains("<h3>Cinnamon</h3>"));
    assert!(!html.contains("<h3>Coffee</h3>"));
    assert!(out.path().join("assets/spice-cloves.jpg").exists());

    let summary = stdout(&result);
    assert!(summary.contains("Generated 5 sections, 3 spices, 4 steps"));
    assert!(summary.contains("==> Build complete"));
}

#[test]
fn embedded_rule_table_is_valid_json() {
    let source = setup_source();
    let out = TempDir::new().unwrap();
    let result = run(
        source.path(),
        &["build", "--output", out.path().to_str().unwrap()],
    );
    assert!(result.status.success());

    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    let open = r#"<script type="application/json" id="reveal-rules">"#;
    let start = html.find(open).unwrap() + open.len();
    let end = start + html[start..].find("</script>").unwrap();
    let table: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();

    let products = table["products"].as_array().unwrap();
    // heading, subtitle, then line/card/image/content per card minus the last line
    assert_eq!(products.len(), 2 + 3 * 4 - 1);
    assert_eq!(table["home"][0]["trigger"]["kind"], "load");
}

#[test]
fn build_fails_on_missing_asset() {
    let source = setup_source();
    fs::remove_file(source.path().join("assets/spice-cardamom.jpg")).unwrap();
    let out = TempDir::new().unwrap();
    let result = run(
        source.path(),
        &["build", "--output", out.path().to_str().unwrap()],
    );
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("spice-cardamom.jpg"));
    assert!(!out.path().join("index.html").exists());
}

#[test]
fn check_validates_without_output() {
    let source = setup_source();
    let result = run(source.path(), &["check"]);
    assert!(result.status.success());
    let text = stdout(&result);
    assert!(text.contains("001 Cinnamon"));
    assert!(text.contains("==> Content is valid"));
    assert!(!source.path().join("dist").exists());
}

#[test]
fn check_rejects_unknown_config_key() {
    let source = setup_source();
    fs::write(source.path().join("config.toml"), "[brand]\nslogan = \"x\"\n").unwrap();
    let result = run(source.path(), &["check"]);
    assert!(!result.status.success());
}

#[test]
fn contact_link_encodes_message() {
    let source = setup_source();
    let result = run(
        source.path(),
        &[
            "contact-link",
            "--name",
            "Alice",
            "--email",
            "a@x.com",
            "--phone",
            "555-1234",
            "--message",
            "need 5kg cinnamon",
        ],
    );
    assert!(result.status.success());
    let url = stdout(&result);
    let url = url.trim();
    assert!(url.starts_with("https://wa.me/15550001111?text="));
    assert!(url.contains("Name%3A%20Alice%0AEmail%3A%20a%40x.com"));
    assert!(!url.contains(' '));
}

#[test]
fn contact_link_rejects_empty_field() {
    let source = setup_source();
    let result = run(
        source.path(),
        &[
            "contact-link",
            "--name",
            "",
            "--email",
            "a@x.com",
            "--phone",
            "555",
            "--message",
            "hi",
        ],
    );
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("MissingField(Name)"));
}

#[test]
fn rules_for_one_section() {
    let source = setup_source();
    let result = run(source.path(), &["rules", "contact"]);
    assert!(result.status.success());
    let text = stdout(&result);
    assert!(text.starts_with("Contact (#contact)"));
    assert!(text.contains("004 contact-form"));
    assert!(!text.contains("Hero"));
}

#[test]
fn gen_commands_print_parseable_toml() {
    let source = TempDir::new().unwrap();
    for cmd in ["gen-config", "gen-catalog"] {
        let result = run(source.path(), &[cmd]);
        assert!(result.status.success());
        let _: toml::Value = toml::from_str(&stdout(&result)).unwrap();
    }
}
