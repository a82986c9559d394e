//! Browser tests for the generated page: navigation, reveal lifecycle and
//! the contact form, exercised in headless Chrome over `file://`.
//!
//! Run with: `cargo test --test browser_page -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use spice_site::content::{self, Catalog};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/browser/generated")
}

fn write_assets(root: &Path, catalog: &Catalog) {
    let assets = root.join("assets");
    std::fs::create_dir_all(&assets).unwrap();
    for path in catalog.asset_paths() {
        std::fs::write(assets.join(path), b"").unwrap();
    }
}

fn ensure_fixtures_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let bin = env!("CARGO_BIN_EXE_spice-site");
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let fixture = root.join("fixtures/content");
        let source = root.join("tests/browser/content");

        for dir in [&source, &generated_dir()] {
            if dir.exists() {
                std::fs::remove_dir_all(dir).expect("failed to clean browser dir");
            }
        }
        std::fs::create_dir_all(&source).unwrap();
        for name in ["config.toml", "catalog.toml"] {
            std::fs::copy(fixture.join(name), source.join(name)).unwrap();
        }
        let catalog = content::load_catalog(&source).expect("fixture catalog must load");
        write_assets(&source, &catalog);

        let status = Command::new(bin)
            .args([
                "build",
                "--source",
                source.to_str().unwrap(),
                "--output",
                generated_dir().to_str().unwrap(),
            ])
            .status()
            .expect("failed to run spice-site");
        assert!(status.success(), "fixture generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn load_index() -> Arc<Tab> {
    ensure_fixtures_built();
    let tab = browser().new_tab().unwrap();
    let file = generated_dir().join("index.html");
    assert!(file.exists(), "missing: {}", file.display());

    tab.navigate_to(&format!("file://{}", file.display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab
}

fn eval(tab: &Tab, js: &str) -> serde_json::Value {
    tab.evaluate(js, false)
        .expect("failed to evaluate JS")
        .value
        .expect("no value returned")
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn header_turns_solid_past_threshold() {
    let tab = load_index();
    let before = eval(&tab, "document.getElementById('site-nav').classList.contains('scrolled')");
    assert_eq!(before, false);

    eval(&tab, "window.scrollTo(0, 81); window.dispatchEvent(new Event('scroll')); true");
    thread::sleep(Duration::from_millis(100));
    let after = eval(&tab, "document.getElementById('site-nav').classList.contains('scrolled')");
    assert_eq!(after, true);

    eval(&tab, "window.scrollTo(0, 80); window.dispatchEvent(new Event('scroll')); true");
    thread::sleep(Duration::from_millis(100));
    let back = eval(&tab, "document.getElementById('site-nav').classList.contains('scrolled')");
    assert_eq!(back, false);
}

#[test]
#[ignore]
fn mobile_menu_closes_on_selection() {
    let tab = load_index();
    eval(&tab, "document.querySelector('.nav-toggle').click(); true");
    assert_eq!(eval(&tab, "document.getElementById('nav-menu').hidden"), false);

    eval(&tab, "document.querySelector('#nav-menu [data-scroll-to=\"process\"]').click(); true");
    assert_eq!(eval(&tab, "document.getElementById('nav-menu').hidden"), true);
}

// ---------------------------------------------------------------------------
// Reveal lifecycle
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn every_section_mounts_on_load() {
    let tab = load_index();
    let mounted = eval(&tab, "window.spiceReveal.mounted().length");
    assert_eq!(mounted, 5);
}

#[test]
#[ignore]
fn hero_timeline_settles() {
    let tab = load_index();
    thread::sleep(Duration::from_secs(5));
    let opacity = eval(&tab, "getComputedStyle(document.getElementById('hero-title')).opacity");
    assert_eq!(opacity, "1");
}

#[test]
#[ignore]
fn remount_cycles_do_not_leak_listeners() {
    let tab = load_index();
    let initial = eval(&tab, "window.spiceReveal.listenerCount()").as_u64().unwrap();
    assert!(initial > 0);

    let after = eval(
        &tab,
        r#"(function() {
            for (let i = 0; i < 20; i++) {
                window.spiceReveal.unmountAll();
                window.spiceReveal.mountAll();
            }
            return window.spiceReveal.listenerCount();
        })()"#,
    );
    assert_eq!(after.as_u64().unwrap(), initial);

    let empty = eval(&tab, "window.spiceReveal.unmountAll(); window.spiceReveal.listenerCount()");
    assert_eq!(empty, 0);
}

#[test]
#[ignore]
fn unmounting_one_section_keeps_others_live() {
    let tab = load_index();
    assert_eq!(eval(&tab, "window.spiceReveal.unmount('contact')"), true);
    let before = eval(&tab, "getComputedStyle(document.getElementById('about-heading')).opacity");
    assert_eq!(before, "0");

    eval(
        &tab,
        r#"(function() {
            const el = document.getElementById('about-heading');
            window.scrollTo(0, el.getBoundingClientRect().top + window.scrollY);
            window.dispatchEvent(new Event('scroll'));
            return true;
        })()"#,
    );
    thread::sleep(Duration::from_secs(2));
    let after = eval(&tab, "getComputedStyle(document.getElementById('about-heading')).opacity");
    assert_eq!(after, "1");
}

#[test]
#[ignore]
fn mount_is_idempotent() {
    let tab = load_index();
    assert_eq!(eval(&tab, "window.spiceReveal.mount('contact')"), false);
    assert_eq!(eval(&tab, "window.spiceReveal.unmount('contact')"), true);
    assert_eq!(eval(&tab, "window.spiceReveal.unmount('contact')"), false);
    assert_eq!(eval(&tab, "window.spiceReveal.mount('contact')"), true);
}

#[test]
#[ignore]
fn unmount_reverts_inline_styles() {
    let tab = load_index();
    eval(&tab, "window.spiceReveal.unmount('contact'); true");
    let style = eval(&tab, "document.getElementById('contact-form').getAttribute('style') || ''");
    assert_eq!(style, "");
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

const STUB_OPEN: &str = r#"
    window.__opened = [];
    window.open = function(url, target, features) {
        window.__opened.push({ url: url, target: target });
        return null;
    };
    true
"#;

#[test]
#[ignore]
fn submit_opens_redirect_and_clears_form() {
    let tab = load_index();
    eval(&tab, STUB_OPEN);
    eval(
        &tab,
        r#"(function() {
            const f = document.getElementById('contact-form');
            f.elements.name.value = 'Alice';
            f.elements.email.value = 'a@x.com';
            f.elements.phone.value = '555-1234';
            f.elements.message.value = 'need 5kg cinnamon';
            f.requestSubmit();
            return true;
        })()"#,
    );

    let opened = eval(&tab, "window.__opened");
    let opened = opened.as_array().unwrap();
    assert_eq!(opened.len(), 1);
    let url = opened[0]["url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/15550001111?text="));
    assert!(url.contains("Name%3A%20Alice%0AEmail%3A%20a%40x.com"));
    assert_eq!(opened[0]["target"], "_blank");

    assert_eq!(eval(&tab, "document.getElementById('contact-form').elements.name.value"), "");
    assert_eq!(eval(&tab, "document.getElementById('toast').hidden"), false);
}

#[test]
#[ignore]
fn empty_field_blocks_submit() {
    let tab = load_index();
    eval(&tab, STUB_OPEN);
    eval(
        &tab,
        r#"(function() {
            const f = document.getElementById('contact-form');
            f.elements.name.value = 'Alice';
            f.dispatchEvent(new Event('submit', { cancelable: true }));
            return true;
        })()"#,
    );
    let opened = eval(&tab, "window.__opened.length");
    assert_eq!(opened, 0);
}
