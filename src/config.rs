//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The user file is
//! sparse: stock defaults form the base layer and any key present in the
//! user file overrides it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [brand]
//! name = "PURE SPICES"
//! tagline = "Authentic • Natural • Premium Quality"
//! footer = "© 2025 PURE SPICES COMPANY"
//! since = 1950
//!
//! [navigation]
//! scroll_threshold = 50     # px scrolled before the header turns solid
//!
//! [contact]
//! host = "wa.me"            # messaging host, no scheme
//! number = "773800558"      # digits only
//! greeting = "Hello! I'm interested in placing an order."
//! notice = "Redirecting to WhatsApp..."
//!
//! [reveal]
//! start = 0.8               # viewport fraction where headings start revealing
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#6b6b6b"
//! border = "#e5e5e5"
//! accent = "#111111"
//!
//! [colors.dark]
//! background = "#0c0c0c"
//! text = "#f2f2f2"
//! text_muted = "#9a9a9a"
//! border = "#2a2a2a"
//! accent = "#f2f2f2"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business name, tagline and footer copy.
    pub brand: BrandConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Header behaviour.
    pub navigation: NavigationConfig,
    /// Messaging redirect used by the contact form.
    pub contact: ContactConfig,
    /// Reveal animation defaults.
    pub reveal: RevealConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contact.number.is_empty()
            || !self.contact.number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Validation(
                "contact.number must be a non-empty string of digits".into(),
            ));
        }
        if self.contact.host.is_empty() || self.contact.host.contains("://") {
            return Err(ConfigError::Validation(
                "contact.host must be a bare host name such as \"wa.me\"".into(),
            ));
        }
        let threshold = self.navigation.scroll_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ConfigError::Validation(
                "navigation.scroll_threshold must be >= 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.start) {
            return Err(ConfigError::Validation(
                "reveal.start must be between 0 and 1".into(),
            ));
        }
        if self.brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand.name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Brand copy shown in the header, hero and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    pub name: String,
    pub tagline: String,
    pub footer: String,
    /// Founding year, shown as "since" in the footer.
    pub since: u16,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "PURE SPICES".to_string(),
            tagline: "Authentic • Natural • Premium Quality".to_string(),
            footer: "© 2025 PURE SPICES COMPANY".to_string(),
            since: 1950,
        }
    }
}

/// Header behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Vertical scroll offset (px) past which the header switches to its
    /// solid variant.
    pub scroll_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
        }
    }
}

/// Messaging redirect target for the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Messaging host without scheme.
    pub host: String,
    /// Recipient number, digits only.
    pub number: String,
    /// First line of the forwarded message.
    pub greeting: String,
    /// Transient notification shown after submitting.
    pub notice: String,
}

impl ContactConfig {
    /// `https://<host>/<number>`, without query.
    pub fn redirect_base(&self) -> String {
        format!("https://{}/{}", self.host, self.number)
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            host: "wa.me".to_string(),
            number: "773800558".to_string(),
            greeting: "Hello! I'm interested in placing an order.".to_string(),
            notice: "Redirecting to WhatsApp...".to_string(),
        }
    }
}

/// Reveal animation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Viewport fraction (from the top) the heading top edge must cross.
    pub start: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { start: 0.8 }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary copy: subtitles, labels, scientific names.
    pub text_muted: String,
    pub border: String,
    /// Lines, buttons and the timeline fill.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#6b6b6b".to_string(),
            border: "#e5e5e5".to_string(),
            accent: "#111111".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0c0c0c".to_string(),
            text: "#f2f2f2".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2a2a2a".to_string(),
            accent: "#f2f2f2".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a TOML file from `dir` as a raw value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_toml(dir: &Path, file_name: &str) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(None);
    }
    log::debug!("reading {}", path.display());
    let content = fs::read_to_string(&path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_toml(root, "config.toml")?;
    if overlay.is_none() {
        log::info!("no config.toml in {}, using stock defaults", root.display());
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Spice Site Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Brand copy
# ---------------------------------------------------------------------------
[brand]
name = "PURE SPICES"
tagline = "Authentic • Natural • Premium Quality"
footer = "© 2025 PURE SPICES COMPANY"
# Founding year, rendered as "since <year>" in the footer.
since = 1950

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Pixels scrolled before the header switches to its solid style.
scroll_threshold = 50

# ---------------------------------------------------------------------------
# Contact redirect
# ---------------------------------------------------------------------------
[contact]
# The form opens https://<host>/<number>?text=<message> in a new tab.
host = "wa.me"
number = "773800558"
greeting = "Hello! I'm interested in placing an order."
notice = "Redirecting to WhatsApp..."

# ---------------------------------------------------------------------------
# Reveal animations
# ---------------------------------------------------------------------------
[reveal]
# Section headings start revealing when their top edge crosses this
# fraction of the viewport height (0 = top, 1 = bottom).
start = 0.8

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#6b6b6b"
border = "#e5e5e5"
accent = "#111111"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0c0c0c"
text = "#f2f2f2"
text_muted = "#9a9a9a"
border = "#2a2a2a"
accent = "#f2f2f2"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}
