//! Content catalog: navigation, spices, map markers, features, process
//! steps, story copy and contact channels.
//!
//! The stock catalog ships inside the binary (`static/catalog.toml`). An
//! optional `content/catalog.toml` is layered over it with the same merge
//! used for `config.toml`: lists are replaced wholesale, tables are merged
//! key by key. The result is validated once and never mutated afterwards.
//!
//! Identity is array position. Rendering order is source order.

use crate::config::{ConfigError, load_raw_toml, merge_toml};
use crate::icons::Icon;
use crate::types::NavItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

const STOCK_CATALOG: &str = include_str!("../static/catalog.toml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Catalog validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for CatalogError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => CatalogError::Io(e),
            ConfigError::Toml(e) => CatalogError::Toml(e),
            ConfigError::Validation(msg) => CatalogError::Validation(msg),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub nav: Vec<NavItem>,
    pub assets: Assets,
    pub story: Story,
    pub spices: Vec<Spice>,
    pub markers: Vec<MapMarker>,
    pub features: Vec<Feature>,
    pub steps: Vec<ProcessStep>,
    pub channels: Vec<ContactChannel>,
}

/// Site-wide images, relative to `content/assets/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Assets {
    /// Header logo.
    pub logo: String,
    /// Large logo in the hero.
    pub hero_logo: String,
    pub hero_background: String,
    /// Map graphic the spice markers are drawn over.
    pub map: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Story {
    pub map_heading: String,
    pub heading: String,
    /// Markdown.
    pub body: String,
    pub why_choose_us: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Spice {
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub origin: String,
    pub uses: Vec<String>,
    /// Relative to `content/assets/`.
    pub image: String,
}

impl Spice {
    /// `"Pepper Seed"` → `"pepper-seed"`.
    pub fn slug(&self) -> String {
        self.name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// A spice marker over the map, positioned in percent of the map image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapMarker {
    /// Name of a catalog spice; its image is reused for the marker.
    pub spice: String,
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessStep {
    pub ordinal: u32,
    pub title: String,
    pub description: String,
    pub icon: Icon,
}

impl ProcessStep {
    /// Zero-padded display number (`01`).
    pub fn number(&self) -> String {
        format!("{:02}", self.ordinal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactChannel {
    pub icon: Icon,
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub href: Option<String>,
    /// Open in a new tab.
    #[serde(default)]
    pub external: bool,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn stock() -> Self {
        toml::from_str(STOCK_CATALOG).expect("stock catalog must parse")
    }

    pub fn stock_toml() -> &'static str {
        STOCK_CATALOG
    }

    pub fn find_spice(&self, name: &str) -> Option<&Spice> {
        self.spices.iter().find(|s| s.name == name)
    }

    /// Every image the page references, relative to `content/assets/`,
    /// without duplicates, in first-use order.
    pub fn asset_paths(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let all = [
            self.assets.logo.as_str(),
            self.assets.hero_logo.as_str(),
            self.assets.hero_background.as_str(),
            self.assets.map.as_str(),
        ]
        .into_iter()
        .chain(self.spices.iter().map(|s| s.image.as_str()));
        all.filter(|p| seen.insert(*p)).collect()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |msg: String| Err(CatalogError::Validation(msg));

        if self.spices.is_empty() {
            return invalid("at least one spice is required".into());
        }
        let mut targets = BTreeSet::new();
        for item in &self.nav {
            if item.label.trim().is_empty() {
                return invalid(format!("nav entry for #{} has an empty label", item.target));
            }
            if !targets.insert(item.target) {
                return invalid(format!("duplicate nav target #{}", item.target));
            }
        }
        for spice in &self.spices {
            if spice.name.trim().is_empty() || spice.image.trim().is_empty() {
                return invalid("every spice needs a name and an image".into());
            }
        }
        if self.story.heading.trim().is_empty() || self.story.map_heading.trim().is_empty() {
            return invalid("story heading and map heading must not be empty".into());
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.title.trim().is_empty() {
                return invalid(format!("process step {} has an empty title", i + 1));
            }
            if step.ordinal as usize != i + 1 {
                return invalid(format!(
                    "process step '{}' has ordinal {}, expected {}",
                    step.title,
                    step.ordinal,
                    i + 1
                ));
            }
        }
        for marker in &self.markers {
            if self.find_spice(&marker.spice).is_none() {
                return invalid(format!("map marker '{}' names no catalog spice", marker.spice));
            }
            if !(0.0..=100.0).contains(&marker.top) || !(0.0..=100.0).contains(&marker.left) {
                return invalid(format!("map marker '{}' lies outside the map", marker.spice));
            }
        }
        if self.features.iter().any(|f| f.title.trim().is_empty()) {
            return invalid("every feature needs a title".into());
        }
        Ok(())
    }
}

/// Load `catalog.toml` from `root` over the stock catalog and validate it.
pub fn load_catalog(root: &Path) -> Result<Catalog, CatalogError> {
    let base: toml::Value = toml::from_str(STOCK_CATALOG)?;
    let merged = match load_raw_toml(root, "catalog.toml")? {
        Some(overlay) => {
            log::info!("applying catalog overrides from {}", root.display());
            merge_toml(base, overlay)
        }
        None => base,
    };
    let catalog: Catalog = merged.try_into()?;
    catalog.validate()?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stock_catalog_shape() {
        let catalog = Catalog::stock();
        assert_eq!(catalog.nav.len(), 5);
        assert_eq!(catalog.spices.len(), 7);
        assert_eq!(catalog.steps.len(), 4);
        assert_eq!(catalog.features.len(), 4);
        assert_eq!(catalog.markers.len(), 7);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn stock_order_matches_source() {
        let catalog = Catalog::stock();
        let names: Vec<&str> = catalog.spices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Coffee",
                "Cinnamon",
                "Cardamom",
                "Pepper Seed",
                "Cloves",
                "Green Tea",
                "Ceylon Tea"
            ]
        );
        let nav: Vec<Section> = catalog.nav.iter().map(|n| n.target).collect();
        assert_eq!(nav, Section::ALL);
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        let catalog = Catalog::stock();
        assert_eq!(catalog.find_spice("Pepper Seed").unwrap().slug(), "pepper-seed");
    }

    #[test]
    fn step_number_is_zero_padded() {
        let catalog = Catalog::stock();
        assert_eq!(catalog.steps[0].number(), "01");
        assert_eq!(catalog.steps[3].number(), "04");
    }

    #[test]
    fn asset_paths_are_unique() {
        let mut catalog = Catalog::stock();
        catalog.spices[1].image = catalog.spices[0].image.clone();
        let paths = catalog.asset_paths();
        let unique: BTreeSet<&&str> = paths.iter().collect();
        assert_eq!(paths.len(), unique.len());
        assert_eq!(paths[0], "logo1.png");
    }

    #[test]
    fn load_without_override_is_stock() {
        let tmp = TempDir::new().unwrap();
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.spices.len(), 7);
    }

    #[test]
    fn override_replaces_lists_and_merges_tables() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("catalog.toml"),
            r#"
markers = []

[story]
heading = "WHO WE ARE"

[[spices]]
name = "Nutmeg"
scientific_name = "Myristica fragrans"
description = "Warm and nutty."
origin = "Sri Lanka"
uses = ["Baking"]
image = "spice-nutmeg.jpg"
"#,
        )
        .unwrap();
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.spices.len(), 1);
        assert_eq!(catalog.spices[0].name, "Nutmeg");
        assert_eq!(catalog.story.heading, "WHO WE ARE");
        // Sibling keys keep stock values
        assert_eq!(catalog.story.map_heading, "Spices of Sri Lanka");
        assert_eq!(catalog.steps.len(), 4);
    }

    #[test]
    fn marker_must_name_a_spice() {
        let mut catalog = Catalog::stock();
        catalog.markers[0].spice = "Saffron".to_string();
        assert!(matches!(catalog.validate(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn duplicate_nav_target_rejected() {
        let mut catalog = Catalog::stock();
        catalog.nav[1].target = Section::Home;
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn step_ordinals_must_be_consecutive() {
        let mut catalog = Catalog::stock();
        catalog.steps.swap(0, 1);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn empty_step_title_rejected() {
        let mut catalog = Catalog::stock();
        catalog.steps[2].title = "  ".to_string();
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(msg) if msg.contains("step 3")));
    }

    #[test]
    fn empty_story_headings_rejected() {
        let mut catalog = Catalog::stock();
        catalog.story.heading = String::new();
        assert!(catalog.validate().is_err());

        let mut catalog = Catalog::stock();
        catalog.story.map_heading = String::new();
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn override_with_empty_step_title_fails_to_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("catalog.toml"),
            r#"
[[steps]]
ordinal = 1
title = ""
description = "Hand picked."
icon = "leaf"
"#,
        )
        .unwrap();
        assert!(matches!(load_catalog(tmp.path()), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn unknown_catalog_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("catalog.toml"), "testimonials = []").unwrap();
        assert!(matches!(load_catalog(tmp.path()), Err(CatalogError::Toml(_))));
    }
}
