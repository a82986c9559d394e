//! Shared types used across the catalog, renderer, and page runtime.
//!
//! [`Section`] is the stable identity of a top-level page block. Its anchor
//! id is part of the page's external contract: navigation, the hero CTA and
//! the serialized reveal rules all address sections through it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A top-level, independently animated block of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    About,
    Products,
    Process,
    Contact,
}

impl Section {
    /// Page order. The footer follows `Contact` and has no anchor.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Products,
        Section::Process,
        Section::Contact,
    ];

    /// In-page anchor id, without the leading `#`.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Products => "products",
            Section::Process => "process",
            Section::Contact => "contact",
        }
    }

    /// Anchor as a fragment link (`#products`).
    pub fn href(self) -> String {
        format!("#{}", self.anchor())
    }

    /// Human-readable section name used in CLI output.
    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Hero",
            Section::About => "About",
            Section::Products => "Products",
            Section::Process => "Production Process",
            Section::Contact => "Contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start_matches('#');
        Section::ALL
            .into_iter()
            .find(|section| section.anchor().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

/// A navigation entry: a label that scrolls to a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub label: String,
    pub target: Section,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_are_stable() {
        let anchors: Vec<&str> = Section::ALL.iter().map(|s| s.anchor()).collect();
        assert_eq!(anchors, ["home", "about", "products", "process", "contact"]);
    }

    #[test]
    fn parse_accepts_fragment_form() {
        assert_eq!("#process".parse::<Section>().unwrap(), Section::Process);
        assert_eq!("Contact".parse::<Section>().unwrap(), Section::Contact);
        assert!("footer".parse::<Section>().is_err());
    }

    #[test]
    fn nav_item_deserializes_lowercase_target() {
        let item: NavItem = toml::from_str("label = \"HOME\"\ntarget = \"home\"").unwrap();
        assert_eq!(item.target, Section::Home);
    }
}
