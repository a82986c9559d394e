//! # Spice Site
//!
//! A static site generator for a single-page spice brand site. The page has
//! five anchored sections (Home, About, Products, Process, Contact) plus a
//! footer, a fixed navigation header, scroll-driven reveal animations, and a
//! contact form that forwards inquiries to a messaging app.
//!
//! # Architecture
//!
//! ```text
//! content/config.toml  ─┐
//! content/catalog.toml ─┼─▶ load + validate ─▶ render (maud) ─▶ dist/index.html
//! content/assets/      ─┘                                     └▶ dist/assets/
//! ```
//!
//! Behavior that runs in the browser is modeled in Rust first. The reveal
//! rules, the navigation state and the contact message are plain types with
//! tests. The renderer serializes the rule table into the page, and the small
//! runtimes in `static/*.js` apply it with the same semantics.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, stock defaults, merging, validation, color CSS |
//! | [`content`] | Content catalog: spices, process steps, features, map markers, channels |
//! | [`types`] | Shared types: [`types::Section`], [`types::NavItem`] |
//! | [`reveal`] | Host-agnostic reveal engine: rules, easing, per-section lifecycle |
//! | [`sections`] | Reveal rule tables per section and the element ids they target |
//! | [`navigation`] | Header state: scrolled style, mobile menu, section scroll targets |
//! | [`contact`] | Contact form validation and messaging redirect |
//! | [`icons`] | Inline SVG icons |
//! | [`generate`] | HTML rendering with Maud, asset copying and fingerprinting |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a compile error, interpolation is escaped by default, and there is no
//! template directory to ship.
//!
//! ## One Owner per Element
//!
//! Every animated element belongs to exactly one reveal rule. Registering a
//! second rule for the same element fails with
//! [`reveal::RevealError::TargetAlreadyOwned`], so two animations can never
//! fight over an inline style.
//!
//! ## Config Layering
//!
//! ```text
//! stock defaults  ←  content/config.toml
//! static/catalog.toml  ←  content/catalog.toml
//! ```
//!
//! Both files are sparse: only the keys that differ from stock need to be
//! written. Unknown keys are rejected.

pub mod config;
pub mod contact;
pub mod content;
pub mod generate;
pub mod icons;
pub mod navigation;
pub mod output;
pub mod reveal;
pub mod sections;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
