//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (section,
//! spice, step, rule) leads with its positional index and title. Files are
//! shown as secondary context on indented `Source:` lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Sections
//! 001 Hero → #home
//! 002 About → #about
//! ...
//!
//! Products
//! 001 Coffee
//!     Source: assets/spice-coffee.jpg
//!     Rich aroma with hints of chocolate a...
//!
//! Process
//! 001 Seed Selection
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Hero → #home (6 rules)
//! 002 About → #about (12 rules)
//! ...
//! Generated 5 sections, 7 spices, 4 steps, 11 assets → dist/index.html
//! ```
//!
//! ## Rules
//!
//! ```text
//! Hero (#home)
//! 001 hero-logo
//!     Trigger: load
//!     Play: once, 1.2s elastic_out
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::content::Catalog;
use crate::generate::GenerateReport;
use crate::reveal::{Easing, Edge, Line, Playback, RevealRule, Trigger};
use crate::types::Section;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 001 Hero → #home (6 rules)
/// 001 Coffee
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} {}", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory shown by `check`.
pub fn format_check_output(catalog: &Catalog, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];
    for (i, section) in Section::ALL.iter().enumerate() {
        let detail = format!("\u{2192} {}", section.href());
        lines.push(entity_header(i + 1, section.title(), Some(&detail)));
    }

    lines.push(String::new());
    lines.push("Products".to_string());
    for (i, spice) in catalog.spices.iter().enumerate() {
        lines.push(entity_header(i + 1, &spice.name, None));
        lines.push(format!("{}Source: assets/{}", indent(1), spice.image));
        if !spice.description.is_empty() {
            lines.push(format!("{}{}", indent(1), truncate_desc(&spice.description, 40)));
        }
    }

    lines.push(String::new());
    lines.push("Process".to_string());
    for step in &catalog.steps {
        lines.push(entity_header(step.ordinal as usize, &step.title, None));
    }

    let config_files: Vec<&str> = ["config.toml", "catalog.toml"]
        .into_iter()
        .filter(|name| source_root.join(name).is_file())
        .collect();
    if !config_files.is_empty() {
        lines.push(String::new());
        lines.push("Config".to_string());
        for name in config_files {
            lines.push(format!("{}{}", indent(1), name));
        }
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(catalog: &Catalog, source_root: &Path) {
    for line in format_check_output(catalog, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the build summary.
pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (section, rules)) in report.sections.iter().enumerate() {
        let detail = format!("\u{2192} {} ({})", section.href(), plural(*rules, "rule"));
        lines.push(entity_header(i + 1, section.title(), Some(&detail)));
    }
    lines.push(format!(
        "Generated {}, {}, {}, {} \u{2192} {}",
        plural(report.sections.len(), "section"),
        plural(report.spices, "spice"),
        plural(report.steps, "step"),
        plural(report.assets_copied, "asset"),
        report.index.display()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Rules
// ============================================================================

fn format_line(line: &Line) -> String {
    let edge = match line.edge {
        Edge::Top => "top",
        Edge::Bottom => "bottom",
    };
    format!("{} at {}%", edge, (line.viewport * 100.0).round())
}

fn format_ease(ease: &Easing) -> String {
    match ease {
        Easing::Linear => "linear".to_string(),
        Easing::Power2Out => "power2_out".to_string(),
        Easing::Power3Out => "power3_out".to_string(),
        Easing::BackOut { overshoot } => format!("back_out({overshoot})"),
        Easing::ElasticOut { amplitude, period } => format!("elastic_out({amplitude}, {period})"),
    }
}

/// Primary target, with a count when the rule owns several.
fn format_targets(targets: &[String]) -> String {
    match targets {
        [] => "(none)".to_string(),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{} +{}", first, rest.len()),
    }
}

/// Format one section's reveal rules.
pub fn format_rules(section: Section, rules: &[RevealRule]) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", section.title(), section.href())];
    for (i, rule) in rules.iter().enumerate() {
        lines.push(entity_header(i + 1, &format_targets(&rule.targets), None));
        let trigger = match &rule.trigger {
            Trigger::Load => "load".to_string(),
            Trigger::Scroll { element, start } => {
                format!("#{} {}", element, format_line(start))
            }
        };
        lines.push(format!("{}Trigger: {}", indent(1), trigger));

        let mut play = match rule.playback {
            Playback::Once => format!("once, {}s {}", rule.duration, format_ease(&rule.ease)),
            Playback::Scrub { end, smoothing } => format!(
                "scrub to {}, smoothing {}s, {}",
                format_line(&end),
                smoothing,
                format_ease(&rule.ease)
            ),
        };
        if rule.delay > 0.0 {
            play.push_str(&format!(", delay {}s", rule.delay));
        }
        if rule.stagger > 0.0 {
            play.push_str(&format!(", stagger {}s", rule.stagger));
        }
        lines.push(format!("{}Play: {}", indent(1), play));
        lines.push(format!("{}From: {}", indent(1), rule.from.to_css()));
    }
    lines
}

/// Print one section's rules to stdout.
pub fn print_rules(section: Section, rules: &[RevealRule]) {
    for line in format_rules(section, rules) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
