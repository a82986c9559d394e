//! Reveal rule tables for each page section.
//!
//! Each section wires its own rules over its own elements; the only thing
//! sections share is the scroll position. Element ids come from [`ids`] so
//! the renderer and the rules cannot drift apart.
//!
//! | Section | Rules |
//! |---|---|
//! | Hero | load timeline: logo spin, line, title, line, subtitle, CTA pop |
//! | About | map heading, staggered markers, story heading/line/text, features |
//! | Products | heading, subtitle; per card: connecting line, card, image, content (scrubbed) |
//! | Process | heading, line, scrubbed timeline; per step: slide-in and icon spin |
//! | Contact | heading, line, info panel, form |

use crate::config::SiteConfig;
use crate::content::Catalog;
use crate::reveal::{Easing, Line, RevealRule, Sequence, VisualState};
use crate::types::Section;
use std::collections::BTreeMap;

/// Element ids shared by the renderer and the rule tables.
pub mod ids {
    pub const HERO_LOGO: &str = "hero-logo";
    pub const HERO_LINE_1: &str = "hero-line-1";
    pub const HERO_TITLE: &str = "hero-title";
    pub const HERO_LINE_2: &str = "hero-line-2";
    pub const HERO_SUBTITLE: &str = "hero-subtitle";
    pub const HERO_CTA: &str = "hero-cta";

    pub const MAP_HEADING: &str = "map-heading";
    pub const MAP: &str = "spice-map";
    pub const ABOUT_HEADING: &str = "about-heading";
    pub const ABOUT_LINE: &str = "about-line";
    pub const ABOUT_TEXT: &str = "about-text";

    pub const PRODUCTS_HEADING: &str = "products-heading";
    pub const PRODUCTS_SUBTITLE: &str = "products-subtitle";

    pub const PROCESS_HEADING: &str = "process-heading";
    pub const PROCESS_LINE: &str = "process-line";
    pub const PROCESS_TIMELINE: &str = "process-timeline";

    pub const CONTACT_HEADING: &str = "contact-heading";
    pub const CONTACT_LINE: &str = "contact-line";
    pub const CONTACT_INFO: &str = "contact-info";
    pub const CONTACT_FORM: &str = "contact-form";

    pub fn marker(i: usize) -> String {
        format!("spice-marker-{i}")
    }

    pub fn feature(i: usize) -> String {
        format!("feature-{i}")
    }

    pub fn spice_line(i: usize) -> String {
        format!("spice-line-{i}")
    }

    pub fn spice_card(i: usize) -> String {
        format!("spice-card-{i}")
    }

    pub fn spice_image(i: usize) -> String {
        format!("spice-image-{i}")
    }

    pub fn spice_content(i: usize) -> String {
        format!("spice-content-{i}")
    }

    pub fn step(i: usize) -> String {
        format!("step-{i}")
    }

    pub fn step_icon(i: usize) -> String {
        format!("step-icon-{i}")
    }
}

fn fade(y: f64) -> VisualState {
    VisualState::new().with_opacity(0.0).with_y(y)
}

fn slide(x: f64) -> VisualState {
    VisualState::new().with_opacity(0.0).with_x(x)
}

fn grow_x() -> VisualState {
    VisualState::new().with_scale_x(0.0)
}

/// Alternating side: even rows come from the left.
fn side(i: usize, distance: f64) -> f64 {
    if i % 2 == 0 { -distance } else { distance }
}

/// Rules for one section.
pub fn section_rules(section: Section, catalog: &Catalog, config: &SiteConfig) -> Vec<RevealRule> {
    let heading = Line::top(config.reveal.start);
    let item = Line::top((config.reveal.start + 0.05).min(1.0));
    match section {
        Section::Home => hero_rules(),
        Section::About => about_rules(catalog, heading, item),
        Section::Products => products_rules(catalog, heading, item),
        Section::Process => process_rules(catalog, heading, item),
        Section::Contact => contact_rules(heading),
    }
}

/// Rules for every section, keyed by section. This is the table the page
/// runtime receives.
pub fn page_rules(catalog: &Catalog, config: &SiteConfig) -> BTreeMap<Section, Vec<RevealRule>> {
    Section::ALL
        .into_iter()
        .map(|section| (section, section_rules(section, catalog, config)))
        .collect()
}

fn hero_rules() -> Vec<RevealRule> {
    Sequence::new()
        .then(
            RevealRule::reveal(
                ids::HERO_LOGO,
                VisualState::new().with_scale(0.0).with_rotation(180.0),
            )
            .duration(1.2)
            .ease(Easing::elastic_out(1.0, 0.5)),
        )
        .overlap(0.5, RevealRule::reveal(ids::HERO_LINE_1, grow_x()))
        .overlap(0.7, RevealRule::reveal(ids::HERO_TITLE, fade(50.0)))
        .overlap(0.5, RevealRule::reveal(ids::HERO_LINE_2, grow_x()))
        .overlap(0.7, RevealRule::reveal(ids::HERO_SUBTITLE, fade(30.0)))
        .overlap(
            0.5,
            RevealRule::reveal(
                ids::HERO_CTA,
                VisualState::new().with_opacity(0.0).with_scale(0.8),
            )
            .duration(0.8)
            .ease(Easing::back_out(2.0)),
        )
        .build()
}

fn about_rules(catalog: &Catalog, heading: Line, item: Line) -> Vec<RevealRule> {
    let mut rules = vec![RevealRule::reveal(ids::MAP_HEADING, fade(40.0)).starting_at(heading)];
    if !catalog.markers.is_empty() {
        let markers: Vec<String> = (0..catalog.markers.len()).map(ids::marker).collect();
        rules.push(
            RevealRule::reveal(
                ids::marker(0),
                VisualState::new().with_opacity(0.0).with_scale(0.5),
            )
            .with_targets(markers)
            .starting_at(item)
            .stagger(0.1)
            .duration(0.8)
            .ease(Easing::back_out(1.7)),
        );
    }
    rules.push(RevealRule::reveal(ids::ABOUT_HEADING, fade(50.0)).starting_at(heading));
    rules.push(
        RevealRule::reveal(ids::ABOUT_LINE, grow_x())
            .starting_at(heading)
            .duration(1.2),
    );
    rules.push(
        RevealRule::reveal(ids::ABOUT_TEXT, fade(30.0))
            .starting_at(heading)
            .delay(0.3),
    );
    for i in 0..catalog.features.len() {
        rules.push(
            RevealRule::reveal(ids::feature(i), fade(50.0))
                .starting_at(item)
                .delay(i as f64 * 0.15),
        );
    }
    rules
}

fn products_rules(catalog: &Catalog, heading: Line, item: Line) -> Vec<RevealRule> {
    let mut rules = vec![
        RevealRule::reveal(ids::PRODUCTS_HEADING, fade(50.0)).starting_at(heading),
        RevealRule::reveal(ids::PRODUCTS_SUBTITLE, fade(30.0))
            .starting_at(heading)
            .delay(0.3),
    ];
    let count = catalog.spices.len();
    for i in 0..count {
        let card = ids::spice_card(i);
        // The last card has no line below it.
        if i + 1 < count {
            rules.push(
                RevealRule::reveal(ids::spice_line(i), VisualState::new().with_scale_y(0.0))
                    .triggered_by(card.clone())
                    .starting_at(item)
                    .origin("top center")
                    .duration(1.2)
                    .scrub(Line::bottom(0.0), 1.0),
            );
        }
        rules.push(
            RevealRule::reveal(
                card.clone(),
                VisualState::new()
                    .with_opacity(0.0)
                    .with_y(100.0)
                    .with_x(side(i, 30.0)),
            )
            .starting_at(item)
            .scrub(Line::top(0.3), 0.5),
        );
        rules.push(
            RevealRule::reveal(
                ids::spice_image(i),
                VisualState::new()
                    .with_opacity(0.0)
                    .with_scale(0.9)
                    .with_y(60.0),
            )
            .triggered_by(card.clone())
            .starting_at(item)
            .duration(1.2)
            .ease(Easing::Power2Out)
            .scrub(Line::top(0.3), 0.8),
        );
        rules.push(
            RevealRule::reveal(ids::spice_content(i), fade(50.0))
                .triggered_by(card)
                .starting_at(item)
                .scrub(Line::top(0.35), 0.6),
        );
    }
    rules
}

fn process_rules(catalog: &Catalog, heading: Line, item: Line) -> Vec<RevealRule> {
    let mut rules = vec![
        RevealRule::reveal(ids::PROCESS_HEADING, fade(50.0)).starting_at(heading),
        RevealRule::reveal(ids::PROCESS_LINE, grow_x())
            .starting_at(heading)
            .duration(1.2),
        RevealRule::reveal(ids::PROCESS_TIMELINE, VisualState::new().with_scale_y(0.0))
            .starting_at(heading)
            .origin("top center")
            .ease(Easing::Linear)
            .scrub(Line::bottom(0.2), 1.0),
    ];
    for i in 0..catalog.steps.len() {
        rules.push(RevealRule::reveal(ids::step(i), slide(side(i, 50.0))).starting_at(item));
        rules.push(
            RevealRule::reveal(
                ids::step_icon(i),
                VisualState::new().with_scale(0.0).with_rotation(180.0),
            )
            .triggered_by(ids::step(i))
            .starting_at(item)
            .delay(0.3)
            .ease(Easing::back_out(2.0)),
        );
    }
    rules
}

fn contact_rules(heading: Line) -> Vec<RevealRule> {
    vec![
        RevealRule::reveal(ids::CONTACT_HEADING, fade(50.0)).starting_at(heading),
        RevealRule::reveal(ids::CONTACT_LINE, grow_x())
            .starting_at(heading)
            .duration(1.2),
        RevealRule::reveal(ids::CONTACT_INFO, slide(-50.0))
            .starting_at(heading)
            .delay(0.3),
        RevealRule::reveal(ids::CONTACT_FORM, slide(50.0))
            .starting_at(heading)
            .delay(0.3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::{Playback, Stage, Trigger};
    use crate::test_helpers::FakeScrollHost;
    use std::collections::BTreeSet;

    fn rules() -> BTreeMap<Section, Vec<RevealRule>> {
        page_rules(&Catalog::stock(), &SiteConfig::default())
    }

    #[test]
    fn every_section_has_rules() {
        let rules = rules();
        for section in Section::ALL {
            assert!(!rules[&section].is_empty(), "{section} has no rules");
        }
    }

    #[test]
    fn all_rules_validate() {
        for rule in rules().values().flatten() {
            rule.validate().unwrap();
        }
    }

    #[test]
    fn every_element_is_owned_once_across_the_page() {
        let mut seen = BTreeSet::new();
        for rule in rules().values().flatten() {
            for target in &rule.targets {
                assert!(seen.insert(target.clone()), "{target} owned twice");
            }
        }
    }

    #[test]
    fn hero_is_a_load_timeline() {
        let hero = &rules()[&Section::Home];
        assert_eq!(hero.len(), 6);
        assert!(hero.iter().all(|r| r.trigger == Trigger::Load));
        let delays: Vec<f64> = hero.iter().map(|r| r.delay).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(hero[0].targets, vec![ids::HERO_LOGO]);
        assert_eq!(hero[5].targets, vec![ids::HERO_CTA]);
    }

    #[test]
    fn markers_stagger_in_catalog_order() {
        let about = &rules()[&Section::About];
        let markers = about
            .iter()
            .find(|r| r.targets.len() > 1)
            .expect("marker rule");
        assert_eq!(markers.targets.len(), 7);
        assert_eq!(markers.targets[0], "spice-marker-0");
        assert_eq!(markers.targets[6], "spice-marker-6");
        assert_eq!(markers.stagger, 0.1);
        // The first marker's own top edge starts the stagger.
        assert_eq!(
            markers.trigger,
            Trigger::Scroll {
                element: ids::marker(0),
                start: Line::top(SiteConfig::default().reveal.start + 0.05),
            }
        );
    }

    #[test]
    fn products_scrub_cards_and_skip_last_line() {
        let products = &rules()[&Section::Products];
        let owns = |id: &str| products.iter().any(|r| r.targets.iter().any(|t| t == id));
        assert!(owns("spice-line-5"));
        assert!(!owns("spice-line-6"));
        let card = products
            .iter()
            .find(|r| r.targets == ["spice-card-0"])
            .unwrap();
        assert!(matches!(card.playback, Playback::Scrub { .. }));
        assert_eq!(card.from.x, Some(-30.0));
        let odd = products
            .iter()
            .find(|r| r.targets == ["spice-card-1"])
            .unwrap();
        assert_eq!(odd.from.x, Some(30.0));
    }

    #[test]
    fn process_timeline_scrubs_between_bounds() {
        let process = &rules()[&Section::Process];
        let timeline = process
            .iter()
            .find(|r| r.targets == [ids::PROCESS_TIMELINE])
            .unwrap();
        assert_eq!(timeline.start_line(), Some(Line::top(0.8)));
        assert_eq!(
            timeline.playback,
            Playback::Scrub {
                end: Line::bottom(0.2),
                smoothing: 1.0
            }
        );
    }

    #[test]
    fn reveal_start_follows_config() {
        let mut config = SiteConfig::default();
        config.reveal.start = 0.6;
        let contact = section_rules(Section::Contact, &Catalog::stock(), &config);
        assert!(contact.iter().all(|r| r.start_line() == Some(Line::top(0.6))));
    }

    #[test]
    fn whole_page_mounts_and_unmounts_cleanly() {
        let catalog = Catalog::stock();
        let config = SiteConfig::default();
        let mut host = FakeScrollHost::new(900.0);
        for (i, rule) in rules().values().flatten().enumerate() {
            if let Trigger::Scroll { element, .. } = &rule.trigger {
                host = host.with_element(element, 1000.0 + i as f64 * 300.0, 250.0);
            }
        }
        let mut stage = Stage::new();
        for _ in 0..3 {
            for section in Section::ALL {
                stage
                    .mount(&mut host, section, section_rules(section, &catalog, &config), 0.0)
                    .unwrap();
            }
            let listeners = host.listener_count();
            assert_eq!(listeners, stage.listener_count());
            for section in Section::ALL {
                stage.unmount(&mut host, section);
            }
            assert_eq!(host.listener_count(), 0);
            assert_eq!(host.styled_count(), 0);
        }
    }
}
