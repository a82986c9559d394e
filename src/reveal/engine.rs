//! Reveal sequencing.
//!
//! A [`RevealContext`] holds the rules one section registered. Each rule
//! moves through a small state machine:
//!
//! ```text
//! Once:   Armed ──(line crossed / load)──▶ Playing ──(all targets done)──▶ Settled
//! Scrub:  Scrubbing { shown } ◀── follows scroll both ways, never settles
//! ```
//!
//! Registration applies the `from` state and evaluates the trigger at once,
//! so elements that are already past their line when the page loads still
//! play. A trigger element the host cannot find settles its targets
//! directly instead of leaving them hidden.

use super::host::{ListenerId, ScrollHost};
use super::rule::{Playback, RevealRule, Trigger};
use super::RevealError;
use std::collections::BTreeMap;

/// Disposer for one registered rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevealHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Armed,
    Playing { started: f64 },
    Settled,
    Scrubbing { shown: f64, last_frame: f64 },
}

#[derive(Debug)]
struct ActiveRule {
    handle: RevealHandle,
    rule: RevealRule,
    listener: Option<ListenerId>,
    phase: Phase,
}

#[derive(Debug, Default)]
pub struct RevealContext {
    rules: Vec<ActiveRule>,
    owners: BTreeMap<String, RevealHandle>,
    next_handle: u64,
}

impl RevealContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule`, returning the handle that disposes it.
    ///
    /// Fails without side effects if the rule is invalid or any target is
    /// already owned by another rule of this context.
    pub fn register<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        rule: RevealRule,
        now: f64,
    ) -> Result<RevealHandle, RevealError> {
        rule.validate()?;
        let mut seen = Vec::with_capacity(rule.targets.len());
        for target in &rule.targets {
            if self.owners.contains_key(target) || seen.contains(&target) {
                return Err(RevealError::TargetAlreadyOwned(target.clone()));
            }
            seen.push(target);
        }

        let handle = RevealHandle(self.next_handle);
        self.next_handle += 1;

        let listener = match rule.trigger {
            Trigger::Load => None,
            Trigger::Scroll { .. } => Some(host.subscribe()),
        };
        for target in &rule.targets {
            self.owners.insert(target.clone(), handle);
            host.apply(target, &rule.from);
        }
        let phase = match rule.playback {
            Playback::Once => Phase::Armed,
            Playback::Scrub { .. } => Phase::Scrubbing {
                shown: 0.0,
                last_frame: now,
            },
        };
        log::debug!("registered reveal {:?} for {:?}", handle, rule.targets);
        self.rules.push(ActiveRule {
            handle,
            rule,
            listener,
            phase,
        });

        let idx = self.rules.len() - 1;
        step(&mut self.rules[idx], host, now);
        Ok(handle)
    }

    /// Unsubscribe the rule's listener and revert its targets' styles.
    ///
    /// Returns `false` if the handle was already disposed.
    pub fn dispose<H: ScrollHost + ?Sized>(&mut self, host: &mut H, handle: RevealHandle) -> bool {
        let Some(pos) = self.rules.iter().position(|r| r.handle == handle) else {
            return false;
        };
        let active = self.rules.remove(pos);
        if let Some(listener) = active.listener {
            host.unsubscribe(listener);
        }
        for target in &active.rule.targets {
            self.owners.remove(target);
            host.revert(target);
        }
        true
    }

    /// Dispose every rule.
    pub fn revert<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        let handles: Vec<RevealHandle> = self.rules.iter().map(|r| r.handle).collect();
        for handle in handles {
            self.dispose(host, handle);
        }
    }

    /// Advance every rule to time `now` (seconds) at the host's current
    /// scroll position.
    pub fn on_frame<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now: f64) {
        for active in &mut self.rules {
            step(active, host, now);
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn owner_of(&self, target: &str) -> Option<RevealHandle> {
        self.owners.get(target).copied()
    }

    pub fn phase(&self, handle: RevealHandle) -> Option<Phase> {
        self.rules
            .iter()
            .find(|r| r.handle == handle)
            .map(|r| r.phase)
    }

    /// Number of host listeners this context holds.
    pub fn listener_count(&self) -> usize {
        self.rules.iter().filter(|r| r.listener.is_some()).count()
    }
}

fn step<H: ScrollHost + ?Sized>(active: &mut ActiveRule, host: &mut H, now: f64) {
    match active.phase {
        Phase::Settled => {}
        Phase::Armed => match &active.rule.trigger {
            Trigger::Load => {
                active.phase = Phase::Playing { started: now };
                play(active, host, now);
            }
            Trigger::Scroll { element, start } => {
                let Some(edge) = host.edge_offset(element, start.edge) else {
                    log::warn!("trigger element '{element}' not found, settling");
                    settle(active, host);
                    return;
                };
                let line = start.scroll_offset(edge, host.viewport_height());
                if host.scroll_y() >= line {
                    active.phase = Phase::Playing { started: now };
                    play(active, host, now);
                }
            }
        },
        Phase::Playing { .. } => play(active, host, now),
        Phase::Scrubbing { shown, last_frame } => {
            let (Trigger::Scroll { element, start }, Playback::Scrub { end, smoothing }) =
                (&active.rule.trigger, active.rule.playback)
            else {
                return;
            };
            let (Some(start_edge), Some(end_edge)) = (
                host.edge_offset(element, start.edge),
                host.edge_offset(element, end.edge),
            ) else {
                log::warn!("scrub element '{element}' not found, settling");
                settle(active, host);
                return;
            };
            let vh = host.viewport_height();
            let target = scrub_progress(
                host.scroll_y(),
                start.scroll_offset(start_edge, vh),
                end.scroll_offset(end_edge, vh),
            );
            let shown = follow(shown, target, now - last_frame, smoothing);
            active.phase = Phase::Scrubbing {
                shown,
                last_frame: now,
            };
            let eased = active.rule.ease.apply(shown);
            let state = active.rule.from.lerp(&active.rule.to, eased);
            for target in &active.rule.targets {
                host.apply(target, &state);
            }
        }
    }
}

fn play<H: ScrollHost + ?Sized>(active: &mut ActiveRule, host: &mut H, now: f64) {
    let Phase::Playing { started } = active.phase else {
        return;
    };
    let rule = &active.rule;
    let mut all_done = true;
    for (i, target) in rule.targets.iter().enumerate() {
        let local = now - started - rule.delay - rule.stagger * i as f64;
        let t = if local < 0.0 {
            0.0
        } else if rule.duration <= 0.0 {
            1.0
        } else {
            (local / rule.duration).min(1.0)
        };
        all_done &= t >= 1.0;
        let state = rule.from.lerp(&rule.to, rule.ease.apply(t));
        host.apply(target, &state);
    }
    if all_done {
        active.phase = Phase::Settled;
    }
}

fn settle<H: ScrollHost + ?Sized>(active: &mut ActiveRule, host: &mut H) {
    for target in &active.rule.targets {
        host.apply(target, &active.rule.to);
    }
    active.phase = Phase::Settled;
}

/// Linear progress of `scroll` between the offsets where the start and end
/// lines are met, clamped to `[0, 1]`.
pub fn scrub_progress(scroll: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if scroll >= start { 1.0 } else { 0.0 };
    }
    ((scroll - start) / (end - start)).clamp(0.0, 1.0)
}

/// Move `shown` towards `target`, covering the whole gap after `smoothing`
/// seconds. Zero smoothing snaps.
fn follow(shown: f64, target: f64, dt: f64, smoothing: f64) -> f64 {
    if smoothing <= 0.0 {
        return target;
    }
    let alpha = (dt.max(0.0) / smoothing).min(1.0);
    shown + (target - shown) * alpha
}
