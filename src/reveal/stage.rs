//! Per-section mounting.
//!
//! The [`Stage`] owns one [`RevealContext`] per mounted section. Mounting a
//! section that is already mounted does nothing, and unmounting reverts the
//! whole context, so any number of mount/unmount cycles leaves the host with
//! the listener count it started with.
//!
//! Ownership is page-wide: an element claimed by a rule in one mounted
//! section cannot be claimed by a rule in another.

use super::engine::RevealContext;
use super::host::ScrollHost;
use super::rule::RevealRule;
use super::RevealError;
use crate::types::Section;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Stage {
    mounted: BTreeMap<Section, RevealContext>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rules` for `section`.
    ///
    /// Returns `Ok(false)` if the section was already mounted. A target owned
    /// by another mounted section fails with
    /// [`RevealError::TargetAlreadyOwned`] before anything is registered. If
    /// any rule fails to register, the rules registered so far are reverted
    /// and the section stays unmounted.
    pub fn mount<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        section: Section,
        rules: Vec<RevealRule>,
        now: f64,
    ) -> Result<bool, RevealError> {
        if self.mounted.contains_key(&section) {
            log::debug!("section {section} already mounted");
            return Ok(false);
        }
        if let Some(target) = rules
            .iter()
            .flat_map(|rule| &rule.targets)
            .find(|target| self.owning_section(target).is_some())
        {
            return Err(RevealError::TargetAlreadyOwned(target.clone()));
        }
        let mut ctx = RevealContext::new();
        for rule in rules {
            if let Err(err) = ctx.register(host, rule, now) {
                ctx.revert(host);
                return Err(err);
            }
        }
        log::debug!("mounted section {section} with {} reveals", ctx.len());
        self.mounted.insert(section, ctx);
        Ok(true)
    }

    /// Tear down `section`. Returns `false` if it was not mounted.
    pub fn unmount<H: ScrollHost + ?Sized>(&mut self, host: &mut H, section: Section) -> bool {
        match self.mounted.remove(&section) {
            Some(mut ctx) => {
                ctx.revert(host);
                log::debug!("unmounted section {section}");
                true
            }
            None => false,
        }
    }

    pub fn on_frame<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now: f64) {
        for ctx in self.mounted.values_mut() {
            ctx.on_frame(host, now);
        }
    }

    /// Mounted section whose context owns `target`.
    pub fn owning_section(&self, target: &str) -> Option<Section> {
        self.mounted
            .iter()
            .find(|(_, ctx)| ctx.owner_of(target).is_some())
            .map(|(section, _)| *section)
    }

    pub fn is_mounted(&self, section: Section) -> bool {
        self.mounted.contains_key(&section)
    }

    pub fn context(&self, section: Section) -> Option<&RevealContext> {
        self.mounted.get(&section)
    }

    pub fn listener_count(&self) -> usize {
        self.mounted.values().map(RevealContext::listener_count).sum()
    }
}
