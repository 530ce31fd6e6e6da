//! Observer-based reveal
//!
//! All targets share one intersection observer. The host decides when to
//! evaluate it, so nothing is measured on scroll. Revealed targets are
//! unobserved right away.

use std::collections::HashMap;

use scrollfx_dom::{Document, NodeId};
use scrollfx_host::{IntersectionObserver, IntersectionObserverEntry};

use crate::{ObserverConfig, RevealClasses, RevealStats, RevealTarget};

/// Threshold for a viewport width.
///
/// Narrow screens have less vertical room, so less of an element needs to
/// be visible before it reveals.
pub fn select_threshold(viewport_width: f64, config: &ObserverConfig) -> f64 {
    if viewport_width >= config.breakpoint {
        config.wide_threshold
    } else {
        config.narrow_threshold
    }
}

#[derive(Debug)]
pub struct ObserverReveal {
    targets: Vec<RevealTarget>,
    /// Not yet revealed, with their stagger index
    pending: HashMap<NodeId, Option<usize>>,
    tracked: usize,
    classes: RevealClasses,
    stagger_groups: bool,
}

impl ObserverReveal {
    pub fn new(targets: Vec<RevealTarget>, classes: RevealClasses, stagger_groups: bool) -> Self {
        let mut pending = HashMap::with_capacity(targets.len());
        for target in &targets {
            // A node listed twice keeps its group position
            let slot = pending.entry(target.node).or_insert(None);
            if target.stagger.is_some() {
                *slot = target.stagger;
            }
        }
        let tracked = pending.len();
        Self {
            targets,
            pending,
            tracked,
            classes,
            stagger_groups,
        }
    }

    /// Observe every pending target, in collection order
    pub fn register(&self, observer: &mut IntersectionObserver) {
        for target in &self.targets {
            if self.pending.contains_key(&target.node) {
                observer.observe(target.node);
            }
        }
        tracing::debug!(
            "Registered {} reveal targets with {}",
            observer.observed_count(),
            observer.id()
        );
    }

    /// Mark every intersecting entry's target animated.
    ///
    /// Returns how many targets were revealed by this batch.
    pub fn handle_entries(
        &mut self,
        document: &mut Document,
        entries: &[IntersectionObserverEntry],
        observer: &mut IntersectionObserver,
    ) -> usize {
        let mut revealed = 0;
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let Some(stagger) = self.pending.remove(&entry.target) else {
                continue;
            };
            let target = RevealTarget { node: entry.target, stagger };
            self.classes.mark(document, &target, self.stagger_groups);
            observer.unobserve(entry.target);
            revealed += 1;
        }

        if revealed > 0 {
            tracing::debug!(
                "Revealed {} targets ({} still pending)",
                revealed,
                self.pending.len()
            );
        }
        revealed
    }

    pub fn stats(&self) -> RevealStats {
        RevealStats {
            tracked: self.tracked,
            animated: self.tracked - self.pending.len(),
        }
    }
}
