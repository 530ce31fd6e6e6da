//! Scroll reveal
//!
//! Targets are collected once at setup: every standalone element with the
//! reveal marker, then every element child of each reveal group. A target
//! that has been marked animated is never looked at again.

use scrollfx_dom::{DOMRect, Document, NodeId};
use scrollfx_host::ScrollContext;

use crate::{RevealConfig, VisibilityPolicy};

/// An element waiting to be revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTarget {
    pub node: NodeId,
    /// Position among its group's element children; None for standalone
    pub stagger: Option<usize>,
}

/// Collect reveal targets in document order, standalone elements first.
///
/// Each node appears once; a standalone element inside a group gets its
/// group index.
pub fn collect_targets(document: &Document, config: &RevealConfig) -> Vec<RevealTarget> {
    let mut targets: Vec<RevealTarget> = document
        .get_elements_by_class_name(&config.standalone_class)
        .into_iter()
        .map(|node| RevealTarget { node, stagger: None })
        .collect();

    for group in document.get_elements_by_class_name(&config.group_class) {
        let children = document.element_children(group);
        tracing::trace!("Reveal group {} has {} children", group, children.len());
        for (index, node) in children.into_iter().enumerate() {
            // Also standalone: keep the earlier slot, take the group index
            match targets.iter_mut().find(|target| target.node == node) {
                Some(existing) => existing.stagger = Some(index),
                None => targets.push(RevealTarget { node, stagger: Some(index) }),
            }
        }
    }

    tracing::debug!("Collected {} reveal targets", targets.len());
    targets
}

impl VisibilityPolicy {
    /// Whether an element with client rect `rect` counts as scrolled into view
    pub fn is_visible(&self, rect: &DOMRect, viewport_height: f64) -> bool {
        match *self {
            VisibilityPolicy::Bottom => rect.bottom() < viewport_height,
            VisibilityPolicy::TopWithDelta { delta } => rect.top() < viewport_height - delta,
        }
    }
}

/// Classes written when an element is revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealClasses {
    pub animated: String,
    pub stagger_prefix: String,
}

impl RevealClasses {
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            animated: config.animated_class.clone(),
            stagger_prefix: config.stagger_prefix.clone(),
        }
    }

    /// `animated-stagger-<index>`
    pub fn stagger_class(&self, index: usize) -> String {
        format!("{}{}", self.stagger_prefix, index)
    }

    /// Mark a target animated, plus its stagger class when `stagger` is set.
    ///
    /// Returns true if the element was not animated before.
    pub fn mark(&self, document: &mut Document, target: &RevealTarget, stagger: bool) -> bool {
        let classes = match document.class_list_mut(target.node) {
            Ok(classes) => classes,
            Err(err) => {
                tracing::debug!("Skipping reveal target: {}", err);
                return false;
            }
        };

        let newly = classes.add(&self.animated);
        if let (true, Some(index)) = (stagger, target.stagger) {
            classes.add(&self.stagger_class(index));
        }
        newly
    }
}

/// Reveal progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealStats {
    /// Targets registered at setup
    pub tracked: usize,
    /// Targets marked animated so far
    pub animated: usize,
}

impl RevealStats {
    pub fn is_complete(&self) -> bool {
        self.animated >= self.tracked
    }
}

/// Polling detection: re-measures every pending target on each scroll event
#[derive(Debug)]
pub struct PollingReveal {
    targets: Vec<RevealTarget>,
    animated: Vec<bool>,
    policy: VisibilityPolicy,
    classes: RevealClasses,
}

impl PollingReveal {
    pub fn new(targets: Vec<RevealTarget>, policy: VisibilityPolicy, classes: RevealClasses) -> Self {
        let animated = vec![false; targets.len()];
        Self {
            targets,
            animated,
            policy,
            classes,
        }
    }

    pub fn policy(&self) -> VisibilityPolicy {
        self.policy
    }

    /// Evaluate pending targets against the current scroll state.
    ///
    /// Returns how many targets were revealed by this pass.
    pub fn apply(&mut self, document: &mut Document, ctx: &ScrollContext) -> usize {
        let mut revealed = 0;
        for (target, done) in self.targets.iter().zip(self.animated.iter_mut()) {
            if *done {
                continue;
            }
            let rect = match document.bounding_client_rect(target.node, ctx.scroll.x, ctx.scroll.y) {
                Ok(rect) => rect,
                Err(err) => {
                    tracing::debug!("Cannot measure reveal target: {}", err);
                    continue;
                }
            };
            if !self.policy.is_visible(&rect, ctx.viewport.height) {
                continue;
            }

            self.classes.mark(document, target, true);
            *done = true;
            revealed += 1;
        }

        if revealed > 0 {
            tracing::debug!("Revealed {} targets at scroll y={}", revealed, ctx.scroll.y);
        }
        revealed
    }

    pub fn stats(&self) -> RevealStats {
        RevealStats {
            tracked: self.targets.len(),
            animated: self.animated.iter().filter(|&&done| done).count(),
        }
    }
}
