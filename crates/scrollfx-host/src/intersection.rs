//! Intersection Observer API
//!
//! Observe element visibility against the viewport. Observers are evaluated
//! by the host's rendering step, not by scroll events, so many scrolls can
//! collapse into one batch of entries.

use scrollfx_dom::{DOMRect, Document, NodeId};

use crate::{HostError, ScrollPosition};

/// Observer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// Intersection observer options
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverOptions {
    /// Sorted, deduplicated ratios that trigger a notification when crossed
    thresholds: Vec<f64>,
}

impl IntersectionObserverOptions {
    /// Build from a list of thresholds. An empty list means `[0.0]`.
    pub fn new(mut thresholds: Vec<f64>) -> crate::Result<Self> {
        if let Some(&bad) = thresholds.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(HostError::InvalidThreshold(bad));
        }
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        Ok(Self { thresholds })
    }

    /// Single threshold
    pub fn with_threshold(threshold: f64) -> crate::Result<Self> {
        Self::new(vec![threshold])
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// How many thresholds the element has reached; 0 means not intersecting.
    ///
    /// `coverage` is the element's [`DOMRect::coverage_ratio`], so an element
    /// larger than the viewport still crosses every threshold.
    fn crossing_state(&self, overlaps: bool, coverage: f64) -> usize {
        if !overlaps {
            return 0;
        }
        self.thresholds.iter().filter(|&&t| coverage >= t).count()
    }
}

impl Default for IntersectionObserverOptions {
    fn default() -> Self {
        Self { thresholds: vec![0.0] }
    }
}

/// Intersection observer entry
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverEntry {
    pub target: NodeId,
    pub bounding_client_rect: DOMRect,
    pub intersection_rect: DOMRect,
    pub root_bounds: DOMRect,
    pub intersection_ratio: f64,
    /// Overlaps the viewport and its coverage reaches the smallest threshold
    pub is_intersecting: bool,
    pub time: f64,
}

/// Intersection observer
#[derive(Debug)]
pub struct IntersectionObserver {
    id: ObserverId,
    options: IntersectionObserverOptions,
    /// Observed targets with their last crossing state, in observe order
    observed: Vec<(NodeId, Option<usize>)>,
    pending_entries: Vec<IntersectionObserverEntry>,
}

impl IntersectionObserver {
    fn new(id: ObserverId, options: IntersectionObserverOptions) -> Self {
        Self {
            id,
            options,
            observed: Vec::new(),
            pending_entries: Vec::new(),
        }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn options(&self) -> &IntersectionObserverOptions {
        &self.options
    }

    /// Observe an element. The next check always reports it once.
    pub fn observe(&mut self, target: NodeId) {
        if !self.is_observing(target) {
            self.observed.push((target, None));
        }
    }

    /// Stop observing
    pub fn unobserve(&mut self, target: NodeId) {
        self.observed.retain(|(node, _)| *node != target);
    }

    /// Disconnect all
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.pending_entries.clear();
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.iter().any(|(node, _)| *node == target)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Queue entries for every target whose crossing state changed.
    ///
    /// Targets `rect_of` cannot measure are skipped without touching their state.
    pub fn check_intersections<F>(&mut self, viewport: DOMRect, rect_of: F, time: f64)
    where
        F: Fn(NodeId) -> Option<DOMRect>,
    {
        for (node, last_state) in &mut self.observed {
            let Some(rect) = rect_of(*node) else {
                continue;
            };

            let intersection = rect.intersection(&viewport);
            let ratio = rect.visible_ratio(&viewport);
            let coverage = rect.coverage_ratio(&viewport);
            let state = self.options.crossing_state(intersection.is_some(), coverage);

            if *last_state == Some(state) {
                continue;
            }
            *last_state = Some(state);

            self.pending_entries.push(IntersectionObserverEntry {
                target: *node,
                bounding_client_rect: rect,
                intersection_rect: intersection.unwrap_or_default(),
                root_bounds: viewport,
                intersection_ratio: ratio,
                is_intersecting: state > 0,
                time,
            });
        }
    }

    /// Take pending entries
    pub fn take_entries(&mut self) -> Vec<IntersectionObserverEntry> {
        std::mem::take(&mut self.pending_entries)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_entries.is_empty()
    }
}

/// Intersection notification handler
pub trait IntersectionHandler {
    /// `observer` is the observer that produced the batch, so handlers can
    /// unobserve targets they are done with.
    fn on_intersections(
        &mut self,
        document: &mut Document,
        entries: &[IntersectionObserverEntry],
        observer: &mut IntersectionObserver,
    );
}

impl<F> IntersectionHandler for F
where
    F: FnMut(&mut Document, &[IntersectionObserverEntry], &mut IntersectionObserver),
{
    fn on_intersections(
        &mut self,
        document: &mut Document,
        entries: &[IntersectionObserverEntry],
        observer: &mut IntersectionObserver,
    ) {
        self(document, entries, observer)
    }
}

struct Registration {
    observer: IntersectionObserver,
    handler: Box<dyn IntersectionHandler>,
}

/// Intersection observer manager
#[derive(Default)]
pub struct IntersectionObserverManager {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl IntersectionObserverManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create observer
    pub fn create(
        &mut self,
        options: IntersectionObserverOptions,
        handler: Box<dyn IntersectionHandler>,
    ) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        tracing::debug!("Created {} with thresholds {:?}", id, options.thresholds());
        self.registrations.push(Registration {
            observer: IntersectionObserver::new(id, options),
            handler,
        });
        id
    }

    /// Get observer
    pub fn get(&self, id: ObserverId) -> Option<&IntersectionObserver> {
        self.registrations
            .iter()
            .map(|r| &r.observer)
            .find(|o| o.id() == id)
    }

    /// Get observer mutably
    pub fn get_mut(&mut self, id: ObserverId) -> Option<&mut IntersectionObserver> {
        self.registrations
            .iter_mut()
            .map(|r| &mut r.observer)
            .find(|o| o.id() == id)
    }

    /// Disconnect and drop an observer with its handler
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.observer.id() != id);
        let removed = self.registrations.len() != before;
        if removed {
            tracing::debug!("Removed {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Evaluate all observers and deliver each non-empty batch to its handler.
    ///
    /// Returns the number of entries delivered.
    pub fn process(
        &mut self,
        viewport: DOMRect,
        document: &mut Document,
        scroll: ScrollPosition,
        time: f64,
    ) -> usize {
        let mut delivered = 0;
        for Registration { observer, handler } in &mut self.registrations {
            observer.check_intersections(
                viewport,
                |node| document.bounding_client_rect(node, scroll.x, scroll.y).ok(),
                time,
            );
            if !observer.has_pending() {
                continue;
            }
            let entries = observer.take_entries();
            tracing::trace!("{} delivering {} entries", observer.id(), entries.len());
            delivered += entries.len();
            handler.on_intersections(document, &entries, observer);
        }
        delivered
    }
}

impl std::fmt::Debug for IntersectionObserverManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|r| &r.observer))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out(doc: &mut Document, rect: DOMRect) -> NodeId {
        let node = doc.create_element("div");
        doc.append_child(doc.body(), node).unwrap();
        doc.set_layout(node, rect).unwrap();
        node
    }

    #[test]
    fn test_options_validation() {
        assert_eq!(
            IntersectionObserverOptions::with_threshold(1.5),
            Err(HostError::InvalidThreshold(1.5))
        );
        assert!(IntersectionObserverOptions::with_threshold(f64::NAN).is_err());

        let options = IntersectionObserverOptions::new(vec![0.6, 0.25, 0.6]).unwrap();
        assert_eq!(options.thresholds(), &[0.25, 0.6]);
        assert_eq!(IntersectionObserverOptions::new(vec![]).unwrap().thresholds(), &[0.0]);
    }

    #[test]
    fn test_intersection_observer() {
        let mut doc = Document::new();
        let node = laid_out(&mut doc, DOMRect::from_xywh(100.0, 100.0, 200.0, 200.0));

        let mut observer = IntersectionObserver::new(ObserverId(1), IntersectionObserverOptions::default());
        observer.observe(node);

        let viewport = DOMRect::from_xywh(0.0, 0.0, 800.0, 600.0);
        observer.check_intersections(viewport, |n| doc.bounding_client_rect(n, 0.0, 0.0).ok(), 0.0);
        assert!(observer.has_pending());

        let entries = observer.take_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert_eq!(entries[0].intersection_ratio, 1.0);

        // No state change, no new entry
        observer.check_intersections(viewport, |n| doc.bounding_client_rect(n, 0.0, 0.0).ok(), 1.0);
        assert!(!observer.has_pending());
    }

    #[test]
    fn test_threshold_crossing() {
        let mut doc = Document::new();
        // 100px tall element, viewport 600 high
        let node = laid_out(&mut doc, DOMRect::from_xywh(0.0, 580.0, 800.0, 100.0));
        let viewport = DOMRect::from_xywh(0.0, 0.0, 800.0, 600.0);

        let options = IntersectionObserverOptions::with_threshold(0.6).unwrap();
        let mut observer = IntersectionObserver::new(ObserverId(1), options);
        observer.observe(node);

        // 20% visible: initial report, not intersecting
        observer.check_intersections(viewport, |n| doc.bounding_client_rect(n, 0.0, 0.0).ok(), 0.0);
        let entries = observer.take_entries();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        // 50% visible: still below threshold, nothing queued
        observer.check_intersections(viewport, |n| doc.bounding_client_rect(n, 0.0, 30.0).ok(), 1.0);
        assert!(!observer.has_pending());

        // 70% visible: crossed
        observer.check_intersections(viewport, |n| doc.bounding_client_rect(n, 0.0, 50.0).ok(), 2.0);
        let entries = observer.take_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!((entries[0].intersection_ratio - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_element_taller_than_viewport_crosses() {
        let mut doc = Document::new();
        // 1500px tall in an 800px viewport: at most 53% of it is ever visible
        let node = laid_out(&mut doc, DOMRect::from_xywh(0.0, 1000.0, 600.0, 1500.0));
        let viewport = DOMRect::from_xywh(0.0, 0.0, 1024.0, 800.0);

        let options = IntersectionObserverOptions::with_threshold(0.6).unwrap();
        let mut observer = IntersectionObserver::new(ObserverId(1), options);
        observer.observe(node);

        observer.check_intersections(viewport, |n| doc.bounding_client_rect(n, 0.0, 0.0).ok(), 0.0);
        assert!(!observer.take_entries()[0].is_intersecting);

        // Top 480px showing, 60% of the viewport height
        observer.check_intersections(viewport, |n| doc.bounding_client_rect(n, 0.0, 680.0).ok(), 1.0);
        let entries = observer.take_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert!(entries[0].intersection_ratio < 0.6);
    }

    #[test]
    fn test_manager_process_and_remove() {
        let mut doc = Document::new();
        let node = laid_out(&mut doc, DOMRect::from_xywh(0.0, 0.0, 10.0, 10.0));
        let mut manager = IntersectionObserverManager::new();

        let id = manager.create(
            IntersectionObserverOptions::default(),
            Box::new(
                |doc: &mut Document, entries: &[IntersectionObserverEntry], observer: &mut IntersectionObserver| {
                    for entry in entries {
                        doc.class_list_mut(entry.target).unwrap().add("seen");
                        observer.unobserve(entry.target);
                    }
                },
            ),
        );
        manager.get_mut(id).unwrap().observe(node);

        let viewport = DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0);
        assert_eq!(manager.process(viewport, &mut doc, ScrollPosition::default(), 0.0), 1);
        assert!(doc.has_class(node, "seen"));
        assert_eq!(manager.get(id).unwrap().observed_count(), 0);

        assert!(manager.remove(id));
        assert!(manager.get(id).is_none());
        assert!(!manager.remove(id));
    }
}
