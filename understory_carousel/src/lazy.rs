// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-proximity tracking for deferred images.
//!
//! [`LazyObserver`] is a small stand-in for a host intersection primitive: it
//! keeps the bounds of pending images and, given the current viewport,
//! reports which of them came within `margin` of it. Each key fires at most
//! once; after it is reported it is no longer observed. A key registered
//! before its layout is known is held back until bounds are reported.
//!
//! ```
//! use kurbo::Rect;
//! use understory_carousel::{LazyObserver, ObserverSupport};
//!
//! let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
//! lazy.register(1_u32, Rect::new(0.0, 900.0, 100.0, 1000.0));
//! lazy.register(2_u32, Rect::new(0.0, 2000.0, 100.0, 2100.0));
//!
//! // An 860px tall viewport: image 1 is within 50px of the bottom edge.
//! let viewport = Rect::new(0.0, 0.0, 1280.0, 860.0);
//! assert_eq!(lazy.observe(viewport), vec![1]);
//! // Fire-once: image 1 is gone, image 2 is still too far away.
//! assert!(lazy.observe(viewport).is_empty());
//! assert_eq!(lazy.len(), 1);
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Rect;

/// Whether the host offers a viewport-intersection primitive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ObserverSupport {
    /// Proximity is tracked and deferred images are revealed on approach.
    #[default]
    Available,
    /// Nothing is tracked; images are left to load natively.
    Unavailable,
}

/// Fire-once proximity tracker for deferred images keyed by `K`.
#[derive(Clone, Debug)]
pub struct LazyObserver<K> {
    support: ObserverSupport,
    margin: f64,
    pending: BTreeMap<K, Option<Rect>>,
}

impl<K: Ord + Clone> LazyObserver<K> {
    /// Create an observer that reveals images within `margin` of the viewport.
    #[must_use]
    pub fn new(support: ObserverSupport, margin: f64) -> Self {
        Self {
            support,
            margin: margin.max(0.0),
            pending: BTreeMap::new(),
        }
    }

    /// Host capability this observer was created with.
    #[must_use]
    pub const fn support(&self) -> ObserverSupport {
        self.support
    }

    /// Proximity margin around the viewport.
    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    /// Start observing `key` at `bounds`.
    ///
    /// Returns `false` when the host has no intersection primitive; the image
    /// is then expected to load on its own. Registering a key again replaces
    /// its bounds.
    pub fn register(&mut self, key: K, bounds: Rect) -> bool {
        if self.support == ObserverSupport::Unavailable {
            return false;
        }
        self.pending.insert(key, Some(bounds));
        true
    }

    /// Start observing `key` before its layout is known.
    ///
    /// The key is never reported until [`LazyObserver::update`] gives it
    /// bounds. Returns `false` when the host has no intersection primitive.
    pub fn register_unplaced(&mut self, key: K) -> bool {
        if self.support == ObserverSupport::Unavailable {
            return false;
        }
        self.pending.insert(key, None);
        true
    }

    /// Update the bounds of a pending key after layout changes.
    ///
    /// Returns `false` if the key is not observed (never registered or
    /// already revealed).
    pub fn update(&mut self, key: &K, bounds: Rect) -> bool {
        match self.pending.get_mut(key) {
            Some(slot) => {
                *slot = Some(bounds);
                true
            }
            None => false,
        }
    }

    /// Stop observing `key` without revealing it.
    pub fn unregister(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    /// Whether `key` is still waiting to be revealed.
    #[must_use]
    pub fn is_observing(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Number of keys still observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Report and stop observing every key whose bounds come within
    /// `margin` of `viewport`, in key order.
    ///
    /// Touching edges count as proximity. Keys without bounds are skipped.
    pub fn observe(&mut self, viewport: Rect) -> Vec<K> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let area = viewport.abs().inflate(self.margin, self.margin);
        let hits: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, bounds)| bounds.is_some_and(|b| overlaps(area, b.abs())))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &hits {
            self.pending.remove(key);
        }
        hits
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[test]
    fn reveals_within_margin() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
        // 40px below the viewport: inside the margin.
        lazy.register(0_usize, Rect::new(0.0, 840.0, 100.0, 900.0));
        // 60px below: outside.
        lazy.register(1_usize, Rect::new(0.0, 860.0, 100.0, 900.0));
        assert_eq!(lazy.observe(viewport()), [0]);
        assert!(lazy.is_observing(&1));
    }

    #[test]
    fn margin_edge_counts() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
        lazy.register(0_usize, Rect::new(1050.0, 0.0, 1100.0, 50.0));
        assert_eq!(lazy.observe(viewport()), [0]);
    }

    #[test]
    fn fire_once() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
        lazy.register(3_usize, Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(lazy.observe(viewport()), [3]);
        assert!(lazy.observe(viewport()).is_empty());
        assert!(!lazy.update(&3, Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(lazy.is_empty());
    }

    #[test]
    fn results_are_in_key_order() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 0.0);
        lazy.register(7_usize, Rect::new(0.0, 0.0, 10.0, 10.0));
        lazy.register(2_usize, Rect::new(0.0, 0.0, 10.0, 10.0));
        lazy.register(5_usize, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(lazy.observe(viewport()), [2, 5, 7]);
    }

    #[test]
    fn updated_bounds_are_used() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
        lazy.register(0_usize, Rect::new(0.0, 5000.0, 10.0, 5010.0));
        assert!(lazy.observe(viewport()).is_empty());
        assert!(lazy.update(&0, Rect::new(0.0, 100.0, 10.0, 110.0)));
        assert_eq!(lazy.observe(viewport()), [0]);
    }

    #[test]
    fn scrolled_viewport() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
        lazy.register(0_usize, Rect::new(0.0, 2000.0, 10.0, 2010.0));
        assert!(lazy.observe(viewport()).is_empty());
        let scrolled = Rect::new(0.0, 1200.0, 1000.0, 2000.0);
        assert_eq!(lazy.observe(scrolled), [0]);
    }

    #[test]
    fn unavailable_is_a_no_op() {
        let mut lazy = LazyObserver::new(ObserverSupport::Unavailable, 50.0);
        assert!(!lazy.register(0_usize, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(lazy.is_empty());
        assert!(lazy.observe(viewport()).is_empty());
    }

    #[test]
    fn unplaced_keys_wait_for_bounds() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
        assert!(lazy.register_unplaced(0_usize));
        assert!(lazy.observe(viewport()).is_empty());
        assert!(lazy.observe(Rect::new(-5000.0, -5000.0, 5000.0, 5000.0)).is_empty());
        assert!(lazy.is_observing(&0));

        assert!(lazy.update(&0, Rect::new(0.0, 100.0, 10.0, 110.0)));
        assert_eq!(lazy.observe(viewport()), [0]);
    }

    #[test]
    fn unplaced_is_a_no_op_without_support() {
        let mut lazy = LazyObserver::new(ObserverSupport::Unavailable, 50.0);
        assert!(!lazy.register_unplaced(0_usize));
        assert!(!lazy.update(&0, Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn unregister_drops_without_reveal() {
        let mut lazy = LazyObserver::new(ObserverSupport::Available, 50.0);
        lazy.register(0_usize, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(lazy.unregister(&0));
        assert!(lazy.observe(viewport()).is_empty());
    }
}
