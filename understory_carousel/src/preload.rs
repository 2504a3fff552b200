// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which slide images to fetch ahead of display.
//!
//! The policy here only picks indices. Requesting the images (and skipping
//! those already in flight, loaded, or failed) is done by
//! [`Carousel`](crate::Carousel), which owns the image states.

use core::ops::Range;

use smallvec::SmallVec;

/// Neighbor indices picked by [`Preloader::adjacent`].
pub type Neighbors = SmallVec<[usize; 2]>;

/// Preloading policy over a fixed number of slides.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Preloader {
    total: usize,
    initial: usize,
}

impl Preloader {
    /// Create a policy for `total` slides that warms `initial` slides after
    /// the first at startup.
    #[must_use]
    pub const fn new(total: usize, initial: usize) -> Self {
        Self { total, initial }
    }

    /// Slides requested at startup: `1..=initial`, clamped to the slide count.
    ///
    /// Slide 0 is left out; it loads eagerly with the page.
    #[must_use]
    pub fn initial(&self) -> Range<usize> {
        let end = self.initial.saturating_add(1).min(self.total);
        1.min(end)..end
    }

    /// Slides immediately before and after `index`, in that order.
    ///
    /// Neighbors outside `0..total` are skipped rather than wrapped.
    #[must_use]
    pub fn adjacent(&self, index: usize) -> Neighbors {
        let mut out = Neighbors::new();
        if let Some(before) = index.checked_sub(1) {
            if before < self.total {
                out.push(before);
            }
        }
        if let Some(after) = index.checked_add(1) {
            if after < self.total {
                out.push(after);
            }
        }
        out
    }
}
