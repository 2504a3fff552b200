// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe recognition for touch navigation.
//!
//! A swipe is decided from two samples only, the touch start and the touch
//! end. Intermediate moves are not tracked.
//!
//! ## Rules
//!
//! With `dx = start.x - end.x` and `dy = start.y - end.y`:
//!
//! 1. **Horizontal dominance**: nothing is recognized unless `|dx| > |dy|`.
//!    Vertical motion is treated as scrolling.
//! 2. **Threshold**: `dx > threshold` is [`Swipe::Next`] (finger moved left),
//!    `dx < -threshold` is [`Swipe::Previous`]. Travel of exactly
//!    `threshold` is jitter.
//! 3. **Breakpoint**: [`SwipeTracker`] ignores touches entirely while the
//!    viewport is at least `breakpoint` wide; pointer and keyboard are the
//!    intended inputs there.
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::{Swipe, evaluate_swipe};
//!
//! assert_eq!(
//!     evaluate_swipe(Point::new(100.0, 0.0), Point::new(30.0, 0.0), 50.0),
//!     Some(Swipe::Next)
//! );
//! assert_eq!(
//!     evaluate_swipe(Point::new(100.0, 0.0), Point::new(80.0, 40.0), 50.0),
//!     None
//! );
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Navigation intent recognized from a touch motion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Swipe {
    /// Finger moved toward the start of the line: show the next slide.
    Next,
    /// Finger moved toward the end of the line: show the previous slide.
    Previous,
}

/// Classify a touch motion from `start` to `end`.
///
/// See the [module docs](self) for the rules.
#[must_use]
pub fn evaluate_swipe(start: Point, end: Point, threshold: f64) -> Option<Swipe> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    if dx.abs() <= dy.abs() {
        return None;
    }
    if dx > threshold {
        Some(Swipe::Next)
    } else if dx < -threshold {
        Some(Swipe::Previous)
    } else {
        None
    }
}

/// Touch start/end state for swipe recognition.
#[derive(Clone, Debug)]
pub struct SwipeTracker {
    /// Minimum horizontal travel for a swipe.
    pub threshold: f64,
    /// Viewport width at or above which touches are ignored.
    pub breakpoint: f64,
    start: Option<Point>,
}

impl SwipeTracker {
    /// Create a tracker with the given threshold and breakpoint.
    #[must_use]
    pub const fn new(threshold: f64, breakpoint: f64) -> Self {
        Self {
            threshold,
            breakpoint,
            start: None,
        }
    }

    /// Whether touches are handled at `viewport_width`.
    #[must_use]
    pub fn enabled_at(&self, viewport_width: f64) -> bool {
        viewport_width < self.breakpoint
    }

    /// Record a touch start.
    ///
    /// Returns `false` (and records nothing) when the viewport is at or above
    /// the breakpoint.
    pub fn on_start(&mut self, position: Point, viewport_width: f64) -> bool {
        if !self.enabled_at(viewport_width) {
            self.start = None;
            return false;
        }
        self.start = Some(position);
        true
    }

    /// Finish a touch and classify it.
    ///
    /// The start sample is consumed either way. Nothing is recognized without
    /// a recorded start or when the viewport is at or above the breakpoint.
    pub fn on_end(&mut self, position: Point, viewport_width: f64) -> Option<Swipe> {
        let start = self.start.take()?;
        if !self.enabled_at(viewport_width) {
            return None;
        }
        let swipe = evaluate_swipe(start, position, self.threshold);
        tracing::trace!(?start, end = ?position, ?swipe, "evaluated touch gesture");
        swipe
    }

    /// Drop the recorded start, for example on touch cancel.
    ///
    /// Returns `true` if a touch was in progress.
    pub fn cancel(&mut self) -> bool {
        self.start.take().is_some()
    }

    /// Whether a touch start is recorded.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

impl Default for SwipeTracker {
    /// A 50-unit threshold and a 1024-unit breakpoint.
    fn default() -> Self {
        Self::new(50.0, 1024.0)
    }
}
