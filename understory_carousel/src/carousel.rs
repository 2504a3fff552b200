// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slide state machine.
//!
//! A [`Carousel`] owns the slides, the current index, and the transition
//! phase. Accepted transitions move through three timed steps, all measured
//! from the moment of acceptance:
//!
//! ```text
//!            request_go_to              settle_delay              unlock_delay
//!   Idle ─────────────────▶ Settling ─────────────────▶ Locked ─────────────────▶ Idle
//!                                    (flip active slide,       (re-enable controls)
//!                                     refresh counter/title)
//!
//!   hook_delay after acceptance: SliderHost::slide_changed(target)
//! ```
//!
//! Time never advances on its own: the host calls [`Carousel::advance`] with
//! the current timestamp, ideally at [`Carousel::next_deadline`]. Any number
//! of steps that are due are applied in order by a single call.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::host::{Counter, SliderHost};
use crate::image::ImageSource;
use crate::preload::{Neighbors, Preloader};
use crate::slide::{Slide, SlideClasses};
use crate::{SliderConfig, SliderError};

/// Where a carousel is in its transition sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// Settled; navigation is accepted.
    Idle,
    /// A transition was accepted at `started_at`; the incoming slide is not
    /// active yet.
    Settling {
        /// Timestamp of acceptance.
        started_at: u64,
    },
    /// The incoming slide is active; navigation stays locked until the
    /// unlock delay elapses.
    Locked {
        /// Timestamp of acceptance.
        started_at: u64,
    },
}

/// Millisecond delays of one transition, from acceptance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Timing {
    settle: u64,
    unlock: u64,
    hook: u64,
}

/// A `slide_changed` notification waiting for its deadline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PendingHook {
    due: u64,
    slide: usize,
}

/// Slide index management with a transition lock.
#[derive(Clone, Debug)]
pub struct Carousel {
    slides: Vec<Slide>,
    current: usize,
    phase: TransitionPhase,
    timing: Timing,
    preloader: Preloader,
    hooks: SmallVec<[PendingHook; 2]>,
}

impl Carousel {
    /// Build a carousel over `sources`, one slide per source, in order.
    ///
    /// The carousel starts idle at slide 0. Nothing is shown until
    /// [`Carousel::start`] publishes the initial state to a host.
    ///
    /// # Errors
    ///
    /// [`SliderError::Empty`] when `sources` is empty, and
    /// [`SliderError::Config`] when `config` fails validation.
    pub fn new(
        sources: impl IntoIterator<Item = ImageSource>,
        config: &SliderConfig,
    ) -> Result<Self, SliderError> {
        config.validate()?;
        let slides: Vec<Slide> = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| Slide::new(index, source))
            .collect();
        if slides.is_empty() {
            return Err(SliderError::Empty);
        }
        let mut carousel = Self {
            preloader: Preloader::new(slides.len(), config.initial_preload),
            slides,
            current: 0,
            phase: TransitionPhase::Idle,
            timing: Timing {
                settle: config.settle_delay,
                unlock: config.unlock_delay,
                hook: config.hook_delay,
            },
            hooks: SmallVec::new(),
        };
        carousel.slides[0].set_class(SlideClasses::ACTIVE, true);
        Ok(carousel)
    }

    /// Publish the initial state and warm the first images.
    ///
    /// Emits the classes of every slide and image, the counter, and the
    /// title of slide 0, then requests slide 0 and the
    /// [initial preload](Preloader::initial) set.
    pub fn start(&mut self, host: &mut impl SliderHost) {
        for slide in &self.slides {
            host.slide_classes(slide.index(), slide.classes());
            host.image_classes(slide.index(), slide.image().classes());
        }
        self.refresh_display(host);
        host.controls_enabled(true);
        self.request_image(0, host);
        self.preload_initial(host);
    }

    /// Number of slides. Fixed for the carousel's lifetime.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`: a carousel has at least one slide.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the current slide.
    ///
    /// Changes as soon as a transition is accepted, before the incoming
    /// slide is marked active.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Current transition phase.
    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Whether a transition is in flight (the navigation lock).
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// All slides, in order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// The slide at `index`, if any.
    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Index of the slide carrying the `active` class, if exactly one does.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        let mut active = self.slides.iter().filter(|s| s.is_active());
        match (active.next(), active.next()) {
            (Some(slide), None) => Some(slide.index()),
            _ => None,
        }
    }

    /// Counter for the current slide.
    #[must_use]
    pub fn counter(&self) -> Counter {
        Counter {
            current: self.current + 1,
            total: self.slides.len(),
        }
    }

    /// Start a transition to `target`.
    ///
    /// Returns `false` and changes nothing when a transition is in flight,
    /// when `target` is already current, or when `target` is out of range.
    /// Callers wrap or clamp indices before calling.
    pub fn request_go_to(&mut self, target: usize, now: u64, host: &mut impl SliderHost) -> bool {
        if self.is_transitioning() {
            tracing::trace!(to = target, current = self.current, "navigation locked; request dropped");
            return false;
        }
        if target == self.current {
            tracing::trace!(to = target, "already on target slide");
            return false;
        }
        if target >= self.slides.len() {
            tracing::trace!(to = target, len = self.slides.len(), "target out of range");
            return false;
        }

        let from = self.current;
        tracing::debug!(from, to = target, now, "transition accepted");
        self.phase = TransitionPhase::Settling { started_at: now };

        let outgoing = &mut self.slides[from];
        outgoing.set_class(SlideClasses::ACTIVE, false);
        // The exit marker follows index order, not the direction of travel.
        if target > from {
            outgoing.set_class(SlideClasses::PREV, true);
        }
        host.slide_classes(from, outgoing.classes());

        self.current = target;
        self.preload_adjacent(target, host);
        host.controls_enabled(false);
        self.hooks.push(PendingHook {
            due: now.saturating_add(self.timing.hook),
            slide: target,
        });
        true
    }

    /// Go to the next slide, wrapping from the last to the first.
    pub fn next(&mut self, now: u64, host: &mut impl SliderHost) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let target = (self.current + 1) % self.slides.len();
        self.request_go_to(target, now, host)
    }

    /// Go to the previous slide, wrapping from the first to the last.
    pub fn previous(&mut self, now: u64, host: &mut impl SliderHost) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let len = self.slides.len();
        let target = (self.current + len - 1) % len;
        self.request_go_to(target, now, host)
    }

    /// Go to the first slide.
    pub fn first(&mut self, now: u64, host: &mut impl SliderHost) -> bool {
        self.request_go_to(0, now, host)
    }

    /// Go to the last slide.
    pub fn last(&mut self, now: u64, host: &mut impl SliderHost) -> bool {
        let last = self.slides.len() - 1;
        self.request_go_to(last, now, host)
    }

    /// Earliest timestamp at which [`Carousel::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        let phase = match self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::Settling { started_at } => {
                Some(started_at.saturating_add(self.timing.settle))
            }
            TransitionPhase::Locked { started_at } => {
                Some(started_at.saturating_add(self.timing.unlock))
            }
        };
        let hook = self.hooks.iter().map(|h| h.due).min();
        match (phase, hook) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Apply every step due at or before `now`, in order: flip, unlock, hooks.
    pub fn advance(&mut self, now: u64, host: &mut impl SliderHost) {
        loop {
            match self.phase {
                TransitionPhase::Settling { started_at }
                    if now >= started_at.saturating_add(self.timing.settle) =>
                {
                    self.flip(host);
                    self.phase = TransitionPhase::Locked { started_at };
                }
                TransitionPhase::Locked { started_at }
                    if now >= started_at.saturating_add(self.timing.unlock) =>
                {
                    tracing::debug!(slide = self.current, now, "navigation unlocked");
                    self.phase = TransitionPhase::Idle;
                    host.controls_enabled(true);
                }
                _ => break,
            }
        }

        // Timestamps may go backwards, so due hooks can sit anywhere in the
        // queue. Fire them by deadline, ties in acceptance order.
        let mut due: SmallVec<[PendingHook; 2]> = SmallVec::new();
        self.hooks.retain(|hook| {
            if hook.due <= now {
                due.push(*hook);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|hook| hook.due);
        for hook in due {
            tracing::trace!(slide = hook.slide, "slide_changed hook");
            host.slide_changed(hook.slide);
        }
    }

    /// Warm the images of the slides next to `index`.
    ///
    /// Skips neighbors out of range and images already requested, loaded, or
    /// failed. Returns the slides actually requested.
    pub fn preload_adjacent(&mut self, index: usize, host: &mut impl SliderHost) -> Neighbors {
        let mut requested = Neighbors::new();
        for neighbor in self.preloader.adjacent(index) {
            if self.request_image(neighbor, host) {
                requested.push(neighbor);
            }
        }
        requested
    }

    /// Warm the images of the initial preload set.
    ///
    /// Returns the slides actually requested.
    pub fn preload_initial(&mut self, host: &mut impl SliderHost) -> Vec<usize> {
        self.preloader
            .initial()
            .filter(|&index| self.request_image(index, host))
            .collect()
    }

    /// Record that the image of `slide` loaded. Unknown slides are ignored.
    pub fn image_loaded(&mut self, slide: usize, host: &mut impl SliderHost) {
        if let Some(s) = self.slides.get_mut(slide) {
            s.image_mut().mark_loaded();
            host.image_classes(slide, s.image().classes());
        }
    }

    /// Record that the image of `slide` failed to load. Unknown slides are
    /// ignored.
    pub fn image_failed(&mut self, slide: usize) {
        if let Some(s) = self.slides.get_mut(slide) {
            tracing::debug!(slide, source = s.image().source(), "image failed to load");
            s.image_mut().mark_errored();
        }
    }

    /// Reveal the staged source of `slide`'s image.
    ///
    /// Returns `false` if the slide is unknown or its source was not staged.
    pub fn reveal_image(&mut self, slide: usize, host: &mut impl SliderHost) -> bool {
        let Some(s) = self.slides.get_mut(slide) else {
            return false;
        };
        if !s.image_mut().reveal() {
            return false;
        }
        host.swap_source(slide, s.image().source());
        host.image_classes(slide, s.image().classes());
        true
    }

    fn request_image(&mut self, index: usize, host: &mut impl SliderHost) -> bool {
        let Some(slide) = self.slides.get_mut(index) else {
            return false;
        };
        match slide.image_mut().request() {
            Some(source) => {
                host.preload_image(index, source);
                true
            }
            None => false,
        }
    }

    fn flip(&mut self, host: &mut impl SliderHost) {
        let current = self.current;
        tracing::debug!(slide = current, "slide activated");
        for slide in &mut self.slides {
            let changed_prev = slide.set_class(SlideClasses::PREV, false);
            let changed_active = slide.index() == current && slide.set_class(SlideClasses::ACTIVE, true);
            if changed_prev || changed_active {
                host.slide_classes(slide.index(), slide.classes());
            }
        }
        self.refresh_display(host);
    }

    fn refresh_display(&self, host: &mut impl SliderHost) {
        host.counter(self.counter());
        let slide = &self.slides[self.current];
        host.slide_title(slide.index(), &slide.title());
    }
}
