// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the headless slider and whatever renders it.

use core::fmt;

use crate::image::ImageClasses;
use crate::slide::SlideClasses;

/// Counter display: 1-based position of the active slide over the total.
///
/// Its [`Display`](fmt::Display) form is `"current / total"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Counter {
    /// 1-based position of the active slide.
    pub current: usize,
    /// Number of slides.
    pub total: usize,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.current, self.total)
    }
}

/// Receives the slider's visible side effects.
///
/// Every method has an empty default so hosts only implement what they
/// render. `()` is a host that ignores everything.
///
/// Calls happen synchronously from the slider operation that caused them;
/// hosts must not call back into the slider from inside these methods.
pub trait SliderHost {
    /// Apply `classes` to the slide element at `slide`.
    fn slide_classes(&mut self, slide: usize, classes: SlideClasses) {
        let _ = (slide, classes);
    }

    /// Apply `classes` to the image element of `slide`.
    fn image_classes(&mut self, slide: usize, classes: ImageClasses) {
        let _ = (slide, classes);
    }

    /// Fetch `source` ahead of display (for example through a detached image).
    fn preload_image(&mut self, slide: usize, source: &str) {
        let _ = (slide, source);
    }

    /// Move a staged source into the image element of `slide`.
    fn swap_source(&mut self, slide: usize, source: &str) {
        let _ = (slide, source);
    }

    /// Update the current/total counter regions.
    fn counter(&mut self, counter: Counter) {
        let _ = counter;
    }

    /// Bind the human-readable title of the active slide.
    fn slide_title(&mut self, slide: usize, title: &str) {
        let _ = (slide, title);
    }

    /// Enable or disable the previous/next controls.
    fn controls_enabled(&mut self, enabled: bool) {
        let _ = enabled;
    }

    /// A transition to `slide` completed a while ago.
    ///
    /// Intended for analytics or a cosmetic flourish. The slider's state is
    /// final by the time this is called.
    fn slide_changed(&mut self, slide: usize) {
        let _ = slide;
    }
}

impl SliderHost for () {}
