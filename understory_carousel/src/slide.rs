// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slides and their visual state.

use alloc::format;
use alloc::string::String;

use crate::image::{ImageResource, ImageSource};

bitflags::bitflags! {
    /// Style classes carried by a slide element.
    ///
    /// The class names are a contract with the styling layer; see
    /// [`SlideClasses::class_names`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SlideClasses: u8 {
        /// The slide is the one on display (`active`).
        const ACTIVE = 1 << 0;
        /// The slide is leaving by forward navigation (`prev`).
        const PREV = 1 << 1;
    }
}

impl SlideClasses {
    /// Iterate over the CSS class names for the flags that are set.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        [(Self::ACTIVE, "active"), (Self::PREV, "prev")]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

/// Visual state of a slide, derived from its [`SlideClasses`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Neither shown nor animating out.
    Inactive,
    /// On display.
    Active,
    /// Animating out after forward navigation.
    Exiting,
}

/// One navigable unit of the carousel, bound to one image.
#[derive(Clone, Debug)]
pub struct Slide {
    index: usize,
    classes: SlideClasses,
    image: ImageResource,
}

impl Slide {
    pub(crate) fn new(index: usize, source: ImageSource) -> Self {
        Self {
            index,
            classes: SlideClasses::empty(),
            image: ImageResource::new(source),
        }
    }

    /// Position of the slide in the carousel.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Style classes currently applied.
    #[must_use]
    pub const fn classes(&self) -> SlideClasses {
        self.classes
    }

    /// Visual state derived from the classes. `active` wins over `prev`.
    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        if self.classes.contains(SlideClasses::ACTIVE) {
            VisualState::Active
        } else if self.classes.contains(SlideClasses::PREV) {
            VisualState::Exiting
        } else {
            VisualState::Inactive
        }
    }

    /// Whether the slide is the one on display.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.classes.contains(SlideClasses::ACTIVE)
    }

    /// The slide's image.
    #[must_use]
    pub const fn image(&self) -> &ImageResource {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut ImageResource {
        &mut self.image
    }

    /// Human-readable label bound to the slide, `Project N` with N 1-based.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Project {}", self.index + 1)
    }

    /// Set or clear `flag`, returning whether anything changed.
    pub(crate) fn set_class(&mut self, flag: SlideClasses, on: bool) -> bool {
        let before = self.classes;
        self.classes.set(flag, on);
        before != self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn slide(index: usize) -> Slide {
        Slide::new(index, ImageSource::Eager("x.jpg".to_string()))
    }

    #[test]
    fn visual_state_tracks_classes() {
        let mut s = slide(0);
        assert_eq!(s.visual_state(), VisualState::Inactive);
        assert!(s.set_class(SlideClasses::PREV, true));
        assert_eq!(s.visual_state(), VisualState::Exiting);
        assert!(s.set_class(SlideClasses::ACTIVE, true));
        assert_eq!(s.visual_state(), VisualState::Active);
        assert!(!s.set_class(SlideClasses::ACTIVE, true));
    }

    #[test]
    fn titles_are_one_based() {
        assert_eq!(slide(0).title(), "Project 1");
        assert_eq!(slide(4).title(), "Project 5");
    }

    #[test]
    fn class_names_match_styling_contract() {
        let names: Vec<_> = (SlideClasses::ACTIVE | SlideClasses::PREV)
            .class_names()
            .collect();
        assert_eq!(names, ["active", "prev"]);
    }
}
