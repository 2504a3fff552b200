// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image resources attached to slides.

use alloc::string::String;

bitflags::bitflags! {
    /// Style classes carried by a slide's image element.
    ///
    /// The class names are a contract with the styling layer; see
    /// [`ImageClasses::class_names`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ImageClasses: u8 {
        /// The image finished loading (`loaded`).
        const LOADED = 1 << 0;
        /// The image source is still staged for deferred loading (`lazy`).
        const LAZY = 1 << 1;
    }
}

impl ImageClasses {
    /// Iterate over the CSS class names for the flags that are set.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        [(Self::LOADED, "loaded"), (Self::LAZY, "lazy")]
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

/// Load state of an [`ImageResource`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageState {
    /// Nothing has asked for the image yet.
    #[default]
    Unrequested,
    /// A request is in flight.
    Loading,
    /// The host reported a successful load.
    Loaded,
    /// The host reported a load failure. Failed images are not retried.
    Errored,
}

/// Where an image's source lives when the slider is initialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// The source is already in place and loads natively.
    Eager(String),
    /// The source is staged (for example in a `data-src` attribute) until
    /// the lazy-load observer reveals it.
    Deferred(String),
}

/// A loadable image bound to one slide.
#[derive(Clone, Debug)]
pub struct ImageResource {
    source: String,
    staged: bool,
    state: ImageState,
}

impl ImageResource {
    /// Create a resource from its initial source.
    #[must_use]
    pub fn new(source: ImageSource) -> Self {
        let (source, staged) = match source {
            ImageSource::Eager(source) => (source, false),
            ImageSource::Deferred(source) => (source, true),
        };
        Self {
            source,
            staged,
            state: ImageState::Unrequested,
        }
    }

    /// The real source of the image, staged or not.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> ImageState {
        self.state
    }

    /// Whether the source is still staged behind the lazy-load observer.
    #[must_use]
    pub const fn is_staged(&self) -> bool {
        self.staged
    }

    /// Style classes the image element should carry.
    #[must_use]
    pub fn classes(&self) -> ImageClasses {
        let mut classes = ImageClasses::empty();
        classes.set(ImageClasses::LAZY, self.staged);
        classes.set(ImageClasses::LOADED, self.state == ImageState::Loaded);
        classes
    }

    /// Move an unrequested image to [`ImageState::Loading`].
    ///
    /// Returns the source to fetch, or `None` when the image was already
    /// requested, loaded, or failed.
    pub fn request(&mut self) -> Option<&str> {
        if self.state != ImageState::Unrequested {
            return None;
        }
        self.state = ImageState::Loading;
        Some(&self.source)
    }

    /// Unstage a deferred source so the element displays it.
    ///
    /// Returns `false` if the source was never staged or was already revealed.
    /// Revealing also requests the image if nothing did so before.
    pub fn reveal(&mut self) -> bool {
        if !self.staged {
            return false;
        }
        self.staged = false;
        if self.state == ImageState::Unrequested {
            self.state = ImageState::Loading;
        }
        true
    }

    /// Record the host's load signal.
    pub fn mark_loaded(&mut self) {
        self.state = ImageState::Loaded;
    }

    /// Record the host's error signal.
    pub fn mark_errored(&mut self) {
        self.state = ImageState::Errored;
    }
}
