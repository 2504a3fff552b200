// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation controller: input in, carousel operations out.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::carousel::Carousel;
use crate::gesture::{Swipe, SwipeTracker};
use crate::host::SliderHost;
use crate::image::ImageSource;
use crate::input::{Command, Control, Key};
use crate::lazy::{LazyObserver, ObserverSupport};
use crate::{SliderConfig, SliderError};

/// A carousel wired to keyboard, button, touch, and viewport input.
///
/// Created by [`Slider::init`] and owned by the host; there is no global
/// instance.
#[derive(Clone, Debug)]
pub struct Slider {
    carousel: Carousel,
    swipe: SwipeTracker,
    lazy: LazyObserver<usize>,
}

impl Slider {
    /// Build a slider over the page's slide images and publish its initial
    /// state to `host`.
    ///
    /// Deferred images are registered with the lazy-load observer without
    /// bounds and are not revealed until [`Slider::set_image_bounds`]
    /// reports where layout put them.
    ///
    /// # Errors
    ///
    /// [`SliderError::Empty`] when `sources` is empty, and
    /// [`SliderError::Config`] when `config` fails validation.
    pub fn init(
        sources: impl IntoIterator<Item = ImageSource>,
        config: &SliderConfig,
        support: ObserverSupport,
        host: &mut impl SliderHost,
    ) -> Result<Self, SliderError> {
        let mut carousel = Carousel::new(sources, config)?;
        let mut lazy = LazyObserver::new(support, config.lazy_margin);
        let mut deferred = 0;
        for slide in carousel.slides() {
            if slide.image().is_staged() && lazy.register_unplaced(slide.index()) {
                deferred += 1;
            }
        }
        tracing::debug!(
            slides = carousel.len(),
            deferred,
            ?support,
            "slider initialized"
        );
        carousel.start(host);
        Ok(Self {
            carousel,
            swipe: SwipeTracker::new(config.swipe_threshold, config.touch_breakpoint),
            lazy,
        })
    }

    /// The underlying state machine.
    #[must_use]
    pub const fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Index of the current slide.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.carousel.current_index()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.carousel.is_transitioning()
    }

    /// Run a navigation command. Returns whether a transition started.
    pub fn command(&mut self, command: Command, now: u64, host: &mut impl SliderHost) -> bool {
        match command {
            Command::Previous => self.carousel.previous(now, host),
            Command::Next => self.carousel.next(now, host),
            Command::First => self.carousel.first(now, host),
            Command::Last => self.carousel.last(now, host),
        }
    }

    /// Handle a key press.
    ///
    /// Keys are dropped up front while a transition is in flight.
    pub fn on_key(&mut self, key: Key, now: u64, host: &mut impl SliderHost) -> bool {
        if self.carousel.is_transitioning() {
            return false;
        }
        self.command(key.command(), now, host)
    }

    /// Handle a key press by host key name. Unknown keys are ignored.
    pub fn on_key_name(&mut self, name: &str, now: u64, host: &mut impl SliderHost) -> bool {
        Key::from_name(name).is_some_and(|key| self.on_key(key, now, host))
    }

    /// Handle a click on one of the navigation buttons.
    pub fn on_click(&mut self, control: Control, now: u64, host: &mut impl SliderHost) -> bool {
        self.command(control.command(), now, host)
    }

    /// Handle a touch start.
    pub fn on_touch_start(&mut self, position: Point, viewport_width: f64) {
        self.swipe.on_start(position, viewport_width);
    }

    /// Handle a touch end; a recognized swipe navigates.
    pub fn on_touch_end(
        &mut self,
        position: Point,
        viewport_width: f64,
        now: u64,
        host: &mut impl SliderHost,
    ) -> bool {
        match self.swipe.on_end(position, viewport_width) {
            Some(Swipe::Next) => self.carousel.next(now, host),
            Some(Swipe::Previous) => self.carousel.previous(now, host),
            None => false,
        }
    }

    /// Handle a touch cancel.
    pub fn on_touch_cancel(&mut self) {
        self.swipe.cancel();
    }

    /// Report the layout bounds of a slide's deferred image.
    ///
    /// Returns `false` if the image is not (or no longer) observed.
    pub fn set_image_bounds(&mut self, slide: usize, bounds: Rect) -> bool {
        self.lazy.update(&slide, bounds)
    }

    /// Reveal deferred images that came within the lazy-load margin of
    /// `viewport`. Returns the revealed slides.
    pub fn on_viewport(&mut self, viewport: Rect, host: &mut impl SliderHost) -> Vec<usize> {
        let mut revealed = self.lazy.observe(viewport);
        revealed.retain(|&slide| self.carousel.reveal_image(slide, host));
        revealed
    }

    /// Handle the native load signal of a slide's image.
    pub fn on_image_load(&mut self, slide: usize, host: &mut impl SliderHost) {
        self.carousel.image_loaded(slide, host);
    }

    /// Handle the native error signal of a slide's image.
    pub fn on_image_error(&mut self, slide: usize) {
        self.carousel.image_failed(slide);
    }

    /// Earliest timestamp at which [`Slider::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.carousel.next_deadline()
    }

    /// Apply every timed step due at `now`.
    pub fn advance(&mut self, now: u64, host: &mut impl SliderHost) {
        self.carousel.advance(now, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::recording::{Call, Recorder};
    use crate::image::{ImageClasses, ImageState};
    use alloc::format;
    use alloc::string::ToString;

    fn eager(len: usize) -> Vec<ImageSource> {
        (0..len)
            .map(|i| ImageSource::Eager(format!("image/{i}.jpg")))
            .collect()
    }

    fn slider(len: usize, host: &mut Recorder) -> Slider {
        Slider::init(
            eager(len),
            &SliderConfig::default(),
            ObserverSupport::Available,
            host,
        )
        .unwrap()
    }

    fn settle(slider: &mut Slider, host: &mut Recorder) {
        while let Some(deadline) = slider.next_deadline() {
            slider.advance(deadline, host);
        }
    }

    #[test]
    fn four_slide_walkthrough() {
        let mut host = Recorder::default();
        let mut s = slider(4, &mut host);
        assert_eq!(host.last_counter().unwrap().to_string(), "1 / 4");

        let mut now = 0;
        for _ in 0..3 {
            assert!(s.on_click(Control::Next, now, &mut host));
            settle(&mut s, &mut host);
            now += 1000;
        }
        assert_eq!(s.carousel().active_index(), Some(3));
        assert_eq!(host.last_counter().unwrap().to_string(), "4 / 4");

        assert!(s.on_click(Control::Next, now, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.carousel().active_index(), Some(0));
        assert_eq!(host.last_counter().unwrap().to_string(), "1 / 4");
    }

    #[test]
    fn arrow_keys_and_home_end() {
        let mut host = Recorder::default();
        let mut s = slider(5, &mut host);

        assert!(s.on_key(Key::End, 0, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.current_index(), 4);

        assert!(s.on_key(Key::ArrowLeft, 1000, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.current_index(), 3);

        assert!(s.on_key(Key::Home, 2000, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.current_index(), 0);

        assert!(s.on_key_name("ArrowRight", 3000, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.current_index(), 1);

        assert!(!s.on_key_name("Escape", 4000, &mut host));
        assert!(!s.is_transitioning());
    }

    #[test]
    fn keys_are_dropped_while_locked() {
        let mut host = Recorder::default();
        let mut s = slider(5, &mut host);
        assert!(s.on_key(Key::ArrowRight, 0, &mut host));
        assert!(!s.on_key(Key::End, 1, &mut host));
        assert!(!s.on_click(Control::Next, 1, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn home_on_first_slide_is_ignored() {
        let mut host = Recorder::default();
        let mut s = slider(3, &mut host);
        assert!(!s.on_key(Key::Home, 0, &mut host));
        assert!(!s.is_transitioning());
    }

    #[test]
    fn swipe_navigates_on_narrow_viewports() {
        let mut host = Recorder::default();
        let mut s = slider(3, &mut host);

        s.on_touch_start(Point::new(100.0, 0.0), 375.0);
        assert!(s.on_touch_end(Point::new(30.0, 0.0), 375.0, 0, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.current_index(), 1);

        s.on_touch_start(Point::new(30.0, 0.0), 375.0);
        assert!(s.on_touch_end(Point::new(100.0, 0.0), 375.0, 1000, &mut host));
        settle(&mut s, &mut host);
        assert_eq!(s.current_index(), 0);

        s.on_touch_start(Point::new(100.0, 0.0), 375.0);
        assert!(!s.on_touch_end(Point::new(80.0, 40.0), 375.0, 2000, &mut host));
    }

    #[test]
    fn swipe_is_ignored_on_desktop() {
        let mut host = Recorder::default();
        let mut s = slider(3, &mut host);
        s.on_touch_start(Point::new(500.0, 0.0), 1280.0);
        assert!(!s.on_touch_end(Point::new(0.0, 0.0), 1280.0, 0, &mut host));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn touch_cancel_drops_gesture() {
        let mut host = Recorder::default();
        let mut s = slider(3, &mut host);
        s.on_touch_start(Point::new(500.0, 0.0), 375.0);
        s.on_touch_cancel();
        assert!(!s.on_touch_end(Point::new(0.0, 0.0), 375.0, 0, &mut host));
    }

    #[test]
    fn controls_follow_the_lock() {
        let mut host = Recorder::default();
        let mut s = slider(3, &mut host);
        host.clear();
        s.on_click(Control::Previous, 0, &mut host);
        assert!(host.calls.contains(&Call::Controls(false)));
        assert!(!host.calls.contains(&Call::Controls(true)));
        settle(&mut s, &mut host);
        assert_eq!(host.calls.last(), Some(&Call::Changed(2)));
        assert!(host.calls.contains(&Call::Controls(true)));
    }

    #[test]
    fn deferred_images_reveal_near_viewport() {
        let mut host = Recorder::default();
        let sources = [
            ImageSource::Eager("image/0.jpg".into()),
            ImageSource::Deferred("image/1.jpg".into()),
            ImageSource::Deferred("image/2.jpg".into()),
        ];
        let config = SliderConfig {
            initial_preload: 0,
            ..SliderConfig::default()
        };
        let mut s = Slider::init(sources, &config, ObserverSupport::Available, &mut host).unwrap();
        assert!(host.calls.contains(&Call::ImageClasses(1, ImageClasses::LAZY)));

        assert!(s.set_image_bounds(1, Rect::new(0.0, 830.0, 300.0, 1000.0)));
        assert!(s.set_image_bounds(2, Rect::new(0.0, 3000.0, 300.0, 3200.0)));
        host.clear();

        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
        assert_eq!(s.on_viewport(viewport, &mut host), [1]);
        assert_eq!(
            host.calls,
            [
                Call::Swap(1, "image/1.jpg".into()),
                Call::ImageClasses(1, ImageClasses::empty()),
            ]
        );
        assert_eq!(
            s.carousel().slide(1).unwrap().image().state(),
            ImageState::Loading
        );
        // Fire-once.
        assert!(s.on_viewport(viewport, &mut host).is_empty());
        assert!(!s.set_image_bounds(1, Rect::ZERO));

        s.on_image_load(1, &mut host);
        assert_eq!(
            host.calls.last(),
            Some(&Call::ImageClasses(1, ImageClasses::LOADED))
        );
    }

    #[test]
    fn deferred_images_wait_for_layout() {
        let mut host = Recorder::default();
        let sources = [
            ImageSource::Eager("image/0.jpg".into()),
            ImageSource::Deferred("image/1.jpg".into()),
            ImageSource::Deferred("image/2.jpg".into()),
        ];
        let config = SliderConfig {
            initial_preload: 0,
            ..SliderConfig::default()
        };
        let mut s = Slider::init(sources, &config, ObserverSupport::Available, &mut host).unwrap();
        host.clear();

        // No bounds reported yet: nothing is revealed wherever the page is.
        assert!(
            s.on_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0), &mut host)
                .is_empty()
        );
        assert!(
            s.on_viewport(Rect::new(0.0, 3000.0, 1280.0, 3800.0), &mut host)
                .is_empty()
        );
        assert!(host.calls.is_empty());

        assert!(s.set_image_bounds(2, Rect::new(0.0, 3100.0, 300.0, 3300.0)));
        assert_eq!(
            s.on_viewport(Rect::new(0.0, 3000.0, 1280.0, 3800.0), &mut host),
            [2]
        );
        assert!(
            s.on_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0), &mut host)
                .is_empty()
        );
    }

    #[test]
    fn deferred_images_without_observer_stay_native() {
        let mut host = Recorder::default();
        let sources = [
            ImageSource::Eager("image/0.jpg".into()),
            ImageSource::Deferred("image/1.jpg".into()),
        ];
        let mut s = Slider::init(
            sources,
            &SliderConfig::default(),
            ObserverSupport::Unavailable,
            &mut host,
        )
        .unwrap();
        assert!(!s.set_image_bounds(1, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(
            s.on_viewport(Rect::new(0.0, 0.0, 1000.0, 1000.0), &mut host)
                .is_empty()
        );
    }

    #[test]
    fn failed_image_is_not_retried_by_navigation() {
        let mut host = Recorder::default();
        let config = SliderConfig {
            initial_preload: 0,
            ..SliderConfig::default()
        };
        let mut s = Slider::init(eager(4), &config, ObserverSupport::Available, &mut host).unwrap();
        s.on_image_error(0);
        host.clear();
        s.on_key(Key::End, 0, &mut host);
        settle(&mut s, &mut host);
        // Slide 3 neighbors only slide 2.
        assert_eq!(host.preloads(), [2]);
        s.on_key(Key::ArrowLeft, 1000, &mut host);
        settle(&mut s, &mut host);
        // Slide 2 neighbors 1 and 3.
        assert_eq!(host.preloads(), [2, 1, 3]);
        s.on_key(Key::Home, 2000, &mut host);
        settle(&mut s, &mut host);
        // Slide 0 neighbors only slide 1, which is already in flight.
        assert_eq!(host.preloads(), [2, 1, 3]);
        assert_eq!(
            s.carousel().slide(0).unwrap().image().state(),
            ImageState::Errored
        );
    }
}
