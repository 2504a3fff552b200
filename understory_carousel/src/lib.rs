// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: a headless image carousel controller.
//!
//! This crate decides *which* slide is active and *when* a transition may
//! start. It does not render, animate, or load anything itself; a host owns
//! the elements and timers and applies the side effects reported through
//! [`SliderHost`].
//!
//! The pieces, leaf first:
//!
//! - [`Preloader`]: picks the neighbors of a slide to fetch ahead of display.
//! - [`LazyObserver`]: fire-once proximity tracking for deferred images, with a
//!   graceful no-op when the host has no intersection primitive.
//! - [`evaluate_swipe`] / [`SwipeTracker`]: turns touch start/end samples into
//!   a [`Swipe`], ignoring vertical scrolls, jitter, and wide viewports.
//! - [`Carousel`]: the slide state machine. It owns the current index and an
//!   explicit [`TransitionPhase`], and advances through flip, unlock, and
//!   `slide_changed` steps as the host reports time.
//! - [`Slider`]: the navigation controller binding keys, buttons, touches,
//!   and viewport updates to the carousel. [`Bindings`] keeps track of the
//!   host listeners so they can be detached exactly.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::{
//!     Control, ImageSource, ObserverSupport, Slider, SliderConfig,
//! };
//!
//! let sources = (1..=4).map(|i| ImageSource::Eager(format!("image/{i}.jpg")));
//! let mut slider = Slider::init(
//!     sources,
//!     &SliderConfig::default(),
//!     ObserverSupport::Available,
//!     &mut (),
//! )
//! .unwrap();
//!
//! // Click "next" at t = 0ms. A second click right away is dropped.
//! assert!(slider.on_click(Control::Next, 0, &mut ()));
//! assert!(!slider.on_click(Control::Next, 0, &mut ()));
//!
//! // The host drives time; after the chain completes slide 1 is active.
//! while let Some(deadline) = slider.next_deadline() {
//!     slider.advance(deadline, &mut ());
//! }
//! assert_eq!(slider.carousel().active_index(), Some(1));
//! assert_eq!(slider.carousel().counter().to_string(), "2 / 4");
//! ```
//!
//! ## Timing
//!
//! All timestamps are caller-supplied milliseconds from any monotonic origin.
//! The crate never reads a clock; hosts schedule a timer for
//! [`Slider::next_deadline`] and call [`Slider::advance`] when it fires.
//! Late calls are fine: every step that is due is applied, in order.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`, `tracing`, and
//!   `thiserror`.
//! - `libm`: `no_std` float support for `kurbo`.
//! - `serde`: derives `Deserialize`/`Serialize` for [`SliderConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bindings;
mod carousel;
mod config;
mod error;
mod gesture;
mod host;
mod image;
mod input;
mod lazy;
mod preload;
mod slide;
mod slider;

pub use bindings::{Bindings, EventKind, EventSource};
pub use carousel::{Carousel, TransitionPhase};
pub use config::SliderConfig;
pub use error::{ConfigError, SliderError};
pub use gesture::{Swipe, SwipeTracker, evaluate_swipe};
pub use host::{Counter, SliderHost};
pub use image::{ImageClasses, ImageResource, ImageSource, ImageState};
pub use input::{Command, Control, Key, UnknownKey};
pub use lazy::{LazyObserver, ObserverSupport};
pub use preload::{Neighbors, Preloader};
pub use slide::{Slide, SlideClasses, VisualState};
pub use slider::Slider;
