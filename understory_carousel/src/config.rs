// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel tuning: transition delays, gesture thresholds, and loading policy.

use crate::ConfigError;

/// Tunable constants for a [`Slider`](crate::Slider).
///
/// All delays are in milliseconds and are measured from the moment a
/// transition is accepted. Distances are in the host's logical units
/// (typically CSS pixels).
///
/// The three delays must be strictly increasing so that a transition always
/// flips, then unlocks, then fires its hook; [`SliderConfig::validate`]
/// enforces this.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct SliderConfig {
    /// Delay before the incoming slide is marked active.
    pub settle_delay: u64,
    /// Delay before navigation is accepted again.
    pub unlock_delay: u64,
    /// Delay before the `slide_changed` hook fires.
    pub hook_delay: u64,
    /// Minimum horizontal travel for a touch motion to count as a swipe.
    pub swipe_threshold: f64,
    /// Viewport width at or above which touch gestures are ignored.
    pub touch_breakpoint: f64,
    /// Distance around the viewport within which lazy images are revealed.
    pub lazy_margin: f64,
    /// Number of slides after the first one requested at startup.
    pub initial_preload: usize,
}

impl SliderConfig {
    /// Default settle delay in milliseconds.
    pub const DEFAULT_SETTLE_DELAY: u64 = 50;
    /// Default unlock delay in milliseconds.
    pub const DEFAULT_UNLOCK_DELAY: u64 = 100;
    /// Default hook delay in milliseconds.
    pub const DEFAULT_HOOK_DELAY: u64 = 500;

    /// Create a configuration with the default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
            unlock_delay: Self::DEFAULT_UNLOCK_DELAY,
            hook_delay: Self::DEFAULT_HOOK_DELAY,
            swipe_threshold: 50.0,
            touch_breakpoint: 1024.0,
            lazy_margin: 50.0,
            initial_preload: 2,
        }
    }

    /// Check the invariants the state machine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DelayOrder`] when the delays are not strictly
    /// increasing, and [`ConfigError::InvalidDistance`] when a distance is
    /// negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.settle_delay < self.unlock_delay && self.unlock_delay < self.hook_delay) {
            return Err(ConfigError::DelayOrder {
                settle: self.settle_delay,
                unlock: self.unlock_delay,
                hook: self.hook_delay,
            });
        }
        for (name, value) in [
            ("swipe_threshold", self.swipe_threshold),
            ("touch_breakpoint", self.touch_breakpoint),
            ("lazy_margin", self.lazy_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { name, value });
            }
        }
        Ok(())
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self::new()
    }
}
