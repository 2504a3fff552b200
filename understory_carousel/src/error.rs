// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time errors.
//!
//! Runtime input never fails: redundant or invalid navigation requests are
//! ignored and reported as `false`. Only building a [`Slider`](crate::Slider)
//! can be rejected.

/// A [`SliderConfig`](crate::SliderConfig) that breaks a timing or distance invariant.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Transition delays must satisfy `settle < unlock < hook`.
    #[error("transition delays must be strictly increasing (settle {settle}ms, unlock {unlock}ms, hook {hook}ms)")]
    DelayOrder {
        /// Configured settle delay.
        settle: u64,
        /// Configured unlock delay.
        unlock: u64,
        /// Configured hook delay.
        hook: u64,
    },
    /// A distance setting is negative or not finite.
    #[error("`{name}` must be a finite, non-negative distance, got {value}")]
    InvalidDistance {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Reasons a [`Slider`](crate::Slider) cannot be initialized.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SliderError {
    /// The host document contained no slides.
    #[error("a carousel needs at least one slide")]
    Empty,
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
