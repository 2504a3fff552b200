// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal timing for a chat script.

/// Millisecond delays of a chat script.
///
/// Bubble `k` appears at `k * spacing` after the script starts. Its message
/// replaces the typing indicator `reveal_delay` later, and the bubble settles
/// `settle_delay` after it appeared.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default)
)]
pub struct ChatTiming {
    /// Delay between the appearance of consecutive bubbles.
    pub spacing: u64,
    /// Delay from appearance to message reveal.
    pub reveal_delay: u64,
    /// Delay from appearance to settling.
    pub settle_delay: u64,
}

impl ChatTiming {
    /// Create the default timing: 2200ms spacing, reveal at 1200ms, settle
    /// at 1400ms.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spacing: 2200,
            reveal_delay: 1200,
            settle_delay: 1400,
        }
    }

    /// Check that bubbles are spaced and reveal before settling.
    ///
    /// # Errors
    ///
    /// [`ChatError::ZeroSpacing`] and [`ChatError::RevealAfterSettle`].
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.spacing == 0 {
            return Err(ChatError::ZeroSpacing);
        }
        if self.reveal_delay >= self.settle_delay {
            return Err(ChatError::RevealAfterSettle {
                reveal: self.reveal_delay,
                settle: self.settle_delay,
            });
        }
        Ok(())
    }
}

impl Default for ChatTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid [`ChatTiming`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// Bubbles would all appear at once.
    #[error("bubble spacing must be greater than zero")]
    ZeroSpacing,
    /// The message would be revealed after (or as) the bubble settles.
    #[error("reveal delay ({reveal}ms) must be shorter than settle delay ({settle}ms)")]
    RevealAfterSettle {
        /// Configured reveal delay.
        reveal: u64,
        /// Configured settle delay.
        settle: u64,
    },
}
