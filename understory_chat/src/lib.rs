// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Chat: reveal a scripted conversation bubble by bubble.
//!
//! A [`ChatSequencer`] holds a fixed list of messages and, once started,
//! moves each one through three [`BubbleStage`]s on a fixed schedule:
//!
//! - **Typing** at `k * spacing` after start: the bubble appears with a
//!   typing indicator.
//! - **Revealed** `reveal_delay` later: the message replaces the indicator.
//! - **Settled** `settle_delay` after appearing: the bubble takes its final
//!   shape and the conversation scrolls to it.
//!
//! The host renders stage changes through [`ChatHost`] and drives time.
//!
//! ```rust
//! use understory_chat::{BubbleStage, ChatSequencer, ChatTiming};
//!
//! let mut chat = ChatSequencer::new(["Hi", "Here are some of my works"], ChatTiming::default())
//!     .unwrap();
//!
//! // Document ready at t = 0ms.
//! chat.start(0);
//! chat.advance(0, &mut ());
//! assert_eq!(chat.stage(0), Some(BubbleStage::Typing));
//! assert_eq!(chat.stage(1), None);
//!
//! while let Some(deadline) = chat.next_deadline() {
//!     chat.advance(deadline, &mut ());
//! }
//! assert!(chat.is_finished());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `tracing` and `thiserror`.
//! - `serde`: derives `Deserialize`/`Serialize` for [`ChatTiming`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod sequencer;
mod timing;

pub use sequencer::{BubbleStage, ChatHost, ChatSequencer};
pub use timing::{ChatError, ChatTiming};
