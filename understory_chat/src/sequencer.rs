// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scheduling of bubble stages.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{ChatError, ChatTiming};

/// Stage of one bubble.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BubbleStage {
    /// The bubble is shown with a typing indicator.
    Typing,
    /// The message replaced the typing indicator.
    Revealed,
    /// The bubble reached its final shape and the view followed it.
    Settled,
}

/// Receives bubble stage changes.
///
/// Every method has an empty default; `()` ignores everything.
pub trait ChatHost {
    /// Append bubble `bubble` to the conversation with a typing indicator.
    fn bubble_typing(&mut self, bubble: usize) {
        let _ = bubble;
    }

    /// Replace the typing indicator of `bubble` with `message` (markup).
    fn message_revealed(&mut self, bubble: usize, message: &str) {
        let _ = (bubble, message);
    }

    /// Give `bubble` its final shape, fade its message in, and scroll the
    /// conversation to the bottom.
    fn bubble_settled(&mut self, bubble: usize) {
        let _ = bubble;
    }
}

impl ChatHost for () {}

/// Reveals a fixed list of messages one bubble at a time.
///
/// Like the carousel, the sequencer never reads a clock: the host calls
/// [`ChatSequencer::advance`] at or after [`ChatSequencer::next_deadline`].
#[derive(Clone, Debug)]
pub struct ChatSequencer {
    messages: Vec<String>,
    stages: Vec<Option<BubbleStage>>,
    timing: ChatTiming,
    started_at: Option<u64>,
}

impl ChatSequencer {
    /// Create a sequencer for `messages` in order.
    ///
    /// # Errors
    ///
    /// Returns a [`ChatError`] when `timing` fails validation.
    pub fn new(
        messages: impl IntoIterator<Item = impl Into<String>>,
        timing: ChatTiming,
    ) -> Result<Self, ChatError> {
        timing.validate()?;
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        Ok(Self {
            stages: alloc::vec![None; messages.len()],
            messages,
            timing,
            started_at: None,
        })
    }

    /// Start the script at `now`, typically once the document is ready.
    ///
    /// Only the first call has an effect; returns whether this call started
    /// the script.
    pub fn start(&mut self, now: u64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        tracing::debug!(messages = self.messages.len(), now, "chat script started");
        self.started_at = Some(now);
        true
    }

    /// Whether [`ChatSequencer::start`] was called.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Number of messages in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the script has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Stage of bubble `bubble`, or `None` if it has not appeared yet.
    #[must_use]
    pub fn stage(&self, bubble: usize) -> Option<BubbleStage> {
        self.stages.get(bubble).copied().flatten()
    }

    /// Whether every bubble is settled. An unstarted script is not finished
    /// unless it is empty.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stages
            .iter()
            .all(|stage| *stage == Some(BubbleStage::Settled))
    }

    /// Earliest timestamp at which [`ChatSequencer::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        (0..self.stages.len())
            .filter_map(|bubble| self.next_step(bubble))
            .map(|(at, _)| at)
            .min()
    }

    /// Apply every stage change due at or before `now`, in time order.
    ///
    /// Steps due at the same time are applied in bubble order.
    pub fn advance(&mut self, now: u64, host: &mut impl ChatHost) {
        while let Some((bubble, at, stage)) = self.earliest_step() {
            if at > now {
                break;
            }
            self.stages[bubble] = Some(stage);
            match stage {
                BubbleStage::Typing => host.bubble_typing(bubble),
                BubbleStage::Revealed => host.message_revealed(bubble, &self.messages[bubble]),
                BubbleStage::Settled => host.bubble_settled(bubble),
            }
            tracing::trace!(bubble, ?stage, at, "bubble stage");
        }
    }

    fn earliest_step(&self) -> Option<(usize, u64, BubbleStage)> {
        (0..self.stages.len())
            .filter_map(|bubble| {
                self.next_step(bubble)
                    .map(|(at, stage)| (bubble, at, stage))
            })
            .min_by_key(|&(bubble, at, _)| (at, bubble))
    }

    /// When and into which stage `bubble` moves next.
    fn next_step(&self, bubble: usize) -> Option<(u64, BubbleStage)> {
        let started_at = self.started_at?;
        let offset = u64::try_from(bubble)
            .unwrap_or(u64::MAX)
            .saturating_mul(self.timing.spacing);
        let appears_at = started_at.saturating_add(offset);
        match self.stages[bubble] {
            None => Some((appears_at, BubbleStage::Typing)),
            Some(BubbleStage::Typing) => Some((
                appears_at.saturating_add(self.timing.reveal_delay),
                BubbleStage::Revealed,
            )),
            Some(BubbleStage::Revealed) => Some((
                appears_at.saturating_add(self.timing.settle_delay),
                BubbleStage::Settled,
            )),
            Some(BubbleStage::Settled) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[derive(Debug, PartialEq)]
    enum Event {
        Typing(usize),
        Revealed(usize, String),
        Settled(usize),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl ChatHost for Recorder {
        fn bubble_typing(&mut self, bubble: usize) {
            self.events.push(Event::Typing(bubble));
        }

        fn message_revealed(&mut self, bubble: usize, message: &str) {
            self.events.push(Event::Revealed(bubble, message.to_string()));
        }

        fn bubble_settled(&mut self, bubble: usize) {
            self.events.push(Event::Settled(bubble));
        }
    }

    fn script() -> ChatSequencer {
        ChatSequencer::new(["Hi", "Nice to meet you"], ChatTiming::default()).unwrap()
    }

    #[test]
    fn nothing_happens_before_start() {
        let mut chat = script();
        let mut host = Recorder::default();
        assert_eq!(chat.next_deadline(), None);
        chat.advance(100_000, &mut host);
        assert!(host.events.is_empty());
        assert!(!chat.is_finished());
    }

    #[test]
    fn bubbles_follow_the_schedule() {
        let mut chat = script();
        let mut host = Recorder::default();
        assert!(chat.start(1000));

        chat.advance(1000, &mut host);
        assert_eq!(host.events, [Event::Typing(0)]);
        assert_eq!(chat.next_deadline(), Some(2200));

        chat.advance(2199, &mut host);
        assert_eq!(host.events.len(), 1);

        chat.advance(2200, &mut host);
        assert_eq!(host.events[1], Event::Revealed(0, "Hi".to_string()));
        assert_eq!(chat.stage(0), Some(BubbleStage::Revealed));

        chat.advance(2400, &mut host);
        assert_eq!(host.events[2], Event::Settled(0));
        assert_eq!(chat.stage(1), None);

        chat.advance(3200, &mut host);
        assert_eq!(host.events[3], Event::Typing(1));

        chat.advance(4600, &mut host);
        assert!(chat.is_finished());
        assert_eq!(chat.next_deadline(), None);
        assert_eq!(host.events.len(), 6);
    }

    #[test]
    fn late_advance_keeps_time_order() {
        let timing = ChatTiming {
            spacing: 100,
            reveal_delay: 150,
            settle_delay: 300,
        };
        let mut chat = ChatSequencer::new(["a", "b"], timing).unwrap();
        let mut host = Recorder::default();
        chat.start(0);
        chat.advance(1_000, &mut host);
        assert_eq!(
            host.events,
            vec![
                Event::Typing(0),
                Event::Typing(1),
                Event::Revealed(0, "a".to_string()),
                Event::Revealed(1, "b".to_string()),
                Event::Settled(0),
                Event::Settled(1),
            ]
        );
    }

    #[test]
    fn start_is_idempotent() {
        let mut chat = script();
        assert!(chat.start(0));
        assert!(!chat.start(500));
        assert_eq!(chat.next_deadline(), Some(0));
    }

    #[test]
    fn empty_script_is_finished() {
        let chat = ChatSequencer::new(Vec::<String>::new(), ChatTiming::default()).unwrap();
        assert!(chat.is_empty());
        assert!(chat.is_finished());
    }

    #[test]
    fn invalid_timing_is_rejected() {
        let timing = ChatTiming {
            spacing: 0,
            ..ChatTiming::default()
        };
        assert_eq!(
            ChatSequencer::new(["a"], timing).unwrap_err(),
            ChatError::ZeroSpacing
        );
    }
}
