// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener bookkeeping between a host event source and a slider.
//!
//! Hosts typically attach one listener per event kind and must later detach
//! those same listeners. [`Bindings`] keeps the handles returned at
//! registration and hands exactly those back on removal, so cleanup can never
//! target a listener that was not the one registered.
//!
//! ```
//! use understory_carousel::{Bindings, EventKind, EventSource};
//!
//! #[derive(Default)]
//! struct Page {
//!     next_id: u32,
//!     live: Vec<(u32, EventKind)>,
//! }
//!
//! impl EventSource for Page {
//!     type Handle = u32;
//!     fn listen(&mut self, kind: EventKind) -> u32 {
//!         self.next_id += 1;
//!         self.live.push((self.next_id, kind));
//!         self.next_id
//!     }
//!     fn unlisten(&mut self, handle: u32) {
//!         self.live.retain(|(id, _)| *id != handle);
//!     }
//! }
//!
//! let mut page = Page::default();
//! let mut bindings = Bindings::attach(&mut page);
//! assert_eq!(page.live.len(), EventKind::ALL.len());
//! bindings.detach(&mut page);
//! assert!(page.live.is_empty());
//! ```

use alloc::vec::Vec;

use crate::input::Control;

/// Event kinds a slider listens to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Key presses on the document.
    KeyDown,
    /// Clicks on one of the navigation buttons.
    Click(Control),
    /// Touch start on the slider.
    TouchStart,
    /// Touch end on the slider.
    TouchEnd,
    /// Touch cancel on the slider.
    TouchCancel,
}

impl EventKind {
    /// Every listener a slider needs, in registration order.
    pub const ALL: [Self; 6] = [
        Self::KeyDown,
        Self::Click(Control::Previous),
        Self::Click(Control::Next),
        Self::TouchStart,
        Self::TouchEnd,
        Self::TouchCancel,
    ];
}

/// Something listeners can be attached to and detached from.
pub trait EventSource {
    /// Identity of one registered listener.
    type Handle;

    /// Attach a listener for `kind` and return its handle.
    fn listen(&mut self, kind: EventKind) -> Self::Handle;

    /// Detach the listener identified by `handle`.
    fn unlisten(&mut self, handle: Self::Handle);
}

/// Handles of the listeners attached for one slider.
#[derive(Debug)]
pub struct Bindings<H> {
    handles: Vec<(EventKind, H)>,
}

impl<H> Bindings<H> {
    /// Attach every kind in [`EventKind::ALL`] to `source`.
    pub fn attach<S>(source: &mut S) -> Self
    where
        S: EventSource<Handle = H> + ?Sized,
    {
        Self::attach_kinds(source, EventKind::ALL)
    }

    /// Attach the given kinds to `source`.
    pub fn attach_kinds<S>(source: &mut S, kinds: impl IntoIterator<Item = EventKind>) -> Self
    where
        S: EventSource<Handle = H> + ?Sized,
    {
        let handles = kinds
            .into_iter()
            .map(|kind| (kind, source.listen(kind)))
            .collect();
        Self { handles }
    }

    /// Whether any listener is still attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Kinds currently attached, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.handles.iter().map(|(kind, _)| *kind)
    }

    /// Detach every listener attached by these bindings.
    ///
    /// Detaching twice is a no-op.
    pub fn detach<S>(&mut self, source: &mut S)
    where
        S: EventSource<Handle = H> + ?Sized,
    {
        let count = self.handles.len();
        for (_, handle) in self.handles.drain(..) {
            source.unlisten(handle);
        }
        tracing::debug!(count, "listeners detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Hands out fresh handles and remembers what was removed.
    #[derive(Default)]
    struct Source {
        next: u32,
        live: Vec<u32>,
        removed: Vec<u32>,
    }

    impl EventSource for Source {
        type Handle = u32;

        fn listen(&mut self, _kind: EventKind) -> u32 {
            self.next += 1;
            self.live.push(self.next);
            self.next
        }

        fn unlisten(&mut self, handle: u32) {
            self.removed.push(handle);
            self.live.retain(|h| *h != handle);
        }
    }

    #[test]
    fn detach_removes_the_registered_handles() {
        let mut source = Source::default();
        let mut bindings = Bindings::attach(&mut source);
        assert!(bindings.is_attached());
        let registered = source.live.clone();
        bindings.detach(&mut source);
        assert_eq!(source.removed, registered);
        assert!(source.live.is_empty());
        assert!(!bindings.is_attached());
    }

    #[test]
    fn detach_twice_is_a_no_op() {
        let mut source = Source::default();
        let mut bindings = Bindings::attach(&mut source);
        bindings.detach(&mut source);
        bindings.detach(&mut source);
        assert_eq!(source.removed.len(), EventKind::ALL.len());
    }

    #[test]
    fn separate_bindings_do_not_interfere() {
        let mut source = Source::default();
        let mut first = Bindings::attach_kinds(&mut source, [EventKind::KeyDown]);
        let second = Bindings::attach_kinds(&mut source, [EventKind::KeyDown]);
        first.detach(&mut source);
        assert_eq!(source.live, vec![2]);
        assert_eq!(second.kinds().collect::<Vec<_>>(), [EventKind::KeyDown]);
    }
}
