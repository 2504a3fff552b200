// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary understood by the navigation controller.

use core::str::FromStr;

/// Navigation keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `ArrowLeft`: previous slide.
    ArrowLeft,
    /// `ArrowRight`: next slide.
    ArrowRight,
    /// `Home`: first slide.
    Home,
    /// `End`: last slide.
    End,
}

impl Key {
    /// Parse a host key name such as `"ArrowLeft"`. Other keys yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }

    /// The command this key maps to.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::ArrowLeft => Command::Previous,
            Self::ArrowRight => Command::Next,
            Self::Home => Command::First,
            Self::End => Command::Last,
        }
    }
}

/// A key name that is not one of the navigation keys.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("not a navigation key")]
pub struct UnknownKey;

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(UnknownKey)
    }
}

/// The two on-page navigation buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// The "previous" button.
    Previous,
    /// The "next" button.
    Next,
}

impl Control {
    /// The command this button maps to.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::Previous => Command::Previous,
            Self::Next => Command::Next,
        }
    }
}

/// A navigation request, independent of the input that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Previous slide, wrapping.
    Previous,
    /// Next slide, wrapping.
    Next,
    /// First slide.
    First,
    /// Last slide.
    Last,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!("End".parse::<Key>(), Ok(Key::End));
        assert_eq!("Enter".parse::<Key>(), Err(UnknownKey));
        assert_eq!(Key::from_name("arrowleft"), None);
    }

    #[test]
    fn commands() {
        assert_eq!(Key::Home.command(), Command::First);
        assert_eq!(Key::ArrowRight.command(), Command::Next);
        assert_eq!(Control::Previous.command(), Command::Previous);
    }
}
