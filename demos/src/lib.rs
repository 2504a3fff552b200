// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared plumbing for the Understory demos: configuration loading, logging
//! setup, and hosts that print what a renderer would do.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};
use understory_carousel::{
    Counter, EventKind, EventSource, ImageClasses, SlideClasses, SliderConfig, SliderHost,
};
use understory_chat::{ChatHost, ChatTiming};

/// Settings for the demos, as read from a TOML file.
///
/// ```toml
/// [slider]
/// settle_delay = 50
/// unlock_delay = 100
/// hook_delay = 500
///
/// [chat]
/// spacing = 2200
/// ```
///
/// Missing tables and fields fall back to their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Carousel tuning.
    pub slider: SliderConfig,
    /// Chat reveal timing.
    pub chat: ChatTiming,
}

impl DemoConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or on values that do not validate.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("parsing demo configuration")?;
        config.slider.validate().context("invalid [slider] settings")?;
        config.chat.validate().context("invalid [chat] settings")?;
        Ok(config)
    }

    /// Load a configuration file, or the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::from_toml(&text)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// A host that logs every side effect instead of touching a document.
#[derive(Debug, Default)]
pub struct LogHost {
    /// Counter text as last reported.
    pub counter: Option<String>,
    /// Slides reported through `slide_changed`, in order.
    pub changed: Vec<usize>,
}

impl SliderHost for LogHost {
    fn slide_classes(&mut self, slide: usize, classes: SlideClasses) {
        let names: Vec<_> = classes.class_names().collect();
        tracing::info!(slide, classes = ?names, "slide classes");
    }

    fn image_classes(&mut self, slide: usize, classes: ImageClasses) {
        let names: Vec<_> = classes.class_names().collect();
        tracing::info!(slide, classes = ?names, "image classes");
    }

    fn preload_image(&mut self, slide: usize, source: &str) {
        tracing::info!(slide, source, "preload");
    }

    fn swap_source(&mut self, slide: usize, source: &str) {
        tracing::info!(slide, source, "lazy source swapped in");
    }

    fn counter(&mut self, counter: Counter) {
        tracing::info!(%counter, "counter");
        self.counter = Some(counter.to_string());
    }

    fn slide_title(&mut self, slide: usize, title: &str) {
        tracing::info!(slide, title, "title");
    }

    fn controls_enabled(&mut self, enabled: bool) {
        tracing::info!(enabled, "controls");
    }

    fn slide_changed(&mut self, slide: usize) {
        tracing::info!(slide, "slide changed");
        self.changed.push(slide);
    }
}

impl ChatHost for LogHost {
    fn bubble_typing(&mut self, bubble: usize) {
        tracing::info!(bubble, "typing...");
    }

    fn message_revealed(&mut self, bubble: usize, message: &str) {
        tracing::info!(bubble, message, "message");
    }

    fn bubble_settled(&mut self, bubble: usize) {
        tracing::info!(bubble, "settled, scrolled to bottom");
    }
}

/// A stand-in for a document's listener registry.
///
/// Hands out a fresh id per listener and logs each change.
#[derive(Debug, Default)]
pub struct LogEvents {
    next_id: u32,
    /// Listeners currently attached, by id.
    pub live: Vec<(u32, EventKind)>,
}

impl EventSource for LogEvents {
    type Handle = u32;

    fn listen(&mut self, kind: EventKind) -> u32 {
        self.next_id += 1;
        tracing::info!(id = self.next_id, ?kind, "listener attached");
        self.live.push((self.next_id, kind));
        self.next_id
    }

    fn unlisten(&mut self, handle: u32) {
        let before = self.live.len();
        self.live.retain(|(id, _)| *id != handle);
        if self.live.len() == before {
            tracing::warn!(id = handle, "no such listener");
        } else {
            tracing::info!(id = handle, "listener detached");
        }
    }
}
