// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Play a chat introduction script against a logging host.
//!
//! Run with:
//! `cargo run -p understory_demos --example chat_transcript [config.toml]`

use std::path::PathBuf;

use understory_chat::ChatSequencer;
use understory_demos::{DemoConfig, LogHost, init_tracing};

const SCRIPT: &[&str] = &[
    "Hi",
    "Nice to meet you &#128512;",
    "I am a web developer focused on the front end",
    "Here are some of my works",
    "Project showcase<br><a href='#slider'>Open the gallery</a>",
    "I am open to new opportunities",
    "Hope you have a GOOD day",
    "&#129346;",
];

fn main() -> anyhow::Result<()> {
    init_tracing("info,understory_chat=debug");
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DemoConfig::load(path.as_deref())?;

    let mut chat = ChatSequencer::new(SCRIPT.iter().copied(), config.chat)?;
    let mut host = LogHost::default();

    // Document ready.
    chat.start(0);
    while let Some(deadline) = chat.next_deadline() {
        chat.advance(deadline, &mut host);
    }
    tracing::info!(bubbles = chat.len(), finished = chat.is_finished(), "script done");
    Ok(())
}
