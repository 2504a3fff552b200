// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a headless carousel through clicks, keys, swipes, and scrolling.
//!
//! Run with:
//! `cargo run -p understory_demos --example carousel_walkthrough [config.toml]`
//!
//! Set `RUST_LOG=understory_carousel=trace` to see rejected requests and
//! gesture evaluation as well.

use std::path::PathBuf;

use kurbo::{Point, Rect};
use understory_carousel::{Bindings, Control, ImageSource, Key, ObserverSupport, Slider};
use understory_demos::{DemoConfig, LogEvents, LogHost, init_tracing};

/// A simulated clock that only moves when the demo says so.
struct Clock {
    now: u64,
}

impl Clock {
    /// Let the slider run every step due within the next `ms` milliseconds.
    fn wait(&mut self, slider: &mut Slider, host: &mut LogHost, ms: u64) {
        let until = self.now + ms;
        while let Some(deadline) = slider.next_deadline().filter(|d| *d <= until) {
            self.now = self.now.max(deadline);
            slider.advance(self.now, host);
        }
        self.now = until;
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing("info,understory_carousel=debug");
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DemoConfig::load(path.as_deref())?;

    let sources = [
        ImageSource::Eager("image/inception-program-register.jpg".into()),
        ImageSource::Eager("image/cooler-master-campaign.jpg".into()),
        ImageSource::Deferred("image/geforce-cup-pacific-final.jpg".into()),
        ImageSource::Deferred("image/gameface-campaign.jpg".into()),
        ImageSource::Deferred("image/ai-conference-kr-19.jpg".into()),
    ];
    let mut host = LogHost::default();
    let mut slider = Slider::init(
        sources,
        &config.slider,
        ObserverSupport::Available,
        &mut host,
    )?;
    let mut clock = Clock { now: 0 };
    let mut events = LogEvents::default();
    let mut bindings = Bindings::attach(&mut events);

    // Lay the deferred images out in a column below the fold.
    for slide in 2..5_u32 {
        let top = 900.0 + 400.0 * f64::from(slide - 2);
        slider.set_image_bounds(slide as usize, Rect::new(0.0, top, 800.0, top + 360.0));
    }

    tracing::info!("--- next button, twice in a row");
    slider.on_click(Control::Next, clock.now, &mut host);
    slider.on_click(Control::Next, clock.now, &mut host);
    clock.wait(&mut slider, &mut host, 1000);

    tracing::info!("--- End key, then ArrowRight wraps to the first slide");
    slider.on_key(Key::End, clock.now, &mut host);
    clock.wait(&mut slider, &mut host, 1000);
    slider.on_key_name("ArrowRight", clock.now, &mut host);
    clock.wait(&mut slider, &mut host, 1000);

    tracing::info!("--- swipes on a phone-sized viewport");
    slider.on_touch_start(Point::new(300.0, 400.0), 390.0);
    slider.on_touch_end(Point::new(40.0, 420.0), 390.0, clock.now, &mut host);
    clock.wait(&mut slider, &mut host, 1000);
    slider.on_touch_start(Point::new(300.0, 400.0), 390.0);
    slider.on_touch_end(Point::new(290.0, 100.0), 390.0, clock.now, &mut host);

    tracing::info!("--- scrolling reveals deferred images");
    for top in [0.0, 400.0, 800.0, 1200.0] {
        let revealed = slider.on_viewport(Rect::new(0.0, top, 1280.0, top + 800.0), &mut host);
        tracing::info!(top, ?revealed, "viewport");
        for slide in revealed {
            slider.on_image_load(slide, &mut host);
        }
    }

    tracing::info!("--- teardown");
    bindings.detach(&mut events);
    anyhow::ensure!(events.live.is_empty(), "listeners leaked: {:?}", events.live);

    tracing::info!(
        current = slider.current_index(),
        counter = host.counter.as_deref().unwrap_or("-"),
        hooks = ?host.changed,
        "done"
    );
    Ok(())
}
