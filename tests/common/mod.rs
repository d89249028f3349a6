//! Shared helpers for integration tests.

#![allow(dead_code)]

use pagebox::surface::DrawCommand;
use pagebox::{PageId, RecordingSurface, SurfaceOptions};

/// Route `tracing` output through the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A margin-less surface with one page, so absolute coordinates are easy to read.
pub fn surface(width: f64, height: f64) -> RecordingSurface {
    init_tracing();
    RecordingSurface::with_options(
        SurfaceOptions::default()
            .with_page_size(width, height)
            .without_margins(),
    )
}

pub fn kinds(surface: &RecordingSurface, page: PageId) -> Vec<&'static str> {
    surface.commands(page).iter().map(DrawCommand::kind).collect()
}
