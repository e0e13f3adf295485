//! bloomly-report — Turning a scored profile into something to show.
//!
//! A profile is presented two ways: a flower theme keyed off the dominant
//! trait, and a plain-text summary of scores and confidences.

pub mod summary;
pub mod theme;

pub use summary::render_summary;
pub use theme::{FlowerTheme, PERSONALIZE_THRESHOLD};
