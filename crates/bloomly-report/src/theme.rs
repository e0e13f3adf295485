//! Flower themes: each trait maps to a flower, and a profile earns its
//! dominant trait's flower only when the score clears a threshold above
//! the neutral baseline.

use bloomly_core::profile::{Stats, Trait};

/// Dominant score required (strictly greater) before the profile gets a
/// personalized flower instead of the generic showcase one.
pub const PERSONALIZE_THRESHOLD: u8 = 45;

/// Generic flower shown when no trait stands out.
pub const DEFAULT_ASSET: &str = "showcaseFlower.png";

/// A trait's flower: display name, image asset, and a one-line caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowerTheme {
    pub trait_kind: Trait,
    pub flower: &'static str,
    pub asset: &'static str,
    pub caption: &'static str,
}

impl FlowerTheme {
    /// The flower assigned to a trait.
    pub fn for_trait(trait_kind: Trait) -> Self {
        let (flower, asset, caption) = match trait_kind {
            Trait::Energy => (
                "Sunflower",
                "sunflower.png",
                "Sunflower — your vibrant energy and zest for life.",
            ),
            Trait::Creativity => (
                "Orchid",
                "orchid.png",
                "Orchid — your unique creativity and imagination.",
            ),
            Trait::Calmness => (
                "Lavender",
                "lavender.png",
                "Lavender — your serene and calming presence.",
            ),
            Trait::Kindness => (
                "Red Rose",
                "red-rose.png",
                "Red Rose — your warmth and compassion.",
            ),
            Trait::Discipline => (
                "Vine",
                "vine.png",
                "Vine — your steady discipline and growth.",
            ),
        };
        Self {
            trait_kind,
            flower,
            asset,
            caption,
        }
    }

    /// Pick a theme for a scored profile.
    ///
    /// Returns `None` when the dominant score does not clear
    /// [`PERSONALIZE_THRESHOLD`], meaning the caller should fall back to
    /// [`DEFAULT_ASSET`].
    pub fn for_stats(stats: &Stats) -> Option<Self> {
        let dominant = stats.dominant.unwrap_or_else(|| stats.dominant_trait());
        (stats.score(dominant) > PERSONALIZE_THRESHOLD).then(|| Self::for_trait(dominant))
    }
}
