//! Plain-text summary of a scored profile.

use bloomly_core::profile::{Stats, Trait};

use crate::theme::FlowerTheme;

/// Format a profile as a markdown summary.
///
/// Lists every trait with its score, confidence, and answer count, marks
/// the dominant trait, and closes with the flower caption when the profile
/// earns one.
pub fn render_summary(stats: &Stats) -> String {
    let dominant = stats.dominant.unwrap_or_else(|| stats.dominant_trait());
    let mut md = String::new();

    md.push_str("| Trait | Score | Confidence | Answers |\n");
    md.push_str("|-------|-------|------------|---------|\n");
    for t in Trait::ALL {
        let conf = stats
            .confidences
            .as_ref()
            .map(|c| format!("{}%", c[t]))
            .unwrap_or_else(|| "-".to_string());
        let count = stats
            .counts
            .as_ref()
            .map(|c| c[t].to_string())
            .unwrap_or_else(|| "-".to_string());
        let marker = if t == dominant { " (dominant)" } else { "" };
        md.push_str(&format!(
            "| {}{} | {} | {} | {} |\n",
            t.name(),
            marker,
            stats.score(t),
            conf,
            count
        ));
    }

    if let Some(theme) = FlowerTheme::for_stats(stats) {
        md.push('\n');
        md.push_str(theme.caption);
        md.push('\n');
    }

    md
}
