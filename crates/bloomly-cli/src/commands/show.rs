//! The `bloomly show` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::SecondsFormat;
use comfy_table::{Cell, Table};

use bloomly_core::profile::Trait;
use bloomly_core::storage;
use bloomly_report::theme::FlowerTheme;
use bloomly_store::FileStore;

pub async fn execute(data_dir: PathBuf, format: String) -> Result<()> {
    let store = FileStore::new(data_dir);
    let Some(profile) = storage::load_profile(&store).await else {
        println!("No saved profile. Run `bloomly quiz` to create one.");
        return Ok(());
    };

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        _ => {
            // table format
            let stats = &profile.stats;
            let dominant = stats.dominant.unwrap_or_else(|| stats.dominant_trait());

            let mut table = Table::new();
            table.set_header(vec!["Trait", "Score", "Confidence", "Answers"]);
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
                let name = if t == dominant {
                    format!("{} *", t.name())
                } else {
                    t.name().to_string()
                };
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(stats.score(t)),
                    Cell::new(conf),
                    Cell::new(count),
                ]);
            }
            println!("{table}");

            match FlowerTheme::for_stats(stats) {
                Some(theme) => println!("\n{}", theme.caption),
                None => println!("\nNo trait stands out yet."),
            }
            if let Some(saved_at) = profile.saved_at {
                println!("Saved: {}", saved_at.to_rfc3339_opts(SecondsFormat::Secs, true));
            }
        }
    }

    Ok(())
}
