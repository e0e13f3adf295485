//! The `bloomly reset` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use bloomly_core::storage::{KeyValueStore, ANSWERS_KEY, STATS_KEY};
use bloomly_store::FileStore;

pub async fn execute(data_dir: PathBuf) -> Result<()> {
    let store = FileStore::new(data_dir);
    store
        .delete(ANSWERS_KEY)
        .await
        .context("failed to clear in-progress answers")?;
    store
        .delete(STATS_KEY)
        .await
        .context("failed to clear saved profile")?;
    println!("Cleared saved profile and in-progress answers.");
    Ok(())
}
