//! The key-value persistence boundary and the two Bloomly records.
//!
//! Storage failures never surface to the quiz flow: a failed or malformed
//! read counts as "no stored value", and a failed write is logged and
//! dropped while the session carries on with in-memory state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::profile::Stats;

/// Key holding the partial answer sequence of an in-flight quiz.
pub const ANSWERS_KEY: &str = "@bloomly_answers";

/// Key holding the last finalized trait profile.
pub const STATS_KEY: &str = "@bloomly_stats";

/// Asynchronous string key-value store, the only persistence collaborator.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key).await
    }
}

/// The persisted profile record: the stats themselves plus bookkeeping.
///
/// `Stats` fields are flattened so older records holding a bare stats
/// object still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProfile {
    #[serde(flatten)]
    pub stats: Stats,
    /// When the pass that produced this record completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Load the persisted partial answer sequence, or empty when absent,
/// malformed, or unreadable.
pub async fn load_answers<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    match store.get(ANSWERS_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(answers) => answers,
            Err(e) => {
                tracing::warn!("stored answers are not valid JSON, starting fresh: {e}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!("failed to read saved answers: {e}");
            Vec::new()
        }
    }
}

/// Persist the partial answer sequence. Failures are logged and dropped.
pub async fn save_answers<S: KeyValueStore + ?Sized>(store: &S, answers: &[String]) {
    match serde_json::to_string(answers) {
        Ok(json) => {
            if let Err(e) = store.set(ANSWERS_KEY, &json).await {
                tracing::warn!("failed to persist answers: {e}");
            }
        }
        Err(e) => tracing::warn!("failed to serialize answers: {e}"),
    }
}

/// Remove the persisted answer sequence.
pub async fn clear_answers<S: KeyValueStore + ?Sized>(store: &S) {
    if let Err(e) = store.delete(ANSWERS_KEY).await {
        tracing::warn!("failed to clear saved answers: {e}");
    }
}

/// Load the last saved profile record, `None` when absent, malformed, or
/// unreadable.
pub async fn load_profile<S: KeyValueStore + ?Sized>(store: &S) -> Option<SavedProfile> {
    match store.get(STATS_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!("stored stats are not valid JSON, treating as absent: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("failed to read saved stats: {e}");
            None
        }
    }
}

/// Load just the stats from the last saved profile.
pub async fn load_stats<S: KeyValueStore + ?Sized>(store: &S) -> Option<Stats> {
    load_profile(store).await.map(|p| p.stats)
}

/// Persist a finalized profile, stamped with the current time. Failures
/// are logged and dropped.
pub async fn save_stats<S: KeyValueStore + ?Sized>(store: &S, stats: &Stats) {
    let record = SavedProfile {
        stats: stats.clone(),
        saved_at: Some(Utc::now()),
    };
    match serde_json::to_string(&record) {
        Ok(json) => {
            if let Err(e) = store.set(STATS_KEY, &json).await {
                tracing::warn!("failed to persist stats: {e}");
            }
        }
        Err(e) => tracing::warn!("failed to serialize stats: {e}"),
    }
}

/// Remove the saved profile record.
pub async fn clear_stats<S: KeyValueStore + ?Sized>(store: &S) {
    if let Err(e) = store.delete(STATS_KEY).await {
        tracing::warn!("failed to clear saved stats: {e}");
    }
}
