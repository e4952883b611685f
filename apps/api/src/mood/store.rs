//! Durable mood log: a single JSON document mapping `user_id` to an ordered
//! sequence of entries, read, amended, and rewritten whole on every write.
//!
//! A missing or unparseable backing file initializes to an empty mapping —
//! callers never see an error for absence or corruption. Concurrent writers
//! race on the whole-file rewrite (last writer wins); accepted limitation,
//! the type is the seam where a transactional backend would slot in.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;

use crate::errors::AppError;
use crate::mood::MoodEntry;

type MoodLog = BTreeMap<String, Vec<MoodEntry>>;

#[derive(Debug, Clone)]
pub struct MoodStore {
    path: PathBuf,
}

impl MoodStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Appends a new entry for `user_id` with a freshly generated timestamp
    /// and returns a confirmation echoing the mood text.
    pub async fn store_mood(&self, user_id: &str, mood_text: &str) -> Result<String, AppError> {
        let mut log = self.read_log().await?;
        log.entry(user_id.to_string()).or_default().push(MoodEntry {
            timestamp: Utc::now().to_rfc3339(),
            mood: mood_text.to_string(),
        });

        let json = serde_json::to_vec_pretty(&log)
            .map_err(|e| AppError::Storage(format!("failed to serialize mood log: {e}")))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::Storage(format!("failed to write {}: {e}", self.path.display())))?;

        Ok(format!("Logged mood: {mood_text}"))
    }

    /// Returns the user's entries in insertion order. Absent users, a missing
    /// backing file, or a corrupt one all yield an empty sequence — this
    /// never fails the caller.
    pub async fn get_mood_history(&self, user_id: &str) -> Vec<MoodEntry> {
        match self.read_log().await {
            Ok(mut log) => log.remove(user_id).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Loads the whole log. Missing file or unparseable content → empty
    /// mapping; any other I/O failure is a storage error.
    async fn read_log(&self) -> Result<MoodLog, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_default()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(MoodLog::new()),
            Err(e) => Err(AppError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> MoodStore {
        MoodStore::new(dir.path().join("mood_log.json"))
    }

    #[tokio::test]
    async fn test_entries_append_in_call_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.store_mood("ada", "feeling great").await.unwrap();
        store.store_mood("ada", "a bit tired").await.unwrap();
        store.store_mood("ada", "4 out of 10").await.unwrap();

        let history = store.get_mood_history("ada").await;
        let moods: Vec<&str> = history.iter().map(|e| e.mood.as_str()).collect();
        assert_eq!(moods, ["feeling great", "a bit tired", "4 out of 10"]);
    }

    #[tokio::test]
    async fn test_timestamps_are_non_decreasing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for mood in ["one", "two", "three"] {
            store.store_mood("ada", mood).await.unwrap();
        }

        let history = store.get_mood_history("ada").await;
        for pair in history.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_confirmation_echoes_mood_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let confirmation = store.store_mood("ada", "cautiously optimistic").await.unwrap();
        assert_eq!(confirmation, "Logged mood: cautiously optimistic");
    }

    #[tokio::test]
    async fn test_unknown_user_yields_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.store_mood("ada", "fine").await.unwrap();
        assert!(store.get_mood_history("grace").await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.get_mood_history("ada").await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.json");
        std::fs::write(&path, "{not json at all").unwrap();
        let store = MoodStore::new(path);

        assert!(store.get_mood_history("ada").await.is_empty());

        // A write after corruption starts over from an empty mapping.
        store.store_mood("ada", "recovered").await.unwrap();
        let history = store.get_mood_history("ada").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].mood, "recovered");
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.store_mood("ada", "focused").await.unwrap();
        store.store_mood("grace", "curious").await.unwrap();

        assert_eq!(store.get_mood_history("ada").await.len(), 1);
        assert_eq!(store.get_mood_history("grace").await.len(), 1);
    }

    #[tokio::test]
    async fn test_entries_survive_store_reconstruction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.json");

        MoodStore::new(path.clone())
            .store_mood("ada", "persisted")
            .await
            .unwrap();

        let history = MoodStore::new(path).get_mood_history("ada").await;
        assert_eq!(history[0].mood, "persisted");
    }
}
