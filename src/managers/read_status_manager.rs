//! Read Status Manager for Czytelnia.
//!
//! Keeps the set of read story identifiers in local storage. This is where
//! the file-backed story repository stores its read flags.

use std::collections::BTreeSet;

use tracing::warn;

use crate::services::local_storage::{LocalStorage, READ_STORIES_KEY};

/// Trait defining read-status operations.
pub trait ReadStatusManagerTrait {
    fn is_read(&self, story_id: &str) -> bool;
    fn mark_read(&mut self, story_id: &str);
    fn mark_unread(&mut self, story_id: &str);
    fn read_ids(&self) -> Vec<String>;
}

/// Read-status set loaded once and written back on every change.
pub struct ReadStatusManager {
    storage: Box<dyn LocalStorage>,
    read: BTreeSet<String>,
}

impl ReadStatusManager {
    /// Loads the stored set. A missing or malformed record yields an empty set.
    pub fn new(storage: Box<dyn LocalStorage>) -> Self {
        let read = match storage.get_item(READ_STORIES_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw)
                .map(|ids| ids.into_iter().collect())
                .unwrap_or_else(|e| {
                    warn!("Stored read status is malformed, starting empty: {}", e);
                    BTreeSet::new()
                }),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!("Failed to load read status: {}", e);
                BTreeSet::new()
            }
        };
        Self { storage, read }
    }

    fn persist(&mut self) {
        let ids: Vec<&String> = self.read.iter().collect();
        let json = match serde_json::to_string(&ids) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize read status: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(READ_STORIES_KEY, &json) {
            warn!("Failed to save read status: {}", e);
        }
    }
}

impl ReadStatusManagerTrait for ReadStatusManager {
    fn is_read(&self, story_id: &str) -> bool {
        self.read.contains(story_id)
    }

    fn mark_read(&mut self, story_id: &str) {
        self.read.insert(story_id.to_string());
        self.persist();
    }

    fn mark_unread(&mut self, story_id: &str) {
        self.read.remove(story_id);
        self.persist();
    }

    fn read_ids(&self) -> Vec<String> {
        self.read.iter().cloned().collect()
    }
}
