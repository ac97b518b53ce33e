//! Library Manager for Czytelnia.
//!
//! Builds the list-view and detail-view models on top of a story repository
//! and owns the one read/unread toggle the views share.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::repository::StoryRepositoryTrait;
use crate::services::story_order::sort_metadata;
use crate::types::errors::StoryError;
use crate::types::story::{Story, StoryMetadata};

/// Everything the list view renders.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOverview {
    pub stories: Vec<StoryMetadata>,
    pub read_count: usize,
    pub total: usize,
    /// 0..=100, zero for an empty library.
    pub progress_percent: f64,
    pub is_empty: bool,
}

impl LibraryOverview {
    pub fn from_stories(mut stories: Vec<StoryMetadata>) -> Self {
        sort_metadata(&mut stories);
        let total = stories.len();
        let read_count = stories.iter().filter(|s| s.is_read).count();
        let progress_percent = if total == 0 {
            0.0
        } else {
            read_count as f64 / total as f64 * 100.0
        };
        Self {
            stories,
            read_count,
            total,
            progress_percent,
            is_empty: total == 0,
        }
    }
}

/// The detail view: the story, or the not-found state.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StoryView {
    Found(Story),
    NotFound { id: String },
}

impl StoryView {
    pub fn story(&self) -> Option<&Story> {
        match self {
            StoryView::Found(story) => Some(story),
            StoryView::NotFound { .. } => None,
        }
    }
}

/// Trait defining the library view operations.
pub trait LibraryManagerTrait {
    fn overview(&self) -> Result<LibraryOverview, StoryError>;
    fn open_story(&self, id: &str) -> StoryView;
    fn set_read(&mut self, view: &mut StoryView, value: bool) -> Result<(), StoryError>;
}

/// Library views over a borrowed repository.
pub struct LibraryManager<'a> {
    repo: &'a mut dyn StoryRepositoryTrait,
}

impl<'a> LibraryManager<'a> {
    pub fn new(repo: &'a mut dyn StoryRepositoryTrait) -> Self {
        Self { repo }
    }
}

impl LibraryManagerTrait for LibraryManager<'_> {
    fn overview(&self) -> Result<LibraryOverview, StoryError> {
        let stories = self.repo.list_metadata()?;
        Ok(LibraryOverview::from_stories(stories))
    }

    /// Repository failures render as not found.
    fn open_story(&self, id: &str) -> StoryView {
        match self.repo.get_by_id(id) {
            Ok(Some(story)) => StoryView::Found(story),
            Ok(None) => StoryView::NotFound { id: id.to_string() },
            Err(e) => {
                warn!("Failed to load story {}: {}", id, e);
                StoryView::NotFound { id: id.to_string() }
            }
        }
    }

    /// Marks the viewed story read or unread.
    ///
    /// The view reflects the new flag only once the repository accepted it.
    fn set_read(&mut self, view: &mut StoryView, value: bool) -> Result<(), StoryError> {
        let story = match view {
            StoryView::Found(story) => story,
            StoryView::NotFound { id } => return Err(StoryError::NotFound(id.clone())),
        };
        match self.repo.set_read_flag(&story.id, value) {
            Ok(()) => {
                story.is_read = value;
                info!(id = %story.id, is_read = value, "Story read flag changed");
                Ok(())
            }
            Err(e) => {
                let state = if value { "read" } else { "unread" };
                error!("Failed to mark story {} as {}: {}", story.id, state, e);
                Err(e)
            }
        }
    }
}
