// Czytelnia story repositories
// Every backend offers the same lookups and the read-flag toggle: a directory of text files,
// the local document store, or the hosted document backend over HTTP.

pub mod document_repository;
pub mod file_repository;
#[cfg(feature = "remote")]
pub mod remote_repository;

use crate::types::errors::StoryError;
use crate::types::story::{Story, StoryMetadata};

pub use document_repository::DocumentStoryRepository;
pub use file_repository::FileStoryRepository;
#[cfg(feature = "remote")]
pub use remote_repository::RemoteStoryRepository;

/// Story lookups and read tracking, independent of the backing store.
///
/// Lookups signal a missing story with `Ok(None)`; only the read toggle
/// reports it as [`StoryError::NotFound`].
pub trait StoryRepositoryTrait {
    /// Metadata of every story, ordered by sequence number.
    fn list_metadata(&self) -> Result<Vec<StoryMetadata>, StoryError>;
    /// Every story with its text, ordered by sequence number.
    fn list_stories(&self) -> Result<Vec<Story>, StoryError>;
    fn get_by_id(&self, id: &str) -> Result<Option<Story>, StoryError>;
    fn get_by_number(&self, number: i64) -> Result<Option<Story>, StoryError>;
    /// Sets only the read flag. Idempotent.
    fn set_read_flag(&mut self, id: &str, value: bool) -> Result<(), StoryError>;
    fn backend_name(&self) -> &'static str;
}
