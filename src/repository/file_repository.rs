//! File-backed story repository.
//!
//! Stories are `<number>-<slug>.txt` files parsed on every request. Text files
//! carry no read flag, so flags live in the local read-status record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::managers::read_status_manager::{ReadStatusManager, ReadStatusManagerTrait};
use crate::repository::StoryRepositoryTrait;
use crate::services::story_parser::{extract_title, is_story_file, parse_filename, story_id};
use crate::types::errors::StoryError;
use crate::types::story::{Story, StoryMetadata};

/// Story repository over a directory of text files.
pub struct FileStoryRepository {
    stories_dir: PathBuf,
    read_status: ReadStatusManager,
}

fn format_time(time: SystemTime) -> String {
    OffsetDateTime::from(time).format(&Rfc3339).unwrap_or_default()
}

impl FileStoryRepository {
    pub fn new<P: AsRef<Path>>(stories_dir: P, read_status: ReadStatusManager) -> Self {
        Self {
            stories_dir: stories_dir.as_ref().to_path_buf(),
            read_status,
        }
    }

    pub fn stories_dir(&self) -> &Path {
        &self.stories_dir
    }

    /// Story filenames with their sequence numbers, ordered by number.
    ///
    /// A missing directory holds no stories.
    fn story_files(&self) -> Result<Vec<(i64, String)>, StoryError> {
        let entries = match fs::read_dir(&self.stories_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Stories directory {} does not exist", self.stories_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoryError::FileError(format!(
                    "Failed to read {}: {}",
                    self.stories_dir.display(),
                    e
                )))
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoryError::FileError(e.to_string()))?;
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !is_story_file(&filename) {
                continue;
            }
            match parse_filename(&filename) {
                Some((number, _)) => files.push((number, filename)),
                None => warn!("Skipping {}: no numeric prefix", filename),
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_story(&self, number: i64, filename: &str) -> Result<Story, StoryError> {
        let path = self.stories_dir.join(filename);
        let content = fs::read_to_string(&path).map_err(|e| {
            StoryError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let meta = fs::metadata(&path).ok();
        let modified = meta.as_ref().and_then(|m| m.modified().ok());
        let created = meta.as_ref().and_then(|m| m.created().ok()).or(modified);

        let id = story_id(filename).to_string();
        Ok(Story {
            title: extract_title(&content, filename),
            is_read: self.read_status.is_read(&id),
            id,
            number,
            filename: filename.to_string(),
            content,
            created_at: created.map(format_time).unwrap_or_default(),
            updated_at: modified.map(format_time).unwrap_or_default(),
        })
    }

    /// Finds the file backing `id`. Ids never name paths outside the directory.
    fn find_file(&self, id: &str) -> Option<(i64, String)> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return None;
        }
        let filename = format!("{}.txt", id);
        let (number, _) = parse_filename(&filename)?;
        if self.stories_dir.join(&filename).is_file() {
            Some((number, filename))
        } else {
            None
        }
    }
}

impl StoryRepositoryTrait for FileStoryRepository {
    fn list_metadata(&self) -> Result<Vec<StoryMetadata>, StoryError> {
        Ok(self.list_stories()?.iter().map(Story::metadata).collect())
    }

    fn list_stories(&self) -> Result<Vec<Story>, StoryError> {
        let stories = self
            .story_files()?
            .iter()
            .map(|(number, filename)| self.read_story(*number, filename))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = stories.len(), "Listed stories from files");
        Ok(stories)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Story>, StoryError> {
        match self.find_file(id) {
            Some((number, filename)) => self.read_story(number, &filename).map(Some),
            None => Ok(None),
        }
    }

    fn get_by_number(&self, number: i64) -> Result<Option<Story>, StoryError> {
        match self.story_files()?.into_iter().find(|(n, _)| *n == number) {
            Some((number, filename)) => self.read_story(number, &filename).map(Some),
            None => Ok(None),
        }
    }

    fn set_read_flag(&mut self, id: &str, value: bool) -> Result<(), StoryError> {
        if self.find_file(id).is_none() {
            return Err(StoryError::NotFound(id.to_string()));
        }
        if value {
            self.read_status.mark_read(id);
        } else {
            self.read_status.mark_unread(id);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "files"
    }
}
