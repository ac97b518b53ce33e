//! JSONL interchange for story collections.
//!
//! One [`StoryRecord`] per line. The generator turns a directory of
//! `<number>-<slug>.txt` files into records; the importer upserts records into
//! the document store.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::repository::{DocumentStoryRepository, StoryRepositoryTrait};
use crate::services::story_parser::{extract_title, is_story_file, parse_filename, story_id};
use crate::types::errors::ImportError;
use crate::types::story::StoryRecord;

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// Builds records from every story file in `stories_dir`, ordered by number.
pub fn generate_records(stories_dir: &Path) -> Result<Vec<StoryRecord>, ImportError> {
    let entries = fs::read_dir(stories_dir).map_err(|e| {
        ImportError::IoError(format!("Failed to read {}: {}", stories_dir.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ImportError::IoError(e.to_string()))?;
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

    let timestamp = now_rfc3339();
    let mut records = Vec::with_capacity(files.len());
    for (number, filename) in files {
        let path = stories_dir.join(&filename);
        let content = fs::read_to_string(&path).map_err(|e| {
            ImportError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let content = content.trim().to_string();
        records.push(StoryRecord {
            id: story_id(&filename).to_string(),
            number,
            title: extract_title(&content, &filename),
            content,
            filename,
            created_at: timestamp.clone(),
            updated_at: timestamp.clone(),
        });
    }
    debug!(count = records.len(), "Generated story records");
    Ok(records)
}

/// Writes records as JSON lines.
pub fn write_jsonl<W: Write>(mut writer: W, records: &[StoryRecord]) -> Result<(), ImportError> {
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| ImportError::SerializationError(e.to_string()))?;
        writeln!(writer, "{}", line).map_err(|e| ImportError::IoError(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| ImportError::IoError(e.to_string()))
}

/// Reads JSON lines into records. Blank lines are skipped.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<StoryRecord>, ImportError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ImportError::IoError(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| ImportError::InvalidRecord {
            line: index + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Number of non-blank lines, without parsing them.
pub fn count_records<R: BufRead>(reader: R) -> Result<usize, ImportError> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line.map_err(|e| ImportError::IoError(e.to_string()))?;
        if !line.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

/// Upserts records into the document store. Existing read flags survive.
///
/// All or nothing: a failing record leaves the store as it was.
pub fn import_records(
    repo: &mut DocumentStoryRepository,
    records: &[StoryRecord],
) -> Result<ImportSummary, ImportError> {
    let imported = repo.upsert_all(records)?;
    info!(count = imported, "Imported story records");
    Ok(ImportSummary { imported })
}

/// Dumps the document store back into records, ordered by number.
pub fn export_records(repo: &DocumentStoryRepository) -> Result<Vec<StoryRecord>, ImportError> {
    Ok(repo
        .list_stories()?
        .into_iter()
        .map(StoryRecord::from)
        .collect())
}
