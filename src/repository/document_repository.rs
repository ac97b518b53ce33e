//! Document-store story repository, backed by SQLite via `rusqlite`.

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension};

use crate::database::connection::Database;
use crate::repository::StoryRepositoryTrait;
use crate::types::errors::StoryError;
use crate::types::story::{Story, StoryMetadata, StoryRecord};

const STORY_COLUMNS: &str =
    "id, number, title, filename, content, is_read, created_at, updated_at";

const METADATA_COLUMNS: &str = "id, number, title, filename, is_read, created_at, updated_at";

/// Story repository over the `stories` table.
pub struct DocumentStoryRepository {
    db: Arc<Database>,
}

impl DocumentStoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn row_to_story(row: &rusqlite::Row) -> rusqlite::Result<Story> {
        Ok(Story {
            id: row.get(0)?,
            number: row.get(1)?,
            title: row.get(2)?,
            filename: row.get(3)?,
            content: row.get(4)?,
            is_read: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn row_to_metadata(row: &rusqlite::Row) -> rusqlite::Result<StoryMetadata> {
        Ok(StoryMetadata {
            id: row.get(0)?,
            number: row.get(1)?,
            title: row.get(2)?,
            filename: row.get(3)?,
            is_read: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn upsert_on(conn: &Connection, record: &StoryRecord) -> Result<(), StoryError> {
        conn.execute(
            "INSERT INTO stories (id, number, title, content, filename, is_read, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                number = excluded.number,
                title = excluded.title,
                content = excluded.content,
                filename = excluded.filename,
                updated_at = excluded.updated_at",
            params![
                record.id,
                record.number,
                record.title,
                record.content,
                record.filename,
                record.created_at,
                record.updated_at
            ],
        )?;
        Ok(())
    }

    /// Inserts or refreshes a story from an interchange record.
    ///
    /// An existing story keeps its read flag.
    pub fn upsert_record(&mut self, record: &StoryRecord) -> Result<(), StoryError> {
        Self::upsert_on(self.db.connection(), record)
    }

    /// Upserts every record in one transaction. Nothing is stored unless all
    /// of them are.
    pub fn upsert_all(&mut self, records: &[StoryRecord]) -> Result<usize, StoryError> {
        let tx = self.db.connection().unchecked_transaction()?;
        for record in records {
            Self::upsert_on(&tx, record)?;
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Number of stored stories.
    pub fn count(&self) -> Result<i64, StoryError> {
        Ok(self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM stories", [], |row| row.get(0))?)
    }
}

impl StoryRepositoryTrait for DocumentStoryRepository {
    fn list_metadata(&self) -> Result<Vec<StoryMetadata>, StoryError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM stories ORDER BY number ASC",
            METADATA_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_metadata)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn list_stories(&self) -> Result<Vec<Story>, StoryError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM stories ORDER BY number ASC",
            STORY_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_story)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Story>, StoryError> {
        Ok(self
            .db
            .connection()
            .query_row(
                &format!("SELECT {} FROM stories WHERE id = ?1", STORY_COLUMNS),
                params![id],
                Self::row_to_story,
            )
            .optional()?)
    }

    fn get_by_number(&self, number: i64) -> Result<Option<Story>, StoryError> {
        Ok(self
            .db
            .connection()
            .query_row(
                &format!("SELECT {} FROM stories WHERE number = ?1", STORY_COLUMNS),
                params![number],
                Self::row_to_story,
            )
            .optional()?)
    }

    fn set_read_flag(&mut self, id: &str, value: bool) -> Result<(), StoryError> {
        let affected = self.db.connection().execute(
            "UPDATE stories SET is_read = ?1 WHERE id = ?2",
            params![value, id],
        )?;
        if affected == 0 {
            return Err(StoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "documents"
    }
}
