use serde::{Deserialize, Serialize};

/// A single story with its full text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub filename: String,
    pub content: String,
    /// Documents written before the read flag existed carry no value.
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Story {
    /// Projects the story onto its list-view metadata.
    pub fn metadata(&self) -> StoryMetadata {
        StoryMetadata {
            id: self.id.clone(),
            number: self.number,
            title: self.title.clone(),
            filename: self.filename.clone(),
            is_read: self.is_read,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

/// Story fields without the text, used by list views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryMetadata {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub filename: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// One line of the JSONL interchange file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub content: String,
    pub filename: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Self {
            id: record.id,
            number: record.number,
            title: record.title,
            filename: record.filename,
            content: record.content,
            is_read: false,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<Story> for StoryRecord {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            number: story.number,
            title: story.title,
            content: story.content,
            filename: story.filename,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}
