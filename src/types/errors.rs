use thiserror::Error;

// === StoryError ===

/// Errors raised by story repositories.
#[derive(Debug, Error)]
pub enum StoryError {
    /// No story carries the given identifier.
    #[error("Story not found: {0}")]
    NotFound(String),
    /// The backing document database failed.
    #[error("Story database error: {0}")]
    DatabaseError(String),
    /// Reading the stories directory or a story file failed.
    #[error("Story file error: {0}")]
    FileError(String),
    /// The remote document backend rejected or failed a call.
    #[error("Remote story backend error: {0}")]
    RemoteError(String),
}

impl From<rusqlite::Error> for StoryError {
    fn from(e: rusqlite::Error) -> Self {
        StoryError::DatabaseError(e.to_string())
    }
}

// === StorageError ===

/// Errors raised by the local key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage location cannot be used at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing an item failed.
    #[error("Storage I/O error: {0}")]
    IoError(String),
    /// The key contains characters that cannot name an item.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

// === PreferencesError ===

/// Errors raised by the preferences store.
///
/// Persistence failures never surface here; they are logged and swallowed.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// The preference key does not exist.
    #[error("Invalid preference key: {0}")]
    InvalidKey(String),
    /// The value lies outside the field's domain.
    #[error("Invalid preference value: {0}")]
    InvalidValue(String),
}

// === ImportError ===

/// Errors raised while generating, reading or importing JSONL story records.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import I/O error: {0}")]
    IoError(String),
    /// A JSONL line failed to parse. Lines are numbered from 1.
    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("Import serialization error: {0}")]
    SerializationError(String),
    #[error(transparent)]
    Story(#[from] StoryError),
}

// === ConfigError ===

/// Errors raised while resolving the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown story backend: {0}")]
    UnknownBackend(String),
    #[error("Remote backend selected but no remote URL configured")]
    MissingRemoteUrl,
    #[error("Remote backend support is not compiled in")]
    RemoteUnsupported,
}

// === AppError ===

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Story(#[from] StoryError),
    #[error("Failed to open database: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}
