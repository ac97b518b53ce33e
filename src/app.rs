//! App Core for Czytelnia.
//!
//! Central struct holding the story repository, the preferences store and the
//! reading-view state, assembled from an [`AppConfig`].

use std::fs;
use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, Backend};
use crate::database::connection::Database;
use crate::managers::read_status_manager::ReadStatusManager;
use crate::repository::{DocumentStoryRepository, FileStoryRepository, StoryRepositoryTrait};
use crate::services::local_storage::FileLocalStorage;
use crate::services::preferences_store::{PreferencesStore, PreferencesStoreTrait};
use crate::services::scroll_tracker::ScrollDirectionTracker;
use crate::types::errors::AppError;

/// Central application struct.
///
/// The database is only opened for the document backend.
pub struct App {
    pub config: AppConfig,
    pub db: Option<Arc<Database>>,
    pub repository: Box<dyn StoryRepositoryTrait>,
    pub preferences: PreferencesStore,
    pub scroll_tracker: ScrollDirectionTracker,
}

impl App {
    /// Creates a new App for the configured backend.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;
        let storage_dir = config.storage_dir();

        let mut db = None;
        let repository: Box<dyn StoryRepositoryTrait> = match config.backend {
            Backend::Files => {
                let read_status =
                    ReadStatusManager::new(Box::new(FileLocalStorage::new(&storage_dir)));
                Box::new(FileStoryRepository::new(&config.stories_dir, read_status))
            }
            Backend::Documents => {
                let database = Arc::new(Database::open(config.database_path())?);
                db = Some(database.clone());
                Box::new(DocumentStoryRepository::new(database))
            }
            Backend::Remote => {
                #[cfg(feature = "remote")]
                {
                    use crate::repository::RemoteStoryRepository;
                    use crate::types::errors::ConfigError;

                    let url = config
                        .remote_url
                        .as_deref()
                        .ok_or(ConfigError::MissingRemoteUrl)?;
                    Box::new(RemoteStoryRepository::new(url)?)
                }
                #[cfg(not(feature = "remote"))]
                {
                    return Err(crate::types::errors::ConfigError::RemoteUnsupported.into());
                }
            }
        };

        let preferences = PreferencesStore::new(Box::new(FileLocalStorage::new(&storage_dir)));

        Ok(Self::with_parts(config, db, repository, preferences))
    }

    /// Assembles an App from ready-made parts.
    pub fn with_parts(
        config: AppConfig,
        db: Option<Arc<Database>>,
        repository: Box<dyn StoryRepositoryTrait>,
        preferences: PreferencesStore,
    ) -> Self {
        Self {
            config,
            db,
            repository,
            preferences,
            scroll_tracker: ScrollDirectionTracker::default(),
        }
    }

    /// Startup sequence: load the stored preferences and apply their theme.
    pub fn startup(&mut self) {
        let theme = self.preferences.load().theme;
        info!(
            backend = self.repository.backend_name(),
            theme = theme.as_str(),
            "Czytelnia started"
        );
    }
}
