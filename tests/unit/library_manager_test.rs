//! Unit tests for the library list/detail view models and the read toggle.

use std::fs;
use std::sync::Arc;

use czytelnia::database::Database;
use czytelnia::managers::library_manager::{LibraryManager, LibraryManagerTrait, StoryView};
use czytelnia::managers::read_status_manager::ReadStatusManager;
use czytelnia::repository::{DocumentStoryRepository, FileStoryRepository, StoryRepositoryTrait};
use czytelnia::services::local_storage::MemoryLocalStorage;
use czytelnia::types::errors::StoryError;
use czytelnia::types::story::{Story, StoryMetadata, StoryRecord};
use tempfile::TempDir;

fn store_with(numbers: &[i64]) -> DocumentStoryRepository {
    let mut repo = DocumentStoryRepository::new(Arc::new(Database::open_in_memory().unwrap()));
    for &n in numbers {
        repo.upsert_record(&StoryRecord {
            id: n.to_string(),
            number: n,
            title: format!("Opowiadanie {}", n),
            content: "Tekst.".to_string(),
            filename: format!("{}-opowiadanie.txt", n),
            created_at: String::new(),
            updated_at: String::new(),
        })
        .unwrap();
    }
    repo
}

/// Repository whose read toggle always fails.
struct ReadOnlyRepository {
    inner: DocumentStoryRepository,
}

impl StoryRepositoryTrait for ReadOnlyRepository {
    fn list_metadata(&self) -> Result<Vec<StoryMetadata>, StoryError> {
        self.inner.list_metadata()
    }
    fn list_stories(&self) -> Result<Vec<Story>, StoryError> {
        self.inner.list_stories()
    }
    fn get_by_id(&self, id: &str) -> Result<Option<Story>, StoryError> {
        self.inner.get_by_id(id)
    }
    fn get_by_number(&self, number: i64) -> Result<Option<Story>, StoryError> {
        self.inner.get_by_number(number)
    }
    fn set_read_flag(&mut self, _id: &str, _value: bool) -> Result<(), StoryError> {
        Err(StoryError::RemoteError("offline".to_string()))
    }
    fn backend_name(&self) -> &'static str {
        "read-only"
    }
}

#[test]
fn test_empty_library_state() {
    let mut repo = store_with(&[]);
    let library = LibraryManager::new(&mut repo);
    let overview = library.overview().unwrap();
    assert!(overview.is_empty);
    assert!(overview.stories.is_empty());
    assert_eq!(overview.total, 0);
    assert_eq!(overview.read_count, 0);
    assert_eq!(overview.progress_percent, 0.0);
}

#[test]
fn test_overview_orders_by_id_and_counts_progress() {
    let mut repo = store_with(&[10, 2, 1, 3]);
    repo.set_read_flag("10", true).unwrap();

    let library = LibraryManager::new(&mut repo);
    let overview = library.overview().unwrap();
    let ids: Vec<&str> = overview.stories.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "10"]);
    assert_eq!(overview.read_count, 1);
    assert_eq!(overview.total, 4);
    assert_eq!(overview.progress_percent, 25.0);
}

#[test]
fn test_overview_orders_slugged_ids_by_leading_number() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("9-kot.txt"), "Kot spał.").unwrap();
    fs::write(tmp.path().join("10-las.txt"), "Las szumiał.").unwrap();
    fs::write(tmp.path().join("1-pies.txt"), "Pies szczekał.").unwrap();
    let mut repo = FileStoryRepository::new(
        tmp.path(),
        ReadStatusManager::new(Box::new(MemoryLocalStorage::new())),
    );

    let listed: Vec<String> = repo.list_metadata().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(listed, vec!["1-pies", "9-kot", "10-las"]);

    let library = LibraryManager::new(&mut repo);
    let overview = library.overview().unwrap();
    let ids: Vec<&str> = overview.stories.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1-pies", "9-kot", "10-las"]);
}

#[test]
fn test_open_story_found_and_not_found() {
    let mut repo = store_with(&[1]);
    let library = LibraryManager::new(&mut repo);

    let view = library.open_story("1");
    assert_eq!(view.story().map(|s| s.title.as_str()), Some("Opowiadanie 1"));

    let view = library.open_story("404");
    assert_eq!(view, StoryView::NotFound { id: "404".to_string() });
    assert!(view.story().is_none());
}

#[test]
fn test_set_read_updates_view_and_repository() {
    let mut repo = store_with(&[1, 2]);
    {
        let mut library = LibraryManager::new(&mut repo);
        let mut view = library.open_story("2");

        library.set_read(&mut view, true).unwrap();
        assert!(view.story().unwrap().is_read);
        assert!(library.overview().unwrap().stories[1].is_read);

        library.set_read(&mut view, false).unwrap();
        assert!(!view.story().unwrap().is_read);
    }
    assert!(!repo.get_by_id("2").unwrap().unwrap().is_read);
}

#[test]
fn test_set_read_on_missing_story() {
    let mut repo = store_with(&[1]);
    let mut library = LibraryManager::new(&mut repo);
    let mut view = library.open_story("404");
    let err = library.set_read(&mut view, true).unwrap_err();
    assert!(matches!(err, StoryError::NotFound(ref id) if id == "404"));
}

#[test]
fn test_failed_toggle_leaves_view_untouched() {
    let mut repo = ReadOnlyRepository { inner: store_with(&[1]) };
    let mut library = LibraryManager::new(&mut repo);
    let mut view = library.open_story("1");

    assert!(library.set_read(&mut view, true).is_err());
    assert!(!view.story().unwrap().is_read);
}
