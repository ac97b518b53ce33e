//! Unit tests for the preferences store: load/merge, update ordering,
//! persistence failures and the document-root theme.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use czytelnia::services::local_storage::{LocalStorage, MemoryLocalStorage, PREFERENCES_KEY};
use czytelnia::services::preferences_store::{PreferencesStore, PreferencesStoreTrait};
use czytelnia::services::theme_engine::ThemeEngineTrait;
use czytelnia::types::errors::{PreferencesError, StorageError};
use czytelnia::types::preferences::{
    FontFamily, LetterSpacing, LineHeight, ReadingPreferences, TextAlign, Theme,
};
use serde_json::{json, Value};

/// Storage whose items stay visible to the test after the store takes ownership.
#[derive(Clone, Default)]
struct SharedStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl SharedStorage {
    fn with_record(record: &str) -> Self {
        let storage = Self::default();
        storage
            .items
            .borrow_mut()
            .insert(PREFERENCES_KEY.to_string(), record.to_string());
        storage
    }

    fn stored(&self) -> Option<Value> {
        self.items
            .borrow()
            .get(PREFERENCES_KEY)
            .map(|raw| serde_json::from_str(raw).unwrap())
    }
}

impl LocalStorage for SharedStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage that is unavailable for every operation.
struct FailingStorage;

impl LocalStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }
}

fn custom() -> ReadingPreferences {
    ReadingPreferences {
        font_size: 24,
        font_family: FontFamily::Playfair,
        theme: Theme::Sepia,
        line_height: LineHeight::Loose,
        letter_spacing: LetterSpacing::Wider,
        text_opacity: 0.85,
        text_align: TextAlign::Justify,
    }
}

// ─── Load ───

#[test]
fn test_get_before_load_is_defaults() {
    let store = PreferencesStore::new(Box::new(MemoryLocalStorage::new()));
    assert!(!store.is_loaded());
    assert_eq!(store.get(), &ReadingPreferences::default());
}

#[test]
fn test_load_without_record_yields_defaults() {
    let mut store = PreferencesStore::new(Box::new(MemoryLocalStorage::new()));
    assert_eq!(store.load(), &ReadingPreferences::default());
    assert!(store.is_loaded());
    assert_eq!(store.theme_engine().get_theme(), Some(Theme::Light));
}

#[test]
fn test_load_record_missing_opacity_keeps_other_fields() {
    let storage = SharedStorage::with_record(
        r#"{"fontSize":26,"fontFamily":"inter","theme":"dark","lineHeight":"normal","letterSpacing":"wide","textAlign":"justify"}"#,
    );
    let mut store = PreferencesStore::new(Box::new(storage));
    let loaded = store.load().clone();

    assert_eq!(loaded.text_opacity, 1.0);
    assert_eq!(loaded.font_size, 26);
    assert_eq!(loaded.font_family, FontFamily::Inter);
    assert_eq!(loaded.theme, Theme::Dark);
    assert_eq!(loaded.line_height, LineHeight::Normal);
    assert_eq!(loaded.letter_spacing, LetterSpacing::Wide);
    assert_eq!(loaded.text_align, TextAlign::Justify);
}

#[test]
fn test_load_malformed_record_yields_defaults() {
    let mut store = PreferencesStore::new(Box::new(SharedStorage::with_record("{not json")));
    assert_eq!(store.load(), &ReadingPreferences::default());
}

#[test]
fn test_load_out_of_domain_fields_fall_back() {
    let storage = SharedStorage::with_record(r#"{"fontSize":72,"theme":"neon","textOpacity":0.5}"#);
    let mut store = PreferencesStore::new(Box::new(storage));
    let loaded = store.load().clone();
    assert_eq!(loaded.font_size, 20);
    assert_eq!(loaded.theme, Theme::Light);
    assert_eq!(loaded.text_opacity, 0.5);
}

#[test]
fn test_load_with_unavailable_storage_yields_defaults() {
    let mut store = PreferencesStore::new(Box::new(FailingStorage));
    assert_eq!(store.load(), &ReadingPreferences::default());
    assert!(store.is_loaded());
}

#[test]
fn test_theme_primed_from_storage_before_load() {
    let store = PreferencesStore::new(Box::new(SharedStorage::with_record(r#"{"theme":"dark"}"#)));
    assert_eq!(store.theme_engine().get_theme(), Some(Theme::Dark));
    assert!(store.theme_engine().is_dark());
    // The value itself is still the defaults until load.
    assert_eq!(store.get().theme, Theme::Light);
}

// ─── Update ───

#[test]
fn test_update_then_get_returns_value() {
    let mut store = PreferencesStore::new(Box::new(MemoryLocalStorage::new()));
    store.load();
    store.update(custom()).unwrap();
    assert_eq!(store.get(), &custom());
}

#[test]
fn test_update_persists_full_record() {
    let storage = SharedStorage::default();
    let mut store = PreferencesStore::new(Box::new(storage.clone()));
    store.load();
    store.update(custom()).unwrap();

    let stored = storage.stored().expect("record written");
    assert_eq!(
        stored,
        json!({
            "fontSize": 24,
            "fontFamily": "playfair",
            "theme": "sepia",
            "lineHeight": "loose",
            "letterSpacing": "wider",
            "textOpacity": 0.85,
            "textAlign": "justify"
        })
    );

    // A fresh store over the same storage sees the same value.
    let mut reloaded = PreferencesStore::new(Box::new(storage));
    assert_eq!(reloaded.load(), &custom());
}

#[test]
fn test_update_swallows_storage_failure() {
    let mut store = PreferencesStore::new(Box::new(FailingStorage));
    store.load();
    assert!(store.update(custom()).is_ok());
    assert_eq!(store.get(), &custom());
    assert_eq!(store.theme_engine().get_theme(), Some(Theme::Sepia));
}

#[test]
fn test_update_rejects_out_of_range_values() {
    let storage = SharedStorage::default();
    let mut store = PreferencesStore::new(Box::new(storage.clone()));
    store.load();

    let mut too_big = ReadingPreferences::default();
    too_big.font_size = 40;
    assert!(matches!(
        store.update(too_big),
        Err(PreferencesError::InvalidValue(_))
    ));

    let mut too_faint = ReadingPreferences::default();
    too_faint.text_opacity = 0.1;
    assert!(store.update(too_faint).is_err());

    assert_eq!(store.get(), &ReadingPreferences::default());
    assert!(storage.stored().is_none(), "rejected values are never written");
}

#[test]
fn test_update_applies_theme_to_document_root() {
    let mut store = PreferencesStore::new(Box::new(MemoryLocalStorage::new()));
    store.load();

    let mut dark = ReadingPreferences::default();
    dark.theme = Theme::Dark;
    store.update(dark).unwrap();

    let attrs = store.theme_engine().root_attributes();
    assert_eq!(attrs.get("data-theme").map(String::as_str), Some("dark"));
    assert_eq!(attrs.get("class").map(String::as_str), Some("dark"));

    let mut sepia = ReadingPreferences::default();
    sepia.theme = Theme::Sepia;
    store.update(sepia).unwrap();
    let attrs = store.theme_engine().root_attributes();
    assert_eq!(attrs.get("data-theme").map(String::as_str), Some("sepia"));
    assert!(attrs.get("class").is_none());
}

// ─── Subscribers ───

#[test]
fn test_subscribers_see_every_adopted_change() {
    let mut store = PreferencesStore::new(Box::new(FailingStorage));
    let seen: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let id = store.subscribe(Box::new(move |p| sink.borrow_mut().push(p.font_size)));

    store.update(custom()).unwrap();
    let mut bad = custom();
    bad.font_size = 2;
    let _ = store.update(bad);

    assert_eq!(*seen.borrow(), vec![24]);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.reset();
    assert_eq!(*seen.borrow(), vec![24]);
}

// ─── Single-field helper ───

#[test]
fn test_set_value_replaces_one_field() {
    let mut store = PreferencesStore::new(Box::new(MemoryLocalStorage::new()));
    store.load();
    store.set_value("fontSize", json!(18)).unwrap();
    store.set_value("theme", json!("high-contrast")).unwrap();

    let prefs = store.get();
    assert_eq!(prefs.font_size, 18);
    assert_eq!(prefs.theme, Theme::HighContrast);
    assert_eq!(prefs.font_family, FontFamily::Lato);
    assert!(store.theme_engine().is_dark());
}

#[test]
fn test_set_value_rejects_unknown_key_and_bad_value() {
    let mut store = PreferencesStore::new(Box::new(MemoryLocalStorage::new()));
    store.load();
    assert!(matches!(
        store.set_value("fontWeight", json!(700)),
        Err(PreferencesError::InvalidKey(_))
    ));
    assert!(matches!(
        store.set_value("lineHeight", json!("huge")),
        Err(PreferencesError::InvalidValue(_))
    ));
    assert!(matches!(
        store.set_value("fontSize", json!(29)),
        Err(PreferencesError::InvalidValue(_))
    ));
    assert_eq!(store.get(), &ReadingPreferences::default());
}

#[test]
fn test_reset_restores_defaults() {
    let storage = SharedStorage::default();
    let mut store = PreferencesStore::new(Box::new(storage.clone()));
    store.load();
    store.update(custom()).unwrap();
    assert_eq!(store.theme_engine().get_theme(), Some(Theme::Sepia));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(Box::new(move |p| sink.borrow_mut().push(p.theme)));

    store.reset();
    assert_eq!(store.get(), &ReadingPreferences::default());
    assert_eq!(storage.stored().unwrap()["fontSize"], 20);
    assert_eq!(*seen.borrow(), vec![Theme::Light]);
    assert_eq!(store.theme_engine().get_theme(), Some(Theme::Light));
}
