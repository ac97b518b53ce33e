//! Property-based tests for reading preferences.
//!
//! Any valid value survives `update` → `get`, the stored JSON record, and a
//! reload through a fresh store. Partial records always merge to a valid value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use czytelnia::services::local_storage::{LocalStorage, PREFERENCES_KEY};
use czytelnia::services::preferences_store::{PreferencesStore, PreferencesStoreTrait};
use czytelnia::types::errors::StorageError;
use czytelnia::types::preferences::{
    FontFamily, LetterSpacing, LineHeight, PartialPreferences, ReadingPreferences, TextAlign,
    Theme,
};
use proptest::prelude::*;

#[derive(Clone, Default)]
struct SharedStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
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

// --- Arbitrary strategies ---

fn arb_font_family() -> impl Strategy<Value = FontFamily> {
    prop::sample::select(FontFamily::ALL.to_vec())
}

fn arb_theme() -> impl Strategy<Value = Theme> {
    prop::sample::select(Theme::ALL.to_vec())
}

fn arb_line_height() -> impl Strategy<Value = LineHeight> {
    prop::sample::select(LineHeight::ALL.to_vec())
}

fn arb_letter_spacing() -> impl Strategy<Value = LetterSpacing> {
    prop::sample::select(LetterSpacing::ALL.to_vec())
}

fn arb_text_align() -> impl Strategy<Value = TextAlign> {
    prop::sample::select(TextAlign::ALL.to_vec())
}

fn arb_preferences() -> impl Strategy<Value = ReadingPreferences> {
    (
        14u32..=28,
        arb_font_family(),
        arb_theme(),
        arb_line_height(),
        arb_letter_spacing(),
        0.3f64..=1.0,
        arb_text_align(),
    )
        .prop_map(
            |(font_size, font_family, theme, line_height, letter_spacing, text_opacity, text_align)| {
                ReadingPreferences {
                    font_size,
                    font_family,
                    theme,
                    line_height,
                    letter_spacing,
                    text_opacity,
                    text_align,
                }
            },
        )
}

proptest! {
    #[test]
    fn update_then_get_returns_value(prefs in arb_preferences()) {
        let storage = SharedStorage::default();
        let mut store = PreferencesStore::new(Box::new(storage.clone()));
        store.load();
        store.update(prefs.clone()).unwrap();
        prop_assert_eq!(store.get(), &prefs);

        let mut reloaded = PreferencesStore::new(Box::new(storage));
        prop_assert_eq!(reloaded.load(), &prefs);
    }

    #[test]
    fn any_subset_of_fields_merges_over_defaults(
        prefs in arb_preferences(),
        keep in prop::collection::vec(any::<bool>(), 7),
    ) {
        let full = serde_json::to_value(&prefs).unwrap();
        let keys = ["fontSize", "fontFamily", "theme", "lineHeight", "letterSpacing", "textOpacity", "textAlign"];
        let defaults = serde_json::to_value(ReadingPreferences::default()).unwrap();

        let mut partial = serde_json::Map::new();
        for (key, kept) in keys.iter().zip(&keep) {
            if *kept {
                partial.insert(key.to_string(), full[*key].clone());
            }
        }

        let merged = PartialPreferences::from_json(&serde_json::Value::Object(partial).to_string())
            .unwrap()
            .merge_over(ReadingPreferences::default());
        prop_assert!(merged.validate().is_ok());

        let merged = serde_json::to_value(&merged).unwrap();
        for (key, kept) in keys.iter().zip(&keep) {
            let expected = if *kept { &full[*key] } else { &defaults[*key] };
            prop_assert_eq!(&merged[*key], expected);
        }
    }

    #[test]
    fn out_of_range_numbers_never_load(font_size in 29u32..500, opacity in 1.0001f64..10.0) {
        let storage = SharedStorage::default();
        storage.items.borrow_mut().insert(
            PREFERENCES_KEY.to_string(),
            serde_json::json!({"fontSize": font_size, "textOpacity": opacity}).to_string(),
        );
        let mut store = PreferencesStore::new(Box::new(storage));
        prop_assert_eq!(store.load(), &ReadingPreferences::default());
    }
}
