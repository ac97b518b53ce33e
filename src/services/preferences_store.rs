// Czytelnia Preferences Store
// Holds the current reading preferences, persists them to local storage on every update,
// and keeps the document-root theme state in step with them.

use tracing::{debug, warn};

use crate::services::local_storage::{LocalStorage, PREFERENCES_KEY};
use crate::services::theme_engine::{ThemeEngine, ThemeEngineTrait};
use crate::types::errors::PreferencesError;
use crate::types::preferences::{PartialPreferences, ReadingPreferences};

/// Handle returned by [`PreferencesStoreTrait::subscribe`].
pub type SubscriptionId = u64;

/// Read-only observer notified after every adopted change.
pub type PreferencesListener = Box<dyn Fn(&ReadingPreferences)>;

/// Trait defining the preferences store interface.
pub trait PreferencesStoreTrait {
    fn load(&mut self) -> &ReadingPreferences;
    fn get(&self) -> &ReadingPreferences;
    fn update(&mut self, preferences: ReadingPreferences) -> Result<(), PreferencesError>;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), PreferencesError>;
    fn reset(&mut self);
    fn is_loaded(&self) -> bool;
    fn subscribe(&mut self, listener: PreferencesListener) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// The single owned preferences cell of a running application.
pub struct PreferencesStore {
    storage: Box<dyn LocalStorage>,
    preferences: ReadingPreferences,
    loaded: bool,
    theme: ThemeEngine,
    listeners: Vec<(SubscriptionId, PreferencesListener)>,
    next_subscription: SubscriptionId,
}

impl PreferencesStore {
    /// Creates a store over `storage` holding the defaults.
    ///
    /// The document root is primed from the stored theme right away; the full
    /// record is only consulted by [`PreferencesStoreTrait::load`].
    pub fn new(storage: Box<dyn LocalStorage>) -> Self {
        let theme = ThemeEngine::from_storage(storage.as_ref());
        Self {
            storage,
            preferences: ReadingPreferences::default(),
            loaded: false,
            theme,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Document-root theme state.
    pub fn theme_engine(&self) -> &ThemeEngine {
        &self.theme
    }

    /// Reads the stored record and merges it over the defaults.
    fn read_stored(&self) -> ReadingPreferences {
        let raw = match self.storage.get_item(PREFERENCES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ReadingPreferences::default(),
            Err(e) => {
                warn!("Failed to load preferences from storage: {}", e);
                return ReadingPreferences::default();
            }
        };
        match PartialPreferences::from_json(&raw) {
            Some(partial) => partial.merge_over(ReadingPreferences::default()),
            None => {
                warn!("Stored preferences are malformed, using defaults");
                ReadingPreferences::default()
            }
        }
    }

    /// Best-effort write of the full current value.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.preferences) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize preferences: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(PREFERENCES_KEY, &json) {
            warn!("Failed to save preferences to storage: {}", e);
        }
    }

    /// Takes a validated value: adopt, notify, persist, then mirror the theme.
    fn adopt(&mut self, preferences: ReadingPreferences) {
        let theme_changed = preferences.theme != self.preferences.theme;
        self.preferences = preferences;
        self.notify();
        self.persist();

        if theme_changed || !self.loaded {
            self.theme.apply(self.preferences.theme);
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.preferences);
        }
    }
}

impl PreferencesStoreTrait for PreferencesStore {
    /// Adopts the stored preferences. Calling it again re-reads storage.
    fn load(&mut self) -> &ReadingPreferences {
        self.preferences = self.read_stored();
        self.loaded = true;
        self.theme.apply(self.preferences.theme);
        debug!(theme = self.preferences.theme.as_str(), "Preferences loaded");
        self.notify();
        &self.preferences
    }

    fn get(&self) -> &ReadingPreferences {
        &self.preferences
    }

    /// Replaces the whole value.
    ///
    /// The in-memory value is adopted before the durable write; storage
    /// failures are logged and never returned.
    fn update(&mut self, preferences: ReadingPreferences) -> Result<(), PreferencesError> {
        preferences
            .validate()
            .map_err(PreferencesError::InvalidValue)?;
        self.adopt(preferences);
        Ok(())
    }

    /// Replaces one camelCase field, keeping the others.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), PreferencesError> {
        let mut json_value = serde_json::to_value(&self.preferences)
            .map_err(|e| PreferencesError::InvalidValue(e.to_string()))?;

        match json_value.as_object_mut() {
            Some(map) if map.contains_key(key) => {
                map.insert(key.to_string(), value);
            }
            _ => return Err(PreferencesError::InvalidKey(key.to_string())),
        }

        let preferences: ReadingPreferences = serde_json::from_value(json_value).map_err(|e| {
            PreferencesError::InvalidValue(format!("Invalid value for '{}': {}", key, e))
        })?;
        self.update(preferences)
    }

    fn reset(&mut self) {
        self.adopt(ReadingPreferences::default());
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn subscribe(&mut self, listener: PreferencesListener) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}
