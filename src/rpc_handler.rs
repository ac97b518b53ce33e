//! RPC method handler for the Czytelnia JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! repository, the library views and the preferences store held by `App`.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::library_manager::{LibraryManager, LibraryManagerTrait, StoryView};
use crate::services::preferences_store::PreferencesStoreTrait;
use crate::services::reading_style::{settings_options, ReadingStyle};
use crate::services::scroll_tracker::ScrollProgress;
use crate::services::theme_engine::ThemeEngineTrait;
use crate::types::preferences::ReadingPreferences;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn f64_param(params: &Value, name: &str) -> Result<f64, String> {
    params
        .get(name)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| format!("missing {}", name))
}

/// Opens the story and flips its read flag through the shared toggle.
fn set_read(app: &Mutex<App>, id: &str, value: bool) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;
    let mut library = LibraryManager::new(a.repository.as_mut());
    let mut view = library.open_story(id);
    library.set_read(&mut view, value).map_err(|e| e.to_string())?;
    match view {
        StoryView::Found(story) => Ok(json!({"id": story.id, "isRead": story.is_read})),
        StoryView::NotFound { id } => Err(format!("Story not found: {}", id)),
    }
}

fn theme_state(a: &App) -> Value {
    let engine = a.preferences.theme_engine();
    json!({
        "theme": engine.get_theme().map(|t| t.as_str()),
        "isDark": engine.is_dark(),
        "attributes": engine.root_attributes(),
    })
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"pong": true, "backend": a.repository.backend_name()}))
        }

        // ─── Stories ───
        "stories.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let stories = a.repository.list_metadata().map_err(|e| e.to_string())?;
            serde_json::to_value(stories).map_err(|e| e.to_string())
        }
        "stories.list_full" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let stories = a.repository.list_stories().map_err(|e| e.to_string())?;
            serde_json::to_value(stories).map_err(|e| e.to_string())
        }
        "stories.get" => {
            let id = str_param(params, "id")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let story = a.repository.get_by_id(id).map_err(|e| e.to_string())?;
            serde_json::to_value(story).map_err(|e| e.to_string())
        }
        "stories.get_by_number" => {
            let number = params
                .get("number")
                .and_then(|v| v.as_i64())
                .ok_or("missing number")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let story = a.repository.get_by_number(number).map_err(|e| e.to_string())?;
            serde_json::to_value(story).map_err(|e| e.to_string())
        }
        "stories.set_read" => {
            let id = str_param(params, "id")?;
            let value = params
                .get("value")
                .and_then(|v| v.as_bool())
                .ok_or("missing value")?;
            set_read(app, id, value)
        }
        "stories.mark_read" => set_read(app, str_param(params, "id")?, true),
        "stories.mark_unread" => set_read(app, str_param(params, "id")?, false),

        // ─── Library ───
        "library.overview" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let library = LibraryManager::new(a.repository.as_mut());
            let overview = library.overview().map_err(|e| e.to_string())?;
            serde_json::to_value(overview).map_err(|e| e.to_string())
        }

        // ─── Preferences ───
        "preferences.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.preferences.get()).map_err(|e| e.to_string())
        }
        "preferences.update" => {
            let prefs: ReadingPreferences = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid preferences: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.preferences.update(prefs).map_err(|e| e.to_string())?;
            serde_json::to_value(a.preferences.get()).map_err(|e| e.to_string())
        }
        "preferences.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.preferences.set_value(key, value).map_err(|e| e.to_string())?;
            serde_json::to_value(a.preferences.get()).map_err(|e| e.to_string())
        }
        "preferences.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.preferences.reset();
            serde_json::to_value(a.preferences.get()).map_err(|e| e.to_string())
        }
        "preferences.options" => {
            serde_json::to_value(settings_options()).map_err(|e| e.to_string())
        }

        // ─── Theme ───
        "theme.root" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(theme_state(&a))
        }
        "theme.toggle" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let mut prefs = a.preferences.get().clone();
            prefs.theme = prefs.theme.toggled();
            a.preferences.update(prefs).map_err(|e| e.to_string())?;
            Ok(theme_state(&a))
        }
        "theme.css_variables" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!(a.preferences.theme_engine().get_css_variables()))
        }

        // ─── Reader ───
        "reader.style" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let style = ReadingStyle::from_preferences(a.preferences.get());
            let css = style.to_inline_css();
            let mut value = serde_json::to_value(style).map_err(|e| e.to_string())?;
            value["inlineCss"] = json!(css);
            Ok(value)
        }
        "reader.progress" => {
            let scroll_top = f64_param(params, "scrollTop")?;
            let scroll_height = f64_param(params, "scrollHeight")?;
            let viewport_height = f64_param(params, "viewportHeight")?;
            let progress = ScrollProgress::compute(scroll_top, scroll_height, viewport_height);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let direction = a.scroll_tracker.update(scroll_top);
            Ok(json!({
                "percent": progress.percent,
                "visible": progress.visible,
                "direction": direction,
                "atTop": a.scroll_tracker.is_at_top(),
                "hideHeader": a.scroll_tracker.should_hide_header(),
            }))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
