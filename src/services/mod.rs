// Czytelnia services
// Services provide the reading features: preferences, themes, reading style, story parsing and ordering, JSONL interchange.

pub mod local_storage;
pub mod preferences_store;
pub mod reading_style;
pub mod scroll_tracker;
pub mod story_import;
pub mod story_order;
pub mod story_parser;
pub mod theme_engine;
