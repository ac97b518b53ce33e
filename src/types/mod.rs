// Czytelnia shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod preferences;
pub mod story;
