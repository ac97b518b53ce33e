// Czytelnia platform paths
// Linux:   $XDG_DATA_HOME/czytelnia or ~/.local/share/czytelnia
// macOS:   ~/Library/Application Support/Czytelnia
// Windows: %APPDATA%/Czytelnia

use std::env;
use std::path::PathBuf;

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the platform-specific data directory holding the story database
/// and the local storage records.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("Czytelnia")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("Czytelnia")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("czytelnia"),
            _ => home_dir().join(".local").join("share").join("czytelnia"),
        }
    }
}
