//! Story file parsing: titles, identifiers and sequence numbers derived from
//! `<number>-<slug>.txt` files and their text.

use std::path::Path;

/// Lines starting with this greeting are boilerplate, never a title.
pub const GREETING_PREFIX: &str = "CZEŚĆ";

/// Self-introduction lines ("my name is ...") are boilerplate too.
pub const INTRODUCTION_MARKER: &str = "MAM NA IMIĘ";

/// Only this many non-empty lines are considered when looking for a title.
const TITLE_SCAN_LINES: usize = 5;

const STORY_EXTENSION: &str = ".txt";

fn is_boilerplate(line: &str) -> bool {
    line.starts_with(GREETING_PREFIX) || line.contains(INTRODUCTION_MARKER)
}

/// Strips a leading "<digits>." prefix, e.g. `"3. Kot i pies"` -> `"Kot i pies"`.
fn strip_number_prefix(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            return rest.trim();
        }
    }
    line.trim()
}

/// Upper-cases the first character of `word`.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Removes a leading "<digits>-" prefix.
fn strip_sequence_prefix(stem: &str) -> &str {
    let digits = stem.len() - stem.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = stem[digits..].strip_prefix('-') {
            return rest;
        }
    }
    stem
}

/// Derives a story title from its text, falling back to the filename.
pub fn extract_title(content: &str, filename: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(TITLE_SCAN_LINES)
        .filter(|line| !is_boilerplate(line))
        .map(strip_number_prefix)
        .find(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| title_from_filename(filename))
}

/// `"07-mala-dziewczynka.txt"` -> `"Mala Dziewczynka"`.
pub fn title_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    strip_sequence_prefix(&stem)
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Story identifier: the filename without its `.txt` extension.
pub fn story_id(filename: &str) -> &str {
    filename.strip_suffix(STORY_EXTENSION).unwrap_or(filename)
}

/// Whether `filename` names a story text file.
pub fn is_story_file(filename: &str) -> bool {
    filename.ends_with(STORY_EXTENSION)
}

/// Splits `<number>-<slug>.txt` into its sequence number and slug.
pub fn parse_filename(filename: &str) -> Option<(i64, &str)> {
    let stem = filename.strip_suffix(STORY_EXTENSION)?;
    let (number, slug) = stem.split_once('-')?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) || slug.is_empty() {
        return None;
    }
    Some((number.parse().ok()?, slug))
}
