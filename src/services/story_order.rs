//! Ordering of story identifiers.
//!
//! Identifiers compare by their leading integer when both have one, so
//! `9-kot` comes before `10-las`, and lexicographically otherwise.

use std::cmp::Ordering;

use crate::types::story::StoryMetadata;

/// The integer an identifier starts with: optional leading whitespace and
/// sign, then digits up to the first non-digit. `None` without digits or on
/// overflow.
fn leading_integer(id: &str) -> Option<i64> {
    let s = id.trim_start();
    let start = usize::from(s.starts_with(|c| c == '+' || c == '-'));
    let end = s[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| start + i);
    if end == start {
        return None;
    }
    s[..end].parse().ok()
}

/// Compares two story identifiers.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (leading_integer(a), leading_integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Stable sort of `items` by the identifier `key` returns.
///
/// [`compare_ids`] is not transitive over mixed numeric and non-numeric ids
/// ("9" < " 10" < "+a" < "9"), so this is an insertion sort that only ever
/// compares neighbours and never relies on a total order.
pub fn sort_by_id<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare_ids(key(&items[j - 1]), key(&items[j])) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Sorts plain identifiers.
pub fn sort_ids(ids: &mut [String]) {
    sort_by_id(ids, |id| id.as_str());
}

/// Sorts list-view metadata by identifier.
pub fn sort_metadata(stories: &mut [StoryMetadata]) {
    sort_by_id(stories, |s| s.id.as_str());
}
