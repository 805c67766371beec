//! Ordering of hierarchical section ids
//!
//! Ids are compared segment by segment as numbers, so `1.10` sorts after
//! `1.9` and before `2`. A prefix sorts before any id it is a prefix of.

use std::cmp::Ordering;

/// Split an id into segments; a missing or empty id is the single segment `""`
fn segments(id: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = id.split('.').collect();
    while parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

/// Digits of a numeric segment without leading zeros; `None` if not numeric
///
/// The empty segment counts as zero.
fn numeric(segment: &str) -> Option<&str> {
    segment
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| segment.trim_start_matches('0'))
}

/// Compare two segments: numerically, empty counting as zero
///
/// Numbers of any length compare by magnitude. Non-numeric segments sort
/// after numeric ones and compare as text among themselves.
fn compare_segments(a: &str, b: &str) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Total order over hierarchical section ids
#[must_use]
pub fn compare_section_ids(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);

    for i in 0..left.len().max(right.len()) {
        match (left.get(i), right.get(i)) {
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_segments(x, y) {
                Ordering::Equal => {},
                other => return other,
            },
            (None, None) => break,
        }
    }
    Ordering::Equal
}

/// [`compare_section_ids`] with `None` treated as the empty id
#[must_use]
pub fn compare_optional_section_ids(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_section_ids(a.unwrap_or(""), b.unwrap_or(""))
}

/// Number of segments in an id
#[must_use]
pub fn depth(id: &str) -> usize {
    segments(id).len()
}

/// Whether an id has exactly one segment
#[must_use]
pub fn is_chapter(id: &str) -> bool {
    depth(id) == 1
}

/// Whether `id` lies below `ancestor` (`1.2.3` lies below `1` and `1.2`)
#[must_use]
pub fn is_descendant_of(id: &str, ancestor: &str) -> bool {
    id.strip_prefix(ancestor).is_some_and(|rest| rest.starts_with('.'))
}
