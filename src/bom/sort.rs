//! Multi-key component ordering with natural comparison for designators.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::schematic::{ComponentRecord, Field};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// A run of a natural sort key.
#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    /// Lower-cased non-digit text
    Text(String),
    /// Digit run without leading zeros
    Number(String),
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            // Longer digit strings are larger once leading zeros are gone
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Less,
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split into alternating text and digit runs, always starting and ending
/// with a (possibly empty) text run: `"R10a"` -> `["r", 10, "a"]`.
fn natural_key(s: &str) -> Vec<Chunk> {
    let mut key = Vec::new();
    let mut last = 0;

    for m in DIGITS.find_iter(s) {
        key.push(Chunk::Text(s[last..m.start()].to_lowercase()));
        let digits = m.as_str().trim_start_matches('0');
        key.push(Chunk::Number(digits.to_string()));
        last = m.end();
    }
    key.push(Chunk::Text(s[last..].to_lowercase()));

    key
}

/// Compare strings treating embedded numbers numerically and text
/// case-insensitively, so "R2" < "R10" and "c1" < "C2".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Compare two components on one field.
fn compare_field(field: Field, a: &ComponentRecord, b: &ComponentRecord) -> Ordering {
    if field.is_natural() {
        natural_cmp(a.get(field), b.get(field))
    } else {
        a.get(field).cmp(b.get(field))
    }
}

/// Sort components by `keys`, primary key first.
///
/// The sort is stable: components equal on every key keep their relative
/// order, so sorting an already sorted list leaves it unchanged.
pub fn sort_components(components: &mut [ComponentRecord], keys: &[Field]) {
    components.sort_by(|a, b| {
        keys.iter()
            .fold(Ordering::Equal, |ord, &key| ord.then_with(|| compare_field(key, a, b)))
    });
}
