use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used whenever tags are written back to storage.
pub const TAG_SEPARATOR: &str = ", ";

/// Ordered tag tokens of a work entry.
///
/// Storage keeps tags as a single comma-joined string; this type is the
/// parsed form used everywhere else. Tokens are trimmed and never empty.
/// Duplicates are kept in the order they were written, so `"a, b, a"`
/// yields `["a", "b", "a"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Tokenize a raw comma-separated tag string.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Storage form: tokens joined with [`TAG_SEPARATOR`].
    pub fn join(&self) -> String {
        self.0.join(TAG_SEPARATOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Replace every token equal to `old` with `new`.
    /// Returns true if at least one token changed.
    pub fn replace(&mut self, old: &str, new: &str) -> bool {
        let mut changed = false;
        for t in self.0.iter_mut().filter(|t| t.as_str() == old) {
            *t = new.to_string();
            changed = true;
        }
        changed
    }

    /// Drop repeated tokens, keeping the first occurrence of each.
    pub fn dedup(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.0.len());
        self.0.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(t.clone());
                true
            }
        });
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}
