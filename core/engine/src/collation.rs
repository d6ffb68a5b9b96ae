//! FILENAME: core/engine/src/collation.rs
//! PURPOSE: Locale-aware ordering for text sort keys.
//! CONTEXT: Raw byte order puts "Álamo" after "Zinc". Text is compared by a
//! primary key (canonical decomposition, combining marks removed, lowercased)
//! and only then by the raw string, so accented names sort next to their
//! unaccented neighbours.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomputed collation key for one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey {
    primary: String,
    raw: String,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let primary = text
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        CollationKey {
            primary,
            raw: text.to_string(),
        }
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

/// Compares two strings the way a report reader expects them ordered.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
