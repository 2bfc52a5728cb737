/// Locale-aware string ordering for display titles.
///
/// Unicode Collation Algorithm with the CLDR root tailoring, the same default
/// browsers use for `localeCompare`: base letters first, then accents, then
/// case with lowercase first. Punctuation and symbols are non-ignorable and
/// sort ahead of digits and letters. Strings that collate equal compare
/// `Equal`, so a stable sort keeps their original order.
use std::cmp::Ordering;

use feruca::{Collator, Locale, Tailoring};

/// A reusable collator. Keeps internal caches, hence `&mut self`.
pub struct TitleCollator {
    inner: Collator,
}

impl TitleCollator {
    pub fn new() -> Self {
        // shifting off: symbols keep primary weight; tiebreak off: equal means equal
        Self {
            inner: Collator::new(Tailoring::Cldr(Locale::Root), false, false),
        }
    }

    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.inner.collate(a, b)
    }
}

impl Default for TitleCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off comparison. Sorting many titles should reuse a [`TitleCollator`].
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    TitleCollator::new().compare(a, b)
}
