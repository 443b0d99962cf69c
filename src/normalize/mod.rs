//! Problem name normalization into canonical lookup keys.
//!
//! Problem titles arrive in at least three spellings: the exact LeetCode title,
//! a paraphrase used by curated sheets, and hyphenated slugs. [`normalize_name`]
//! folds all of them into a [`NameKeys`] pair after applying the static
//! [`ALIAS_TABLE`].
//!
//! # Example
//!
//! ```
//! use tracker_core::normalize::normalize_name;
//!
//! let keys = normalize_name("Duplicate Integer");
//! assert_eq!(keys.slug_key, "contains-duplicate");
//! assert_eq!(keys.space_key, "contains duplicate");
//! ```

mod alias;

pub use alias::{ALIAS_TABLE, alias_pairs, lookup_alias};

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid")); // Static pattern, safe to panic

#[allow(clippy::expect_used)]
static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("slug filter regex is valid")); // Static pattern, safe to panic

#[allow(clippy::expect_used)]
static SLUG_SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("slug separator regex is valid")); // Static pattern, safe to panic

/// The two lookup forms of a normalized problem name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameKeys {
    /// Lowercase, whitespace runs replaced by a single hyphen.
    pub slug_key: String,
    /// Lowercase, hyphens replaced by spaces.
    pub space_key: String,
}

/// Normalizes a free-text problem name into slug and space lookup keys.
///
/// Steps:
/// 1. Trim surrounding whitespace and hyphens, then lowercase
/// 2. Replace it with the canonical title when its space form is an exact
///    alias key (whole-string only)
/// 3. `slug_key`: whitespace runs become one hyphen
/// 4. `space_key`: hyphens become spaces
///
/// Callers short-circuit on empty names; an empty input yields empty keys.
#[must_use]
pub fn normalize_name(name: &str) -> NameKeys {
    let lowered = name
        .trim_matches(|c: char| c.is_whitespace() || c == '-')
        .to_lowercase();

    let canonical = match lookup_alias(&lowered.replace('-', " ")) {
        Some(canonical) => {
            trace!(name = %lowered, canonical, "alias applied");
            canonical.to_string()
        }
        None => lowered,
    };

    NameKeys {
        slug_key: WHITESPACE_RUN.replace_all(&canonical, "-").into_owned(),
        space_key: canonical.replace('-', " "),
    }
}

/// Derives a LeetCode-style `titleSlug` from a display title.
///
/// Punctuation is dropped and separator runs collapse to a single hyphen, so
/// `"Two Sum II - Input Array Is Sorted"` becomes
/// `"two-sum-ii-input-array-is-sorted"`. Aliases are not applied; the slug
/// identifies the record, not its metadata.
#[must_use]
pub fn slugify_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let filtered = NON_SLUG_CHARS.replace_all(&lowered, "");
    SLUG_SEPARATOR_RUN
        .replace_all(&filtered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_builds_both_keys() {
        let keys = normalize_name("Valid Anagram");
        assert_eq!(keys.slug_key, "valid-anagram");
        assert_eq!(keys.space_key, "valid anagram");
    }

    #[test]
    fn test_normalize_applies_alias_on_whole_string() {
        let keys = normalize_name("Duplicate Integer");
        assert_eq!(keys.slug_key, "contains-duplicate");
        assert_eq!(keys.space_key, "contains duplicate");
    }

    #[test]
    fn test_normalize_does_not_apply_partial_alias() {
        let keys = normalize_name("Duplicate Integer Pairs");
        assert_eq!(keys.space_key, "duplicate integer pairs");
    }

    #[test]
    fn test_normalize_hyphenated_alias_spelling_hits_alias() {
        let keys = normalize_name("duplicate-integer");
        assert_eq!(keys.slug_key, "contains-duplicate");
    }

    #[test]
    fn test_normalize_slug_input_yields_space_form() {
        let keys = normalize_name("longest-consecutive-sequence");
        assert_eq!(keys.slug_key, "longest-consecutive-sequence");
        assert_eq!(keys.space_key, "longest consecutive sequence");
    }

    #[test]
    fn test_normalize_collapses_whitespace_runs_in_slug() {
        let keys = normalize_name("Top  K\tFrequent   Elements");
        assert_eq!(keys.slug_key, "top-k-frequent-elements");
    }

    #[test]
    fn test_normalize_trims_surrounding_whitespace() {
        let keys = normalize_name("  Two Sum \n");
        assert_eq!(keys.slug_key, "two-sum");
        assert_eq!(keys.space_key, "two sum");
    }

    #[test]
    fn test_normalize_space_key_is_idempotent() {
        let names = [
            "Duplicate Integer",
            "duplicate-integer",
            "Two Sum II - Input Array Is Sorted",
            "a - b",
            "- leading hyphen -",
            "Top  K   Elements in List",
            "3Sum",
            "",
        ];
        for name in names {
            let once = normalize_name(name).space_key;
            let twice = normalize_name(&once).space_key;
            assert_eq!(once, twice, "space key must stabilize for '{name}'");
        }
    }

    #[test]
    fn test_normalize_empty_input_returns_empty_keys() {
        let keys = normalize_name("");
        assert!(keys.slug_key.is_empty());
        assert!(keys.space_key.is_empty());
    }

    #[test]
    fn test_slugify_title_drops_punctuation() {
        assert_eq!(
            slugify_title("Two Sum II - Input Array Is Sorted"),
            "two-sum-ii-input-array-is-sorted"
        );
        assert_eq!(slugify_title("Pow(x, n)"), "powx-n");
        assert_eq!(slugify_title("  LRU Cache  "), "lru-cache");
    }

    #[test]
    fn test_slugify_title_keeps_existing_slug() {
        assert_eq!(slugify_title("two-sum"), "two-sum");
    }
}
