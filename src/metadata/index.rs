//! Metadata index construction and name resolution.

use indexmap::IndexMap;
use tracing::{debug, instrument, trace};

use super::{MetadataEntry, MetadataRow, UNCATEGORIZED};
use crate::normalize::{NameKeys, normalize_name};

/// How [`resolve_with_policy`] picks among substring-fallback candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// First key in insertion order that contains, or is contained in, the name.
    #[default]
    FirstMatch,
    /// Candidate whose space form is most similar to the name
    /// (normalized Levenshtein); ties keep insertion order.
    Closest,
}

impl FallbackPolicy {
    /// Returns the configuration label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstMatch => "first",
            Self::Closest => "closest",
        }
    }
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::FirstMatch),
            "closest" => Ok(Self::Closest),
            _ => Err(format!("invalid fallback policy: {s}")),
        }
    }
}

/// Immutable lookup from normalized name keys to metadata.
///
/// Each sheet row contributes its slug key and its space key. Keys iterate in
/// insertion order, which the substring fallback depends on. A refresh builds
/// a new index; an existing one is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataIndex {
    entries: IndexMap<String, MetadataEntry>,
}

impl MetadataIndex {
    /// Returns the number of keys (up to two per row).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact key lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataEntry> {
        self.entries.get(key)
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Builds a fresh index from reference sheet rows.
///
/// Rows whose name normalizes to nothing (blank, or only hyphens) are skipped.
/// Blank categories become [`UNCATEGORIZED`]. When two rows normalize to the
/// same key the later row's metadata wins but the key keeps its first position.
#[must_use]
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn build_index(rows: &[MetadataRow]) -> MetadataIndex {
    let mut entries = IndexMap::with_capacity(rows.len() * 2);
    let mut skipped = 0usize;

    for row in rows {
        let NameKeys {
            slug_key,
            space_key,
        } = normalize_name(&row.name);
        if slug_key.is_empty() {
            skipped += 1;
            continue;
        }

        let category = row.category.trim();
        let entry = MetadataEntry {
            difficulty: row.difficulty,
            category: if category.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                category.to_string()
            },
        };

        entries.insert(slug_key, entry.clone());
        entries.insert(space_key, entry);
    }

    debug!(keys = entries.len(), skipped, "metadata index built");
    MetadataIndex { entries }
}

/// Resolves difficulty and category for a problem name.
///
/// Lookup order, first hit wins:
/// 1. exact slug key
/// 2. exact space key
/// 3. first key (insertion order) that is a substring of the normalized name,
///    or contains it
///
/// Returns `None` for a name that normalizes to nothing, an empty index, or
/// no match.
#[must_use]
pub fn resolve<'a>(name: &str, index: &'a MetadataIndex) -> Option<&'a MetadataEntry> {
    resolve_with_policy(name, index, FallbackPolicy::FirstMatch)
}

/// Same as [`resolve`], with a configurable substring fallback.
#[must_use]
pub fn resolve_with_policy<'a>(
    name: &str,
    index: &'a MetadataIndex,
    policy: FallbackPolicy,
) -> Option<&'a MetadataEntry> {
    if index.is_empty() {
        return None;
    }

    let keys = normalize_name(name);
    if keys.space_key.is_empty() {
        return None;
    }

    if let Some(entry) = index.get(&keys.slug_key) {
        trace!(key = %keys.slug_key, "resolved by slug key");
        return Some(entry);
    }
    if let Some(entry) = index.get(&keys.space_key) {
        trace!(key = %keys.space_key, "resolved by space key");
        return Some(entry);
    }

    let mut candidates = index
        .entries
        .iter()
        .filter(|(key, _)| overlaps(key, &keys));

    let found = match policy {
        FallbackPolicy::FirstMatch => candidates.next(),
        FallbackPolicy::Closest => {
            let mut best: Option<(&String, &MetadataEntry, f64)> = None;
            for (key, entry) in candidates {
                let score = strsim::normalized_levenshtein(&key.replace('-', " "), &keys.space_key);
                if best.is_none_or(|(_, _, best_score)| score > best_score) {
                    best = Some((key, entry, score));
                }
            }
            best.map(|(key, entry, _)| (key, entry))
        }
    };

    match found {
        Some((key, entry)) => {
            trace!(problem = name, key = %key, policy = policy.as_str(), "resolved by substring fallback");
            Some(entry)
        }
        None => {
            trace!(problem = name, "no metadata match");
            None
        }
    }
}

fn overlaps(key: &str, keys: &NameKeys) -> bool {
    [&keys.slug_key, &keys.space_key]
        .into_iter()
        .any(|form| key.contains(form.as_str()) || form.contains(key))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metadata::Difficulty;

    fn sample_index() -> MetadataIndex {
        build_index(&[
            MetadataRow::new("Contains Duplicate", "Arrays & Hashing", "Easy"),
            MetadataRow::new("Valid Anagram", "Arrays & Hashing", "Easy"),
            MetadataRow::new("Two Sum", "Arrays & Hashing", "Easy"),
            MetadataRow::new("Two Sum II Input Array Is Sorted", "Two Pointers", "Medium"),
            MetadataRow::new("Trapping Rain Water", "", "Hard"),
        ])
    }

    #[test]
    fn test_build_index_inserts_slug_and_space_keys() {
        let index = sample_index();
        assert!(index.get("contains-duplicate").is_some());
        assert!(index.get("contains duplicate").is_some());
        assert_eq!(index.len(), 10);
    }

    #[test]
    fn test_build_index_single_word_name_yields_one_key() {
        let index = build_index(&[MetadataRow::new("3Sum", "Two Pointers", "Medium")]);
        assert_eq!(index.len(), 1);
        assert!(index.get("3sum").is_some());
    }

    #[test]
    fn test_build_index_skips_empty_names() {
        let index = build_index(&[
            MetadataRow::new("", "Stack", "Easy"),
            MetadataRow::new("   ", "Stack", "Easy"),
        ]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_build_index_skips_hyphen_only_names() {
        let index = build_index(&[
            MetadataRow::new("-", "Noise", "Easy"),
            MetadataRow::new(" -- ", "Noise", "Easy"),
            MetadataRow::new("Two Sum", "Arrays & Hashing", "Easy"),
        ]);
        assert_eq!(index.len(), 2);
        assert!(index.get("").is_none());
        assert!(resolve("Some Totally Unknown Problem", &index).is_none());
        assert!(resolve("xyz", &index).is_none());
    }

    #[test]
    fn test_build_index_blank_type_becomes_uncategorized() {
        let index = sample_index();
        let entry = index.get("trapping-rain-water").unwrap();
        assert_eq!(entry.category, UNCATEGORIZED);
        assert_eq!(entry.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn test_build_index_later_duplicate_row_wins_value_keeps_position() {
        let index = build_index(&[
            MetadataRow::new("Min Stack", "Stack", "Easy"),
            MetadataRow::new("Daily Temperatures", "Stack", "Medium"),
            MetadataRow::new("min stack", "Stack", "Medium"),
        ]);
        assert_eq!(
            index.get("min-stack").unwrap().difficulty,
            Some(Difficulty::Medium)
        );
        assert_eq!(index.keys().next(), Some("min-stack"));
    }

    #[test]
    fn test_resolve_alias_path() {
        let index = sample_index();
        let entry = resolve("Duplicate Integer", &index).unwrap();
        assert_eq!(entry.difficulty, Some(Difficulty::Easy));
        assert_eq!(entry.category, "Arrays & Hashing");
    }

    #[test]
    fn test_resolve_case_insensitive_exact() {
        let index = sample_index();
        let entry = resolve("valid anagram", &index).unwrap();
        assert_eq!(entry.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn test_resolve_slug_input() {
        let index = sample_index();
        assert!(resolve("trapping-rain-water", &index).is_some());
    }

    #[test]
    fn test_resolve_unknown_returns_none() {
        let index = sample_index();
        assert!(resolve("Some Totally Unknown Problem", &index).is_none());
    }

    #[test]
    fn test_resolve_empty_name_or_index_returns_none() {
        let index = sample_index();
        assert!(resolve("", &index).is_none());
        assert!(resolve("   ", &index).is_none());
        assert!(resolve("-", &index).is_none());
        assert!(resolve(" - - ", &index).is_none());
        assert!(resolve("Two Sum", &MetadataIndex::default()).is_none());
    }

    #[test]
    fn test_resolve_substring_fallback_takes_first_in_insertion_order() {
        let index = sample_index();
        // "two sum" is inserted before "two sum ii ..." and is contained in the name.
        let entry = resolve("Two Sum II Input Array Is Sorted Variant", &index).unwrap();
        assert_eq!(entry.category, "Arrays & Hashing");
    }

    #[test]
    fn test_resolve_substring_fallback_name_inside_key() {
        let index = sample_index();
        let entry = resolve("rain water", &index).unwrap();
        assert_eq!(entry.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn test_resolve_closest_policy_prefers_most_similar_candidate() {
        let index = sample_index();
        let entry = resolve_with_policy(
            "Two Sum II Input Array Is Sorted Variant",
            &index,
            FallbackPolicy::Closest,
        )
        .unwrap();
        assert_eq!(entry.category, "Two Pointers");
    }

    #[test]
    fn test_resolve_closest_policy_keeps_exact_match_precedence() {
        let index = sample_index();
        let entry = resolve_with_policy("Two Sum", &index, FallbackPolicy::Closest).unwrap();
        assert_eq!(entry.category, "Arrays & Hashing");
    }

    #[test]
    fn test_resolve_closest_policy_tie_keeps_earlier_key() {
        let index = build_index(&[
            MetadataRow::new("Path Sum", "Trees", "Easy"),
            MetadataRow::new("Path Max", "Graphs", "Hard"),
        ]);
        // Both candidates are four edits from "path" at equal length, so the scores tie.
        let entry = resolve_with_policy("path", &index, FallbackPolicy::Closest).unwrap();
        assert_eq!(entry.category, "Trees");
    }

    #[test]
    fn test_fallback_policy_parses_config_labels() {
        assert_eq!("first".parse::<FallbackPolicy>().unwrap(), FallbackPolicy::FirstMatch);
        assert_eq!("closest".parse::<FallbackPolicy>().unwrap(), FallbackPolicy::Closest);
        assert!("best".parse::<FallbackPolicy>().is_err());
    }
}
