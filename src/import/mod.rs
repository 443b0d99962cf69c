//! Import merge engine for tracked problems.
//!
//! Imports arrive from LeetCode list, study plan and tag links, from files,
//! and from manual entry. Every path produces [`RawProblem`]s; [`merge_problems`]
//! folds them into the user's existing [`ProblemRecord`]s keyed by `titleSlug`,
//! and [`backfill_metadata`] fills unknown difficulty and category from the
//! metadata index.
//!
//! # Example
//!
//! ```
//! use tracker_core::import::{ImportSource, RawProblem, merge_problems};
//!
//! let incoming = vec![RawProblem::new("Two Sum", "two-sum", None, ImportSource::Manual)];
//! let outcome = merge_problems(&[], incoming).unwrap();
//! assert_eq!(outcome.added_count, 1);
//! ```

mod error;
mod file;
mod provider;

pub use error::ImportError;
pub use file::parse_file_import;
pub use provider::{ProviderKind, ProviderTarget, extract_provider_problems};

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::metadata::{Difficulty, FallbackPolicy, MetadataIndex, UNCATEGORIZED, resolve_with_policy};
use crate::normalize::slugify_title;

/// Where an imported problem came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSource {
    /// LeetCode favorite/problem list link.
    List,
    /// LeetCode study plan link.
    StudyPlan,
    /// LeetCode topic tag link.
    Tag,
    /// Typed in by the user.
    Manual,
    /// Uploaded file.
    File,
}

impl ImportSource {
    /// Returns the stable label stored in `sourceSheets`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::StudyPlan => "studyplan",
            Self::Tag => "tag",
            Self::Manual => "manual",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress of a tracked problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProblemStatus {
    /// Not started.
    #[default]
    Todo,
    /// Started but not solved.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Solved.
    Done,
}

impl ProblemStatus {
    /// Returns the display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProblemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in progress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(format!("invalid problem status: {s}")),
        }
    }
}

/// A problem record as produced by an import path, before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProblem {
    /// Display title.
    pub title: String,
    /// Identity slug.
    pub title_slug: String,
    /// Difficulty reported by the source, if any.
    pub difficulty: Option<Difficulty>,
    /// Status carried by the source (file imports may include it).
    pub status: Option<ProblemStatus>,
    /// Which import path produced the record.
    pub source: ImportSource,
}

impl RawProblem {
    /// Creates a raw problem with no status.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        title_slug: impl Into<String>,
        difficulty: Option<Difficulty>,
        source: ImportSource,
    ) -> Self {
        Self {
            title: title.into(),
            title_slug: title_slug.into(),
            difficulty,
            status: None,
            source,
        }
    }

    /// Creates a manual entry, deriving the slug from the title.
    #[must_use]
    pub fn manual(title: &str, difficulty: Option<Difficulty>) -> Self {
        Self::new(title.trim(), slugify_title(title), difficulty, ImportSource::Manual)
    }

    /// Sets the carried status.
    #[must_use]
    pub fn with_status(mut self, status: ProblemStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the record has an identity to merge on.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.title_slug.trim().is_empty()
    }
}

/// A problem tracked by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    /// Display title.
    pub title: String,
    /// Identity slug; two records are the same problem iff slugs are equal.
    pub title_slug: String,
    /// Difficulty, `None` until known.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Category from the reference sheet.
    #[serde(rename = "type", default = "uncategorized")]
    pub category: String,
    /// Progress.
    #[serde(default)]
    pub status: ProblemStatus,
    /// Completion date (`YYYY-MM-DD`) when solved.
    #[serde(default)]
    pub completed_date: Option<String>,
    /// Sheets and import paths this problem was added from.
    #[serde(default)]
    pub source_sheets: Vec<String>,
    /// Store-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn uncategorized() -> String {
    UNCATEGORIZED.to_string()
}

impl ProblemRecord {
    /// Builds a new tracked record from an import.
    #[must_use]
    pub fn from_raw(raw: RawProblem) -> Self {
        Self {
            title: raw.title,
            title_slug: raw.title_slug.trim().to_string(),
            difficulty: raw.difficulty,
            category: uncategorized(),
            status: raw.status.unwrap_or_default(),
            completed_date: None,
            source_sheets: vec![raw.source.as_str().to_string()],
            id: None,
        }
    }
}

/// Result of merging an import batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Existing records in original order, then new records in import order.
    pub merged: Vec<ProblemRecord>,
    /// Number of records that were not already tracked.
    pub added_count: usize,
}

/// Merges an import batch into the existing records without duplicates.
///
/// Identity is the `titleSlug` with surrounding whitespace trimmed, on both
/// sides. Existing records are kept as-is and in order; an incoming record
/// whose slug is already present (in `existing` or earlier in the batch) is
/// dropped. Records without a slug are skipped.
///
/// Slugs repeated inside `existing` follow the same rule as duplicate sheet
/// rows in [`build_index`](crate::metadata::build_index): the first position
/// is kept and the later record's value replaces it.
///
/// # Errors
///
/// Returns [`ImportError::EmptyImportResult`] when `incoming` has no usable
/// record. Nothing is merged in that case.
#[instrument(skip(existing, incoming), fields(existing = existing.len(), incoming = incoming.len()))]
pub fn merge_problems(
    existing: &[ProblemRecord],
    incoming: Vec<RawProblem>,
) -> Result<MergeOutcome, ImportError> {
    let origin = batch_origin(&incoming);
    let usable: Vec<RawProblem> = incoming
        .into_iter()
        .filter(|raw| {
            let keep = raw.is_usable();
            if !keep {
                warn!(title = %raw.title, source = %raw.source, "skipping import record without slug");
            }
            keep
        })
        .collect();

    if usable.is_empty() {
        return Err(ImportError::empty(&origin));
    }

    let mut merged: IndexMap<String, ProblemRecord> = IndexMap::with_capacity(existing.len() + usable.len());

    for record in existing {
        let slug = record.title_slug.trim().to_string();
        if merged.insert(slug, record.clone()).is_some() {
            warn!(slug = %record.title_slug, "existing collection already holds this slug");
        }
    }

    let mut added_count = 0;
    for raw in usable {
        let slug = raw.title_slug.trim().to_string();
        if merged.contains_key(&slug) {
            debug!(slug = %slug, "already tracked, keeping existing record");
            continue;
        }
        merged.insert(slug, ProblemRecord::from_raw(raw));
        added_count += 1;
    }

    let merged: Vec<ProblemRecord> = merged.into_values().collect();
    info!(added = added_count, total = merged.len(), "import merged");
    Ok(MergeOutcome {
        merged,
        added_count,
    })
}

fn batch_origin(incoming: &[RawProblem]) -> String {
    match incoming.first() {
        Some(first) if incoming.iter().all(|raw| raw.source == first.source) => {
            first.source.as_str().to_string()
        }
        _ => "batch".to_string(),
    }
}

/// Result of a metadata backfill pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillOutcome {
    /// Records with metadata filled where it was missing.
    pub records: Vec<ProblemRecord>,
    /// Number of records that changed.
    pub updated: usize,
}

/// Fills unknown difficulty and `Uncategorized` types from the metadata index.
///
/// The title is resolved first, then the slug. Known values are never
/// overwritten.
#[must_use]
#[instrument(skip(records, index), fields(records = records.len(), keys = index.len()))]
pub fn backfill_metadata(
    records: &[ProblemRecord],
    index: &MetadataIndex,
    policy: FallbackPolicy,
) -> BackfillOutcome {
    let mut updated = 0;
    let records = records
        .iter()
        .map(|record| {
            let needs_difficulty = record.difficulty.is_none();
            let needs_category = record.category.trim().is_empty() || record.category == UNCATEGORIZED;
            if !needs_difficulty && !needs_category {
                return record.clone();
            }

            let Some(entry) = resolve_with_policy(&record.title, index, policy)
                .or_else(|| resolve_with_policy(&record.title_slug, index, policy))
            else {
                debug!(slug = %record.title_slug, "no metadata for record");
                return record.clone();
            };

            let mut filled = record.clone();
            if needs_difficulty && entry.difficulty.is_some() {
                filled.difficulty = entry.difficulty;
            }
            if needs_category && entry.category != UNCATEGORIZED {
                filled.category.clone_from(&entry.category);
            }
            if filled != *record {
                updated += 1;
            }
            filled
        })
        .collect();

    debug!(updated, "metadata backfill complete");
    BackfillOutcome { records, updated }
}
