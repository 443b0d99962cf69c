//! File import: JSON exports or plain title lists.

use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ImportError, ImportSource, ProblemStatus, RawProblem};
use crate::metadata::Difficulty;
use crate::normalize::slugify_title;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry {
    title: String,
    #[serde(default)]
    title_slug: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileDocument {
    Entries(Vec<FileEntry>),
    Collection { problems: Vec<FileEntry> },
}

/// Parses an uploaded import file into raw problems.
///
/// Accepted formats:
/// - a JSON array of `{title, titleSlug?, difficulty?, status?}`
/// - a JSON object with a `problems` array of the same (a collection export)
/// - plain text, one title per line; blank lines and `#` comments are skipped
///
/// Missing slugs are derived from the title. Unrecognized difficulty or
/// status values are dropped rather than rejected.
///
/// # Errors
///
/// Returns [`ImportError::InvalidFile`] when the content looks like JSON but
/// does not match either JSON shape.
#[instrument(skip(content), fields(content_len = content.len()))]
pub fn parse_file_import(content: &str) -> Result<Vec<RawProblem>, ImportError> {
    let trimmed = content.trim_start();
    let problems = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let document: FileDocument = serde_json::from_str(trimmed)
            .map_err(|e| ImportError::invalid_file(e.to_string()))?;
        let entries = match document {
            FileDocument::Entries(entries) | FileDocument::Collection { problems: entries } => entries,
        };
        entries.into_iter().map(entry_to_raw).collect::<Vec<_>>()
    } else {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|title| RawProblem::new(title, slugify_title(title), None, ImportSource::File))
            .collect()
    };

    debug!(count = problems.len(), "file problems parsed");
    Ok(problems)
}

fn entry_to_raw(entry: FileEntry) -> RawProblem {
    let title_slug = entry
        .title_slug
        .filter(|slug| !slug.trim().is_empty())
        .unwrap_or_else(|| slugify_title(&entry.title));
    let difficulty = entry.difficulty.as_deref().and_then(Difficulty::from_label);

    let raw = RawProblem::new(entry.title.trim(), title_slug, difficulty, ImportSource::File);
    match entry.status.as_deref().map(str::parse::<ProblemStatus>) {
        Some(Ok(status)) => raw.with_status(status),
        _ => raw,
    }
}
