//! Error types for import operations.

use thiserror::Error;

/// Errors that can occur while extracting or merging an import batch.
#[derive(Debug, Clone, Error)]
pub enum ImportError {
    /// The batch had no usable records after extraction.
    #[error("No problems found in {origin} import\n  Suggestion: {suggestion}")]
    EmptyImportResult {
        /// Where the batch came from (`list`, `studyplan`, `tag`, `manual`, `file`, or `batch`)
        origin: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The provider answered with an error payload.
    #[error("Failed to import from {provider}: {message}")]
    Upstream {
        /// Provider label
        provider: String,
        /// Messages reported by the provider
        message: String,
    },

    /// The import link does not point at a supported list.
    #[error("invalid import URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidUrl {
        /// The URL that failed detection
        url: String,
        /// Why the URL is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// An import file could not be read as problems.
    #[error("invalid import file: {reason}\n  Suggestion: {suggestion}")]
    InvalidFile {
        /// Why the file is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl ImportError {
    /// Creates an `EmptyImportResult` error for the given origin label.
    #[must_use]
    pub fn empty(origin: &str) -> Self {
        let suggestion = match origin {
            "list" | "studyplan" | "tag" => "Check that the list is public and the URL is correct",
            "file" => "Provide a JSON array of problems or one title per line",
            _ => "Provide at least one problem with a title",
        };
        Self::EmptyImportResult {
            origin: origin.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a link without a list segment.
    #[must_use]
    pub fn unsupported_link(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: "no /list/, /studyplan/ or /tag/ segment found".to_string(),
            suggestion: "Use a LeetCode list, study plan or tag link".to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a malformed URL.
    #[must_use]
    pub fn malformed_url(url: &str, parse_error: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: parse_error.to_string(),
            suggestion: "Check the URL format and try again".to_string(),
        }
    }

    /// Creates an `InvalidFile` error from a parser message.
    #[must_use]
    pub fn invalid_file(reason: impl Into<String>) -> Self {
        Self::InvalidFile {
            reason: reason.into(),
            suggestion: "Provide a JSON array of problems or one title per line".to_string(),
        }
    }
}
