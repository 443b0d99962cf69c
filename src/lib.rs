//! Problem Tracker Core Library
//!
//! This library provides the core functionality for the problem tracker,
//! which records solved coding-interview problems sourced from a reference
//! sheet and from imported LeetCode lists, files, and manual entries.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`normalize`] - Problem name canonicalization and the alias table
//! - [`metadata`] - Reference sheet index and difficulty/category lookup
//! - [`import`] - Import extraction and duplicate-free merging
//! - [`store`] - User store boundary and a JSON file implementation
//!
//! All core operations are synchronous and pure over in-memory data. A built
//! [`MetadataIndex`] is immutable and safe to share between readers; callers
//! that merge concurrently into one collection must serialize those merges.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod import;
pub mod metadata;
pub mod normalize;
pub mod store;

// Re-export commonly used types
pub use import::{
    BackfillOutcome, ImportError, ImportSource, MergeOutcome, ProblemRecord, ProblemStatus,
    ProviderKind, ProviderTarget, RawProblem, backfill_metadata, extract_provider_problems,
    merge_problems, parse_file_import,
};
pub use metadata::{
    Difficulty, FallbackPolicy, HEADER_ROW_COUNT, MetadataEntry, MetadataIndex, MetadataRow,
    build_index, parse_sheet_csv, resolve, resolve_with_policy, rows_from_sheet,
};
pub use normalize::{NameKeys, normalize_name, slugify_title};
pub use store::{JsonFileStore, ProblemCollectionState, StoreError, UserStore};
