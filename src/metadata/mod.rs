//! Problem metadata lookup against the canonical reference sheet.
//!
//! The reference sheet lists every known problem with its category and
//! difficulty. [`build_index`] turns parsed rows into a [`MetadataIndex`]
//! keyed by both normalized name forms; [`resolve`] answers difficulty and
//! category questions for arbitrary spellings of a problem name.
//!
//! # Example
//!
//! ```
//! use tracker_core::metadata::{Difficulty, MetadataRow, build_index, resolve};
//!
//! let rows = vec![MetadataRow::new("Contains Duplicate", "Arrays & Hashing", "Easy")];
//! let index = build_index(&rows);
//!
//! let entry = resolve("Duplicate Integer", &index).unwrap();
//! assert_eq!(entry.difficulty, Some(Difficulty::Easy));
//! assert_eq!(entry.category, "Arrays & Hashing");
//! ```

mod index;
mod sheet;

pub use index::{FallbackPolicy, MetadataIndex, build_index, resolve, resolve_with_policy};
pub use sheet::{
    DIFFICULTY_COLUMN, HEADER_ROW_COUNT, NAME_COLUMN, TYPE_COLUMN, parse_sheet_csv,
    rows_from_sheet,
};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category assigned when a sheet row has no type.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Problem difficulty as published by LeetCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy problem.
    Easy,
    /// Medium problem.
    Medium,
    /// Hard problem.
    Hard,
}

impl Difficulty {
    /// Returns the display label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Parses a sheet or provider label, returning `None` for anything that is
    /// not exactly `Easy`, `Medium` or `Hard` (surrounding whitespace ignored).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Self::Easy),
            "Medium" => Ok(Self::Medium),
            "Hard" => Ok(Self::Hard),
            _ => Err(format!("invalid difficulty: {s}")),
        }
    }
}

/// One row of the reference sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    /// Problem name as written in the sheet.
    pub name: String,
    /// Category (sheet "type" column).
    pub category: String,
    /// Difficulty, `None` when the sheet cell was not a recognized label.
    pub difficulty: Option<Difficulty>,
}

impl MetadataRow {
    /// Creates a row, coercing unrecognized difficulty labels to `None`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        difficulty_label: &str,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            difficulty: Difficulty::from_label(difficulty_label),
        }
    }
}

/// Metadata stored for each index key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Difficulty, if the sheet knew it.
    #[serde(rename = "d")]
    pub difficulty: Option<Difficulty>,
    /// Category, [`UNCATEGORIZED`] when the sheet cell was blank.
    #[serde(rename = "t")]
    pub category: String,
}
