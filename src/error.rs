//! Structured error types for the resume renderer.
//!
//! Three variants cover the real error sources: JSON parsing, snapshots that
//! violate their preconditions, and unusable render configurations. Layout
//! itself never fails.

use chrono::NaiveDate;
use thiserror::Error;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON input failed to parse as a snapshot or configuration.
    #[error("Failed to parse input: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// The snapshot broke one of its invariants.
    #[error("Invalid resume snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// The configuration leaves nothing sensible to lay out into.
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

/// A precondition violation found by [`crate::model::ResumeSnapshot::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("required field `{field}` is empty")]
    MissingField { field: &'static str },

    #[error("{section} entry {index} ends ({end}) before it starts ({start})")]
    InvalidDateRange {
        section: &'static str,
        index: usize,
        start: NaiveDate,
        end: NaiveDate,
    },
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected schema. Check field names, date formats (YYYY-MM-DD) and proficiency labels.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        RenderError::Parse { source: e, hint }
    }
}
