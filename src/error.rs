//! Fatal input-shape errors.
//!
//! Only problems that make the whole upload unusable surface as
//! [`IntakeError`]. Per-row problems are folded into
//! [`crate::validator::RowOutcome`] and never abort an import.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// Fewer than two non-empty lines: no header, or a header without data.
    #[error("CSV input needs a header row and at least one data row (found {lines} non-empty line(s))")]
    EmptyInput { lines: usize },

    /// Upload bytes are not valid in the selected encoding.
    #[error("failed to decode input as {encoding}")]
    Decode { encoding: String },

    /// Upload exceeds the configured size ceiling.
    #[error("input is {size} bytes, which exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    /// A schema was requested by name but the registry has no such entry.
    #[error("unknown target schema '{name}'")]
    UnknownSchema { name: String },
}

pub type Result<T> = std::result::Result<T, IntakeError>;
