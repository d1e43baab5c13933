use thiserror::Error;

use crate::item::{Format, Special};
use crate::value::ValueKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    FieldTypeMismatch {
        field: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("Format {format} cannot apply to a {kind} field")]
    IncompatibleFormat { format: Format, kind: ValueKind },

    #[error("Special rule {special} cannot apply to a {kind} field")]
    IncompatibleSpecial { special: Special, kind: ValueKind },

    #[error("Time value out of range: {0} (expected 1..=3599 seconds)")]
    TimeOutOfRange(u32),

    #[error("Rank {rank} beyond table capacity {capacity}")]
    RankOutOfRange { rank: u32, capacity: u32 },

    #[error("Decode failed at byte {position}: {message}")]
    DecodeFailed { position: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
