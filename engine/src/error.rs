//! Error types for the GridMuse engine.

use crate::{PhotoId, SortValue};
use thiserror::Error;

/// All possible errors from the ordering engine.
///
/// The engine performs no I/O, so every variant is a data-integrity failure
/// detected while building or decoding a photo set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("duplicate photo id: {0}")]
    DuplicateId(PhotoId),

    #[error("no sort value left after {0}")]
    SortOverflow(SortValue),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
