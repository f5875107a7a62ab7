//! Error contract shared by the codec layer and the execution engine.
//!
//! Every kind here is fatal and never retried internally. Domain-level
//! failures are ordinary [`crate::tree::outcome::Outcome::Fail`] results,
//! never errors.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A resume was driven against a node that cannot accept it: resuming a
    /// condition, popping a drained continuation, or finding frames where a
    /// node requires none.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// A value exceeds what a codec can represent.
    #[error("unencodable value: {0}")]
    EncodingRange(String),

    /// A persisted string is truncated or carries an invalid tag character.
    #[error("malformed encoding: {0}")]
    DecodingFormat(String),

    /// The persisted continuation does not fit the live tree; the host must
    /// discard the stale continuation or abort.
    #[error("continuation does not match tree: {0}")]
    StructuralMismatch(String),
}

impl Error {
    pub(crate) fn contract(reason: impl Into<String>) -> Self {
        Error::ContractViolation(reason.into())
    }

    pub(crate) fn range(reason: impl Into<String>) -> Self {
        Error::EncodingRange(reason.into())
    }

    pub(crate) fn decoding(reason: impl Into<String>) -> Self {
        Error::DecodingFormat(reason.into())
    }

    pub(crate) fn mismatch(reason: impl Into<String>) -> Self {
        Error::StructuralMismatch(reason.into())
    }
}
