use thiserror::Error;

/// Configuration errors raised when an archive is constructed or reconfigured.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArchiveError {
    #[error("archive limit must be at least 1")]
    InvalidLimit,

    #[error("archive relation name must not be empty")]
    EmptyRelation,
}
