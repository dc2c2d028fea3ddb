//! Error types for Rangelift
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for Rangelift operations
#[derive(Debug, Error)]
pub enum RangeliftError {
    /// Remap file parsing errors
    #[error("Remap parse error: {0}")]
    Parse(#[from] RemapParseError),

    /// Pipeline construction errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors raised while building a pipeline
///
/// These are fatal: malformed rule or seed data aborts the whole build.
/// Translation itself never fails once a pipeline is constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A rule's length is zero or negative
    #[error("stage '{stage}', rule {rule}: length must be positive, got {length}")]
    NonPositiveRuleLength {
        stage: String,
        rule: usize,
        length: i64,
    },

    /// A rule's source start is negative
    #[error("stage '{stage}', rule {rule}: source start must be non-negative, got {start}")]
    NegativeSourceStart {
        stage: String,
        rule: usize,
        start: i64,
    },

    /// Seed values do not pair up into (start, length) tuples
    #[error("seed list has odd length {count}, expected (start, length) pairs")]
    OddSeedCount { count: usize },

    /// A seed pair's length is zero or negative
    #[error("seed pair {index}: length must be positive, got {length}")]
    NonPositiveSeedLength { index: usize, length: i64 },
}

/// Errors that can occur during remap file parsing
#[derive(Debug, Error)]
pub enum RemapParseError {
    /// Failed to parse an integer field
    #[error("line {line}: invalid integer '{value}'")]
    InvalidNumber { line: usize, value: String },

    /// A rule line did not hold exactly three integers
    #[error("line {line}: expected 3 integers for a rule, got {count}")]
    BadRuleArity { line: usize, count: usize },

    /// A rule line appeared before any stage header
    #[error("line {line}: rule data before any stage header")]
    RuleOutsideStage { line: usize },

    /// The file held no seed line
    #[error("no seed line found")]
    MissingSeeds,

    /// I/O error during reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Rangelift operations
pub type Result<T> = std::result::Result<T, RangeliftError>;

/// Result type alias for pipeline construction
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Result type alias for remap file parsing
pub type RemapResult<T> = std::result::Result<T, RemapParseError>;
