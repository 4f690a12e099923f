//! Error types for job-selector.
//!
//! Analysis itself is best-effort: "no usable selector" is `Ok(None)`, never an
//! error. Errors are reserved for precondition violations and for building a
//! custom ruleset from bad patterns.

/// Error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document handle carries no content to analyze.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A pattern supplied to a custom ruleset failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A custom ruleset is missing a required part.
    #[error("Incomplete ruleset: {0}")]
    EmptyRuleset(&'static str),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
