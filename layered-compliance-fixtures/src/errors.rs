//! Error types for the fixture harness.

use layered_compliance::{ComplianceResult, ConflictError, MalformedAgreementError};
use thiserror::Error;

/// Errors raised while loading or running fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A fixture or expected-failures file could not be parsed.
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// A fixture file or directory could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// The fixture's clauses do not form a well-formed agreement.
    #[error("fixture {fixture} is malformed: {source}")]
    Malformed {
        fixture: String,
        #[source]
        source: MalformedAgreementError,
    },

    /// An expectation names a clause the fixture does not have.
    #[error("fixture {fixture}, case {case}: clause {index} out of range ({len} clauses)")]
    ClauseIndex {
        fixture: String,
        case: String,
        index: usize,
        len: usize,
    },

    /// A case lists the same circumstance as both true and false.
    #[error("fixture {fixture}, case {case}: {source}")]
    Conflict {
        fixture: String,
        case: String,
        #[source]
        source: ConflictError,
    },

    /// Evaluation disagreed with the expectation.
    #[error("fixture {fixture}, case {case}: expected {expected}, got {actual}")]
    Mismatch {
        fixture: String,
        case: String,
        expected: ComplianceResult,
        actual: ComplianceResult,
    },

    #[error("{count} regression(s) across the fixture suite")]
    Regressions { count: usize },
}

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
