//! Compliance evaluation.
//!
//! ```text
//! Agreement + world ──classify──▶ ClauseOutcome per clause ──fold──▶ ComplianceResult
//! ```
//!
//! The fold is worst-wins: `Breach > PossibleBreach > CompliantIf > FullyCompliant`.

mod evaluator;
mod outcome;
mod result;

pub use evaluator::{evaluate, ComplianceEvaluator};
pub use outcome::{classify, ClauseOutcome};
pub use result::{ComplianceResult, Severity};
