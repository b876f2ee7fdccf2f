#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Structured agreements and compliance evaluation.
//!
//! An [`Agreement`] is an ordered list of [`Clause`]s over subject-action-object
//! [`Sentence`]s. Given what is known about the world, as a [`CircumstanceMap`]
//! of true/false/unspecified facts, [`evaluate`] reduces the agreement to one of
//! four [`ComplianceResult`]s:
//!
//! - `Breach` - at least one clause is definitely violated
//! - `PossibleBreach` - some completion of the unknown facts violates a clause
//! - `CompliantIf` - compliant for now, fully compliant once a listed set of
//!   circumstances holds
//! - `FullyCompliant`
//!
//! ## Example
//!
//! ```
//! use layered_compliance::{evaluate, Agreement, CircumstanceMap, ComplianceResult, Sentence};
//!
//! let access = Sentence::new("Alice", "access", "Resource");
//! let agreement = Agreement::builder()
//!     .party("Alice")
//!     .forbid(access.clone())
//!     .build()
//!     .unwrap();
//!
//! let world = CircumstanceMap::new().with_performed(&access, true);
//! assert!(matches!(evaluate(&agreement, &world), ComplianceResult::Breach { .. }));
//!
//! let world = CircumstanceMap::new().with_performed(&access, false);
//! assert_eq!(evaluate(&agreement, &world), ComplianceResult::FullyCompliant);
//! ```
//!
//! Parsing source text into agreements and rendering results for people are
//! left to the surrounding tools.

mod agreement;
mod circumstance;
mod clause;
mod compliance;
mod errors;
mod sentence;

pub use agreement::{Agreement, AgreementBuilder};
pub use circumstance::{CircumstanceKey, CircumstanceMap, Satisfaction, Truth};
pub use clause::{Clause, ClauseKind, Permission};
pub use compliance::{
    classify, evaluate, ClauseOutcome, ComplianceEvaluator, ComplianceResult, Severity,
};
pub use errors::{ConflictError, MalformedAgreementError};
pub use sentence::{Action, Allowance, Entity, Party, Sentence, SentenceField};

#[cfg(test)]
mod tests {
    mod agreement;
    mod circumstance;
    mod evaluator;
    mod properties;
}
