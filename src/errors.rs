//! Error types for agreement construction and circumstance merging.
//!
//! Evaluation itself never fails: unknown facts are represented in-band by
//! [`Truth::Unspecified`](crate::Truth) and the `PossibleBreach`/`CompliantIf`
//! results.

use thiserror::Error;

use crate::circumstance::CircumstanceKey;
use crate::sentence::SentenceField;

/// A clause or party handed to the [`AgreementBuilder`](crate::AgreementBuilder)
/// is structurally incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedAgreementError {
    /// A clause's sentence has a blank subject, action or object.
    #[error("clause {clause_index}: sentence {field} is empty")]
    EmptySentenceField {
        clause_index: usize,
        field: SentenceField,
    },

    /// A circumstance key of a clause refers to a sentence with a blank field.
    #[error("clause {clause_index}: circumstance `{key}` has an empty {field}")]
    EmptyCircumstanceSentence {
        clause_index: usize,
        key: CircumstanceKey,
        field: SentenceField,
    },

    /// A named circumstance key is blank.
    #[error("clause {clause_index}: circumstance name is empty")]
    EmptyCircumstanceName { clause_index: usize },

    /// A declared party name is blank.
    #[error("party {index}: name is empty")]
    EmptyParty { index: usize },
}

/// Two circumstance maps assign contradictory definite values to one key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("circumstance `{key}` is {left} on one side and {right} on the other")]
pub struct ConflictError {
    pub key: CircumstanceKey,
    pub left: bool,
    pub right: bool,
}
