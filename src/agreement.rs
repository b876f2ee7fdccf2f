//! Agreements and their builder.
//!
//! An [`Agreement`] is assembled once by [`AgreementBuilder`] and is immutable
//! afterwards. Amending an agreement produces a new one:
//!
//! ```
//! use layered_compliance::{Agreement, Sentence};
//!
//! let lease = Agreement::builder()
//!     .title("Lease")
//!     .party("Alice")
//!     .requirement(Sentence::new("Alice", "pay", "Rent"))
//!     .build()
//!     .unwrap();
//!
//! let amended = lease
//!     .amend()
//!     .forbid(Sentence::new("Alice", "sublet", "Flat"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(lease.len(), 1);
//! assert_eq!(amended.len(), 2);
//! ```

use std::collections::BTreeSet;

use serde::Serialize;

use crate::circumstance::{CircumstanceKey, CircumstanceMap};
use crate::clause::{Clause, Permission};
use crate::errors::MalformedAgreementError;
use crate::sentence::{Action, Allowance, Party, Sentence};

/// A contract: ordered clauses, the parties bound by them and optional
/// front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agreement {
    clauses: Vec<Clause>,
    parties: Vec<Party>,
    title: Option<String>,
    introduction: Option<String>,
    /// Distinct actions referenced by normative clauses, computed at build time.
    actions: BTreeSet<Action>,
}

impl Agreement {
    pub fn builder() -> AgreementBuilder {
        AgreementBuilder::default()
    }

    /// An agreement with no clauses and no parties.
    pub fn empty() -> Self {
        Self {
            clauses: Vec::new(),
            parties: Vec::new(),
            title: None,
            introduction: None,
            actions: BTreeSet::new(),
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn introduction(&self) -> Option<&str> {
        self.introduction.as_deref()
    }

    pub fn actions(&self) -> &BTreeSet<Action> {
        &self.actions
    }

    /// Sentences of the normative clauses, in clause order.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> + '_ {
        self.clauses.iter().filter_map(Clause::sentence)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Start a new builder seeded with this agreement's content.
    pub fn amend(&self) -> AgreementBuilder {
        AgreementBuilder {
            clauses: self.clauses.clone(),
            parties: self.parties.clone(),
            title: self.title.clone(),
            introduction: self.introduction.clone(),
        }
    }
}

impl Default for Agreement {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accumulates clauses and parties in the order supplied.
///
/// Only structural well-formedness is checked by [`build`](Self::build):
/// every sentence field, circumstance name and party name must be non-blank.
#[derive(Debug, Clone, Default)]
pub struct AgreementBuilder {
    clauses: Vec<Clause>,
    parties: Vec<Party>,
    title: Option<String>,
    introduction: Option<String>,
}

impl AgreementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn introduction(mut self, introduction: impl Into<String>) -> Self {
        self.introduction = Some(introduction.into());
        self
    }

    pub fn party(mut self, party: impl Into<Party>) -> Self {
        self.parties.push(party.into());
        self
    }

    pub fn parties<I, P>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Party>,
    {
        self.parties.extend(parties.into_iter().map(Into::into));
        self
    }

    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses<I: IntoIterator<Item = Clause>>(mut self, clauses: I) -> Self {
        self.clauses.extend(clauses);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.clause(Clause::text(text))
    }

    pub fn requirement(self, sentence: Sentence) -> Self {
        self.clause(Clause::requirement(sentence))
    }

    pub fn permission(self, allowance: Allowance, sentence: Sentence) -> Self {
        self.clause(Clause::permission(allowance, sentence))
    }

    pub fn allow(self, sentence: Sentence) -> Self {
        self.clause(Clause::allow(sentence))
    }

    pub fn forbid(self, sentence: Sentence) -> Self {
        self.clause(Clause::forbid(sentence))
    }

    pub fn requirement_when(self, sentence: Sentence, circumstances: CircumstanceMap) -> Self {
        self.clause(Clause::requirement_with(sentence, circumstances))
    }

    pub fn permission_when(
        self,
        permission: Permission,
        circumstance_allowance: Allowance,
        circumstances: CircumstanceMap,
    ) -> Self {
        self.clause(Clause::permission_with(
            permission,
            circumstance_allowance,
            circumstances,
        ))
    }

    /// Validate and freeze the accumulated content.
    pub fn build(self) -> Result<Agreement, MalformedAgreementError> {
        if let Err(err) = self.validate() {
            tracing::warn!(error = %err, "rejected malformed agreement");
            return Err(err);
        }

        let actions = self
            .clauses
            .iter()
            .filter_map(Clause::sentence)
            .map(|sentence| sentence.action.clone())
            .collect::<BTreeSet<_>>();

        tracing::debug!(
            clauses = self.clauses.len(),
            parties = self.parties.len(),
            actions = actions.len(),
            "built agreement"
        );

        Ok(Agreement {
            clauses: self.clauses,
            parties: self.parties,
            title: self.title,
            introduction: self.introduction,
            actions,
        })
    }

    fn validate(&self) -> Result<(), MalformedAgreementError> {
        for (index, party) in self.parties.iter().enumerate() {
            if party.is_blank() {
                return Err(MalformedAgreementError::EmptyParty { index });
            }
        }

        for (clause_index, clause) in self.clauses.iter().enumerate() {
            if let Some(field) = clause.sentence().and_then(Sentence::blank_field) {
                return Err(MalformedAgreementError::EmptySentenceField {
                    clause_index,
                    field,
                });
            }

            let keys = clause.circumstances().into_iter().flat_map(CircumstanceMap::keys);
            for key in keys {
                match key {
                    CircumstanceKey::Performed(sentence) => {
                        if let Some(field) = sentence.blank_field() {
                            return Err(MalformedAgreementError::EmptyCircumstanceSentence {
                                clause_index,
                                key: key.clone(),
                                field,
                            });
                        }
                    }
                    CircumstanceKey::Named(name) => {
                        if name.trim().is_empty() {
                            return Err(MalformedAgreementError::EmptyCircumstanceName {
                                clause_index,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
