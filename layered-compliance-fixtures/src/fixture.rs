//! Fixture file model.
//!
//! A fixture is one agreement plus a list of worlds to evaluate it against,
//! written in RON:
//!
//! ```text
//! (
//!     title: Some("No access"),
//!     parties: ["Alice"],
//!     clauses: [
//!         Permission((allowance: Forbidden, sentence: (subject: "Alice", action: "access", object: "Resource"))),
//!     ],
//!     cases: [
//!         (
//!             name: "accessed",
//!             world: [(Performed((subject: "Alice", action: "access", object: "Resource")), true)],
//!             expect: Breach(breached: [0]),
//!         ),
//!     ],
//! )
//! ```
//!
//! Expectations refer to clauses by their position in `clauses`. Clause
//! conditions hold optional booleans, so files that have them start with
//! `#![enable(implicit_some)]` and write `None` for an unspecified entry.

use layered_compliance::{
    Agreement, CircumstanceKey, CircumstanceMap, Clause, ComplianceResult, ConflictError,
    MalformedAgreementError, Party,
};
use serde::{Deserialize, Serialize};

use crate::errors::{FixtureError, FixtureResult};

/// One agreement and the cases it is checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFixture {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub introduction: Option<String>,
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub cases: Vec<FixtureCase>,
}

/// A world and the result evaluating the fixture's agreement in it must give.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCase {
    pub name: String,
    #[serde(default)]
    pub world: Vec<(CircumstanceKey, bool)>,
    pub expect: ExpectedResult,
}

/// [`ComplianceResult`] with clauses written as indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedResult {
    Breach {
        breached: Vec<usize>,
        #[serde(default)]
        possibly: Vec<usize>,
    },
    PossibleBreach(Vec<usize>),
    CompliantIf(Vec<Vec<(CircumstanceKey, bool)>>),
    FullyCompliant,
}

impl ComplianceFixture {
    /// Builds the agreement, validating it like any other.
    pub fn agreement(&self) -> Result<Agreement, MalformedAgreementError> {
        let mut builder = Agreement::builder()
            .parties(self.parties.iter().cloned())
            .clauses(self.clauses.iter().cloned());
        if let Some(title) = &self.title {
            builder = builder.title(title.clone());
        }
        if let Some(introduction) = &self.introduction {
            builder = builder.introduction(introduction.clone());
        }
        builder.build()
    }
}

impl FixtureCase {
    /// The case's facts, refusing a key listed as both true and false.
    pub fn world(&self) -> Result<CircumstanceMap, ConflictError> {
        CircumstanceMap::from_entries(self.world.iter().cloned())
    }
}

impl ExpectedResult {
    /// Resolves clause indices against `clauses`.
    ///
    /// `fixture` and `case` only label the error.
    pub fn resolve(
        &self,
        clauses: &[Clause],
        fixture: &str,
        case: &str,
    ) -> FixtureResult<ComplianceResult> {
        let lookup = |indices: &[usize]| -> FixtureResult<Vec<Clause>> {
            let mut sorted = indices.to_vec();
            sorted.sort_unstable();
            let mut resolved: Vec<Clause> = Vec::with_capacity(sorted.len());
            for index in sorted {
                let clause = clauses.get(index).ok_or_else(|| FixtureError::ClauseIndex {
                    fixture: fixture.to_string(),
                    case: case.to_string(),
                    index,
                    len: clauses.len(),
                })?;
                if !resolved.contains(clause) {
                    resolved.push(clause.clone());
                }
            }
            Ok(resolved)
        };

        let conflict = |source: ConflictError| FixtureError::Conflict {
            fixture: fixture.to_string(),
            case: case.to_string(),
            source,
        };

        Ok(match self {
            ExpectedResult::Breach { breached, possibly } => ComplianceResult::Breach {
                clauses_breached: lookup(breached)?,
                clauses_possibly_breached: lookup(possibly)?,
            },
            ExpectedResult::PossibleBreach(possibly) => {
                ComplianceResult::possible_breach(lookup(possibly)?)
            }
            ExpectedResult::CompliantIf(requirements) => ComplianceResult::compliant_if(
                requirements
                    .iter()
                    .map(|facts| CircumstanceMap::from_entries(facts.iter().cloned()))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(conflict)?,
            ),
            ExpectedResult::FullyCompliant => ComplianceResult::FullyCompliant,
        })
    }
}
