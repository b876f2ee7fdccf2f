//! The four compliance states an agreement can be in.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circumstance::CircumstanceMap;
use crate::clause::Clause;

/// Result of evaluating an agreement against a world.
///
/// Clause collections behave as sets: each clause appears once, in the order
/// it first appears in the agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceResult {
    /// Compliance is no longer possible: the agreement is already breached.
    Breach {
        clauses_breached: Vec<Clause>,
        /// Clauses that would also be breached under some completion of the
        /// unknown facts.
        clauses_possibly_breached: Vec<Clause>,
    },
    /// Nothing is breached yet, but some completion of the unknown facts
    /// breaches these clauses.
    PossibleBreach { clauses_possibly_breached: Vec<Clause> },
    /// Compliant for now. Each map is, on its own, a set of circumstances
    /// under which `FullyCompliant` is reached.
    CompliantIf { requirements: BTreeSet<CircumstanceMap> },
    /// Compliant, and no further action is needed to remain so.
    ///
    /// Taking a forbidden action later can still breach the agreement.
    FullyCompliant,
}

/// Ordering of compliance states, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    FullyCompliant,
    CompliantIf,
    PossibleBreach,
    Breach,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::FullyCompliant => "FullyCompliant",
            Severity::CompliantIf => "CompliantIf",
            Severity::PossibleBreach => "PossibleBreach",
            Severity::Breach => "Breach",
        };
        f.write_str(name)
    }
}

impl ComplianceResult {
    pub fn breach(clauses_breached: Vec<Clause>) -> Self {
        ComplianceResult::Breach {
            clauses_breached,
            clauses_possibly_breached: Vec::new(),
        }
    }

    pub fn possible_breach(clauses_possibly_breached: Vec<Clause>) -> Self {
        ComplianceResult::PossibleBreach {
            clauses_possibly_breached,
        }
    }

    pub fn compliant_if<I>(requirements: I) -> Self
    where
        I: IntoIterator<Item = CircumstanceMap>,
    {
        ComplianceResult::CompliantIf {
            requirements: requirements.into_iter().collect(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ComplianceResult::Breach { .. } => Severity::Breach,
            ComplianceResult::PossibleBreach { .. } => Severity::PossibleBreach,
            ComplianceResult::CompliantIf { .. } => Severity::CompliantIf,
            ComplianceResult::FullyCompliant => Severity::FullyCompliant,
        }
    }

    pub fn is_breach(&self) -> bool {
        matches!(self, ComplianceResult::Breach { .. })
    }

    /// `CompliantIf` or `FullyCompliant`.
    pub fn is_compliant(&self) -> bool {
        self.severity() <= Severity::CompliantIf
    }

    pub fn is_fully_compliant(&self) -> bool {
        matches!(self, ComplianceResult::FullyCompliant)
    }

    pub fn breached_clauses(&self) -> &[Clause] {
        match self {
            ComplianceResult::Breach {
                clauses_breached, ..
            } => clauses_breached,
            _ => &[],
        }
    }

    pub fn possibly_breached_clauses(&self) -> &[Clause] {
        match self {
            ComplianceResult::Breach {
                clauses_possibly_breached,
                ..
            }
            | ComplianceResult::PossibleBreach {
                clauses_possibly_breached,
            } => clauses_possibly_breached,
            _ => &[],
        }
    }

    /// Sufficient conditions for full compliance, when `CompliantIf`.
    pub fn requirements(&self) -> Option<&BTreeSet<CircumstanceMap>> {
        match self {
            ComplianceResult::CompliantIf { requirements } => Some(requirements),
            _ => None,
        }
    }
}

fn write_clauses(f: &mut fmt::Formatter<'_>, clauses: &[Clause]) -> fmt::Result {
    f.write_str("[")?;
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{}", clause)?;
    }
    f.write_str("]")
}

impl fmt::Display for ComplianceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity())?;
        match self {
            ComplianceResult::Breach {
                clauses_breached,
                clauses_possibly_breached,
            } => {
                f.write_str(" ")?;
                write_clauses(f, clauses_breached)?;
                if !clauses_possibly_breached.is_empty() {
                    f.write_str(" possibly ")?;
                    write_clauses(f, clauses_possibly_breached)?;
                }
                Ok(())
            }
            ComplianceResult::PossibleBreach {
                clauses_possibly_breached,
            } => {
                f.write_str(" ")?;
                write_clauses(f, clauses_possibly_breached)
            }
            ComplianceResult::CompliantIf { requirements } => {
                for (i, requirement) in requirements.iter().enumerate() {
                    f.write_str(if i == 0 { " " } else { " | " })?;
                    write!(f, "{}", requirement)?;
                }
                Ok(())
            }
            ComplianceResult::FullyCompliant => Ok(()),
        }
    }
}
