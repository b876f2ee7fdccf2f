//! Per-clause classification.
//!
//! Every clause is reduced to a [`ClauseOutcome`] before the agreement-level
//! fold. The "has this action occurred" fact is read from the world under the
//! reserved [`CircumstanceKey::Performed`](crate::CircumstanceKey) key.
//!
//! | clause                    | performed: true | false     | unspecified     |
//! |---------------------------|-----------------|-----------|-----------------|
//! | requirement               | Compliant       | Breach    | CompliantIf     |
//! | forbidden permission      | Breach          | Compliant | PossibleBreach  |
//! | allowed permission        | Compliant       | Compliant | Compliant       |
//!
//! Circumstance-qualified clauses are gated on
//! [`CircumstanceMap::satisfies`]; see [`classify`].

use std::collections::BTreeSet;

use crate::circumstance::{CircumstanceKey, CircumstanceMap, Satisfaction, Truth};
use crate::clause::{Clause, Permission};
use crate::compliance::result::Severity;
use crate::sentence::{Allowance, Sentence};

/// Standing of a single clause under a given world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseOutcome {
    /// The clause does not apply (text, or its condition is false).
    Inapplicable,
    /// The clause applies and is satisfied for good.
    Compliant,
    /// Satisfied for now; fully compliant once any one of the maps holds.
    CompliantIf(BTreeSet<CircumstanceMap>),
    /// Breached under some completion of the unknown facts.
    PossibleBreach,
    /// Definitely violated.
    Breach,
}

impl ClauseOutcome {
    /// Severity this outcome contributes to the agreement-level fold.
    pub fn severity(&self) -> Severity {
        match self {
            ClauseOutcome::Inapplicable | ClauseOutcome::Compliant => Severity::FullyCompliant,
            ClauseOutcome::CompliantIf(_) => Severity::CompliantIf,
            ClauseOutcome::PossibleBreach => Severity::PossibleBreach,
            ClauseOutcome::Breach => Severity::Breach,
        }
    }

    /// The outcome of a clause that only applies if `unresolved` turns out to
    /// hold.
    ///
    /// A breach becomes possible rather than certain. A pending obligation
    /// waits on the condition itself, so the requirement it reports is
    /// `unresolved`.
    fn if_condition_holds(self, unresolved: CircumstanceMap) -> Self {
        match self {
            ClauseOutcome::Breach => ClauseOutcome::PossibleBreach,
            ClauseOutcome::CompliantIf(_) => {
                ClauseOutcome::CompliantIf(std::iter::once(unresolved).collect())
            }
            other => other,
        }
    }

    /// The outcome when one of two outcomes applies and the world cannot yet
    /// tell which.
    fn either(self, other: Self) -> Self {
        use ClauseOutcome::*;
        match (self, other) {
            (Breach, Breach) => Breach,
            (Breach, _) | (_, Breach) | (PossibleBreach, _) | (_, PossibleBreach) => {
                PossibleBreach
            }
            (CompliantIf(mut left), CompliantIf(right)) => {
                left.extend(right);
                CompliantIf(left)
            }
            (CompliantIf(requirements), _) | (_, CompliantIf(requirements)) => {
                CompliantIf(requirements)
            }
            (Compliant, _) | (_, Compliant) => Compliant,
            (Inapplicable, Inapplicable) => Inapplicable,
        }
    }
}

/// Classify one clause against `world`.
///
/// - `RequirementWithCircumstances` and `PermissionWithCircumstances` gated
///   with [`Allowance::Allow`] apply only while their condition holds: `No`
///   makes them inapplicable, `Yes` classifies the inner clause, `Maybe`
///   softens it (see [`ClauseOutcome`]).
/// - `PermissionWithCircumstances` gated with [`Allowance::Forbid`] forbids the
///   sentence while the condition holds and defers to the inner permission
///   otherwise; under `Maybe` both branches are considered.
pub fn classify(clause: &Clause, world: &CircumstanceMap) -> ClauseOutcome {
    match clause {
        Clause::Text(_) => ClauseOutcome::Inapplicable,
        Clause::Requirement(sentence) => requirement(sentence, world),
        Clause::Permission(permission) => self::permission(permission, world),
        Clause::RequirementWithCircumstances {
            sentence,
            circumstances,
        } => match world.satisfies(circumstances) {
            Satisfaction::No => ClauseOutcome::Inapplicable,
            Satisfaction::Yes => requirement(sentence, world),
            Satisfaction::Maybe => requirement(sentence, world)
                .if_condition_holds(world.unresolved(circumstances)),
        },
        Clause::PermissionWithCircumstances {
            permission,
            circumstance_allowance: Allowance::Allow,
            circumstances,
        } => match world.satisfies(circumstances) {
            Satisfaction::No => ClauseOutcome::Inapplicable,
            Satisfaction::Yes => self::permission(permission, world),
            Satisfaction::Maybe => self::permission(permission, world)
                .if_condition_holds(world.unresolved(circumstances)),
        },
        Clause::PermissionWithCircumstances {
            permission,
            circumstance_allowance: Allowance::Forbid,
            circumstances,
        } => {
            let gated = forbidden(&permission.sentence, world);
            match world.satisfies(circumstances) {
                Satisfaction::Yes => gated,
                Satisfaction::No => self::permission(permission, world),
                Satisfaction::Maybe => gated.either(self::permission(permission, world)),
            }
        }
    }
}

fn requirement(sentence: &Sentence, world: &CircumstanceMap) -> ClauseOutcome {
    match world.performed(sentence) {
        Truth::True => ClauseOutcome::Compliant,
        Truth::False => ClauseOutcome::Breach,
        Truth::Unspecified => {
            let discharged = CircumstanceMap::new().with(CircumstanceKey::performed(sentence), true);
            ClauseOutcome::CompliantIf(std::iter::once(discharged).collect())
        }
    }
}

fn permission(permission: &Permission, world: &CircumstanceMap) -> ClauseOutcome {
    match permission.allowance {
        // A right is never violated by being unused.
        Allowance::Allow => ClauseOutcome::Compliant,
        Allowance::Forbid => forbidden(&permission.sentence, world),
    }
}

fn forbidden(sentence: &Sentence, world: &CircumstanceMap) -> ClauseOutcome {
    match world.performed(sentence) {
        Truth::True => ClauseOutcome::Breach,
        Truth::False => ClauseOutcome::Compliant,
        Truth::Unspecified => ClauseOutcome::PossibleBreach,
    }
}
