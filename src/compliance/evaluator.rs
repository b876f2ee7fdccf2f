//! Agreement-level evaluation: classify every clause, then fold worst-wins.

use std::collections::BTreeSet;

use crate::agreement::Agreement;
use crate::circumstance::CircumstanceMap;
use crate::clause::Clause;
use crate::compliance::outcome::{classify, ClauseOutcome};
use crate::compliance::result::ComplianceResult;

/// Evaluate `agreement` against `world`.
///
/// Pure and total: the same inputs always give a structurally equal result,
/// and every agreement the builder accepts has one.
pub fn evaluate(agreement: &Agreement, world: &CircumstanceMap) -> ComplianceResult {
    ComplianceEvaluator.evaluate(agreement, world)
}

/// Stateless compliance evaluator.
///
/// Holds nothing between calls, so a single value can be shared freely across
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplianceEvaluator;

impl ComplianceEvaluator {
    pub fn new() -> Self {
        ComplianceEvaluator
    }

    /// Classify a single clause. Read-only view of the first evaluation step.
    pub fn classify(&self, clause: &Clause, world: &CircumstanceMap) -> ClauseOutcome {
        classify(clause, world)
    }

    pub fn evaluate(&self, agreement: &Agreement, world: &CircumstanceMap) -> ComplianceResult {
        let span = tracing::debug_span!("evaluate", clauses = agreement.len(), facts = world.len());
        let _enter = span.enter();

        let mut fold = Fold::default();
        for (index, clause) in agreement.clauses().iter().enumerate() {
            let outcome = classify(clause, world);
            tracing::trace!(index, %clause, ?outcome, "classified clause");
            fold.push(clause, outcome);
        }

        let result = fold.finish();
        tracing::debug!(severity = %result.severity(), "evaluated agreement");
        result
    }
}

#[derive(Default)]
struct Fold<'a> {
    breached: Vec<&'a Clause>,
    possibly_breached: Vec<&'a Clause>,
    requirements: BTreeSet<CircumstanceMap>,
}

impl<'a> Fold<'a> {
    fn push(&mut self, clause: &'a Clause, outcome: ClauseOutcome) {
        match outcome {
            ClauseOutcome::Inapplicable | ClauseOutcome::Compliant => {}
            ClauseOutcome::CompliantIf(requirements) => self.requirements.extend(requirements),
            ClauseOutcome::PossibleBreach => push_unique(&mut self.possibly_breached, clause),
            ClauseOutcome::Breach => push_unique(&mut self.breached, clause),
        }
    }

    fn finish(self) -> ComplianceResult {
        if !self.breached.is_empty() {
            ComplianceResult::Breach {
                clauses_breached: owned(self.breached),
                clauses_possibly_breached: owned(self.possibly_breached),
            }
        } else if !self.possibly_breached.is_empty() {
            ComplianceResult::PossibleBreach {
                clauses_possibly_breached: owned(self.possibly_breached),
            }
        } else if !self.requirements.is_empty() {
            ComplianceResult::CompliantIf {
                requirements: self.requirements,
            }
        } else {
            ComplianceResult::FullyCompliant
        }
    }
}

fn push_unique<'a>(clauses: &mut Vec<&'a Clause>, clause: &'a Clause) {
    if !clauses.contains(&clause) {
        clauses.push(clause);
    }
}

fn owned(clauses: Vec<&Clause>) -> Vec<Clause> {
    clauses.into_iter().cloned().collect()
}
