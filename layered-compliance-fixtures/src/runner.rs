//! Fixture runner.

use layered_compliance::{evaluate, ComplianceResult};
use tracing::{debug, info, warn};

use crate::config::HarnessConfig;
use crate::errors::{FixtureError, FixtureResult};
use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::ComplianceFixture;
use crate::formatter::{format_failure, format_summary};
use crate::loader::load_all_fixtures;

/// How one case fared.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Passed,
    Failed {
        expected: ComplianceResult,
        actual: ComplianceResult,
    },
}

impl CaseOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

/// Outcomes of every case of one fixture, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureReport {
    pub fixture: String,
    pub cases: Vec<(String, CaseOutcome)>,
}

impl FixtureReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|(_, o)| o.is_passed()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &CaseOutcome)> + '_ {
        self.cases
            .iter()
            .filter(|(_, o)| !o.is_passed())
            .map(|(name, o)| (name.as_str(), o))
    }

    /// First failure as an error.
    pub fn into_result(self) -> FixtureResult<()> {
        let fixture = self.fixture;
        match self
            .cases
            .into_iter()
            .find(|(_, outcome)| !outcome.is_passed())
        {
            Some((case, CaseOutcome::Failed { expected, actual })) => Err(FixtureError::Mismatch {
                fixture,
                case,
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

/// Evaluate every case of `fixture`. `name` labels the report and errors.
///
/// Fixtures that cannot be evaluated as written are errors. A result that
/// differs from the expectation is a [`CaseOutcome::Failed`], not an error.
pub fn run_fixture(name: &str, fixture: &ComplianceFixture) -> FixtureResult<FixtureReport> {
    let agreement = fixture
        .agreement()
        .map_err(|source| FixtureError::Malformed {
            fixture: name.to_string(),
            source,
        })?;

    let mut cases = Vec::with_capacity(fixture.cases.len());
    for case in &fixture.cases {
        let expected = case.expect.resolve(agreement.clauses(), name, &case.name)?;
        let world = case.world().map_err(|source| FixtureError::Conflict {
            fixture: name.to_string(),
            case: case.name.clone(),
            source,
        })?;
        let actual = evaluate(&agreement, &world);
        debug!(fixture = name, case = %case.name, result = %actual, "case evaluated");

        let outcome = if actual == expected {
            CaseOutcome::Passed
        } else {
            CaseOutcome::Failed { expected, actual }
        };
        cases.push((case.name.clone(), outcome));
    }

    Ok(FixtureReport {
        fixture: name.to_string(),
        cases,
    })
}

/// Run every fixture under `config.fixtures_dir`, classifying failures
/// against `config.expected_failures`.
pub fn run_harness(config: &HarnessConfig) -> FixtureResult<HarnessResult> {
    let expected = ExpectedFailures::load(&config.expected_failures)?;
    let fixtures = load_all_fixtures(&config.fixtures_dir)?;
    let mut result = HarnessResult::new();

    for (name, fixture) in &fixtures {
        let report = run_fixture(name, fixture)?;
        let mut listed_failures = 0;
        let mut regressions = 0;

        for (case, outcome) in &report.cases {
            let state = expected.state_of(name, case);
            if outcome.is_passed() {
                result.record_pass(name, case, state);
                continue;
            }
            result.record_failure(name, case, state);
            if let Some(message) = format_failure(name, case, outcome) {
                match state {
                    FailureState::Regression => {
                        regressions += 1;
                        warn!("regression\n{}", message);
                    }
                    _ => {
                        listed_failures += 1;
                        debug!("expected failure\n{}", message);
                    }
                }
            }
        }

        info!(
            "{}",
            format_summary(&report, listed_failures, regressions).trim_end()
        );
    }

    for (fixture, case) in &result.unexpected_passes {
        warn!(fixture = %fixture, case = %case, "listed as failing but passed");
    }

    if config.fail_on_regression && !result.success() {
        return Err(FixtureError::Regressions {
            count: result.regressions.len(),
        });
    }
    Ok(result)
}
