//! Human-readable failure reports.

use crate::runner::{CaseOutcome, FixtureReport};

/// Describe one failed case, or `None` if it passed.
pub fn format_failure(fixture: &str, case: &str, outcome: &CaseOutcome) -> Option<String> {
    let CaseOutcome::Failed { expected, actual } = outcome else {
        return None;
    };

    let severity = if expected.severity() != actual.severity() {
        format!(
            "  severity differs: expected {}, got {}\n",
            expected.severity(),
            actual.severity()
        )
    } else {
        String::new()
    };

    Some(format!(
        "{} :: {}\n  expected: {}\n    actual: {}\n{}",
        fixture, case, expected, actual, severity
    ))
}

/// One-paragraph summary of a fixture report.
pub fn format_summary(report: &FixtureReport, expected_failures: usize, regressions: usize) -> String {
    let status = if regressions > 0 { "FAIL" } else { "PASS" };

    format!(
        "{}: {}\n  {} passed, {} failed ({} expected, {} regressions)\n",
        status,
        report.fixture,
        report.passed(),
        report.failed().count(),
        expected_failures,
        regressions
    )
}
