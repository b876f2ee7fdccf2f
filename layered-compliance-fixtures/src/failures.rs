//! Expected failures tracking via TOML file.
//!
//! ```toml
//! [[pending]]
//! fixture = "rent.ron"
//! case = "late payment"
//! reason = "grace periods are not modelled"
//! added = "2026-03-02"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{FixtureError, FixtureResult};

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Case name within the fixture.
    pub case: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl FailureEntry {
    fn matches(&self, fixture: &str, case: &str) -> bool {
        self.fixture == fixture && self.case == case
    }
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file lists no failures.
    pub fn load(path: &Path) -> FixtureResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| FixtureError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| FixtureError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Classify a failing case.
    pub fn state_of(&self, fixture: &str, case: &str) -> FailureState {
        if self.known.iter().any(|e| e.matches(fixture, case)) {
            FailureState::Known
        } else if self.pending.iter().any(|e| e.matches(fixture, case)) {
            FailureState::Pending
        } else {
            FailureState::Regression
        }
    }

    pub fn get_entry(&self, fixture: &str, case: &str) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.matches(fixture, case))
    }

    /// Count total expected failures.
    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }
}

/// Tally of a harness run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessResult {
    pub total: usize,
    pub passed: usize,
    /// Failures listed as known or pending.
    pub expected_failures: usize,
    /// `(fixture, case)` of every unexpected failure.
    pub regressions: Vec<(String, String)>,
    /// Listed failures that passed and can be removed from the list.
    pub unexpected_passes: Vec<(String, String)>,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the exit code (0 = pass, 1 = regressions).
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    /// No regressions.
    pub fn success(&self) -> bool {
        self.regressions.is_empty()
    }

    pub fn record_pass(&mut self, fixture: &str, case: &str, state: FailureState) {
        self.total += 1;
        self.passed += 1;
        if state != FailureState::Regression {
            self.unexpected_passes
                .push((fixture.to_string(), case.to_string()));
        }
    }

    pub fn record_failure(&mut self, fixture: &str, case: &str, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => {
                self.expected_failures += 1;
            }
            FailureState::Regression => {
                self.regressions.push((fixture.to_string(), case.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(fixture: &str, case: &str) -> FailureEntry {
        FailureEntry {
            fixture: fixture.to_string(),
            case: case.to_string(),
            reason: None,
            added: None,
            issue: None,
        }
    }

    #[test]
    fn test_unlisted_failure_is_regression() {
        let failures = ExpectedFailures::default();
        assert_eq!(failures.count(), 0);
        assert_eq!(failures.state_of("rent.ron", "late"), FailureState::Regression);
    }

    #[test]
    fn test_known_wins_over_pending() {
        let failures = ExpectedFailures {
            known: vec![entry("rent.ron", "late")],
            pending: vec![entry("rent.ron", "late"), entry("rent.ron", "early")],
        };
        assert_eq!(failures.state_of("rent.ron", "late"), FailureState::Known);
        assert_eq!(failures.state_of("rent.ron", "early"), FailureState::Pending);
        assert_eq!(failures.state_of("other.ron", "late"), FailureState::Regression);
    }

    #[test]
    fn test_harness_result_record() {
        let mut result = HarnessResult::new();
        assert_eq!(result.exit_code(), 0);

        result.record_pass("a.ron", "one", FailureState::Regression);
        result.record_pass("a.ron", "two", FailureState::Pending);
        result.record_failure("a.ron", "three", FailureState::Known);
        assert!(result.success());
        assert_eq!(result.unexpected_passes, vec![("a.ron".to_string(), "two".to_string())]);

        result.record_failure("b.ron", "four", FailureState::Regression);
        assert_eq!(result.total, 4);
        assert_eq!(result.passed, 2);
        assert_eq!(result.expected_failures, 1);
        assert_eq!(result.regressions.len(), 1);
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[pending]]
fixture = "rent.ron"
case = "late payment"
reason = "Grace periods are not modelled"
added = "2026-03-02"

[[known]]
fixture = "permissions/gated-access.ron"
case = "night shift"
issue = "https://github.com/storyscript/layered-nlp/issues/1"
"#
        )
        .unwrap();

        let failures = ExpectedFailures::load(file.path()).unwrap();
        assert_eq!(failures.count(), 2);
        assert_eq!(
            failures.state_of("rent.ron", "late payment"),
            FailureState::Pending
        );
        assert_eq!(
            failures.state_of("permissions/gated-access.ron", "night shift"),
            FailureState::Known
        );
        let pending = failures.get_entry("rent.ron", "late payment").unwrap();
        assert_eq!(pending.added.as_deref(), Some("2026-03-02"));
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let failures = ExpectedFailures::load(Path::new("/nonexistent/path.toml")).unwrap();
        assert_eq!(failures.count(), 0);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[pending]]\nfixture = ").unwrap();
        let err = ExpectedFailures::load(file.path()).unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }));
    }
}
