//! Harness configuration.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the fixtures directory.
pub const FIXTURES_ENV: &str = "LAYERED_COMPLIANCE_FIXTURES";

const EXPECTED_FAILURES_FILE: &str = "expected-failures.toml";

/// Where to find fixtures and how strictly to judge them.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory searched recursively for `*.ron` fixtures.
    pub fixtures_dir: PathBuf,
    /// TOML file listing known and pending failures. A missing file means none.
    pub expected_failures: PathBuf,
    /// Turn regressions into an error from [`run_harness`](crate::run_harness).
    pub fail_on_regression: bool,
}

impl HarnessConfig {
    /// Fixtures bundled with this crate.
    pub fn bundled() -> Self {
        Self::in_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"))
    }

    /// Fixtures in `dir`, with `dir/expected-failures.toml`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let fixtures_dir = dir.into();
        Self {
            expected_failures: fixtures_dir.join(EXPECTED_FAILURES_FILE),
            fixtures_dir,
            fail_on_regression: true,
        }
    }

    /// [`bundled`](Self::bundled), unless `LAYERED_COMPLIANCE_FIXTURES` names another directory.
    pub fn from_env() -> Self {
        match env::var_os(FIXTURES_ENV) {
            Some(dir) if !dir.is_empty() => Self::in_dir(dir),
            _ => Self::bundled(),
        }
    }

    pub fn with_expected_failures(mut self, path: impl Into<PathBuf>) -> Self {
        self.expected_failures = path.into();
        self
    }

    pub fn fail_on_regression(mut self, fail: bool) -> Self {
        self.fail_on_regression = fail;
        self
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::bundled()
    }
}
