#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven regression testing for `layered-compliance`.
//!
//! Each `.ron` fixture declares an agreement and a list of cases, each a world
//! and the [`ComplianceResult`](layered_compliance::ComplianceResult) it must
//! evaluate to. Failures that are understood but not yet fixed are listed in
//! `expected-failures.toml` so the suite stays green while they are tracked.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture file model
//! - [`loader`] - Fixture discovery and parsing
//! - [`runner`] - Case evaluation and the harness
//! - [`failures`] - Expected failures tracking via TOML
//! - [`formatter`] - Failure and summary text
//! - [`config`] - Harness configuration
//! - [`errors`] - Error types

pub mod config;
pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use config::{HarnessConfig, FIXTURES_ENV};
pub use errors::{FixtureError, FixtureResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{ComplianceFixture, ExpectedResult, FixtureCase};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture, parse_fixture};
pub use runner::{run_fixture, run_harness, CaseOutcome, FixtureReport};

#[cfg(test)]
mod tests;
