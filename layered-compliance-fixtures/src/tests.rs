use std::fs;
use std::path::Path;

use layered_compliance::{CircumstanceKey, Clause, ComplianceResult, Sentence};
use tempfile::TempDir;

use crate::{
    load_all_fixtures, parse_fixture, run_fixture, run_harness, CaseOutcome, ExpectedResult,
    FailureState, FixtureError, HarnessConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const WRONG_EXPECTATION: &str = r#"(
    clauses: [Requirement((subject: "Alice", action: "pay", object: "Rent"))],
    cases: [
        (name: "refused", world: [(Performed((subject: "Alice", action: "pay", object: "Rent")), false)], expect: FullyCompliant),
        (name: "paid", world: [(Performed((subject: "Alice", action: "pay", object: "Rent")), true)], expect: FullyCompliant),
    ],
)"#;

fn scratch_suite(expected_failures: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rent.ron"), WRONG_EXPECTATION).unwrap();
    if let Some(toml) = expected_failures {
        fs::write(dir.path().join("expected-failures.toml"), toml).unwrap();
    }
    dir
}

// ============================================================================
// Bundled fixtures
// ============================================================================

#[test]
fn test_bundled_fixtures_pass() {
    init_tracing();
    let result = run_harness(&HarnessConfig::bundled()).unwrap();
    assert!(result.success(), "regressions: {:?}", result.regressions);
    assert_eq!(result.passed, result.total);
    assert!(result.total >= 15);
}

#[test]
fn test_every_bundled_fixture_builds() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    for (name, fixture) in load_all_fixtures(&dir).unwrap() {
        let agreement = fixture.agreement().unwrap();
        assert_eq!(agreement.len(), fixture.clauses.len(), "{}", name);
        assert!(!fixture.cases.is_empty(), "{} has no cases", name);
    }
}

#[test]
fn test_default_config_points_at_bundled_fixtures() {
    let config = HarnessConfig::default();
    assert!(config.fixtures_dir.ends_with("fixtures"));
    assert!(config.expected_failures.ends_with("fixtures/expected-failures.toml"));
    assert!(config.fail_on_regression);
}

// ============================================================================
// Runner
// ============================================================================

#[test]
fn test_run_fixture_reports_mismatch() {
    let fixture = parse_fixture(WRONG_EXPECTATION, "rent.ron").unwrap();
    let report = run_fixture("rent.ron", &fixture).unwrap();
    let rent = Clause::requirement(Sentence::new("Alice", "pay", "Rent"));

    assert_eq!(report.passed(), 1);
    assert_eq!(
        report.cases[0],
        (
            "refused".to_string(),
            CaseOutcome::Failed {
                expected: ComplianceResult::FullyCompliant,
                actual: ComplianceResult::breach(vec![rent]),
            }
        )
    );

    let err = report.into_result().unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"fixture rent.ron, case refused: expected FullyCompliant, got Breach [Alice must pay Rent]"
    );
}

#[test]
fn test_failure_message() {
    let fixture = parse_fixture(WRONG_EXPECTATION, "rent.ron").unwrap();
    let report = run_fixture("rent.ron", &fixture).unwrap();
    let (case, outcome) = report.failed().next().unwrap();
    let message = crate::format_failure("rent.ron", case, outcome).unwrap();
    insta::assert_snapshot!(message.trim_end(), @r###"
    rent.ron :: refused
      expected: FullyCompliant
        actual: Breach [Alice must pay Rent]
      severity differs: expected FullyCompliant, got Breach
    "###);
}

#[test]
fn test_malformed_fixture() {
    let source = r#"(clauses: [Requirement((subject: "Alice", action: "", object: "Rent"))])"#;
    let fixture = parse_fixture(source, "blank.ron").unwrap();
    let err = run_fixture("blank.ron", &fixture).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"fixture blank.ron is malformed: clause 0: sentence action is empty"
    );
}

#[test]
fn test_clause_index_out_of_range() {
    let source = r#"(
        clauses: [Text("only prose")],
        cases: [(name: "bad", expect: PossibleBreach([3]))],
    )"#;
    let fixture = parse_fixture(source, "index.ron").unwrap();
    let err = run_fixture("index.ron", &fixture).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::ClauseIndex { index: 3, len: 1, .. }
    ));
}

#[test]
fn test_expected_indices_follow_agreement_order() {
    let clauses = vec![
        Clause::forbid(Sentence::new("Alice", "access", "Resource")),
        Clause::text("prose"),
        Clause::forbid(Sentence::new("Alice", "access", "Resource")),
        Clause::forbid(Sentence::new("Bob", "access", "Resource")),
    ];
    let expected = ExpectedResult::PossibleBreach(vec![3, 0, 2])
        .resolve(&clauses, "order.ron", "case")
        .unwrap();
    assert_eq!(
        expected,
        ComplianceResult::possible_breach(vec![clauses[0].clone(), clauses[3].clone()])
    );
}

#[test]
fn test_world_from_pairs() {
    let fixture = parse_fixture(WRONG_EXPECTATION, "rent.ron").unwrap();
    let world = fixture.cases[1].world().unwrap();
    let paid = CircumstanceKey::performed(&Sentence::new("Alice", "pay", "Rent"));
    assert_eq!(world.get(&paid).as_bool(), Some(true));
}

#[test]
fn test_contradictory_world_rejected() {
    let source = r#"(
        clauses: [Requirement((subject: "Alice", action: "pay", object: "Rent"))],
        cases: [(
            name: "month end both ways",
            world: [(Named("month_end"), true), (Named("month_end"), false)],
            expect: FullyCompliant,
        )],
    )"#;
    let fixture = parse_fixture(source, "twice.ron").unwrap();
    let err = run_fixture("twice.ron", &fixture).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"fixture twice.ron, case month end both ways: circumstance `month_end` is true on one side and false on the other"
    );
}

#[test]
fn test_contradictory_expectation_rejected() {
    let source = r#"(
        clauses: [Requirement((subject: "Alice", action: "pay", object: "Rent"))],
        cases: [(
            name: "either way",
            expect: CompliantIf([[(Named("month_end"), true), (Named("month_end"), false)]]),
        )],
    )"#;
    let fixture = parse_fixture(source, "twice.ron").unwrap();
    let err = run_fixture("twice.ron", &fixture).unwrap_err();
    assert!(matches!(err, FixtureError::Conflict { .. }));
}

#[test]
fn test_pending_condition_entry_parses() {
    let source = r#"#![enable(implicit_some)]
    (
        clauses: [RequirementWithCircumstances(
            sentence: (subject: "Alice", action: "pay", object: "Rent"),
            circumstances: [(Named("month_end"), None)],
        )],
        cases: [(
            name: "unknown date",
            expect: CompliantIf([[(Named("month_end"), true)]]),
        )],
    )"#;
    let fixture = parse_fixture(source, "pending.ron").unwrap();
    let month_end = CircumstanceKey::named("month_end");
    let circumstances = fixture.clauses[0].circumstances().unwrap();
    assert!(circumstances.contains_key(&month_end));
    assert!(!circumstances.get(&month_end).is_definite());

    let report = run_fixture("pending.ron", &fixture).unwrap();
    assert_eq!(report.passed(), 1);
}

#[test]
fn test_summary_line() {
    let fixture = parse_fixture(WRONG_EXPECTATION, "rent.ron").unwrap();
    let report = run_fixture("rent.ron", &fixture).unwrap();
    insta::assert_snapshot!(crate::format_summary(&report, 0, 1).trim_end(), @r###"
    FAIL: rent.ron
      1 passed, 1 failed (0 expected, 1 regressions)
    "###);
}

// ============================================================================
// Harness with expected failures
// ============================================================================

#[test]
fn test_regression_fails_harness() {
    init_tracing();
    let dir = scratch_suite(None);
    let err = run_harness(&HarnessConfig::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, FixtureError::Regressions { count: 1 }));
}

#[test]
fn test_regression_counted_when_not_failing() {
    let dir = scratch_suite(None);
    let config = HarnessConfig::in_dir(dir.path()).fail_on_regression(false);
    let result = run_harness(&config).unwrap();
    assert_eq!(result.total, 2);
    assert_eq!(result.passed, 1);
    assert_eq!(
        result.regressions,
        vec![("rent.ron".to_string(), "refused".to_string())]
    );
    assert_eq!(result.exit_code(), 1);
}

#[test]
fn test_pending_failure_keeps_harness_green() {
    let dir = scratch_suite(Some(
        r#"
[[pending]]
fixture = "rent.ron"
case = "refused"
reason = "expectation awaiting review"
"#,
    ));
    let result = run_harness(&HarnessConfig::in_dir(dir.path())).unwrap();
    assert!(result.success());
    assert_eq!(result.expected_failures, 1);
}

#[test]
fn test_listed_case_that_passes_is_reported() {
    let dir = scratch_suite(Some(
        r#"
[[known]]
fixture = "rent.ron"
case = "refused"

[[known]]
fixture = "rent.ron"
case = "paid"
"#,
    ));
    let result = run_harness(&HarnessConfig::in_dir(dir.path())).unwrap();
    assert_eq!(
        result.unexpected_passes,
        vec![("rent.ron".to_string(), "paid".to_string())]
    );
}

#[test]
fn test_nested_fixture_names_use_forward_slashes() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("rent.ron"), WRONG_EXPECTATION).unwrap();
    fs::write(
        dir.path().join("expected-failures.toml"),
        "[[known]]\nfixture = \"nested/rent.ron\"\ncase = \"refused\"\n",
    )
    .unwrap();

    let config = HarnessConfig::in_dir(dir.path());
    let result = run_harness(&config).unwrap();
    assert_eq!(result.expected_failures, 1);

    let expected = crate::ExpectedFailures::load(&config.expected_failures).unwrap();
    assert_eq!(expected.state_of("nested/rent.ron", "refused"), FailureState::Known);
}
