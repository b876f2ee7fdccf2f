//! Fixture file loading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{FixtureError, FixtureResult};
use crate::fixture::ComplianceFixture;

const FIXTURE_EXTENSION: &str = "ron";

/// Parse fixture source. `origin` labels parse errors.
pub fn parse_fixture(source: &str, origin: &str) -> FixtureResult<ComplianceFixture> {
    ron::from_str(source).map_err(|e| FixtureError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> FixtureResult<ComplianceFixture> {
    let content = fs::read_to_string(path).map_err(|e| FixtureError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&content, &path.display().to_string())
}

/// Load every `*.ron` fixture under `dir`, keyed by path relative to `dir`.
///
/// Results are sorted by name. A missing directory yields no fixtures.
pub fn load_all_fixtures(dir: &Path) -> FixtureResult<Vec<(String, ComplianceFixture)>> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(dir = %dir.display(), count = fixtures.len(), "loaded fixtures");
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, ComplianceFixture)>,
) -> FixtureResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let read_error = |e: std::io::Error| FixtureError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == FIXTURE_EXTENSION) {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            // forward slashes so expected-failures entries match on every platform
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            fixtures.push((name, load_fixture(&path)?));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    #[test]
    fn test_load_fixture() {
        let fixture = load_fixture(&fixtures_dir().join("forbidden-access.ron")).unwrap();
        assert_eq!(fixture.title.as_deref(), Some("Forbidden access"));
        assert_eq!(fixture.clauses.len(), 1);
    }

    #[test]
    fn test_load_all_fixtures() {
        let fixtures = load_all_fixtures(&fixtures_dir()).unwrap();
        let names: Vec<&str> = fixtures.iter().map(|(name, _)| name.as_str()).collect();
        assert!(names.contains(&"permissions/gated-access.ron"));
        assert!(fixtures.len() >= 3);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let fixtures = load_all_fixtures(Path::new("/nonexistent/fixtures")).unwrap();
        assert!(fixtures.is_empty());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_fixture(Path::new("/nonexistent/fixture.ron")).unwrap_err();
        assert!(matches!(err, FixtureError::Load { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_fixture("(clauses: [Bogus])", "inline").unwrap_err();
        assert!(matches!(err, FixtureError::Parse { ref path, .. } if path == "inline"));
    }
}
