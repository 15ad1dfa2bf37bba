// Tests for the static fixture provider

use super::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "App: Lib1 Lib2\nLib1: Core\nLib2: Core\nCore:";

#[test]
fn test_parse_sample_fixture() {
    let fixture = FixtureProvider::parse(SAMPLE).unwrap();
    assert_eq!(fixture.len(), 4);
    assert_eq!(
        fixture.get("App").unwrap(),
        &["Lib1".to_string(), "Lib2".to_string()]
    );
    assert!(fixture.get("Core").unwrap().is_empty());
}

#[test]
fn test_comments_blank_lines_and_whitespace_are_ignored() {
    let content = "\n# header comment\n   \n  App :   Lib1\t Lib2  \n\n#Lib1: Nope\n";
    let fixture: FixtureProvider = content.parse().unwrap();

    assert_eq!(fixture.len(), 1);
    assert_eq!(
        fixture.get("App").unwrap(),
        &["Lib1".to_string(), "Lib2".to_string()]
    );
    assert!(fixture.get("Lib1").is_none());
}

#[test]
fn test_line_without_separator_is_rejected_with_line_number() {
    let err = FixtureProvider::parse("App: Lib1\n# fine\nLib1 Core\n").unwrap_err();
    match err {
        FixtureError::MissingSeparator { line_number, line } => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "Lib1 Core");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_package_name_is_rejected() {
    let err = FixtureProvider::parse(": Lib1").unwrap_err();
    assert!(matches!(err, FixtureError::EmptyName { line_number: 1, .. }));
}

#[test]
fn test_later_line_replaces_earlier_entry() {
    let fixture = FixtureProvider::parse("App: Old\nApp: New Other").unwrap();
    assert_eq!(
        fixture.get("App").unwrap(),
        &["New".to_string(), "Other".to_string()]
    );
}

#[test]
fn test_lookup_unknown_package_is_a_leaf() {
    let fixture = FixtureProvider::parse(SAMPLE).unwrap();
    let deps = fixture.lookup("Missing", "1.0.0").unwrap();
    assert!(deps.is_empty());
}

#[test]
fn test_lookup_falls_back_to_case_insensitive_match() {
    let fixture = FixtureProvider::parse("App: Lib1\napp: Other").unwrap();

    // Exact match wins
    let exact = fixture.lookup("app", "1.0.0").unwrap();
    assert_eq!(exact, vec![Dependency::unversioned("Other")]);

    let folded = fixture.lookup("APP", "1.0.0").unwrap();
    assert_eq!(folded, vec![Dependency::unversioned("Lib1")]);
}

#[test]
fn test_lookup_reports_no_versions() {
    let fixture = FixtureProvider::parse(SAMPLE).unwrap();
    let deps = fixture.lookup("App", "2.0.0").unwrap();
    assert_eq!(
        deps,
        vec![Dependency::unversioned("Lib1"), Dependency::unversioned("Lib2")]
    );
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("repo.txt");
    fs::write(&path, SAMPLE).unwrap();

    let fixture = FixtureProvider::load(&path).unwrap();
    assert_eq!(fixture.len(), 4);
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.txt");

    let err = FixtureProvider::load(&path).unwrap_err();
    assert!(matches!(err, FixtureError::Read { .. }));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn test_resolve_reports_fixture_spelling() {
    let fixture = FixtureProvider::parse("Newtonsoft.Json: System.Memory\n").unwrap();

    let resolved = fixture.resolve("NEWTONSOFT.JSON", "1.0").unwrap();
    assert_eq!(resolved.canonical.as_deref(), Some("Newtonsoft.Json"));
    assert_eq!(
        resolved.dependencies,
        vec![Dependency::unversioned("System.Memory")]
    );

    // Undeclared packages are leaves without a spelling of their own
    assert_eq!(fixture.resolve("System.Memory", "1.0").unwrap(), Resolved::default());
}
