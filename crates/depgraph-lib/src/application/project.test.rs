// Tests for project config parsing and validation

use super::*;
use std::fs;
use tempfile::TempDir;

const VALID: &str = "\
package_name: Newtonsoft.Json
repo: https://api.nuget.org/v3-flatcontainer/
test_mode: real
version: 13.0.3
graph_image_file: graph.svg
";

fn problems_of(yaml: &str) -> Vec<String> {
    match ProjectConfig::from_yaml(yaml) {
        Err(ProjectConfigError::Invalid { problems }) => problems,
        other => panic!("expected validation problems, got {other:?}"),
    }
}

#[test]
fn test_valid_config_with_defaults() {
    let config = ProjectConfig::from_yaml(VALID).unwrap();

    assert_eq!(config.package_name, "Newtonsoft.Json");
    assert_eq!(config.repo, "https://api.nuget.org/v3-flatcontainer/");
    assert_eq!(config.test_mode, SourceMode::Real);
    assert_eq!(config.version, "13.0.3");
    assert_eq!(config.graph_image_file, "graph.svg");
    assert_eq!(config.traversal, TraversalOrder::DepthFirst);
    assert_eq!(config.on_lookup_failure, FailurePolicy::Lenient);
}

#[test]
fn test_test_mode_is_case_insensitive() {
    let yaml = VALID.replace("test_mode: real", "test_mode: \" TEST \"");
    let config = ProjectConfig::from_yaml(&yaml).unwrap();
    assert_eq!(config.test_mode, SourceMode::Test);
}

#[test]
fn test_optional_policy_keys() {
    let yaml = format!("{VALID}traversal: breadth-first\non_lookup_failure: fail\n");
    let config = ProjectConfig::from_yaml(&yaml).unwrap();

    assert_eq!(config.traversal, TraversalOrder::BreadthFirst);
    assert_eq!(config.on_lookup_failure, FailurePolicy::Strict);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let yaml = format!("{VALID}comment: anything\n");
    assert!(ProjectConfig::from_yaml(&yaml).is_ok());
}

#[test]
fn test_all_missing_keys_reported() {
    let problems = problems_of("unrelated: 1\n");

    assert_eq!(
        problems,
        vec![
            "package_name: missing",
            "repo: missing",
            "test_mode: missing",
            "version: missing",
            "graph_image_file: missing",
        ]
    );
}

#[test]
fn test_every_invalid_value_reported() {
    let yaml = "\
package_name: bad name!
repo: \"  \"
test_mode: staging
version: \"-1.0\"
graph_image_file: out/graph.svg
traversal: sideways
on_lookup_failure: explode
";

    let problems = problems_of(yaml);
    assert_eq!(problems.len(), 7);
    assert!(problems[0].starts_with("package_name:"));
    assert_eq!(problems[1], "repo: empty");
    assert_eq!(problems[2], "test_mode: expected 'real' or 'test'");
    assert_eq!(problems[3], "version: invalid format");
    assert!(problems[4].starts_with("graph_image_file:"));
    assert!(problems[5].starts_with("traversal:"));
    assert!(problems[6].starts_with("on_lookup_failure:"));
}

#[test]
fn test_version_formats() {
    assert!(is_version("13.0.3"));
    assert!(is_version("1.0.0-beta+build.5"));
    assert!(is_version("v2"));
    assert!(!is_version(""));
    assert!(!is_version("-1.0"));
    assert!(!is_version("1.0 beta"));
}

#[test]
fn test_graph_image_file_must_be_bare_name() {
    assert!(is_bare_file_name("graph.svg"));
    assert!(!is_bare_file_name("graph"));
    assert!(!is_bare_file_name(".svg"));
    assert!(!is_bare_file_name("out/graph.svg"));
    assert!(!is_bare_file_name("out\\graph.svg"));
}

#[test]
fn test_package_name_characters() {
    assert!(is_package_name("Microsoft.Extensions.Logging"));
    assert!(is_package_name("my_pkg-2"));
    assert!(!is_package_name(""));
    assert!(!is_package_name("pkg/evil"));
    assert!(!is_package_name(" Padded"));
}

#[test]
fn test_empty_document_is_invalid() {
    let problems = problems_of("  \n");
    assert_eq!(problems.len(), 1);
}

#[test]
fn test_non_mapping_root_is_rejected() {
    assert!(ProjectConfig::from_yaml("- just\n- a list\n").is_err());
}

#[test]
fn test_error_message_lists_problems() {
    let err = ProjectConfig::from_yaml("package_name: App\n").unwrap_err();
    let message = err.to_string();

    assert!(message.starts_with("Invalid project config:"));
    assert!(message.contains("\n- repo: missing"));
    assert!(message.contains("\n- graph_image_file: missing"));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, VALID).unwrap();

    let config = ProjectConfig::load(&path).unwrap();
    assert_eq!(config.package_name, "Newtonsoft.Json");
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ProjectConfig::load(&dir.path().join("absent.yaml")).unwrap_err();

    assert!(matches!(err, ProjectConfigError::Read { .. }));
}

#[test]
fn test_overrides_replace_file_policies() {
    let config = ProjectConfig::from_yaml(VALID)
        .unwrap()
        .with_overrides(Some(TraversalOrder::BreadthFirst), None);

    assert_eq!(config.traversal, TraversalOrder::BreadthFirst);
    assert_eq!(config.on_lookup_failure, FailurePolicy::Lenient);
}

#[test]
fn test_entries_in_file_order() {
    let config = ProjectConfig::from_yaml(VALID).unwrap();
    let keys: Vec<_> = config.entries().iter().map(|(k, _)| *k).collect();

    assert_eq!(
        keys,
        [
            "package_name",
            "repo",
            "test_mode",
            "version",
            "graph_image_file",
            "traversal",
            "on_lookup_failure"
        ]
    );
    assert_eq!(config.entries()[2].1, "real");
}
