//! E2E tests for the depgraph binary
//!
//! Each test writes a config.yaml and a fixture into a temporary directory
//! and runs the real binary there, checking stdout, stderr and exit codes.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = "App: Lib1 Lib2\nLib1: Core\nLib2: Core\nCore:\n";

/// Write a test-mode project reading `deps.txt`
fn write_project(dir: &Path, fixture: &str) -> Result<()> {
    let config = "\
package_name: App
repo: deps.txt
test_mode: test
version: 1.0.0
graph_image_file: graph.svg
";
    std::fs::write(dir.join("config.yaml"), config)?;
    std::fs::write(dir.join("deps.txt"), fixture)?;
    Ok(())
}

/// Binary running in `dir` with a plain, non-interactive environment
fn depgraph(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_depgraph"));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env("CI", "true")
        .env_remove("FORCE_COLOR")
        .env_remove("DEPGRAPH_CONFIG")
        .env_remove("DEPGRAPH_LOG_LEVEL")
        .env_remove("DEPGRAPH_TRAVERSAL")
        .env_remove("DEPGRAPH_ON_LOOKUP_FAILURE");
    cmd
}

#[test]
fn e2e_config_prints_every_key() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_project(temp_dir.path(), SAMPLE)?;

    depgraph(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Configuration:\n"))
        .stdout(predicate::str::contains("\tpackage_name = App\n"))
        .stdout(predicate::str::contains("\ttest_mode = test\n"));
    Ok(())
}

#[test]
fn e2e_graph_lists_every_visited_node() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_project(temp_dir.path(), SAMPLE)?;

    depgraph(temp_dir.path())
        .arg("graph")
        .assert()
        .success()
        .stdout(
            "Dependency graph:\n\
             \tApp: Lib1, Lib2\n\
             \tCore: (no dependencies)\n\
             \tLib1: Core\n\
             \tLib2: Core\n",
        );
    Ok(())
}

#[test]
fn e2e_order_with_breadth_first_override() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_project(temp_dir.path(), SAMPLE)?;

    depgraph(temp_dir.path())
        .args(["--traversal", "breadth-first", "order"])
        .assert()
        .success()
        .stdout("Load order:\n\tCore\n\tLib1\n\tLib2\n\tApp\n");
    Ok(())
}

#[test]
fn e2e_order_json_is_a_single_document() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_project(temp_dir.path(), "App: A\nA: B\nB: A\n")?;

    let output = depgraph(temp_dir.path())
        .args(["order", "--json"])
        .output()?;
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(document["order"], serde_json::json!([]));
    assert_eq!(document["cyclic"], serde_json::json!(["A", "App", "B"]));
    Ok(())
}

#[test]
fn e2e_visualize_writes_svg_next_to_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_project(temp_dir.path(), SAMPLE)?;

    depgraph(temp_dir.path())
        .arg("visualize")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Mermaid diagram:\ngraph TD\n"))
        .stdout(predicate::str::contains("SVG file: "));

    let svg = std::fs::read_to_string(temp_dir.path().join("graph.svg"))?;
    assert_eq!(svg.matches("<circle").count(), 4);
    Ok(())
}

#[test]
fn e2e_config_flag_points_elsewhere() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let project_dir = temp_dir.path().join("project");
    std::fs::create_dir_all(&project_dir)?;
    write_project(&project_dir, SAMPLE)?;

    // Fixture path resolves against the config file, not the working directory
    depgraph(temp_dir.path())
        .args(["--config", "project/config.yaml", "graph"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\tApp: Lib1, Lib2\n"));
    Ok(())
}

#[test]
fn e2e_direct_needs_real_mode() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_project(temp_dir.path(), SAMPLE)?;

    depgraph(temp_dir.path())
        .arg("direct")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("real registry"));
    Ok(())
}

#[test]
fn e2e_invalid_config_reports_all_problems() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("config.yaml"),
        "package_name: App\ntest_mode: staging\n",
    )?;

    depgraph(temp_dir.path())
        .arg("graph")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("repo: missing"))
        .stderr(predicate::str::contains("test_mode: expected 'real' or 'test'"))
        .stderr(predicate::str::contains("graph_image_file: missing"));
    Ok(())
}

#[test]
fn e2e_missing_config_file_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;

    depgraph(temp_dir.path())
        .arg("config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config.yaml"));
    Ok(())
}

#[test]
fn e2e_no_command_prints_help_hint() -> Result<()> {
    let temp_dir = TempDir::new()?;

    depgraph(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("depgraph --help"));
    Ok(())
}

#[test]
fn e2e_unknown_stage_is_a_usage_error() -> Result<()> {
    let temp_dir = TempDir::new()?;

    depgraph(temp_dir.path())
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
    Ok(())
}
