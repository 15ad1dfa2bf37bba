// Tests for the stage handlers, run against fixture and mock registry sessions

use super::*;
use crate::application::AppConfig;
use crate::primitives::FailurePolicy;
use mockito::Server;
use std::io::Cursor;
use tempfile::TempDir;

const SAMPLE: &str = "App: Lib1 Lib2\nLib1: Core\nLib2: Core\nCore:\n";

fn project_yaml(repo: &str, mode: &str) -> String {
    format!(
        "package_name: App\nrepo: {repo}\ntest_mode: {mode}\nversion: 1.0.0\ngraph_image_file: graph.svg\n"
    )
}

fn fixture_session(fixture: &str) -> (TempDir, CommandSession) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("deps.txt"), fixture).unwrap();

    let project = ProjectConfig::from_yaml(&project_yaml("deps.txt", "test")).unwrap();
    let session = CommandSession::new(AppConfig::default(), project, dir.path().to_path_buf());
    (dir, session)
}

fn registry_session(server: &Server, policy: FailurePolicy) -> CommandSession {
    let project = ProjectConfig::from_yaml(&project_yaml(&server.url(), "real"))
        .unwrap()
        .with_overrides(None, Some(policy));
    CommandSession::new(AppConfig::default(), project, std::path::PathBuf::new())
}

fn run(command: Commands, session: &CommandSession) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_session(&command, session, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn nupkg(nuspec: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("package.nuspec", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(nuspec.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn nuspec(id: &str, deps: &[(&str, &str)]) -> String {
    let deps: String = deps
        .iter()
        .map(|(dep, version)| format!(r#"<dependency id="{dep}" version="{version}" />"#))
        .collect();
    format!(
        "<package><metadata><id>{id}</id><version>1.0.0</version>\
         <dependencies>{deps}</dependencies></metadata></package>"
    )
}

#[test]
fn test_config_stage() {
    let (_dir, session) = fixture_session(SAMPLE);
    let output = run(Commands::Config, &session).unwrap();

    assert_eq!(
        output,
        "Configuration:\n\
         \tpackage_name = App\n\
         \trepo = deps.txt\n\
         \ttest_mode = test\n\
         \tversion = 1.0.0\n\
         \tgraph_image_file = graph.svg\n\
         \ttraversal = depth-first\n\
         \ton_lookup_failure = warn\n"
    );
}

#[test]
fn test_graph_stage_sample() {
    let (_dir, session) = fixture_session(SAMPLE);
    let output = run(Commands::Graph, &session).unwrap();

    assert_eq!(
        output,
        "Dependency graph:\n\
         \tApp: Lib1, Lib2\n\
         \tCore: (no dependencies)\n\
         \tLib1: Core\n\
         \tLib2: Core\n"
    );
}

#[test]
fn test_order_stage_sample() {
    let (_dir, session) = fixture_session(SAMPLE);
    let output = run(Commands::Order { json: false }, &session).unwrap();

    assert_eq!(output, "Load order:\n\tCore\n\tLib1\n\tLib2\n\tApp\n");
}

#[test]
fn test_order_stage_reports_cycle() {
    let (_dir, session) = fixture_session("App: A\nA: B\nB: A\n");
    let output = run(Commands::Order { json: false }, &session).unwrap();

    // App depends on the cycle, so nothing can be ordered
    assert_eq!(output, "Load order:\n\t(cycle detected: A, App, B)\n");
}

#[test]
fn test_order_stage_json() {
    let (_dir, session) = fixture_session("App: A Core\nA: B\nB: A\nCore:\n");
    let output = run(Commands::Order { json: true }, &session).unwrap();

    let document: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(document["order"], serde_json::json!(["Core"]));
    assert_eq!(document["cyclic"], serde_json::json!(["A", "App", "B"]));
    assert_eq!(document["cycles"], serde_json::json!([["A", "B"]]));
}

#[test]
fn test_visualize_stage_writes_svg_next_to_config() {
    let (dir, session) = fixture_session(SAMPLE);
    let output = run(Commands::Visualize { output: None }, &session).unwrap();

    let svg_path = dir.path().join("graph.svg");
    assert!(output.starts_with("Mermaid diagram:\ngraph TD\n"));
    assert!(output.contains("\tApp --> Lib1\n"));
    assert!(output.ends_with(&format!("SVG file: {}\n", svg_path.display())));

    let svg = fs::read_to_string(&svg_path).unwrap();
    assert_eq!(svg.matches("<circle").count(), 4);
    assert_eq!(svg.matches("<line").count(), 4);
}

#[test]
fn test_visualize_stage_output_override() {
    let (dir, session) = fixture_session("App: A\nA: App\n");
    let target = dir.path().join("out").join("diagram.svg");

    run(
        Commands::Visualize {
            output: Some(target.clone()),
        },
        &session,
    )
    .unwrap();

    let svg = fs::read_to_string(&target).unwrap();
    assert_eq!(svg.matches("<line").count(), 2);
    assert!(!dir.path().join("graph.svg").exists());
}

#[test]
fn test_direct_stage_requires_real_mode() {
    let (_dir, session) = fixture_session(SAMPLE);
    let err = run(Commands::Direct, &session).unwrap_err();

    assert!(err.to_string().contains("real registry"));
}

#[test]
fn test_missing_fixture_file() {
    let dir = TempDir::new().unwrap();
    let project = ProjectConfig::from_yaml(&project_yaml("absent.txt", "test")).unwrap();
    let session = CommandSession::new(AppConfig::default(), project, dir.path().to_path_buf());

    let err = run(Commands::Graph, &session).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load fixture"));
}

#[test]
fn test_direct_stage_against_registry() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/app/1.0.0/app.1.0.0.nupkg")
        .with_status(200)
        .with_body(nupkg(&nuspec("App", &[("Lib1", "[2.0.0, )"), ("Lib2", "")])))
        .create();

    let session = registry_session(&server, FailurePolicy::Lenient);
    let output = run(Commands::Direct, &session).unwrap();

    assert_eq!(output, "Direct dependencies:\n\tLib1 2.0.0\n\tLib2\n");
}

#[test]
fn test_lenient_registry_graph_records_failed_node() {
    let mut server = Server::new();
    let _app = server
        .mock("GET", "/app/1.0.0/app.1.0.0.nupkg")
        .with_status(200)
        .with_body(nupkg(&nuspec("App", &[("Lib1", "2.0.0"), ("Gone", "1.0.0")])))
        .create();
    let _lib = server
        .mock("GET", "/lib1/2.0.0/lib1.2.0.0.nupkg")
        .with_status(200)
        .with_body(nupkg(&nuspec("Lib1", &[])))
        .create();
    let _gone = server
        .mock("GET", "/gone/1.0.0/gone.1.0.0.nupkg")
        .with_status(404)
        .create();

    let session = registry_session(&server, FailurePolicy::Lenient);
    let output = run(Commands::Graph, &session).unwrap();

    assert_eq!(
        output,
        "Dependency graph:\n\
         \tApp: Lib1, Gone\n\
         \tGone: (no dependencies)\n\
         \tLib1: (no dependencies)\n"
    );
}

#[test]
fn test_strict_registry_graph_fails() {
    let mut server = Server::new();
    let _app = server
        .mock("GET", "/app/1.0.0/app.1.0.0.nupkg")
        .with_status(200)
        .with_body(nupkg(&nuspec("App", &[("Gone", "1.0.0")])))
        .create();
    let _gone = server
        .mock("GET", "/gone/1.0.0/gone.1.0.0.nupkg")
        .with_status(404)
        .create();

    let session = registry_session(&server, FailurePolicy::Strict);
    let err = run(Commands::Graph, &session).unwrap_err();

    assert!(format!("{err:#}").contains("Gone"));
}

#[test]
fn test_direct_report_without_dependencies() {
    let mut out = Vec::new();
    write_direct_report(&mut out, &[]).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Direct dependencies:\n\t(no direct dependencies)\n"
    );
}

#[test]
fn test_visualize_roots_layout_at_fixture_spelling() {
    // The fixture spells the root differently from package_name
    let (dir, session) = fixture_session("app: Lib\nLib:\n");
    run(Commands::Visualize { output: None }, &session).unwrap();

    let svg = fs::read_to_string(dir.path().join("graph.svg")).unwrap();
    assert_eq!(svg.matches("<circle").count(), 2);
    assert!(svg.contains(r#"<circle cx="100" cy="100""#));
    assert!(svg.contains(">app</text>"));
}
