use super::*;
use crate::primitives::FailurePolicy;

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand_is_allowed() {
    let cli = Cli::try_parse_from(["depgraph"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_order_json_flag() {
    let cli = Cli::try_parse_from(["depgraph", "order", "--json"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Order { json: true }));
}

#[test]
fn test_visualize_output_override() {
    let cli = Cli::try_parse_from(["depgraph", "visualize", "-o", "out/graph.svg"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Visualize {
            output: Some(PathBuf::from("out/graph.svg"))
        })
    );
}

#[test]
fn test_global_flags_before_subcommand() {
    let cli =
        Cli::try_parse_from(["depgraph", "--on-lookup-failure", "strict", "graph"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Graph));
    assert_eq!(cli.config.on_lookup_failure, Some(FailurePolicy::Strict));
}

#[test]
fn test_unknown_stage_is_rejected() {
    assert!(Cli::try_parse_from(["depgraph", "stage6"]).is_err());
}

#[test]
fn test_stages_in_pipeline_order() {
    let labels: Vec<_> = Commands::stages().iter().map(Commands::label).collect();
    assert_eq!(labels.len(), 5);
    assert_eq!(labels[0], "Print configuration");
    assert_eq!(labels[4], "Visualize (Mermaid + SVG)");

    let needs_graph: Vec<_> = Commands::stages()
        .iter()
        .map(Commands::requires_graph)
        .collect();
    assert_eq!(needs_graph, [false, false, true, true, true]);
}
