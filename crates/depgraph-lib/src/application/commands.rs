//! Command execution handlers
//!
//! Each stage renders its report into a writer so the same handlers serve
//! the one-shot CLI, the interactive menu and the tests.

use super::project::ProjectConfig;
use super::session::CommandSession;
use super::{CliConfig, Commands};
use crate::diagram::{layout, render_mermaid, render_svg};
use crate::display::Display;
use crate::graph::{DependencyGraph, LoadOrder, LookupFailure};
use crate::primitives::SourceMode;
use crate::provider::{Dependency, DependencyProvider};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Execute CLI commands
pub fn execute_command(config: CliConfig) -> Result<()> {
    let Some(command) = config.command else {
        if !config.ci && Display::is_interactive() {
            let session = CommandSession::open(config.app_config)?;
            return run_menu(&session);
        }

        let status = Display::status();
        status.emphasis("depgraph - package dependency graph explorer");
        status.subtle("Run 'depgraph --help' for usage information");
        return Ok(());
    };

    let session = CommandSession::open(config.app_config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_with_session(&command, &session, &mut out)
}

/// Execute a specific command with a provided session (for testing)
pub fn execute_command_with_session(
    command: &Commands,
    session: &CommandSession,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Config => handle_config(session, out),
        Commands::Direct => handle_direct(session, out),
        Commands::Graph => handle_graph(session, out),
        Commands::Order { json } => handle_order(session, *json, out),
        Commands::Visualize { output } => handle_visualize(session, output.as_deref(), out),
    }
}

/// Interactive stage menu, loops until the user picks "Exit" or backs out
pub fn run_menu(session: &CommandSession) -> Result<()> {
    let stages = Commands::stages();
    let mut labels: Vec<&str> = stages.iter().map(Commands::label).collect();
    labels.push("Exit");

    let prompt = Display::prompt();
    loop {
        let choice = prompt
            .select("Choose a stage")
            .options(&labels)
            .default(0)
            .interact_opt()?;
        let Some(command) = choice.and_then(|index| stages.get(index)) else {
            break;
        };

        let status = Display::status();
        if command.requires_graph() {
            status.info("Building dependency graph");
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        match execute_command_with_session(command, session, &mut out) {
            Ok(()) => status.success(command.label(), ""),
            Err(error) => status.error("Stage failed", &format!("{error:#}")),
        }
        writeln!(out)?;
    }

    Ok(())
}

fn handle_config(session: &CommandSession, out: &mut dyn Write) -> Result<()> {
    write_config_report(out, session.project())?;
    Ok(())
}

fn handle_direct(session: &CommandSession, out: &mut dyn Write) -> Result<()> {
    let project = session.project();
    if project.test_mode != SourceMode::Real {
        bail!(
            "The direct stage needs the real registry (test_mode: real), current mode is '{}'",
            project.test_mode.as_str()
        );
    }

    let registry = session.registry()?;
    let dependencies = registry
        .lookup(&project.package_name, &project.version)
        .with_context(|| {
            format!(
                "Failed to resolve direct dependencies of {} {}",
                project.package_name, project.version
            )
        })?;

    info!(stage = "direct", count = dependencies.len(), "Stage complete");
    write_direct_report(out, &dependencies)?;
    Ok(())
}

fn handle_graph(session: &CommandSession, out: &mut dyn Write) -> Result<()> {
    let outcome = session.build_graph()?;

    write_graph_report(out, &outcome.graph)?;
    report_failures(&outcome.failures);
    Ok(())
}

fn handle_order(session: &CommandSession, json: bool, out: &mut dyn Write) -> Result<()> {
    let outcome = session.build_graph()?;
    let order = outcome.graph.load_order();
    info!(
        stage = "order",
        ordered = order.order.len(),
        cyclic = order.cyclic.len(),
        "Stage complete"
    );

    if json {
        // Failures are still logged; stdout stays a single JSON document
        write_order_json(out, &outcome.graph, &order)?;
    } else {
        write_order_report(out, &order)?;
        report_failures(&outcome.failures);
    }
    Ok(())
}

fn handle_visualize(
    session: &CommandSession,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let project = session.project();
    let outcome = session.build_graph()?;
    let graph = &outcome.graph;

    writeln!(out, "Mermaid diagram:")?;
    writeln!(out, "{}", render_mermaid(graph))?;

    let placed = layout(graph, &outcome.root);
    let svg = render_svg(graph, &placed)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => session.resolve(&project.graph_image_file),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, svg).with_context(|| format!("Failed to write SVG file {}", path.display()))?;

    info!(stage = "visualize", path = %path.display(), nodes = placed.len(), "Stage complete");
    writeln!(out, "SVG file: {}", path.display())?;
    report_failures(&outcome.failures);
    Ok(())
}

fn report_failures(failures: &[LookupFailure]) {
    if failures.is_empty() {
        return;
    }

    let lines: Vec<String> = failures
        .iter()
        .map(|failure| format!("{} {}: {}", failure.node, failure.version, failure.error))
        .collect();
    let items: Vec<&str> = lines.iter().map(String::as_str).collect();

    let status = Display::status();
    status.warning(&format!(
        "{} package(s) recorded without dependencies",
        failures.len()
    ));
    status.list(&items);
}

/// `Configuration:` followed by `\tkey = value` lines
pub fn write_config_report(out: &mut dyn Write, project: &ProjectConfig) -> io::Result<()> {
    writeln!(out, "Configuration:")?;
    for (key, value) in project.entries() {
        writeln!(out, "\t{key} = {value}")?;
    }
    Ok(())
}

/// `Direct dependencies:` followed by `\tid version` lines
pub fn write_direct_report(out: &mut dyn Write, dependencies: &[Dependency]) -> io::Result<()> {
    writeln!(out, "Direct dependencies:")?;
    if dependencies.is_empty() {
        writeln!(out, "\t(no direct dependencies)")?;
    }
    for dep in dependencies {
        let line = format!("\t{} {}", dep.id, dep.version.as_deref().unwrap_or_default());
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// `Dependency graph:` followed by one `\tnode: deps` line per visited node
pub fn write_graph_report(out: &mut dyn Write, graph: &DependencyGraph) -> io::Result<()> {
    writeln!(out, "Dependency graph:")?;
    for (node, deps) in graph.entries() {
        if deps.is_empty() {
            writeln!(out, "\t{node}: (no dependencies)")?;
        } else {
            writeln!(out, "\t{node}: {}", deps.join(", "))?;
        }
    }
    Ok(())
}

/// `Load order:` followed by the order and, if any, the cyclic remainder
pub fn write_order_report(out: &mut dyn Write, order: &LoadOrder) -> io::Result<()> {
    writeln!(out, "Load order:")?;
    for node in &order.order {
        writeln!(out, "\t{node}")?;
    }
    if !order.is_acyclic() {
        let cyclic: Vec<&str> = order.cyclic.iter().map(String::as_str).collect();
        writeln!(out, "\t(cycle detected: {})", cyclic.join(", "))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct OrderDocument<'a> {
    order: &'a [String],
    cyclic: &'a BTreeSet<String>,
    cycles: Vec<Vec<String>>,
}

/// Load order, cyclic remainder and the cycles themselves as pretty JSON
pub fn write_order_json(
    out: &mut dyn Write,
    graph: &DependencyGraph,
    order: &LoadOrder,
) -> Result<()> {
    let document = OrderDocument {
        order: &order.order,
        cyclic: &order.cyclic,
        cycles: graph.cycles(),
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
