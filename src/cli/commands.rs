//! Command dispatch: settings → services → terminal output

use std::io::Write;
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::services::{DiagramReport, DiagramRequest};
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::{display_relative, expand_path};

/// Execute the CLI invocation.
///
/// `--completions` is handled in `main` before logging is set up.
#[instrument(skip(cli))]
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = resolve_settings(cli)?;

    if cli.print_config {
        return print_stdout(&settings.to_toml()?);
    }

    let container = ServiceContainer::new(settings);
    let request = request_from(&container.settings);
    debug!("request: {:?}", request);

    if same_file(&request.input, &request.output) {
        return Err(CliError::InvalidArgs(format!(
            "output would overwrite the outline: {}",
            request.output.display()
        )));
    }

    if cli.show_tree {
        let outline = container.diagram.load_outline(&request.input)?;
        output::header(&format!("{} ({} nodes)", request.input.display(), outline.node_count()));
        print_stdout(&outline.to_tree().to_string())?;
    }

    let report = container.diagram.generate(&request)?;
    report_success(&report);
    Ok(())
}

/// Layer CLI flags on top of the loaded config.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    if let Some(input) = &cli.input {
        settings.input = expand_path(input);
    }
    if let Some(output) = &cli.output {
        settings.output = expand_path(output);
    }
    if let Some(dpi) = cli.dpi {
        settings.dpi = dpi;
    }
    if let Some(layout) = cli.layout {
        settings.layout = layout.into();
    }

    settings.validate()?;
    Ok(settings)
}

fn request_from(settings: &Settings) -> DiagramRequest {
    DiagramRequest {
        input: settings.input.clone(),
        output: settings.output.clone(),
        dpi: settings.dpi,
        layout: settings.layout,
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn print_stdout(text: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text.trim_end()).map_err(|e| InfraError::io("write stdout", e))?;
    Ok(())
}

fn report_success(report: &DiagramReport) {
    let shown = std::env::current_dir()
        .map(|cwd| display_relative(&report.output, &cwd))
        .unwrap_or_else(|_| report.output.display().to_string());
    output::success(&format!("Diagram exported to {shown}"));
    output::detail(&format!(
        "{} nodes, {} edges, {:.0}x{:.0}px, {} bytes",
        report.node_count, report.edge_count, report.width, report.height, report.bytes
    ));
}
