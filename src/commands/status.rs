//! Status command - Show what each option file currently contains

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

use super::utils::{self, OutputFormat};
use vmoptions_helper::config;
use vmoptions_helper::vmoptions::{self, BatchReport, FileScan};

/// Execute the status command
pub fn execute(install_dir: &str, format: OutputFormat) -> Result<()> {
    let install_dir = utils::expand_tilde(install_dir);

    let report = vmoptions::status(&install_dir)
        .with_context(|| format!("Failed to inspect {}", install_dir.display()))?;

    match format {
        OutputFormat::Json => utils::print_json(&report)?,
        OutputFormat::Text => println!("{}", format_status(&report)),
    }

    for (path, e) in report.errors() {
        eprintln!("{} {}: {}", "Failed:".red(), utils::file_label(path), e);
    }

    let foreign: usize = report
        .files
        .iter()
        .filter_map(|f| f.result.as_ref().ok())
        .map(|scan| scan.foreign_agents.len())
        .sum();
    if foreign > 0 && format == OutputFormat::Text {
        println!(
            "{} {} other -javaagent line(s) found; apply removes these as well.",
            "Note:".yellow(),
            foreign
        );
    }

    if !report.is_success() {
        bail!("No option file in {} could be read", install_dir.display());
    }

    Ok(())
}

/// Render the status report as a table
pub fn format_status(report: &BatchReport<FileScan>) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("File"),
        Cell::new("Applied"),
        Cell::new("Managed"),
        Cell::new("Agent config"),
        Cell::new("Writable"),
    ]);

    let total = config::managed_lines().len();
    for file in &report.files {
        let label = utils::file_label(&file.path);
        let Ok(scan) = &file.result else {
            table.add_row(vec![
                Cell::new(label),
                Cell::new("error").fg(Color::Red),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
            continue;
        };

        let applied = if scan.is_applied() {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no")
        };

        table.add_row(vec![
            Cell::new(label),
            applied,
            Cell::new(format!("{}/{}", scan.managed.len(), total)),
            Cell::new(scan.agent_config_path.as_deref().unwrap_or("-")),
            Cell::new(if scan.writable { "yes" } else { "no" }),
        ]);
    }

    table.to_string()
}
