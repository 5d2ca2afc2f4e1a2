//! Apply command - Add the managed flags and agent line

use anyhow::{bail, Context, Result};

use super::utils::{self, OutputFormat};
use vmoptions_helper::vmoptions;

/// Execute the apply command
pub fn execute(
    install_dir: &str,
    config_path: &str,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let install_dir = utils::expand_tilde(install_dir);

    let report = vmoptions::apply(&install_dir, config_path, dry_run)
        .with_context(|| format!("Failed to apply to {}", install_dir.display()))?;

    match format {
        OutputFormat::Json => utils::print_json(&report)?,
        OutputFormat::Text => utils::print_change_report(&report),
    }

    if !report.is_success() {
        bail!("No option file in {} could be updated", install_dir.display());
    }

    Ok(())
}
