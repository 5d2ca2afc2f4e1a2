//! Clear command - Remove only the lines this tool added

use anyhow::{bail, Context, Result};

use super::utils::{self, OutputFormat};
use vmoptions_helper::vmoptions;

/// Execute the clear command
pub fn execute(install_dir: &str, dry_run: bool, format: OutputFormat) -> Result<()> {
    let install_dir = utils::expand_tilde(install_dir);

    let report = vmoptions::clear(&install_dir, dry_run)
        .with_context(|| format!("Failed to clear {}", install_dir.display()))?;

    match format {
        OutputFormat::Json => utils::print_json(&report)?,
        OutputFormat::Text => {
            utils::print_change_report(&report);
            if report.is_success() && report.lines_removed() == 0 {
                println!("Nothing to clear.");
            }
        }
    }

    if !report.is_success() {
        bail!("No option file in {} could be cleared", install_dir.display());
    }

    Ok(())
}
