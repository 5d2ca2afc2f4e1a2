//! Shared utilities for commands

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use vmoptions_helper::error::{ErrorKind, PatchError};
use vmoptions_helper::vmoptions::{BatchReport, FileChange};

/// Output format for command reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(path),
    }
}

/// File name for display, falling back to the full path
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

/// What the user can do about a failure
pub fn remedy(err: &PatchError) -> &'static str {
    match err.kind() {
        ErrorKind::Permission => "fix the OS permissions and retry",
        ErrorKind::NotFound => "verify the install directory (usually the IDE's bin folder)",
        ErrorKind::Io => "check the disk and the file itself",
    }
}

/// Print per-file results of apply or clear
pub fn print_change_report(report: &BatchReport<FileChange>) {
    println!("Directory: {}", report.install_dir.display());
    println!();

    for file in &report.files {
        let label = file_label(&file.path);
        match &file.result {
            Ok(change) if !change.changed => {
                println!("{} {}", "Unchanged:".dimmed(), label);
            }
            Ok(change) => {
                let status = if report.dry_run {
                    "Would update:".blue().to_string()
                } else {
                    "Updated:".green().to_string()
                };
                println!("{} {}", status, label);
                for line in &change.removed {
                    println!("  {} {}", "-".red(), line);
                }
                for line in &change.added {
                    println!("  {} {}", "+".green(), line);
                }
            }
            Err(e) => {
                eprintln!("{} {}: {}", "Failed:".red(), label, e);
                eprintln!("  {}", remedy(e).yellow());
            }
        }
    }

    println!(
        "\n{} file(s) changed, {} line(s) removed, {} failed",
        report.files_changed().to_string().green(),
        report.lines_removed(),
        if report.failed() > 0 {
            report.failed().to_string().red().to_string()
        } else {
            "0".to_string()
        }
    );

    if report.dry_run {
        println!("{}", "(DRY-RUN) No changes made.".blue());
    }
}
