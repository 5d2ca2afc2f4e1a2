//! Apply, clear and status over every option file in an install directory
//!
//! Files are processed one after another and independently: a failure on one
//! file is recorded in the report and the next file is still attempted. Only
//! failures that stop discovery itself are returned as `Err`.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::rewrite::{self, WriteMethod};
use super::rules::{self, RuleSet};
use super::transform::{self, LineEnding};
use super::{locator, permission};
use crate::config;
use crate::error::PatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Apply,
    Clear,
    Status,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply => write!(f, "apply"),
            Self::Clear => write!(f, "clear"),
            Self::Status => write!(f, "status"),
        }
    }
}

/// What apply or clear did (or would do, in a dry run) to one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileChange {
    /// Deleted lines, trimmed
    pub removed: Vec<String>,
    /// Appended lines
    pub added: Vec<String>,
    /// Whether the new content differs from the old
    pub changed: bool,
    /// `None` when nothing was written
    pub write: Option<WriteMethod>,
}

/// Read-only inspection of one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileScan {
    /// Managed add-opens lines present
    pub managed: Vec<String>,
    /// Configuration directory of this tool's agent line, if any
    pub agent_config_path: Option<String>,
    /// Agent lines of other agents (apply removes these too)
    pub foreign_agents: Vec<String>,
    pub writable: bool,
}

impl FileScan {
    /// Both managed lines and the agent line are present
    pub fn is_applied(&self) -> bool {
        config::managed_lines()
            .iter()
            .all(|line| self.managed.iter().any(|m| m == line))
            && self.agent_config_path.is_some()
    }
}

/// Outcome for a single file
#[derive(Debug)]
pub struct FileReport<T> {
    pub path: PathBuf,
    pub result: Result<T, PatchError>,
}

impl<T: Serialize> Serialize for FileReport<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileReport", 5)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("ok", &self.result.is_ok())?;
        match &self.result {
            Ok(value) => {
                state.serialize_field("value", value)?;
                state.skip_field("error")?;
                state.skip_field("error_kind")?;
            }
            Err(e) => {
                state.skip_field("value")?;
                state.serialize_field("error", &e.to_string())?;
                state.serialize_field("error_kind", &e.kind())?;
            }
        }
        state.end()
    }
}

/// Per-file outcomes of one invocation
#[derive(Debug, Serialize)]
pub struct BatchReport<T> {
    pub operation: Operation,
    pub install_dir: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport<T>>,
}

impl<T> BatchReport<T> {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    /// At least one file was handled
    pub fn is_success(&self) -> bool {
        self.succeeded() > 0
    }

    pub fn errors(&self) -> impl Iterator<Item = (&Path, &PatchError)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|e| (f.path.as_path(), e)))
    }
}

impl BatchReport<FileChange> {
    pub fn lines_removed(&self) -> usize {
        self.changes().map(|c| c.removed.len()).sum()
    }

    pub fn files_changed(&self) -> usize {
        self.changes().filter(|c| c.changed).count()
    }

    fn changes(&self) -> impl Iterator<Item = &FileChange> {
        self.files.iter().filter_map(|f| f.result.as_ref().ok())
    }
}

/// Strip earlier managed and agent lines from every option file in
/// `install_dir`, then append the managed block for `config_path`
pub fn apply(
    install_dir: &Path,
    config_path: &str,
    dry_run: bool,
) -> Result<BatchReport<FileChange>, PatchError> {
    let block = config::managed_block(config_path);
    run(install_dir, Operation::Apply, dry_run, |path| {
        patch_file(path, RuleSet::APPLY, Some(block.as_slice()), dry_run)
    })
}

/// Remove only the lines this tool writes from every option file in `install_dir`
pub fn clear(install_dir: &Path, dry_run: bool) -> Result<BatchReport<FileChange>, PatchError> {
    run(install_dir, Operation::Clear, dry_run, |path| {
        patch_file(path, RuleSet::CLEAR, None, dry_run)
    })
}

/// Inspect every option file in `install_dir` without modifying anything
pub fn status(install_dir: &Path) -> Result<BatchReport<FileScan>, PatchError> {
    run(install_dir, Operation::Status, true, scan_file)
}

/// Apply to a single file
pub fn apply_file(path: &Path, config_path: &str, dry_run: bool) -> Result<FileChange, PatchError> {
    let block = config::managed_block(config_path);
    patch_file(path, RuleSet::APPLY, Some(block.as_slice()), dry_run)
}

/// Clear a single file
pub fn clear_file(path: &Path, dry_run: bool) -> Result<FileChange, PatchError> {
    patch_file(path, RuleSet::CLEAR, None, dry_run)
}

fn run<T, F>(
    install_dir: &Path,
    operation: Operation,
    dry_run: bool,
    mut per_file: F,
) -> Result<BatchReport<T>, PatchError>
where
    F: FnMut(&Path) -> Result<T, PatchError>,
{
    let paths = locator::find_vmoptions_files(install_dir)?;
    if paths.is_empty() {
        return Err(PatchError::NotFound {
            path: install_dir.to_path_buf(),
        });
    }

    let files: Vec<FileReport<T>> = paths
        .into_iter()
        .map(|path| {
            let result = per_file(&path);
            if let Err(e) = &result {
                tracing::warn!(file = %path.display(), error = %e, "{operation} failed");
            }
            FileReport { path, result }
        })
        .collect();

    let report = BatchReport {
        operation,
        install_dir: install_dir.to_path_buf(),
        dry_run,
        files,
    };

    tracing::info!(
        %operation,
        dir = %install_dir.display(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        dry_run,
        "finished"
    );

    Ok(report)
}

fn read_text(path: &Path) -> Result<String, PatchError> {
    fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn patch_file(
    path: &Path,
    rules: RuleSet,
    block: Option<&[String]>,
    dry_run: bool,
) -> Result<FileChange, PatchError> {
    permission::check_file_read_write(path)?;

    let original = read_text(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut removed = Vec::new();
    let kept = transform::retain_lines(&original, |line| {
        let delete = rules.should_delete(line);
        if delete {
            let trimmed = line.trim();
            tracing::debug!(file = %file_name, line = trimmed, "removing line");
            removed.push(trimmed.to_string());
        }
        delete
    });

    let (content, added) = match block {
        Some(block) => {
            for line in block {
                tracing::debug!(file = %file_name, line = %line, "adding line");
            }
            let ending = LineEnding::detect(&original);
            (transform::append_block(&kept, block, ending), block.to_vec())
        }
        None => (kept.join("\n"), Vec::new()),
    };

    let changed = content != original;
    let write = if changed && !dry_run {
        let method = rewrite::write_preserving_permissions(path, &content)?;
        tracing::debug!(file = %file_name, ?method, "updated file");
        Some(method)
    } else {
        None
    };

    Ok(FileChange {
        removed,
        added,
        changed,
        write,
    })
}

fn scan_file(path: &Path) -> Result<FileScan, PatchError> {
    permission::check_file_readable(path)?;
    let text = read_text(path)?;

    let mut scan = FileScan {
        writable: permission::check_file_writable(path).is_ok(),
        ..FileScan::default()
    };

    for line in text.lines() {
        let trimmed = line.trim();
        if config::is_managed_line(trimmed) {
            scan.managed.push(trimmed.to_string());
        } else if let Some(dir) = rules::agent_config_path(trimmed) {
            scan.agent_config_path = Some(dir);
        } else if trimmed.starts_with(config::JAVAAGENT_PREFIX) {
            scan.foreign_agents.push(trimmed.to_string());
        }
    }

    Ok(scan)
}
