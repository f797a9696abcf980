use crate::action::Action;
use crate::mode::FileMode;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::PathBuf;

/// The seven anomaly kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    EmptyFile,
    TemporaryFile,
    UnsafeChars,
    SameContents,
    SameFileNames,
    MissingFile,
    IncorrectMode,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::EmptyFile => "empty file",
            IssueKind::TemporaryFile => "temporary file",
            IssueKind::UnsafeChars => "unsafe characters",
            IssueKind::SameContents => "same contents",
            IssueKind::SameFileNames => "same file names",
            IssueKind::MissingFile => "missing file",
            IssueKind::IncorrectMode => "incorrect mode",
        }
    }
}

/// A detected anomaly together with its corrective actions.
///
/// Fixes are computed at construction, so the confirmation prompt can
/// describe the exact outcome before the operator decides.
#[derive(Debug, Clone)]
pub enum Issue {
    EmptyFile {
        path: PathBuf,
        fix: Vec<Action>,
    },
    TemporaryFile {
        path: PathBuf,
        fix: Vec<Action>,
    },
    UnsafeChars {
        path: PathBuf,
        sanitized: PathBuf,
        fix: Vec<Action>,
    },
    SameContents {
        best: PathBuf,
        best_modified: DateTime<Utc>,
        duplicates: Vec<PathBuf>,
        fix: Vec<Action>,
    },
    SameFileNames {
        best: PathBuf,
        best_modified: DateTime<Utc>,
        duplicates: Vec<PathBuf>,
        fix: Vec<Action>,
    },
    MissingFile {
        path: PathBuf,
        destination: PathBuf,
        fix: Vec<Action>,
    },
    IncorrectMode {
        path: PathBuf,
        current: FileMode,
        wanted: FileMode,
        fix: Vec<Action>,
    },
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::EmptyFile { .. } => IssueKind::EmptyFile,
            Issue::TemporaryFile { .. } => IssueKind::TemporaryFile,
            Issue::UnsafeChars { .. } => IssueKind::UnsafeChars,
            Issue::SameContents { .. } => IssueKind::SameContents,
            Issue::SameFileNames { .. } => IssueKind::SameFileNames,
            Issue::MissingFile { .. } => IssueKind::MissingFile,
            Issue::IncorrectMode { .. } => IssueKind::IncorrectMode,
        }
    }

    pub fn actions(&self) -> &[Action] {
        match self {
            Issue::EmptyFile { fix, .. }
            | Issue::TemporaryFile { fix, .. }
            | Issue::UnsafeChars { fix, .. }
            | Issue::SameContents { fix, .. }
            | Issue::SameFileNames { fix, .. }
            | Issue::MissingFile { fix, .. }
            | Issue::IncorrectMode { fix, .. } => fix,
        }
    }

    /// The operator-facing confirmation prompt: what was found, then
    /// the exact actions a confirmation would queue.
    pub fn prompt(&self) -> String {
        let mut out = self.summary();
        for action in self.actions() {
            let _ = write!(out, "\n    -> {}", action.describe());
        }
        out
    }

    fn summary(&self) -> String {
        match self {
            Issue::EmptyFile { path, .. } => {
                format!("empty file: {}", path.display())
            }
            Issue::TemporaryFile { path, .. } => {
                format!("temporary file: {}", path.display())
            }
            Issue::UnsafeChars { path, sanitized, .. } => {
                format!(
                    "unsafe characters in name: {} (safe name: {})",
                    path.display(),
                    sanitized.display()
                )
            }
            Issue::SameContents {
                best,
                best_modified,
                duplicates,
                ..
            } => {
                let mut out = format!(
                    "{} duplicate(s) of {} (modified {}):",
                    duplicates.len(),
                    best.display(),
                    best_modified.format("%Y-%m-%d %H:%M:%S"),
                );
                for dup in duplicates {
                    let _ = write!(out, "\n    {}", dup.display());
                }
                out
            }
            Issue::SameFileNames {
                best,
                best_modified,
                duplicates,
                ..
            } => {
                let mut out = format!(
                    "{} file(s) named like {} (modified {}):",
                    duplicates.len(),
                    best.display(),
                    best_modified.format("%Y-%m-%d %H:%M:%S"),
                );
                for dup in duplicates {
                    let _ = write!(out, "\n    {}", dup.display());
                }
                out
            }
            Issue::MissingFile { path, destination, .. } => {
                format!(
                    "missing from internal tree: {} (would land at {})",
                    path.display(),
                    destination.display()
                )
            }
            Issue::IncorrectMode {
                path,
                current,
                wanted,
                ..
            } => {
                format!(
                    "incorrect mode {} on {} (expected {})",
                    current,
                    path.display(),
                    wanted
                )
            }
        }
    }
}
