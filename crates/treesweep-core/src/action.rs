use crate::mode::FileMode;
use crate::record::{FileSets, RecordId};
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One atomic filesystem correction.
///
/// Every variant can both mutate the real filesystem (`perform`) and
/// mirror that mutation against the in-memory record sets
/// (`simulate`), so the two stay consistent without rescanning disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Delete {
        id: RecordId,
        path: PathBuf,
    },
    /// A move whose destination shares the parent directory is a
    /// rename; the flag only changes the description.
    Move {
        id: RecordId,
        from: PathBuf,
        to: PathBuf,
        rename: bool,
    },
    Copy {
        id: RecordId,
        from: PathBuf,
        to: PathBuf,
    },
    Chmod {
        id: RecordId,
        path: PathBuf,
        mode: FileMode,
    },
}

impl Action {
    /// Operator-facing one-liner used in prompts and the final plan.
    pub fn describe(&self) -> String {
        match self {
            Action::Delete { path, .. } => format!("delete {}", path.display()),
            Action::Move {
                from, to, rename, ..
            } => {
                if *rename {
                    let name = to
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    format!("rename {} to '{}'", from.display(), name)
                } else {
                    format!("move {} to {}", from.display(), to.display())
                }
            }
            Action::Copy { from, to, .. } => {
                format!("copy {} to {}", from.display(), to.display())
            }
            Action::Chmod { path, mode, .. } => {
                format!("chmod {} to {}", path.display(), mode)
            }
        }
    }

    /// Apply the correction to the real filesystem.
    pub fn perform(&self) -> io::Result<()> {
        match self {
            Action::Delete { path, .. } => fs::remove_file(path),
            Action::Move { from, to, .. } => {
                prepare_destination(to)?;
                // rename does not cross devices; fall back to copy+remove
                match fs::rename(from, to) {
                    Ok(()) => Ok(()),
                    Err(_) => {
                        fs::copy(from, to)?;
                        fs::remove_file(from)
                    }
                }
            }
            Action::Copy { from, to, .. } => {
                prepare_destination(to)?;
                fs::copy(from, to).map(|_| ())
            }
            Action::Chmod { path, mode, .. } => {
                fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
            }
        }
    }

    /// Mirror the correction against the in-memory sets.
    ///
    /// Delete drops the record from whichever set holds it. Move and
    /// Copy update the record's path (and its source root when the
    /// destination lands under the internal root) and re-file it
    /// between the sets iff the destination crosses the internal-root
    /// boundary. Chmod updates the permission bits.
    pub fn simulate(&self, sets: &mut FileSets) {
        match self {
            Action::Delete { id, .. } => {
                if sets.remove(*id).is_none() {
                    warn!("Simulated delete of unknown record {:?}", id);
                }
            }
            Action::Move { id, to, .. } | Action::Copy { id, to, .. } => {
                let Some(mut record) = sets.remove(*id) else {
                    warn!("Simulated relocation of unknown record {:?}", id);
                    return;
                };
                record.path = to.clone();
                if to.starts_with(&record.internal_root) {
                    record.source_root = record.internal_root.clone();
                }
                sets.insert(record);
            }
            Action::Chmod { id, mode, .. } => {
                if let Some(record) = sets.internal.get_mut(id) {
                    record.mode = *mode;
                } else if let Some(record) = sets.external.get_mut(id) {
                    record.mode = *mode;
                } else {
                    warn!("Simulated chmod of unknown record {:?}", id);
                }
            }
        }
    }
}

fn prepare_destination(to: &Path) -> io::Result<()> {
    if to.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("destination {} already exists", to.display()),
        ));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
