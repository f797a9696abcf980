use crate::mode::FileMode;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Stable record identity, assigned once at scan time.
///
/// Every other field of a [`FileRecord`] may be mutated by action
/// simulation, so set membership is keyed on this and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

/// Monotonic id source for one run. Ids are never reused.
#[derive(Debug, Default)]
pub struct RecordIds(u64);

impl RecordIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> RecordId {
        self.0 += 1;
        RecordId(self.0)
    }
}

/// One scanned regular file.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: RecordId,
    /// Absolute path, updated in place when a move or copy is simulated.
    pub path: PathBuf,
    /// Blake3 content hash, lowercase hex.
    pub fingerprint: String,
    pub modified_at: DateTime<Utc>,
    pub changed_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
    pub mode: FileMode,
    pub size: u64,
    /// The tree root this record was scanned under.
    pub source_root: PathBuf,
    /// The canonical internal root, fixed for the run.
    pub internal_root: PathBuf,
}

impl FileRecord {
    /// Path relative to the owning tree root. Always recomputed;
    /// `path` and `source_root` change under simulation.
    pub fn relative_path(&self) -> &Path {
        self.path.strip_prefix(&self.source_root).unwrap_or(&self.path)
    }

    /// Path-prefix test against the internal root, never a cached flag.
    pub fn is_internal(&self) -> bool {
        self.path.starts_with(&self.internal_root)
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// File suffix without the dot; empty when there is none.
    pub fn suffix(&self) -> &str {
        self.path
            .extension()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// The two live record sets.
///
/// Invariant: between simulate calls, `internal` ∪ `external` reflects
/// exactly the files that would exist on disk once every
/// already-simulated action (and no unsimulated one) has been
/// performed. A record sits in the set matching its `is_internal()`.
#[derive(Debug, Default)]
pub struct FileSets {
    pub internal: BTreeMap<RecordId, FileRecord>,
    pub external: BTreeMap<RecordId, FileRecord>,
}

impl FileSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the record into the set its current path classifies it under.
    pub fn insert(&mut self, record: FileRecord) {
        if record.is_internal() {
            self.internal.insert(record.id, record);
        } else {
            self.external.insert(record.id, record);
        }
    }

    pub fn get(&self, id: RecordId) -> Option<&FileRecord> {
        self.internal.get(&id).or_else(|| self.external.get(&id))
    }

    pub fn remove(&mut self, id: RecordId) -> Option<FileRecord> {
        self.internal
            .remove(&id)
            .or_else(|| self.external.remove(&id))
    }

    /// All records, internal first, each set in scan order.
    pub fn all(&self) -> impl Iterator<Item = &FileRecord> {
        self.internal.values().chain(self.external.values())
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.all().any(|r| r.path == path)
    }

    pub fn len(&self) -> usize {
        self.internal.len() + self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}
