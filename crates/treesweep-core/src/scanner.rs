use crate::error::Error;
use crate::mode::FileMode;
use crate::progress::ProgressReporter;
use crate::record::{FileRecord, RecordIds};
use chrono::{DateTime, TimeZone, Utc};
use std::fs::File;
use std::io::Read;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tracing::debug;

const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Recursively enumerate the regular files under `root` and build one
/// [`FileRecord`] per file: streamed blake3 content fingerprint plus
/// size, timestamps and permission bits.
///
/// Directories and symlinks are skipped; empty files are kept (the
/// empty-file finder needs them). An unreadable file aborts the scan
/// of this tree — there is no retry policy.
pub fn scan_tree(
    root: &Path,
    internal_root: &Path,
    ids: &mut RecordIds,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<FileRecord>, Error> {
    reporter.on_scan_start(root);

    let mut records = Vec::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io_error)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let metadata = entry.metadata().map_err(io_error)?;
        let fingerprint = fingerprint_file(path)?;

        records.push(FileRecord {
            id: ids.next(),
            path: path.to_path_buf(),
            fingerprint,
            modified_at: timestamp(metadata.mtime(), metadata.mtime_nsec()),
            changed_at: timestamp(metadata.ctime(), metadata.ctime_nsec()),
            accessed_at: timestamp(metadata.atime(), metadata.atime_nsec()),
            mode: FileMode::from_bits(metadata.mode()),
            size: metadata.len(),
            source_root: root.to_path_buf(),
            internal_root: internal_root.to_path_buf(),
        });

        reporter.on_scan_progress(records.len(), path);
    }

    debug!("Scanned {}: {} files", root.display(), records.len());
    reporter.on_scan_complete(root, records.len());
    Ok(records)
}

/// Blake3 hash of the file contents, read in fixed-size chunks so
/// memory stays bounded for large files.
pub fn fingerprint_file(path: &Path) -> Result<String, Error> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

fn io_error(err: walkdir::Error) -> Error {
    Error::Io(err.into())
}

fn timestamp(secs: i64, nsecs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, nsecs as u32)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentReporter;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scans_regular_files_with_fingerprints() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("tree");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::write(root.join("sub/b.txt"), "alpha").unwrap();
        fs::write(root.join("sub/c.txt"), "").unwrap();

        let mut ids = RecordIds::new();
        let records = scan_tree(&root, &root, &mut ids, &SilentReporter).unwrap();

        assert_eq!(records.len(), 3);

        let a = records.iter().find(|r| r.name() == "a.txt").unwrap();
        let b = records.iter().find(|r| r.name() == "b.txt").unwrap();
        let c = records.iter().find(|r| r.name() == "c.txt").unwrap();

        // Identical contents hash identically regardless of location.
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);

        assert!(c.is_empty());
        assert_eq!(a.size, 5);
        assert!(records.iter().all(|r| r.is_internal()));
    }

    #[test]
    fn fingerprint_matches_blake3_of_contents() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("f.bin");
        let data = vec![0xABu8; 200_000]; // spans multiple chunks
        fs::write(&path, &data).unwrap();

        let expected = blake3::hash(&data).to_hex().to_string();
        assert_eq!(fingerprint_file(&path).unwrap(), expected);
    }

    #[test]
    fn external_records_classify_as_external() {
        let tmp = tempdir().unwrap();
        let internal = tmp.path().join("int");
        let external = tmp.path().join("ext");
        fs::create_dir_all(&internal).unwrap();
        fs::create_dir_all(&external).unwrap();
        fs::write(external.join("x.txt"), "x").unwrap();

        let mut ids = RecordIds::new();
        let records = scan_tree(&external, &internal, &mut ids, &SilentReporter).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_internal());
        assert_eq!(records[0].relative_path(), Path::new("x.txt"));
    }
}
