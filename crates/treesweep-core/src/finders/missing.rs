use crate::action::Action;
use crate::config::AppConfig;
use crate::issue::Issue;
use crate::record::FileSets;
use std::collections::HashSet;
use std::path::PathBuf;

// An external file is missing from the internal tree only when BOTH
// its fingerprint and its relative path are absent there; either match
// alone disqualifies it.
pub(super) fn find(config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
    let internal_fingerprints: HashSet<&str> = sets
        .internal
        .values()
        .map(|r| r.fingerprint.as_str())
        .collect();
    let internal_relative_paths: HashSet<PathBuf> = sets
        .internal
        .values()
        .map(|r| r.relative_path().to_path_buf())
        .collect();

    sets.external
        .values()
        .filter(|record| {
            !internal_fingerprints.contains(record.fingerprint.as_str())
                && !internal_relative_paths.contains(&record.relative_path().to_path_buf())
        })
        .map(|record| {
            let destination = record.internal_root.join(record.relative_path());
            let fix = vec![if config.external_readonly {
                Action::Copy {
                    id: record.id,
                    from: record.path.clone(),
                    to: destination.clone(),
                }
            } else {
                Action::Move {
                    id: record.id,
                    from: record.path.clone(),
                    to: destination.clone(),
                    rename: false,
                }
            }];
            Issue::MissingFile {
                path: record.path.clone(),
                destination,
                fix,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::test_config;
    use crate::record::test_support::record;
    use crate::record::RecordIds;
    use std::path::Path;

    #[test]
    fn fires_only_when_both_conditions_hold() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/a.bin", "H1", 100, "/int", "/int"));
        // Fingerprint known internally, path not: disqualified.
        sets.insert(record(&mut ids, "/ext/renamed.bin", "H1", 100, "/int", "/ext"));
        // Path known internally, fingerprint not: disqualified.
        sets.insert(record(&mut ids, "/ext/a.bin", "H2", 100, "/int", "/ext"));
        // Neither known: missing.
        sets.insert(record(&mut ids, "/ext/c.bin", "H3", 100, "/int", "/ext"));

        let config = test_config(Path::new("/int"));
        let issues = find(&config, &sets);

        assert_eq!(issues.len(), 1);
        let Issue::MissingFile { path, destination, .. } = &issues[0] else {
            panic!("expected MissingFile");
        };
        assert_eq!(path, &PathBuf::from("/ext/c.bin"));
        assert_eq!(destination, &PathBuf::from("/int/c.bin"));
    }

    #[test]
    fn read_only_copies_and_read_write_moves() {
        // Scenario B, both modes.
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/ext/sub/c.bin", "H3", 100, "/int", "/ext"));

        let config = test_config(Path::new("/int"));
        let issues = find(&config, &sets);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].actions()[0],
            Action::Copy { to, .. } if to == &PathBuf::from("/int/sub/c.bin")
        ));

        let mut config = config;
        config.external_readonly = false;
        let issues = find(&config, &sets);
        assert!(matches!(
            &issues[0].actions()[0],
            Action::Move { to, rename: false, .. } if to == &PathBuf::from("/int/sub/c.bin")
        ));
    }

    #[test]
    fn internal_records_are_never_missing() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/only.bin", "H9", 100, "/int", "/int"));

        let config = test_config(Path::new("/int"));
        assert!(find(&config, &sets).is_empty());
    }
}
