use super::dupes::{self, BestBy};
use crate::config::AppConfig;
use crate::issue::Issue;
use crate::record::FileSets;

pub(super) fn find(config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
    dupes::group_records(sets, |r| r.fingerprint.clone())
        .iter()
        .filter_map(|group| {
            let resolved = dupes::resolve_group(group, BestBy::EarliestModified, config)?;
            let fix = dupes::fix_for(&resolved, config);
            Some(Issue::SameContents {
                best: resolved.best.path.clone(),
                best_modified: resolved.best.modified_at,
                duplicates: resolved.duplicates.iter().map(|d| d.path.clone()).collect(),
                fix,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::test_support::test_config;
    use crate::record::test_support::record;
    use crate::record::RecordIds;
    use std::path::{Path, PathBuf};

    #[test]
    fn earliest_internal_wins_and_duplicate_is_deleted() {
        // Scenario A: internal a.bin (T1) and external b.bin (T2 > T1)
        // share a fingerprint; best is a.bin, fix deletes b.bin only.
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/a.bin", "H1", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/ext/b.bin", "H1", 200, "/int", "/ext"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        let issues = find(&config, &sets);

        assert_eq!(issues.len(), 1);
        let Issue::SameContents { best, duplicates, fix, .. } = &issues[0] else {
            panic!("expected SameContents");
        };
        assert_eq!(best, &PathBuf::from("/int/a.bin"));
        assert_eq!(duplicates, &vec![PathBuf::from("/ext/b.bin")]);
        assert_eq!(fix.len(), 1);
        assert!(
            matches!(&fix[0], Action::Delete { path, .. } if path == &PathBuf::from("/ext/b.bin"))
        );
    }

    #[test]
    fn timestamp_tie_prefers_internal() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/ext/x.bin", "H1", 100, "/int", "/ext"));
        sets.insert(record(&mut ids, "/int/x.bin", "H1", 100, "/int", "/int"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        let issues = find(&config, &sets);

        assert_eq!(issues.len(), 1);
        let Issue::SameContents { best, .. } = &issues[0] else {
            panic!("expected SameContents");
        };
        assert_eq!(best, &PathBuf::from("/int/x.bin"));
    }

    #[test]
    fn read_only_drops_external_duplicates() {
        // Best is internal, the only duplicate is external: under
        // read-only nothing may be corrected, so no issue at all.
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/a.bin", "H1", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/ext/b.bin", "H1", 200, "/int", "/ext"));

        let config = test_config(Path::new("/int"));
        assert!(config.external_readonly);
        assert!(find(&config, &sets).is_empty());
    }

    #[test]
    fn external_best_is_copied_in_under_read_only() {
        // External best (earliest), internal duplicate: the duplicate
        // is deleted and the best is copied to the internal tree.
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/dup.bin", "H1", 300, "/int", "/int"));
        sets.insert(record(&mut ids, "/ext/keep/best.bin", "H1", 100, "/int", "/ext"));

        let config = test_config(Path::new("/int"));
        let issues = find(&config, &sets);

        assert_eq!(issues.len(), 1);
        let fix = issues[0].actions();
        assert_eq!(fix.len(), 2);
        assert!(
            matches!(&fix[0], Action::Delete { path, .. } if path == &PathBuf::from("/int/dup.bin"))
        );
        assert!(matches!(
            &fix[1],
            Action::Copy { to, .. } if to == &PathBuf::from("/int/keep/best.bin")
        ));
    }

    #[test]
    fn external_best_is_moved_in_under_read_write() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/dup.bin", "H1", 300, "/int", "/int"));
        sets.insert(record(&mut ids, "/ext/best.bin", "H1", 100, "/int", "/ext"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        let issues = find(&config, &sets);

        let fix = issues[0].actions();
        assert!(matches!(
            &fix[1],
            Action::Move { to, rename: false, .. } if to == &PathBuf::from("/int/best.bin")
        ));
    }

    #[test]
    fn unique_fingerprints_are_ignored() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/a.bin", "H1", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/int/b.bin", "H2", 100, "/int", "/int"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        assert!(find(&config, &sets).is_empty());
    }
}
