use super::dupes::{self, BestBy};
use crate::config::AppConfig;
use crate::issue::Issue;
use crate::record::FileSets;

// Mirror image of same_contents: grouped by file name, and the LATEST
// modification wins. The opposite tie-break direction is intentional
// and preserved as observed in the original behavior.
pub(super) fn find(config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
    dupes::group_records(sets, |r| r.name().to_string())
        .iter()
        .filter_map(|group| {
            let resolved = dupes::resolve_group(group, BestBy::LatestModified, config)?;
            let fix = dupes::fix_for(&resolved, config);
            Some(Issue::SameFileNames {
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
    fn latest_wins_for_name_collisions() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/old/r.txt", "H1", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/int/new/r.txt", "H2", 200, "/int", "/int"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        let issues = find(&config, &sets);

        assert_eq!(issues.len(), 1);
        let Issue::SameFileNames { best, duplicates, .. } = &issues[0] else {
            panic!("expected SameFileNames");
        };
        assert_eq!(best, &PathBuf::from("/int/new/r.txt"));
        assert_eq!(duplicates, &vec![PathBuf::from("/int/old/r.txt")]);
    }

    #[test]
    fn timestamp_tie_prefers_internal() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/ext/r.txt", "H1", 100, "/int", "/ext"));
        sets.insert(record(&mut ids, "/int/r.txt", "H2", 100, "/int", "/int"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        let issues = find(&config, &sets);

        let Issue::SameFileNames { best, .. } = &issues[0] else {
            panic!("expected SameFileNames");
        };
        assert_eq!(best, &PathBuf::from("/int/r.txt"));
    }

    #[test]
    fn external_latest_best_is_moved_in_under_read_write() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/r.txt", "H1", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/ext/sub/r.txt", "H2", 200, "/int", "/ext"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        let issues = find(&config, &sets);

        assert_eq!(issues.len(), 1);
        let fix = issues[0].actions();
        assert_eq!(fix.len(), 2);
        assert!(
            matches!(&fix[0], Action::Delete { path, .. } if path == &PathBuf::from("/int/r.txt"))
        );
        assert!(matches!(
            &fix[1],
            Action::Move { to, rename: false, .. } if to == &PathBuf::from("/int/sub/r.txt")
        ));
    }

    #[test]
    fn distinct_names_are_ignored() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/a.txt", "H1", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/int/b.txt", "H1", 100, "/int", "/int"));

        let mut config = test_config(Path::new("/int"));
        config.external_readonly = false;
        assert!(find(&config, &sets).is_empty());
    }
}
