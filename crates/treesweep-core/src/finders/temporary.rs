use crate::action::Action;
use crate::config::AppConfig;
use crate::issue::Issue;
use crate::record::FileSets;

pub(super) fn find(config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
    sets.all()
        .filter(|record| config.tmp_pattern.is_match(record.name()))
        .map(|record| Issue::TemporaryFile {
            path: record.path.clone(),
            fix: vec![Action::Delete {
                id: record.id,
                path: record.path.clone(),
            }],
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
    fn default_pattern_matches_editor_droppings() {
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        sets.insert(record(&mut ids, "/int/draft.txt~", "h1", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/int/notes.bak", "h2", 100, "/int", "/int"));
        sets.insert(record(&mut ids, "/int/draft.txt", "h3", 100, "/int", "/int"));

        let config = test_config(Path::new("/int"));
        let issues = find(&config, &sets);

        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|i| matches!(i.actions()[0], Action::Delete { .. })));
    }
}
