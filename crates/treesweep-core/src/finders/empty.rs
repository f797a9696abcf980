use crate::action::Action;
use crate::config::AppConfig;
use crate::issue::Issue;
use crate::record::FileSets;

pub(super) fn find(_config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
    sets.all()
        .filter(|record| record.is_empty())
        .map(|record| Issue::EmptyFile {
            path: record.path.clone(),
            fix: vec![Action::Delete {
                id: record.id,
                path: record.path.clone(),
            }],
        })
        .collect()
}
