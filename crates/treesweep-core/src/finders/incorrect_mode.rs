use crate::action::Action;
use crate::config::AppConfig;
use crate::issue::Issue;
use crate::record::FileSets;

pub(super) fn find(config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
    sets.all()
        .filter(|record| !(config.external_readonly && !record.is_internal()))
        .filter(|record| record.mode != config.default_mode)
        .map(|record| Issue::IncorrectMode {
            path: record.path.clone(),
            current: record.mode,
            wanted: config.default_mode,
            fix: vec![Action::Chmod {
                id: record.id,
                path: record.path.clone(),
                mode: config.default_mode,
            }],
        })
        .collect()
}
