//! Shared grouping and resolution machinery for the two duplicate
//! finders. They differ only in grouping key and tie-break direction.

use crate::action::Action;
use crate::config::AppConfig;
use crate::record::{FileRecord, FileSets};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy)]
pub(super) enum BestBy {
    /// Same-contents: the earliest modification wins.
    EarliestModified,
    /// Same-names: the latest modification wins.
    LatestModified,
}

/// Group all records (internal + external) by key, preserving
/// first-seen order. Only groups with more than one member survive.
pub(super) fn group_records<'a, K, F>(sets: &'a FileSets, key: F) -> Vec<Vec<&'a FileRecord>>
where
    K: Eq + Hash,
    F: Fn(&FileRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<&FileRecord>> = Vec::new();

    for record in sets.all() {
        match index.entry(key(record)) {
            Entry::Occupied(slot) => groups[*slot.get()].push(record),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups.retain(|group| group.len() > 1);
    groups
}

pub(super) struct DuplicateGroup<'a> {
    pub best: &'a FileRecord,
    pub duplicates: Vec<&'a FileRecord>,
}

/// Pick the best file and the correctable duplicates, or None when
/// read-only filtering leaves nothing to correct.
///
/// Ties on the exact timestamp always go to the internal member, for
/// both directions.
pub(super) fn resolve_group<'a>(
    group: &[&'a FileRecord],
    best_by: BestBy,
    config: &AppConfig,
) -> Option<DuplicateGroup<'a>> {
    let best = match best_by {
        BestBy::EarliestModified => group
            .iter()
            .copied()
            .min_by_key(|r| (r.modified_at, !r.is_internal()))?,
        BestBy::LatestModified => group
            .iter()
            .copied()
            .max_by_key(|r| (r.modified_at, r.is_internal()))?,
    };

    let mut duplicates: Vec<&FileRecord> = group
        .iter()
        .copied()
        .filter(|r| r.id != best.id)
        .collect();
    if config.external_readonly {
        duplicates.retain(|r| r.is_internal());
    }
    if duplicates.is_empty() {
        return None;
    }

    Some(DuplicateGroup { best, duplicates })
}

/// Delete every duplicate in favor of the best file; when the best
/// file is external, also bring it into the internal tree at its
/// relative path (moved, or copied under read-only mode).
pub(super) fn fix_for(group: &DuplicateGroup<'_>, config: &AppConfig) -> Vec<Action> {
    let mut fix: Vec<Action> = group
        .duplicates
        .iter()
        .map(|dup| Action::Delete {
            id: dup.id,
            path: dup.path.clone(),
        })
        .collect();

    if !group.best.is_internal() {
        let best = group.best;
        let to = best.internal_root.join(best.relative_path());
        fix.push(if config.external_readonly {
            Action::Copy {
                id: best.id,
                from: best.path.clone(),
                to,
            }
        } else {
            Action::Move {
                id: best.id,
                from: best.path.clone(),
                to,
                rename: false,
            }
        });
    }

    fix
}
