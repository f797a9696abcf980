use crate::action::Action;
use crate::config::AppConfig;
use crate::issue::Issue;
use crate::record::{FileRecord, FileSets};
use std::collections::HashSet;
use std::path::PathBuf;

pub(super) fn find(config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
    // Collision probing runs against the simulated future state, plus
    // destinations already claimed by earlier issues in this batch.
    let mut taken: HashSet<PathBuf> = sets.all().map(|r| r.path.clone()).collect();

    let mut issues = Vec::new();
    for record in sets.all() {
        let Some(sanitized_name) = sanitize_name(record, config) else {
            continue;
        };
        let destination = resolve_collision(record, &sanitized_name, &taken);
        taken.insert(destination.clone());

        issues.push(Issue::UnsafeChars {
            path: record.path.clone(),
            sanitized: destination.clone(),
            fix: vec![Action::Move {
                id: record.id,
                from: record.path.clone(),
                to: destination,
                rename: true,
            }],
        });
    }
    issues
}

/// The escaped file name, or None when the name is already safe. The
/// stem and suffix are escaped independently; the separating dot never
/// is.
fn sanitize_name(record: &FileRecord, config: &AppConfig) -> Option<String> {
    let stem = record.stem();
    let suffix = record.suffix();
    let is_unsafe = |c: char| config.unsafe_chars.contains(c);

    if !stem.chars().any(is_unsafe) && !suffix.chars().any(is_unsafe) {
        return None;
    }

    let escape = |part: &str| -> String {
        part.chars()
            .map(|c| if is_unsafe(c) { config.escape_char } else { c })
            .collect()
    };

    let mut name = escape(stem);
    if !suffix.is_empty() {
        name.push('.');
        name.push_str(&escape(suffix));
    }
    Some(name)
}

/// Keep the sanitized name when free; otherwise append `.1`, `.2`, …
/// until a path not yet taken is found. Terminates because the taken
/// set is finite and every candidate is distinct.
fn resolve_collision(
    record: &FileRecord,
    sanitized_name: &str,
    taken: &HashSet<PathBuf>,
) -> PathBuf {
    let parent = record.path.parent().unwrap_or(&record.source_root);

    let candidate = parent.join(sanitized_name);
    if !taken.contains(&candidate) {
        return candidate;
    }

    let mut counter = 1u64;
    loop {
        let candidate = parent.join(format!("{}.{}", sanitized_name, counter));
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
