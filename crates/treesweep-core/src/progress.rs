use std::path::Path;

/// Trait for reporting run progress.
///
/// The CLI implements this with indicatif; tests and library embedders
/// use [`SilentReporter`]. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self, _root: &Path) {}
    fn on_scan_progress(&self, _files_found: usize, _current_path: &Path) {}
    fn on_scan_complete(&self, _root: &Path, _total_files: usize) {}
    fn on_finder_start(&self, _label: &str) {}
    fn on_finder_complete(&self, _label: &str, _issues_found: usize) {}
    fn on_execute_start(&self, _total_actions: usize) {}
    fn on_action_performed(&self, _done: usize, _total: usize, _description: &str) {}
    fn on_execute_complete(&self, _performed: usize, _failed: usize) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
