use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use treesweep_core::ProgressReporter;

/// CLI progress reporter using indicatif.
///
/// - Scan phase: spinner per tree (file total unknown upfront)
/// - Finder phase: spinner per finder
/// - Execute phase: progress bar (action total known from the plan)
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }

    fn spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self, root: &Path) {
        self.spinner(format!("Scanning {}...", root.display()));
    }

    fn on_scan_progress(&self, files_found: usize, _current_path: &Path) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!("Scanning... {} files found", files_found));
        }
    }

    fn on_scan_complete(&self, root: &Path, total_files: usize) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scanned {}: {} files",
            root.display(),
            total_files
        );
    }

    fn on_finder_start(&self, label: &str) {
        self.spinner(format!("Checking for {}...", label));
    }

    fn on_finder_complete(&self, label: &str, issues_found: usize) {
        self.finish_bar();
        if issues_found > 0 {
            eprintln!("  \x1b[33m!\x1b[0m {}: {} issue(s)", label, issues_found);
        }
    }

    fn on_execute_start(&self, total_actions: usize) {
        let pb = ProgressBar::new(total_actions as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Applying [{bar:30.cyan/dim}] {pos}/{len} actions",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_action_performed(&self, done: usize, _total: usize, _description: &str) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(done as u64);
        }
    }

    fn on_execute_complete(&self, performed: usize, failed: usize) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Applied {} action(s), {} failed",
            performed, failed
        );
    }
}
