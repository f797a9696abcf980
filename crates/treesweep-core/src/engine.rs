use crate::action::Action;
use crate::config::AppConfig;
use crate::confirm::{Confirmer, Response};
use crate::error::Error;
use crate::finders;
use crate::progress::ProgressReporter;
use crate::record::{FileSets, RecordIds};
use crate::scanner;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub struct ReconcileEngine {
    config: AppConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing was confirmed; the run stopped before the global gate.
    NothingToDo,
    /// The operator declined the global gate; disk untouched.
    Declined,
    /// The plan was executed (possibly with recoverable failures).
    Applied,
}

#[derive(Debug)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub internal_files: usize,
    pub external_files: usize,
    pub issues_found: usize,
    pub issues_confirmed: usize,
    pub actions_performed: usize,
    pub actions_failed: usize,
    pub scan_duration: Duration,
}

impl ReconcileEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the full reconcile pipeline:
    /// 1. Validate the directory arguments (nothing scanned on failure)
    /// 2. Scan the internal tree, then each external tree
    /// 3. Finder by finder: detect, confirm, simulate into the live sets
    /// 4. One global go/no-go over the accumulated plan
    /// 5. Execute the plan in confirmation order
    pub fn run(
        &self,
        reporter: &dyn ProgressReporter,
        confirmer: &mut dyn Confirmer,
    ) -> Result<RunSummary, Error> {
        self.validate_roots()?;

        // Phase 1: scan
        let scan_start = Instant::now();
        let mut ids = RecordIds::new();
        let mut sets = FileSets::new();
        let internal_root = self.config.internal_root.clone();
        for record in scanner::scan_tree(&internal_root, &internal_root, &mut ids, reporter)? {
            sets.insert(record);
        }
        for root in &self.config.external_roots {
            for record in scanner::scan_tree(root, &internal_root, &mut ids, reporter)? {
                sets.insert(record);
            }
        }
        let scan_duration = scan_start.elapsed();
        let internal_files = sets.internal.len();
        let external_files = sets.external.len();
        info!(
            "Scanned {} internal and {} external files in {:.2}s",
            internal_files,
            external_files,
            scan_duration.as_secs_f64(),
        );

        // Phase 2: detect, confirm, simulate. Confirmed fixes are
        // simulated immediately so later finders see the future state.
        let mut plan: Vec<Action> = Vec::new();
        let mut issues_found = 0;
        let mut issues_confirmed = 0;

        for finder in finders::parse_operations(&self.config.operations)? {
            reporter.on_finder_start(finder.label());
            let issues = finder.find(&self.config, &sets);
            debug!("Finder '{}': {} issue(s)", finder.label(), issues.len());
            reporter.on_finder_complete(finder.label(), issues.len());
            issues_found += issues.len();

            // An all/none answer latches for this finder invocation only.
            let mut latched: Option<bool> = None;
            for issue in issues {
                let confirmed = if self.config.apply_all {
                    true
                } else if let Some(latch) = latched {
                    latch
                } else {
                    match confirmer.ask(&issue.prompt())? {
                        Response::Yes => true,
                        Response::No => false,
                        Response::All => {
                            latched = Some(true);
                            true
                        }
                        Response::None => {
                            latched = Some(false);
                            false
                        }
                    }
                };

                if confirmed {
                    issues_confirmed += 1;
                    for action in issue.actions() {
                        action.simulate(&mut sets);
                        plan.push(action.clone());
                    }
                }
            }
        }

        let summary = |outcome, performed, failed| RunSummary {
            outcome,
            internal_files,
            external_files,
            issues_found,
            issues_confirmed,
            actions_performed: performed,
            actions_failed: failed,
            scan_duration,
        };

        if plan.is_empty() {
            info!("Nothing to do");
            return Ok(summary(RunOutcome::NothingToDo, 0, 0));
        }

        // Phase 3: the global gate. Declining leaves the disk exactly
        // as scanned; simulation never touched it.
        let mut gate = format!("The following {} action(s) will be performed:", plan.len());
        for (index, action) in plan.iter().enumerate() {
            let _ = write!(gate, "\n  {:>3}. {}", index + 1, action.describe());
        }
        gate.push_str("\nApply them?");
        if !matches!(confirmer.ask(&gate)?, Response::Yes | Response::All) {
            info!("Declined; no filesystem changes made");
            return Ok(summary(RunOutcome::Declined, 0, 0));
        }

        // Phase 4: execute in confirmation order. A recoverable
        // failure skips that action and continues; the simulated state
        // is not rolled back, the operator resolves the drift manually.
        reporter.on_execute_start(plan.len());
        let mut performed = 0;
        let mut failed = 0;
        for (index, action) in plan.iter().enumerate() {
            match action.perform() {
                Ok(()) => {
                    debug!("Performed: {}", action.describe());
                    performed += 1;
                }
                Err(err) if is_recoverable(&err) => {
                    error!("Skipping '{}': {}", action.describe(), err);
                    failed += 1;
                }
                Err(err) => return Err(Error::Io(err)),
            }
            reporter.on_action_performed(index + 1, plan.len(), &action.describe());
        }
        reporter.on_execute_complete(performed, failed);
        info!("Executed {} action(s), {} failed", performed, failed);

        Ok(summary(RunOutcome::Applied, performed, failed))
    }

    /// Hard precondition, checked before any scan: every argument is
    /// an existing directory, no external equals the internal, and no
    /// external is given twice. A repeated external would yield two
    /// records for one disk file and let the duplicate finders propose
    /// deleting the only physical copy.
    fn validate_roots(&self) -> Result<(), Error> {
        ensure_directory(&self.config.internal_root)?;
        let canonical_internal = fs::canonicalize(&self.config.internal_root)?;

        let mut seen = Vec::new();
        for external in &self.config.external_roots {
            ensure_directory(external)?;
            let canonical = fs::canonicalize(external)?;
            if canonical == canonical_internal {
                return Err(Error::InvalidDirectory {
                    path: external.clone(),
                    reason: "external directory is the same as the internal directory"
                        .to_string(),
                });
            }
            if seen.contains(&canonical) {
                return Err(Error::InvalidDirectory {
                    path: external.clone(),
                    reason: "external directory given more than once".to_string(),
                });
            }
            seen.push(canonical);
        }
        Ok(())
    }
}

fn ensure_directory(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        return Err(Error::InvalidDirectory {
            path: path.to_path_buf(),
            reason: "does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(Error::InvalidDirectory {
            path: path.to_path_buf(),
            reason: "is not a directory".to_string(),
        });
    }
    Ok(())
}

fn is_recoverable(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied
            | io::ErrorKind::NotFound
            | io::ErrorKind::AlreadyExists
    )
}
