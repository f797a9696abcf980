pub mod action;
pub mod config;
pub mod confirm;
pub mod engine;
pub mod error;
pub mod finders;
pub mod issue;
pub mod mode;
pub mod progress;
pub mod record;
pub mod scanner;

pub use action::Action;
pub use config::{AppConfig, FileDefaults, Overrides};
pub use confirm::{Confirmer, Response, StdinConfirmer};
pub use engine::{ReconcileEngine, RunOutcome, RunSummary};
pub use error::Error;
pub use issue::{Issue, IssueKind};
pub use mode::FileMode;
pub use progress::{ProgressReporter, SilentReporter};
pub use record::{FileRecord, FileSets, RecordId, RecordIds};
