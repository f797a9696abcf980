use clap::Parser;
use std::path::PathBuf;
use treesweep_core::Overrides;

#[derive(Debug, Parser)]
#[command(name = "treesweep")]
#[command(
    about = "Reconcile an internal file tree against external mirrors",
    long_about = None
)]
pub struct Cli {
    /// The canonical internal directory
    pub internal: PathBuf,

    /// External mirror directories to reconcile against
    pub externals: Vec<PathBuf>,

    /// Ordered finder codes: m issing, e mpty, t emporary, u nsafe
    /// chars, c ontents, n ames, p ermissions [default: metucnp]
    #[arg(long)]
    pub operations: Option<String>,

    /// Characters considered unsafe in file names
    #[arg(long)]
    pub unsafe_chars: Option<String>,

    /// Replacement character for unsafe characters
    #[arg(long)]
    pub escape_char: Option<char>,

    /// Regular expression identifying temporary files by name
    #[arg(long)]
    pub tmp_regexp: Option<String>,

    /// Never mutate or delete files in external trees (default)
    #[arg(long, conflicts_with = "external_rw")]
    pub external_ro: bool,

    /// Allow files in external trees to be moved, deleted or chmodded
    #[arg(long)]
    pub external_rw: bool,

    /// Skip per-issue prompts; the final confirmation still applies
    #[arg(long)]
    pub all: bool,

    /// Canonical permission string, e.g. rw-r--r--
    #[arg(long)]
    pub default_mode: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            operations: self.operations.clone(),
            unsafe_chars: self.unsafe_chars.clone(),
            escape_char: self.escape_char,
            tmp_regexp: self.tmp_regexp.clone(),
            external_readonly: if self.external_rw {
                Some(false)
            } else if self.external_ro {
                Some(true)
            } else {
                None
            },
            apply_all: self.all,
            default_mode: self.default_mode.clone(),
        }
    }
}
