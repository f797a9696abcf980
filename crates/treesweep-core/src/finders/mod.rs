mod dupes;
mod empty;
mod incorrect_mode;
mod missing;
mod same_contents;
mod same_names;
mod temporary;
mod unsafe_chars;

use crate::config::AppConfig;
use crate::error::Error;
use crate::issue::Issue;
use crate::record::FileSets;

/// The seven detectors, selected and ordered by single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finder {
    Missing,
    Empty,
    Temporary,
    UnsafeChars,
    SameContents,
    SameFileNames,
    IncorrectMode,
}

impl Finder {
    pub fn from_code(code: char) -> Option<Finder> {
        match code {
            'm' => Some(Finder::Missing),
            'e' => Some(Finder::Empty),
            't' => Some(Finder::Temporary),
            'u' => Some(Finder::UnsafeChars),
            'c' => Some(Finder::SameContents),
            'n' => Some(Finder::SameFileNames),
            'p' => Some(Finder::IncorrectMode),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Finder::Missing => 'm',
            Finder::Empty => 'e',
            Finder::Temporary => 't',
            Finder::UnsafeChars => 'u',
            Finder::SameContents => 'c',
            Finder::SameFileNames => 'n',
            Finder::IncorrectMode => 'p',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Finder::Missing => "missing files",
            Finder::Empty => "empty files",
            Finder::Temporary => "temporary files",
            Finder::UnsafeChars => "unsafe file names",
            Finder::SameContents => "files with same contents",
            Finder::SameFileNames => "files with same names",
            Finder::IncorrectMode => "incorrect modes",
        }
    }

    /// Scan the current record sets for this finder's anomaly kind.
    /// Read-only over its inputs; every returned issue carries its
    /// precomputed fix.
    pub fn find(&self, config: &AppConfig, sets: &FileSets) -> Vec<Issue> {
        match self {
            Finder::Missing => missing::find(config, sets),
            Finder::Empty => empty::find(config, sets),
            Finder::Temporary => temporary::find(config, sets),
            Finder::UnsafeChars => unsafe_chars::find(config, sets),
            Finder::SameContents => same_contents::find(config, sets),
            Finder::SameFileNames => same_names::find(config, sets),
            Finder::IncorrectMode => incorrect_mode::find(config, sets),
        }
    }
}

/// Parse an operations string (e.g. `"metucnp"`) into the ordered
/// finder list, rejecting unknown codes.
pub fn parse_operations(operations: &str) -> Result<Vec<Finder>, Error> {
    operations
        .chars()
        .map(|code| Finder::from_code(code).ok_or(Error::UnknownOperation(code)))
        .collect()
}
