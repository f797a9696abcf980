use crate::error::Error;
use crate::finders;
use crate::mode::FileMode;
use config::{Config, File as ConfigFile};
use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_OPERATIONS: &str = "metucnp";
pub const DEFAULT_UNSAFE_CHARS: &str = " '\"&|;<>()*?$";
pub const DEFAULT_ESCAPE_CHAR: char = '_';
pub const DEFAULT_TMP_PATTERN: &str = r"(~|\.bak|\.tmp|\.sw[op])$|^#.*#$";
pub const DEFAULT_MODE: &str = "rw-r--r--";

/// Optional defaults read from the per-user config file
/// (`~/.config/treesweep/config.toml`). Anything absent falls back to
/// the built-in defaults; anything present is still overridable by an
/// explicit CLI flag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileDefaults {
    pub operations: Option<String>,
    pub unsafe_chars: Option<String>,
    pub escape_char: Option<char>,
    pub tmp_regexp: Option<String>,
    pub external_readonly: Option<bool>,
    pub default_mode: Option<String>,
}

pub fn load_file_defaults() -> Result<FileDefaults, Error> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(FileDefaults::default());
    };
    let path = config_dir.join("treesweep").join("config.toml");

    let builder = Config::builder()
        .add_source(ConfigFile::from(path).required(false))
        .build()?;
    Ok(builder.try_deserialize::<FileDefaults>()?)
}

/// Explicit CLI overrides, each taking precedence over the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub operations: Option<String>,
    pub unsafe_chars: Option<String>,
    pub escape_char: Option<char>,
    pub tmp_regexp: Option<String>,
    pub external_readonly: Option<bool>,
    pub apply_all: bool,
    pub default_mode: Option<String>,
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub internal_root: PathBuf,
    pub external_roots: Vec<PathBuf>,
    /// Finder codes, run in order.
    pub operations: String,
    pub unsafe_chars: String,
    pub escape_char: char,
    pub tmp_pattern: Regex,
    /// External trees are never mutated or deleted from when true.
    pub external_readonly: bool,
    /// Skip per-issue prompts; the final global gate still applies.
    pub apply_all: bool,
    pub default_mode: FileMode,
}

impl AppConfig {
    /// Merge CLI overrides on top of file defaults on top of built-ins,
    /// validating operation codes, the temp pattern and the mode string.
    pub fn resolve(
        internal_root: PathBuf,
        external_roots: Vec<PathBuf>,
        cli: Overrides,
        file: FileDefaults,
    ) -> Result<AppConfig, Error> {
        let operations = cli
            .operations
            .or(file.operations)
            .unwrap_or_else(|| DEFAULT_OPERATIONS.to_string());
        finders::parse_operations(&operations)?;

        let tmp_regexp = cli
            .tmp_regexp
            .or(file.tmp_regexp)
            .unwrap_or_else(|| DEFAULT_TMP_PATTERN.to_string());
        let tmp_pattern = Regex::new(&tmp_regexp)?;

        let default_mode: FileMode = cli
            .default_mode
            .or(file.default_mode)
            .unwrap_or_else(|| DEFAULT_MODE.to_string())
            .parse()?;

        Ok(AppConfig {
            internal_root,
            external_roots,
            operations,
            unsafe_chars: cli
                .unsafe_chars
                .or(file.unsafe_chars)
                .unwrap_or_else(|| DEFAULT_UNSAFE_CHARS.to_string()),
            escape_char: cli
                .escape_char
                .or(file.escape_char)
                .unwrap_or(DEFAULT_ESCAPE_CHAR),
            tmp_pattern,
            external_readonly: cli
                .external_readonly
                .or(file.external_readonly)
                .unwrap_or(true),
            apply_all: cli.apply_all,
            default_mode,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults_resolve() {
        let config = AppConfig::resolve(
            PathBuf::from("/int"),
            vec![PathBuf::from("/ext")],
            Overrides::default(),
            FileDefaults::default(),
        )
        .unwrap();

        assert_eq!(config.operations, "metucnp");
        assert_eq!(config.escape_char, '_');
        assert!(config.external_readonly);
        assert!(!config.apply_all);
        assert_eq!(config.default_mode.to_string(), "rw-r--r--");
        assert!(config.tmp_pattern.is_match("draft.txt~"));
        assert!(config.tmp_pattern.is_match("core.tmp"));
        assert!(config.tmp_pattern.is_match("#scratch#"));
        assert!(!config.tmp_pattern.is_match("draft.txt"));
    }

    #[test]
    fn cli_overrides_beat_file_defaults() {
        let file = FileDefaults {
            operations: Some("me".to_string()),
            escape_char: Some('-'),
            external_readonly: Some(false),
            ..FileDefaults::default()
        };
        let cli = Overrides {
            operations: Some("cn".to_string()),
            ..Overrides::default()
        };

        let config =
            AppConfig::resolve(PathBuf::from("/int"), Vec::new(), cli, file).unwrap();
        assert_eq!(config.operations, "cn");
        assert_eq!(config.escape_char, '-');
        assert!(!config.external_readonly);
    }

    #[test]
    fn rejects_unknown_operation_code() {
        let cli = Overrides {
            operations: Some("mex".to_string()),
            ..Overrides::default()
        };
        let err = AppConfig::resolve(
            PathBuf::from("/int"),
            Vec::new(),
            cli,
            FileDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownOperation('x')));
    }

    #[test]
    fn rejects_bad_mode_string() {
        let cli = Overrides {
            default_mode: Some("rwx".to_string()),
            ..Overrides::default()
        };
        let err = AppConfig::resolve(
            PathBuf::from("/int"),
            Vec::new(),
            cli,
            FileDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidMode(_)));
    }
}
