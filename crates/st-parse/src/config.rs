//! `stparse.toml` configuration.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::OutputFormat;

pub(crate) const CONFIG_FILES: &[&str] = &["stparse.toml", ".stparse.toml"];

const DEFAULT_MAX_ERRORS: usize = 50;

/// Effective settings after merging the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Config file path (if one was loaded).
    pub config_path: Option<PathBuf>,
    /// Tree output format.
    pub format: OutputFormat,
    /// Include trivia tokens in tree output.
    pub trivia: bool,
    /// Errors printed per file.
    pub max_errors: usize,
    /// Exit with a failure status when any input has errors.
    pub deny_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Tree,
            trivia: false,
            max_errors: DEFAULT_MAX_ERRORS,
            deny_errors: true,
        }
    }
}

impl Config {
    /// Loads `explicit`, or the first config file found in `root`.
    ///
    /// A missing default file yields the defaults; an unreadable or
    /// malformed file is an error.
    pub fn load(explicit: Option<&Path>, root: &Path) -> anyhow::Result<Self> {
        let Some(path) = explicit
            .map(Path::to_path_buf)
            .or_else(|| find_config_file(root))
        else {
            debug!("no stparse config found in {}", root.display());
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::from_contents(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!("loaded stparse config from {}", path.display());
        config.config_path = Some(path);
        Ok(config)
    }

    /// Parses config file contents on top of the defaults.
    pub fn from_contents(contents: &str) -> Result<Self, toml::de::Error> {
        let parsed: ConfigFile = toml::from_str(contents)?;
        let mut config = Self::default();
        if let Some(format) = parsed.output.format {
            config.format = format;
        }
        if let Some(trivia) = parsed.output.trivia {
            config.trivia = trivia;
        }
        if let Some(max_errors) = parsed.diagnostics.max_errors {
            config.max_errors = max_errors;
        }
        if let Some(deny_errors) = parsed.diagnostics.deny_errors {
            config.deny_errors = deny_errors;
        }
        Ok(config)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    output: OutputSection,
    #[serde(default)]
    diagnostics: DiagnosticSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    format: Option<OutputFormat>,
    trivia: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiagnosticSection {
    max_errors: Option<usize>,
    deny_errors: Option<bool>,
}

pub(crate) fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{prefix}-{}-{stamp}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn empty_file_keeps_defaults() {
        assert_eq!(Config::from_contents("").unwrap(), Config::default());
    }

    #[test]
    fn all_keys() {
        let config = Config::from_contents(
            r#"
[output]
format = "json"
trivia = true

[diagnostics]
max_errors = 5
deny_errors = false
"#,
        )
        .unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.trivia);
        assert_eq!(config.max_errors, 5);
        assert!(!config.deny_errors);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Config::from_contents("[output]\nformat = \"xml\"\n").is_err());
        assert!(Config::from_contents("[output]\ncolour = true\n").is_err());
    }

    #[test]
    fn load_finds_dotfile() {
        let dir = temp_dir("stparse-config");
        fs::write(dir.join(".stparse.toml"), "[output]\nformat = \"sexp\"\n").unwrap();
        let config = Config::load(None, &dir).unwrap();
        assert_eq!(config.format, OutputFormat::Sexp);
        assert_eq!(config.config_path, Some(dir.join(".stparse.toml")));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = temp_dir("stparse-config-empty");
        assert_eq!(Config::load(None, &dir).unwrap(), Config::default());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn malformed_explicit_file_names_path() {
        let dir = temp_dir("stparse-config-bad");
        let path = dir.join("custom.toml");
        fs::write(&path, "[output\n").unwrap();
        let err = Config::load(Some(&path), &dir).unwrap_err();
        assert!(err.to_string().contains("custom.toml"), "{err}");
        fs::remove_dir_all(dir).ok();
    }
}
