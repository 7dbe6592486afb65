//! Core configuration types and loading.

use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_log_level, default_name, default_operator, default_prompt, default_suggestion_limit,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Console configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Prompt, logging and source settings.
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Extra top-level commands that redirect into the grammar.
    #[serde(default)]
    pub alias: Vec<AliasConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults; any other read failure is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// The `[console]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Printed before each line is read.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Filter used when `RUST_LOG` is unset (e.g. "info", "cmdtree=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Maximum number of suggestions printed for a `?` query.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Whether the console source may use operator-only commands.
    #[serde(default = "default_operator")]
    pub operator: bool,
    /// Name of the console source.
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            log_level: default_log_level(),
            suggestion_limit: default_suggestion_limit(),
            operator: default_operator(),
            name: default_name(),
        }
    }
}

/// An `[[alias]]` entry: `name` becomes a literal redirecting to `target`.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasConfig {
    /// Literal typed by the user.
    pub name: String,
    /// Space separated node path, e.g. "var get".
    pub target: String,
}

impl AliasConfig {
    /// The target path split into node names.
    pub fn target_path(&self) -> impl Iterator<Item = &str> {
        self.target.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.console.prompt, "> ");
        assert_eq!(config.console.suggestion_limit, 20);
        assert!(config.console.operator);
        assert!(config.alias.is_empty());
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[console]
prompt = "cmd$ "
log_level = "debug"
suggestion_limit = 5
operator = false
name = "tester"

[[alias]]
name = "get"
target = "var get"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.console.prompt, "cmd$ ");
        assert_eq!(config.console.log_level, "debug");
        assert_eq!(config.console.suggestion_limit, 5);
        assert!(!config.console.operator);
        assert_eq!(config.console.name, "tester");
        assert_eq!(config.alias.len(), 1);
        assert_eq!(
            config.alias[0].target_path().collect::<Vec<_>>(),
            vec!["var", "get"]
        );
    }

    #[test]
    fn test_partial_console_table() {
        let config: Config = toml::from_str("[console]\nprompt = \"$ \"\n").unwrap();
        assert_eq!(config.console.prompt, "$ ");
        assert_eq!(config.console.log_level, "info");
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[console\nprompt = 1").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
