//! Configuration loading and validation.

use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::models::config::{Config, MAX_INTERVAL_MINUTES};

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".gh-todoist-sync";

/// Environment file read from the working directory, if present.
pub const DOTENV_FILE: &str = ".env";

/// Prefix for nested overrides, e.g. `GH_TODOIST_SYNC_LOGGING__FORMAT`.
pub const ENV_PREFIX: &str = "GH_TODOIST_SYNC_";

/// Plain environment variables and the config keys they set.
const PLAIN_ENV_KEYS: [(&str, &str); 7] = [
    ("GITHUB_TOKEN", "github.token"),
    ("GITHUB_OWNER", "github.owner"),
    ("GITHUB_REPO", "github.repo"),
    ("TODOIST_TOKEN", "todoist.token"),
    ("TODOIST_PROJECT_NAME", "todoist.project_name"),
    ("SYNC_INTERVAL_MINUTES", "sync.interval_minutes"),
    ("DEBUG", "debug"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `github.token` is empty.
    #[error("GITHUB_TOKEN is required (github.token)")]
    MissingGitHubToken,

    /// `github.owner` is empty.
    #[error("GITHUB_OWNER is required (github.owner)")]
    MissingGitHubOwner,

    /// `github.repo` is empty.
    #[error("GITHUB_REPO is required (github.repo)")]
    MissingGitHubRepo,

    /// `todoist.token` is empty.
    #[error("TODOIST_TOKEN is required (todoist.token)")]
    MissingTodoistToken,

    /// `todoist.project_name` is blank.
    #[error("Todoist project name cannot be empty")]
    EmptyProjectName,

    /// Interval outside 1..=525600 minutes.
    #[error("Invalid sync interval: {0} minutes. Must be between 1 and 525600")]
    InvalidInterval(u64),

    /// Zero request timeout.
    #[error("Invalid timeout: {0} seconds. Must be at least 1")]
    InvalidTimeout(u64),

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown rotation policy.
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .gh-todoist-sync/config.yaml
    /// 3. .gh-todoist-sync/local.yaml (optional local overrides)
    /// 4. GITHUB_TOKEN, GITHUB_OWNER, GITHUB_REPO, TODOIST_TOKEN,
    ///    TODOIST_PROJECT_NAME, SYNC_INTERVAL_MINUTES, DEBUG
    /// 5. GH_TODOIST_SYNC_* variables (highest priority)
    ///
    /// Variables from `./.env` are added to the process environment first;
    /// variables that are already set are not overwritten.
    pub fn load() -> Result<Config> {
        Self::load_env_file(Path::new(DOTENV_FILE));
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")));

        Self::finish(figment).context("Failed to extract configuration from figment")
    }

    /// Load configuration from a specific file instead of the project directory.
    ///
    /// Environment variables still override values from the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            bail!("Config file {} does not exist", path.display());
        }
        Self::load_env_file(Path::new(DOTENV_FILE));

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path));

        Self::finish(figment).with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Load from `path` when given, otherwise from the project directory.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Add the variables of a dotenv file to the process environment.
    ///
    /// A missing file is not an error. Returns whether a file was loaded.
    pub fn load_env_file(path: &Path) -> bool {
        match dotenvy::from_path(path) {
            Ok(()) => {
                debug!(path = %path.display(), "loaded environment file");
                true
            }
            Err(err) if err.not_found() => false,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read environment file");
                false
            }
        }
    }

    fn finish(figment: Figment) -> Result<Config> {
        let config: Config = merge_plain_env(figment)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.token.trim().is_empty() {
            return Err(ConfigError::MissingGitHubToken);
        }
        if config.github.owner.trim().is_empty() {
            return Err(ConfigError::MissingGitHubOwner);
        }
        if config.github.repo.trim().is_empty() {
            return Err(ConfigError::MissingGitHubRepo);
        }
        if config.todoist.token.trim().is_empty() {
            return Err(ConfigError::MissingTodoistToken);
        }
        if config.todoist.project_name.trim().is_empty() {
            return Err(ConfigError::EmptyProjectName);
        }

        if !(1..=MAX_INTERVAL_MINUTES).contains(&config.sync.interval_minutes) {
            return Err(ConfigError::InvalidInterval(config.sync.interval_minutes));
        }
        for timeout in [config.github.timeout_secs, config.todoist.timeout_secs] {
            if timeout == 0 {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

/// Merge the plain (unprefixed) environment variables.
///
/// Unset and empty variables are skipped. `DEBUG` accepts `1`/`0`,
/// `t`/`f` and `true`/`false` (lower, upper or title case). A malformed `DEBUG` or
/// `SYNC_INTERVAL_MINUTES` is ignored with a warning so the lower layers
/// (file or default) apply.
fn merge_plain_env(figment: Figment) -> Figment {
    PLAIN_ENV_KEYS
        .iter()
        .fold(figment, |figment, &(name, key)| match plain_env_value(name) {
            Some(value) => figment.merge(Serialized::default(key, value)),
            None => figment,
        })
}

fn plain_env_value(name: &str) -> Option<Value> {
    let raw = std::env::var(name).ok().filter(|value| !value.is_empty())?;
    match name {
        "DEBUG" => {
            let parsed = parse_bool(&raw);
            if parsed.is_none() {
                warn!(variable = name, value = %raw, "not a boolean, ignoring");
            }
            parsed.map(Value::Bool)
        }
        "SYNC_INTERVAL_MINUTES" => match raw.parse::<u64>() {
            Ok(minutes) => Some(Value::from(minutes)),
            Err(err) => {
                warn!(variable = name, value = %raw, error = %err, "not a number of minutes, ignoring");
                None
            }
        },
        _ => Some(Value::String(raw)),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Every variable the loader reads, unset.
    fn clean_env() -> Vec<(&'static str, Option<&'static str>)> {
        let mut vars: Vec<_> = PLAIN_ENV_KEYS.iter().map(|(name, _)| (*name, None)).collect();
        vars.extend([
            ("GH_TODOIST_SYNC_LOGGING__FORMAT", None),
            ("GH_TODOIST_SYNC_SYNC__UPDATE_LABELS", None),
            ("GH_TODOIST_SYNC_TODOIST__PROJECT_NAME", None),
        ]);
        vars
    }

    fn with_env<R>(set: &[(&'static str, &'static str)], f: impl FnOnce() -> R) -> R {
        let mut vars = clean_env();
        for &(key, value) in set {
            vars.retain(|(k, _)| *k != key);
            vars.push((key, Some(value)));
        }
        temp_env::with_vars(vars, f)
    }

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.github.token = "ghp_x".to_string();
        config.github.owner = "octo".to_string();
        config.github.repo = "widgets".to_string();
        config.todoist.token = "td_x".to_string();
        config
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("GITHUB_TOKEN", "ghp_env"),
        ("GITHUB_OWNER", "octo"),
        ("GITHUB_REPO", "widgets"),
        ("TODOIST_TOKEN", "td_env"),
    ];

    #[test]
    fn test_plain_environment_variables() {
        let file = yaml_file("{}\n");
        let mut vars = REQUIRED.to_vec();
        vars.extend([("SYNC_INTERVAL_MINUTES", "5"), ("DEBUG", "true")]);

        let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.github.token, "ghp_env");
        assert_eq!(config.github.owner, "octo");
        assert_eq!(config.github.repo, "widgets");
        assert_eq!(config.todoist.token, "td_env");
        assert_eq!(config.todoist.project_name, "GitHub Sync");
        assert_eq!(config.sync.interval_minutes, 5);
        assert!(config.debug);
    }

    #[test]
    fn test_yaml_file_values() {
        let file = yaml_file(
            r"
github:
  token: ghp_file
  owner: octo
  repo: widgets
todoist:
  token: td_file
  project_name: Inbox Mirror
sync:
  interval_minutes: 30
  update_labels: true
logging:
  level: debug
  format: json
",
        );

        let config = with_env(&[], || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.todoist.project_name, "Inbox Mirror");
        assert_eq!(config.sync.interval_minutes, 30);
        assert!(config.sync.update_labels);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.github.api_base_url, "https://api.github.com");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = yaml_file(
            r"
github: { token: ghp_file, owner: octo, repo: widgets }
todoist: { token: td_file, project_name: From File }
",
        );
        let vars = [
            ("TODOIST_PROJECT_NAME", "From Env"),
            ("GH_TODOIST_SYNC_LOGGING__FORMAT", "json"),
            ("GH_TODOIST_SYNC_SYNC__UPDATE_LABELS", "true"),
        ];

        let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.github.token, "ghp_file");
        assert_eq!(config.todoist.project_name, "From Env");
        assert_eq!(config.logging.format, "json");
        assert!(config.sync.update_labels);
    }

    #[test]
    fn test_prefixed_variable_beats_plain_variable() {
        let file = yaml_file("{}\n");
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("TODOIST_PROJECT_NAME", "Plain"),
            ("GH_TODOIST_SYNC_TODOIST__PROJECT_NAME", "Prefixed"),
        ]);

        let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.todoist.project_name, "Prefixed");
    }

    #[test]
    fn test_empty_plain_variables_are_unset() {
        let file = yaml_file("todoist: { project_name: From File }\n");
        let mut vars = REQUIRED.to_vec();
        vars.extend([("TODOIST_PROJECT_NAME", ""), ("SYNC_INTERVAL_MINUTES", "")]);

        let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.todoist.project_name, "From File");
        assert_eq!(config.sync.interval_minutes, 15);

        let file = yaml_file("{}\n");
        let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.todoist.project_name, "GitHub Sync");
    }

    #[test]
    fn test_debug_accepts_boolean_spellings() {
        let file = yaml_file("{}\n");
        for (value, expected) in [
            ("1", true),
            ("t", true),
            ("TRUE", true),
            ("True", true),
            ("0", false),
            ("F", false),
            ("false", false),
            ("yes", false),
        ] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("DEBUG", value));
            let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
            assert_eq!(config.debug, expected, "DEBUG={value}");
        }
    }

    #[test]
    fn test_malformed_interval_falls_back() {
        let file = yaml_file("{}\n");
        let mut vars = REQUIRED.to_vec();
        vars.push(("SYNC_INTERVAL_MINUTES", "abc"));

        let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.sync.interval_minutes, 15);

        let file = yaml_file("sync: { interval_minutes: 45 }\n");
        let config = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap();
        assert_eq!(config.sync.interval_minutes, 45);
    }

    #[test]
    fn test_env_file_supplies_missing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(
            &env_file,
            "GITHUB_TOKEN=ghp_dotenv\nGITHUB_OWNER=from-file\nGITHUB_REPO=widgets\nTODOIST_TOKEN=td_dotenv\n",
        )
        .unwrap();
        let file = yaml_file("{}\n");

        let config = with_env(&[("GITHUB_OWNER", "from-env")], || {
            assert!(ConfigLoader::load_env_file(&env_file));
            ConfigLoader::load_from_file(file.path())
        })
        .unwrap();

        assert_eq!(config.github.token, "ghp_dotenv");
        assert_eq!(config.todoist.token, "td_dotenv");
        assert_eq!(config.github.owner, "from-env");
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::load_env_file(&dir.path().join(".env")));
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let file = yaml_file("{}\n");
        let vars = [("GITHUB_OWNER", "octo"), ("GITHUB_REPO", "widgets")];

        let err = with_env(&vars, || ConfigLoader::load_from_file(file.path())).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>();
        assert!(matches!(config_err, Some(ConfigError::MissingGitHubToken)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_required_fields() {
        let mut config = valid_config();
        config.github.owner = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingGitHubOwner)
        ));

        let mut config = valid_config();
        config.github.repo = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingGitHubRepo)
        ));

        let mut config = valid_config();
        config.todoist.token = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingTodoistToken)
        ));

        let mut config = valid_config();
        config.todoist.project_name = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyProjectName)
        ));
    }

    #[test]
    fn test_validate_zero_interval() {
        let mut config = valid_config();
        config.sync.interval_minutes = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidInterval(0))
        ));
    }

    #[test]
    fn test_validate_interval_upper_bound() {
        let mut config = valid_config();
        config.sync.interval_minutes = MAX_INTERVAL_MINUTES;
        assert!(ConfigLoader::validate(&config).is_ok());

        config.sync.interval_minutes = MAX_INTERVAL_MINUTES + 1;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = valid_config();
        config.todoist.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = valid_config();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = valid_config();
        config.logging.rotation = "weekly".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRotation(_))
        ));
    }
}
