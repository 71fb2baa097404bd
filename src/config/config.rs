use crate::git::{self, StatusResolver, StatusStrategy, UntrackedFiles};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for repo-status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Status backend configuration
    pub status: StatusSettings,
    /// Logging configuration
    pub log: LogSettings,
}

/// Status backend settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatusSettings {
    /// Backend name: `process` (git executable) or `library` (libgit2)
    pub strategy: String,
    /// Git executable used by the process backend and plain status
    pub git_binary: String,
    /// Value for `--untracked-files` (`all`, `normal` or `no`)
    pub untracked_files: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// tracing-subscriber filter directive, e.g. `warn` or `repo_status=debug`
    pub filter: String,
}

impl Default for StatusSettings {
    fn default() -> Self {
        StatusSettings {
            strategy: StatusStrategy::Process.to_string(),
            git_binary: "git".to_string(),
            untracked_files: "all".to_string(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: "warn".to_string(),
        }
    }
}

impl StatusSettings {
    /// Parse the configured backend name
    pub fn strategy(&self) -> git::Result<StatusStrategy> {
        self.strategy.parse()
    }

    /// Parse the configured untracked-files mode
    pub fn untracked_files(&self) -> git::Result<UntrackedFiles> {
        self.untracked_files.parse()
    }
}

impl Config {
    /// Get the default configuration file path
    /// Returns ~/.config/repo-status/config.yaml on Unix-like systems
    /// Returns %APPDATA%\repo-status\config.yaml on Windows
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("repo-status");

        Ok(config_dir.join("config.yaml"))
    }

    /// Load configuration from a YAML file
    /// If the file doesn't exist, returns the default configuration
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from_file(path)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let yaml = serde_yaml::to_string(self).context("Failed to serialize configuration")?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Create a new default configuration file at the default path
    /// Only creates the file if it doesn't already exist
    pub fn init_default() -> Result<PathBuf> {
        let path = Self::default_path()?;

        if path.exists() {
            return Ok(path);
        }

        Config::default().save_to_file(&path)?;

        Ok(path)
    }

    /// Build a status resolver from these settings
    ///
    /// Fails with `UnhandledStrategy` if the configured backend is unknown,
    /// or `InvalidUntrackedMode` if `untracked_files` is not one of git's modes.
    pub fn resolver(&self) -> git::Result<StatusResolver> {
        let strategy = self.status.strategy()?;
        let untracked = self.status.untracked_files()?;

        Ok(StatusResolver::new(strategy)
            .with_program(&self.status.git_binary)
            .with_untracked_files(untracked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.status.strategy, "process");
        assert_eq!(config.status.git_binary, "git");
        assert_eq!(config.status.untracked_files, "all");
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let original = Config::default();
        original.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "status:\n  strategy: library\n").unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.status.strategy, "library");
        assert_eq!(config.status.git_binary, "git");
        assert_eq!(config.log, LogSettings::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "status: [not, a, map]\n").unwrap();

        assert!(Config::load_from_file(&config_path).is_err());
    }

    #[test]
    fn test_resolver_from_config() {
        let mut config = Config::default();
        config.status.strategy = "libgit2".to_string();

        let resolver = config.resolver().unwrap();
        assert_eq!(resolver.strategy(), StatusStrategy::Library);
    }

    #[test]
    fn test_unknown_strategy_in_config() {
        let mut config = Config::default();
        config.status.strategy = "mercurial".to_string();

        assert!(matches!(
            config.resolver(),
            Err(GitError::UnhandledStrategy(_))
        ));
    }

    #[test]
    fn test_untracked_mode_in_config() {
        let mut config = Config::default();
        assert_eq!(config.status.untracked_files().unwrap(), UntrackedFiles::All);

        config.status.untracked_files = "no".to_string();
        assert_eq!(config.status.untracked_files().unwrap(), UntrackedFiles::No);
        assert!(config.resolver().is_ok());
    }

    #[test]
    fn test_invalid_untracked_mode_in_config() {
        let mut config = Config::default();
        config.status.untracked_files = "some".to_string();

        assert!(matches!(
            config.resolver(),
            Err(GitError::InvalidUntrackedMode(ref s)) if s == "some"
        ));
    }
}
