//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info, warn};
use thiserror::Error;

use mergeviz::{MergevizError, config::AppConfig, element::DisplayRole};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for MergevizError {
    fn from(err: ConfigError) -> Self {
        MergevizError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (mergeviz/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// A file found in step 2 or 3 that cannot be loaded is skipped with a
/// warning; only an explicit path is required to load.
///
/// # Errors
///
/// Returns error if the explicit path doesn't exist, cannot be read, cannot
/// be parsed or holds invalid colors.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("mergeviz/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return Ok(load_or_default(local_config));
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "mergeviz", "mergeviz") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return Ok(load_or_default(&system_config));
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_or_default(path: &Path) -> AppConfig {
    load_config_file(path).unwrap_or_else(|err| {
        warn!(path = path.display().to_string(), error = err.to_string(); "Ignoring unusable configuration file");
        AppConfig::default()
    })
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file doesn't exist, cannot be read, TOML parsing
/// fails or a configured color is invalid.
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_style(&config)?;

    Ok(config)
}

/// Rejects palettes with colors that cannot be parsed.
fn validate_style(config: &AppConfig) -> Result<(), ConfigError> {
    let roles = [
        DisplayRole::Current,
        DisplayRole::MergeLeft,
        DisplayRole::MergeRight,
        DisplayRole::Highlighted,
        DisplayRole::Result,
        DisplayRole::Processed,
        DisplayRole::Pending,
        DisplayRole::Default,
    ];
    for role in roles {
        config.style().color_for(role).map_err(ConfigError::Validation)?;
    }
    config.style().edge_color().map_err(ConfigError::Validation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mergeviz::trace::Algorithm;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let file = write_config("[playback]\nalgorithm = \"divide-conquer\"\n");

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.playback().algorithm(), Algorithm::DivideConquer);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_invalid_explicit_config_is_an_error() {
        let file = write_config("[playback\n");
        assert!(matches!(load_config(Some(file.path())), Err(ConfigError::Parse(_))));

        let file = write_config("[style]\ncurrent = \"nonsense\"\n");
        assert!(matches!(load_config(Some(file.path())), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unusable_implicit_config_falls_back() {
        let file = write_config("speed = [");

        let config = load_or_default(file.path());
        assert_eq!(config.playback().algorithm(), Algorithm::Sequential);
    }

    #[test]
    fn test_config_error_converts() {
        let err: MergevizError = ConfigError::Parse("bad".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Failed to parse TOML configuration: bad");
    }
}
