//! Reading and writing the user config file.
//!
//! Config lives at `$XDG_CONFIG_HOME/rota/config.toml` (falling back to
//! `~/.config/rota/config.toml`). The same directory holds the OAuth
//! credential and token files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The rota config directory, honoring `XDG_CONFIG_HOME`
pub fn config_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| {
            let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
            home.join(".config")
        });
    base.join("rota")
}

/// Read the config from `dir`, or the default when no file exists yet
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the config to `dir`, creating the directory if needed
pub fn save_config(dir: &Path, config: &Config) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(|e| ConfigError::WriteError {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = dir.join("config.toml");
    let text = toml::to_string_pretty(config).unwrap_or_default();
    fs::write(&path, text).map_err(|e| ConfigError::WriteError { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.list_id, None);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            list_id: Some("MDAxMjM0NTY3ODkwMTIzNDU2Nzg".to_string()),
        };
        save_config(dir.path(), &config).unwrap();
        let loaded = load_config(dir.path()).unwrap();
        assert_eq!(loaded.list_id, config.list_id);
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("rota");
        save_config(&nested, &Config::default()).unwrap();
        assert!(nested.join("config.toml").exists());
    }

    #[test]
    fn test_clearing_list_id() {
        let dir = TempDir::new().unwrap();
        save_config(
            dir.path(),
            &Config {
                list_id: Some("abc".to_string()),
            },
        )
        .unwrap();
        save_config(dir.path(), &Config { list_id: None }).unwrap();
        assert_eq!(load_config(dir.path()).unwrap().list_id, None);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "list_id = [not toml").unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
