use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "keyfind";
const CONFIG_FILE_NAME: &str = "config.toml";
const USAGE_FILE_NAME: &str = "launcher.conf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Text,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,
    pub usage_path: PathBuf,
    pub app_dirs: Vec<PathBuf>,
    pub scan_depth: usize,
    pub store_backend: StoreBackend,
    pub sqlite_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data = data_dir();
        Self {
            config_path: config_dir().join(APP_DIR_NAME).join(CONFIG_FILE_NAME),
            usage_path: config_dir().join(USAGE_FILE_NAME),
            app_dirs: vec![
                PathBuf::from("/usr/share/applications"),
                PathBuf::from("/usr/local/share/applications"),
                data.join("applications"),
            ],
            scan_depth: 1,
            store_backend: StoreBackend::Text,
            sqlite_path: data.join(APP_DIR_NAME).join("usage.sqlite3"),
            log_dir: data.join(APP_DIR_NAME).join("logs"),
        }
    }
}

pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(std::env::temp_dir)
}

/// `$XDG_CONFIG_HOME`, falling back to `~/.config`.
pub fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| home_dir().join(".config"))
}

/// `$XDG_DATA_HOME`, falling back to `~/.local/share`.
pub fn data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| home_dir().join(".local").join("share"))
}

pub fn default_config_path() -> PathBuf {
    config_dir().join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Reads the config at `path` (or the default location). A missing file
/// yields defaults; keys absent from the file keep their defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    let mut cfg = match fs::read_to_string(&path) {
        Ok(text) => toml::from_str::<Config>(&text)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(err) => return Err(err.into()),
    };
    cfg.config_path = path;

    validate(&cfg)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg)?;
    if let Some(parent) = cfg.config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(cfg)?;
    fs::write(&cfg.config_path, text)?;
    Ok(())
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(1..=8).contains(&cfg.scan_depth) {
        return Err(ConfigError::Invalid("scan_depth must be between 1 and 8".into()));
    }

    if cfg.usage_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("usage_path is required".into()));
    }

    if cfg.store_backend == StoreBackend::Sqlite && cfg.sqlite_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "sqlite_path is required for the sqlite backend".into(),
        ));
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("config_path is required".into()));
    }

    Ok(())
}
