// lister_core/src/storage/lister_config.rs
use std::io::ErrorKind;
use std::sync::RwLock;
use ron::from_str;
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use crate::constants::{CONFIG_RON, DEFAULT_INDENT, DEFAULT_REPORT_NAME};
use crate::error::ListerError;
use crate::*;

pub static LISTER_CONFIG: Lazy<RwLock<ListerConfig>> = Lazy::new(|| RwLock::new(load_config()));

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListerConfig {
    /// One indentation unit.
    pub indent: String,
    /// Write indentation on the content line instead of on a line of its own.
    pub compact: bool,
    /// Stop at composites that are already being written further up.
    pub detect_cycles: bool,
    /// File name offered when no output path is given.
    pub default_file_name: String,
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            compact: false,
            detect_cycles: true,
            default_file_name: DEFAULT_REPORT_NAME.to_string(),
        }
    }
}

/// Writes `config` to `path` as .ron and makes it the in memory config.
pub fn save_config(config: &ListerConfig, path: &Path) -> Result<(), ListerError> {
    let write_err = |source| ListerError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let ron = to_string_pretty(config, PrettyConfig::default())?;
    fs::write(path, ron).map_err(write_err)?;

    if let Ok(mut current) = LISTER_CONFIG.write() {
        *current = config.clone();
    }
    log::info!("Saved config to {}.", path.display());
    Ok(())
}

/// Returns a copy of the in memory config, or the defaults if the lock is poisoned.
pub fn current_config() -> ListerConfig {
    match LISTER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(e) => {
            onscreen_error!("Could not read config: {e}.");
            ListerConfig::default()
        }
    }
}

/// Returns the app_dir for the program.
pub fn app_dir() -> PathBuf {
    if let Some(project_dir) = ProjectDirs::from("com", "lister", "component-lister") {
        project_dir.config_dir().to_path_buf()
    } else {
        // No home directory, keep everything next to the working directory
        PathBuf::from(".component-lister")
    }
}

/// Parses a config, falling back to the defaults for anything unreadable.
pub fn parse_config(text: &str) -> ListerConfig {
    from_str(text).unwrap_or_default()
}

/// Location of the config file in the app dir.
pub fn config_path() -> PathBuf {
    app_dir().join(CONFIG_RON)
}

fn load_config() -> ListerConfig {
    load_config_from(&config_path())
}

/// Reads the config at `path`. A missing file gives the defaults.
pub fn load_config_from(path: &Path) -> ListerConfig {
    match fs::read_to_string(path) {
        Ok(txt) => parse_config(&txt),
        Err(e) if e.kind() == ErrorKind::NotFound => ListerConfig::default(),
        Err(e) => {
            onscreen_error!("Error loading config: {e}.");
            ListerConfig::default()
        }
    }
}
