//! Configuration for the wallpaper tool.
//!
//! The configuration file is JSONC (JSON with comments) and is loaded once
//! per process. A missing file means defaults; a broken file is reported as
//! a warning and defaults are used.

pub mod template;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    AppConfig, ConfigError, WallpaperConfig, config_paths, load_config as load_config_default,
    load_config_from_path,
};

/// Global configuration instance, loaded on first use.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a configuration file to use instead of the default search paths.
///
/// Must be called before the first [`get_config`]. Returns `false` if a path
/// was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

fn load_or_default() -> AppConfig {
    let result = CUSTOM_CONFIG_PATH.get().map_or_else(load_config_default, |path| {
        load_config_from_path(path)
    });

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            AppConfig::default()
        }
    }
}

/// Returns the global configuration, loading it on first call.
pub fn get_config() -> &'static AppConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

/// Directory of the loaded configuration file, used to resolve relative paths.
#[must_use]
pub fn get_config_dir() -> Option<PathBuf> {
    get_config_path().and_then(|path| path.parent()).map(std::path::Path::to_path_buf)
}
