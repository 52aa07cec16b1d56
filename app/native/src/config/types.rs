//! Configuration types for the wallpaper tool.
//!
//! The configuration file is JSONC (JSON with comments). Every field is
//! optional; anything left out falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::APP_NAME;
use crate::platform::path::expand_and_resolve;
use crate::wallpaper::{DimensionParseError, DisplaySpec, default_output_dir};

/// Wallpaper preparation defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallpaperConfig {
    /// Height in pixels of the black band reserved at the top of each display.
    pub margin_top: u32,

    /// Radius in pixels for rounded corners. 0 disables rounding.
    pub border_radius: u32,

    /// Directory where prepared wallpapers are written.
    ///
    /// Supports `~`. Relative paths are resolved against the directory of the
    /// configuration file. Empty means `~/.local/share/wallpaper`.
    pub output_dir: String,

    /// Displays (`WIDTHxHEIGHT` or `NAME=WIDTHxHEIGHT`) used when none are
    /// given on the command line.
    pub displays: Vec<String>,
}

impl WallpaperConfig {
    /// Returns the output directory, resolving relative paths against `base_dir`.
    #[must_use]
    pub fn output_dir(&self, base_dir: Option<&Path>) -> PathBuf {
        if self.output_dir.trim().is_empty() {
            return default_output_dir();
        }

        let base = base_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        expand_and_resolve(&self.output_dir, &base)
    }

    /// Parses the configured displays.
    ///
    /// # Errors
    ///
    /// Returns the first entry that is not a valid display.
    pub fn display_specs(&self) -> Result<Vec<DisplaySpec>, DimensionParseError> {
        self.displays.iter().map(|display| display.parse()).collect()
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Wallpaper preparation defaults.
    pub wallpaper: WallpaperConfig,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/wallpaper/config.jsonc or ~/.wallpaper.jsonc"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".wallpaper.jsonc", ".wallpaper.json"];

/// Returns the configuration file search paths, in priority order.
///
/// 1. `$XDG_CONFIG_HOME/wallpaper/config.jsonc` / `config.json` (if set)
/// 2. `~/.config/wallpaper/config.jsonc` / `config.json`
/// 3. The platform config directory (`dirs::config_dir()`)
/// 4. `~/.wallpaper.jsonc` / `~/.wallpaper.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let push_dir = |dir: PathBuf, paths: &mut Vec<PathBuf>| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_dir(PathBuf::from(xdg_config).join(APP_NAME), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_NAME), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_NAME), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from the first existing file in [`config_paths`].
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no file exists, or a read/parse error.
pub fn load_config() -> Result<(AppConfig, PathBuf), ConfigError> {
    let path = config_paths().into_iter().find(|path| path.exists()).ok_or(ConfigError::NotFound)?;
    load_config_from_path(&path)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns a read or parse error.
pub fn load_config_from_path(path: &Path) -> Result<(AppConfig, PathBuf), ConfigError> {
    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: AppConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.wallpaper.margin_top, 0);
        assert_eq!(config.wallpaper.border_radius, 0);
        assert!(config.wallpaper.output_dir.is_empty());
        assert!(config.wallpaper.displays.is_empty());
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let json = r#"{
            "wallpaper": {
                "marginTop": 40,
                "borderRadius": 16,
                "outputDir": "~/Pictures/walls",
                "displays": ["2560x1440", "Built-in=1512x982"]
            }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.wallpaper.margin_top, 40);
        assert_eq!(config.wallpaper.border_radius, 16);
        assert_eq!(config.wallpaper.output_dir, "~/Pictures/walls");
        let specs = config.wallpaper.display_specs().unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, None);
        assert_eq!(specs[1].name.as_deref(), Some("Built-in"));
    }

    #[test]
    fn test_config_partial_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"wallpaper": {"borderRadius": 8}}"#).unwrap();
        assert_eq!(config.wallpaper.margin_top, 0);
        assert_eq!(config.wallpaper.border_radius, 8);
        assert!(config.wallpaper.displays.is_empty());
    }

    #[test]
    fn test_invalid_display_is_reported() {
        let config = WallpaperConfig {
            displays: vec!["1920x1080".to_string(), "wide".to_string()],
            ..Default::default()
        };
        assert!(config.display_specs().is_err());
    }

    #[test]
    fn test_output_dir_defaults() {
        assert_eq!(WallpaperConfig::default().output_dir(None), default_output_dir());
    }

    #[test]
    fn test_output_dir_relative_to_config() {
        let config = WallpaperConfig { output_dir: "out".to_string(), ..Default::default() };
        assert_eq!(
            config.output_dir(Some(Path::new("/etc/wallpaper"))),
            PathBuf::from("/etc/wallpaper/out")
        );
    }

    #[test]
    fn test_load_config_from_path_strips_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.jsonc");
        fs::write(
            &path,
            r#"{
                // reserve room for the menu bar
                "wallpaper": { "marginTop": 28 /* px */ }
            }"#,
        )
        .unwrap();

        let (config, loaded_from) = load_config_from_path(&path).unwrap();
        assert_eq!(config.wallpaper.margin_top, 28);
        assert_eq!(loaded_from, path);
    }

    #[test]
    fn test_load_config_from_path_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_config_from_path(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_config_from_path(&dir.path().join("absent.json")),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_config_paths_prefer_jsonc() {
        let paths = config_paths();
        assert!(!paths.is_empty());
        assert!(paths[0].to_string_lossy().ends_with("config.jsonc"));
    }
}
