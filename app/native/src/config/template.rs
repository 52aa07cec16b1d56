//! Configuration template generation.

use std::fs;
use std::path::Path;

/// Generates a JSONC configuration template with every option commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// Wallpaper Configuration File
// ============================
// This file uses JSONC format (JSON with comments).
// Every option below is commented out and shows its default value.
// Command-line flags take precedence over the values in this file.

{
  // "wallpaper": {
  //   // Height in pixels of the black band kept free at the top of each
  //   // display, e.g. for a menu bar. 0 disables the band.
  //   "marginTop": 0,
  //
  //   // Corner radius in pixels of the visible image area (0 = square corners)
  //   "borderRadius": 0,
  //
  //   // Where prepared wallpapers are written. Supports "~". Relative paths
  //   // are resolved against the directory of this file.
  //   // Empty means ~/.local/share/wallpaper
  //   "outputDir": "",
  //
  //   // Displays used when no --display flag is given, as "WIDTHxHEIGHT"
  //   // or "NAME=WIDTHxHEIGHT", e.g. ["Built-in=1512x982", "2560x1440"]
  //   "displays": []
  // }
}
"#
    .to_string()
}

/// Writes the configuration template to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::types::{AppConfig, load_config_from_path};

    #[test]
    fn test_template_parses_to_defaults() {
        let template = generate_config_template();
        let stripped = json_comments::StripComments::new(template.as_bytes());
        let config: AppConfig = serde_json::from_reader(stripped).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_template_documents_every_option() {
        let template = generate_config_template();
        for key in ["marginTop", "borderRadius", "outputDir", "displays"] {
            assert!(template.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_create_config_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.jsonc");

        create_config_file(&path).unwrap();

        let (config, _) = load_config_from_path(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
