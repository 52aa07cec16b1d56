//! Config CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;

use crate::config::config_paths;
use crate::config::template::{create_config_file, generate_config_template};
use crate::error::WallpaperError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Create a configuration file with every option documented.
    ///
    /// All options are commented out; uncomment the ones you want to change.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  wallpaper config init                                 # Create config at default location
  wallpaper config init --force                         # Overwrite existing config
  wallpaper config init --path ~/walls/config.jsonc     # Create at custom path
  wallpaper config init --stdout                        # Print template to stdout"#
    )]
    Init {
        /// Overwrite the configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Where to write the file.
        /// If not specified, uses the first search path (see `config path`).
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template to stdout instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// List the configuration search paths and mark the one in use.
    Path,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be written.
pub fn execute(cmd: &ConfigCommands) -> Result<(), WallpaperError> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => init_config(*force, path.clone()),
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
    }
}

fn init_config(force: bool, custom_path: Option<PathBuf>) -> Result<(), WallpaperError> {
    let config_path = custom_path
        .or_else(|| config_paths().into_iter().next())
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if config_path.exists() && !force {
        return Err(WallpaperError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(&config_path).map_err(|e| {
        WallpaperError::ConfigError(format!(
            "Failed to create config file {}: {e}",
            config_path.display()
        ))
    })?;

    println!("Configuration file created at: {}", config_path.display());
    Ok(())
}

fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let marker = match (path.exists(), found_config) {
            (true, false) => {
                found_config = true;
                " (active)".green().to_string()
            }
            (true, true) => " (exists)".dimmed().to_string(),
            (false, _) => String::new(),
        };

        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if !found_config {
        println!("\nNo configuration file found.");
        println!("Run 'wallpaper config init' to create one.");
    }
}
