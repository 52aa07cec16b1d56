//! CLI command definitions using Clap.
//!
//! - `wallpaper` - `prepare` and `plan`
//! - `config_cmd` - configuration file management

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config;
use crate::constants::{APP_NAME, APP_VERSION};
use crate::error::WallpaperError;

pub mod config_cmd;
pub mod wallpaper;

pub use config_cmd::ConfigCommands;
pub use wallpaper::{PlanArgs, PrepareArgs};

/// Prepare images as display wallpapers with a top margin and rounded corners.
#[derive(Parser, Debug)]
#[command(name = "wallpaper")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Prepare an image as wallpaper for one or more displays.
    ///
    /// Scales the image to cover the area below the top margin, keeps the
    /// margin black and optionally rounds the corners of the visible image.
    /// One PNG is written per display.
    #[command(after_long_help = r#"Examples:
  wallpaper prepare forest.jpg -d 2560x1440                    # One display, settings from config
  wallpaper prepare forest.jpg -d 2560x1440 -d 1920x1080 -m 32 # Two displays, 32px top margin
  wallpaper prepare forest.jpg -d 1512x982 -m 38 -r 12 --json  # Rounded corners, JSON output
  wallpaper prepare forest.jpg -d Built-in=1512x982 -d 2560x1440 # Named display"#)]
    Prepare(PrepareArgs),

    /// Show how an image would be scaled and cropped for each display.
    ///
    /// Reads only the image header; nothing is written.
    Plan(PlanArgs),

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(wallpaper completions --shell zsh)"
    ///   wallpaper completions --shell fish > ~/.config/fish/completions/wallpaper.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), WallpaperError> {
        if let Some(path) = self.config_path() {
            if !path.exists() {
                return Err(WallpaperError::ConfigError(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path);
        }

        match &self.command {
            Commands::Prepare(args) => wallpaper::execute_prepare(args),
            Commands::Plan(args) => wallpaper::execute_plan(args),
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallpaper::{Dimension, DisplaySpec};

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_prepare() {
        let cli =
            Cli::try_parse_from(["wallpaper", "prepare", "img.png", "-d", "Desk=1920x1080"]).unwrap();
        match cli.command {
            Commands::Prepare(args) => {
                let expected = DisplaySpec {
                    name: Some("Desk".to_string()),
                    dimension: Dimension::new(1920, 1080).unwrap(),
                };
                assert_eq!(args.displays, vec![expected]);
            }
            _ => panic!("Expected Prepare command"),
        }
    }

    #[test]
    fn test_cli_parses_plan() {
        let cli = Cli::try_parse_from(["wallpaper", "plan", "img.png", "-m", "40"]).unwrap();
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.margin_top, Some(40));
                assert!(args.displays.is_empty());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wallpaper",
            "prepare",
            "img.png",
            "-vv",
            "--config",
            "/tmp/custom.jsonc",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config_path(), Some(PathBuf::from("/tmp/custom.jsonc")));
    }

    #[test]
    fn test_cli_parses_config_init() {
        let cli = Cli::try_parse_from(["wallpaper", "config", "init", "--force", "--stdout"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true, stdout: true, path: None })
        ));
    }

    #[test]
    fn test_cli_parses_config_path() {
        let cli = Cli::try_parse_from(["wallpaper", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path)));
    }

    #[test]
    fn test_cli_parses_completions() {
        let cli = Cli::try_parse_from(["wallpaper", "completions", "--shell", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["wallpaper"]).is_err());
    }

    #[test]
    fn test_missing_custom_config_is_an_error() {
        let cli = Cli::try_parse_from([
            "wallpaper",
            "--config",
            "/definitely/not/here.jsonc",
            "config",
            "path",
        ])
        .unwrap();
        assert!(matches!(cli.execute(), Err(WallpaperError::ConfigError(_))));
    }
}
