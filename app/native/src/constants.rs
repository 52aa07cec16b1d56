//! Application-wide constants.

/// Application name, used for configuration and output directories.
pub const APP_NAME: &str = "wallpaper";

/// Application version from Cargo.toml.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
