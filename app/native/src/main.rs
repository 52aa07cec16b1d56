//! `wallpaper` - prepare images as display wallpapers.
//!
//! Logs go to stderr. `RUST_LOG` wins over `-v`; without either only
//! warnings are shown.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wallpaper_lib::cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        eprintln!("wallpaper: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
