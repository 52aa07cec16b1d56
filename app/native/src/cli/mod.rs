//! Command-line interface.
//!
//! The binary parses [`Cli`], installs logging from its verbosity and then
//! calls [`Cli::execute`].

mod commands;
mod output;

pub use commands::{Cli, Commands};
