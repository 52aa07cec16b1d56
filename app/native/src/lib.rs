//! Wallpaper preparation.
//!
//! Scales an image to fill each display below a black top margin,
//! optionally rounds the corners of the visible area, and writes one PNG per
//! display. The [`wallpaper`] module holds the processing pipeline; [`cli`]
//! and [`config`] wrap it as a command-line tool.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod platform;
pub mod wallpaper;
