//! Host platform helpers.
//!
//! - [`path`] - Tilde expansion and relative path resolution

pub mod path;
