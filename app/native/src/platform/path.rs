//! Path expansion for user-supplied locations.
//!
//! Paths coming from the command line or the configuration file may start
//! with `~`. Relative configuration paths are resolved against the directory
//! holding the configuration file.

use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory.
///
/// Surrounding whitespace is ignored; an empty input gives an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return PathBuf::new();
    }

    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Expands `path` and joins it onto `base_dir` unless it is already absolute.
///
/// ```ignore
/// use std::path::Path;
/// use wallpaper_lib::platform::path::expand_and_resolve;
///
/// let resolved = expand_and_resolve("walls", Path::new("/home/me/.config/wallpaper"));
/// assert_eq!(resolved, Path::new("/home/me/.config/wallpaper/walls"));
/// ```
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);
    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_blank_is_empty() {
        assert_eq!(expand(""), PathBuf::new());
        assert_eq!(expand("  \t"), PathBuf::new());
    }

    #[test]
    fn test_expand_keeps_plain_paths() {
        assert_eq!(expand("/srv/walls"), PathBuf::from("/srv/walls"));
        assert_eq!(expand("walls/out"), PathBuf::from("walls/out"));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand("~/Pictures/prepared");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("Pictures/prepared"));
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Path::new("/home/me/.config/wallpaper");
        assert_eq!(
            expand_and_resolve(" prepared ", base),
            PathBuf::from("/home/me/.config/wallpaper/prepared")
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_and_home_paths() {
        let base = Path::new("/home/me/.config/wallpaper");
        assert_eq!(expand_and_resolve("/tmp/walls", base), PathBuf::from("/tmp/walls"));

        let home = expand_and_resolve("~/walls", base);
        assert!(!home.starts_with(base));
        assert!(home.ends_with("walls"));
    }

    #[test]
    fn test_resolve_blank_is_empty() {
        assert_eq!(expand_and_resolve("", Path::new("/base")), PathBuf::new());
    }
}
