use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path.
///
/// Paths that fail to expand (unset variable) or are not valid UTF-8 are
/// returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => shellexpand::full(s)
            .map(|expanded| PathBuf::from(expanded.into_owned()))
            .unwrap_or_else(|_| path.to_path_buf()),
        None => path.to_path_buf(),
    }
}

/// Show `path` relative to `base` when it lies below it.
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
