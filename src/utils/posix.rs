//! POSIX-style path helpers for asset ids and catalog fields.
//!
//! Asset paths are handled as plain strings with `/` separators so that ids
//! and catalog entries come out identical on every platform.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Trailing extension of the last path segment (`alarm.svg` -> `.svg`).
static EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[^/.]+$").unwrap());

/// Convert platform separators to forward slashes.
///
/// # Examples
///
/// - `icons\nav\alarm.svg` -> `icons/nav/alarm.svg`
/// - `icons/alarm.svg` -> `icons/alarm.svg`
#[inline]
pub fn ensure_posix(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert a filesystem path to a POSIX string.
#[inline]
pub fn posix_string(path: &Path) -> String {
    ensure_posix(&path.to_string_lossy())
}

/// Final segment of a POSIX path.
#[inline]
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Directory portion of a POSIX path, `.` when there is none.
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None => ".",
    }
}

/// Remove the trailing extension from the last path segment.
///
/// # Examples
///
/// - `icons/alarm.svg` -> `icons/alarm`
/// - `icons.v2/alarm` -> `icons.v2/alarm`
/// - `alarm.min.svg` -> `alarm.min`
#[inline]
pub fn strip_extension(path: &str) -> String {
    EXTENSION.replace(path, "").into_owned()
}

/// Join a URL root with a path, collapsing duplicate slashes at the seam.
///
/// # Examples
///
/// - `("/", "/assets/symbols.svg")` -> `/assets/symbols.svg`
/// - `("/app/", "assets/symbols.svg")` -> `/app/assets/symbols.svg`
pub fn join_url(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{root}/{path}")
}
