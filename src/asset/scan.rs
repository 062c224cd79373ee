//! Source asset scanning.
//!
//! Source directories are merged into one tree: when two directories hold a
//! file with the same relative path, the later directory wins.
//!
//! ```text
//! public/            vendor/icons/        merged
//! ├── alarm.svg      ├── alarm.svg   ->   ├── alarm.svg   (vendor/icons)
//! └── nav/cat.svg    └── readme.md        └── nav/cat.svg (public)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::WalkDir;

use super::SourceAsset;
use crate::utils::posix::posix_string;

/// Files that are never assets even with a matching extension.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect relative path -> absolute path for every SVG file.
///
/// Missing directories are skipped. Result is ordered by relative path.
pub fn collect_svg_files(dirs: &[PathBuf]) -> BTreeMap<String, PathBuf> {
    let mut files = BTreeMap::new();

    for dir in dirs.iter().filter(|dir| dir.is_dir()) {
        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if !is_svg_file(&path) {
                continue;
            }
            let relative = path.strip_prefix(dir).unwrap_or(&path);
            files.insert(posix_string(relative), path.clone());
        }
    }

    files
}

/// Read every SVG file found in `dirs`.
///
/// Empty files are skipped. Bytes that are not valid UTF-8 are replaced with
/// `U+FFFD` instead of failing the whole scan.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn scan_sources(dirs: &[PathBuf]) -> Result<Vec<SourceAsset>> {
    let mut assets = Vec::new();

    for (relative_path, path) in collect_svg_files(dirs) {
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        if bytes.is_empty() {
            crate::debug!("scan"; "skipping empty file {}", relative_path);
            continue;
        }
        let markup = match String::from_utf8(bytes) {
            Ok(markup) => markup,
            Err(e) => {
                crate::debug!("scan"; "{} is not valid UTF-8, decoding lossily", relative_path);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        assets.push(SourceAsset::new(relative_path, markup));
    }

    Ok(assets)
}

#[inline]
fn is_svg_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    !IGNORED_FILES.contains(&name) && path.extension().is_some_and(|ext| ext == "svg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_only_svg_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "alarm.svg", "<svg/>");
        write(tmp.path(), "nav/cat.svg", "<svg></svg>");
        write(tmp.path(), "readme.md", "# icons");
        write(tmp.path(), "photo.png", "png");

        let assets = scan_sources(&[tmp.path().to_path_buf()]).unwrap();
        let paths: Vec<_> = assets.iter().map(|a| a.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["alarm.svg", "nav/cat.svg"]);
        assert_eq!(assets[1].markup, "<svg></svg>");
    }

    #[test]
    fn test_later_dir_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(first.path(), "alarm.svg", "<svg>first</svg>");
        write(first.path(), "cat.svg", "<svg>cat</svg>");
        write(second.path(), "alarm.svg", "<svg>second</svg>");

        let assets =
            scan_sources(&[first.path().to_path_buf(), second.path().to_path_buf()]).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].relative_path, "alarm.svg");
        assert_eq!(assets[0].markup, "<svg>second</svg>");
    }

    #[test]
    fn test_empty_files_and_missing_dirs_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "empty.svg", "");
        write(tmp.path(), "full.svg", "<svg/>");

        let dirs = vec![tmp.path().join("does-not-exist"), tmp.path().to_path_buf()];
        let assets = scan_sources(&dirs).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].relative_path, "full.svg");
    }

    #[test]
    fn test_non_utf8_file_decoded_lossily() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "good.svg", "<svg/>");
        fs::write(tmp.path().join("latin1.svg"), b"<svg><title>caf\xE9</title></svg>").unwrap();

        let assets = scan_sources(&[tmp.path().to_path_buf()]).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].relative_path, "good.svg");
        assert_eq!(assets[1].relative_path, "latin1.svg");
        assert_eq!(assets[1].markup, "<svg><title>caf\u{FFFD}</title></svg>");
    }
}
