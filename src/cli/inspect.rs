//! Inspect command: show how one file is named and cataloged.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;

use super::args::InspectArgs;
use super::common::{catalog_builder_for, naming_for, to_json};
use crate::asset::{Optimizer, UsvgOptimizer};
use crate::catalog::{CatalogEntry, CatalogSource, format_diagnostics};
use crate::config::{GlyphConfig, StrategySettings};
use crate::utils::posix::posix_string;

/// Printed result of `inspect`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub relative_path: String,
    pub entry: CatalogEntry,
    /// Advisory findings for this file alone (missing viewBox).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub fn run_inspect(args: &InspectArgs, config: &GlyphConfig) -> Result<()> {
    let settings = config.settings_for(args.strategy);
    let inspection = inspect_file(&args.file, &settings)?;
    println!("{}", to_json(&inspection, args.pretty)?);
    Ok(())
}

/// Name, optimize and catalog a single file with the strategy's settings.
pub fn inspect_file(file: &Path, settings: &StrategySettings) -> Result<Inspection> {
    let markup =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let relative_path = relative_to_sources(file, &settings.source_dirs);

    let mut source = CatalogSource::new(&relative_path, markup);
    if settings.optimize
        && let Some(optimized) = UsvgOptimizer::default().optimize(&source.original)
    {
        source = source.with_optimized(optimized);
    }

    let catalog = catalog_builder_for(settings).build(std::slice::from_ref(&source));
    if let Some(skipped) = catalog.skipped.first() {
        bail!("{}: {}", file.display(), skipped.reason);
    }
    let Some(entry) = catalog.entries.into_iter().next() else {
        bail!("{}: no entry produced", file.display());
    };

    let warnings = if catalog.diagnostics.is_empty() {
        Vec::new()
    } else {
        vec![format_diagnostics(&catalog.diagnostics)]
    };

    Ok(Inspection {
        id: naming_for(settings).id_for(&relative_path),
        relative_path,
        entry,
        warnings,
    })
}

/// Path relative to the first source dir containing `file`, else the file name.
fn relative_to_sources(file: &Path, source_dirs: &[PathBuf]) -> String {
    let absolute = fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
    source_dirs
        .iter()
        .filter_map(|dir| {
            let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.clone());
            absolute.strip_prefix(dir).ok().map(posix_string)
        })
        .next()
        .unwrap_or_else(|| {
            file.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::config::Strategy;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_inside_source_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("public/nav/my cat.svg");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, r#"<svg width="20" height="20"><circle/></svg>"#).unwrap();

        let config = test_parse_config("[symbol]\nprefix = \"icon-\"\n", dir.path());
        let inspection = inspect_file(&file, &config.settings_for(Strategy::Symbol)).unwrap();

        assert_eq!(inspection.relative_path, "nav/my cat.svg");
        assert_eq!(inspection.id, "icon-my-cat");
        assert_eq!(inspection.entry.file_dir, "nav");
        assert_eq!(inspection.entry.full_base_size, "20x20px");
        assert_eq!(inspection.warnings.len(), 1);
    }

    #[test]
    fn test_inspect_outside_source_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("loose.svg");
        fs::write(&file, r#"<svg viewBox="0 0 8 8"/>"#).unwrap();

        let config = test_parse_config("", dir.path());
        let inspection = inspect_file(&file, &config.settings_for(Strategy::Inline)).unwrap();

        assert_eq!(inspection.id, "loose");
        assert_eq!(inspection.entry.copypasta, r#"{{svg-jar "loose"}}"#);
        assert!(inspection.warnings.is_empty());
    }

    #[test]
    fn test_inspect_malformed_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.svg");
        fs::write(&file, "<div/>").unwrap();

        let config = test_parse_config("", dir.path());
        assert!(inspect_file(&file, &config.settings_for(Strategy::Inline)).is_err());
    }
}
