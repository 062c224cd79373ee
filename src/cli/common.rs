//! Common utilities shared across CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::asset::{AssetNaming, IdGenOptions, PathIdGen, PrefixedIdGen, TemplateSnippet};
use crate::catalog::CatalogBuilder;
use crate::config::{Strategy, StrategySettings};

/// Id naming for a strategy's default generator.
pub fn naming_for(settings: &StrategySettings) -> AssetNaming {
    match settings.strategy {
        Strategy::Inline => {
            AssetNaming::new(settings.strip_path, Arc::new(PathIdGen), IdGenOptions::default())
        }
        Strategy::Symbol => AssetNaming::new(
            settings.strip_path,
            Arc::new(PrefixedIdGen),
            IdGenOptions::with_prefix(&settings.prefix),
        ),
    }
}

/// Catalog builder wired with the strategy's naming and copy snippet.
pub fn catalog_builder_for(settings: &StrategySettings) -> CatalogBuilder {
    CatalogBuilder::new(
        settings.strategy.as_str(),
        naming_for(settings),
        Arc::new(TemplateSnippet::new(&settings.copypasta)),
    )
    .with_optimizer(settings.optimize)
}

/// Write a file, creating parent directories.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Serialize to compact or pretty JSON.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn settings(strategy: Strategy, prefix: &str) -> StrategySettings {
        StrategySettings {
            strategy,
            source_dirs: Vec::new(),
            strip_path: true,
            optimize: false,
            output_file: PathBuf::from("out"),
            copypasta: "<use href=\"#{id}\"/>".to_string(),
            prefix: prefix.to_string(),
        }
    }

    #[test]
    fn test_default_generators_per_strategy() {
        let inline = naming_for(&settings(Strategy::Inline, "ignored-"));
        assert_eq!(inline.id_for("nav/my icon.svg"), "my icon");

        let symbol = naming_for(&settings(Strategy::Symbol, "icon-"));
        assert_eq!(symbol.id_for("nav/my icon.svg"), "icon-my-icon");
    }

    #[test]
    fn test_catalog_builder_uses_template() {
        let builder = catalog_builder_for(&settings(Strategy::Symbol, "i-"));
        let catalog = builder.build(&[crate::catalog::CatalogSource::new("a.svg", "<svg/>")]);

        assert_eq!(builder.strategy(), "symbol");
        assert_eq!(catalog.entries[0].copypasta, r##"<use href="#i-a"/>"##);
    }

    #[test]
    fn test_write_output_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.txt");
        write_output(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}
