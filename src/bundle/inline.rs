//! Inline bundle: every asset's content and attributes keyed by id.
//!
//! ```text
//! ├── alarm.svg        export default {
//! └── nav/cat.svg  ->    "alarm": { "content": "<path/>", "attrs": { "viewBox": "0 0 24 24" } },
//!                        "cat": { ... }
//!                      }
//! ```
//!
//! When two assets share an id the later one wins; the collision is still
//! reported through [`InlineBundle::diagnostics`].

use std::collections::BTreeMap;
use std::path::Path;

use super::ParsedAssets;
use crate::asset::{AssetNaming, MarkupData, SourceAsset};
use crate::catalog::{Diagnostic, SkippedAsset};

/// Serialized shape of the bundle file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    /// `export default {...}`
    Module,
    /// Plain JSON object.
    Json,
}

impl BundleFormat {
    /// Pick the format from the output file extension (`.json` -> JSON).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Module,
        }
    }
}

/// id -> markup data for the inline strategy.
#[derive(Debug, Clone, Default)]
pub struct InlineBundle {
    pub assets: BTreeMap<String, MarkupData>,
    /// Duplicate ids (resolved by last write).
    pub diagnostics: Vec<Diagnostic>,
    pub skipped: Vec<SkippedAsset>,
}

impl InlineBundle {
    /// Build the bundle from sources in order.
    pub fn build(naming: &AssetNaming, sources: &[SourceAsset]) -> Self {
        let parsed = ParsedAssets::parse(naming, sources);
        let diagnostics = parsed.duplicates();

        let mut assets = BTreeMap::new();
        for asset in parsed.assets {
            assets.insert(asset.id, asset.svg);
        }

        Self {
            assets,
            diagnostics,
            skipped: parsed.skipped,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Serialize as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.assets)
    }

    /// Serialize as an ES module with a default export.
    pub fn to_module(&self) -> serde_json::Result<String> {
        Ok(format!("export default {}", self.to_json()?))
    }

    /// Serialize in the given format.
    pub fn render(&self, format: BundleFormat) -> serde_json::Result<String> {
        match format {
            BundleFormat::Module => self.to_module(),
            BundleFormat::Json => self.to_json(),
        }
    }
}
