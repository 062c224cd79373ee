//! Strategy outputs consumed by the host application.
//!
//! | Strategy | Output                                          |
//! |----------|-------------------------------------------------|
//! | `inline` | id -> `{content, attrs}` bundle (module or JSON) |
//! | `symbol` | one sprite document of `<symbol>` elements       |

pub mod inline;
pub mod symbol;

pub use inline::{BundleFormat, InlineBundle};
pub use symbol::{SpriteBuild, SpritePacker, SymbolSprite, build_sprite, loader_snippet};

use crate::asset::{AssetNaming, MarkupData, SourceAsset, extract};
use crate::catalog::{Diagnostic, SkippedAsset, check_duplicates};

/// An asset with its derived id and parsed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAsset {
    pub id: String,
    pub relative_path: String,
    pub svg: MarkupData,
}

/// Sources split into parsed assets and the ones that failed to parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedAssets {
    pub assets: Vec<NamedAsset>,
    pub skipped: Vec<SkippedAsset>,
}

impl ParsedAssets {
    /// Name and parse every source, in order.
    pub fn parse(naming: &AssetNaming, sources: &[SourceAsset]) -> Self {
        let mut parsed = Self::default();
        for source in sources {
            match extract(&source.markup) {
                Ok(svg) => parsed.assets.push(NamedAsset {
                    id: naming.id_for(&source.relative_path),
                    relative_path: source.relative_path.clone(),
                    svg,
                }),
                Err(e) => parsed.skipped.push(SkippedAsset {
                    relative_path: source.relative_path.clone(),
                    reason: e.to_string(),
                }),
            }
        }
        parsed
    }

    /// Duplicate-id diagnostics over the parsed assets.
    pub fn duplicates(&self) -> Vec<Diagnostic> {
        check_duplicates(
            self.assets
                .iter()
                .map(|a| (a.id.as_str(), a.relative_path.as_str())),
        )
    }
}
