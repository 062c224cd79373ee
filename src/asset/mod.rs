//! Source assets: identifiers, markup extraction, scanning and optimization.

pub mod id;
pub mod markup;
pub mod optimize;
pub mod scan;

// Types
pub use id::{
    AssetNaming, IdGenOptions, IdGenerator, PathIdGen, PrefixedIdGen, SnippetGenerator,
    TemplateSnippet, derive_id,
};
pub use markup::{Attrs, MarkupData, MarkupError, extract};
pub use optimize::{Optimizer, UsvgOptimizer};

// Scanning
pub use scan::{collect_svg_files, scan_sources};

/// Raw input read once per build: POSIX relative path plus markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    pub relative_path: String,
    pub markup: String,
}

impl SourceAsset {
    pub fn new(relative_path: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            markup: markup.into(),
        }
    }
}
