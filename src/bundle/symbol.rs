//! Symbol sprite: all assets packed into one hidden SVG document.
//!
//! ```text
//! <svg xmlns="http://www.w3.org/2000/svg" style="display: none">
//!   <symbol id="alarm" viewBox="0 0 24 24">...</symbol>
//!   <symbol id="cat" viewBox="0 0 16 16">...</symbol>
//! </svg>
//! ```
//!
//! Pages reference symbols with `<use href="#alarm"/>` once the sprite is in
//! the document, either inlined by the host or fetched by [`loader_snippet`].

use quick_xml::escape::escape;

use super::{NamedAsset, ParsedAssets};
use crate::asset::{AssetNaming, SourceAsset};
use crate::catalog::{Diagnostic, SkippedAsset};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Root attributes carried over onto each `<symbol>`.
const SYMBOL_ATTRS: &[&str] = &["viewBox", "preserveAspectRatio"];

/// Packs named assets into a single sprite document.
pub trait SpritePacker: Send + Sync {
    fn pack(&self, assets: &[NamedAsset]) -> String;
}

/// Default packer: one `<symbol>` per asset inside a hidden `<svg>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolSprite;

impl SpritePacker for SymbolSprite {
    fn pack(&self, assets: &[NamedAsset]) -> String {
        let body: usize = assets.iter().map(|a| a.svg.content.len() + 64).sum();
        let mut out = String::with_capacity(body + 96);

        out.push_str("<svg");
        push_attr(&mut out, "xmlns", SVG_NS);
        push_attr(&mut out, "style", "display: none");
        out.push('>');

        for asset in assets {
            out.push_str("<symbol");
            push_attr(&mut out, "id", &asset.id);
            for name in SYMBOL_ATTRS {
                if let Some(value) = asset.svg.attr(name) {
                    push_attr(&mut out, name, value);
                }
            }
            out.push('>');
            out.push_str(&asset.svg.content);
            out.push_str("</symbol>");
        }

        out.push_str("</svg>");
        out
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Result of packing a strategy's sources.
#[derive(Debug, Clone)]
pub struct SpriteBuild {
    pub document: String,
    pub symbols: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub skipped: Vec<SkippedAsset>,
}

/// Name, parse, and pack sources with the given packer.
pub fn build_sprite(
    naming: &AssetNaming,
    sources: &[SourceAsset],
    packer: &dyn SpritePacker,
) -> SpriteBuild {
    let parsed = ParsedAssets::parse(naming, sources);
    SpriteBuild {
        document: packer.pack(&parsed.assets),
        symbols: parsed.assets.len(),
        diagnostics: parsed.duplicates(),
        skipped: parsed.skipped,
    }
}

/// `<script>` that fetches the sprite and prepends it to `<body>`.
pub fn loader_snippet(symbols_url: &str) -> String {
    // JSON string literals are valid JS string literals
    let url = serde_json::Value::from(symbols_url).to_string();
    format!(
        r#"<script>
(function() {{
  fetch({url})
    .then(function(res) {{ return res.ok ? res.text() : ''; }})
    .then(function(svg) {{
      if (!svg) return;
      var holder = document.createElement('div');
      holder.style.display = 'none';
      holder.innerHTML = svg;
      document.body.insertBefore(holder, document.body.firstChild);
    }});
}})();
</script>
"#
    )
}
