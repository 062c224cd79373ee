//! Catalog entries for the asset viewer.
//!
//! One [`CatalogEntry`] is built per source asset within one strategy:
//!
//! ```text
//! (relative path, original markup, optimized markup?)
//!   │ id            AssetNaming::id_for
//!   │ svg           extract(optimized ?? original)
//!   │ width/height  attrs.width|height, else viewBox tokens 3/4
//!   │ sizes         UTF-8 length / 1024, "1.16 KB"
//!   └ copypasta     SnippetGenerator::generate(id)
//! ```
//!
//! Assets whose markup cannot be parsed are skipped, and the remaining list
//! is validated (duplicate ids, missing viewBox) without failing the build.

pub mod validate;

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::asset::{AssetNaming, Attrs, MarkupData, SnippetGenerator, extract};
use crate::utils::posix::{basename, dirname};

pub use validate::{
    Diagnostic, DiagnosticKind, check_duplicates, check_view_box, format_diagnostics,
    print_diagnostics,
};

/// Leading decimal number, as accepted by lenient numeric attribute parsing.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Viewer record for one asset in one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Content and attributes shown by the viewer (optimized when available).
    pub svg: MarkupData,
    pub original_svg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_svg: Option<String>,
    #[serde(with = "dimension")]
    pub width: Option<f64>,
    #[serde(with = "dimension")]
    pub height: Option<f64>,
    pub file_name: String,
    pub file_dir: String,
    pub file_size: String,
    pub optimized_file_size: String,
    pub base_size: String,
    pub full_base_size: String,
    pub copypasta: String,
    pub strategy: String,
}

/// Input triple for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub relative_path: String,
    pub original: String,
    pub optimized: Option<String>,
}

impl CatalogSource {
    pub fn new(relative_path: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            original: original.into(),
            optimized: None,
        }
    }

    pub fn with_optimized(mut self, optimized: impl Into<String>) -> Self {
        self.optimized = Some(optimized.into());
        self
    }
}

/// An asset that was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAsset {
    pub relative_path: String,
    pub reason: String,
}

/// Result of building one strategy's catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    /// Advisory findings, never fatal.
    pub diagnostics: Vec<Diagnostic>,
    /// Assets dropped because their markup could not be parsed.
    pub skipped: Vec<SkippedAsset>,
}

/// Parsed asset, before it is turned into an entry.
struct Asset<'a> {
    id: String,
    source: &'a CatalogSource,
    optimized: Option<&'a str>,
    svg: MarkupData,
}

/// Builds catalog entries for one strategy.
#[derive(Clone)]
pub struct CatalogBuilder {
    strategy: String,
    naming: AssetNaming,
    copypasta: Arc<dyn SnippetGenerator>,
    has_optimizer: bool,
}

impl CatalogBuilder {
    pub fn new(
        strategy: impl Into<String>,
        naming: AssetNaming,
        copypasta: Arc<dyn SnippetGenerator>,
    ) -> Self {
        Self {
            strategy: strategy.into(),
            naming,
            copypasta,
            has_optimizer: false,
        }
    }

    /// Use optimized markup when a source carries it.
    pub fn with_optimizer(mut self, has_optimizer: bool) -> Self {
        self.has_optimizer = has_optimizer;
        self
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Build entries in source order and validate them.
    pub fn build(&self, sources: &[CatalogSource]) -> Catalog {
        let mut skipped = Vec::new();
        let mut assets = Vec::with_capacity(sources.len());

        for source in sources {
            match self.parse(source) {
                Ok(asset) => assets.push(asset),
                Err(e) => skipped.push(SkippedAsset {
                    relative_path: source.relative_path.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        let entries = assets.iter().map(|asset| self.entry_for(asset)).collect();
        let mut diagnostics = check_duplicates(
            assets
                .iter()
                .map(|a| (a.id.as_str(), a.source.relative_path.as_str())),
        );
        diagnostics.extend(check_view_box(
            assets
                .iter()
                .map(|a| (a.source.relative_path.as_str(), &a.svg)),
        ));

        Catalog {
            entries,
            diagnostics,
            skipped,
        }
    }

    fn parse<'a>(&self, source: &'a CatalogSource) -> Result<Asset<'a>, crate::asset::MarkupError> {
        let optimized = source.optimized.as_deref().filter(|_| self.has_optimizer);
        let svg = extract(optimized.unwrap_or(&source.original))?;
        Ok(Asset {
            id: self.naming.id_for(&source.relative_path),
            source,
            optimized,
            svg,
        })
    }

    fn entry_for(&self, asset: &Asset<'_>) -> CatalogEntry {
        let (width, height) = svg_size(&asset.svg.attrs);
        let file_size = size_in_kb(&asset.source.original);
        let optimized_file_size = asset.optimized.map_or_else(|| file_size.clone(), size_in_kb);
        let relative_path = asset.source.relative_path.as_str();

        CatalogEntry {
            svg: asset.svg.clone(),
            original_svg: asset.source.original.clone(),
            optimized_svg: asset.optimized.map(str::to_string),
            width,
            height,
            file_name: basename(relative_path).to_string(),
            file_dir: file_dir(relative_path),
            file_size,
            optimized_file_size,
            base_size: base_size(height),
            full_base_size: full_base_size(width, height),
            copypasta: self.copypasta.generate(&asset.id),
            strategy: self.strategy.clone(),
        }
    }
}

/// Compute display `(width, height)` from root attributes.
///
/// Each side uses its own attribute when it holds a number, otherwise the
/// matching `viewBox` token (`minX minY width height`).
pub fn svg_size(attrs: &Attrs) -> (Option<f64>, Option<f64>) {
    let view_box: Vec<&str> = attrs
        .get("viewBox")
        .map(|vb| {
            vb.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let side = |attr: &str, index: usize| {
        attrs
            .get(attr)
            .and_then(|value| parse_number(value))
            .or_else(|| view_box.get(index).and_then(|token| parse_number(token)))
    };

    (side("width", 2), side("height", 3))
}

/// Parse the leading number of an attribute value (`"24px"` -> 24).
pub fn parse_number(value: &str) -> Option<f64> {
    let matched = LEADING_NUMBER.find(value)?;
    matched
        .as_str()
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// UTF-8 size in kilobytes rounded to two decimals (`"1.16 KB"`).
pub fn size_in_kb(markup: &str) -> String {
    let kb = (markup.len() as f64 / 1024.0 * 100.0).round() / 100.0;
    format!("{kb} KB")
}

/// Directory of the asset, with the source root rendered as `/`.
pub fn file_dir(relative_path: &str) -> String {
    let dir = dirname(relative_path);
    match dir.strip_prefix('.') {
        Some(rest) => format!("/{rest}"),
        None => dir.to_string(),
    }
}

/// `"{height}px"`, or `"unknown"` without a height.
pub fn base_size(height: Option<f64>) -> String {
    height.map_or_else(|| "unknown".to_string(), |h| format!("{h}px"))
}

/// `"{width}x{height}px"`, a missing side renders as `null`.
pub fn full_base_size(width: Option<f64>, height: Option<f64>) -> String {
    let side = |v: Option<f64>| v.map_or_else(|| "null".to_string(), |n| n.to_string());
    format!("{}x{}px", side(width), side(height))
}

/// Serialize whole-number dimensions as JSON integers (`20`, not `20.0`).
mod dimension {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Largest integer an f64 holds exactly.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match *value {
            Some(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT => serializer.serialize_i64(n as i64),
            Some(n) => serializer.serialize_f64(n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Option::<f64>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{IdGenOptions, PathIdGen, TemplateSnippet};

    fn builder(strategy: &str) -> CatalogBuilder {
        let naming = AssetNaming::new(true, Arc::new(PathIdGen), IdGenOptions::default());
        let copypasta = Arc::new(TemplateSnippet::new(r#"{{svg-jar "{id}"}}"#));
        CatalogBuilder::new(strategy, naming, copypasta)
    }

    fn attrs(pairs: &[(&str, &str)]) -> Attrs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_size_from_attrs() {
        let a = attrs(&[("width", "20"), ("height", "20"), ("viewBox", "0 0 20 20")]);
        assert_eq!(svg_size(&a), (Some(20.0), Some(20.0)));
    }

    #[test]
    fn test_size_falls_back_to_view_box() {
        let a = attrs(&[("viewBox", "0 0 24 24")]);
        assert_eq!(svg_size(&a), (Some(24.0), Some(24.0)));

        let mixed = attrs(&[("width", "auto"), ("height", "16"), ("viewBox", "0,0,32,48")]);
        assert_eq!(svg_size(&mixed), (Some(32.0), Some(16.0)));
    }

    #[test]
    fn test_size_unknown() {
        let (width, height) = svg_size(&Attrs::new());
        assert_eq!((width, height), (None, None));
        assert_eq!(base_size(height), "unknown");
        assert_eq!(full_base_size(width, height), "nullxnullpx");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("24"), Some(24.0));
        assert_eq!(parse_number("24px"), Some(24.0));
        assert_eq!(parse_number(" 1.5em"), Some(1.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("100%"), Some(100.0));
        assert_eq!(parse_number("auto"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_size_in_kb() {
        assert_eq!(size_in_kb(&"a".repeat(1188)), "1.16 KB");
        assert_eq!(size_in_kb(&"a".repeat(1536)), "1.5 KB");
        assert_eq!(size_in_kb(""), "0 KB");
        // multi-byte characters count as bytes
        assert_eq!(size_in_kb(&"é".repeat(512)), "1 KB");
    }

    #[test]
    fn test_file_dir() {
        assert_eq!(file_dir("alarm.svg"), "/");
        assert_eq!(file_dir("nav/alarm.svg"), "nav");
        assert_eq!(file_dir("icons.v2/nav/alarm.svg"), "icons.v2/nav");
    }

    #[test]
    fn test_base_sizes() {
        assert_eq!(base_size(Some(20.0)), "20px");
        assert_eq!(base_size(Some(20.5)), "20.5px");
        assert_eq!(full_base_size(Some(24.0), Some(16.0)), "24x16px");
        assert_eq!(full_base_size(None, Some(16.0)), "nullx16px");
    }

    #[test]
    fn test_build_entry() {
        let raw = r#"<svg width="20" height="20" viewBox="0 0 20 20"><path/></svg>"#;
        let catalog = builder("inline").build(&[CatalogSource::new("nav/alarm.svg", raw)]);

        assert!(catalog.diagnostics.is_empty());
        let entry = &catalog.entries[0];
        assert_eq!(entry.svg.content, "<path/>");
        assert_eq!(entry.original_svg, raw);
        assert_eq!(entry.optimized_svg, None);
        assert_eq!((entry.width, entry.height), (Some(20.0), Some(20.0)));
        assert_eq!(entry.file_name, "alarm.svg");
        assert_eq!(entry.file_dir, "nav");
        assert_eq!(entry.file_size, entry.optimized_file_size);
        assert_eq!(entry.base_size, "20px");
        assert_eq!(entry.full_base_size, "20x20px");
        assert_eq!(entry.copypasta, r#"{{svg-jar "alarm"}}"#);
        assert_eq!(entry.strategy, "inline");
    }

    #[test]
    fn test_optimized_markup_is_authoritative() {
        let original = r#"<svg width="20" height="20" viewBox="0 0 20 20">   <path/>   </svg>"#;
        let optimized = r#"<svg viewBox="0 0 20 20"><path/></svg>"#;
        let source = CatalogSource::new("alarm.svg", original).with_optimized(optimized);

        let catalog = builder("inline").with_optimizer(true).build(&[source]);
        let entry = &catalog.entries[0];
        assert_eq!(entry.svg.content, "<path/>");
        assert_eq!(entry.svg.attr("width"), None);
        assert_eq!(entry.original_svg, original);
        assert_eq!(entry.optimized_svg.as_deref(), Some(optimized));
        assert_eq!(entry.file_size, size_in_kb(original));
        assert_eq!(entry.optimized_file_size, size_in_kb(optimized));
    }

    #[test]
    fn test_optimized_markup_ignored_without_optimizer() {
        let original = r#"<svg viewBox="0 0 8 8"><circle/></svg>"#;
        let source = CatalogSource::new("dot.svg", original).with_optimized("<svg/>");

        let catalog = builder("inline").build(&[source]);
        let entry = &catalog.entries[0];
        assert_eq!(entry.svg.content, "<circle/>");
        assert_eq!(entry.optimized_svg, None);
    }

    #[test]
    fn test_malformed_assets_are_skipped() {
        let sources = [
            CatalogSource::new("good.svg", r#"<svg viewBox="0 0 1 1"/>"#),
            CatalogSource::new("broken.svg", "<svg><path/>"),
            CatalogSource::new("notes.svg", "plain text"),
        ];
        let catalog = builder("inline").build(&sources);

        assert_eq!(catalog.entries.len(), 1);
        assert_eq!(catalog.entries[0].file_name, "good.svg");
        let skipped: Vec<_> = catalog.skipped.iter().map(|s| s.relative_path.as_str()).collect();
        assert_eq!(skipped, vec!["broken.svg", "notes.svg"]);
    }

    #[test]
    fn test_loose_markup_is_kept() {
        let sources = [
            CatalogSource::new("a.svg", r#"<svg viewBox="0 0 24 24" width=24><path/></svg>"#),
            CatalogSource::new("b.svg", r#"<svg width="1" width="2" height="2"><g><path></g></svg>"#),
        ];
        let catalog = builder("inline").build(&sources);

        assert!(catalog.skipped.is_empty());
        assert_eq!(catalog.entries.len(), 2);
        assert_eq!(catalog.entries[0].width, Some(24.0));
        assert_eq!(catalog.entries[1].width, Some(2.0));
        assert_eq!(catalog.entries[1].svg.content, "<g><path></g>");
    }

    #[test]
    fn test_validation_diagnostics() {
        let sources = [
            CatalogSource::new("alarm.svg", r#"<svg viewBox="0 0 1 1"/>"#),
            CatalogSource::new("cat.svg", r#"<svg viewBox="0 0 1 1"/>"#),
            CatalogSource::new("nav/alarm.svg", r#"<svg width="1"/>"#),
        ];
        let catalog = builder("inline").build(&sources);

        assert_eq!(catalog.entries.len(), 3);
        assert_eq!(
            catalog.diagnostics,
            vec![
                Diagnostic::duplicate_id("alarm", "alarm.svg"),
                Diagnostic::duplicate_id("alarm", "nav/alarm.svg"),
                Diagnostic::missing_view_box("nav/alarm.svg"),
            ]
        );
    }

    #[test]
    fn test_entry_json_shape() {
        let raw = r#"<svg viewBox="0 0 24 24"><path/></svg>"#;
        let catalog = builder("symbol").build(&[CatalogSource::new("alarm.svg", raw)]);
        let json = serde_json::to_value(&catalog.entries[0]).unwrap();

        assert_eq!(json["width"], serde_json::json!(24));
        assert_eq!(json["fileName"], "alarm.svg");
        assert_eq!(json["fileDir"], "/");
        assert_eq!(json["originalSvg"], raw);
        assert_eq!(json["svg"]["attrs"]["viewBox"], "0 0 24 24");
        assert!(json.get("optimizedSvg").is_none());

        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "svg",
                "originalSvg",
                "width",
                "height",
                "fileName",
                "fileDir",
                "fileSize",
                "optimizedFileSize",
                "baseSize",
                "fullBaseSize",
                "copypasta",
                "strategy"
            ]
        );
    }

    #[test]
    fn test_null_dimensions_serialized() {
        let catalog = builder("inline").build(&[CatalogSource::new("x.svg", "<svg/>")]);
        let json = serde_json::to_value(&catalog.entries[0]).unwrap();
        assert!(json["width"].is_null());
        assert!(json["height"].is_null());

        let back: CatalogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, catalog.entries[0]);
    }
}
