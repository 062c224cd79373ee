//! `strategy`, `[inline]` and `[symbol]` configuration.
//!
//! # Example
//!
//! ```toml
//! strategy = ["inline", "symbol"]   # or a single string
//!
//! [inline]
//! output_file = "inline-assets.js"  # .js => ES module, .json => plain data
//! copypasta = '{{svg-jar "{id}"}}'
//! strip_path = false                # overrides the root value
//!
//! [symbol]
//! output_file = "assets/symbols.svg"
//! prefix = "icon-"
//! include_loader = true
//! loader_file = "symbols-loader.html"
//! copypasta = '{{svg-jar "#{id}"}}'
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Delivery strategy for a set of assets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// id -> markup bundle embedded by the host.
    Inline,
    /// Hidden sprite referenced with `<use>`.
    Symbol,
}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::Inline, Self::Symbol];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Symbol => "symbol",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `strategy = "inline"` or `strategy = ["inline", "symbol"]`.
///
/// Names stay raw strings until validation so an unknown name produces a
/// config diagnostic instead of a TOML parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrategyList {
    One(String),
    Many(Vec<String>),
}

impl Default for StrategyList {
    fn default() -> Self {
        Self::One(Strategy::Inline.as_str().to_string())
    }
}

impl StrategyList {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::One(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Parsed strategies in declaration order, duplicates removed.
    ///
    /// Unknown names are dropped; [`StrategyList::validate`] reports them.
    pub fn resolve(&self) -> Vec<Strategy> {
        let mut out = Vec::new();
        for strategy in self.names().into_iter().filter_map(Strategy::parse) {
            if !out.contains(&strategy) {
                out.push(strategy);
            }
        }
        out
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        const FIELD: FieldPath = FieldPath::new("strategy");

        let names = self.names();
        if names.is_empty() {
            diag.error_with_hint(FIELD, "no strategy configured", r#"strategy = ["inline"]"#);
        } else if names.iter().any(|name| Strategy::parse(name).is_none()) {
            diag.error(FIELD, "Invalid strategy found. Valid options are inline, symbol.");
        }
    }
}

/// Per-strategy values that override the root ones.
pub trait StrategyOverrides {
    fn source_dirs(&self) -> Option<&[PathBuf]>;
    fn strip_path(&self) -> Option<bool>;
    fn optimize(&self) -> Option<bool>;
}

/// `[inline]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineConfig {
    /// Bundle file, relative to the output directory.
    pub output_file: PathBuf,
    /// Copy snippet template; `{id}` is replaced with the asset id.
    pub copypasta: String,
    pub source_dirs: Option<Vec<PathBuf>>,
    pub strip_path: Option<bool>,
    pub optimize: Option<bool>,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            output_file: "inline-assets.js".into(),
            copypasta: r#"{{svg-jar "{id}"}}"#.into(),
            source_dirs: None,
            strip_path: None,
            optimize: None,
        }
    }
}

impl InlineConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_relative(FieldPath::new("inline.output_file"), &self.output_file, diag);
        validate_template(FieldPath::new("inline.copypasta"), &self.copypasta, diag);
    }
}

impl StrategyOverrides for InlineConfig {
    fn source_dirs(&self) -> Option<&[PathBuf]> {
        self.source_dirs.as_deref()
    }

    fn strip_path(&self) -> Option<bool> {
        self.strip_path
    }

    fn optimize(&self) -> Option<bool> {
        self.optimize
    }
}

/// `[symbol]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConfig {
    /// Sprite file, relative to the output directory.
    pub output_file: PathBuf,
    /// Prepended to every symbol id.
    pub prefix: String,
    /// Also write a `<script>` snippet that loads the sprite.
    pub include_loader: bool,
    pub loader_file: PathBuf,
    pub copypasta: String,
    pub source_dirs: Option<Vec<PathBuf>>,
    pub strip_path: Option<bool>,
    pub optimize: Option<bool>,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            output_file: "assets/symbols.svg".into(),
            prefix: String::new(),
            include_loader: true,
            loader_file: "symbols-loader.html".into(),
            copypasta: r##"{{svg-jar "#{id}"}}"##.into(),
            source_dirs: None,
            strip_path: None,
            optimize: None,
        }
    }
}

impl SymbolConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_relative(FieldPath::new("symbol.output_file"), &self.output_file, diag);
        if self.include_loader {
            validate_relative(FieldPath::new("symbol.loader_file"), &self.loader_file, diag);
        }
        validate_template(FieldPath::new("symbol.copypasta"), &self.copypasta, diag);
    }
}

impl StrategyOverrides for SymbolConfig {
    fn source_dirs(&self) -> Option<&[PathBuf]> {
        self.source_dirs.as_deref()
    }

    fn strip_path(&self) -> Option<bool> {
        self.strip_path
    }

    fn optimize(&self) -> Option<bool> {
        self.optimize
    }
}

/// Output names must be non-empty and relative to the output directory.
pub(crate) fn validate_relative(field: FieldPath, path: &Path, diag: &mut ConfigDiagnostics) {
    if path.as_os_str().is_empty() {
        diag.error(field, "must not be empty");
    } else if path.is_absolute() {
        diag.error_with_hint(
            field,
            format!("must be relative, got `{}`", path.display()),
            "paths are resolved against the output directory",
        );
    }
}

fn validate_template(field: FieldPath, template: &str, diag: &mut ConfigDiagnostics) {
    if !template.contains(crate::asset::TemplateSnippet::PLACEHOLDER) {
        diag.error_with_hint(
            field,
            "missing `{id}` placeholder",
            r#"e.g. '{{svg-jar "{id}"}}'"#,
        );
    }
}
