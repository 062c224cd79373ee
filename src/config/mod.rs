//! Pipeline configuration from `glyphbox.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # strategy, [inline], [symbol], [viewer]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # upward config file search
//! └── mod.rs         # GlyphConfig (this file)
//! ```
//!
//! # Resolution
//!
//! `source_dirs`, `strip_path` and `optimize` may be set at the root or in a
//! strategy section. The section value wins:
//!
//! ```toml
//! source_dirs = ["public"]
//! strip_path = true
//!
//! [inline]
//! strip_path = false   # inline ids keep their directories
//! ```

pub mod section;
pub mod types;
mod util;

pub use section::{
    InlineConfig, Strategy, StrategyList, StrategyOverrides, SymbolConfig, ViewerConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{find_config_file, find_config_file_from};

use crate::log;
use crate::utils::posix::{join_url, posix_string};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "glyphbox.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing glyphbox.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root, the config file's directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// URL prefix the sprite is served under.
    pub root_url: String,

    /// Merged in order; later directories win on equal relative paths.
    pub source_dirs: Vec<PathBuf>,

    pub strategy: StrategyList,

    /// Keep only file base names in ids.
    pub strip_path: bool,

    /// Run the optimizer before bundling.
    pub optimize: bool,

    /// Output directory, relative to the project root.
    pub output: PathBuf,

    pub viewer: ViewerConfig,
    pub inline: InlineConfig,
    pub symbol: SymbolConfig,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            root_url: "/".to_string(),
            source_dirs: vec![PathBuf::from("public")],
            strategy: StrategyList::default(),
            strip_path: true,
            optimize: false,
            output: PathBuf::from("dist"),
            viewer: ViewerConfig::default(),
            inline: InlineConfig::default(),
            symbol: SymbolConfig::default(),
        }
    }
}

/// Options for one strategy after applying section overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySettings {
    pub strategy: Strategy,
    /// Absolute; directories that do not exist are dropped.
    pub source_dirs: Vec<PathBuf>,
    pub strip_path: bool,
    pub optimize: bool,
    /// Absolute path of the strategy's main output.
    pub output_file: PathBuf,
    pub copypasta: String,
    /// Id prefix (symbol ids only).
    pub prefix: String,
}

impl GlyphConfig {
    /// Load the config file, searching upward from cwd.
    ///
    /// The project root is the config file's parent directory.
    pub fn load(config: &Path) -> Result<Self> {
        let Some(config_path) = find_config_file(config) else {
            bail!(ConfigError::Validation(format!(
                "config file `{}` not found in this directory or any parent",
                config.display()
            )));
        };
        Self::load_from(&config_path)
    }

    /// Like [`GlyphConfig::load`], falling back to defaults rooted at cwd.
    pub fn load_or_default(config: &Path) -> Result<Self> {
        match find_config_file(config) {
            Some(path) => Self::load_from(&path),
            None => {
                crate::debug!("config"; "no {} found, using defaults", config.display());
                let cwd = std::env::current_dir().context("Failed to get current working directory")?;
                let mut defaults = Self::default();
                defaults.set_root(&cwd);
                Ok(defaults)
            }
        }
    }

    /// Load and validate a config file at a known path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::from_path(path)?;
        config.config_path = path.to_path_buf();
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.set_root(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Shorthand for `config.get_root().join(path)`.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root_join(&self.output)
    }

    /// Configured strategies in declaration order.
    pub fn strategies(&self) -> Vec<Strategy> {
        self.strategy.resolve()
    }

    fn overrides(&self, strategy: Strategy) -> &dyn StrategyOverrides {
        match strategy {
            Strategy::Inline => &self.inline,
            Strategy::Symbol => &self.symbol,
        }
    }

    /// Resolve the options for one strategy.
    pub fn settings_for(&self, strategy: Strategy) -> StrategySettings {
        let overrides = self.overrides(strategy);

        let source_dirs = overrides
            .source_dirs()
            .unwrap_or(self.source_dirs.as_slice())
            .iter()
            .map(|dir| self.root_join(dir))
            .filter(|dir| dir.is_dir())
            .collect();

        let (output_file, copypasta, prefix) = match strategy {
            Strategy::Inline => (&self.inline.output_file, &self.inline.copypasta, ""),
            Strategy::Symbol => (
                &self.symbol.output_file,
                &self.symbol.copypasta,
                self.symbol.prefix.as_str(),
            ),
        };

        StrategySettings {
            strategy,
            source_dirs,
            strip_path: overrides.strip_path().unwrap_or(self.strip_path),
            optimize: overrides.optimize().unwrap_or(self.optimize),
            output_file: self.output_dir().join(output_file),
            copypasta: copypasta.clone(),
            prefix: prefix.to_string(),
        }
    }

    /// `<output>/<catalogs_dir>/<strategy>.json`
    pub fn catalog_path(&self, strategy: Strategy) -> PathBuf {
        self.output_dir()
            .join(&self.viewer.catalogs_dir)
            .join(format!("{strategy}.json"))
    }

    pub fn viewer_path(&self) -> PathBuf {
        self.output_dir().join(&self.viewer.output_file)
    }

    pub fn loader_path(&self) -> PathBuf {
        self.output_dir().join(&self.symbol.loader_file)
    }

    /// Public URL of the symbol sprite.
    pub fn symbols_url(&self) -> String {
        join_url(&self.root_url, &posix_string(&self.symbol.output_file))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.strategy.validate(&mut diag);
        if self.source_dirs.is_empty() {
            diag.error(FieldPath::new("source_dirs"), "at least one source directory is required");
        }
        if self.output.as_os_str().is_empty() {
            diag.error(FieldPath::new("output"), "must not be empty");
        }

        for strategy in self.strategies() {
            match strategy {
                Strategy::Inline => self.inline.validate(&mut diag),
                Strategy::Symbol => self.symbol.validate(&mut diag),
            }
        }
        self.viewer.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config rooted at `root`, panicking on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str, root: &Path) -> GlyphConfig {
    let (mut parsed, ignored) = GlyphConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.set_root(root);
    parsed
}

// ============================================================================
// tests
// ============================================================================
