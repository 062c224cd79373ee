//! glyphbox - an svg asset pipeline.
//!
//! Reads SVG files from source directories and produces, per strategy:
//!
//! | Strategy | Output                                                 |
//! |----------|--------------------------------------------------------|
//! | `inline` | id -> `{content, attrs}` bundle for inlining           |
//! | `symbol` | one hidden sprite of `<symbol>` elements (+ loader)    |
//!
//! plus a catalog per strategy, merged into one faceted viewer document.
//!
//! # Module Structure
//!
//! ```text
//! asset/     # ids, markup extraction, scanning, optimization
//! bundle/    # inline bundle, symbol sprite
//! catalog/   # catalog entries, diagnostics
//! viewer/    # merged viewer model and facets
//! config/    # glyphbox.toml
//! cli/       # commands and build orchestration
//! ```

pub mod asset;
pub mod bundle;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod logger;
pub mod utils;
pub mod viewer;
