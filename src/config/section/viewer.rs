//! `[viewer]` section configuration.
//!
//! ```toml
//! [viewer]
//! enable = true
//! output_file = "glyphbox.json"
//! catalogs_dir = "catalogs"
//! links = [{ text = "Docs", url = "https://example.com/docs" }]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::strategy::validate_relative;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::viewer::Link;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Write catalogs and the merged viewer document.
    pub enable: bool,
    /// Merged document, relative to the output directory.
    pub output_file: PathBuf,
    /// Per-strategy catalogs: `<catalogs_dir>/<strategy>.json`.
    pub catalogs_dir: PathBuf,
    pub links: Vec<Link>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            enable: true,
            output_file: "glyphbox.json".into(),
            catalogs_dir: "catalogs".into(),
            links: Vec::new(),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        validate_relative(FieldPath::new("viewer.output_file"), &self.output_file, diag);
        validate_relative(FieldPath::new("viewer.catalogs_dir"), &self.catalogs_dir, diag);
        for link in &self.links {
            if link.url.is_empty() {
                diag.error(
                    FieldPath::new("viewer.links"),
                    format!("link `{}` has an empty url", link.text),
                );
            }
        }
    }
}
