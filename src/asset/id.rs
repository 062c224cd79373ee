//! Asset identifier derivation.
//!
//! An id is computed from the asset's relative path in four steps:
//!
//! ```text
//! icons\nav\alarm.svg
//!   │ ensure_posix      -> icons/nav/alarm.svg
//!   │ strip_path        -> alarm.svg          (only when enabled)
//!   │ strip_extension   -> alarm
//!   └ IdGenerator       -> alarm / prefix-alarm / ...
//! ```
//!
//! Ids are deterministic for a fixed input tuple but not unique by
//! construction; collisions are reported by catalog validation.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::posix::{basename, ensure_posix, strip_extension};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());

/// Options handed to every [`IdGenerator`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdGenOptions {
    /// Prefix prepended by [`PrefixedIdGen`].
    pub prefix: String,
}

impl IdGenOptions {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// Turns a transformed asset path into the final id.
///
/// Implementations must be deterministic, duplicate detection relies on it.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, path: &str, options: &IdGenOptions) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn(&str, &IdGenOptions) -> String + Send + Sync,
{
    fn generate(&self, path: &str, options: &IdGenOptions) -> String {
        self(path, options)
    }
}

/// Uses the transformed path as-is (inline strategy default).
#[derive(Debug, Clone, Copy, Default)]
pub struct PathIdGen;

impl IdGenerator for PathIdGen {
    fn generate(&self, path: &str, _options: &IdGenOptions) -> String {
        path.to_string()
    }
}

/// `prefix + path` with whitespace replaced by `-` (symbol strategy default).
///
/// The result has to be usable as an XML `id` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedIdGen;

impl IdGenerator for PrefixedIdGen {
    fn generate(&self, path: &str, options: &IdGenOptions) -> String {
        let id = format!("{}{}", options.prefix, path);
        WHITESPACE.replace_all(&id, "-").into_owned()
    }
}

/// Builds the copy-paste snippet shown next to an asset in the viewer.
pub trait SnippetGenerator: Send + Sync {
    fn generate(&self, id: &str) -> String;
}

impl<F> SnippetGenerator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn generate(&self, id: &str) -> String {
        self(id)
    }
}

/// Snippet built from a template with an `{id}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSnippet {
    template: String,
}

impl TemplateSnippet {
    /// Placeholder replaced with the asset id.
    pub const PLACEHOLDER: &'static str = "{id}";

    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl SnippetGenerator for TemplateSnippet {
    fn generate(&self, id: &str) -> String {
        self.template.replace(Self::PLACEHOLDER, id)
    }
}

/// Everything needed to turn a relative path into an id.
#[derive(Clone)]
pub struct AssetNaming {
    /// Keep only the file's base name.
    pub strip_path: bool,
    pub id_gen: Arc<dyn IdGenerator>,
    pub id_gen_options: IdGenOptions,
}

impl AssetNaming {
    pub fn new(strip_path: bool, id_gen: Arc<dyn IdGenerator>, id_gen_options: IdGenOptions) -> Self {
        Self {
            strip_path,
            id_gen,
            id_gen_options,
        }
    }

    /// Derive the id for a relative asset path.
    #[inline]
    pub fn id_for(&self, relative_path: &str) -> String {
        derive_id(
            relative_path,
            self.strip_path,
            self.id_gen.as_ref(),
            &self.id_gen_options,
        )
    }
}

impl std::fmt::Debug for AssetNaming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetNaming")
            .field("strip_path", &self.strip_path)
            .field("id_gen_options", &self.id_gen_options)
            .finish_non_exhaustive()
    }
}

/// Derive an asset id from its relative path.
pub fn derive_id(
    relative_path: &str,
    strip_path: bool,
    id_gen: &dyn IdGenerator,
    options: &IdGenOptions,
) -> String {
    let posix = ensure_posix(relative_path);
    let path = if strip_path { basename(&posix) } else { &posix };
    id_gen.generate(&strip_extension(path), options)
}
