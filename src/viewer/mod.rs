//! Viewer model: every strategy's catalog merged into one document.
//!
//! ```text
//! inline.json ─┐
//!              ├─► assets (strategy order, then source order)
//! symbol.json ─┘   + static metadata (details, searchKeys, sortBy, arrangeBy, links)
//!                  + filters (facets over fileDir, baseSize[, strategy])
//! ```
//!
//! The `strategy` facet is only added when more than one strategy
//! contributed assets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

/// A labelled entry key (`{"name": "File name", "key": "fileName"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLabel {
    pub name: String,
    pub key: String,
}

impl KeyLabel {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// External link shown in the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// One distinct facet value and how many entries carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetItem {
    pub name: String,
    pub count: usize,
}

/// Named grouping of entries by one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub key: String,
    pub items: Vec<FacetItem>,
}

/// Entry fields that can be faceted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKey {
    FileDir,
    BaseSize,
    Strategy,
}

impl FacetKey {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FileDir => "Directory",
            Self::BaseSize => "Base size",
            Self::Strategy => "Strategy",
        }
    }

    /// Serialized entry field name.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FileDir => "fileDir",
            Self::BaseSize => "baseSize",
            Self::Strategy => "strategy",
        }
    }

    /// Value of this field on an entry, `None` when unset.
    pub fn value_of(self, entry: &CatalogEntry) -> Option<&str> {
        let value = match self {
            Self::FileDir => &entry.file_dir,
            Self::BaseSize => &entry.base_size,
            Self::Strategy => &entry.strategy,
        };
        Some(value.as_str()).filter(|v| !v.is_empty())
    }
}

/// The document consumed by the asset viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerModel {
    pub assets: Vec<CatalogEntry>,
    pub details: Vec<KeyLabel>,
    pub search_keys: Vec<String>,
    pub sort_by: Vec<KeyLabel>,
    pub arrange_by: Vec<KeyLabel>,
    pub filters: Vec<Facet>,
    pub links: Vec<Link>,
}

impl ViewerModel {
    /// Merge per-strategy catalogs into one model.
    pub fn merge(catalogs: Vec<Vec<CatalogEntry>>, links: Vec<Link>) -> Self {
        let many = has_many_strategies(&catalogs);
        let assets: Vec<_> = catalogs.into_iter().flatten().collect();

        let mut facet_keys = vec![FacetKey::FileDir, FacetKey::BaseSize];
        if many {
            facet_keys.push(FacetKey::Strategy);
        }
        let filters = facet_keys
            .into_iter()
            .map(|key| build_facet(&assets, key))
            .collect();

        Self {
            assets,
            details: details(),
            search_keys: search_keys(),
            sort_by: sort_by(),
            arrange_by: arrange_by(),
            filters,
            links,
        }
    }

    /// Look up a facet by its entry key.
    pub fn filter(&self, key: &str) -> Option<&Facet> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Serialize to the viewer document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a viewer document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// More than one non-empty catalog was supplied.
pub fn has_many_strategies(catalogs: &[Vec<CatalogEntry>]) -> bool {
    catalogs.iter().filter(|c| !c.is_empty()).count() > 1
}

/// Count distinct values of `key`, sorted by value.
pub fn build_facet(entries: &[CatalogEntry], key: FacetKey) -> Facet {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in entries.iter().filter_map(|entry| key.value_of(entry)) {
        *counts.entry(value).or_default() += 1;
    }

    Facet {
        name: key.name().to_string(),
        key: key.key().to_string(),
        items: counts
            .into_iter()
            .map(|(name, count)| FacetItem {
                name: name.to_string(),
                count,
            })
            .collect(),
    }
}

fn details() -> Vec<KeyLabel> {
    vec![
        KeyLabel::new("File name", "fileName"),
        KeyLabel::new("Directory", "fileDir"),
        KeyLabel::new("Base size", "fullBaseSize"),
        KeyLabel::new("Original file size", "fileSize"),
        KeyLabel::new("Optimized file size", "optimizedFileSize"),
        KeyLabel::new("Strategy", "strategy"),
    ]
}

fn search_keys() -> Vec<String> {
    vec!["fileName".to_string(), "fileDir".to_string()]
}

fn sort_by() -> Vec<KeyLabel> {
    vec![
        KeyLabel::new("File name", "fileName"),
        KeyLabel::new("Base size", "height"),
    ]
}

fn arrange_by() -> Vec<KeyLabel> {
    vec![
        KeyLabel::new("Directory", "fileDir"),
        KeyLabel::new("Base size", "baseSize"),
    ]
}
