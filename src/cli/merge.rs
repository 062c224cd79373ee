//! Merge command: catalog files -> viewer document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::args::MergeArgs;
use super::common::{to_json, write_output};
use crate::catalog::CatalogEntry;
use crate::config::GlyphConfig;
use crate::log;
use crate::utils::plural_count;
use crate::viewer::{Link, ViewerModel};

/// Merge catalog files into one viewer document.
///
/// Files are merged in argument order, so `inline.json symbol.json` lists
/// inline assets first.
pub fn run_merge(args: &MergeArgs, config: &GlyphConfig) -> Result<()> {
    let model = merge_files(&args.files, config.viewer.links.clone())?;
    write_output(&args.output, &to_json(&model, args.pretty)?)?;

    log!("merge"; "{} from {} into {}",
        plural_count(model.assets.len(), "asset"),
        plural_count(args.files.len(), "catalog"),
        args.output.display());
    Ok(())
}

/// Read every catalog file and merge them.
pub fn merge_files(files: &[impl AsRef<Path>], links: Vec<Link>) -> Result<ViewerModel> {
    if files.is_empty() {
        bail!("no catalog files given");
    }
    let catalogs = files
        .iter()
        .map(|path| read_catalog(path.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(ViewerModel::merge(catalogs, links))
}

fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid catalog file {}", path.display()))
}
