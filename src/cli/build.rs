//! Asset build orchestration.
//!
//! Build pipeline phases:
//! - **Init** - apply CLI overrides, clean output
//! - **Scan** - read every strategy's source tree once
//! - **Strategies** - per strategy in parallel: optimize, write the bundle or
//!   sprite, build the catalog
//! - **Viewer** - write catalog files and merge them into the viewer document
//! - **Finalize** - print diagnostics and a summary

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::args::BuildArgs;
use super::common::{catalog_builder_for, naming_for, to_json, write_output};
use crate::{
    asset::{Optimizer, SourceAsset, UsvgOptimizer, scan_sources},
    bundle::{BundleFormat, InlineBundle, SymbolSprite, build_sprite, loader_snippet},
    catalog::{Catalog, CatalogSource, print_diagnostics},
    config::{GlyphConfig, Strategy, StrategySettings},
    log,
    logger::ProgressLine,
    utils::{plural_count, plural_noun},
    viewer::ViewerModel,
};

/// Outcome of one strategy.
#[derive(Debug, Clone)]
pub struct StrategyReport {
    pub strategy: Strategy,
    /// Sources scanned for this strategy.
    pub scanned: usize,
    pub catalog: Catalog,
    /// Files written for this strategy.
    pub outputs: Vec<PathBuf>,
}

/// Outcome of a full build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub strategies: Vec<StrategyReport>,
    /// Viewer document path, when the viewer is enabled.
    pub viewer: Option<PathBuf>,
}

/// Apply build flags on top of the loaded config.
pub fn apply_build_args(config: &mut GlyphConfig, args: &BuildArgs) {
    crate::logger::set_verbose(args.verbose);

    if let Some(enable) = args.viewer {
        config.viewer.enable = enable;
    }
    if let Some(optimize) = args.optimize {
        config.optimize = optimize;
        config.inline.optimize = None;
        config.symbol.optimize = None;
    }
}

/// Build every configured strategy, then the viewer document.
pub fn build_assets(config: &GlyphConfig, clean: bool, quiet: bool) -> Result<BuildReport> {
    let output = config.output_dir();
    if clean && output.exists() {
        fs::remove_dir_all(&output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }

    let inputs = scan_strategies(config)?;
    let progress = (!quiet).then(|| {
        let counters: Vec<_> = inputs
            .iter()
            .map(|(settings, sources)| (settings.strategy.as_str(), sources.len()))
            .collect();
        ProgressLine::new(&counters)
    });

    // Strategies are independent; collect keeps declaration order.
    let results: Vec<Result<StrategyReport>> = inputs
        .par_iter()
        .map(|(settings, sources)| build_strategy(config, settings, sources, progress.as_ref()))
        .collect();

    if let Some(p) = progress {
        p.finish();
    }
    let strategies = results.into_iter().collect::<Result<Vec<_>>>()?;

    let viewer = if config.viewer.enable {
        Some(write_viewer(config, &strategies)?)
    } else {
        None
    };

    let report = BuildReport { strategies, viewer };
    finalize_build(&report, quiet);
    Ok(report)
}

/// Resolve settings and read sources for every strategy.
fn scan_strategies(config: &GlyphConfig) -> Result<Vec<(StrategySettings, Vec<SourceAsset>)>> {
    config
        .strategies()
        .into_iter()
        .map(|strategy| {
            let settings = config.settings_for(strategy);
            if settings.source_dirs.is_empty() {
                log!("warning"; "[{}] no existing source directory", strategy);
            }
            let sources = scan_sources(&settings.source_dirs)?;
            crate::debug!("scan"; "[{}] {}", strategy, plural_count(sources.len(), "file"));
            Ok((settings, sources))
        })
        .collect()
}

/// Optimize, write the strategy output, build the catalog.
fn build_strategy(
    config: &GlyphConfig,
    settings: &StrategySettings,
    sources: &[SourceAsset],
    progress: Option<&ProgressLine>,
) -> Result<StrategyReport> {
    let name = settings.strategy.as_str();
    let optimizer = settings.optimize.then(UsvgOptimizer::default);

    let prepared: Vec<CatalogSource> = sources
        .par_iter()
        .map(|source| {
            let mut prepared = CatalogSource::new(&source.relative_path, &source.markup);
            if let Some(optimizer) = &optimizer
                && let Some(optimized) = optimizer.optimize(&source.markup)
            {
                prepared = prepared.with_optimized(optimized);
            }
            if let Some(p) = progress {
                p.inc(name);
            }
            prepared
        })
        .collect();

    let bundled: Vec<SourceAsset> = prepared
        .iter()
        .map(|p| {
            let markup = p.optimized.as_deref().unwrap_or(&p.original);
            SourceAsset::new(&p.relative_path, markup)
        })
        .collect();

    let outputs = write_strategy_output(config, settings, &bundled)?;
    let catalog = catalog_builder_for(settings).build(&prepared);

    Ok(StrategyReport {
        strategy: settings.strategy,
        scanned: sources.len(),
        catalog,
        outputs,
    })
}

/// Write the inline bundle or the symbol sprite (plus loader).
fn write_strategy_output(
    config: &GlyphConfig,
    settings: &StrategySettings,
    sources: &[SourceAsset],
) -> Result<Vec<PathBuf>> {
    let naming = naming_for(settings);
    let output_file = &settings.output_file;

    match settings.strategy {
        Strategy::Inline => {
            let bundle = InlineBundle::build(&naming, sources);
            let content = bundle.render(BundleFormat::from_path(output_file))?;
            write_output(output_file, &content)?;
            Ok(vec![output_file.clone()])
        }
        Strategy::Symbol => {
            let sprite = build_sprite(&naming, sources, &SymbolSprite);
            write_output(output_file, &sprite.document)?;
            let mut outputs = vec![output_file.clone()];

            if config.symbol.include_loader {
                let loader = config.loader_path();
                write_output(&loader, &loader_snippet(&config.symbols_url()))?;
                outputs.push(loader);
            }
            Ok(outputs)
        }
    }
}

/// Write `<strategy>.json` catalogs and the merged viewer document.
fn write_viewer(config: &GlyphConfig, reports: &[StrategyReport]) -> Result<PathBuf> {
    for report in reports {
        let path = config.catalog_path(report.strategy);
        write_output(&path, &to_json(&report.catalog.entries, false)?)?;
    }

    let catalogs = reports.iter().map(|r| r.catalog.entries.clone()).collect();
    let model = ViewerModel::merge(catalogs, config.viewer.links.clone());

    let path = config.viewer_path();
    write_output(&path, &model.to_json()?)?;
    Ok(path)
}

/// Print diagnostics, skipped assets and the summary.
fn finalize_build(report: &BuildReport, quiet: bool) {
    for strategy in &report.strategies {
        let name = strategy.strategy.as_str();
        print_diagnostics(name, &strategy.catalog.diagnostics);
        for skipped in &strategy.catalog.skipped {
            crate::debug!("build"; "[{}] skipped {}: {}", name, skipped.relative_path, skipped.reason);
        }
        for output in &strategy.outputs {
            crate::debug!("build"; "[{}] wrote {}", name, output.display());
        }
    }

    if quiet {
        return;
    }

    let skipped: usize = report.strategies.iter().map(|s| s.catalog.skipped.len()).sum();
    if skipped > 0 {
        log!("warning"; "{} skipped (malformed markup, see --verbose)", plural_count(skipped, "asset"));
    }
    let assets: usize = report.strategies.iter().map(|s| s.catalog.entries.len()).sum();
    log!("build"; "done: {} in {}", plural_count(assets, "asset"),
        plural_noun(report.strategies.len(), "strategy", "strategies"));
}
