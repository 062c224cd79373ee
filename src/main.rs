//! glyphbox - an svg asset pipeline.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use glyphbox::cli::{Cli, Commands, build, inspect, merge};
use glyphbox::config::GlyphConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Build { build_args } => {
            let mut config = GlyphConfig::load(&cli.config)?;
            build::apply_build_args(&mut config, build_args);
            build::build_assets(&config, build_args.clean, build_args.quiet).map(|_| ())
        }
        Commands::Merge { args } => {
            let config = GlyphConfig::load_or_default(&cli.config)?;
            merge::run_merge(args, &config)
        }
        Commands::Inspect { args } => {
            let config = GlyphConfig::load_or_default(&cli.config)?;
            inspect::run_inspect(args, &config)
        }
    }
}
