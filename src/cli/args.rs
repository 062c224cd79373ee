//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CONFIG_FILE, Strategy};

/// glyphbox svg asset pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (searched upward from the current directory)
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build bundles, sprites and the viewer catalog
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Merge per-strategy catalog files into one viewer document
    #[command(visible_alias = "m")]
    Merge {
        #[command(flatten)]
        args: MergeArgs,
    },

    /// Print the id, attributes and catalog entry of one file
    #[command(visible_alias = "i")]
    Inspect {
        #[command(flatten)]
        args: InspectArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Write catalogs and the viewer document
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub viewer: Option<bool>,

    /// Run the optimizer for every strategy
    #[arg(short = 'O', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub optimize: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Merge command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct MergeArgs {
    /// Catalog files (`<strategy>.json`), in strategy order
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Write the viewer document here
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Inspect command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// SVG file to inspect
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Strategy whose naming and snippet settings apply
    #[arg(short, long, value_enum, default_value_t = Strategy::Inline)]
    pub strategy: Strategy,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::parse_from(["glyphbox", "build", "--clean", "--viewer=false", "-O"]);
        assert!(cli.is_build());
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert!(build_args.clean);
        assert_eq!(build_args.viewer, Some(false));
        assert_eq!(build_args.optimize, Some(true));
        assert_eq!(cli.config, PathBuf::from("glyphbox.toml"));
    }

    #[test]
    fn test_merge_requires_files() {
        assert!(Cli::try_parse_from(["glyphbox", "merge", "-o", "out.json"]).is_err());

        let cli = Cli::parse_from(["glyphbox", "merge", "a.json", "b.json", "-o", "out.json"]);
        let Commands::Merge { args } = cli.command else {
            panic!("expected merge");
        };
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_inspect_strategy() {
        let cli = Cli::parse_from(["glyphbox", "inspect", "a.svg", "--strategy", "symbol"]);
        let Commands::Inspect { args } = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.strategy, Strategy::Symbol);
    }
}
