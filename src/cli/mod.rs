//! Command-line interface module.

mod args;
pub mod build;
pub mod common;
pub mod inspect;
pub mod merge;

pub use args::{BuildArgs, Cli, Commands, InspectArgs, MergeArgs};
