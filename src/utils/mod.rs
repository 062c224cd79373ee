//! Shared helpers for the asset pipeline.

pub mod plural;
pub mod posix;

pub use plural::{plural_count, plural_noun, plural_s};
