//! Configuration section definitions.
//!
//! | Module     | TOML keys                         | Purpose                        |
//! |------------|-----------------------------------|--------------------------------|
//! | `strategy` | `strategy`, `[inline]`, `[symbol]` | Strategy list and overrides    |
//! | `viewer`   | `[viewer]`                        | Catalog files, viewer document |

mod strategy;
mod viewer;

pub use strategy::{
    InlineConfig, Strategy, StrategyList, StrategyOverrides, SymbolConfig,
};
pub use viewer::ViewerConfig;
