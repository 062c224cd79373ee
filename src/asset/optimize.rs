//! SVG optimization.
//!
//! The pipeline only depends on the [`Optimizer`] contract: raw markup in,
//! optimized markup or nothing out. [`UsvgOptimizer`] is the built-in
//! implementation.

/// Opaque markup transform.
pub trait Optimizer: Send + Sync {
    /// Return optimized markup, or `None` to keep the original.
    fn optimize(&self, markup: &str) -> Option<String>;
}

/// Optimizer backed by usvg: parse, normalize, write back without indentation.
#[derive(Debug, Clone)]
pub struct UsvgOptimizer {
    /// DPI used when resolving absolute units.
    pub dpi: f32,
}

impl Default for UsvgOptimizer {
    fn default() -> Self {
        Self { dpi: 96.0 }
    }
}

impl Optimizer for UsvgOptimizer {
    fn optimize(&self, markup: &str) -> Option<String> {
        let options = usvg::Options {
            dpi: self.dpi,
            ..Default::default()
        };

        let tree = match usvg::Tree::from_str(markup, &options) {
            Ok(tree) => tree,
            Err(e) => {
                crate::debug!("optimize"; "keeping original markup: {}", e);
                return None;
            }
        };

        let write_options = usvg::WriteOptions {
            indent: usvg::Indent::None,
            ..Default::default()
        };

        Some(tree.to_string(&write_options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::markup::extract;

    #[test]
    fn test_usvg_optimizer_keeps_svg_root() {
        let raw = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 20 20">
            <!-- comment -->
            <rect x="0" y="0" width="10" height="10" fill="red"/>
        </svg>"#;

        let optimized = UsvgOptimizer::default().optimize(raw).unwrap();
        assert!(!optimized.contains("comment"));

        let data = extract(&optimized).unwrap();
        assert!(!data.content.is_empty());
    }

    #[test]
    fn test_usvg_optimizer_rejects_garbage() {
        assert!(UsvgOptimizer::default().optimize("definitely not svg").is_none());
    }

    #[test]
    fn test_custom_optimizer() {
        struct Upper;
        impl Optimizer for Upper {
            fn optimize(&self, markup: &str) -> Option<String> {
                Some(markup.to_uppercase())
            }
        }
        assert_eq!(Upper.optimize("<svg/>").as_deref(), Some("<SVG/>"));
    }
}
