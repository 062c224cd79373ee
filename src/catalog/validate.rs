//! Advisory checks over a strategy's assets.
//!
//! Checks never fail the build. They return [`Diagnostic`] records and the
//! caller decides how to surface them (see [`print_diagnostics`]).
//!
//! | Check               | Reported item                    |
//! |---------------------|----------------------------------|
//! | duplicate ids       | every asset sharing an id        |
//! | missing `viewBox`   | every asset without the attribute |

use std::fmt;

use owo_colors::OwoColorize;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::asset::MarkupData;
use crate::log;
use crate::utils::plural_s;

/// Kind of data-quality problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// Two or more assets resolve to the same id.
    DuplicateId,
    /// Root element has no `viewBox` attribute.
    MissingViewBox,
}

impl DiagnosticKind {
    /// Heading used when printing a group of diagnostics.
    pub const fn title(self) -> &'static str {
        match self {
            Self::DuplicateId => "duplicate IDs found",
            Self::MissingViewBox => "SVG files without viewBox found",
        }
    }
}

/// One offending asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Asset id (duplicate-id diagnostics only).
    pub id: Option<String>,
    /// Source path relative to its source directory.
    pub path: String,
}

impl Diagnostic {
    pub fn duplicate_id(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::DuplicateId,
            id: Some(id.into()),
            path: path.into(),
        }
    }

    pub fn missing_view_box(path: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::MissingViewBox,
            id: None,
            path: path.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "ID: \"{}\" Path: {}", id, self.path),
            None => write!(f, "Path: {}", self.path),
        }
    }
}

/// Report every asset whose id is shared with another asset.
///
/// Groups appear in order of each id's first occurrence, members in input
/// order.
pub fn check_duplicates<'a, I>(items: I) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let items: Vec<_> = items.into_iter().collect();

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for (id, _) in &items {
        *counts.entry(*id).or_default() += 1;
    }

    let mut seen = FxHashSet::default();
    let mut diagnostics = Vec::new();
    for (id, _) in &items {
        if counts[id] < 2 || !seen.insert(*id) {
            continue;
        }
        diagnostics.extend(
            items
                .iter()
                .filter(|(other, _)| other == id)
                .map(|(other, path)| Diagnostic::duplicate_id(*other, *path)),
        );
    }

    diagnostics
}

/// Report every asset whose root element lacks a `viewBox`.
pub fn check_view_box<'a, I>(items: I) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = (&'a str, &'a MarkupData)>,
{
    items
        .into_iter()
        .filter(|(_, svg)| !svg.has_view_box())
        .map(|(path, _)| Diagnostic::missing_view_box(path))
        .collect()
}

/// Format diagnostics as text blocks, one per kind.
///
/// ```text
/// duplicate IDs found:
/// ID: "alarm" Path: alarm.svg
/// ID: "alarm" Path: nav/alarm.svg
/// ```
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    grouped(diagnostics)
        .into_iter()
        .map(|(kind, group)| {
            let mut lines = vec![format!("{}:", kind.title())];
            lines.extend(group.iter().map(ToString::to_string));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Print diagnostics with the standard log format.
///
/// ```text
/// [warning] [inline] duplicate IDs found (2 assets)
///   - ID: "alarm" Path: alarm.svg
///   - ID: "alarm" Path: nav/alarm.svg
/// ```
pub fn print_diagnostics(strategy: &str, diagnostics: &[Diagnostic]) {
    for (kind, group) in grouped(diagnostics) {
        eprintln!();
        log!("warning"; "[{}] {} ({} asset{})",
            strategy, kind.title(), group.len(), plural_s(group.len()));
        for diagnostic in group {
            eprintln!("  {} {}", "-".yellow(), diagnostic);
        }
    }
}

/// Split diagnostics by kind, keeping kind order stable.
fn grouped(diagnostics: &[Diagnostic]) -> Vec<(DiagnosticKind, Vec<&Diagnostic>)> {
    let mut groups: Vec<(DiagnosticKind, Vec<&Diagnostic>)> = Vec::new();
    for diagnostic in diagnostics {
        match groups.iter_mut().find(|(kind, _)| *kind == diagnostic.kind) {
            Some((_, group)) => group.push(diagnostic),
            None => groups.push((diagnostic.kind, vec![diagnostic])),
        }
    }
    groups
}
