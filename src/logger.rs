//! Terminal logging: colored `[module]` prefixes and a build progress line.
//!
//! ```ignore
//! let progress = ProgressLine::new(&[("inline", 40), ("symbol", 40)]);
//! progress.inc("inline");
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{StdoutLock, Write, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable `debug!` output.
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print `[module] message`.
///
/// ```ignore
/// log!("build"; "writing {} catalogs", count);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, printed only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Write one log line over whatever the current line shows.
///
/// An active [`ProgressLine`] is redrawn below it on its next update.
pub fn log(module: &str, message: &str) {
    let mut out = stdout().lock();
    clear_line(&mut out);
    writeln!(out, "{} {message}", colorize_prefix(module)).ok();
    out.flush().ok();
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "build" | "merge" => prefix.bright_blue().bold().to_string(),
        "done" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

#[inline]
fn clear_line(out: &mut StdoutLock<'_>) {
    execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
}

// ============================================================================
// Progress Line
// ============================================================================

/// One in-place line of per-strategy counters: `[build] inline(12/40) symbol(40/40)`.
///
/// Workers call [`inc`](Self::inc) concurrently; a redraw is skipped while
/// another thread holds the display lock.
pub struct ProgressLine {
    counters: Vec<Counter>,
    lock: Mutex<()>,
}

struct Counter {
    name: &'static str,
    total: usize,
    current: AtomicUsize,
}

impl ProgressLine {
    /// Counters with a zero total are left out.
    pub fn new(items: &[(&'static str, usize)]) -> Self {
        let counters = items
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|&(name, total)| Counter {
                name,
                total,
                current: AtomicUsize::new(0),
            })
            .collect();

        let progress = Self {
            counters,
            lock: Mutex::new(()),
        };
        progress.draw(false);
        progress
    }

    pub fn add(&self, name: &str, n: usize) {
        let Some(counter) = self.counters.iter().find(|c| c.name == name) else {
            return;
        };
        counter.current.fetch_add(n, Ordering::Relaxed);
        if let Some(_guard) = self.lock.try_lock() {
            self.draw(false);
        }
    }

    #[inline]
    pub fn inc(&self, name: &str) {
        self.add(name, 1);
    }

    fn render(&self) -> String {
        self.counters
            .iter()
            .map(|c| format!("{}({}/{})", c.name, c.current.load(Ordering::Relaxed), c.total))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn draw(&self, newline: bool) {
        let mut out = stdout().lock();
        clear_line(&mut out);
        write!(out, "{} {}", colorize_prefix("build"), self.render()).ok();
        if newline {
            writeln!(out).ok();
        }
        out.flush().ok();
    }

    /// Leave the final counts on screen.
    pub fn finish(self) {
        let _guard = self.lock.lock();
        self.draw(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_skips_empty_counters() {
        let progress = ProgressLine::new(&[("inline", 3), ("symbol", 0)]);
        assert_eq!(progress.render(), "inline(0/3)");
    }

    #[test]
    fn test_progress_counts() {
        let progress = ProgressLine::new(&[("inline", 3), ("symbol", 2)]);
        progress.inc("inline");
        progress.add("symbol", 2);
        progress.inc("unknown");
        assert_eq!(progress.render(), "inline(1/3) symbol(2/2)");
    }

    #[test]
    fn test_verbose_flag() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
