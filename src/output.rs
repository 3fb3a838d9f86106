//! Terminal output formatting for the tilepack CLI.
//!
//! Progress goes to stderr as Cargo-style lines with a right-aligned verb,
//! e.g. `   Compiling blue (tiles.png)`. Stdout carries only the palette
//! listing and shell completions.

use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// The verbs tilepack reports progress with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// An input is being compiled or sampled.
    Compiling,
    Sampled,
    /// A generated file landed on disk.
    Wrote,
    Preview,
    Created,
    /// Palette slot usage after assignment.
    Palettes,
    Rebalanced,
    /// Pixels whose colour had no index in their tile's palette.
    Unmatched,
    Finished,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Compiling => "Compiling",
            Verb::Sampled => "Sampled",
            Verb::Wrote => "Wrote",
            Verb::Preview => "Preview",
            Verb::Created => "Created",
            Verb::Palettes => "Palettes",
            Verb::Rebalanced => "Rebalanced",
            Verb::Unmatched => "Unmatched",
            Verb::Finished => "Finished",
        }
    }

    fn colour(self) -> &'static str {
        match self {
            Verb::Compiling | Verb::Sampled | Verb::Created | Verb::Finished => GREEN,
            Verb::Wrote | Verb::Preview | Verb::Palettes | Verb::Rebalanced => CYAN,
            Verb::Unmatched => YELLOW,
        }
    }
}

/// Render one status line, without the trailing newline.
pub fn format_line(verb: Verb, message: &str, colour: bool) -> String {
    let name = verb.as_str();
    if colour {
        format!("{BOLD}{}{name:>VERB_WIDTH$}{RESET} {message}", verb.colour())
    } else {
        format!("{name:>VERB_WIDTH$} {message}")
    }
}

/// Status printer for the tilepack commands.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    colour: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            colour: io::stderr().is_terminal(),
        }
    }

    pub fn print(&self, verb: Verb, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", format_line(verb, message, self.colour));
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(1, "tile", "tiles")` → "1 tile".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
