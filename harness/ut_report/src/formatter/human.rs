//! Human Formatter
//!
//! Console output with optional ANSI color support.
//!
//! ```text
//! ..!.
//! tests/math.rs:20: error: Failure in TEST(Math, Add)
//!     expected <  1 0x01> but was <255 0xff>
//!
//! Errors (1 failures, 4 tests, 1 ignored, 3 ms)
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::{FailureRecord, RunSummary, TestInfo};

use super::{summary_line, write_flushed, OutputFormatter};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const OK: &str = "\x1b[1;32m"; // Bold green
    pub const IGNORED: &str = "\x1b[1;33m"; // Bold yellow
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the human formatter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Formatter for people reading a console.
pub struct HumanFormatter<W: Write> {
    writer: W,
    colors: bool,
    verbose: bool,
}

impl<W: Write> HumanFormatter<W> {
    /// Create a new human formatter.
    ///
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        HumanFormatter {
            writer,
            colors: mode.should_use_colors(is_tty),
            verbose: false,
        }
    }

    /// Plain, uncolored output.
    pub fn new(writer: W) -> Self {
        Self::with_color_mode(writer, ColorMode::Never, false)
    }

    /// Print one line per test instead of progress dots.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.colors {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_string()
        }
    }
}

impl HumanFormatter<io::Stdout> {
    /// Create a human formatter for stdout with explicit color mode.
    pub fn stdout(mode: ColorMode, is_tty: bool) -> Self {
        HumanFormatter::with_color_mode(io::stdout(), mode, is_tty)
    }
}

impl<W: Write> OutputFormatter for HumanFormatter<W> {
    fn group_started(&mut self, _group: &str) {}

    fn group_ended(&mut self, _group: &str) {}

    fn test_started(&mut self, test: &TestInfo) {
        if self.verbose {
            write_flushed(&mut self.writer, &test.to_string());
        }
    }

    fn test_ended(&mut self, test: &TestInfo, duration_ms: u64) {
        let text = if self.verbose {
            format!(" - {duration_ms} ms\n")
        } else if test.is_ignored() {
            self.paint("!", colors::IGNORED)
        } else {
            ".".to_string()
        };
        write_flushed(&mut self.writer, &text);
    }

    fn failure(&mut self, failure: &FailureRecord) {
        let mut block = String::new();
        let _ = write!(
            block,
            "\n{}: {}: Failure in TEST({}, {})\n",
            failure.location_message(),
            self.paint("error", colors::ERROR),
            failure.group(),
            failure.test_name()
        );
        if failure.message().is_empty() {
            block.push_str("\t\n");
        }
        for line in failure.message().lines() {
            let _ = writeln!(block, "\t{line}");
        }
        block.push('\n');
        write_flushed(&mut self.writer, &block);
    }

    fn print(&mut self, file: &str, line: u32, text: &str) {
        write_flushed(&mut self.writer, &format!("\n{file}:{line} {text}\n"));
    }

    fn run_ended(&mut self, summary: &RunSummary) {
        let color = if summary.is_success() {
            colors::OK
        } else {
            colors::ERROR
        };
        let line = format!("\n{}\n", self.paint(&summary_line(summary), color));
        write_flushed(&mut self.writer, &line);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
