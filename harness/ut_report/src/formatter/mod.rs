//! Output Formatters
//!
//! Renders dispatcher events into a concrete textual protocol:
//! - Human: progress dots, failure blocks and a summary line
//! - TeamCity: `##teamcity[...]` service messages for CI servers
//!
//! Each formatter implements the `OutputFormatter` trait. The rest of the
//! engine only ever holds a `&mut dyn OutputFormatter` and never asks which
//! format it is talking to.

mod human;
mod teamcity;

pub use human::{ColorMode, HumanFormatter};
pub use teamcity::{escape_teamcity, TeamCityFormatter};

use std::io::Write;

use crate::{FailureRecord, RunSummary, TestInfo};

/// Trait for rendering run events in various formats.
///
/// Implementations write (and flush) each event as it arrives so a crash
/// mid-run still leaves every earlier event in the output.
pub trait OutputFormatter {
    /// A new test group begins.
    fn group_started(&mut self, group: &str);

    /// The current test group is finished.
    fn group_ended(&mut self, group: &str);

    /// A test unit begins. Ignored tests are announced here too.
    fn test_started(&mut self, test: &TestInfo);

    /// A test unit finished after `duration_ms` milliseconds.
    fn test_ended(&mut self, test: &TestInfo, duration_ms: u64);

    /// An assertion failure escaped one phase of the running test.
    fn failure(&mut self, failure: &FailureRecord);

    /// A running test printed `text` at `file:line`.
    fn print(&mut self, file: &str, line: u32, text: &str);

    /// The whole run is over.
    fn run_ended(&mut self, summary: &RunSummary);

    /// Flush any buffered output.
    fn flush(&mut self);
}

/// Write the closing summary line shared by every built-in formatter.
///
/// `OK (3 tests, 1 ignored, 12 ms)` or
/// `Errors (2 failures, 3 tests, 1 ignored, 12 ms)`.
pub(crate) fn summary_line(summary: &RunSummary) -> String {
    let counts = format!(
        "{} tests, {} ignored, {} ms",
        summary.tests, summary.ignored, summary.elapsed_ms
    );
    if summary.is_success() {
        format!("OK ({counts})")
    } else {
        format!("Errors ({} failures, {counts})", summary.failures)
    }
}

/// Write `text` and flush, ignoring writer errors.
///
/// A broken output stream must never abort the run it is reporting on.
pub(crate) fn write_flushed<W: Write>(writer: &mut W, text: &str) {
    let _ = writer.write_all(text.as_bytes());
    let _ = writer.flush();
}
