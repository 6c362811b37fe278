//! TeamCity Formatter
//!
//! Service-message output for CI servers that parse `##teamcity[...]` lines.
//!
//! Every event becomes exactly one line:
//!
//! ```text
//! ##teamcity[testSuiteStarted name='group']
//! ##teamcity[testStarted name='test']
//! ##teamcity[testFailed name='test' message='file:20' details='message']
//! ##teamcity[testFinished name='test' duration='42']
//! ##teamcity[testSuiteFinished name='group']
//! ```
//!
//! See: <https://www.jetbrains.com/help/teamcity/service-messages.html>

use std::io::{self, Write};

use crate::{FailureRecord, RunSummary, TestInfo};

use super::{summary_line, write_flushed, OutputFormatter};

/// Escape an attribute value for a TeamCity service message.
///
/// Only these six characters are rewritten: `'`, `|`, `[`, `]`, newline and
/// carriage return. Everything else, non-ASCII included, passes through.
pub fn escape_teamcity(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    push_escaped(&mut result, s);
    result
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\'' => out.push_str("|'"),
            '|' => out.push_str("||"),
            '[' => out.push_str("|["),
            ']' => out.push_str("|]"),
            '\n' => out.push_str("|n"),
            '\r' => out.push_str("|r"),
            c => out.push(c),
        }
    }
}

/// Formatter producing TeamCity service messages.
pub struct TeamCityFormatter<W: Write> {
    writer: W,
    /// The line currently being built.
    line: String,
}

impl<W: Write> TeamCityFormatter<W> {
    pub fn new(writer: W) -> Self {
        TeamCityFormatter {
            writer,
            line: String::new(),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn begin(&mut self, event: &str) {
        self.line.clear();
        self.line.push_str("##teamcity[");
        self.line.push_str(event);
    }

    fn attr(&mut self, key: &str, value: &str) {
        self.line.push(' ');
        self.line.push_str(key);
        self.line.push_str("='");
        push_escaped(&mut self.line, value);
        self.line.push('\'');
    }

    fn emit(&mut self) {
        self.line.push_str("]\n");
        write_flushed(&mut self.writer, &self.line);
        self.line.clear();
    }

    fn message(&mut self, event: &str, name: &str) {
        self.begin(event);
        self.attr("name", name);
        self.emit();
    }
}

impl TeamCityFormatter<io::Stdout> {
    /// Create a TeamCity formatter for stdout.
    pub fn stdout() -> Self {
        TeamCityFormatter::new(io::stdout())
    }
}

impl<W: Write> OutputFormatter for TeamCityFormatter<W> {
    fn group_started(&mut self, group: &str) {
        self.message("testSuiteStarted", group);
    }

    fn group_ended(&mut self, group: &str) {
        self.message("testSuiteFinished", group);
    }

    fn test_started(&mut self, test: &TestInfo) {
        self.message("testStarted", test.name());
        if test.is_ignored() {
            self.message("testIgnored", test.name());
        }
    }

    fn test_ended(&mut self, test: &TestInfo, duration_ms: u64) {
        self.begin("testFinished");
        self.attr("name", test.name());
        self.attr("duration", &duration_ms.to_string());
        self.emit();
    }

    fn failure(&mut self, failure: &FailureRecord) {
        self.begin("testFailed");
        self.attr("name", failure.test_name());
        self.attr("message", &failure.location_message());
        self.attr("details", failure.message());
        self.emit();
    }

    fn print(&mut self, file: &str, line: u32, text: &str) {
        // Plain text between service messages lands in the build log as is.
        write_flushed(&mut self.writer, &format!("{file}:{line} {text}\n"));
    }

    fn run_ended(&mut self, summary: &RunSummary) {
        // Not a service message: TeamCity passes plain lines through to the build log.
        let line = format!("{}\n", summary_line(summary));
        write_flushed(&mut self.writer, &line);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
