//! Per-run result accumulator.
//!
//! A `ResultDispatcher` lives for exactly one driver run. It counts tests and
//! failures, timestamps each test with the injected [`Clock`], and forwards
//! every event to the formatter in call order.
//!
//! Malformed sequences are tolerated silently: a group end with no open group
//! and a test end with no open test produce no output at all.

use crate::{Clock, FailureRecord, OutputFormatter, RunSummary, TestInfo};

/// Accumulates one run's events and broadcasts them to a formatter.
pub struct ResultDispatcher<'run> {
    formatter: &'run mut dyn OutputFormatter,
    clock: &'run dyn Clock,
    /// Group opened by `group_started` and not yet closed.
    current_group: Option<String>,
    /// Start timestamp of the test currently open.
    test_started_at: Option<u64>,
    /// Whether the open test has reported a failure yet.
    current_test_failed: bool,
    run_started_at: u64,
    summary: RunSummary,
}

impl<'run> ResultDispatcher<'run> {
    /// Begin a run. The run's elapsed time is measured from here.
    pub fn new(formatter: &'run mut dyn OutputFormatter, clock: &'run dyn Clock) -> Self {
        let run_started_at = clock.now_millis();
        ResultDispatcher {
            formatter,
            clock,
            current_group: None,
            test_started_at: None,
            current_test_failed: false,
            run_started_at,
            summary: RunSummary::default(),
        }
    }

    /// Open a test group.
    pub fn group_started(&mut self, group: &str) {
        self.current_group = Some(group.to_string());
        self.formatter.group_started(group);
    }

    /// Close the open test group. Does nothing when no group is open.
    pub fn group_ended(&mut self, group: &str) {
        let Some(open) = self.current_group.take() else {
            tracing::trace!(group, "group end without group start ignored");
            return;
        };
        if open != group {
            tracing::debug!(open = %open, group, "closing group under a different name");
        }
        self.formatter.group_ended(&open);
    }

    /// Name of the group currently open, if any.
    pub fn current_group(&self) -> Option<&str> {
        self.current_group.as_deref()
    }

    /// Open a test and start its clock.
    pub fn test_started(&mut self, test: &TestInfo) {
        self.summary.tests += 1;
        if test.is_ignored() {
            self.summary.ignored += 1;
        }
        self.current_test_failed = false;
        self.test_started_at = Some(self.clock.now_millis());
        self.formatter.test_started(test);
    }

    /// Close the open test.
    ///
    /// Returns the test's elapsed milliseconds, or `None` (and emits nothing)
    /// when no test was open.
    pub fn test_ended(&mut self, test: &TestInfo) -> Option<u64> {
        let Some(started_at) = self.test_started_at.take() else {
            tracing::trace!(test = test.name(), "test end without test start ignored");
            return None;
        };
        let duration_ms = self.clock.now_millis().saturating_sub(started_at);
        self.formatter.test_ended(test, duration_ms);
        Some(duration_ms)
    }

    /// Whether a test is open.
    pub fn is_test_open(&self) -> bool {
        self.test_started_at.is_some()
    }

    /// Report one failure. Identical records are reported independently.
    pub fn report_failure(&mut self, failure: &FailureRecord) {
        self.summary.failures += 1;
        if !self.current_test_failed {
            self.current_test_failed = true;
            self.summary.failed_tests += 1;
        }
        self.formatter.failure(failure);
    }

    /// Forward text printed by the running test.
    pub fn print(&mut self, file: &str, line: u32, text: &str) {
        self.formatter.print(file, line, text);
    }

    /// Totals so far, elapsed time included.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            elapsed_ms: self.clock.now_millis().saturating_sub(self.run_started_at),
            ..self.summary
        }
    }

    /// End the run: emit the summary and hand it back.
    pub fn finish(self) -> RunSummary {
        let summary = self.summary();
        self.formatter.run_ended(&summary);
        self.formatter.flush();
        summary
    }
}
