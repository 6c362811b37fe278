//! Execution driver: runs an ordered list of tests through one dispatcher.

use ut_report::{Clock, OutputFormatter, ResultDispatcher, RunSummary};

use crate::{LeakScope, NoLeakDetection, TestShell};

/// Runs tests in order, bracketing each run of same-group tests with group
/// events, and returns the run's totals.
pub struct TestDriver<'a> {
    formatter: &'a mut dyn OutputFormatter,
    clock: &'a dyn Clock,
    leaks: Option<&'a mut dyn LeakScope>,
}

impl<'a> TestDriver<'a> {
    pub fn new(formatter: &'a mut dyn OutputFormatter, clock: &'a dyn Clock) -> Self {
        TestDriver {
            formatter,
            clock,
            leaks: None,
        }
    }

    /// Forward leak-suspension requests to `leaks` instead of dropping them.
    #[must_use]
    pub fn with_leak_scope(mut self, leaks: &'a mut dyn LeakScope) -> Self {
        self.leaks = Some(leaks);
        self
    }

    /// Run `tests` in order.
    ///
    /// Adjacent tests sharing a group name form one group; a group that
    /// reappears later is opened again. The summary line is emitted last.
    #[tracing::instrument(level = "debug", skip_all, fields(tests = tests.len()))]
    pub fn run(&mut self, tests: &mut [TestShell]) -> RunSummary {
        let mut fallback = NoLeakDetection;
        let leaks: &mut dyn LeakScope = match &mut self.leaks {
            Some(leaks) => &mut **leaks,
            None => &mut fallback,
        };
        let mut dispatcher = ResultDispatcher::new(&mut *self.formatter, self.clock);

        let mut open_group: Option<String> = None;
        for test in tests.iter_mut() {
            let group = test.info().group();
            if open_group.as_deref() != Some(group) {
                if let Some(previous) = open_group.take() {
                    dispatcher.group_ended(&previous);
                }
                dispatcher.group_started(group);
                open_group = Some(group.to_string());
            }
            test.run(&mut dispatcher, leaks);
        }
        if let Some(last) = open_group {
            dispatcher.group_ended(&last);
        }

        let summary = dispatcher.finish();
        tracing::debug!(
            tests = summary.tests,
            failures = summary.failures,
            elapsed_ms = summary.elapsed_ms,
            "run finished"
        );
        summary
    }

    /// Run one test as a complete run of its own.
    pub fn run_single(&mut self, test: &mut TestShell) -> RunSummary {
        self.run(std::slice::from_mut(test))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
