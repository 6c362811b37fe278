//! Per-phase view of the running test.

use std::panic::Location;

use ut_report::{FailureRecord, ResultDispatcher, TestInfo};

use crate::propagate::{Abort, Active, PhaseResult, Propagation};
use crate::LeakScope;

/// Where a running test's reports go.
///
/// The shell hands its [`ResultDispatcher`] to the context; tests of the
/// assertion layer can substitute a recorder.
pub trait TestOutput {
    fn print(&mut self, file: &str, line: u32, text: &str);
    fn report_failure(&mut self, failure: &FailureRecord);
}

impl TestOutput for ResultDispatcher<'_> {
    fn print(&mut self, file: &str, line: u32, text: &str) {
        ResultDispatcher::print(self, file, line, text);
    }

    fn report_failure(&mut self, failure: &FailureRecord) {
        ResultDispatcher::report_failure(self, failure);
    }
}

/// Handle passed to every setup, body and teardown phase.
///
/// Assertions live on this type (see the `assertions` module) so each one can
/// attribute its failure to the running test. One context is built per test
/// run and shared by its three phases.
pub struct TestContext<'t> {
    test: &'t TestInfo,
    leaks: &'t mut dyn LeakScope,
    output: &'t mut dyn TestOutput,
    /// `raise` of the strategy the phase driver guards with.
    raise: fn(Abort) -> PhaseResult,
    leaks_suspended: bool,
}

impl<'t> TestContext<'t> {
    /// Context whose assertions propagate with the build's strategy.
    pub fn new(
        test: &'t TestInfo,
        leaks: &'t mut dyn LeakScope,
        output: &'t mut dyn TestOutput,
    ) -> Self {
        Self::with_propagation::<Active>(test, leaks, output)
    }

    /// Context whose assertions propagate with `P`. The phases must be
    /// guarded by `P::guard`.
    pub fn with_propagation<P: Propagation>(
        test: &'t TestInfo,
        leaks: &'t mut dyn LeakScope,
        output: &'t mut dyn TestOutput,
    ) -> Self {
        TestContext {
            test,
            leaks,
            output,
            raise: P::raise::<()>,
            leaks_suspended: false,
        }
    }

    /// The running test.
    pub fn test(&self) -> &TestInfo {
        self.test
    }

    /// Ask the leak detector to skip the running test.
    ///
    /// Repeated calls within one test reach the detector once.
    pub fn ignore_all_leaks_in_test(&mut self) {
        if self.leaks_suspended {
            return;
        }
        self.leaks_suspended = true;
        self.leaks.suspend_for_current_test();
    }

    pub fn leaks_suspended(&self) -> bool {
        self.leaks_suspended
    }

    /// Write `text` to the run's output, tagged with the caller's location.
    #[track_caller]
    pub fn print(&mut self, text: impl AsRef<str>) {
        let location = Location::caller();
        self.output
            .print(location.file(), location.line(), text.as_ref());
    }

    /// Fail the running test at the caller's location.
    #[track_caller]
    pub(crate) fn raise_failure(&self, message: String) -> PhaseResult {
        let location = Location::caller();
        let record = FailureRecord::new(self.test, location.file(), location.line(), message);
        tracing::trace!(failure = %record, "assertion failed");
        (self.raise)(Abort::new(record))
    }

    pub(crate) fn report_failure(&mut self, failure: &FailureRecord) {
        self.output.report_failure(failure);
    }
}
