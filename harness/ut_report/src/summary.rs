//! Aggregate result of one driver run.

/// Totals collected by the dispatcher over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tests started, ignored ones included.
    pub tests: usize,
    /// Tests that were ignored.
    pub ignored: usize,
    /// Failure records reported (a test can contribute several).
    pub failures: usize,
    /// Tests that reported at least one failure.
    pub failed_tests: usize,
    /// Wall time of the whole run.
    pub elapsed_ms: u64,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }

    /// Process exit code: 0 when every test passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_success())
    }

    /// Tests that actually entered their phases.
    pub fn ran(&self) -> usize {
        self.tests - self.ignored
    }
}
