//! Run one test in isolation and inspect what it reported.
//!
//! Useful for testing assertions and test helpers themselves: the test runs
//! through the real shell, driver and human formatter, with a fixed clock and
//! output captured in memory.

use std::panic::Location;

use ut_report::{HumanFormatter, RunSummary, TestInfo};

use crate::{PhaseResult, TestBody, TestContext, TestDriver, TestShell};

pub struct TestingFixture {
    shell: TestShell,
    verbose: bool,
    output: String,
    summary: RunSummary,
}

impl TestingFixture {
    /// Fixture around a body closure, declared at the caller's location.
    #[track_caller]
    pub fn new<F>(body: F) -> Self
    where
        F: FnMut(&mut TestContext<'_>) -> PhaseResult + 'static,
    {
        let location = Location::caller();
        let info = TestInfo::new("fixture", "test", location.file(), location.line());
        Self::from_shell(TestShell::from_fn(info, body))
    }

    #[track_caller]
    pub fn with_body(body: impl TestBody + 'static) -> Self {
        let location = Location::caller();
        let info = TestInfo::new("fixture", "test", location.file(), location.line());
        Self::from_shell(TestShell::new(info, body))
    }

    pub fn from_shell(shell: TestShell) -> Self {
        TestingFixture {
            shell,
            verbose: false,
            output: String::new(),
            summary: RunSummary::default(),
        }
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the test once, replacing any earlier output.
    pub fn run(&mut self) -> RunSummary {
        let clock = || 0_u64;
        let mut formatter = HumanFormatter::new(Vec::new()).verbose(self.verbose);
        self.summary = TestDriver::new(&mut formatter, &clock).run_single(&mut self.shell);
        self.output = String::from_utf8_lossy(&formatter.into_inner()).into_owned();
        self.summary
    }

    pub fn failure_count(&self) -> usize {
        self.summary.failures
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn shell(&self) -> &TestShell {
        &self.shell
    }

    /// Panic unless the captured output contains `text`.
    #[track_caller]
    pub fn assert_output_contains(&self, text: &str) {
        assert!(
            self.output.contains(text),
            "expected output to contain {text:?}, got:\n{}",
            self.output
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::{check, longs_equal, ut_print, FnTest};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_passing_fixture() {
        let mut fixture = TestingFixture::new(|t| {
            check!(t, true);
            Ok(())
        });
        let summary = fixture.run();
        assert!(summary.is_success());
        assert_eq!(fixture.failure_count(), 0);
        assert_eq!(fixture.output(), ".\nOK (1 tests, 0 ignored, 0 ms)\n");
    }

    #[test]
    fn test_failure_reported_at_assertion_line() {
        let line = line!() + 2;
        let mut fixture = TestingFixture::new(|t| {
            longs_equal!(t, 1, 255);
            Ok(())
        });
        fixture.run();
        assert_eq!(fixture.failure_count(), 1);
        fixture.assert_output_contains(&format!(
            "{}:{line}: error: Failure in TEST(fixture, test)\n\texpected <  1 0x01> but was <255 0xff>\n",
            file!()
        ));
        fixture.assert_output_contains("Errors (1 failures, 1 tests, 0 ignored, 0 ms)");
    }

    #[test]
    fn test_print_reaches_output() {
        let mut fixture = TestingFixture::new(|t| {
            ut_print!(t, "Hello World!");
            Ok(())
        });
        fixture.run();
        assert_eq!(fixture.failure_count(), 0);
        fixture.assert_output_contains("Hello World!");
        fixture.assert_output_contains(file!());
    }

    #[test]
    fn test_print_formats_arguments() {
        let mut fixture = TestingFixture::new(|t| {
            ut_print!(t, "Hello {} {}", "World!", 2009);
            ut_print!(t, String::from("owned text"));
            Ok(())
        });
        fixture.run();
        fixture.assert_output_contains("Hello World! 2009");
        fixture.assert_output_contains("owned text");
    }

    #[test]
    fn test_empty_fail_message_keeps_detail_line() {
        let mut fixture = TestingFixture::new(|t| {
            crate::fail!(t, "");
            Ok(())
        });
        fixture.run();
        fixture.assert_output_contains("Failure in TEST(fixture, test)\n\t\n\n");
    }

    #[test]
    fn test_verbose_fixture() {
        let mut fixture = TestingFixture::with_body(FnTest::new(|_| Ok(()))).verbose(true);
        fixture.run();
        assert!(fixture.output().starts_with("TEST(fixture, test) - 0 ms\n"));
    }

    #[test]
    fn test_rerun_replaces_output() {
        let mut fixture = TestingFixture::new(|_| Ok(()));
        fixture.run();
        fixture.run();
        assert_eq!(fixture.output().matches("OK (").count(), 1);
        assert_eq!(fixture.shell().failure_count(), 0);
    }
}
