//! Test units and their lifecycle.
//!
//! A [`TestShell`] pairs a test's identity with its body and walks it through
//! a fixed lifecycle:
//!
//! ```text
//! Idle ──start──► Started ──run_phases──► Started ──end──► Ended
//!                              │
//!                  setup ─► body ─► teardown
//! ```
//!
//! Within `run_phases` each phase either completes or aborts. A setup abort
//! skips the body; teardown runs whenever the test was started. Every abort
//! yields exactly one failure record, so a test can fail at most three times
//! per run.

use ut_report::{FailureRecord, ResultDispatcher, TestInfo};

use crate::propagate::{Active, Escape, PhaseResult, Propagation};
use crate::{LeakScope, TestContext};

/// One of the three phases of a test run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Body,
    Teardown,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Setup, Phase::Body, Phase::Teardown];

    fn invoke(self, body: &mut dyn TestBody, ctx: &mut TestContext<'_>) -> PhaseResult {
        match self {
            Phase::Setup => body.setup(ctx),
            Phase::Body => body.run(ctx),
            Phase::Teardown => body.teardown(ctx),
        }
    }
}

/// How far a phase got during the last run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhaseStatus {
    #[default]
    NotRun,
    Completed,
    Aborted,
}

/// Per-phase outcome of the last run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseRecord {
    pub setup: PhaseStatus,
    pub body: PhaseStatus,
    pub teardown: PhaseStatus,
}

impl PhaseRecord {
    pub fn get(&self, phase: Phase) -> PhaseStatus {
        match phase {
            Phase::Setup => self.setup,
            Phase::Body => self.body,
            Phase::Teardown => self.teardown,
        }
    }

    fn set(&mut self, phase: Phase, status: PhaseStatus) {
        match phase {
            Phase::Setup => self.setup = status,
            Phase::Body => self.body = status,
            Phase::Teardown => self.teardown = status,
        }
    }
}

/// Lifecycle position of a [`TestShell`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShellState {
    #[default]
    Idle,
    Started,
    Ended,
}

/// User-supplied test code.
///
/// Only `run` is required. Any `FnMut(&mut TestContext) -> PhaseResult` is a
/// test body with empty setup and teardown.
pub trait TestBody {
    fn setup(&mut self, _t: &mut TestContext<'_>) -> PhaseResult {
        Ok(())
    }

    fn run(&mut self, t: &mut TestContext<'_>) -> PhaseResult;

    fn teardown(&mut self, _t: &mut TestContext<'_>) -> PhaseResult {
        Ok(())
    }
}

impl<F> TestBody for F
where
    F: FnMut(&mut TestContext<'_>) -> PhaseResult,
{
    fn run(&mut self, t: &mut TestContext<'_>) -> PhaseResult {
        self(t)
    }
}

type PhaseFn = Box<dyn FnMut(&mut TestContext<'_>) -> PhaseResult>;

/// A test body assembled from closures.
pub struct FnTest {
    setup: Option<PhaseFn>,
    body: PhaseFn,
    teardown: Option<PhaseFn>,
}

impl FnTest {
    pub fn new<F>(body: F) -> Self
    where
        F: FnMut(&mut TestContext<'_>) -> PhaseResult + 'static,
    {
        FnTest {
            setup: None,
            body: Box::new(body),
            teardown: None,
        }
    }

    #[must_use]
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: FnMut(&mut TestContext<'_>) -> PhaseResult + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    #[must_use]
    pub fn with_teardown<F>(mut self, teardown: F) -> Self
    where
        F: FnMut(&mut TestContext<'_>) -> PhaseResult + 'static,
    {
        self.teardown = Some(Box::new(teardown));
        self
    }
}

impl TestBody for FnTest {
    fn setup(&mut self, t: &mut TestContext<'_>) -> PhaseResult {
        match &mut self.setup {
            Some(setup) => setup(t),
            None => Ok(()),
        }
    }

    fn run(&mut self, t: &mut TestContext<'_>) -> PhaseResult {
        (self.body)(t)
    }

    fn teardown(&mut self, t: &mut TestContext<'_>) -> PhaseResult {
        match &mut self.teardown {
            Some(teardown) => teardown(t),
            None => Ok(()),
        }
    }
}

/// A registered test: identity, body and the state of its last run.
pub struct TestShell {
    info: TestInfo,
    body: Box<dyn TestBody>,
    state: ShellState,
    phases: PhaseRecord,
    failures: usize,
    elapsed_ms: Option<u64>,
}

impl TestShell {
    pub fn new(info: TestInfo, body: impl TestBody + 'static) -> Self {
        TestShell {
            info,
            body: Box::new(body),
            state: ShellState::Idle,
            phases: PhaseRecord::default(),
            failures: 0,
            elapsed_ms: None,
        }
    }

    /// Shell around a single closure; lets the closure's argument type be inferred.
    pub fn from_fn<F>(info: TestInfo, body: F) -> Self
    where
        F: FnMut(&mut TestContext<'_>) -> PhaseResult + 'static,
    {
        Self::new(info, FnTest::new(body))
    }

    pub fn info(&self) -> &TestInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut TestInfo {
        &mut self.info
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn phases(&self) -> PhaseRecord {
        self.phases
    }

    /// Failures reported during the last run.
    pub fn failure_count(&self) -> usize {
        self.failures
    }

    pub fn has_failed(&self) -> bool {
        self.failures > 0
    }

    /// Duration of the last completed run.
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed_ms
    }

    /// Announce the test and reset the previous run's results.
    pub fn start(&mut self, dispatcher: &mut ResultDispatcher<'_>) {
        self.failures = 0;
        self.phases = PhaseRecord::default();
        self.elapsed_ms = None;
        dispatcher.test_started(&self.info);
        self.state = ShellState::Started;
    }

    /// Run setup, body and teardown, reporting each abort.
    ///
    /// Does nothing for ignored tests or when the test is not started.
    pub fn run_phases(&mut self, dispatcher: &mut ResultDispatcher<'_>, leaks: &mut dyn LeakScope) {
        self.run_phases_with::<Active>(dispatcher, leaks);
    }

    /// [`run_phases`](Self::run_phases) with an explicit propagation strategy.
    pub fn run_phases_with<P: Propagation>(
        &mut self,
        dispatcher: &mut ResultDispatcher<'_>,
        leaks: &mut dyn LeakScope,
    ) {
        if self.state != ShellState::Started {
            tracing::trace!(test = %self.info, state = ?self.state, "phases skipped: test not started");
            return;
        }
        if self.info.is_ignored() {
            return;
        }

        let TestShell {
            info,
            body,
            phases,
            failures,
            ..
        } = self;
        let info: &TestInfo = info;
        let mut ctx = TestContext::with_propagation::<P>(info, leaks, dispatcher);

        for phase in Phase::ALL {
            if phase == Phase::Body && phases.setup == PhaseStatus::Aborted {
                tracing::debug!(test = %info, "body skipped after setup failure");
                continue;
            }
            let status = match P::guard(|| phase.invoke(body.as_mut(), &mut ctx)) {
                Ok(()) => PhaseStatus::Completed,
                Err(escape) => {
                    let failure = match escape {
                        Escape::Abort(abort) => abort.into_record(),
                        Escape::Panic(message) => FailureRecord::new(
                            info,
                            info.file(),
                            info.line(),
                            format!("unexpected panic: {message}"),
                        ),
                    };
                    tracing::debug!(test = %info, ?phase, failure = %failure, "phase aborted");
                    *failures += 1;
                    ctx.report_failure(&failure);
                    PhaseStatus::Aborted
                }
            };
            phases.set(phase, status);
        }
    }

    /// Close the test. Does nothing unless the test is started.
    pub fn end(&mut self, dispatcher: &mut ResultDispatcher<'_>) {
        if self.state != ShellState::Started {
            tracing::trace!(test = %self.info, state = ?self.state, "end without start ignored");
            return;
        }
        self.elapsed_ms = dispatcher.test_ended(&self.info);
        self.state = ShellState::Ended;
    }

    /// The full lifecycle: `start`, `run_phases`, `end`.
    pub fn run(&mut self, dispatcher: &mut ResultDispatcher<'_>, leaks: &mut dyn LeakScope) {
        self.run_with::<Active>(dispatcher, leaks);
    }

    /// [`run`](Self::run) with an explicit propagation strategy.
    #[tracing::instrument(level = "debug", skip_all, fields(test = %self.info))]
    pub fn run_with<P: Propagation>(
        &mut self,
        dispatcher: &mut ResultDispatcher<'_>,
        leaks: &mut dyn LeakScope,
    ) {
        self.start(dispatcher);
        self.run_phases_with::<P>(dispatcher, leaks);
        self.end(dispatcher);
    }
}

impl std::fmt::Debug for TestShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestShell")
            .field("info", &self.info)
            .field("state", &self.state)
            .field("phases", &self.phases)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}
