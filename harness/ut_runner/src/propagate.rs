//! Failure propagation out of a running phase.
//!
//! A failed assertion must never fall through to the next statement. It hands
//! an [`Abort`] to the phase driver, which records it and moves on to the next
//! phase. Two strategies implement the hand-off:
//!
//! - [`UnwindPropagation`] (builds with `panic = "unwind"`): the abort travels
//!   as an unwinding payload via `resume_unwind`, so every value owned by the
//!   frames between the assertion and the phase driver is dropped in reverse
//!   order. The phase driver recovers it with `catch_unwind`. Helpers that
//!   assert do not need to return `Result` at all.
//! - [`ReturnPropagation`] (builds with `panic = "abort"`): the abort travels
//!   as the `Err` of a [`PhaseResult`]. The phase driver's frame is the saved
//!   execution point, and every intermediate frame must forward the error with
//!   `?`. Early return still drops locals, so nothing leaks in this mode either.
//!
//! [`Active`] names the strategy of the current build, and [`raise`] and
//! [`guard`] forward to it.
//!
//! # Usage
//!
//! ```text
//! // Assertion side: never returns `Ok` after a violation.
//! return propagate::raise(Abort::new(record));
//!
//! // Phase driver side:
//! match propagate::guard(|| body.run(&mut ctx)) {
//!     Ok(()) => PhaseStatus::Completed,
//!     Err(escape) => report(escape),
//! }
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use ut_report::FailureRecord;

/// A failure on its way from an assertion to the phase driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Abort {
    record: FailureRecord,
}

impl Abort {
    #[cold]
    pub fn new(record: FailureRecord) -> Self {
        Abort { record }
    }

    pub fn record(&self) -> &FailureRecord {
        &self.record
    }

    pub fn into_record(self) -> FailureRecord {
        self.record
    }
}

/// Outcome of one phase (setup, body or teardown).
pub type PhaseResult = Result<(), Abort>;

/// How a guarded phase stopped early.
#[derive(Debug)]
pub enum Escape {
    /// An assertion failed.
    Abort(Abort),
    /// Code under test panicked for some other reason (unwind builds only).
    Panic(String),
}

/// Strategy for carrying an [`Abort`] to the phase driver.
pub trait Propagation {
    /// Hand `abort` to the enclosing [`Propagation::guard`].
    ///
    /// Never yields `Ok`. Unwinding strategies do not return at all.
    fn raise<T>(abort: Abort) -> Result<T, Abort>;

    /// Run one phase, capturing whatever [`Propagation::raise`] sends.
    fn guard<F>(phase: F) -> Result<(), Escape>
    where
        F: FnOnce() -> PhaseResult;
}

/// Propagation by structured stack unwinding.
#[derive(Clone, Copy, Debug)]
pub struct UnwindPropagation;

impl Propagation for UnwindPropagation {
    #[cold]
    fn raise<T>(abort: Abort) -> Result<T, Abort> {
        // `resume_unwind` skips the panic hook: an assertion failure is not a crash.
        panic::resume_unwind(Box::new(abort))
    }

    fn guard<F>(phase: F) -> Result<(), Escape>
    where
        F: FnOnce() -> PhaseResult,
    {
        match panic::catch_unwind(AssertUnwindSafe(phase)) {
            Ok(result) => result.map_err(Escape::Abort),
            Err(payload) => Err(escape_from_payload(payload)),
        }
    }
}

/// Propagation by early return through `?`.
#[derive(Clone, Copy, Debug)]
pub struct ReturnPropagation;

impl Propagation for ReturnPropagation {
    fn raise<T>(abort: Abort) -> Result<T, Abort> {
        Err(abort)
    }

    fn guard<F>(phase: F) -> Result<(), Escape>
    where
        F: FnOnce() -> PhaseResult,
    {
        phase().map_err(Escape::Abort)
    }
}

/// The strategy this build uses.
#[cfg(panic = "unwind")]
pub type Active = UnwindPropagation;

/// The strategy this build uses.
#[cfg(not(panic = "unwind"))]
pub type Active = ReturnPropagation;

/// Hand `abort` to the phase driver using the build's strategy.
pub fn raise<T>(abort: Abort) -> Result<T, Abort> {
    Active::raise(abort)
}

/// Run one phase under the build's strategy.
pub fn guard<F>(phase: F) -> Result<(), Escape>
where
    F: FnOnce() -> PhaseResult,
{
    Active::guard(phase)
}

fn escape_from_payload(payload: Box<dyn Any + Send>) -> Escape {
    match payload.downcast::<Abort>() {
        Ok(abort) => Escape::Abort(*abort),
        Err(other) => Escape::Panic(panic_message(other.as_ref())),
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
