//! Result model and output formatting for the `ut` test engine.
//!
//! This crate holds everything downstream of a running test:
//!
//! - **Failure records**: immutable descriptions of one assertion violation
//! - **Result dispatch**: the per-run accumulator of lifecycle events
//! - **Formatters**: human-readable and TeamCity service-message output
//!
//! # Event Flow
//!
//! ```text
//! TestShell ──► ResultDispatcher ──► dyn OutputFormatter ──► io::Write
//!                    │
//!                    ▼
//!               RunSummary
//! ```
//!
//! The dispatcher never buffers or reorders: each event reaches the formatter
//! in call order and is flushed before the call returns.

mod clock;
mod dispatcher;
mod failure;
pub mod formatter;
mod summary;

pub use clock::{Clock, SystemClock};
pub use dispatcher::ResultDispatcher;
pub use failure::{FailureRecord, TestInfo};
pub use formatter::{ColorMode, HumanFormatter, OutputFormatter, TeamCityFormatter};
pub use summary::RunSummary;
