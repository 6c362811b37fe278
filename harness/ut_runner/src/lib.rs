//! Test execution engine for the `ut` framework.
//!
//! Tests are registered as [`TestShell`]s and run in order by a
//! [`TestDriver`]. Each test runs setup, body and teardown; assertions inside
//! a phase abort only that phase, and every abort becomes one failure record
//! reported through the [`ut_report`] dispatcher and formatters.
//!
//! # Writing Tests
//!
//! ```text
//! let mut tests = vec![
//!     TestShell::from_fn(TestInfo::new("Math", "Add", file!(), line!()), |t| {
//!         longs_equal!(t, 4, 2 + 2);
//!         Ok(())
//!     }),
//! ];
//! let config = RunConfig::from_env()?;
//! let mut formatter = config.formatter(std::io::stdout(), is_tty);
//! let summary = TestDriver::new(&mut *formatter, &SystemClock::new()).run(&mut tests);
//! std::process::exit(summary.exit_code());
//! ```
//!
//! # Modules
//!
//! - [`propagate`]: how a failed assertion leaves its phase
//! - `assertions` and the assertion macros: the checks themselves, plus
//!   `ut_print!` for text tagged with its source location
//! - `shell`: test units and their lifecycle
//! - `driver`: ordered execution and group bracketing
//! - `config`: environment-driven run settings
//! - [`testing`]: single-test fixture for testing tests

mod assertions;
mod config;
mod context;
mod driver;
mod leak;
mod macros;
pub mod propagate;
mod shell;
pub mod testing;

use std::sync::Once;

pub use assertions::doubles_equal;
pub use config::{parse_color_mode, ConfigError, OutputFormat, RunConfig};
pub use context::{TestContext, TestOutput};
pub use driver::TestDriver;
pub use leak::{LeakScope, NoLeakDetection};
pub use propagate::{Abort, PhaseResult};
pub use shell::{FnTest, Phase, PhaseRecord, PhaseStatus, ShellState, TestBody, TestShell};
pub use ut_report::{
    Clock, ColorMode, FailureRecord, HumanFormatter, OutputFormatter, ResultDispatcher, RunSummary,
    SystemClock, TeamCityFormatter, TestInfo,
};

static TRACING_INIT: Once = Once::new();

/// Initialize the tracing subscriber for engine diagnostics.
///
/// Call once at startup; later calls are ignored. Does nothing unless
/// `RUST_LOG` is set, e.g. `RUST_LOG=ut_runner=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
