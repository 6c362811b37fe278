//! Hook into an external leak detector.

/// A leak detector that can be told to stop checking the current test.
///
/// The engine never tracks allocations itself. It only forwards the
/// "ignore leaks in this test" request, at most once per test.
pub trait LeakScope {
    fn suspend_for_current_test(&mut self);
}

/// Leak scope for runs without a leak detector.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLeakDetection;

impl LeakScope for NoLeakDetection {
    fn suspend_for_current_test(&mut self) {}
}
