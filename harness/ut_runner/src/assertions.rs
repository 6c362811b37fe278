//! Assertion primitives.
//!
//! Each assertion returns `Ok(())` when its condition holds. Otherwise it
//! builds a [`FailureRecord`](ut_report::FailureRecord) at the caller's source
//! location and raises it, so no statement after a failed assertion runs.
//!
//! All methods are `#[track_caller]`: a helper function that asserts on behalf
//! of a test can itself be marked `#[track_caller]` to blame its own caller.
//!
//! # Message Formats
//!
//! | Assertion | Message |
//! |-----------|---------|
//! | `check` | `CHECK(<text>) failed` |
//! | `check_equal` | `expected <e> but was <a>` |
//! | `longs_equal` | `expected <  1 0x01> but was <255 0xff>` |
//! | `pointers_equal` | `expected <0xa5a5> but was <0xf0f0>` |
//! | `strcmp_contains` | `actual <a> did not contain <e>` |
//! | `doubles_equal` | `expected <e> but was <a> threshold used was <t>` |

use std::fmt::{Debug, LowerHex};

use crate::propagate::PhaseResult;
use crate::TestContext;

impl TestContext<'_> {
    /// Unconditional failure with `text` as the message.
    #[track_caller]
    pub fn fail(&self, text: &str) -> PhaseResult {
        self.raise_failure(text.to_string())
    }

    #[track_caller]
    pub fn check(&self, condition: bool, text: &str) -> PhaseResult {
        if condition {
            return Ok(());
        }
        self.raise_failure(format!("CHECK({text}) failed"))
    }

    #[track_caller]
    pub fn check_true(&self, condition: bool, text: &str) -> PhaseResult {
        if condition {
            return Ok(());
        }
        self.raise_failure(format!("CHECK_TRUE({text}) failed"))
    }

    #[track_caller]
    pub fn check_false(&self, condition: bool, text: &str) -> PhaseResult {
        if !condition {
            return Ok(());
        }
        self.raise_failure(format!("CHECK_FALSE({text}) failed"))
    }

    /// Generic equality, rendered with `Debug`.
    #[track_caller]
    pub fn check_equal<E, A>(&self, expected: E, actual: A) -> PhaseResult
    where
        E: Debug,
        A: PartialEq<E> + Debug,
    {
        if actual == expected {
            return Ok(());
        }
        self.raise_failure(format!("expected <{expected:?}> but was <{actual:?}>"))
    }

    #[track_caller]
    pub fn longs_equal(&self, expected: i64, actual: i64) -> PhaseResult {
        if expected == actual {
            return Ok(());
        }
        self.raise_failure(decimal_hex_message(expected, actual))
    }

    #[track_caller]
    pub fn unsigned_longs_equal(&self, expected: u64, actual: u64) -> PhaseResult {
        if expected == actual {
            return Ok(());
        }
        self.raise_failure(decimal_hex_message(expected, actual))
    }

    #[track_caller]
    pub fn bytes_equal(&self, expected: u8, actual: u8) -> PhaseResult {
        if expected == actual {
            return Ok(());
        }
        self.raise_failure(decimal_hex_message(expected, actual))
    }

    /// Address identity. Only the addresses are compared and printed.
    #[track_caller]
    pub fn pointers_equal<T: ?Sized>(&self, expected: *const T, actual: *const T) -> PhaseResult {
        let expected = expected.cast::<()>() as usize;
        let actual = actual.cast::<()>() as usize;
        if expected == actual {
            return Ok(());
        }
        let width = hex_len(expected).max(hex_len(actual));
        self.raise_failure(format!(
            "expected <0x{expected:0width$x}> but was <0x{actual:0width$x}>"
        ))
    }

    #[track_caller]
    pub fn strcmp_equal(&self, expected: &str, actual: &str) -> PhaseResult {
        if expected == actual {
            return Ok(());
        }
        self.raise_failure(format!("expected <{expected}> but was <{actual}>"))
    }

    #[track_caller]
    pub fn strcmp_contains(&self, expected: &str, actual: &str) -> PhaseResult {
        if actual.contains(expected) {
            return Ok(());
        }
        self.raise_failure(format!("actual <{actual}> did not contain <{expected}>"))
    }

    #[track_caller]
    pub fn strcmp_nocase_contains(&self, expected: &str, actual: &str) -> PhaseResult {
        if actual.to_lowercase().contains(&expected.to_lowercase()) {
            return Ok(());
        }
        self.raise_failure(format!("actual <{actual}> did not contain <{expected}>"))
    }

    /// Approximate equality; see [`doubles_equal`] for the rules.
    #[track_caller]
    pub fn doubles_equal(&self, expected: f64, actual: f64, threshold: f64) -> PhaseResult {
        if doubles_equal(expected, actual, threshold) {
            return Ok(());
        }
        let mut message =
            format!("expected <{expected}> but was <{actual}> threshold used was <{threshold}>");
        if expected.is_nan() || actual.is_nan() || threshold.is_nan() {
            message.push_str(" Cannot make comparisons with Nan");
        }
        self.raise_failure(message)
    }
}

/// Whether `d1` and `d2` differ by at most `threshold`.
///
/// Any NaN makes the comparison fail. Infinities of the same sign are equal
/// regardless of the threshold.
pub fn doubles_equal(d1: f64, d2: f64, threshold: f64) -> bool {
    if d1.is_nan() || d2.is_nan() || threshold.is_nan() {
        return false;
    }
    if d1.is_infinite() && d2.is_infinite() {
        return d1 == d2;
    }
    (d1 - d2).abs() <= threshold
}

/// `expected <d 0xh> but was <d 0xh>` with both sides padded to equal width.
///
/// Decimals are right-aligned with spaces, hex digits zero-padded. Signed
/// values print their two's complement bit pattern in hex.
fn decimal_hex_message<T>(expected: T, actual: T) -> String
where
    T: ToString + LowerHex,
{
    let (expected_dec, actual_dec) = (expected.to_string(), actual.to_string());
    let (expected_hex, actual_hex) = (format!("{expected:x}"), format!("{actual:x}"));
    let dec = expected_dec.len().max(actual_dec.len());
    let hex = expected_hex.len().max(actual_hex.len());
    format!(
        "expected <{expected_dec:>dec$} 0x{expected_hex:0>hex$}> \
         but was <{actual_dec:>dec$} 0x{actual_hex:0>hex$}>"
    )
}

fn hex_len(value: usize) -> usize {
    format!("{value:x}").len()
}
