//! Assertion macros.
//!
//! Each macro calls the matching [`TestContext`](crate::TestContext) method and
//! forwards its error with `?`, so the enclosing phase function must return
//! [`PhaseResult`](crate::PhaseResult). On failure it returns early from the
//! enclosing function. Condition macros record the condition's source text.
//!
//! ```text
//! check!(t, list.is_empty());
//! longs_equal!(t, 1, list.len() as i64);
//! ```

/// Fail unless `$cond` holds; the message quotes the condition.
#[macro_export]
macro_rules! check {
    ($t:expr, $cond:expr $(,)?) => {
        $t.check($cond, stringify!($cond))?
    };
}

#[macro_export]
macro_rules! check_true {
    ($t:expr, $cond:expr $(,)?) => {
        $t.check_true($cond, stringify!($cond))?
    };
}

#[macro_export]
macro_rules! check_false {
    ($t:expr, $cond:expr $(,)?) => {
        $t.check_false($cond, stringify!($cond))?
    };
}

#[macro_export]
macro_rules! check_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.check_equal($expected, $actual)?
    };
}

#[macro_export]
macro_rules! longs_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.longs_equal($expected, $actual)?
    };
}

#[macro_export]
macro_rules! unsigned_longs_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.unsigned_longs_equal($expected, $actual)?
    };
}

#[macro_export]
macro_rules! bytes_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.bytes_equal($expected, $actual)?
    };
}

#[macro_export]
macro_rules! pointers_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.pointers_equal($expected, $actual)?
    };
}

#[macro_export]
macro_rules! strcmp_equal {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.strcmp_equal($expected, $actual)?
    };
}

#[macro_export]
macro_rules! strcmp_contains {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.strcmp_contains($expected, $actual)?
    };
}

#[macro_export]
macro_rules! strcmp_nocase_contains {
    ($t:expr, $expected:expr, $actual:expr $(,)?) => {
        $t.strcmp_nocase_contains($expected, $actual)?
    };
}

#[macro_export]
macro_rules! doubles_equal {
    ($t:expr, $expected:expr, $actual:expr, $threshold:expr $(,)?) => {
        $t.doubles_equal($expected, $actual, $threshold)?
    };
}

/// Fail unconditionally. The text is used verbatim; extra arguments make it
/// a format string.
#[macro_export]
macro_rules! fail {
    ($t:expr, $text:expr $(,)?) => {
        $t.fail($text)?
    };
    ($t:expr, $fmt:literal, $($arg:tt)+) => {
        $t.fail(&format!($fmt, $($arg)+))?
    };
}

/// Print from inside a test, tagged with the invocation's location. Extra
/// arguments make the text a format string.
#[macro_export]
macro_rules! ut_print {
    ($t:expr, $text:expr $(,)?) => {
        $t.print($text)
    };
    ($t:expr, $fmt:literal, $($arg:tt)+) => {
        $t.print(::std::format!($fmt, $($arg)+))
    };
}
