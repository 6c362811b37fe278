use super::*;
use pretty_assertions::assert_eq;

fn sample_test() -> TestInfo {
    TestInfo::new("group", "test", "file", 10)
}

fn render(verbose: bool, f: impl FnOnce(&mut HumanFormatter<Vec<u8>>)) -> String {
    let mut formatter = HumanFormatter::new(Vec::new()).verbose(verbose);
    f(&mut formatter);
    String::from_utf8(formatter.into_inner()).unwrap()
}

#[test]
fn test_progress_dots() {
    let ignored = TestInfo::ignored("group", "skipped", "file", 12);
    let out = render(false, |f| {
        f.group_started("group");
        f.test_started(&sample_test());
        f.test_ended(&sample_test(), 1);
        f.test_started(&ignored);
        f.test_ended(&ignored, 0);
        f.group_ended("group");
    });
    assert_eq!(out, ".!");
}

#[test]
fn test_verbose_lines() {
    let ignored = TestInfo::ignored("group", "skipped", "file", 12);
    let out = render(true, |f| {
        f.test_started(&sample_test());
        f.test_ended(&sample_test(), 7);
        f.test_started(&ignored);
        f.test_ended(&ignored, 0);
    });
    assert_eq!(
        out,
        "TEST(group, test) - 7 ms\nIGNORE_TEST(group, skipped) - 0 ms\n"
    );
}

#[test]
fn test_failure_in_same_file() {
    let failure = FailureRecord::new(&sample_test(), "file", 20, "message");
    let out = render(false, |f| f.failure(&failure));
    assert_eq!(
        out,
        "\nfile:20: error: Failure in TEST(group, test)\n\tmessage\n\n"
    );
}

#[test]
fn test_failure_in_helper_file() {
    let failure = FailureRecord::new(&sample_test(), "failfile", 20, "failure message");
    let out = render(false, |f| f.failure(&failure));
    assert_eq!(
        out,
        "\nTEST failed (file:10): failfile:20: error: Failure in TEST(group, test)\n\
         \tfailure message\n\n"
    );
}

#[test]
fn test_multiline_message_indented() {
    let failure = FailureRecord::new(&sample_test(), "file", 20, "first\nsecond");
    let out = render(false, |f| f.failure(&failure));
    assert!(out.contains("\tfirst\n\tsecond\n"));
}

#[test]
fn test_empty_message_keeps_detail_line() {
    let failure = FailureRecord::new(&sample_test(), "file", 20, "");
    let out = render(false, |f| f.failure(&failure));
    assert_eq!(
        out,
        "\nfile:20: error: Failure in TEST(group, test)\n\t\n\n"
    );
}

#[test]
fn test_print_names_location() {
    let out = render(false, |f| f.print("tests/math.rs", 7, "Hello World! 2009"));
    assert_eq!(out, "\ntests/math.rs:7 Hello World! 2009\n");
}

#[test]
fn test_summary() {
    let ok = RunSummary {
        tests: 4,
        ignored: 1,
        elapsed_ms: 3,
        ..RunSummary::default()
    };
    assert_eq!(
        render(false, |f| f.run_ended(&ok)),
        "\nOK (4 tests, 1 ignored, 3 ms)\n"
    );

    let failed = RunSummary {
        failures: 1,
        failed_tests: 1,
        ..ok
    };
    assert_eq!(
        render(false, |f| f.run_ended(&failed)),
        "\nErrors (1 failures, 4 tests, 1 ignored, 3 ms)\n"
    );
}

#[test]
fn test_colors() {
    let mut formatter = HumanFormatter::with_color_mode(Vec::new(), ColorMode::Always, false);
    formatter.run_ended(&RunSummary::default());
    let failure = FailureRecord::new(&sample_test(), "file", 20, "message");
    formatter.failure(&failure);
    let out = String::from_utf8(formatter.into_inner()).unwrap();
    assert!(out.contains("\x1b[1;32mOK ("));
    assert!(out.contains("\x1b[1;31merror\x1b[0m"));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
