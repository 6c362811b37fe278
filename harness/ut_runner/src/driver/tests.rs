use super::*;
use crate::{check, FnTest};
use pretty_assertions::assert_eq;
use ut_report::{TeamCityFormatter, TestInfo};

fn passing(group: &str, name: &str) -> TestShell {
    TestShell::from_fn(TestInfo::new(group, name, "file", 1), |_| Ok(()))
}

fn failing(group: &str, name: &str) -> TestShell {
    TestShell::from_fn(TestInfo::new(group, name, "file", 1), |t| {
        check!(t, false);
        Ok(())
    })
}

fn teamcity_run(tests: &mut [TestShell]) -> (RunSummary, String) {
    let clock = || 0_u64;
    let mut formatter = TeamCityFormatter::new(Vec::new());
    let summary = TestDriver::new(&mut formatter, &clock).run(tests);
    (summary, String::from_utf8(formatter.into_inner()).unwrap())
}

#[test]
fn test_groups_follow_adjacency() {
    let mut tests = vec![
        passing("A", "a"),
        passing("A", "b"),
        passing("B", "c"),
        passing("A", "d"),
    ];
    let (_, out) = teamcity_run(&mut tests);
    let events: Vec<&str> = out
        .lines()
        .filter(|line| line.contains("testSuite"))
        .collect();
    assert_eq!(
        events,
        vec![
            "##teamcity[testSuiteStarted name='A']",
            "##teamcity[testSuiteFinished name='A']",
            "##teamcity[testSuiteStarted name='B']",
            "##teamcity[testSuiteFinished name='B']",
            "##teamcity[testSuiteStarted name='A']",
            "##teamcity[testSuiteFinished name='A']",
        ]
    );
}

#[test]
fn test_full_output_for_one_group() {
    let mut tests = vec![passing("group", "first"), passing("group", "second")];
    let (summary, out) = teamcity_run(&mut tests);
    assert_eq!(
        out,
        "##teamcity[testSuiteStarted name='group']\n\
         ##teamcity[testStarted name='first']\n\
         ##teamcity[testFinished name='first' duration='0']\n\
         ##teamcity[testStarted name='second']\n\
         ##teamcity[testFinished name='second' duration='0']\n\
         ##teamcity[testSuiteFinished name='group']\n\
         OK (2 tests, 0 ignored, 0 ms)\n"
    );
    assert!(summary.is_success());
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn test_summary_counts() {
    let ignored = TestShell::from_fn(TestInfo::ignored("group", "skipped", "file", 1), |_| Ok(()));
    let mut tests = vec![
        passing("group", "ok"),
        failing("group", "bad"),
        ignored,
        failing("other", "worse"),
    ];
    let (summary, out) = teamcity_run(&mut tests);
    assert_eq!(
        summary,
        RunSummary {
            tests: 4,
            ignored: 1,
            failures: 2,
            failed_tests: 2,
            elapsed_ms: 0,
        }
    );
    assert_eq!(summary.exit_code(), 1);
    assert!(out.ends_with("Errors (2 failures, 4 tests, 1 ignored, 0 ms)\n"));
    assert!(tests[1].has_failed());
    assert!(!tests[0].has_failed());
}

#[test]
fn test_empty_run() {
    let (summary, out) = teamcity_run(&mut []);
    assert_eq!(summary, RunSummary::default());
    assert_eq!(out, "OK (0 tests, 0 ignored, 0 ms)\n");
}

#[test]
fn test_run_single() {
    let clock = || 0_u64;
    let mut formatter = TeamCityFormatter::new(Vec::new());
    let mut test = failing("group", "alone");
    let summary = TestDriver::new(&mut formatter, &clock).run_single(&mut test);
    assert_eq!(summary.tests, 1);
    assert_eq!(summary.failures, 1);
    assert_eq!(test.failure_count(), 1);
}

#[test]
fn test_leak_scope_is_forwarded() {
    struct Counting(usize);
    impl LeakScope for Counting {
        fn suspend_for_current_test(&mut self) {
            self.0 += 1;
        }
    }

    let body = || {
        FnTest::new(|t| {
            t.ignore_all_leaks_in_test();
            Ok(())
        })
    };
    let mut tests = vec![
        TestShell::new(TestInfo::new("group", "one", "file", 1), body()),
        TestShell::new(TestInfo::new("group", "two", "file", 2), body()),
    ];
    let clock = || 0_u64;
    let mut formatter = TeamCityFormatter::new(Vec::new());
    let mut leaks = Counting(0);
    TestDriver::new(&mut formatter, &clock)
        .with_leak_scope(&mut leaks)
        .run(&mut tests);
    assert_eq!(leaks.0, 2);
}

#[test]
fn test_durations_come_from_clock() {
    use std::cell::Cell;

    let now = Cell::new(0_u64);
    let clock = || {
        let t = now.get();
        now.set(t + 5);
        t
    };
    let mut formatter = TeamCityFormatter::new(Vec::new());
    let mut tests = vec![passing("group", "timed")];
    let summary = TestDriver::new(&mut formatter, &clock).run(&mut tests);
    // Clock reads: run start 0, test start 5, test end 10, summary 15.
    assert_eq!(tests[0].elapsed_ms(), Some(5));
    assert_eq!(summary.elapsed_ms, 15);
}
