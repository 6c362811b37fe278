//! Test identity and failure records.

use std::fmt;

/// Identity of one test unit: where it was declared and whether it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestInfo {
    group: String,
    name: String,
    file: String,
    line: u32,
    ignored: bool,
}

impl TestInfo {
    /// Create the identity of a test that runs normally.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        TestInfo {
            group: group.into(),
            name: name.into(),
            file: file.into(),
            line,
            ignored: false,
        }
    }

    /// Create the identity of an ignored test.
    ///
    /// Ignored tests report start, ignored and end events but never enter
    /// setup, body or teardown.
    pub fn ignored(
        group: impl Into<String>,
        name: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        TestInfo {
            ignored: true,
            ..TestInfo::new(group, name, file, line)
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl fmt::Display for TestInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let macro_name = if self.ignored { "IGNORE_TEST" } else { "TEST" };
        write!(f, "{macro_name}({}, {})", self.group, self.name)
    }
}

/// One assertion violation.
///
/// The owning test's identity is copied in at construction, so a record stays
/// valid after the test unit that produced it is gone. Records are read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureRecord {
    group: String,
    test_name: String,
    test_file: String,
    test_line: u32,
    file: String,
    line: u32,
    message: String,
}

impl FailureRecord {
    /// Record a failure raised at `file:line` while `test` was running.
    #[cold]
    pub fn new(test: &TestInfo, file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        FailureRecord {
            group: test.group.clone(),
            test_name: test.name.clone(),
            test_file: test.file.clone(),
            test_line: test.line,
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// File the owning test was declared in.
    pub fn test_file(&self) -> &str {
        &self.test_file
    }

    /// Line the owning test was declared on.
    pub fn test_line(&self) -> u32 {
        self.test_line
    }

    /// File the failing check lives in (may be a shared helper).
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the check sits in the same file that declares the test.
    pub fn is_in_test_file(&self) -> bool {
        self.file == self.test_file
    }

    /// Location line shared by every formatter.
    ///
    /// A failure in the test's own file renders as `file:line`. A failure in
    /// another file (typically a helper) also names the test's declaration:
    /// `TEST failed (test_file:test_line): file:line`.
    pub fn location_message(&self) -> String {
        if self.is_in_test_file() {
            format!("{}:{}", self.file, self.line)
        } else {
            format!(
                "TEST failed ({}:{}): {}:{}",
                self.test_file, self.test_line, self.file, self.line
            )
        }
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location_message(), self.message)
    }
}
