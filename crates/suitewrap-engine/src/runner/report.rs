//! Run results collected by the in-memory runner.

use serde::Serialize;

use crate::hooks::HookSlot;

/// Final state of a single test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TestStatus {
    /// Body and hooks succeeded.
    Passed,
    /// Body or one of its hooks failed.
    Failed {
        /// Rendered error.
        error: String,
    },
    /// Skipped, not run.
    Pending,
}

/// Outcome of one test.
#[derive(Debug, Clone, Serialize)]
pub struct TestOutcome {
    /// Titles of the enclosing suites, outermost first.
    pub path: Vec<String>,
    /// The test title.
    pub title: String,
    /// What happened.
    #[serde(flatten)]
    pub status: TestStatus,
}

impl TestOutcome {
    /// Suite titles and the test title joined by spaces.
    pub fn full_title(&self) -> String {
        let mut parts: Vec<&str> = self.path.iter().map(String::as_str).collect();
        parts.push(&self.title);
        parts.join(" ")
    }
}

/// A suite-level `after` hook failure, not attributable to one test.
#[derive(Debug, Clone, Serialize)]
pub struct HookFailure {
    /// Full title of the suite owning the hook.
    pub suite: String,
    /// The failing slot.
    pub slot: HookSlot,
    /// Rendered error.
    pub error: String,
}

/// Aggregated results of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Outcomes in execution order.
    pub tests: Vec<TestOutcome>,
    /// `after` hook failures.
    pub hook_failures: Vec<HookFailure>,
}

impl RunReport {
    /// Number of passed tests.
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, TestStatus::Passed))
    }

    /// Number of failed tests.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, TestStatus::Failed { .. }))
    }

    /// Number of pending tests.
    pub fn pending(&self) -> usize {
        self.count(|s| matches!(s, TestStatus::Pending))
    }

    /// Whether nothing failed, hooks included.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.hook_failures.is_empty()
    }

    /// Finds an outcome by test title.
    pub fn outcome(&self, title: &str) -> Option<&TestOutcome> {
        self.tests.iter().find(|t| t.title == title)
    }

    /// One-line summary, e.g. `3 passing, 1 failing, 2 pending`.
    pub fn summary(&self) -> String {
        format!(
            "{} passing, {} failing, {} pending",
            self.passed(),
            self.failed(),
            self.pending()
        )
    }

    fn count(&self, pred: impl Fn(&TestStatus) -> bool) -> usize {
        self.tests.iter().filter(|t| pred(&t.status)).count()
    }
}
