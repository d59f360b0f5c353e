//! In-memory runner with mocha-compatible hook semantics.
//!
//! Declarations are collected into a suite tree; [`MemoryRunner::run`] then
//! executes it:
//!
//! - `before` / `after` run once per suite around its runnable tests.
//! - `beforeEach` runs outermost suite first, `afterEach` innermost first.
//! - Within one suite, hooks of a slot run in registration order.
//! - A skipped subtree is reported pending. When anything is marked `only`,
//!   tests outside `only` subtrees are neither run nor reported.
//! - Suites without a runnable test run no hooks.

use tracing::{debug, warn};

use suitewrap_core::config::runner::RunnerConfig;
use suitewrap_core::{AppError, AppResult};

use super::report::{HookFailure, RunReport, TestOutcome, TestStatus};
use super::{Block, Declaration, Runner};
use crate::hooks::{HookFn, HookSlot};
use crate::wrapper::Mode;

/// Options applied to a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop scheduling tests after the first failure.
    pub bail: bool,
}

impl From<&RunnerConfig> for RunOptions {
    fn from(config: &RunnerConfig) -> Self {
        Self { bail: config.bail }
    }
}

struct Suite {
    title: String,
    mode: Mode,
    hooks: [Vec<HookFn>; 4],
    children: Vec<Child>,
}

struct Test {
    title: String,
    mode: Mode,
    body: HookFn,
}

enum Child {
    Suite(Suite),
    Test(Test),
}

impl Suite {
    fn new(title: &str, mode: Mode) -> Self {
        Self {
            title: title.to_string(),
            mode,
            hooks: Default::default(),
            children: Vec::new(),
        }
    }

    fn hooks(&self, slot: HookSlot) -> &[HookFn] {
        &self.hooks[slot_index(slot)]
    }

    fn contains_only(&self) -> bool {
        self.children.iter().any(|child| match child {
            Child::Suite(suite) => suite.mode == Mode::Only || suite.contains_only(),
            Child::Test(test) => test.mode == Mode::Only,
        })
    }

    fn has_runnable(&self, scope: Scope) -> bool {
        self.children.iter().any(|child| match child {
            Child::Suite(suite) => suite.has_runnable(scope.enter(suite.mode)),
            Child::Test(test) => scope.enter(test.mode).runnable(),
        })
    }
}

fn slot_index(slot: HookSlot) -> usize {
    match slot {
        HookSlot::Before => 0,
        HookSlot::BeforeEach => 1,
        HookSlot::After => 2,
        HookSlot::AfterEach => 3,
    }
}

/// Skip/only state inherited from enclosing declarations.
#[derive(Debug, Clone, Copy)]
struct Scope {
    skipped: bool,
    selected: bool,
}

impl Scope {
    fn enter(self, mode: Mode) -> Self {
        Self {
            skipped: self.skipped || mode == Mode::Skip,
            selected: self.selected || mode == Mode::Only,
        }
    }

    fn runnable(&self) -> bool {
        self.selected && !self.skipped
    }
}

struct RunState {
    options: RunOptions,
    report: RunReport,
    bailed: bool,
}

impl RunState {
    fn record(&mut self, path: &[String], title: &str, status: TestStatus) {
        if let TestStatus::Failed { error } = &status {
            warn!(test = %title, error = %error, "Test failed");
            if self.options.bail {
                self.bailed = true;
            }
        }
        self.report.tests.push(TestOutcome {
            path: path.to_vec(),
            title: title.to_string(),
            status,
        });
    }
}

/// Collects declarations and executes them in memory.
pub struct MemoryRunner {
    /// Open suites; index 0 is the root.
    stack: Vec<Suite>,
}

impl Default for MemoryRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRunner {
    /// Creates a runner with an empty root suite.
    pub fn new() -> Self {
        Self {
            stack: vec![Suite::new("", Mode::All)],
        }
    }

    fn current(&mut self) -> AppResult<&mut Suite> {
        self.stack
            .last_mut()
            .ok_or_else(|| AppError::internal("runner has no open suite"))
    }

    fn root(&self) -> AppResult<&Suite> {
        self.stack
            .first()
            .ok_or_else(|| AppError::internal("runner has no root suite"))
    }

    /// Titles of every declared suite, depth-first.
    pub fn suite_titles(&self) -> Vec<String> {
        fn collect(suite: &Suite, out: &mut Vec<String>) {
            for child in &suite.children {
                if let Child::Suite(inner) = child {
                    out.push(inner.title.clone());
                    collect(inner, out);
                }
            }
        }

        let mut titles = Vec::new();
        if let Some(root) = self.stack.first() {
            collect(root, &mut titles);
        }
        titles
    }

    /// Number of declared tests.
    pub fn test_count(&self) -> usize {
        fn count(suite: &Suite) -> usize {
            suite
                .children
                .iter()
                .map(|child| match child {
                    Child::Suite(inner) => count(inner),
                    Child::Test(_) => 1,
                })
                .sum()
        }

        self.stack.first().map(count).unwrap_or(0)
    }

    /// Executes the declared tree.
    pub fn run(&self, options: RunOptions) -> AppResult<RunReport> {
        if self.stack.len() != 1 {
            return Err(AppError::internal("cannot run while a suite is still open"));
        }
        let root = self.root()?;
        let scope = Scope {
            skipped: false,
            selected: !root.contains_only(),
        };

        let mut state = RunState {
            options,
            report: RunReport::default(),
            bailed: false,
        };
        let mut path = Vec::new();
        let mut ancestors = Vec::new();
        run_suite(root, scope, &mut path, &mut ancestors, &mut state);

        debug!(summary = %state.report.summary(), "Run finished");
        Ok(state.report)
    }
}

impl Runner for MemoryRunner {
    fn declare(
        &mut self,
        kind: Declaration,
        mode: Mode,
        label: &str,
        block: Block<'_>,
    ) -> AppResult<()> {
        match (kind.is_suite(), block) {
            (true, Block::Suite(body)) => {
                debug!(kind = %kind, mode = %mode, label = %label, "Suite declared");
                self.stack.push(Suite::new(label, mode));
                let result = body(self);
                let suite = self
                    .stack
                    .pop()
                    .ok_or_else(|| AppError::internal("suite stack underflow"))?;
                self.current()?.children.push(Child::Suite(suite));
                result
            }
            (false, Block::Test(body)) => {
                debug!(kind = %kind, mode = %mode, label = %label, "Test declared");
                self.current()?.children.push(Child::Test(Test {
                    title: label.to_string(),
                    mode,
                    body,
                }));
                Ok(())
            }
            (_, block) => Err(AppError::type_error(format!(
                "\"{kind}\" cannot take a {block:?} block"
            ))),
        }
    }

    fn hook(&mut self, slot: HookSlot, action: HookFn) -> AppResult<()> {
        self.current()?.hooks[slot_index(slot)].push(action);
        Ok(())
    }
}

fn run_hooks(hooks: &[HookFn]) -> AppResult<()> {
    hooks.iter().try_for_each(|hook| hook())
}

fn run_suite<'a>(
    suite: &'a Suite,
    scope: Scope,
    path: &mut Vec<String>,
    ancestors: &mut Vec<&'a Suite>,
    state: &mut RunState,
) {
    let scope = scope.enter(suite.mode);
    let titled = !suite.title.is_empty();
    if titled {
        path.push(suite.title.clone());
    }

    if !suite.has_runnable(scope) || state.bailed {
        settle(&suite.children, scope, path, None, state);
    } else {
        match run_hooks(suite.hooks(HookSlot::Before)) {
            Ok(()) => {
                ancestors.push(suite);
                for child in &suite.children {
                    match child {
                        Child::Test(test) => run_test(test, scope, path, ancestors, state),
                        Child::Suite(inner) => run_suite(inner, scope, path, ancestors, state),
                    }
                }
                ancestors.pop();
            }
            Err(e) => {
                let error = format!("\"before all\" hook: {e}");
                settle(&suite.children, scope, path, Some(&error), state);
            }
        }

        if let Err(e) = run_hooks(suite.hooks(HookSlot::After)) {
            warn!(suite = %path.join(" "), error = %e, "after hook failed");
            state.report.hook_failures.push(HookFailure {
                suite: path.join(" "),
                slot: HookSlot::After,
                error: e.to_string(),
            });
        }
    }

    if titled {
        path.pop();
    }
}

fn run_test(
    test: &Test,
    scope: Scope,
    path: &[String],
    ancestors: &[&Suite],
    state: &mut RunState,
) {
    let scope = scope.enter(test.mode);
    if !scope.selected || state.bailed {
        return;
    }
    if scope.skipped {
        state.record(path, &test.title, TestStatus::Pending);
        return;
    }

    debug!(test = %test.title, "Running test");

    // Suites whose beforeEach ran; afterEach unwinds only these.
    let mut entered = ancestors.len();
    let mut error = None;
    for (depth, suite) in ancestors.iter().enumerate() {
        if let Err(e) = run_hooks(suite.hooks(HookSlot::BeforeEach)) {
            error = Some(format!("\"before each\" hook: {e}"));
            entered = depth + 1;
            break;
        }
    }

    if error.is_none() {
        error = (test.body)().err().map(|e| e.to_string());
    }

    for suite in ancestors[..entered].iter().rev() {
        if let Err(e) = run_hooks(suite.hooks(HookSlot::AfterEach)) {
            error.get_or_insert_with(|| format!("\"after each\" hook: {e}"));
        }
    }

    let status = match error {
        Some(error) => TestStatus::Failed { error },
        None => TestStatus::Passed,
    };
    state.record(path, &test.title, status);
}

/// Reports tests that will not run: pending when skipped, failed with
/// `failure` otherwise.
fn settle(
    children: &[Child],
    scope: Scope,
    path: &mut Vec<String>,
    failure: Option<&str>,
    state: &mut RunState,
) {
    for child in children {
        match child {
            Child::Test(test) => {
                let scope = scope.enter(test.mode);
                if !scope.selected {
                    continue;
                }
                match failure {
                    Some(error) if !scope.skipped => state.record(
                        path,
                        &test.title,
                        TestStatus::Failed {
                            error: error.to_string(),
                        },
                    ),
                    _ if scope.skipped => state.record(path, &test.title, TestStatus::Pending),
                    _ => {}
                }
            }
            Child::Suite(inner) => {
                let titled = !inner.title.is_empty();
                if titled {
                    path.push(inner.title.clone());
                }
                settle(&inner.children, scope.enter(inner.mode), path, failure, state);
                if titled {
                    path.pop();
                }
            }
        }
    }
}
