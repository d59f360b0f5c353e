//! Hook ordering observed at run time.

mod helpers;

use helpers::{CallLog, isolated_root};
use std::sync::Arc;

use suitewrap_engine::{Block, Declaration, Hooks, MemoryRunner, Mode, RunOptions, Runner};

#[test]
fn test_two_wrappers_unwind_in_reverse() {
    let log = CallLog::new();
    let mut runner = MemoryRunner::new();

    let first = log.push(">>>:test");
    let second = log.push(">>>:test");
    isolated_root()
        .extend(">", Some(log.hooks(">")))
        .unwrap()
        .extend(">>", Some(log.hooks(">>")))
        .unwrap()
        .describe(&mut runner, "with method tracking", move |r: &mut dyn Runner| {
            r.declare(
                Declaration::It,
                Mode::All,
                "is one test",
                Block::Test(Arc::new(first)),
            )?;
            r.declare(
                Declaration::It,
                Mode::All,
                "is another test",
                Block::Test(Arc::new(second)),
            )
        })
        .unwrap();

    let report = runner.run(RunOptions::default()).unwrap();
    assert_eq!(report.passed(), 2);
    assert_eq!(
        log.entries(),
        vec![
            ">:before",
            ">>:before",
            ">:beforeEach",
            ">>:beforeEach",
            ">>>:test",
            ">>:afterEach",
            ">:afterEach",
            ">:beforeEach",
            ">>:beforeEach",
            ">>>:test",
            ">>:afterEach",
            ">:afterEach",
            ">>:after",
            ">:after",
        ]
    );
    assert_eq!(
        report.tests[0].full_title(),
        "wrapped: >; >>: with method tracking is one test"
    );
}

#[test]
fn test_wrapped_it_runs_hooks_once_around_body() {
    let log = CallLog::new();
    let mut runner = MemoryRunner::new();

    isolated_root()
        .extend("outer", Some(log.hooks("outer")))
        .unwrap()
        .it(&mut runner, "body", log.push("body"))
        .unwrap();

    let report = runner.run(RunOptions::default()).unwrap();
    assert!(report.is_success());
    assert_eq!(
        log.entries(),
        vec![
            "outer:before",
            "outer:beforeEach",
            "body",
            "outer:afterEach",
            "outer:after",
        ]
    );
}

#[test]
fn test_skipped_wrapper_runs_nothing() {
    let log = CallLog::new();
    let mut runner = MemoryRunner::new();

    isolated_root()
        .extend("w", Some(log.hooks("w")))
        .unwrap()
        .skip()
        .it(&mut runner, "skipped an it!", log.push("body"))
        .unwrap();

    let report = runner.run(RunOptions::default()).unwrap();
    assert_eq!(report.pending(), 1);
    assert!(log.entries().is_empty());
}

#[test]
fn test_only_wrapper_excludes_siblings() {
    let log = CallLog::new();
    let mut runner = MemoryRunner::new();

    isolated_root()
        .extend("w", Some(log.hooks("w")))
        .unwrap()
        .it(&mut runner, "fails", || {
            Err(suitewrap_core::AppError::hook("explode!"))
        })
        .unwrap();
    isolated_root()
        .extend("with nothing", Some(Hooks::new().before(|| Ok(()))))
        .unwrap()
        .only()
        .it(&mut runner, "passes", log.push("passes"))
        .unwrap();

    let report = runner.run(RunOptions::default()).unwrap();
    assert!(report.is_success());
    assert_eq!(report.tests.len(), 1);
    assert_eq!(log.entries(), vec!["passes"]);
}

#[test]
fn test_failed_outer_setup_skips_inner_teardown() {
    let log = CallLog::new();
    let mut runner = MemoryRunner::new();

    let inner_log = log.clone();
    isolated_root()
        .extend(
            "outer",
            Some(Hooks::new().before_each(|| Err(suitewrap_core::AppError::hook("no setup")))),
        )
        .unwrap()
        .describe(&mut runner, "outer suite", move |r: &mut dyn Runner| {
            let inner = Hooks::new()
                .before_each(inner_log.push("inner:beforeEach"))
                .after_each(inner_log.push("inner:afterEach"));
            isolated_root()
                .extend("inner", Some(inner))?
                .it(r, "never runs", inner_log.push("test"))
        })
        .unwrap();

    let report = runner.run(RunOptions::default()).unwrap();
    assert_eq!(report.failed(), 1);
    assert!(log.entries().is_empty());
}
