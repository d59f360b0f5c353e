//! `withGlobal` against the process-wide globals object.

use serde_json::json;
use suitewrap_core::{AppError, AppResult};
use suitewrap_engine::{
    Block, Declaration, HookSlot, MemoryRunner, Mode, RunOptions, Runner, hook_fn, wrap,
};
use suitewrap_plugins::{OverrideExt, globals};

fn global_is(key: &'static str, expected: i64) -> impl Fn() -> AppResult<()> + Send + Sync + 'static {
    move || match globals().get(key).and_then(|v| v.as_i64()) {
        Some(actual) if actual == expected => Ok(()),
        actual => Err(AppError::hook(format!("global {key} is {actual:?}, expected {expected}"))),
    }
}

fn all_initial() -> impl Fn() -> AppResult<()> + Send + Sync + 'static {
    let checks = [global_is("foo", 42), global_is("bar", 100), global_is("baz", -1)];
    move || checks.iter().try_for_each(|check| check())
}

#[test]
fn test_with_global_plugin() {
    let mut runner = MemoryRunner::new();
    runner
        .hook(
            HookSlot::Before,
            hook_fn(|| {
                globals().insert("foo".to_string(), json!(42));
                globals().insert("bar".to_string(), json!(100));
                globals().insert("baz".to_string(), json!(-1));
                Ok(())
            }),
        )
        .unwrap();
    runner
        .hook(
            HookSlot::After,
            hook_fn(|| {
                for key in ["foo", "bar", "baz"] {
                    globals().remove(key);
                }
                Ok(())
            }),
        )
        .unwrap();

    runner
        .declare(
            Declaration::It,
            Mode::All,
            "has globals set to initial values",
            Block::Test(hook_fn(all_initial())),
        )
        .unwrap();

    let checks = [global_is("foo", 123), global_is("bar", 100), global_is("baz", -1)];
    wrap()
        .with_global("foo", || json!(123))
        .unwrap()
        .it(&mut runner, "foo is 123", move || {
            checks.iter().try_for_each(|check| check())
        })
        .unwrap();

    let (foo, bar, baz) = (global_is("foo", 123), global_is("bar", 456), global_is("baz", -1));
    wrap()
        .with_global("foo", || json!(123))
        .unwrap()
        .with_global("bar", || json!(456))
        .unwrap()
        .describe(&mut runner, "foo and bar", move |r: &mut dyn Runner| {
            r.declare(Declaration::It, Mode::All, "has the right foo", Block::Test(hook_fn(foo)))?;
            r.declare(Declaration::It, Mode::All, "has the right bar", Block::Test(hook_fn(bar)))?;
            r.declare(Declaration::It, Mode::All, "has the right baz", Block::Test(hook_fn(baz)))
        })
        .unwrap();

    runner
        .declare(
            Declaration::It,
            Mode::All,
            "still has globals set to initial values",
            Block::Test(hook_fn(all_initial())),
        )
        .unwrap();

    let report = runner.run(RunOptions::default()).unwrap();
    assert!(report.is_success(), "{:?}", report.tests);
    assert_eq!(report.passed(), 6);
    assert!(!globals().contains_key("foo"));
}
