//! Suitewrap demo: declares a wrapped sample suite and runs it in memory.
//!
//! Wires configuration, logging and the plugin registry together, then
//! prints one line per test followed by the run summary.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use suitewrap_core::config::AppConfig;
use suitewrap_core::{AppError, AppResult};
use suitewrap_engine::{
    Hooks, MemoryRunner, PluginArgs, PluginRegistry, RunOptions, RunReport, Runner, TestStatus,
    WrapperNode,
};
use suitewrap_plugins::{WithOverride, new_object, object_thunk, register_builtins};

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    match run(&config) {
        Ok(report) if report.is_success() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            error!(error = %e, "Demo run failed");
            std::process::exit(1);
        }
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SUITEWRAP_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

fn run(config: &AppConfig) -> AppResult<RunReport> {
    info!("Starting suitewrap demo v{}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(PluginRegistry::new());
    if config.plugins.builtins {
        register_builtins(&registry)?;
    }

    let mut runner = MemoryRunner::new();
    declare_sample_suite(&mut runner, &registry)?;
    info!(tests = runner.test_count(), "Sample suite declared");

    let report = runner.run(RunOptions::from(&config.runner))?;
    for outcome in &report.tests {
        let status = match &outcome.status {
            TestStatus::Passed => "ok".to_string(),
            TestStatus::Failed { error } => format!("FAILED: {error}"),
            TestStatus::Pending => "pending".to_string(),
        };
        println!("{} ... {status}", outcome.full_title());
    }
    for failure in &report.hook_failures {
        println!("{} {} hook ... FAILED: {}", failure.suite, failure.slot, failure.error);
    }
    println!("{}", report.summary());

    Ok(report)
}

fn declare_sample_suite(runner: &mut dyn Runner, registry: &Arc<PluginRegistry>) -> AppResult<()> {
    let traced = WrapperNode::root(registry.clone()).extend(
        "with tracing",
        Some(
            Hooks::new()
                .before_each(|| {
                    debug!("Entering traced test");
                    Ok(())
                })
                .after_each(|| {
                    debug!("Leaving traced test");
                    Ok(())
                }),
        ),
    )?;

    traced.it(runner, "runs inside the tracing wrapper", || Ok(()))?;

    if registry.contains(WithOverride::NAME) {
        let settings = new_object();
        settings.insert("mode".to_string(), json!("production"));

        let observed = settings.clone();
        traced
            .with(
                WithOverride::NAME,
                PluginArgs::new()
                    .opaque(object_thunk(&settings))
                    .value("mode")
                    .thunk(|| json!("test")),
            )?
            .it(runner, "sees the overridden mode", move || {
                match observed.get("mode").map(|v| v.value().clone()) {
                    Some(mode) if mode == json!("test") => Ok(()),
                    other => Err(AppError::hook(format!("unexpected mode {other:?}"))),
                }
            })?;
    }

    traced.skip().it(runner, "is reported pending", || Ok(()))
}
