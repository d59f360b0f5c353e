//! # suitewrap-engine
//!
//! Composable wrappers for describe/it style test declarations. Provides:
//!
//! - Immutable [`WrapperNode`] composition (`extend`, `use_plugin`, `skip`, `only`)
//! - Flattening of nested wrapper chains into hook order
//! - Registration of wrapped declarations with a [`Runner`], before hooks in
//!   order and after hooks in reverse
//! - A [`PluginRegistry`] for `with*` shorthand calls
//! - An in-memory [`MemoryRunner`] that executes the declared tree

pub mod assertion;
pub mod flatten;
pub mod hooks;
pub mod name;
pub mod plugin;
pub mod registry;
pub mod runner;
pub mod wrapper;

pub use flatten::flatten;
pub use hooks::{HookDescriptor, HookFn, HookSlot, Hooks, SUPPORTED_METHODS, hook_fn};
pub use name::check_with_name;
pub use plugin::{FnPlugin, Plugin, PluginArg, PluginArgs, PluginResult, ValueThunk};
pub use registry::{PluginRef, PluginRegistry, default_registry};
pub use runner::{
    Block, Declaration, MemoryRunner, RunOptions, RunReport, Runner, SuiteBody, TestOutcome,
    TestStatus,
};
pub use wrapper::{Mode, WrapperElement, WrapperNode, wrap};
