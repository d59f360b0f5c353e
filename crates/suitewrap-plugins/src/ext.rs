//! Typed shorthands for the built-in plugins.

use serde_json::Value;

use suitewrap_core::AppResult;
use suitewrap_engine::{PluginArgs, WrapperNode};

use crate::object::ObjectThunk;
use crate::with_global::WithGlobal;
use crate::with_override::WithOverride;
use crate::with_overrides::WithOverrides;

/// Adds `with_overrides`, `with_override` and `with_global` to nodes.
///
/// These apply the plugins directly, so they work without registering the
/// built-ins.
pub trait OverrideExt {
    /// Applies `withOverrides`.
    fn with_overrides<F>(&self, object: ObjectThunk, overrides: F) -> AppResult<WrapperNode>
    where
        F: Fn() -> Value + Send + Sync + 'static;

    /// Applies `withOverride`.
    fn with_override<F>(&self, object: ObjectThunk, key: &str, value: F) -> AppResult<WrapperNode>
    where
        F: Fn() -> Value + Send + Sync + 'static;

    /// Applies `withGlobal`.
    fn with_global<F>(&self, name: &str, value: F) -> AppResult<WrapperNode>
    where
        F: Fn() -> Value + Send + Sync + 'static;
}

impl OverrideExt for WrapperNode {
    fn with_overrides<F>(&self, object: ObjectThunk, overrides: F) -> AppResult<WrapperNode>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.use_plugin(&WithOverrides, PluginArgs::new().opaque(object).thunk(overrides))
    }

    fn with_override<F>(&self, object: ObjectThunk, key: &str, value: F) -> AppResult<WrapperNode>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.use_plugin(
            &WithOverride,
            PluginArgs::new().opaque(object).value(key).thunk(value),
        )
    }

    fn with_global<F>(&self, name: &str, value: F) -> AppResult<WrapperNode>
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.use_plugin(&WithGlobal, PluginArgs::new().value(name).thunk(value))
    }
}
