//! `withOverride(objectThunk, key, valueThunk)`.

use serde_json::{Map, Value};

use suitewrap_core::{AppError, AppResult};
use suitewrap_engine::{Plugin, PluginArgs, PluginResult, WrapperNode};

use crate::with_overrides::WithOverrides;

/// Overrides a single key, built on [`WithOverrides`].
///
/// Arguments: an opaque [`crate::ObjectThunk`], a string key, and a thunk
/// producing the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithOverride;

impl WithOverride {
    /// Plugin name.
    pub const NAME: &'static str = "withOverride";
}

impl Plugin for WithOverride {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, node: &WrapperNode, args: &PluginArgs) -> AppResult<PluginResult> {
        let key = args
            .as_str(1)
            .ok_or_else(|| AppError::type_error("override key must be a string"))?
            .to_string();
        let value = args
            .as_thunk(2)
            .cloned()
            .ok_or_else(|| AppError::type_error("a function that returns the value is required"))?;

        let object = args
            .get(0)
            .cloned()
            .ok_or_else(|| AppError::type_error("a function that returns the object is required"))?;
        let label = format!("with override: {key:?}");
        let overrides = move || {
            let mut pairs = Map::new();
            pairs.insert(key.clone(), value());
            Value::Object(pairs)
        };

        let composed = node
            .use_plugin(&WithOverrides, PluginArgs::new().push(object).thunk(overrides))?
            .extend(&label, None)?;

        Ok(composed.into())
    }
}
