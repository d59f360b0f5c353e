//! `withGlobal(name, valueThunk)`.

use std::sync::Arc;

use suitewrap_core::{AppError, AppResult};
use suitewrap_engine::{Plugin, PluginArgs, PluginResult, WrapperNode};

use crate::object::{ObjectThunk, globals};
use crate::with_override::WithOverride;

/// Overrides one key of the process-wide [`globals`] object.
///
/// Arguments: a non-empty name and a thunk producing the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithGlobal;

impl WithGlobal {
    /// Plugin name.
    pub const NAME: &'static str = "withGlobal";
}

impl Plugin for WithGlobal {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, node: &WrapperNode, args: &PluginArgs) -> AppResult<PluginResult> {
        let name = args
            .as_str(0)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::type_error("global name must be a non-empty string"))?;

        let target: ObjectThunk = Arc::new(|| globals().clone());
        let mut forwarded = PluginArgs::new().opaque(target).value(name);
        if let Some(value) = args.get(1) {
            forwarded = forwarded.push(value.clone());
        }

        let composed = node
            .use_plugin(&WithOverride, forwarded)?
            .extend(&format!("with global: {name:?}"), None)?;

        Ok(composed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use suitewrap_core::ErrorKind;
    use suitewrap_engine::PluginRegistry;

    fn root() -> WrapperNode {
        WrapperNode::root(Arc::new(PluginRegistry::new()))
    }

    #[test]
    fn test_name_must_be_non_empty_string() {
        for args in [
            PluginArgs::new().value("").thunk(|| json!(1)),
            PluginArgs::new().value(7).thunk(|| json!(1)),
            PluginArgs::new(),
        ] {
            let err = root().use_plugin(&WithGlobal, args).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Type);
            assert_eq!(err.message, "global name must be a non-empty string");
        }
    }

    #[test]
    fn test_value_thunk_is_checked_downstream() {
        let err = root()
            .use_plugin(&WithGlobal, PluginArgs::new().value("foo"))
            .unwrap_err();
        assert_eq!(err.message, "a function that returns the value is required");
    }

    #[test]
    fn test_label() {
        let node = root()
            .use_plugin(&WithGlobal, PluginArgs::new().value("foo").thunk(|| json!(123)))
            .unwrap();
        assert_eq!(node.wrappers()[0].description(), Some("with global: \"foo\""));
    }
}
