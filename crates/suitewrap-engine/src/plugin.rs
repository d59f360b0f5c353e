//! Plugin contract.
//!
//! A plugin is a named function applied to a [`WrapperNode`]. It hands back
//! either raw hook declarations or a fully composed node, and the caller
//! dispatches on the [`PluginResult`] tag.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use suitewrap_core::AppResult;

use crate::hooks::Hooks;
use crate::wrapper::WrapperNode;

/// Lazily produced value, evaluated when a hook runs.
pub type ValueThunk = Arc<dyn Fn() -> Value + Send + Sync>;

/// Trait implemented by every plugin.
///
/// The name must follow the `with*` convention; it is checked whenever the
/// plugin is used or registered.
pub trait Plugin: Send + Sync + fmt::Debug {
    /// Returns the plugin name, e.g. `withOverride`.
    fn name(&self) -> &str;

    /// Applies the plugin to `node` with the caller's arguments.
    fn apply(&self, node: &WrapperNode, args: &PluginArgs) -> AppResult<PluginResult>;
}

/// What a plugin hands back.
#[derive(Debug, Clone)]
pub enum PluginResult {
    /// Raw hook declarations, composed onto the receiver via `extend`.
    Descriptor {
        /// Suite label contribution; must be non-empty.
        description: String,
        /// Hook actions.
        hooks: Hooks,
    },
    /// A fully composed node, used as-is.
    Node(WrapperNode),
}

impl PluginResult {
    /// Builds a descriptor result.
    pub fn descriptor(description: impl Into<String>, hooks: Hooks) -> Self {
        Self::Descriptor {
            description: description.into(),
            hooks,
        }
    }
}

impl From<WrapperNode> for PluginResult {
    fn from(node: WrapperNode) -> Self {
        Self::Node(node)
    }
}

/// A single plugin argument.
#[derive(Clone)]
pub enum PluginArg {
    /// A plain JSON value.
    Value(Value),
    /// A function producing a value on demand.
    Thunk(ValueThunk),
    /// Any other plugin-specific payload, recovered by downcasting.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl fmt::Debug for PluginArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Thunk(_) => f.write_str("Thunk(<fn>)"),
            Self::Opaque(_) => f.write_str("Opaque(<any>)"),
        }
    }
}

/// Ordered arguments passed through to a plugin.
#[derive(Debug, Clone, Default)]
pub struct PluginArgs {
    args: Vec<PluginArg>,
}

impl PluginArgs {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a JSON value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.args.push(PluginArg::Value(value.into()));
        self
    }

    /// Appends a value-producing function.
    pub fn thunk<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.args.push(PluginArg::Thunk(Arc::new(f)));
        self
    }

    /// Appends a plugin-specific payload.
    pub fn opaque<T: Any + Send + Sync>(mut self, payload: T) -> Self {
        self.args.push(PluginArg::Opaque(Arc::new(payload)));
        self
    }

    /// Appends a prebuilt argument.
    pub fn push(mut self, arg: PluginArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns whether no argument was passed.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Returns the argument at `index`.
    pub fn get(&self, index: usize) -> Option<&PluginArg> {
        self.args.get(index)
    }

    /// Returns the argument at `index` if it is a JSON value.
    pub fn as_value(&self, index: usize) -> Option<&Value> {
        match self.get(index) {
            Some(PluginArg::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns the argument at `index` if it is a JSON string.
    pub fn as_str(&self, index: usize) -> Option<&str> {
        self.as_value(index).and_then(Value::as_str)
    }

    /// Returns the argument at `index` if it is a thunk.
    pub fn as_thunk(&self, index: usize) -> Option<&ValueThunk> {
        match self.get(index) {
            Some(PluginArg::Thunk(f)) => Some(f),
            _ => None,
        }
    }

    /// Returns the argument at `index` if it is an opaque payload of type `T`.
    pub fn downcast<T: Any + Send + Sync>(&self, index: usize) -> Option<&T> {
        match self.get(index) {
            Some(PluginArg::Opaque(payload)) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }
}

type ApplyFn = dyn Fn(&WrapperNode, &PluginArgs) -> AppResult<PluginResult> + Send + Sync;

/// A closure-based plugin for quick plugin creation.
#[derive(Clone)]
pub struct FnPlugin {
    name: String,
    apply: Arc<ApplyFn>,
}

impl fmt::Debug for FnPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPlugin")
            .field("name", &self.name)
            .field("apply", &"<closure>")
            .finish()
    }
}

impl FnPlugin {
    /// Creates a plugin named `name` backed by `apply`.
    pub fn new<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&WrapperNode, &PluginArgs) -> AppResult<PluginResult> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    /// Creates the plugin already shared for registration.
    pub fn shared<F>(name: impl Into<String>, apply: F) -> Arc<dyn Plugin>
    where
        F: Fn(&WrapperNode, &PluginArgs) -> AppResult<PluginResult> + Send + Sync + 'static,
    {
        Arc::new(Self::new(name, apply))
    }
}

impl Plugin for FnPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, node: &WrapperNode, args: &PluginArgs) -> AppResult<PluginResult> {
        (self.apply)(node, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_args_accessors() {
        let args = PluginArgs::new()
            .value(1)
            .value("key")
            .thunk(|| json!(true))
            .opaque(42u8);

        assert_eq!(args.len(), 4);
        assert_eq!(args.as_value(0), Some(&json!(1)));
        assert_eq!(args.as_str(0), None);
        assert_eq!(args.as_str(1), Some("key"));
        assert_eq!(args.as_thunk(2).map(|f| f()), Some(json!(true)));
        assert!(args.as_thunk(1).is_none());
        assert_eq!(args.downcast::<u8>(3), Some(&42));
        assert!(args.downcast::<u16>(3).is_none());
        assert!(args.get(4).is_none());
    }
}
