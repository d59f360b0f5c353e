//! Shared string-keyed objects that overrides are applied to.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use serde_json::Value;

/// A mutable JSON object shared between suites, hooks and tests.
pub type Object = Arc<DashMap<String, Value>>;

/// Produces the object to override, evaluated when the hook runs.
pub type ObjectThunk = Arc<dyn Fn() -> Object + Send + Sync>;

static GLOBALS: Lazy<Object> = Lazy::new(new_object);

/// Returns the process-wide globals object used by `withGlobal`.
pub fn globals() -> &'static Object {
    &GLOBALS
}

/// Creates an empty object.
pub fn new_object() -> Object {
    Arc::new(DashMap::new())
}

/// Wraps `object` in a thunk returning a handle to it.
pub fn object_thunk(object: &Object) -> ObjectThunk {
    let object = object.clone();
    Arc::new(move || object.clone())
}
