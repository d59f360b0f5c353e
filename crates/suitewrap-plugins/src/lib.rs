//! # Suitewrap built-in plugins
//!
//! Property overrides scoped to each test:
//!
//! - `withOverrides`: sets several keys on a shared [`Object`].
//! - `withOverride`: sets a single key.
//! - `withGlobal`: sets a key on the process-wide [`globals`] object.
//!
//! Values are applied in `beforeEach` and restored in `afterEach`, so every
//! test sees the override and nothing leaks past it.

pub mod ext;
pub mod object;
pub mod with_global;
pub mod with_override;
pub mod with_overrides;

use std::sync::Arc;

use tracing::info;

use suitewrap_core::AppResult;
use suitewrap_engine::{Plugin, PluginRegistry};

pub use ext::OverrideExt;
pub use object::{Object, ObjectThunk, globals, new_object, object_thunk};
pub use with_global::WithGlobal;
pub use with_override::WithOverride;
pub use with_overrides::WithOverrides;

/// Returns the built-in plugins in registration order.
pub fn builtins() -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(WithOverrides),
        Arc::new(WithOverride),
        Arc::new(WithGlobal),
    ]
}

/// Registers every built-in plugin on `registry`.
pub fn register_builtins(registry: &PluginRegistry) -> AppResult<()> {
    let plugins = builtins();
    let count = plugins.len();
    for plugin in plugins {
        registry.register(plugin)?;
    }

    info!(count = count, "Built-in plugins registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins() {
        let registry = PluginRegistry::new();
        register_builtins(&registry).unwrap();
        assert_eq!(
            registry.names(),
            vec!["withGlobal", "withOverride", "withOverrides"]
        );

        // Second registration keeps the installed plugins.
        register_builtins(&registry).unwrap();
        assert_eq!(registry.count(), 3);
    }
}
