//! Plugin registry: maps `with*` names to plugins for shorthand calls.
//!
//! Nodes hold an `Arc<PluginRegistry>`, so a suite can be built against an
//! isolated registry. [`default_registry`] is the process-wide instance used
//! by [`crate::wrap`].

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::Lazy;
use tracing::{debug, info};

use suitewrap_core::{AppError, AppResult};

use crate::name::check_with_name;
use crate::plugin::Plugin;

static DEFAULT_REGISTRY: Lazy<Arc<PluginRegistry>> = Lazy::new(|| Arc::new(PluginRegistry::new()));

/// Returns the process-wide registry.
pub fn default_registry() -> &'static Arc<PluginRegistry> {
    &DEFAULT_REGISTRY
}

/// Identifies a plugin to unregister, either by name or by the plugin itself.
#[derive(Debug, Clone, Copy)]
pub enum PluginRef<'a> {
    /// The literal plugin name.
    Name(&'a str),
    /// The plugin; its name is used.
    Plugin(&'a dyn Plugin),
}

impl PluginRef<'_> {
    fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Plugin(plugin) => plugin.name(),
        }
    }
}

impl<'a> From<&'a str> for PluginRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for PluginRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a dyn Plugin> for PluginRef<'a> {
    fn from(plugin: &'a dyn Plugin) -> Self {
        Self::Plugin(plugin)
    }
}

impl<'a> From<&'a Arc<dyn Plugin>> for PluginRef<'a> {
    fn from(plugin: &'a Arc<dyn Plugin>) -> Self {
        Self::Plugin(plugin.as_ref())
    }
}

/// Registry of installed plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Plugin name → plugin.
    plugins: DashMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: DashMap::new(),
        }
    }

    /// Installs a plugin under its name.
    ///
    /// Registering a name that is already installed is a no-op; the
    /// installed plugin is kept.
    pub fn register(&self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let name = plugin.name().to_string();
        check_with_name(&name)?;

        match self.plugins.entry(name) {
            Entry::Occupied(entry) => {
                debug!(plugin = %entry.key(), "Plugin already registered, skipping");
            }
            Entry::Vacant(entry) => {
                info!(plugin = %entry.key(), "Plugin registered");
                entry.insert(plugin);
            }
        }

        Ok(())
    }

    /// Removes a plugin, given either the plugin or its name.
    pub fn unregister<'a>(&self, plugin: impl Into<PluginRef<'a>>) -> AppResult<Arc<dyn Plugin>> {
        let plugin = plugin.into();
        let name = plugin.name();
        check_with_name(name)?;

        let (_, removed) = self.plugins.remove(name).ok_or_else(|| {
            AppError::range(format!("error: plugin \"{name}\" is not registered."))
        })?;

        info!(plugin = %name, "Plugin unregistered");

        Ok(removed)
    }

    /// Gets the plugin installed under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(name).map(|entry| entry.value().clone())
    }

    /// Checks whether a plugin is installed under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Lists installed plugin names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Returns the number of installed plugins.
    pub fn count(&self) -> usize {
        self.plugins.len()
    }
}
