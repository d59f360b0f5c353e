//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use suitewrap_engine::{HookSlot, Hooks, PluginRegistry, WrapperNode};

/// Ordered record of hook and test calls.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an action that appends `entry` when run.
    pub fn push(&self, entry: &str) -> impl Fn() -> suitewrap_core::AppResult<()> + Send + Sync + 'static {
        let calls = self.calls.clone();
        let entry = entry.to_string();
        move || {
            calls.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    /// Hooks logging `<prefix>:<slot>` for all four slots.
    pub fn hooks(&self, prefix: &str) -> Hooks {
        HookSlot::ALL.iter().fold(Hooks::new(), |hooks, slot| {
            hooks.with(*slot, self.push(&format!("{prefix}:{slot}")))
        })
    }

    pub fn entries(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// A fresh node on an isolated registry.
pub fn isolated_root() -> WrapperNode {
    WrapperNode::root(Arc::new(PluginRegistry::new()))
}
