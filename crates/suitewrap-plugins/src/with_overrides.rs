//! `withOverrides(objectThunk, overridesThunk)`.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use suitewrap_core::{AppError, AppResult};
use suitewrap_engine::{Hooks, Plugin, PluginArgs, PluginResult, ValueThunk, WrapperNode};

use crate::object::{Object, ObjectThunk};

/// Values replaced by the last `beforeEach`, restored by the next
/// `afterEach`. `None` marks a key that was absent.
struct Saved {
    object: Object,
    previous: Vec<(String, Option<Value>)>,
}

type SavedState = Arc<Mutex<Option<Saved>>>;

/// Overrides several keys of an object for the duration of each test.
///
/// Arguments: an opaque [`ObjectThunk`] and a thunk producing a JSON object
/// of overrides. Both thunks are evaluated in `beforeEach`; a non-object
/// overrides value fails the hook with a type error.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithOverrides;

impl WithOverrides {
    /// Plugin name.
    pub const NAME: &'static str = "withOverrides";
}

impl Plugin for WithOverrides {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, _node: &WrapperNode, args: &PluginArgs) -> AppResult<PluginResult> {
        let object = args
            .downcast::<ObjectThunk>(0)
            .cloned()
            .ok_or_else(|| AppError::type_error("a function that returns the object is required"))?;
        let overrides = args.as_thunk(1).cloned().ok_or_else(|| {
            AppError::type_error("a function that returns the overrides is required")
        })?;

        let saved: SavedState = Arc::new(Mutex::new(None));
        let restore = saved.clone();

        let hooks = Hooks::new()
            .before_each(move || apply_overrides(&object, &overrides, &saved))
            .after_each(move || restore_overrides(&restore));

        Ok(PluginResult::descriptor("with overrides", hooks))
    }
}

fn lock(state: &SavedState) -> AppResult<std::sync::MutexGuard<'_, Option<Saved>>> {
    state
        .lock()
        .map_err(|_| AppError::internal("override state lock poisoned"))
}

fn apply_overrides(object: &ObjectThunk, overrides: &ValueThunk, state: &SavedState) -> AppResult<()> {
    let target = object();
    let Value::Object(pairs) = overrides() else {
        return Err(AppError::type_error("overrides must be an object"));
    };

    let mut previous = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        debug!(key = %key, "Applying override");
        let old = target.insert(key.clone(), value);
        previous.push((key, old));
    }

    *lock(state)? = Some(Saved {
        object: target,
        previous,
    });
    Ok(())
}

fn restore_overrides(state: &SavedState) -> AppResult<()> {
    let Some(saved) = lock(state)?.take() else {
        return Ok(());
    };

    for (key, old) in saved.previous.into_iter().rev() {
        match old {
            Some(value) => {
                saved.object.insert(key, value);
            }
            None => {
                saved.object.remove(&key);
            }
        }
    }
    Ok(())
}
