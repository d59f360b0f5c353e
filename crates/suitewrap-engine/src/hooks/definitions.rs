//! Hook slot definitions and the descriptor record plugins hand back.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use suitewrap_core::AppResult;

/// The hook slots a wrapper may fill, in their canonical order.
pub const SUPPORTED_METHODS: [&str; 4] = ["before", "beforeEach", "after", "afterEach"];

/// Enumeration of the four hook slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookSlot {
    /// Runs once before the first test of a suite.
    Before,
    /// Runs before every test of a suite, including nested ones.
    BeforeEach,
    /// Runs once after the last test of a suite.
    After,
    /// Runs after every test of a suite, including nested ones.
    AfterEach,
}

impl HookSlot {
    /// All slots in canonical order.
    pub const ALL: [HookSlot; 4] = [
        Self::Before,
        Self::BeforeEach,
        Self::After,
        Self::AfterEach,
    ];

    /// Returns the runner-facing name of this slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::BeforeEach => "beforeEach",
            Self::After => "after",
            Self::AfterEach => "afterEach",
        }
    }

    /// Returns whether this slot runs ahead of the test body.
    pub fn is_before_hook(&self) -> bool {
        matches!(self, Self::Before | Self::BeforeEach)
    }
}

impl fmt::Display for HookSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zero-argument action run by the runner as a hook or test body.
pub type HookFn = Arc<dyn Fn() -> AppResult<()> + Send + Sync>;

/// Wraps a closure into a shared [`HookFn`].
pub fn hook_fn<F>(f: F) -> HookFn
where
    F: Fn() -> AppResult<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Ordered hook actions for each of the four slots.
///
/// A single action is the one-element case of a slot; pushing again
/// appends, preserving declaration order.
#[derive(Clone, Default)]
pub struct Hooks {
    before: Vec<HookFn>,
    before_each: Vec<HookFn>,
    after: Vec<HookFn>,
    after_each: Vec<HookFn>,
}

impl Hooks {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action to a slot.
    pub fn with<F>(mut self, slot: HookSlot, f: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.slot_mut(slot).push(Arc::new(f));
        self
    }

    /// Appends a `before` action.
    pub fn before<F>(self, f: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.with(HookSlot::Before, f)
    }

    /// Appends a `beforeEach` action.
    pub fn before_each<F>(self, f: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.with(HookSlot::BeforeEach, f)
    }

    /// Appends an `after` action.
    pub fn after<F>(self, f: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.with(HookSlot::After, f)
    }

    /// Appends an `afterEach` action.
    pub fn after_each<F>(self, f: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.with(HookSlot::AfterEach, f)
    }

    /// Returns the actions of a slot in declaration order.
    pub fn slot(&self, slot: HookSlot) -> &[HookFn] {
        match slot {
            HookSlot::Before => &self.before,
            HookSlot::BeforeEach => &self.before_each,
            HookSlot::After => &self.after,
            HookSlot::AfterEach => &self.after_each,
        }
    }

    /// Returns whether no slot holds an action.
    pub fn is_empty(&self) -> bool {
        HookSlot::ALL.iter().all(|slot| self.slot(*slot).is_empty())
    }

    fn slot_mut(&mut self, slot: HookSlot) -> &mut Vec<HookFn> {
        match slot {
            HookSlot::Before => &mut self.before,
            HookSlot::BeforeEach => &mut self.before_each,
            HookSlot::After => &mut self.after,
            HookSlot::AfterEach => &mut self.after_each,
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before", &self.before.len())
            .field("before_each", &self.before_each.len())
            .field("after", &self.after.len())
            .field("after_each", &self.after_each.len())
            .finish()
    }
}

/// A described set of hooks, appended to a wrapper chain by `extend`.
#[derive(Debug, Clone)]
pub struct HookDescriptor {
    /// Label contributed to the wrapping suite's title.
    pub description: String,
    /// The hook actions.
    pub hooks: Hooks,
}

impl HookDescriptor {
    /// Creates a descriptor.
    pub fn new(description: impl Into<String>, hooks: Hooks) -> Self {
        Self {
            description: description.into(),
            hooks,
        }
    }
}
