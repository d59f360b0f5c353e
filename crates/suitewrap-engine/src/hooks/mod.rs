//! Hook slots and descriptors.

pub mod definitions;

pub use definitions::{HookDescriptor, HookFn, HookSlot, Hooks, SUPPORTED_METHODS, hook_fn};
