//! Registers a wrapped declaration with the runner.
//!
//! The declaration is nested inside a suite labelled
//! `wrapped: <descriptions>:` that carries the composed hooks. Before hooks
//! are attached in flattened order and after hooks in reverse, so N wrappers
//! unwind like nested scopes: the last one applied tears down first.

use tracing::debug;

use suitewrap_core::{AppError, AppResult};

use crate::flatten::flatten;
use crate::hooks::HookSlot;
use crate::runner::{Block, Declaration, Runner};
use crate::wrapper::{Mode, WrapperElement};

/// Builds the wrapping suite title from the top-level chain elements.
pub fn wrapped_label(wrappers: &[WrapperElement]) -> String {
    let descriptions: Vec<&str> = wrappers.iter().filter_map(WrapperElement::description).collect();
    format!("wrapped: {}:", descriptions.join("; "))
}

/// Registers `block` as a `kind` declaration wrapped by `wrappers`.
///
/// Fails with a range error when the chain holds no descriptor and `mode`
/// is [`Mode::All`]; skipped and exclusive declarations are allowed to be
/// bare.
pub fn create_assertion(
    runner: &mut dyn Runner,
    kind: Declaration,
    message: &str,
    wrappers: &[WrapperElement],
    block: Block<'_>,
    mode: Mode,
) -> AppResult<()> {
    let descriptors = flatten(wrappers);
    if descriptors.is_empty() && mode == Mode::All {
        return Err(AppError::range(format!(
            "\"{kind}\" called with no wrappers defined"
        )));
    }

    let label = wrapped_label(wrappers);

    debug!(
        kind = %kind,
        mode = %mode,
        label = %label,
        descriptors = descriptors.len(),
        "Registering wrapped declaration"
    );

    let body = move |runner: &mut dyn Runner| -> AppResult<()> {
        for descriptor in &descriptors {
            for slot in HookSlot::ALL.into_iter().filter(HookSlot::is_before_hook) {
                for action in descriptor.hooks.slot(slot) {
                    runner.hook(slot, action.clone())?;
                }
            }
        }

        runner.declare(kind, Mode::All, message, block)?;

        for descriptor in descriptors.iter().rev() {
            for slot in HookSlot::ALL.into_iter().filter(|slot| !slot.is_before_hook()) {
                for action in descriptor.hooks.slot(slot) {
                    runner.hook(slot, action.clone())?;
                }
            }
        }

        Ok(())
    };

    runner.declare(Declaration::Describe, mode, &label, Block::Suite(Box::new(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::hooks::{HookFn, Hooks};
    use crate::registry::PluginRegistry;
    use crate::wrapper::WrapperNode;
    use suitewrap_core::ErrorKind;

    /// Records registration calls without executing anything.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Runner for Recorder {
        fn declare(
            &mut self,
            kind: Declaration,
            mode: Mode,
            label: &str,
            block: Block<'_>,
        ) -> AppResult<()> {
            self.calls.push(format!("{kind}.{mode}({label})"));
            if let Block::Suite(body) = block {
                body(self)?;
                self.calls.push(format!("end({label})"));
            }
            Ok(())
        }

        fn hook(&mut self, slot: HookSlot, action: HookFn) -> AppResult<()> {
            action()?;
            self.calls.push(slot.to_string());
            Ok(())
        }
    }

    fn root() -> WrapperNode {
        WrapperNode::root(Arc::new(PluginRegistry::new()))
    }

    fn all_slots() -> Hooks {
        Hooks::new()
            .before(|| Ok(()))
            .before_each(|| Ok(()))
            .after(|| Ok(()))
            .after_each(|| Ok(()))
    }

    #[test]
    fn test_bare_declaration_is_range_error() {
        let mut runner = Recorder::default();
        for result in [
            root().it(&mut runner, "foo", || Ok(())),
            root().specify(&mut runner, "foo", || Ok(())),
            root().describe(&mut runner, "foo", |_| Ok(())),
            root().context(&mut runner, "foo", |_| Ok(())),
        ] {
            assert_eq!(result.unwrap_err().kind, ErrorKind::Range);
        }
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_bare_declaration_allowed_when_skipped_or_only() {
        let mut runner = Recorder::default();
        root().skip().it(&mut runner, "foo", || Ok(())).unwrap();
        root().skip().describe(&mut runner, "bar", |_| Ok(())).unwrap();
        root().skip().context(&mut runner, "baz", |_| Ok(())).unwrap();
        root().only().describe(&mut runner, "foo", |_| Ok(())).unwrap();
        assert_eq!(
            runner.calls,
            vec![
                "describe.skip(wrapped: :)",
                "it.all(foo)",
                "end(wrapped: :)",
                "describe.skip(wrapped: :)",
                "describe.all(bar)",
                "end(bar)",
                "end(wrapped: :)",
                "describe.skip(wrapped: :)",
                "context.all(baz)",
                "end(baz)",
                "end(wrapped: :)",
                "describe.only(wrapped: :)",
                "describe.all(foo)",
                "end(foo)",
                "end(wrapped: :)",
            ]
        );
    }

    #[test]
    fn test_hooks_registered_around_declaration() {
        let mut runner = Recorder::default();
        root()
            .extend("first", Some(all_slots()))
            .unwrap()
            .it(&mut runner, "test", || Ok(()))
            .unwrap();

        assert_eq!(
            runner.calls,
            vec![
                "describe.all(wrapped: first:)",
                "before",
                "beforeEach",
                "it.all(test)",
                "after",
                "afterEach",
                "end(wrapped: first:)",
            ]
        );
    }

    #[test]
    fn test_label_joins_top_level_descriptions() {
        let node = root()
            .extend("first", Some(Hooks::new()))
            .unwrap()
            .extend("second", Some(Hooks::new()))
            .unwrap();
        assert_eq!(wrapped_label(node.wrappers()), "wrapped: first; second:");
        assert_eq!(wrapped_label(&[]), "wrapped: :");
    }

    #[test]
    fn test_mode_selects_registration_variant() {
        let node = root().extend("x", Some(Hooks::new())).unwrap();
        let mut runner = Recorder::default();
        node.skip().specify(&mut runner, "s", || Ok(())).unwrap();
        node.only().context(&mut runner, "c", |_| Ok(())).unwrap();
        assert_eq!(runner.calls[0], "describe.skip(wrapped: x:)");
        assert_eq!(runner.calls[1], "specify.all(s)");
        assert_eq!(runner.calls[3], "describe.only(wrapped: x:)");
        assert_eq!(runner.calls[4], "context.all(c)");
    }
}
