//! Wrapper nodes: immutable composition units for hook wrappers.
//!
//! Every composing operation returns a new node. A node owns its element
//! list; sub-nodes inside it are shared behind `Arc` and may be referenced
//! from several parents.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use suitewrap_core::{AppError, AppResult};

use crate::assertion::create_assertion;
use crate::flatten::flatten;
use crate::hooks::{HookDescriptor, HookFn, Hooks};
use crate::name::check_with_name;
use crate::plugin::{Plugin, PluginArgs, PluginResult};
use crate::registry::{PluginRegistry, default_registry};
use crate::runner::{Block, Declaration, Runner};

/// Skip/only disposition, propagated to the wrapping suite registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Run normally.
    #[default]
    All,
    /// Register as skipped.
    Skip,
    /// Register as exclusive.
    Only,
}

impl Mode {
    /// Returns the runner-facing name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Skip => "skip",
            Self::Only => "only",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a wrapper chain.
#[derive(Debug, Clone)]
pub enum WrapperElement {
    /// Hooks appended by `extend`.
    Descriptor(Arc<HookDescriptor>),
    /// A composed node, flattened recursively.
    Node(Arc<WrapperNode>),
}

impl WrapperElement {
    /// Returns the label this element contributes to the wrapping suite.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Descriptor(descriptor) => Some(&descriptor.description),
            Self::Node(node) => node.description(),
        }
    }
}

/// Creates a fresh node on the process-wide registry.
pub fn wrap() -> WrapperNode {
    WrapperNode::root(default_registry().clone())
}

/// An immutable wrapper composition.
#[derive(Clone)]
pub struct WrapperNode {
    wrappers: Vec<WrapperElement>,
    mode: Mode,
    description: Option<String>,
    registry: Arc<PluginRegistry>,
}

impl fmt::Debug for WrapperNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperNode")
            .field("wrappers", &self.wrappers)
            .field("mode", &self.mode)
            .field("description", &self.description)
            .finish()
    }
}

/// Generates the `<kind>_skip` / `<kind>_only` guards.
macro_rules! shorthand_guards {
    ($($name:ident => ($kind:ident, $mode:ident)),* $(,)?) => {
        $(
            /// Always fails; see [`Self::reject_shorthand`].
            pub fn $name(&self, _message: &str) -> AppResult<()> {
                self.reject_shorthand(Declaration::$kind, Mode::$mode)
            }
        )*
    };
}

impl WrapperNode {
    /// Creates an empty node in `All` mode resolving plugins from `registry`.
    pub fn root(registry: Arc<PluginRegistry>) -> Self {
        Self {
            wrappers: Vec::new(),
            mode: Mode::All,
            description: None,
            registry,
        }
    }

    /// The ordered wrapper chain.
    pub fn wrappers(&self) -> &[WrapperElement] {
        &self.wrappers
    }

    /// The skip/only disposition.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The label set by the last `extend`; `None` on a root.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The registry used for shorthand plugin calls.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// The wrapper chain flattened to descriptors in hook order.
    pub fn flattened(&self) -> Vec<Arc<HookDescriptor>> {
        flatten(&self.wrappers)
    }

    fn derive(&self, wrappers: Vec<WrapperElement>, mode: Mode, description: Option<String>) -> Self {
        Self {
            wrappers,
            mode,
            description,
            registry: self.registry.clone(),
        }
    }

    /// Returns a described copy, appending `hooks` when given.
    ///
    /// Without hooks the chain is copied unchanged and only the
    /// description is set.
    pub fn extend(&self, description: &str, hooks: Option<Hooks>) -> AppResult<Self> {
        if description.is_empty() {
            return Err(AppError::type_error(
                "a non-empty description string is required",
            ));
        }

        let mut wrappers = self.wrappers.clone();
        if let Some(hooks) = hooks {
            wrappers.push(WrapperElement::Descriptor(Arc::new(HookDescriptor::new(
                description,
                hooks,
            ))));
        }

        Ok(self.derive(wrappers, self.mode, Some(description.to_string())))
    }

    /// Applies a plugin and wraps its result in a new node.
    ///
    /// A descriptor result is composed onto `self` via [`Self::extend`]. The
    /// returned node references the plugin's node exclusively and keeps its
    /// mode.
    pub fn use_plugin<P>(&self, plugin: &P, args: PluginArgs) -> AppResult<Self>
    where
        P: Plugin + ?Sized,
    {
        check_with_name(plugin.name())?;

        let node = match plugin.apply(self, &args)? {
            PluginResult::Node(node) => node,
            PluginResult::Descriptor { description, hooks } => {
                self.extend(&description, Some(hooks))?
            }
        };

        let mode = node.mode;
        Ok(self.derive(vec![WrapperElement::Node(Arc::new(node))], mode, None))
    }

    /// Shorthand for `use_plugin` with the plugin registered under `name`.
    pub fn with(&self, name: &str, args: PluginArgs) -> AppResult<Self> {
        check_with_name(name)?;
        let plugin = self
            .registry
            .get(name)
            .ok_or_else(|| AppError::range(format!("plugin \"{name}\" is not registered")))?;
        self.use_plugin(plugin.as_ref(), args)
    }

    /// Returns a copy registered as skipped.
    pub fn skip(&self) -> Self {
        self.derive(self.wrappers.clone(), Mode::Skip, self.description.clone())
    }

    /// Returns a copy registered as exclusive.
    pub fn only(&self) -> Self {
        self.derive(self.wrappers.clone(), Mode::Only, self.description.clone())
    }

    /// Declares a wrapped test.
    pub fn it<F>(&self, runner: &mut dyn Runner, message: &str, body: F) -> AppResult<()>
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.declare_test(runner, Declaration::It, message, Arc::new(body))
    }

    /// Declares a wrapped test under the `specify` alias.
    pub fn specify<F>(&self, runner: &mut dyn Runner, message: &str, body: F) -> AppResult<()>
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.declare_test(runner, Declaration::Specify, message, Arc::new(body))
    }

    /// Declares a wrapped suite; `body` registers its contents.
    pub fn describe<F>(&self, runner: &mut dyn Runner, message: &str, body: F) -> AppResult<()>
    where
        F: FnOnce(&mut dyn Runner) -> AppResult<()>,
    {
        self.declare_suite(runner, Declaration::Describe, message, body)
    }

    /// Declares a wrapped suite under the `context` alias.
    pub fn context<F>(&self, runner: &mut dyn Runner, message: &str, body: F) -> AppResult<()>
    where
        F: FnOnce(&mut dyn Runner) -> AppResult<()>,
    {
        self.declare_suite(runner, Declaration::Context, message, body)
    }

    fn declare_test(
        &self,
        runner: &mut dyn Runner,
        kind: Declaration,
        message: &str,
        body: HookFn,
    ) -> AppResult<()> {
        create_assertion(runner, kind, message, &self.wrappers, Block::Test(body), self.mode)
    }

    fn declare_suite<F>(
        &self,
        runner: &mut dyn Runner,
        kind: Declaration,
        message: &str,
        body: F,
    ) -> AppResult<()>
    where
        F: FnOnce(&mut dyn Runner) -> AppResult<()>,
    {
        create_assertion(
            runner,
            kind,
            message,
            &self.wrappers,
            Block::Suite(Box::new(body)),
            self.mode,
        )
    }

    /// Rejects the runner's own skip/only shorthand on a wrapped declaration.
    pub fn reject_shorthand(&self, kind: Declaration, mode: Mode) -> AppResult<()> {
        Err(AppError::syntax(format!(
            "use `.{mode}().{kind}()` instead of `.{kind}.{mode}()` on a wrapped declaration"
        )))
    }

    shorthand_guards! {
        it_skip => (It, Skip),
        it_only => (It, Only),
        specify_skip => (Specify, Skip),
        specify_only => (Specify, Only),
        describe_skip => (Describe, Skip),
        describe_only => (Describe, Only),
        context_skip => (Context, Skip),
        context_only => (Context, Only),
    }
}
