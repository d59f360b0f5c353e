//! Runner registration API.
//!
//! The engine never executes tests. It calls a [`Runner`] exactly as a suite
//! author would: declaring suites and tests and attaching hooks to the
//! suite currently being declared.

pub mod memory;
pub mod report;

use std::fmt;

use serde::{Deserialize, Serialize};

use suitewrap_core::AppResult;

use crate::hooks::{HookFn, HookSlot};
use crate::wrapper::Mode;

pub use memory::{MemoryRunner, RunOptions};
pub use report::{HookFailure, RunReport, TestOutcome, TestStatus};

/// Declaration kinds a suite author can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Declaration {
    /// A test.
    It,
    /// A test, `it` alias.
    Specify,
    /// A suite.
    Describe,
    /// A suite, `describe` alias.
    Context,
}

impl Declaration {
    /// Returns the runner-facing name of this declaration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Specify => "specify",
            Self::Describe => "describe",
            Self::Context => "context",
        }
    }

    /// Returns whether this declaration groups other declarations.
    pub fn is_suite(&self) -> bool {
        matches!(self, Self::Describe | Self::Context)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registers the contents of a suite; invoked while the suite is open.
pub type SuiteBody<'a> = Box<dyn FnOnce(&mut dyn Runner) -> AppResult<()> + 'a>;

/// The body attached to a declaration.
pub enum Block<'a> {
    /// A test body, run later by the runner.
    Test(HookFn),
    /// A suite body, run immediately to collect nested declarations.
    Suite(SuiteBody<'a>),
}

impl fmt::Debug for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test(_) => f.write_str("Test(<fn>)"),
            Self::Suite(_) => f.write_str("Suite(<fn>)"),
        }
    }
}

/// Registration primitives of a describe/it style test runner.
pub trait Runner {
    /// Declares a suite or test in the suite currently open.
    ///
    /// For suites, the body is called before this returns, with the new
    /// suite open.
    fn declare(
        &mut self,
        kind: Declaration,
        mode: Mode,
        label: &str,
        block: Block<'_>,
    ) -> AppResult<()>;

    /// Attaches a hook to the suite currently open.
    fn hook(&mut self, slot: HookSlot, action: HookFn) -> AppResult<()>;
}
