//! # suitewrap-core
//!
//! Core crate for suitewrap. Contains the unified error system, the
//! result alias, and the configuration schema shared by the engine, the
//! built-in plugins, and the demo binary.
//!
//! This crate has **no** internal dependencies on other suitewrap crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
