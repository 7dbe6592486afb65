//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`defaults`]: serde default value functions
//! - [`validation`]: Startup checks that collect every problem at once

mod defaults;
mod types;
mod validation;

pub use types::{AliasConfig, Config};
pub use validation::validate;
