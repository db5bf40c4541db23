//! # enamel
//!
//! Generates typed C accessors for the settings of a Pebble watch app from
//! its Clay configuration.
//!
//! `enamel` reads the Clay schema (strict JSON or a `module.exports = [...]`
//! JavaScript module) and optional app metadata, and writes a header and a
//! source file with one getter per setting, persistence of received values
//! and a subscription API for settings updates.
//!
//! ## Features
//!
//! - **Typed getters**: `bool`, `GColor`, `int32_t`, strings and enums
//! - **Capability guards**: platform specific settings behind `#if`
//! - **Stable persistence**: storage keys derived from message keys
//! - **Atomic output**: previous files survive a failed run
//! - **Project file**: `.enamel.toml` with placeholder expansion
//!
//! ## Modules
//!
//! - [`config`] - Project file format
//! - [`ctx`] - Invocation context and option resolution
//! - [`generate`] - Library and build-step entry points
//! - [`output`] - Atomic output writing
//! - [`render`] - Embedded templates and helpers
//! - [`utils`] - Placeholder expansion
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let files = enamel::build_step(
//!     Path::new("src/pkjs/config.js"),
//!     Path::new("build/generated"),
//! )?;
//! println!("{}", files.header.display());
//! # Ok::<(), enamel::GenerateError>(())
//! ```

#[macro_use]
extern crate log;

/// Project file format.
pub mod config;

/// Invocation context and option resolution.
pub mod ctx;

/// Errors raised by the generator.
pub mod error;

/// Library and build-step entry points.
pub mod generate;

/// Atomic output writing.
pub mod output;

/// Embedded templates and helpers.
pub mod render;

/// Placeholder expansion.
pub mod utils;

pub use error::{GenerateError, Result};
pub use generate::{GenerateOptions, build_step, generate, generate_with};
pub use output::GeneratedFiles;
pub use render::{Rendered, TemplateRenderer};
