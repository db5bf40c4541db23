//! # clay-schema
//!
//! Data model, loader and derivation filters for Clay settings schemas.
//!
//! A Clay configuration is an ordered list of setting descriptors (selects,
//! toggles, sliders, ...) that may be grouped into nested sections. This crate
//! turns such a document into a typed tree and provides the pure functions a
//! code generator needs to emit C accessors for every setting.
//!
//! ## Features
//!
//! - Strict JSON and `module.exports = [...]` JavaScript schema sources
//! - Lossless load/serialize round trip (unknown keys are preserved)
//! - Capability guards for platform specific settings
//! - Stable, process independent setting hashes (FNV-1a 32)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clay_schema::{data::load_schema, filters};
//!
//! let schema = load_schema("src/pkjs/config.js").unwrap();
//! println!("{} settings", filters::settings_count(&schema));
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Schema tree, app metadata and document loader
//! - [`filters`] - Derivation functions over descriptors
//! - [`error`] - Error type shared by the crate

#[macro_use]
extern crate log;

/// Schema tree, app metadata and document loading.
pub mod data;

/// Error type shared by the crate.
pub mod error;

/// Pure derivation functions consumed by code generators.
pub mod filters;

pub use data::{AppInfo, Node, Section, SelectOption, Setting, SettingKind};
pub use error::{Result, SchemaError};
pub use serde_json::Value;
