//! Schema data structures and document loading.
//!
//! This module provides the typed representation of a Clay configuration:
//!
//! - Conversion from JSON values to a [`Node`] tree
//! - Application metadata passthrough ([`AppInfo`])
//! - Loading from strict JSON or JavaScript module sources
//!
//! ## Architecture
//!
//! - [`node`] - Setting descriptors and sections
//! - [`app_info`] - Application metadata mapping
//! - [`loader`] - File format detection, comment stripping and parsing

/// Application metadata passed through to templates.
pub mod app_info;

/// Schema document loading.
pub mod loader;

/// Setting descriptors and sections.
pub mod node;

pub use app_info::AppInfo;
pub use loader::{SchemaFormat, load_app_info, load_schema, parse_schema};
pub use node::{Node, Section, SelectOption, Setting, SettingKind};
