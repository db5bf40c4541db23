//! Project configuration.
//!
//! A project may keep its generator settings in a `.enamel.toml` file next
//! to its sources instead of repeating them on every invocation.
//!
//! # Configuration File Format
//!
//! ```toml
//! appinfo = "package.json"
//! config = "src/pkjs/config.js"
//! folder = "src/generated"
//! filename = "enamel"
//! ```
//!
//! Values may contain `${env:VAR}` and `${workspaceFolder}` placeholders.
//! Relative paths are resolved against the directory holding the file.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};

/// Default project file name, looked up in the workspace directory.
pub const PROJECT_FILE: &str = ".enamel.toml";

/// Contents of a project file. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// App metadata document (`appinfo.json` or `package.json`).
    pub appinfo: Option<String>,
    /// Clay configuration, JSON or JavaScript.
    pub config: Option<String>,
    /// Output directory for the generated sources.
    pub folder: Option<String>,
    /// Base name of the generated `.h` and `.c` files.
    pub filename: Option<String>,
}

impl ProjectConfig {
    /// Read and parse a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse project file text. `path` only names the file in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| GenerateError::ProjectConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}
