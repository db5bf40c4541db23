use std::path::PathBuf;

use clay_schema::SchemaError;
use thiserror::Error;

/// Result alias used by the generator.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Errors raised while generating the accessor sources.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The schema or app metadata could not be loaded or is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An embedded template does not compile.
    #[error("embedded template `{name}` is invalid: {source}")]
    Template {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template failed while rendering.
    #[error("failed to render `{name}`: {source}")]
    Render {
        name: &'static str,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project file is not valid TOML or has unknown keys.
    #[error("invalid project file {path}: {source}")]
    ProjectConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl GenerateError {
    /// Whether the error comes from the templates shipped with the binary
    /// rather than from user input.
    pub fn is_template(&self) -> bool {
        matches!(self, GenerateError::Template { .. })
    }
}
