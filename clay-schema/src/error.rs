use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = SchemaError> = std::result::Result<T, E>;

/// Errors raised while loading a schema or deriving values from it.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document (or the extracted `module.exports` array) is not valid JSON.
    #[error("malformed schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// A JavaScript schema without a `module.exports = [...];` statement.
    #[error("no `module.exports = ...;` assignment found in {path}")]
    MissingExports { path: PathBuf },

    /// A setting has none of `id`, `messageKey` or `appKey`.
    #[error("`{kind}` setting has no `id`, `messageKey` or `appKey`")]
    MissingIdentifier { kind: String },

    /// A capability tag outside the known table.
    #[error("unknown capability `{0}`")]
    UnknownCapability(String),

    /// A `defaultValue` that cannot be expressed for the setting type.
    #[error("invalid default for `{key}`: expected {expected}, got {actual}")]
    InvalidDefault {
        key: String,
        expected: &'static str,
        actual: String,
    },

    /// A checkboxgroup without any option to check.
    #[error("checkboxgroup `{key}` has no options")]
    MissingOptions { key: String },

    /// A document whose top level has the wrong JSON shape.
    #[error("{what} must be a JSON object")]
    NotAnObject { what: &'static str },
}
