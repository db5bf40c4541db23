use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde_json::Value;

use crate::{
    data::{AppInfo, Node},
    error::{Result, SchemaError},
};

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("line comment pattern"));

static MODULE_EXPORTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)module\.exports\s*=\s*(.*);").expect("module.exports pattern")
});

/// Source format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Strict JSON array of descriptors.
    Json,
    /// JavaScript module assigning the array to `module.exports`.
    JavaScript,
}

impl SchemaFormat {
    /// Pick the format from the file extension: `.json` is strict JSON,
    /// anything else is treated as JavaScript.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SchemaFormat::Json,
            _ => SchemaFormat::JavaScript,
        }
    }
}

/// Load a schema from disk, detecting its format from the extension.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Vec<Node>> {
    let path = path.as_ref();
    let content = read(path)?;
    let format = SchemaFormat::from_path(path);
    debug!("loading {format:?} schema from {}", path.display());
    parse_schema(&content, format, path)
}

/// Parse schema text that is already in memory.
///
/// `origin` only names the source in error messages.
pub fn parse_schema(content: &str, format: SchemaFormat, origin: &Path) -> Result<Vec<Node>> {
    match format {
        SchemaFormat::Json => parse_json_schema(content),
        SchemaFormat::JavaScript => match extract_exports(content) {
            Some(array) => parse_json_schema(&array),
            None => Err(SchemaError::MissingExports {
                path: origin.to_path_buf(),
            }),
        },
    }
}

/// Load application metadata from a JSON document.
pub fn load_app_info(path: impl AsRef<Path>) -> Result<AppInfo> {
    let path = path.as_ref();
    let content = read(path)?;
    let value: Value = serde_json::from_str(&content)?;
    AppInfo::try_from(value)
}

/// Remove `/* ... */` then `// ...` comments by plain text substitution.
///
/// This is not a JavaScript lexer: a `//` inside a string literal (such as
/// a URL) is stripped as well.
pub fn strip_comments(source: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(source, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Strip comments and return the text assigned to `module.exports`.
///
/// The capture is greedy and ends at the last `;` of the source.
pub fn extract_exports(source: &str) -> Option<String> {
    let stripped = strip_comments(source);
    MODULE_EXPORTS
        .captures(&stripped)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn parse_json_schema(content: &str) -> Result<Vec<Node>> {
    let nodes: Vec<Node> = serde_json::from_str(content)?;
    trace!("parsed {} top level entries", nodes.len());
    Ok(nodes)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JSON_SCHEMA: &str = r#"[
        { "type": "heading", "defaultValue": "Settings" },
        { "type": "toggle", "messageKey": "enable_background", "defaultValue": true },
        { "type": "section", "items": [
            { "type": "color", "messageKey": "background", "defaultValue": "FF0000" }
        ]}
    ]"#;

    const JS_SCHEMA: &str = r#"/*
 * Clay configuration
 * module.exports = "not this one";
 */
// heading first
module.exports = [
    { "type": "heading", "defaultValue": "Settings" }, // inline
    /* toggle */ { "type": "toggle", "messageKey": "enable_background", "defaultValue": true },
    { "type": "section", "items": [
        // nested color
        { "type": "color", "messageKey": "background", "defaultValue": "FF0000" }
    ]}
];
"#;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SchemaFormat::from_path(Path::new("src/js/config.json")),
            SchemaFormat::Json
        );
        assert_eq!(
            SchemaFormat::from_path(Path::new("src/pkjs/config.js")),
            SchemaFormat::JavaScript
        );
        assert_eq!(
            SchemaFormat::from_path(Path::new("config")),
            SchemaFormat::JavaScript
        );
    }

    #[test]
    fn test_js_matches_json() {
        let from_json = parse_schema(JSON_SCHEMA, SchemaFormat::Json, Path::new("a.json")).unwrap();
        let from_js = parse_schema(JS_SCHEMA, SchemaFormat::JavaScript, Path::new("a.js")).unwrap();
        assert_eq!(from_js, from_json);
        assert_eq!(from_js.len(), 3);
    }

    #[test]
    fn test_strip_comments_order() {
        // block comments go first, so a `//` inside one cannot eat the closing marker
        let stripped = strip_comments("a /* // */ b // c\nd");
        assert_eq!(stripped, "a  b \nd");
    }

    #[test]
    fn test_url_in_string_is_stripped() {
        let stripped = strip_comments(r#"{ "url": "http://example.com" }"#);
        assert_eq!(stripped, r#"{ "url": "http:"#);
    }

    #[test]
    fn test_missing_exports() {
        let err = parse_schema("var config = [];", SchemaFormat::JavaScript, Path::new("x.js"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::MissingExports { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_schema("[{]", SchemaFormat::Json, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
        file.write_all(JS_SCHEMA.as_bytes()).unwrap();

        let nodes = load_schema(file.path()).unwrap();
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let err = load_schema("does/not/exist.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }

    #[test]
    fn test_load_app_info() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{ "shortName": "demo", "versionLabel": "1.0" }"#)
            .unwrap();

        let info = load_app_info(file.path()).unwrap();
        assert_eq!(info.name(), Some("demo"));
    }
}
