//! Placeholder expansion for values read from the project file.

use std::{
    env,
    path::Path,
    sync::LazyLock,
};

use regex::{Captures, Regex};

/// Placeholder replaced with the workspace directory.
pub const WORKSPACE_FOLDER: &str = "${workspaceFolder}";

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{env:([^{}]*)\}").expect("env placeholder pattern"));

/// Replaces environment variable placeholders in a string.
///
/// Placeholders use the format `${env:VAR_NAME}`. An unset variable is
/// replaced with an empty string. Anything else that looks like a
/// placeholder is left alone.
///
/// # Example
///
/// ```rust
/// use enamel::utils::replace_env_placeholders;
///
/// unsafe { std::env::set_var("ENAMEL_DOC_VAR", "hello"); }
/// assert_eq!(replace_env_placeholders("Value: ${env:ENAMEL_DOC_VAR}"), "Value: hello");
/// ```
pub fn replace_env_placeholders(input: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(input, |caps: &Captures| {
            let name = &caps[1];
            match env::var(name) {
                Ok(value) => {
                    debug!("using {name}={value}");
                    value
                }
                Err(_) => {
                    warn!("environment variable `{name}` is not set, using an empty value");
                    String::new()
                }
            }
        })
        .into_owned()
}

/// Replaces `${workspaceFolder}` with the workspace directory.
pub fn replace_workspace_folder(input: &str, workspace: &Path) -> String {
    input.replace(WORKSPACE_FOLDER, &workspace.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_env_placeholders() {
        unsafe {
            env::set_var("ENAMEL_TEST_HOME", "/home/test");
            env::set_var("ENAMEL_TEST_PATH", "/usr/local/bin");
        }

        assert_eq!(replace_env_placeholders("${env:ENAMEL_TEST_HOME}"), "/home/test");
        assert_eq!(
            replace_env_placeholders("${env:ENAMEL_TEST_HOME}:${env:ENAMEL_TEST_PATH}"),
            "/home/test:/usr/local/bin"
        );
        assert_eq!(
            replace_env_placeholders("Path: ${env:ENAMEL_TEST_HOME}/bin"),
            "Path: /home/test/bin"
        );
        assert_eq!(replace_env_placeholders("${env:ENAMEL_NON_EXISTENT}"), "");
        assert_eq!(replace_env_placeholders("Just a normal string"), "Just a normal string");
        assert_eq!(replace_env_placeholders(""), "");
    }

    #[test]
    fn test_other_placeholders_kept() {
        assert_eq!(
            replace_env_placeholders("${not_env:placeholder}"),
            "${not_env:placeholder}"
        );
        assert_eq!(replace_env_placeholders(WORKSPACE_FOLDER), WORKSPACE_FOLDER);
    }

    #[test]
    fn test_malformed_placeholders() {
        unsafe {
            env::set_var("ENAMEL_TEST_VAR", "value");
        }

        assert_eq!(replace_env_placeholders("${env:ENAMEL_TEST_VAR"), "${env:ENAMEL_TEST_VAR");
        assert_eq!(replace_env_placeholders("${env}"), "${env}");
        assert_eq!(replace_env_placeholders("${env:ENAMEL_TEST_VAR}}"), "value}");
        assert_eq!(replace_env_placeholders("$env:ENAMEL_TEST_VAR}"), "$env:ENAMEL_TEST_VAR}");
        assert_eq!(replace_env_placeholders("$$"), "$$");
    }

    #[test]
    fn test_replace_workspace_folder() {
        assert_eq!(
            replace_workspace_folder("${workspaceFolder}/src/pkjs/config.js", Path::new("/work")),
            "/work/src/pkjs/config.js"
        );
        assert_eq!(replace_workspace_folder("relative", Path::new("/work")), "relative");
    }
}
