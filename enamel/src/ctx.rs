//! Invocation context.
//!
//! [`AppContext`] ties the working directory, the optional project file and
//! the command line together and resolves them into [`GenerateOptions`].
//! Precedence is command line, then project file, then built-in defaults.

use std::path::{Path, PathBuf};

use crate::{
    config::{PROJECT_FILE, ProjectConfig},
    error::Result,
    generate::{DEFAULT_CONFIG, DEFAULT_FILENAME, DEFAULT_FOLDER, GenerateOptions},
    utils::{replace_env_placeholders, replace_workspace_folder},
};

/// Path configuration grouping all path-related fields.
#[derive(Debug, Default, Clone)]
pub struct PathConfig {
    /// Workspace root directory. Command line paths are relative to it.
    pub workspace: PathBuf,
    /// Loaded project file, if any.
    pub project_file: Option<PathBuf>,
}

impl PathConfig {
    /// Directory that project file paths are relative to.
    pub fn project_dir(&self) -> &Path {
        self.project_file
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.workspace)
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Default, Clone)]
pub struct OptionOverrides {
    pub appinfo: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub folder: Option<PathBuf>,
    pub filename: Option<String>,
}

/// State shared by one generator invocation.
#[derive(Debug, Default, Clone)]
pub struct AppContext {
    pub paths: PathConfig,
    pub project: Option<ProjectConfig>,
}

impl AppContext {
    /// Context rooted at `workspace`, without a project file.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathConfig {
                workspace: workspace.into(),
                project_file: None,
            },
            project: None,
        }
    }

    /// Load the project file.
    ///
    /// An explicit path must exist. Without one, `.enamel.toml` in the
    /// workspace is used when present.
    pub fn load_project(&mut self, path: Option<PathBuf>) -> Result<()> {
        let path = match path {
            Some(path) => self.resolve_cli_path(&path),
            None => {
                let default = self.paths.workspace.join(PROJECT_FILE);
                if !default.is_file() {
                    debug!("no {PROJECT_FILE} in {}", self.paths.workspace.display());
                    return Ok(());
                }
                default
            }
        };

        info!("using project file {}", path.display());
        self.project = Some(ProjectConfig::load(&path)?);
        self.paths.project_file = Some(path);
        Ok(())
    }

    /// Replaces `${workspaceFolder}` with the workspace directory.
    pub fn value_replace_with_var(&self, value: &str) -> String {
        replace_workspace_folder(value, &self.paths.workspace)
    }

    /// Merge command line values, project file values and defaults.
    pub fn generate_options(&self, overrides: &OptionOverrides) -> GenerateOptions {
        let project = self.project.clone().unwrap_or_default();

        let appinfo = match &overrides.appinfo {
            Some(path) => Some(self.resolve_cli_path(path)),
            None => project.appinfo.as_deref().map(|raw| self.resolve_project_path(raw)),
        };
        let config = match &overrides.config {
            Some(path) => self.resolve_cli_path(path),
            None => project
                .config
                .as_deref()
                .map(|raw| self.resolve_project_path(raw))
                .unwrap_or_else(|| self.paths.workspace.join(DEFAULT_CONFIG)),
        };
        let folder = match &overrides.folder {
            Some(path) => self.resolve_cli_path(path),
            None => project
                .folder
                .as_deref()
                .map(|raw| self.resolve_project_path(raw))
                .unwrap_or_else(|| self.paths.workspace.join(DEFAULT_FOLDER)),
        };
        let filename = overrides
            .filename
            .clone()
            .or_else(|| project.filename.as_deref().map(|raw| self.expand(raw)))
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        GenerateOptions {
            appinfo,
            config,
            folder,
            filename,
        }
    }

    fn expand(&self, raw: &str) -> String {
        self.value_replace_with_var(&replace_env_placeholders(raw))
    }

    fn resolve_cli_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.workspace.join(path)
        }
    }

    fn resolve_project_path(&self, raw: &str) -> PathBuf {
        let path = PathBuf::from(self.expand(raw));
        if path.is_absolute() {
            path
        } else {
            self.paths.project_dir().join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let ctx = AppContext::new("/work");
        let options = ctx.generate_options(&OptionOverrides::default());

        assert_eq!(options.appinfo, None);
        assert_eq!(options.config, Path::new("/work/src/js/config.json"));
        assert_eq!(options.folder, Path::new("/work/src/generated"));
        assert_eq!(options.filename, "enamel");
    }

    #[test]
    fn test_project_file_relative_to_its_dir() {
        let mut ctx = AppContext::new("/work");
        ctx.paths.project_file = Some(PathBuf::from("/work/app/.enamel.toml"));
        ctx.project = Some(ProjectConfig {
            appinfo: Some("package.json".to_string()),
            config: Some("${workspaceFolder}/shared/config.js".to_string()),
            folder: Some("/abs/generated".to_string()),
            filename: Some("settings".to_string()),
        });

        let options = ctx.generate_options(&OptionOverrides::default());
        assert_eq!(options.appinfo.as_deref(), Some(Path::new("/work/app/package.json")));
        assert_eq!(options.config, Path::new("/work/shared/config.js"));
        assert_eq!(options.folder, Path::new("/abs/generated"));
        assert_eq!(options.filename, "settings");
    }

    #[test]
    fn test_command_line_wins() {
        let mut ctx = AppContext::new("/work");
        ctx.project = Some(ProjectConfig {
            config: Some("from_file.json".to_string()),
            filename: Some("from_file".to_string()),
            ..Default::default()
        });

        let options = ctx.generate_options(&OptionOverrides {
            config: Some(PathBuf::from("cli.js")),
            filename: Some("cli".to_string()),
            ..Default::default()
        });
        assert_eq!(options.config, Path::new("/work/cli.js"));
        assert_eq!(options.filename, "cli");
    }

    #[test]
    fn test_load_project_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "folder = \"out\"\n").unwrap();

        let mut ctx = AppContext::new(dir.path());
        ctx.load_project(None).unwrap();

        let options = ctx.generate_options(&OptionOverrides::default());
        assert_eq!(options.folder, dir.path().join("out"));
    }

    #[test]
    fn test_missing_default_project_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = AppContext::new(dir.path());
        ctx.load_project(None).unwrap();
        assert!(ctx.project.is_none());
    }

    #[test]
    fn test_missing_explicit_project_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = AppContext::new(dir.path());
        assert!(ctx.load_project(Some(PathBuf::from("missing.toml"))).is_err());
    }
}
