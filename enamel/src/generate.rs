//! Generator entry points.

use std::path::{Path, PathBuf};

use clay_schema::data::{load_app_info, load_schema};

use crate::{
    error::Result,
    output::{self, GeneratedFiles},
    render::TemplateRenderer,
};

/// Base name used when none is given.
pub const DEFAULT_FILENAME: &str = "enamel";
/// Schema location, relative to the workspace.
pub const DEFAULT_CONFIG: &str = "src/js/config.json";
/// Output directory, relative to the workspace.
pub const DEFAULT_FOLDER: &str = "src/generated";

/// Inputs and outputs of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// App metadata document, optional.
    pub appinfo: Option<PathBuf>,
    /// Clay configuration, JSON or JavaScript.
    pub config: PathBuf,
    /// Output directory, created when missing.
    pub folder: PathBuf,
    /// Base name of the generated `.h` and `.c` files.
    pub filename: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            appinfo: None,
            config: PathBuf::from(DEFAULT_CONFIG),
            folder: PathBuf::from(DEFAULT_FOLDER),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

/// Load, validate, render and write in one pass.
pub fn generate(options: &GenerateOptions) -> Result<GeneratedFiles> {
    generate_with(&TemplateRenderer::new()?, options)
}

/// [`generate`] with an already compiled renderer.
pub fn generate_with(renderer: &TemplateRenderer, options: &GenerateOptions) -> Result<GeneratedFiles> {
    let schema = load_schema(&options.config)?;
    let app_info = match &options.appinfo {
        Some(path) => Some(load_app_info(path)?),
        None => None,
    };
    info!(
        "generating {} accessors from {}",
        clay_schema::filters::settings_count(&schema),
        options.config.display()
    );

    let rendered = renderer.render(&schema, app_info.as_ref(), &options.filename)?;
    output::write_outputs(&options.folder, &options.filename, &rendered)
}

/// Entry point for build pipelines.
///
/// Takes the resolved schema path and output directory and writes
/// `enamel.h` and `enamel.c` without app metadata.
pub fn build_step(input: &Path, output_dir: &Path) -> Result<GeneratedFiles> {
    generate(&GenerateOptions {
        appinfo: None,
        config: input.to_path_buf(),
        folder: output_dir.to_path_buf(),
        filename: DEFAULT_FILENAME.to_string(),
    })
}
