//! C source rendering.
//!
//! Templates are embedded into the binary at compile time via [`include_str!`]
//! in the [`embedded`] module, then rendered with
//! [Handlebars](https://handlebarsjs.com/) by [`TemplateRenderer`].
//!
//! ## Template data
//!
//! - `{{config}}`: the schema, as loaded
//! - `{{appinfo}}`: app metadata, or null
//! - `{{app_name}}`, `{{app_version}}`: resolved from the metadata when present
//! - `{{filename}}`: base name of the generated files
//! - `{{hash_algorithm}}`: hash behind the persist keys
//!
//! The derivation filters are available as helpers, see [`helpers`].

use clay_schema::{AppInfo, Node, filters};
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{GenerateError, Result};

pub mod embedded;
pub mod helpers;

/// The two generated texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub header: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
struct TemplateData<'a> {
    config: &'a [Node],
    appinfo: Option<&'a AppInfo>,
    app_name: Option<&'a str>,
    app_version: Option<&'a str>,
    filename: &'a str,
    generator_version: &'static str,
    hash_algorithm: &'static str,
}

/// Renders a schema into a header and a source file.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compile the embedded templates and register the helpers.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut registry);

        for &(name, partial) in embedded::PARTIALS {
            registry
                .register_partial(name, partial)
                .map_err(|source| GenerateError::Template {
                    name,
                    source: Box::new(source),
                })?;
        }
        for &(name, template) in embedded::TEMPLATES {
            registry
                .register_template_string(name, template)
                .map_err(|source| GenerateError::Template {
                    name,
                    source: Box::new(source),
                })?;
        }

        Ok(Self { registry })
    }

    /// Validate `schema` and render both outputs.
    ///
    /// Nothing is rendered when the schema has a setting that cannot be
    /// expressed in C, so errors always point at the schema.
    pub fn render(
        &self,
        schema: &[Node],
        app_info: Option<&AppInfo>,
        filename: &str,
    ) -> Result<Rendered> {
        filters::validate(schema)?;

        let data = TemplateData {
            config: schema,
            appinfo: app_info,
            app_name: app_info.and_then(AppInfo::name),
            app_version: app_info.and_then(AppInfo::version),
            filename,
            generator_version: env!("CARGO_PKG_VERSION"),
            hash_algorithm: filters::HASH_ALGORITHM,
        };

        Ok(Rendered {
            header: self.render_template(embedded::HEADER_NAME, &data)?,
            source: self.render_template(embedded::SOURCE_NAME, &data)?,
        })
    }

    fn render_template(&self, name: &'static str, data: &TemplateData<'_>) -> Result<String> {
        debug!("rendering {name}");
        self.registry
            .render(name, data)
            .map_err(|source| GenerateError::Render {
                name,
                source: Box::new(source),
            })
    }
}
