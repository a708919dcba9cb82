//! Template rendering for export entries.
//!
//! A [`TemplateEngine`] turns template source plus a [`RenderContext`] into
//! text. [`TeraEngine`] is the default engine; templates see `file`,
//! `translations`, `template` and the `banner()` helper.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;
use tera::{Context, Tera};

use crate::{error::Error, planner::RenderTask};

/// Comment prefix used by [`banner`] when the template doesn't pass one.
pub const DEFAULT_BANNER_COMMENT: &str = "// ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Variables visible to one template rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Path of the translation file being rendered.
    pub file: PathBuf,
    /// Parsed contents of `file`.
    pub translations: Value,
    /// Path of the template being rendered.
    pub template: PathBuf,
}

impl RenderContext {
    /// Builds a context for `file` by reading and parsing it as JSON.
    ///
    /// The file is read again on every call.
    pub fn load(file: &Path, template: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(file).map_err(|source| Error::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let translations = serde_json::from_str(&contents).map_err(|source| Error::Parse {
            path: file.to_path_buf(),
            source,
        })?;

        Ok(RenderContext {
            file: file.to_path_buf(),
            translations,
            template: template.to_path_buf(),
        })
    }
}

/// Renders template source against a context.
pub trait TemplateEngine {
    /// Renders `source` with the variables of `context`. Failures are
    /// reported as [`Error::Template`].
    fn render(&self, source: &str, context: &RenderContext) -> Result<String, Error>;

    /// Reads the template named by `context.template` and renders it.
    fn render_file(&self, context: &RenderContext) -> Result<String, Error> {
        let source = std::fs::read_to_string(&context.template).map_err(|e| {
            Error::template_error(
                context.template.display().to_string(),
                format!("cannot read template: {}", e),
            )
        })?;
        self.render(&source, context)
    }
}

/// Renders planned tasks with an injected engine.
#[derive(Debug, Default, Clone)]
pub struct TemplateRenderer<E = TeraEngine> {
    engine: E,
}

impl<E: TemplateEngine> TemplateRenderer<E> {
    pub fn new(engine: E) -> Self {
        TemplateRenderer { engine }
    }

    /// Loads the task's translation file, then renders its template.
    pub fn render(&self, task: &RenderTask<'_>) -> Result<String, Error> {
        let context = RenderContext::load(task.file, &task.entry.template)?;
        tracing::debug!(
            file = %context.file.display(),
            template = %context.template.display(),
            "rendering template"
        );
        self.engine.render_file(&context)
    }
}

/// Returns the generated-file banner line.
///
/// ```rust
/// use i18n_export::template::banner;
///
/// assert_eq!(banner("# ", false), "# File generated by i18n-export");
/// ```
pub fn banner(comment: &str, include_time: bool) -> String {
    let mut line = format!("{}File generated by {}", comment, env!("CARGO_PKG_NAME"));
    if include_time {
        line.push_str(&format!(" on {}", Local::now().format(TIMESTAMP_FORMAT)));
    }
    line
}

/// `banner(comment="// ", include_time=true)` as a Tera function.
fn banner_function(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let comment = match args.get("comment") {
        None => DEFAULT_BANNER_COMMENT,
        Some(Value::String(comment)) => comment.as_str(),
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "banner: `comment` must be a string, got {}",
                other
            )));
        }
    };
    let include_time = match args.get("include_time") {
        None => true,
        Some(Value::Bool(include_time)) => *include_time,
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "banner: `include_time` must be a boolean, got {}",
                other
            )));
        }
    };

    Ok(Value::String(banner(comment, include_time)))
}

/// Tera-backed engine. Autoescaping is off: templates usually emit JSON or
/// JavaScript, not HTML.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraEngine;

impl TeraEngine {
    pub fn new() -> Self {
        TeraEngine
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, source: &str, context: &RenderContext) -> Result<String, Error> {
        let name = context.template.display().to_string();
        let to_error = |e: tera::Error| Error::template_error(name.clone(), describe(&e));

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_function("banner", banner_function);
        tera.add_raw_template(&name, source).map_err(to_error)?;

        let mut bindings = Context::new();
        bindings.insert("file", &context.file.display().to_string());
        bindings.insert("translations", &context.translations);
        bindings.insert("template", &name);

        tera.render(&name, &bindings).map_err(to_error)
    }
}

/// Flattens a Tera error and its causes into one line.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
