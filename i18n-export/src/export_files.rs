//! The `export_files` plugin: renders extra artifacts for every exported
//! translation file.
//!
//! ```yaml
//! export_files:
//!   enabled: true
//!   files:
//!     - template: config/locales.js.tera
//!       output: "%{dir}/%{base_name}-%{digest}.js"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    config::ConfigDocument,
    error::{Error, SchemaError},
    output::GeneratedArtifact,
    planner,
    plugin::Plugin,
    schema::{self, ValueType},
    template::{TeraEngine, TemplateEngine, TemplateRenderer},
};

/// Root key of the plugin's settings.
pub const CONFIG_KEY: &str = "export_files";

const PLUGIN_KEYS: [&str; 2] = ["enabled", "files"];
const ENTRY_KEYS: [&str; 2] = ["template", "output"];

/// One derived artifact to generate per exported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportEntry {
    /// Template file rendered for each exported file.
    pub template: PathBuf,
    /// Output path pattern, see [`crate::output`].
    pub output: String,
}

/// Typed view of the `export_files` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportFilesConfig {
    pub enabled: Option<bool>,
    #[serde(default)]
    pub files: Vec<ExportEntry>,
}

impl ExportFilesConfig {
    /// Validates and reads the plugin namespace. Returns `None` when the
    /// document has no `export_files` key.
    pub fn from_document(config: &ConfigDocument) -> Result<Option<Self>, Error> {
        let Some(value) = config.get(CONFIG_KEY) else {
            return Ok(None);
        };
        validate(config)?;

        let settings = serde_json::from_value(value.clone())
            .map_err(|e| Error::Config(format!("invalid `{}` settings: {}", CONFIG_KEY, e)))?;
        Ok(Some(settings))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}

/// Checks the shape of the `export_files` namespace.
///
/// A document without the key is valid. Otherwise the namespace must define
/// exactly `enabled` and `files`; `enabled` must be a boolean, `files` a
/// non-empty list of mappings with exactly a string `template` and a string
/// `output`.
pub fn validate(config: &ConfigDocument) -> Result<(), SchemaError> {
    let Some(value) = config.get(CONFIG_KEY) else {
        return Ok(());
    };

    let settings = schema::expect_mapping(CONFIG_KEY, Some(value), None)?;
    schema::expect_required_keys(&PLUGIN_KEYS, settings)?;
    schema::reject_extraneous_keys(&PLUGIN_KEYS, settings)?;
    schema::expect_enabled_config(CONFIG_KEY, settings.get("enabled"))?;
    let files = schema::expect_array_with_items("files", settings.get("files"), settings)?;

    for (index, item) in files.iter().enumerate() {
        let entry = schema::expect_mapping(&format!("files[{}]", index), Some(item), Some(settings))?;
        schema::expect_required_keys(&ENTRY_KEYS, entry)?;
        schema::reject_extraneous_keys(&ENTRY_KEYS, entry)?;
        schema::expect_type("template", entry.get("template"), ValueType::String, Some(entry))?;
        schema::expect_type("output", entry.get("output"), ValueType::String, Some(entry))?;
    }

    Ok(())
}

/// Renders every configured entry for every exported file.
#[derive(Debug, Default, Clone)]
pub struct ExportFilesPlugin<E = TeraEngine> {
    renderer: TemplateRenderer<E>,
}

impl ExportFilesPlugin {
    /// A plugin rendering with [`TeraEngine`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: TemplateEngine> ExportFilesPlugin<E> {
    /// A plugin rendering with a custom engine.
    pub fn with_engine(engine: E) -> Self {
        ExportFilesPlugin {
            renderer: TemplateRenderer::new(engine),
        }
    }

    /// Renders and writes `files` × `entries`, in that order. Returns the
    /// written paths, one per task; a path appears twice when two entries
    /// resolve to it, and the later write wins.
    ///
    /// Stops at the first failure. Files written before it are kept.
    pub fn export<P: AsRef<Path>>(
        &self,
        files: &[P],
        entries: &[ExportEntry],
    ) -> Result<Vec<PathBuf>, Error> {
        let tasks = planner::plan(files, entries);
        let mut written = Vec::with_capacity(tasks.len());

        for task in &tasks {
            let contents = self.renderer.render(task)?;
            let artifact = GeneratedArtifact::new(task.file, &task.entry.output, contents)?;
            artifact.write()?;

            tracing::debug!(
                source = %task.file.display(),
                output = %artifact.path.display(),
                digest = %artifact.digest,
                "wrote artifact"
            );
            written.push(artifact.path);
        }

        tracing::info!(
            files = files.len(),
            entries = entries.len(),
            written = written.len(),
            "export_files finished"
        );
        Ok(written)
    }
}

impl<E: TemplateEngine> Plugin for ExportFilesPlugin<E> {
    fn config_key(&self) -> &str {
        CONFIG_KEY
    }

    fn validate_schema(&self, config: &ConfigDocument) -> Result<(), Error> {
        Ok(validate(config)?)
    }

    fn after_export(&self, files: &[PathBuf], config: &ConfigDocument) -> Result<(), Error> {
        let enabled = config
            .dig(&[CONFIG_KEY, "enabled"])
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        if !enabled {
            tracing::debug!("export_files disabled, skipping");
            return Ok(());
        }

        let Some(settings) = ExportFilesConfig::from_document(config)? else {
            return Ok(());
        };
        self.export(files, &settings.files)?;
        Ok(())
    }
}
