#![forbid(unsafe_code)]
//! Post-export artifact generation for translation files.
//!
//! After a host tool writes its translation JSON files, the `export_files`
//! plugin renders one or more templates per file (for example a JavaScript
//! module wrapping the translations) and writes each result to a path built
//! from the source file's name and the digest of the rendered text.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use i18n_export::{ConfigDocument, ExportFilesPlugin, PluginRegistry};
//!
//! let config = ConfigDocument::read_from("config/i18n.yml")?;
//!
//! let mut registry = PluginRegistry::new().with_host_keys(["translations"]);
//! registry.register(ExportFilesPlugin::new())?;
//!
//! registry.validate_schema(&config)?;
//! registry.after_export(&[PathBuf::from("app/locales/en.json")], &config)?;
//! # Ok::<(), i18n_export::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`schema`]: reusable checks for configuration documents
//! - [`plugin`]: the plugin hooks and the registry dispatching them
//! - [`planner`]: files × entries expansion
//! - [`template`]: the template engine seam and the Tera implementation
//! - [`output`]: output path patterns, digests and writing

pub mod config;
pub mod error;
pub mod export_files;
pub mod output;
pub mod planner;
pub mod plugin;
pub mod schema;
pub mod template;

// Re-export most used types for easy consumption
pub use crate::{
    config::ConfigDocument,
    error::{Error, SchemaError},
    export_files::{CONFIG_KEY, ExportEntry, ExportFilesConfig, ExportFilesPlugin},
    output::{FileMetadata, GeneratedArtifact},
    planner::{RenderTask, plan},
    plugin::{Plugin, PluginRegistry},
    template::{RenderContext, TemplateEngine, TemplateRenderer, TeraEngine, banner},
};
