//! All error types for the i18n-export crate.
//!
//! Schema violations are reported through [`SchemaError`] and wrapped in
//! [`Error::Schema`]; everything else raised while planning, rendering or
//! writing artifacts is a variant of [`Error`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Schema(#[from] SchemaError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("plugin already registered for config key `{0}`")]
    DuplicateConfigKey(String),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("template error in {template}: {message}")]
    Template { template: String, message: String },

    #[error("invalid output pattern `{pattern}`: {message}")]
    OutputPattern { pattern: String, message: String },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new template error.
    pub fn template_error(template: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Template {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Creates a new output pattern error.
    pub fn pattern_error(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::OutputPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// A configuration document failed validation.
///
/// The `node` field carries the offending mapping rendered as pretty JSON, when
/// one is available, so the host can print it next to the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Expected {key:?} to be defined{}", render_node(.node))]
    MissingKey { key: String, node: Option<String> },

    #[error("Unexpected key: {key:?}{}", render_node(.node))]
    UnknownKey { key: String, node: Option<String> },

    #[error("Expected {key:?} to be {expected}; got {actual} instead{}", render_node(.node))]
    WrongType {
        key: String,
        expected: String,
        actual: String,
        node: Option<String>,
    },

    #[error("Expected {key:?} to have at least one item{}", render_node(.node))]
    EmptyArray { key: String, node: Option<String> },
}

impl SchemaError {
    /// The configuration key the violation is about.
    pub fn key(&self) -> &str {
        match self {
            SchemaError::MissingKey { key, .. }
            | SchemaError::UnknownKey { key, .. }
            | SchemaError::WrongType { key, .. }
            | SchemaError::EmptyArray { key, .. } => key,
        }
    }
}

fn render_node(node: &Option<String>) -> String {
    match node {
        Some(json) => format!("\n\n{}", json),
        None => String::new(),
    }
}
