//! Output path resolution and artifact writing.
//!
//! Output patterns use `%{name}` placeholders:
//!
//! | placeholder    | value for `out/en.json` |
//! |----------------|-------------------------|
//! | `%{dir}`       | `out`                   |
//! | `%{name}`      | `en.json`               |
//! | `%{extension}` | `.json`                 |
//! | `%{base_name}` | `en`                    |
//! | `%{digest}`    | MD5 of the rendered text, lowercase hex |
//!
//! `%%` produces a literal `%`.

use std::path::{Path, PathBuf};

use md5::{Digest, Md5};

use crate::error::Error;

/// Path components of a source file, as seen by output patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub dir: String,
    pub name: String,
    pub extension: String,
    pub base_name: String,
}

impl FileMetadata {
    /// Splits `path` into its pattern components. A path without a directory
    /// has `.` as its `dir`; a dotfile such as `.env` has no extension.
    pub fn from_path(path: &Path) -> Self {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
            _ => ".".to_string(),
        };
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let base_name = name
            .strip_suffix(extension.as_str())
            .unwrap_or(&name)
            .to_string();

        FileMetadata {
            dir,
            name,
            extension,
            base_name,
        }
    }
}

/// MD5 digest of `contents` as 32 lowercase hex characters.
pub fn content_digest(contents: &str) -> String {
    format!("{:x}", Md5::digest(contents.as_bytes()))
}

/// Substitutes the placeholders of `pattern` for one rendered file.
///
/// Fails on unknown placeholders, on an unterminated `%{`, and on a `%` that
/// starts neither a placeholder nor `%%`.
pub fn resolve_output_path(
    pattern: &str,
    metadata: &FileMetadata,
    digest: &str,
) -> Result<PathBuf, Error> {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if let Some(tail) = after.strip_prefix('%') {
            out.push('%');
            rest = tail;
            continue;
        }

        let Some(body) = after.strip_prefix('{') else {
            return Err(Error::pattern_error(
                pattern,
                format!("malformed placeholder at byte {}", pattern.len() - rest.len() + start),
            ));
        };
        let Some(end) = body.find('}') else {
            return Err(Error::pattern_error(pattern, "unterminated `%{`"));
        };

        let value = match &body[..end] {
            "dir" => metadata.dir.as_str(),
            "name" => metadata.name.as_str(),
            "extension" => metadata.extension.as_str(),
            "base_name" => metadata.base_name.as_str(),
            "digest" => digest,
            unknown => {
                return Err(Error::pattern_error(
                    pattern,
                    format!("unknown placeholder `{}`", unknown),
                ));
            }
        };
        out.push_str(value);
        rest = &body[end + 1..];
    }
    out.push_str(rest);

    Ok(PathBuf::from(out))
}

/// A rendered artifact together with where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub digest: String,
    pub contents: String,
}

impl GeneratedArtifact {
    /// Resolves the output path of `contents`, rendered from `source`.
    pub fn new(source: &Path, pattern: &str, contents: String) -> Result<Self, Error> {
        let digest = content_digest(&contents);
        let path = resolve_output_path(pattern, &FileMetadata::from_path(source), &digest)?;
        Ok(GeneratedArtifact {
            path,
            digest,
            contents,
        })
    }

    /// Writes the contents, replacing any existing file. Parent directories
    /// are not created.
    pub fn write(&self) -> Result<(), Error> {
        std::fs::write(&self.path, &self.contents).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })
    }
}
