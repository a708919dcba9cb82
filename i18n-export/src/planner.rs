//! Expands exported files and configured entries into render tasks.

use std::path::Path;

use crate::export_files::ExportEntry;

/// One template to render for one exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTask<'a> {
    pub file: &'a Path,
    pub entry: &'a ExportEntry,
}

/// Pairs every file with every entry: files in the order given, and for each
/// file the entries in configured order.
///
/// Nothing is deduplicated. Two entries whose outputs resolve to the same path
/// both get rendered, and the later one is written last.
pub fn plan<'a, P: AsRef<Path>>(files: &'a [P], entries: &'a [ExportEntry]) -> Vec<RenderTask<'a>> {
    files
        .iter()
        .flat_map(|file| {
            entries.iter().map(move |entry| RenderTask {
                file: file.as_ref(),
                entry,
            })
        })
        .collect()
}
