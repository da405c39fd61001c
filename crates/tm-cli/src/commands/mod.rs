pub mod check;
pub mod list;
pub mod play;

use std::path::Path;

use tm_core::{CoreError, FileSource, SceneGraph, SceneSource};

/// Load a scene document for the read-only commands.
fn load_graph(file: &Path) -> Result<SceneGraph, String> {
    let source = FileSource::new(file);
    source.load().map_err(|e| describe_load_error(source.path(), &e))
}

/// Name the document when the failure is in the data itself.
fn describe_load_error(path: &Path, err: &CoreError) -> String {
    match err {
        CoreError::Io { .. } => err.to_string(),
        _ if err.is_data_error() => format!("invalid scene document {}: {err}", path.display()),
        _ => err.to_string(),
    }
}
