//! Error types for the turn engine.

use thiserror::Error;
use tm_core::CoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that end a run.
///
/// Rejected choices and unrecognized commands are not errors: the resolver
/// answers them and asks again.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Loading or reloading the scene graph failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A scene named as start, exit, or teleport target does not exist.
    #[error("scene not found: \"{0}\"")]
    SceneNotFound(String),

    /// A movement command was issued in a scene that declares no exits at all.
    #[error("scene \"{0}\" has no directions configured")]
    MissingDirections(String),

    /// Reading player input failed.
    #[error("input error: {0}")]
    Input(String),
}

impl EngineError {
    /// Convert a lookup failure into the engine's own variant.
    pub(crate) fn lookup(err: CoreError) -> Self {
        match err {
            CoreError::SceneNotFound(name) => EngineError::SceneNotFound(name),
            other => EngineError::Core(other),
        }
    }
}
