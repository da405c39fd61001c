use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or querying a scene graph.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The scene document could not be read.
    #[error("failed to read scene data from {path}: {source}")]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The scene document is not valid JSON or does not match the scene schema.
    #[error("malformed scene data: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no top-level `events` collection.
    #[error("scene data has no top-level \"events\" collection")]
    MissingEvents,

    /// Two scenes share the same name.
    #[error("duplicate scene name: \"{0}\"")]
    DuplicateScene(String),

    /// A `directions` array names more than the four cardinal slots.
    #[error("scene \"{scene}\" lists {count} directions; at most 4 are allowed")]
    TooManyDirections {
        /// The offending scene.
        scene: String,
        /// How many slots were given.
        count: usize,
    },

    /// A referenced scene name does not exist in the graph.
    #[error("scene not found: \"{0}\"")]
    SceneNotFound(String),
}

impl CoreError {
    /// Returns true if this error comes from a malformed or missing scene
    /// document, as opposed to a failed lookup in a loaded graph.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, CoreError::SceneNotFound(_))
    }
}
