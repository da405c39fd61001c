use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::graph::SceneGraph;

/// Somewhere a scene graph can be loaded from, and loaded again on restart.
pub trait SceneSource: fmt::Debug {
    /// Load a fresh copy of the scene graph.
    fn load(&self) -> CoreResult<SceneGraph>;
}

/// Loads scenes from a JSON file on disk, re-reading it on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path. Nothing is read until [`SceneSource::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SceneSource for FileSource {
    fn load(&self) -> CoreResult<SceneGraph> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| CoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        SceneGraph::from_json(&json)
    }
}

/// Hands out copies of an in-memory scene graph.
#[derive(Debug, Clone)]
pub struct StaticSource {
    graph: SceneGraph,
}

impl StaticSource {
    /// Wrap an already-built graph.
    pub fn new(graph: SceneGraph) -> Self {
        Self { graph }
    }

    /// Parse a JSON document once and serve copies of it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        SceneGraph::from_json(json).map(Self::new)
    }
}

impl SceneSource for StaticSource {
    fn load(&self) -> CoreResult<SceneGraph> {
        Ok(self.graph.clone())
    }
}
