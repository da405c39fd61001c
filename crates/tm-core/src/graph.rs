use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::scene::{Direction, SceneRecord};

/// The top-level shape of a scene document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Optional game title, used for the welcome banner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The scenes. `None` when the key is missing from the document.
    #[serde(default)]
    pub events: Option<Vec<SceneRecord>>,
}

/// A direction that points at a scene which does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// The scene holding the exit.
    pub scene: String,
    /// The exit direction.
    pub direction: Direction,
    /// The missing target name.
    pub target: String,
}

/// The scene graph store. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    title: Option<String>,
    scenes: Vec<SceneRecord>,

    // Index
    by_name: HashMap<String, usize>,
}

impl SceneGraph {
    /// Build a graph from scenes in document order.
    pub fn from_scenes(scenes: Vec<SceneRecord>) -> CoreResult<Self> {
        let mut by_name = HashMap::with_capacity(scenes.len());
        for (idx, scene) in scenes.iter().enumerate() {
            if let Some(dirs) = &scene.directions
                && dirs.slot_count() > Direction::ALL.len()
            {
                return Err(CoreError::TooManyDirections {
                    scene: scene.name.clone(),
                    count: dirs.slot_count(),
                });
            }
            if by_name.insert(scene.name.clone(), idx).is_some() {
                return Err(CoreError::DuplicateScene(scene.name.clone()));
            }
        }

        Ok(Self {
            title: None,
            scenes,
            by_name,
        })
    }

    /// Build a graph from a parsed document.
    pub fn from_document(document: SceneDocument) -> CoreResult<Self> {
        let scenes = document.events.ok_or(CoreError::MissingEvents)?;
        let mut graph = Self::from_scenes(scenes)?;
        graph.title = document.title;
        Ok(graph)
    }

    /// Parse a JSON scene document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let document: SceneDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// The game title, if the document declares one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Look up a scene by exact name.
    pub fn find(&self, name: &str) -> CoreResult<&SceneRecord> {
        self.get(name)
            .ok_or_else(|| CoreError::SceneNotFound(name.to_string()))
    }

    /// Look up a scene by exact name, returning `None` if absent.
    pub fn get(&self, name: &str) -> Option<&SceneRecord> {
        self.by_name.get(name).map(|&idx| &self.scenes[idx])
    }

    /// Returns true if a scene with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the scene at a document position.
    pub fn scene_at(&self, index: usize) -> Option<&SceneRecord> {
        self.scenes.get(index)
    }

    /// Iterate over all scenes in document order.
    pub fn scenes(&self) -> impl Iterator<Item = &SceneRecord> {
        self.scenes.iter()
    }

    /// Scene names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenes.iter().map(|s| s.name.as_str())
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns true if the graph holds no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Exits whose target scene is missing from the graph.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        self.scenes
            .iter()
            .filter_map(|scene| scene.directions.as_ref().map(|d| (scene, d)))
            .flat_map(|(scene, dirs)| {
                dirs.exits()
                    .filter(|(_, target)| !self.contains(target))
                    .map(|(direction, target)| DanglingReference {
                        scene: scene.name.clone(),
                        direction,
                        target: target.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
