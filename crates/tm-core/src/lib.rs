//! Core types for Trailmap: scene records, the scene graph, and scene sources.
//!
//! This crate defines the data model that a scene document deserializes into.
//! It knows nothing about turns or players. Build a [`SceneGraph`]
//! programmatically or load one from JSON through a [`SceneSource`].

/// Error types used throughout the crate.
pub mod error;
/// The immutable, name-indexed collection of scenes.
pub mod graph;
/// Scene records and their nested rules.
pub mod scene;
/// Places a scene graph can be (re)loaded from.
pub mod source;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the scene graph store.
pub use graph::{DanglingReference, SceneDocument, SceneGraph};
/// Re-export scene record types.
pub use scene::{
    Choice, DeathTrigger, Direction, Directions, ItemRule, LifeRequirement, SceneRecord,
};
/// Re-export scene sources.
pub use source::{FileSource, SceneSource, StaticSource};
