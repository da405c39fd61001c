//! Scene state machine and turn resolver for Trailmap.
//!
//! Drives a player through a [`tm_core::SceneGraph`]: entry messages,
//! first-visit choice menus, death and restart, victory, random teleports,
//! and the command loop. Input and output go through [`PlayerIo`], so the
//! engine runs the same under a terminal or a test script.

/// Engine configuration.
pub mod config;
/// Command dispatch within a scene.
mod dispatch;
/// Error types for the engine.
pub mod error;
/// The game loop.
pub mod game;
/// Player input and output.
pub mod io;
/// Command parsing.
pub mod parser;
/// Turn resolution.
pub mod resolver;
/// Per-run session state.
pub mod session;

pub use config::{DEFAULT_START_SCENE, EngineConfig, ItemTablePolicy};
pub use dispatch::HELP_TEXT;
pub use error::{EngineError, EngineResult};
pub use game::Game;
pub use io::{Input, PlayerIo, ScriptedIo};
pub use parser::{Command, parse_command};
pub use resolver::{Ending, TurnOutcome, resolve_turn};
pub use session::SessionState;
