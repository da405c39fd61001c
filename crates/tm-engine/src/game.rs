//! The game loop: turns, restarts, and the end of the game.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tm_core::{SceneGraph, SceneSource};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::io::PlayerIo;
use crate::resolver::{Ending, TurnOutcome, resolve_turn};
use crate::session::SessionState;

/// A running game.
///
/// Owns the scene graph, the session, and the source the graph came from so
/// that a death can reload the scenes from scratch.
#[derive(Debug)]
pub struct Game {
    source: Box<dyn SceneSource>,
    graph: SceneGraph,
    session: SessionState,
    config: EngineConfig,
    rng: StdRng,
}

impl Game {
    /// Load the scene graph and place the player in the start scene.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be loaded or the start scene is missing.
    pub fn new(source: impl SceneSource + 'static, config: EngineConfig) -> EngineResult<Self> {
        let graph = load_checked(&source, &config.start_scene)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(scenes = graph.len(), start = %config.start_scene, "game loaded");

        Ok(Self {
            source: Box::new(source),
            session: SessionState::new(config.start_scene.clone()),
            graph,
            config,
            rng,
        })
    }

    /// The scene graph currently in play.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The player's session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get a mutable reference to the session state.
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// The game title, if the scene document declares one.
    pub fn title(&self) -> Option<&str> {
        self.graph.title()
    }

    /// Resolve one turn, restarting the game if the player died.
    ///
    /// # Errors
    ///
    /// Propagates resolver errors and reload failures.
    pub fn play_turn(&mut self, io: &mut dyn PlayerIo) -> EngineResult<TurnOutcome> {
        let outcome = resolve_turn(
            &self.graph,
            &mut self.session,
            io,
            &self.config,
            &mut self.rng,
        )?;
        if outcome == TurnOutcome::Died {
            self.restart()?;
        }
        Ok(outcome)
    }

    /// Play until the game ends.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; the game cannot continue after it.
    pub fn run(&mut self, io: &mut dyn PlayerIo) -> EngineResult<Ending> {
        loop {
            if let TurnOutcome::GameOver(ending) = self.play_turn(io)? {
                info!(
                    ?ending,
                    turns = self.session.turn_count(),
                    deaths = self.session.deaths(),
                    "game over"
                );
                return Ok(ending);
            }
        }
    }

    /// Reload the scenes from their source and reset the session.
    ///
    /// # Errors
    ///
    /// Fails if the reload fails or the start scene disappeared.
    pub fn restart(&mut self) -> EngineResult<()> {
        self.graph = load_checked(self.source.as_ref(), &self.config.start_scene)?;
        self.session.restart(self.config.start_scene.clone());
        info!(deaths = self.session.deaths(), "game restarted");
        Ok(())
    }
}

fn load_checked(source: &dyn SceneSource, start_scene: &str) -> EngineResult<SceneGraph> {
    let graph = source.load()?;
    if !graph.contains(start_scene) {
        return Err(EngineError::SceneNotFound(start_scene.to_string()));
    }
    Ok(graph)
}
