//! Turn resolution: one scene, from entry to exit.
//!
//! A turn runs these steps in order and stops at the first one that ends it:
//!
//! 1. look up the current scene,
//! 2. show the intro (or visited) message,
//! 3. on a first visit, run the choice menu,
//! 4. resolve death conditions,
//! 5. resolve victory,
//! 6. resolve a random teleport,
//! 7. read commands until the player leaves or quits.

use std::ops::ControlFlow;

use rand::Rng;
use rand::rngs::StdRng;
use tm_core::{Choice, SceneGraph, SceneRecord};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::dispatch::{CommandDispatcher, Dispatch, emit_nonempty};
use crate::error::{EngineError, EngineResult};
use crate::io::{Input, PlayerIo};
use crate::parser::parse_command;
use crate::session::SessionState;

/// Prompt shown while the choice menu waits for a number.
pub const CHOICE_PROMPT: &str = "Which one do you choose? ";
/// Prompt shown while waiting for a command.
pub const COMMAND_PROMPT: &str = "What do you want to do? ";

const INVALID_CHOICE: &str = "That is not a valid choice.";
const FADE_TO_BLACK: &str = "...and the world fades to black.";

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player reached a victory scene.
    Victory,
    /// The player quit or interrupted input.
    Quit,
}

impl Ending {
    /// Returns true for a won game.
    pub fn is_victory(self) -> bool {
        matches!(self, Ending::Victory)
    }
}

/// What a resolved turn means for the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Keep playing from the session's current scene.
    Continue,
    /// The player died; the game must restart.
    Died,
    /// The game is over.
    GameOver(Ending),
}

/// Resolve one turn for the session's current scene.
///
/// # Errors
///
/// Fails if the current scene or an exit target is missing from the graph,
/// if a move is attempted in a scene without directions under strict
/// configuration, or if reading input fails.
pub fn resolve_turn(
    graph: &SceneGraph,
    session: &mut SessionState,
    io: &mut dyn PlayerIo,
    config: &EngineConfig,
    rng: &mut StdRng,
) -> EngineResult<TurnOutcome> {
    let scene = graph
        .find(session.current_scene())
        .map_err(EngineError::lookup)?;
    session.advance_turn();

    let visited = session.is_visited(&scene.name);
    debug!(scene = %scene.name, turn = session.turn_count(), visited, "resolving turn");

    let entry = match (&scene.visited_message, visited) {
        (Some(message), true) => Some(message),
        _ => scene.intro_message.as_ref(),
    };
    if let Some(text) = entry {
        io.emit(text);
    }

    if !visited
        && let Some(choices) = scene.menu()
        && let ControlFlow::Break(outcome) = run_choice_menu(choices, session, io, config)?
    {
        return Ok(outcome);
    }

    if scene.is_death
        && let ControlFlow::Break(outcome) = resolve_death(scene, visited, session, io)
    {
        return Ok(outcome);
    }

    if scene.is_victory {
        if let Some(text) = &scene.victory_message {
            io.emit(text);
        }
        info!(scene = %scene.name, turns = session.turn_count(), "victory");
        return Ok(TurnOutcome::GameOver(Ending::Victory));
    }

    if scene.go_to_random {
        let index = rng.random_range(0..graph.len());
        let destination = graph
            .scene_at(index)
            .ok_or_else(|| EngineError::SceneNotFound(format!("#{index}")))?;
        debug!(from = %scene.name, to = %destination.name, "random teleport");
        session.set_current_scene(destination.name.clone());
        return Ok(TurnOutcome::Continue);
    }

    run_commands(scene, graph, session, io, config)
}

/// Offer the choices the player qualifies for and apply the one picked.
fn run_choice_menu(
    choices: &[Choice],
    session: &mut SessionState,
    io: &mut dyn PlayerIo,
    config: &EngineConfig,
) -> EngineResult<ControlFlow<TurnOutcome>> {
    let offered: Vec<&Choice> = choices
        .iter()
        .filter(|c| {
            c.required_item
                .as_deref()
                .is_none_or(|item| session.has_item(item))
        })
        .collect();
    if offered.is_empty() {
        return Ok(ControlFlow::Continue(()));
    }

    let menu: Vec<String> = offered
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}) {}", i + 1, c.text))
        .collect();
    io.emit(&menu.join("\n"));

    loop {
        let line = match io.request(CHOICE_PROMPT)? {
            Input::Line(line) => line,
            Input::Interrupted => {
                return Ok(ControlFlow::Break(TurnOutcome::GameOver(Ending::Quit)));
            }
        };

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=offered.len()).contains(&n) => {
                let choice = offered[n - 1];
                emit_nonempty(io, &choice.result_message);
                if let Some(item) = &choice.granted_item {
                    session.add_item(item.clone());
                }
                debug!(choice = n, granted = ?choice.granted_item, "choice made");
                return Ok(ControlFlow::Continue(()));
            }
            _ => {
                io.emit(INVALID_CHOICE);
                if config.count_rejected_input {
                    session.advance_turn();
                }
            }
        }
    }
}

/// Decide whether entering a death scene kills the player.
fn resolve_death(
    scene: &SceneRecord,
    visited: bool,
    session: &mut SessionState,
    io: &mut dyn PlayerIo,
) -> ControlFlow<TurnOutcome> {
    let dies = match (scene.life_requirements(), scene.death_triggers()) {
        (Some(requirements), _) if !visited => {
            let mut missing = false;
            for requirement in requirements {
                if session.remove_item(&requirement.item_name) {
                    emit_nonempty(io, &requirement.message);
                } else {
                    missing = true;
                    break;
                }
            }
            missing
        }
        (_, Some(triggers)) => triggers.iter().any(|t| session.has_item(&t.item_name)),
        _ => !visited,
    };

    if !dies {
        return ControlFlow::Continue(());
    }

    if let Some(text) = &scene.death_message {
        io.emit(text);
    }
    io.emit(FADE_TO_BLACK);
    info!(scene = %scene.name, turn = session.turn_count(), "player died");
    ControlFlow::Break(TurnOutcome::Died)
}

/// Read commands until one leaves the scene or ends the game.
fn run_commands(
    scene: &SceneRecord,
    graph: &SceneGraph,
    session: &mut SessionState,
    io: &mut dyn PlayerIo,
    config: &EngineConfig,
) -> EngineResult<TurnOutcome> {
    let dispatcher = CommandDispatcher::new(scene, graph, config);

    loop {
        let line = match io.request(COMMAND_PROMPT)? {
            Input::Line(line) => line,
            Input::Interrupted => return Ok(TurnOutcome::GameOver(Ending::Quit)),
        };

        match dispatcher.dispatch(parse_command(&line), session, io)? {
            Dispatch::Stay => {}
            Dispatch::Rejected => {
                if config.count_rejected_input {
                    session.advance_turn();
                }
            }
            Dispatch::Moved(target) => {
                session.mark_visited(scene.name.clone());
                session.set_current_scene(target);
                return Ok(TurnOutcome::Continue);
            }
            Dispatch::Quit => return Ok(TurnOutcome::GameOver(Ending::Quit)),
        }
    }
}
