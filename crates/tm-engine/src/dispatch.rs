//! Command dispatch within a scene.

use tm_core::{Direction, ItemRule, SceneGraph, SceneRecord};
use tracing::debug;

use crate::config::{EngineConfig, ItemTablePolicy};
use crate::error::{EngineError, EngineResult};
use crate::io::PlayerIo;
use crate::parser::Command;
use crate::session::SessionState;

/// Static command reference shown by `help`.
pub const HELP_TEXT: &str = "\
Available Commands:
-------------------
look: Looks around you.
take [item]: Tries to take item from area.
go [direction]: Takes you 'north', 'south', 'east', or 'west'.
inventory: Looks at the items in your backpack.
quit: Exits out of the game.
help: Prints this message.";

const NOTHING_SPECIFIED: &str = "You didn't specify what you wanted to take.";
const CANT_GO: &str = "Seems you can't go that way.";
const WHERE_TO: &str = "Where do you want to go?";
const EMPTY_BACKPACK: &str = "Your backpack is empty.";
const INVENTORY_SEPARATOR: &str = " | ";

/// What a single command did to the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Dispatch {
    /// Stay in the scene and ask again.
    Stay,
    /// The input was not understood; ask again.
    Rejected,
    /// Leave for the named scene.
    Moved(String),
    /// End the game.
    Quit,
}

/// Runs commands against one scene.
pub(crate) struct CommandDispatcher<'a> {
    scene: &'a SceneRecord,
    graph: &'a SceneGraph,
    config: &'a EngineConfig,
}

impl<'a> CommandDispatcher<'a> {
    pub(crate) fn new(
        scene: &'a SceneRecord,
        graph: &'a SceneGraph,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            scene,
            graph,
            config,
        }
    }

    pub(crate) fn dispatch(
        &self,
        command: Command,
        session: &mut SessionState,
        io: &mut dyn PlayerIo,
    ) -> EngineResult<Dispatch> {
        match command {
            Command::Look => {
                if let Some(text) = &self.scene.look_message {
                    io.emit(text);
                }
                Ok(Dispatch::Stay)
            }
            Command::Take { item } => {
                self.do_take(item.as_deref(), session, io);
                Ok(Dispatch::Stay)
            }
            Command::Move { direction } => self.do_move(direction, io),
            Command::Go { target } => {
                match target {
                    Some(word) => io.emit(&format!("'{word}' is not a direction you know.")),
                    None => io.emit(WHERE_TO),
                }
                Ok(Dispatch::Stay)
            }
            Command::Inventory => {
                io.emit(&inventory_listing(session));
                Ok(Dispatch::Stay)
            }
            Command::Help => {
                io.emit(HELP_TEXT);
                Ok(Dispatch::Stay)
            }
            Command::Quit => Ok(Dispatch::Quit),
            Command::Empty => Ok(Dispatch::Stay),
            Command::Unknown { input } => {
                io.emit(&format!(
                    "Command '{input}' not recognized.\n\
                     Use 'help' to see the commands available to you."
                ));
                Ok(Dispatch::Rejected)
            }
        }
    }

    fn do_take(&self, item: Option<&str>, session: &mut SessionState, io: &mut dyn PlayerIo) {
        let Some(item) = item else {
            io.emit(NOTHING_SPECIFIED);
            return;
        };

        let obtainable = self.scene.obtainable();
        let unobtainable = match (self.config.item_tables, obtainable) {
            (ItemTablePolicy::Exclusive, Some(_)) => None,
            _ => self.scene.unobtainable(),
        };

        if let Some(rule) = find_rule(obtainable, item) {
            if requirement_met(rule, session) {
                if session.add_item(rule.item_name.clone()) {
                    debug!(item = %rule.item_name, scene = %self.scene.name, "item taken");
                }
                emit_nonempty(io, &rule.message);
            } else {
                io.emit(&cant_take(item));
            }
        } else if let Some(rule) = find_rule(unobtainable, item) {
            if requirement_met(rule, session) {
                emit_nonempty(io, &rule.message);
            } else {
                io.emit(&cant_take(item));
            }
        } else {
            io.emit(&cant_take(item));
        }
    }

    fn do_move(&self, direction: Direction, io: &mut dyn PlayerIo) -> EngineResult<Dispatch> {
        let Some(directions) = &self.scene.directions else {
            if self.config.strict_directions {
                return Err(EngineError::MissingDirections(self.scene.name.clone()));
            }
            io.emit(CANT_GO);
            return Ok(Dispatch::Stay);
        };

        match directions.target(direction) {
            Some(target) => {
                if !self.graph.contains(target) {
                    return Err(EngineError::SceneNotFound(target.to_string()));
                }
                debug!(from = %self.scene.name, to = target, %direction, "moving");
                Ok(Dispatch::Moved(target.to_string()))
            }
            None => {
                io.emit(CANT_GO);
                Ok(Dispatch::Stay)
            }
        }
    }
}

fn find_rule<'r>(rules: Option<&'r [ItemRule]>, item: &str) -> Option<&'r ItemRule> {
    rules?.iter().find(|rule| rule.matches(item))
}

fn requirement_met(rule: &ItemRule, session: &SessionState) -> bool {
    rule.required_item
        .as_deref()
        .is_none_or(|required| session.has_item(required))
}

fn cant_take(item: &str) -> String {
    format!("Seems you can't take {item}.")
}

/// Inventory items joined in acquisition order.
pub(crate) fn inventory_listing(session: &SessionState) -> String {
    if session.inventory().is_empty() {
        EMPTY_BACKPACK.to_string()
    } else {
        session.inventory().join(INVENTORY_SEPARATOR)
    }
}

/// Emit `text` unless it is empty.
pub(crate) fn emit_nonempty(io: &mut dyn PlayerIo, text: &str) {
    if !text.is_empty() {
        io.emit(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedIo;
    use tm_core::Directions;

    fn graph_with(scene: SceneRecord) -> SceneGraph {
        SceneGraph::from_scenes(vec![scene, SceneRecord::new("hall")]).unwrap()
    }

    fn run(
        scene_name: &str,
        graph: &SceneGraph,
        config: &EngineConfig,
        session: &mut SessionState,
        command: Command,
    ) -> (EngineResult<Dispatch>, ScriptedIo) {
        let scene = graph.find(scene_name).unwrap();
        let mut io = ScriptedIo::default();
        let result =
            CommandDispatcher::new(scene, graph, config).dispatch(command, session, &mut io);
        (result, io)
    }

    fn take(item: &str) -> Command {
        Command::Take {
            item: Some(item.to_string()),
        }
    }

    #[test]
    fn look_emits_look_message() {
        let mut scene = SceneRecord::new("start1");
        scene.look_message = Some("Dust motes drift.".to_string());
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (result, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Look,
        );
        assert_eq!(result.unwrap(), Dispatch::Stay);
        assert_eq!(io.output(), ["Dust motes drift."]);
    }

    #[test]
    fn take_without_item() {
        let graph = graph_with(SceneRecord::new("start1"));
        let mut session = SessionState::new("start1");
        let (_, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Take { item: None },
        );
        assert!(io.saw("didn't specify"));
    }

    #[test]
    fn take_obtainable_item() {
        let mut scene = SceneRecord::new("start1");
        scene.obtainable_items = Some(vec![ItemRule::new("Lantern", "You pick up the lantern.")]);
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (_, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            take("lantern"),
        );
        assert_eq!(io.output(), ["You pick up the lantern."]);
        assert!(session.has_item("lantern"));
    }

    #[test]
    fn take_with_unmet_requirement() {
        let mut scene = SceneRecord::new("start1");
        scene.obtainable_items =
            Some(vec![ItemRule::new("sword", "You pry it loose.").requiring("crowbar")]);
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (_, io) = run("start1", &graph, &EngineConfig::default(), &mut session, take("sword"));
        assert_eq!(io.output(), ["Seems you can't take sword."]);
        assert!(!session.has_item("sword"));

        session.add_item("crowbar");
        let (_, io) = run("start1", &graph, &EngineConfig::default(), &mut session, take("sword"));
        assert_eq!(io.output(), ["You pry it loose."]);
        assert!(session.has_item("sword"));
    }

    #[test]
    fn take_unknown_item() {
        let mut scene = SceneRecord::new("start1");
        scene.obtainable_items = Some(vec![ItemRule::new("rope", "Got it.")]);
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (_, io) = run("start1", &graph, &EngineConfig::default(), &mut session, take("piano"));
        assert_eq!(io.output(), ["Seems you can't take piano."]);
    }

    #[test]
    fn unobtainable_items_never_transfer() {
        let mut scene = SceneRecord::new("start1");
        scene.unobtainable_items = Some(vec![ItemRule::new("statue", "It is far too heavy.")]);
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (_, io) = run("start1", &graph, &EngineConfig::default(), &mut session, take("statue"));
        assert_eq!(io.output(), ["It is far too heavy."]);
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn exclusive_tables_ignore_unobtainable_when_obtainable_present() {
        let mut scene = SceneRecord::new("start1");
        scene.obtainable_items = Some(vec![ItemRule::new("rope", "Got it.")]);
        scene.unobtainable_items = Some(vec![ItemRule::new("statue", "Too heavy.")]);
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (_, io) = run("start1", &graph, &EngineConfig::default(), &mut session, take("statue"));
        assert_eq!(io.output(), ["Seems you can't take statue."]);

        let merged = EngineConfig::default().with_item_tables(ItemTablePolicy::Merged);
        let (_, io) = run("start1", &graph, &merged, &mut session, take("statue"));
        assert_eq!(io.output(), ["Too heavy."]);
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn move_through_open_exit() {
        let mut scene = SceneRecord::new("start1");
        scene.directions = Some(Directions::default().with(Direction::North, "hall"));
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (result, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Move {
                direction: Direction::North,
            },
        );
        assert_eq!(result.unwrap(), Dispatch::Moved("hall".to_string()));
        assert!(io.output().is_empty());
    }

    #[test]
    fn move_into_empty_slot() {
        let mut scene = SceneRecord::new("start1");
        scene.directions = Some(Directions::default().with(Direction::North, "hall"));
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (result, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Move {
                direction: Direction::East,
            },
        );
        assert_eq!(result.unwrap(), Dispatch::Stay);
        assert_eq!(io.output(), [CANT_GO]);
    }

    #[test]
    fn move_to_missing_scene_fails_loudly() {
        let mut scene = SceneRecord::new("start1");
        scene.directions = Some(Directions::default().with(Direction::South, "nowhere"));
        let graph = graph_with(scene);
        let mut session = SessionState::new("start1");

        let (result, _) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Move {
                direction: Direction::South,
            },
        );
        assert!(matches!(result, Err(EngineError::SceneNotFound(ref n)) if n == "nowhere"));
    }

    #[test]
    fn move_without_directions() {
        let graph = graph_with(SceneRecord::new("start1"));
        let mut session = SessionState::new("start1");
        let west = Command::Move {
            direction: Direction::West,
        };

        let (result, _) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            west.clone(),
        );
        assert!(matches!(result, Err(EngineError::MissingDirections(_))));

        let lenient = EngineConfig::default().with_strict_directions(false);
        let (result, io) = run("start1", &graph, &lenient, &mut session, west);
        assert_eq!(result.unwrap(), Dispatch::Stay);
        assert_eq!(io.output(), [CANT_GO]);
    }

    #[test]
    fn go_without_usable_direction() {
        let graph = graph_with(SceneRecord::new("start1"));
        let mut session = SessionState::new("start1");

        let (_, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Go { target: None },
        );
        assert_eq!(io.output(), [WHERE_TO]);

        let (_, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Go {
                target: Some("sideways".to_string()),
            },
        );
        assert!(io.saw("'sideways' is not a direction"));
    }

    #[test]
    fn inventory_listing_order() {
        let mut session = SessionState::new("start1");
        assert_eq!(inventory_listing(&session), EMPTY_BACKPACK);
        session.add_item("rope");
        session.add_item("key");
        assert_eq!(inventory_listing(&session), "rope | key");
    }

    #[test]
    fn unknown_command_is_rejected() {
        let graph = graph_with(SceneRecord::new("start1"));
        let mut session = SessionState::new("start1");
        let (result, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Unknown {
                input: "dance".to_string(),
            },
        );
        assert_eq!(result.unwrap(), Dispatch::Rejected);
        assert!(io.saw("Command 'dance' not recognized."));
        assert!(io.saw("help"));
    }

    #[test]
    fn help_and_quit() {
        let graph = graph_with(SceneRecord::new("start1"));
        let mut session = SessionState::new("start1");
        let (result, io) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Help,
        );
        assert_eq!(result.unwrap(), Dispatch::Stay);
        assert_eq!(io.output(), [HELP_TEXT]);

        let (result, _) = run(
            "start1",
            &graph,
            &EngineConfig::default(),
            &mut session,
            Command::Quit,
        );
        assert_eq!(result.unwrap(), Dispatch::Quit);
    }
}
