//! Full games driven through scripted input.

use std::cell::Cell;
use std::rc::Rc;

use tm_core::{CoreResult, SceneGraph, SceneSource, StaticSource};
use tm_engine::{EngineConfig, EngineError, Ending, Game, ScriptedIo, TurnOutcome};

const KEY_AND_GATE: &str = r#"{
    "events": [
        {
            "name": "start1",
            "intro_message": "A",
            "choices": [
                {"choice": "Pick up the key", "item": "key", "message": "You pocket the key."}
            ],
            "directions": ["gate", null, null, null]
        },
        {
            "name": "gate",
            "intro_message": "A locked gate blocks the path.",
            "is_death": true,
            "death_message": "The guards seize you.",
            "required_to_live": [{"item": "key", "message": "The key turns in the lock."}],
            "directions": [null, null, "start1", null]
        }
    ]
}"#;

const CASTLE: &str = r#"{
    "title": "Castle Run",
    "events": [
        {
            "name": "start1",
            "intro_message": "You stand before a castle.",
            "visited_message": "The castle again.",
            "look_message": "A lantern lies in the grass.",
            "obtainable_items": [{"item": "lantern", "message": "You take the lantern."}],
            "directions": ["throne", "moat", null, null]
        },
        {
            "name": "moat",
            "intro_message": "Cold water.",
            "is_death": true,
            "death_message": "You sink.",
            "required_to_live": [{"item": "lantern", "message": "The lantern shows a path."}],
            "directions": [null, null, null, "start1"]
        },
        {
            "name": "throne",
            "intro_message": "The throne room.",
            "is_victory": true,
            "victory_message": "The kingdom is yours."
        }
    ]
}"#;

fn game(json: &str) -> Game {
    let source = StaticSource::from_json(json).unwrap();
    Game::new(source, EngineConfig::default().with_seed(7)).unwrap()
}

/// Serves a fixed document and counts how often it was loaded.
#[derive(Debug)]
struct CountingSource {
    json: &'static str,
    loads: Rc<Cell<usize>>,
}

impl SceneSource for CountingSource {
    fn load(&self) -> CoreResult<SceneGraph> {
        self.loads.set(self.loads.get() + 1);
        SceneGraph::from_json(self.json)
    }
}

#[test]
fn choice_grants_key_that_is_spent_to_survive() {
    let mut game = game(KEY_AND_GATE);
    let mut io = ScriptedIo::new(["1", "go north", "quit"]);

    assert_eq!(game.play_turn(&mut io).unwrap(), TurnOutcome::Continue);
    assert!(io.transcript().starts_with("A\n1) Pick up the key\n"));
    assert!(io.saw("You pocket the key."));
    assert_eq!(game.session().current_scene(), "gate");
    assert!(game.session().has_item("key"));

    assert_eq!(
        game.play_turn(&mut io).unwrap(),
        TurnOutcome::GameOver(Ending::Quit)
    );
    assert!(io.saw("The key turns in the lock."));
    assert!(!io.saw("The guards seize you."));
    assert!(!game.session().has_item("key"));
    assert_eq!(game.session().deaths(), 0);
}

#[test]
fn missing_required_item_restarts_at_start() {
    let loads = Rc::new(Cell::new(0));
    let source = CountingSource {
        json: KEY_AND_GATE,
        loads: Rc::clone(&loads),
    };
    let mut game = Game::new(source, EngineConfig::default()).unwrap();
    assert_eq!(loads.get(), 1);

    // Arrive at the gate empty-handed
    game.session_mut().set_current_scene("gate");

    let mut io = ScriptedIo::default();
    assert_eq!(game.play_turn(&mut io).unwrap(), TurnOutcome::Died);
    assert!(io.saw("The guards seize you."));

    assert_eq!(game.session().current_scene(), "start1");
    assert!(game.session().inventory().is_empty());
    assert_eq!(loads.get(), 2);
}

#[test]
fn revisited_start_skips_choice_menu() {
    let mut game = game(KEY_AND_GATE);
    let mut io = ScriptedIo::new(["1", "go north", "go south", "quit"]);

    game.play_turn(&mut io).unwrap();
    game.play_turn(&mut io).unwrap();
    assert!(game.session().is_visited("start1"));

    io.clear_output();
    assert_eq!(
        game.play_turn(&mut io).unwrap(),
        TurnOutcome::GameOver(Ending::Quit)
    );
    assert!(!io.saw("Pick up the key"));
}

#[test]
fn victory_via_go_north() {
    let mut game = game(CASTLE);
    let mut io = ScriptedIo::new(["go north", "look", "look"]);

    assert_eq!(game.run(&mut io).unwrap(), Ending::Victory);
    assert!(io.saw("The kingdom is yours."));
    // Only the move was read
    assert_eq!(io.prompts().len(), 1);
    assert_eq!(io.remaining(), 2);
}

#[test]
fn death_then_win_on_second_life() {
    let mut game = game(CASTLE);
    let mut io = ScriptedIo::new(["go east", "go north"]);

    assert_eq!(game.run(&mut io).unwrap(), Ending::Victory);
    assert!(io.saw("You sink."));
    assert_eq!(game.session().deaths(), 1);
    // Restart cleared the visit, so the intro shows again rather than the visited message
    assert!(!io.saw("The castle again."));
}

#[test]
fn taken_item_is_never_refused() {
    let mut game = game(CASTLE);
    let mut io = ScriptedIo::new(["take lantern", "take LANTERN", "inventory", "quit"]);

    game.run(&mut io).unwrap();
    assert!(game.session().has_item("lantern"));
    assert_eq!(game.session().inventory().len(), 1);
    assert!(!io.saw("can't take lantern"));
}

#[test]
fn inventory_is_idempotent() {
    let mut game = game(CASTLE);
    let mut io = ScriptedIo::new(["take lantern", "inventory", "inventory", "quit"]);

    game.run(&mut io).unwrap();
    let listings: Vec<&String> = io
        .output()
        .iter()
        .filter(|o| o.as_str() == "lantern")
        .collect();
    assert_eq!(listings.len(), 2);
}

#[test]
fn lantern_saves_from_the_moat() {
    let mut game = game(CASTLE);
    let mut io = ScriptedIo::new(["take lantern", "go east", "go west", "quit"]);

    assert_eq!(game.run(&mut io).unwrap(), Ending::Quit);
    assert!(io.saw("The lantern shows a path."));
    assert!(io.saw("The castle again."));
    assert_eq!(game.session().deaths(), 0);
    assert!(game.session().inventory().is_empty());
}

#[test]
fn blocked_exit_keeps_player_in_place() {
    let mut game = game(CASTLE);
    let mut io = ScriptedIo::new(["go west", "go south", "quit"]);

    game.run(&mut io).unwrap();
    assert_eq!(game.session().current_scene(), "start1");
    assert_eq!(
        io.output()
            .iter()
            .filter(|o| o.contains("can't go that way"))
            .count(),
        2
    );
}

#[test]
fn moving_from_scene_without_directions_is_a_configuration_error() {
    let json = r#"{"events": [{"name": "start1", "intro_message": "Nowhere to go."}]}"#;
    let mut game = game(json);
    let mut io = ScriptedIo::new(["go north"]);

    let err = game.run(&mut io).unwrap_err();
    assert!(matches!(err, EngineError::MissingDirections(ref n) if n == "start1"));
}

#[test]
fn random_teleport_lands_somewhere_real() {
    let json = r#"{"events": [
        {"name": "start1", "go_to_random": true},
        {"name": "a", "directions": ["start1", null, null, null]},
        {"name": "b", "directions": ["start1", null, null, null]}
    ]}"#;
    let mut game = game(json);
    let mut io = ScriptedIo::default();

    for _ in 0..10 {
        if game.session().current_scene() != "start1" {
            break;
        }
        assert_eq!(game.play_turn(&mut io).unwrap(), TurnOutcome::Continue);
    }
    assert!(game.graph().contains(game.session().current_scene()));
}
