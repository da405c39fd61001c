//! Command parsing for player input.

use tm_core::Direction;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Describe the current scene.
    Look,
    /// Take an item.
    Take {
        /// The item name, if one was given.
        item: Option<String>,
    },
    /// Move through an exit.
    Move {
        /// The direction to move.
        direction: Direction,
    },
    /// A movement verb without a usable direction.
    Go {
        /// The word after the verb, if any.
        target: Option<String>,
    },
    /// List inventory.
    Inventory,
    /// Show help.
    Help,
    /// Quit the game.
    Quit,
    /// Blank input.
    Empty,
    /// Unknown command.
    Unknown {
        /// The normalized input.
        input: String,
    },
}

/// Verb synonyms for command parsing.
const LOOK_VERBS: &[&str] = &["look"];
const TAKE_VERBS: &[&str] = &["take"];
const MOVE_VERBS: &[&str] = &[
    "go", "move", "walk", "travel", "run", "skip", "hop", "crawl", "jump",
];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "backpack"];
const HELP_VERBS: &[&str] = &["help"];
const QUIT_VERBS: &[&str] = &["quit", "exit"];

/// Parse a line of player input into a command.
///
/// Input is lower-cased and split on whitespace; only the first word picks
/// the command.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let Some((verb, rest)) = words.split_first() else {
        return Command::Empty;
    };
    let verb = *verb;

    if LOOK_VERBS.contains(&verb) {
        return Command::Look;
    }
    if TAKE_VERBS.contains(&verb) {
        return Command::Take {
            item: (!rest.is_empty()).then(|| rest.join(" ")),
        };
    }
    if MOVE_VERBS.contains(&verb) {
        return parse_move(rest);
    }
    if INVENTORY_VERBS.contains(&verb) {
        return Command::Inventory;
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }
    if QUIT_VERBS.contains(&verb) {
        return Command::Quit;
    }

    Command::Unknown {
        input: words.join(" "),
    }
}

fn parse_move(rest: &[&str]) -> Command {
    let Some(word) = rest.first() else {
        return Command::Go { target: None };
    };

    match Direction::parse(word) {
        Some(direction) => Command::Move { direction },
        None => Command::Go {
            target: Some((*word).to_string()),
        },
    }
}
