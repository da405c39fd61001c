use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four exits a scene can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// North (also "up").
    North,
    /// East (also "right").
    East,
    /// South (also "down").
    South,
    /// West (also "left").
    West,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Parse a direction word, accepting the relative synonyms.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "up" => Some(Self::North),
            "east" | "right" => Some(Self::East),
            "south" | "down" => Some(Self::South),
            "west" | "left" => Some(Self::West),
            _ => None,
        }
    }

    /// Position of this direction in a scene's `directions` array.
    pub fn slot(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Get the display name for this direction.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire shapes accepted for a scene's exits.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DirectionsRepr {
    Slots(Vec<Option<String>>),
    Named {
        #[serde(default)]
        north: Option<String>,
        #[serde(default)]
        east: Option<String>,
        #[serde(default)]
        south: Option<String>,
        #[serde(default)]
        west: Option<String>,
    },
}

impl From<DirectionsRepr> for Directions {
    fn from(repr: DirectionsRepr) -> Self {
        let slots = match repr {
            DirectionsRepr::Slots(slots) => slots,
            DirectionsRepr::Named {
                north,
                east,
                south,
                west,
            } => vec![north, east, south, west],
        };
        Self::from_slots(slots)
    }
}

/// The exits of a scene, indexed by [`Direction::slot`].
///
/// An empty string in the source data counts as "no exit", same as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DirectionsRepr", into = "Vec<Option<String>>")]
pub struct Directions {
    slots: Vec<Option<String>>,
}

impl From<Directions> for Vec<Option<String>> {
    fn from(directions: Directions) -> Self {
        directions.slots
    }
}

impl Directions {
    /// Build exits from raw slots in north/east/south/west order.
    pub fn from_slots(slots: Vec<Option<String>>) -> Self {
        let slots = slots
            .into_iter()
            .map(|s| s.filter(|name| !name.is_empty()))
            .collect();
        Self { slots }
    }

    /// Set the exit in one direction.
    pub fn with(mut self, direction: Direction, target: impl Into<String>) -> Self {
        let slot = direction.slot();
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(target.into());
        self
    }

    /// The scene reached by going in `direction`, if that exit exists.
    pub fn target(&self, direction: Direction) -> Option<&str> {
        self.slots.get(direction.slot()).and_then(|s| s.as_deref())
    }

    /// Number of raw slots given in the source data.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over the populated exits.
    pub fn exits(&self) -> impl Iterator<Item = (Direction, &str)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.target(d).map(|t| (d, t)))
    }
}

/// A numbered option offered on the first visit to a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown in the menu.
    #[serde(rename = "choice")]
    pub text: String,
    /// Item the player must hold for the choice to be offered.
    #[serde(rename = "required", default, skip_serializing_if = "Option::is_none")]
    pub required_item: Option<String>,
    /// Item added to the inventory when the choice is picked.
    #[serde(rename = "item", default, skip_serializing_if = "Option::is_none")]
    pub granted_item: Option<String>,
    /// Text emitted after the choice is picked.
    #[serde(rename = "message", default)]
    pub result_message: String,
}

impl Choice {
    /// Create a choice with no requirement and no reward.
    pub fn new(text: impl Into<String>, result_message: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            required_item: None,
            granted_item: None,
            result_message: result_message.into(),
        }
    }

    /// Only offer this choice when `item` is held.
    pub fn requiring(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }

    /// Grant `item` when this choice is picked.
    pub fn granting(mut self, item: impl Into<String>) -> Self {
        self.granted_item = Some(item.into());
        self
    }
}

/// An item a `take` command can target in a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRule {
    /// The item name the player types.
    #[serde(rename = "item")]
    pub item_name: String,
    /// Item the player must already hold for the rule to apply.
    #[serde(rename = "required", default, skip_serializing_if = "Option::is_none")]
    pub required_item: Option<String>,
    /// Text emitted when the rule applies.
    #[serde(default)]
    pub message: String,
}

impl ItemRule {
    /// Create a rule with no prerequisite.
    pub fn new(item_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            required_item: None,
            message: message.into(),
        }
    }

    /// Require `item` to be held before this rule applies.
    pub fn requiring(mut self, item: impl Into<String>) -> Self {
        self.required_item = Some(item.into());
        self
    }

    /// Returns true if `name` refers to this item (case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        self.item_name.eq_ignore_ascii_case(name)
    }
}

/// An item that is spent to survive a death scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeRequirement {
    /// The item that must be held.
    #[serde(rename = "item")]
    pub item_name: String,
    /// Text emitted when the item is spent.
    #[serde(default)]
    pub message: String,
}

/// An item whose possession makes a death scene fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathTrigger {
    /// The item that kills the player.
    #[serde(rename = "item")]
    pub item_name: String,
}

/// A single scene (room) in the adventure.
///
/// Every optional field distinguishes "absent" from "empty"; the engine
/// decides how each case behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Unique scene name.
    pub name: String,
    /// Shown on entry unless a visited message applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_message: Option<String>,
    /// Shown on entry once the scene has been visited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_message: Option<String>,
    /// Shown for the `look` command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_message: Option<String>,
    /// Shown when the scene kills the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_message: Option<String>,
    /// Shown when the scene wins the game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victory_message: Option<String>,
    /// First-visit choice menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Items the player can pick up here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obtainable_items: Option<Vec<ItemRule>>,
    /// Items that answer a `take` but never leave the scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unobtainable_items: Option<Vec<ItemRule>>,
    /// Exits, in north/east/south/west order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directions: Option<Directions>,
    /// Entering this scene may kill the player.
    #[serde(default)]
    pub is_death: bool,
    /// Items spent, in order, to survive a death scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_to_live: Option<Vec<LifeRequirement>>,
    /// Items that make a death scene fatal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_to_die: Option<Vec<DeathTrigger>>,
    /// Entering this scene wins the game.
    #[serde(default)]
    pub is_victory: bool,
    /// Entering this scene sends the player to a random scene.
    #[serde(default)]
    pub go_to_random: bool,
}

/// Treat `None` and an empty list alike.
fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|l| !l.is_empty())
}

impl SceneRecord {
    /// Create an empty scene with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Choices to consider for the menu, if any.
    pub fn menu(&self) -> Option<&[Choice]> {
        non_empty(&self.choices)
    }

    /// Obtainable item rules, if any.
    pub fn obtainable(&self) -> Option<&[ItemRule]> {
        non_empty(&self.obtainable_items)
    }

    /// Unobtainable item rules, if any.
    pub fn unobtainable(&self) -> Option<&[ItemRule]> {
        non_empty(&self.unobtainable_items)
    }

    /// Items spent to survive, if configured.
    pub fn life_requirements(&self) -> Option<&[LifeRequirement]> {
        non_empty(&self.required_to_live)
    }

    /// Items that make the scene fatal, if configured.
    pub fn death_triggers(&self) -> Option<&[DeathTrigger]> {
        non_empty(&self.required_to_die)
    }
}
