//! Configuration for the turn engine.

/// Name of the scene every game starts in unless configured otherwise.
pub const DEFAULT_START_SCENE: &str = "start1";

/// How `take` consults a scene's item tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemTablePolicy {
    /// Only look at unobtainable items when the scene has no obtainable ones.
    #[default]
    Exclusive,
    /// Look at obtainable items first, then unobtainable ones.
    Merged,
}

/// Configuration for a game.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Scene the game starts (and restarts) in.
    pub start_scene: String,
    /// Count rejected choices and unrecognized commands as turns.
    pub count_rejected_input: bool,
    /// How `take` consults item tables.
    pub item_tables: ItemTablePolicy,
    /// Treat movement in a scene without any directions as a fatal error.
    /// When false, it is answered like a blocked exit.
    pub strict_directions: bool,
    /// RNG seed for random teleports. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_scene: DEFAULT_START_SCENE.to_string(),
            count_rejected_input: false,
            item_tables: ItemTablePolicy::default(),
            strict_directions: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Set the start scene.
    pub fn with_start_scene(mut self, scene: impl Into<String>) -> Self {
        self.start_scene = scene.into();
        self
    }

    /// Set whether rejected input counts as a turn.
    pub fn with_count_rejected_input(mut self, count: bool) -> Self {
        self.count_rejected_input = count;
        self
    }

    /// Set the item table policy.
    pub fn with_item_tables(mut self, policy: ItemTablePolicy) -> Self {
        self.item_tables = policy;
        self
    }

    /// Set whether missing directions are fatal.
    pub fn with_strict_directions(mut self, strict: bool) -> Self {
        self.strict_directions = strict;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
