//! Per-run session state.

use std::collections::HashMap;

/// Everything that changes while a game is played.
///
/// The inventory behaves as a set: an item is held at most once, membership
/// ignores ASCII case, and listing keeps acquisition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current_scene: String,
    inventory: Vec<String>,
    turn_count: u64,
    visited: HashMap<String, bool>,
    deaths: u32,
}

impl SessionState {
    /// Create a fresh session standing in `start_scene`.
    pub fn new(start_scene: impl Into<String>) -> Self {
        Self {
            current_scene: start_scene.into(),
            inventory: Vec::new(),
            turn_count: 0,
            visited: HashMap::new(),
            deaths: 0,
        }
    }

    /// Name of the scene the next turn resolves.
    pub fn current_scene(&self) -> &str {
        &self.current_scene
    }

    /// Make `scene` the current scene.
    pub fn set_current_scene(&mut self, scene: impl Into<String>) {
        self.current_scene = scene.into();
    }

    /// Items held, in acquisition order.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Check if the player holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.position(item).is_some()
    }

    /// Add an item. Returns false if it was already held.
    pub fn add_item(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.has_item(&item) {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Remove an item. Returns false if it was not held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.position(item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    fn position(&self, item: &str) -> Option<usize> {
        self.inventory
            .iter()
            .position(|held| held.eq_ignore_ascii_case(item))
    }

    /// Check if a scene has been visited.
    pub fn is_visited(&self, scene: &str) -> bool {
        self.visited.get(scene).copied().unwrap_or(false)
    }

    /// Mark a scene as visited.
    pub fn mark_visited(&mut self, scene: impl Into<String>) {
        self.visited.insert(scene.into(), true);
    }

    /// Number of turns resolved so far.
    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    /// Count one more turn.
    pub fn advance_turn(&mut self) {
        self.turn_count += 1;
    }

    /// How many times the player has died this run.
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Reset after a death: empty inventory, forget visits, stand in `start_scene`.
    ///
    /// The turn counter keeps running across restarts.
    pub fn restart(&mut self, start_scene: impl Into<String>) {
        self.current_scene = start_scene.into();
        self.inventory.clear();
        self.visited.clear();
        self.deaths += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_new() {
        let state = SessionState::new("start1");
        assert_eq!(state.current_scene(), "start1");
        assert!(state.inventory().is_empty());
        assert_eq!(state.turn_count(), 0);
        assert_eq!(state.deaths(), 0);
        assert!(!state.is_visited("start1"));
    }

    #[test]
    fn inventory_management() {
        let mut state = SessionState::new("start1");

        assert!(!state.has_item("key"));
        assert!(state.add_item("key"));
        assert!(state.has_item("key"));

        // Adding again should not duplicate
        assert!(!state.add_item("key"));
        assert_eq!(state.inventory().len(), 1);

        assert!(state.remove_item("key"));
        assert!(!state.has_item("key"));

        // Removing again should return false
        assert!(!state.remove_item("key"));
    }

    #[test]
    fn inventory_ignores_case() {
        let mut state = SessionState::new("start1");
        state.add_item("Lantern");
        assert!(state.has_item("lantern"));
        assert!(!state.add_item("LANTERN"));
        assert!(state.remove_item("lantern"));
        assert!(state.inventory().is_empty());
    }

    #[test]
    fn inventory_keeps_acquisition_order() {
        let mut state = SessionState::new("start1");
        state.add_item("rope");
        state.add_item("apple");
        state.add_item("map");
        state.remove_item("apple");
        state.add_item("apple");
        assert_eq!(state.inventory(), ["rope", "map", "apple"]);
    }

    #[test]
    fn visited_flags() {
        let mut state = SessionState::new("start1");
        state.mark_visited("hall");
        assert!(state.is_visited("hall"));
        assert!(!state.is_visited("start1"));
    }

    #[test]
    fn restart_clears_but_keeps_turns() {
        let mut state = SessionState::new("start1");
        state.set_current_scene("pit");
        state.add_item("rope");
        state.mark_visited("hall");
        state.advance_turn();
        state.advance_turn();

        state.restart("start1");

        assert_eq!(state.current_scene(), "start1");
        assert!(state.inventory().is_empty());
        assert!(!state.is_visited("hall"));
        assert_eq!(state.turn_count(), 2);
        assert_eq!(state.deaths(), 1);
    }
}
