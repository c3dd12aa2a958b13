//! Keyed collection of independent game sessions.
//!
//! Sessions live for the process lifetime; there is no eviction. A fresh
//! state is generated on first reference through [`SessionStore::get_or_create`]
//! or unconditionally through [`SessionStore::reset`].

use log::info;
use rand::thread_rng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::board::{self, WordBank};
use crate::error::GameError;
use crate::game::GameState;

pub struct SessionStore {
    games: HashMap<String, GameState>,
    bank: WordBank,
}

impl SessionStore {
    pub fn new(bank: WordBank) -> Self {
        Self {
            games: HashMap::new(),
            bank,
        }
    }

    pub fn get(&self, id: &str) -> Option<&GameState> {
        self.games.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut GameState> {
        self.games.get_mut(id)
    }

    /// Returns the session, generating a fresh board on first reference.
    /// Board generation failure leaves no partial entry behind.
    pub fn get_or_create(&mut self, id: &str) -> Result<&mut GameState, GameError> {
        match self.games.entry(id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let grid = board::generate(&self.bank, &mut thread_rng())?;
                info!("Created new game: {}", id);
                Ok(entry.insert(GameState::new(grid)))
            }
        }
    }

    /// Replaces any existing session with a freshly generated one: new
    /// words, new assignments, turn back to red.
    pub fn reset(&mut self, id: &str) -> Result<&GameState, GameError> {
        let grid = board::generate(&self.bank, &mut thread_rng())?;
        info!("Reset game: {}", id);
        self.games.insert(id.to_string(), GameState::new(grid));
        Ok(&self.games[id])
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Team, GRID_SIZE};

    fn store() -> SessionStore {
        SessionStore::new(WordBank::built_in())
    }

    #[test]
    fn test_get_or_create_creates_once() {
        let mut store = store();
        assert!(store.get("main").is_none());

        store.get_or_create("main").unwrap();
        assert_eq!(store.len(), 1);

        // Second access returns the same instance, not a regenerated one
        let words = |store: &SessionStore| -> Vec<String> {
            store
                .get("main")
                .unwrap()
                .grid
                .iter()
                .map(|card| card.word.clone())
                .collect()
        };
        let first = words(&store);
        store.get_or_create("main").unwrap();
        assert_eq!(words(&store), first);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut store = store();
        store.get_or_create("alpha").unwrap();
        store.get_or_create("beta").unwrap();
        assert_eq!(store.len(), 2);

        store.get_mut("alpha").unwrap().end_turn("alpha");
        assert_eq!(store.get("alpha").unwrap().current_turn, Team::Blue);
        assert_eq!(store.get("beta").unwrap().current_turn, Team::Red);
    }

    #[test]
    fn test_reset_discards_existing_state() {
        let mut store = store();
        {
            let game = store.get_or_create("main").unwrap();
            game.end_turn("main");
            let first_unrevealed = 0;
            assert!(!game.grid[first_unrevealed].revealed);
        }

        let game = store.reset("main").unwrap();
        assert_eq!(game.current_turn, Team::Red);
        assert_eq!(game.grid.len(), GRID_SIZE);
        assert!(game.grid.iter().all(|card| !card.revealed));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_creates_missing_session() {
        let mut store = store();
        store.reset("fresh").unwrap();
        assert!(store.get("fresh").is_some());
    }

    #[test]
    fn test_failed_creation_stores_nothing() {
        let bank = WordBank::from_words(["one".to_string(), "two".to_string()]);
        let mut store = SessionStore::new(bank);

        assert!(store.get_or_create("main").is_err());
        assert!(store.get("main").is_none());
        assert!(store.is_empty());
    }
}
