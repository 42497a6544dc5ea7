//! Action logs and deterministic replay.
//!
//! A game is fully determined by its seed, both decklists and the actions
//! applied. `ActionLog` stores exactly that and round-trips through bincode
//! (compact) or JSON (readable).

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Action, GameState, ReplayError};

use super::engine::Engine;

/// Everything needed to reproduce a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    pub seed: u64,
    pub player_deck: Vec<String>,
    pub opponent_deck: Vec<String>,
    pub actions: Vec<Action>,
}

impl ActionLog {
    /// An empty log for a game about to start.
    #[must_use]
    pub fn new(seed: u64, player_deck: Vec<String>, opponent_deck: Vec<String>) -> Self {
        Self {
            seed,
            player_deck,
            opponent_deck,
            actions: Vec::new(),
        }
    }

    /// Append an applied action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Take the applied actions from a state's history.
    pub fn record_history(&mut self, state: &GameState) {
        self.actions = state.action_history.iter().map(|r| r.action.clone()).collect();
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Engine {
    /// Rebuild the game a log describes.
    ///
    /// Fails with the index of the first action the engine rejects.
    pub fn replay(&self, log: &ActionLog) -> Result<GameState, ReplayError> {
        let mut state = self.initialize_game(&log.player_deck, &log.opponent_deck, log.seed)?;
        for (index, action) in log.actions.iter().enumerate() {
            state = self
                .apply_action(&state, action)
                .map_err(|source| ReplayError::Rejected { index, source })?;
        }
        debug!("replayed {} action(s)", log.actions.len());
        Ok(state)
    }
}
