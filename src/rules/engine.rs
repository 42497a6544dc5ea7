//! The rules engine.
//!
//! `Engine` bundles the injected card catalog and rules configuration. Its
//! operations are spread over the `rules` submodules:
//!
//! - `validate_action`: [`validator`](super::validator)
//! - `apply_action`: [`reducer`](super::reducer)
//! - `legal_actions`: [`enumerator`](super::enumerator)
//! - `initialize_game`: [`setup`](super::setup)
//! - `describe_action`: [`describe`](super::describe)
//! - `replay`: [`replay`](super::replay)
//!
//! `RulesEngine` is the seam bots and simulators program against.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::CardCatalog;
use crate::core::{Action, EngineConfig, GameState, InvalidAction, PlayerId, Step, ValidationError};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players lost at once.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_action` never mutates its input and is deterministic
/// - every action `legal_actions` returns passes `validate_action`
/// - `is_terminal` returns `None` while the game continues
pub trait RulesEngine {
    /// Every rule `action` violates. Empty means legal.
    fn validate_action(&self, state: &GameState, action: &Action) -> Vec<ValidationError>;

    /// Apply a legal action, producing the next state.
    fn apply_action(&self, state: &GameState, action: &Action) -> Result<GameState, InvalidAction>;

    /// Every action `player` could legally take now.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// The player expected to act next, if any.
    fn acting_player(&self, state: &GameState) -> Option<PlayerId> {
        if self.is_terminal(state).is_some() {
            return None;
        }
        if let Some(pending) = state.pending_sacrifice {
            return Some(pending.player);
        }
        match state.step {
            Step::Untap => Some(state.active_player),
            Step::Draw if !state.draw_taken => Some(state.active_player),
            _ => Some(state.priority_player),
        }
    }
}

/// The rules engine: a card catalog plus rules configuration.
///
/// Cheap to clone; the catalog is shared.
#[derive(Clone, Debug)]
pub struct Engine {
    catalog: Arc<CardCatalog>,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// An engine over the built-in core set with default rules.
    #[must_use]
    pub fn with_core_set() -> Self {
        Self::new(Arc::new(CardCatalog::core_set()), EngineConfig::default())
    }

    /// The card catalog.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// A shared handle to the card catalog.
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<CardCatalog> {
        Arc::clone(&self.catalog)
    }

    /// The rules configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl RulesEngine for Engine {
    fn validate_action(&self, state: &GameState, action: &Action) -> Vec<ValidationError> {
        Engine::validate_action(self, state, action)
    }

    fn apply_action(&self, state: &GameState, action: &Action) -> Result<GameState, InvalidAction> {
        Engine::apply_action(self, state, action)
    }

    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        Engine::legal_actions(self, state, player)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if !state.game_over {
            return None;
        }
        Some(match state.winner {
            Some(player) => GameResult::Winner(player),
            None => GameResult::Draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::Opponent);
        assert!(!result.is_winner(PlayerId::Player));
        assert!(result.is_winner(PlayerId::Opponent));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::Player));
    }

    #[test]
    fn test_is_terminal() {
        let engine = Engine::with_core_set();
        let mut state = GameState::new(1, 20);
        assert_eq!(engine.is_terminal(&state), None);
        assert_eq!(engine.acting_player(&state), Some(PlayerId::Player));

        state.end_game(None);
        assert_eq!(engine.is_terminal(&state), Some(GameResult::Draw));
        assert_eq!(engine.acting_player(&state), None);

        state.winner = Some(PlayerId::Opponent);
        assert_eq!(engine.is_terminal(&state), Some(GameResult::Winner(PlayerId::Opponent)));
    }
}
