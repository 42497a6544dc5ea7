//! Error types.
//!
//! - `ValidationError`: one violated rule, reported by the validator
//! - `InvalidAction`: returned by the reducer, wraps every violated rule
//! - `ManaError`: mana cost parsing and payment invariant violations
//! - `SetupError`: game construction failures
//! - `ReplayError`: action log decoding or re-application failures
//!
//! Validation messages name the violated rule or keyword verbatim
//! ("Flying", "Menace", "tapped", "not attacking", "Defender", ...)
//! because callers match on substrings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;

/// Category of a validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced card, ability, or stack object does not exist.
    NotFound,
    /// The referenced card is in the wrong zone.
    WrongZone,
    /// Phase, step, stack, or turn-ownership timing is wrong.
    WrongTiming,
    /// Not enough mana, lands already played, or a cost cannot be paid.
    InsufficientResource,
    /// A target is missing, duplicated, or illegal.
    IllegalTarget,
    /// The acting player does not hold priority.
    PriorityViolation,
    /// An attack or block declaration breaks a combat rule.
    IllegalCombat,
    /// A payload value is malformed (negative X, bad color choice, ...).
    InvalidPayload,
    /// The game has already ended.
    GameOver,
}

/// A single violated rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Rule category.
    pub kind: ErrorKind,
    /// Human-readable, rule-named description.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether the message mentions `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.contains(needle)
    }
}

/// The reducer refused an action. No state was changed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid action: {}", join_messages(.errors))]
pub struct InvalidAction {
    /// Every rule the action violated.
    pub errors: Vec<ValidationError>,
}

impl InvalidAction {
    /// Wrap a validator error list.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Whether any error mentions `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.mentions(needle))
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Mana cost parsing and payment failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ManaError {
    /// The cost string contains an unsupported symbol.
    #[error("unsupported mana symbol '{symbol}' in \"{cost}\"")]
    UnsupportedSymbol { symbol: String, cost: String },

    /// The cost string is not a sequence of `{...}` symbols.
    #[error("malformed mana cost \"{0}\"")]
    Malformed(String),

    /// Payment was attempted without a prior affordability check.
    #[error("cannot pay {cost} from pool {pool}")]
    Unaffordable { cost: String, pool: String },
}

/// Game construction failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// A deck references a card that is not in the catalog.
    #[error("unknown card '{0}'")]
    UnknownCard(String),

    /// A deck is too small to draw an opening hand.
    #[error("{player}'s deck has {size} cards, need at least {required}")]
    DeckTooSmall {
        player: PlayerId,
        size: usize,
        required: usize,
    },
}

/// Replay failures.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The log could not be set up.
    #[error("replay setup failed: {0}")]
    Setup(#[from] SetupError),

    /// An action in the log was rejected.
    #[error("action {index} rejected: {source}")]
    Rejected {
        index: usize,
        #[source]
        source: InvalidAction,
    },

    /// The binary log could not be decoded.
    #[error("could not decode action log: {0}")]
    Decode(#[from] bincode::Error),

    /// The JSON log could not be decoded.
    #[error("could not decode action log: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorKind::IllegalCombat, "Cannot block a creature with Flying");
        assert_eq!(err.to_string(), "Cannot block a creature with Flying");
        assert!(err.mentions("Flying"));
    }

    #[test]
    fn test_invalid_action_joins_messages() {
        let err = InvalidAction::new(vec![
            ValidationError::new(ErrorKind::PriorityViolation, "Opponent does not have priority"),
            ValidationError::new(ErrorKind::WrongZone, "Card #4 is not in hand"),
        ]);

        assert_eq!(
            err.to_string(),
            "invalid action: Opponent does not have priority; Card #4 is not in hand"
        );
        assert!(err.mentions("priority"));
        assert!(!err.mentions("Flying"));
    }

    #[test]
    fn test_mana_error_display() {
        let err = ManaError::UnsupportedSymbol {
            symbol: "W/U".into(),
            cost: "{W/U}".into(),
        };
        assert!(err.to_string().contains("W/U"));
    }
}
