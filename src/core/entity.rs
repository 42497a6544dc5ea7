//! Identity types for game objects.
//!
//! Every card instance and stack object has a stable numeric id allocated
//! from counters held in `GameState`:
//! - `InstanceId`: a card for its whole lifetime, across zone moves
//! - `StackObjectId`: a spell or ability while it is on the stack
//!
//! `Target` is the union of everything a spell or ability may point at.
//!
//! ## Usage
//!
//! ```
//! use manacore::core::{InstanceId, PlayerId, Target};
//!
//! let bear = Target::Card(InstanceId(12));
//! let face = Target::Player(PlayerId::Opponent);
//!
//! assert_eq!(bear.as_card(), Some(InstanceId(12)));
//! assert_eq!(face.as_player(), Some(PlayerId::Opponent));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Stable identity of a card instance.
///
/// Identity persists when the card changes zones; a card that moves from
/// hand to stack to battlefield to graveyard keeps the same `InstanceId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of an object on the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StackObjectId(pub u32);

impl StackObjectId {
    /// Create a new stack object ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StackObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stack({})", self.0)
    }
}

/// Anything a spell or ability can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A card instance (normally a permanent on the battlefield).
    Card(InstanceId),
    /// A player.
    Player(PlayerId),
    /// A spell or ability on the stack.
    StackObject(StackObjectId),
}

impl Target {
    /// The card instance, if this targets a card.
    #[must_use]
    pub const fn as_card(self) -> Option<InstanceId> {
        match self {
            Target::Card(id) => Some(id),
            _ => None,
        }
    }

    /// The player, if this targets a player.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        match self {
            Target::Player(player) => Some(player),
            _ => None,
        }
    }

    /// The stack object, if this targets the stack.
    #[must_use]
    pub const fn as_stack_object(self) -> Option<StackObjectId> {
        match self {
            Target::StackObject(id) => Some(id),
            _ => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Card(id) => write!(f, "card {id}"),
            Target::Player(player) => write!(f, "{player}"),
            Target::StackObject(id) => write!(f, "{id}"),
        }
    }
}
