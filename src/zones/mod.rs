//! Zones and zone movement.
//!
//! Every card instance is in exactly one zone. Hand, library, graveyard and
//! battlefield are stored per player in [`PlayerState`](crate::core::PlayerState);
//! cards on the stack live inside their [`StackObject`](crate::stack::StackObject).
//!
//! ## Key Types
//!
//! - `Zone`: where a card is
//! - `movement`: the only code that moves cards between zones

pub mod movement;

pub use movement::ZonePosition;

use serde::{Deserialize, Serialize};

/// Game zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Stack,
}

impl Zone {
    /// Whether cards in this zone are public.
    #[must_use]
    pub const fn is_public(self) -> bool {
        !matches!(self, Zone::Library | Zone::Hand)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Graveyard => "graveyard",
            Zone::Stack => "stack",
        };
        f.write_str(name)
    }
}
