//! Engine configuration.
//!
//! Rules parameters that vary between formats or experiments live here
//! rather than in the rules code. Every field has a default so a partial
//! JSON document is enough:
//!
//! ```
//! use manacore::core::{EngineConfig, ManaPoolEmptying};
//!
//! let config = EngineConfig::from_json(r#"{ "starting_life": 30 }"#).unwrap();
//! assert_eq!(config.starting_life, 30);
//! assert_eq!(config.max_hand_size, 7);
//! assert_eq!(config.mana_pool_empties, ManaPoolEmptying::EndOfStep);
//! ```

use serde::{Deserialize, Serialize};

/// When unspent mana leaves a player's pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManaPoolEmptying {
    /// Pools empty whenever the step changes. Mana survives priority
    /// exchanges inside one step.
    EndOfStep,
    /// Pools empty only during cleanup.
    EndOfTurn,
}

/// Rules parameters for an [`Engine`](crate::rules::Engine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Life total each player starts with.
    pub starting_life: i32,

    /// Cards drawn into the opening hand.
    pub opening_hand_size: usize,

    /// Hand size enforced during cleanup.
    pub max_hand_size: usize,

    /// Lands a player may play per turn.
    pub lands_per_turn: u8,

    /// Whether the starting player skips the draw on turn 1.
    pub skip_first_draw: bool,

    /// Mana pool emptying boundary.
    pub mana_pool_empties: ManaPoolEmptying,

    /// Whether the legal-action enumerator lists mana abilities.
    ///
    /// Spells and abilities auto-tap for mana, so bots normally never
    /// need to activate mana abilities by hand.
    pub enumerate_mana_abilities: bool,

    /// Upper bound on attack subsets / block assignments enumerated in full.
    pub max_enumerated_combinations: usize,

    /// Largest X value the enumerator will offer.
    pub max_x_value: u32,

    /// Ceiling on state-based action passes after a single action.
    pub max_state_based_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            opening_hand_size: 7,
            max_hand_size: 7,
            lands_per_turn: 1,
            skip_first_draw: true,
            mana_pool_empties: ManaPoolEmptying::EndOfStep,
            enumerate_mana_abilities: false,
            max_enumerated_combinations: 256,
            max_x_value: 20,
            max_state_based_iterations: 64,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
