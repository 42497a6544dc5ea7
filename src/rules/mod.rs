//! The rules engine: validation, state transitions, turn structure and
//! legal action enumeration.
//!
//! ## Key Types
//!
//! - `Engine`: card catalog plus configuration; every rules operation
//! - `RulesEngine`: the trait bots and simulators program against
//! - `ActionLog`: seed, decks and actions for deterministic replay

pub mod characteristics;
mod describe;
pub mod engine;
mod enumerator;
mod reducer;
mod replay;
mod sba;
mod setup;
mod turn;
mod validator;

pub use characteristics::{aura_bonus, effective_power, effective_toughness, has_lethal_damage};
pub use engine::{Engine, GameResult, RulesEngine};
pub use replay::ActionLog;
