//! Core engine types: ids, players, state, actions, RNG, configuration, errors.
//!
//! Everything here is plain data. Rules live in [`crate::rules`].

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use entity::{InstanceId, StackObjectId, Target};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{EngineConfig, ManaPoolEmptying};
pub use error::{ErrorKind, InvalidAction, ManaError, ReplayError, SetupError, ValidationError};
pub use action::{AbilityIndex, Action, ActionKind, ActionRecord, ActionType, Block, Targets};
pub use state::{CombatState, GameState, PendingSacrifice, Phase, PlayerState, Step};
