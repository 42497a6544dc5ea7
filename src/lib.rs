//! # manacore
//!
//! A deterministic, headless rules engine for a two-player collectible card
//! game, built for search bots and high-throughput simulation.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `apply_action(state, action)` returns a new
//!    snapshot and never mutates its input.
//!
//! 2. **Validate ⇔ apply**: an action applies exactly when
//!    `validate_action` reports no violations, and every action
//!    `legal_actions` returns validates.
//!
//! 3. **Determinism**: the only randomness is a seeded RNG stored in the
//!    state. Same seed, same decks, same actions: same game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: zones, the stack and the history are
//!   `im` vectors, so a snapshot per action costs O(1) to clone.
//!
//! - **Injected card data**: the [`CardCatalog`] is shared read-only by the
//!   engine; game states only hold catalog ids.
//!
//! ## Modules
//!
//! - `core`: ids, players, state, actions, RNG, configuration, errors
//! - `zones`: zone movement
//! - `cards`: card templates, the catalog and the built-in core set
//! - `abilities`: activated abilities
//! - `mana`: costs, pools and auto-tap
//! - `effects`: coded spell effects and targeting
//! - `stack`: stack objects, priority and resolution
//! - `combat`: declarations, evasion and damage
//! - `rules`: the `Engine`: validator, reducer, turns, enumerator, replay
//! - `sim`: bots and a simulation driver
//!
//! ## Example
//!
//! ```
//! use manacore::{Action, Engine, PlayerId, RulesEngine};
//!
//! let engine = Engine::with_core_set();
//! let deck: Vec<&str> = ["Mountain", "Shock"].iter().cycle().take(20).copied().collect();
//! let state = engine.initialize_game(&deck, &deck, 7).unwrap();
//!
//! let next = engine.apply_action(&state, &Action::untap(PlayerId::Player)).unwrap();
//! assert_eq!(next.turn_count, 1);
//! assert!(!engine.legal_actions(&next, PlayerId::Player).is_empty());
//! ```

pub mod core;
pub mod zones;
pub mod cards;
pub mod abilities;
pub mod mana;
pub mod effects;
pub mod stack;
pub mod combat;
pub mod rules;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, ActionType, Block, EngineConfig, ErrorKind, GameRng, GameState,
    InstanceId, InvalidAction, ManaPoolEmptying, PlayerId, PlayerMap, ReplayError, SetupError, StackObjectId,
    Step, Target, ValidationError,
};

pub use crate::zones::{Zone, ZonePosition};

pub use crate::cards::{CardCatalog, CardId, CardInstance, CardTemplate, CardType, Color, Keyword};

pub use crate::mana::{ManaCost, ManaPool, ManaType};

pub use crate::effects::{Effect, TargetKind, TargetRequirement};

pub use crate::stack::{ResolutionOutcome, StackObject};

pub use crate::rules::{ActionLog, Engine, GameResult, RulesEngine};

pub use crate::sim::{play_game, Bot, RandomBot, SimConfig, SimulationResult};
