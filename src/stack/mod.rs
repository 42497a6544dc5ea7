//! The stack and the priority protocol.
//!
//! ## Example Usage
//!
//! ```
//! use manacore::cards::CardCatalog;
//! use manacore::core::{GameState, PlayerId, Target};
//! use manacore::stack::{resolve_top, ResolutionOutcome, StackObject};
//! use manacore::zones::Zone;
//!
//! let catalog = CardCatalog::core_set();
//! let mut state = GameState::new(42, 20);
//!
//! let bolt = catalog.get_by_name("Lightning Bolt").unwrap().id;
//! let card = state.create_card(bolt, PlayerId::Player, Zone::Hand);
//! let card = state.take_card(card).unwrap();
//! let id = state.alloc_stack_id();
//! let targets = [Target::Player(PlayerId::Opponent)].into_iter().collect();
//! state.push_stack_object(StackObject::spell(id, PlayerId::Player, card, targets, 0));
//!
//! let (_, outcome) = resolve_top(&mut state, &catalog).unwrap();
//! assert_eq!(outcome, ResolutionOutcome::Resolved);
//! assert_eq!(state.player(PlayerId::Opponent).life, 17);
//! ```

mod object;
mod priority;

pub use object::{ResolutionOutcome, StackItem, StackObject, StackObjectStatus};
pub use priority::{resolve_top, PassOutcome, PASSES_TO_PROCEED};
