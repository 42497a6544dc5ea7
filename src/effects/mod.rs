//! Effect system for spells and abilities.
//!
//! - `Effect`: the coded effects cards can have
//! - `TargetRequirement` / `TargetSelector`: target legality and enumeration
//! - `EffectResolver`: applies an effect to game state on resolution
//!
//! Effects are discrete coded behaviors, one per spell or ability. There is
//! no rules-text interpreter.

mod effect;
mod resolver;
mod targeting;

pub use effect::{Amount, Effect};
pub use resolver::{controls_type, deal_damage, destroy_permanent, EffectResolver, ResolveResult, ResolverContext};
pub use targeting::{
    get_all_legal_target_combinations, get_legal_targets, validate_targets, TargetKind, TargetRequirement,
    TargetRestriction, TargetSelector,
};
