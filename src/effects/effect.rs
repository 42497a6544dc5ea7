//! Effect definitions.
//!
//! Abilities are discrete coded effects, not parsed rules text. Each card
//! template names at most one spell effect, and each activated ability
//! names one effect. Effects that need targets describe them through
//! [`Effect::target_requirement`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::targeting::{TargetKind, TargetRequirement, TargetRestriction};
use crate::cards::{CardType, CounterKind};

/// A number on a card: fixed, or the spell's X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amount {
    Fixed(i32),
    X,
}

impl Amount {
    /// The value once X is known.
    #[must_use]
    pub const fn resolve(self, x_value: u32) -> i32 {
        match self {
            Amount::Fixed(n) => n,
            Amount::X => x_value as i32,
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Fixed(n) => write!(f, "{n}"),
            Amount::X => f.write_str("X"),
        }
    }
}

/// A coded effect.
///
/// ## Targeted
///
/// - `DealDamage`: damage to a creature, player, or either
/// - `PumpTarget`: +N/+N until end of turn
/// - `AddCounters`: counters on a creature
/// - `CounterSpell`: counter a spell on the stack
/// - `DestroyCreature`: destroy, with optional restrictions
/// - `TargetPlayerDraws`, `GainLife`, `TargetPlayerSacrifices`
/// - `Enchant`: an aura spell attaching to a creature
///
/// ## Untargeted
///
/// - `PumpSelf`: the source gets +N/+N until end of turn
/// - `DrawCards`: the controller draws
/// - `SearchBasicLand`: a basic land from library onto the battlefield tapped
/// - `CreateTokens`: tokens by catalog name
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    DealDamage {
        amount: Amount,
        target: TargetKind,
    },
    PumpTarget {
        power: i32,
        toughness: i32,
    },
    PumpSelf {
        power: i32,
        toughness: i32,
    },
    AddCounters {
        counter: CounterKind,
        count: u32,
    },
    CounterSpell,
    DestroyCreature {
        restrictions: SmallVec<[TargetRestriction; 2]>,
    },
    DrawCards {
        count: u32,
    },
    TargetPlayerDraws {
        count: u32,
    },
    GainLife {
        amount: Amount,
    },
    SearchBasicLand,
    CreateTokens {
        token: String,
        count: u32,
    },
    TargetPlayerSacrifices {
        card_type: CardType,
    },
    Enchant,
}

impl Effect {
    /// Damage to any target (creature or player).
    #[must_use]
    pub fn damage(amount: i32) -> Self {
        Effect::DealDamage {
            amount: Amount::Fixed(amount),
            target: TargetKind::Any,
        }
    }

    /// X damage to any target.
    #[must_use]
    pub fn damage_x() -> Self {
        Effect::DealDamage {
            amount: Amount::X,
            target: TargetKind::Any,
        }
    }

    /// Target creature gets +power/+toughness until end of turn.
    #[must_use]
    pub fn pump(power: i32, toughness: i32) -> Self {
        Effect::PumpTarget { power, toughness }
    }

    /// Destroy target creature with restrictions.
    #[must_use]
    pub fn destroy(restrictions: &[TargetRestriction]) -> Self {
        Effect::DestroyCreature {
            restrictions: SmallVec::from_slice(restrictions),
        }
    }

    /// The targets this effect needs, if any.
    #[must_use]
    pub fn target_requirement(&self) -> Option<TargetRequirement> {
        let requirement = match self {
            Effect::DealDamage { target, .. } => TargetRequirement::single(*target),
            Effect::PumpTarget { .. } | Effect::AddCounters { .. } | Effect::Enchant => {
                TargetRequirement::single(TargetKind::Creature)
            }
            Effect::CounterSpell => TargetRequirement::single(TargetKind::Spell),
            Effect::DestroyCreature { restrictions } => {
                TargetRequirement::single(TargetKind::Creature).with_restrictions(restrictions)
            }
            Effect::TargetPlayerDraws { .. }
            | Effect::GainLife { .. }
            | Effect::TargetPlayerSacrifices { .. } => TargetRequirement::single(TargetKind::Player),
            Effect::PumpSelf { .. }
            | Effect::DrawCards { .. }
            | Effect::SearchBasicLand
            | Effect::CreateTokens { .. } => return None,
        };
        Some(requirement)
    }

    /// Whether the effect reads X.
    #[must_use]
    pub fn uses_x(&self) -> bool {
        matches!(
            self,
            Effect::DealDamage { amount: Amount::X, .. } | Effect::GainLife { amount: Amount::X }
        )
    }
}
