//! Activated abilities.
//!
//! An ability is a cost and an effect. Mana abilities (`AddMana`) resolve
//! immediately; every other ability goes on the stack.
//!
//! Basic land types carry an intrinsic `{T}: Add {color}` ability, added to
//! the template when it is built, so every ability a permanent has is in
//! `template.abilities` and addressed by its index there.

use serde::{Deserialize, Serialize};

use crate::cards::CardTemplate;
use crate::core::AbilityIndex;
use crate::effects::Effect;
use crate::mana::{ManaCost, ManaProduction};

/// The cost of an activated ability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityCost {
    /// `{T}`: tap the source.
    pub tap: bool,
    /// Mana paid via the pool and auto-tap.
    pub mana: ManaCost,
    /// Sacrifice the source.
    pub sacrifice_self: bool,
}

impl AbilityCost {
    /// `{T}` and nothing else.
    #[must_use]
    pub fn tap() -> Self {
        Self {
            tap: true,
            ..Self::default()
        }
    }

    /// A mana cost and nothing else.
    #[must_use]
    pub fn mana(cost: ManaCost) -> Self {
        Self {
            mana: cost,
            ..Self::default()
        }
    }

    /// Sacrifice the source and nothing else.
    #[must_use]
    pub fn sacrifice() -> Self {
        Self {
            sacrifice_self: true,
            ..Self::default()
        }
    }

    /// Whether the cost is exactly `{T}`.
    #[must_use]
    pub fn is_tap_only(&self) -> bool {
        self.tap && self.mana.is_zero() && !self.sacrifice_self
    }
}

impl std::fmt::Display for AbilityCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.mana.is_zero() {
            parts.push(self.mana.to_string());
        }
        if self.tap {
            parts.push("{T}".to_string());
        }
        if self.sacrifice_self {
            parts.push("Sacrifice".to_string());
        }
        f.write_str(&parts.join(", "))
    }
}

/// What an ability does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityEffect {
    /// A mana ability. `damage` is dealt to the controller when it makes
    /// colored mana.
    AddMana {
        production: ManaProduction,
        damage: u32,
    },
    /// A stack ability.
    Resolve(Effect),
}

/// One activated ability on a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityDef {
    pub cost: AbilityCost,
    pub effect: AbilityEffect,
}

impl AbilityDef {
    /// `{T}: Add ...`.
    #[must_use]
    pub fn tap_for(production: ManaProduction) -> Self {
        Self {
            cost: AbilityCost::tap(),
            effect: AbilityEffect::AddMana {
                production,
                damage: 0,
            },
        }
    }

    /// `{T}: Add ...`, dealing `damage` to the controller for colored mana.
    #[must_use]
    pub fn painful_tap_for(production: ManaProduction, damage: u32) -> Self {
        Self {
            cost: AbilityCost::tap(),
            effect: AbilityEffect::AddMana { production, damage },
        }
    }

    /// A stack ability.
    #[must_use]
    pub fn new(cost: AbilityCost, effect: Effect) -> Self {
        Self {
            cost,
            effect: AbilityEffect::Resolve(effect),
        }
    }

    /// Whether this is a mana ability.
    #[must_use]
    pub fn is_mana_ability(&self) -> bool {
        matches!(self.effect, AbilityEffect::AddMana { .. })
    }

    /// The stack effect, for non-mana abilities.
    #[must_use]
    pub fn stack_effect(&self) -> Option<&Effect> {
        match &self.effect {
            AbilityEffect::Resolve(effect) => Some(effect),
            AbilityEffect::AddMana { .. } => None,
        }
    }
}

/// The abilities of a permanent, in index order.
#[must_use]
pub fn abilities_for(template: &CardTemplate) -> &[AbilityDef] {
    &template.abilities
}

/// Look up one ability of a permanent.
#[must_use]
pub fn ability_of<'a>(template: &'a CardTemplate, index: AbilityIndex) -> Option<&'a AbilityDef> {
    template.abilities.get(index.0 as usize)
}

/// Every ability paired with its index.
pub fn indexed_abilities(template: &CardTemplate) -> impl Iterator<Item = (AbilityIndex, &AbilityDef)> {
    template
        .abilities
        .iter()
        .enumerate()
        .map(|(i, ability)| (AbilityIndex(i as u8), ability))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::mana::{parse_mana_cost, ManaType};

    #[test]
    fn test_basic_land_has_intrinsic_mana_ability() {
        let catalog = CardCatalog::core_set();
        let forest = catalog.get_by_name("Forest").unwrap();

        let abilities = abilities_for(forest);
        assert_eq!(abilities.len(), 1);
        assert!(abilities[0].is_mana_ability());
        assert!(abilities[0].cost.is_tap_only());
        assert_eq!(
            abilities[0].effect,
            AbilityEffect::AddMana {
                production: ManaProduction::single(ManaType::Green),
                damage: 0
            }
        );
    }

    #[test]
    fn test_prodigal_sorcerer_pings() {
        let catalog = CardCatalog::core_set();
        let sorcerer = catalog.get_by_name("Prodigal Sorcerer").unwrap();

        let ability = ability_of(sorcerer, AbilityIndex(0)).unwrap();
        assert!(!ability.is_mana_ability());
        assert_eq!(ability.stack_effect(), Some(&Effect::damage(1)));
        assert!(ability_of(sorcerer, AbilityIndex(1)).is_none());
    }

    #[test]
    fn test_cost_display() {
        let cost = AbilityCost {
            tap: true,
            mana: parse_mana_cost("{1}{R}").unwrap(),
            sacrifice_self: false,
        };
        assert_eq!(cost.to_string(), "{1}{R}, {T}");
        assert_eq!(AbilityCost::sacrifice().to_string(), "Sacrifice");
        assert!(!AbilityCost::sacrifice().is_tap_only());
    }
}
