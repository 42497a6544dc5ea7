//! Stack objects.
//!
//! A `StackObject` is a spell or an activated ability waiting to resolve.
//! Countering does not remove an object: it is marked `Countered` and still
//! resolves in its turn, as a no-op. Nested counter wars depend on this.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardInstance, Color};
use crate::core::{AbilityIndex, InstanceId, PlayerId, StackObjectId, Targets};
use crate::effects::Effect;

/// What is on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackItem {
    /// The card itself is being cast.
    Spell,
    /// An activated ability of a permanent.
    Ability {
        source: InstanceId,
        ability: AbilityIndex,
        effect: Effect,
    },
}

/// Resolution state of a stack object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackObjectStatus {
    /// Waiting to resolve.
    Pending,
    /// Countered; resolves as a no-op.
    Countered,
}

/// How a stack object left the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionOutcome {
    /// The effect was applied.
    Resolved,
    /// The object had been countered and did nothing.
    Countered,
    /// Every target was illegal; the object did nothing.
    Fizzled,
}

impl std::fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResolutionOutcome::Resolved => "resolved",
            ResolutionOutcome::Countered => "countered",
            ResolutionOutcome::Fizzled => "fizzled",
        };
        f.write_str(name)
    }
}

/// A spell or ability on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackObject {
    pub id: StackObjectId,
    pub controller: PlayerId,
    /// The spell card, or a snapshot of the ability's source.
    pub card: CardInstance,
    pub item: StackItem,
    pub targets: Targets,
    /// Announced X, zero when the cost has none.
    pub x_value: u32,
    pub status: StackObjectStatus,
}

impl StackObject {
    /// A spell cast from hand.
    #[must_use]
    pub fn spell(id: StackObjectId, controller: PlayerId, card: CardInstance, targets: Targets, x_value: u32) -> Self {
        Self {
            id,
            controller,
            card,
            item: StackItem::Spell,
            targets,
            x_value,
            status: StackObjectStatus::Pending,
        }
    }

    /// An activated ability of `source`.
    #[must_use]
    pub fn ability(
        id: StackObjectId,
        controller: PlayerId,
        source: CardInstance,
        ability: AbilityIndex,
        effect: Effect,
        targets: Targets,
        x_value: u32,
    ) -> Self {
        Self {
            id,
            controller,
            item: StackItem::Ability {
                source: source.instance_id,
                ability,
                effect,
            },
            card: source,
            targets,
            x_value,
            status: StackObjectStatus::Pending,
        }
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.item, StackItem::Spell)
    }

    #[must_use]
    pub fn is_countered(&self) -> bool {
        self.status == StackObjectStatus::Countered
    }

    /// The effect this object applies on resolution.
    ///
    /// Creature and artifact spells have none.
    #[must_use]
    pub fn effect<'a>(&'a self, catalog: &'a CardCatalog) -> Option<&'a Effect> {
        match &self.item {
            StackItem::Spell => catalog.get(self.card.card_id).and_then(|t| t.effect.as_ref()),
            StackItem::Ability { effect, .. } => Some(effect),
        }
    }

    /// Colors of the object's source, for protection checks.
    #[must_use]
    pub fn source_colors<'a>(&self, catalog: &'a CardCatalog) -> &'a [Color] {
        catalog
            .get(self.card.card_id)
            .map_or(&[], |t| t.colors.as_slice())
    }
}
