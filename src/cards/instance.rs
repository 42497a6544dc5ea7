//! Card instances - runtime card state.
//!
//! `CardInstance` represents a specific card in a game at a specific moment.
//! It tracks mutable state like damage, counters, and current zone. Static
//! data lives in the [`CardTemplate`](super::CardTemplate) it points at.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::template::CardId;
use crate::core::{InstanceId, PlayerId};
use crate::zones::Zone;

/// Counter kinds that modify power and toughness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    PlusOnePlusOne,
    MinusOneMinusOne,
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterKind::PlusOnePlusOne => f.write_str("+1/+1"),
            CounterKind::MinusOneMinusOne => f.write_str("-1/-1"),
        }
    }
}

/// An "until end of turn" power/toughness change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporaryModification {
    pub power_change: i32,
    pub toughness_change: i32,
}

/// A card instance in a game.
///
/// Identity (`instance_id`) persists across zone moves; everything else
/// that describes the card's situation on the battlefield is reset when it
/// changes zones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Stable identity for the instance's lifetime.
    pub instance_id: InstanceId,

    /// Reference into the card catalog. Never mutated.
    pub card_id: CardId,

    /// Current zone.
    pub zone: Zone,

    /// Who started the game with this card.
    pub owner: PlayerId,

    /// Who currently controls it.
    pub controller: PlayerId,

    pub tapped: bool,

    /// Entered the battlefield this turn under its controller.
    pub summoning_sick: bool,

    /// Marked damage. Cleared at cleanup.
    pub damage: i32,

    pub counters: SmallVec<[(CounterKind, u32); 2]>,

    /// Host permanent, for auras.
    pub attached_to: Option<InstanceId>,

    /// Auras attached to this permanent.
    pub attachments: SmallVec<[InstanceId; 2]>,

    /// Expire during cleanup.
    pub temporary_modifications: SmallVec<[TemporaryModification; 2]>,

    /// Declared as an attacker this combat.
    pub attacking: bool,

    /// The attacker this creature blocks.
    pub blocking: Option<InstanceId>,

    pub is_token: bool,

    /// Token name, for tokens.
    pub token_type: Option<String>,
}

impl CardInstance {
    /// Create a card instance owned and controlled by `owner`.
    #[must_use]
    pub fn new(instance_id: InstanceId, card_id: CardId, owner: PlayerId, zone: Zone) -> Self {
        Self {
            instance_id,
            card_id,
            zone,
            owner,
            controller: owner,
            tapped: false,
            summoning_sick: zone == Zone::Battlefield,
            damage: 0,
            counters: SmallVec::new(),
            attached_to: None,
            attachments: SmallVec::new(),
            temporary_modifications: SmallVec::new(),
            attacking: false,
            blocking: None,
            is_token: false,
            token_type: None,
        }
    }

    /// Number of counters of `kind`.
    #[must_use]
    pub fn counter(&self, kind: CounterKind) -> u32 {
        self.counters
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, n)| *n)
    }

    /// Add counters of `kind`.
    pub fn add_counters(&mut self, kind: CounterKind, count: u32) {
        match self.counters.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += count,
            None => self.counters.push((kind, count)),
        }
    }

    /// Net power/toughness change from counters.
    #[must_use]
    pub fn counter_bonus(&self) -> i32 {
        self.counter(CounterKind::PlusOnePlusOne) as i32
            - self.counter(CounterKind::MinusOneMinusOne) as i32
    }

    /// Add an "until end of turn" modification.
    pub fn pump(&mut self, power: i32, toughness: i32) {
        self.temporary_modifications.push(TemporaryModification {
            power_change: power,
            toughness_change: toughness,
        });
    }

    /// Sum of temporary modifications as `(power, toughness)`.
    #[must_use]
    pub fn temporary_bonus(&self) -> (i32, i32) {
        self.temporary_modifications
            .iter()
            .fold((0, 0), |(p, t), m| (p + m.power_change, t + m.toughness_change))
    }

    /// Leave combat.
    pub fn clear_combat(&mut self) {
        self.attacking = false;
        self.blocking = None;
    }

    /// Forget everything tied to the previous zone.
    pub fn reset_for_zone_change(&mut self) {
        self.tapped = false;
        self.summoning_sick = true;
        self.damage = 0;
        self.counters.clear();
        self.attached_to = None;
        self.attachments.clear();
        self.temporary_modifications.clear();
        self.clear_combat();
    }
}
