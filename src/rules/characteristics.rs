//! Effective characteristics of permanents.
//!
//! Effective power/toughness = printed value + counters + "until end of
//! turn" modifications + bonuses from attached auras. Marked damage is not
//! subtracted; state-based actions compare it against toughness.

use crate::cards::{CardCatalog, CardInstance};
use crate::core::GameState;

/// Bonus from auras attached to `card`, as `(power, toughness)`.
#[must_use]
pub fn aura_bonus(state: &GameState, catalog: &CardCatalog, card: &CardInstance) -> (i32, i32) {
    card.attachments
        .iter()
        .filter_map(|id| state.battlefield_card(*id))
        .filter_map(|aura| catalog.get(aura.card_id).and_then(|t| t.aura_bonus))
        .fold((0, 0), |(p, t), bonus| (p + bonus.power, t + bonus.toughness))
}

/// Current power.
#[must_use]
pub fn effective_power(state: &GameState, catalog: &CardCatalog, card: &CardInstance) -> i32 {
    let base = catalog.get(card.card_id).map_or(0, |t| t.base_power());
    base + card.counter_bonus() + card.temporary_bonus().0 + aura_bonus(state, catalog, card).0
}

/// Current toughness.
#[must_use]
pub fn effective_toughness(state: &GameState, catalog: &CardCatalog, card: &CardInstance) -> i32 {
    let base = catalog.get(card.card_id).map_or(0, |t| t.base_toughness());
    base + card.counter_bonus() + card.temporary_bonus().1 + aura_bonus(state, catalog, card).1
}

/// Whether marked damage is lethal.
#[must_use]
pub fn has_lethal_damage(state: &GameState, catalog: &CardCatalog, card: &CardInstance) -> bool {
    card.damage > 0 && card.damage >= effective_toughness(state, catalog, card)
}
