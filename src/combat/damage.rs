//! Combat damage.
//!
//! All combat damage is assigned first and dealt simultaneously. Damage to
//! creatures is marked; damage to players reduces life. Lethal damage is
//! handled afterwards by state-based actions.
//!
//! - Unblocked attackers damage the defending player.
//! - A blocked attacker assigns lethal damage to its blockers in
//!   declaration order and puts the rest on the last one. If every blocker
//!   left combat it deals no damage.
//! - Protection from a color prevents damage from sources of that color.
//! - Lifelink: the source's controller gains the damage it dealt.

use log::{debug, trace};
use smallvec::SmallVec;

use crate::cards::{has_lifelink, CardCatalog, CardInstance};
use crate::core::{GameState, InstanceId, PlayerId, Target};
use crate::rules::characteristics::{effective_power, effective_toughness};

/// One assignment of combat damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageAssignment {
    pub source: InstanceId,
    pub target: Target,
    pub amount: i32,
}

/// Combat damage dealt in one damage step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatDamageReport {
    pub assignments: Vec<DamageAssignment>,
}

impl CombatDamageReport {
    /// Total damage dealt to `player`.
    #[must_use]
    pub fn damage_to_player(&self, player: PlayerId) -> i32 {
        self.assignments
            .iter()
            .filter(|a| a.target == Target::Player(player))
            .map(|a| a.amount)
            .sum()
    }
}

fn prevented(catalog: &CardCatalog, source: &CardInstance, recipient: &CardInstance) -> bool {
    let (Some(source_t), Some(recipient_t)) = (catalog.get(source.card_id), catalog.get(recipient.card_id)) else {
        return false;
    };
    recipient_t.keywords.protections().any(|c| source_t.has_color(c))
}

/// Work out every combat damage assignment without changing the state.
#[must_use]
pub fn assign_combat_damage(state: &GameState, catalog: &CardCatalog) -> Vec<DamageAssignment> {
    let mut assignments = Vec::new();
    let defender = state.defending_player();

    for attacker in state.player(state.active_player).battlefield.iter().filter(|c| c.attacking) {
        let power = effective_power(state, catalog, attacker);

        if !state.combat.is_blocked(attacker.instance_id) {
            if power > 0 {
                assignments.push(DamageAssignment {
                    source: attacker.instance_id,
                    target: Target::Player(defender),
                    amount: power,
                });
            }
            continue;
        }

        let blockers: SmallVec<[&CardInstance; 4]> = state
            .combat
            .blockers_of(attacker.instance_id)
            .filter_map(|id| state.battlefield_card(id))
            .filter(|b| b.blocking == Some(attacker.instance_id))
            .collect();

        let mut remaining = power;
        for (i, blocker) in blockers.iter().enumerate() {
            if remaining <= 0 {
                break;
            }
            let is_last = i + 1 == blockers.len();
            let lethal = (effective_toughness(state, catalog, blocker) - blocker.damage).max(1);
            let amount = if is_last { remaining } else { remaining.min(lethal) };
            remaining -= amount;
            if !prevented(catalog, attacker, blocker) {
                assignments.push(DamageAssignment {
                    source: attacker.instance_id,
                    target: Target::Card(blocker.instance_id),
                    amount,
                });
            }
        }

        for blocker in blockers {
            let power = effective_power(state, catalog, blocker);
            if power > 0 && !prevented(catalog, blocker, attacker) {
                assignments.push(DamageAssignment {
                    source: blocker.instance_id,
                    target: Target::Card(attacker.instance_id),
                    amount: power,
                });
            }
        }
    }

    assignments
}

/// Deal combat damage simultaneously.
pub fn resolve_combat_damage(state: &mut GameState, catalog: &CardCatalog) -> CombatDamageReport {
    let assignments = assign_combat_damage(state, catalog);

    let mut lifelink: SmallVec<[(PlayerId, i32); 4]> = SmallVec::new();
    for assignment in &assignments {
        if let Some(source) = state.battlefield_card(assignment.source) {
            if catalog.get(source.card_id).is_some_and(has_lifelink) {
                lifelink.push((source.controller, assignment.amount));
            }
        }
    }

    for assignment in &assignments {
        trace!("{} deals {} combat damage to {}", assignment.source, assignment.amount, assignment.target);
        match assignment.target {
            Target::Player(player) => state.player_mut(player).life -= assignment.amount,
            Target::Card(id) => {
                if let Some(card) = state.battlefield_card_mut(id) {
                    card.damage += assignment.amount;
                }
            }
            Target::StackObject(_) => {}
        }
    }
    for (player, amount) in lifelink {
        state.player_mut(player).life += amount;
    }

    debug!("combat damage: {} assignment(s)", assignments.len());
    CombatDamageReport { assignments }
}

/// Remove every creature from combat and forget declarations.
pub fn clear_combat(state: &mut GameState) {
    for player in PlayerId::BOTH {
        for card in state.player_mut(player).battlefield.iter_mut() {
            card.clear_combat();
        }
    }
    state.combat = Default::default();
}
