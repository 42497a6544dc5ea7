//! Turn structure.
//!
//! Steps advance when both players pass with an empty stack. Entering a
//! step runs its turn-based action:
//!
//! | Step | On entry |
//! |---|---|
//! | Draw | on turn 1 with `skip_first_draw`, the draw counts as taken |
//! | DeclareBlockers | the defending player receives priority |
//! | CombatDamage | combat damage is dealt |
//! | Cleanup | discard to hand size, wear off damage and pumps, next turn |
//!
//! A turn with no attackers skips straight from declare attackers to end of
//! combat. The state never rests in cleanup: the next turn begins in its
//! untap step with the other player active.

use log::debug;

use crate::combat::{clear_combat, resolve_combat_damage};
use crate::core::{GameState, ManaPoolEmptying, PlayerId, Step};
use crate::zones::Zone;

use super::engine::Engine;

impl Engine {
    /// Move to the next step after both players passed on an empty stack.
    pub(crate) fn advance_step(&self, state: &mut GameState) {
        let next = match state.step {
            Step::DeclareAttackers if !state.permanents().any(|c| c.attacking) => Some(Step::EndCombat),
            step => step.next(),
        };

        if state.step == Step::EndCombat {
            clear_combat(state);
        }
        if self.config().mana_pool_empties == ManaPoolEmptying::EndOfStep {
            empty_mana_pools(state);
        }

        match next {
            Some(Step::Cleanup) | None => self.cleanup(state),
            Some(step) => self.enter_step(state, step),
        }
    }

    fn enter_step(&self, state: &mut GameState, step: Step) {
        state.step = step;
        state.reset_priority();
        debug!("turn {}: {} enters {}", state.turn_count, state.active_player, step);

        match step {
            Step::Draw if state.turn_count == 1 && self.config().skip_first_draw => {
                state.draw_taken = true;
            }
            Step::DeclareBlockers => {
                state.priority_player = state.defending_player();
            }
            Step::CombatDamage => {
                resolve_combat_damage(state, self.catalog());
            }
            _ => {}
        }
    }

    /// Untap the active player's permanents and move to upkeep.
    pub(crate) fn untap_step(&self, state: &mut GameState) {
        let active = state.active_player;
        for card in state.player_mut(active).battlefield.iter_mut() {
            card.tapped = false;
            card.summoning_sick = false;
        }
        state.player_mut(active).lands_played_this_turn = 0;
        self.enter_step(state, Step::Upkeep);
    }

    /// End the turn from any step: jump to cleanup.
    pub(crate) fn end_turn(&self, state: &mut GameState) {
        debug!("{} ends turn {} from {}", state.active_player, state.turn_count, state.step);
        clear_combat(state);
        self.cleanup(state);
    }

    /// Cleanup, then hand the turn to the other player.
    fn cleanup(&self, state: &mut GameState) {
        state.step = Step::Cleanup;
        let active = state.active_player;

        let excess = state.player(active).hand.len().saturating_sub(self.config().max_hand_size);
        for _ in 0..excess {
            let Some(newest) = state.player(active).hand.last().map(|c| c.instance_id) else {
                break;
            };
            state.move_card(newest, Zone::Graveyard);
        }
        if excess > 0 {
            debug!("{active} discards {excess} card(s) to hand size");
        }

        for player in PlayerId::BOTH {
            for card in state.player_mut(player).battlefield.iter_mut() {
                card.damage = 0;
                card.temporary_modifications.clear();
            }
        }
        clear_combat(state);
        empty_mana_pools(state);

        state.turn_count += 1;
        state.active_player = active.other();
        state.step = Step::Untap;
        state.draw_taken = false;
        state.reset_priority();
        debug!("turn {} begins for {}", state.turn_count, state.active_player);
    }
}

fn empty_mana_pools(state: &mut GameState) {
    for player in PlayerId::BOTH {
        state.player_mut(player).mana_pool.clear();
    }
}
