//! State-based actions.
//!
//! Checked after every applied action and repeated until nothing changes:
//! - a creature with toughness 0 or less, or lethal damage, dies
//! - an aura attached to nothing goes to the graveyard
//! - a player at 0 or less life, or who drew from an empty library, loses
//!   (both at once is a draw)
//! - a pending sacrifice the player can no longer make is dropped

use log::{debug, trace};
use smallvec::SmallVec;

use crate::core::{GameState, InstanceId, PlayerId};
use crate::effects::controls_type;
use crate::zones::Zone;

use super::characteristics::{effective_toughness, has_lethal_damage};
use super::engine::Engine;

impl Engine {
    /// Run state-based actions to a fixed point. Returns the number of
    /// passes that changed something.
    pub fn check_state_based_actions(&self, state: &mut GameState) -> usize {
        let mut changed_passes = 0;

        for _ in 0..self.config().max_state_based_iterations {
            let doomed = self.doomed_permanents(state);
            if doomed.is_empty() {
                break;
            }
            for id in doomed {
                trace!("state-based action: {id} goes to the graveyard");
                state.move_card(id, Zone::Graveyard);
            }
            changed_passes += 1;
        }

        if let Some(pending) = state.pending_sacrifice {
            if !controls_type(state, self.catalog(), pending.player, pending.card_type) {
                state.pending_sacrifice = None;
            }
        }

        if !state.game_over {
            self.check_losses(state);
        }
        changed_passes
    }

    fn doomed_permanents(&self, state: &GameState) -> SmallVec<[InstanceId; 4]> {
        let catalog = self.catalog();
        state
            .permanents()
            .filter(|card| {
                let Some(template) = catalog.get(card.card_id) else {
                    return false;
                };
                if template.types.is_creature()
                    && (effective_toughness(state, catalog, card) <= 0 || has_lethal_damage(state, catalog, card))
                {
                    return true;
                }
                template.types.is_aura() && card.attached_to.and_then(|host| state.battlefield_card(host)).is_none()
            })
            .map(|card| card.instance_id)
            .collect()
    }

    fn check_losses(&self, state: &mut GameState) {
        let lost = |player: PlayerId| {
            let p = state.player(player);
            p.life <= 0 || p.drew_from_empty_library
        };
        let losers: SmallVec<[PlayerId; 2]> = PlayerId::all().filter(|p| lost(*p)).collect();

        match losers.as_slice() {
            [] => {}
            [loser] => {
                debug!("{loser} loses the game");
                state.end_game(Some(loser.other()));
            }
            _ => {
                debug!("both players lose: the game is a draw");
                state.end_game(None);
            }
        }
    }
}
