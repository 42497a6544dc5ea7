//! Card movement between zones.
//!
//! All zone changes go through these methods so that the bookkeeping that
//! comes with a move happens in one place:
//! - a card leaving the battlefield is detached from its host and its
//!   attachments are orphaned (state-based actions bin orphaned auras)
//! - a card changing zones forgets damage, counters, tapped state, combat
//!   flags and temporary modifications
//! - a token leaving the battlefield ceases to exist
//! - graveyard, hand and library are always the owner's; the battlefield is
//!   the controller's

use log::trace;
use serde::{Deserialize, Serialize};

use super::Zone;
use crate::cards::CardInstance;
use crate::core::{GameState, InstanceId, PlayerId};

/// Where to insert into an ordered zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Front of the sequence (top of library).
    Top,
    /// Back of the sequence (newest card in hand or graveyard).
    Bottom,
}

impl GameState {
    /// Remove a card from whichever player zone holds it.
    ///
    /// Does not touch the stack.
    pub fn take_card(&mut self, id: InstanceId) -> Option<CardInstance> {
        for player in PlayerId::BOTH {
            for zone in [Zone::Battlefield, Zone::Hand, Zone::Graveyard, Zone::Library] {
                let Some(cards) = self.players[player].zone_mut(zone) else {
                    continue;
                };
                if let Some(index) = cards.iter().position(|c| c.instance_id == id) {
                    return Some(cards.remove(index));
                }
            }
        }
        None
    }

    /// Put a card into a zone.
    ///
    /// Returns `false` when the card ceased to exist instead (a token
    /// outside the battlefield, or the stack, which only stack objects hold).
    pub fn put_card(&mut self, mut card: CardInstance, zone: Zone, position: ZonePosition) -> bool {
        if card.is_token && zone != Zone::Battlefield {
            trace!("token {} ceases to exist", card.instance_id);
            return false;
        }

        let holder = if zone == Zone::Battlefield {
            card.controller
        } else {
            card.controller = card.owner;
            card.owner
        };
        card.zone = zone;

        let Some(cards) = self.players[holder].zone_mut(zone) else {
            return false;
        };
        match position {
            ZonePosition::Top => cards.push_front(card),
            ZonePosition::Bottom => cards.push_back(card),
        }
        true
    }

    /// Move a card to a zone, applying zone-change bookkeeping.
    ///
    /// Returns `false` if the card was not found in any player zone.
    pub fn move_card(&mut self, id: InstanceId, to: Zone) -> bool {
        let Some(mut card) = self.take_card(id) else {
            return false;
        };

        if card.zone == Zone::Battlefield {
            self.detach(&card);
        }
        if card.zone != to {
            card.reset_for_zone_change();
        }

        trace!("{} moves from {} to {}", id, card.zone, to);
        let position = if to == Zone::Library {
            ZonePosition::Top
        } else {
            ZonePosition::Bottom
        };
        self.put_card(card, to, position);
        true
    }

    /// Clear attachment links pointing at or from a card leaving play.
    fn detach(&mut self, card: &CardInstance) {
        if let Some(host) = card.attached_to {
            if let Some(host) = self.battlefield_card_mut(host) {
                host.attachments.retain(|a| *a != card.instance_id);
            }
        }
        for attachment in &card.attachments {
            if let Some(aura) = self.battlefield_card_mut(*attachment) {
                aura.attached_to = None;
            }
        }
    }

    /// Draw the top card of a player's library.
    ///
    /// Drawing from an empty library marks the player; they lose at the
    /// next state-based check.
    pub fn draw_card(&mut self, player: PlayerId) -> Option<InstanceId> {
        let state = &mut self.players[player];
        match state.library.pop_front() {
            Some(mut card) => {
                let id = card.instance_id;
                card.zone = Zone::Hand;
                state.hand.push_back(card);
                Some(id)
            }
            None => {
                state.drew_from_empty_library = true;
                None
            }
        }
    }

    /// Draw several cards, stopping early on an empty library.
    pub fn draw_cards(&mut self, player: PlayerId, count: u32) {
        for _ in 0..count {
            if self.draw_card(player).is_none() {
                break;
            }
        }
    }

    /// Shuffle a player's library with the game RNG.
    pub fn shuffle_library(&mut self, player: PlayerId) {
        let mut cards: Vec<CardInstance> = self.players[player].library.iter().cloned().collect();
        self.rng.shuffle(&mut cards);
        self.players[player].library = cards.into_iter().collect();
    }
}
