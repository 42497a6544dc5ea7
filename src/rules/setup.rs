//! Game construction.

use log::info;

use crate::cards::CardId;
use crate::core::{GameState, PlayerId, SetupError};
use crate::zones::Zone;

use super::engine::Engine;

impl Engine {
    fn resolve_deck<S: AsRef<str>>(&self, player: PlayerId, deck: &[S]) -> Result<Vec<CardId>, SetupError> {
        let required = self.config().opening_hand_size;
        if deck.len() < required {
            return Err(SetupError::DeckTooSmall {
                player,
                size: deck.len(),
                required,
            });
        }
        deck.iter()
            .map(|name| {
                self.catalog()
                    .get_by_name(name.as_ref())
                    .map(|t| t.id)
                    .ok_or_else(|| SetupError::UnknownCard(name.as_ref().to_string()))
            })
            .collect()
    }

    /// Build a game from two decklists of card names.
    ///
    /// Libraries are shuffled with the seeded RNG and opening hands drawn.
    /// The game starts on turn 1 in the untap step with `Player` active.
    pub fn initialize_game<S: AsRef<str>>(
        &self,
        player_deck: &[S],
        opponent_deck: &[S],
        seed: u64,
    ) -> Result<GameState, SetupError> {
        let decks = [
            (PlayerId::Player, self.resolve_deck(PlayerId::Player, player_deck)?),
            (PlayerId::Opponent, self.resolve_deck(PlayerId::Opponent, opponent_deck)?),
        ];

        let mut state = GameState::new(seed, self.config().starting_life);
        for (player, cards) in &decks {
            for card in cards {
                state.create_card(*card, *player, Zone::Library);
            }
            state.shuffle_library(*player);
        }
        for player in PlayerId::BOTH {
            state.draw_cards(player, self.config().opening_hand_size as u32);
        }

        info!(
            "new game (seed {seed}): {} vs {} cards",
            player_deck.len(),
            opponent_deck.len()
        );
        Ok(state)
    }
}
