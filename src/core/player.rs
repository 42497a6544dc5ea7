//! The two seats and per-seat storage.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    /// The first seat; takes the first turn.
    Player,
    /// The second seat.
    Opponent,
}

impl PlayerId {
    /// Seat order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::Player, PlayerId::Opponent];

    /// Get the seat index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::Player => 0,
            PlayerId::Opponent => 1,
        }
    }

    /// The other player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            PlayerId::Player => PlayerId::Opponent,
            PlayerId::Opponent => PlayerId::Player,
        }
    }

    /// Iterate over both player IDs.
    ///
    /// ```
    /// use manacore::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players, vec![PlayerId::Player, PlayerId::Opponent]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::BOTH.into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Player => write!(f, "Player"),
            PlayerId::Opponent => write!(f, "Opponent"),
        }
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// ```
/// use manacore::core::{PlayerId, PlayerMap};
///
/// let mut life = PlayerMap::new(|_| 20);
/// life[PlayerId::Opponent] -= 3;
///
/// assert_eq!(life[PlayerId::Player], 20);
/// assert_eq!(life[PlayerId::Opponent], 17);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T>([T; 2]);

impl<T> PlayerMap<T> {
    /// Build both entries from their seat.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self(PlayerId::BOTH.map(&mut factory))
    }

    /// Seat and value pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::BOTH.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.0[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.0[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::Player.index(), 0);
        assert_eq!(PlayerId::Opponent.index(), 1);
        assert_eq!(PlayerId::Player.other(), PlayerId::Opponent);
        assert_eq!(PlayerId::Opponent.other(), PlayerId::Player);
        assert_eq!(format!("{}", PlayerId::Opponent), "Opponent");
    }

    #[test]
    fn test_player_map() {
        let mut map = PlayerMap::new(|p| p.index() * 10);
        map[PlayerId::Player] += 1;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::Player, &1), (PlayerId::Opponent, &10)]);
    }

    #[test]
    fn test_player_id_serialization() {
        let json = serde_json::to_string(&PlayerId::Opponent).unwrap();
        assert_eq!(json, "\"opponent\"");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerId::Opponent);
    }
}
