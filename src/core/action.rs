//! Action protocol.
//!
//! An action is `{type, player, payload}`. The set of action types is
//! closed; each variant of `ActionKind` carries its own payload and is
//! named by its `SCREAMING_SNAKE_CASE` type tag when serialized. The
//! encoding is externally tagged so the same types round-trip through
//! both JSON and bincode:
//!
//! ```
//! use manacore::core::{Action, InstanceId, PlayerId};
//!
//! let play = Action::play_land(PlayerId::Player, InstanceId(5));
//! let json = serde_json::to_string(&play).unwrap();
//! assert_eq!(json, r#"{"player":"player","kind":{"PLAY_LAND":{"card":5}}}"#);
//!
//! let pass = serde_json::to_string(&Action::pass(PlayerId::Opponent)).unwrap();
//! assert_eq!(pass, r#"{"player":"opponent","kind":"PASS_PRIORITY"}"#);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::{InstanceId, Target};
use super::player::PlayerId;
use crate::cards::Color;

/// Index of an activated ability on a permanent.
///
/// Indices follow the order of [`abilities_for`](crate::abilities::abilities_for).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbilityIndex(pub u8);

impl std::fmt::Display for AbilityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target list carried by spells and abilities.
pub type Targets = SmallVec<[Target; 2]>;

/// One blocker assigned to one attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// The blocking creature.
    pub blocker: InstanceId,
    /// The attacking creature it blocks.
    pub attacker: InstanceId,
}

/// The action type tag, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    PlayLand,
    CastSpell,
    ActivateAbility,
    DeclareAttackers,
    DeclareBlockers,
    PassPriority,
    EndTurn,
    SacrificePermanent,
    DrawCard,
    Untap,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionType::PlayLand => "PLAY_LAND",
            ActionType::CastSpell => "CAST_SPELL",
            ActionType::ActivateAbility => "ACTIVATE_ABILITY",
            ActionType::DeclareAttackers => "DECLARE_ATTACKERS",
            ActionType::DeclareBlockers => "DECLARE_BLOCKERS",
            ActionType::PassPriority => "PASS_PRIORITY",
            ActionType::EndTurn => "END_TURN",
            ActionType::SacrificePermanent => "SACRIFICE_PERMANENT",
            ActionType::DrawCard => "DRAW_CARD",
            ActionType::Untap => "UNTAP",
        };
        f.write_str(name)
    }
}

/// Action payloads.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// Play a land from hand.
    PlayLand { card: InstanceId },

    /// Cast a spell from hand.
    CastSpell {
        card: InstanceId,
        #[serde(default)]
        targets: Targets,
        /// Chosen X. Negative values are rejected by validation.
        #[serde(default)]
        x_value: Option<i32>,
        /// Color any-color mana sources produce while auto-tapping.
        #[serde(default)]
        mana_color_choice: Option<Color>,
    },

    /// Activate an ability of a permanent.
    ActivateAbility {
        source: InstanceId,
        ability: AbilityIndex,
        #[serde(default)]
        targets: Targets,
        #[serde(default)]
        x_value: Option<i32>,
        /// Color produced by a multi-color mana ability.
        #[serde(default)]
        mana_color_choice: Option<Color>,
    },

    /// Declare the full set of attacking creatures.
    DeclareAttackers { attackers: SmallVec<[InstanceId; 4]> },

    /// Declare every blocker assignment at once.
    DeclareBlockers { blocks: SmallVec<[Block; 4]> },

    /// Pass priority.
    PassPriority,

    /// Skip the rest of the turn (empty stack only).
    EndTurn,

    /// Sacrifice a permanent to satisfy a pending sacrifice.
    SacrificePermanent { permanent: InstanceId },

    /// Perform the draw-step draw.
    DrawCard,

    /// Perform the untap-step untap.
    Untap,
}

impl ActionKind {
    /// The type tag of this payload.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionKind::PlayLand { .. } => ActionType::PlayLand,
            ActionKind::CastSpell { .. } => ActionType::CastSpell,
            ActionKind::ActivateAbility { .. } => ActionType::ActivateAbility,
            ActionKind::DeclareAttackers { .. } => ActionType::DeclareAttackers,
            ActionKind::DeclareBlockers { .. } => ActionType::DeclareBlockers,
            ActionKind::PassPriority => ActionType::PassPriority,
            ActionKind::EndTurn => ActionType::EndTurn,
            ActionKind::SacrificePermanent { .. } => ActionType::SacrificePermanent,
            ActionKind::DrawCard => ActionType::DrawCard,
            ActionKind::Untap => ActionType::Untap,
        }
    }
}

/// A complete action: who acts and what they do.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The acting player.
    pub player: PlayerId,

    /// Type tag and payload.
    pub kind: ActionKind,
}

impl Action {
    /// Create an action.
    #[must_use]
    pub fn new(player: PlayerId, kind: ActionKind) -> Self {
        Self { player, kind }
    }

    /// The type tag.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.kind.action_type()
    }

    /// `PASS_PRIORITY`.
    #[must_use]
    pub fn pass(player: PlayerId) -> Self {
        Self::new(player, ActionKind::PassPriority)
    }

    /// `PLAY_LAND`.
    #[must_use]
    pub fn play_land(player: PlayerId, card: InstanceId) -> Self {
        Self::new(player, ActionKind::PlayLand { card })
    }

    /// `CAST_SPELL` with the given targets and no X.
    #[must_use]
    pub fn cast(player: PlayerId, card: InstanceId, targets: &[Target]) -> Self {
        Self::new(
            player,
            ActionKind::CastSpell {
                card,
                targets: SmallVec::from_slice(targets),
                x_value: None,
                mana_color_choice: None,
            },
        )
    }

    /// `CAST_SPELL` with an X value.
    #[must_use]
    pub fn cast_with_x(player: PlayerId, card: InstanceId, targets: &[Target], x: i32) -> Self {
        Self::new(
            player,
            ActionKind::CastSpell {
                card,
                targets: SmallVec::from_slice(targets),
                x_value: Some(x),
                mana_color_choice: None,
            },
        )
    }

    /// `ACTIVATE_ABILITY` with the given targets.
    #[must_use]
    pub fn activate(player: PlayerId, source: InstanceId, ability: u8, targets: &[Target]) -> Self {
        Self::new(
            player,
            ActionKind::ActivateAbility {
                source,
                ability: AbilityIndex(ability),
                targets: SmallVec::from_slice(targets),
                x_value: None,
                mana_color_choice: None,
            },
        )
    }

    /// Set the color for any-color mana. No effect on other action types.
    #[must_use]
    pub fn with_mana_color(mut self, color: Color) -> Self {
        if let ActionKind::CastSpell { mana_color_choice, .. } | ActionKind::ActivateAbility { mana_color_choice, .. } =
            &mut self.kind
        {
            *mana_color_choice = Some(color);
        }
        self
    }

    /// Set X on a cast or activation.
    #[must_use]
    pub fn with_x(mut self, x: i32) -> Self {
        if let ActionKind::CastSpell { x_value, .. } | ActionKind::ActivateAbility { x_value, .. } = &mut self.kind {
            *x_value = Some(x);
        }
        self
    }

    /// `DECLARE_ATTACKERS`.
    #[must_use]
    pub fn attack(player: PlayerId, attackers: &[InstanceId]) -> Self {
        Self::new(
            player,
            ActionKind::DeclareAttackers {
                attackers: SmallVec::from_slice(attackers),
            },
        )
    }

    /// `DECLARE_BLOCKERS` from `(blocker, attacker)` pairs.
    #[must_use]
    pub fn block(player: PlayerId, pairs: &[(InstanceId, InstanceId)]) -> Self {
        Self::new(
            player,
            ActionKind::DeclareBlockers {
                blocks: pairs
                    .iter()
                    .map(|&(blocker, attacker)| Block { blocker, attacker })
                    .collect(),
            },
        )
    }

    /// `END_TURN`.
    #[must_use]
    pub fn end_turn(player: PlayerId) -> Self {
        Self::new(player, ActionKind::EndTurn)
    }

    /// `SACRIFICE_PERMANENT`.
    #[must_use]
    pub fn sacrifice(player: PlayerId, permanent: InstanceId) -> Self {
        Self::new(player, ActionKind::SacrificePermanent { permanent })
    }

    /// `DRAW_CARD`.
    #[must_use]
    pub fn draw(player: PlayerId) -> Self {
        Self::new(player, ActionKind::DrawCard)
    }

    /// `UNTAP`.
    #[must_use]
    pub fn untap(player: PlayerId) -> Self {
        Self::new(player, ActionKind::Untap)
    }
}

/// A recorded action with metadata for history tracking.
///
/// The history of a game, together with its seed and decks, is enough to
/// reconstruct every snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the game.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_tags() {
        assert_eq!(Action::pass(PlayerId::Player).action_type(), ActionType::PassPriority);
        assert_eq!(
            Action::cast(PlayerId::Player, InstanceId(1), &[]).action_type(),
            ActionType::CastSpell
        );
        assert_eq!(ActionType::SacrificePermanent.to_string(), "SACRIFICE_PERMANENT");
    }

    #[test]
    fn test_block_builder() {
        let action = Action::block(PlayerId::Opponent, &[(InstanceId(8), InstanceId(3))]);
        match action.kind {
            ActionKind::DeclareBlockers { blocks } => {
                assert_eq!(blocks.len(), 1);
                assert_eq!(blocks[0].blocker, InstanceId(8));
                assert_eq!(blocks[0].attacker, InstanceId(3));
            }
            _ => panic!("Expected DeclareBlockers"),
        }
    }

    #[test]
    fn test_action_equality() {
        let a1 = Action::play_land(PlayerId::Player, InstanceId(5));
        let a2 = Action::play_land(PlayerId::Player, InstanceId(5));
        let a3 = Action::play_land(PlayerId::Opponent, InstanceId(5));

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_action_serialization_shape() {
        let action = Action::cast_with_x(
            PlayerId::Player,
            InstanceId(9),
            &[Target::Player(PlayerId::Opponent)],
            3,
        );
        let json = serde_json::to_string(&action).unwrap();

        assert!(json.contains("\"CAST_SPELL\""));
        assert!(json.contains("\"player\":\"player\""));
        assert!(json.contains("\"x_value\":3"));

        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_payload_defaults_when_omitted() {
        let json = r#"{"player":"opponent","kind":{"CAST_SPELL":{"card":4}}}"#;
        let action: Action = serde_json::from_str(json).unwrap();

        assert_eq!(action, Action::cast(PlayerId::Opponent, InstanceId(4), &[]));
    }

    #[test]
    fn test_bincode_round_trip() {
        let action = Action::block(PlayerId::Opponent, &[(InstanceId(2), InstanceId(1))]);
        let bytes = bincode::serialize(&action).unwrap();
        let back: Action = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_action_record() {
        let action = Action::draw(PlayerId::Player);
        let record = ActionRecord::new(action.clone(), 3, 11);

        assert_eq!(record.action, action);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 11);
    }
}
