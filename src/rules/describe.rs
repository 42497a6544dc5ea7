//! Human-readable action descriptions.

use crate::abilities::ability_of;
use crate::core::{Action, ActionKind, GameState, InstanceId, Target};

use super::engine::Engine;

impl Engine {
    fn card_name(&self, state: &GameState, id: InstanceId) -> String {
        state
            .find_card(id)
            .and_then(|card| {
                card.token_type
                    .clone()
                    .or_else(|| self.catalog().get(card.card_id).map(|t| t.name.clone()))
            })
            .unwrap_or_else(|| format!("card {id}"))
    }

    fn target_name(&self, state: &GameState, target: Target) -> String {
        match target {
            Target::Player(player) => player.to_string(),
            Target::Card(id) => self.card_name(state, id),
            Target::StackObject(id) => match state.stack_object(id) {
                Some(object) => self.card_name(state, object.card.instance_id),
                None => id.to_string(),
            },
        }
    }

    fn targets_phrase(&self, state: &GameState, targets: &[Target]) -> String {
        if targets.is_empty() {
            return String::new();
        }
        let names: Vec<String> = targets.iter().map(|t| self.target_name(state, *t)).collect();
        format!(" targeting {}", names.join(" and "))
    }

    /// One-line English description of `action` in `state`.
    ///
    /// ```
    /// use manacore::core::{Action, PlayerId};
    /// use manacore::rules::Engine;
    /// use manacore::GameState;
    ///
    /// let engine = Engine::with_core_set();
    /// let state = GameState::new(1, 20);
    /// assert_eq!(engine.describe_action(&Action::pass(PlayerId::Opponent), &state), "Opponent passes priority");
    /// ```
    #[must_use]
    pub fn describe_action(&self, action: &Action, state: &GameState) -> String {
        let player = action.player;
        match &action.kind {
            ActionKind::PlayLand { card } => format!("{player} plays {}", self.card_name(state, *card)),
            ActionKind::CastSpell { card, targets, x_value, .. } => {
                let x = x_value.map(|x| format!(" with X={x}")).unwrap_or_default();
                format!(
                    "{player} casts {}{x}{}",
                    self.card_name(state, *card),
                    self.targets_phrase(state, targets)
                )
            }
            ActionKind::ActivateAbility {
                source,
                ability,
                targets,
                mana_color_choice,
                ..
            } => {
                let cost = state
                    .battlefield_card(*source)
                    .and_then(|c| self.catalog().get(c.card_id))
                    .and_then(|t| ability_of(t, *ability))
                    .map(|a| format!(" ({})", a.cost))
                    .unwrap_or_default();
                let color = mana_color_choice.map(|c| format!(" for {c}")).unwrap_or_default();
                format!(
                    "{player} activates {}{cost}{color}{}",
                    self.card_name(state, *source),
                    self.targets_phrase(state, targets)
                )
            }
            ActionKind::DeclareAttackers { attackers } if attackers.is_empty() => {
                format!("{player} declares no attackers")
            }
            ActionKind::DeclareAttackers { attackers } => {
                let names: Vec<String> = attackers.iter().map(|id| self.card_name(state, *id)).collect();
                format!("{player} attacks with {}", names.join(", "))
            }
            ActionKind::DeclareBlockers { blocks } if blocks.is_empty() => {
                format!("{player} declares no blockers")
            }
            ActionKind::DeclareBlockers { blocks } => {
                let pairs: Vec<String> = blocks
                    .iter()
                    .map(|b| format!("{} blocks {}", self.card_name(state, b.blocker), self.card_name(state, b.attacker)))
                    .collect();
                format!("{player}: {}", pairs.join(", "))
            }
            ActionKind::PassPriority => format!("{player} passes priority"),
            ActionKind::EndTurn => format!("{player} ends the turn"),
            ActionKind::SacrificePermanent { permanent } => {
                format!("{player} sacrifices {}", self.card_name(state, *permanent))
            }
            ActionKind::DrawCard => format!("{player} draws a card"),
            ActionKind::Untap => format!("{player} untaps"),
        }
    }
}
