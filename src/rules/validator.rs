//! Action validation.
//!
//! `validate_action` is a pure predicate: it returns every rule the action
//! violates and never mutates anything. The reducer applies an action only
//! when this list is empty, so the two always agree.
//!
//! Checks are not short-circuited: existence, zone, timing, priority,
//! resources, combat legality and targets are all reported together.

use crate::abilities::{ability_of, AbilityEffect};
use crate::cards::{has_haste, CardInstance, CardTemplate, Color};
use crate::combat::{validate_attackers, validate_blockers};
use crate::core::{
    AbilityIndex, Action, ActionKind, ErrorKind, GameState, InstanceId, PlayerId, Step, Target, ValidationError,
};
use crate::effects::validate_targets;
use crate::mana::{collect_mana_sources, plan_auto_tap, ManaCost, TapPlan};

use super::engine::Engine;

fn error(kind: ErrorKind, message: impl Into<String>) -> ValidationError {
    ValidationError::new(kind, message)
}

/// Resolve an announced X against a cost.
pub(crate) fn check_x(x_value: Option<i32>, cost: &ManaCost, name: &str) -> Result<u32, ValidationError> {
    match x_value {
        None | Some(0) => Ok(0),
        Some(x) if x < 0 => Err(error(ErrorKind::InvalidPayload, format!("X cannot be negative (got {x})"))),
        Some(_) if !cost.has_x() => Err(error(
            ErrorKind::InvalidPayload,
            format!("{name} has no X in its cost"),
        )),
        Some(x) => Ok(x as u32),
    }
}

fn requires_priority(kind: &ActionKind) -> bool {
    !matches!(
        kind,
        ActionKind::Untap | ActionKind::DrawCard | ActionKind::SacrificePermanent { .. }
    )
}

impl Engine {
    /// Every rule `action` violates in `state`. Empty means legal.
    #[must_use]
    pub fn validate_action(&self, state: &GameState, action: &Action) -> Vec<ValidationError> {
        if state.game_over {
            return vec![error(ErrorKind::GameOver, "The game is over")];
        }

        let mut errors = Vec::new();
        self.check_turn_structure(state, action, &mut errors);

        let player = action.player;
        match &action.kind {
            ActionKind::PlayLand { card } => self.check_play_land(state, player, *card, &mut errors),
            ActionKind::CastSpell {
                card,
                targets,
                x_value,
                mana_color_choice,
            } => self.check_cast(state, player, *card, targets, *x_value, *mana_color_choice, &mut errors),
            ActionKind::ActivateAbility {
                source,
                ability,
                targets,
                x_value,
                mana_color_choice,
            } => self.check_activate(
                state,
                player,
                *source,
                ability.0,
                targets,
                *x_value,
                *mana_color_choice,
                &mut errors,
            ),
            ActionKind::DeclareAttackers { attackers } => {
                if player != state.active_player {
                    errors.push(error(ErrorKind::WrongTiming, "Only the active player can declare attackers"));
                }
                if state.step != Step::DeclareAttackers {
                    errors.push(error(
                        ErrorKind::WrongTiming,
                        format!("Attackers can only be declared in the declare attackers step, not {}", state.step),
                    ));
                }
                if state.combat.attackers_declared {
                    errors.push(error(ErrorKind::WrongTiming, "Attackers have already been declared this combat"));
                }
                if !state.stack.is_empty() {
                    errors.push(error(ErrorKind::WrongTiming, "Attackers can only be declared with an empty stack"));
                }
                errors.extend(validate_attackers(state, self.catalog(), player, attackers));
            }
            ActionKind::DeclareBlockers { blocks } => {
                if player != state.defending_player() {
                    errors.push(error(ErrorKind::WrongTiming, "Only the defending player can declare blockers"));
                }
                if state.step != Step::DeclareBlockers {
                    errors.push(error(
                        ErrorKind::WrongTiming,
                        format!("Blockers can only be declared in the declare blockers step, not {}", state.step),
                    ));
                }
                if state.combat.blockers_declared {
                    errors.push(error(ErrorKind::WrongTiming, "Blockers have already been declared this combat"));
                }
                if !state.stack.is_empty() {
                    errors.push(error(ErrorKind::WrongTiming, "Blockers can only be declared with an empty stack"));
                }
                errors.extend(validate_blockers(state, self.catalog(), player, blocks));
            }
            ActionKind::PassPriority => {}
            ActionKind::EndTurn => {
                if player != state.active_player {
                    errors.push(error(ErrorKind::WrongTiming, "Only the active player can end the turn"));
                }
                if !state.stack.is_empty() {
                    errors.push(error(ErrorKind::WrongTiming, "Cannot end the turn while the stack is not empty"));
                }
            }
            ActionKind::SacrificePermanent { permanent } => {
                self.check_sacrifice(state, player, *permanent, &mut errors);
            }
            ActionKind::DrawCard => {
                if player != state.active_player {
                    errors.push(error(ErrorKind::WrongTiming, "Only the active player draws in the draw step"));
                }
                if state.step != Step::Draw || state.draw_taken {
                    errors.push(error(
                        ErrorKind::WrongTiming,
                        "DRAW_CARD is only legal in the draw step before the turn's draw",
                    ));
                }
            }
            ActionKind::Untap => {
                if player != state.active_player {
                    errors.push(error(ErrorKind::WrongTiming, "Only the active player untaps"));
                }
                if state.step != Step::Untap {
                    errors.push(error(ErrorKind::WrongTiming, "UNTAP is only legal in the untap step"));
                }
            }
        }

        errors
    }

    /// Pending obligations, mandatory steps, and priority.
    fn check_turn_structure(&self, state: &GameState, action: &Action, errors: &mut Vec<ValidationError>) {
        if let Some(pending) = state.pending_sacrifice {
            let resolving = matches!(action.kind, ActionKind::SacrificePermanent { .. }) && action.player == pending.player;
            if !resolving {
                errors.push(error(
                    ErrorKind::WrongTiming,
                    format!("{} must sacrifice a {} first", pending.player, pending.card_type),
                ));
            }
            return;
        }

        match state.step {
            Step::Untap if !matches!(action.kind, ActionKind::Untap) => {
                errors.push(error(ErrorKind::WrongTiming, "The untap step must be completed with UNTAP"));
            }
            Step::Draw if !state.draw_taken && !matches!(action.kind, ActionKind::DrawCard) => {
                errors.push(error(ErrorKind::WrongTiming, "The active player must draw before anything else"));
            }
            _ => {}
        }

        if requires_priority(&action.kind) && !state.has_priority(action.player) {
            errors.push(error(
                ErrorKind::PriorityViolation,
                format!("{} does not have priority", action.player),
            ));
        }
    }

    /// Sorcery-speed timing: own main phase, empty stack.
    fn check_sorcery_timing(&self, state: &GameState, player: PlayerId, what: &str, errors: &mut Vec<ValidationError>) {
        if player != state.active_player {
            errors.push(error(ErrorKind::WrongTiming, format!("{what} only during your own turn")));
        }
        if !state.step.is_main() {
            errors.push(error(
                ErrorKind::WrongTiming,
                format!("{what} only during a main phase, not {}", state.step),
            ));
        }
        if !state.stack.is_empty() {
            errors.push(error(ErrorKind::WrongTiming, format!("{what} only while the stack is empty")));
        }
    }

    fn card_in_hand<'a>(
        &'a self,
        state: &'a GameState,
        player: PlayerId,
        id: InstanceId,
    ) -> Result<(&'a CardInstance, &'a CardTemplate), ValidationError> {
        let Some(card) = state.hand_card(player, id) else {
            return Err(match state.find_card(id) {
                Some(card) => error(
                    ErrorKind::WrongZone,
                    format!("{} is not in {}'s hand", self.catalog().label(card), player),
                ),
                None => error(ErrorKind::NotFound, format!("Card {id} does not exist")),
            });
        };
        match self.catalog().get(card.card_id) {
            Some(template) => Ok((card, template)),
            None => Err(error(ErrorKind::NotFound, format!("Card {id} has no card data"))),
        }
    }

    fn check_play_land(&self, state: &GameState, player: PlayerId, card: InstanceId, errors: &mut Vec<ValidationError>) {
        let (card, template) = match self.card_in_hand(state, player, card) {
            Ok(found) => found,
            Err(err) => {
                errors.push(err);
                return;
            }
        };
        if !template.types.is_land() {
            errors.push(error(
                ErrorKind::InvalidPayload,
                format!("{} is not a land", self.catalog().label(card)),
            ));
        }
        self.check_sorcery_timing(state, player, "Lands can be played", errors);
        if state.player(player).lands_played_this_turn >= self.config().lands_per_turn {
            errors.push(error(
                ErrorKind::InsufficientResource,
                format!("{player} has already played a land this turn"),
            ));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_cast(
        &self,
        state: &GameState,
        player: PlayerId,
        card: InstanceId,
        targets: &[Target],
        x_value: Option<i32>,
        color_choice: Option<Color>,
        errors: &mut Vec<ValidationError>,
    ) {
        let (card, template) = match self.card_in_hand(state, player, card) {
            Ok(found) => found,
            Err(err) => {
                errors.push(err);
                return;
            }
        };
        let label = self.catalog().label(card);

        if template.types.is_land() {
            errors.push(error(
                ErrorKind::InvalidPayload,
                format!("{label} is a land and must be played with PLAY_LAND"),
            ));
            return;
        }
        if !template.types.is_instant() {
            self.check_sorcery_timing(state, player, &format!("{} can be cast", template.name), errors);
        }

        let requirement = template.effect.as_ref().and_then(|e| e.target_requirement());
        errors.extend(validate_targets(
            state,
            self.catalog(),
            requirement.as_ref(),
            targets,
            player,
            &template.colors,
        ));

        match check_x(x_value, &template.cost, &template.name) {
            Ok(x) => {
                if self.plan_payment(state, player, &template.cost, x, None, color_choice).is_none() {
                    errors.push(error(
                        ErrorKind::InsufficientResource,
                        format!("Not enough mana to cast {} ({})", template.name, template.cost),
                    ));
                }
            }
            Err(err) => errors.push(err),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_activate(
        &self,
        state: &GameState,
        player: PlayerId,
        source: InstanceId,
        index: u8,
        targets: &[Target],
        x_value: Option<i32>,
        color_choice: Option<Color>,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(card) = state.battlefield_card(source) else {
            errors.push(match state.find_card(source) {
                Some(card) => error(
                    ErrorKind::WrongZone,
                    format!("{} is not on the battlefield", self.catalog().label(card)),
                ),
                None => error(ErrorKind::NotFound, format!("Permanent {source} does not exist")),
            });
            return;
        };
        let label = self.catalog().label(card);
        if card.controller != player {
            errors.push(error(ErrorKind::InvalidPayload, format!("{player} does not control {label}")));
        }
        let Some(template) = self.catalog().get(card.card_id) else {
            errors.push(error(ErrorKind::NotFound, format!("{label} has no card data")));
            return;
        };
        let Some(ability) = ability_of(template, AbilityIndex(index)) else {
            errors.push(error(ErrorKind::NotFound, format!("{label} has no ability {index}")));
            return;
        };

        if ability.cost.tap {
            if card.tapped {
                errors.push(error(ErrorKind::InsufficientResource, format!("{label} is tapped")));
            }
            if template.types.is_creature() && card.summoning_sick && !has_haste(template) {
                errors.push(error(ErrorKind::InsufficientResource, format!("{label} has summoning sickness")));
            }
        }

        match &ability.effect {
            AbilityEffect::AddMana { production, .. } => {
                if !targets.is_empty() {
                    errors.push(error(ErrorKind::IllegalTarget, "Mana abilities take no targets"));
                }
                if let Some(color) = color_choice {
                    if !production.allows(color) {
                        errors.push(error(
                            ErrorKind::InvalidPayload,
                            format!("{label} cannot produce {color} mana"),
                        ));
                    }
                }
                if let Err(err) = check_x(x_value, &ability.cost.mana, &label) {
                    errors.push(err);
                }
            }
            AbilityEffect::Resolve(effect) => {
                let requirement = effect.target_requirement();
                errors.extend(validate_targets(
                    state,
                    self.catalog(),
                    requirement.as_ref(),
                    targets,
                    player,
                    &template.colors,
                ));

                match check_x(x_value, &ability.cost.mana, &label) {
                    Ok(x) => {
                        let exclude = (ability.cost.tap || ability.cost.sacrifice_self).then_some(source);
                        let plan = self.plan_payment(state, player, &ability.cost.mana, x, exclude, color_choice);
                        if plan.is_none() {
                            errors.push(error(
                                ErrorKind::InsufficientResource,
                                format!("Not enough mana to activate {label} ({})", ability.cost.mana),
                            ));
                        }
                    }
                    Err(err) => errors.push(err),
                }
            }
        }
    }

    fn check_sacrifice(&self, state: &GameState, player: PlayerId, permanent: InstanceId, errors: &mut Vec<ValidationError>) {
        let pending = match state.pending_sacrifice {
            Some(pending) if pending.player == player => pending,
            _ => {
                errors.push(error(ErrorKind::WrongTiming, format!("{player} has no pending sacrifice")));
                return;
            }
        };
        let Some(card) = state.battlefield_card(permanent) else {
            errors.push(error(ErrorKind::NotFound, format!("Permanent {permanent} is not on the battlefield")));
            return;
        };
        let label = self.catalog().label(card);
        if card.controller != player {
            errors.push(error(ErrorKind::InvalidPayload, format!("{player} does not control {label}")));
        }
        let matches = self
            .catalog()
            .get(card.card_id)
            .is_some_and(|t| t.types.has(pending.card_type));
        if !matches {
            errors.push(error(
                ErrorKind::InvalidPayload,
                format!("{label} is not a {}", pending.card_type),
            ));
        }
    }

    /// The auto-tap plan that pays `cost` for `player`, if one exists.
    ///
    /// Validation and application share this so they always agree.
    pub(crate) fn plan_payment(
        &self,
        state: &GameState,
        player: PlayerId,
        cost: &ManaCost,
        x_value: u32,
        exclude: Option<InstanceId>,
        color_choice: Option<Color>,
    ) -> Option<TapPlan> {
        let sources = collect_mana_sources(state, self.catalog(), player, exclude, color_choice);
        plan_auto_tap(&state.player(player).mana_pool, cost, x_value, &sources)
    }
}
