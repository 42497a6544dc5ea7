//! The reducer: `(state, action) -> state`.
//!
//! `apply_action` validates first and rejects with every violation. A legal
//! action is applied to a clone of the input, followed by state-based
//! actions. The input snapshot is never touched.

use log::{debug, trace};

use crate::abilities::{ability_of, AbilityEffect};
use crate::cards::Color;
use crate::combat::{declare_attackers, declare_blockers};
use crate::core::{
    AbilityIndex, Action, ActionKind, ErrorKind, GameState, InstanceId, InvalidAction, ManaError, PlayerId, Targets,
    ValidationError,
};
use crate::mana::{execute_tap_plan, ManaCost, ManaType};
use crate::stack::{resolve_top, PassOutcome, StackObject};
use crate::zones::{Zone, ZonePosition};

use super::engine::Engine;
use super::validator::check_x;

fn rejected(kind: ErrorKind, message: impl Into<String>) -> InvalidAction {
    InvalidAction::new(vec![ValidationError::new(kind, message)])
}

fn payment_failed(err: ManaError) -> InvalidAction {
    rejected(ErrorKind::InsufficientResource, err.to_string())
}

impl Engine {
    /// Apply a legal action, producing the next state.
    ///
    /// Returns every violated rule when the action is illegal. The input is
    /// left unchanged either way.
    pub fn apply_action(&self, state: &GameState, action: &Action) -> Result<GameState, InvalidAction> {
        let errors = self.validate_action(state, action);
        if !errors.is_empty() {
            debug!("rejected {}: {} violation(s)", action.action_type(), errors.len());
            return Err(InvalidAction::new(errors));
        }

        let mut next = state.clone();
        next.record(action.clone());
        if !matches!(action.kind, ActionKind::PassPriority) {
            next.consecutive_passes = 0;
        }

        let player = action.player;
        match &action.kind {
            ActionKind::PlayLand { card } => self.play_land(&mut next, player, *card)?,
            ActionKind::CastSpell {
                card,
                targets,
                x_value,
                mana_color_choice,
            } => self.cast_spell(&mut next, player, *card, targets, *x_value, *mana_color_choice)?,
            ActionKind::ActivateAbility {
                source,
                ability,
                targets,
                x_value,
                mana_color_choice,
            } => self.activate_ability(&mut next, player, *source, *ability, targets, *x_value, *mana_color_choice)?,
            ActionKind::DeclareAttackers { attackers } => {
                declare_attackers(&mut next, self.catalog(), attackers);
                next.reset_priority();
            }
            ActionKind::DeclareBlockers { blocks } => {
                declare_blockers(&mut next, blocks);
                next.reset_priority();
            }
            ActionKind::PassPriority => match next.register_pass() {
                PassOutcome::PriorityPassed => trace!("{player} passes priority"),
                PassOutcome::ResolveTop => {
                    resolve_top(&mut next, self.catalog());
                }
                PassOutcome::AdvanceStep => self.advance_step(&mut next),
            },
            ActionKind::EndTurn => self.end_turn(&mut next),
            ActionKind::SacrificePermanent { permanent } => {
                next.move_card(*permanent, Zone::Graveyard);
                next.pending_sacrifice = None;
                debug!("{player} sacrifices {permanent}");
            }
            ActionKind::DrawCard => {
                next.draw_card(player);
                next.draw_taken = true;
                next.reset_priority();
            }
            ActionKind::Untap => self.untap_step(&mut next),
        }

        self.check_state_based_actions(&mut next);
        Ok(next)
    }

    fn play_land(&self, state: &mut GameState, player: PlayerId, id: InstanceId) -> Result<(), InvalidAction> {
        let mut card = state
            .take_card(id)
            .ok_or_else(|| rejected(ErrorKind::NotFound, format!("Card {id} does not exist")))?;
        card.controller = player;
        state.put_card(card, Zone::Battlefield, ZonePosition::Bottom);
        state.player_mut(player).lands_played_this_turn += 1;
        debug!("{player} plays land {id}");
        Ok(())
    }

    /// Auto-tap, then pay `cost` from the pool.
    #[allow(clippy::too_many_arguments)]
    fn pay_cost(
        &self,
        state: &mut GameState,
        player: PlayerId,
        cost: &ManaCost,
        x_value: u32,
        exclude: Option<InstanceId>,
        color_choice: Option<Color>,
    ) -> Result<(), InvalidAction> {
        let plan = self
            .plan_payment(state, player, cost, x_value, exclude, color_choice)
            .ok_or_else(|| rejected(ErrorKind::InsufficientResource, format!("Cannot pay {cost}")))?;
        execute_tap_plan(state, player, &plan);
        let remaining = state.player(player).mana_pool.pay(cost, x_value).map_err(payment_failed)?;
        state.player_mut(player).mana_pool = remaining;
        Ok(())
    }

    fn cast_spell(
        &self,
        state: &mut GameState,
        player: PlayerId,
        id: InstanceId,
        targets: &Targets,
        x_value: Option<i32>,
        color_choice: Option<Color>,
    ) -> Result<(), InvalidAction> {
        let template = state
            .hand_card(player, id)
            .and_then(|card| self.catalog().get(card.card_id))
            .ok_or_else(|| rejected(ErrorKind::NotFound, format!("Card {id} is not in hand")))?;
        let cost = template.cost;
        let name = template.name.clone();
        let x = check_x(x_value, &cost, &name).map_err(|err| InvalidAction::new(vec![err]))?;

        self.pay_cost(state, player, &cost, x, None, color_choice)?;

        let mut card = state
            .take_card(id)
            .ok_or_else(|| rejected(ErrorKind::NotFound, format!("Card {id} does not exist")))?;
        card.zone = Zone::Stack;
        let stack_id = state.alloc_stack_id();
        debug!("{player} casts {name} ({stack_id})");
        state.push_stack_object(StackObject::spell(stack_id, player, card, targets.clone(), x));
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn activate_ability(
        &self,
        state: &mut GameState,
        player: PlayerId,
        source: InstanceId,
        index: AbilityIndex,
        targets: &Targets,
        x_value: Option<i32>,
        color_choice: Option<Color>,
    ) -> Result<(), InvalidAction> {
        let source_card = state
            .battlefield_card(source)
            .cloned()
            .ok_or_else(|| rejected(ErrorKind::NotFound, format!("Permanent {source} does not exist")))?;
        let ability = self
            .catalog()
            .get(source_card.card_id)
            .and_then(|t| ability_of(t, index))
            .cloned()
            .ok_or_else(|| rejected(ErrorKind::NotFound, format!("{source} has no ability {index}")))?;

        match ability.effect {
            AbilityEffect::AddMana { production, damage } => {
                if let Some(card) = state.battlefield_card_mut(source) {
                    card.tapped = true;
                }
                let Some(&(mana, amount)) = production.options(color_choice).first() else {
                    return Err(rejected(ErrorKind::InvalidPayload, format!("{source} produces no mana")));
                };
                let player_state = state.player_mut(player);
                player_state.mana_pool.add(mana, amount);
                if mana != ManaType::Colorless && damage > 0 {
                    player_state.life -= damage as i32;
                }
                trace!("{player} taps {source} for {amount} {mana:?}");
            }
            AbilityEffect::Resolve(effect) => {
                let label = self.catalog().label(&source_card);
                let x = check_x(x_value, &ability.cost.mana, &label).map_err(|err| InvalidAction::new(vec![err]))?;
                let exclude = (ability.cost.tap || ability.cost.sacrifice_self).then_some(source);
                self.pay_cost(state, player, &ability.cost.mana, x, exclude, color_choice)?;

                if ability.cost.tap {
                    if let Some(card) = state.battlefield_card_mut(source) {
                        card.tapped = true;
                    }
                }
                if ability.cost.sacrifice_self {
                    state.move_card(source, Zone::Graveyard);
                }

                let stack_id = state.alloc_stack_id();
                debug!("{player} activates {label} ability {index} ({stack_id})");
                state.push_stack_object(StackObject::ability(
                    stack_id,
                    player,
                    source_card,
                    index,
                    effect,
                    targets.clone(),
                    x,
                ));
            }
        }
        Ok(())
    }
}
