//! Legal action enumeration.
//!
//! Candidates are generated per action type and then filtered through
//! `validate_action`, so every returned action is legal by construction.
//!
//! Bounds:
//! - mana abilities only when `enumerate_mana_abilities` is set
//! - X from 0 to the largest affordable value, capped by `max_x_value`
//! - attack subsets and block assignments are complete up to
//!   `max_enumerated_combinations`; beyond that only the empty, single
//!   creature and all-in declarations are offered

use smallvec::SmallVec;

use crate::abilities::{indexed_abilities, AbilityEffect};
use crate::cards::{CardTemplate, Color};
use crate::combat::{possible_attackers, possible_blocks};
use crate::core::{Action, GameState, InstanceId, PlayerId, Step, Target};
use crate::effects::{get_all_legal_target_combinations, Effect};
use crate::mana::{ManaCost, ManaProduction};

use super::engine::Engine;

/// `2^n` when it fits in `limit`.
fn subset_count(n: usize, limit: usize) -> Option<usize> {
    u32::try_from(n)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .filter(|count| *count <= limit)
}

impl Engine {
    /// Every action `player` could legally take now.
    ///
    /// Empty when the game is over or the player has nothing to do.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.game_over {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        if let Some(pending) = state.pending_sacrifice {
            if pending.player == player {
                candidates.extend(
                    state
                        .player(player)
                        .battlefield
                        .iter()
                        .map(|card| Action::sacrifice(player, card.instance_id)),
                );
            }
        } else {
            match state.step {
                Step::Untap => candidates.push(Action::untap(player)),
                Step::Draw if !state.draw_taken => candidates.push(Action::draw(player)),
                _ if state.has_priority(player) => self.priority_candidates(state, player, &mut candidates),
                _ => {}
            }
        }

        candidates.retain(|action| self.validate_action(state, action).is_empty());
        candidates
    }

    fn priority_candidates(&self, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        out.push(Action::pass(player));

        for card in state.player(player).hand.iter() {
            let Some(template) = self.catalog().get(card.card_id) else {
                continue;
            };
            if template.types.is_land() {
                out.push(Action::play_land(player, card.instance_id));
            } else if template.types.is_instant() || self.sorcery_window(state, player) {
                self.spell_candidates(state, player, card.instance_id, template, out);
            }
        }

        for card in state.player(player).battlefield.iter() {
            self.ability_candidates(state, player, card.instance_id, out);
        }

        if state.step == Step::DeclareAttackers && player == state.active_player && !state.combat.attackers_declared {
            self.attack_candidates(state, player, out);
        }
        if state.step == Step::DeclareBlockers && player == state.defending_player() && !state.combat.blockers_declared {
            self.block_candidates(state, player, out);
        }

        if player == state.active_player && state.stack.is_empty() {
            out.push(Action::end_turn(player));
        }
    }

    fn sorcery_window(&self, state: &GameState, player: PlayerId) -> bool {
        player == state.active_player && state.step.is_main() && state.stack.is_empty()
    }

    fn target_options(&self, state: &GameState, player: PlayerId, template: &CardTemplate, effect: Option<&Effect>) -> Vec<SmallVec<[Target; 2]>> {
        let requirement = effect.and_then(|e| e.target_requirement());
        get_all_legal_target_combinations(state, self.catalog(), requirement.as_ref(), player, &template.colors)
    }

    /// X values from 0 up to the largest one `player` can afford.
    fn x_values(&self, state: &GameState, player: PlayerId, cost: &ManaCost, exclude: Option<InstanceId>) -> Vec<i32> {
        (0..=self.config().max_x_value)
            .take_while(|x| self.plan_payment(state, player, cost, *x, exclude, None).is_some())
            .map(|x| x as i32)
            .collect()
    }

    fn spell_candidates(&self, state: &GameState, player: PlayerId, card: InstanceId, template: &CardTemplate, out: &mut Vec<Action>) {
        let x_values = if template.cost.has_x() {
            self.x_values(state, player, &template.cost, None)
        } else {
            Vec::new()
        };

        for targets in self.target_options(state, player, template, template.effect.as_ref()) {
            let action = Action::cast(player, card, &targets);
            if x_values.is_empty() {
                out.push(action);
            } else {
                out.extend(x_values.iter().map(|x| action.clone().with_x(*x)));
            }
        }
    }

    fn ability_candidates(&self, state: &GameState, player: PlayerId, source: InstanceId, out: &mut Vec<Action>) {
        let Some(template) = state.battlefield_card(source).and_then(|c| self.catalog().get(c.card_id)) else {
            return;
        };

        for (index, ability) in indexed_abilities(template) {
            let action = Action::activate(player, source, index.0, &[]);
            match &ability.effect {
                AbilityEffect::AddMana { production, .. } => {
                    if !self.config().enumerate_mana_abilities {
                        continue;
                    }
                    match production {
                        ManaProduction::Fixed { .. } => out.push(action),
                        ManaProduction::Choice(colors) => {
                            out.extend(colors.iter().map(|c| action.clone().with_mana_color(*c)));
                        }
                        ManaProduction::AnyColor => {
                            out.extend(Color::ALL.into_iter().map(|c| action.clone().with_mana_color(c)));
                        }
                    }
                }
                AbilityEffect::Resolve(effect) => {
                    let x_values = if ability.cost.mana.has_x() {
                        let exclude = (ability.cost.tap || ability.cost.sacrifice_self).then_some(source);
                        self.x_values(state, player, &ability.cost.mana, exclude)
                    } else {
                        Vec::new()
                    };
                    for targets in self.target_options(state, player, template, Some(effect)) {
                        let action = Action::activate(player, source, index.0, &targets);
                        if x_values.is_empty() {
                            out.push(action);
                        } else {
                            out.extend(x_values.iter().map(|x| action.clone().with_x(*x)));
                        }
                    }
                }
            }
        }
    }

    fn attack_candidates(&self, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        let creatures = possible_attackers(state, self.catalog(), player);

        match subset_count(creatures.len(), self.config().max_enumerated_combinations) {
            Some(count) => {
                for mask in 0..count {
                    let subset: SmallVec<[InstanceId; 8]> = creatures
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1 << i) != 0)
                        .map(|(_, id)| *id)
                        .collect();
                    out.push(Action::attack(player, &subset));
                }
            }
            None => {
                out.push(Action::attack(player, &[]));
                out.extend(creatures.iter().map(|id| Action::attack(player, &[*id])));
                out.push(Action::attack(player, &creatures));
            }
        }
    }

    fn block_candidates(&self, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        let options = possible_blocks(state, self.catalog(), player);
        let limit = self.config().max_enumerated_combinations;

        let total = options
            .iter()
            .try_fold(1usize, |acc, (_, attackers)| acc.checked_mul(attackers.len() + 1))
            .filter(|count| *count <= limit);

        match total {
            Some(count) => {
                for mut code in 0..count {
                    let mut pairs: SmallVec<[(InstanceId, InstanceId); 4]> = SmallVec::new();
                    for (blocker, attackers) in &options {
                        let radix = attackers.len() + 1;
                        let choice = code % radix;
                        code /= radix;
                        if choice > 0 {
                            pairs.push((*blocker, attackers[choice - 1]));
                        }
                    }
                    out.push(Action::block(player, &pairs));
                }
            }
            None => {
                out.push(Action::block(player, &[]));
                for (blocker, attackers) in &options {
                    out.extend(attackers.iter().map(|a| Action::block(player, &[(*blocker, *a)])));
                }
                let all_in: Vec<(InstanceId, InstanceId)> =
                    options.iter().map(|(blocker, attackers)| (*blocker, attackers[0])).collect();
                out.push(Action::block(player, &all_in));
            }
        }
    }
}
