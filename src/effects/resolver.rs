//! Effect resolution - executing effects on game state.
//!
//! The `EffectResolver` applies one coded effect to the state for a
//! resolving spell or ability. Target legality has already been rechecked
//! by the caller; only still-legal targets are passed in.

use log::{debug, warn};

use crate::cards::{CardCatalog, CardInstance, CardType};
use crate::core::{GameState, InstanceId, PendingSacrifice, PlayerId, Target};
use crate::stack::StackObjectStatus;
use crate::zones::{Zone, ZonePosition};

use super::effect::Effect;

/// Context for resolving effects.
pub struct ResolverContext<'a> {
    pub catalog: &'a CardCatalog,
    /// Controller of the spell or ability.
    pub controller: PlayerId,
    /// The spell card, or the ability's source permanent.
    pub source: InstanceId,
    /// Announced X.
    pub x_value: u32,
}

impl<'a> ResolverContext<'a> {
    /// Create a context.
    #[must_use]
    pub fn new(catalog: &'a CardCatalog, controller: PlayerId, source: InstanceId, x_value: u32) -> Self {
        Self {
            catalog,
            controller,
            source,
            x_value,
        }
    }
}

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect resolved successfully.
    Success,
    /// Effect failed (e.g., missing token template).
    Failed(String),
    /// Nothing to do (e.g., no basic land left to find).
    Skipped,
}

/// Resolves effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve `effect` against its legal `targets`.
    pub fn resolve(
        state: &mut GameState,
        effect: &Effect,
        targets: &[Target],
        context: &ResolverContext,
    ) -> ResolveResult {
        match effect {
            Effect::DealDamage { amount, .. } => {
                let amount = amount.resolve(context.x_value);
                for target in targets {
                    deal_damage(state, *target, amount);
                }
                ResolveResult::Success
            }

            Effect::PumpTarget { power, toughness } => {
                for card in target_cards(targets) {
                    if let Some(card) = state.battlefield_card_mut(card) {
                        card.pump(*power, *toughness);
                    }
                }
                ResolveResult::Success
            }

            Effect::PumpSelf { power, toughness } => match state.battlefield_card_mut(context.source) {
                Some(card) => {
                    card.pump(*power, *toughness);
                    ResolveResult::Success
                }
                None => ResolveResult::Skipped,
            },

            Effect::AddCounters { counter, count } => {
                for card in target_cards(targets) {
                    if let Some(card) = state.battlefield_card_mut(card) {
                        card.add_counters(*counter, *count);
                    }
                }
                ResolveResult::Success
            }

            Effect::CounterSpell => {
                for target in targets {
                    if let Target::StackObject(id) = target {
                        if let Some(object) = state.stack.iter_mut().find(|o| o.id == *id) {
                            object.status = StackObjectStatus::Countered;
                            debug!("{} countered", id);
                        }
                    }
                }
                ResolveResult::Success
            }

            Effect::DestroyCreature { .. } => {
                for card in target_cards(targets) {
                    destroy_permanent(state, card);
                }
                ResolveResult::Success
            }

            Effect::DrawCards { count } => {
                state.draw_cards(context.controller, *count);
                ResolveResult::Success
            }

            Effect::TargetPlayerDraws { count } => {
                for player in target_players(targets) {
                    state.draw_cards(player, *count);
                }
                ResolveResult::Success
            }

            Effect::GainLife { amount } => {
                let amount = amount.resolve(context.x_value);
                for player in target_players(targets) {
                    state.player_mut(player).life += amount;
                }
                ResolveResult::Success
            }

            Effect::SearchBasicLand => search_basic_land(state, context),

            Effect::CreateTokens { token, count } => create_tokens(state, context, token, *count),

            Effect::TargetPlayerSacrifices { card_type } => {
                let mut result = ResolveResult::Skipped;
                for player in target_players(targets) {
                    if controls_type(state, context.catalog, player, *card_type) {
                        state.pending_sacrifice = Some(PendingSacrifice {
                            player,
                            card_type: *card_type,
                        });
                        result = ResolveResult::Success;
                    }
                }
                result
            }

            Effect::Enchant => match target_cards(targets).next() {
                Some(host) => attach(state, context.source, host),
                None => ResolveResult::Skipped,
            },
        }
    }
}

fn target_cards(targets: &[Target]) -> impl Iterator<Item = InstanceId> + '_ {
    targets.iter().filter_map(|t| match t {
        Target::Card(id) => Some(*id),
        _ => None,
    })
}

fn target_players(targets: &[Target]) -> impl Iterator<Item = PlayerId> + '_ {
    targets.iter().filter_map(|t| match t {
        Target::Player(player) => Some(*player),
        _ => None,
    })
}

/// Deal noncombat damage. Players lose life; permanents mark damage.
pub fn deal_damage(state: &mut GameState, target: Target, amount: i32) {
    if amount <= 0 {
        return;
    }
    match target {
        Target::Player(player) => state.player_mut(player).life -= amount,
        Target::Card(id) => {
            if let Some(card) = state.battlefield_card_mut(id) {
                card.damage += amount;
            }
        }
        Target::StackObject(_) => {}
    }
}

/// Put a permanent into its owner's graveyard.
pub fn destroy_permanent(state: &mut GameState, id: InstanceId) -> bool {
    if state.battlefield_card(id).is_none() {
        return false;
    }
    debug!("destroying {}", id);
    state.move_card(id, Zone::Graveyard)
}

/// Whether `player` controls a permanent of `card_type`.
pub fn controls_type(state: &GameState, catalog: &CardCatalog, player: PlayerId, card_type: CardType) -> bool {
    state
        .player(player)
        .battlefield
        .iter()
        .any(|c| catalog.get(c.card_id).is_some_and(|t| t.types.has(card_type)))
}

fn search_basic_land(state: &mut GameState, context: &ResolverContext) -> ResolveResult {
    let player = context.controller;
    let found = state
        .player(player)
        .library
        .iter()
        .find(|c| {
            context
                .catalog
                .get(c.card_id)
                .is_some_and(|t| t.types.basic && t.types.is_land())
        })
        .map(|c| c.instance_id);

    let result = match found.and_then(|id| state.take_card(id)) {
        Some(mut land) => {
            land.reset_for_zone_change();
            land.tapped = true;
            land.controller = player;
            let id = land.instance_id;
            state.put_card(land, Zone::Battlefield, ZonePosition::Bottom);
            debug!("{} searches for {}", player, id);
            ResolveResult::Success
        }
        None => ResolveResult::Skipped,
    };

    state.shuffle_library(player);
    result
}

fn create_tokens(state: &mut GameState, context: &ResolverContext, token: &str, count: u32) -> ResolveResult {
    let Some(template) = context.catalog.get_by_name(token) else {
        warn!("token template '{}' is not in the catalog", token);
        return ResolveResult::Failed(format!("unknown token '{token}'"));
    };

    for _ in 0..count {
        let id = state.alloc_instance_id();
        let mut card = CardInstance::new(id, template.id, context.controller, Zone::Battlefield);
        card.is_token = true;
        card.token_type = Some(template.name.clone());
        state.player_mut(context.controller).battlefield.push_back(card);
    }
    ResolveResult::Success
}

fn attach(state: &mut GameState, aura: InstanceId, host: InstanceId) -> ResolveResult {
    if state.battlefield_card(host).is_none() || state.battlefield_card(aura).is_none() {
        return ResolveResult::Skipped;
    }
    if let Some(card) = state.battlefield_card_mut(aura) {
        card.attached_to = Some(host);
    }
    if let Some(card) = state.battlefield_card_mut(host) {
        card.attachments.push(aura);
    }
    ResolveResult::Success
}
