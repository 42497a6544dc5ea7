//! Priority protocol and LIFO resolution.
//!
//! Objects are pushed onto the stack and resolve in LIFO order. The caster
//! keeps priority after casting. A pass hands priority to the other player;
//! the second pass in a row resolves the top object, or advances the step
//! when the stack is empty. After a resolution the active player receives
//! priority.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardCatalog;
use crate::core::{GameState, StackObjectId, Target};
use crate::effects::{EffectResolver, ResolverContext, TargetSelector};
use crate::zones::{Zone, ZonePosition};

use super::object::{ResolutionOutcome, StackItem, StackObject};

/// Passes in a row that end a priority round (one per player).
pub const PASSES_TO_PROCEED: u8 = 2;

/// What a priority pass leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassOutcome {
    /// The other player now holds priority.
    PriorityPassed,
    /// Both players passed with a non-empty stack.
    ResolveTop,
    /// Both players passed with an empty stack.
    AdvanceStep,
}

impl GameState {
    /// Push an object; its controller keeps priority.
    pub fn push_stack_object(&mut self, object: StackObject) {
        debug!("{} put on the stack by {}", object.id, object.controller);
        self.priority_player = object.controller;
        self.consecutive_passes = 0;
        self.stack.push_back(object);
    }

    /// Record a pass by the priority holder.
    pub fn register_pass(&mut self) -> PassOutcome {
        self.consecutive_passes += 1;
        if self.consecutive_passes < PASSES_TO_PROCEED {
            self.priority_player = self.priority_player.other();
            return PassOutcome::PriorityPassed;
        }

        self.consecutive_passes = 0;
        if self.stack.is_empty() {
            PassOutcome::AdvanceStep
        } else {
            PassOutcome::ResolveTop
        }
    }

    /// Give priority to the active player with a fresh pass count.
    pub fn reset_priority(&mut self) {
        self.priority_player = self.active_player;
        self.consecutive_passes = 0;
    }
}

/// Resolve the top object of the stack.
///
/// Countered objects leave as no-ops. An object whose targets have all
/// become illegal fizzles; with some targets still legal it applies to
/// those. Permanent spells enter the battlefield under their controller.
pub fn resolve_top(state: &mut GameState, catalog: &CardCatalog) -> Option<(StackObjectId, ResolutionOutcome)> {
    let object = state.stack.pop_back()?;
    let id = object.id;

    let outcome = if object.is_countered() {
        finish_spell(state, &object, false);
        ResolutionOutcome::Countered
    } else {
        let effect = object.effect(catalog).cloned();
        let requirement = effect.as_ref().and_then(|e| e.target_requirement());

        let legal: SmallVec<[Target; 2]> = match &requirement {
            Some(req) => {
                let selector = TargetSelector::new(
                    state,
                    catalog,
                    req,
                    object.controller,
                    object.source_colors(catalog),
                );
                object
                    .targets
                    .iter()
                    .copied()
                    .filter(|t| selector.is_legal(*t))
                    .collect()
            }
            None => SmallVec::new(),
        };

        if requirement.is_some() && legal.is_empty() {
            finish_spell(state, &object, false);
            ResolutionOutcome::Fizzled
        } else {
            let permanent = object.is_spell()
                && catalog
                    .get(object.card.card_id)
                    .is_some_and(|t| t.types.is_permanent());
            if permanent {
                finish_spell(state, &object, true);
            }

            let source = match &object.item {
                StackItem::Spell => object.card.instance_id,
                StackItem::Ability { source, .. } => *source,
            };
            if let Some(effect) = &effect {
                let context = ResolverContext::new(catalog, object.controller, source, object.x_value);
                EffectResolver::resolve(state, effect, &legal, &context);
            }
            if !permanent {
                finish_spell(state, &object, false);
            }
            ResolutionOutcome::Resolved
        }
    };

    debug!("{} {}", id, outcome);
    state.reset_priority();
    Some((id, outcome))
}

/// Move a spell card off the stack. Abilities simply vanish.
fn finish_spell(state: &mut GameState, object: &StackObject, to_battlefield: bool) {
    if !object.is_spell() {
        return;
    }
    let mut card = object.card.clone();
    card.reset_for_zone_change();
    if to_battlefield {
        card.controller = object.controller;
        state.put_card(card, Zone::Battlefield, ZonePosition::Bottom);
    } else {
        state.put_card(card, Zone::Graveyard, ZonePosition::Bottom);
    }
}
