//! Automatic mana source selection.
//!
//! When a spell or ability is cast without enough mana floating, the engine
//! taps mana sources for the controller. Candidate sources are untapped
//! permanents whose mana ability costs only `{T}`. Selection:
//!
//! 1. Colored and `{C}` pips are covered by a bounded backtracking search
//!    that prefers damage-free options, then single-purpose sources, then
//!    fewer taps.
//! 2. Generic and X are covered from the sources left over, damage-free
//!    sources first.
//!
//! The validator and the reducer call the same planner, so an action that
//! validates always finds the same plan when applied. Executing a plan taps
//! each source once and applies its side-effect damage once.

use log::trace;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cost::ManaCost;
use super::pool::{ManaPool, ManaType};
use crate::abilities::AbilityEffect;
use crate::cards::{has_haste, CardCatalog, Color};
use crate::core::{AbilityIndex, GameState, InstanceId, PlayerId};

/// Upper bound on search nodes explored while covering pips.
const MAX_SEARCH_NODES: usize = 4096;

/// What a mana ability produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaProduction {
    /// A fixed amount of one mana type (`{T}: Add {C}{C}`).
    Fixed { mana: ManaType, amount: u32 },
    /// One mana of a choice of colors (`{T}: Add {W} or {U}`).
    Choice(SmallVec<[Color; 2]>),
    /// One mana of any color.
    AnyColor,
}

impl ManaProduction {
    /// One mana of one type.
    #[must_use]
    pub fn single(mana: ManaType) -> Self {
        ManaProduction::Fixed { mana, amount: 1 }
    }

    /// The `(type, amount)` outcomes available, narrowed by a color choice.
    ///
    /// A choice the production cannot make is ignored.
    #[must_use]
    pub fn options(&self, color_choice: Option<Color>) -> SmallVec<[(ManaType, u32); 5]> {
        match self {
            ManaProduction::Fixed { mana, amount } => smallvec::smallvec![(*mana, *amount)],
            ManaProduction::Choice(colors) => match color_choice {
                Some(choice) if colors.contains(&choice) => smallvec::smallvec![(choice.into(), 1)],
                _ => colors.iter().map(|c| (ManaType::from(*c), 1)).collect(),
            },
            ManaProduction::AnyColor => match color_choice {
                Some(choice) => smallvec::smallvec![(choice.into(), 1)],
                None => Color::ALL.into_iter().map(|c| (ManaType::from(c), 1)).collect(),
            },
        }
    }

    /// Whether a chosen color is one this production can make.
    #[must_use]
    pub fn allows(&self, color: Color) -> bool {
        match self {
            ManaProduction::Fixed { mana, .. } => mana.color() == Some(color),
            ManaProduction::Choice(colors) => colors.contains(&color),
            ManaProduction::AnyColor => true,
        }
    }
}

/// One way to tap a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManaOption {
    pub ability: AbilityIndex,
    pub mana: ManaType,
    pub amount: u32,
    /// Damage dealt to the controller when tapped this way.
    pub damage: u32,
}

/// An untapped permanent that can tap for mana.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManaSource {
    pub instance_id: InstanceId,
    pub options: SmallVec<[ManaOption; 4]>,
}

impl ManaSource {
    /// The cheapest way to make `mana`.
    fn best_for(&self, mana: ManaType) -> Option<ManaOption> {
        self.options
            .iter()
            .filter(|o| o.mana == mana)
            .min_by_key(|o| (o.damage, u32::MAX - o.amount))
            .copied()
    }

    /// The cheapest way to make any mana, colorless preferred on ties.
    fn best_any(&self) -> Option<ManaOption> {
        self.options
            .iter()
            .min_by_key(|o| (o.damage, o.mana != ManaType::Colorless, u32::MAX - o.amount))
            .copied()
    }

    /// Number of distinct mana types this source can make.
    fn flexibility(&self) -> u32 {
        let mut seen: SmallVec<[ManaType; 6]> = SmallVec::new();
        for option in &self.options {
            if !seen.contains(&option.mana) {
                seen.push(option.mana);
            }
        }
        seen.len() as u32
    }
}

/// A source chosen by the planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTap {
    pub source: InstanceId,
    pub ability: AbilityIndex,
    pub mana: ManaType,
    pub amount: u32,
    pub damage: u32,
}

impl From<(InstanceId, ManaOption)> for PlannedTap {
    fn from((source, option): (InstanceId, ManaOption)) -> Self {
        Self {
            source,
            ability: option.ability,
            mana: option.mana,
            amount: option.amount,
            damage: option.damage,
        }
    }
}

/// The sources to tap to pay a cost.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapPlan {
    pub taps: SmallVec<[PlannedTap; 4]>,
}

impl TapPlan {
    /// Whether the floating pool already pays the cost.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Total side-effect damage.
    #[must_use]
    pub fn total_damage(&self) -> u32 {
        self.taps.iter().map(|t| t.damage).sum()
    }

    /// Mana the plan adds.
    #[must_use]
    pub fn produced(&self) -> ManaPool {
        let mut pool = ManaPool::new();
        for tap in &self.taps {
            pool.add(tap.mana, tap.amount);
        }
        pool
    }
}

fn slot(mana: ManaType) -> usize {
    match mana {
        ManaType::White => 0,
        ManaType::Blue => 1,
        ManaType::Black => 2,
        ManaType::Red => 3,
        ManaType::Green => 4,
        ManaType::Colorless => 5,
    }
}

const SLOTS: [ManaType; 6] = [
    ManaType::White,
    ManaType::Blue,
    ManaType::Black,
    ManaType::Red,
    ManaType::Green,
    ManaType::Colorless,
];

/// Choose sources so that `pool` plus the tapped mana pays `cost`.
///
/// Returns `None` when no selection can pay. An empty plan means the
/// floating pool already suffices.
#[must_use]
pub fn plan_auto_tap(
    pool: &ManaPool,
    cost: &ManaCost,
    x_value: u32,
    sources: &[ManaSource],
) -> Option<TapPlan> {
    if pool.pay(cost, x_value).is_ok() {
        return Some(TapPlan::default());
    }

    let mut needs = [0u32; 6];
    let mut leftover = 0;
    for mana in SLOTS {
        let required = match mana.color() {
            Some(color) => cost.pips(color),
            None => cost.colorless,
        };
        needs[slot(mana)] = required.saturating_sub(pool.get(mana));
        leftover += pool.get(mana).saturating_sub(required);
    }
    let generic = cost.generic_with_x(x_value)?.saturating_sub(leftover);

    let mut search = PipSearch {
        sources,
        used: vec![false; sources.len()],
        chosen: SmallVec::new(),
        generic,
        best: None,
        nodes: 0,
    };
    search.run(needs, 0, 0, 0);

    let plan = search.best.map(|best| TapPlan { taps: best.taps });
    if let Some(plan) = &plan {
        trace!(
            "auto-tap for {}: {} sources, {} damage",
            cost,
            plan.taps.len(),
            plan.total_damage()
        );
    }
    plan
}

struct Candidate {
    key: (u32, u32, usize),
    taps: SmallVec<[PlannedTap; 4]>,
}

struct PipSearch<'a> {
    sources: &'a [ManaSource],
    used: Vec<bool>,
    chosen: SmallVec<[PlannedTap; 4]>,
    generic: u32,
    best: Option<Candidate>,
    nodes: usize,
}

impl PipSearch<'_> {
    fn run(&mut self, needs: [u32; 6], damage: u32, flex: u32, surplus: u32) {
        if self.nodes >= MAX_SEARCH_NODES {
            return;
        }
        self.nodes += 1;

        if let Some(best) = &self.best {
            if damage > best.key.0 {
                return;
            }
        }

        let Some(index) = needs.iter().position(|n| *n > 0) else {
            self.finish(damage, flex, surplus);
            return;
        };
        let mana = SLOTS[index];

        let mut candidates: SmallVec<[(usize, ManaOption, u32); 8]> = self
            .sources
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.used[*i])
            .filter_map(|(i, source)| {
                source
                    .best_for(mana)
                    .map(|option| (i, option, source.flexibility()))
            })
            .collect();
        candidates.sort_by_key(|(i, option, flexibility)| (option.damage, *flexibility, *i));

        for (i, option, flexibility) in candidates {
            let mut next = needs;
            let applied = option.amount.min(next[index]);
            next[index] -= applied;

            self.used[i] = true;
            self.chosen.push((self.sources[i].instance_id, option).into());
            self.run(
                next,
                damage + option.damage,
                flex + flexibility,
                surplus + option.amount - applied,
            );
            self.chosen.pop();
            self.used[i] = false;
        }
    }

    /// Cover generic mana from the unused sources and record the result.
    fn finish(&mut self, damage: u32, flex: u32, surplus: u32) {
        let mut taps = self.chosen.clone();
        let mut damage = damage;
        let mut remaining = self.generic.saturating_sub(surplus);

        if remaining > 0 {
            let mut rest: SmallVec<[(usize, ManaOption, u32); 8]> = self
                .sources
                .iter()
                .enumerate()
                .filter(|(i, _)| !self.used[*i])
                .filter_map(|(i, source)| source.best_any().map(|o| (i, o, source.flexibility())))
                .collect();
            rest.sort_by_key(|(i, option, flexibility)| {
                (option.damage, *flexibility, u32::MAX - option.amount, *i)
            });

            for (i, option, _) in rest {
                if remaining == 0 {
                    break;
                }
                taps.push((self.sources[i].instance_id, option).into());
                damage += option.damage;
                remaining = remaining.saturating_sub(option.amount);
            }
            if remaining > 0 {
                return;
            }
        }

        let key = (damage, flex, taps.len());
        let better = match &self.best {
            Some(best) => key < best.key,
            None => true,
        };
        if better {
            self.best = Some(Candidate { key, taps });
        }
    }
}

/// Mana sources `player` could tap right now.
///
/// `exclude` skips one permanent (a source whose own ability is being
/// activated with a `{T}` cost). `color_choice` narrows choice and
/// any-color productions.
#[must_use]
pub fn collect_mana_sources(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    exclude: Option<InstanceId>,
    color_choice: Option<Color>,
) -> Vec<ManaSource> {
    let mut sources = Vec::new();

    for card in state.player(player).battlefield.iter() {
        if card.tapped || Some(card.instance_id) == exclude {
            continue;
        }
        let Some(template) = catalog.get(card.card_id) else {
            continue;
        };
        if template.types.is_creature() && card.summoning_sick && !has_haste(template) {
            continue;
        }

        let mut options = SmallVec::new();
        for (index, ability) in template.abilities.iter().enumerate() {
            if !ability.cost.is_tap_only() {
                continue;
            }
            let AbilityEffect::AddMana { production, damage } = &ability.effect else {
                continue;
            };
            for (mana, amount) in production.options(color_choice) {
                // Pain lands only hurt when tapped for colored mana.
                let damage = if mana == ManaType::Colorless { 0 } else { *damage };
                options.push(ManaOption {
                    ability: AbilityIndex(index as u8),
                    mana,
                    amount,
                    damage,
                });
            }
        }

        if !options.is_empty() {
            sources.push(ManaSource {
                instance_id: card.instance_id,
                options,
            });
        }
    }

    sources
}

/// Tap every source in `plan` for `player`, adding its mana and applying
/// its damage.
pub fn execute_tap_plan(state: &mut GameState, player: PlayerId, plan: &TapPlan) {
    for tap in &plan.taps {
        if let Some(card) = state.battlefield_card_mut(tap.source) {
            card.tapped = true;
        }
        let player_state = state.player_mut(player);
        player_state.mana_pool.add(tap.mana, tap.amount);
        if tap.damage > 0 {
            player_state.life -= tap.damage as i32;
            trace!("{} takes {} damage from {}", player, tap.damage, tap.source);
        }
    }
}
