//! Game state snapshot.
//!
//! ## GameState
//!
//! Complete, immutable-by-convention snapshot of one game:
//! - Turn structure (turn count, active player, step, priority)
//! - The stack
//! - Per-player state (life, mana pool, zones)
//! - Combat bookkeeping and pending obligations
//! - Action history and the seeded RNG
//!
//! Every ordered sequence is an `im::Vector`, so cloning a snapshot is O(1)
//! and the reducer can produce a new state per action without deep copies.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{ActionRecord, Block};
use super::entity::{InstanceId, StackObjectId};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardId, CardInstance, CardType};
use crate::mana::ManaPool;
use crate::stack::StackObject;
use crate::zones::Zone;

/// Turn phases. Derived from the current [`Step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Beginning,
    PrecombatMain,
    Combat,
    PostcombatMain,
    Ending,
}

/// Turn steps in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Untap,
    Upkeep,
    Draw,
    Main1,
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,
    Main2,
    End,
    Cleanup,
}

impl Step {
    /// The phase this step belongs to.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Step::Untap | Step::Upkeep | Step::Draw => Phase::Beginning,
            Step::Main1 => Phase::PrecombatMain,
            Step::BeginCombat
            | Step::DeclareAttackers
            | Step::DeclareBlockers
            | Step::CombatDamage
            | Step::EndCombat => Phase::Combat,
            Step::Main2 => Phase::PostcombatMain,
            Step::End | Step::Cleanup => Phase::Ending,
        }
    }

    /// The following step within the same turn, `None` after cleanup.
    #[must_use]
    pub const fn next(self) -> Option<Step> {
        match self {
            Step::Untap => Some(Step::Upkeep),
            Step::Upkeep => Some(Step::Draw),
            Step::Draw => Some(Step::Main1),
            Step::Main1 => Some(Step::BeginCombat),
            Step::BeginCombat => Some(Step::DeclareAttackers),
            Step::DeclareAttackers => Some(Step::DeclareBlockers),
            Step::DeclareBlockers => Some(Step::CombatDamage),
            Step::CombatDamage => Some(Step::EndCombat),
            Step::EndCombat => Some(Step::Main2),
            Step::Main2 => Some(Step::End),
            Step::End => Some(Step::Cleanup),
            Step::Cleanup => None,
        }
    }

    /// Whether sorcery-speed actions may happen in this step.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Step::Main1 | Step::Main2)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::Untap => "untap",
            Step::Upkeep => "upkeep",
            Step::Draw => "draw",
            Step::Main1 => "main1",
            Step::BeginCombat => "beginning of combat",
            Step::DeclareAttackers => "declare attackers",
            Step::DeclareBlockers => "declare blockers",
            Step::CombatDamage => "combat damage",
            Step::EndCombat => "end of combat",
            Step::Main2 => "main2",
            Step::End => "end",
            Step::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Per-player state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Life total. Checked against zero only by state-based actions.
    pub life: i32,

    /// Unspent mana.
    pub mana_pool: ManaPool,

    /// Cards in hand, oldest first.
    pub hand: Vector<CardInstance>,

    /// Library, top card first.
    pub library: Vector<CardInstance>,

    /// Graveyard, oldest first.
    pub graveyard: Vector<CardInstance>,

    /// Permanents this player controls.
    pub battlefield: Vector<CardInstance>,

    /// Lands played this turn. Reset by the untap step.
    pub lands_played_this_turn: u8,

    /// Set when a draw was attempted from an empty library.
    pub drew_from_empty_library: bool,
}

impl PlayerState {
    /// Create an empty player state.
    #[must_use]
    pub fn new(life: i32) -> Self {
        Self {
            life,
            mana_pool: ManaPool::default(),
            hand: Vector::new(),
            library: Vector::new(),
            graveyard: Vector::new(),
            battlefield: Vector::new(),
            lands_played_this_turn: 0,
            drew_from_empty_library: false,
        }
    }

    /// The sequence backing a player-owned zone.
    ///
    /// Returns `None` for zones that are not stored per player.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> Option<&Vector<CardInstance>> {
        match zone {
            Zone::Hand => Some(&self.hand),
            Zone::Library => Some(&self.library),
            Zone::Graveyard => Some(&self.graveyard),
            Zone::Battlefield => Some(&self.battlefield),
            Zone::Stack => None,
        }
    }

    /// Mutable access to a player-owned zone.
    pub fn zone_mut(&mut self, zone: Zone) -> Option<&mut Vector<CardInstance>> {
        match zone {
            Zone::Hand => Some(&mut self.hand),
            Zone::Library => Some(&mut self.library),
            Zone::Graveyard => Some(&mut self.graveyard),
            Zone::Battlefield => Some(&mut self.battlefield),
            Zone::Stack => None,
        }
    }
}

/// Combat bookkeeping for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Whether DECLARE_ATTACKERS has been taken this combat.
    pub attackers_declared: bool,

    /// Whether DECLARE_BLOCKERS has been taken this combat.
    pub blockers_declared: bool,

    /// Declared blocks in declaration order.
    ///
    /// An attacker listed here stays blocked even if its blocker leaves.
    pub blocks: SmallVec<[Block; 4]>,
}

impl CombatState {
    /// Whether an attacker had any blocker declared against it.
    #[must_use]
    pub fn is_blocked(&self, attacker: InstanceId) -> bool {
        self.blocks.iter().any(|b| b.attacker == attacker)
    }

    /// Blockers declared against an attacker, in declaration order.
    pub fn blockers_of(&self, attacker: InstanceId) -> impl Iterator<Item = InstanceId> + '_ {
        self.blocks
            .iter()
            .filter(move |b| b.attacker == attacker)
            .map(|b| b.blocker)
    }
}

/// A sacrifice a player owes before the game can continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSacrifice {
    /// The player who must sacrifice.
    pub player: PlayerId,
    /// The permanent type they must choose.
    pub card_type: CardType,
}

/// Complete game state.
///
/// Cheap to clone (structural sharing). The reducer never mutates its
/// input; it clones, mutates the clone, and returns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Turn number, starting at 1.
    pub turn_count: u32,

    /// Whose turn it is.
    pub active_player: PlayerId,

    /// Who may act now.
    pub priority_player: PlayerId,

    /// Current step.
    pub step: Step,

    /// Passes in a row without any other action.
    pub consecutive_passes: u8,

    /// The stack, bottom first. The top is the last element.
    pub stack: Vector<StackObject>,

    /// Per-player state.
    pub players: PlayerMap<PlayerState>,

    /// Combat bookkeeping.
    pub combat: CombatState,

    /// Sacrifice that must be made before anything else happens.
    pub pending_sacrifice: Option<PendingSacrifice>,

    /// Whether the active player has made this turn's draw.
    pub draw_taken: bool,

    /// Whether the game has ended.
    pub game_over: bool,

    /// The winner, or `None` for a draw or an ongoing game.
    pub winner: Option<PlayerId>,

    /// Every action applied so far.
    pub action_history: Vector<ActionRecord>,

    /// Seeded RNG for library shuffles.
    pub rng: GameRng,

    next_instance_id: u32,
    next_stack_id: u32,
}

impl GameState {
    /// Create an empty game at the start of turn 1 with `Player` active.
    ///
    /// Libraries and hands are empty; see
    /// [`Engine::initialize_game`](crate::rules::Engine::initialize_game)
    /// for a playable starting position.
    #[must_use]
    pub fn new(seed: u64, starting_life: i32) -> Self {
        Self {
            turn_count: 1,
            active_player: PlayerId::Player,
            priority_player: PlayerId::Player,
            step: Step::Untap,
            consecutive_passes: 0,
            stack: Vector::new(),
            players: PlayerMap::new(|_| PlayerState::new(starting_life)),
            combat: CombatState::default(),
            pending_sacrifice: None,
            draw_taken: false,
            game_over: false,
            winner: None,
            action_history: Vector::new(),
            rng: GameRng::new(seed),
            next_instance_id: 1,
            next_stack_id: 1,
        }
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.step.phase()
    }

    /// The non-active player.
    #[must_use]
    pub fn defending_player(&self) -> PlayerId {
        self.active_player.other()
    }

    /// Whether `player` holds priority.
    #[must_use]
    pub fn has_priority(&self, player: PlayerId) -> bool {
        !self.game_over && self.priority_player == player
    }

    /// A player's state.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// Mutable access to a player's state.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Allocate a fresh instance id.
    pub fn alloc_instance_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }

    /// Allocate a fresh stack object id.
    pub fn alloc_stack_id(&mut self) -> StackObjectId {
        let id = StackObjectId(self.next_stack_id);
        self.next_stack_id += 1;
        id
    }

    /// Create a card instance in `owner`'s zone.
    ///
    /// Permanents created directly on the battlefield are summoning sick.
    pub fn create_card(&mut self, card_id: CardId, owner: PlayerId, zone: Zone) -> InstanceId {
        let id = self.alloc_instance_id();
        let card = CardInstance::new(id, card_id, owner, zone);
        if let Some(cards) = self.players[owner].zone_mut(zone) {
            cards.push_back(card);
        }
        id
    }

    /// Find a card in any player zone or cast on the stack.
    #[must_use]
    pub fn find_card(&self, id: InstanceId) -> Option<&CardInstance> {
        for (_, player) in self.players.iter() {
            for zone in [&player.battlefield, &player.hand, &player.graveyard, &player.library] {
                if let Some(card) = zone.iter().find(|c| c.instance_id == id) {
                    return Some(card);
                }
            }
        }
        self.stack
            .iter()
            .filter(|object| object.is_spell())
            .map(|object| &object.card)
            .find(|c| c.instance_id == id)
    }

    /// A permanent on either battlefield.
    #[must_use]
    pub fn battlefield_card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.players
            .iter()
            .find_map(|(_, p)| p.battlefield.iter().find(|c| c.instance_id == id))
    }

    /// Mutable access to a permanent on either battlefield.
    pub fn battlefield_card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        let controller = self
            .players
            .iter()
            .find(|(_, p)| p.battlefield.iter().any(|c| c.instance_id == id))
            .map(|(player, _)| player)?;
        self.players[controller]
            .battlefield
            .iter_mut()
            .find(|c| c.instance_id == id)
    }

    /// A card in a player's hand.
    #[must_use]
    pub fn hand_card(&self, player: PlayerId, id: InstanceId) -> Option<&CardInstance> {
        self.players[player].hand.iter().find(|c| c.instance_id == id)
    }

    /// All permanents, active player's first.
    pub fn permanents(&self) -> impl Iterator<Item = &CardInstance> {
        let active = self.active_player;
        self.players[active]
            .battlefield
            .iter()
            .chain(self.players[active.other()].battlefield.iter())
    }

    /// A stack object by id.
    #[must_use]
    pub fn stack_object(&self, id: StackObjectId) -> Option<&StackObject> {
        self.stack.iter().find(|o| o.id == id)
    }

    /// The top of the stack.
    #[must_use]
    pub fn stack_top(&self) -> Option<&StackObject> {
        self.stack.last()
    }

    /// Record an applied action.
    pub fn record(&mut self, action: super::action::Action) {
        let sequence = self.action_history.len() as u32;
        self.action_history
            .push_back(ActionRecord::new(action, self.turn_count, sequence));
    }

    /// End the game.
    pub fn end_game(&mut self, winner: Option<PlayerId>) {
        self.game_over = true;
        self.winner = winner;
    }
}
