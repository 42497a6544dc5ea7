//! Shared test table: an engine plus a hand-built game state.

#![allow(dead_code)]

use manacore::core::{Action, GameState, InstanceId, InvalidAction, PlayerId, Step, Target};
use manacore::{Engine, RulesEngine, Zone};

pub const P: PlayerId = PlayerId::Player;
pub const O: PlayerId = PlayerId::Opponent;

pub struct Table {
    pub engine: Engine,
    pub state: GameState,
}

impl Table {
    /// Turn 1, `Player`'s first main phase, draw already taken.
    pub fn main_phase() -> Self {
        let mut state = GameState::new(42, 20);
        state.step = Step::Main1;
        state.draw_taken = true;
        Self {
            engine: Engine::with_core_set(),
            state,
        }
    }

    /// Put a card into a zone. Permanents are not summoning sick.
    pub fn add(&mut self, name: &str, player: PlayerId, zone: Zone) -> InstanceId {
        let id = self.add_sick(name, player, zone);
        if zone == Zone::Battlefield {
            self.state.battlefield_card_mut(id).unwrap().summoning_sick = false;
        }
        id
    }

    /// Put a card into a zone as it would arrive this turn.
    pub fn add_sick(&mut self, name: &str, player: PlayerId, zone: Zone) -> InstanceId {
        let card = self
            .engine
            .catalog()
            .get_by_name(name)
            .unwrap_or_else(|| panic!("unknown card {name}"))
            .id;
        self.state.create_card(card, player, zone)
    }

    pub fn lands(&mut self, name: &str, player: PlayerId, count: usize) {
        for _ in 0..count {
            self.add(name, player, Zone::Battlefield);
        }
    }

    pub fn try_apply(&mut self, action: Action) -> Result<(), InvalidAction> {
        self.state = self.engine.apply_action(&self.state, &action)?;
        Ok(())
    }

    pub fn apply(&mut self, action: Action) {
        if let Err(err) = self.try_apply(action.clone()) {
            panic!("{action:?} rejected: {err}");
        }
    }

    pub fn cast(&mut self, player: PlayerId, card: InstanceId, targets: &[Target]) {
        self.apply(Action::cast(player, card, targets));
    }

    /// The priority holder passes.
    pub fn pass(&mut self) {
        let player = self.state.priority_player;
        self.apply(Action::pass(player));
    }

    /// Both players pass in turn.
    pub fn pass_both(&mut self) {
        self.pass();
        self.pass();
    }

    /// Pass until the stack is empty.
    pub fn resolve_stack(&mut self) {
        while !self.state.stack.is_empty() {
            self.pass_both();
        }
    }

    /// Pass (or untap/draw) until the given step is reached.
    pub fn advance_to(&mut self, step: Step) {
        for _ in 0..64 {
            if self.state.step == step {
                return;
            }
            let actor = self.engine.acting_player(&self.state).expect("game ended");
            let action = match self.state.step {
                Step::Untap => Action::untap(actor),
                Step::Draw if !self.state.draw_taken => Action::draw(actor),
                _ => Action::pass(actor),
            };
            self.apply(action);
        }
        panic!("never reached {step}");
    }

    pub fn life(&self, player: PlayerId) -> i32 {
        self.state.player(player).life
    }

    pub fn on_battlefield(&self, id: InstanceId) -> bool {
        self.state.battlefield_card(id).is_some()
    }

    pub fn in_graveyard(&self, player: PlayerId, id: InstanceId) -> bool {
        self.state.player(player).graveyard.iter().any(|c| c.instance_id == id)
    }
}

/// A 40-card red/green deck of core set cards.
pub fn red_green_deck() -> Vec<String> {
    let mut deck = Vec::new();
    for (name, count) in [
        ("Mountain", 9),
        ("Forest", 8),
        ("Grizzly Bears", 4),
        ("Raging Goblin", 3),
        ("Hill Giant", 3),
        ("Shock", 3),
        ("Lightning Bolt", 2),
        ("Giant Growth", 2),
        ("Fireball", 2),
        ("Llanowar Elves", 2),
        ("Mogg Fanatic", 2),
    ] {
        deck.extend(std::iter::repeat(name.to_string()).take(count));
    }
    deck
}

/// A 40-card white/black deck of core set cards.
pub fn white_black_deck() -> Vec<String> {
    let mut deck = Vec::new();
    for (name, count) in [
        ("Plains", 9),
        ("Swamp", 8),
        ("Savannah Lions", 4),
        ("Walking Corpse", 4),
        ("White Knight", 2),
        ("Severed Legion", 2),
        ("Terror", 3),
        ("Diabolic Edict", 2),
        ("Raise the Alarm", 2),
        ("Holy Strength", 2),
        ("Vampire Nighthawk", 2),
    ] {
        deck.extend(std::iter::repeat(name.to_string()).take(count));
    }
    deck
}
