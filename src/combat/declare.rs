//! Attacker and blocker declarations.
//!
//! Error messages name the violated condition or keyword verbatim
//! ("tapped", "summoning sickness", "Defender", "not attacking", "Flying",
//! "Menace", "Fear", "Intimidate", "...walk", "protection"), since callers
//! match on substrings.

use log::debug;
use smallvec::SmallVec;

use crate::cards::{
    has_defender, has_fear, has_flying, has_haste, has_intimidate, has_menace, has_reach, has_vigilance,
    BasicLandType, CardCatalog, CardInstance, CardTemplate, Color,
};
use crate::core::{Block, ErrorKind, GameState, InstanceId, PlayerId, ValidationError};

fn combat_error(message: String) -> ValidationError {
    ValidationError::new(ErrorKind::IllegalCombat, message)
}

/// A permanent controlled by `player`, with its template.
fn own_creature<'a>(
    state: &'a GameState,
    catalog: &'a CardCatalog,
    player: PlayerId,
    id: InstanceId,
) -> Result<(&'a CardInstance, &'a CardTemplate), ValidationError> {
    let Some(card) = state.battlefield_card(id) else {
        return Err(match state.find_card(id) {
            Some(_) => ValidationError::new(ErrorKind::WrongZone, format!("{id} is not on the battlefield")),
            None => ValidationError::new(ErrorKind::NotFound, format!("{id} does not exist")),
        });
    };
    let label = catalog.label(card);
    if card.controller != player {
        return Err(combat_error(format!("{player} does not control {label}")));
    }
    match catalog.get(card.card_id) {
        Some(template) if template.types.is_creature() => Ok((card, template)),
        Some(_) => Err(combat_error(format!("{label} is not a creature"))),
        None => Err(ValidationError::new(ErrorKind::NotFound, format!("{label} has no card data"))),
    }
}

/// Whether a creature could attack right now, ignoring timing.
pub fn check_attacker(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    id: InstanceId,
) -> Result<(), ValidationError> {
    let (card, template) = own_creature(state, catalog, player, id)?;
    let label = catalog.label(card);
    if card.tapped {
        return Err(combat_error(format!("{label} is tapped and cannot attack")));
    }
    if has_defender(template) {
        return Err(combat_error(format!("{label} has Defender and cannot attack")));
    }
    if card.summoning_sick && !has_haste(template) {
        return Err(combat_error(format!("{label} has summoning sickness")));
    }
    Ok(())
}

/// Validate an attacker declaration. Every violation is reported.
#[must_use]
pub fn validate_attackers(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    attackers: &[InstanceId],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, id) in attackers.iter().enumerate() {
        if attackers[..i].contains(id) {
            errors.push(combat_error(format!("{id} is declared as an attacker twice")));
            continue;
        }
        if let Err(err) = check_attacker(state, catalog, player, *id) {
            errors.push(err);
        }
    }
    errors
}

/// Whether the defending player controls a land of the walked type.
fn defender_has_land(state: &GameState, catalog: &CardCatalog, defender: PlayerId, land: BasicLandType) -> bool {
    state.player(defender).battlefield.iter().any(|c| {
        catalog
            .get(c.card_id)
            .is_some_and(|t| t.types.is_land() && t.types.basic_land_types().any(|l| l == land))
    })
}

/// Evasion and protection checks for one blocker/attacker pair.
fn check_evasion(
    state: &GameState,
    catalog: &CardCatalog,
    blocker: (&CardInstance, &CardTemplate),
    attacker: (&CardInstance, &CardTemplate),
) -> Result<(), ValidationError> {
    let (blocker_card, blocker_t) = blocker;
    let (attacker_card, attacker_t) = attacker;
    let a = catalog.label(attacker_card);
    let b = catalog.label(blocker_card);

    if has_flying(attacker_t) && !has_flying(blocker_t) && !has_reach(blocker_t) {
        return Err(combat_error(format!(
            "{b} cannot block {a}: Flying creatures can only be blocked by creatures with Flying or Reach"
        )));
    }
    if has_fear(attacker_t) && !blocker_t.types.is_artifact() && !blocker_t.has_color(Color::Black) {
        return Err(combat_error(format!(
            "{b} cannot block {a}: Fear creatures can only be blocked by black or artifact creatures"
        )));
    }
    if has_intimidate(attacker_t) && !blocker_t.types.is_artifact() && !blocker_t.shares_color(&attacker_t.colors) {
        return Err(combat_error(format!(
            "{b} cannot block {a}: Intimidate creatures can only be blocked by artifact creatures or creatures sharing a color"
        )));
    }
    for land in attacker_t.keywords.landwalks() {
        if defender_has_land(state, catalog, blocker_card.controller, land) {
            return Err(combat_error(format!(
                "{b} cannot block {a}: {} makes it unblockable while you control a {}",
                land.walk_name(),
                land.name()
            )));
        }
    }
    if let Some(color) = attacker_t.keywords.protections().find(|c| blocker_t.has_color(*c)) {
        return Err(combat_error(format!(
            "{b} cannot block {a}: it has protection from {color}"
        )));
    }
    Ok(())
}

/// Whether `blocker` may block `attacker`, ignoring timing and menace.
pub fn check_block(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    blocker: InstanceId,
    attacker: InstanceId,
) -> Result<(), ValidationError> {
    let (blocker_card, blocker_t) = own_creature(state, catalog, player, blocker)?;
    if blocker_card.tapped {
        return Err(combat_error(format!(
            "{} is tapped and cannot block",
            catalog.label(blocker_card)
        )));
    }

    let attacker_card = match state.battlefield_card(attacker) {
        Some(card) if card.attacking => card,
        Some(card) => {
            return Err(combat_error(format!("{} is not attacking", catalog.label(card))));
        }
        None => return Err(combat_error(format!("{attacker} is not attacking"))),
    };
    let Some(attacker_t) = catalog.get(attacker_card.card_id) else {
        return Err(ValidationError::new(ErrorKind::NotFound, format!("{attacker} has no card data")));
    };

    check_evasion(state, catalog, (blocker_card, blocker_t), (attacker_card, attacker_t))
}

/// Validate a blocker declaration. Every violation is reported.
#[must_use]
pub fn validate_blockers(
    state: &GameState,
    catalog: &CardCatalog,
    player: PlayerId,
    blocks: &[Block],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        if blocks[..i].iter().any(|b| b.blocker == block.blocker) {
            errors.push(combat_error(format!("{} can only block one attacker", block.blocker)));
            continue;
        }
        if let Err(err) = check_block(state, catalog, player, block.blocker, block.attacker) {
            errors.push(err);
        }
    }

    errors.extend(menace_violations(state, catalog, blocks));
    errors
}

/// Attackers with Menace blocked by exactly one creature.
fn menace_violations(state: &GameState, catalog: &CardCatalog, blocks: &[Block]) -> Vec<ValidationError> {
    let mut seen: SmallVec<[InstanceId; 4]> = SmallVec::new();
    let mut errors = Vec::new();
    for block in blocks {
        if seen.contains(&block.attacker) {
            continue;
        }
        seen.push(block.attacker);
        let count = blocks.iter().filter(|b| b.attacker == block.attacker).count();
        let Some(card) = state.battlefield_card(block.attacker) else {
            continue;
        };
        if count == 1 && catalog.get(card.card_id).is_some_and(has_menace) {
            errors.push(combat_error(format!(
                "{} has Menace and can't be blocked except by two or more creatures",
                catalog.label(card)
            )));
        }
    }
    errors
}

/// Mark attackers and tap those without Vigilance.
pub fn declare_attackers(state: &mut GameState, catalog: &CardCatalog, attackers: &[InstanceId]) {
    for id in attackers {
        let vigilant = state
            .battlefield_card(*id)
            .and_then(|c| catalog.get(c.card_id))
            .is_some_and(has_vigilance);
        if let Some(card) = state.battlefield_card_mut(*id) {
            card.attacking = true;
            if !vigilant {
                card.tapped = true;
            }
        }
    }
    state.combat.attackers_declared = true;
    debug!("{} attacks with {} creature(s)", state.active_player, attackers.len());
}

/// Record blocks.
pub fn declare_blockers(state: &mut GameState, blocks: &[Block]) {
    for block in blocks {
        if let Some(card) = state.battlefield_card_mut(block.blocker) {
            card.blocking = Some(block.attacker);
        }
    }
    state.combat.blocks.extend_from_slice(blocks);
    state.combat.blockers_declared = true;
    debug!("{} declares {} block(s)", state.defending_player(), blocks.len());
}

/// Creatures `player` could attack with.
#[must_use]
pub fn possible_attackers(state: &GameState, catalog: &CardCatalog, player: PlayerId) -> Vec<InstanceId> {
    state
        .player(player)
        .battlefield
        .iter()
        .map(|c| c.instance_id)
        .filter(|id| check_attacker(state, catalog, player, *id).is_ok())
        .collect()
}

/// Attackers each of `player`'s creatures could legally block.
#[must_use]
pub fn possible_blocks(state: &GameState, catalog: &CardCatalog, player: PlayerId) -> Vec<(InstanceId, Vec<InstanceId>)> {
    let attackers: Vec<InstanceId> = state
        .player(player.other())
        .battlefield
        .iter()
        .filter(|c| c.attacking)
        .map(|c| c.instance_id)
        .collect();

    state
        .player(player)
        .battlefield
        .iter()
        .filter_map(|c| {
            let options: Vec<InstanceId> = attackers
                .iter()
                .copied()
                .filter(|a| check_block(state, catalog, player, c.instance_id, *a).is_ok())
                .collect();
            (!options.is_empty()).then_some((c.instance_id, options))
        })
        .collect()
}
