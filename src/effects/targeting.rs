//! Effect targeting system.
//!
//! - `TargetRequirement`: how many targets of which kind an effect needs
//! - `TargetRestriction`: extra filters (nonblack, nonartifact)
//! - `TargetSelector`: legality checks and enumeration against a state
//!
//! Legality rules:
//! - creature targets must be creatures on the battlefield
//! - spell targets must be spells still on the stack
//! - hexproof: targetable only by the permanent's controller
//! - shroud: targetable by no one
//! - protection from a color: not targetable by sources of that color

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{has_hexproof, has_shroud, protected_from_any, CardCatalog, CardInstance, Color};
use crate::core::{ErrorKind, GameState, PlayerId, Target, ValidationError};
use crate::stack::StackItem;

/// What kind of thing may be targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// A creature or a player.
    Any,
    Creature,
    Player,
    /// A spell on the stack.
    Spell,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TargetKind::Any => "creature or player",
            TargetKind::Creature => "creature",
            TargetKind::Player => "player",
            TargetKind::Spell => "spell",
        };
        f.write_str(name)
    }
}

/// Additional filters on creature targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRestriction {
    NonBlack,
    NonArtifact,
}

/// Targets required by an effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRequirement {
    /// Exact number of distinct targets.
    pub count: usize,
    pub kind: TargetKind,
    pub restrictions: SmallVec<[TargetRestriction; 2]>,
}

impl TargetRequirement {
    /// Exactly one target of `kind`.
    #[must_use]
    pub fn single(kind: TargetKind) -> Self {
        Self {
            count: 1,
            kind,
            restrictions: SmallVec::new(),
        }
    }

    /// Add restrictions (builder pattern).
    #[must_use]
    pub fn with_restrictions(mut self, restrictions: &[TargetRestriction]) -> Self {
        self.restrictions.extend_from_slice(restrictions);
        self
    }
}

/// Checks and enumerates targets for one spell or ability.
///
/// `controller` is the player choosing targets; `source_colors` are the
/// colors of the spell or of the permanent whose ability this is.
pub struct TargetSelector<'a> {
    state: &'a GameState,
    catalog: &'a CardCatalog,
    requirement: &'a TargetRequirement,
    controller: PlayerId,
    source_colors: &'a [Color],
}

impl<'a> TargetSelector<'a> {
    /// Create a selector.
    #[must_use]
    pub fn new(
        state: &'a GameState,
        catalog: &'a CardCatalog,
        requirement: &'a TargetRequirement,
        controller: PlayerId,
        source_colors: &'a [Color],
    ) -> Self {
        Self {
            state,
            catalog,
            requirement,
            controller,
            source_colors,
        }
    }

    /// Check one target. The error names the violated rule.
    pub fn check(&self, target: Target) -> Result<(), ValidationError> {
        match target {
            Target::Player(player) => match self.requirement.kind {
                TargetKind::Any | TargetKind::Player => Ok(()),
                kind => Err(illegal(format!("{player} is not a legal target ({kind} required)"))),
            },
            Target::Card(id) => {
                if !matches!(self.requirement.kind, TargetKind::Any | TargetKind::Creature) {
                    return Err(illegal(format!(
                        "Card {id} is not a legal target ({} required)",
                        self.requirement.kind
                    )));
                }
                let Some(card) = self.state.battlefield_card(id) else {
                    return Err(if self.state.find_card(id).is_some() {
                        ValidationError::new(
                            ErrorKind::WrongZone,
                            format!("Target {id} is not on the battlefield"),
                        )
                    } else {
                        ValidationError::new(ErrorKind::NotFound, format!("Target {id} does not exist"))
                    });
                };
                self.check_permanent(card)
            }
            Target::StackObject(id) => {
                if self.requirement.kind != TargetKind::Spell {
                    return Err(illegal(format!(
                        "{id} is not a legal target ({} required)",
                        self.requirement.kind
                    )));
                }
                match self.state.stack_object(id) {
                    Some(object) if matches!(object.item, StackItem::Spell) => Ok(()),
                    Some(_) => Err(illegal(format!("{id} is an ability, not a spell"))),
                    None => Err(ValidationError::new(
                        ErrorKind::NotFound,
                        format!("Target {id} is not on the stack"),
                    )),
                }
            }
        }
    }

    fn check_permanent(&self, card: &CardInstance) -> Result<(), ValidationError> {
        let label = self.catalog.label(card);
        let Some(template) = self.catalog.get(card.card_id) else {
            return Err(ValidationError::new(
                ErrorKind::NotFound,
                format!("Target {label} has no card data"),
            ));
        };

        if !template.types.is_creature() {
            return Err(illegal(format!("Target {label} is not a creature")));
        }
        if has_shroud(template) {
            return Err(illegal(format!("Target {label} has shroud")));
        }
        if has_hexproof(template) && card.controller != self.controller {
            return Err(illegal(format!("Target {label} has hexproof")));
        }
        if let Some(color) = protected_from_any(template, self.source_colors) {
            return Err(illegal(format!("Target {label} has protection from {color}")));
        }
        for restriction in &self.requirement.restrictions {
            match restriction {
                TargetRestriction::NonBlack if template.colors.contains(&Color::Black) => {
                    return Err(illegal(format!("Target {label} is black")));
                }
                TargetRestriction::NonArtifact if template.types.is_artifact() => {
                    return Err(illegal(format!("Target {label} is an artifact")));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Whether `target` is currently legal.
    #[must_use]
    pub fn is_legal(&self, target: Target) -> bool {
        self.check(target).is_ok()
    }

    /// Every currently legal target, without duplicates.
    ///
    /// Order: players (controller first), then permanents (active player's
    /// first), then stack objects top-down.
    #[must_use]
    pub fn valid_targets(&self) -> Vec<Target> {
        let mut targets = Vec::new();
        let kind = self.requirement.kind;

        if matches!(kind, TargetKind::Any | TargetKind::Player) {
            targets.push(Target::Player(self.controller));
            targets.push(Target::Player(self.controller.other()));
        }
        if matches!(kind, TargetKind::Any | TargetKind::Creature) {
            targets.extend(
                self.state
                    .permanents()
                    .map(|c| Target::Card(c.instance_id))
                    .filter(|t| self.is_legal(*t)),
            );
        }
        if kind == TargetKind::Spell {
            targets.extend(
                self.state
                    .stack
                    .iter()
                    .rev()
                    .map(|o| Target::StackObject(o.id))
                    .filter(|t| self.is_legal(*t)),
            );
        }

        targets
    }

    /// Validate a full selection: exact count, no duplicates, every target
    /// legal. All violations are reported.
    #[must_use]
    pub fn validate_selection(&self, selected: &[Target]) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if selected.len() != self.requirement.count {
            errors.push(illegal(format!(
                "Expected {} target(s), got {}",
                self.requirement.count,
                selected.len()
            )));
        }
        for (i, target) in selected.iter().enumerate() {
            if selected[..i].contains(target) {
                errors.push(illegal(format!("Duplicate target {target}")));
                continue;
            }
            if let Err(err) = self.check(*target) {
                errors.push(err);
            }
        }

        errors
    }

    /// Every legal selection of exactly `count` distinct targets.
    #[must_use]
    pub fn combinations(&self) -> Vec<SmallVec<[Target; 2]>> {
        let candidates = self.valid_targets();
        let mut out = Vec::new();
        let mut current = SmallVec::new();
        combine(&candidates, self.requirement.count, 0, &mut current, &mut out);
        out
    }
}

fn combine(
    candidates: &[Target],
    count: usize,
    start: usize,
    current: &mut SmallVec<[Target; 2]>,
    out: &mut Vec<SmallVec<[Target; 2]>>,
) {
    if current.len() == count {
        out.push(current.clone());
        return;
    }
    for i in start..candidates.len() {
        current.push(candidates[i]);
        combine(candidates, count, i + 1, current, out);
        current.pop();
    }
}

fn illegal(message: String) -> ValidationError {
    ValidationError::new(ErrorKind::IllegalTarget, message)
}

/// Validate targets chosen for an effect with `requirement`.
///
/// With no requirement, any supplied target is an error.
#[must_use]
pub fn validate_targets(
    state: &GameState,
    catalog: &CardCatalog,
    requirement: Option<&TargetRequirement>,
    targets: &[Target],
    controller: PlayerId,
    source_colors: &[Color],
) -> Vec<ValidationError> {
    match requirement {
        Some(req) => TargetSelector::new(state, catalog, req, controller, source_colors)
            .validate_selection(targets),
        None if targets.is_empty() => Vec::new(),
        None => vec![illegal(format!(
            "Expected no targets, got {}",
            targets.len()
        ))],
    }
}

/// Every legal single target for `requirement`.
#[must_use]
pub fn get_legal_targets(
    state: &GameState,
    catalog: &CardCatalog,
    requirement: &TargetRequirement,
    controller: PlayerId,
    source_colors: &[Color],
) -> Vec<Target> {
    TargetSelector::new(state, catalog, requirement, controller, source_colors).valid_targets()
}

/// Every legal full selection for `requirement`.
///
/// With no requirement the only selection is the empty one.
#[must_use]
pub fn get_all_legal_target_combinations(
    state: &GameState,
    catalog: &CardCatalog,
    requirement: Option<&TargetRequirement>,
    controller: PlayerId,
    source_colors: &[Color],
) -> Vec<SmallVec<[Target; 2]>> {
    match requirement {
        Some(req) => TargetSelector::new(state, catalog, req, controller, source_colors).combinations(),
        None => vec![SmallVec::new()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::InstanceId;
    use crate::zones::Zone;

    fn setup() -> (GameState, CardCatalog, InstanceId, InstanceId) {
        let catalog = CardCatalog::core_set();
        let mut state = GameState::new(1, 20);
        let bears = catalog.get_by_name("Grizzly Bears").unwrap().id;
        let troll = catalog.get_by_name("Troll Ascetic").unwrap().id;
        let a = state.create_card(bears, PlayerId::Opponent, Zone::Battlefield);
        let b = state.create_card(troll, PlayerId::Opponent, Zone::Battlefield);
        (state, catalog, a, b)
    }

    #[test]
    fn test_any_target_lists_players_and_creatures() {
        let (state, catalog, bears, _) = setup();
        let req = TargetRequirement::single(TargetKind::Any);

        let targets = get_legal_targets(&state, &catalog, &req, PlayerId::Player, &[Color::Red]);

        assert!(targets.contains(&Target::Player(PlayerId::Player)));
        assert!(targets.contains(&Target::Player(PlayerId::Opponent)));
        assert!(targets.contains(&Target::Card(bears)));
    }

    #[test]
    fn test_hexproof_blocks_opponent_only() {
        let (state, catalog, _, troll) = setup();
        let req = TargetRequirement::single(TargetKind::Creature);

        let errors = validate_targets(
            &state,
            &catalog,
            Some(&req),
            &[Target::Card(troll)],
            PlayerId::Player,
            &[Color::Red],
        );
        assert!(errors.iter().any(|e| e.mentions("hexproof")));

        let own = validate_targets(
            &state,
            &catalog,
            Some(&req),
            &[Target::Card(troll)],
            PlayerId::Opponent,
            &[Color::Green],
        );
        assert!(own.is_empty());
    }

    #[test]
    fn test_count_and_duplicates() {
        let (state, catalog, bears, _) = setup();
        let req = TargetRequirement::single(TargetKind::Creature);

        let none = validate_targets(&state, &catalog, Some(&req), &[], PlayerId::Player, &[]);
        assert!(none.iter().any(|e| e.mentions("Expected 1 target")));

        let two = validate_targets(
            &state,
            &catalog,
            Some(&req),
            &[Target::Card(bears), Target::Card(bears)],
            PlayerId::Player,
            &[],
        );
        assert!(two.iter().any(|e| e.mentions("Duplicate")));
    }

    #[test]
    fn test_player_not_legal_for_creature_requirement() {
        let (state, catalog, _, _) = setup();
        let req = TargetRequirement::single(TargetKind::Creature);
        let errors = validate_targets(
            &state,
            &catalog,
            Some(&req),
            &[Target::Player(PlayerId::Opponent)],
            PlayerId::Player,
            &[],
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::IllegalTarget);
    }

    #[test]
    fn test_combinations_are_distinct_and_sized() {
        let (state, catalog, _, _) = setup();
        let req = TargetRequirement {
            count: 2,
            kind: TargetKind::Player,
            restrictions: SmallVec::new(),
        };

        let combos =
            get_all_legal_target_combinations(&state, &catalog, Some(&req), PlayerId::Player, &[]);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].len(), 2);
        assert_ne!(combos[0][0], combos[0][1]);

        let untargeted = get_all_legal_target_combinations(&state, &catalog, None, PlayerId::Player, &[]);
        assert_eq!(untargeted.len(), 1);
        assert!(untargeted[0].is_empty());
    }

    #[test]
    fn test_missing_card_is_not_found() {
        let (state, catalog, _, _) = setup();
        let req = TargetRequirement::single(TargetKind::Creature);
        let errors = validate_targets(
            &state,
            &catalog,
            Some(&req),
            &[Target::Card(InstanceId(999))],
            PlayerId::Player,
            &[],
        );
        assert_eq!(errors[0].kind, ErrorKind::NotFound);
    }
}
