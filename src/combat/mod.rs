//! Combat: declarations, evasion, and damage.
//!
//! | Keyword | Blocking restriction |
//! |---|---|
//! | Flying | blockable only by Flying or Reach |
//! | Menace | needs two or more blockers |
//! | Fear | blocker must be black or an artifact |
//! | Intimidate | blocker must be an artifact or share a color |
//! | Landwalk | unblockable while the defender controls that basic land type |
//! | Protection | unblockable by creatures of that color |

mod damage;
mod declare;

pub use damage::{
    assign_combat_damage, clear_combat, resolve_combat_damage, CombatDamageReport, DamageAssignment,
};
pub use declare::{
    check_attacker, check_block, declare_attackers, declare_blockers, possible_attackers, possible_blocks,
    validate_attackers, validate_blockers,
};
