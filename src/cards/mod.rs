//! Card system: templates, instances, keywords, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for card templates
//! - `CardTemplate`: static card data plus coded rules data
//! - `CardInstance`: runtime card state (zone, controller, damage, counters)
//! - `CardCatalog`: template lookup, built once and shared
//! - `KeywordSet`: keywords on a template, queried by `has_*` predicates

pub mod catalog;
pub mod color;
pub mod instance;
pub mod keywords;
pub mod set;
pub mod template;

pub use catalog::CardCatalog;
pub use color::Color;
pub use instance::{CardInstance, CounterKind, TemporaryModification};
pub use keywords::{
    has_defender, has_fear, has_flying, has_haste, has_hexproof, has_intimidate, has_lifelink,
    has_menace, has_protection_from, has_reach, has_shroud, has_vigilance, protected_from_any,
    BasicLandType, Keyword, KeywordSet,
};
pub use set::SOLDIER_TOKEN;
pub use template::{AuraBonus, CardId, CardTemplate, CardTemplateBuilder, CardType, CardTypes, Rarity};
