//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card: the catalog
//! fields (name, cost, type line, rules text, stats, colors, keywords,
//! rarity) plus the coded data the rules need (parsed cost and types, the
//! spell effect, aura bonus, activated abilities).
//!
//! Instance-specific data (damage, counters, zone) is stored separately in
//! [`CardInstance`](super::CardInstance).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use super::keywords::{BasicLandType, Keyword, KeywordSet};
use crate::abilities::AbilityDef;
use crate::core::ManaError;
use crate::effects::Effect;
use crate::mana::{ManaCost, ManaProduction};

/// Unique identifier for a card template.
///
/// This identifies the "type" of card (e.g., "Lightning Bolt"),
/// not a specific instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Instant,
    Sorcery,
}

impl CardType {
    /// Parse a type word from a type line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "land" => Some(CardType::Land),
            "creature" => Some(CardType::Creature),
            "artifact" => Some(CardType::Artifact),
            "enchantment" => Some(CardType::Enchantment),
            "instant" => Some(CardType::Instant),
            "sorcery" => Some(CardType::Sorcery),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardType::Land => "land",
            CardType::Creature => "creature",
            CardType::Artifact => "artifact",
            CardType::Enchantment => "enchantment",
            CardType::Instant => "instant",
            CardType::Sorcery => "sorcery",
        };
        f.write_str(name)
    }
}

/// Card rarity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
    /// Tokens and other non-booster cards.
    Special,
}

/// A parsed type line such as `"Basic Land — Swamp"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTypes {
    pub basic: bool,
    pub token: bool,
    pub types: SmallVec<[CardType; 2]>,
    pub subtypes: SmallVec<[String; 2]>,
}

impl CardTypes {
    /// Parse a type line. Unknown supertypes are ignored.
    #[must_use]
    pub fn parse(type_line: &str) -> Self {
        let (left, right) = match type_line.split_once('—') {
            Some((l, r)) => (l, r),
            None => match type_line.split_once(" - ") {
                Some((l, r)) => (l, r),
                None => (type_line, ""),
            },
        };

        let mut parsed = CardTypes::default();
        for word in left.split_whitespace() {
            if word.eq_ignore_ascii_case("basic") {
                parsed.basic = true;
            } else if word.eq_ignore_ascii_case("token") {
                parsed.token = true;
            } else if let Some(card_type) = CardType::from_name(word) {
                parsed.types.push(card_type);
            }
        }
        parsed.subtypes = right.split_whitespace().map(str::to_string).collect();
        parsed
    }

    #[must_use]
    pub fn has(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        self.has(CardType::Land)
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.has(CardType::Creature)
    }

    #[must_use]
    pub fn is_artifact(&self) -> bool {
        self.has(CardType::Artifact)
    }

    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.has(CardType::Instant)
    }

    /// Whether the card stays on the battlefield when it resolves.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        !self.types.is_empty() && !self.has(CardType::Instant) && !self.has(CardType::Sorcery)
    }

    #[must_use]
    pub fn is_aura(&self) -> bool {
        self.has(CardType::Enchantment) && self.has_subtype("Aura")
    }

    #[must_use]
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s.eq_ignore_ascii_case(subtype))
    }

    /// Basic land types among the subtypes.
    pub fn basic_land_types(&self) -> impl Iterator<Item = BasicLandType> + '_ {
        self.subtypes.iter().filter_map(|s| BasicLandType::from_name(s))
    }
}

/// Power/toughness bonus an aura grants its host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuraBonus {
    pub power: i32,
    pub toughness: i32,
}

/// Static card data.
///
/// ## Example
///
/// ```
/// use manacore::cards::{CardId, CardTemplate, Keyword};
///
/// let angel = CardTemplate::builder("Serra Angel")
///     .cost("{3}{W}{W}")
///     .type_line("Creature — Angel")
///     .stats("4", "4")
///     .keyword(Keyword::Flying)
///     .keyword(Keyword::Vigilance)
///     .build(CardId::new(1))
///     .unwrap();
///
/// assert_eq!(angel.cmc, 5);
/// assert!(angel.types.is_creature());
/// assert_eq!(angel.base_power(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,
    /// External catalog id.
    pub scryfall_id: String,
    pub name: String,
    /// Printed mana cost string.
    pub mana_cost: String,
    pub cmc: u32,
    pub type_line: String,
    pub oracle_text: String,
    /// Printed power. `"*"` is legal.
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub colors: SmallVec<[Color; 2]>,
    pub keywords: KeywordSet,
    pub rarity: Rarity,

    /// Parsed `mana_cost`.
    pub cost: ManaCost,
    /// Parsed `type_line`.
    pub types: CardTypes,
    /// Instant, sorcery or aura effect.
    pub effect: Option<Effect>,
    pub aura_bonus: Option<AuraBonus>,
    /// Activated abilities, intrinsic land abilities first.
    pub abilities: Vec<AbilityDef>,
}

impl CardTemplate {
    /// Start building a template.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> CardTemplateBuilder {
        CardTemplateBuilder::new(name)
    }

    /// Printed power as a number (`"*"` and missing count as 0).
    #[must_use]
    pub fn base_power(&self) -> i32 {
        parse_stat(self.power.as_deref())
    }

    /// Printed toughness as a number (`"*"` and missing count as 0).
    #[must_use]
    pub fn base_toughness(&self) -> i32 {
        parse_stat(self.toughness.as_deref())
    }

    /// Whether the card is `color`.
    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Whether the card shares a color with `colors`.
    #[must_use]
    pub fn shares_color(&self, colors: &[Color]) -> bool {
        self.colors.iter().any(|c| colors.contains(c))
    }
}

fn parse_stat(stat: Option<&str>) -> i32 {
    stat.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Builder for [`CardTemplate`].
#[derive(Clone, Debug, Default)]
pub struct CardTemplateBuilder {
    name: String,
    mana_cost: String,
    type_line: String,
    oracle_text: String,
    power: Option<String>,
    toughness: Option<String>,
    colors: Option<SmallVec<[Color; 2]>>,
    keywords: KeywordSet,
    rarity: Rarity,
    scryfall_id: Option<String>,
    effect: Option<Effect>,
    aura_bonus: Option<AuraBonus>,
    abilities: Vec<AbilityDef>,
}

impl CardTemplateBuilder {
    /// Start a template named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cost(mut self, mana_cost: &str) -> Self {
        self.mana_cost = mana_cost.to_string();
        self
    }

    #[must_use]
    pub fn type_line(mut self, type_line: &str) -> Self {
        self.type_line = type_line.to_string();
        self
    }

    #[must_use]
    pub fn oracle(mut self, text: &str) -> Self {
        self.oracle_text = text.to_string();
        self
    }

    #[must_use]
    pub fn stats(mut self, power: &str, toughness: &str) -> Self {
        self.power = Some(power.to_string());
        self.toughness = Some(toughness.to_string());
        self
    }

    /// Override the colors derived from the cost.
    #[must_use]
    pub fn colors(mut self, colors: &[Color]) -> Self {
        self.colors = Some(SmallVec::from_slice(colors));
        self
    }

    #[must_use]
    pub fn keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }

    #[must_use]
    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn scryfall_id(mut self, id: &str) -> Self {
        self.scryfall_id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Aura: enchant creature, host gets `+power/+toughness`.
    #[must_use]
    pub fn aura(mut self, power: i32, toughness: i32) -> Self {
        self.effect = Some(Effect::Enchant);
        self.aura_bonus = Some(AuraBonus { power, toughness });
        self
    }

    #[must_use]
    pub fn ability(mut self, ability: AbilityDef) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Finish the template.
    ///
    /// Parses the cost, derives colors and cmc, and prepends intrinsic
    /// basic-land mana abilities.
    pub fn build(self, id: CardId) -> Result<CardTemplate, ManaError> {
        let cost = ManaCost::parse(&self.mana_cost)?;
        let types = CardTypes::parse(&self.type_line);
        let colors = self.colors.unwrap_or_else(|| cost.colors());

        let mut abilities: Vec<AbilityDef> = types
            .basic_land_types()
            .map(|land| AbilityDef::tap_for(ManaProduction::single(land.color().into())))
            .collect();
        abilities.extend(self.abilities);

        let scryfall_id = self
            .scryfall_id
            .unwrap_or_else(|| self.name.to_ascii_lowercase().replace(' ', "-"));

        Ok(CardTemplate {
            id,
            scryfall_id,
            cmc: cost.cmc(),
            name: self.name,
            mana_cost: self.mana_cost,
            type_line: self.type_line,
            oracle_text: self.oracle_text,
            power: self.power,
            toughness: self.toughness,
            colors,
            keywords: self.keywords,
            rarity: self.rarity,
            cost,
            types,
            effect: self.effect,
            aura_bonus: self.aura_bonus,
            abilities,
        })
    }
}
