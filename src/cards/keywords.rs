//! Keyword abilities.
//!
//! A template carries an immutable [`KeywordSet`]. Rules code asks about
//! keywords through the free predicates at the bottom of this module
//! (`has_flying(template)`, `has_protection_from(template, color)`, ...)
//! rather than through any per-card behavior.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use super::template::CardTemplate;

/// Basic land types, used by landwalk and land searching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicLandType {
    Plains,
    Island,
    Swamp,
    Mountain,
    Forest,
}

impl BasicLandType {
    /// All five basic land types.
    pub const ALL: [BasicLandType; 5] = [
        BasicLandType::Plains,
        BasicLandType::Island,
        BasicLandType::Swamp,
        BasicLandType::Mountain,
        BasicLandType::Forest,
    ];

    /// The subtype name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BasicLandType::Plains => "Plains",
            BasicLandType::Island => "Island",
            BasicLandType::Swamp => "Swamp",
            BasicLandType::Mountain => "Mountain",
            BasicLandType::Forest => "Forest",
        }
    }

    /// Parse a subtype name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// The color of mana this land type taps for.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            BasicLandType::Plains => Color::White,
            BasicLandType::Island => Color::Blue,
            BasicLandType::Swamp => Color::Black,
            BasicLandType::Mountain => Color::Red,
            BasicLandType::Forest => Color::Green,
        }
    }

    /// Landwalk keyword name, e.g. `"Swampwalk"`.
    #[must_use]
    pub fn walk_name(self) -> String {
        format!("{}walk", self.name())
    }
}

/// A keyword ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Flying,
    Reach,
    Menace,
    Fear,
    Intimidate,
    Landwalk(BasicLandType),
    Haste,
    Vigilance,
    Defender,
    Hexproof,
    Shroud,
    Protection(Color),
    Lifelink,
}

impl Keyword {
    /// Parse a keyword as printed on a card.
    ///
    /// ```
    /// use manacore::cards::{BasicLandType, Color, Keyword};
    ///
    /// assert_eq!(Keyword::parse("Flying"), Some(Keyword::Flying));
    /// assert_eq!(Keyword::parse("swampwalk"), Some(Keyword::Landwalk(BasicLandType::Swamp)));
    /// assert_eq!(Keyword::parse("Protection from red"), Some(Keyword::Protection(Color::Red)));
    /// assert_eq!(Keyword::parse("Trample"), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let lower = text.to_ascii_lowercase();
        let keyword = match lower.as_str() {
            "flying" => Keyword::Flying,
            "reach" => Keyword::Reach,
            "menace" => Keyword::Menace,
            "fear" => Keyword::Fear,
            "intimidate" => Keyword::Intimidate,
            "haste" => Keyword::Haste,
            "vigilance" => Keyword::Vigilance,
            "defender" => Keyword::Defender,
            "hexproof" => Keyword::Hexproof,
            "shroud" => Keyword::Shroud,
            "lifelink" => Keyword::Lifelink,
            _ => {
                if let Some(color) = lower.strip_prefix("protection from ") {
                    return Color::from_name(color).map(Keyword::Protection);
                }
                let land = lower.strip_suffix("walk")?;
                return BasicLandType::from_name(land).map(Keyword::Landwalk);
            }
        };
        Some(keyword)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Keyword::Flying => f.write_str("Flying"),
            Keyword::Reach => f.write_str("Reach"),
            Keyword::Menace => f.write_str("Menace"),
            Keyword::Fear => f.write_str("Fear"),
            Keyword::Intimidate => f.write_str("Intimidate"),
            Keyword::Landwalk(land) => f.write_str(&land.walk_name()),
            Keyword::Haste => f.write_str("Haste"),
            Keyword::Vigilance => f.write_str("Vigilance"),
            Keyword::Defender => f.write_str("Defender"),
            Keyword::Hexproof => f.write_str("Hexproof"),
            Keyword::Shroud => f.write_str("Shroud"),
            Keyword::Protection(color) => write!(f, "Protection from {color}"),
            Keyword::Lifelink => f.write_str("Lifelink"),
        }
    }
}

/// The keywords on one card template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordSet(SmallVec<[Keyword; 4]>);

impl KeywordSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword. Duplicates are ignored.
    pub fn insert(&mut self, keyword: Keyword) {
        if !self.contains(keyword) {
            self.0.push(keyword);
        }
    }

    /// Whether the set contains `keyword`.
    #[must_use]
    pub fn contains(&self, keyword: Keyword) -> bool {
        self.0.contains(&keyword)
    }

    /// Iterate over the keywords.
    pub fn iter(&self) -> impl Iterator<Item = Keyword> + '_ {
        self.0.iter().copied()
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Landwalk types in this set.
    pub fn landwalks(&self) -> impl Iterator<Item = BasicLandType> + '_ {
        self.iter().filter_map(|k| match k {
            Keyword::Landwalk(land) => Some(land),
            _ => None,
        })
    }

    /// Colors this set grants protection from.
    pub fn protections(&self) -> impl Iterator<Item = Color> + '_ {
        self.iter().filter_map(|k| match k {
            Keyword::Protection(color) => Some(color),
            _ => None,
        })
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}

// Predicates over flat card data.

#[must_use]
pub fn has_flying(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Flying)
}

#[must_use]
pub fn has_reach(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Reach)
}

#[must_use]
pub fn has_menace(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Menace)
}

#[must_use]
pub fn has_fear(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Fear)
}

#[must_use]
pub fn has_intimidate(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Intimidate)
}

#[must_use]
pub fn has_haste(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Haste)
}

#[must_use]
pub fn has_vigilance(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Vigilance)
}

#[must_use]
pub fn has_defender(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Defender)
}

#[must_use]
pub fn has_hexproof(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Hexproof)
}

#[must_use]
pub fn has_shroud(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Shroud)
}

#[must_use]
pub fn has_lifelink(card: &CardTemplate) -> bool {
    card.keywords.contains(Keyword::Lifelink)
}

/// Whether the card has protection from `color`.
#[must_use]
pub fn has_protection_from(card: &CardTemplate, color: Color) -> bool {
    card.keywords.contains(Keyword::Protection(color))
}

/// Whether the card has protection from any of `colors`.
#[must_use]
pub fn protected_from_any(card: &CardTemplate, colors: &[Color]) -> Option<Color> {
    colors.iter().copied().find(|c| has_protection_from(card, *c))
}
