//! Mana costs.
//!
//! Costs are written as a run of `{...}` symbols: `{N}` generic, `{W}`
//! `{U}` `{B}` `{R}` `{G}` colored, `{C}` colorless-only and `{X}`.
//! Lands have the empty cost `""`.
//!
//! ```
//! use manacore::mana::{format_mana_cost, parse_mana_cost};
//!
//! let cost = parse_mana_cost("{2}{R}{R}").unwrap();
//! assert_eq!(cost.generic, 2);
//! assert_eq!(cost.red, 2);
//! assert_eq!(cost.cmc(), 4);
//! assert_eq!(format_mana_cost(&cost), "{2}{R}{R}");
//!
//! assert!(parse_mana_cost("").unwrap().is_zero());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Color;
use crate::core::ManaError;

/// A parsed mana cost. All counts are non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    pub generic: u32,
    pub white: u32,
    pub blue: u32,
    pub black: u32,
    pub red: u32,
    pub green: u32,
    /// `{C}`: payable only with colorless mana.
    pub colorless: u32,
    /// Number of `{X}` symbols.
    pub x: u32,
}

impl ManaCost {
    /// The empty cost.
    pub const ZERO: ManaCost = ManaCost {
        generic: 0,
        white: 0,
        blue: 0,
        black: 0,
        red: 0,
        green: 0,
        colorless: 0,
        x: 0,
    };

    /// Parse a cost string.
    pub fn parse(text: &str) -> Result<Self, ManaError> {
        let mut cost = ManaCost::ZERO;
        let mut rest = text.trim();

        while !rest.is_empty() {
            let body = rest
                .strip_prefix('{')
                .and_then(|r| r.split_once('}'))
                .ok_or_else(|| ManaError::Malformed(text.to_string()))?;
            let (symbol, tail) = body;
            rest = tail;

            if let Ok(n) = symbol.parse::<u32>() {
                cost.generic = bump(cost.generic, n, text)?;
                continue;
            }

            let mut chars = symbol.chars();
            let single = match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c.to_ascii_uppercase()),
                _ => None,
            };
            match single {
                Some('X') => cost.x = bump(cost.x, 1, text)?,
                Some('C') => cost.colorless = bump(cost.colorless, 1, text)?,
                Some(c) => match Color::from_symbol(c) {
                    Some(color) => {
                        let pips = cost.pips_mut(color);
                        *pips = bump(*pips, 1, text)?;
                    }
                    None => return Err(unsupported(symbol, text)),
                },
                None => return Err(unsupported(symbol, text)),
            }
        }

        Ok(cost)
    }

    /// Colored pips of one color.
    #[must_use]
    pub const fn pips(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
        }
    }

    fn pips_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
        }
    }

    /// Total colored pips, saturating.
    #[must_use]
    pub const fn colored(&self) -> u32 {
        self.white
            .saturating_add(self.blue)
            .saturating_add(self.black)
            .saturating_add(self.red)
            .saturating_add(self.green)
    }

    /// Converted mana cost, saturating. `{X}` counts as zero.
    #[must_use]
    pub const fn cmc(&self) -> u32 {
        self.generic.saturating_add(self.colored()).saturating_add(self.colorless)
    }

    /// Generic mana to pay once X is chosen. `None` when the total does not
    /// fit in a `u32`; no pool can pay that.
    #[must_use]
    pub const fn generic_with_x(&self, x_value: u32) -> Option<u32> {
        match self.x.checked_mul(x_value) {
            Some(extra) => self.generic.checked_add(extra),
            None => None,
        }
    }

    /// Whether the cost contains `{X}`.
    #[must_use]
    pub const fn has_x(&self) -> bool {
        self.x > 0
    }

    /// Whether the cost is free.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.cmc() == 0 && self.x == 0
    }

    /// Colors with at least one pip, in WUBRG order.
    #[must_use]
    pub fn colors(&self) -> SmallVec<[Color; 2]> {
        Color::ALL.into_iter().filter(|c| self.pips(*c) > 0).collect()
    }
}

fn bump(count: u32, by: u32, text: &str) -> Result<u32, ManaError> {
    count
        .checked_add(by)
        .ok_or_else(|| ManaError::Malformed(text.to_string()))
}

fn unsupported(symbol: &str, cost: &str) -> ManaError {
    ManaError::UnsupportedSymbol {
        symbol: symbol.to_string(),
        cost: cost.to_string(),
    }
}

impl FromStr for ManaCost {
    type Err = ManaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ManaCost::parse(s)
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str("{0}");
        }
        for _ in 0..self.x {
            f.write_str("{X}")?;
        }
        if self.generic > 0 {
            write!(f, "{{{}}}", self.generic)?;
        }
        for _ in 0..self.colorless {
            f.write_str("{C}")?;
        }
        for color in Color::ALL {
            for _ in 0..self.pips(color) {
                write!(f, "{{{}}}", color.symbol())?;
            }
        }
        Ok(())
    }
}

/// Parse a mana cost string.
pub fn parse_mana_cost(text: &str) -> Result<ManaCost, ManaError> {
    ManaCost::parse(text)
}

/// Canonical rendering of a cost.
#[must_use]
pub fn format_mana_cost(cost: &ManaCost) -> String {
    cost.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colored_and_generic() {
        let cost = parse_mana_cost("{3}{U}{U}").unwrap();
        assert_eq!(cost.generic, 3);
        assert_eq!(cost.blue, 2);
        assert_eq!(cost.cmc(), 5);
        assert_eq!(cost.colors().as_slice(), &[Color::Blue]);
    }

    #[test]
    fn test_parse_x_and_colorless() {
        let cost = parse_mana_cost("{X}{R}").unwrap();
        assert_eq!(cost.x, 1);
        assert_eq!(cost.cmc(), 1);
        assert_eq!(cost.generic_with_x(4), Some(4));

        let eldrazi = parse_mana_cost("{C}{C}{1}").unwrap();
        assert_eq!(eldrazi.colorless, 2);
        assert_eq!(eldrazi.generic, 1);
    }

    #[test]
    fn test_parse_multi_digit_generic() {
        let cost = parse_mana_cost("{10}{G}").unwrap();
        assert_eq!(cost.generic, 10);
        assert_eq!(cost.green, 1);
    }

    #[test]
    fn test_parse_empty() {
        let cost = parse_mana_cost("").unwrap();
        assert!(cost.is_zero());
        assert_eq!(format_mana_cost(&cost), "{0}");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_mana_cost("{W/U}"),
            Err(ManaError::UnsupportedSymbol { .. })
        ));
        assert!(matches!(parse_mana_cost("{2"), Err(ManaError::Malformed(_))));
        assert!(matches!(parse_mana_cost("2R"), Err(ManaError::Malformed(_))));
    }

    #[test]
    fn test_format_order() {
        let cost = parse_mana_cost("{G}{R}{X}{C}{2}{W}").unwrap();
        assert_eq!(format_mana_cost(&cost), "{X}{2}{C}{W}{R}{G}");
    }

    #[test]
    fn test_lower_case_symbols() {
        let cost: ManaCost = "{1}{b}".parse().unwrap();
        assert_eq!(cost.black, 1);
    }

    #[test]
    fn test_parse_rejects_overflowing_generic() {
        let err = parse_mana_cost("{4000000000}{4000000000}").unwrap_err();
        assert!(matches!(err, ManaError::Malformed(_)));

        let cost = parse_mana_cost("{4294967295}{R}{C}").unwrap();
        assert_eq!(cost.cmc(), u32::MAX);
    }

    #[test]
    fn test_generic_with_x_overflow() {
        let cost = parse_mana_cost("{X}{X}").unwrap();
        assert_eq!(cost.generic_with_x(u32::MAX / 2 + 1), None);
        assert_eq!(cost.generic_with_x(u32::MAX / 2), Some(u32::MAX - 1));

        let cost = parse_mana_cost("{1}{X}").unwrap();
        assert_eq!(cost.generic_with_x(u32::MAX), None);
    }

    proptest::proptest! {
        #[test]
        fn prop_format_then_parse_is_identity(
            generic in 0u32..16,
            pips in proptest::array::uniform5(0u32..4),
            colorless in 0u32..3,
            x in 0u32..2,
        ) {
            let cost = ManaCost {
                generic,
                white: pips[0],
                blue: pips[1],
                black: pips[2],
                red: pips[3],
                green: pips[4],
                colorless,
                x,
            };
            let parsed = parse_mana_cost(&format_mana_cost(&cost)).unwrap();
            proptest::prop_assert_eq!(parsed, cost);
            proptest::prop_assert_eq!(parsed.cmc(), cost.cmc());
        }
    }
}
