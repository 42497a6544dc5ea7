//! Mana pools and payment.
//!
//! A pool is six non-negative counters. Payment takes colored pips from
//! their exact color, `{C}` from colorless only, then generic and X from
//! whatever is left: colorless first, then W, U, B, R, G.

use serde::{Deserialize, Serialize};

use super::cost::ManaCost;
use crate::cards::Color;
use crate::core::ManaError;

/// One of the six kinds of mana.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManaType {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "C")]
    Colorless,
}

impl ManaType {
    /// Spending order for generic costs.
    pub const GENERIC_ORDER: [ManaType; 6] = [
        ManaType::Colorless,
        ManaType::White,
        ManaType::Blue,
        ManaType::Black,
        ManaType::Red,
        ManaType::Green,
    ];

    /// The color, or `None` for colorless.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            ManaType::White => Some(Color::White),
            ManaType::Blue => Some(Color::Blue),
            ManaType::Black => Some(Color::Black),
            ManaType::Red => Some(Color::Red),
            ManaType::Green => Some(Color::Green),
            ManaType::Colorless => None,
        }
    }

    /// The mana symbol, e.g. `{G}`.
    #[must_use]
    pub fn symbol(self) -> String {
        match self.color() {
            Some(color) => format!("{{{}}}", color.symbol()),
            None => "{C}".to_string(),
        }
    }
}

impl From<Color> for ManaType {
    fn from(color: Color) -> Self {
        match color {
            Color::White => ManaType::White,
            Color::Blue => ManaType::Blue,
            Color::Black => ManaType::Black,
            Color::Red => ManaType::Red,
            Color::Green => ManaType::Green,
        }
    }
}

/// Unspent mana.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    pub white: u32,
    pub blue: u32,
    pub black: u32,
    pub red: u32,
    pub green: u32,
    pub colorless: u32,
}

impl ManaPool {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount of one mana type.
    #[must_use]
    pub const fn get(&self, mana: ManaType) -> u32 {
        match mana {
            ManaType::White => self.white,
            ManaType::Blue => self.blue,
            ManaType::Black => self.black,
            ManaType::Red => self.red,
            ManaType::Green => self.green,
            ManaType::Colorless => self.colorless,
        }
    }

    fn get_mut(&mut self, mana: ManaType) -> &mut u32 {
        match mana {
            ManaType::White => &mut self.white,
            ManaType::Blue => &mut self.blue,
            ManaType::Black => &mut self.black,
            ManaType::Red => &mut self.red,
            ManaType::Green => &mut self.green,
            ManaType::Colorless => &mut self.colorless,
        }
    }

    /// Add mana.
    pub fn add(&mut self, mana: ManaType, amount: u32) {
        *self.get_mut(mana) += amount;
    }

    /// Builder-style [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, mana: ManaType, amount: u32) -> Self {
        self.add(mana, amount);
        self
    }

    /// Total mana of all types.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.white + self.blue + self.black + self.red + self.green + self.colorless
    }

    /// Whether the pool holds no mana.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Empty the pool.
    pub fn clear(&mut self) {
        *self = ManaPool::default();
    }

    /// Pay `cost` with X = `x_value`, returning the remaining pool.
    ///
    /// Callers must check [`can_pay_mana_cost`] first; a failed payment is
    /// an invariant violation and leaves `self` untouched.
    pub fn pay(&self, cost: &ManaCost, x_value: u32) -> Result<ManaPool, ManaError> {
        let mut pool = *self;

        for color in Color::ALL {
            let need = cost.pips(color);
            let have = pool.get_mut(color.into());
            if *have < need {
                return Err(self.unaffordable(cost));
            }
            *have -= need;
        }

        if pool.colorless < cost.colorless {
            return Err(self.unaffordable(cost));
        }
        pool.colorless -= cost.colorless;

        let Some(mut generic) = cost.generic_with_x(x_value) else {
            return Err(self.unaffordable(cost));
        };
        for mana in ManaType::GENERIC_ORDER {
            let have = pool.get_mut(mana);
            let used = (*have).min(generic);
            *have -= used;
            generic -= used;
        }
        if generic > 0 {
            return Err(self.unaffordable(cost));
        }

        Ok(pool)
    }

    fn unaffordable(&self, cost: &ManaCost) -> ManaError {
        ManaError::Unaffordable {
            cost: cost.to_string(),
            pool: self.to_string(),
        }
    }
}

impl std::fmt::Display for ManaPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("Empty");
        }
        for color in Color::ALL {
            for _ in 0..self.get(color.into()) {
                write!(f, "{{{}}}", color.symbol())?;
            }
        }
        for _ in 0..self.colorless {
            f.write_str("{C}")?;
        }
        Ok(())
    }
}

/// Whether `pool` can pay `cost` with X = `x_value`.
#[must_use]
pub fn can_pay_mana_cost(pool: &ManaPool, cost: &ManaCost, x_value: u32) -> bool {
    pool.pay(cost, x_value).is_ok()
}

/// Pay `cost` from `pool`, returning the remaining pool.
pub fn pay_mana_cost(pool: &ManaPool, cost: &ManaCost, x_value: u32) -> Result<ManaPool, ManaError> {
    pool.pay(cost, x_value)
}

/// Canonical rendering of a pool: `{W}{W}{C}` or `Empty`.
#[must_use]
pub fn format_mana_pool(pool: &ManaPool) -> String {
    pool.to_string()
}
