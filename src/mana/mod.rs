//! Mana engine: cost parsing, pools, payment and auto-tap.
//!
//! ## Key Types
//!
//! - `ManaCost`: parsed `{2}{R}{R}`-style cost
//! - `ManaPool`: six non-negative counters
//! - `ManaProduction`: what a mana ability adds
//! - `TapPlan`: sources chosen by [`plan_auto_tap`]

pub mod autotap;
pub mod cost;
pub mod pool;

pub use autotap::{
    collect_mana_sources, execute_tap_plan, plan_auto_tap, ManaOption, ManaProduction, ManaSource,
    PlannedTap, TapPlan,
};
pub use cost::{format_mana_cost, parse_mana_cost, ManaCost};
pub use pool::{can_pay_mana_cost, format_mana_pool, pay_mana_cost, ManaPool, ManaType};
