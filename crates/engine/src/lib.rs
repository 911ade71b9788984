//! Cost and fund-distribution engine for school meal programs (PNAE).
//!
//! Three composable costing calculators plus a standalone statutory one,
//! each a pure function of its inputs:
//!
//! 1. [`roll_up`] — rolls ingredient lines (quantity × unit cost) into a
//!    preparation's ingredient total.
//! 2. [`Preparation::cost`] — adds labor/energy/other costs, spreads the
//!    total over the yield, and applies the target margin.
//! 3. [`aggregate`] — rolls costed preparations into a menu's total,
//!    per-student and per-meal costs, and percentage breakdown.
//! 4. [`distribute`] — statutory per-capita transfers by education
//!    modality, with the family-farming 30% compliance gate
//!    ([`family_farming_compliance`]).
//!
//! Callers wire outputs to inputs; no calculator mutates shared state or
//! reaches into another. Everything is synchronous and allocation-light, so
//! any execution context may call in without coordination.
//!
//! Monetary values stay full-precision `f64` through the pipeline; rounding
//! to two decimals happens only in the [`display`] helpers.
//!
//! The [`forms`] module converts the loose records of [`api_types`] (form
//! fields arriving as numbers or text) into the typed inputs above.

pub use display::{brl, percent};
pub use error::EngineError;
pub use funding::{
    ComplianceCheck, FAMILY_FARMING_MINIMUM_PERCENT, InstitutionDistribution,
    InstitutionEnrollment, Modality, ModalityAmount, ModalityRate, RateTable, distribute,
    family_farming_compliance,
};
pub use ingredients::{IngredientCostSummary, IngredientLine, LineCost, Unit, roll_up};
pub use menus::{MenuCostBreakdown, MenuEntry, MenuEntryShare, MenuParameters, aggregate};
pub use numeric::{coerce_amount, parse_amount};
pub use preparations::{Preparation, PreparationCost};

pub mod display;
mod error;
pub mod forms;
mod funding;
mod ingredients;
mod menus;
mod normalize;
mod numeric;
mod preparations;

/// Result alias used across the engine.
pub type ResultEngine<T> = Result<T, EngineError>;
