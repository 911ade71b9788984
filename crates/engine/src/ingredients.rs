//! The module contains the ingredient cost roller, the leaf calculator of
//! the costing pipeline.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, normalize::norm_key, numeric::clamp_non_negative};

/// Measurement unit of an ingredient line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    G,
    #[serde(rename = "L")]
    L,
    Ml,
    Unit,
}

impl Unit {
    /// Canonical unit code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "L",
            Unit::Ml => "ml",
            Unit::Unit => "unit",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Unit {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match norm_key(value).as_str() {
            "kg" => Ok(Unit::Kg),
            "g" => Ok(Unit::G),
            "l" => Ok(Unit::L),
            "ml" => Ok(Unit::Ml),
            "unit" | "un" => Ok(Unit::Unit),
            other => Err(EngineError::InvalidInput(format!(
                "unsupported unit: \"{other}\""
            ))),
        }
    }
}

/// One ingredient of a preparation, already numerically coerced.
///
/// Value object: recompute by building a fresh line, never by mutating one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub unit_cost: f64,
}

impl IngredientLine {
    /// Builds a line from parsed values. Negative entries are clamped to 0:
    /// the numeric inputs of the source forms allowed them, the domain does
    /// not.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: Unit, unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity: clamp_non_negative(quantity),
            unit,
            unit_cost: clamp_non_negative(unit_cost),
        }
    }

    /// Quantity × unit cost, full precision.
    #[must_use]
    pub fn line_cost(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

/// Cost of one rolled-up line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineCost {
    pub name: String,
    pub line_cost: f64,
}

/// Output of the ingredient cost roller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientCostSummary {
    pub lines: Vec<LineCost>,
    pub ingredient_total: f64,
}

/// Rolls an ordered list of ingredient lines up into per-line costs and a
/// total. An empty list yields a total of 0.
#[must_use]
pub fn roll_up(lines: &[IngredientLine]) -> IngredientCostSummary {
    let mut ingredient_total = 0.0;
    let lines = lines
        .iter()
        .map(|line| {
            let line_cost = line.line_cost();
            ingredient_total += line_cost;
            LineCost {
                name: line.name.clone(),
                line_cost,
            }
        })
        .collect();

    IngredientCostSummary {
        lines,
        ingredient_total,
    }
}
