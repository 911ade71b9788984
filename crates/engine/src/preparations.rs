//! The module contains the preparation cost calculator.
//!
//! A preparation is one batch of a dish. Its ingredient costs are rolled up
//! by [`roll_up`] beforehand; this calculator adds the labor, energy, and
//! other costs, spreads the total over the yield, and applies the target
//! margin.
//!
//! [`roll_up`]: crate::roll_up

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A preparation with its cost inputs. Value object; `cost` never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preparation {
    pub name: String,
    pub category: String,
    /// Portions one batch yields (rendimento). Must be > 0.
    pub yield_portions: u32,
    /// Output of the ingredient cost roller.
    pub ingredient_total: f64,
    pub labor_cost: f64,
    pub energy_cost: f64,
    pub other_costs: f64,
    /// Target margin in percent, e.g. 15 for 15%. Negative margins down to
    /// -100 are valid loss-leaders.
    pub margin_percent: f64,
}

/// Output of the preparation cost calculator. Full precision; display
/// rounding is the presentation layer's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreparationCost {
    pub name: String,
    pub total_cost: f64,
    pub cost_per_portion: f64,
    pub sale_price: f64,
}

impl Preparation {
    /// Computes the batch total, the cost per portion, and the suggested
    /// sale price.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidYield`] when `yield_portions` is 0; the
    ///   division is refused rather than returning Infinity.
    /// - [`EngineError::InvalidMargin`] when `margin_percent` < -100.
    pub fn cost(&self) -> ResultEngine<PreparationCost> {
        if self.yield_portions == 0 {
            tracing::warn!(preparation = %self.name, "rejected zero yield");
            return Err(EngineError::InvalidYield(format!(
                "\"{}\" must yield at least one portion",
                self.name
            )));
        }
        if self.margin_percent < -100.0 {
            tracing::warn!(
                preparation = %self.name,
                margin = self.margin_percent,
                "rejected margin below -100%"
            );
            return Err(EngineError::InvalidMargin(format!(
                "margin {}% on \"{}\" would price below zero",
                self.margin_percent, self.name
            )));
        }

        let total_cost =
            self.ingredient_total + self.labor_cost + self.energy_cost + self.other_costs;
        let cost_per_portion = total_cost / f64::from(self.yield_portions);
        let sale_price = cost_per_portion * (1.0 + self.margin_percent / 100.0);

        tracing::debug!(preparation = %self.name, total_cost, cost_per_portion, "costed preparation");

        Ok(PreparationCost {
            name: self.name.clone(),
            total_cost,
            cost_per_portion,
            sale_price,
        })
    }
}
