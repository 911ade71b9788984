//! The module contains the menu cost aggregator.
//!
//! A menu is an ordered list of already-costed preparations plus the
//! enrollment figures it is planned for. The aggregate is the plain sum of
//! the preparations' batch totals: a preparation's total already reflects
//! its own yield plan, so `servings_planned` is informational and carried
//! through unchanged.

use serde::{Deserialize, Serialize};

use crate::{EngineError, PreparationCost, ResultEngine};

/// One dish of a menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub total_cost: f64,
    /// Informational only; never multiplied into costs.
    pub servings_planned: u32,
}

impl MenuEntry {
    /// Builds an entry from a costed preparation.
    #[must_use]
    pub fn from_cost(cost: &PreparationCost, servings_planned: u32) -> Self {
        Self {
            name: cost.name.clone(),
            total_cost: cost.total_cost,
            servings_planned,
        }
    }
}

/// Enrollment figures a menu is planned against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuParameters {
    pub total_students: u32,
    pub school_days: u32,
    pub meals_per_day: u32,
}

/// One preparation's share of the aggregated menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuEntryShare {
    pub name: String,
    pub total_cost: f64,
    pub percent_of_menu: f64,
    pub cost_per_student: f64,
    pub servings_planned: u32,
}

/// Output of the menu cost aggregator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuCostBreakdown {
    pub menu_total_cost: f64,
    pub cost_per_student: f64,
    pub cost_per_meal: f64,
    pub entries: Vec<MenuEntryShare>,
}

/// Aggregates a menu's preparations into its cost breakdown.
///
/// An empty entry list is a valid menu that costs 0. `percent_of_menu` is
/// defined as 0 when the menu total is 0, so an all-free menu never yields
/// NaN shares.
///
/// # Errors
///
/// [`EngineError::InvalidMenuParameters`] when `total_students`,
/// `school_days`, or `meals_per_day` is 0.
pub fn aggregate(
    entries: &[MenuEntry],
    params: &MenuParameters,
) -> ResultEngine<MenuCostBreakdown> {
    if params.total_students == 0 {
        return Err(EngineError::InvalidMenuParameters(
            "total_students must be > 0".to_string(),
        ));
    }
    if params.school_days == 0 {
        return Err(EngineError::InvalidMenuParameters(
            "school_days must be > 0".to_string(),
        ));
    }
    if params.meals_per_day == 0 {
        return Err(EngineError::InvalidMenuParameters(
            "meals_per_day must be > 0".to_string(),
        ));
    }

    let menu_total_cost: f64 = entries.iter().map(|entry| entry.total_cost).sum();
    let students = f64::from(params.total_students);
    let cost_per_student = menu_total_cost / students;
    let cost_per_meal = menu_total_cost / (students * f64::from(params.meals_per_day));

    let entries = entries
        .iter()
        .map(|entry| MenuEntryShare {
            name: entry.name.clone(),
            total_cost: entry.total_cost,
            percent_of_menu: if menu_total_cost > 0.0 {
                entry.total_cost / menu_total_cost * 100.0
            } else {
                0.0
            },
            cost_per_student: entry.total_cost / students,
            servings_planned: entry.servings_planned,
        })
        .collect();

    tracing::debug!(menu_total_cost, cost_per_student, "aggregated menu");

    Ok(MenuCostBreakdown {
        menu_total_cost,
        cost_per_student,
        cost_per_meal,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, total_cost: f64) -> MenuEntry {
        MenuEntry {
            name: name.to_string(),
            total_cost,
            servings_planned: 300,
        }
    }

    fn params() -> MenuParameters {
        MenuParameters {
            total_students: 300,
            school_days: 200,
            meals_per_day: 1,
        }
    }

    #[test]
    fn aggregates_the_reference_menu() {
        let breakdown =
            aggregate(&[entry("Feijoada", 450.0), entry("Salada", 240.0)], &params()).unwrap();

        assert_eq!(breakdown.menu_total_cost, 690.0);
        assert_eq!(breakdown.cost_per_student, 2.3);
        assert_eq!(breakdown.cost_per_meal, 2.3);
        assert!((breakdown.entries[0].percent_of_menu - 65.217_391_304_347_83).abs() < 1e-9);
        assert!((breakdown.entries[1].percent_of_menu - 34.782_608_695_652_17).abs() < 1e-9);
    }

    #[test]
    fn percentages_close_to_100() {
        let breakdown = aggregate(
            &[entry("a", 1.0), entry("b", 2.0), entry("c", 0.1)],
            &params(),
        )
        .unwrap();
        let sum: f64 = breakdown.entries.iter().map(|e| e.percent_of_menu).sum();
        assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn empty_menu_costs_zero() {
        let breakdown = aggregate(&[], &params()).unwrap();
        assert_eq!(breakdown.menu_total_cost, 0.0);
        assert!(breakdown.entries.is_empty());
    }

    #[test]
    fn free_menu_has_zero_shares_not_nan() {
        let breakdown = aggregate(&[entry("doado", 0.0)], &params()).unwrap();
        assert_eq!(breakdown.entries[0].percent_of_menu, 0.0);
    }

    #[test]
    fn zero_parameters_are_rejected() {
        for bad in [
            MenuParameters {
                total_students: 0,
                ..params()
            },
            MenuParameters {
                school_days: 0,
                ..params()
            },
            MenuParameters {
                meals_per_day: 0,
                ..params()
            },
        ] {
            assert!(matches!(
                aggregate(&[entry("x", 1.0)], &bad),
                Err(EngineError::InvalidMenuParameters(_))
            ));
        }
    }

    #[test]
    fn meals_per_day_divides_the_meal_cost() {
        let two_meals = MenuParameters {
            meals_per_day: 2,
            ..params()
        };
        let breakdown = aggregate(&[entry("x", 690.0)], &two_meals).unwrap();
        assert_eq!(breakdown.cost_per_student, 2.3);
        assert_eq!(breakdown.cost_per_meal, 1.15);
    }
}
