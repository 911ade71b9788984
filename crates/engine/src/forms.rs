//! Conversion of form DTOs ([`api_types`]) into engine records.
//!
//! These keep call sites in the UI layer readable: one function per form,
//! one error out. Ingredient-line numeric fields keep the source forms'
//! best-effort behavior (unparseable or negative entries become 0); every
//! other numeric field is strict and raises [`InvalidInput`].
//!
//! [`InvalidInput`]: EngineError::InvalidInput

use api_types::{funding as funding_forms, ingredient, menu, preparation};

use crate::{
    EngineError, IngredientLine, InstitutionEnrollment, MenuEntry, MenuParameters, Modality,
    ModalityRate, Preparation, RateTable, ResultEngine, Unit,
    ingredients::roll_up,
    numeric::{clamp_non_negative, lenient, required},
};

fn positive_count(value: i64, label: &str) -> ResultEngine<u32> {
    u32::try_from(value).ok().filter(|count| *count > 0).ok_or_else(|| {
        EngineError::InvalidMenuParameters(format!("{label} must be > 0, got {value}"))
    })
}

fn non_negative_count(value: i64, label: &str) -> ResultEngine<u32> {
    u32::try_from(value)
        .map_err(|_| EngineError::InvalidInput(format!("{label} must be >= 0, got {value}")))
}

/// Converts one ingredient row. Quantity and unit cost are coerced
/// best-effort; the unit code is strict.
pub fn ingredient_line(form: &ingredient::IngredientLineForm) -> ResultEngine<IngredientLine> {
    let unit = Unit::try_from(form.unit.as_str())?;
    Ok(IngredientLine::new(
        form.name.clone(),
        lenient(&form.quantity),
        unit,
        lenient(&form.unit_cost),
    ))
}

/// Converts a preparation form, rolling its ingredient lines up on the way.
///
/// # Errors
///
/// [`EngineError::InvalidYield`] for a non-positive yield,
/// [`EngineError::InvalidInput`] for an unparseable cost or margin field or
/// an unknown unit code.
pub fn preparation(form: &preparation::PreparationForm) -> ResultEngine<Preparation> {
    let lines = form
        .ingredients
        .iter()
        .map(ingredient_line)
        .collect::<ResultEngine<Vec<_>>>()?;
    let summary = roll_up(&lines);

    let yield_portions = u32::try_from(form.yield_portions)
        .ok()
        .filter(|portions| *portions > 0)
        .ok_or_else(|| {
            EngineError::InvalidYield(format!(
                "\"{}\" must yield at least one portion, got {}",
                form.name, form.yield_portions
            ))
        })?;

    Ok(Preparation {
        name: form.name.clone(),
        category: form.category.clone(),
        yield_portions,
        ingredient_total: summary.ingredient_total,
        labor_cost: clamp_non_negative(required(&form.labor_cost, "labor cost")?),
        energy_cost: clamp_non_negative(required(&form.energy_cost, "energy cost")?),
        other_costs: clamp_non_negative(required(&form.other_costs, "other costs")?),
        margin_percent: required(&form.margin_percent, "margin")?,
    })
}

/// Converts a menu form into its entries and parameters.
pub fn menu(form: &menu::MenuForm) -> ResultEngine<(Vec<MenuEntry>, MenuParameters)> {
    let entries = form
        .entries
        .iter()
        .map(|entry| {
            Ok(MenuEntry {
                name: entry.name.clone(),
                total_cost: required(&entry.total_cost, "preparation cost")?,
                servings_planned: non_negative_count(entry.servings_planned, "servings")?,
            })
        })
        .collect::<ResultEngine<Vec<_>>>()?;

    let params = MenuParameters {
        total_students: positive_count(form.total_students, "total_students")?,
        school_days: positive_count(form.school_days, "school_days")?,
        meals_per_day: positive_count(form.meals_per_day, "meals_per_day")?,
    };

    Ok((entries, params))
}

/// Builds a rate table from form rows.
///
/// # Errors
///
/// [`EngineError::UnknownModality`] for a modality name outside the known
/// set, [`EngineError::InvalidInput`] for an unparseable rate or a
/// non-positive school-day count.
pub fn rate_table(rows: &[funding_forms::ModalityRateRow]) -> ResultEngine<RateTable> {
    let rates = rows
        .iter()
        .map(|row| {
            let modality = Modality::try_from(row.modality.as_str())?;
            let school_days = u32::try_from(row.school_days)
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| {
                    EngineError::InvalidInput(format!(
                        "school_days for {modality} must be > 0, got {}",
                        row.school_days
                    ))
                })?;
            Ok(ModalityRate {
                modality,
                daily_per_capita_rate: clamp_non_negative(required(
                    &row.daily_per_capita_rate,
                    "daily rate",
                )?),
                school_days,
            })
        })
        .collect::<ResultEngine<Vec<_>>>()?;
    Ok(RateTable::new(rates))
}

/// Converts one institution's enrollment form.
pub fn institution_enrollment(
    form: &funding_forms::InstitutionEnrollmentForm,
) -> ResultEngine<InstitutionEnrollment> {
    let enrollment = form
        .enrollment
        .iter()
        .map(|row| {
            let modality = Modality::try_from(row.modality.as_str())?;
            let students = non_negative_count(row.students, "students")?;
            Ok((modality, students))
        })
        .collect::<ResultEngine<_>>()?;
    Ok(InstitutionEnrollment {
        institution_id: form.institution_id,
        enrollment,
    })
}

/// Reads the purchase totals for the compliance check.
pub fn purchase_totals(form: &funding_forms::PurchaseTotals) -> ResultEngine<(f64, f64)> {
    Ok((
        required(&form.family_farming_spend, "family farming spend")?,
        required(&form.total_spend, "total spend")?,
    ))
}

#[cfg(test)]
mod tests {
    use api_types::NumberOrText;

    use super::*;

    fn line_form(quantity: NumberOrText, unit_cost: NumberOrText) -> ingredient::IngredientLineForm {
        ingredient::IngredientLineForm {
            name: "Arroz".to_string(),
            quantity,
            unit: "kg".to_string(),
            unit_cost,
        }
    }

    #[test]
    fn ingredient_fields_coerce_instead_of_failing() {
        let line = ingredient_line(&line_form("oops".into(), (-4.0).into())).unwrap();
        assert_eq!(line.quantity, 0.0);
        assert_eq!(line.unit_cost, 0.0);
    }

    #[test]
    fn unknown_unit_is_strict() {
        let mut form = line_form(1.0.into(), 1.0.into());
        form.unit = "sack".to_string();
        assert!(matches!(
            ingredient_line(&form),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn preparation_costs_are_strict() {
        let form = preparation::PreparationForm {
            name: "Feijoada".to_string(),
            category: "Prato principal".to_string(),
            yield_portions: 100,
            ingredients: vec![],
            labor_cost: "not a number".into(),
            energy_cost: 0.0.into(),
            other_costs: 0.0.into(),
            margin_percent: 15.0.into(),
        };
        assert!(matches!(
            preparation(&form),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn negative_yield_is_invalid_yield() {
        let form = preparation::PreparationForm {
            name: "Sopa".to_string(),
            category: "Sopa".to_string(),
            yield_portions: -10,
            ingredients: vec![],
            labor_cost: 0.0.into(),
            energy_cost: 0.0.into(),
            other_costs: 0.0.into(),
            margin_percent: 0.0.into(),
        };
        assert!(matches!(preparation(&form), Err(EngineError::InvalidYield(_))));
    }

    #[test]
    fn menu_counts_must_be_positive() {
        let form = menu::MenuForm {
            entries: vec![],
            total_students: 0,
            school_days: 200,
            meals_per_day: 1,
        };
        assert!(matches!(
            menu(&form),
            Err(EngineError::InvalidMenuParameters(_))
        ));
    }
}
