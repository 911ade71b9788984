use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A numeric field exactly as a form submitted it: either a native JSON
/// number or decimal-formatted text.
///
/// The engine owns the conversion; this type only preserves what the user
/// typed. Decimal commas are **not** auto-detected — text must satisfy the
/// standard numeric parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl From<f64> for NumberOrText {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumberOrText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

pub mod ingredient {
    use super::*;

    /// One ingredient row of a preparation form.
    ///
    /// `quantity` and `unit_cost` keep the historically loose form behavior:
    /// the engine coerces them best-effort, so unparseable text prices the
    /// row at zero instead of failing the whole preparation.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct IngredientLineForm {
        pub name: String,
        pub quantity: NumberOrText,
        /// Measurement unit code: `kg`, `g`, `L`, `ml`, or `unit`.
        pub unit: String,
        pub unit_cost: NumberOrText,
    }
}

pub mod preparation {
    use super::*;

    /// A full preparation (dish) as entered in the costing form.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct PreparationForm {
        pub name: String,
        pub category: String,
        /// Portions one batch yields. Must be > 0.
        pub yield_portions: i64,
        pub ingredients: Vec<ingredient::IngredientLineForm>,
        pub labor_cost: NumberOrText,
        pub energy_cost: NumberOrText,
        pub other_costs: NumberOrText,
        /// Target margin in percent, e.g. 15 for 15%. May be negative down
        /// to -100 (loss-leader pricing).
        pub margin_percent: NumberOrText,
    }
}

pub mod menu {
    use super::*;

    /// One dish of a menu, referencing an already-costed preparation.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MenuEntryForm {
        pub name: String,
        /// The preparation's total batch cost, as produced by the
        /// preparation calculator.
        pub total_cost: NumberOrText,
        /// Informational only; never multiplied into costs.
        pub servings_planned: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MenuForm {
        pub entries: Vec<MenuEntryForm>,
        pub total_students: i64,
        pub school_days: i64,
        pub meals_per_day: i64,
    }
}

pub mod funding {
    use super::*;

    /// One row of the per-capita rate table.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ModalityRateRow {
        /// Modality name as displayed, e.g. "Pré-Escola". Matched
        /// accent/case-insensitively by the engine.
        pub modality: String,
        pub daily_per_capita_rate: NumberOrText,
        pub school_days: i64,
    }

    /// Enrollment for one modality at one institution.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct EnrollmentRow {
        pub modality: String,
        pub students: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct InstitutionEnrollmentForm {
        pub institution_id: Uuid,
        pub enrollment: Vec<EnrollmentRow>,
    }

    /// Purchase totals for the family-farming compliance check.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct PurchaseTotals {
        pub family_farming_spend: NumberOrText,
        pub total_spend: NumberOrText,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_or_text_accepts_both_json_shapes() {
        let n: NumberOrText = serde_json::from_str("4.5").unwrap();
        assert_eq!(n, NumberOrText::Number(4.5));

        let t: NumberOrText = serde_json::from_str("\"4.5\"").unwrap();
        assert_eq!(t, NumberOrText::Text("4.5".to_string()));
    }

    #[test]
    fn ingredient_form_round_trips() {
        let json = r#"{"name":"Arroz","quantity":"5","unit":"kg","unit_cost":5.0}"#;
        let form: ingredient::IngredientLineForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.quantity, NumberOrText::Text("5".to_string()));
        assert_eq!(form.unit_cost, NumberOrText::Number(5.0));
    }
}
