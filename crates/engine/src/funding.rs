//! The module contains the statutory fund-distribution calculator.
//!
//! PNAE pays a fixed per-capita daily rate for each education modality:
//! `amount = students × daily rate × school days`. This calculator is
//! independent of the costing pipeline; it takes a rate table and
//! per-institution enrollment and produces per-modality transfer amounts,
//! plus the family-farming purchase compliance check.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, normalize::norm_key};

/// Statutory minimum share of purchases sourced from family farming, in
/// percent.
pub const FAMILY_FARMING_MINIMUM_PERCENT: f64 = 30.0;

/// Education modality recognized by the per-capita rate table.
///
/// The set is closed. A name outside it is an [`UnknownModality`] error,
/// never a fallback rate: the source's silent default mispriced unmatched
/// modalities.
///
/// [`UnknownModality`]: EngineError::UnknownModality
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "creche")]
    Creche,
    #[serde(rename = "pré-escola")]
    PreEscola,
    #[serde(rename = "fundamental")]
    Fundamental,
    #[serde(rename = "EJA")]
    Eja,
    #[serde(rename = "integral")]
    Integral,
    #[serde(rename = "AEE")]
    Aee,
}

impl Modality {
    /// All modalities, in the canonical reporting order.
    pub const ALL: [Modality; 6] = [
        Modality::Creche,
        Modality::PreEscola,
        Modality::Fundamental,
        Modality::Eja,
        Modality::Integral,
        Modality::Aee,
    ];

    /// Canonical display name.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Modality::Creche => "creche",
            Modality::PreEscola => "pré-escola",
            Modality::Fundamental => "fundamental",
            Modality::Eja => "EJA",
            Modality::Integral => "integral",
            Modality::Aee => "AEE",
        }
    }
}

impl core::fmt::Display for Modality {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Modality {
    type Error = EngineError;

    /// Accent and case insensitive exact match; no substring matching and
    /// no default.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match norm_key(value).as_str() {
            "creche" => Ok(Modality::Creche),
            "pre escola" => Ok(Modality::PreEscola),
            "fundamental" => Ok(Modality::Fundamental),
            "eja" => Ok(Modality::Eja),
            "integral" => Ok(Modality::Integral),
            "aee" => Ok(Modality::Aee),
            _ => Err(EngineError::UnknownModality(value.trim().to_string())),
        }
    }
}

/// Per-capita daily rate for one modality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModalityRate {
    pub modality: Modality,
    pub daily_per_capita_rate: f64,
    pub school_days: u32,
}

impl ModalityRate {
    /// Annual transfer per enrolled student.
    #[must_use]
    pub fn annual_per_student(&self) -> f64 {
        self.daily_per_capita_rate * f64::from(self.school_days)
    }
}

/// Rate table keyed by modality. Later rows replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: HashMap<Modality, ModalityRate>,
}

impl RateTable {
    #[must_use]
    pub fn new(rates: impl IntoIterator<Item = ModalityRate>) -> Self {
        Self {
            rates: rates
                .into_iter()
                .map(|rate| (rate.modality, rate))
                .collect(),
        }
    }

    /// Looks a modality's rate up.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownModality`] when the table has no row for it.
    pub fn get(&self, modality: Modality) -> ResultEngine<&ModalityRate> {
        self.rates.get(&modality).ok_or_else(|| {
            tracing::warn!(modality = %modality, "modality missing from rate table");
            EngineError::UnknownModality(modality.code().to_string())
        })
    }
}

/// Enrollment of one institution, by modality.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstitutionEnrollment {
    pub institution_id: Uuid,
    pub enrollment: HashMap<Modality, u32>,
}

/// Transfer amount for one (institution, modality) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModalityAmount {
    pub modality: Modality,
    pub students: u32,
    pub amount: f64,
}

/// Fund distribution of one institution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstitutionDistribution {
    pub institution_id: Uuid,
    /// In [`Modality::ALL`] order. Zero-enrollment modalities are omitted.
    pub amounts: Vec<ModalityAmount>,
    pub institution_total: f64,
}

/// Computes the statutory transfers for each institution.
///
/// Zero-enrollment modalities are omitted from the breakdown and contribute
/// 0 to the total, but their rate must still exist in the table: every
/// modality an enrollment record names is validated.
///
/// # Errors
///
/// [`EngineError::UnknownModality`] when an enrollment names a modality the
/// table has no rate for.
pub fn distribute(
    table: &RateTable,
    institutions: &[InstitutionEnrollment],
) -> ResultEngine<Vec<InstitutionDistribution>> {
    institutions
        .iter()
        .map(|institution| {
            let mut amounts = Vec::new();
            let mut institution_total = 0.0;
            for modality in Modality::ALL {
                let Some(&students) = institution.enrollment.get(&modality) else {
                    continue;
                };
                let rate = table.get(modality)?;
                if students == 0 {
                    continue;
                }
                let amount = f64::from(students) * rate.annual_per_student();
                institution_total += amount;
                amounts.push(ModalityAmount {
                    modality,
                    students,
                    amount,
                });
            }
            Ok(InstitutionDistribution {
                institution_id: institution.institution_id,
                amounts,
                institution_total,
            })
        })
        .collect()
}

/// Result of the family-farming purchase compliance check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Family-farming spend over total spend, in percent. Full precision.
    pub ratio: f64,
    /// `ratio >= 30.0`.
    pub compliant: bool,
}

/// Checks the family-farming purchase share against the statutory minimum.
///
/// Returns `None` when `total_spend` is not positive: with nothing bought
/// the check is not applicable, and a 0 would falsely read as 0% compliant.
#[must_use]
pub fn family_farming_compliance(
    family_farming_spend: f64,
    total_spend: f64,
) -> Option<ComplianceCheck> {
    if total_spend > 0.0 {
        let ratio = family_farming_spend / total_spend * 100.0;
        Some(ComplianceCheck {
            ratio,
            compliant: ratio >= FAMILY_FARMING_MINIMUM_PERCENT,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::new([
            ModalityRate {
                modality: Modality::Creche,
                daily_per_capita_rate: 1.07,
                school_days: 200,
            },
            ModalityRate {
                modality: Modality::Fundamental,
                daily_per_capita_rate: 0.36,
                school_days: 200,
            },
        ])
    }

    fn institution(enrollment: &[(Modality, u32)]) -> InstitutionEnrollment {
        InstitutionEnrollment {
            institution_id: Uuid::new_v4(),
            enrollment: enrollment.iter().copied().collect(),
        }
    }

    #[test]
    fn prices_the_reference_modality() {
        let result = distribute(&table(), &[institution(&[(Modality::Fundamental, 450)])]).unwrap();
        assert_eq!(result[0].amounts.len(), 1);
        assert!((result[0].amounts[0].amount - 32_400.0).abs() < 1e-9);
        assert!((result[0].institution_total - 32_400.0).abs() < 1e-9);
    }

    #[test]
    fn zero_enrollment_rows_are_omitted_but_total_is_unchanged() {
        let with_zero = institution(&[(Modality::Fundamental, 450), (Modality::Creche, 0)]);
        let result = distribute(&table(), &[with_zero]).unwrap();
        assert_eq!(result[0].amounts.len(), 1);
        assert_eq!(result[0].amounts[0].modality, Modality::Fundamental);
        assert!((result[0].institution_total - 32_400.0).abs() < 1e-9);
    }

    #[test]
    fn missing_rate_is_an_error_not_a_default() {
        let result = distribute(&table(), &[institution(&[(Modality::Eja, 30)])]);
        assert_eq!(
            result,
            Err(EngineError::UnknownModality("EJA".to_string()))
        );
    }

    #[test]
    fn modality_parse_ignores_accents_and_case() {
        assert_eq!(Modality::try_from("Pré-Escola").unwrap(), Modality::PreEscola);
        assert_eq!(Modality::try_from("PRE ESCOLA").unwrap(), Modality::PreEscola);
        assert_eq!(Modality::try_from("eja").unwrap(), Modality::Eja);
        assert!(matches!(
            Modality::try_from("ensino medio"),
            Err(EngineError::UnknownModality(_))
        ));
    }

    #[test]
    fn compliance_matches_the_statutory_gate() {
        let check = family_farming_compliance(1_002_373.0, 2_847_650.0).unwrap();
        assert!((check.ratio - 35.2).abs() < 1e-4);
        assert!(check.compliant);

        let below = family_farming_compliance(29.0, 100.0).unwrap();
        assert!(!below.compliant);

        let at_minimum = family_farming_compliance(30.0, 100.0).unwrap();
        assert!(at_minimum.compliant);
    }

    #[test]
    fn compliance_without_spend_is_not_applicable() {
        assert_eq!(family_farming_compliance(10.0, 0.0), None);
        assert_eq!(family_farming_compliance(10.0, -5.0), None);
    }
}
