//! First-trimester preeclampsia screening after the Fetal Medicine
//! Foundation model, reduced to one likelihood ratio per factor over a
//! flat a-priori incidence. High risk starts above 1 in 150.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gravida_core::bands::{Band, ThresholdBands};
use gravida_core::error::CoreError;
use gravida_core::models::risk::{RiskBand, RiskResult};
use gravida_core::table::ReferenceTable;

use crate::calculators::t21_age::validate_maternal_age;
use crate::error::CalculatorError;
use crate::risk::{AdjustmentChain, BandAdvice, FactorOutcome, RiskEngine, RiskFactor};
use crate::Calculator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Ethnicity {
    #[serde(rename = "caucasica")]
    Caucasian,
    #[serde(rename = "afro")]
    AfroCaribbean,
    #[serde(rename = "sudasiatica")]
    SouthAsian,
    #[serde(rename = "asiaticooriental")]
    EastAsian,
    #[serde(rename = "mixta")]
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConceptionMethod {
    Spontaneous,
    Ovulation,
    Ivf,
}

/// Maternal characteristics and first-trimester markers. Blood pressure
/// enters as the mean arterial pressure, the covariate the model is
/// fitted on. Biomarkers are optional and surface as "Sin dato" when
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct PreeclampsiaInput {
    pub maternal_age: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub ethnicity: Ethnicity,
    pub crl_mm: f64,
    pub mean_arterial_pressure: f64,
    pub conception: ConceptionMethod,
    #[serde(default)]
    pub chronic_hypertension: bool,
    #[serde(default)]
    pub diabetes_type1: bool,
    #[serde(default)]
    pub diabetes_type2: bool,
    #[serde(default)]
    pub lupus_or_aps: bool,
    #[serde(default)]
    pub nulliparous: bool,
    #[serde(default)]
    pub previous_preeclampsia: bool,
    #[serde(default)]
    pub family_history: bool,
    #[serde(default)]
    pub multiple_pregnancy: bool,
    #[serde(default)]
    pub uterine_artery_pi: Option<f64>,
    #[serde(default)]
    pub pappa_mom: Option<f64>,
    #[serde(default)]
    pub plgf_pg_ml: Option<f64>,
}

impl PreeclampsiaInput {
    fn validate(&self) -> Result<(), CoreError> {
        validate_maternal_age(self.maternal_age)?;
        for (field, value, min, max) in [
            ("weight_kg", self.weight_kg, 35.0, 250.0),
            ("height_cm", self.height_cm, 120.0, 220.0),
            // CRL window of the 11 to 13+6 week screening visit.
            ("crl_mm", self.crl_mm, 45.0, 84.0),
            (
                "mean_arterial_pressure",
                self.mean_arterial_pressure,
                50.0,
                160.0,
            ),
        ] {
            if !value.is_finite() {
                return Err(CoreError::NonFinite { field });
            }
            if !(min..=max).contains(&value) {
                return Err(CoreError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        for (field, value, min, max) in [
            ("uterine_artery_pi", self.uterine_artery_pi, 0.3, 4.0),
            ("pappa_mom", self.pappa_mom, 0.1, 10.0),
            ("plgf_pg_ml", self.plgf_pg_ml, 5.0, 2000.0),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(CoreError::NonFinite { field });
                }
                if !(min..=max).contains(&value) {
                    return Err(CoreError::OutOfRange {
                        field,
                        value,
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A-priori incidence before any adjustment, roughly 1 in 606. Age
/// enters the chain as its own likelihood ratio, so the table itself is
/// flat over the maternal-age axis.
fn prior_table() -> Result<ReferenceTable, CoreError> {
    ReferenceTable::new(&[(15.0, 0.00165), (50.0, 0.00165)])
}

fn threshold_bands() -> Result<ThresholdBands<RiskBand>, CoreError> {
    ThresholdBands::new(vec![Band::upto(1.0 / 150.0, RiskBand::Low)], RiskBand::High)
}

const PREECLAMPSIA_ADVICE: BandAdvice = BandAdvice {
    low: &["Control prenatal de rutina"],
    intermediate: &["Control prenatal de rutina"],
    high: &[
        "Iniciar aspirina 150mg/día antes de las 16 semanas",
        "Seguimiento estrecho",
    ],
};

/// Likelihood ratios per factor. Continuous covariates are log-linear
/// around their population pivot (CRL 65mm, 26 years, BMI 24, MAP 85);
/// categorical history factors carry fixed published ratios.
fn chain() -> AdjustmentChain<PreeclampsiaInput> {
    AdjustmentChain::new(vec![
        RiskFactor::new("longitud céfalo-caudal", |m| {
            FactorOutcome::Multiply((-0.0378 * (m.crl_mm - 65.0)).exp())
        }),
        RiskFactor::new("edad materna", |m| {
            FactorOutcome::Multiply((0.0323 * (m.maternal_age - 26.0)).exp())
        }),
        RiskFactor::new("índice de masa corporal", |m| {
            let height_m = m.height_cm / 100.0;
            let bmi = m.weight_kg / (height_m * height_m);
            FactorOutcome::Multiply((0.0925 * (bmi / 24.0).ln()).exp())
        }),
        RiskFactor::new("etnia", |m| match m.ethnicity {
            Ethnicity::Caucasian => FactorOutcome::Neutral,
            Ethnicity::AfroCaribbean => FactorOutcome::Multiply(2.12),
            Ethnicity::SouthAsian => FactorOutcome::Multiply(1.82),
            Ethnicity::EastAsian => FactorOutcome::Multiply(0.76),
            Ethnicity::Mixed => FactorOutcome::Multiply(1.54),
        }),
        RiskFactor::new("hipertensión crónica", |m| {
            if m.chronic_hypertension {
                FactorOutcome::Multiply(5.13)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("diabetes pregestacional", |m| {
            if m.diabetes_type1 || m.diabetes_type2 {
                FactorOutcome::Multiply(3.78)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("lupus o síndrome antifosfolípido", |m| {
            if m.lupus_or_aps {
                FactorOutcome::Multiply(4.24)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("nuliparidad", |m| {
            if m.nulliparous {
                FactorOutcome::Multiply(2.34)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("preeclampsia previa", |m| {
            if m.previous_preeclampsia {
                FactorOutcome::Multiply(3.89)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("antecedente familiar de preeclampsia", |m| {
            if m.family_history {
                FactorOutcome::Multiply(1.42)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("método de concepción", |m| match m.conception {
            ConceptionMethod::Spontaneous => FactorOutcome::Neutral,
            ConceptionMethod::Ovulation => FactorOutcome::Multiply(1.41),
            ConceptionMethod::Ivf => FactorOutcome::Multiply(1.72),
        }),
        RiskFactor::new("embarazo múltiple", |m| {
            if m.multiple_pregnancy {
                FactorOutcome::Multiply(1.68)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("presión arterial media", |m| {
            FactorOutcome::Multiply((0.0525 * (m.mean_arterial_pressure - 85.0)).exp())
        }),
        RiskFactor::new("índice de pulsatilidad de arterias uterinas", |m| {
            match m.uterine_artery_pi {
                Some(pi) => FactorOutcome::Multiply((0.5186 * (pi / 1.5).ln()).exp()),
                None => FactorOutcome::Unknown,
            }
        }),
        RiskFactor::new("PAPP-A", |m| match m.pappa_mom {
            Some(pappa) => FactorOutcome::Multiply((-0.4146 * pappa.ln()).exp()),
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("factor de crecimiento placentario (PlGF)", |m| {
            match m.plgf_pg_ml {
                Some(plgf) => FactorOutcome::Multiply((-0.3351 * (plgf / 100.0).ln()).exp()),
                None => FactorOutcome::Unknown,
            }
        }),
    ])
}

pub fn assess(input: &PreeclampsiaInput) -> Result<RiskResult, CoreError> {
    input.validate()?;
    let engine = RiskEngine::new(
        prior_table()?,
        chain(),
        threshold_bands()?,
        PREECLAMPSIA_ADVICE,
    );
    engine.compute(
        input.maternal_age,
        "incidencia poblacional del primer trimestre",
        input,
    )
}

pub struct Preeclampsia;

impl Calculator for Preeclampsia {
    fn id(&self) -> &str {
        "preeclampsia"
    }

    fn name(&self) -> &str {
        "Riesgo de preeclampsia del primer trimestre"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: PreeclampsiaInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = result.band.label(), "risk assessed");
        Ok(serde_json::to_value(result)?)
    }
}
