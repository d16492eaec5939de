//! Spontaneous preterm birth risk from transvaginal cervical length,
//! adjusted by obstetric history and current clinical findings.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gravida_core::bands::{Band, ThresholdBands};
use gravida_core::error::CoreError;
use gravida_core::models::risk::{RiskBand, RiskResult};
use gravida_core::table::ReferenceTable;

use crate::error::CalculatorError;
use crate::risk::{AdjustmentChain, BandAdvice, FactorOutcome, RiskEngine, RiskFactor};
use crate::Calculator;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct PretermBirthInput {
    pub cervical_length_mm: f64,
    pub fetus_count: u8,
    #[serde(default)]
    pub contractions: bool,
    #[serde(default)]
    pub previous_preterm_birth: bool,
    #[serde(default)]
    pub membrane_rupture: bool,
    #[serde(default)]
    pub cervical_surgery: bool,
}

impl PretermBirthInput {
    fn validate(&self) -> Result<(), CoreError> {
        if !self.cervical_length_mm.is_finite() {
            return Err(CoreError::NonFinite {
                field: "cervical_length_mm",
            });
        }
        if !(0.0..=80.0).contains(&self.cervical_length_mm) {
            return Err(CoreError::OutOfRange {
                field: "cervical_length_mm",
                value: self.cervical_length_mm,
                min: 0.0,
                max: 80.0,
            });
        }
        if !(1..=5).contains(&self.fetus_count) {
            return Err(CoreError::OutOfRange {
                field: "fetus_count",
                value: f64::from(self.fetus_count),
                min: 1.0,
                max: 5.0,
            });
        }
        Ok(())
    }
}

/// Probability of spontaneous preterm delivery decays exponentially
/// with cervical length, from 0.80 at a 5mm cervix with rate 0.08 per
/// millimeter. Sampled at 1mm knots; lengths beyond the knots clamp to
/// the nearest end.
fn cervical_length_table() -> Result<ReferenceTable, CoreError> {
    let mut points = Vec::with_capacity(46);
    for mm in 5..=50u32 {
        let length = f64::from(mm);
        let risk = 0.007 + (0.80 - 0.007) * (-0.08 * (length - 5.0)).exp();
        points.push((length, risk));
    }
    ReferenceTable::new(&points)
}

fn probability_bands() -> Result<ThresholdBands<RiskBand>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::below(0.1, RiskBand::Low),
            Band::below(0.3, RiskBand::Intermediate),
        ],
        RiskBand::High,
    )
}

const PRETERM_ADVICE: BandAdvice = BandAdvice {
    low: &["Control prenatal habitual"],
    intermediate: &[
        "Seguimiento más frecuente",
        "Considerar progesterona si hay factores de riesgo adicionales",
    ],
    high: &[
        "Seguimiento estrecho",
        "Considerar hospitalización según caso",
        "Evaluar uso de corticoides para maduración pulmonar",
    ],
};

fn chain() -> AdjustmentChain<PretermBirthInput> {
    AdjustmentChain::new(vec![
        RiskFactor::new("gestación múltiple", |m| {
            if m.fetus_count > 1 {
                FactorOutcome::Multiply(1.5)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("dinámica uterina", |m| {
            if m.contractions {
                FactorOutcome::Multiply(1.2)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("parto pretérmino previo", |m| {
            if m.previous_preterm_birth {
                FactorOutcome::Multiply(1.3)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("rotura prematura de membranas", |m| {
            if m.membrane_rupture {
                FactorOutcome::Multiply(1.4)
            } else {
                FactorOutcome::Neutral
            }
        }),
        RiskFactor::new("cirugía cervical previa", |m| {
            if m.cervical_surgery {
                FactorOutcome::Multiply(1.1)
            } else {
                FactorOutcome::Neutral
            }
        }),
    ])
}

pub fn assess(input: &PretermBirthInput) -> Result<RiskResult, CoreError> {
    input.validate()?;
    let engine = RiskEngine::new(
        cervical_length_table()?,
        chain(),
        probability_bands()?,
        PRETERM_ADVICE,
    );
    engine.compute(
        input.cervical_length_mm,
        &format!("longitud cervical ({} mm)", input.cervical_length_mm),
        input,
    )
}

pub struct PretermBirth;

impl Calculator for PretermBirth {
    fn id(&self) -> &str {
        "preterm_birth"
    }

    fn name(&self) -> &str {
        "Riesgo de parto pretérmino"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: PretermBirthInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = result.band.label(), "risk assessed");
        Ok(serde_json::to_value(result)?)
    }
}
