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

/// A-priori trisomy 21 risk by maternal age at delivery, as "1 in N"
/// denominators. Shared baseline for the whole trisomy screening family.
pub(crate) const MATERNAL_AGE_RISK: &[(f64, f64)] = &[
    (20.0, 1525.0),
    (25.0, 1340.0),
    (30.0, 940.0),
    (31.0, 885.0),
    (32.0, 725.0),
    (33.0, 535.0),
    (34.0, 390.0),
    (35.0, 290.0),
    (36.0, 225.0),
    (37.0, 170.0),
    (38.0, 125.0),
    (39.0, 100.0),
    (40.0, 75.0),
    (41.0, 60.0),
    (42.0, 45.0),
    (43.0, 35.0),
    (44.0, 25.0),
    (45.0, 20.0),
];

pub(crate) fn maternal_age_table() -> Result<ReferenceTable, CoreError> {
    ReferenceTable::from_inverse_risk(MATERNAL_AGE_RISK)
}

/// Conventional screening cut points: High above 1:100, Low at or below
/// 1:1000.
pub(crate) fn screening_bands() -> Result<ThresholdBands<RiskBand>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::upto(1.0 / 1000.0, RiskBand::Low),
            Band::upto(1.0 / 100.0, RiskBand::Intermediate),
        ],
        RiskBand::High,
    )
}

pub(crate) const T21_ADVICE: BandAdvice = BandAdvice {
    low: &[
        "Control prenatal habitual",
        "Screening ecográfico rutinario",
    ],
    intermediate: &[
        "Seguimiento ecográfico según protocolo",
        "Control prenatal regular",
        "Considerar evaluación adicional según otros factores de riesgo",
    ],
    high: &[
        "Se recomienda evaluación por especialista",
        "Considerar estudio genético diagnóstico",
        "Seguimiento ecográfico detallado",
        "Evaluación cardíaca fetal especializada",
    ],
};

pub(crate) fn validate_maternal_age(age: f64) -> Result<(), CoreError> {
    if !age.is_finite() {
        return Err(CoreError::NonFinite {
            field: "maternal_age",
        });
    }
    if !(15.0..=50.0).contains(&age) {
        return Err(CoreError::OutOfRange {
            field: "maternal_age",
            value: age,
            min: 15.0,
            max: 50.0,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct MaternalAgeInput {
    pub maternal_age: f64,
    #[serde(default)]
    pub previous_t21: bool,
}

/// Age-only risk: the a-priori estimate before any marker adjustment,
/// corrected for a previous affected pregnancy.
pub fn assess(input: &MaternalAgeInput) -> Result<RiskResult, CoreError> {
    validate_maternal_age(input.maternal_age)?;
    let engine = RiskEngine::new(
        maternal_age_table()?,
        AdjustmentChain::new(vec![RiskFactor::new(
            "antecedente de T21",
            |m: &MaternalAgeInput| {
                if m.previous_t21 {
                    FactorOutcome::Multiply(2.5)
                } else {
                    FactorOutcome::Neutral
                }
            },
        )]),
        screening_bands()?,
        T21_ADVICE,
    );
    engine.compute(
        input.maternal_age,
        &format!("edad materna ({} años)", input.maternal_age),
        input,
    )
}

pub struct MaternalAge;

impl Calculator for MaternalAge {
    fn id(&self) -> &str {
        "t21_age"
    }

    fn name(&self) -> &str {
        "Riesgo de trisomía 21 por edad materna"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: MaternalAgeInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = result.band.label(), "risk assessed");
        Ok(serde_json::to_value(result)?)
    }
}
