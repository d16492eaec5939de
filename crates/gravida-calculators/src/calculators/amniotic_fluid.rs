//! Amniotic fluid index: the four-quadrant sum placed on the standard
//! oligo/polyhydramnios ladder.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gravida_core::bands::{Band, ThresholdBands};
use gravida_core::error::CoreError;

use crate::error::CalculatorError;
use crate::Calculator;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct AmnioticFluidInput {
    pub q1_cm: f64,
    pub q2_cm: f64,
    pub q3_cm: f64,
    pub q4_cm: f64,
}

impl AmnioticFluidInput {
    fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("q1_cm", self.q1_cm),
            ("q2_cm", self.q2_cm),
            ("q3_cm", self.q3_cm),
            ("q4_cm", self.q4_cm),
        ] {
            if !value.is_finite() {
                return Err(CoreError::NonFinite { field });
            }
            if !(0.0..=25.0).contains(&value) {
                return Err(CoreError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 25.0,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AmnioticFluidResult {
    pub index_cm: f64,
    pub category: String,
    pub abnormal: bool,
}

/// Severe oligohydramnios under 5cm, oligohydramnios under 8cm, normal
/// through 18cm, mild polyhydramnios through 24cm, severe above.
fn fluid_bands() -> Result<ThresholdBands<(&'static str, bool)>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::below(5.0, ("Oligohidramnios severo", true)),
            Band::below(8.0, ("Oligohidramnios", true)),
            Band::upto(18.0, ("Normal", false)),
            Band::upto(24.0, ("Polihidramnios leve", true)),
        ],
        ("Polihidramnios severo", true),
    )
}

pub fn assess(input: &AmnioticFluidInput) -> Result<AmnioticFluidResult, CoreError> {
    input.validate()?;
    let index = input.q1_cm + input.q2_cm + input.q3_cm + input.q4_cm;
    let (category, abnormal) = fluid_bands()?.classify(index)?;
    Ok(AmnioticFluidResult {
        index_cm: (index * 10.0).round() / 10.0,
        category: category.to_string(),
        abnormal,
    })
}

pub struct AmnioticFluid;

impl Calculator for AmnioticFluid {
    fn id(&self) -> &str {
        "amniotic_fluid"
    }

    fn name(&self) -> &str {
        "Índice de líquido amniótico"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: AmnioticFluidInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(
            calculator = self.id(),
            category = %result.category,
            "fluid index classified"
        );
        Ok(serde_json::to_value(result)?)
    }
}
