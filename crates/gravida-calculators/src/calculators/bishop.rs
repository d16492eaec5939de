//! Bishop score: five cervical exam components summed and banded into
//! induction favorability.

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
pub struct BishopInput {
    pub dilation: u8,
    pub effacement: u8,
    pub consistency: u8,
    pub position: u8,
    pub station: u8,
}

impl BishopInput {
    fn validate(&self) -> Result<(), CoreError> {
        for (field, value, max) in [
            ("dilation", self.dilation, 3),
            ("effacement", self.effacement, 3),
            ("consistency", self.consistency, 2),
            ("position", self.position, 2),
            ("station", self.station, 3),
        ] {
            if value > max {
                return Err(CoreError::OutOfRange {
                    field,
                    value: f64::from(value),
                    min: 0.0,
                    max: f64::from(max),
                });
            }
        }
        Ok(())
    }

    fn total(&self) -> u8 {
        self.dilation + self.effacement + self.consistency + self.position + self.station
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BishopResult {
    pub score: u8,
    pub favorability: String,
    pub recommendation: String,
}

fn score_bands() -> Result<ThresholdBands<(&'static str, &'static str)>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::below(
                5.0,
                (
                    "Desfavorable",
                    "Considerar maduración cervical antes de la inducción",
                ),
            ),
            Band::upto(
                8.0,
                (
                    "Intermedio",
                    "Inducción posible, monitorizar progreso cuidadosamente",
                ),
            ),
        ],
        ("Favorable", "Condiciones favorables para inducción"),
    )
}

pub fn assess(input: &BishopInput) -> Result<BishopResult, CoreError> {
    input.validate()?;
    let score = input.total();
    let (favorability, recommendation) = score_bands()?.classify(f64::from(score))?;
    Ok(BishopResult {
        score,
        favorability: favorability.to_string(),
        recommendation: recommendation.to_string(),
    })
}

pub struct Bishop;

impl Calculator for Bishop {
    fn id(&self) -> &str {
        "bishop"
    }

    fn name(&self) -> &str {
        "Test de Bishop"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: BishopInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(
            calculator = self.id(),
            score = result.score,
            favorability = %result.favorability,
            "score banded"
        );
        Ok(serde_json::to_value(result)?)
    }
}
