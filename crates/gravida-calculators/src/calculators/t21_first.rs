use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gravida_core::error::CoreError;
use gravida_core::models::risk::RiskResult;

use crate::calculators::t21_age::{
    maternal_age_table, screening_bands, validate_maternal_age, T21_ADVICE,
};
use crate::error::CalculatorError;
use crate::risk::{AdjustmentChain, FactorOutcome, RiskEngine, RiskFactor};
use crate::Calculator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DuctusFlow {
    Normal,
    Reversed,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TricuspidFlow {
    Normal,
    Regurgitation,
}

/// Combined first-trimester screening markers. Biochemistry in multiples
/// of the median; missing markers stay `None` and surface as explicit
/// "Sin dato" rationale entries.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct FirstTrimesterInput {
    pub maternal_age: f64,
    #[serde(default)]
    pub pappa_mom: Option<f64>,
    #[serde(default)]
    pub bhcg_mom: Option<f64>,
    #[serde(default)]
    pub nuchal_translucency_mm: Option<f64>,
    #[serde(default)]
    pub nasal_bone_present: Option<bool>,
    #[serde(default)]
    pub ductus_flow: Option<DuctusFlow>,
    #[serde(default)]
    pub tricuspid_flow: Option<TricuspidFlow>,
    #[serde(default)]
    pub previous_t21: bool,
}

impl FirstTrimesterInput {
    fn validate(&self) -> Result<(), CoreError> {
        validate_maternal_age(self.maternal_age)?;
        for (field, value, min, max) in [
            ("pappa_mom", self.pappa_mom, 0.1, 10.0),
            ("bhcg_mom", self.bhcg_mom, 0.1, 10.0),
            ("nuchal_translucency_mm", self.nuchal_translucency_mm, 0.5, 6.5),
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

fn chain() -> AdjustmentChain<FirstTrimesterInput> {
    AdjustmentChain::new(vec![
        // PAPP-A and free beta-hCG count as one combined adjustment; it
        // needs both values.
        RiskFactor::new("marcadores bioquímicos", |m| {
            match (m.pappa_mom, m.bhcg_mom) {
                (Some(pappa), Some(bhcg)) => {
                    let multiplier = 0.8
                        * if pappa < 0.5 { 2.0 } else { 1.0 }
                        * if bhcg > 2.0 { 1.8 } else { 1.0 };
                    FactorOutcome::Multiply(multiplier)
                }
                _ => FactorOutcome::Unknown,
            }
        }),
        RiskFactor::new("translucencia nucal", |m| match m.nuchal_translucency_mm {
            Some(nt) if nt > 3.0 => FactorOutcome::Multiply(3.0),
            Some(nt) if nt > 2.5 => FactorOutcome::Multiply(2.0),
            Some(_) => FactorOutcome::Multiply(1.0),
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("ausencia de hueso nasal", |m| match m.nasal_bone_present {
            Some(false) => FactorOutcome::Multiply(2.5),
            Some(true) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("flujo reverso en ductus venoso", |m| match m.ductus_flow {
            Some(DuctusFlow::Reversed) => FactorOutcome::Multiply(2.0),
            Some(_) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("regurgitación tricuspídea", |m| match m.tricuspid_flow {
            Some(TricuspidFlow::Regurgitation) => FactorOutcome::Multiply(2.0),
            Some(TricuspidFlow::Normal) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("antecedente de T21", |m| {
            if m.previous_t21 {
                FactorOutcome::Multiply(2.5)
            } else {
                FactorOutcome::Neutral
            }
        }),
    ])
}

/// Combined first-trimester risk: maternal-age baseline adjusted by
/// biochemistry and sonographic markers.
pub fn assess(input: &FirstTrimesterInput) -> Result<RiskResult, CoreError> {
    input.validate()?;
    let engine = RiskEngine::new(
        maternal_age_table()?,
        chain(),
        screening_bands()?,
        T21_ADVICE,
    );
    engine.compute(
        input.maternal_age,
        &format!("edad materna ({} años)", input.maternal_age),
        input,
    )
}

pub struct FirstTrimester;

impl Calculator for FirstTrimester {
    fn id(&self) -> &str {
        "t21_first"
    }

    fn name(&self) -> &str {
        "Riesgo combinado del primer trimestre"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: FirstTrimesterInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = result.band.label(), "risk assessed");
        Ok(serde_json::to_value(result)?)
    }
}
