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
pub enum NasalBoneStatus {
    Normal,
    Hypoplastic,
    Absent,
}

/// Genetic-sonogram soft markers. Each `Option` distinguishes "assessed
/// and normal" from "not assessed".
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct SecondTrimesterInput {
    pub maternal_age: f64,
    #[serde(default)]
    pub nasal_bone: Option<NasalBoneStatus>,
    #[serde(default)]
    pub cardiac_focus: Option<bool>,
    #[serde(default)]
    pub ventriculomegaly: Option<bool>,
    #[serde(default)]
    pub nuchal_fold_increased: Option<bool>,
    #[serde(default)]
    pub short_femur: Option<bool>,
    #[serde(default)]
    pub aberrant_right_subclavian: Option<bool>,
    #[serde(default)]
    pub hyperechogenic_bowel: Option<bool>,
    #[serde(default)]
    pub pyelectasis: Option<bool>,
    #[serde(default)]
    pub previous_t21: bool,
}

fn chain() -> AdjustmentChain<SecondTrimesterInput> {
    AdjustmentChain::new(vec![
        RiskFactor::new("ausencia de hueso nasal", |m| match m.nasal_bone {
            Some(NasalBoneStatus::Absent) => FactorOutcome::Multiply(2.5),
            Some(_) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("foco cardíaco ecogénico", |m| match m.cardiac_focus {
            Some(true) => FactorOutcome::Multiply(2.0),
            Some(false) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("ventriculomegalia", |m| match m.ventriculomegaly {
            Some(true) => FactorOutcome::Multiply(2.5),
            Some(false) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("pliegue nucal aumentado", |m| match m.nuchal_fold_increased {
            Some(true) => FactorOutcome::Multiply(3.0),
            Some(false) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("fémur corto", |m| match m.short_femur {
            Some(true) => FactorOutcome::Multiply(2.2),
            Some(false) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("arteria subclavia derecha aberrante", |m| {
            match m.aberrant_right_subclavian {
                Some(true) => FactorOutcome::Multiply(2.0),
                Some(false) => FactorOutcome::Neutral,
                None => FactorOutcome::Unknown,
            }
        }),
        RiskFactor::new("intestino hiperecogénico", |m| match m.hyperechogenic_bowel {
            Some(true) => FactorOutcome::Multiply(2.5),
            Some(false) => FactorOutcome::Neutral,
            None => FactorOutcome::Unknown,
        }),
        RiskFactor::new("pielectasia", |m| match m.pyelectasis {
            Some(true) => FactorOutcome::Multiply(1.8),
            Some(false) => FactorOutcome::Neutral,
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

/// Second-trimester risk: maternal-age baseline adjusted by the genetic
/// sonogram soft-marker likelihood ratios.
pub fn assess(input: &SecondTrimesterInput) -> Result<RiskResult, CoreError> {
    validate_maternal_age(input.maternal_age)?;
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

pub struct SecondTrimester;

impl Calculator for SecondTrimester {
    fn id(&self) -> &str {
        "t21_second"
    }

    fn name(&self) -> &str {
        "Marcadores del segundo trimestre"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: SecondTrimesterInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = result.band.label(), "risk assessed");
        Ok(serde_json::to_value(result)?)
    }
}
