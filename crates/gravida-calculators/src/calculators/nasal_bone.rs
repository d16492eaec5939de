//! Nasal bone length percentile screen. Hypoplasia sits below the p5
//! curve; a frankly absent bone has no measurement and is handled by
//! the trisomy calculators as a categorical marker.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gravida_core::bands::{Band, ThresholdBands};
use gravida_core::error::CoreError;
use gravida_core::gestation::GestationalAge;
use gravida_core::models::biometry::{BiometryResult, GrowthClass};
use gravida_core::table::ReferenceTable;

use crate::error::CalculatorError;
use crate::percentile::{PercentileCurveSet, PercentileEngine};
use crate::Calculator;

const NASAL_RANKS: [f64; 3] = [5.0, 50.0, 95.0];

/// Nasal bone length in millimeters at two-week intervals, columns
/// following `NASAL_RANKS`.
const NASAL_ROWS: &[(f64, [f64; 3])] = &[
    (12.0, [1.4, 2.3, 3.3]),
    (14.0, [2.0, 3.1, 4.2]),
    (16.0, [2.8, 4.0, 5.2]),
    (18.0, [3.5, 4.9, 6.3]),
    (20.0, [4.2, 5.7, 7.3]),
    (22.0, [4.8, 6.5, 8.2]),
    (24.0, [5.4, 7.2, 9.0]),
    (26.0, [5.9, 7.9, 9.8]),
    (28.0, [6.4, 8.5, 10.5]),
    (30.0, [6.8, 9.0, 11.2]),
    (32.0, [7.2, 9.5, 11.8]),
    (34.0, [7.5, 9.9, 12.3]),
];

fn nasal_curves() -> Result<PercentileCurveSet, CoreError> {
    let mut curves = Vec::with_capacity(NASAL_RANKS.len());
    for (column, rank) in NASAL_RANKS.iter().enumerate() {
        let points: Vec<(f64, f64)> = NASAL_ROWS
            .iter()
            .map(|(week, values)| (*week, values[column]))
            .collect();
        curves.push((*rank, ReferenceTable::new(&points)?));
    }
    PercentileCurveSet::new(curves)
}

fn nasal_classes() -> Result<ThresholdBands<(GrowthClass, &'static str)>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::upto(
                5.0,
                (
                    GrowthClass::BelowNormal,
                    "Hipoplasia del hueso nasal (por debajo del percentil 5)",
                ),
            ),
            Band::below(
                95.0,
                (
                    GrowthClass::Normal,
                    "Longitud del hueso nasal dentro del rango normal",
                ),
            ),
        ],
        (
            GrowthClass::AboveNormal,
            "Longitud del hueso nasal por encima del percentil 95",
        ),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct NasalBoneInput {
    pub gestational_age: GestationalAge,
    pub nasal_bone_mm: f64,
}

impl NasalBoneInput {
    fn validate(&self) -> Result<(), CoreError> {
        self.gestational_age.validate()?;
        if !self.nasal_bone_mm.is_finite() {
            return Err(CoreError::NonFinite {
                field: "nasal_bone_mm",
            });
        }
        if !(0.5..=20.0).contains(&self.nasal_bone_mm) {
            return Err(CoreError::OutOfRange {
                field: "nasal_bone_mm",
                value: self.nasal_bone_mm,
                min: 0.5,
                max: 20.0,
            });
        }
        Ok(())
    }
}

pub fn assess(input: &NasalBoneInput) -> Result<BiometryResult, CoreError> {
    input.validate()?;
    let engine = PercentileEngine::new(nasal_curves()?, (12.0, 34.0), nasal_classes()?)?;
    engine.classify(input.nasal_bone_mm, input.gestational_age)
}

pub struct NasalBone;

impl Calculator for NasalBone {
    fn id(&self) -> &str {
        "nasal_bone"
    }

    fn name(&self) -> &str {
        "Percentil de longitud del hueso nasal"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: NasalBoneInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = %result.band, "measurement classified");
        Ok(serde_json::to_value(result)?)
    }
}
