//! Femur length percentile placement for weeks 12 to 42, including the
//! short-femur screen. The median column doubles as the dating curve
//! for `gestational_age`.

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

const FEMUR_RANKS: [f64; 7] = [3.0, 5.0, 10.0, 50.0, 90.0, 95.0, 97.0];

/// Femur length in millimeters per completed week, columns following
/// `FEMUR_RANKS`.
const FEMUR_ROWS: &[(f64, [f64; 7])] = &[
    (12.0, [6.2, 6.5, 6.9, 8.3, 9.7, 10.1, 10.4]),
    (13.0, [7.5, 7.8, 8.2, 9.6, 11.0, 11.4, 11.7]),
    (14.0, [8.8, 9.1, 9.5, 10.9, 12.3, 12.7, 13.0]),
    (15.0, [10.1, 10.4, 10.8, 12.2, 13.6, 14.0, 14.3]),
    (16.0, [11.4, 11.7, 12.1, 13.5, 14.9, 15.3, 15.6]),
    (17.0, [12.7, 13.0, 13.4, 14.8, 16.2, 16.6, 16.9]),
    (18.0, [14.0, 14.3, 14.7, 16.1, 17.5, 17.9, 18.2]),
    (19.0, [15.3, 15.6, 16.0, 17.4, 18.8, 19.2, 19.5]),
    (20.0, [16.6, 16.9, 17.3, 18.7, 20.1, 20.5, 20.8]),
    (21.0, [17.9, 18.2, 18.6, 20.0, 21.4, 21.8, 22.1]),
    (22.0, [19.2, 19.5, 19.9, 21.3, 22.7, 23.1, 23.4]),
    (23.0, [20.5, 20.8, 21.2, 22.6, 24.0, 24.4, 24.7]),
    (24.0, [21.8, 22.1, 22.5, 23.9, 25.3, 25.7, 26.0]),
    (25.0, [23.1, 23.4, 23.8, 25.2, 26.6, 27.0, 27.3]),
    (26.0, [24.4, 24.7, 25.1, 26.5, 27.9, 28.3, 28.6]),
    (27.0, [25.7, 26.0, 26.4, 27.8, 29.2, 29.6, 29.9]),
    (28.0, [27.0, 27.3, 27.7, 29.1, 30.5, 30.9, 31.2]),
    (29.0, [28.3, 28.6, 29.0, 30.4, 31.8, 32.2, 32.5]),
    (30.0, [29.6, 29.9, 30.3, 31.7, 33.1, 33.5, 33.8]),
    (31.0, [30.9, 31.2, 31.6, 33.0, 34.4, 34.8, 35.1]),
    (32.0, [32.2, 32.5, 32.9, 34.3, 35.7, 36.1, 36.4]),
    (33.0, [33.5, 33.8, 34.2, 35.6, 37.0, 37.4, 37.7]),
    (34.0, [34.8, 35.1, 35.5, 36.9, 38.3, 38.7, 39.0]),
    (35.0, [36.1, 36.4, 36.8, 38.2, 39.6, 40.0, 40.3]),
    (36.0, [37.4, 37.7, 38.1, 39.5, 40.9, 41.3, 41.6]),
    (37.0, [38.7, 39.0, 39.4, 40.8, 42.2, 42.6, 42.9]),
    (38.0, [40.0, 40.3, 40.7, 42.1, 43.5, 43.9, 44.2]),
    (39.0, [41.3, 41.6, 42.0, 43.4, 44.8, 45.2, 45.5]),
    (40.0, [42.6, 42.9, 43.3, 44.7, 46.1, 46.5, 46.8]),
    (41.0, [43.9, 44.2, 44.6, 46.0, 47.4, 47.8, 48.1]),
    (42.0, [45.2, 45.5, 45.9, 47.3, 48.7, 49.1, 49.4]),
];

fn femur_curves() -> Result<PercentileCurveSet, CoreError> {
    let mut curves = Vec::with_capacity(FEMUR_RANKS.len());
    for (column, rank) in FEMUR_RANKS.iter().enumerate() {
        let points: Vec<(f64, f64)> = FEMUR_ROWS
            .iter()
            .map(|(week, values)| (*week, values[column]))
            .collect();
        curves.push((*rank, ReferenceTable::new(&points)?));
    }
    PercentileCurveSet::new(curves)
}

/// Median femur length per week, inverted so a measurement maps back to
/// an age. Both columns grow strictly, so the swap stays a valid table.
pub(crate) fn median_dating_table() -> Result<ReferenceTable, CoreError> {
    let points: Vec<(f64, f64)> = FEMUR_ROWS
        .iter()
        .map(|(week, values)| (values[3], *week))
        .collect();
    ReferenceTable::new(&points)
}

fn femur_classes() -> Result<ThresholdBands<(GrowthClass, &'static str)>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::upto(
                3.0,
                (
                    GrowthClass::WellBelowNormal,
                    "Fémur corto. Se recomienda evaluación detallada y seguimiento.",
                ),
            ),
            Band::below(
                5.0,
                (
                    GrowthClass::BelowNormal,
                    "Fémur en límite inferior. Considerar seguimiento.",
                ),
            ),
            Band::below(
                10.0,
                (
                    GrowthClass::LowNormal,
                    "Longitud femoral en rango bajo de normalidad.",
                ),
            ),
            Band::upto(90.0, (GrowthClass::Normal, "Longitud femoral normal.")),
            Band::upto(
                95.0,
                (
                    GrowthClass::HighNormal,
                    "Longitud femoral en rango alto de normalidad.",
                ),
            ),
            Band::below(
                97.0,
                (GrowthClass::AboveNormal, "Fémur largo. Control habitual."),
            ),
        ],
        (
            GrowthClass::WellAboveNormal,
            "Fémur significativamente largo. Control habitual.",
        ),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct FemurLengthInput {
    pub gestational_age: GestationalAge,
    pub femur_length_mm: f64,
}

impl FemurLengthInput {
    fn validate(&self) -> Result<(), CoreError> {
        self.gestational_age.validate()?;
        if !self.femur_length_mm.is_finite() {
            return Err(CoreError::NonFinite {
                field: "femur_length_mm",
            });
        }
        if !(2.0..=60.0).contains(&self.femur_length_mm) {
            return Err(CoreError::OutOfRange {
                field: "femur_length_mm",
                value: self.femur_length_mm,
                min: 2.0,
                max: 60.0,
            });
        }
        Ok(())
    }
}

pub fn assess(input: &FemurLengthInput) -> Result<BiometryResult, CoreError> {
    input.validate()?;
    let engine = PercentileEngine::new(femur_curves()?, (12.0, 42.0), femur_classes()?)?;
    engine.classify(input.femur_length_mm, input.gestational_age)
}

pub struct FemurLength;

impl Calculator for FemurLength {
    fn id(&self) -> &str {
        "femur_length"
    }

    fn name(&self) -> &str {
        "Percentil de longitud femoral"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: FemurLengthInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = %result.band, "measurement classified");
        Ok(serde_json::to_value(result)?)
    }
}
