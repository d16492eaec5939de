//! Estimated fetal weight from standard biometry via the Hadlock
//! regression, placed on week-indexed weight percentile curves.

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

const WEIGHT_RANKS: [f64; 5] = [3.0, 10.0, 50.0, 90.0, 97.0];

/// Weight percentiles in grams per completed week, columns following
/// `WEIGHT_RANKS`.
const WEIGHT_ROWS: &[(f64, [f64; 5])] = &[
    (20.0, [249.0, 275.0, 320.0, 378.0, 402.0]),
    (21.0, [280.0, 312.0, 373.0, 447.0, 478.0]),
    (22.0, [330.0, 370.0, 452.0, 544.0, 583.0]),
    (23.0, [385.0, 435.0, 544.0, 661.0, 710.0]),
    (24.0, [450.0, 515.0, 660.0, 812.0, 875.0]),
    (25.0, [525.0, 610.0, 800.0, 998.0, 1080.0]),
    (26.0, [628.0, 728.0, 977.0, 1241.0, 1350.0]),
    (27.0, [728.0, 858.0, 1167.0, 1498.0, 1634.0]),
    (28.0, [852.0, 1012.0, 1400.0, 1815.0, 1990.0]),
    (29.0, [1000.0, 1190.0, 1650.0, 2156.0, 2375.0]),
    (30.0, [1153.0, 1380.0, 1900.0, 2498.0, 2760.0]),
    (31.0, [1338.0, 1595.0, 2200.0, 2912.0, 3220.0]),
    (32.0, [1518.0, 1810.0, 2500.0, 3326.0, 3680.0]),
    (33.0, [1713.0, 2038.0, 2800.0, 3740.0, 4140.0]),
    (34.0, [1910.0, 2270.0, 3100.0, 4154.0, 4600.0]),
    (35.0, [2110.0, 2500.0, 3400.0, 4568.0, 5060.0]),
    (36.0, [2313.0, 2730.0, 3700.0, 4982.0, 5520.0]),
    (37.0, [2518.0, 2960.0, 4000.0, 5396.0, 5980.0]),
    (38.0, [2723.0, 3190.0, 4300.0, 5810.0, 6440.0]),
    (39.0, [2928.0, 3420.0, 4600.0, 6224.0, 6900.0]),
    (40.0, [3133.0, 3650.0, 4900.0, 6638.0, 7360.0]),
    (41.0, [3338.0, 3880.0, 5200.0, 7052.0, 7820.0]),
    (42.0, [3543.0, 4110.0, 5500.0, 7466.0, 8280.0]),
];

fn weight_curves() -> Result<PercentileCurveSet, CoreError> {
    let mut curves = Vec::with_capacity(WEIGHT_RANKS.len());
    for (column, rank) in WEIGHT_RANKS.iter().enumerate() {
        let points: Vec<(f64, f64)> = WEIGHT_ROWS
            .iter()
            .map(|(week, values)| (*week, values[column]))
            .collect();
        curves.push((*rank, ReferenceTable::new(&points)?));
    }
    PercentileCurveSet::new(curves)
}

fn weight_classes() -> Result<ThresholdBands<(GrowthClass, &'static str)>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::upto(
                3.0,
                (
                    GrowthClass::WellBelowNormal,
                    "Muy pequeño para la edad gestacional",
                ),
            ),
            Band::below(
                10.0,
                (GrowthClass::BelowNormal, "Pequeño para la edad gestacional"),
            ),
            Band::upto(
                90.0,
                (GrowthClass::Normal, "Adecuado para la edad gestacional"),
            ),
            Band::below(
                97.0,
                (GrowthClass::AboveNormal, "Grande para la edad gestacional"),
            ),
        ],
        (
            GrowthClass::WellAboveNormal,
            "Muy grande para la edad gestacional",
        ),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct FetalWeightInput {
    pub gestational_age: GestationalAge,
    pub head_circumference_mm: f64,
    pub abdominal_circumference_mm: f64,
    pub femur_length_mm: f64,
}

impl FetalWeightInput {
    fn validate(&self) -> Result<(), CoreError> {
        self.gestational_age.validate()?;
        for (field, value, min, max) in [
            ("head_circumference_mm", self.head_circumference_mm, 100.0, 400.0),
            (
                "abdominal_circumference_mm",
                self.abdominal_circumference_mm,
                100.0,
                450.0,
            ),
            ("femur_length_mm", self.femur_length_mm, 20.0, 90.0),
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
        Ok(())
    }
}

/// Hadlock three-parameter regression. Measurements arrive in
/// millimeters; the published coefficients expect centimeters and the
/// result is in grams.
pub fn hadlock_weight_grams(hc_mm: f64, ac_mm: f64, fl_mm: f64) -> f64 {
    let hc = hc_mm / 10.0;
    let ac = ac_mm / 10.0;
    let fl = fl_mm / 10.0;
    let log_weight = 1.5662 - 0.0108 * hc + 0.0468 * ac + 0.171 * fl + 0.00034 * hc * hc
        - 0.003685 * ac * fl;
    10f64.powf(log_weight)
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FetalWeightResult {
    pub estimated_weight_g: u32,
    pub placement: BiometryResult,
}

pub fn assess(input: &FetalWeightInput) -> Result<FetalWeightResult, CoreError> {
    input.validate()?;
    let weight = hadlock_weight_grams(
        input.head_circumference_mm,
        input.abdominal_circumference_mm,
        input.femur_length_mm,
    );
    let engine = PercentileEngine::new(weight_curves()?, (20.0, 42.0), weight_classes()?)?;
    let mut placement = engine.classify(weight, input.gestational_age)?;
    let grams = weight.round() as u32;
    placement
        .rationale
        .insert(0, format!("Peso fetal estimado (Hadlock): {grams} g"));
    Ok(FetalWeightResult {
        estimated_weight_g: grams,
        placement,
    })
}

pub struct FetalWeight;

impl Calculator for FetalWeight {
    fn id(&self) -> &str {
        "fetal_weight"
    }

    fn name(&self) -> &str {
        "Peso fetal estimado (Hadlock)"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: FetalWeightInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(
            calculator = self.id(),
            band = %result.placement.band,
            "measurement classified"
        );
        Ok(serde_json::to_value(result)?)
    }
}
