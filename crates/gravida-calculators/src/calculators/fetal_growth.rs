//! Fetal growth curve placement: a measured or estimated weight against
//! p3/p50/p97 curves for weeks 14 to 40.

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

const GROWTH_RANKS: [f64; 3] = [3.0, 50.0, 97.0];

/// Weight curves in grams at two-week intervals, columns following
/// `GROWTH_RANKS`.
const GROWTH_ROWS: &[(f64, [f64; 3])] = &[
    (14.0, [70.0, 100.0, 130.0]),
    (16.0, [105.0, 150.0, 195.0]),
    (18.0, [170.0, 250.0, 325.0]),
    (20.0, [250.0, 350.0, 450.0]),
    (22.0, [350.0, 500.0, 650.0]),
    (24.0, [470.0, 650.0, 850.0]),
    (26.0, [600.0, 850.0, 1100.0]),
    (28.0, [750.0, 1050.0, 1350.0]),
    (30.0, [900.0, 1250.0, 1600.0]),
    (32.0, [1100.0, 1500.0, 1900.0]),
    (34.0, [1350.0, 1900.0, 2450.0]),
    (36.0, [1650.0, 2350.0, 3050.0]),
    (38.0, [1950.0, 2700.0, 3450.0]),
    (40.0, [2200.0, 3100.0, 4000.0]),
];

fn growth_curves() -> Result<PercentileCurveSet, CoreError> {
    let mut curves = Vec::with_capacity(GROWTH_RANKS.len());
    for (column, rank) in GROWTH_RANKS.iter().enumerate() {
        let points: Vec<(f64, f64)> = GROWTH_ROWS
            .iter()
            .map(|(week, values)| (*week, values[column]))
            .collect();
        curves.push((*rank, ReferenceTable::new(&points)?));
    }
    PercentileCurveSet::new(curves)
}

fn growth_classes() -> Result<ThresholdBands<(GrowthClass, &'static str)>, CoreError> {
    ThresholdBands::new(
        vec![
            Band::upto(
                3.0,
                (
                    GrowthClass::WellBelowNormal,
                    "Peso por debajo del percentil 3 para la edad gestacional",
                ),
            ),
            Band::below(
                97.0,
                (
                    GrowthClass::Normal,
                    "Crecimiento adecuado para la edad gestacional",
                ),
            ),
        ],
        (
            GrowthClass::WellAboveNormal,
            "Peso por encima del percentil 97 para la edad gestacional",
        ),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct FetalGrowthInput {
    pub gestational_age: GestationalAge,
    pub weight_g: f64,
}

impl FetalGrowthInput {
    fn validate(&self) -> Result<(), CoreError> {
        self.gestational_age.validate()?;
        if !self.weight_g.is_finite() {
            return Err(CoreError::NonFinite { field: "weight_g" });
        }
        if !(20.0..=6000.0).contains(&self.weight_g) {
            return Err(CoreError::OutOfRange {
                field: "weight_g",
                value: self.weight_g,
                min: 20.0,
                max: 6000.0,
            });
        }
        Ok(())
    }
}

pub fn assess(input: &FetalGrowthInput) -> Result<BiometryResult, CoreError> {
    input.validate()?;
    let engine = PercentileEngine::new(growth_curves()?, (14.0, 40.0), growth_classes()?)?;
    engine.classify(input.weight_g, input.gestational_age)
}

pub struct FetalGrowth;

impl Calculator for FetalGrowth {
    fn id(&self) -> &str {
        "fetal_growth"
    }

    fn name(&self) -> &str {
        "Curva de crecimiento fetal"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: FetalGrowthInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(calculator = self.id(), band = %result.band, "measurement classified");
        Ok(serde_json::to_value(result)?)
    }
}
