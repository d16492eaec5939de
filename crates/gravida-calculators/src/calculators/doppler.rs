//! Fetal Doppler assessment against week-interpolated normal ranges:
//! umbilical artery resistance, middle cerebral artery vasodilation,
//! cerebroplacental ratio and the ductus venosus a-wave.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gravida_core::error::CoreError;
use gravida_core::gestation::GestationalAge;
use gravida_core::table::{GaussianReference, ReferenceTable};

use crate::error::CalculatorError;
use crate::Calculator;

/// Normal ranges as `(week, mean, sd, p5)` rows. The p5 column is
/// reference data in its own right, not derived from the sd column.
const UMBILICAL_PI_ROWS: &[(f64, f64, f64, f64)] = &[
    (20.0, 1.23, 0.19, 0.92),
    (24.0, 1.18, 0.18, 0.89),
    (28.0, 1.12, 0.17, 0.85),
    (32.0, 1.05, 0.16, 0.80),
    (36.0, 0.98, 0.15, 0.75),
    (40.0, 0.91, 0.14, 0.70),
];

const CEREBRAL_PI_ROWS: &[(f64, f64, f64, f64)] = &[
    (20.0, 1.56, 0.32, 1.12),
    (24.0, 1.67, 0.33, 1.20),
    (28.0, 1.78, 0.34, 1.28),
    (32.0, 1.89, 0.35, 1.36),
    (36.0, 1.54, 0.33, 1.10),
    (40.0, 1.23, 0.31, 0.85),
];

/// Peak systolic velocity in cm/s.
const CEREBRAL_PSV_ROWS: &[(f64, f64, f64, f64)] = &[
    (20.0, 23.5, 4.2, 17.1),
    (24.0, 29.4, 5.1, 21.4),
    (28.0, 36.8, 6.3, 26.8),
    (32.0, 46.0, 7.8, 33.5),
    (36.0, 57.5, 9.7, 41.9),
    (40.0, 71.9, 12.1, 52.3),
];

const CPR_ROWS: &[(f64, f64, f64, f64)] = &[
    (20.0, 1.27, 0.33, 0.85),
    (24.0, 1.41, 0.34, 0.90),
    (28.0, 1.59, 0.35, 1.00),
    (32.0, 1.80, 0.36, 1.08),
    (36.0, 1.57, 0.35, 0.96),
    (40.0, 1.35, 0.34, 0.82),
];

/// One index's normal model plus its lower decision curve.
struct IndexReference {
    gaussian: GaussianReference,
    p5: ReferenceTable,
}

impl IndexReference {
    fn new(rows: &[(f64, f64, f64, f64)]) -> Result<Self, CoreError> {
        let gaussian_rows: Vec<(f64, f64, f64)> =
            rows.iter().map(|(x, mean, sd, _)| (*x, *mean, *sd)).collect();
        let p5_rows: Vec<(f64, f64)> = rows.iter().map(|(x, _, _, p5)| (*x, *p5)).collect();
        Ok(Self {
            gaussian: GaussianReference::new(&gaussian_rows)?,
            p5: ReferenceTable::new(&p5_rows)?,
        })
    }

    fn rounded_percentile(&self, age: f64, value: f64) -> Result<f64, CoreError> {
        Ok(self.gaussian.percentile_of(age, value)?.round())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DuctusWave {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "ausente")]
    Absent,
    #[serde(rename = "reversa")]
    Reversed,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct DopplerInput {
    pub gestational_age: GestationalAge,
    pub umbilical_pi: f64,
    pub cerebral_pi: f64,
    pub cerebral_psv: f64,
    pub ductus_wave: DuctusWave,
}

impl DopplerInput {
    fn validate(&self) -> Result<(), CoreError> {
        self.gestational_age.validate()?;
        let age = self.gestational_age.exact_weeks();
        if !(20.0..=40.0).contains(&age) {
            return Err(CoreError::OutOfRange {
                field: "gestational_age",
                value: age,
                min: 20.0,
                max: 40.0,
            });
        }
        for (field, value, min, max) in [
            ("umbilical_pi", self.umbilical_pi, 0.2, 3.0),
            ("cerebral_pi", self.cerebral_pi, 0.2, 4.0),
            ("cerebral_psv", self.cerebral_psv, 5.0, 120.0),
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

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DopplerResult {
    pub umbilical_pi_percentile: f64,
    pub cerebral_pi_percentile: f64,
    pub cerebral_psv_percentile: f64,
    pub cpr: f64,
    pub cpr_percentile: f64,
    pub altered: bool,
    pub evaluation: String,
    pub findings: Vec<String>,
    pub follow_up: String,
}

pub fn assess(input: &DopplerInput) -> Result<DopplerResult, CoreError> {
    input.validate()?;
    let age = input.gestational_age.exact_weeks();

    let umbilical = IndexReference::new(UMBILICAL_PI_ROWS)?;
    let cerebral = IndexReference::new(CEREBRAL_PI_ROWS)?;
    let psv = IndexReference::new(CEREBRAL_PSV_ROWS)?;
    let cpr_reference = IndexReference::new(CPR_ROWS)?;

    let cpr = input.cerebral_pi / input.umbilical_pi;

    let mut altered = false;
    let mut findings = Vec::new();

    let (umbilical_mean, umbilical_sd) = umbilical.gaussian.at(age)?;
    if input.umbilical_pi > umbilical_mean + 2.0 * umbilical_sd {
        altered = true;
        findings.push(
            "IP de arteria umbilical elevado (>p95): Sugiere aumento de resistencias placentarias"
                .to_string(),
        );
    }

    let vasodilation = input.cerebral_pi < cerebral.p5.interpolate(age)?;
    let cpr_altered = cpr < cpr_reference.p5.interpolate(age)?;
    if vasodilation && cpr_altered {
        altered = true;
        findings.push(
            "Vasodilatación cerebral con IPC alterado: Patrón de redistribución hemodinámica establecido"
                .to_string(),
        );
    } else if vasodilation {
        altered = true;
        findings.push(
            "Vasodilatación cerebral: Posible inicio de redistribución hemodinámica".to_string(),
        );
    } else if cpr_altered {
        altered = true;
        findings.push(
            "IPC alterado sin vasodilatación cerebral evidente: Vigilancia estrecha".to_string(),
        );
    }

    match input.ductus_wave {
        DuctusWave::Normal => {}
        DuctusWave::Absent => {
            altered = true;
            findings
                .push("Onda a del ductus venoso ausente: Posible compromiso cardíaco".to_string());
        }
        DuctusWave::Reversed => {
            altered = true;
            findings.push(
                "Onda a del ductus venoso reversa: Compromiso cardíaco significativo".to_string(),
            );
        }
    }

    let follow_up = if altered {
        if input.ductus_wave != DuctusWave::Normal || (vasodilation && cpr_altered) {
            "Control en 24-48h. Valorar finalización según edad gestacional"
        } else {
            "Control en 72h"
        }
    } else {
        "Control habitual"
    };

    Ok(DopplerResult {
        umbilical_pi_percentile: umbilical.rounded_percentile(age, input.umbilical_pi)?,
        cerebral_pi_percentile: cerebral.rounded_percentile(age, input.cerebral_pi)?,
        cerebral_psv_percentile: psv.rounded_percentile(age, input.cerebral_psv)?,
        cpr,
        cpr_percentile: cpr_reference.rounded_percentile(age, cpr)?,
        altered,
        evaluation: if altered { "Alterado" } else { "Normal" }.to_string(),
        findings,
        follow_up: follow_up.to_string(),
    })
}

pub struct Doppler;

impl Calculator for Doppler {
    fn id(&self) -> &str {
        "doppler"
    }

    fn name(&self) -> &str {
        "Evaluación Doppler fetal"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: DopplerInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(
            calculator = self.id(),
            altered = result.altered,
            "doppler assessed"
        );
        Ok(serde_json::to_value(result)?)
    }
}
