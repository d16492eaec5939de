//! Pregnancy dating: gestational age at a reference date, the due date
//! and the follow-up milestone calendar. Dating sources in order of
//! preference are the last menstrual period, the crown-rump length
//! (Robinson and Fleming) and the femur length median curve.

use jiff::civil::Date;
use jiff::ToSpan;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gravida_core::error::CoreError;
use gravida_core::gestation::{
    due_date, milestones, robinson_crl_weeks, GestationalAge, Milestone,
};

use crate::calculators::femur_length::median_dating_table;
use crate::error::CalculatorError;
use crate::Calculator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DatingMethod {
    LastMenstrualPeriod,
    CrownRumpLength,
    FemurLength,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct DatingInput {
    /// The date the age is reported for, usually the day of the visit.
    pub reference_date: Date,
    #[serde(default)]
    pub last_period_date: Option<Date>,
    #[serde(default)]
    pub crl_mm: Option<f64>,
    #[serde(default)]
    pub femur_length_mm: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DatingResult {
    pub age: GestationalAge,
    pub method: DatingMethod,
    pub due_date: Date,
    /// Back-dated conception calendar start when dating came from
    /// ultrasound rather than a reported period.
    pub estimated_lmp: Option<Date>,
    pub milestones: Vec<Milestone>,
}

pub fn assess(input: &DatingInput) -> Result<DatingResult, CoreError> {
    if let Some(lmp) = input.last_period_date {
        let age = GestationalAge::from_lmp(lmp, input.reference_date)?;
        return Ok(DatingResult {
            age,
            method: DatingMethod::LastMenstrualPeriod,
            due_date: due_date(lmp)?,
            estimated_lmp: None,
            milestones: milestones(lmp)?,
        });
    }
    if let Some(crl) = input.crl_mm {
        let age = GestationalAge::from_exact_weeks(robinson_crl_weeks(crl)?)?;
        return from_ultrasound(age, DatingMethod::CrownRumpLength, input.reference_date);
    }
    if let Some(femur) = input.femur_length_mm {
        let table = median_dating_table()?;
        let (min, max) = table.domain();
        if !femur.is_finite() {
            return Err(CoreError::NonFinite {
                field: "femur_length_mm",
            });
        }
        // Dating needs the measurement inside the median curve; clamping
        // would fabricate an age.
        if !(min..=max).contains(&femur) {
            return Err(CoreError::OutOfRange {
                field: "femur_length_mm",
                value: femur,
                min,
                max,
            });
        }
        let age = GestationalAge::from_exact_weeks(table.interpolate(femur)?)?;
        return from_ultrasound(age, DatingMethod::FemurLength, input.reference_date);
    }
    Err(CoreError::MissingInput(
        "last_period_date, crl_mm or femur_length_mm",
    ))
}

fn from_ultrasound(
    age: GestationalAge,
    method: DatingMethod,
    reference_date: Date,
) -> Result<DatingResult, CoreError> {
    let lmp = reference_date
        .checked_sub(i64::from(age.total_days()).days())
        .map_err(|e| CoreError::DateArithmetic(e.to_string()))?;
    Ok(DatingResult {
        age,
        method,
        due_date: due_date(lmp)?,
        estimated_lmp: Some(lmp),
        milestones: milestones(lmp)?,
    })
}

pub struct GestationalDating;

impl Calculator for GestationalDating {
    fn id(&self) -> &str {
        "gestational_age"
    }

    fn name(&self) -> &str {
        "Edad gestacional y fecha probable de parto"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let input: DatingInput = serde_json::from_value(request.clone())?;
        let result = assess(&input)?;
        debug!(
            calculator = self.id(),
            age = %result.age.label(),
            "pregnancy dated"
        );
        Ok(serde_json::to_value(result)?)
    }
}
