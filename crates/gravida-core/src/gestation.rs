use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Longest gestation the dating operations accept, in days (44+0).
const MAX_GESTATION_DAYS: i32 = 308;

/// Gestational age in completed weeks plus days (`38+2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GestationalAge {
    pub weeks: u8,
    pub days: u8,
}

impl GestationalAge {
    pub fn new(weeks: u8, days: u8) -> Result<Self, CoreError> {
        let ga = Self { weeks, days };
        ga.validate()?;
        Ok(ga)
    }

    /// Days must be 0..=6. Deserialized values call this at the first
    /// typed entry point rather than inside serde.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.days > 6 {
            return Err(CoreError::OutOfRange {
                field: "days",
                value: self.days as f64,
                min: 0.0,
                max: 6.0,
            });
        }
        Ok(())
    }

    /// Continuous age in weeks, for table interpolation.
    pub fn exact_weeks(&self) -> f64 {
        self.weeks as f64 + self.days as f64 / 7.0
    }

    pub fn total_days(&self) -> u32 {
        self.weeks as u32 * 7 + self.days as u32
    }

    /// Converts a fractional week count, carrying a rounded seventh day
    /// into the next week so `days` stays 0..=6.
    pub fn from_exact_weeks(weeks: f64) -> Result<Self, CoreError> {
        if !weeks.is_finite() {
            return Err(CoreError::NonFinite { field: "weeks" });
        }
        if !(0.0..=44.0).contains(&weeks) {
            return Err(CoreError::OutOfRange {
                field: "weeks",
                value: weeks,
                min: 0.0,
                max: 44.0,
            });
        }
        let mut whole = weeks.floor() as u8;
        let mut days = ((weeks - weeks.floor()) * 7.0).round() as u8;
        if days == 7 {
            whole += 1;
            days = 0;
        }
        Ok(Self { weeks: whole, days })
    }

    /// Age at `at` counted from the last menstrual period.
    pub fn from_lmp(lmp: Date, at: Date) -> Result<Self, CoreError> {
        let elapsed = (at - lmp).get_days();
        if elapsed < 0 {
            return Err(CoreError::DateArithmetic(format!(
                "reference date {at} precedes last menstrual period {lmp}"
            )));
        }
        if elapsed > MAX_GESTATION_DAYS {
            return Err(CoreError::OutOfRange {
                field: "gestation days",
                value: elapsed as f64,
                min: 0.0,
                max: MAX_GESTATION_DAYS as f64,
            });
        }
        Ok(Self {
            weeks: (elapsed / 7) as u8,
            days: (elapsed % 7) as u8,
        })
    }

    /// `"38+2"` display form.
    pub fn label(&self) -> String {
        format!("{}+{}", self.weeks, self.days)
    }
}

/// Estimated due date: last menstrual period plus 280 days.
pub fn due_date(lmp: Date) -> Result<Date, CoreError> {
    lmp.checked_add(280.days())
        .map_err(|e| CoreError::DateArithmetic(e.to_string()))
}

/// Robinson & Fleming first-trimester dating: gestation in weeks from
/// crown-rump length in mm. Valid for CRL 3..=84 mm.
pub fn robinson_crl_weeks(crl_mm: f64) -> Result<f64, CoreError> {
    if !crl_mm.is_finite() {
        return Err(CoreError::NonFinite { field: "crl_mm" });
    }
    if !(3.0..=84.0).contains(&crl_mm) {
        return Err(CoreError::OutOfRange {
            field: "crl_mm",
            value: crl_mm,
            min: 3.0,
            max: 84.0,
        });
    }
    let days = 8.052 * crl_mm.sqrt() + 23.73;
    Ok(days / 7.0)
}

/// A scheduled control in the pregnancy calendar, anchored to the last
/// menstrual period. Ranged controls carry both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Milestone {
    pub label: String,
    pub from: Date,
    pub to: Option<Date>,
}

/// Standard prenatal control calendar counted from the last menstrual
/// period.
pub fn milestones(lmp: Date) -> Result<Vec<Milestone>, CoreError> {
    let range = |label: &str, from_days: i32, to_days: i32| -> Result<Milestone, CoreError> {
        Ok(Milestone {
            label: label.to_string(),
            from: add_days(lmp, from_days)?,
            to: Some(add_days(lmp, to_days)?),
        })
    };
    Ok(vec![
        range("Ecografía de cribado (11 a 13+6 semanas)", 11 * 7, 13 * 7 + 6)?,
        range("Ecografía morfológica (20 a 24 semanas)", 20 * 7, 24 * 7)?,
        range("Tolerancia a la glucosa (25 a 27 semanas)", 25 * 7, 27 * 7)?,
        Milestone {
            label: "Profilaxis anti-D si Rh negativo (semana 28)".to_string(),
            from: add_days(lmp, 28 * 7)?,
            to: None,
        },
        range("Ecografía de crecimiento (32 a 34 semanas)", 32 * 7, 34 * 7)?,
        range("Cultivo estreptococo grupo B (35 a 37 semanas)", 35 * 7, 37 * 7)?,
    ])
}

fn add_days(date: Date, days: i32) -> Result<Date, CoreError> {
    date.checked_add(days.days())
        .map_err(|e| CoreError::DateArithmetic(e.to_string()))
}
