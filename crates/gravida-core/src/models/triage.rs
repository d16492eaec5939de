use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Baseline fetal heart rate pattern. Wire values match the monitoring
/// form vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BaselineRate {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "taquicardia")]
    Tachycardia,
    #[serde(rename = "bradicardia_leve")]
    MildBradycardia,
    #[serde(rename = "bradicardia_moderada")]
    ModerateBradycardia,
    #[serde(rename = "bradicardia_severa")]
    SevereBradycardia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Variability {
    #[serde(rename = "ausente")]
    Absent,
    #[serde(rename = "minima")]
    Minimal,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "aumentada")]
    Increased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Accelerations {
    #[serde(rename = "presentes")]
    Present,
    #[serde(rename = "ausentes")]
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Decelerations {
    #[serde(rename = "ausentes")]
    Absent,
    #[serde(rename = "precoces")]
    Early,
    #[serde(rename = "variables")]
    Variable,
    #[serde(rename = "tardias")]
    Late,
    #[serde(rename = "prolongadas")]
    Prolonged,
    #[serde(rename = "sinusoidal")]
    Sinusoidal,
}

/// One cardiotocography reading, taken as a snapshot. Every field is a
/// closed enumeration, so any representable observation classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct TriageObservation {
    pub baseline: BaselineRate,
    pub variability: Variability,
    pub accelerations: Accelerations,
    pub decelerations: Decelerations,
}

/// NICHD-style tracing category. Ordered by severity: I < II < III.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TriageCategory {
    #[serde(rename = "i")]
    I,
    #[serde(rename = "ii")]
    II,
    #[serde(rename = "iii")]
    III,
}

impl TriageCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TriageCategory::I => "Categoría I",
            TriageCategory::II => "Categoría II",
            TriageCategory::III => "Categoría III",
        }
    }
}

/// Classification outcome with the fixed per-category clinical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TriageResult {
    pub category: TriageCategory,
    pub description: String,
    pub risk_level: String,
    pub guidelines: Vec<String>,
    pub recommendations: Vec<String>,
}
