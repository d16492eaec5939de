use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Position of a measurement relative to its reference population. Each
/// calculator maps percentile cut points onto the subset of classes it
/// distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GrowthClass {
    WellBelowNormal,
    BelowNormal,
    LowNormal,
    Normal,
    HighNormal,
    AboveNormal,
    WellAboveNormal,
}

impl GrowthClass {
    /// True for the classes under the lower clinical cut point.
    pub fn is_below_normal(&self) -> bool {
        matches!(self, GrowthClass::WellBelowNormal | GrowthClass::BelowNormal)
    }
}

/// Outcome of placing one measurement on a percentile curve set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BiometryResult {
    /// Interpolated percentile rank, clamped to the outermost curves.
    pub percentile: f64,
    /// Bracketing-curve band, e.g. `"p10-p50"`, `"<p3"`, `">p97"`.
    pub band: String,
    pub classification: GrowthClass,
    /// Clinical wording for the classification.
    pub label: String,
    /// Standard deviations from the median, estimated from the curve
    /// spread at this gestational age.
    pub z_score: f64,
    /// Set when the measurement fell outside the outermost curves and the
    /// percentile was clamped.
    pub out_of_range: bool,
    pub rationale: Vec<String>,
}
