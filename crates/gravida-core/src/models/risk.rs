use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Screening risk band. Thresholds are configuration; the conventional
/// cut points put High above 1:100 and Low at or below 1:1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskBand {
    Low,
    Intermediate,
    High,
}

impl RiskBand {
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Bajo Riesgo",
            RiskBand::Intermediate => "Riesgo Intermedio",
            RiskBand::High => "Alto Riesgo",
        }
    }
}

/// Outcome of one risk computation: the final odds fraction, its display
/// denominator, the band, and the human-readable derivation in evaluation
/// order (baseline first, then one entry per adjustment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskResult {
    /// Probability fraction in `(0, 1]`.
    pub odds: f64,
    /// Rounded "1 in N" denominator for display.
    pub one_in: u64,
    pub band: RiskBand,
    pub rationale: Vec<String>,
    pub recommendations: Vec<String>,
}

impl RiskResult {
    /// `"1:290"` display form.
    pub fn ratio_label(&self) -> String {
        format!("1:{}", self.one_in)
    }
}
