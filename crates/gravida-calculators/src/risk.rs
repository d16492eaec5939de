//! Multiplicative risk stratification: a baseline odds table, an ordered
//! chain of named adjustments, and band thresholds. Each screening model
//! is one `RiskEngine` value; the algorithm never changes per calculator.

use gravida_core::bands::ThresholdBands;
use gravida_core::error::CoreError;
use gravida_core::models::risk::{RiskBand, RiskResult};
use gravida_core::table::ReferenceTable;

/// What one adjustment contributes for a given marker set.
pub enum FactorOutcome {
    /// The condition holds: multiply the running odds.
    Multiply(f64),
    /// The marker was assessed and the condition does not apply.
    Neutral,
    /// The marker was not provided. Noted in the rationale so absence is
    /// never silent.
    Unknown,
}

/// A named multiplicative adjustment evaluated against a marker set.
pub struct RiskFactor<M> {
    name: &'static str,
    eval: fn(&M) -> FactorOutcome,
}

impl<M> RiskFactor<M> {
    pub fn new(name: &'static str, eval: fn(&M) -> FactorOutcome) -> Self {
        Self { name, eval }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Ordered adjustments, applied left to right. Order shows in the
/// rationale; the final odds are order-independent.
pub struct AdjustmentChain<M> {
    factors: Vec<RiskFactor<M>>,
}

impl<M> AdjustmentChain<M> {
    pub fn new(factors: Vec<RiskFactor<M>>) -> Self {
        Self { factors }
    }

    /// A chain with no adjustments: the baseline passes through unchanged.
    pub fn empty() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Advisory text attached to results, per band.
#[derive(Debug, Clone, Copy)]
pub struct BandAdvice {
    pub low: &'static [&'static str],
    pub intermediate: &'static [&'static str],
    pub high: &'static [&'static str],
}

impl BandAdvice {
    fn for_band(&self, band: RiskBand) -> &'static [&'static str] {
        match band {
            RiskBand::Low => self.low,
            RiskBand::Intermediate => self.intermediate,
            RiskBand::High => self.high,
        }
    }
}

/// One configured screening model.
pub struct RiskEngine<M> {
    baseline: ReferenceTable,
    chain: AdjustmentChain<M>,
    bands: ThresholdBands<RiskBand>,
    advice: BandAdvice,
}

impl<M> RiskEngine<M> {
    pub fn new(
        baseline: ReferenceTable,
        chain: AdjustmentChain<M>,
        bands: ThresholdBands<RiskBand>,
        advice: BandAdvice,
    ) -> Self {
        Self {
            baseline,
            chain,
            bands,
            advice,
        }
    }

    /// Computes the stratified risk. `baseline_at` is the value on the
    /// baseline table's axis (maternal age, cervical length) and
    /// `baseline_note` names it for the first rationale entry, e.g.
    /// `"edad materna (35 años)"`.
    pub fn compute(
        &self,
        baseline_at: f64,
        baseline_note: &str,
        markers: &M,
    ) -> Result<RiskResult, CoreError> {
        let mut odds = self.baseline.interpolate(baseline_at)?;
        if odds <= 0.0 || odds > 1.0 {
            return Err(CoreError::BaselineOdds(odds));
        }

        let mut rationale = vec![format!(
            "Riesgo base por {baseline_note}: 1:{}",
            ratio_denominator(odds)
        )];

        for factor in &self.chain.factors {
            match (factor.eval)(markers) {
                FactorOutcome::Multiply(multiplier) => {
                    if !multiplier.is_finite() || multiplier <= 0.0 {
                        return Err(CoreError::BadMultiplier {
                            name: factor.name.to_string(),
                            multiplier,
                        });
                    }
                    odds *= multiplier;
                    rationale.push(format!(
                        "Ajuste por {}: {}x",
                        factor.name,
                        format_multiplier(multiplier)
                    ));
                }
                FactorOutcome::Neutral => {}
                FactorOutcome::Unknown => {
                    rationale.push(format!("Sin dato: {}", factor.name));
                }
            }
        }

        if odds > 1.0 {
            odds = 1.0;
            rationale.push("Riesgo acotado a 1:1 (máximo teórico)".to_string());
        }

        let band = self.bands.classify(odds)?;
        Ok(RiskResult {
            odds,
            one_in: ratio_denominator(odds),
            band,
            rationale,
            recommendations: self
                .advice
                .for_band(band)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }
}

/// Rounded "1 in N" display denominator for an odds fraction.
fn ratio_denominator(odds: f64) -> u64 {
    (1.0 / odds).round().max(1.0) as u64
}

/// Multipliers print with up to two decimals, trailing zeros trimmed:
/// 2.5x, 3x, 1.44x.
fn format_multiplier(multiplier: f64) -> String {
    let text = format!("{multiplier:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
