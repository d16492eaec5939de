//! gravida-calculators
//!
//! Obstetric point-of-care calculators: risk stratification, percentile
//! classification, and intrapartum triage. Pure computation over the
//! gravida-core vocabulary; reference curves, adjustment chains, and
//! thresholds are configuration data, not code.

pub mod calculators;
pub mod error;
pub mod percentile;
pub mod risk;
pub mod triage;

use error::CalculatorError;

/// Trait implemented by each point-of-care calculator.
pub trait Calculator: Send + Sync {
    /// Unique identifier (e.g., "t21_first", "mefi").
    fn id(&self) -> &str;

    /// Human-readable display name, in the clinical language of the forms.
    fn name(&self) -> &str;

    /// Evaluates one JSON request against this calculator's rules. The
    /// same request always produces the same result.
    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError>;
}

/// Return all registered calculators.
pub fn all_calculators() -> Vec<Box<dyn Calculator>> {
    vec![
        Box::new(calculators::t21_age::MaternalAge),
        Box::new(calculators::t21_first::FirstTrimester),
        Box::new(calculators::t21_second::SecondTrimester),
        Box::new(calculators::preeclampsia::Preeclampsia),
        Box::new(calculators::preterm_birth::PretermBirth),
        Box::new(calculators::fetal_weight::FetalWeight),
        Box::new(calculators::fetal_growth::FetalGrowth),
        Box::new(calculators::femur_length::FemurLength),
        Box::new(calculators::nasal_bone::NasalBone),
        Box::new(calculators::doppler::Doppler),
        Box::new(calculators::amniotic_fluid::AmnioticFluid),
        Box::new(calculators::bishop::Bishop),
        Box::new(calculators::mefi::Mefi),
        Box::new(calculators::gestational_age::GestationalDating),
    ]
}

/// Look up a calculator by ID.
pub fn get_calculator(id: &str) -> Option<Box<dyn Calculator>> {
    all_calculators().into_iter().find(|c| c.id() == id)
}

/// Evaluate `request` with the calculator registered under `id`.
pub fn evaluate(id: &str, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
    let calculator =
        get_calculator(id).ok_or_else(|| CalculatorError::UnknownCalculator(id.to_string()))?;
    calculator.evaluate(request)
}
