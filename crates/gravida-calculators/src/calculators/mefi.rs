//! Intrapartum fetal monitoring triage. The decision rules live in
//! `crate::triage`; this adapter only wires them into the catalog.

use tracing::debug;

use gravida_core::models::triage::TriageObservation;

use crate::error::CalculatorError;
use crate::triage;
use crate::Calculator;

pub struct Mefi;

impl Calculator for Mefi {
    fn id(&self) -> &str {
        "mefi"
    }

    fn name(&self) -> &str {
        "Clasificación MEFI"
    }

    fn evaluate(&self, request: &serde_json::Value) -> Result<serde_json::Value, CalculatorError> {
        let observation: TriageObservation = serde_json::from_value(request.clone())?;
        let result = triage::classify(observation);
        debug!(
            calculator = self.id(),
            category = result.category.label(),
            "trace classified"
        );
        Ok(serde_json::to_value(result)?)
    }
}
