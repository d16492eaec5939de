//! Intrapartum cardiotocography triage. One observation snapshot maps to
//! exactly one NICHD category; the abnormal rules are checked first so the
//! most severe applicable category always wins.

use gravida_core::models::triage::{
    Accelerations, BaselineRate, Decelerations, TriageCategory, TriageObservation, TriageResult,
    Variability,
};

/// Classifies one observation. Total over the whole observation space:
/// anything that is neither Category III nor Category I is Category II.
pub fn classify(obs: TriageObservation) -> TriageResult {
    if is_category_iii(obs) {
        return category_iii();
    }
    if is_category_i(obs) {
        return category_i();
    }
    category_ii()
}

fn is_category_iii(obs: TriageObservation) -> bool {
    obs.baseline == BaselineRate::SevereBradycardia
        || obs.decelerations == Decelerations::Sinusoidal
        || (obs.variability == Variability::Absent
            && matches!(
                obs.decelerations,
                Decelerations::Late | Decelerations::Variable | Decelerations::Prolonged
            ))
}

fn is_category_i(obs: TriageObservation) -> bool {
    obs.baseline == BaselineRate::Normal
        && obs.variability == Variability::Normal
        && obs.accelerations == Accelerations::Present
        && obs.decelerations == Decelerations::Absent
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category_iii() -> TriageResult {
    TriageResult {
        category: TriageCategory::III,
        description: "Trazado anormal - Estado fetal no tranquilizador".to_string(),
        risk_level: "Alto riesgo - Requiere acción inmediata".to_string(),
        guidelines: lines(&[
            "Bradicardia severa sostenida",
            "Patrón sinusoidal confirmado",
            "Ausencia de variabilidad con desaceleraciones tardías o variables recurrentes",
            "Ausencia de variabilidad con desaceleraciones prolongadas",
        ]),
        recommendations: lines(&[
            "Evaluación inmediata por especialista",
            "Oxigenoterapia materna con mascarilla (10L/min)",
            "Posición decúbito lateral izquierdo",
            "Hidratación IV rápida (1000cc)",
            "Suspender oxitocina si está en uso",
            "Considerar tocolisis de urgencia si hay taquisistolia",
            "Preparar para posible cesárea de emergencia (10-30 min)",
            "Toma de pH fetal si está disponible y es factible",
        ]),
    }
}

fn category_i() -> TriageResult {
    TriageResult {
        category: TriageCategory::I,
        description: "Trazado normal - Estado fetal tranquilizador".to_string(),
        risk_level: "Bajo riesgo".to_string(),
        guidelines: lines(&[
            "FCB: 110-160 lpm",
            "Variabilidad moderada: 6-25 lpm",
            "Aceleraciones presentes",
            "Sin desaceleraciones",
        ]),
        recommendations: lines(&[
            "Continuar monitoreo de rutina cada 30 minutos",
            "Documentar evaluación cada hora",
            "No requiere intervenciones específicas",
            "Mantener hidratación materna adecuada",
        ]),
    }
}

fn category_ii() -> TriageResult {
    TriageResult {
        category: TriageCategory::II,
        description: "Trazado indeterminado - Requiere vigilancia y reevaluación".to_string(),
        risk_level: "Riesgo intermedio".to_string(),
        guidelines: lines(&[
            "Taquicardia fetal (>160 lpm)",
            "Bradicardia leve o moderada",
            "Variabilidad mínima o aumentada",
            "Variabilidad ausente sin desaceleraciones recurrentes",
            "Desaceleraciones variables recurrentes con variabilidad presente",
            "Desaceleraciones prolongadas (>2 min pero <10 min)",
            "Aceleraciones ausentes o desaceleraciones precoces en trazado por lo demás normal",
        ]),
        recommendations: lines(&[
            "Identificar y corregir causas reversibles:",
            "- Evaluar posición materna",
            "- Verificar presión arterial materna",
            "- Evaluar patrón de contracciones",
            "- Verificar estado de hidratación",
            "Medidas de reanimación intrauterina:",
            "- Cambio a decúbito lateral izquierdo",
            "- Hidratación IV (500-1000cc)",
            "- Oxigenoterapia por mascarilla si es necesario",
            "Reevaluar en 20-30 minutos tras medidas correctivas",
            "Si no hay mejoría, considerar pruebas adicionales o finalización del embarazo",
        ]),
    }
}
