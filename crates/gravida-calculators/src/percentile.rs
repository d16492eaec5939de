//! Percentile placement against a family of reference curves: interpolate
//! each curve at the gestational age, place the measurement between the
//! bracketing curves, and map the resulting rank onto classification cut
//! points.

use gravida_core::bands::ThresholdBands;
use gravida_core::error::CoreError;
use gravida_core::gestation::GestationalAge;
use gravida_core::models::biometry::{BiometryResult, GrowthClass};
use gravida_core::table::ReferenceTable;

/// Standard normal quantiles for the percentile ranks reference charts
/// publish. The outermost pair of a curve set estimates its standard
/// deviation, e.g. `sd = (p97 - p3) / (2 * 1.88)`.
fn rank_quantile(rank: f64) -> Option<f64> {
    const QUANTILES: [(f64, f64); 9] = [
        (3.0, -1.88),
        (5.0, -1.645),
        (10.0, -1.2816),
        (25.0, -0.6745),
        (50.0, 0.0),
        (75.0, 0.6745),
        (90.0, 1.2816),
        (95.0, 1.645),
        (97.0, 1.88),
    ];
    QUANTILES
        .iter()
        .find(|(r, _)| (r - rank).abs() < 1e-9)
        .map(|(_, z)| *z)
}

/// A family of percentile curves over the same gestational axis, validated
/// once: at least two curves, ranks strictly increasing and within
/// (0, 100), a median curve present, known quantiles for the outermost
/// ranks, and no curve dipping below the one beneath it.
#[derive(Debug)]
pub struct PercentileCurveSet {
    curves: Vec<(f64, ReferenceTable)>,
}

impl PercentileCurveSet {
    pub fn new(curves: Vec<(f64, ReferenceTable)>) -> Result<Self, CoreError> {
        if curves.len() < 2 {
            return Err(CoreError::CurveSet(format!(
                "needs at least two curves, got {}",
                curves.len()
            )));
        }
        for (rank, _) in &curves {
            if !rank.is_finite() || *rank <= 0.0 || *rank >= 100.0 {
                return Err(CoreError::CurveSet(format!(
                    "rank {rank} outside (0, 100)"
                )));
            }
        }
        for pair in curves.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(CoreError::CurveSet(format!(
                    "ranks must be strictly increasing, got p{} after p{}",
                    pair[1].0, pair[0].0
                )));
            }
        }
        if !curves.iter().any(|(rank, _)| *rank == 50.0) {
            return Err(CoreError::CurveSet(
                "a median (p50) curve is required".to_string(),
            ));
        }
        let first_rank = curves[0].0;
        let last_rank = curves[curves.len() - 1].0;
        if rank_quantile(first_rank).is_none() || rank_quantile(last_rank).is_none() {
            return Err(CoreError::CurveSet(format!(
                "no normal quantile known for outermost ranks p{first_rank}/p{last_rank}"
            )));
        }

        // Cross-curve ordering at every control point of the pair.
        for pair in curves.windows(2) {
            let (lower_rank, lower) = &pair[0];
            let (upper_rank, upper) = &pair[1];
            let knots = lower
                .points()
                .iter()
                .chain(upper.points().iter())
                .map(|(x, _)| *x);
            for x in knots {
                if lower.interpolate(x)? > upper.interpolate(x)? {
                    return Err(CoreError::CurveSet(format!(
                        "curve p{upper_rank} dips below p{lower_rank} at {x}"
                    )));
                }
            }
        }

        Ok(Self { curves })
    }

    /// `(rank, reference value)` for every curve at gestational age `x`.
    pub fn values_at(&self, x: f64) -> Result<Vec<(f64, f64)>, CoreError> {
        self.curves
            .iter()
            .map(|(rank, table)| Ok((*rank, table.interpolate(x)?)))
            .collect()
    }
}

/// One configured percentile classifier: curves, the gestational window
/// they are valid for, and classification cut points on the rank scale.
#[derive(Debug)]
pub struct PercentileEngine {
    curves: PercentileCurveSet,
    window: (f64, f64),
    classes: ThresholdBands<(GrowthClass, &'static str)>,
}

impl PercentileEngine {
    pub fn new(
        curves: PercentileCurveSet,
        window: (f64, f64),
        classes: ThresholdBands<(GrowthClass, &'static str)>,
    ) -> Result<Self, CoreError> {
        if !window.0.is_finite() || !window.1.is_finite() || window.0 >= window.1 {
            return Err(CoreError::CurveSet(format!(
                "invalid gestational window {:?}",
                window
            )));
        }
        Ok(Self {
            curves,
            window,
            classes,
        })
    }

    /// Places `measurement` on the curves at `ga`. Ages outside the window
    /// are rejected, never clamped; measurements beyond the outermost
    /// curves clamp to that curve's rank and set `out_of_range`.
    pub fn classify(
        &self,
        measurement: f64,
        ga: GestationalAge,
    ) -> Result<BiometryResult, CoreError> {
        ga.validate()?;
        if !measurement.is_finite() {
            return Err(CoreError::NonFinite {
                field: "measurement",
            });
        }
        let age = ga.exact_weeks();
        if age < self.window.0 || age > self.window.1 {
            return Err(CoreError::OutOfRange {
                field: "gestational_age",
                value: age,
                min: self.window.0,
                max: self.window.1,
            });
        }

        let refs = self.curves.values_at(age)?;
        let (first_rank, first_value) = refs[0];
        let (last_rank, last_value) = refs[refs.len() - 1];

        let mut out_of_range = false;
        let mut boundary_note = None;
        let (percentile, band) = if measurement < first_value {
            out_of_range = true;
            boundary_note = Some(format!(
                "Medición por debajo de la curva p{first_rank} de referencia"
            ));
            (first_rank, format!("<p{first_rank}"))
        } else if measurement > last_value {
            out_of_range = true;
            boundary_note = Some(format!(
                "Medición por encima de la curva p{last_rank} de referencia"
            ));
            (last_rank, format!(">p{last_rank}"))
        } else {
            let mut placed = (last_rank, format!("p{last_rank}"));
            for pair in refs.windows(2) {
                let (lower_rank, lower_value) = pair[0];
                let (upper_rank, upper_value) = pair[1];
                if measurement <= upper_value {
                    let spread = upper_value - lower_value;
                    let t = if spread > 0.0 {
                        (measurement - lower_value) / spread
                    } else {
                        0.0
                    };
                    placed = (
                        lower_rank + t * (upper_rank - lower_rank),
                        format!("p{lower_rank}-p{upper_rank}"),
                    );
                    break;
                }
            }
            placed
        };

        let z_score = self.z_score(&refs, measurement)?;
        let (classification, label) = self.classes.classify(percentile)?;

        let mut rationale = vec![format!(
            "Percentil {percentile:.1} (banda {band}) a las {} semanas",
            ga.label()
        )];
        if let Some(note) = boundary_note {
            rationale.push(note);
        }
        rationale.push(format!("Puntuación z estimada: {z_score:.2}"));

        Ok(BiometryResult {
            percentile,
            band,
            classification,
            label: label.to_string(),
            z_score,
            out_of_range,
            rationale,
        })
    }

    /// Deviation from the median in estimated standard deviations, the
    /// spread taken from the outermost curve pair.
    fn z_score(&self, refs: &[(f64, f64)], measurement: f64) -> Result<f64, CoreError> {
        let (first_rank, first_value) = refs[0];
        let (last_rank, last_value) = refs[refs.len() - 1];
        let median = refs
            .iter()
            .find(|(rank, _)| *rank == 50.0)
            .map(|(_, value)| *value)
            .ok_or_else(|| CoreError::CurveSet("median curve missing".to_string()))?;

        let low_quantile = rank_quantile(first_rank)
            .ok_or_else(|| CoreError::CurveSet(format!("no quantile for p{first_rank}")))?;
        let high_quantile = rank_quantile(last_rank)
            .ok_or_else(|| CoreError::CurveSet(format!("no quantile for p{last_rank}")))?;
        let z_span = high_quantile - low_quantile;
        let spread = last_value - first_value;
        if spread <= 0.0 {
            return Err(CoreError::CurveSet(format!(
                "curves p{first_rank} and p{last_rank} coincide; no spread to estimate sd"
            )));
        }
        let sd = spread / z_span;
        Ok((measurement - median) / sd)
    }
}
