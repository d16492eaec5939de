use serde::Serialize;
use ts_rs::TS;

use crate::error::CoreError;

/// An ordered lookup table over a continuous axis (gestational weeks,
/// maternal age, cervical length). Control points are validated once at
/// construction; lookups clamp to the first/last point and never
/// extrapolate beyond the supported domain.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ReferenceTable {
    points: Vec<(f64, f64)>,
}

impl ReferenceTable {
    /// Builds a table from `(x, y)` control points. Requires at least two
    /// points, finite values, and strictly increasing x.
    pub fn new(points: &[(f64, f64)]) -> Result<Self, CoreError> {
        if points.len() < 2 {
            return Err(CoreError::TableTooSparse(points.len()));
        }
        for (i, (x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(CoreError::TablePoint(i));
            }
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(CoreError::TableOrder(i + 1));
            }
        }
        Ok(Self {
            points: points.to_vec(),
        })
    }

    /// Builds a table whose y values are given as "1 in N" risk
    /// denominators, stored as odds fractions `1/N`. Interpolation then
    /// happens on the odds scale.
    pub fn from_inverse_risk(points: &[(f64, f64)]) -> Result<Self, CoreError> {
        let mut odds = Vec::with_capacity(points.len());
        for (i, (x, n)) in points.iter().enumerate() {
            if !n.is_finite() || *n <= 0.0 {
                return Err(CoreError::TablePoint(i));
            }
            odds.push((*x, 1.0 / n));
        }
        Self::new(&odds)
    }

    /// The supported `(min_x, max_x)` axis span.
    pub fn domain(&self) -> (f64, f64) {
        // Invariant: at least two points.
        (self.points[0].0, self.points[self.points.len() - 1].0)
    }

    /// The validated control points, in axis order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Linear interpolation between the bracketing control points. Inputs
    /// below the first or above the last point clamp to that point's value.
    pub fn interpolate(&self, x: f64) -> Result<f64, CoreError> {
        if !x.is_finite() {
            return Err(CoreError::NonFinite { field: "x" });
        }
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x <= first.0 {
            return Ok(first.1);
        }
        if x >= last.0 {
            return Ok(last.1);
        }
        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return Ok(y0 + t * (y1 - y0));
            }
        }
        // Unreachable: x < last.0 guarantees a bracketing pair above.
        Ok(last.1)
    }

    /// The y value of the control point nearest to `x` (ties resolve to
    /// the lower point). Out-of-domain inputs clamp like `interpolate`.
    pub fn lookup(&self, x: f64) -> Result<f64, CoreError> {
        if !x.is_finite() {
            return Err(CoreError::NonFinite { field: "x" });
        }
        let mut best = self.points[0];
        for point in &self.points[1..] {
            if (point.0 - x).abs() < (best.0 - x).abs() {
                best = *point;
            }
        }
        Ok(best.1)
    }
}

/// A per-age row of normal-distribution parameters, for reference ranges
/// published as mean and standard deviation rather than percentile curves.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct GaussianReference {
    rows: Vec<(f64, f64, f64)>,
}

impl GaussianReference {
    /// Builds from `(x, mean, sd)` rows. Requires at least two rows,
    /// strictly increasing x, finite means, and positive finite sd.
    pub fn new(rows: &[(f64, f64, f64)]) -> Result<Self, CoreError> {
        if rows.len() < 2 {
            return Err(CoreError::TableTooSparse(rows.len()));
        }
        for (i, (x, mean, sd)) in rows.iter().enumerate() {
            if !x.is_finite() || !mean.is_finite() || !sd.is_finite() || *sd <= 0.0 {
                return Err(CoreError::TablePoint(i));
            }
        }
        for (i, pair) in rows.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(CoreError::TableOrder(i + 1));
            }
        }
        Ok(Self {
            rows: rows.to_vec(),
        })
    }

    /// Interpolated `(mean, sd)` at `x`, clamped to the first/last row.
    pub fn at(&self, x: f64) -> Result<(f64, f64), CoreError> {
        if !x.is_finite() {
            return Err(CoreError::NonFinite { field: "x" });
        }
        let first = self.rows[0];
        let last = self.rows[self.rows.len() - 1];
        if x <= first.0 {
            return Ok((first.1, first.2));
        }
        if x >= last.0 {
            return Ok((last.1, last.2));
        }
        for pair in self.rows.windows(2) {
            let (x0, m0, s0) = pair[0];
            let (x1, m1, s1) = pair[1];
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return Ok((m0 + t * (m1 - m0), s0 + t * (s1 - s0)));
            }
        }
        Ok((last.1, last.2))
    }

    /// Percentile rank (0..=100) of `value` against the distribution at `x`.
    pub fn percentile_of(&self, x: f64, value: f64) -> Result<f64, CoreError> {
        if !value.is_finite() {
            return Err(CoreError::NonFinite { field: "value" });
        }
        let (mean, sd) = self.at(x)?;
        Ok(100.0 * normal_cdf((value - mean) / sd))
    }
}

/// Standard normal cumulative distribution function.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Abramowitz & Stegun 7.1.26 rational approximation, max error ~1.5e-7.
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t + a3) * t + a2) * t + a1) * t) * (-x * x).exp();
    sign * y
}
