use crate::error::CoreError;

/// One classification band: every value under `upper` (inclusively or
/// exclusively, per constructor) maps to `label`.
#[derive(Debug, Clone, Copy)]
pub struct Band<L> {
    upper: f64,
    inclusive: bool,
    label: L,
}

impl<L: Copy> Band<L> {
    /// Matches `value <= upper`.
    pub fn upto(upper: f64, label: L) -> Self {
        Self {
            upper,
            inclusive: true,
            label,
        }
    }

    /// Matches `value < upper`.
    pub fn below(upper: f64, label: L) -> Self {
        Self {
            upper,
            inclusive: false,
            label,
        }
    }
}

/// An ordered ladder of upper-bound thresholds mapping a scalar to a band
/// label. The first matching band wins; values above every threshold get
/// the `top` label. Replaces scattered if/else ladders with one validated
/// configuration value.
#[derive(Debug, Clone)]
pub struct ThresholdBands<L> {
    bands: Vec<Band<L>>,
    top: L,
}

impl<L: Copy> ThresholdBands<L> {
    /// Requires finite, strictly increasing thresholds.
    pub fn new(bands: Vec<Band<L>>, top: L) -> Result<Self, CoreError> {
        for (i, band) in bands.iter().enumerate() {
            if !band.upper.is_finite() {
                return Err(CoreError::BandOrder(i));
            }
            if i > 0 && band.upper <= bands[i - 1].upper {
                return Err(CoreError::BandOrder(i));
            }
        }
        Ok(Self { bands, top })
    }

    pub fn classify(&self, value: f64) -> Result<L, CoreError> {
        if !value.is_finite() {
            return Err(CoreError::NonFinite { field: "value" });
        }
        for band in &self.bands {
            if value < band.upper || (band.inclusive && value == band.upper) {
                return Ok(band.label);
            }
        }
        Ok(self.top)
    }
}
