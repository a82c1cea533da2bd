// THEORY:
// The `Normalizer` is the last analytical stage: an affine remap from pixel space
// (column index, height above the bottom row) into the data coordinates the caller
// reads off the plot's axes.
//
// The observed extremes of the surviving samples are pinned to the caller's target
// bounds: the leftmost column lands on `x_target.min`, the rightmost on
// `x_target.max`, and likewise for heights. When the observed extremes coincide on
// either axis the scale factor is undefined and the whole trace is rejected.

use crate::core_modules::column_scan::ColumnSample;
use crate::error::{Axis, Result, TraceError};
use std::fmt;

/// A target interval on one data axis. `min` maps from the smallest observed pixel
/// coordinate and `max` from the largest; `min > max` flips the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Extremes of the samples in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ObservedBounds {
    /// `None` when there are no samples to observe.
    pub fn from_samples(samples: &[ColumnSample]) -> Option<Self> {
        let first = samples.first()?;
        let seed = Self {
            x_min: first.x as f64,
            x_max: first.x as f64,
            y_min: first.y,
            y_max: first.y,
        };
        Some(samples.iter().fold(seed, |b, s| Self {
            x_min: b.x_min.min(s.x as f64),
            x_max: b.x_max.max(s.x as f64),
            y_min: b.y_min.min(s.y),
            y_max: b.y_max.max(s.y),
        }))
    }
}

/// A traced point in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for TracePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.x, self.y)
    }
}

/// Affine map from pixel space to data space, built once per trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    observed: ObservedBounds,
    x_target: AxisRange,
    y_target: AxisRange,
    x_scale: f64,
    y_scale: f64,
}

impl Normalizer {
    pub fn new(
        samples: &[ColumnSample],
        x_target: AxisRange,
        y_target: AxisRange,
    ) -> Result<Self> {
        let observed = ObservedBounds::from_samples(samples).ok_or(TraceError::NoSamples)?;
        let x_scale = scale(Axis::X, observed.x_min, observed.x_max, x_target)?;
        let y_scale = scale(Axis::Y, observed.y_min, observed.y_max, y_target)?;
        tracing::debug!(?observed, x_scale, y_scale, "computed normalization");

        Ok(Self {
            observed,
            x_target,
            y_target,
            x_scale,
            y_scale,
        })
    }

    pub fn observed(&self) -> ObservedBounds {
        self.observed
    }

    pub fn apply(&self, sample: &ColumnSample) -> TracePoint {
        TracePoint {
            x: (sample.x as f64 - self.observed.x_min) * self.x_scale + self.x_target.min,
            y: (sample.y - self.observed.y_min) * self.y_scale + self.y_target.min,
        }
    }
}

fn scale(axis: Axis, observed_min: f64, observed_max: f64, target: AxisRange) -> Result<f64> {
    let factor = target.span() / (observed_max - observed_min);
    if !factor.is_finite() || !target.min.is_finite() {
        return Err(TraceError::DegenerateBounds { axis });
    }
    Ok(factor)
}

/// Maps every sample into the target bounds, preserving order.
pub fn normalize(
    samples: &[ColumnSample],
    x_target: AxisRange,
    y_target: AxisRange,
) -> Result<Vec<TracePoint>> {
    let normalizer = Normalizer::new(samples, x_target, y_target)?;
    Ok(samples.iter().map(|s| normalizer.apply(s)).collect())
}
