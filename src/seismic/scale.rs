use log::warn;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Clip to the data's own min and max.
    #[default]
    Auto,
    /// Clip to the user's bounds as given.
    Manual,
}
/// Scale mode plus the bounds used when the mode is manual. The manual
/// values are kept while in auto mode so toggling back restores them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmplitudeScale {
    pub mode: ScaleMode,
    pub manual_min: f32,
    pub manual_max: f32,
}
impl Default for AmplitudeScale {
    fn default() -> Self {
        Self {
            mode: ScaleMode::Auto,
            manual_min: -5000.0,
            manual_max: 5000.0,
        }
    }
}
impl AmplitudeScale {
    pub fn manual(min: f32, max: f32) -> Self {
        Self {
            mode: ScaleMode::Manual,
            manual_min: min,
            manual_max: max,
        }
    }
    pub fn bounds_for(&self, matrix: &Array2<f32>) -> ScaleBounds {
        compute_bounds(matrix, self.mode, self.manual_min, self.manual_max)
    }
}
/// Amplitude range used for colour clipping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBounds {
    pub min: f32,
    pub max: f32,
}
impl ScaleBounds {
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
    /// Range safe to hand to a colour map: ordered, and widened
    /// symmetrically around the value when min and max coincide. The
    /// widening is a thousandth of the value, or 1 around zero.
    pub fn display_range(&self) -> (f32, f32) {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        if self.is_degenerate() {
            let half = if lo == 0.0 { 1.0 } else { lo.abs() / 1000.0 };
            warn!("amplitude range collapses to {lo}; displaying {lo} +/- {half}");
            return (lo - half, hi + half);
        }
        (lo, hi)
    }
}
/// Display bounds for `matrix`. Non-finite samples are skipped in auto
/// mode; an empty or all-NaN matrix yields (0, 0).
pub fn compute_bounds(
    matrix: &Array2<f32>,
    mode: ScaleMode,
    manual_min: f32,
    manual_max: f32,
) -> ScaleBounds {
    match mode {
        ScaleMode::Manual => ScaleBounds {
            min: manual_min,
            max: manual_max,
        },
        ScaleMode::Auto => {
            let (min, max) = matrix
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            if min > max {
                ScaleBounds { min: 0.0, max: 0.0 }
            } else {
                ScaleBounds { min, max }
            }
        }
    }
}
