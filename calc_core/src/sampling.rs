//! Sampling grids and sampled extrema.
//!
//! Grid generation and reduction are kept apart: [`linspace`] builds the
//! positions, [`return_max`] reduces any sequence of values, and
//! [`ResultCurve`] pairs the two for plotting or export.

use serde::{Deserialize, Serialize};

use crate::units::{Dimension, Quantity};

/// Default number of grid points (both beam ends included)
pub const DEFAULT_SAMPLE_POINTS: usize = 100;

/// Smallest grid that still contains both ends of the span
pub const MIN_SAMPLE_POINTS: usize = 2;

/// `count` evenly spaced values from `start` to `stop`, both endpoints included.
///
/// The last value is exactly `stop` so that sampled curves always contain the
/// free end of the beam.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Dominant signed extreme of a sequence.
///
/// Takes the minimum and maximum and returns whichever lies farther from zero.
/// Equal magnitudes resolve to the maximum. Returns `None` for an empty input.
///
/// ```rust
/// use calc_core::sampling::return_max;
///
/// assert_eq!(return_max(&[-5.0, -3.0, 2.0]), Some(-5.0));
/// assert_eq!(return_max(&[-2.0, 2.0]), Some(2.0));
/// ```
pub fn return_max(values: &[f64]) -> Option<f64> {
    let (min, max) = values.iter().fold(None, |acc: Option<(f64, f64)>, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })?;

    if max.abs() >= min.abs() {
        Some(max)
    } else {
        Some(min)
    }
}

/// Position along the dominant extreme, paired with its value.
pub fn return_max_point(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    let target = return_max(&values)?;
    points.iter().copied().find(|(_, v)| *v == target)
}

/// Which beam response a curve holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    Deflection,
    Slope,
    Shear,
    Moment,
}

impl Response {
    pub const ALL: [Response; 4] = [
        Response::Deflection,
        Response::Slope,
        Response::Shear,
        Response::Moment,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Response::Deflection => "Deflection",
            Response::Slope => "Slope",
            Response::Shear => "Shear",
            Response::Moment => "Moment",
        }
    }

    /// Dimension of the response values
    pub fn dimension(&self) -> Dimension {
        match self {
            Response::Deflection => Dimension::LENGTH,
            Response::Slope => Dimension::DIMENSIONLESS,
            Response::Shear => Dimension::FORCE,
            Response::Moment => Dimension::MOMENT,
        }
    }
}

/// Sampled `(x, value)` pairs for one response, in SI base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultCurve {
    pub response: Response,
    pub points: Vec<(f64, f64)>,
}

impl ResultCurve {
    /// Evaluate `f` at every grid position.
    pub fn sample(response: Response, grid: &[f64], f: impl Fn(f64) -> f64) -> Self {
        ResultCurve {
            response,
            points: grid.iter().map(|&x| (x, f(x))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    /// Dominant signed extreme of the sampled values
    pub fn extreme(&self) -> Option<Quantity> {
        return_max(&self.values()).map(|v| Quantity::new(v, self.response.dimension()))
    }

    /// Position (m) where the dominant extreme was sampled
    pub fn extreme_position(&self) -> Option<f64> {
        return_max_point(&self.points).map(|(x, _)| x)
    }
}
