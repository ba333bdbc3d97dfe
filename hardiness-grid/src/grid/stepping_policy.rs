use super::GridError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// absorbs rounding error in (end - start) / step so that nominal endpoints,
/// such as 0.3 on a 0.1 step, stay on the grid.
const INDEXED_STEP_TOLERANCE: f64 = 1e-9;

/// largest number of coordinates generated along a single axis
pub const MAX_AXIS_POINTS: usize = 10_000_000;

/// how the coordinates along one grid axis are generated.
#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SteppingPolicy {
    /// coordinate i is start + i * step, reproducible across platforms
    #[default]
    Indexed,
    /// coordinates are produced by repeatedly adding step to start while <= end,
    /// so the last row or column depends on accumulated rounding error
    Accumulated,
}

impl SteppingPolicy {
    /// generates the inclusive, ascending coordinates of an axis. step must be
    /// positive and finite; an end below start yields no coordinates. fails with
    /// [`GridError::TooManyPoints`] when the axis would exceed [`MAX_AXIS_POINTS`].
    pub fn axis(&self, start: f64, end: f64, step: f64) -> Result<Vec<f64>, GridError> {
        let count = axis_len(start, end, step)?;
        match self {
            SteppingPolicy::Indexed => Ok((0..count).map(|i| start + (i as f64) * step).collect()),
            SteppingPolicy::Accumulated => {
                // accumulation yields at most one coordinate more than indexing
                let mut values = Vec::with_capacity(count + 1);
                let mut current = start;
                while current <= end && values.len() <= count {
                    values.push(current);
                    let next = current + step;
                    if next <= current {
                        // step is below the precision of current
                        break;
                    }
                    current = next;
                }
                Ok(values)
            }
        }
    }
}

/// floor((end - start) / step) + 1, or 0 for a reversed range.
fn axis_len(start: f64, end: f64, step: f64) -> Result<usize, GridError> {
    let span = end - start;
    if !(span >= 0.0) {
        return Ok(0);
    }
    let steps = (span / step + INDEXED_STEP_TOLERANCE).floor();
    let too_many = || GridError::TooManyPoints {
        requested: steps + 1.0,
        limit: MAX_AXIS_POINTS,
    };
    if !steps.is_finite() || steps >= MAX_AXIS_POINTS as f64 {
        return Err(too_many());
    }
    (steps as usize).checked_add(1).ok_or_else(too_many)
}

impl Display for SteppingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SteppingPolicy::Indexed => write!(f, "indexed"),
            SteppingPolicy::Accumulated => write!(f, "accumulated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_includes_both_endpoints() {
        let axis = SteppingPolicy::Indexed.axis(0.0, 10.0, 5.0).unwrap();
        assert_eq!(axis, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_indexed_keeps_nominal_endpoint() {
        // 0.3 / 0.1 is 2.9999999999999996 in floating point
        let axis = SteppingPolicy::Indexed.axis(0.0, 0.3, 0.1).unwrap();
        assert_eq!(axis.len(), 4);
        assert!((axis[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_indexed_partial_step_stops_before_end() {
        let axis = SteppingPolicy::Indexed.axis(0.0, 1.0, 0.4).unwrap();
        assert_eq!(axis.len(), 3);
        assert!((axis[2] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_single_coordinate_range() {
        for policy in [SteppingPolicy::Indexed, SteppingPolicy::Accumulated] {
            assert_eq!(policy.axis(-97.5, -97.5, 0.25).unwrap(), vec![-97.5]);
        }
    }

    #[test]
    fn test_reversed_range_is_empty() {
        for policy in [SteppingPolicy::Indexed, SteppingPolicy::Accumulated] {
            assert!(policy.axis(10.0, 0.0, 1.0).unwrap().is_empty());
        }
    }

    #[test]
    fn test_accumulated_drops_endpoint_lost_to_rounding() {
        // 0.1 + 0.1 + 0.1 = 0.30000000000000004 > 0.3
        let axis = SteppingPolicy::Accumulated.axis(0.0, 0.3, 0.1).unwrap();
        assert_eq!(axis.len(), 3);
    }

    #[test]
    fn test_step_too_small_for_axis() {
        for policy in [SteppingPolicy::Indexed, SteppingPolicy::Accumulated] {
            for step in [1e-300, f64::MIN_POSITIVE, 1e-9] {
                let result = policy.axis(0.0, 1.0, step);
                assert!(
                    matches!(result, Err(GridError::TooManyPoints { limit, .. }) if limit == MAX_AXIS_POINTS),
                    "{policy} stepping at {step}"
                );
            }
        }
    }

    #[test]
    fn test_dense_axis_within_limit() {
        let axis = SteppingPolicy::Indexed.axis(0.0, 1.0, 1e-6).unwrap();
        assert!(axis.len() > 999_999 && axis.len() <= MAX_AXIS_POINTS);
    }
}
