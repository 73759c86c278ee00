//! Shaping curves over normalized state progress.
//!
//! Jump, wall-run and wall-jump attenuate gravity by a curve evaluated at
//! `current_time / duration`; slide does the same for its speed.

use serde::{Deserialize, Serialize};

/// A pure `progress -> factor` function.
pub trait Curve {
    fn evaluate(&self, t: f32) -> f32;
}

impl<F> Curve for F
where
    F: Fn(f32) -> f32,
{
    #[inline]
    fn evaluate(&self, t: f32) -> f32 {
        self(t)
    }
}

/// One key of a [`KeyframeCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear curve through a list of keys sorted by time.
///
/// Outside the key range the curve holds the first/last value. An empty
/// curve evaluates to `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyframeCurve {
    pub keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    /// Build a curve, sorting the keys by time.
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A flat curve.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// A straight line from `(0, start)` to `(1, end)`.
    pub fn linear(start: f32, end: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, start), Keyframe::new(1.0, end)],
        }
    }

    /// Whether keys are in non-decreasing time order.
    pub fn is_sorted(&self) -> bool {
        self.keys.windows(2).all(|pair| pair[0].time <= pair[1].time)
    }
}

impl Curve for KeyframeCurve {
    fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; t > first.time guarantees index >= 1.
        let upper = self.keys.partition_point(|key| key.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];

        let span = b.time - a.time;
        if span <= 0.0 {
            return b.value;
        }
        a.value + (b.value - a.value) * ((t - a.time) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_curve() {
        let half = |t: f32| t * 0.5;
        assert_eq!(half.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_empty_curve_is_zero() {
        assert_eq!(KeyframeCurve::default().evaluate(0.3), 0.0);
    }

    #[test]
    fn test_linear_interpolation_and_clamping() {
        let curve = KeyframeCurve::linear(0.0, 2.0);
        assert_eq!(curve.evaluate(-1.0), 0.0);
        assert!((curve.evaluate(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(curve.evaluate(1.0), 2.0);
        assert_eq!(curve.evaluate(3.0), 2.0);
    }

    #[test]
    fn test_multi_key_curve() {
        let curve = KeyframeCurve::new(vec![
            Keyframe::new(1.0, 0.0),
            Keyframe::new(0.0, 1.0),
            Keyframe::new(0.5, 0.2),
        ]);
        assert!(curve.is_sorted());
        assert!((curve.evaluate(0.25) - 0.6).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_unsorted_keys_detected() {
        let curve = KeyframeCurve {
            keys: vec![Keyframe::new(1.0, 0.0), Keyframe::new(0.0, 1.0)],
        };
        assert!(!curve.is_sorted());
    }
}
