//! Scalar remapping between intervals.
//!
//! Noise output lives in `[-1, 1]`; everything that turns it into a
//! displacement or a modulated parameter goes through [`ease`] or
//! [`map_range`].

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Easing curve applied by [`ease`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingCurve {
    /// `t²` acceleration up to the midpoint, mirrored deceleration after it
    #[default]
    QuadraticInOut,

    /// Quarter-cosine shaping
    SineInOut,
}

impl EasingCurve {
    pub const ALL: [EasingCurve; 2] = [EasingCurve::QuadraticInOut, EasingCurve::SineInOut];

    pub fn name(&self) -> &'static str {
        match self {
            EasingCurve::QuadraticInOut => "quadratic_in_out",
            EasingCurve::SineInOut => "sine_in_out",
        }
    }
}

impl fmt::Display for EasingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingCurve {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "quadratic_in_out" | "quadratic" => Ok(EasingCurve::QuadraticInOut),
            "sine_in_out" | "sine" | "sinusoidal" => Ok(EasingCurve::SineInOut),
            other => Err(Error::UnsupportedEasing(format!("unknown curve '{}'", other))),
        }
    }
}

/// Remap `value` from `[src_lo, src_hi]` to `[dst_lo, dst_hi]` under `curve`.
///
/// An empty source interval has no defined position inside it, so the
/// result is `dst_lo`. Use [`try_ease`] to treat that as an error instead.
///
/// # Arguments
/// * `value` - Input scalar, normally inside the source interval
/// * `src_lo`, `src_hi` - Source interval
/// * `dst_lo`, `dst_hi` - Target interval
/// * `curve` - Easing curve
pub fn ease(value: f32, src_lo: f32, src_hi: f32, dst_lo: f32, dst_hi: f32, curve: EasingCurve) -> f32 {
    let d = src_hi - src_lo;
    if d == 0.0 {
        return dst_lo;
    }

    let b = dst_lo;
    let c = dst_hi - dst_lo;
    let t = value - src_lo;

    match curve {
        EasingCurve::QuadraticInOut => {
            let t = t / (d / 2.0);
            if t < 1.0 {
                c / 2.0 * t * t + b
            } else {
                let t = t - 1.0;
                -c / 2.0 * (t * (t - 2.0) - 1.0) + b
            }
        }
        EasingCurve::SineInOut => -c * (t / d * FRAC_PI_2).cos() + c + b,
    }
}

/// Like [`ease`], but rejects an empty source interval.
pub fn try_ease(
    value: f32,
    src_lo: f32,
    src_hi: f32,
    dst_lo: f32,
    dst_hi: f32,
    curve: EasingCurve,
) -> Result<f32> {
    if src_hi == src_lo {
        return Err(Error::UnsupportedEasing(format!(
            "{} over an empty source interval [{}, {}]",
            curve, src_lo, src_hi
        )));
    }
    Ok(ease(value, src_lo, src_hi, dst_lo, dst_hi, curve))
}

/// Linear remap from `[src_lo, src_hi]` to `[dst_lo, dst_hi]`, without clamping.
///
/// Returns `dst_lo` for an empty source interval.
pub fn map_range(value: f32, src_lo: f32, src_hi: f32, dst_lo: f32, dst_hi: f32) -> f32 {
    let d = src_hi - src_lo;
    if d == 0.0 {
        return dst_lo;
    }
    dst_lo + (dst_hi - dst_lo) * ((value - src_lo) / d)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_quadratic_hits_both_endpoints() {
        let cases = [(-1.0, 1.0, -30.0, 30.0), (0.0, 25.0, 0.0, 7.5), (0.8, 2.0, -4.0, 12.0)];
        for (src_lo, src_hi, dst_lo, dst_hi) in cases {
            let lo = ease(src_lo, src_lo, src_hi, dst_lo, dst_hi, EasingCurve::QuadraticInOut);
            let hi = ease(src_hi, src_lo, src_hi, dst_lo, dst_hi, EasingCurve::QuadraticInOut);
            assert_eq!(lo, dst_lo);
            assert!((hi - dst_hi).abs() < 1e-4, "expected {}, got {}", dst_hi, hi);
        }
    }

    #[test]
    fn test_quadratic_midpoint_and_symmetry() {
        let mid = ease(0.0, -1.0, 1.0, 0.0, 10.0, EasingCurve::QuadraticInOut);
        assert!((mid - 5.0).abs() < EPS);

        // Quarter points mirror each other around the midpoint
        let q1 = ease(-0.5, -1.0, 1.0, 0.0, 10.0, EasingCurve::QuadraticInOut);
        let q3 = ease(0.5, -1.0, 1.0, 0.0, 10.0, EasingCurve::QuadraticInOut);
        assert!((q1 - 1.25).abs() < EPS);
        assert!((q3 - 8.75).abs() < EPS);
    }

    #[test]
    fn test_quadratic_is_monotonic() {
        let mut prev = f32::MIN;
        for i in 0..=100 {
            let v = -1.0 + i as f32 * 0.02;
            let out = ease(v, -1.0, 1.0, -3.0, 3.0, EasingCurve::QuadraticInOut);
            assert!(out >= prev);
            prev = out;
        }
    }

    #[test]
    fn test_sine_endpoints() {
        let lo = ease(0.0, 0.0, 1.0, 2.0, 6.0, EasingCurve::SineInOut);
        let hi = ease(1.0, 0.0, 1.0, 2.0, 6.0, EasingCurve::SineInOut);
        assert!((lo - 2.0).abs() < EPS);
        assert!((hi - 6.0).abs() < EPS);
    }

    #[test]
    fn test_empty_source_interval() {
        assert_eq!(ease(0.3, 1.0, 1.0, 4.0, 9.0, EasingCurve::QuadraticInOut), 4.0);
        assert_eq!(map_range(0.3, 1.0, 1.0, 4.0, 9.0), 4.0);
        assert!(matches!(
            try_ease(0.3, 1.0, 1.0, 4.0, 9.0, EasingCurve::SineInOut),
            Err(Error::UnsupportedEasing(_))
        ));
    }

    #[test]
    fn test_curve_parsing() {
        assert_eq!("quadratic".parse::<EasingCurve>().unwrap(), EasingCurve::QuadraticInOut);
        assert_eq!("Sine-In-Out".parse::<EasingCurve>().unwrap(), EasingCurve::SineInOut);
        assert!(matches!("elastic".parse::<EasingCurve>(), Err(Error::UnsupportedEasing(_))));
    }

    #[test]
    fn test_map_range_is_linear() {
        assert!((map_range(0.0, -1.0, 1.0, 0.0, 10.0) - 5.0).abs() < EPS);
        assert!((map_range(255.0, 255.0, 0.0, 0.0, 20.0)).abs() < EPS);
        assert!((map_range(0.0, 255.0, 0.0, 0.0, 20.0) - 20.0).abs() < EPS);
    }
}
