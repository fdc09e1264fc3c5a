//! Timing curve evaluation
//!
//! [`TimingFunction`] in the core crate is pure data; this module gives it a
//! value. Hosts that run their own transitions can ignore it, but overlay
//! sampling and tests need curves evaluated engine-side.

use limelight_core::TimingFunction;

/// Evaluate a timing curve at a progress fraction
pub trait TimingFunctionExt {
    /// Map linear progress `t` in `0.0..=1.0` to eased progress.
    ///
    /// Input is clamped; named curves use their standard bezier control
    /// points.
    fn apply(&self, t: f32) -> f32;
}

impl TimingFunctionExt for TimingFunction {
    fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            TimingFunction::Linear => t,
            TimingFunction::Ease => bezier(0.25, 0.1, 0.25, 1.0, t),
            TimingFunction::EaseIn => bezier(0.42, 0.0, 1.0, 1.0, t),
            TimingFunction::EaseOut => bezier(0.0, 0.0, 0.58, 1.0, t),
            TimingFunction::EaseInOut => bezier(0.42, 0.0, 0.58, 1.0, t),
            TimingFunction::CubicBezier { x1, y1, x2, y2 } => bezier(x1, y1, x2, y2, t),
        }
    }
}

/// One cubic bezier coordinate with endpoints pinned at 0 and 1
fn coord(a: f32, b: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
}

/// CSS-style bezier: x is the time axis, so invert x(s) = t first, then
/// evaluate y at that parameter. Bisection is plenty fast at this call rate
/// and immune to the flat-tangent cases that trip Newton's method.
fn bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut s = t;
    for _ in 0..32 {
        let x = coord(x1, x2, s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }

    coord(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [TimingFunction; 6] = [
        TimingFunction::Linear,
        TimingFunction::Ease,
        TimingFunction::EaseIn,
        TimingFunction::EaseOut,
        TimingFunction::EaseInOut,
        TimingFunction::CubicBezier {
            x1: 0.4,
            y1: 0.0,
            x2: 0.2,
            y2: 1.0,
        },
    ];

    #[test]
    fn test_endpoints() {
        for curve in CURVES {
            assert_eq!(curve.apply(0.0), 0.0, "{curve:?}");
            assert_eq!(curve.apply(1.0), 1.0, "{curve:?}");
            // Out-of-range input clamps
            assert_eq!(curve.apply(-0.5), 0.0, "{curve:?}");
            assert_eq!(curve.apply(1.5), 1.0, "{curve:?}");
        }
    }

    #[test]
    fn test_monotonic() {
        for curve in CURVES {
            let mut prev = 0.0;
            for i in 1..=100 {
                let y = curve.apply(i as f32 / 100.0);
                assert!(y >= prev - 1e-4, "{curve:?} dipped at step {i}");
                prev = y;
            }
        }
    }

    #[test]
    fn test_linear_is_identity() {
        assert!((TimingFunction::Linear.apply(0.37) - 0.37).abs() < 1e-6);
    }

    #[test]
    fn test_deceleration_curve_midpoint() {
        // cubic-bezier(0.4, 0, 0.2, 1) at t=0.5 sits near 0.78: front-loaded
        // motion that coasts in.
        let curve = TimingFunction::CubicBezier {
            x1: 0.4,
            y1: 0.0,
            x2: 0.2,
            y2: 1.0,
        };
        let mid = curve.apply(0.5);
        assert!((mid - 0.78).abs() < 0.02, "got {mid}");

        // Ease-out overtakes linear early on
        assert!(TimingFunction::EaseOut.apply(0.25) > 0.25);
    }
}
