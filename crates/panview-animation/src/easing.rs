//! Easing curves for time-based animations.

/// Scale applied to the input of the viscous-fluid curve.
const VISCOUS_FLUID_SCALE: f32 = 8.0;

/// `1 / e`, where the two halves of the viscous-fluid curve meet.
const VISCOUS_FLUID_KNEE: f32 = 0.367_879_44;

/// Easing functions mapping a linear fraction in `[0, 1]` onto `[0, 1]`.
///
/// Every curve is monotonic and pinned at both ends, so an animation that
/// interpolates with it never leaves the segment between its start and
/// target values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Friction-like ease-out: a fast start that settles like a body moving
    /// through a viscous fluid. This is the classic scroller curve.
    ViscousFluid,
    /// `1 - (1 - t)^(2 * factor)`. A factor of 1.0 is a quadratic ease-out;
    /// larger factors start faster and settle longer.
    Decelerate(f32),
    /// Ease out using cubic curve.
    EaseOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowIn,
    /// Linear out, slow in (material design).
    LinearOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        let eased = match self {
            Easing::Linear => fraction,
            Easing::ViscousFluid => viscous_fluid(fraction),
            Easing::Decelerate(factor) => decelerate(*factor, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
        };
        eased.clamp(0.0, 1.0)
    }

    /// Whether the curve parameters describe a usable curve.
    pub fn is_valid(&self) -> bool {
        match self {
            Easing::Decelerate(factor) => factor.is_finite() && *factor > 0.0,
            _ => true,
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::ViscousFluid
    }
}

fn viscous_fluid_raw(fraction: f32) -> f32 {
    let x = fraction * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        let tail = 1.0 - (1.0 - x).exp();
        VISCOUS_FLUID_KNEE + tail * (1.0 - VISCOUS_FLUID_KNEE)
    }
}

fn viscous_fluid(fraction: f32) -> f32 {
    // Normalized so that the curve lands exactly on 1.0.
    viscous_fluid_raw(fraction) / viscous_fluid_raw(1.0)
}

fn decelerate(factor: f32, fraction: f32) -> f32 {
    let inverse = 1.0 - fraction;
    if factor == 1.0 {
        1.0 - inverse * inverse
    } else {
        1.0 - inverse.powf(2.0 * factor)
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` matching the x fraction, clamped
    // to [0, 1].
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::ViscousFluid,
        Easing::Decelerate(1.0),
        Easing::Decelerate(2.5),
        Easing::EaseOut,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
    ];

    #[test]
    fn curves_are_pinned_at_both_ends() {
        for easing in ALL {
            assert!(easing.transform(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.transform(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=200 {
                let value = easing.transform(i as f32 / 200.0);
                assert!(
                    value + 1e-4 >= prev,
                    "{easing:?} decreased at step {i}: {prev} -> {value}"
                );
                prev = value;
            }
        }
    }

    #[test]
    fn decelerating_curves_run_ahead_of_linear() {
        for easing in [
            Easing::ViscousFluid,
            Easing::Decelerate(1.0),
            Easing::EaseOut,
            Easing::LinearOutSlowIn,
        ] {
            assert!(easing.transform(0.5) > 0.5, "{easing:?}");
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::Linear.transform(-1.0), 0.0);
        assert_eq!(Easing::Linear.transform(2.0), 1.0);
    }

    #[test]
    fn decelerate_factor_must_be_positive() {
        assert!(Easing::Decelerate(1.5).is_valid());
        assert!(!Easing::Decelerate(0.0).is_valid());
        assert!(!Easing::Decelerate(f32::NAN).is_valid());
        assert!(Easing::default().is_valid());
    }
}
