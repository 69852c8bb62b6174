//! Easing curves for the mist transition.
//!
//! Two passes compound: [`remap_progress`] turns a scroll ratio into a
//! progress value, then [`dramatic_pull`] reshapes that progress inside the
//! mask before it positions the cloud edge.

use mistveil_core::ProgressCurve;

/// Linear interpolation. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Hermite step between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Value of the exact curve's middle segment at its lower boundary.
const MIDDLE_LOW: f32 = 0.5 + (0.4 - 0.5) * 1.7;
/// Value of the exact curve's middle segment at its upper boundary.
const MIDDLE_HIGH: f32 = 0.5 + (0.7 - 0.5) * 1.7;
/// Value of the exact curve's last segment as `p` approaches 0.7.
const TAIL_LOW: f32 = 0.82;

/// Slow start, fast middle, slow end.
///
/// `p` is the linear ratio through the transition window and is clamped to
/// `[0, 1]` first. With [`ProgressCurve::Exact`] the segments are used as-is
/// and the curve jumps from 0.576 down to 0.33 at `p = 0.4`, and from 0.84 to
/// 0.82 just past `p = 0.7`.
pub fn remap_progress(p: f32, curve: ProgressCurve) -> f32 {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };

    let head = 9.0 * p * p * p;
    let middle = 0.5 + (p - 0.5) * 1.7;
    let tail = 1.0 - (-2.0 * p + 2.0).powi(2) / 2.0;

    let value = match curve {
        ProgressCurve::Exact => {
            if p < 0.4 {
                head
            } else if p <= 0.7 {
                middle
            } else {
                tail
            }
        }
        ProgressCurve::Continuous => {
            if p < 0.4 {
                head * (MIDDLE_LOW / (9.0 * 0.4 * 0.4 * 0.4))
            } else if p <= 0.7 {
                middle
            } else {
                MIDDLE_HIGH + (tail - TAIL_LOW) * ((1.0 - MIDDLE_HIGH) / (1.0 - TAIL_LOW))
            }
        }
    };

    value.clamp(0.0, 1.0)
}

/// In-mask easing: cubic ease-in below 0.3, linear to 0.7, cubic ease-out.
///
/// Continuous at both joins, with `dramatic_pull(0) == 0` and
/// `dramatic_pull(1) == 1`.
pub fn dramatic_pull(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t < 0.3 {
        let k = t / 0.3;
        0.3 * k * k * k
    } else if t <= 0.7 {
        t
    } else {
        let k = 1.0 - (t - 0.7) / 0.3;
        0.7 + 0.3 * (1.0 - k * k * k)
    }
}
