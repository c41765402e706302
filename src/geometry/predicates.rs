//! Orientation tests used by the triangulators.
//!
//! All predicates work in plain `f32` arithmetic. They are not robust in the
//! exact-arithmetic sense; the fast triangulator accepts that trade-off.

use super::samples::Axis;

/// `b - a`.
#[inline]
pub fn sub(b: [f32; 2], a: [f32; 2]) -> [f32; 2] {
    [b[0] - a[0], b[1] - a[1]]
}

/// z-component of `u × v`.
#[inline]
pub fn cross(u: [f32; 2], v: [f32; 2]) -> f32 {
    u[0] * v[1] - u[1] * v[0]
}

/// Twice the signed area of `(a, b, c)`; negative means clockwise.
#[inline]
pub fn orient(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
    cross(sub(b, a), sub(c, a))
}

/// Component of the unit vector along `(dx, dy)` on `axis`.
///
/// A zero-length vector yields NaN, which compares false against everything;
/// the bridge walks rely on that to stop instead of normalising a zero
/// vector.
#[inline]
pub fn unit_component(dx: f32, dy: f32, axis: Axis) -> f32 {
    let len = f64::from(dx * dx + dy * dy).sqrt();
    let c = match axis {
        Axis::X => dx,
        Axis::Y => dy,
    };
    (f64::from(c) / len) as f32
}

/// `n / d`, or zero when `d` is zero.
#[inline]
fn guarded_ratio(n: f32, d: f32) -> f32 {
    if d == 0.0 { 0.0 } else { n / d }
}

/// Pick the next stitch diagonal for the quadrilateral
/// `base1 -> base2 -> up2 -> up1`.
///
/// Returns `true` to advance on hull 2 (emit `(base2, base1, up2)`, new base
/// edge `base1 - up2`) and `false` to advance on hull 1 (emit
/// `(base2, base1, up1)`, new base edge `up1 - base2`).
///
/// The four corner cross products vote: a corner whose turn disagrees with
/// the majority is reflex, and the diagonal must start there. If all four
/// agree the quadrilateral is convex and either diagonal is valid; a slope
/// sum breaks the tie, with axis-aligned edges contributing zero instead of
/// dividing by zero.
pub fn advance_on_hull2(base1: [f32; 2], up1: [f32; 2], base2: [f32; 2], up2: [f32; 2]) -> bool {
    let ab = sub(up2, base2);
    let ac = sub(up2, up1);
    let db = sub(base1, base2);
    let dc = sub(base1, up1);

    let at_up2 = cross(ab, ac) >= 0.0;
    let at_base2 = cross(db, ab) >= 0.0;
    let at_up1 = cross(ac, dc) >= 0.0;
    let at_base1 = cross(dc, db) >= 0.0;

    let votes = [at_up2, at_base2, at_up1, at_base1]
        .iter()
        .filter(|&&turn| turn)
        .count();
    let minority = votes < 2;

    if at_up2 == minority {
        true
    } else if at_base2 == minority {
        false
    } else if at_up1 == minority {
        false
    } else if at_base1 == minority {
        true
    } else {
        slope_sum(base1, up1, base2, up2) < 0.0
    }
}

fn slope_sum(base1: [f32; 2], up1: [f32; 2], base2: [f32; 2], up2: [f32; 2]) -> f32 {
    let a = sub(up1, base1);
    let b = sub(base2, base1);
    let c = sub(base2, up2);
    let d = sub(up1, up2);
    guarded_ratio(a[0], a[1])
        + guarded_ratio(b[1], b[0])
        + guarded_ratio(d[1], d[0])
        + guarded_ratio(c[0], c[1])
}
