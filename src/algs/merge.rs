//! Hull merging for the fast triangulator.
//!
//! Two sub-triangulations are joined through their convex hulls. Each hull
//! is a list of sample indices in clockwise order. The merge finds the two
//! bridge edges connecting the hulls, builds the merged hull, and fills the
//! region between the hulls with a fan of triangles ("stitching").

use crate::geometry::predicates::{advance_on_hull2, unit_component};
use crate::geometry::samples::{Axis, PlanarSamples};

/// Hull positions of the two bridge edges: `upp1 - upp2` and `low1 - low2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bridges {
    pub upp1: usize,
    pub low1: usize,
    pub upp2: usize,
    pub low2: usize,
}

/// How much of one hull lies between its two bridge vertices.
#[derive(Clone, Copy, Debug)]
struct Span {
    /// Hull vertices facing the other hull (bridge vertices included).
    inner: usize,
    /// Hull vertices that survive on the merged hull.
    outer: usize,
    /// Inner vertices already consumed when stitching starts.
    consumed: usize,
}

impl Span {
    /// `from` walks forward to `to` across the inner side.
    fn new(len: usize, from: usize, to: usize) -> Self {
        if from == to {
            Self {
                inner: len,
                outer: 1,
                consumed: 0,
            }
        } else {
            let inner = (to + len - from) % len + 1;
            Self {
                inner,
                outer: len - inner + 2,
                consumed: 1,
            }
        }
    }
}

/// Positions of the largest and smallest coordinate along `axis`; the first
/// occurrence wins ties.
fn extremes(samples: &PlanarSamples, hull: &[usize], axis: Axis) -> (usize, usize) {
    let c = |i: usize| samples.coord(axis, hull[i]);
    let (mut hi, mut lo) = (0, 0);
    for i in 1..hull.len() {
        if c(i) > c(hi) {
            hi = i;
        }
        if c(i) < c(lo) {
            lo = i;
        }
    }
    (hi, lo)
}

/// Slide a bridge end along `hull` as seen from `anchor`.
///
/// The upper bridge moves while the unit direction from the anchor to the
/// next vertex has a strictly smaller component along `axis`; the lower
/// bridge while it is strictly larger. The direction (forward or backward)
/// is fixed by the first step, and the walk never takes more than one lap.
fn slide(
    samples: &PlanarSamples,
    hull: &[usize],
    start: usize,
    anchor: [f32; 2],
    axis: Axis,
    upper: bool,
) -> usize {
    let n = hull.len();
    let comp = |i: usize| {
        let p = samples.point(hull[i]);
        unit_component(p[0] - anchor[0], p[1] - anchor[1], axis)
    };
    // NaN (a vertex on top of the anchor) never improves.
    let improves = |next: f32, cur: f32| if upper { next < cur } else { next > cur };

    let fwd = (start + 1) % n;
    let forward = improves(comp(fwd), comp(start));
    let step = |i: usize| if forward { (i + 1) % n } else { (i + n - 1) % n };

    let mut cur;
    let mut next = if forward { fwd } else { start };
    let mut steps = 0;
    loop {
        cur = next;
        next = step(cur);
        steps += 1;
        if steps >= n || !improves(comp(next), comp(cur)) {
            break;
        }
    }
    cur
}

/// Locate both bridges, starting from the extremes along `axis` and refining
/// each end against the other in three sweeps.
pub(crate) fn find_bridges(
    samples: &PlanarSamples,
    hull1: &[usize],
    hull2: &[usize],
    axis: Axis,
) -> Bridges {
    let (upp1, low1) = extremes(samples, hull1, axis);
    let (upp2, low2) = extremes(samples, hull2, axis);
    let mut b = Bridges {
        upp1,
        low1,
        upp2,
        low2,
    };
    for _ in 0..3 {
        b.upp1 = slide(samples, hull1, b.upp1, samples.point(hull2[b.upp2]), axis, true);
        b.upp2 = slide(samples, hull2, b.upp2, samples.point(hull1[b.upp1]), axis, true);
        b.low1 = slide(samples, hull1, b.low1, samples.point(hull2[b.low2]), axis, false);
        b.low2 = slide(samples, hull2, b.low2, samples.point(hull1[b.low1]), axis, false);
    }
    b
}

/// Merge two clockwise hulls, appending the stitched triangles to `tris`,
/// and return the merged clockwise hull.
///
/// `axis` is the merge axis: the one perpendicular to the split that
/// separated the two halves.
pub(crate) fn merge_hulls(
    samples: &PlanarSamples,
    hull1: &[usize],
    hull2: &[usize],
    axis: Axis,
    tris: &mut Vec<[usize; 3]>,
) -> Vec<usize> {
    let (n1, n2) = (hull1.len(), hull2.len());
    let b = find_bridges(samples, hull1, hull2, axis);
    let s1 = Span::new(n1, b.upp1, b.low1);
    let s2 = Span::new(n2, b.low2, b.upp2);

    let mut hull = Vec::with_capacity(s1.outer + s2.outer);
    let mut i = b.low1;
    while i != b.upp1 {
        hull.push(hull1[i]);
        i = (i + 1) % n1;
    }
    hull.push(hull1[b.upp1]);
    let mut i = b.upp2;
    while i != b.low2 {
        hull.push(hull2[i]);
        i = (i + 1) % n2;
    }
    hull.push(hull2[b.low2]);

    // Stitch upward from the lower bridge: hull 1 is consumed backward,
    // hull 2 forward, until both reach their upper bridge vertex.
    let count = if s1.outer == 1 || s2.outer == 1 {
        s1.inner + s2.inner - 1
    } else {
        s1.inner + s2.inner - 2
    };
    let before = tris.len();
    let (mut base1, mut base2) = (b.low1, b.low2);
    let mut up1 = (base1 + n1 - 1) % n1;
    let mut up2 = (base2 + 1) % n2;
    let (mut done1, mut done2) = (s1.consumed, s2.consumed);
    for _ in 0..count {
        let on_hull2 = if done1 == s1.inner {
            true
        } else if done2 == s2.inner {
            false
        } else {
            advance_on_hull2(
                samples.point(hull1[base1]),
                samples.point(hull1[up1]),
                samples.point(hull2[base2]),
                samples.point(hull2[up2]),
            )
        };
        if on_hull2 {
            tris.push([hull2[base2], hull1[base1], hull2[up2]]);
            base2 = up2;
            up2 = (base2 + 1) % n2;
            done2 += 1;
        } else {
            tris.push([hull2[base2], hull1[base1], hull1[up1]]);
            base1 = up1;
            up1 = (base1 + n1 - 1) % n1;
            done1 += 1;
        }
    }

    log::trace!(
        "merge along {:?}: hulls {} + {} -> {}, {} triangles",
        axis,
        n1,
        n2,
        hull.len(),
        tris.len() - before
    );
    hull
}
