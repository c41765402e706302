//! Closed-path utilities.
//!
//! A closed path is given as `path[axis][i]` (two rows of equal length); the
//! last point connects back to the first. These helpers turn region
//! boundaries into triangle lists the custom importer can consume.
//!
//! A region bounded by several paths (an outline with holes, or disjoint
//! islands) is first [`link`]ed into one path by cutting a narrow channel
//! between each pair of nearest points.

use crate::mesh_error::MeshError;
use itertools::Itertools;
use std::f64::consts::PI;

/// Parallel segments with a smaller determinant are skipped by
/// [`check_self_intersection`].
const PARALLEL_EPS: f32 = 1e-7;

/// Weight a nudged point keeps of its own position.
const SELF: f32 = 0.9999;
const PULL: f32 = 1.0 - SELF;
const PULL2: f32 = 0.5 * (1.0 - SELF);

fn path_rows<R: AsRef<[f32]>>(path: &[R]) -> Result<(&[f32], &[f32]), MeshError> {
    if path.len() != 2 {
        return Err(MeshError::BadPathDimensions);
    }
    let (xs, ys) = (path[0].as_ref(), path[1].as_ref());
    if xs.len() != ys.len() {
        return Err(MeshError::BadPathDimensions);
    }
    Ok((xs, ys))
}

/// Crossing parameters of segments `a -> b` and `c -> d`, both in `[0, 1]`
/// exactly when the segments meet; `None` when the determinant is at most
/// `eps` in magnitude.
fn crossing(
    a: [f32; 2],
    b: [f32; 2],
    c: [f32; 2],
    d: [f32; 2],
    eps: f32,
) -> Option<(f32, f32)> {
    let det = (b[0] - a[0]) * (c[1] - d[1]) - (b[1] - a[1]) * (c[0] - d[0]);
    if det.abs() <= eps {
        return None;
    }
    let s = ((b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])) / det;
    let t = ((c[0] - a[0]) * (c[1] - d[1]) - (c[1] - a[1]) * (c[0] - d[0])) / det;
    Some((s, t))
}

/// Twice the signed shoelace area; positive for counter-clockwise paths.
fn signed_area2(xs: &[f32], ys: &[f32]) -> f32 {
    (0..xs.len())
        .circular_tuple_windows::<(usize, usize)>()
        .map(|(i, j)| xs[i] * ys[j] - xs[j] * ys[i])
        .sum()
}

/// `true` if two non-adjacent segments of the closed path cross strictly
/// inside both of them.
pub fn check_self_intersection<R: AsRef<[f32]>>(path: &[R]) -> Result<bool, MeshError> {
    let (xs, ys) = path_rows(path)?;
    let n = xs.len();
    if n == 0 {
        return Ok(false);
    }
    let next = |i: usize| (i + 1) % n;
    let pt = |i: usize| [xs[i], ys[i]];

    for i in 0..n {
        for j in 0..n {
            if i == j || i == next(j) || next(i) == j {
                continue;
            }
            if let Some((s, t)) = crossing(pt(i), pt(next(i)), pt(j), pt(next(j)), PARALLEL_EPS) {
                if 0.0 < s && s < 1.0 && 0.0 < t && t < 1.0 {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

/// Like [`check_self_intersection`], but first drops every point equal to its
/// successor and then repairs paths that only touch themselves.
///
/// Where two non-adjacent segments meet exactly at their endpoints, those
/// endpoints are pulled a little toward their path neighbours. Returns `true`
/// if a proper crossing remains; those are not repaired. The rows may shrink,
/// down to empty when every point coincides.
pub fn check_and_fix_self_intersection(path: &mut [Vec<f32>]) -> Result<bool, MeshError> {
    let [xs, ys] = path else {
        return Err(MeshError::BadPathDimensions);
    };
    if xs.len() != ys.len() {
        return Err(MeshError::BadPathDimensions);
    }
    let n = xs.len();
    if n == 0 {
        return Ok(false);
    }

    let keep: Vec<usize> = (0..n)
        .filter(|&i| {
            let j = (i + 1) % n;
            xs[i] != xs[j] || ys[i] != ys[j]
        })
        .collect();
    if keep.len() != n {
        let kx: Vec<f32> = keep.iter().map(|&i| xs[i]).collect();
        let ky: Vec<f32> = keep.iter().map(|&i| ys[i]).collect();
        log::debug!("check_and_fix_self_intersection: dropped {} repeated points", n - keep.len());
        *xs = kx;
        *ys = ky;
    }
    let n = xs.len();
    if n == 0 {
        return Ok(false);
    }
    let next = |i: usize| (i + 1) % n;
    let prev = |i: usize| (i + n - 1) % n;

    let mut intersects = false;
    for i in 0..n {
        for j in 0..n {
            if i == j || i == next(j) || next(i) == j {
                continue;
            }
            let pt = |k: usize| [xs[k], ys[k]];
            let Some((s, t)) = crossing(pt(i), pt(next(i)), pt(j), pt(next(j)), PARALLEL_EPS) else {
                continue;
            };
            if 0.0 < s && s < 1.0 && 0.0 < t && t < 1.0 {
                intersects = true;
            } else if (s == 0.0 || s == 1.0) && (t == 0.0 || t == 1.0) {
                if s == 0.0 {
                    pull_apart(xs, ys, i, next(i), prev(i));
                } else {
                    pull_apart(xs, ys, next(i), i, next(next(i)));
                }
                if t == 0.0 {
                    pull_apart(xs, ys, j, next(j), prev(j));
                } else {
                    pull_apart(xs, ys, next(j), j, next(next(j)));
                }
            }
        }
    }
    Ok(intersects)
}

/// Move point `k` slightly toward the midpoint of `u` and `v`.
fn pull_apart(xs: &mut [f32], ys: &mut [f32], k: usize, u: usize, v: usize) {
    xs[k] = SELF * xs[k] + PULL2 * (xs[u] + xs[v]);
    ys[k] = SELF * ys[k] + PULL2 * (ys[u] + ys[v]);
}

/// Join several closed paths into one.
///
/// Each path is cleaned with [`check_and_fix_self_intersection`] (a path
/// that still crosses itself is an error) and paths of fewer than three
/// points are dropped. The paths must not cross each other. Outer paths are
/// ordered before the paths they contain, then every further path is spliced
/// into the result at the nearest pair of points, walking holes against the
/// outline's orientation. The four points at each splice are nudged apart so
/// the channel has no zero-width segments.
///
/// Returns `None` when no path has three points.
pub fn link<P, R>(paths: &[P]) -> Result<Option<Vec<Vec<f32>>>, MeshError>
where
    P: AsRef<[R]>,
    R: AsRef<[f32]>,
{
    let mut rings = Vec::with_capacity(paths.len());
    for path in paths {
        let (xs, ys) = path_rows(path.as_ref())?;
        let mut ring = vec![xs.to_vec(), ys.to_vec()];
        if check_and_fix_self_intersection(&mut ring)? {
            return Err(MeshError::PathSelfIntersects);
        }
        if ring[0].len() > 2 {
            rings.push(ring);
        }
    }
    if rings.len() < 2 {
        return Ok(rings.pop());
    }

    // contains[a][b]: the first point of ring b lies inside ring a.
    let m = rings.len();
    let mut contains = vec![vec![false; m]; m];
    for a in 0..m {
        for b in 0..m {
            if a != b {
                contains[a][b] = inside(&rings[a], rings[b][0][0], rings[b][1][0])?;
            }
        }
    }
    for i in 0..m {
        if let Some(j) = (i..m).find(|&j| !(i..m).any(|k| contains[k][j])) {
            if j != i {
                rings.swap(i, j);
                contains.swap(i, j);
                for row in &mut contains {
                    row.swap(i, j);
                }
            }
        }
    }
    let ccw: Vec<bool> = rings.iter().map(|r| signed_area2(&r[0], &r[1]) > 0.0).collect();

    let mut rings = rings.into_iter();
    let Some(mut linked) = rings.next() else {
        return Ok(None);
    };
    for (r, ring) in rings.enumerate().map(|(r, ring)| (r + 1, ring)) {
        let flip = (ccw[0] == ccw[r]) == contains[0][r];
        linked = splice(&linked, &ring, flip);
    }
    log::debug!("link: {} paths -> {} points", m, linked[0].len());
    Ok(Some(linked))
}

/// Insert ring `t` into path `s` at their nearest points.
///
/// The result walks `s` up to the nearest point, all of `t` back to its own
/// nearest point (reversed when `flip`), then the rest of `s` from the
/// nearest point again: `n + m + 2` points.
fn splice(s: &[Vec<f32>], t: &[Vec<f32>], flip: bool) -> Vec<Vec<f32>> {
    let (n, m) = (s[0].len(), t[0].len());
    let dist = |i: usize, j: usize| {
        let (dx, dy) = (s[0][i] - t[0][j], s[1][i] - t[1][j]);
        dx * dx + dy * dy
    };
    let Some((ni, nj)) = (0..n)
        .cartesian_product(0..m)
        .min_by(|&(a, b), &(c, d)| dist(a, b).total_cmp(&dist(c, d)))
    else {
        return s.to_vec();
    };

    let order: Vec<usize> = if flip {
        (0..=nj).rev().chain((nj..m).rev()).collect()
    } else {
        (nj..m).chain(0..=nj).collect()
    };
    let mut out: Vec<Vec<f32>> = (0..2)
        .map(|ax| {
            s[ax][..=ni]
                .iter()
                .copied()
                .chain(order.iter().map(|&j| t[ax][j]))
                .chain(s[ax][ni..].iter().copied())
                .collect()
        })
        .collect();

    let total = n + m + 2;
    let (b1, a1) = (ni, ni + 1);
    let (b2, a2) = (ni + 1 + m, ni + 2 + m);
    for (k, toward) in [
        (b1, (b1 + total - 1) % total),
        (a1, (a1 + 1) % total),
        (b2, (b2 + total - 1) % total),
        (a2, (a2 + 1) % total),
    ] {
        for row in &mut out {
            row[k] = SELF * row[k] + PULL * row[toward];
        }
    }
    out
}

/// Area of a region bounded by several closed paths, holes subtracted.
///
/// The paths are [`link`]ed first; no usable path means zero area.
pub fn region_area<P, R>(paths: &[P]) -> Result<f32, MeshError>
where
    P: AsRef<[R]>,
    R: AsRef<[f32]>,
{
    match link(paths)? {
        Some(linked) => polygon_area(&linked),
        None => Ok(0.0),
    }
}

/// Triangulate a region bounded by several closed paths.
///
/// Returns the [`link`]ed path together with the triangles of [`fill`],
/// which index into it. `check` is passed on to [`fill`].
pub fn fill_region<P, R>(
    paths: &[P],
    check: bool,
) -> Result<Option<(Vec<Vec<f32>>, Vec<[usize; 3]>)>, MeshError>
where
    P: AsRef<[R]>,
    R: AsRef<[f32]>,
{
    let Some(linked) = link(paths)? else {
        return Ok(None);
    };
    Ok(fill(&linked, check)?.map(|tris| (linked, tris)))
}

/// Area enclosed by a closed path.
///
/// Paths with fewer than three points enclose nothing. A self-intersecting
/// path has no well-defined area and is rejected.
pub fn polygon_area<R: AsRef<[f32]>>(path: &[R]) -> Result<f32, MeshError> {
    let (xs, ys) = path_rows(path)?;
    if xs.len() < 3 {
        return Ok(0.0);
    }
    if check_self_intersection(path)? {
        return Err(MeshError::PathSelfIntersects);
    }
    Ok((0.5 * f64::from(signed_area2(xs, ys))).abs() as f32)
}

/// `true` if `(x, y)` lies inside the closed path.
///
/// Sums the angles the path sweeps around the point; a full turn means the
/// point is enclosed.
pub fn inside<R: AsRef<[f32]>>(path: &[R], x: f32, y: f32) -> Result<bool, MeshError> {
    let (xs, ys) = path_rows(path)?;
    if xs.is_empty() {
        return Ok(false);
    }
    let bearing = |i: usize| f64::from(xs[i] - x).atan2(f64::from(ys[i] - y));
    let swept: f64 = (0..xs.len())
        .circular_tuple_windows::<(usize, usize)>()
        .map(|(i, j)| {
            let mut a = bearing(i) - bearing(j);
            if a < -PI {
                a += 2.0 * PI;
            }
            if a > PI {
                a -= 2.0 * PI;
            }
            a
        })
        .sum();
    Ok(swept.abs() > PI)
}

/// Triangulate the region enclosed by a simple closed path.
///
/// The region may be concave; every triangle uses path vertices only and
/// lies inside the region. Returns `n - 2` triangles as indices into the
/// path, or `None` for paths with fewer than three points.
///
/// With `check` set, a self-intersecting path is an error. Without it the
/// ear clipper runs anyway and returns whatever triangles it manages to cut
/// before stalling (`None` if it cut none).
pub fn fill<R: AsRef<[f32]>>(path: &[R], check: bool) -> Result<Option<Vec<[usize; 3]>>, MeshError> {
    let (xs, ys) = path_rows(path)?;
    let n = xs.len();
    if n < 3 {
        return Ok(None);
    }
    if check && check_self_intersection(path)? {
        return Err(MeshError::PathSelfIntersects);
    }

    let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
    let mut ccw = signed_area2(xs, ys) > 0.0;

    let mut tris: Vec<[usize; 3]> = Vec::with_capacity(n - 2);
    let mut i = 0usize;
    let mut stalls = 0usize;
    let mut flipped = false;

    while n - tris.len() > 2 {
        let j = next[i];
        let k = next[j];
        let mut ear = ((xs[j] - xs[i]) * (ys[k] - ys[j]) - (xs[k] - xs[j]) * (ys[j] - ys[i]) > 0.0) == ccw;

        if ear && i != next[k] {
            // Line through i and k, and the two boundary lines at j, as
            // `c + px * dy - py * dx`.
            let (ik1, ik0) = (ys[i] - ys[k], xs[i] - xs[k]);
            let ik = ys[k] * ik0 - xs[k] * ik1;
            let (ji1, ji0) = (ys[j] - ys[i], xs[j] - xs[i]);
            let ji = ys[i] * ji0 - xs[i] * ji1;
            let (kj1, kj0) = (ys[k] - ys[j], xs[k] - xs[j]);
            let kj = ys[j] * kj0 - xs[j] * kj1;

            let kn = next[k];
            if ((ik + xs[kn] * ik1 - ys[kn] * ik0) > 0.0) != ccw
                && ((kj + xs[kn] * kj1 - ys[kn] * kj0) > 0.0) != ccw
            {
                ear = false;
            }
            let ip = prev[i];
            if ((ik + xs[ip] * ik1 - ys[ip] * ik0) > 0.0) != ccw
                && ((ji + xs[ip] * ji1 - ys[ip] * ji0) > 0.0) != ccw
            {
                ear = false;
            }

            if ear {
                let a = [xs[i], ys[i]];
                let b = [xs[k], ys[k]];
                let mut p = next[k];
                let mut q = next[p];
                while q != i {
                    let c = [xs[p], ys[p]];
                    let d = [xs[q], ys[q]];
                    p = q;
                    q = next[p];
                    if let Some((s, t)) = crossing(a, b, c, d, 0.0) {
                        if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
                            ear = false;
                            break;
                        }
                    }
                }
            }
        }

        if ear {
            tris.push([i, j, k]);
            next[i] = k;
            prev[k] = i;
            stalls = 0;
        } else {
            i = j;
            let stalled = stalls > n - tris.len();
            stalls += 1;
            if stalled {
                if flipped {
                    log::debug!(
                        "fill: ear clipping stalled with {} of {} triangles",
                        tris.len(),
                        n - 2
                    );
                    return Ok(if tris.is_empty() { None } else { Some(tris) });
                }
                // The orientation guess can be wrong for nearly degenerate
                // paths; retry once with the opposite winding.
                flipped = true;
                stalls = 0;
                ccw = !ccw;
            }
        }
    }
    Ok(Some(tris))
}
