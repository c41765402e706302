//! Half-plane clipping of a triangulated region.

use super::samples::PlanarSamples;
use hashbrown::HashMap;

/// Result of [`clip_half_plane`]: the surviving samples (kept originals first,
/// then points created on clipped edges) and triangles indexing them.
#[derive(Clone, Debug, PartialEq)]
pub struct ClippedTopology {
    pub samples: PlanarSamples,
    pub triangles: Vec<[usize; 3]>,
    /// For each original sample, its index in `samples` if it was kept.
    pub kept: Vec<Option<usize>>,
}

struct Clipper<'a> {
    src: &'a PlanarSamples,
    xc: f32,
    yc: f32,
    v: f32,
    kept: Vec<Option<usize>>,
    xs: Vec<f32>,
    ys: Vec<f32>,
    // (inside sample, outside sample) -> new sample on that edge
    cut: HashMap<(usize, usize), usize>,
}

impl Clipper<'_> {
    fn slack(&self, i: usize) -> f32 {
        self.v - (self.xc * self.src.x(i) + self.yc * self.src.y(i))
    }

    fn new_index(&self, i: usize) -> usize {
        // Only called for samples with non-negative slack, all of which
        // were mapped up front.
        self.kept[i].unwrap_or(usize::MAX)
    }

    /// New sample where edge `inside -> outside` meets the clip line, shared
    /// between the two triangles on either side of that edge.
    fn cut(&mut self, inside: usize, outside: usize) -> usize {
        if let Some(&s) = self.cut.get(&(inside, outside)) {
            return s;
        }
        let (a, b) = (self.slack(inside), self.slack(outside));
        let w = a / (a - b);
        let (p, q) = (self.src.point(inside), self.src.point(outside));
        let s = self.xs.len();
        self.xs.push((1.0 - w) * p[0] + w * q[0]);
        self.ys.push((1.0 - w) * p[1] + w * q[1]);
        self.cut.insert((inside, outside), s);
        s
    }
}

/// Keep the part of a triangulated region where `xc * x + yc * y <= v`.
///
/// Triangles entirely on the kept side survive unchanged, triangles entirely
/// outside are dropped, and straddling triangles are cut along the line
/// (one triangle when a single vertex is inside, two when two are). Every
/// output triangle keeps the winding of the triangle it came from. Returns
/// `None` when nothing survives. Triangle indices must be valid for
/// `samples`.
pub fn clip_half_plane(
    samples: &PlanarSamples,
    tris: &[[usize; 3]],
    xc: f32,
    yc: f32,
    v: f32,
) -> Option<ClippedTopology> {
    let mut c = Clipper {
        src: samples,
        xc,
        yc,
        v,
        kept: vec![None; samples.len()],
        xs: Vec::new(),
        ys: Vec::new(),
        cut: HashMap::new(),
    };
    for i in 0..samples.len() {
        if c.slack(i) >= 0.0 {
            c.kept[i] = Some(c.xs.len());
            c.xs.push(samples.x(i));
            c.ys.push(samples.y(i));
        }
    }
    if c.xs.is_empty() {
        return None;
    }

    let mut out = Vec::with_capacity(tris.len());
    for t in tris {
        let ins = t.map(|p| c.kept[p].is_some());
        match ins.iter().filter(|&&b| b).count() {
            3 => out.push(t.map(|p| c.new_index(p))),
            1 => {
                let r = ins.iter().position(|&b| b).unwrap_or(0);
                let (a, b, d) = (t[r], t[(r + 1) % 3], t[(r + 2) % 3]);
                let (sb, sd) = (c.cut(a, b), c.cut(a, d));
                out.push([c.new_index(a), sb, sd]);
            }
            2 => {
                let r = ins.iter().position(|&b| !b).unwrap_or(0);
                let (a, b, d) = (t[(r + 1) % 3], t[(r + 2) % 3], t[r]);
                let (sa, sb) = (c.cut(a, d), c.cut(b, d));
                let (ka, kb) = (c.new_index(a), c.new_index(b));
                out.push([ka, kb, sa]);
                out.push([kb, sb, sa]);
            }
            _ => {}
        }
    }
    if out.is_empty() {
        return None;
    }
    log::debug!(
        "clip_half_plane: {} triangles -> {} triangles, {} new samples",
        tris.len(),
        out.len(),
        c.cut.len()
    );

    Some(ClippedTopology {
        samples: PlanarSamples::from_points(
            &c.xs.iter().zip(&c.ys).map(|(&x, &y)| [x, y]).collect::<Vec<_>>(),
        ),
        triangles: out,
        kept: c.kept,
    })
}
