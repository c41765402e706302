//! Fast divide-and-conquer triangulation.
//!
//! The sample set is recursively split at the median along alternating
//! axes until each part holds two or three points. Three points become a
//! triangle, two points a segment. Sibling parts are then merged pairwise
//! through their convex hulls (see [`crate::algs::merge`]). Recursion is
//! replaced by an explicit task stack, so deep inputs cannot overflow the
//! call stack.
//!
//! The result covers every sample and is usually close to a Delaunay
//! triangulation, but no empty-circumcircle property is guaranteed.

use crate::algs::merge::merge_hulls;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::predicates::orient;
use crate::geometry::samples::{Axis, PlanarSamples};
use crate::mesh_error::MeshError;
use crate::topology::derive::{PartialTopology, build_vertices, finish_triangulation};
use crate::topology::triangulation::Triangulation;
use crate::topology::validation::NonManifoldHandling;
use serde::{Deserialize, Serialize};

/// Default pre-rotation: 10 degrees.
pub const DEFAULT_ROTATION: f64 = std::f64::consts::PI / 18.0;

/// Knobs for [`Triangulation::fast_with_options`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FastOptions {
    /// Rotation (radians, counter-clockwise) applied to the samples before
    /// splitting, so axis-aligned input does not produce collinear parts.
    pub rotation: f64,
    /// Initial capacity of the task stack.
    pub task_capacity: usize,
    /// Initial capacity of the hull stack.
    pub hull_capacity: usize,
    /// Handling of edges shared by more than two triangles when deriving
    /// neighbours.
    pub non_manifold: NonManifoldHandling,
}

impl Default for FastOptions {
    fn default() -> Self {
        Self {
            rotation: DEFAULT_ROTATION,
            task_capacity: 20,
            hull_capacity: 10,
            non_manifold: NonManifoldHandling::Warn,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Task {
    /// Triangulate `indices[start..=end]`, splitting along `split`.
    Divide { start: usize, end: usize, split: Axis },
    /// Merge the two topmost hulls, which were split along `split`.
    Merge { split: Axis },
}

struct FastTriangulator {
    samples: PlanarSamples,
    indices: Vec<usize>,
    tasks: Vec<Task>,
    hulls: Vec<Vec<usize>>,
    tri: Vec<[usize; 3]>,
}

impl FastTriangulator {
    fn new(samples: PlanarSamples, options: &FastOptions) -> Self {
        let n = samples.len();
        Self {
            samples,
            indices: (0..n).collect(),
            tasks: Vec::with_capacity(options.task_capacity),
            hulls: Vec::with_capacity(options.hull_capacity),
            tri: Vec::with_capacity(2 * n),
        }
    }

    fn run(mut self) -> Vec<[usize; 3]> {
        let n = self.indices.len();
        self.tasks.push(Task::Divide {
            start: 0,
            end: n - 1,
            split: Axis::Y,
        });
        let mut merges = 0usize;

        while let Some(task) = self.tasks.pop() {
            match task {
                Task::Divide { start, end, split } if end - start >= 3 => {
                    sort_by_axis(&mut self.indices[start..=end], &self.samples, split);
                    let mid = (start + end) / 2;
                    // Children run before their merge; the right half is
                    // popped first, so its hull ends up below the left's.
                    self.tasks.push(Task::Merge { split });
                    self.tasks.push(Task::Divide {
                        start,
                        end: mid,
                        split: split.other(),
                    });
                    self.tasks.push(Task::Divide {
                        start: mid + 1,
                        end,
                        split: split.other(),
                    });
                }
                Task::Divide { start, end, .. } if end - start == 2 => {
                    let mut h = [self.indices[start], self.indices[start + 1], self.indices[end]];
                    let o = orient(
                        self.samples.point(h[0]),
                        self.samples.point(h[1]),
                        self.samples.point(h[2]),
                    );
                    if o > 0.0 {
                        h.swap(1, 2);
                    }
                    self.tri.push(h);
                    self.hulls.push(h.to_vec());
                }
                Task::Divide { start, end, .. } => {
                    self.hulls.push(vec![self.indices[start], self.indices[end]]);
                }
                Task::Merge { split } => {
                    let (Some(top), Some(below)) = (self.hulls.pop(), self.hulls.pop()) else {
                        unreachable!("merge task without two hulls");
                    };
                    let (hull1, hull2) = match split {
                        Axis::X => (below, top),
                        Axis::Y => (top, below),
                    };
                    let merged = merge_hulls(&self.samples, &hull1, &hull2, split.other(), &mut self.tri);
                    self.hulls.push(merged);
                    merges += 1;
                }
            }
        }

        log::trace!(
            "fast: {} merges, final hull of {} points",
            merges,
            self.hulls.last().map_or(0, Vec::len)
        );
        self.tri
    }
}

/// In-place quicksort of sample indices by their coordinate along `axis`.
///
/// Middle-element pivot; recurses into the smaller partition and loops on
/// the larger one, so stack depth stays logarithmic.
fn sort_by_axis(indices: &mut [usize], samples: &PlanarSamples, axis: Axis) {
    let key = |i: usize| samples.coord(axis, i);
    let mut s = indices;
    while s.len() > 1 {
        s.swap(0, (s.len() - 1) / 2);
        let pivot = key(s[0]);
        let mut p = 0;
        for i in 1..s.len() {
            if key(s[i]) < pivot {
                p += 1;
                s.swap(i, p);
            }
        }
        s.swap(0, p);
        let (left, rest) = std::mem::take(&mut s).split_at_mut(p);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            sort_by_axis(left, samples, axis);
            s = right;
        } else {
            sort_by_axis(right, samples, axis);
            s = left;
        }
    }
}

impl Triangulation {
    /// Triangulate `samples[axis][point]` with the default [`FastOptions`].
    ///
    /// ```
    /// use fast_delaunay::prelude::*;
    ///
    /// let samples = [vec![0.0f32, 1.0, 0.0, 1.0], vec![0.0f32, 0.0, 1.0, 1.0]];
    /// let t = Triangulation::fast(&samples).unwrap();
    /// assert_eq!(t.num_triangles(), 2);
    /// assert_eq!(t.num_edges(), 5);
    /// ```
    pub fn fast<R: AsRef<[f32]>>(samples: &[R]) -> Result<Self, MeshError> {
        Self::fast_with_options(samples, FastOptions::default())
    }

    /// Triangulate `samples[axis][point]`.
    ///
    /// Fails with [`MeshError::UnsupportedDimension`] unless exactly two rows
    /// are given, and with [`MeshError::InsufficientSamples`] when fewer than
    /// three points are usable. Rows of unequal length are truncated to the
    /// shorter one.
    pub fn fast_with_options<R: AsRef<[f32]>>(samples: &[R], options: FastOptions) -> Result<Self, MeshError> {
        let samples = PlanarSamples::from_rows(samples)?;
        Self::fast_from_samples(&samples, options)
    }

    /// Triangulate an already validated sample set.
    pub fn fast_from_samples(samples: &PlanarSamples, options: FastOptions) -> Result<Self, MeshError> {
        let n = samples.len();
        if n < 3 {
            return Err(MeshError::InsufficientSamples { found: n });
        }

        let tri = FastTriangulator::new(samples.rotated(options.rotation), &options).run();
        let vertices = build_vertices(&tri, n)?;
        let t = finish_triangulation(
            PartialTopology {
                vertices: Some(vertices),
                ..PartialTopology::new(tri, n)
            },
            options.non_manifold,
        )?;
        t.debug_assert_invariants();

        log::debug!(
            "fast: {} samples -> {} triangles, {} edges",
            n,
            t.num_triangles(),
            t.num_edges()
        );
        Ok(t)
    }
}
