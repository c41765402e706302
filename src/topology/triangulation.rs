//! The triangulation store.
//!
//! [`Triangulation`] holds the triangle list together with the helper
//! arrays derived from it. It is built once by one of the constructors
//! ([`Triangulation::fast`], [`Triangulation::custom`],
//! [`Triangulation::fill_polygon`]) and never mutated afterwards.

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::validation::{TopologyValidationOptions, validate_triangulation};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// A planar triangle mesh with its derived topology.
///
/// Edge slot `j` of triangle `t` is the edge
/// `(tri[t][j], tri[t][(j + 1) % 3])`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangulation {
    tri: Vec<[usize; 3]>,
    vertices: Vec<Vec<usize>>,
    walk: Vec<[Option<usize>; 3]>,
    edges: Vec<[usize; 3]>,
    num_edges: usize,
}

/// A boundary edge: slot `slot` of triangle `triangle`, running from
/// point `a` to point `b` in the triangle's own winding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundaryEdge {
    pub triangle: usize,
    pub slot: usize,
    pub a: usize,
    pub b: usize,
}

static_assertions::assert_impl_all!(Triangulation: Send, Sync);

impl Triangulation {
    pub(crate) fn from_parts(
        tri: Vec<[usize; 3]>,
        vertices: Vec<Vec<usize>>,
        walk: Vec<[Option<usize>; 3]>,
        edges: Vec<[usize; 3]>,
        num_edges: usize,
    ) -> Self {
        Self {
            tri,
            vertices,
            walk,
            edges,
            num_edges,
        }
    }

    /// Triangle → point indices.
    pub fn tri(&self) -> &[[usize; 3]] {
        &self.tri
    }

    /// Point → incident triangles, in increasing triangle order.
    pub fn vertices(&self) -> &[Vec<usize>] {
        &self.vertices
    }

    /// Triangle → neighbour across each edge slot (`None` on the hull).
    pub fn walk(&self) -> &[[Option<usize>; 3]] {
        &self.walk
    }

    /// Triangle → global edge number of each edge slot.
    pub fn edges(&self) -> &[[usize; 3]] {
        &self.edges
    }

    /// Number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.tri.len()
    }

    pub fn triangle(&self, t: usize) -> Option<[usize; 3]> {
        self.tri.get(t).copied()
    }

    pub fn neighbors(&self, t: usize) -> Option<[Option<usize>; 3]> {
        self.walk.get(t).copied()
    }

    /// Triangles incident to point `p`; empty for unknown points.
    pub fn incident_triangles(&self, p: usize) -> &[usize] {
        self.vertices.get(p).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edge slots with no neighbour, in triangle order.
    pub fn boundary_edges(&self) -> Vec<BoundaryEdge> {
        self.tri
            .iter()
            .zip(&self.walk)
            .enumerate()
            .flat_map(|(t, (tri, walk))| {
                (0..3).filter(|&j| walk[j].is_none()).map(move |j| BoundaryEdge {
                    triangle: t,
                    slot: j,
                    a: tri[j],
                    b: tri[(j + 1) % 3],
                })
            })
            .collect()
    }

    /// Boundary points in loop order, starting from the first boundary edge.
    ///
    /// Fails with [`MeshError::BoundaryNotClosed`] unless the boundary edges
    /// form exactly one closed loop. The direction of the loop follows the
    /// first boundary edge.
    pub fn boundary_loop(&self) -> Result<Vec<usize>, MeshError> {
        let edges = self.boundary_edges();
        let Some(first) = edges.first() else {
            return Ok(Vec::new());
        };

        let mut adj: HashMap<usize, Vec<usize>> = HashMap::with_capacity(edges.len());
        for e in &edges {
            adj.entry(e.a).or_default().push(e.b);
            adj.entry(e.b).or_default().push(e.a);
        }
        // Sorted so the reported vertex does not depend on hash order.
        let mut bad: Vec<(usize, usize)> = adj
            .iter()
            .filter(|(_, n)| n.len() != 2)
            .map(|(&p, n)| (p, n.len()))
            .collect();
        bad.sort_unstable();
        if let Some(&(p, deg)) = bad.first() {
            return Err(MeshError::BoundaryNotClosed(format!(
                "point {p} has {deg} boundary edges"
            )));
        }

        let mut out = Vec::with_capacity(edges.len());
        let (mut prev, mut cur) = (first.a, first.b);
        out.push(prev);
        while cur != first.a {
            out.push(cur);
            if out.len() > edges.len() {
                break;
            }
            let n = &adj[&cur];
            let next = if n[0] == prev { n[1] } else { n[0] };
            prev = cur;
            cur = next;
        }
        if out.len() != edges.len() {
            return Err(MeshError::BoundaryNotClosed(format!(
                "loop through point {} covers {} of {} boundary edges",
                first.a,
                out.len(),
                edges.len()
            )));
        }
        Ok(out)
    }

    /// `V - E + F`; 1 for a triangulated disk.
    pub fn euler_characteristic(&self) -> isize {
        self.num_points() as isize - self.num_edges as isize + self.num_triangles() as isize
    }

    /// Take the arrays apart: `(tri, vertices, walk, edges, num_edges)`.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Vec<[usize; 3]>,
        Vec<Vec<usize>>,
        Vec<[Option<usize>; 3]>,
        Vec<[usize; 3]>,
        usize,
    ) {
        (self.tri, self.vertices, self.walk, self.edges, self.num_edges)
    }
}

impl DebugInvariants for Triangulation {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Triangulation");
    }

    /// Structural checks only: the boundary of an imported mesh need not be
    /// a single loop.
    fn validate_invariants(&self) -> Result<(), MeshError> {
        validate_triangulation(self, None, TopologyValidationOptions::structural())
    }
}
