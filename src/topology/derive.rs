//! Derivation of the helper arrays from a triangle list.
//!
//! Both constructors end here: the fast triangulator hands over `tri` and
//! `vertices`, the importer hands over whatever the caller supplied. Any
//! array still missing is computed from `tri`.

use crate::mesh_error::MeshError;
use crate::topology::triangulation::Triangulation;
use crate::topology::validation::NonManifoldHandling;
use hashbrown::HashMap;

/// A triangle list plus whichever helper arrays are already known.
#[derive(Clone, Debug, Default)]
pub struct PartialTopology {
    pub tri: Vec<[usize; 3]>,
    pub num_points: usize,
    pub vertices: Option<Vec<Vec<usize>>>,
    pub walk: Option<Vec<[Option<usize>; 3]>>,
    /// Global edge numbers and their count.
    pub edges: Option<(Vec<[usize; 3]>, usize)>,
}

impl PartialTopology {
    pub fn new(tri: Vec<[usize; 3]>, num_points: usize) -> Self {
        Self {
            tri,
            num_points,
            ..Default::default()
        }
    }
}

/// Complete the missing helper arrays and assemble the store.
pub fn finish_triangulation(
    parts: PartialTopology,
    non_manifold: NonManifoldHandling,
) -> Result<Triangulation, MeshError> {
    let PartialTopology {
        tri,
        num_points,
        vertices,
        walk,
        edges,
    } = parts;

    let vertices = match vertices {
        Some(v) => v,
        None => build_vertices(&tri, num_points)?,
    };
    let walk = match walk {
        Some(w) => w,
        None => build_walk(&tri, non_manifold)?,
    };
    let (edges, num_edges) = match edges {
        Some(e) => e,
        None => number_edges(&tri, &walk),
    };

    log::trace!(
        "finish_triangulation: {} points, {} triangles, {} edges",
        vertices.len(),
        tri.len(),
        num_edges
    );
    Ok(Triangulation::from_parts(tri, vertices, walk, edges, num_edges))
}

/// Point → incident triangles, each list in increasing triangle order.
///
/// Fails with [`MeshError::UncoveredSample`] for the first point no triangle
/// references. Indices must already be in range.
pub fn build_vertices(tri: &[[usize; 3]], num_points: usize) -> Result<Vec<Vec<usize>>, MeshError> {
    let mut degree = vec![0usize; num_points];
    for t in tri {
        for &p in t {
            degree[p] += 1;
        }
    }
    if let Some(index) = degree.iter().position(|&d| d == 0) {
        return Err(MeshError::UncoveredSample { index });
    }
    let mut vertices: Vec<Vec<usize>> = degree.into_iter().map(Vec::with_capacity).collect();
    for (i, t) in tri.iter().enumerate() {
        for &p in t {
            vertices[p].push(i);
        }
    }
    Ok(vertices)
}

#[inline]
fn edge_key(t: &[usize; 3], slot: usize) -> (usize, usize) {
    let (a, b) = (t[slot], t[(slot + 1) % 3]);
    if a < b { (a, b) } else { (b, a) }
}

/// Triangle → neighbour across each edge slot.
///
/// Slots are matched by their undirected point pair. An edge carried by
/// more than two slots is non-manifold: with [`NonManifoldHandling::Error`]
/// it is rejected, otherwise the first two slots (in triangle order) are
/// linked and the rest stay on the boundary.
pub fn build_walk(
    tri: &[[usize; 3]],
    handling: NonManifoldHandling,
) -> Result<Vec<[Option<usize>; 3]>, MeshError> {
    let mut slots: HashMap<(usize, usize), Vec<(usize, usize)>> =
        HashMap::with_capacity(tri.len() * 3 / 2 + 1);
    for (t, tr) in tri.iter().enumerate() {
        for j in 0..3 {
            slots.entry(edge_key(tr, j)).or_default().push((t, j));
        }
    }

    let mut walk = vec![[None; 3]; tri.len()];
    // Visit in triangle order so warnings and errors are deterministic.
    for (t, tr) in tri.iter().enumerate() {
        for j in 0..3 {
            let key = edge_key(tr, j);
            let list = &slots[&key];
            if list[0] != (t, j) || list.len() < 2 {
                continue;
            }
            if list.len() > 2 {
                match handling {
                    NonManifoldHandling::Error => {
                        return Err(MeshError::NonManifoldEdge {
                            a: key.0,
                            b: key.1,
                            incident_triangles: list.len(),
                        });
                    }
                    NonManifoldHandling::Warn => log::warn!(
                        "non-manifold edge ({}, {}) shared by {} triangles; linking triangles {} and {}",
                        key.0,
                        key.1,
                        list.len(),
                        list[0].0,
                        list[1].0
                    ),
                    NonManifoldHandling::Ignore => {}
                }
            }
            let ((t1, j1), (t2, j2)) = (list[0], list[1]);
            walk[t1][j1] = Some(t2);
            walk[t2][j2] = Some(t1);
        }
    }
    Ok(walk)
}

/// Global edge numbers for every slot, and their count.
///
/// Slots are numbered in triangle order; a slot with a neighbour shares its
/// number with the neighbour's slot across the same point pair.
pub fn number_edges(tri: &[[usize; 3]], walk: &[[Option<usize>; 3]]) -> (Vec<[usize; 3]>, usize) {
    let mut numbers: Vec<[Option<usize>; 3]> = vec![[None; 3]; tri.len()];
    let mut next = 0usize;
    for t in 0..tri.len() {
        for j in 0..3 {
            if numbers[t][j].is_some() {
                continue;
            }
            numbers[t][j] = Some(next);
            if let Some(n) = walk[t][j] {
                let key = edge_key(&tri[t], j);
                if let Some(k) = (0..3).find(|&k| walk[n][k] == Some(t) && edge_key(&tri[n], k) == key) {
                    if numbers[n][k].is_none() {
                        numbers[n][k] = Some(next);
                    }
                }
            }
            next += 1;
        }
    }
    let edges = numbers.into_iter().map(|s| s.map(|e| e.unwrap_or(0))).collect();
    (edges, next)
}
