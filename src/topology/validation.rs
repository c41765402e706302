//! Topology validation helpers.

use crate::geometry::predicates::orient;
use crate::geometry::samples::PlanarSamples;
use crate::mesh_error::MeshError;
use crate::topology::triangulation::Triangulation;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Optional validation toggles for triangulation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyValidationOptions {
    /// Ensure `vertices` lists exactly the triangles that reference each point,
    /// and that every point is referenced.
    pub check_incidence: bool,
    /// Ensure every `walk` link is returned across the same point pair.
    pub check_walk_symmetry: bool,
    /// Ensure edge numbers are in range, shared across neighbours and dense.
    pub check_edge_numbers: bool,
    /// Ensure the boundary edges form one closed loop.
    pub check_boundary_loop: bool,
    /// Ensure all non-degenerate triangles wind the same way. Needs samples.
    pub check_winding: bool,
    /// How to handle edges shared by more than two triangles.
    pub non_manifold: NonManifoldHandling,
}

impl TopologyValidationOptions {
    /// Enable all topology validation checks.
    pub fn all() -> Self {
        Self {
            check_incidence: true,
            check_walk_symmetry: true,
            check_edge_numbers: true,
            check_boundary_loop: true,
            check_winding: true,
            non_manifold: NonManifoldHandling::Error,
        }
    }

    /// Consistency of the stored arrays with each other, without any
    /// requirement on the shape of the mesh.
    pub fn structural() -> Self {
        Self {
            check_boundary_loop: false,
            check_winding: false,
            non_manifold: NonManifoldHandling::Ignore,
            ..Self::all()
        }
    }
}

impl Default for TopologyValidationOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold edges.
    #[default]
    Warn,
    /// Return an error on non-manifold edges.
    Error,
}

/// Validate a triangulation's stored arrays against each other, and against
/// `samples` when given.
///
/// Shapes and index ranges are always checked; everything else follows
/// `options`. Returns the first violation found.
pub fn validate_triangulation(
    t: &Triangulation,
    samples: Option<&PlanarSamples>,
    options: TopologyValidationOptions,
) -> Result<(), MeshError> {
    validate_shapes(t, samples)?;

    if options.check_incidence {
        validate_incidence(t)?;
    }
    if options.check_walk_symmetry {
        validate_walk(t)?;
    }
    if options.check_edge_numbers {
        validate_edge_numbers(t)?;
    }
    validate_non_manifold(t, options.non_manifold)?;
    if options.check_boundary_loop {
        t.boundary_loop()?;
    }
    if options.check_winding {
        if let Some(s) = samples {
            validate_winding(t, s)?;
        }
    }
    Ok(())
}

fn validate_shapes(t: &Triangulation, samples: Option<&PlanarSamples>) -> Result<(), MeshError> {
    let nt = t.num_triangles();
    let np = t.num_points();
    if let Some(s) = samples {
        if s.len() != np {
            return Err(MeshError::ShapeMismatch {
                array: "Vertices",
                expected: s.len(),
                found: np,
            });
        }
    }
    for (array, found) in [("Walk", t.walk().len()), ("Edges", t.edges().len())] {
        if found != nt {
            return Err(MeshError::ShapeMismatch {
                array,
                expected: nt,
                found,
            });
        }
    }
    for (i, tri) in t.tri().iter().enumerate() {
        for (slot, &index) in tri.iter().enumerate() {
            if index >= np {
                return Err(MeshError::IllegalVertexIndex {
                    triangle: i,
                    slot,
                    index,
                    num_samples: np,
                });
            }
        }
        if let Some(index) = repeated_index(tri) {
            return Err(MeshError::DegenerateTriangle { triangle: i, index });
        }
        for (slot, n) in t.walk()[i].iter().enumerate() {
            if let Some(n) = *n {
                if n >= nt {
                    return Err(MeshError::IllegalNeighbor {
                        triangle: i,
                        slot,
                        neighbor: n,
                    });
                }
            }
        }
        for (slot, &edge) in t.edges()[i].iter().enumerate() {
            if edge >= t.num_edges() {
                return Err(MeshError::IllegalEdgeNumber {
                    triangle: i,
                    slot,
                    edge,
                    num_edges: t.num_edges(),
                });
            }
        }
    }
    Ok(())
}

/// The first index that occurs twice in a triangle, if any.
pub(crate) fn repeated_index(tri: &[usize; 3]) -> Option<usize> {
    if tri[0] == tri[1] || tri[0] == tri[2] {
        Some(tri[0])
    } else if tri[1] == tri[2] {
        Some(tri[1])
    } else {
        None
    }
}

fn validate_incidence(t: &Triangulation) -> Result<(), MeshError> {
    for (i, tri) in t.tri().iter().enumerate() {
        for &p in tri {
            if !t.incident_triangles(p).contains(&i) {
                return Err(MeshError::IncidenceMismatch {
                    point: p,
                    triangle: i,
                });
            }
        }
    }
    for (p, incident) in t.vertices().iter().enumerate() {
        if incident.is_empty() {
            return Err(MeshError::UncoveredSample { index: p });
        }
        for &i in incident {
            if !t.triangle(i).is_some_and(|tri| tri.contains(&p)) {
                return Err(MeshError::IncidenceMismatch {
                    point: p,
                    triangle: i,
                });
            }
        }
    }
    Ok(())
}

fn slot_pair(tri: &[usize; 3], slot: usize) -> (usize, usize) {
    let (a, b) = (tri[slot], tri[(slot + 1) % 3]);
    if a < b { (a, b) } else { (b, a) }
}

/// The slot of triangle `n` that links back to `t` across `pair`.
fn back_slot(t: &Triangulation, n: usize, back_to: usize, pair: (usize, usize)) -> Option<usize> {
    let tri = t.tri()[n];
    let walk = t.walk()[n];
    (0..3).find(|&k| walk[k] == Some(back_to) && slot_pair(&tri, k) == pair)
}

fn validate_walk(t: &Triangulation) -> Result<(), MeshError> {
    for (i, (tri, walk)) in t.tri().iter().zip(t.walk()).enumerate() {
        for (slot, n) in walk.iter().enumerate() {
            if let Some(n) = *n {
                if back_slot(t, n, i, slot_pair(tri, slot)).is_none() {
                    return Err(MeshError::AsymmetricWalk {
                        triangle: i,
                        slot,
                        neighbor: n,
                    });
                }
            }
        }
    }
    Ok(())
}

fn validate_edge_numbers(t: &Triangulation) -> Result<(), MeshError> {
    let mut users: HashMap<usize, Vec<(usize, usize)>> = HashMap::with_capacity(t.num_edges());
    for (i, edges) in t.edges().iter().enumerate() {
        for (slot, &e) in edges.iter().enumerate() {
            users.entry(e).or_default().push((i, slot));
        }
    }
    for (i, (tri, walk)) in t.tri().iter().zip(t.walk()).enumerate() {
        for slot in 0..3 {
            let e = t.edges()[i][slot];
            let list = &users[&e];
            let consistent = match (list.as_slice(), walk[slot]) {
                ([_], None) => true,
                ([(t1, s1), (t2, s2)], Some(n)) => {
                    let other = if (*t1, *s1) == (i, slot) { (*t2, *s2) } else { (*t1, *s1) };
                    other.0 == n && slot_pair(&t.tri()[n], other.1) == slot_pair(tri, slot)
                }
                _ => false,
            };
            if !consistent {
                return Err(MeshError::EdgeNumberMismatch {
                    triangle: i,
                    slot,
                    reason: format!("edge {e} is used by {} slots", list.len()),
                });
            }
        }
    }
    if users.len() != t.num_edges() {
        return Err(MeshError::EdgeNumberMismatch {
            triangle: 0,
            slot: 0,
            reason: format!("{} distinct edge numbers for num_edges = {}", users.len(), t.num_edges()),
        });
    }
    Ok(())
}

/// Detect non-manifold edges by counting the slots that carry each point pair.
fn validate_non_manifold(t: &Triangulation, handling: NonManifoldHandling) -> Result<(), MeshError> {
    if handling == NonManifoldHandling::Ignore {
        return Ok(());
    }
    let mut counts: HashMap<(usize, usize), usize> = HashMap::with_capacity(t.num_edges());
    for tri in t.tri() {
        for slot in 0..3 {
            *counts.entry(slot_pair(tri, slot)).or_default() += 1;
        }
    }
    let mut bad: Vec<((usize, usize), usize)> = counts.into_iter().filter(|&(_, c)| c > 2).collect();
    bad.sort_unstable();
    for ((a, b), incident_triangles) in bad {
        match handling {
            NonManifoldHandling::Warn => {
                log::warn!("non-manifold edge ({a}, {b}) shared by {incident_triangles} triangles");
            }
            NonManifoldHandling::Error => {
                return Err(MeshError::NonManifoldEdge {
                    a,
                    b,
                    incident_triangles,
                });
            }
            NonManifoldHandling::Ignore => {}
        }
    }
    Ok(())
}

fn validate_winding(t: &Triangulation, samples: &PlanarSamples) -> Result<(), MeshError> {
    let mut reference: Option<bool> = None;
    for (i, tri) in t.tri().iter().enumerate() {
        let o = orient(samples.point(tri[0]), samples.point(tri[1]), samples.point(tri[2]));
        if o == 0.0 {
            continue;
        }
        match reference {
            None => reference = Some(o > 0.0),
            Some(ccw) if ccw != (o > 0.0) => {
                return Err(MeshError::InconsistentWinding { triangle: i });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::derive::{PartialTopology, finish_triangulation};

    fn build(tri: Vec<[usize; 3]>, n: usize) -> Triangulation {
        finish_triangulation(PartialTopology::new(tri, n), NonManifoldHandling::Ignore).unwrap()
    }

    #[test]
    fn derived_square_is_valid() {
        let t = build(vec![[0, 1, 2], [0, 2, 3]], 4);
        let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        validate_triangulation(&t, Some(&s), TopologyValidationOptions::all()).unwrap();
    }

    #[test]
    fn winding_flip_detected() {
        let t = build(vec![[0, 1, 2], [0, 3, 2]], 4);
        let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert_eq!(
            validate_triangulation(&t, Some(&s), TopologyValidationOptions::all()),
            Err(MeshError::InconsistentWinding { triangle: 1 })
        );
        // Without samples the winding check is skipped.
        validate_triangulation(&t, None, TopologyValidationOptions::all()).unwrap();
    }

    #[test]
    fn non_manifold_detected() {
        let t = build(vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]], 5);
        assert!(matches!(
            validate_triangulation(&t, None, TopologyValidationOptions::all()),
            Err(MeshError::NonManifoldEdge { a: 0, b: 1, incident_triangles: 3 })
        ));
        validate_triangulation(&t, None, TopologyValidationOptions::structural()).unwrap();
    }

    #[test]
    fn sample_count_must_match() {
        let t = build(vec![[0, 1, 2]], 3);
        let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert!(matches!(
            validate_triangulation(&t, Some(&s), TopologyValidationOptions::structural()),
            Err(MeshError::ShapeMismatch { array: "Vertices", expected: 4, found: 3 })
        ));
    }

    #[test]
    fn repeated_index_detection() {
        assert_eq!(repeated_index(&[0, 1, 2]), None);
        assert_eq!(repeated_index(&[0, 1, 0]), Some(0));
        assert_eq!(repeated_index(&[2, 1, 1]), Some(1));
    }
}
