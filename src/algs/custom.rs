//! Import of externally built triangulations.
//!
//! [`CustomTriangulation`] validates a caller-supplied triangle list against
//! its samples, checks the shape of any helper arrays supplied alongside it,
//! and derives the rest. Triangle rows can be copied from borrowed data
//! ([`CustomTriangulation::copied`]) or moved in without a copy
//! ([`CustomTriangulation::adopt`]); helper arrays are always moved in.
//!
//! Pairwise overlap between triangles is not checked. Running
//! [`validate_triangulation`](crate::topology::validation::validate_triangulation)
//! with `check_winding` catches fold-overs, but not every overlap.

use crate::geometry::polygon;
use crate::geometry::samples::PlanarSamples;
use crate::mesh_error::MeshError;
use crate::topology::derive::{PartialTopology, finish_triangulation};
use crate::topology::triangulation::Triangulation;
use crate::topology::validation::{NonManifoldHandling, repeated_index};
use serde::{Deserialize, Serialize};

/// Knobs for [`CustomTriangulation::build`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Handling of edges shared by more than two triangles when deriving
    /// neighbours.
    pub non_manifold: NonManifoldHandling,
}

/// Builder for a [`Triangulation`] from a supplied triangle list.
#[derive(Clone, Debug)]
pub struct CustomTriangulation<'a> {
    tri: Result<Vec<[usize; 3]>, MeshError>,
    samples: Option<&'a PlanarSamples>,
    vertices: Option<Vec<Vec<usize>>>,
    walk: Option<Vec<[Option<usize>; 3]>>,
    edges: Option<(Vec<[usize; 3]>, usize)>,
    options: ImportOptions,
}

impl<'a> CustomTriangulation<'a> {
    fn with_tri(tri: Result<Vec<[usize; 3]>, MeshError>) -> Self {
        Self {
            tri,
            samples: None,
            vertices: None,
            walk: None,
            edges: None,
            options: ImportOptions::default(),
        }
    }

    /// Copy triangle rows from borrowed data.
    ///
    /// Only the first three entries of each row are used. A shorter row is
    /// reported by [`build`](Self::build) as
    /// [`MeshError::DimensionMismatch`].
    pub fn copied<R: AsRef<[usize]>>(rows: &[R]) -> Self {
        let tri = rows
            .iter()
            .enumerate()
            .map(|(i, r)| match *r.as_ref() {
                [a, b, c, ..] => Ok([a, b, c]),
                ref short => Err(MeshError::DimensionMismatch {
                    triangle: i,
                    expected: 3,
                    found: short.len(),
                }),
            })
            .collect();
        Self::with_tri(tri)
    }

    /// Take ownership of a triangle list.
    pub fn adopt(tri: Vec<[usize; 3]>) -> Self {
        Self::with_tri(Ok(tri))
    }

    /// Point locations. Without samples every helper array must be supplied.
    pub fn samples(mut self, samples: &'a PlanarSamples) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Point → incident triangles.
    pub fn vertices(mut self, vertices: Vec<Vec<usize>>) -> Self {
        self.vertices = Some(vertices);
        self
    }

    /// Triangle → neighbour across each edge slot.
    pub fn walk(mut self, walk: Vec<[Option<usize>; 3]>) -> Self {
        self.walk = Some(walk);
        self
    }

    /// Triangle → global edge number of each slot, and the edge count.
    pub fn edges(mut self, edges: Vec<[usize; 3]>, num_edges: usize) -> Self {
        self.edges = Some((edges, num_edges));
        self
    }

    pub fn options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate and complete the triangulation.
    ///
    /// With samples, triangles are checked in this order, stopping at the
    /// first violation: row width, vertex index range, repeated vertices,
    /// and finally that every sample is used. Without samples, `vertices`,
    /// `walk` and `edges` must all be present and the point count is taken
    /// from `vertices`. Supplied helper arrays are then checked for shape.
    pub fn build(self) -> Result<Triangulation, MeshError> {
        let tri = self.tri?;

        let num_points = match self.samples {
            Some(s) => {
                check_triangles(&tri, s.len())?;
                s.len()
            }
            None => {
                let missing = [
                    ("Vertices", self.vertices.is_none()),
                    ("Walk", self.walk.is_none()),
                    ("Edges", self.edges.is_none()),
                ];
                if let Some(&(name, _)) = missing.iter().find(|(_, m)| *m) {
                    return Err(MeshError::MissingTopology(name));
                }
                self.vertices.as_ref().map_or(0, Vec::len)
            }
        };

        if let Some(v) = &self.vertices {
            if v.len() != num_points {
                return Err(MeshError::ShapeMismatch {
                    array: "Vertices",
                    expected: num_points,
                    found: v.len(),
                });
            }
        }
        if let Some(w) = &self.walk {
            check_walk(w, tri.len())?;
        }
        if let Some((e, num_edges)) = &self.edges {
            check_edges(e, *num_edges, tri.len())?;
        }

        log::debug!(
            "custom: {} triangles over {} points (supplied: vertices={}, walk={}, edges={})",
            tri.len(),
            num_points,
            self.vertices.is_some(),
            self.walk.is_some(),
            self.edges.is_some()
        );
        finish_triangulation(
            PartialTopology {
                tri,
                num_points,
                vertices: self.vertices,
                walk: self.walk,
                edges: self.edges,
            },
            self.options.non_manifold,
        )
    }
}

fn check_triangles(tri: &[[usize; 3]], num_samples: usize) -> Result<(), MeshError> {
    for (i, t) in tri.iter().enumerate() {
        if let Some((slot, &index)) = t.iter().enumerate().find(|&(_, &p)| p >= num_samples) {
            return Err(MeshError::IllegalVertexIndex {
                triangle: i,
                slot,
                index,
                num_samples,
            });
        }
    }
    for (i, t) in tri.iter().enumerate() {
        if let Some(index) = repeated_index(t) {
            return Err(MeshError::DegenerateTriangle { triangle: i, index });
        }
    }
    let mut used = vec![false; num_samples];
    for &p in tri.iter().flatten() {
        used[p] = true;
    }
    match used.iter().position(|&u| !u) {
        Some(index) => Err(MeshError::UncoveredSample { index }),
        None => Ok(()),
    }
}

fn check_walk(walk: &[[Option<usize>; 3]], num_triangles: usize) -> Result<(), MeshError> {
    if walk.len() != num_triangles {
        return Err(MeshError::ShapeMismatch {
            array: "Walk",
            expected: num_triangles,
            found: walk.len(),
        });
    }
    for (i, w) in walk.iter().enumerate() {
        for (slot, n) in w.iter().enumerate() {
            if let Some(n) = *n {
                if n >= num_triangles {
                    return Err(MeshError::IllegalNeighbor {
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

fn check_edges(edges: &[[usize; 3]], num_edges: usize, num_triangles: usize) -> Result<(), MeshError> {
    if edges.len() != num_triangles {
        return Err(MeshError::ShapeMismatch {
            array: "Edges",
            expected: num_triangles,
            found: edges.len(),
        });
    }
    for (i, e) in edges.iter().enumerate() {
        if let Some((slot, &edge)) = e.iter().enumerate().find(|&(_, &x)| x >= num_edges) {
            return Err(MeshError::IllegalEdgeNumber {
                triangle: i,
                slot,
                edge,
                num_edges,
            });
        }
    }
    Ok(())
}

impl Triangulation {
    /// Import `tri_rows` over `samples[axis][point]`, copying the rows and
    /// deriving every helper array.
    pub fn custom<S, T>(samples: &[S], tri_rows: &[T]) -> Result<Self, MeshError>
    where
        S: AsRef<[f32]>,
        T: AsRef<[usize]>,
    {
        let samples = PlanarSamples::from_rows(samples)?;
        CustomTriangulation::copied(tri_rows).samples(&samples).build()
    }

    /// Triangulate the region enclosed by a simple closed path
    /// `path[axis][i]`, using the path's own points as samples.
    ///
    /// Returns `Ok(None)` for paths of fewer than three points and for
    /// paths the ear clipper cannot cut completely.
    pub fn fill_polygon<R: AsRef<[f32]>>(path: &[R]) -> Result<Option<Self>, MeshError> {
        let Some(tri) = polygon::fill(path, true)? else {
            return Ok(None);
        };
        let samples = PlanarSamples::from_rows(path)?;
        if tri.len() + 2 != samples.len() {
            log::debug!(
                "fill_polygon: ear clipping produced {} of {} triangles",
                tri.len(),
                samples.len() - 2
            );
            return Ok(None);
        }
        CustomTriangulation::adopt(tri).samples(&samples).build().map(Some)
    }

    /// Triangulate a region bounded by several closed paths, such as an
    /// outline with holes.
    ///
    /// The paths are joined with [`polygon::link`]; the returned samples are
    /// the points of the joined path, which the triangulation indexes.
    /// Returns `Ok(None)` under the same conditions as
    /// [`Triangulation::fill_polygon`].
    pub fn fill_region<P, R>(paths: &[P]) -> Result<Option<(PlanarSamples, Self)>, MeshError>
    where
        P: AsRef<[R]>,
        R: AsRef<[f32]>,
    {
        let Some((linked, tri)) = polygon::fill_region(paths, true)? else {
            return Ok(None);
        };
        let samples = PlanarSamples::from_rows(&linked)?;
        if tri.len() + 2 != samples.len() {
            log::debug!(
                "fill_region: ear clipping produced {} of {} triangles",
                tri.len(),
                samples.len() - 2
            );
            return Ok(None);
        }
        let t = CustomTriangulation::adopt(tri).samples(&samples).build()?;
        Ok(Some((samples, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_row_is_dimension_mismatch() {
        let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let rows: Vec<Vec<usize>> = vec![vec![0, 1]];
        assert_eq!(
            CustomTriangulation::copied(&rows).samples(&s).build(),
            Err(MeshError::DimensionMismatch {
                triangle: 0,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn long_rows_use_first_three() {
        let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let rows = [[0usize, 1, 2, 7]];
        let t = CustomTriangulation::copied(&rows).samples(&s).build().unwrap();
        assert_eq!(t.tri(), &[[0, 1, 2]]);
    }

    #[test]
    fn degenerate_triangle_rejected() {
        let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(
            CustomTriangulation::adopt(vec![[0, 1, 1], [0, 1, 2]]).samples(&s).build(),
            Err(MeshError::DegenerateTriangle { triangle: 0, index: 1 })
        );
    }

    #[test]
    fn missing_topology_names_first_absent_array() {
        assert_eq!(
            CustomTriangulation::adopt(vec![[0, 1, 2]]).build(),
            Err(MeshError::MissingTopology("Vertices"))
        );
        assert_eq!(
            CustomTriangulation::adopt(vec![[0, 1, 2]])
                .vertices(vec![vec![0]; 3])
                .build(),
            Err(MeshError::MissingTopology("Walk"))
        );
        assert_eq!(
            CustomTriangulation::adopt(vec![[0, 1, 2]])
                .vertices(vec![vec![0]; 3])
                .walk(vec![[None; 3]])
                .build(),
            Err(MeshError::MissingTopology("Edges"))
        );
    }

    #[test]
    fn fill_polygon_square() {
        let path = [vec![0.0f32, 1.0, 1.0, 0.0], vec![0.0f32, 0.0, 1.0, 1.0]];
        let t = Triangulation::fill_polygon(&path).unwrap().unwrap();
        assert_eq!(t.num_triangles(), 2);
        assert_eq!(t.num_edges(), 5);
        assert_eq!(t.boundary_loop().unwrap().len(), 4);
    }
}
