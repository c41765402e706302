use fast_delaunay::prelude::*;

// Two squares side by side: points 0..6, triangles sharing edges (1, 4)
// and the two diagonals.
//
//   3---4---5
//   | / | / |
//   0---1---2
fn strip() -> (PlanarSamples, Triangulation) {
    let s = PlanarSamples::from_points(&[
        [0.0, 0.0],
        [1.0, 0.0],
        [2.0, 0.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [2.0, 1.0],
    ]);
    let tri = vec![[0, 1, 4], [0, 4, 3], [1, 2, 5], [1, 5, 4]];
    let t = CustomTriangulation::adopt(tri).samples(&s).build().unwrap();
    (s, t)
}

fn rebuild_without_samples(
    tri: Vec<[usize; 3]>,
    vertices: Vec<Vec<usize>>,
    walk: Vec<[Option<usize>; 3]>,
    edges: Vec<[usize; 3]>,
    num_edges: usize,
) -> Triangulation {
    CustomTriangulation::adopt(tri)
        .vertices(vertices)
        .walk(walk)
        .edges(edges, num_edges)
        .build()
        .unwrap()
}

#[test]
fn strip_passes_every_check() {
    let (s, t) = strip();
    validate_triangulation(&t, Some(&s), TopologyValidationOptions::all()).unwrap();
    assert_eq!(t.num_edges(), 9);
    assert_eq!(t.boundary_edges().len(), 6);
    assert_eq!(t.euler_characteristic(), 1);
    assert_eq!(t.incident_triangles(1), &[0, 2, 3]);
    assert_eq!(t.incident_triangles(4), &[0, 1, 3]);
}

#[test]
fn asymmetric_walk_detected() {
    let (_, t) = strip();
    let (tri, vertices, mut walk, edges, num_edges) = t.into_parts();
    // Triangle 1 forgets its neighbour across (0, 4).
    let slot = walk[1].iter().position(|n| *n == Some(0)).unwrap();
    walk[1][slot] = None;
    let broken = rebuild_without_samples(tri, vertices, walk, edges, num_edges);
    assert!(matches!(
        validate_triangulation(&broken, None, TopologyValidationOptions::all()),
        Err(MeshError::AsymmetricWalk { triangle: 0, neighbor: 1, .. })
    ));
}

#[test]
fn incidence_mismatch_detected() {
    let (_, t) = strip();
    let (tri, mut vertices, walk, edges, num_edges) = t.into_parts();
    vertices[2].push(0);
    let broken = rebuild_without_samples(tri, vertices, walk, edges, num_edges);
    assert_eq!(
        validate_triangulation(&broken, None, TopologyValidationOptions::all()),
        Err(MeshError::IncidenceMismatch { point: 2, triangle: 0 })
    );
}

#[test]
fn uncovered_point_detected() {
    let (_, t) = strip();
    let (tri, mut vertices, walk, edges, num_edges) = t.into_parts();
    vertices.push(Vec::new());
    let broken = rebuild_without_samples(tri, vertices, walk, edges, num_edges);
    assert_eq!(
        validate_triangulation(&broken, None, TopologyValidationOptions::all()),
        Err(MeshError::UncoveredSample { index: 6 })
    );
}

#[test]
fn split_edge_number_detected() {
    let (_, t) = strip();
    let (tri, vertices, walk, mut edges, num_edges) = t.into_parts();
    // Give one side of the shared edge (1, 4) its own number.
    let slot = (0..3).find(|&j| walk[0][j] == Some(3)).unwrap();
    edges[0][slot] = (edges[0][slot] + 1) % num_edges;
    let broken = rebuild_without_samples(tri, vertices, walk, edges, num_edges);
    assert!(matches!(
        validate_triangulation(&broken, None, TopologyValidationOptions::all()),
        Err(MeshError::EdgeNumberMismatch { .. })
    ));
}

#[test]
fn inflated_edge_count_detected() {
    let (_, t) = strip();
    let (tri, vertices, walk, edges, num_edges) = t.into_parts();
    let broken = rebuild_without_samples(tri, vertices, walk, edges, num_edges + 1);
    assert!(matches!(
        validate_triangulation(&broken, None, TopologyValidationOptions::all()),
        Err(MeshError::EdgeNumberMismatch { .. })
    ));
    // The structural options still check numbering.
    assert!(validate_triangulation(&broken, None, TopologyValidationOptions::structural()).is_err());
}

#[test]
fn boundary_loop_follows_hull() {
    let (_, t) = strip();
    let lp = t.boundary_loop().unwrap();
    assert_eq!(lp.len(), 6);
    let mut sorted = lp.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn debug_invariants_accept_valid_mesh() {
    let (_, t) = strip();
    t.validate_invariants().unwrap();
    t.debug_assert_invariants();
}
