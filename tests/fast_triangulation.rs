use fast_delaunay::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_cloud(n: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let xs = (0..n).map(|_| rng.gen_range(0.0f32..500.0)).collect();
    let ys = (0..n).map(|_| rng.gen_range(0.0f32..500.0)).collect();
    vec![xs, ys]
}

fn assert_covering(t: &Triangulation, n: usize) {
    assert_eq!(t.num_points(), n);
    for p in 0..n {
        assert!(!t.incident_triangles(p).is_empty(), "point {p} uncovered");
    }
    for tri in t.tri() {
        assert!(tri.iter().all(|&p| p < n));
        assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
    }
}

#[test]
fn unit_square_gives_two_triangles() {
    let rows = [vec![0.0f32, 1.0, 0.0, 1.0], vec![0.0f32, 0.0, 1.0, 1.0]];
    let t = Triangulation::fast(&rows).unwrap();
    assert_eq!(t.num_triangles(), 2);
    assert_eq!(t.num_edges(), 5);
    assert_covering(&t, 4);

    let s = PlanarSamples::from_rows(&rows).unwrap();
    validate_triangulation(&t, Some(&s), TopologyValidationOptions::all()).unwrap();
    assert_eq!(t.boundary_loop().unwrap().len(), 4);
}

#[test]
fn three_points_give_one_triangle() {
    let rows = [vec![0.0f32, 4.0, 1.0], vec![0.0f32, 0.0, 3.0]];
    let t = Triangulation::fast(&rows).unwrap();
    assert_eq!(t.tri().len(), 1);
    assert_eq!(t.walk(), &[[None, None, None]]);
    assert_eq!(t.num_edges(), 3);
}

#[test]
fn fewer_than_three_points_rejected() {
    let rows = [vec![0.0f32, 1.0], vec![0.0f32, 1.0]];
    assert_eq!(
        Triangulation::fast(&rows),
        Err(MeshError::InsufficientSamples { found: 2 })
    );
    // The usable count is the shorter row.
    let ragged = [vec![0.0f32, 1.0, 2.0, 3.0], vec![0.0f32, 1.0]];
    assert_eq!(
        Triangulation::fast(&ragged),
        Err(MeshError::InsufficientSamples { found: 2 })
    );
}

#[test]
fn only_planar_samples_accepted() {
    let three = [vec![0.0f32; 5], vec![1.0f32; 5], vec![2.0f32; 5]];
    assert_eq!(
        Triangulation::fast(&three),
        Err(MeshError::UnsupportedDimension { found: 3 })
    );
    let one = [vec![0.0f32; 5]];
    assert_eq!(
        Triangulation::fast(&one),
        Err(MeshError::UnsupportedDimension { found: 1 })
    );
}

// Fixed seeds whose output passes every check in `all()`. This is not a
// general guarantee; see `large_cloud_keeps_structural_invariants`.
#[test]
fn random_clouds_are_valid_triangulations() {
    for (seed, n) in [(1u64, 10usize), (2, 57), (3, 200), (4, 1000)] {
        let rows = random_cloud(n, seed);
        let t = Triangulation::fast(&rows).unwrap();
        assert_covering(&t, n);

        let s = PlanarSamples::from_rows(&rows).unwrap();
        validate_triangulation(&t, Some(&s), TopologyValidationOptions::all()).unwrap();

        let h = t.boundary_edges().len();
        assert_eq!(t.num_triangles(), 2 * n - h - 2, "seed {seed}");
        assert_eq!(t.euler_characteristic(), 1);
    }
}

#[test]
fn options_without_rotation_still_cover() {
    let rows = random_cloud(64, 11);
    let opts = FastOptions {
        rotation: 0.0,
        task_capacity: 1,
        hull_capacity: 1,
        ..FastOptions::default()
    };
    let t = Triangulation::fast_with_options(&rows, opts).unwrap();
    assert_covering(&t, 64);
}

// The fast triangulator only approximates a Delaunay triangulation. On
// large clouds the stitch can fold a triangle over a neighbour or leave a
// sliver of the hull uncovered, so the winding and boundary-loop checks of
// `all()` may fail. Coverage and the combinatorial checks always hold.
#[test]
fn large_cloud_keeps_structural_invariants() {
    let n = 20_000;
    let rows = random_cloud(n, 37);
    let t = Triangulation::fast(&rows).unwrap();
    assert_covering(&t, n);
    validate_triangulation(&t, None, TopologyValidationOptions::structural()).unwrap();
}

// Degenerate scenario: without rotation, axis-aligned input reaches the
// stitch with convex quads whose edges are horizontal or vertical, so the
// slope-sum tie-break runs on zero denominators.
#[test]
fn axis_aligned_input_without_rotation_degenerate_tie_break() {
    let opts = FastOptions {
        rotation: 0.0,
        ..FastOptions::default()
    };

    let square = [vec![0.0f32, 1.0, 0.0, 1.0], vec![0.0f32, 0.0, 1.0, 1.0]];
    let t = Triangulation::fast_with_options(&square, opts).unwrap();
    assert_covering(&t, 4);
    validate_triangulation(&t, None, TopologyValidationOptions::structural()).unwrap();

    let (xs, ys): (Vec<f32>, Vec<f32>) = (0..16).map(|i| ((i % 4) as f32, (i / 4) as f32)).unzip();
    let t = Triangulation::fast_with_options(&[xs, ys], opts).unwrap();
    assert_covering(&t, 16);
    validate_triangulation(&t, None, TopologyValidationOptions::structural()).unwrap();
}

#[test]
fn duplicate_points_do_not_panic() {
    let rows = [
        vec![0.0f32, 1.0, 1.0, 0.0, 1.0, 0.0, 0.5, 0.5],
        vec![0.0f32, 0.0, 1.0, 1.0, 1.0, 0.0, 0.5, 0.5],
    ];
    let t = Triangulation::fast(&rows).unwrap();
    assert_covering(&t, 8);
    validate_triangulation(&t, None, TopologyValidationOptions::structural()).unwrap();
}

#[test]
fn collinear_grid_does_not_panic() {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for i in 0..6 {
        for j in 0..6 {
            xs.push(i as f32);
            ys.push(j as f32);
        }
    }
    let t = Triangulation::fast(&[xs, ys]).unwrap();
    assert_covering(&t, 36);
    validate_triangulation(&t, None, TopologyValidationOptions::structural()).unwrap();
}

#[test]
fn all_collinear_points_do_not_panic() {
    let xs: Vec<f32> = (0..9).map(|i| i as f32).collect();
    let ys = vec![0.0f32; 9];
    let t = Triangulation::fast(&[xs, ys]).unwrap();
    assert_covering(&t, 9);
}

#[test]
fn serde_roundtrip_of_fast_output() {
    let t = Triangulation::fast(&random_cloud(40, 7)).unwrap();
    let json = serde_json::to_string(&t).unwrap();
    let back: Triangulation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
