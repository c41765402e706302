use fast_delaunay::geometry::predicates::orient;
use fast_delaunay::prelude::*;

fn l_shape() -> Vec<Vec<f32>> {
    vec![
        vec![0.0, 2.0, 2.0, 1.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0],
    ]
}

fn frame() -> [Vec<Vec<f32>>; 2] {
    let outer = vec![vec![0.0, 4.0, 4.0, 0.0], vec![0.0, 0.0, 4.0, 4.0]];
    let hole = vec![vec![1.0, 3.0, 3.0, 1.0], vec![1.0, 1.0, 3.0, 3.0]];
    [outer, hole]
}

fn triangle_area(s: &PlanarSamples, t: [usize; 3]) -> f32 {
    0.5 * orient(s.point(t[0]), s.point(t[1]), s.point(t[2])).abs()
}

#[test]
fn l_shape_area_and_fill() {
    let path = l_shape();
    assert!(!check_self_intersection(&path).unwrap());
    assert!((polygon_area(&path).unwrap() - 3.0).abs() < 1e-6);

    let tris = fill(&path, true).unwrap().unwrap();
    assert_eq!(tris.len(), 4);
    let s = PlanarSamples::from_rows(&path).unwrap();
    let covered: f32 = tris.iter().map(|&t| triangle_area(&s, t)).sum();
    assert!((covered - 3.0).abs() < 1e-5);
}

#[test]
fn fill_of_clockwise_path() {
    let mut path = l_shape();
    path[0].reverse();
    path[1].reverse();
    let tris = fill(&path, true).unwrap().unwrap();
    assert_eq!(tris.len(), 4);
    let s = PlanarSamples::from_rows(&path).unwrap();
    let covered: f32 = tris.iter().map(|&t| triangle_area(&s, t)).sum();
    assert!((covered - 3.0).abs() < 1e-5);
}

#[test]
fn inside_l_shape() {
    let path = l_shape();
    assert!(inside(&path, 0.5, 0.5).unwrap());
    assert!(inside(&path, 0.5, 1.5).unwrap());
    assert!(inside(&path, 1.5, 0.5).unwrap());
    // The notch.
    assert!(!inside(&path, 1.5, 1.5).unwrap());
    assert!(!inside(&path, -1.0, 0.5).unwrap());
}

#[test]
fn self_intersecting_path() {
    let bowtie = vec![vec![0.0f32, 2.0, 2.0, 0.0], vec![0.0f32, 2.0, 0.0, 2.0]];
    assert!(check_self_intersection(&bowtie).unwrap());
    assert_eq!(polygon_area(&bowtie), Err(MeshError::PathSelfIntersects));
    assert_eq!(fill(&bowtie, true), Err(MeshError::PathSelfIntersects));
    assert_eq!(
        Triangulation::fill_polygon(&bowtie).map(|t| t.is_some()),
        Err(MeshError::PathSelfIntersects)
    );
}

#[test]
fn bad_path_dimensions() {
    let one_row = vec![vec![0.0f32, 1.0, 2.0]];
    assert_eq!(inside(&one_row, 0.0, 0.0), Err(MeshError::BadPathDimensions));
    assert_eq!(fill(&one_row, false), Err(MeshError::BadPathDimensions));
}

#[test]
fn clip_triangle_keeps_three_eighths() {
    let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    let clipped = clip_half_plane(&s, &[[0, 1, 2]], 1.0, 0.0, 0.5).unwrap();
    let area: f32 = clipped
        .triangles
        .iter()
        .map(|&t| triangle_area(&clipped.samples, t))
        .sum();
    assert!((area - 0.375).abs() < 1e-6);
}

#[test]
fn clip_fast_triangulated_square() {
    let rows = [vec![0.0f32, 1.0, 0.0, 1.0], vec![0.0f32, 0.0, 1.0, 1.0]];
    let s = PlanarSamples::from_rows(&rows).unwrap();
    let t = Triangulation::fast(&rows).unwrap();

    // Keep y <= 0.25.
    let clipped = clip_half_plane(&s, t.tri(), 0.0, 1.0, 0.25).unwrap();
    let area: f32 = clipped
        .triangles
        .iter()
        .map(|&t| triangle_area(&clipped.samples, t))
        .sum();
    assert!((area - 0.25).abs() < 1e-5);

    // The clipped pieces import as a valid mesh.
    let again = CustomTriangulation::adopt(clipped.triangles.clone())
        .samples(&clipped.samples)
        .build()
        .unwrap();
    validate_triangulation(&again, Some(&clipped.samples), TopologyValidationOptions::all()).unwrap();
}

#[test]
fn clip_everything_away() {
    let s = PlanarSamples::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    assert!(clip_half_plane(&s, &[[0, 1, 2]], 0.0, 1.0, -5.0).is_none());
}

#[test]
fn region_with_hole_area() {
    let [outer, hole] = frame();
    assert!((region_area(&[outer.clone(), hole.clone()]).unwrap() - 12.0).abs() < 1e-2);
    // Order and orientation of the paths do not matter.
    let reversed = vec![
        hole[0].iter().rev().copied().collect::<Vec<f32>>(),
        hole[1].iter().rev().copied().collect::<Vec<f32>>(),
    ];
    assert!((region_area(&[hole, outer.clone()]).unwrap() - 12.0).abs() < 1e-2);
    assert!((region_area(&[outer, reversed]).unwrap() - 12.0).abs() < 1e-2);
}

#[test]
fn linked_frame_excludes_hole() {
    let linked = link(&frame()).unwrap().unwrap();
    assert_eq!(linked[0].len(), 10);
    assert!(!check_self_intersection(&linked).unwrap());
    assert!(!inside(&linked, 2.0, 2.0).unwrap());
    assert!(inside(&linked, 0.5, 2.0).unwrap());
    assert!(inside(&linked, 3.5, 3.5).unwrap());
}

#[test]
fn fill_region_with_hole() {
    let (linked, tris) = fill_region(&frame(), true).unwrap().unwrap();
    assert_eq!(tris.len(), linked[0].len() - 2);
    let s = PlanarSamples::from_rows(&linked).unwrap();
    let covered: f32 = tris.iter().map(|&t| triangle_area(&s, t)).sum();
    assert!((covered - 12.0).abs() < 1e-2);

    let (samples, t) = Triangulation::fill_region(&frame()).unwrap().unwrap();
    assert_eq!(samples, s);
    assert_eq!(t.num_triangles(), 8);
    assert_eq!(t.boundary_loop().unwrap().len(), 10);
    validate_triangulation(&t, Some(&samples), TopologyValidationOptions::structural()).unwrap();
}

#[test]
fn region_paths_checked() {
    let bowtie = vec![vec![0.0f32, 2.0, 2.0, 0.0], vec![0.0f32, 2.0, 0.0, 2.0]];
    let [outer, _] = frame();
    assert_eq!(region_area(&[outer, bowtie]), Err(MeshError::PathSelfIntersects));

    let ragged = vec![vec![0.0f32, 1.0, 1.0], vec![0.0f32, 1.0]];
    assert_eq!(fill_region(&[ragged], true), Err(MeshError::BadPathDimensions));

    let empty: [Vec<Vec<f32>>; 0] = [];
    assert_eq!(region_area(&empty).unwrap(), 0.0);
    assert_eq!(fill_region(&empty, true).unwrap(), None);
}

#[test]
fn repeated_points_are_cleaned_before_linking() {
    let [outer, hole] = frame();
    let mut doubled = outer.clone();
    doubled[0].insert(2, 4.0);
    doubled[1].insert(2, 0.0);
    let mut path = doubled.clone();
    assert!(!check_and_fix_self_intersection(&mut path).unwrap());
    assert_eq!(path, outer);
    assert_eq!(link(&[doubled, hole.clone()]).unwrap(), link(&[outer, hole]).unwrap());
}
