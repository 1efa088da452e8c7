use polytri::{deviation, flatten, triangulate, Triangulator};

#[test]
fn empty_input() {
    let data: [f64; 0] = [];
    let triangles: Vec<u32> = triangulate(&data, &[], 2);
    assert!(triangles.is_empty());
    assert_eq!(deviation(&data, &[] as &[u32], 2, &triangles), 0.0);
}

#[test]
fn single_point() {
    let triangles: Vec<u32> = triangulate(&[100.0, 200.0], &[], 2);
    assert!(triangles.is_empty());
}

#[test]
fn two_points() {
    let triangles: Vec<u32> = triangulate(&[0.0, 0.0, 100.0, 200.0], &[], 2);
    assert!(triangles.is_empty());
}

#[test]
fn quad_indices() {
    let data = [10.0, 0.0, 0.0, 50.0, 60.0, 60.0, 70.0, 10.0];
    let triangles: Vec<u32> = triangulate(&data, &[], 2);
    assert_eq!(triangles, vec![1, 0, 3, 3, 2, 1]);
    assert_eq!(deviation(&data, &[] as &[u32], 2, &triangles), 0.0);
}

#[test]
fn quad_indices_3d() {
    let data = [
        10.0, 0.0, 0.0, 0.0, 50.0, 0.0, 60.0, 60.0, 0.0, 70.0, 10.0, 0.0,
    ];
    let triangles: Vec<u32> = triangulate(&data, &[], 3);
    assert_eq!(triangles, vec![1, 0, 3, 3, 2, 1]);
    assert_eq!(deviation(&data, &[] as &[u32], 3, &triangles), 0.0);
}

#[test]
fn dim_zero_defaults_to_two() {
    let data = [10.0, 0.0, 0.0, 50.0, 60.0, 60.0, 70.0, 10.0];
    let triangles: Vec<u32> = triangulate(&data, &[], 0);
    assert_eq!(triangles, vec![1, 0, 3, 3, 2, 1]);
}

#[test]
fn square() {
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let triangles: Vec<u32> = triangulate(&data, &[], 2);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
    assert_eq!(deviation(&data, &[] as &[u32], 2, &triangles), 0.0);
}

#[test]
fn square_u16_indices() {
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let triangles: Vec<u16> = triangulate(&data, &[], 2);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
}

#[test]
fn square_usize_indices() {
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let triangles: Vec<usize> = triangulate(&data, &[], 2);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
}

#[test]
fn square_f32() {
    let data = [0.0_f32, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let triangles: Vec<u32> = triangulate(&data, &[], 2);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
}

// rectilinear building footprint with collinear runs along its walls
const BUILDING: [f64; 30] = [
    661.0, 112.0, 661.0, 96.0, 666.0, 96.0, 666.0, 87.0, 743.0, 87.0, 771.0, 87.0, 771.0, 114.0,
    750.0, 114.0, 750.0, 113.0, 742.0, 113.0, 742.0, 106.0, 710.0, 106.0, 710.0, 113.0, 666.0,
    113.0, 666.0, 112.0,
];

#[test]
fn building_footprint() {
    let triangles: Vec<u32> = triangulate(&BUILDING, &[], 2);
    assert_eq!(triangles.len(), 39);
    assert_eq!(deviation(&BUILDING, &[] as &[u32], 2, &triangles), 0.0);
}

#[test]
fn scaling_and_translation_keep_the_triangulation() {
    let moved: Vec<f64> = BUILDING
        .iter()
        .enumerate()
        .map(|(k, &v)| {
            if k % 2 == 0 {
                v * 2.5 + 1000.0
            } else {
                v * 2.5 - 500.0
            }
        })
        .collect();
    let original: Vec<u32> = triangulate(&BUILDING, &[], 2);
    let transformed: Vec<u32> = triangulate(&moved, &[], 2);
    assert_eq!(transformed.len(), original.len());
    assert!(deviation(&moved, &[] as &[u32], 2, &transformed) < 1e-9);
}

#[test]
fn reversed_outer_ring_keeps_the_triangulation() {
    let reversed: Vec<f64> = BUILDING.chunks(2).rev().flatten().copied().collect();
    let original: Vec<u32> = triangulate(&BUILDING, &[], 2);
    let flipped: Vec<u32> = triangulate(&reversed, &[], 2);
    assert_eq!(flipped.len(), original.len());
    assert!(deviation(&reversed, &[] as &[u32], 2, &flipped) < 1e-9);
}

#[test]
fn polygon_with_hole_and_duplicate_vertex() {
    let data = [
        120.0, 2031.0, 92.0, 2368.0, 94.0, 2200.0, 33.0, 2119.0, 42.0, 2112.0, 53.0, 2068.0,
        44.0, 2104.0, 79.0, 2132.0, 88.0, 2115.0, 44.0, 2104.0,
    ];
    let triangles: Vec<u32> = triangulate(&data, &[6u32], 2);
    assert_eq!(triangles.len(), 24);
}

#[test]
fn steiner_point_holes() {
    let data = [
        0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0, 50.0, 50.0, 30.0, 40.0, 70.0, 60.0,
        20.0, 70.0,
    ];
    let triangles: Vec<u32> = triangulate(&data, &[4u32, 5, 6, 7], 2);
    assert_eq!(triangles.len(), 27);
    assert!(deviation(&data, &[4u32, 5, 6, 7], 2, &triangles) < 1e-12);
}

#[test]
fn self_touching_input_terminates() {
    let data = [
        1.0, 2.0, 2.0, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 2.0, 4.0, 1.0, 5.0, 1.0, 3.0, 2.0, 4.0,
        2.0, 4.0, 1.0,
    ];
    let triangles: Vec<u32> = triangulate(&data, &[5u32], 2);
    assert_eq!(triangles.len() % 3, 0);
}

#[test]
fn hole_range_collapsing_to_nothing() {
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0];
    let triangles: Vec<u32> = triangulate(&data, &[3u32], 2);
    assert_eq!(triangles.len(), 3);
    assert_eq!(deviation(&data, &[3u32], 2, &triangles), 0.0);
}

#[test]
fn steiner_point_inside_triangle() {
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 50.0, 30.0];
    let triangles: Vec<u32> = triangulate(&data, &[3u32], 2);
    assert_eq!(triangles.len(), 3 * 3);
    assert_eq!(deviation(&data, &[3u32], 2, &triangles), 0.0);
}

#[test]
fn steiner_segment_inside_triangle() {
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 50.0, 30.0, 60.0, 30.0];
    let triangles: Vec<u32> = triangulate(&data, &[3u32], 2);
    assert_eq!(triangles.len(), 5 * 3);
    assert_eq!(deviation(&data, &[3u32], 2, &triangles), 0.0);
}

#[test]
fn square_with_square_hole() {
    let data = [
        0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0, 10.0, 10.0, 90.0, 10.0, 90.0, 90.0,
        10.0, 90.0,
    ];
    let triangles: Vec<u32> = triangulate(&data, &[4u32], 2);
    assert_eq!(triangles.len(), 24);
    assert_eq!(deviation(&data, &[4u32], 2, &triangles), 0.0);
}

#[test]
fn engine_reuse_clears_previous_output() {
    let mut engine = Triangulator::new();
    let mut triangles: Vec<u32> = Vec::new();

    let square = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    engine.triangulate(&square, &[], 2, &mut triangles);
    assert_eq!(triangles.len(), 6);

    let quad = [10.0, 0.0, 0.0, 50.0, 60.0, 60.0, 70.0, 10.0];
    engine.triangulate(&quad, &[], 2, &mut triangles);
    assert_eq!(triangles, vec![1, 0, 3, 3, 2, 1]);
}

#[test]
fn flatten_nested_rings() {
    let rings = vec![
        vec![
            vec![0.0, 0.0],
            vec![100.0, 0.0],
            vec![100.0, 100.0],
            vec![0.0, 100.0],
        ],
        vec![
            vec![10.0, 10.0],
            vec![90.0, 10.0],
            vec![90.0, 90.0],
            vec![10.0, 90.0],
        ],
    ];
    let (data, holes, dim) = flatten(&rings);
    assert_eq!(dim, 2);
    assert_eq!(holes, vec![4]);
    assert_eq!(data.len(), 16);

    let triangles: Vec<usize> = triangulate(&data, &holes, dim);
    assert_eq!(triangles.len(), 24);
    assert_eq!(deviation(&data, &holes, dim, &triangles), 0.0);
}

#[test]
fn flatten_empty() {
    let rings: Vec<Vec<Vec<f64>>> = Vec::new();
    let (data, holes, dim) = flatten(&rings);
    assert!(data.is_empty());
    assert!(holes.is_empty());
    assert_eq!(dim, 0);
}
