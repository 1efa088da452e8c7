use std::fs;

use polytri::{deviation, Triangulator};

fn load_fixture(name: &str) -> (Vec<f64>, Vec<usize>) {
    type Rings = Vec<Vec<[f64; 2]>>;
    let path = format!("./tests/fixtures/{name}.json");
    let rings: Rings = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    let data = rings.iter().flatten().flatten().copied().collect();
    let hole_indices: Vec<usize> = rings
        .iter()
        .map(Vec::len)
        .scan(0, |sum, len| {
            *sum += len;
            Some(*sum)
        })
        .take(rings.len() - 1)
        .collect();
    (data, hole_indices)
}

fn check_fixture(name: &str, num_triangles: usize, max_deviation: f64) {
    let (data, hole_indices) = load_fixture(name);

    let mut engine = Triangulator::new();
    let mut triangles: Vec<usize> = Vec::new();
    engine.triangulate(&data, &hole_indices, 2, &mut triangles);

    assert_eq!(triangles.len() % 3, 0);
    assert_eq!(triangles.len(), num_triangles * 3, "{name}: triangle count");

    let num_vertices = data.len() / 2;
    assert!(triangles.iter().all(|&i| i < num_vertices));

    // emitted triangles never flip against the outer winding
    for t in triangles.chunks_exact(3) {
        let (ax, ay) = (data[t[0] * 2], data[t[0] * 2 + 1]);
        let (bx, by) = (data[t[1] * 2], data[t[1] * 2 + 1]);
        let (cx, cy) = (data[t[2] * 2], data[t[2] * 2 + 1]);
        let cross = (by - ay) * (cx - bx) - (bx - ax) * (cy - by);
        assert!(cross <= 0.0, "{name}: reversed triangle {t:?}");
    }

    if !triangles.is_empty() {
        let dev = deviation(&data, &hole_indices, 2, &triangles);
        assert!(dev <= max_deviation, "{name}: deviation {dev}");
    }
}

#[test]
fn fixture_star() {
    // 200 vertices, so this one runs through the z-order hash path
    check_fixture("star", 198, 1e-9);
}

#[test]
fn fixture_comb() {
    check_fixture("comb", 24, 1e-12);
}

#[test]
fn fixture_annulus() {
    check_fixture("annulus", 18, 1e-12);
}
