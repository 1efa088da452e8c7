use std::fs;

use criterion::{criterion_group, criterion_main, Criterion};

use polytri::Triangulator;

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

fn bench(c: &mut Criterion) {
    let mut engine = Triangulator::new();
    let mut triangles: Vec<usize> = Vec::new();

    c.bench_function("star", |b| {
        let (data, hole_indices) = load_fixture("star");
        b.iter(|| {
            engine.triangulate(&data, &hole_indices, 2, &mut triangles);
        })
    });

    c.bench_function("comb", |b| {
        let (data, hole_indices) = load_fixture("comb");
        b.iter(|| {
            engine.triangulate(&data, &hole_indices, 2, &mut triangles);
        })
    });

    c.bench_function("annulus", |b| {
        let (data, hole_indices) = load_fixture("annulus");
        b.iter(|| {
            engine.triangulate(&data, &hole_indices, 2, &mut triangles);
        })
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
