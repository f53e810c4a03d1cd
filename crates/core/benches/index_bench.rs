use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use picket::{BoundingBox, Coordinate, Feature, Fence, GeometryKind, HilbertRTree, IndexConfig, Polygon, Properties, Ring};
use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

/// Square cells of `size` degrees on an `n` x `n` grid spread over the globe.
fn gen_grid_boxes(n: usize, size: f64) -> Vec<BoundingBox> {
    let lat_step = 170.0 / n as f64;
    let lon_step = 350.0 / n as f64;
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let lat = -85.0 + y as f64 * lat_step;
            let lon = -175.0 + x as f64 * lon_step;
            let min = Coordinate::new(lat, lon);
            let max = Coordinate::new(lat + size, lon + size);
            out.push(BoundingBox::new(min, max).unwrap());
        }
    }
    out
}

fn to_rstar_rects(boxes: &[BoundingBox]) -> Vec<Rectangle<[f64; 2]>> {
    boxes
        .iter()
        .map(|b| Rectangle::from_corners([b.min().lon(), b.min().lat()], [b.max().lon(), b.max().lat()]))
        .collect()
}

fn square_feature(b: &BoundingBox) -> Feature {
    let (min, max) = (b.min(), b.max());
    let ring: Ring = [
        (min.lat(), min.lon()),
        (min.lat(), max.lon()),
        (max.lat(), max.lon()),
        (max.lat(), min.lon()),
    ]
    .into_iter()
    .map(|(lat, lon)| Coordinate::new(lat, lon))
    .collect();
    Feature::new(GeometryKind::Polygon, vec![Polygon::from_exterior(ring)], Properties::new())
}

fn bench_build_and_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("hilbert_rtree_vs_rstar");
    for &n in &[64usize, 128] {
        let boxes = gen_grid_boxes(n, 0.5);
        let query = BoundingBox::new(Coordinate::new(-10.0, -20.0), Coordinate::new(10.0, 20.0)).unwrap();
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(BenchmarkId::new("hilbert_build_query", n), |b| {
            b.iter_batched(
                || HilbertRTree::<usize>::new(IndexConfig::default()).unwrap(),
                |mut tree| {
                    for (i, bbox) in boxes.iter().enumerate() {
                        tree.insert(*bbox, i);
                    }
                    black_box(tree.search(&query).len());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("rstar_build_query", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&boxes),
                |rects| {
                    let mut tree = RTree::new();
                    for r in rects {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(
                        [query.min().lon(), query.min().lat()],
                        [query.max().lon(), query.max().lat()],
                    );
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_fence_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fence_search");
    let boxes = gen_grid_boxes(256, 0.5);
    let mut fence = Fence::default();
    for b in &boxes {
        fence.add(square_feature(b));
    }

    for &tolerance in &[1.0, 1_000.0, 100_000.0] {
        group.bench_function(BenchmarkId::new("search", tolerance), |b| {
            let mut i = 0usize;
            b.iter(|| {
                let bbox = &boxes[i % boxes.len()];
                i = i.wrapping_add(7919);
                let point = Coordinate::new(bbox.min().lat() + 0.25, bbox.min().lon() + 0.25);
                black_box(fence.search(black_box(point), tolerance).len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_and_query, bench_fence_search);
criterion_main!(benches);
