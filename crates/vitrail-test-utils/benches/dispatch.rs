//! Benchmarks for visitor broadcast and loader-pool routing

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vitrail_pipeline::{NodeId, SurfaceId, Visitors};
use vitrail_test_utils::{CountingVisitor, MockRenderContext};
use vitrail_textures::{LoaderPool, PixelBuffer, PixelsLoader, Rgba8, TextureLoaders};

fn bench_visitor_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("visitor_broadcast");

    for visitor_count in [1, 4, 16] {
        group.throughput(Throughput::Elements(visitor_count as u64));

        let mut visitors = Visitors::new();
        for _ in 0..visitor_count {
            visitors.add(CountingVisitor::new());
        }
        let surface = SurfaceId::next();
        let node = NodeId::next();

        group.bench_with_input(
            BenchmarkId::new("full_pass", visitor_count),
            &visitor_count,
            |b, _| {
                b.iter(|| {
                    let mut pass = visitors.begin_surface(black_box(surface));
                    let mut node_pass = pass.begin_node(black_box(node));
                    node_pass.sync_deps();
                    node_pass.draw();
                    node_pass.finish();
                    pass.finish();
                });
            },
        );
    }

    group.finish();
}

fn bench_pool_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_routing");

    let context = Arc::new(MockRenderContext::new());
    let mut loaders = TextureLoaders::new();
    loaders.register("pixels", |context| Box::new(PixelsLoader::new(context)));
    let mut pool = LoaderPool::new(context);

    let buffer = PixelBuffer::solid(2, 2, Rgba8::new(255, 0, 0, 255));
    pool.load(&loaders, &buffer)
        .wait()
        .expect("mock upload cannot fail");

    group.bench_function("cache_hit_get", |b| {
        b.iter(|| pool.get(&loaders, black_box(&buffer)));
    });

    group.bench_function("join_settled_load", |b| {
        b.iter(|| pool.load(&loaders, black_box(&buffer)).wait());
    });

    group.finish();
}

criterion_group!(benches, bench_visitor_broadcast, bench_pool_routing);
criterion_main!(benches);
