//! Example demonstrating observed texture loading and channel merging.
//!
//! This example shows how to:
//! - Register texture loaders and route inputs through a LoaderPool
//! - Observe draw passes with CountingVisitor and TraceVisitor
//! - Merge three pixel buffers into one RGB texture
//!
//! Run with: cargo run -p vitrail-test-utils --example merge_channels

use std::sync::Arc;

use vitrail_pipeline::{NodeId, SurfaceId, TraceVisitor, Visitors};
use vitrail_test_utils::{CountingVisitor, MockRenderContext, fixtures};
use vitrail_textures::{LoaderPool, PixelBuffer, PixelsLoader, Rgba8, TextureLoaders};

fn main() {
    vitrail_core::logging::init();

    println!("=== Example 1: Loading pixel buffers through a pool ===\n");

    let context = Arc::new(MockRenderContext::new());
    let mut loaders = TextureLoaders::new();
    loaders.register("pixels", |context| Box::new(PixelsLoader::new(context)));
    let mut pool = LoaderPool::new(context.clone());

    let red = PixelBuffer::solid(3, 3, Rgba8::new(255, 0, 0, 255));
    let white = fixtures::white3x3();
    let yellow = fixtures::yellow3x3();

    let channels = [&white, &yellow, &red];
    let loads: Vec<_> = channels
        .iter()
        .map(|buffer| pool.load(&loaders, *buffer))
        .collect();
    for (load, buffer) in loads.iter().zip(&channels) {
        let texture = load.wait().expect("mock upload cannot fail");
        println!(
            "uploaded {}x{} buffer as mock texture {:?}",
            buffer.width(),
            buffer.height(),
            texture.mock_id()
        );
    }
    println!("context calls so far: {}\n", context.call_count());

    println!("=== Example 2: Observing a draw pass ===\n");

    let counter = CountingVisitor::new();
    let mut visitors = Visitors::new();
    visitors.add(counter.clone());
    visitors.add(TraceVisitor);

    let surface = SurfaceId::next();
    let node = NodeId::next();
    let mut pass = visitors.begin_surface(surface);
    let mut node_pass = pass.begin_node(node);
    node_pass.sync_deps();
    node_pass.draw();
    node_pass.finish();
    pass.finish();

    let totals = counter.totals();
    println!("surface draws started: {}", totals.surface_draw_start);
    println!("node draws: {}", totals.node_draw);
    println!("draws for {:?}: {}\n", node, counter.node(node).draw);

    println!("=== Example 3: Merging channels ===\n");

    // each source contributes its luminance to one output channel
    let merged = fixtures::merge_channels(&white, &yellow, &red);
    let corner = merged.pixel(0, 0);
    println!(
        "merged pixel at (0, 0): r={} g={} b={} a={}",
        corner.r, corner.g, corner.b, corner.a
    );

    let texture = pool
        .load(&loaders, &merged)
        .wait()
        .expect("mock upload cannot fail");
    println!(
        "merged texture: {:?} ({}x{})",
        texture.mock_id(),
        texture.width(),
        texture.height()
    );
    println!("\ntextures created: {}", context.count_texture_creates());
}
