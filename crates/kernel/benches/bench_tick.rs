use std::hint::black_box;
use std::time::Instant;

use ballpit_kernel::{Boundary, IntRange, PhysicsWorld, WorldConfig};

fn make_world(body_count: u32, boundary: Boundary) -> PhysicsWorld {
    let config = WorldConfig {
        boundary,
        body_count: IntRange::new(body_count, body_count),
        seed: Some(42),
        ..WorldConfig::default()
    };
    match PhysicsWorld::from_config(&config) {
        Ok(world) => world,
        Err(e) => panic!("bench config rejected: {e}"),
    }
}

fn bench_tick(body_count: u32, boundary: Boundary, iterations: usize) {
    let mut world = make_world(body_count, boundary);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(&mut world).tick();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    let stats = world.last_tick_stats();
    println!(
        "  tick ({body_count} bodies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}, last contacts {}",
        stats.contacts
    );
}

fn main() {
    println!("=== Tick Benchmarks ===\n");

    println!("Default box:");
    bench_tick(20, Boundary::default(), 10000);
    bench_tick(50, Boundary::default(), 10000);
    bench_tick(500, Boundary::default(), 200);

    println!("\nCrowded box:");
    bench_tick(50, Boundary::new(300.0, 200.0), 10000);
    bench_tick(200, Boundary::new(300.0, 200.0), 1000);

    println!("\n=== Done ===");
}
