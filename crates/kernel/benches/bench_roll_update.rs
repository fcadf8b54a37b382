use std::hint::black_box;
use std::time::Instant;

use rollcube_common::{CubeConfig, Direction, GridPos};
use rollcube_kernel::{RollingCube, roll_transform};

fn bench_resting_update(iterations: usize) {
    let mut cube = RollingCube::default();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(cube.update(black_box(0.016), black_box(Direction::None)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  resting ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_rolling_update(dt: f32, iterations: usize) {
    let mut cube = RollingCube::default();

    let start = Instant::now();
    for i in 0..iterations {
        // Cycle directions so the cube stays near the origin
        let d = Direction::MOVING[(i / 64) % 4];
        let _ = black_box(cube.update(black_box(dt), black_box(d)));
        if i % 1024 == 0 {
            cube.drain_events();
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  rolling (dt={dt}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}, turns {}",
        cube.turns_completed()
    );
}

fn bench_roll_transform(iterations: usize) {
    let config = CubeConfig::default();

    let start = Instant::now();
    for i in 0..iterations {
        let angle = (i % 90) as f32;
        let _ = black_box(roll_transform(
            black_box(&config),
            black_box(GridPos::new(3, -2)),
            black_box(Direction::Right),
            black_box(angle),
        ));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  roll_transform ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Roll Update Benchmarks ===\n");

    println!("Resting cube:");
    bench_resting_update(1_000_000);

    println!("\nRolling cube:");
    bench_rolling_update(1.0 / 144.0, 1_000_000);
    bench_rolling_update(1.0 / 60.0, 1_000_000);
    bench_rolling_update(0.1, 100_000);

    println!("\nTransform only:");
    bench_roll_transform(1_000_000);

    println!("\n=== Done ===");
}
