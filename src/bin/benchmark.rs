//! Step benchmark: serial vs parallel on seeded grids

use std::time::Instant;

use rand::{SeedableRng, rngs::StdRng};
use life_loader::domain::{Grid, ImageSeeder, SourceImage, StepStrategy, step};

fn seeded_grid(size: usize) -> anyhow::Result<Grid> {
    let logo = SourceImage::filled(60, 30, [20, 90, 200])?;
    let noise = size * size / 2;
    let grid = ImageSeeder::new(noise).seed(&logo, size, size, &mut StdRng::seed_from_u64(7))?;
    Ok(grid)
}

fn benchmark(grid: &Grid, strategy: StepStrategy, iterations: u32) -> anyhow::Result<f64> {
    let mut current = grid.clone();

    let start = Instant::now();
    for _ in 0..iterations {
        current = step::advance(&current, strategy)?;
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() -> anyhow::Result<()> {
    println!("=== Loading screen step benchmark ===\n");

    let sizes = [100, 250, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let grid = seeded_grid(size)?;
        let serial_ms = benchmark(&grid, StepStrategy::Serial, iterations)?;
        let parallel_ms = benchmark(&grid, StepStrategy::Parallel, iterations)?;

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>9.1}x",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    for strategy in StepStrategy::all() {
        println!("\n{:<10} {}", strategy.name(), strategy.description());
    }

    Ok(())
}
