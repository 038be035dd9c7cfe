//! Throughput benchmark for the GPU chunk simulator.
//!
//! Seeds one chunk, then dispatches the transition kernel as fast as
//! it will go against the frozen current generation (no readback, no
//! feedback — this measures raw kernel dispatch throughput) and
//! reports steps/sec and cells/sec at a fixed cadence.
//!
//! Run with: cargo run -p lifechunk-wgpu --bin chunk_bench --release

use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lifechunk_core::{ChunkDims, ChunkGrid, Result};
use lifechunk_wgpu::{ChunkSimulator, GpuContext};

/// Smallest chunk size whose interior fits the seed pattern.
const MIN_SIZE: i32 = 7;

/// GPU chunk simulator throughput benchmark.
#[derive(Parser)]
#[command(name = "chunk_bench", about, long_about = None)]
struct Args {
    /// Chunk size including the halo ring (the simulated interior is
    /// size-2 on each axis).
    #[arg(
        short,
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(i32).range(MIN_SIZE as i64..)
    )]
    size: i32,

    /// Steps between throughput reports.
    #[arg(short, long, default_value_t = 1000)]
    report_every: u64,

    /// Total steps to run (0 = run until interrupted).
    #[arg(short = 'n', long, default_value_t = 100_000)]
    steps: u64,
}

/// R-pentomino-style seed at the chunk center.
///
/// Spans `[cx-1, cx+2] x [cy-1, cy+1]`; every cell is interior for
/// any chunk of at least [`MIN_SIZE`] on each axis, which the CLI
/// enforces.
fn seed_pattern(dims: ChunkDims) -> ChunkGrid {
    let (cx, cy) = (dims.w() / 2, dims.h() / 2);
    let mut seed = ChunkGrid::empty(dims);
    for (x, y) in [
        (cx, cy - 1),
        (cx + 2, cy),
        (cx, cy + 1),
        (cx - 1, cy + 1),
        (cx + 1, cy + 1),
    ] {
        debug_assert!(dims.is_interior(x, y));
        seed.set(x, y, 1);
    }
    seed
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let ctx = GpuContext::new().await?;
    println!("adapter: {} ({:?})", ctx.name(), ctx.backend());

    let sim = ChunkSimulator::new(&ctx, args.size, args.size).await?;
    let dims = sim.dims();

    let seed = seed_pattern(dims);
    sim.set_input(seed.as_slice())?;

    let cells_per_step = dims.area() as f64;
    println!(
        "chunk {}x{} ({} cells), reporting every {} steps",
        args.size,
        args.size,
        dims.area(),
        args.report_every
    );

    let mut window_start = Instant::now();
    let mut count = 0u64;
    let mut total = 0u64;

    loop {
        sim.run()?;
        count += 1;
        total += 1;

        if count == args.report_every {
            // Drain the queue so the window measures completed work.
            ctx.poll(wgpu::Maintain::Wait);
            let dt = window_start.elapsed().as_secs_f64();
            let steps_per_sec = count as f64 / dt;
            println!(
                "{steps_per_sec:.0} steps/s @ {:.3e} cells/s",
                steps_per_sec * cells_per_step
            );
            window_start = Instant::now();
            count = 0;
        }

        if args.steps != 0 && total >= args.steps {
            break;
        }
    }

    // Final readback sanity: the pattern must still have live cells.
    let out = sim.get_output()?;
    let grid = ChunkGrid::from_cells(dims, out)?;
    let live: i32 = grid.interior_cells().iter().sum();
    let edges = sim.check_bounds(grid.as_slice())?;
    println!("live interior cells after last step: {live}");
    println!(
        "edge activity (top, right, bottom, left): {:?}",
        edges.as_tuple()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fits_interior_from_min_size_up() {
        // At size/2 the pattern's rightmost cell sits at cx + 2; for
        // sizes below MIN_SIZE that lands on or past the halo ring,
        // so MIN_SIZE is the smallest chunk the CLI accepts.
        for size in [MIN_SIZE, 8, 24] {
            let dims = ChunkDims::new(size, size).unwrap();
            let seed = seed_pattern(dims);
            let live: i32 = seed.interior_cells().iter().sum();
            assert_eq!(live, 5, "seed cell escaped the interior at size {size}");
        }
    }

    #[test]
    fn sub_min_sizes_are_rejected_by_the_cli() {
        assert!(Args::try_parse_from(["chunk_bench", "--size", "4"]).is_err());
        assert!(Args::try_parse_from(["chunk_bench", "--size", "6"]).is_err());
        assert!(Args::try_parse_from(["chunk_bench", "--size", "7"]).is_ok());
    }
}
