//! GPU chunk simulator integration tests.
//!
//! These require GPU hardware; run with:
//! cargo test -p lifechunk-wgpu -- --ignored

use lifechunk_core::{ChunkError, ChunkGrid, HostChunkSimulator};
use lifechunk_wgpu::{ChunkSimulator, GpuContext};

async fn context_or_skip() -> Option<GpuContext> {
    if !lifechunk_wgpu::is_gpu_available().await {
        eprintln!("skipping test: GPU not available");
        return None;
    }
    Some(GpuContext::new().await.expect("adapter probed as available"))
}

#[tokio::test]
#[ignore] // Requires GPU
async fn simulator_creation() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    let sim = ChunkSimulator::new(&ctx, 10, 10).await.unwrap();
    assert_eq!(sim.dims().area(), 100);
}

#[tokio::test]
#[ignore] // Requires GPU
async fn empty_dimensions_fail_construction() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    assert!(matches!(
        ChunkSimulator::new(&ctx, 0, 10).await,
        Err(ChunkError::InvalidDimensions { .. })
    ));
}

#[tokio::test]
#[ignore] // Requires GPU
async fn output_before_first_run_is_all_dead() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    let sim = ChunkSimulator::new(&ctx, 8, 8).await.unwrap();
    let out = sim.get_output().unwrap();
    assert_eq!(out.len(), 64);
    assert!(out.iter().all(|&c| c == 0));
}

#[tokio::test]
#[ignore] // Requires GPU
async fn set_input_length_is_checked() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    let sim = ChunkSimulator::new(&ctx, 6, 6).await.unwrap();
    assert!(matches!(
        sim.set_input(&[0; 35]),
        Err(ChunkError::GridSizeMismatch {
            expected: 36,
            actual: 35
        })
    ));
}

#[tokio::test]
#[ignore] // Requires GPU
async fn block_is_a_still_life() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    let sim = ChunkSimulator::new(&ctx, 6, 6).await.unwrap();

    let mut seed = ChunkGrid::empty(sim.dims());
    seed.set(2, 2, 1);
    seed.set(3, 2, 1);
    seed.set(2, 3, 1);
    seed.set(3, 3, 1);

    sim.set_input(seed.as_slice()).unwrap();
    sim.run().unwrap();

    let next = ChunkGrid::from_cells(sim.dims(), sim.get_output().unwrap()).unwrap();
    assert_eq!(next.interior_cells(), seed.interior_cells());
}

#[tokio::test]
#[ignore] // Requires GPU
async fn blinker_has_period_two() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    let sim = ChunkSimulator::new(&ctx, 7, 7).await.unwrap();

    let mut seed = ChunkGrid::empty(sim.dims());
    seed.set(3, 2, 1);
    seed.set(3, 3, 1);
    seed.set(3, 4, 1);

    sim.set_input(seed.as_slice()).unwrap();
    sim.run().unwrap();
    let phase1 = sim.get_output().unwrap();

    sim.set_input(&phase1).unwrap();
    sim.run().unwrap();
    let phase2 = ChunkGrid::from_cells(sim.dims(), sim.get_output().unwrap()).unwrap();
    assert_eq!(phase2.interior_cells(), seed.interior_cells());
}

#[tokio::test]
#[ignore] // Requires GPU
async fn rerun_without_set_input_is_idempotent() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    let sim = ChunkSimulator::new(&ctx, 9, 9).await.unwrap();

    let mut seed = ChunkGrid::empty(sim.dims());
    seed.set(3, 2, 1);
    seed.set(4, 3, 1);
    seed.set(2, 4, 1);
    seed.set(3, 4, 1);
    seed.set(4, 4, 1);

    sim.set_input(seed.as_slice()).unwrap();
    sim.run().unwrap();
    let first = sim.get_output().unwrap();
    sim.run().unwrap();
    let second = sim.get_output().unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore] // Requires GPU
async fn gpu_matches_host_kernel() {
    use rand::{Rng, SeedableRng};

    let Some(ctx) = context_or_skip().await else {
        return;
    };

    let mut rng = rand::rngs::StdRng::seed_from_u64(0x600d);
    for &(w, h) in &[(3, 3), (6, 6), (16, 12), (31, 17)] {
        let gpu = ChunkSimulator::new(&ctx, w, h).await.unwrap();
        let mut host = HostChunkSimulator::new(w, h).unwrap();

        let cells: Vec<i32> = (0..gpu.dims().area()).map(|_| rng.gen_range(0..2)).collect();
        gpu.set_input(&cells).unwrap();
        host.set_input(&cells).unwrap();

        gpu.run().unwrap();
        host.run().unwrap();

        // Host and shader run the identical clamp arithmetic, so the
        // whole flat array matches, halo lanes included.
        assert_eq!(
            gpu.get_output().unwrap(),
            host.get_output().unwrap(),
            "host/GPU divergence on {w}x{h}"
        );
    }
}

#[tokio::test]
#[ignore] // Requires GPU
async fn check_bounds_matches_core() {
    let Some(ctx) = context_or_skip().await else {
        return;
    };
    let sim = ChunkSimulator::new(&ctx, 6, 6).await.unwrap();

    let mut grid = ChunkGrid::empty(sim.dims());
    grid.set(2, 1, 1);
    assert_eq!(
        sim.check_bounds(grid.as_slice()).unwrap().as_tuple(),
        (true, false, false, false)
    );
}
