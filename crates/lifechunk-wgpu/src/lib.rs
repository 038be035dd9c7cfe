//! # lifechunk-wgpu
//!
//! WebGPU backend for the chunked Game of Life simulator.
//!
//! [`ChunkSimulator`] owns two device-resident generation buffers and
//! a compute pipeline compiled at construction; one dispatch advances
//! a whole chunk with one invocation per cell. [`GpuContext`] bundles
//! the wgpu device and queue and is injected explicitly — no ambient
//! process-wide state.
//!
//! ## Example
//!
//! ```ignore
//! use lifechunk_wgpu::{ChunkSimulator, GpuContext};
//!
//! let ctx = GpuContext::new().await?;
//! let sim = ChunkSimulator::new(&ctx, 10, 10).await?;
//! sim.set_input(&cells)?;
//! sim.run()?;
//! let next = sim.get_output()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod simulator;

pub use context::GpuContext;
pub use simulator::ChunkSimulator;

/// Whether a usable GPU adapter is present on this system.
pub async fn is_gpu_available() -> bool {
    GpuContext::new().await.is_ok()
}
