//! # lifechunk-core
//!
//! Chunk representation, transition rule, and boundary extraction for
//! a chunked Game of Life simulation.
//!
//! The world is partitioned into fixed-size rectangular chunks. Each
//! chunk's cell grid carries a one-cell halo ring holding neighboring
//! chunks' edge state, so the per-cell kernel never branches on grid
//! edges: the flat-index row anchors are clamped with `max`/`min` and
//! only interior results are authoritative.
//!
//! This crate is backend-agnostic. [`HostChunkSimulator`] runs the
//! kernel on the CPU (rayon-parallel for large chunks); the
//! `lifechunk-wgpu` crate provides the GPU-resident simulator with
//! the same surface.
//!
//! ## Example
//!
//! ```
//! use lifechunk_core::{ChunkDims, ChunkGrid, HostChunkSimulator};
//!
//! // 4x4 simulated interior needs a 6x6 allocation.
//! let mut sim = HostChunkSimulator::new(6, 6).unwrap();
//! let mut seed = ChunkGrid::empty(sim.dims());
//! seed.set(2, 2, 1);
//! seed.set(3, 2, 1);
//! seed.set(2, 3, 1);
//! seed.set(3, 3, 1);
//!
//! sim.set_input(seed.as_slice()).unwrap();
//! sim.run().unwrap();
//! let next = sim.get_output().unwrap();
//!
//! // A 2x2 block is a still life.
//! let next = ChunkGrid::from_cells(sim.dims(), next).unwrap();
//! assert_eq!(next.interior_cells(), seed.interior_cells());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod error;
pub mod grid;
pub mod kernel;

pub use boundary::{edge_activity, Edge, EdgeActivity};
pub use error::{ChunkError, Result};
pub use grid::{Cell, ChunkDims, ChunkGrid};
pub use kernel::{step_cells, HostChunkSimulator};
