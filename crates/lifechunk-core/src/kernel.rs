//! The per-cell transition kernel, host edition.
//!
//! This is the same branch-free flat-array rule the GPU shader runs:
//! the "row above" / "row below" anchors are clamped into range with
//! `max`/`min` instead of branching on grid edges. For lanes inside
//! the halo ring (or at the extreme ends of the flat array) the
//! clamped anchors read semantically wrong neighbors; those results
//! land in the halo and are discarded by drivers. For interior lanes
//! of any `w,h >= 3` grid the anchors coincide with the true
//! `gid - w` / `gid + w` rows, so interior results are exact.

use rayon::prelude::*;

use crate::boundary::{edge_activity, EdgeActivity};
use crate::error::Result;
use crate::grid::{Cell, ChunkDims};

/// Cell count above which the host kernel steps rows in parallel.
const PARALLEL_THRESHOLD: usize = 4096;

/// Read a cell through a clamped flat index.
///
/// The GPU shader clamps the same way; it only changes what
/// halo-ring lanes observe, never interior lanes.
#[inline(always)]
fn cell_at(cells: &[Cell], idx: i32, n: i32) -> Cell {
    cells[idx.clamp(0, n - 1) as usize]
}

/// Next state of the cell at flat index `gid`.
#[inline(always)]
fn next_state(current: &[Cell], gid: i32, w: i32, n: i32) -> Cell {
    let gidym = (gid - w).max(1);
    let gidyp = (gid + w + 1).min(n);
    let alive = cell_at(current, gid - 1, n)
        + cell_at(current, gid + 1, n)
        + cell_at(current, gidym - 1, n)
        + cell_at(current, gidym, n)
        + cell_at(current, gidym + 1, n)
        + cell_at(current, gidyp, n)
        + cell_at(current, gidyp - 1, n)
        + cell_at(current, gidyp - 2, n);
    (alive == 3 || (alive == 2 && current[gid as usize] != 0)) as Cell
}

/// Advance one generation: read `current`, write `next`.
///
/// Both slices must be `dims.area()` long. Every flat index gets a
/// write, halo ring included; only the interior is meaningful.
pub fn step_cells(current: &[Cell], next: &mut [Cell], dims: ChunkDims) {
    let w = dims.w();
    let n = dims.area() as i32;
    debug_assert_eq!(current.len(), dims.area());
    debug_assert_eq!(next.len(), dims.area());

    if dims.area() >= PARALLEL_THRESHOLD {
        next.par_iter_mut().enumerate().for_each(|(gid, out)| {
            *out = next_state(current, gid as i32, w, n);
        });
    } else {
        for (gid, out) in next.iter_mut().enumerate() {
            *out = next_state(current, gid as i32, w, n);
        }
    }
}

/// CPU rendition of the chunk simulator.
///
/// Executes the identical clamp arithmetic as the GPU path, so it
/// serves both as a no-GPU fallback and as the parity reference for
/// GPU tests. Same contract: `set_input` fills `current`, `run`
/// recomputes `next` from the unchanged `current`, `get_output`
/// copies `next` out without clearing or swapping.
pub struct HostChunkSimulator {
    dims: ChunkDims,
    current: Vec<Cell>,
    next: Vec<Cell>,
}

impl HostChunkSimulator {
    /// Create a simulator with both generations zero-initialized.
    pub fn new(w: i32, h: i32) -> Result<Self> {
        let dims = ChunkDims::new(w, h)?;
        tracing::debug!(w, h, "created host chunk simulator");
        Ok(Self {
            dims,
            current: vec![0; dims.area()],
            next: vec![0; dims.area()],
        })
    }

    /// Chunk dimensions, halo included.
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// Copy a caller-supplied `w*h` grid into the current generation.
    pub fn set_input(&mut self, cells: &[Cell]) -> Result<()> {
        self.dims.check_len(cells.len())?;
        self.current.copy_from_slice(cells);
        Ok(())
    }

    /// Compute the next generation from the current one.
    pub fn run(&mut self) -> Result<()> {
        step_cells(&self.current, &mut self.next, self.dims);
        Ok(())
    }

    /// Copy the next generation out.
    pub fn get_output(&self) -> Result<Vec<Cell>> {
        Ok(self.next.clone())
    }

    /// Edge-liveness query against a dense host grid.
    pub fn check_bounds(&self, cells: &[Cell]) -> Result<EdgeActivity> {
        edge_activity(cells, self.dims)
    }
}
