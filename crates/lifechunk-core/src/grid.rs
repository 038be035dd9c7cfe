//! Chunk grid representation.
//!
//! A chunk is a dense row-major array of cell states with a one-cell
//! halo ring around the simulated interior. The halo carries
//! neighbor-chunk edge state and is never updated by the transition
//! kernel; a chunk advertised as simulating `N x N` cells is therefore
//! allocated as `(N+2) x (N+2)`.
//!
//! ```text
//! +---+----------------+---+
//! |   |   top halo     |   |  <- row 0 (from neighbor)
//! +---+----------------+---+
//! | l |                | r |
//! | e |    interior    | i |  <- rows 1..h-2 (owned)
//! | f |  (w-2)x(h-2)   | g |
//! +---+----------------+---+
//! |   |  bottom halo   |   |  <- row h-1 (from neighbor)
//! +---+----------------+---+
//! ```

use crate::error::{ChunkError, Result};

/// Cell state: 0 dead, 1 alive.
///
/// Stored as a 4-byte signed integer for device-transfer
/// compatibility; the kernel treats other values arithmetically but
/// they are outside the defined domain.
pub type Cell = i32;

/// Chunk dimensions, halo included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDims {
    w: i32,
    h: i32,
}

impl ChunkDims {
    /// Create chunk dimensions. Fails on an empty grid.
    pub fn new(w: i32, h: i32) -> Result<Self> {
        if w <= 0 || h <= 0 {
            return Err(ChunkError::InvalidDimensions { w, h });
        }
        if w < 3 || h < 3 {
            // The halo scheme needs at least one interior row/column.
            tracing::warn!(w, h, "chunk has no interior; results are all halo");
        }
        Ok(Self { w, h })
    }

    /// Width including halo.
    pub fn w(&self) -> i32 {
        self.w
    }

    /// Height including halo.
    pub fn h(&self) -> i32 {
        self.h
    }

    /// Total cell count `w * h`.
    pub fn area(&self) -> usize {
        (self.w as usize) * (self.h as usize)
    }

    /// Flat index of cell `(x, y)`, row-major, origin top-left.
    #[inline(always)]
    pub fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(x >= 0 && x < self.w && y >= 0 && y < self.h);
        (y as usize) * (self.w as usize) + (x as usize)
    }

    /// Whether `(x, y)` lies in the simulated interior
    /// `[1, w-2] x [1, h-2]`.
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        x >= 1 && x <= self.w - 2 && y >= 1 && y <= self.h - 2
    }

    /// Check a caller-supplied grid length against `area()`.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if len != self.area() {
            return Err(ChunkError::GridSizeMismatch {
                expected: self.area(),
                actual: len,
            });
        }
        Ok(())
    }
}

/// One generation's cell grid for a single chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkGrid {
    dims: ChunkDims,
    cells: Vec<Cell>,
}

impl ChunkGrid {
    /// Create an all-dead grid of `dims.area()` cells.
    pub fn empty(dims: ChunkDims) -> Self {
        Self {
            dims,
            cells: vec![0; dims.area()],
        }
    }

    /// Adopt a caller-supplied cell vector, checking its length.
    pub fn from_cells(dims: ChunkDims, cells: Vec<Cell>) -> Result<Self> {
        dims.check_len(cells.len())?;
        Ok(Self { dims, cells })
    }

    /// Grid dimensions.
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// Cell state at `(x, y)`.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.cells[self.dims.index(x, y)]
    }

    /// Set cell state at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, state: Cell) {
        let idx = self.dims.index(x, y);
        self.cells[idx] = state;
    }

    /// Flat view of all cells, halo included.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable flat view of all cells, halo included.
    pub fn as_mut_slice(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Consume the grid, returning its cell vector.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Copy of the interior, row-major, `(w-2) * (h-2)` cells.
    ///
    /// This is the chunk's authoritative simulated state; halo values
    /// must never be read as results.
    pub fn interior_cells(&self) -> Vec<Cell> {
        let (w, h) = (self.dims.w(), self.dims.h());
        let mut out = Vec::with_capacity(((w - 2).max(0) as usize) * ((h - 2).max(0) as usize));
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                out.push(self.get(x, y));
            }
        }
        out
    }
}
