//! Chunk boundary liveness extraction.
//!
//! A multi-chunk coordinator decides whether to propagate a chunk's
//! edge state into a neighbor's halo before that neighbor's next step.
//! The primitive it consumes is [`edge_activity`]: for each of the
//! four interior edge lines, is any cell alive?

use crate::error::Result;
use crate::grid::{Cell, ChunkDims};

/// Edge of a chunk, clockwise from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Edge {
    /// Interior row 1 (adjacent to the top halo row).
    Top = 0,
    /// Interior column `w-2` (adjacent to the right halo column).
    Right = 1,
    /// Interior row `h-2` (adjacent to the bottom halo row).
    Bottom = 2,
    /// Interior column 1 (adjacent to the left halo column).
    Left = 3,
}

impl Edge {
    /// The opposite edge, for routing into a neighbor's halo.
    pub fn opposite(self) -> Self {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// All edges, clockwise from the top.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Liveness flags for the four interior edge lines of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeActivity {
    /// Any live cell in interior row 1, columns `[1, w-2]`.
    pub top: bool,
    /// Any live cell in interior column `w-2`, rows `[1, h-2]`.
    pub right: bool,
    /// Any live cell in interior row `h-2`, columns `[1, w-2]`.
    pub bottom: bool,
    /// Any live cell in interior column 1, rows `[1, h-2]`.
    pub left: bool,
}

impl EdgeActivity {
    /// Flag for a given edge.
    pub fn get(&self, edge: Edge) -> bool {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// Whether any edge line has a live cell.
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }

    /// The four flags clockwise from the top:
    /// `(top, right, bottom, left)`.
    pub fn as_tuple(&self) -> (bool, bool, bool, bool) {
        (self.top, self.right, self.bottom, self.left)
    }
}

/// Scan the interior edge lines of a dense host grid.
///
/// `cells` must be a full `w*h` grid, halo included; a length mismatch
/// is a caller-contract violation surfaced as
/// [`ChunkError::GridSizeMismatch`](crate::ChunkError::GridSizeMismatch).
pub fn edge_activity(cells: &[Cell], dims: ChunkDims) -> Result<EdgeActivity> {
    dims.check_len(cells.len())?;
    let (w, h) = (dims.w(), dims.h());

    let mut activity = EdgeActivity::default();
    for x in 1..w - 1 {
        activity.top |= cells[dims.index(x, 1)] != 0;
        activity.bottom |= cells[dims.index(x, h - 2)] != 0;
    }
    for y in 1..h - 1 {
        activity.left |= cells[dims.index(1, y)] != 0;
        activity.right |= cells[dims.index(w - 2, y)] != 0;
    }
    Ok(activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ChunkGrid;

    #[test]
    fn edge_opposites() {
        assert_eq!(Edge::Top.opposite(), Edge::Bottom);
        assert_eq!(Edge::Bottom.opposite(), Edge::Top);
        assert_eq!(Edge::Left.opposite(), Edge::Right);
        assert_eq!(Edge::Right.opposite(), Edge::Left);
    }

    #[test]
    fn empty_grid_has_no_activity() {
        let dims = ChunkDims::new(6, 6).unwrap();
        let grid = ChunkGrid::empty(dims);
        let activity = edge_activity(grid.as_slice(), dims).unwrap();
        assert_eq!(activity.as_tuple(), (false, false, false, false));
        assert!(!activity.any());
    }

    #[test]
    fn top_edge_only() {
        let dims = ChunkDims::new(6, 6).unwrap();
        let mut grid = ChunkGrid::empty(dims);
        grid.set(2, 1, 1);
        let activity = edge_activity(grid.as_slice(), dims).unwrap();
        assert_eq!(activity.as_tuple(), (true, false, false, false));
    }

    #[test]
    fn halo_cells_are_ignored() {
        let dims = ChunkDims::new(6, 6).unwrap();
        let mut grid = ChunkGrid::empty(dims);
        // Live cells only on the halo ring must not register.
        grid.set(0, 0, 1);
        grid.set(3, 0, 1);
        grid.set(5, 3, 1);
        grid.set(2, 5, 1);
        let activity = edge_activity(grid.as_slice(), dims).unwrap();
        assert!(!activity.any());
    }

    #[test]
    fn single_interior_cell_touches_all_edges() {
        // In a 3x3 chunk the single interior cell lies on all four
        // edge lines at once.
        let dims = ChunkDims::new(3, 3).unwrap();
        let mut grid = ChunkGrid::empty(dims);
        grid.set(1, 1, 1);
        let activity = edge_activity(grid.as_slice(), dims).unwrap();
        assert_eq!(activity.as_tuple(), (true, true, true, true));
    }

    #[test]
    fn corner_interior_cell_flags_two_edges() {
        let dims = ChunkDims::new(6, 6).unwrap();
        let mut grid = ChunkGrid::empty(dims);
        grid.set(1, 1, 1);
        let activity = edge_activity(grid.as_slice(), dims).unwrap();
        assert_eq!(activity.as_tuple(), (true, false, false, true));
    }

    #[test]
    fn per_edge_lookup_matches_tuple_order() {
        let activity = EdgeActivity {
            top: true,
            right: false,
            bottom: true,
            left: false,
        };
        let (top, right, bottom, left) = activity.as_tuple();
        assert_eq!(activity.get(Edge::Top), top);
        assert_eq!(activity.get(Edge::Right), right);
        assert_eq!(activity.get(Edge::Bottom), bottom);
        assert_eq!(activity.get(Edge::Left), left);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let dims = ChunkDims::new(6, 6).unwrap();
        assert!(edge_activity(&[0; 35], dims).is_err());
    }
}
