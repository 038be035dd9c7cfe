//! Error types for chunk simulation.

use thiserror::Error;

/// Result type alias for chunk operations.
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors raised by chunk construction, transfer, and dispatch.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// No usable compute backend was found.
    #[error("compute backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend reported a fatal error.
    #[error("backend error: {0}")]
    Backend(String),

    /// The transition kernel failed to compile.
    #[error("kernel compilation failed: {0}")]
    KernelCompile(String),

    /// A host/device copy or buffer map failed.
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// Chunk dimensions describe an empty grid.
    #[error("invalid chunk dimensions: {w}x{h}")]
    InvalidDimensions {
        /// Requested width including halo.
        w: i32,
        /// Requested height including halo.
        h: i32,
    },

    /// A caller-supplied grid does not match the chunk size.
    #[error("grid length mismatch: expected {expected} cells, got {actual}")]
    GridSizeMismatch {
        /// Cell count the chunk was constructed with.
        expected: usize,
        /// Cell count the caller supplied.
        actual: usize,
    },
}
