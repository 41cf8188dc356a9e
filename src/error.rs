//! Error types for the wave simulation and its render shell.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WaveError {
    /// Construction parameters are out of range or the scheme would be unstable.
    #[error("invalid wave configuration: {0}")]
    Configuration(String),

    /// A disturbance was requested outside the interior of the grid.
    #[error("disturbance at ({row}, {col}) outside interior of {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A disturbance magnitude was NaN or infinite.
    #[error("disturbance magnitude must be finite, got {0}")]
    InvalidMagnitude(f32),

    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, WaveError>;
