//! Dynamic water surface: finite-difference wave grid, rain and render mesh.

mod grid;
mod mesh;
mod rain;
mod system;

// Re-export public types
pub use grid::WaveGrid;
pub use mesh::{WaveMesh, WaveVertex};
pub use rain::{RainDriver, Raindrop, MAX_DROPS_PER_UPDATE};
pub use system::{FrameStats, WaveSystem, DEFAULT_MAX_FRAME_DT_S};
