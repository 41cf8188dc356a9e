//! High-level water system: grid + rain + render mesh, driven once per frame.

use super::grid::WaveGrid;
use super::mesh::WaveMesh;
use super::rain::{RainDriver, Raindrop};
use crate::error::{Result, WaveError};
use crate::params::{RainParams, WaveParams};

/// Longest frame delta fed to the simulation (seconds)
///
/// Caps the number of ticks a single stalled frame can trigger.
pub const DEFAULT_MAX_FRAME_DT_S: f32 = 0.25;

/// Per-frame summary returned by [`WaveSystem::update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Simulation ticks performed this frame
    pub ticks: u32,
    /// Drops applied this frame
    pub drops: Vec<Raindrop>,
    /// Whether the frame delta was clamped
    pub clamped: bool,
}

/// Owned water simulation session
pub struct WaveSystem {
    pub grid: WaveGrid,
    pub mesh: WaveMesh,
    rain: RainDriver,
    max_frame_dt_s: f32,
}

impl WaveSystem {
    /// Create a new water system with validated parameters
    pub fn new(waves: &WaveParams, rain: RainParams) -> Result<Self> {
        rain.validate().map_err(WaveError::Configuration)?;
        let grid = WaveGrid::new(waves)?;
        let mesh = WaveMesh::new(&grid);

        log::info!(
            "Water grid {}x{} ({:.1}m x {:.1}m), dt {}s, c^2 {:.4}",
            grid.row_count(),
            grid.column_count(),
            grid.width(),
            grid.depth(),
            grid.time_step(),
            grid.courant_squared()
        );

        Ok(Self {
            grid,
            mesh,
            rain: RainDriver::new(rain),
            max_frame_dt_s: DEFAULT_MAX_FRAME_DT_S,
        })
    }

    pub fn with_max_frame_dt(mut self, max_frame_dt_s: f32) -> Self {
        self.max_frame_dt_s = max_frame_dt_s;
        self
    }

    /// Advance one rendered frame
    ///
    /// Rain falls first, then the grid integrates the (clamped) frame delta
    /// and the mesh snapshot is refreshed for upload.
    pub fn update(&mut self, frame_dt_s: f32) -> FrameStats {
        let clamped = frame_dt_s > self.max_frame_dt_s;
        let dt = if clamped {
            log::warn!(
                "Frame delta {:.3}s clamped to {:.3}s",
                frame_dt_s,
                self.max_frame_dt_s
            );
            self.max_frame_dt_s
        } else {
            frame_dt_s
        };

        let drops = self.rain.update(&mut self.grid, dt);
        let ticks = self.grid.advance(dt);
        self.mesh.refresh(&self.grid);

        log::trace!(
            "Frame dt {:.4}s: {} ticks, {} drops",
            dt,
            ticks,
            drops.len()
        );

        FrameStats {
            ticks,
            drops,
            clamped,
        }
    }

    /// Drop a single disturbance at the centre of the grid
    pub fn splash_centre(&mut self, magnitude: f32) -> Result<()> {
        let row = self.grid.row_count() / 2;
        let col = self.grid.column_count() / 2;
        self.grid.disturb(row, col, magnitude)
    }

    pub fn rain_enabled(&self) -> bool {
        self.rain.params().enabled
    }

    pub fn set_rain_enabled(&mut self, enabled: bool) {
        log::info!("Rain {}", if enabled { "on" } else { "off" });
        self.rain.set_enabled(enabled);
    }
}
