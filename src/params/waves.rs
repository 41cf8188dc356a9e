//! Wave grid physics parameters and the rain (disturbance) policy.

use std::ops::Range;

/// Largest squared Courant number for which the explicit scheme stays bounded.
pub const MAX_COURANT_SQUARED: f32 = 0.5;

/// Shortest real time allowed between raindrops (seconds)
pub const MIN_RAIN_INTERVAL_S: f32 = 0.01;

/// Wave grid physics parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WaveParams {
    /// Number of sample rows (along Z), at least 2
    pub rows: usize,

    /// Number of sample columns (along X), at least 2
    pub cols: usize,

    /// Distance between adjacent samples (meters)
    pub spatial_step_m: f32,

    /// Fixed simulation tick length (seconds)
    pub time_step_s: f32,

    /// Wave propagation speed (meters per second)
    pub wave_speed_m_per_s: f32,

    /// Damping factor in [0, 1): 0 = undamped, towards 1 = waves die quickly
    pub damping: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            rows: 160,
            cols: 24,
            spatial_step_m: 1.0,
            time_step_s: 0.03,
            wave_speed_m_per_s: 4.0,
            damping: 0.2,
        }
    }
}

impl WaveParams {
    /// Squared Courant number `(c * dt / dx)^2`
    pub fn courant_squared(&self) -> f32 {
        let courant = self.wave_speed_m_per_s * self.time_step_s / self.spatial_step_m;
        courant * courant
    }

    /// Validate dimensions, positivity and the stability bound
    pub fn validate(&self) -> Result<(), String> {
        if self.rows < 2 || self.cols < 2 {
            return Err(format!(
                "grid must be at least 2x2, got {}x{}",
                self.rows, self.cols
            ));
        }
        // Mesh indices are u32, so every sample must be addressable by one
        let samples = self.rows.checked_mul(self.cols);
        if samples.map_or(true, |n| u32::try_from(n).is_err()) {
            return Err(format!(
                "grid {}x{} has too many samples for u32 mesh indices",
                self.rows, self.cols
            ));
        }
        let positive = [
            ("spatial step", self.spatial_step_m),
            ("time step", self.time_step_s),
            ("wave speed", self.wave_speed_m_per_s),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be finite and > 0, got {}", name, value));
            }
        }
        if !(self.damping.is_finite() && (0.0..1.0).contains(&self.damping)) {
            return Err(format!("damping must be in [0, 1), got {}", self.damping));
        }

        let courant_squared = self.courant_squared();
        if courant_squared > MAX_COURANT_SQUARED {
            return Err(format!(
                "unstable scheme: (c*dt/dx)^2 = {:.4} exceeds {} (speed {} m/s, dt {} s, dx {} m)",
                courant_squared,
                MAX_COURANT_SQUARED,
                self.wave_speed_m_per_s,
                self.time_step_s,
                self.spatial_step_m
            ));
        }
        Ok(())
    }
}

/// Synthetic raindrop policy driving `disturb` on a real-time interval
#[derive(Debug, Clone, PartialEq)]
pub struct RainParams {
    /// Real time between drops (seconds)
    pub interval_s: f32,

    /// Drop magnitude range (meters of height added)
    pub magnitude_range_m: Range<f32>,

    /// Cells kept clear of the grid edge when picking a drop site
    pub edge_margin: usize,

    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,

    /// Whether drops fall at all
    pub enabled: bool,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            interval_s: 0.25,
            magnitude_range_m: 0.2..0.5,
            edge_margin: 4,
            seed: None,
            enabled: true,
        }
    }
}

impl RainParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.interval_s.is_finite() && self.interval_s >= MIN_RAIN_INTERVAL_S) {
            return Err(format!(
                "rain interval must be at least {}s, got {}",
                MIN_RAIN_INTERVAL_S, self.interval_s
            ));
        }
        let Range { start, end } = self.magnitude_range_m;
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(format!(
                "rain magnitude range must be non-empty, got {}..{}",
                start, end
            ));
        }
        Ok(())
    }
}
