//! Command-line argument parsing.

use clap::Parser;

use crate::params::{CameraPreset, FixedCamera, OrbitCamera, RainParams, WaveParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ripplefield")]
#[command(about = "Real-time rain ripples on a finite-difference water surface", long_about = None)]
pub struct Args {
    /// Grid rows (samples along Z)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid columns (samples along X)
    #[arg(long)]
    pub cols: Option<usize>,

    /// Distance between samples (meters)
    #[arg(long, value_name = "METERS")]
    pub spatial_step: Option<f32>,

    /// Simulation tick length (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub time_step: Option<f32>,

    /// Wave propagation speed (meters per second)
    #[arg(long, value_name = "M_PER_S")]
    pub wave_speed: Option<f32>,

    /// Damping in [0, 1)
    #[arg(long)]
    pub damping: Option<f32>,

    /// Seconds between raindrops (at least 0.01)
    #[arg(long, value_name = "SECONDS")]
    pub rain_interval: Option<f32>,

    /// Disable synthetic rain at startup
    #[arg(long)]
    pub no_rain: bool,

    /// Seed for reproducible rain
    #[arg(long)]
    pub seed: Option<u64>,

    /// Camera preset: orbit (default), fixed
    #[arg(long, value_name = "PRESET", default_value = "orbit")]
    pub camera_preset: String,

    /// Run the simulation without a window for this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub headless: Option<f32>,
}

impl Args {
    /// Default wave parameters with any command-line overrides applied
    pub fn wave_params(&self) -> WaveParams {
        let defaults = WaveParams::default();
        WaveParams {
            rows: self.rows.unwrap_or(defaults.rows),
            cols: self.cols.unwrap_or(defaults.cols),
            spatial_step_m: self.spatial_step.unwrap_or(defaults.spatial_step_m),
            time_step_s: self.time_step.unwrap_or(defaults.time_step_s),
            wave_speed_m_per_s: self.wave_speed.unwrap_or(defaults.wave_speed_m_per_s),
            damping: self.damping.unwrap_or(defaults.damping),
        }
    }

    /// Default rain parameters with any command-line overrides applied
    pub fn rain_params(&self) -> RainParams {
        let defaults = RainParams::default();
        RainParams {
            interval_s: self.rain_interval.unwrap_or(defaults.interval_s),
            seed: self.seed.or(defaults.seed),
            enabled: !self.no_rain,
            ..defaults
        }
    }

    /// Parse camera preset from command-line arguments
    pub fn parse_camera_preset(&self) -> CameraPreset {
        match self.camera_preset.to_lowercase().as_str() {
            "orbit" => {
                log::info!("Camera: Orbit");
                CameraPreset::Orbit(OrbitCamera::default())
            }
            "fixed" => {
                log::info!("Camera: Fixed");
                CameraPreset::Fixed(FixedCamera::default())
            }
            other => {
                log::warn!("Unknown camera preset '{}', using orbit", other);
                CameraPreset::Orbit(OrbitCamera::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["ripplefield"]);
        assert_eq!(args.wave_params(), WaveParams::default());
        assert_eq!(args.rain_params(), RainParams::default());
        assert!(args.headless.is_none());
        assert!(matches!(args.parse_camera_preset(), CameraPreset::Orbit(_)));
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "ripplefield",
            "--rows",
            "64",
            "--cols",
            "48",
            "--damping",
            "0.5",
            "--wave-speed",
            "2.5",
            "--rain-interval",
            "0.1",
            "--seed",
            "9",
            "--no-rain",
            "--camera-preset",
            "FIXED",
            "--headless",
            "3",
        ]);

        let waves = args.wave_params();
        assert_eq!((waves.rows, waves.cols), (64, 48));
        assert_eq!(waves.damping, 0.5);
        assert_eq!(waves.wave_speed_m_per_s, 2.5);
        assert_eq!(waves.time_step_s, WaveParams::default().time_step_s);

        let rain = args.rain_params();
        assert_eq!(rain.interval_s, 0.1);
        assert_eq!(rain.seed, Some(9));
        assert!(!rain.enabled);

        assert!(matches!(args.parse_camera_preset(), CameraPreset::Fixed(_)));
        assert_eq!(args.headless, Some(3.0));
    }

    #[test]
    fn test_unknown_preset_falls_back_to_orbit() {
        let args = Args::parse_from(["ripplefield", "--camera-preset", "drone"]);
        assert!(matches!(args.parse_camera_preset(), CameraPreset::Orbit(_)));
    }
}
