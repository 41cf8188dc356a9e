//! Ripplefield library - finite-difference water ripples with a wgpu viewer

pub mod camera;
pub mod cli;
pub mod error;
pub mod params;
pub mod rendering;
pub mod waves;

pub use error::{Result, WaveError};
