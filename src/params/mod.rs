//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (meters, seconds, etc.)
//! - Documented ranges and meanings
//! - Validation where a bad value would break the simulation

mod camera;
mod render;
mod waves;

// Re-export all types
pub use camera::{CameraPreset, FixedCamera, OrbitCamera};
pub use render::{
    LightParams, RenderConfig, UvScroll, WaterMaterial, NUM_FRAME_RESOURCES,
};
pub use waves::{RainParams, WaveParams, MAX_COURANT_SQUARED, MIN_RAIN_INTERVAL_S};
