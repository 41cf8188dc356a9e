//! Camera configuration and presets.

/// Fixed camera position
#[derive(Debug, Clone)]
pub struct FixedCamera {
    /// Camera position (meters)
    pub position: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self {
            position: [-45.0, 35.0, -95.0], // Off the near corner, above the water
            target: [0.0, 0.0, 0.0],        // Centre of the grid
        }
    }
}

/// Orbiting camera circling the water surface
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal distance from the target (meters)
    pub radius_m: f32,

    /// Height above the water plane (meters)
    pub height_m: f32,

    /// Angular speed around the target (radians per second)
    pub angular_speed_rad_per_s: f32,

    /// Angle at t = 0 (radians, measured from +X towards +Z)
    pub start_angle_rad: f32,

    /// Point the camera orbits and looks at (meters)
    pub target: [f32; 3],
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius_m: 110.0,
            height_m: 45.0,
            angular_speed_rad_per_s: 0.08, // Roughly one lap every 80 seconds
            start_angle_rad: -std::f32::consts::FRAC_PI_2,
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Camera preset selection
#[derive(Debug, Clone)]
pub enum CameraPreset {
    /// Fixed preset: stationary camera
    Fixed(FixedCamera),

    /// Orbit preset: slow circle around the water
    Orbit(OrbitCamera),
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self::Orbit(OrbitCamera::default())
    }
}
