//! Rendering configuration, lighting and water material.

/// Number of per-frame vertex buffers cycled by the renderer
pub const NUM_FRAME_RESOURCES: usize = 3;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Clear colour behind the water (linear RGB)
    pub clear_color: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 45.0,
            near_plane_m: 0.1,
            far_plane_m: 1000.0,
            clear_color: [0.69, 0.77, 0.87], // Light steel blue
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Directional light shading the water
#[derive(Debug, Clone)]
pub struct LightParams {
    /// Direction the light travels (normalized in the shader)
    pub direction: [f32; 3],

    /// Light colour / intensity (linear RGB)
    pub strength: [f32; 3],

    /// Ambient term (linear RGB)
    pub ambient: [f32; 3],
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            direction: [0.577, -0.577, 0.577],
            strength: [0.9, 0.9, 0.9],
            ambient: [0.25, 0.25, 0.35],
        }
    }
}

/// Water surface material with scrolling texture coordinates
#[derive(Debug, Clone)]
pub struct WaterMaterial {
    /// Diffuse albedo (linear RGBA, alpha < 1 for translucency)
    pub diffuse_albedo: [f32; 4],

    /// Specular reflectance at normal incidence
    pub fresnel_r0: [f32; 3],

    /// Surface roughness in [0, 1]
    pub roughness: f32,

    /// Texture scroll speed along U (UV units per second)
    pub scroll_u_per_s: f32,

    /// Texture scroll speed along V (UV units per second)
    pub scroll_v_per_s: f32,
}

impl Default for WaterMaterial {
    fn default() -> Self {
        Self {
            diffuse_albedo: [0.2, 0.45, 0.75, 0.8],
            fresnel_r0: [0.1, 0.1, 0.1],
            roughness: 0.0,
            scroll_u_per_s: 0.1,
            scroll_v_per_s: 0.02,
        }
    }
}

/// Accumulated UV scroll offset, wrapped to [0, 1)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UvScroll {
    pub u: f32,
    pub v: f32,
}

impl UvScroll {
    /// Advance the scroll by one frame
    pub fn advance(&mut self, material: &WaterMaterial, dt_s: f32) {
        self.u = (self.u + material.scroll_u_per_s * dt_s).rem_euclid(1.0);
        self.v = (self.v + material.scroll_v_per_s * dt_s).rem_euclid(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_scroll_wraps() {
        let material = WaterMaterial::default();
        let mut scroll = UvScroll::default();

        scroll.advance(&material, 5.0);
        assert!((scroll.u - 0.5).abs() < 1e-5);
        assert!((scroll.v - 0.1).abs() < 1e-5);

        scroll.advance(&material, 6.0);
        assert!((scroll.u - 0.1).abs() < 1e-5);
        assert!(scroll.u >= 0.0 && scroll.u < 1.0);
    }

    #[test]
    fn test_aspect_ratio() {
        let config = RenderConfig::default();
        assert!((config.aspect_ratio() - 16.0 / 9.0).abs() < 1e-5);
    }
}
