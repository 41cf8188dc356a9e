//! Camera presets producing the view-projection matrix for the water scene.

use glam::{Mat4, Vec3};

use crate::params::{CameraPreset, FixedCamera, OrbitCamera, RenderConfig};

/// Camera system driven by a preset
pub struct CameraSystem {
    preset: CameraPreset,
}

impl CameraSystem {
    /// Create new camera system with specified preset
    pub fn new(preset: CameraPreset) -> Self {
        Self { preset }
    }

    /// Compute camera position and look-at target for given time
    ///
    /// # Arguments
    /// * `time_s` - Current time in seconds
    ///
    /// # Returns
    /// Tuple of (eye_position, target_position)
    pub fn compute_position_and_target(&self, time_s: f32) -> (Vec3, Vec3) {
        match &self.preset {
            CameraPreset::Fixed(params) => Self::compute_fixed(params),
            CameraPreset::Orbit(params) => Self::compute_orbit(params, time_s),
        }
    }

    fn compute_fixed(p: &FixedCamera) -> (Vec3, Vec3) {
        (Vec3::from_array(p.position), Vec3::from_array(p.target))
    }

    /// Circle the target at constant radius and height
    fn compute_orbit(p: &OrbitCamera, time_s: f32) -> (Vec3, Vec3) {
        let angle = p.start_angle_rad + time_s * p.angular_speed_rad_per_s;
        let target = Vec3::from_array(p.target);
        let eye = target + Vec3::new(angle.cos() * p.radius_m, p.height_m, angle.sin() * p.radius_m);
        (eye, target)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(
        &self,
        time_s: f32,
        render_config: &RenderConfig,
    ) -> (Mat4, Vec3) {
        let (eye, target) = self.compute_position_and_target(time_s);

        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );

        (proj * view, eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_camera_is_stationary() {
        let params = FixedCamera::default();
        let camera = CameraSystem::new(CameraPreset::Fixed(params.clone()));

        let (eye0, target0) = camera.compute_position_and_target(0.0);
        let (eye1, target1) = camera.compute_position_and_target(10.0);
        assert_eq!(eye0, Vec3::from_array(params.position));
        assert_eq!(eye0, eye1);
        assert_eq!(target0, target1);
    }

    #[test]
    fn test_orbit_keeps_radius_and_height() {
        let params = OrbitCamera::default();
        let camera = CameraSystem::new(CameraPreset::Orbit(params.clone()));

        for t in 0..100 {
            let (eye, target) = camera.compute_position_and_target(t as f32 * 0.7);
            let horizontal = Vec3::new(eye.x - target.x, 0.0, eye.z - target.z);
            assert!((horizontal.length() - params.radius_m).abs() < 1e-3);
            assert!((eye.y - params.height_m).abs() < 1e-5);
        }
    }

    #[test]
    fn test_orbit_starts_on_near_side() {
        let camera = CameraSystem::new(CameraPreset::Orbit(OrbitCamera::default()));
        let (eye, _) = camera.compute_position_and_target(0.0);
        // Start angle of -pi/2 puts the eye on the -Z side
        assert!(eye.z < -100.0);
        assert!(eye.x.abs() < 1e-3);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = CameraSystem::new(CameraPreset::default());
        let render_config = RenderConfig::default();

        let (view_proj, eye_pos) = camera.create_view_proj_matrix(0.0, &render_config);

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(eye_pos.is_finite());

        // The target projects inside the view volume
        let clip = view_proj * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
