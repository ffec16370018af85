use glam::{Mat3, Mat4, Quat, Vec3};
use gridwalk_common::Transform;
use serde::{Deserialize, Serialize};

/// Below this squared length a look direction is treated as degenerate.
const LOOK_EPSILON: f32 = 1e-12;

/// Perspective camera. The camera looks down its local `-Z` axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub transform: Transform,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            transform: Transform::default(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// View direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.transform.rotation * Vec3::NEG_Z
    }

    /// Rotate the camera so it faces `target` with world `+Y` up.
    ///
    /// Returns `false` and keeps the current rotation when the direction to
    /// `target` is zero or parallel to the up axis.
    pub fn look_at(&mut self, target: Vec3) -> bool {
        let dir = target - self.transform.position;
        if dir.length_squared() < LOOK_EPSILON {
            return false;
        }
        let forward = dir.normalize();
        let right = forward.cross(Vec3::Y);
        if right.length_squared() < LOOK_EPSILON {
            return false;
        }
        let right = right.normalize();
        let up = right.cross(forward);
        self.transform.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
        true
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.transform.rotation, self.transform.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.fov_y_degrees, 75.0);
        assert!(approx(cam.forward(), Vec3::NEG_Z));
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn look_at_origin_from_above_and_behind() {
        let mut cam = PerspectiveCamera::default();
        cam.set_position(Vec3::new(0.0, 5.0, 5.0));
        assert!(cam.look_at(Vec3::ZERO));
        assert!(approx(cam.forward(), Vec3::new(0.0, -1.0, -1.0).normalize()));
    }

    #[test]
    fn look_at_matches_glam_view() {
        let mut cam = PerspectiveCamera::default();
        cam.set_position(Vec3::new(3.0, 2.0, -4.0));
        cam.look_at(Vec3::new(1.0, 0.0, 1.0));
        let expected = Mat4::look_at_rh(cam.position(), Vec3::new(1.0, 0.0, 1.0), Vec3::Y);
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn degenerate_look_at_keeps_rotation() {
        let mut cam = PerspectiveCamera::default();
        cam.set_position(Vec3::new(0.0, 5.0, 5.0));
        cam.look_at(Vec3::ZERO);
        let before = cam.transform.rotation;

        assert!(!cam.look_at(cam.position()));
        assert!(!cam.look_at(Vec3::new(0.0, -10.0, 5.0)));
        assert_eq!(cam.transform.rotation, before);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let mut cam = PerspectiveCamera::default();
        cam.set_position(Vec3::new(0.0, 5.0, 5.0));
        cam.look_at(Vec3::ZERO);
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
