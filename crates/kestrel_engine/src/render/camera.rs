//! Fly-style 3D camera
//!
//! Maintains a position and a yaw/pitch parameterized orientation. The
//! front/right/up basis is never mutated directly: it is re-derived
//! deterministically from the two angles and the fixed world-up reference on
//! every change, which keeps the basis orthonormal regardless of accumulated
//! floating-point error in the angles.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Pitch is clamped strictly inside +-90 degrees so the derived front vector
/// can never align with world-up, which would make `front x world_up`
/// degenerate.
const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Yaw/pitch camera with derived orthonormal basis and projection parameters
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    world_up: Vec3,

    // Euler angles, degrees
    yaw: f32,
    pitch: f32,

    // Derived basis, orthonormal by construction
    front: Vec3,
    right: Vec3,
    up: Vec3,

    // Projection parameters
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    /// Camera at (0, 2, 5) looking at the origin, 45 degree FOV, 16:9
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            world_up: Vec3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_y: utils::deg_to_rad(45.0),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        };
        camera.set_target(Vec3::zeros());
        camera
    }
}

impl Camera {
    /// Create a camera at `position` looking at `target`
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            ..Self::default()
        };
        camera.set_target(target);
        camera
    }

    /// Set the camera position
    ///
    /// Orientation is angle-derived, not target-derived, so no basis
    /// recomputation is needed.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Add a delta to the camera position
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Re-derive yaw and pitch so `front` points exactly at `target`
    ///
    /// The only entry point that derives the angles from a point rather than
    /// accepting them directly. A target coincident with the position is
    /// ignored: there is no direction to derive.
    pub fn set_target(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.norm_squared() < f32::EPSILON {
            log::warn!("camera target coincides with position, orientation unchanged");
            return;
        }
        let front = direction.normalize();
        self.pitch = utils::rad_to_deg(front.y.asin()).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.yaw = utils::rad_to_deg(front.z.atan2(front.x));
        self.update_vectors();
    }

    /// Rotate the camera horizontally by `delta_degrees`
    ///
    /// Yaw is wrapped into [-180, 180) to bound floating-point growth over
    /// long sessions; trigonometric reconstruction is periodic so wrapping
    /// does not change the orientation.
    pub fn rotate_yaw(&mut self, delta_degrees: f32) {
        debug_assert!(delta_degrees.is_finite(), "non-finite yaw delta");
        self.yaw = utils::wrap_degrees(self.yaw + delta_degrees);
        self.update_vectors();
    }

    /// Rotate the camera vertically by `delta_degrees`, clamped to +-89
    pub fn rotate_pitch(&mut self, delta_degrees: f32) {
        debug_assert!(delta_degrees.is_finite(), "non-finite pitch delta");
        self.pitch = (self.pitch + delta_degrees).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.update_vectors();
    }

    /// Dolly along the current front vector (not an FOV change)
    pub fn zoom(&mut self, delta: f32) {
        debug_assert!(delta.is_finite(), "non-finite zoom delta");
        self.position += self.front * delta;
    }

    /// Update the aspect ratio used by the projection matrix
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Build a look-at view transform from the current state
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Build the perspective projection matrix from the current parameters
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Camera position in world space
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit vector pointing where the camera looks
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector pointing to the camera's right
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit vector pointing up from the camera
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Horizontal look angle in degrees
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Vertical look angle in degrees
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Re-derive the orthonormal basis from (yaw, pitch, world_up)
    ///
    /// Ordering matters: front from the angles, right from front x world_up,
    /// up from right x front. This guarantees pairwise orthogonality.
    fn update_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);

        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(camera: &Camera) {
        assert_relative_eq!(camera.front().norm(), 1.0, epsilon = EPS);
        assert_relative_eq!(camera.right().norm(), 1.0, epsilon = EPS);
        assert_relative_eq!(camera.up().norm(), 1.0, epsilon = EPS);
        assert_relative_eq!(camera.front().dot(&camera.right()), 0.0, epsilon = EPS);
        assert_relative_eq!(camera.front().dot(&camera.up()), 0.0, epsilon = EPS);
        assert_relative_eq!(camera.right().dot(&camera.up()), 0.0, epsilon = EPS);
    }

    #[test]
    fn test_basis_orthonormal_across_angles() {
        let mut camera = Camera::default();
        for yaw in [-170.0, -90.0, -45.0, 0.0, 30.0, 90.0, 179.0] {
            for pitch in [-88.0, -45.0, 0.0, 45.0, 88.0] {
                camera.rotate_yaw(yaw - camera.yaw());
                camera.rotate_pitch(pitch - camera.pitch());
                assert_orthonormal(&camera);
            }
        }
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let mut camera = Camera::default();
        camera.rotate_yaw(33.0);
        camera.rotate_pitch(-20.0);

        let (front, right, up) = (camera.front(), camera.right(), camera.up());
        camera.rotate_yaw(0.0);
        camera.rotate_pitch(0.0);

        assert_relative_eq!((camera.front() - front).norm(), 0.0, epsilon = EPS);
        assert_relative_eq!((camera.right() - right).norm(), 0.0, epsilon = EPS);
        assert_relative_eq!((camera.up() - up).norm(), 0.0, epsilon = EPS);
    }

    #[test]
    fn test_pitch_clamped_not_wrapped() {
        let mut camera = Camera::default();
        camera.rotate_pitch(1000.0);
        assert_relative_eq!(camera.pitch(), 89.0);
        assert_orthonormal(&camera);

        camera.rotate_pitch(-5000.0);
        assert_relative_eq!(camera.pitch(), -89.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_yaw_stays_bounded() {
        let mut camera = Camera::default();
        for _ in 0..100 {
            camera.rotate_yaw(97.0);
        }
        assert!(camera.yaw() >= -180.0 && camera.yaw() < 180.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_set_target_points_front_at_target() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 2.0, 5.0));
        camera.set_target(Vec3::zeros());

        let expected = (Vec3::zeros() - camera.position()).normalize();
        assert_relative_eq!((camera.front() - expected).norm(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_view_matrix_places_target_forward() {
        // Camera at (0,2,5) looking at the origin: the origin must land on the
        // negative view-space Z axis, at look-at distance.
        let camera = Camera::looking_at(Vec3::new(0.0, 2.0, 5.0), Vec3::zeros());
        let view = camera.view_matrix();

        let origin = view.transform_point(&nalgebra::Point3::origin());
        let distance = camera.position().norm();
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(origin.z, -distance, epsilon = 1e-3);
    }

    #[test]
    fn test_zoom_moves_along_front() {
        let mut camera = Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros());
        let front = camera.front();
        let before = camera.position();
        camera.zoom(2.0);
        assert_relative_eq!((camera.position() - (before + front * 2.0)).norm(), 0.0, epsilon = EPS);
    }

    #[test]
    fn test_degenerate_target_ignored() {
        let mut camera = Camera::default();
        let front = camera.front();
        camera.set_target(camera.position());
        assert_relative_eq!((camera.front() - front).norm(), 0.0, epsilon = EPS);
    }

    #[test]
    fn test_translate_does_not_touch_basis() {
        let mut camera = Camera::default();
        let front = camera.front();
        camera.translate(Vec3::new(10.0, -3.0, 2.5));
        assert_relative_eq!((camera.front() - front).norm(), 0.0, epsilon = EPS);
    }
}
