use glam::{Mat4, Vec2, Vec3};

use crate::options::CameraOptions;
use crate::picking::Ray;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Camera {
    /// Camera on the view axis at `depth`, looking toward `-z`.
    #[must_use]
    pub fn looking_down_depth(
        options: &CameraOptions,
        depth: f32,
        viewport: (u32, u32),
    ) -> Self {
        let eye = Vec3::new(0.0, 0.0, depth);
        Self {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect: aspect_ratio(viewport),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Update the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio((width, height));
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// World-to-view transform.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }

    /// Ray from the eye through a point in normalized device coordinates
    /// (`[-1, 1]` on both axes, `+y` up).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.build_matrix().inverse();
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(self.eye, far - self.eye)
    }

    /// Distance of a world point in front of the eye, measured along the
    /// view axis.
    #[must_use]
    pub fn view_depth(&self, point: Vec3) -> f32 {
        (point - self.eye).dot(self.forward())
    }
}

/// Width over height, guarding against a zero-height viewport.
fn aspect_ratio((width, height): (u32, u32)) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Update the matrix from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::looking_down_depth(&CameraOptions::default(), 0.0, (800, 600))
    }

    #[test]
    fn uniform_is_the_bare_view_projection() {
        assert_eq!(size_of::<CameraUniform>(), size_of::<[[f32; 4]; 4]>());
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera());
        assert_eq!(uniform.view_proj, camera().build_matrix().to_cols_array_2d());
    }

    #[test]
    fn center_ray_points_down_negative_z() {
        let ray = camera().ray_from_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn corner_rays_diverge_with_screen_axes() {
        let cam = camera();
        let up_right = cam.ray_from_ndc(Vec2::new(1.0, 1.0));
        assert!(up_right.direction.x > 0.0);
        assert!(up_right.direction.y > 0.0);
        assert!(up_right.direction.z < 0.0);
        // Wider than tall: the horizontal edge is further out.
        assert!(up_right.direction.x > up_right.direction.y);
    }

    #[test]
    fn ndc_round_trips_through_projection() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::new(0.3, -0.6));
        let point = ray.at(5.0);
        let clip = cam.build_matrix().project_point3(point);
        assert!((clip.x - 0.3).abs() < 1e-3);
        assert!((clip.y + 0.6).abs() < 1e-3);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = camera();
        cam.resize(1000, 500);
        assert_eq!(cam.aspect, 2.0);
        cam.resize(1000, 0);
        assert_eq!(cam.aspect, 1000.0);
    }

    #[test]
    fn view_depth_measures_along_forward() {
        let cam = camera();
        assert!((cam.view_depth(Vec3::new(1.0, 1.0, -3.0)) - 3.0).abs() < 1e-6);
    }
}
