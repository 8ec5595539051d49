use crate::camera::Camera3d;
use glamx::{Mat4, Vec3};
use std::f32;

/// A camera looking at a fixed point from a fixed position.
///
/// The host moves it explicitly with [`FixedView3d::look_at`] and keeps its
/// aspect ratio in sync with [`FixedView3d::set_framebuffer_size`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedView3d {
    fov: f32,
    znear: f32,
    zfar: f32,
    eye: Vec3,
    at: Vec3,
    proj: Mat4,
    view: Mat4,
    last_framebuffer_size: (f32, f32),
}

impl Default for FixedView3d {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedView3d {
    /// Create a new static camera.
    pub fn new() -> FixedView3d {
        FixedView3d::new_with_frustum(f32::consts::PI / 4.0, 0.1, 10000.0)
    }

    /// Creates a new camera with the given vertical field of view and clip planes.
    pub fn new_with_frustum(fov: f32, znear: f32, zfar: f32) -> FixedView3d {
        let mut res = FixedView3d {
            fov,
            znear,
            zfar,
            eye: Vec3::new(0.0, 0.0, 5.0),
            at: Vec3::ZERO,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            last_framebuffer_size: (800.0, 600.0),
        };
        res.update_projviews();
        res
    }

    /// Moves the camera to `eye`, looking at `at` with +Y up.
    pub fn look_at(&mut self, eye: Vec3, at: Vec3) {
        self.eye = eye;
        self.at = at;
        self.update_projviews();
    }

    /// The point the camera looks at.
    pub fn at(&self) -> Vec3 {
        self.at
    }

    /// The near and far clipping plane distances.
    pub fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    /// Updates the aspect ratio after the framebuffer was resized.
    pub fn set_framebuffer_size(&mut self, width: u32, height: u32) {
        self.last_framebuffer_size = (width.max(1) as f32, height.max(1) as f32);
        self.update_projviews();
    }

    fn update_projviews(&mut self) {
        let aspect = self.last_framebuffer_size.0 / self.last_framebuffer_size.1;
        self.proj = Mat4::perspective_rh_gl(self.fov, aspect, self.znear, self.zfar);
        self.view = Mat4::look_at_rh(self.eye, self.at, Vec3::Y);
    }
}

impl Camera3d for FixedView3d {
    fn eye(&self) -> Vec3 {
        self.eye
    }

    fn transformation(&self) -> Mat4 {
        self.proj * self.view
    }
}
