use glamx::{Mat4, Vec3};

/// Trait that all camera implementations must implement.
///
/// Materials only read from the camera: the eye position (for specular terms
/// and for keeping the skybox centered on the viewer) and the combined
/// view-projection matrix.
///
/// # Custom Cameras
/// Windowing and input handling live outside of this crate, so any camera the
/// host application drives can implement this trait.
pub trait Camera3d {
    /// Returns the camera's position in world space.
    fn eye(&self) -> Vec3;

    /// Returns the combined projection and view transformation matrix.
    ///
    /// This matrix transforms points from world coordinates to normalized device
    /// coordinates and is uploaded as `u_viewprojection`.
    fn transformation(&self) -> Mat4;

    /// Returns the inverse of the combined transformation matrix.
    fn inverse_transformation(&self) -> Mat4 {
        self.transformation().inverse()
    }
}
