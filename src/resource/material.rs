//! Trait implemented by materials.

use crate::camera::Camera3d;
use crate::color::Color;
use crate::context::RenderContext;
use crate::editor::ParameterEditor;
use crate::resource::{EnvironmentSource, GpuMesh, Resources, ShaderProgram, Texture};
use glamx::Mat4;
use std::rc::Rc;
use std::sync::Arc;

/// The family a material belongs to.
///
/// Wireframe materials report [`MaterialType::Standard`]: they only differ by
/// how their draw call is rasterized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialType {
    /// Flat color, optionally textured.
    Standard,
    /// Background cubemap.
    Skybox,
    /// Physically based, with direct and image-based lighting.
    Pbr,
}

/// Context passed to materials on update.
pub struct UpdateContext<'a> {
    /// Registries to rebuild derived resources from.
    pub resources: &'a mut Resources,
    /// The environment currently displayed by the skybox, if any.
    pub environment: Option<&'a dyn EnvironmentSource>,
}

/// Trait implemented by materials.
///
/// A material binds its shader, uploads the uniforms the shader needs, and
/// issues the draw call of a mesh. Any global render state it changes for its
/// draw is restored before `render` returns: polygons are filled and blending
/// is disabled again.
pub trait Material {
    /// The family this material belongs to.
    fn material_type(&self) -> MaterialType;

    /// The shader program this material draws with, if it could be acquired.
    fn shader(&self) -> Option<&Rc<dyn ShaderProgram>>;

    /// The main texture of this material, if any.
    fn texture(&self) -> Option<&Arc<Texture>>;

    /// The base color of this material.
    fn color(&self) -> Color;

    /// Uploads every uniform the shader needs for one draw.
    ///
    /// Must only be called while the shader is enabled. Does nothing if the
    /// material has no shader.
    fn set_uniforms(&self, camera: &dyn Camera3d, transform: &Mat4, time: f32);

    /// Renders `mesh` with this material.
    ///
    /// This is a no-op, leaving the render state untouched, if either the mesh or
    /// the shader is missing.
    ///
    /// # Arguments
    /// * `mesh` - The mesh to draw
    /// * `transform` - The model matrix of the mesh
    /// * `camera` - The camera
    /// * `context` - Render state and frame clock
    fn render(
        &mut self,
        mesh: Option<&dyn GpuMesh>,
        transform: &Mat4,
        camera: &dyn Camera3d,
        context: &mut RenderContext<'_>,
    );

    /// Exposes the editable parameters of this material.
    ///
    /// Safe to call every frame.
    fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor);

    /// Advances time-dependent or externally-dependent state.
    fn update(&mut self, _seconds_elapsed: f64, _context: &mut UpdateContext<'_>) {}

    /// The environment this material displays, for materials that light others.
    fn environment_source(&self) -> Option<&dyn EnvironmentSource> {
        None
    }
}
