use crate::camera::Camera3d;
use crate::color::{self, Color, WHITE};
use crate::context::{Capabilities, PolygonModeScope, RenderContext};
use crate::editor::ParameterEditor;
use crate::resource::{
    GpuMesh, Material, MaterialType, Resources, ShaderProgram, Texture, UniformValue,
};
use glamx::Mat4;
use std::rc::Rc;
use std::sync::Arc;
use wgpu::{PolygonMode, PrimitiveTopology};

/// A flat-colored material, optionally modulated by a single texture.
///
/// Draws with the depth test enabled and face culling disabled.
pub struct StandardMaterial {
    shader: Option<Rc<dyn ShaderProgram>>,
    texture: Option<Arc<Texture>>,
    color: Color,
}

impl StandardMaterial {
    /// Creates a white, untextured material using the flat shader.
    pub fn new(resources: &mut Resources) -> StandardMaterial {
        let paths = resources.config.flat_shader.clone();

        StandardMaterial {
            shader: resources.shader(&paths),
            texture: None,
            color: WHITE,
        }
    }

    /// Creates a white material textured with the image at `texture_path`.
    ///
    /// If the texture cannot be loaded the material still draws, with the
    /// `u_texture` uniform left unbound.
    pub fn with_texture(resources: &mut Resources, texture_path: &str) -> StandardMaterial {
        let paths = resources.config.texture_shader.clone();

        StandardMaterial {
            shader: resources.shader(&paths),
            texture: resources.texture(texture_path),
            color: WHITE,
        }
    }

    /// Sets the base color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Draws `mesh`, assuming the shader is already enabled.
    fn draw(&self, mesh: &dyn GpuMesh, transform: &Mat4, camera: &dyn Camera3d, time: f32) {
        self.set_uniforms(camera, transform, time);
        mesh.render(PrimitiveTopology::TriangleList);
    }
}

impl Material for StandardMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Standard
    }

    fn shader(&self) -> Option<&Rc<dyn ShaderProgram>> {
        self.shader.as_ref()
    }

    fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_uniforms(&self, camera: &dyn Camera3d, transform: &Mat4, time: f32) {
        let shader = match self.shader {
            Some(ref shader) => shader,
            None => return,
        };

        shader.set_uniform("u_viewprojection", UniformValue::Mat4(camera.transformation()));
        shader.set_uniform("u_camera_position", UniformValue::Vec3(camera.eye()));
        shader.set_uniform("u_model", UniformValue::Mat4(*transform));
        shader.set_uniform("u_time", UniformValue::Float(time));
        shader.set_uniform("u_color", UniformValue::Vec4(color::to_vec4(self.color)));

        if let Some(ref texture) = self.texture {
            shader.set_uniform("u_texture", UniformValue::Texture(texture, 0));
        }
    }

    fn render(
        &mut self,
        mesh: Option<&dyn GpuMesh>,
        transform: &Mat4,
        camera: &dyn Camera3d,
        context: &mut RenderContext<'_>,
    ) {
        let (mesh, shader) = match (mesh, self.shader.as_ref()) {
            (Some(mesh), Some(shader)) => (mesh, shader),
            _ => return,
        };

        context.backend.enable(Capabilities::DEPTH_TEST);
        context.backend.disable(Capabilities::CULL_FACE);

        shader.enable();
        self.draw(mesh, transform, camera, context.time);
        shader.disable();
    }

    fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor) {
        let _ = editor.edit_color("Color", &mut self.color);
    }
}

/// A standard material whose triangles are rasterized as lines.
///
/// The polygon mode is switched back to filled before `render` returns.
pub struct WireframeMaterial {
    inner: StandardMaterial,
}

impl WireframeMaterial {
    /// Creates a white wireframe material using the flat shader.
    pub fn new(resources: &mut Resources) -> WireframeMaterial {
        WireframeMaterial {
            inner: StandardMaterial::new(resources),
        }
    }

    /// Sets the line color.
    pub fn set_color(&mut self, color: Color) {
        self.inner.set_color(color);
    }
}

impl Material for WireframeMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Standard
    }

    fn shader(&self) -> Option<&Rc<dyn ShaderProgram>> {
        self.inner.shader()
    }

    fn texture(&self) -> Option<&Arc<Texture>> {
        self.inner.texture()
    }

    fn color(&self) -> Color {
        self.inner.color()
    }

    fn set_uniforms(&self, camera: &dyn Camera3d, transform: &Mat4, time: f32) {
        self.inner.set_uniforms(camera, transform, time)
    }

    fn render(
        &mut self,
        mesh: Option<&dyn GpuMesh>,
        transform: &Mat4,
        camera: &dyn Camera3d,
        context: &mut RenderContext<'_>,
    ) {
        let (mesh, shader) = match (mesh, self.inner.shader.as_ref()) {
            (Some(mesh), Some(shader)) => (mesh, shader),
            _ => return,
        };

        let time = context.time;
        context.backend.enable(Capabilities::DEPTH_TEST);
        context.backend.disable(Capabilities::CULL_FACE);

        let _lines = PolygonModeScope::new(&mut *context.backend, PolygonMode::Line);
        shader.enable();
        self.inner.draw(mesh, transform, camera, time);
        shader.disable();
    }

    fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor) {
        self.inner.render_parameter_editor(editor)
    }
}
