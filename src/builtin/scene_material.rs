use crate::builtin::{PbrMaterial, SkyboxMaterial, StandardMaterial, WireframeMaterial};
use crate::camera::Camera3d;
use crate::color::Color;
use crate::context::RenderContext;
use crate::editor::ParameterEditor;
use crate::resource::{
    EnvironmentSource, GpuMesh, Material, MaterialType, ShaderProgram, Texture, UpdateContext,
};
use glamx::Mat4;
use std::rc::Rc;
use std::sync::Arc;

/// Any of the built-in materials.
///
/// Scene nodes own their material through this enum, so the skybox can be
/// recognized without downcasting.
pub enum SceneMaterial {
    Standard(StandardMaterial),
    Wireframe(WireframeMaterial),
    Skybox(SkyboxMaterial),
    Pbr(PbrMaterial),
}

impl SceneMaterial {
    /// The skybox material, if this is one.
    pub fn as_skybox(&self) -> Option<&SkyboxMaterial> {
        match self {
            SceneMaterial::Skybox(skybox) => Some(skybox),
            _ => None,
        }
    }

    /// The skybox material, mutably, if this is one.
    pub fn as_skybox_mut(&mut self) -> Option<&mut SkyboxMaterial> {
        match self {
            SceneMaterial::Skybox(skybox) => Some(skybox),
            _ => None,
        }
    }

    /// The PBR material, if this is one.
    pub fn as_pbr(&self) -> Option<&PbrMaterial> {
        match self {
            SceneMaterial::Pbr(pbr) => Some(pbr),
            _ => None,
        }
    }

    /// The PBR material, mutably, if this is one.
    pub fn as_pbr_mut(&mut self) -> Option<&mut PbrMaterial> {
        match self {
            SceneMaterial::Pbr(pbr) => Some(pbr),
            _ => None,
        }
    }

    fn as_material(&self) -> &dyn Material {
        match self {
            SceneMaterial::Standard(m) => m,
            SceneMaterial::Wireframe(m) => m,
            SceneMaterial::Skybox(m) => m,
            SceneMaterial::Pbr(m) => m,
        }
    }

    fn as_material_mut(&mut self) -> &mut dyn Material {
        match self {
            SceneMaterial::Standard(m) => m,
            SceneMaterial::Wireframe(m) => m,
            SceneMaterial::Skybox(m) => m,
            SceneMaterial::Pbr(m) => m,
        }
    }
}

impl Material for SceneMaterial {
    fn material_type(&self) -> MaterialType {
        self.as_material().material_type()
    }

    fn shader(&self) -> Option<&Rc<dyn ShaderProgram>> {
        self.as_material().shader()
    }

    fn texture(&self) -> Option<&Arc<Texture>> {
        self.as_material().texture()
    }

    fn color(&self) -> Color {
        self.as_material().color()
    }

    fn set_uniforms(&self, camera: &dyn Camera3d, transform: &Mat4, time: f32) {
        self.as_material().set_uniforms(camera, transform, time)
    }

    fn render(
        &mut self,
        mesh: Option<&dyn GpuMesh>,
        transform: &Mat4,
        camera: &dyn Camera3d,
        context: &mut RenderContext<'_>,
    ) {
        self.as_material_mut().render(mesh, transform, camera, context)
    }

    fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor) {
        self.as_material_mut().render_parameter_editor(editor)
    }

    fn update(&mut self, seconds_elapsed: f64, context: &mut UpdateContext<'_>) {
        self.as_material_mut().update(seconds_elapsed, context)
    }

    fn environment_source(&self) -> Option<&dyn EnvironmentSource> {
        self.as_material().environment_source()
    }
}

impl From<StandardMaterial> for SceneMaterial {
    fn from(material: StandardMaterial) -> Self {
        SceneMaterial::Standard(material)
    }
}

impl From<WireframeMaterial> for SceneMaterial {
    fn from(material: WireframeMaterial) -> Self {
        SceneMaterial::Wireframe(material)
    }
}

impl From<SkyboxMaterial> for SceneMaterial {
    fn from(material: SkyboxMaterial) -> Self {
        SceneMaterial::Skybox(material)
    }
}

impl From<PbrMaterial> for SceneMaterial {
    fn from(material: PbrMaterial) -> Self {
        SceneMaterial::Pbr(material)
    }
}
