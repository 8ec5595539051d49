use crate::camera::Camera3d;
use crate::color::{Color, WHITE};
use crate::config::ENVIRONMENT_SOURCE_COUNT;
use crate::context::{Capabilities, RenderContext};
use crate::editor::ParameterEditor;
use crate::error::{MaterialError, Result};
use crate::resource::{
    EnvironmentSource, GpuMesh, Material, MaterialType, Resources, ShaderProgram, Texture,
    UniformValue,
};
use glamx::Mat4;
use std::rc::Rc;
use std::sync::Arc;
use wgpu::PrimitiveTopology;

/// The environment sources of an environment-mapped skybox, and which one is shown.
///
/// The displayed name and cubemap are both derived from `selected`, so switching
/// source is a single assignment.
struct EnvironmentSelection {
    sources: [String; ENVIRONMENT_SOURCE_COUNT],
    cubemaps: Vec<Arc<Texture>>,
    selected: usize,
}

enum SkyboxMode {
    /// A cubemap assembled from six face images.
    Static { source: String, texture: Arc<Texture> },
    /// One of the configured environment maps, at its sharpest radiance level.
    Environment(EnvironmentSelection),
}

/// A cubemap drawn around the camera.
///
/// The cube follows the camera position, so only camera rotations are visible on
/// it. Scene nodes holding a skybox disable the depth test around its draw.
///
/// [`Material::render`] itself only disables face culling and leaves the depth
/// test as the caller set it. Callers drawing a skybox outside a
/// [`SceneNode`](crate::scene::SceneNode) must disable the depth test themselves.
pub struct SkyboxMaterial {
    shader: Option<Rc<dyn ShaderProgram>>,
    mode: SkyboxMode,
    color: Color,
}

impl SkyboxMaterial {
    /// Creates a skybox showing the cubemap whose six faces are stored in the directory `path`.
    pub fn from_images(resources: &mut Resources, path: &str) -> Result<SkyboxMaterial> {
        let paths = resources.config.skybox_shader.clone();
        let shader = resources.shader(&paths);
        let texture = resources.textures.cubemap_from_images(path)?;

        Ok(SkyboxMaterial {
            shader,
            mode: SkyboxMode::Static {
                source: path.to_string(),
                texture,
            },
            color: WHITE,
        })
    }

    /// Creates a skybox able to show any of the configured environment maps.
    ///
    /// The level 0 cubemap of every source is built upfront, and the first
    /// source is shown.
    pub fn environment_mapped(resources: &mut Resources) -> Result<SkyboxMaterial> {
        let paths = resources.config.skybox_shader.clone();
        let shader = resources.shader(&paths);
        let sources = resources.config.environment_sources.clone();

        let cubemaps = sources
            .iter()
            .map(|source| resources.environment_cubemap(source, 0))
            .collect::<Result<Vec<_>>>()?;

        Ok(SkyboxMaterial {
            shader,
            mode: SkyboxMode::Environment(EnvironmentSelection {
                sources,
                cubemaps,
                selected: 0,
            }),
            color: WHITE,
        })
    }

    /// Whether this skybox shows one of the environment maps.
    #[inline]
    pub fn is_environment_mapped(&self) -> bool {
        matches!(self.mode, SkyboxMode::Environment(_))
    }

    /// The asset currently shown.
    pub fn active_source_name(&self) -> &str {
        match self.mode {
            SkyboxMode::Static { ref source, .. } => source,
            SkyboxMode::Environment(ref selection) => &selection.sources[selection.selected],
        }
    }

    /// The environment maps this skybox can switch between, empty for a static skybox.
    pub fn available_sources(&self) -> &[String] {
        match self.mode {
            SkyboxMode::Static { .. } => &[],
            SkyboxMode::Environment(ref selection) => &selection.sources,
        }
    }

    /// Index of the environment map shown, if environment-mapped.
    pub fn selected_index(&self) -> Option<usize> {
        match self.mode {
            SkyboxMode::Static { .. } => None,
            SkyboxMode::Environment(ref selection) => Some(selection.selected),
        }
    }

    /// Shows the environment map at `index`.
    ///
    /// Returns `Ok(false)` if it was already shown. No cubemap is rebuilt: every
    /// source was built at construction.
    pub fn select_source(&mut self, index: usize) -> Result<bool> {
        let selection = match self.mode {
            SkyboxMode::Environment(ref mut selection) => selection,
            SkyboxMode::Static { .. } => return Err(MaterialError::NotEnvironmentMapped),
        };

        if index >= selection.sources.len() {
            return Err(MaterialError::InvalidSourceIndex {
                index,
                count: selection.sources.len(),
            });
        }

        if index == selection.selected {
            return Ok(false);
        }

        selection.selected = index;
        log::info!("Skybox switched to {}", selection.sources[index]);
        Ok(true)
    }
}

impl EnvironmentSource for SkyboxMaterial {
    fn active_source_name(&self) -> Option<&str> {
        match self.mode {
            SkyboxMode::Static { .. } => None,
            SkyboxMode::Environment(ref selection) => Some(&selection.sources[selection.selected]),
        }
    }
}

impl Material for SkyboxMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Skybox
    }

    fn shader(&self) -> Option<&Rc<dyn ShaderProgram>> {
        self.shader.as_ref()
    }

    fn texture(&self) -> Option<&Arc<Texture>> {
        match self.mode {
            SkyboxMode::Static { ref texture, .. } => Some(texture),
            SkyboxMode::Environment(ref selection) => selection.cubemaps.get(selection.selected),
        }
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_uniforms(&self, camera: &dyn Camera3d, transform: &Mat4, _time: f32) {
        let shader = match self.shader {
            Some(ref shader) => shader,
            None => return,
        };

        let model = Mat4::from_translation(camera.eye()) * *transform;

        shader.set_uniform("u_viewprojection", UniformValue::Mat4(camera.transformation()));
        shader.set_uniform("u_model", UniformValue::Mat4(model));
        if let Some(texture) = self.texture() {
            shader.set_uniform("u_skybox", UniformValue::Texture(texture, 0));
        }
        shader.set_uniform("u_hdre", UniformValue::Bool(self.is_environment_mapped()));
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

        context.backend.disable(Capabilities::CULL_FACE);

        shader.enable();
        self.set_uniforms(camera, transform, context.time);
        mesh.render(PrimitiveTopology::TriangleList);
        shader.disable();
    }

    fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor) {
        let mut selected = match self.selected_index() {
            Some(selected) => selected,
            None => return,
        };

        let changed = {
            let names: Vec<&str> = self.available_sources().iter().map(|s| s.as_str()).collect();
            editor.edit_choice("HDRE texture", &mut selected, &names)
        };

        if changed {
            if let Err(e) = self.select_source(selected) {
                log::warn!("{}", e);
            }
        }
    }

    fn environment_source(&self) -> Option<&dyn EnvironmentSource> {
        if self.is_environment_mapped() {
            Some(self)
        } else {
            None
        }
    }
}
