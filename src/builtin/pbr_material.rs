use crate::camera::Camera3d;
use crate::color::{self, Color, WHITE};
use crate::context::{BlendScope, Capabilities, RenderContext};
use crate::editor::ParameterEditor;
use crate::error::{MaterialError, Result};
use crate::light::Light;
use crate::resource::{
    EnvironmentSource, GpuMesh, Material, MaterialType, Resources, ShaderProgram, Texture,
    UniformValue, UpdateContext,
};
use glamx::Mat4;
use std::rc::Rc;
use std::sync::Arc;
use wgpu::{BlendFactor, PrimitiveTopology};

/// Number of radiance levels built from an environment map.
pub const RADIANCE_LEVELS: usize = 6;
/// Texture unit of the sharpest radiance level. The others follow it.
pub const RADIANCE_TEXTURE_UNIT: u32 = PbrTextureSlot::ALL.len() as u32;

const RADIANCE_UNIFORMS: [&str; RADIANCE_LEVELS] = [
    "u_texture_prem",
    "u_texture_prem_0",
    "u_texture_prem_1",
    "u_texture_prem_2",
    "u_texture_prem_3",
    "u_texture_prem_4",
];

/// The texture slots of a PBR material, in texture unit order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PbrTextureSlot {
    Albedo,
    Roughness,
    Metalness,
    /// Precomputed BRDF integration lookup table.
    BrdfLut,
    Normal,
    AmbientOcclusion,
    Opacity,
    Emission,
}

impl PbrTextureSlot {
    /// Every slot, in texture unit order.
    pub const ALL: [PbrTextureSlot; 8] = [
        PbrTextureSlot::Albedo,
        PbrTextureSlot::Roughness,
        PbrTextureSlot::Metalness,
        PbrTextureSlot::BrdfLut,
        PbrTextureSlot::Normal,
        PbrTextureSlot::AmbientOcclusion,
        PbrTextureSlot::Opacity,
        PbrTextureSlot::Emission,
    ];

    /// Name of the sampler uniform this slot is bound to.
    pub fn uniform_name(self) -> &'static str {
        match self {
            PbrTextureSlot::Albedo => "u_albedo",
            PbrTextureSlot::Roughness => "u_roughness",
            PbrTextureSlot::Metalness => "u_metalness",
            PbrTextureSlot::BrdfLut => "u_brdfLUT",
            PbrTextureSlot::Normal => "u_normal_map",
            PbrTextureSlot::AmbientOcclusion => "u_ao_map",
            PbrTextureSlot::Opacity => "u_opacity_map",
            PbrTextureSlot::Emission => "u_emission_map",
        }
    }

    /// Texture unit this slot is bound to.
    #[inline]
    pub fn texture_unit(self) -> u32 {
        self as u32
    }
}

/// The optional effects a PBR material was built with.
///
/// Decides which of the opacity and emissive toggles the parameter editor shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtraFeatures {
    Neither,
    Opacity,
    Emissive,
    Both,
}

impl ExtraFeatures {
    pub fn from_flags(opacity: bool, emissive: bool) -> ExtraFeatures {
        match (opacity, emissive) {
            (true, true) => ExtraFeatures::Both,
            (true, false) => ExtraFeatures::Opacity,
            (false, true) => ExtraFeatures::Emissive,
            (false, false) => ExtraFeatures::Neither,
        }
    }

    #[inline]
    pub fn has_opacity(self) -> bool {
        matches!(self, ExtraFeatures::Opacity | ExtraFeatures::Both)
    }

    #[inline]
    pub fn has_emissive(self) -> bool {
        matches!(self, ExtraFeatures::Emissive | ExtraFeatures::Both)
    }

    /// Whether the shader takes its emissive-texture path.
    #[inline]
    pub fn is_helmet_variant(self) -> bool {
        self.has_emissive()
    }
}

/// The user-editable switches of a PBR material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PbrToggles {
    pub gamma_correction: bool,
    /// Alpha blending, from the opacity map.
    pub opacity: bool,
    pub emissive: bool,
    pub direct_light: bool,
    /// Image-based lighting from the radiance levels.
    pub ibl: bool,
}

/// A physically based material lit by one point light and by the environment
/// map currently displayed by the skybox.
///
/// The radiance levels are built from the environment source once at
/// construction, then rebuilt by `update` whenever the source changes.
pub struct PbrMaterial {
    shader: Option<Rc<dyn ShaderProgram>>,
    textures: [Option<Arc<Texture>>; 8],
    color: Color,
    light: Light,
    toggles: PbrToggles,
    extra_features: ExtraFeatures,
    is_helmet_variant: bool,
    radiance_levels: Vec<Arc<Texture>>,
    cached_source_name: String,
}

/// Builds the cubemaps of every radiance level of `source`, sharpest first.
fn build_radiance_levels(resources: &mut Resources, source: &str) -> Result<Vec<Arc<Texture>>> {
    (0..RADIANCE_LEVELS as u32)
        .map(|level| resources.environment_cubemap(source, level))
        .collect()
}

impl PbrMaterial {
    /// Creates a PBR material.
    ///
    /// # Arguments
    /// * `texture_names` - The texture of each slot, in [`PbrTextureSlot::ALL`] order. Slots
    ///   whose texture is `None`, or fails to load, stay unbound.
    /// * `opacity` - Whether the material blends using its opacity map
    /// * `emissive` - Whether the material uses its emission map
    /// * `resources` - The registries to acquire the shader and textures from
    /// * `environment` - The environment map to build the radiance levels from
    pub fn new(
        texture_names: [Option<&str>; 8],
        opacity: bool,
        emissive: bool,
        resources: &mut Resources,
        environment: &dyn EnvironmentSource,
    ) -> Result<PbrMaterial> {
        let source = environment
            .active_source_name()
            .ok_or(MaterialError::NoEnvironmentSource)?;
        let radiance_levels = build_radiance_levels(resources, source)?;

        let paths = resources.config.pbr_shader.clone();
        let shader = resources.shader(&paths);
        let textures = texture_names.map(|name| name.and_then(|name| resources.texture(name)));
        let extra_features = ExtraFeatures::from_flags(opacity, emissive);

        Ok(PbrMaterial {
            shader,
            textures,
            color: WHITE,
            light: Light::default(),
            toggles: PbrToggles {
                gamma_correction: true,
                opacity,
                emissive,
                direct_light: true,
                ibl: true,
            },
            extra_features,
            is_helmet_variant: extra_features.is_helmet_variant(),
            radiance_levels,
            cached_source_name: source.to_string(),
        })
    }

    /// Sets the base color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The point light of this material.
    #[inline]
    pub fn light(&self) -> &Light {
        &self.light
    }

    /// Sets the point light of this material.
    pub fn set_light(&mut self, light: Light) {
        self.light = light;
    }

    #[inline]
    pub fn toggles(&self) -> &PbrToggles {
        &self.toggles
    }

    #[inline]
    pub fn toggles_mut(&mut self) -> &mut PbrToggles {
        &mut self.toggles
    }

    /// The optional effects this material was built with.
    #[inline]
    pub fn extra_features(&self) -> ExtraFeatures {
        self.extra_features
    }

    #[inline]
    pub fn is_helmet_variant(&self) -> bool {
        self.is_helmet_variant
    }

    /// The texture bound to `slot`, if any.
    pub fn slot_texture(&self, slot: PbrTextureSlot) -> Option<&Arc<Texture>> {
        self.textures[slot as usize].as_ref()
    }

    /// The radiance cubemaps, sharpest first.
    ///
    /// Empty if the last rebuild failed.
    #[inline]
    pub fn radiance_levels(&self) -> &[Arc<Texture>] {
        &self.radiance_levels
    }

    /// The environment map the radiance levels were built from.
    #[inline]
    pub fn cached_source_name(&self) -> &str {
        &self.cached_source_name
    }
}

impl Material for PbrMaterial {
    fn material_type(&self) -> MaterialType {
        MaterialType::Pbr
    }

    fn shader(&self) -> Option<&Rc<dyn ShaderProgram>> {
        self.shader.as_ref()
    }

    fn texture(&self) -> Option<&Arc<Texture>> {
        self.slot_texture(PbrTextureSlot::Albedo)
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

        for (slot, texture) in PbrTextureSlot::ALL.iter().zip(self.textures.iter()) {
            if let Some(texture) = texture {
                shader.set_uniform(
                    slot.uniform_name(),
                    UniformValue::Texture(texture, slot.texture_unit()),
                );
            }
        }

        shader.set_uniform("u_light_pos", UniformValue::Vec3(self.light.position));
        shader.set_uniform("u_light_color", UniformValue::Vec3(color::to_vec3(self.light.diffuse)));

        for (i, (name, level)) in RADIANCE_UNIFORMS
            .iter()
            .zip(self.radiance_levels.iter())
            .enumerate()
        {
            shader.set_uniform(
                name,
                UniformValue::Texture(level, RADIANCE_TEXTURE_UNIT + i as u32),
            );
        }

        shader.set_uniform("u_gamma_correction", UniformValue::Bool(self.toggles.gamma_correction));
        shader.set_uniform("u_emission", UniformValue::Bool(self.toggles.emissive));
        shader.set_uniform("u_opacity", UniformValue::Bool(self.toggles.opacity));
        shader.set_uniform("u_direct_light", UniformValue::Bool(self.toggles.direct_light));
        shader.set_uniform("u_IBL", UniformValue::Bool(self.toggles.ibl));
        shader.set_uniform("u_helmet", UniformValue::Bool(self.is_helmet_variant));
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

        let time = context.time;
        context
            .backend
            .enable(Capabilities::DEPTH_TEST | Capabilities::CULL_FACE);

        shader.enable();
        {
            let _blend = if self.toggles.opacity {
                Some(BlendScope::new(
                    &mut *context.backend,
                    BlendFactor::SrcAlpha,
                    BlendFactor::OneMinusSrcAlpha,
                ))
            } else {
                None
            };

            self.set_uniforms(camera, transform, time);
            mesh.render(PrimitiveTopology::TriangleList);
        }
        shader.disable();
    }

    fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor) {
        let _ = editor.edit_color("Color", &mut self.color);
        let _ = editor.edit_vec3("Light Position", &mut self.light.position);
        let _ = editor.edit_color("Light Color", &mut self.light.diffuse);
        let _ = editor.edit_bool("Direct Light", &mut self.toggles.direct_light);
        let _ = editor.edit_bool("IBL", &mut self.toggles.ibl);

        if self.extra_features.has_opacity() {
            let _ = editor.edit_bool("Opacity", &mut self.toggles.opacity);
        }
        if self.extra_features.has_emissive() {
            let _ = editor.edit_bool("Emissive properties", &mut self.toggles.emissive);
        }

        let _ = editor.edit_bool("Gamma correction", &mut self.toggles.gamma_correction);
    }

    fn update(&mut self, _: f64, context: &mut UpdateContext<'_>) {
        let source = match context.environment.and_then(|e| e.active_source_name()) {
            Some(source) => source,
            None => return,
        };

        if source == self.cached_source_name {
            return;
        }

        match build_radiance_levels(context.resources, source) {
            Ok(levels) => {
                log::debug!("Rebuilt {} radiance levels from {}", levels.len(), source);
                self.radiance_levels = levels;
            }
            Err(e) => {
                log::error!("Unable to build the radiance levels of {}: {}", source, e);
                self.radiance_levels.clear();
            }
        }

        self.cached_source_name = source.to_string();
    }
}
