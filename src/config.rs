//! Asset paths and constants the built-in materials are configured with.

/// Number of environment sources an environment-mapped skybox can switch between.
pub const ENVIRONMENT_SOURCE_COUNT: usize = 3;

/// A vertex/fragment source pair identifying one shader program in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShaderPaths {
    /// Path of the vertex stage.
    pub vertex: String,
    /// Path of the fragment stage.
    pub fragment: String,
}

impl ShaderPaths {
    /// Creates a new vertex/fragment pair.
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> ShaderPaths {
        ShaderPaths {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Configuration shared by every built-in material.
///
/// The defaults point to the `data/` layout the stock shaders and environment
/// maps ship with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialConfig {
    /// Program used by untextured standard and wireframe materials.
    pub flat_shader: ShaderPaths,
    /// Program used by standard materials built with a texture.
    pub texture_shader: ShaderPaths,
    /// Program used by skyboxes.
    pub skybox_shader: ShaderPaths,
    /// Program used by PBR materials.
    pub pbr_shader: ShaderPaths,
    /// Environment maps an environment-mapped skybox can display.
    pub environment_sources: [String; ENVIRONMENT_SOURCE_COUNT],
    /// Uniform scale applied to the skybox cube.
    pub skybox_scale: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        MaterialConfig {
            flat_shader: ShaderPaths::new("data/shaders/basic.vs", "data/shaders/flat.fs"),
            texture_shader: ShaderPaths::new("data/shaders/basic.vs", "data/shaders/texture.fs"),
            skybox_shader: ShaderPaths::new("data/shaders/skybox.vs", "data/shaders/skybox.fs"),
            pbr_shader: ShaderPaths::new("data/shaders/pbr.vs", "data/shaders/pbr.fs"),
            environment_sources: [
                "data/environments/studio.hdre".to_string(),
                "data/environments/tv_studio.hdre".to_string(),
                "data/environments/panorama.hdre".to_string(),
            ],
            skybox_scale: 3000.0,
        }
    }
}
