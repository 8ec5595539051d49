//! Resource handles, their managers, and the material trait.

pub use crate::resource::environment::{
    EnvironmentLevel, EnvironmentMap, EnvironmentMapCache, EnvironmentMapLoader,
    EnvironmentSource, CUBE_FACE_COUNT,
};
pub use crate::resource::material::{Material, MaterialType, UpdateContext};
pub use crate::resource::mesh::GpuMesh;
pub use crate::resource::resources::Resources;
pub use crate::resource::shader::{ShaderCompiler, ShaderManager, ShaderProgram, UniformValue};
pub use crate::resource::texture_manager::{
    GpuTexture, Texture, TextureFactory, TextureKind, TextureManager,
};
pub use crate::resource::wgpu_texture_factory::WgpuTextureFactory;

mod environment;
pub mod material;
mod mesh;
mod resources;
mod shader;
mod texture_manager;
mod wgpu_texture_factory;
