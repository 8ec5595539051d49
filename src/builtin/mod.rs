//! Built-in materials.

pub use self::pbr_material::{
    ExtraFeatures, PbrMaterial, PbrTextureSlot, PbrToggles, RADIANCE_LEVELS, RADIANCE_TEXTURE_UNIT,
};
pub use self::scene_material::SceneMaterial;
pub use self::skybox_material::SkyboxMaterial;
pub use self::standard_material::{StandardMaterial, WireframeMaterial};

mod pbr_material;
mod scene_material;
mod skybox_material;
mod standard_material;
