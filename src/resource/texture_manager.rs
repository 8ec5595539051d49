//! A resource manager to load textures.

use crate::error::Result;
use crate::resource::EnvironmentMap;
use std::collections::HashMap;
use std::sync::Arc;

/// What a texture was built as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// A flat 2D image.
    Flat,
    /// A cubemap assembled from six face images.
    Cubemap,
    /// A cubemap built from one radiance level of an environment map.
    EnvironmentCubemap {
        /// The radiance level, 0 being the sharpest.
        level: u32,
    },
}

/// GPU storage of a texture.
#[derive(Debug)]
pub struct GpuTexture {
    /// The underlying wgpu texture.
    pub texture: wgpu::Texture,
    /// The texture view for binding.
    pub view: wgpu::TextureView,
    /// The sampler for the texture.
    pub sampler: wgpu::Sampler,
}

/// A texture handle.
///
/// Textures are shared through `Arc` between every material that uses them and
/// are never mutated after creation.
#[derive(Debug)]
pub struct Texture {
    label: String,
    kind: TextureKind,
    size: (u32, u32),
    gpu: Option<GpuTexture>,
}

impl Texture {
    /// Creates a texture handle whose storage is owned by the host graphics layer.
    pub fn new(label: impl Into<String>, kind: TextureKind, size: (u32, u32)) -> Texture {
        Texture {
            label: label.into(),
            kind,
            size,
            gpu: None,
        }
    }

    /// Attaches wgpu storage to this handle.
    pub fn with_gpu(mut self, gpu: GpuTexture) -> Texture {
        self.gpu = Some(gpu);
        self
    }

    /// The path or name this texture was created from.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// What this texture was built as.
    #[inline]
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// Texture dimensions (width, height). For cubemaps, the size of one face.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// The wgpu storage of this texture, if it was uploaded by [`WgpuTextureFactory`](crate::resource::WgpuTextureFactory).
    #[inline]
    pub fn gpu(&self) -> Option<&GpuTexture> {
        self.gpu.as_ref()
    }
}

/// Creates textures on the GPU.
///
/// Decoding and upload are the factory's business; materials only ever see the
/// resulting handles.
pub trait TextureFactory {
    /// Loads a flat texture from an image file.
    fn load(&mut self, path: &str) -> Result<Texture>;

    /// Builds a cubemap from the six face images stored under `path`.
    fn cubemap_from_images(&mut self, path: &str) -> Result<Texture>;

    /// Builds a cubemap from one radiance level of an environment map.
    fn cubemap_from_environment(&mut self, environment: &EnvironmentMap, level: u32) -> Result<Texture>;
}

/// The texture manager.
///
/// It keeps a cache of already-loaded flat textures. Cubemaps are built on
/// request and owned by the material that asked for them.
pub struct TextureManager {
    factory: Box<dyn TextureFactory>,
    textures: HashMap<String, Arc<Texture>>,
}

impl TextureManager {
    /// Creates a new texture manager creating textures with `factory`.
    pub fn new(factory: Box<dyn TextureFactory>) -> TextureManager {
        TextureManager {
            factory,
            textures: HashMap::new(),
        }
    }

    /// Get a texture with the specified name. Returns `None` if the texture is not registered.
    pub fn get(&self, name: &str) -> Option<Arc<Texture>> {
        self.textures.get(name).cloned()
    }

    /// Get the texture loaded from `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &str) -> Result<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let texture = Arc::new(self.factory.load(path)?);
        let _ = self.textures.insert(path.to_string(), texture.clone());
        Ok(texture)
    }

    /// Adds a texture with the specified name to this cache.
    ///
    /// If a texture with same name exists, nothing is added and the old texture is returned.
    pub fn add(&mut self, texture: Arc<Texture>, name: &str) -> Arc<Texture> {
        self.textures
            .entry(name.to_string())
            .or_insert(texture)
            .clone()
    }

    /// Removes a texture from this cache.
    pub fn remove(&mut self, name: &str) {
        let _ = self.textures.remove(name);
    }

    /// Builds a cubemap from the six face images stored under `path`.
    pub fn cubemap_from_images(&mut self, path: &str) -> Result<Arc<Texture>> {
        self.factory.cubemap_from_images(path).map(Arc::new)
    }

    /// Builds a cubemap from one radiance level of an environment map.
    pub fn cubemap_from_environment(
        &mut self,
        environment: &EnvironmentMap,
        level: u32,
    ) -> Result<Arc<Texture>> {
        self.factory
            .cubemap_from_environment(environment, level)
            .map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, EventLog, RecordingTextureFactory};

    #[test]
    fn test_textures_are_loaded_once() {
        let log = EventLog::default();
        let mut textures = TextureManager::new(Box::new(RecordingTextureFactory::new(log.clone())));

        let a = textures.get_or_load("albedo.png").unwrap();
        let b = textures.get_or_load("albedo.png").unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.kind(), TextureKind::Flat);
        assert_eq!(log.count(|e| matches!(e, Event::LoadTexture(_))), 1);
    }

    #[test]
    fn test_missing_texture_is_an_error() {
        let log = EventLog::default();
        let factory = RecordingTextureFactory::new(log).missing("nope.png");
        let mut textures = TextureManager::new(Box::new(factory));

        assert!(textures.get_or_load("nope.png").is_err());
        assert!(textures.get("nope.png").is_none());
    }

    #[test]
    fn test_add_keeps_existing_texture() {
        let log = EventLog::default();
        let mut textures = TextureManager::new(Box::new(RecordingTextureFactory::new(log)));

        let first = textures.add(Arc::new(Texture::new("a", TextureKind::Flat, (1, 1))), "tex");
        let second = textures.add(Arc::new(Texture::new("b", TextureKind::Flat, (2, 2))), "tex");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(textures.get("tex").unwrap().label(), "a");
    }
}
