//! Environment maps: decoded radiance levels, their cache, and the active source
//! materials build image-based lighting from.

use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Number of faces of a cubemap.
pub const CUBE_FACE_COUNT: usize = 6;

/// One radiance level of an environment map.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentLevel {
    /// Width and height of each face, in texels.
    pub size: u32,
    /// RGBA32F texels of each face, in +X, -X, +Y, -Y, +Z, -Z order.
    pub faces: [Vec<f32>; CUBE_FACE_COUNT],
}

/// A decoded environment map: a sequence of progressively blurred radiance levels.
#[derive(Clone, Debug)]
pub struct EnvironmentMap {
    name: String,
    levels: Vec<EnvironmentLevel>,
}

impl EnvironmentMap {
    /// Creates an environment map from its decoded levels, sharpest first.
    pub fn new(name: impl Into<String>, levels: Vec<EnvironmentLevel>) -> EnvironmentMap {
        EnvironmentMap {
            name: name.into(),
            levels,
        }
    }

    /// The asset this map was decoded from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The radiance level `level`, if present.
    #[inline]
    pub fn level(&self, level: u32) -> Option<&EnvironmentLevel> {
        self.levels.get(level as usize)
    }

    /// Number of radiance levels.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }
}

/// Decodes environment map assets.
pub trait EnvironmentMapLoader {
    /// Decodes the environment map stored at `path`.
    fn load(&mut self, path: &str) -> Result<EnvironmentMap>;
}

/// A cache of decoded environment maps keyed by asset path.
pub struct EnvironmentMapCache {
    loader: Box<dyn EnvironmentMapLoader>,
    maps: HashMap<String, Arc<EnvironmentMap>>,
}

impl EnvironmentMapCache {
    /// Creates an empty cache decoding assets with `loader`.
    pub fn new(loader: Box<dyn EnvironmentMapLoader>) -> EnvironmentMapCache {
        EnvironmentMapCache {
            loader,
            maps: HashMap::new(),
        }
    }

    /// Gets the environment map stored at `path`, decoding it on first use.
    pub fn get(&mut self, path: &str) -> Result<Arc<EnvironmentMap>> {
        if let Some(map) = self.maps.get(path) {
            return Ok(map.clone());
        }

        let map = Arc::new(self.loader.load(path)?);
        log::debug!("Decoded environment map {} ({} levels)", path, map.num_levels());
        let _ = self.maps.insert(path.to_string(), map.clone());
        Ok(map)
    }

    /// Whether `path` has already been decoded.
    pub fn contains(&self, path: &str) -> bool {
        self.maps.contains_key(path)
    }
}

/// Provides the name of the environment map currently displayed in the background.
///
/// PBR materials compare this name against the one their radiance levels were
/// built from on every update.
pub trait EnvironmentSource {
    /// The active environment map, or `None` when no environment map is displayed.
    fn active_source_name(&self) -> Option<&str>;
}

impl EnvironmentSource for &str {
    fn active_source_name(&self) -> Option<&str> {
        Some(*self)
    }
}

impl EnvironmentSource for String {
    fn active_source_name(&self) -> Option<&str> {
        Some(self)
    }
}
