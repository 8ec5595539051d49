use crate::config::{MaterialConfig, ShaderPaths};
use crate::error::Result;
use crate::resource::{
    EnvironmentMapCache, ShaderManager, ShaderProgram, Texture, TextureManager,
};
use std::rc::Rc;
use std::sync::Arc;

/// The registries materials acquire their shaders and textures from.
///
/// Materials never load anything themselves: they look shared resources up
/// here when they are built, and the PBR material comes back to it whenever it
/// has to rebuild its radiance levels.
pub struct Resources {
    /// Paths the built-in materials are configured with.
    pub config: MaterialConfig,
    /// Compiled shader programs.
    pub shaders: ShaderManager,
    /// Loaded textures and the cubemap factory.
    pub textures: TextureManager,
    /// Decoded environment maps.
    pub environments: EnvironmentMapCache,
}

impl Resources {
    /// Bundles the given registries.
    pub fn new(
        config: MaterialConfig,
        shaders: ShaderManager,
        textures: TextureManager,
        environments: EnvironmentMapCache,
    ) -> Resources {
        Resources {
            config,
            shaders,
            textures,
            environments,
        }
    }

    /// Looks a shader program up, compiling it on first use.
    ///
    /// Failures are logged and yield `None`: a material without a shader is
    /// still built, it just never draws.
    pub fn shader(&mut self, paths: &ShaderPaths) -> Option<Rc<dyn ShaderProgram>> {
        match self.shaders.get_or_compile(&paths.vertex, &paths.fragment) {
            Ok(shader) => Some(shader),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    /// Looks a flat texture up, loading it on first use.
    ///
    /// Failures are logged and yield `None`: the slot stays unbound.
    pub fn texture(&mut self, path: &str) -> Option<Arc<Texture>> {
        match self.textures.get_or_load(path) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }

    /// Builds the cubemap of one radiance level of the environment map at `source`.
    pub fn environment_cubemap(&mut self, source: &str, level: u32) -> Result<Arc<Texture>> {
        let environment = self.environments.get(source)?;
        self.textures.cubemap_from_environment(&environment, level)
    }
}
