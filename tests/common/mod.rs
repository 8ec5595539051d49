//! Minimal host collaborators for the integration tests.

use materia3d::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wgpu::PrimitiveTopology;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counters shared by every fake collaborator of a test.
#[derive(Clone, Default)]
pub struct Counters {
    pub draws: Rc<Cell<usize>>,
    pub environment_cubemaps: Rc<Cell<usize>>,
    pub blending_draws: Rc<Cell<usize>>,
    /// Name of every shader enabled, in order.
    pub enabled_shaders: Rc<RefCell<Vec<String>>>,
}

pub struct NullShader {
    name: String,
    counters: Counters,
}

impl ShaderProgram for NullShader {
    fn enable(&self) {
        self.counters.enabled_shaders.borrow_mut().push(self.name.clone());
    }

    fn disable(&self) {}

    fn set_uniform(&self, _: &str, _: UniformValue<'_>) {}
}

pub struct NullCompiler(pub Counters);

impl ShaderCompiler for NullCompiler {
    fn compile(&mut self, _: &str, fragment_path: &str) -> Result<Rc<dyn ShaderProgram>> {
        Ok(Rc::new(NullShader {
            name: fragment_path.to_string(),
            counters: self.0.clone(),
        }))
    }
}

/// A mesh counting its draws, and the ones issued while blending was enabled.
pub struct CountingMesh {
    counters: Counters,
    state: Rc<RefCell<RenderState>>,
}

impl GpuMesh for CountingMesh {
    fn render(&self, _: PrimitiveTopology) {
        self.counters.draws.set(self.counters.draws.get() + 1);

        if self.state.borrow().is_enabled(Capabilities::BLEND) {
            let blending = &self.counters.blending_draws;
            blending.set(blending.get() + 1);
        }
    }
}

/// A render backend sharing its state with the meshes drawn through it.
pub struct SharedBackend(pub Rc<RefCell<RenderState>>);

impl RenderBackend for SharedBackend {
    fn enable(&mut self, capabilities: Capabilities) {
        self.0.borrow_mut().enable(capabilities);
    }

    fn disable(&mut self, capabilities: Capabilities) {
        self.0.borrow_mut().disable(capabilities);
    }

    fn set_blend_func(&mut self, src: wgpu::BlendFactor, dst: wgpu::BlendFactor) {
        self.0.borrow_mut().set_blend_func(src, dst);
    }

    fn set_polygon_mode(&mut self, mode: wgpu::PolygonMode) {
        self.0.borrow_mut().set_polygon_mode(mode);
    }
}

pub struct NullTextures(pub Counters);

impl TextureFactory for NullTextures {
    fn load(&mut self, path: &str) -> Result<Texture> {
        Ok(Texture::new(path, TextureKind::Flat, (4, 4)))
    }

    fn cubemap_from_images(&mut self, path: &str) -> Result<Texture> {
        Ok(Texture::new(path, TextureKind::Cubemap, (4, 4)))
    }

    fn cubemap_from_environment(&mut self, environment: &EnvironmentMap, level: u32) -> Result<Texture> {
        let data = environment
            .level(level)
            .ok_or_else(|| MaterialError::MissingEnvironmentLevel {
                name: environment.name().to_string(),
                level,
            })?;
        let built = &self.0.environment_cubemaps;
        built.set(built.get() + 1);

        Ok(Texture::new(
            environment.name(),
            TextureKind::EnvironmentCubemap { level },
            (data.size, data.size),
        ))
    }
}

/// Decodes every path into six progressively smaller levels.
pub struct MipChainLoader;

impl EnvironmentMapLoader for MipChainLoader {
    fn load(&mut self, path: &str) -> Result<EnvironmentMap> {
        let levels = (0..6)
            .map(|i| {
                let size = 32u32 >> i;
                EnvironmentLevel {
                    size,
                    faces: std::array::from_fn(|_| vec![0.0; (size * size * 4) as usize]),
                }
            })
            .collect();

        Ok(EnvironmentMap::new(path, levels))
    }
}

pub struct Host {
    pub counters: Counters,
    pub state: Rc<RefCell<RenderState>>,
    pub resources: Resources,
}

impl Host {
    pub fn new() -> Host {
        init_logger();
        let counters = Counters::default();

        let resources = Resources::new(
            MaterialConfig::default(),
            ShaderManager::new(Box::new(NullCompiler(counters.clone()))),
            TextureManager::new(Box::new(NullTextures(counters.clone()))),
            EnvironmentMapCache::new(Box::new(MipChainLoader)),
        );

        Host {
            counters,
            state: Rc::new(RefCell::new(RenderState::new())),
            resources,
        }
    }

    pub fn mesh(&self) -> Rc<dyn GpuMesh> {
        Rc::new(CountingMesh {
            counters: self.counters.clone(),
            state: self.state.clone(),
        })
    }

    pub fn backend(&self) -> SharedBackend {
        SharedBackend(self.state.clone())
    }
}
