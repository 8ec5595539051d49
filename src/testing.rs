//! Recording stand-ins for the graphics collaborators, shared by the unit tests.
//!
//! Every collaborator appends to the same [`EventLog`], so tests can assert on
//! the relative order of state changes, shader scoping and draw calls.

use crate::color::Color;
use crate::config::MaterialConfig;
use crate::context::{Capabilities, RenderBackend, RenderState};
use crate::editor::ParameterEditor;
use crate::error::{MaterialError, Result};
use crate::resource::{
    EnvironmentLevel, EnvironmentMap, EnvironmentMapCache, EnvironmentMapLoader, GpuMesh,
    Resources, ShaderCompiler, ShaderManager, ShaderProgram, Texture, TextureFactory,
    TextureKind, TextureManager, UniformValue,
};
use glamx::{Mat4, Vec3, Vec4};
use std::cell::RefCell;
use std::rc::Rc;
use wgpu::{BlendFactor, PolygonMode, PrimitiveTopology};

/// An owned copy of an uploaded uniform value.
#[derive(Clone, Debug, PartialEq)]
pub enum Recorded {
    Float(f32),
    Bool(bool),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Texture {
        label: String,
        kind: TextureKind,
        unit: u32,
    },
}

impl From<UniformValue<'_>> for Recorded {
    fn from(value: UniformValue<'_>) -> Self {
        match value {
            UniformValue::Float(v) => Recorded::Float(v),
            UniformValue::Bool(v) => Recorded::Bool(v),
            UniformValue::Vec3(v) => Recorded::Vec3(v),
            UniformValue::Vec4(v) => Recorded::Vec4(v),
            UniformValue::Mat4(v) => Recorded::Mat4(v),
            UniformValue::Texture(texture, unit) => Recorded::Texture {
                label: texture.label().to_string(),
                kind: texture.kind(),
                unit,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Compile(String, String),
    EnableShader(String),
    DisableShader(String),
    Uniform(String, Recorded),
    Draw(PrimitiveTopology),
    Enable(Capabilities),
    Disable(Capabilities),
    BlendFunc(BlendFactor, BlendFactor),
    PolygonMode(PolygonMode),
    LoadTexture(String),
    CubemapFromImages(String),
    CubemapFromEnvironment(String, u32),
    DecodeEnvironment(String),
}

#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, f: impl Fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| f(e)).count()
    }

    pub fn position(&self, f: impl Fn(&Event) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(|e| f(e))
    }

    pub fn compilations(&self) -> usize {
        self.count(|e| matches!(e, Event::Compile(..)))
    }

    pub fn draws(&self) -> usize {
        self.count(|e| matches!(e, Event::Draw(_)))
    }

    pub fn environment_cubemaps(&self) -> usize {
        self.count(|e| matches!(e, Event::CubemapFromEnvironment(..)))
    }

    /// The last value uploaded to the uniform `name`.
    pub fn uniform(&self, name: &str) -> Option<Recorded> {
        self.0.borrow().iter().rev().find_map(|e| match e {
            Event::Uniform(n, value) if n == name => Some(value.clone()),
            _ => None,
        })
    }
}

pub struct RecordingShader {
    label: String,
    log: EventLog,
}

impl ShaderProgram for RecordingShader {
    fn enable(&self) {
        self.log.push(Event::EnableShader(self.label.clone()));
    }

    fn disable(&self) {
        self.log.push(Event::DisableShader(self.label.clone()));
    }

    fn set_uniform(&self, name: &str, value: UniformValue<'_>) {
        self.log.push(Event::Uniform(name.to_string(), value.into()));
    }
}

pub struct RecordingCompiler {
    log: EventLog,
    failing: Vec<String>,
}

impl RecordingCompiler {
    pub fn new(log: EventLog) -> Self {
        RecordingCompiler {
            log,
            failing: Vec::new(),
        }
    }

    /// Makes every program using `fragment_path` fail to compile.
    pub fn failing_on(mut self, fragment_path: &str) -> Self {
        self.failing.push(fragment_path.to_string());
        self
    }
}

impl ShaderCompiler for RecordingCompiler {
    fn compile(&mut self, vertex_path: &str, fragment_path: &str) -> Result<Rc<dyn ShaderProgram>> {
        if self.failing.iter().any(|f| f == fragment_path) {
            return Err(MaterialError::MissingShader {
                vertex: vertex_path.to_string(),
                fragment: fragment_path.to_string(),
                reason: "syntax error".to_string(),
            });
        }

        self.log
            .push(Event::Compile(vertex_path.to_string(), fragment_path.to_string()));
        Ok(Rc::new(RecordingShader {
            label: fragment_path.to_string(),
            log: self.log.clone(),
        }))
    }
}

pub struct RecordingMesh {
    log: EventLog,
}

impl RecordingMesh {
    pub fn new(log: EventLog) -> Self {
        RecordingMesh { log }
    }
}

impl GpuMesh for RecordingMesh {
    fn render(&self, topology: PrimitiveTopology) {
        self.log.push(Event::Draw(topology));
    }
}

/// A render backend tracking state like [`RenderState`] and logging every change.
pub struct RecordingBackend {
    pub state: RenderState,
    log: EventLog,
}

impl RecordingBackend {
    pub fn new(log: EventLog) -> Self {
        RecordingBackend {
            state: RenderState::new(),
            log,
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn enable(&mut self, capabilities: Capabilities) {
        self.log.push(Event::Enable(capabilities));
        self.state.enable(capabilities);
    }

    fn disable(&mut self, capabilities: Capabilities) {
        self.log.push(Event::Disable(capabilities));
        self.state.disable(capabilities);
    }

    fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.log.push(Event::BlendFunc(src, dst));
        self.state.set_blend_func(src, dst);
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.log.push(Event::PolygonMode(mode));
        self.state.set_polygon_mode(mode);
    }
}

pub struct RecordingTextureFactory {
    log: EventLog,
    missing: Vec<String>,
}

impl RecordingTextureFactory {
    pub fn new(log: EventLog) -> Self {
        RecordingTextureFactory {
            log,
            missing: Vec::new(),
        }
    }

    /// Makes loading `path` fail.
    pub fn missing(mut self, path: &str) -> Self {
        self.missing.push(path.to_string());
        self
    }

    fn check(&self, path: &str) -> Result<()> {
        if self.missing.iter().any(|m| m == path) {
            Err(MaterialError::MissingTexture {
                path: path.to_string(),
                reason: "file not found".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl TextureFactory for RecordingTextureFactory {
    fn load(&mut self, path: &str) -> Result<Texture> {
        self.check(path)?;
        self.log.push(Event::LoadTexture(path.to_string()));
        Ok(Texture::new(path, TextureKind::Flat, (1, 1)))
    }

    fn cubemap_from_images(&mut self, path: &str) -> Result<Texture> {
        self.check(path)?;
        self.log.push(Event::CubemapFromImages(path.to_string()));
        Ok(Texture::new(path, TextureKind::Cubemap, (1, 1)))
    }

    fn cubemap_from_environment(&mut self, environment: &EnvironmentMap, level: u32) -> Result<Texture> {
        let data = environment
            .level(level)
            .ok_or_else(|| MaterialError::MissingEnvironmentLevel {
                name: environment.name().to_string(),
                level,
            })?;

        self.log.push(Event::CubemapFromEnvironment(
            environment.name().to_string(),
            level,
        ));
        Ok(Texture::new(
            environment.name(),
            TextureKind::EnvironmentCubemap { level },
            (data.size, data.size),
        ))
    }
}

/// Produces six 1x1 levels for any path, except the ones marked missing.
pub struct SyntheticEnvironmentLoader {
    log: EventLog,
    missing: Vec<String>,
}

impl SyntheticEnvironmentLoader {
    pub fn new(log: EventLog) -> Self {
        SyntheticEnvironmentLoader {
            log,
            missing: Vec::new(),
        }
    }

    pub fn missing(mut self, path: &str) -> Self {
        self.missing.push(path.to_string());
        self
    }
}

impl EnvironmentMapLoader for SyntheticEnvironmentLoader {
    fn load(&mut self, path: &str) -> Result<EnvironmentMap> {
        if self.missing.iter().any(|m| m == path) {
            return Err(MaterialError::EnvironmentMap {
                path: path.to_string(),
                reason: "file not found".to_string(),
            });
        }

        self.log.push(Event::DecodeEnvironment(path.to_string()));
        let level = EnvironmentLevel {
            size: 1,
            faces: Default::default(),
        };
        Ok(EnvironmentMap::new(path, vec![level; 6]))
    }
}

/// An editor that records the labels it was shown, and applies scripted edits.
#[derive(Default)]
pub struct RecordingEditor {
    pub labels: Vec<String>,
    /// Index picked by the next `edit_choice`.
    pub choice: Option<usize>,
    /// Labels of the flags to flip.
    pub flips: Vec<String>,
    /// Color written by the next `edit_color`.
    pub color: Option<Color>,
    /// Vectors written by `edit_vec3`, by label.
    pub vectors: Vec<(String, Vec3)>,
}

impl ParameterEditor for RecordingEditor {
    fn edit_color(&mut self, label: &str, color: &mut Color) -> bool {
        self.labels.push(label.to_string());
        match self.color.take() {
            Some(new) => {
                color.r = new.r;
                color.g = new.g;
                color.b = new.b;
                true
            }
            None => false,
        }
    }

    fn edit_vec3(&mut self, label: &str, value: &mut Vec3) -> bool {
        self.labels.push(label.to_string());
        match self.vectors.iter().position(|(l, _)| l == label) {
            Some(i) => {
                *value = self.vectors.remove(i).1;
                true
            }
            None => false,
        }
    }

    fn edit_bool(&mut self, label: &str, value: &mut bool) -> bool {
        self.labels.push(label.to_string());
        if self.flips.iter().any(|f| f == label) {
            *value = !*value;
            true
        } else {
            false
        }
    }

    fn edit_choice(&mut self, label: &str, selected: &mut usize, _options: &[&str]) -> bool {
        self.labels.push(label.to_string());
        match self.choice.take() {
            Some(choice) => {
                *selected = choice;
                true
            }
            None => false,
        }
    }

    fn section(&mut self, label: &str, add_contents: &mut dyn FnMut(&mut dyn ParameterEditor)) {
        self.labels.push(label.to_string());
        add_contents(self);
    }
}

pub fn resources_with(
    compiler: RecordingCompiler,
    textures: RecordingTextureFactory,
    environments: SyntheticEnvironmentLoader,
) -> Resources {
    Resources::new(
        MaterialConfig::default(),
        ShaderManager::new(Box::new(compiler)),
        TextureManager::new(Box::new(textures)),
        EnvironmentMapCache::new(Box::new(environments)),
    )
}

pub fn resources(log: &EventLog) -> Resources {
    resources_with(
        RecordingCompiler::new(log.clone()),
        RecordingTextureFactory::new(log.clone()),
        SyntheticEnvironmentLoader::new(log.clone()),
    )
}
