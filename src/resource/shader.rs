//! Shader program handles and the registry that compiles each program once.

use crate::error::Result;
use crate::resource::Texture;
use glamx::{Mat4, Vec3, Vec4};
use std::collections::HashMap;
use std::rc::Rc;

/// A value uploaded to a named shader uniform.
#[derive(Copy, Clone, Debug)]
pub enum UniformValue<'a> {
    /// A single float.
    Float(f32),
    /// A boolean flag.
    Bool(bool),
    /// A three-component vector.
    Vec3(Vec3),
    /// A four-component vector.
    Vec4(Vec4),
    /// A 4x4 matrix.
    Mat4(Mat4),
    /// A texture bound to the given texture unit.
    Texture(&'a Texture, u32),
}

/// A compiled and linked shader program.
///
/// Programs are shared between every material that uses the same sources, so
/// all operations take `&self`.
pub trait ShaderProgram {
    /// Makes this program the active one.
    fn enable(&self);
    /// Deactivates this program.
    fn disable(&self);
    /// Sets a uniform of the active program. Unknown names are ignored.
    fn set_uniform(&self, name: &str, value: UniformValue<'_>);
}

/// Compiles a program from a vertex and a fragment source.
pub trait ShaderCompiler {
    /// Compiles and links the program made of the given stages.
    fn compile(&mut self, vertex_path: &str, fragment_path: &str) -> Result<Rc<dyn ShaderProgram>>;
}

/// The shader manager.
///
/// It keeps a cache of already-compiled programs keyed by their source paths.
/// Failed compilations are not cached.
pub struct ShaderManager {
    compiler: Box<dyn ShaderCompiler>,
    shaders: HashMap<(String, String), Rc<dyn ShaderProgram>>,
}

impl ShaderManager {
    /// Creates a new shader manager compiling programs with `compiler`.
    pub fn new(compiler: Box<dyn ShaderCompiler>) -> ShaderManager {
        ShaderManager {
            compiler,
            shaders: HashMap::new(),
        }
    }

    /// Get the program compiled from these sources. Returns `None` if it was never compiled.
    pub fn get(&self, vertex_path: &str, fragment_path: &str) -> Option<Rc<dyn ShaderProgram>> {
        self.shaders
            .get(&(vertex_path.to_string(), fragment_path.to_string()))
            .cloned()
    }

    /// Get the program compiled from these sources, compiling it on first use.
    pub fn get_or_compile(
        &mut self,
        vertex_path: &str,
        fragment_path: &str,
    ) -> Result<Rc<dyn ShaderProgram>> {
        let key = (vertex_path.to_string(), fragment_path.to_string());

        if let Some(shader) = self.shaders.get(&key) {
            return Ok(shader.clone());
        }

        let shader = self.compiler.compile(vertex_path, fragment_path)?;
        log::debug!("Compiled shader program {} + {}", vertex_path, fragment_path);
        let _ = self.shaders.insert(key, shader.clone());
        Ok(shader)
    }

    /// Adds an already-compiled program to this cache.
    pub fn add(&mut self, vertex_path: &str, fragment_path: &str, shader: Rc<dyn ShaderProgram>) {
        let _ = self
            .shaders
            .insert((vertex_path.to_string(), fragment_path.to_string()), shader);
    }

    /// Removes a program from this cache. Materials still holding it keep it alive.
    pub fn remove(&mut self, vertex_path: &str, fragment_path: &str) {
        let _ = self
            .shaders
            .remove(&(vertex_path.to_string(), fragment_path.to_string()));
    }

    /// Number of cached programs.
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Whether no program has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}
