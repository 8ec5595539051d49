//! The draw-call side of a mesh.

/// A mesh whose vertex and index buffers already live on the GPU.
///
/// Geometry construction and upload are the host's business; materials only
/// issue the draw call once their shader and uniforms are bound.
pub trait GpuMesh {
    /// Draws the whole mesh with the given primitive topology.
    fn render(&self, topology: wgpu::PrimitiveTopology);
}
