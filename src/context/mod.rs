//! Per-frame context handed to materials.

pub use self::render_state::{BlendScope, Capabilities, PolygonModeScope, RenderBackend, RenderState};

mod render_state;

/// Context passed to materials during rendering.
pub struct RenderContext<'a> {
    /// The global render state the material mutates around its draw call.
    pub backend: &'a mut dyn RenderBackend,
    /// The application clock, in seconds, uploaded as `u_time`.
    pub time: f32,
}

impl<'a> RenderContext<'a> {
    /// Creates a render context for a frame rendered at `time`.
    pub fn new(backend: &'a mut dyn RenderBackend, time: f32) -> Self {
        RenderContext { backend, time }
    }
}
