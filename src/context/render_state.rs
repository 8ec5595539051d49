//! Rasterizer, depth and blend state shared by every material drawn in a frame.

use wgpu::{BlendFactor, PolygonMode};

bitflags! {
    /// Fixed-function capabilities a material can switch on or off.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Depth testing against the depth buffer.
        const DEPTH_TEST = 1 << 0;
        /// Back-face culling.
        const CULL_FACE = 1 << 1;
        /// Color blending with the blend function set by `set_blend_func`.
        const BLEND = 1 << 2;
    }
}

/// The global render state a material mutates around its draw call.
///
/// This is implemented by the host graphics layer. Every material leaves the
/// polygon mode filled and blending disabled when its `render` returns.
pub trait RenderBackend {
    /// Enables the given capabilities.
    fn enable(&mut self, capabilities: Capabilities);
    /// Disables the given capabilities.
    fn disable(&mut self, capabilities: Capabilities);
    /// Sets the source and destination color blend factors.
    fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor);
    /// Sets how polygons are rasterized.
    fn set_polygon_mode(&mut self, mode: PolygonMode);
}

/// A render state tracker.
///
/// This is the state an immediate-mode backend would hold. A wgpu host uses it
/// to pick the pipeline variant matching what the material requested, through
/// [`RenderState::cull_mode`], [`RenderState::blend_state`] and
/// [`RenderState::depth_compare`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderState {
    capabilities: Capabilities,
    blend_func: (BlendFactor, BlendFactor),
    polygon_mode: PolygonMode,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    /// Creates a state with every capability disabled and filled polygons.
    pub fn new() -> RenderState {
        RenderState {
            capabilities: Capabilities::empty(),
            blend_func: (BlendFactor::One, BlendFactor::Zero),
            polygon_mode: PolygonMode::Fill,
        }
    }

    /// The currently enabled capabilities.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Whether all of the given capabilities are enabled.
    #[inline]
    pub fn is_enabled(&self, capabilities: Capabilities) -> bool {
        self.capabilities.contains(capabilities)
    }

    /// The current source and destination blend factors.
    #[inline]
    pub fn blend_func(&self) -> (BlendFactor, BlendFactor) {
        self.blend_func
    }

    /// The current polygon mode.
    #[inline]
    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    /// Face culling to configure the pipeline with.
    pub fn cull_mode(&self) -> Option<wgpu::Face> {
        if self.is_enabled(Capabilities::CULL_FACE) {
            Some(wgpu::Face::Back)
        } else {
            None
        }
    }

    /// Blending to configure the color target with, `None` when blending is disabled.
    pub fn blend_state(&self) -> Option<wgpu::BlendState> {
        if !self.is_enabled(Capabilities::BLEND) {
            return None;
        }

        let (src_factor, dst_factor) = self.blend_func;
        Some(wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor,
                dst_factor,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        })
    }

    /// Depth comparison to configure the depth-stencil state with.
    pub fn depth_compare(&self) -> wgpu::CompareFunction {
        if self.is_enabled(Capabilities::DEPTH_TEST) {
            wgpu::CompareFunction::Less
        } else {
            wgpu::CompareFunction::Always
        }
    }
}

impl RenderBackend for RenderState {
    fn enable(&mut self, capabilities: Capabilities) {
        self.capabilities.insert(capabilities);
    }

    fn disable(&mut self, capabilities: Capabilities) {
        self.capabilities.remove(capabilities);
    }

    fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.blend_func = (src, dst);
    }

    fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.polygon_mode = mode;
    }
}

/// Rasterizes polygons with a given mode until dropped, then switches back to
/// filled polygons.
#[must_use = "the polygon mode is restored as soon as the scope is dropped"]
pub struct PolygonModeScope<'a> {
    backend: &'a mut dyn RenderBackend,
}

impl<'a> PolygonModeScope<'a> {
    /// Switches the polygon mode to `mode`.
    pub fn new(backend: &'a mut dyn RenderBackend, mode: PolygonMode) -> Self {
        backend.set_polygon_mode(mode);
        PolygonModeScope { backend }
    }
}

impl Drop for PolygonModeScope<'_> {
    fn drop(&mut self) {
        self.backend.set_polygon_mode(PolygonMode::Fill);
    }
}

/// Enables blending with the given factors until dropped.
#[must_use = "blending is disabled as soon as the scope is dropped"]
pub struct BlendScope<'a> {
    backend: &'a mut dyn RenderBackend,
}

impl<'a> BlendScope<'a> {
    /// Enables blending with `src` and `dst` as color factors.
    pub fn new(backend: &'a mut dyn RenderBackend, src: BlendFactor, dst: BlendFactor) -> Self {
        backend.enable(Capabilities::BLEND);
        backend.set_blend_func(src, dst);
        BlendScope { backend }
    }
}

impl Drop for BlendScope<'_> {
    fn drop(&mut self) {
        self.backend.disable(Capabilities::BLEND);
    }
}
