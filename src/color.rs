//! Color type and the few named colors the materials use as defaults.
//!
//! Colors are RGBA with f32 components in the range [0.0, 1.0].

use glamx::{Vec3, Vec4};

pub use rgb::Rgba;

/// The color type used throughout the crate. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// Black (0, 0, 0)
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// White (255, 255, 255)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Red (255, 0, 0)
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Lime (0, 255, 0), pure green
pub const LIME: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Blue (0, 0, 255)
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Gray (128, 128, 128)
pub const GRAY: Color = Color::new(0.5019608, 0.5019608, 0.5019608, 1.0);

/// Converts a color to the `vec4` layout shaders expect.
#[inline]
pub fn to_vec4(color: Color) -> Vec4 {
    Vec4::new(color.r, color.g, color.b, color.a)
}

/// Converts a color to a `vec3`, dropping alpha.
#[inline]
pub fn to_vec3(color: Color) -> Vec3 {
    Vec3::new(color.r, color.g, color.b)
}
