//! The analytic light the PBR material shades with, next to image-based lighting.

use crate::color::{Color, BLACK, WHITE};
use glamx::Vec3;

/// A point light described by its position and its ambient, diffuse and specular colors.
///
/// This is a plain value: materials own their copy and the parameter editor
/// mutates it in place.
///
/// # Examples
/// ```
/// # use materia3d::prelude::*;
/// let light = Light::default()
///     .with_position(Vec3::new(0.0, 10.0, 0.0))
///     .with_diffuse(RED);
/// assert_eq!(light.diffuse, RED);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    /// World-space position of the light.
    pub position: Vec3,
    /// Ambient color.
    pub ambient: Color,
    /// Diffuse color, uploaded as the light color.
    pub diffuse: Color,
    /// Specular color.
    pub specular: Color,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(50.0, 50.0, 0.0),
            ambient: BLACK,
            diffuse: WHITE,
            specular: WHITE,
        }
    }
}

impl Light {
    /// Sets the light position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the ambient color.
    pub fn with_ambient(mut self, color: Color) -> Self {
        self.ambient = color;
        self
    }

    /// Sets the diffuse color.
    pub fn with_diffuse(mut self, color: Color) -> Self {
        self.diffuse = color;
        self
    }

    /// Sets the specular color.
    pub fn with_specular(mut self, color: Color) -> Self {
        self.specular = color;
        self
    }
}
