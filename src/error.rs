//! Errors raised while acquiring the resources a material depends on.

use thiserror::Error;

/// Error type for material construction and resource acquisition.
///
/// Frame-time code never propagates these: a material that could not get its
/// shader or one of its textures still renders, with that contribution skipped.
/// Only eager construction-time GPU work (skybox cubemaps, PBR radiance levels)
/// surfaces them to the caller.
#[derive(Error, Debug)]
pub enum MaterialError {
    /// The shader registry could not produce a program for this pair of sources.
    #[error("shader program `{vertex}` + `{fragment}` is unavailable: {reason}")]
    MissingShader {
        /// Path of the vertex stage.
        vertex: String,
        /// Path of the fragment stage.
        fragment: String,
        /// Backend-provided description of the failure.
        reason: String,
    },

    /// A texture could not be loaded or built.
    #[error("texture `{path}` is unavailable: {reason}")]
    MissingTexture {
        /// Path or name of the texture.
        path: String,
        /// Backend-provided description of the failure.
        reason: String,
    },

    /// An environment source index outside of the fixed source list was requested.
    #[error("environment source index {index} is out of range (expected 0..{count})")]
    InvalidSourceIndex {
        /// The rejected index.
        index: usize,
        /// Number of available sources.
        count: usize,
    },

    /// Source selection was requested on a skybox built from static face images.
    #[error("the skybox is not environment mapped")]
    NotEnvironmentMapped,

    /// A radiance cache was requested but no environment-mapped skybox is active.
    #[error("no active environment source to build radiance levels from")]
    NoEnvironmentSource,

    /// An environment map could not be decoded.
    #[error("environment map `{path}` could not be decoded: {reason}")]
    EnvironmentMap {
        /// Path of the environment map asset.
        path: String,
        /// Decoder-provided description of the failure.
        reason: String,
    },

    /// The environment map does not contain the requested radiance level.
    #[error("environment map `{name}` has no level {level}")]
    MissingEnvironmentLevel {
        /// Name of the environment map.
        name: String,
        /// The missing level.
        level: u32,
    },

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for material operations.
pub type Result<T> = std::result::Result<T, MaterialError>;
