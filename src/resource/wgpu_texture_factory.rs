//! Texture creation on a wgpu device.

use crate::error::{MaterialError, Result};
use crate::resource::{
    EnvironmentMap, GpuTexture, Texture, TextureFactory, TextureKind, CUBE_FACE_COUNT,
};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;

/// File names of the six faces of an image cubemap, in layer order.
const CUBEMAP_FACE_FILES: [&str; CUBE_FACE_COUNT] = [
    "posx.png", "negx.png", "posy.png", "negy.png", "posz.png", "negz.png",
];

/// Number of RGBA floats in one face of a `size` x `size` environment level.
fn environment_face_len(size: u32) -> usize {
    size as usize * size as usize * 4
}

/// A [`TextureFactory`] uploading textures to a wgpu device.
pub struct WgpuTextureFactory {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl WgpuTextureFactory {
    /// Creates a factory uploading through `queue` to `device`.
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> WgpuTextureFactory {
        WgpuTextureFactory { device, queue }
    }

    fn create_sampler(&self, label: &str, filter: wgpu::FilterMode) -> wgpu::Sampler {
        self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }

    /// Creates a square cubemap and uploads one tightly packed face per layer.
    fn upload_cubemap(
        &self,
        label: &str,
        size: u32,
        format: wgpu::TextureFormat,
        bytes_per_pixel: u32,
        faces: &[&[u8]; CUBE_FACE_COUNT],
        filter: wgpu::FilterMode,
    ) -> GpuTexture {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: CUBE_FACE_COUNT as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, data) in faces.iter().enumerate() {
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(size * bytes_per_pixel),
                    rows_per_image: Some(size),
                },
                wgpu::Extent3d {
                    width: size,
                    height: size,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = self.create_sampler(label, filter);

        GpuTexture {
            texture,
            view,
            sampler,
        }
    }
}

impl TextureFactory for WgpuTextureFactory {
    fn load(&mut self, path: &str) -> Result<Texture> {
        let image = image::open(path).map_err(|e| MaterialError::MissingTexture {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(path),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.create_sampler(path, wgpu::FilterMode::Linear);

        Ok(Texture::new(path, TextureKind::Flat, (width, height)).with_gpu(GpuTexture {
            texture,
            view,
            sampler,
        }))
    }

    fn cubemap_from_images(&mut self, path: &str) -> Result<Texture> {
        let faces = CUBEMAP_FACE_FILES
            .iter()
            .map(|file| -> Result<RgbaImage> {
                Ok(image::open(Path::new(path).join(file))?.to_rgba8())
            })
            .collect::<Result<Vec<RgbaImage>>>()?;

        let (size, _) = faces[0].dimensions();
        if let Some(face) = faces.iter().find(|face| face.dimensions() != (size, size)) {
            return Err(MaterialError::MissingTexture {
                path: path.to_string(),
                reason: format!(
                    "cubemap faces must be {}x{} squares, found {:?}",
                    size,
                    size,
                    face.dimensions()
                ),
            });
        }

        let data = [
            faces[0].as_raw().as_slice(),
            faces[1].as_raw().as_slice(),
            faces[2].as_raw().as_slice(),
            faces[3].as_raw().as_slice(),
            faces[4].as_raw().as_slice(),
            faces[5].as_raw().as_slice(),
        ];
        let gpu = self.upload_cubemap(
            path,
            size,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            4,
            &data,
            wgpu::FilterMode::Linear,
        );

        Ok(Texture::new(path, TextureKind::Cubemap, (size, size)).with_gpu(gpu))
    }

    fn cubemap_from_environment(&mut self, environment: &EnvironmentMap, level: u32) -> Result<Texture> {
        let data = environment
            .level(level)
            .ok_or_else(|| MaterialError::MissingEnvironmentLevel {
                name: environment.name().to_string(),
                level,
            })?;

        let expected = environment_face_len(data.size);
        if let Some(face) = data.faces.iter().position(|face| face.len() != expected) {
            return Err(MaterialError::EnvironmentMap {
                path: environment.name().to_string(),
                reason: format!(
                    "face {} of level {} holds {} floats, expected {}",
                    face,
                    level,
                    data.faces[face].len(),
                    expected
                ),
            });
        }

        let faces: [&[u8]; CUBE_FACE_COUNT] = [
            bytemuck::cast_slice(&data.faces[0]),
            bytemuck::cast_slice(&data.faces[1]),
            bytemuck::cast_slice(&data.faces[2]),
            bytemuck::cast_slice(&data.faces[3]),
            bytemuck::cast_slice(&data.faces[4]),
            bytemuck::cast_slice(&data.faces[5]),
        ];
        let label = format!("{}#{}", environment.name(), level);
        // Rgba32Float is not filterable without FLOAT32_FILTERABLE.
        let gpu = self.upload_cubemap(
            &label,
            data.size,
            wgpu::TextureFormat::Rgba32Float,
            16,
            &faces,
            wgpu::FilterMode::Nearest,
        );

        Ok(Texture::new(
            environment.name(),
            TextureKind::EnvironmentCubemap { level },
            (data.size, data.size),
        )
        .with_gpu(gpu))
    }
}
