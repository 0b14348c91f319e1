//! Per-context sprite textures
//!
//! A `SpriteTexture` lives on exactly one window's device. Loading the same
//! image file for two windows produces two independent GPU textures; there
//! is no cross-context sharing.

use multiwin_core::PixelData;
use multiwin_math::Vec2;

/// GPU texture plus the bind group that draws it
pub struct SpriteTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl SpriteTexture {
    /// Upload decoded pixels to the given device
    ///
    /// `layout` and `sampler` come from the [`SpritePipeline`] of the same
    /// context (see [`SpritePipeline::texture_layout`]).
    ///
    /// [`SpritePipeline`]: crate::pipeline::SpritePipeline
    /// [`SpritePipeline::texture_layout`]: crate::pipeline::SpritePipeline::texture_layout
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &PixelData,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: pixels.width,
            height: pixels.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Sprite Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pixels.width * 4),
                rows_per_image: Some(pixels.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            width: pixels.width,
            height: pixels.height,
        }
    }

    /// Bind group for drawing this texture
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Drawn extent as a float vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Explicitly release the GPU texture
    ///
    /// Dropping has the same effect; this exists so window teardown can
    /// release textures before the owning context goes away.
    pub fn unload(self) {
        self.texture.destroy();
    }
}
