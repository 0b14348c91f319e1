//! Glyph-atlas text pipeline
//!
//! Rasterizes the printable ASCII range once with fontdue into an R8 atlas
//! on the owning context, then draws text as instanced quads. Used for
//! window captions and the FPS overlay; not a general text stack (no
//! shaping, no wrapping).

use std::collections::HashMap;

use multiwin_math::Vec2;

use super::types::{GlyphInstance, Globals};

/// First and last rasterized codepoints (printable ASCII)
const FIRST_GLYPH: char = ' ';
const LAST_GLYPH: char = '~';

/// Atlas grid columns
const ATLAS_COLS: u32 = 12;

/// Initial glyph instance capacity
const INITIAL_CAPACITY: usize = 512;

/// Placement data for one atlas glyph
#[derive(Clone, Copy, Debug)]
struct GlyphInfo {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    /// Bitmap extent in pixels
    size: Vec2,
    /// Horizontal offset from the pen position
    xmin: f32,
    /// Vertical offset of the bitmap bottom above the baseline
    ymin: f32,
    /// Pen advance after this glyph
    advance: f32,
}

/// Text pipeline for one render context
pub struct TextPipeline {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    atlas_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    glyphs: HashMap<char, GlyphInfo>,
    ascent: f32,
    line_height: f32,
}

impl TextPipeline {
    /// Rasterize `font` at `px` pixels and build the pipeline
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        font: &fontdue::Font,
        px: f32,
    ) -> Self {
        let (atlas, glyphs, line_metrics) = Self::build_atlas(font, px);

        let atlas_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Glyph Atlas"),
            size: wgpu::Extent3d {
                width: atlas.width,
                height: atlas.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &atlas_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &atlas.coverage,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(atlas.width),
                rows_per_image: Some(atlas.height),
            },
            wgpu::Extent3d {
                width: atlas.width,
                height: atlas.height,
                depth_or_array_layers: 1,
            },
        );

        let atlas_view = atlas_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Text Globals Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let atlas_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Glyph Atlas Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Text Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &atlas_layout],
            push_constant_ranges: &[],
        });

        let shader_source = include_str!("../shaders/text.wgsl");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Text Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Text Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::instance_buffer_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Text Globals Buffer"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Text Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Glyph Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Glyph Atlas Bind Group"),
            layout: &atlas_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let instance_buffer = Self::create_instance_buffer(device, INITIAL_CAPACITY);

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            atlas_bind_group,
            instance_buffer,
            instance_capacity: INITIAL_CAPACITY,
            glyphs,
            ascent: line_metrics.0,
            line_height: line_metrics.1,
        }
    }

    /// Rasterize the ASCII range into a single-channel atlas
    fn build_atlas(font: &fontdue::Font, px: f32) -> (Atlas, HashMap<char, GlyphInfo>, (f32, f32)) {
        let chars: Vec<char> = (FIRST_GLYPH..=LAST_GLYPH).collect();
        let rastered: Vec<(char, fontdue::Metrics, Vec<u8>)> = chars
            .iter()
            .map(|&ch| {
                let (metrics, coverage) = font.rasterize(ch, px);
                (ch, metrics, coverage)
            })
            .collect();

        let cell_w = rastered.iter().map(|(_, m, _)| m.width).max().unwrap_or(1) as u32 + 1;
        let cell_h = rastered.iter().map(|(_, m, _)| m.height).max().unwrap_or(1) as u32 + 1;
        let rows = (rastered.len() as u32).div_ceil(ATLAS_COLS);
        let width = ATLAS_COLS * cell_w;
        let height = rows * cell_h;

        let mut coverage = vec![0u8; (width * height) as usize];
        let mut glyphs = HashMap::with_capacity(rastered.len());

        for (i, (ch, metrics, bitmap)) in rastered.iter().enumerate() {
            let col = i as u32 % ATLAS_COLS;
            let row = i as u32 / ATLAS_COLS;
            let x0 = col * cell_w;
            let y0 = row * cell_h;

            for y in 0..metrics.height {
                let dst = ((y0 + y as u32) * width + x0) as usize;
                let src = y * metrics.width;
                coverage[dst..dst + metrics.width].copy_from_slice(&bitmap[src..src + metrics.width]);
            }

            glyphs.insert(
                *ch,
                GlyphInfo {
                    uv_min: [x0 as f32 / width as f32, y0 as f32 / height as f32],
                    uv_max: [
                        (x0 + metrics.width as u32) as f32 / width as f32,
                        (y0 + metrics.height as u32) as f32 / height as f32,
                    ],
                    size: Vec2::new(metrics.width as f32, metrics.height as f32),
                    xmin: metrics.xmin as f32,
                    ymin: metrics.ymin as f32,
                    advance: metrics.advance_width,
                },
            );
        }

        let line = font
            .horizontal_line_metrics(px)
            .map(|m| (m.ascent, m.new_line_size))
            .unwrap_or((px, px * 1.2));

        (Atlas { width, height, coverage }, glyphs, line)
    }

    fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
            0 => Float32x2, // position
            1 => Float32x2, // size
            2 => Float32x2, // uv_min
            3 => Float32x2, // uv_max
            4 => Float32x4, // color
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRS,
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Glyph Instance Buffer"),
            size: (capacity * std::mem::size_of::<GlyphInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Vertical distance between stacked lines, in pixels
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Append glyph instances for `text` drawn with its top-left at `pos`
    ///
    /// Characters outside the atlas are skipped.
    pub fn layout(&self, text: &str, pos: Vec2, color: [f32; 4], out: &mut Vec<GlyphInstance>) {
        let baseline = pos.y + self.ascent;
        let mut pen_x = pos.x;

        for ch in text.chars() {
            let Some(glyph) = self.glyphs.get(&ch) else {
                continue;
            };
            if glyph.size.x > 0.0 && glyph.size.y > 0.0 {
                let top = baseline - glyph.ymin - glyph.size.y;
                out.push(GlyphInstance {
                    position: [pen_x + glyph.xmin, top],
                    size: glyph.size.to_array(),
                    uv_min: glyph.uv_min,
                    uv_max: glyph.uv_max,
                    color,
                });
            }
            pen_x += glyph.advance;
        }
    }

    /// Update the per-frame uniforms
    pub fn update_globals(&self, queue: &wgpu::Queue, bounds: Vec2) {
        let globals = Globals::new(bounds);
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    /// Upload glyph instances, growing the buffer if needed
    pub fn upload_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[GlyphInstance],
    ) {
        if instances.is_empty() {
            return;
        }
        if instances.len() > self.instance_capacity {
            let capacity = instances.len().next_power_of_two();
            log::debug!("Growing glyph instance buffer to {} instances", capacity);
            self.instance_buffer = Self::create_instance_buffer(device, capacity);
            self.instance_capacity = capacity;
        }
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
    }

    /// Record the draw into an open render pass
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, instance_count: u32) {
        if instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.globals_bind_group, &[]);
        pass.set_bind_group(1, &self.atlas_bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..instance_count);
    }
}

/// CPU-side atlas buffer
struct Atlas {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}
