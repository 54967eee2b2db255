//! The wgpu carousel renderer: one textured quad per card.

use std::cmp::Ordering;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

use super::pipeline_helpers;
use super::render_context::RenderContext;
use super::texture::{self, DepthTexture};
use crate::camera::{Camera, CameraUniform};
use crate::card::{DecodedImage, VisualCard};
use crate::engine::RenderBackend;
use crate::options::LightingOptions;

/// Unit quad corner: position in the XY plane and texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct QuadVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// `[-0.5, 0.5]²`, image top at `+y`.
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [-0.5, -0.5, 0.0],
        uv: [0.0, 1.0],
    },
    QuadVertex {
        position: [0.5, -0.5, 0.0],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        position: [0.5, 0.5, 0.0],
        uv: [1.0, 0.0],
    },
    QuadVertex {
        position: [-0.5, 0.5, 0.0],
        uv: [0.0, 0.0],
    },
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct LightingUniform {
    ambient: [f32; 3],
    _pad: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct CardUniform {
    model: [[f32; 4]; 4],
}

/// GPU resources of one card: its texture binding and model transform.
pub struct CardVisual {
    bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
}

/// Draws the carousel into a window surface.
pub struct CardRenderer {
    context: RenderContext,
    pipeline: wgpu::RenderPipeline,
    depth: DepthTexture,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    card_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    clear_color: wgpu::Color,
}

impl CardRenderer {
    /// Build the card pipeline on an initialized context.
    #[must_use]
    pub fn new(context: RenderContext) -> Self {
        let device = &context.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Card Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../assets/shaders/card.wgsl").into(),
            ),
        });

        let scene_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Card Scene Layout"),
                entries: &[
                    pipeline_helpers::uniform_buffer(
                        0,
                        wgpu::ShaderStages::VERTEX,
                    ),
                    pipeline_helpers::uniform_buffer(
                        1,
                        wgpu::ShaderStages::FRAGMENT,
                    ),
                ],
            });
        let card_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Card Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                    pipeline_helpers::uniform_buffer(
                        2,
                        wgpu::ShaderStages::VERTEX,
                    ),
                ],
            });

        let pipeline = pipeline_helpers::create_mesh_pipeline(
            device,
            "Card",
            &shader,
            context.format(),
            &[&scene_layout, &card_layout],
            QuadVertex::layout(),
        );

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Card Quad Vertices"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Card Quad Indices"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            });

        let camera_uniform = CameraUniform::new();
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let lighting_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[lighting_uniform(
                    &LightingOptions::default(),
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let scene_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Card Scene Bind Group"),
                layout: &scene_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lighting_buffer.as_entire_binding(),
                    },
                ],
            });

        let sampler = pipeline_helpers::linear_sampler(device, "Card Sampler");
        let (width, height) = context.size();
        let depth = DepthTexture::new(device, width, height);

        Self {
            pipeline,
            depth,
            vertex_buffer,
            index_buffer,
            camera_uniform,
            camera_buffer,
            lighting_buffer,
            scene_bind_group,
            card_layout,
            sampler,
            clear_color: wgpu::Color::BLACK,
            context,
        }
    }

    /// The underlying device context.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }
}

fn lighting_uniform(lighting: &LightingOptions) -> LightingUniform {
    LightingUniform {
        ambient: lighting.ambient_rgb(),
        _pad: 0.0,
    }
}

impl RenderBackend for CardRenderer {
    type Visual = CardVisual;
    type Error = wgpu::SurfaceError;

    fn create_card_visual(
        &mut self,
        image: &DecodedImage,
        _size: Vec2,
    ) -> Result<CardVisual, wgpu::SurfaceError> {
        let device = &self.context.device;
        let pixels = texture::fit_to_limit(
            &image.pixels,
            self.context.max_texture_dimension(),
        );
        let view = texture::upload_rgba(
            device,
            &self.context.queue,
            &image.label,
            &pixels,
        );
        let model_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Card Model Buffer"),
                contents: bytemuck::cast_slice(&[CardUniform {
                    model: glam::Mat4::IDENTITY.to_cols_array_2d(),
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Card Bind Group"),
            layout: &self.card_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: model_buffer.as_entire_binding(),
                },
            ],
        });
        Ok(CardVisual {
            bind_group,
            model_buffer,
        })
    }

    fn set_lighting(&mut self, lighting: &LightingOptions) {
        self.context.queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::cast_slice(&[lighting_uniform(lighting)]),
        );
        let [r, g, b] = lighting.background.map(f64::from);
        self.clear_color = wgpu::Color { r, g, b, a: 1.0 };
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
    }

    fn draw(
        &mut self,
        camera: &Camera,
        cards: &[VisualCard<CardVisual>],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.camera_uniform.update_view_proj(camera);
        let queue = &self.context.queue;
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        for card in cards {
            queue.write_buffer(
                &card.visual.model_buffer,
                0,
                bytemuck::cast_slice(&[CardUniform {
                    model: card.model_matrix().to_cols_array_2d(),
                }]),
            );
        }

        // Far to near, so translucent edges blend over what is behind them.
        let mut order: Vec<&VisualCard<CardVisual>> = cards
            .iter()
            .filter(|c| c.position.z.is_finite())
            .collect();
        order.sort_by(|a, b| {
            a.position
                .z
                .partial_cmp(&b.position.z)
                .unwrap_or(Ordering::Equal)
        });

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Card Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.scene_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(
                self.index_buffer.slice(..),
                wgpu::IndexFormat::Uint16,
            );
            for card in order {
                pass.set_bind_group(1, &card.visual.bind_group, &[]);
                pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
            }
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}
