//! wgpu pipelines for the piano scene. Surface and device setup stay with the
//! frontends; this only needs a device, a queue and a color target.

mod helpers;

use crate::constants::CLEAR_COLOR;
use crate::gpu::{
    cube_edge_vertices, cube_vertices, BoxInstance, CubeVertex, FrameInstances, PointInstance,
    SceneUniforms,
};
use helpers::{
    create_depth_texture, create_instance_buffer, make_scene_pipeline, PipelineDesc,
    ADDITIVE_BLEND,
};
use wgpu::util::DeviceExt;

const CUBE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const BOX_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4];
const POINT_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

/// Draw counters reported to the stats panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawStats {
    pub draw_calls: u32,
    pub triangles: u32,
}

pub struct SceneRenderer {
    box_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    cube_vb: wgpu::Buffer,
    cube_vertex_count: u32,
    edge_vb: wgpu::Buffer,
    edge_vertex_count: u32,
    box_buffer: wgpu::Buffer,
    box_capacity: usize,
    point_buffer: wgpu::Buffer,
    point_capacity: usize,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let cube_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &CUBE_ATTRS,
        };
        let box_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BoxInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &BOX_ATTRS,
        };
        let point_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POINT_ATTRS,
        };
        let box_buffers = [cube_layout, box_layout];

        let box_pipeline = make_scene_pipeline(
            device,
            &layout,
            &shader,
            color_format,
            PipelineDesc {
                label: "box_pipeline",
                vs_entry: "vs_box",
                fs_entry: "fs_box",
                buffers: &box_buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: true,
            },
        );
        let wire_pipeline = make_scene_pipeline(
            device,
            &layout,
            &shader,
            color_format,
            PipelineDesc {
                label: "wire_pipeline",
                vs_entry: "vs_box",
                fs_entry: "fs_box",
                buffers: &box_buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: true,
            },
        );
        let point_pipeline = make_scene_pipeline(
            device,
            &layout,
            &shader,
            color_format,
            PipelineDesc {
                label: "point_pipeline",
                vs_entry: "vs_point",
                fs_entry: "fs_point",
                buffers: &[point_layout],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                blend: ADDITIVE_BLEND,
                depth_write: false,
            },
        );

        let cube = cube_vertices();
        let cube_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vb"),
            contents: bytemuck::cast_slice(&cube),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let edges = cube_edge_vertices();
        let edge_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge_vb"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let box_capacity = 64;
        let point_capacity = 4096;
        let box_buffer = create_instance_buffer(
            device,
            "box_instances",
            box_capacity,
            std::mem::size_of::<BoxInstance>(),
        );
        let point_buffer = create_instance_buffer(
            device,
            "point_instances",
            point_capacity,
            std::mem::size_of::<PointInstance>(),
        );
        let (depth_tex, depth_view) = create_depth_texture(device, width, height);

        Self {
            box_pipeline,
            wire_pipeline,
            point_pipeline,
            uniform_buffer,
            bind_group,
            cube_vb,
            cube_vertex_count: cube.len() as u32,
            edge_vb,
            edge_vertex_count: edges.len() as u32,
            box_buffer,
            box_capacity,
            point_buffer,
            point_capacity,
            _depth_tex: depth_tex,
            depth_view,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (tex, view) = create_depth_texture(device, width, height);
        self._depth_tex = tex;
        self.depth_view = view;
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, boxes: usize, points: usize) {
        if boxes > self.box_capacity {
            self.box_capacity = boxes.next_power_of_two();
            self.box_buffer = create_instance_buffer(
                device,
                "box_instances",
                self.box_capacity,
                std::mem::size_of::<BoxInstance>(),
            );
        }
        if points > self.point_capacity {
            self.point_capacity = points.next_power_of_two();
            self.point_buffer = create_instance_buffer(
                device,
                "point_instances",
                self.point_capacity,
                std::mem::size_of::<PointInstance>(),
            );
        }
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        uniforms: &SceneUniforms,
        frame: &FrameInstances,
    ) -> DrawStats {
        self.ensure_capacity(device, frame.boxes.len(), frame.points.len());
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        if !frame.boxes.is_empty() {
            queue.write_buffer(&self.box_buffer, 0, bytemuck::cast_slice(&frame.boxes));
        }
        if !frame.points.is_empty() {
            queue.write_buffer(&self.point_buffer, 0, bytemuck::cast_slice(&frame.points));
        }

        let mut stats = DrawStats::default();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            let box_count = frame.boxes.len() as u32;
            if box_count > 0 {
                let (pipeline, vb, verts) = if frame.wireframe {
                    (&self.wire_pipeline, &self.edge_vb, self.edge_vertex_count)
                } else {
                    (&self.box_pipeline, &self.cube_vb, self.cube_vertex_count)
                };
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.set_vertex_buffer(1, self.box_buffer.slice(..));
                rpass.draw(0..verts, 0..box_count);
                stats.draw_calls += 1;
                if !frame.wireframe {
                    stats.triangles += box_count * verts / 3;
                }
            }

            let point_count = frame.points.len() as u32;
            if point_count > 0 {
                rpass.set_pipeline(&self.point_pipeline);
                rpass.set_vertex_buffer(0, self.point_buffer.slice(..));
                rpass.draw(0..6, 0..point_count);
                stats.draw_calls += 1;
                stats.triangles += point_count * 2;
            }
        }
        queue.submit(Some(encoder.finish()));
        stats
    }
}
