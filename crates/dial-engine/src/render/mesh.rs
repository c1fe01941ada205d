use wgpu::util::DeviceExt;

use crate::camera::PerspectiveCamera;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawList, Scene, Topology};

use super::common::{
    camera_ubo_min_binding_size, premul_alpha_blend, vertex_layout, CameraUniform, ModelInstance,
    Variant,
};

/// Renderer for scene meshes.
///
/// Mesh data is uploaded once per [`MeshId`](crate::scene::MeshId) and reused
/// across frames; only the camera uniform and the per-draw model matrices are
/// written each frame. Draws follow the [`DrawList`] order, so translucent
/// meshes blend over everything drawn before them.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipelines: [Option<wgpu::RenderPipeline>; Variant::COUNT],

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    /// Indexed by `MeshId`. `None` for empty meshes.
    meshes: Vec<Option<GpuMesh>>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
    instances: Vec<ModelInstance>,
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    vertex_count: u32,
    topology: Topology,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes resident on the GPU.
    pub fn uploaded_meshes(&self) -> usize {
        self.meshes.iter().filter(|m| m.is_some()).count()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        camera: &PerspectiveCamera,
        draw_list: &DrawList,
    ) {
        if draw_list.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);
        self.upload_meshes(ctx, scene);

        self.instances.clear();
        self.instances
            .extend(draw_list.items().iter().map(|item| ModelInstance::new(item.model)));

        self.write_camera_uniform(ctx, camera);
        self.ensure_instance_capacity(ctx, self.instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("dial mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        let mut bound: Option<usize> = None;
        for (i, item) in draw_list.items().iter().enumerate() {
            let Some(Some(mesh)) = self.meshes.get(item.mesh.index()) else { continue };

            let variant = Variant {
                topology: mesh.topology,
                pass: item.key.pass,
            };
            let slot = variant.index();
            if bound != Some(slot) {
                let Some(pipeline) = self.pipelines[slot].as_ref() else { continue };
                rpass.set_pipeline(pipeline);
                bound = Some(slot);
            }

            let instance = i as u32;
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.draw(0..mesh.vertex_count, instance..instance + 1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipelines.iter().all(Option::is_some) {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("dial mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("dial mesh bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(camera_ubo_min_binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("dial mesh pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        for variant in Variant::ALL {
            let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(variant.label()),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout(), ModelInstance::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: variant.primitive_topology(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: ctx.depth_format,
                    depth_write_enabled: variant.writes_depth(),
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });
            self.pipelines[variant.index()] = Some(pipeline);
        }

        log::debug!(
            "mesh pipelines built for {:?} / {:?}",
            ctx.surface_format,
            ctx.depth_format
        );

        self.pipeline_formats = Some(formats);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dial camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    /// Uploads meshes added to `scene` since the last frame.
    fn upload_meshes(&mut self, ctx: &RenderCtx<'_>, scene: &Scene) {
        let known = self.meshes.len();
        if scene.meshes().len() <= known {
            return;
        }

        for mesh in &scene.meshes()[known..] {
            let gpu = (!mesh.is_empty()).then(|| GpuMesh {
                vbo: ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("dial mesh vbo"),
                    contents: bytemuck::cast_slice(mesh.vertices()),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                vertex_count: mesh.vertex_count() as u32,
                topology: mesh.topology(),
            });
            self.meshes.push(gpu);
        }

        log::debug!(
            "uploaded {} meshes ({} resident)",
            self.meshes.len() - known,
            self.uploaded_meshes()
        );
    }

    fn write_camera_uniform(&mut self, ctx: &RenderCtx<'_>, camera: &PerspectiveCamera) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        ctx.queue
            .write_buffer(ubo, 0, bytemuck::bytes_of(&CameraUniform::from_camera(camera)));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<ModelInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dial mesh instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}
