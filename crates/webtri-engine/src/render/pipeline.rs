/// One programmable stage: a compiled module and its entry point.
#[derive(Debug, PartialEq)]
pub struct StageSpec<'a, S> {
    pub module: &'a S,
    pub entry_point: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct FragmentSpec<'a, S> {
    pub stage: StageSpec<'a, S>,
    /// One entry per color attachment.
    pub targets: Vec<wgpu::TextureFormat>,
}

/// Immutable description of a render pipeline.
///
/// The layout is always derived from the shaders ("auto") and there are
/// never vertex buffers, so neither appears here.
#[derive(Debug, PartialEq)]
pub struct PipelineSpec<'a, S> {
    pub label: &'a str,
    pub vertex: StageSpec<'a, S>,
    pub fragment: FragmentSpec<'a, S>,
    pub topology: wgpu::PrimitiveTopology,
}

impl<'a, S> PipelineSpec<'a, S> {
    /// The demo pipeline: both stages at `main`, one target in `format`,
    /// every three vertices forming an independent triangle.
    pub fn triangle(vertex: &'a S, fragment: &'a S, format: wgpu::TextureFormat) -> Self {
        Self {
            label: "Triangle Pipeline",
            vertex: StageSpec {
                module: vertex,
                entry_point: super::VERTEX.entry_point,
            },
            fragment: FragmentSpec {
                stage: StageSpec {
                    module: fragment,
                    entry_point: super::FRAGMENT.entry_point,
                },
                targets: vec![format],
            },
            topology: wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

impl PipelineSpec<'_, wgpu::ShaderModule> {
    pub fn create(&self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        let targets: Vec<Option<wgpu::ColorTargetState>> = self
            .fragment
            .targets
            .iter()
            .map(|&format| {
                Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })
            })
            .collect();

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: None,

            vertex: wgpu::VertexState {
                module: self.vertex.module,
                entry_point: Some(self.vertex.entry_point),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: self.fragment.stage.module,
                entry_point: Some(self.fragment.stage.entry_point),
                compilation_options: Default::default(),
                targets: &targets,
            }),

            primitive: wgpu::PrimitiveState {
                topology: self.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}
