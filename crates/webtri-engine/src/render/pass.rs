use std::ops::Range;

/// A command recorded inside the pass, in order.
#[derive(Debug, PartialEq)]
pub enum PassCommand<'a, R> {
    SetPipeline(&'a R),
    /// Non-indexed draw.
    Draw {
        vertices: Range<u32>,
        instances: Range<u32>,
    },
}

/// One color pass over the current surface texture.
///
/// The attachment is always cleared to `clear` on load and stored on end.
#[derive(Debug, PartialEq)]
pub struct FramePass<'a, R> {
    pub label: &'a str,
    pub clear: wgpu::Color,
    pub commands: Vec<PassCommand<'a, R>>,
}

impl<'a, R> FramePass<'a, R> {
    /// Clear, bind `pipeline`, draw three vertices once.
    pub fn triangle(pipeline: &'a R, clear: wgpu::Color) -> Self {
        Self {
            label: "webtri triangle pass",
            clear,
            commands: vec![
                PassCommand::SetPipeline(pipeline),
                PassCommand::Draw {
                    vertices: 0..3,
                    instances: 0..1,
                },
            ],
        }
    }
}

impl FramePass<'_, wgpu::RenderPipeline> {
    /// Records the pass into `encoder`, targeting `view`.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for command in &self.commands {
            match command {
                PassCommand::SetPipeline(pipeline) => rpass.set_pipeline(pipeline),
                PassCommand::Draw {
                    vertices,
                    instances,
                } => rpass.draw(vertices.clone(), instances.clone()),
            }
        }
        // Dropping `rpass` ends the pass.
    }
}
