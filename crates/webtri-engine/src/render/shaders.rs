/// WGSL source for one shader module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource {
    pub label: &'static str,
    pub entry_point: &'static str,
    pub code: &'static str,
}

/// Emits the three clip-space corners of the triangle, selected by
/// `vertex_index`.
pub const VERTEX: ShaderSource = ShaderSource {
    label: "Vertex Shader",
    entry_point: "main",
    code: include_str!("shaders/triangle_vert.wgsl"),
};

/// Fills every fragment with a constant blue.
pub const FRAGMENT: ShaderSource = ShaderSource {
    label: "Fragment Shader",
    entry_point: "main",
    code: include_str!("shaders/triangle_frag.wgsl"),
};

impl ShaderSource {
    pub fn create(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.code.into()),
        })
    }
}
