/// Presentation settings applied to the drawing context.
///
/// The size is not part of the settings: the platform reads it from the
/// surface at configuration time and it is never updated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSettings {
    /// Platform-preferred format, as queried during setup.
    pub format: wgpu::TextureFormat,
    pub alpha_mode: wgpu::CompositeAlphaMode,
}

impl SurfaceSettings {
    /// Extent of a drawable of `width` x `height`.
    ///
    /// wgpu rejects zero-sized textures, so both dimensions are clamped to 1.
    pub fn extent(width: u32, height: u32) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        }
    }
}
