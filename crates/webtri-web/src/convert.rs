//! Engine values (wgpu types) in their browser WebGPU form.

use web_sys::{
    GpuCanvasAlphaMode, GpuColorDict, GpuPowerPreference, GpuPrimitiveTopology, GpuTextureFormat,
};
use webtri_engine::device::Fault;

/// Formats a canvas can be configured with, plus their sRGB views.
const CANVAS_FORMATS: [(GpuTextureFormat, wgpu::TextureFormat); 5] = [
    (GpuTextureFormat::Bgra8unorm, wgpu::TextureFormat::Bgra8Unorm),
    (GpuTextureFormat::Bgra8unormSrgb, wgpu::TextureFormat::Bgra8UnormSrgb),
    (GpuTextureFormat::Rgba8unorm, wgpu::TextureFormat::Rgba8Unorm),
    (GpuTextureFormat::Rgba8unormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb),
    (GpuTextureFormat::Rgba16float, wgpu::TextureFormat::Rgba16Float),
];

pub(crate) fn texture_format(format: GpuTextureFormat) -> Result<wgpu::TextureFormat, Fault> {
    CANVAS_FORMATS
        .iter()
        .find(|(gpu, _)| *gpu == format)
        .map(|&(_, wgpu)| wgpu)
        .ok_or_else(|| Fault::Message(format!("unsupported canvas format {format:?}")))
}

pub(crate) fn gpu_texture_format(format: wgpu::TextureFormat) -> Result<GpuTextureFormat, Fault> {
    CANVAS_FORMATS
        .iter()
        .find(|(_, wgpu)| *wgpu == format)
        .map(|&(gpu, _)| gpu)
        .ok_or_else(|| Fault::Message(format!("unsupported canvas format {format:?}")))
}

/// WebGPU canvases only composite opaque or premultiplied.
pub(crate) fn alpha_mode(mode: wgpu::CompositeAlphaMode) -> Result<GpuCanvasAlphaMode, Fault> {
    match mode {
        wgpu::CompositeAlphaMode::Opaque => Ok(GpuCanvasAlphaMode::Opaque),
        wgpu::CompositeAlphaMode::PreMultiplied => Ok(GpuCanvasAlphaMode::Premultiplied),
        other => Err(Fault::Message(format!(
            "unsupported canvas alpha mode {other:?}"
        ))),
    }
}

/// `None` leaves the choice to the browser.
pub(crate) fn power_preference(preference: wgpu::PowerPreference) -> Option<GpuPowerPreference> {
    match preference {
        wgpu::PowerPreference::None => None,
        wgpu::PowerPreference::LowPower => Some(GpuPowerPreference::LowPower),
        wgpu::PowerPreference::HighPerformance => Some(GpuPowerPreference::HighPerformance),
    }
}

pub(crate) fn topology(topology: wgpu::PrimitiveTopology) -> GpuPrimitiveTopology {
    match topology {
        wgpu::PrimitiveTopology::PointList => GpuPrimitiveTopology::PointList,
        wgpu::PrimitiveTopology::LineList => GpuPrimitiveTopology::LineList,
        wgpu::PrimitiveTopology::LineStrip => GpuPrimitiveTopology::LineStrip,
        wgpu::PrimitiveTopology::TriangleList => GpuPrimitiveTopology::TriangleList,
        wgpu::PrimitiveTopology::TriangleStrip => GpuPrimitiveTopology::TriangleStrip,
    }
}

pub(crate) fn color(color: wgpu::Color) -> GpuColorDict {
    // Dictionary members are passed in alphabetical order.
    GpuColorDict::new(color.a, color.b, color.g, color.r)
}
