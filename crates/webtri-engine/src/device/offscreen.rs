//! Headless [`Platform`] on native wgpu.
//!
//! Surfaces are offscreen textures registered by id; "presenting" leaves the
//! frame in the texture, where [`OffscreenContext::read_pixels`] can copy it
//! back to the CPU.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::mpsc;

use super::error::Fault;
use super::init::{AdapterRequest, DeviceRequest};
use super::platform::{Page, Platform};
use super::surface::SurfaceSettings;
use crate::render::{FramePass, PipelineSpec, ShaderSource};
use crate::report::AdapterSummary;

/// Format of every offscreen target; four bytes per texel on readback.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const BYTES_PER_PIXEL: u32 = 4;

/// Size of a registered offscreen surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffscreenTarget {
    pub width: u32,
    pub height: u32,
}

/// Logical device plus its command queue.
#[derive(Debug)]
pub struct OffscreenDevice {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// Drawing context over one target. The texture exists once configured.
#[derive(Debug)]
pub struct OffscreenContext {
    target: OffscreenTarget,
    texture: RefCell<Option<wgpu::Texture>>,
}

/// Native wgpu platform without a window.
pub struct OffscreenPlatform {
    instance: wgpu::Instance,
    targets: HashMap<String, OffscreenTarget>,
    elements: HashSet<String>,
    texts: RefCell<HashMap<String, String>>,
}

impl Default for OffscreenPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl OffscreenPlatform {
    pub fn new() -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        Self {
            instance,
            targets: HashMap::new(),
            elements: HashSet::new(),
            texts: RefCell::default(),
        }
    }

    /// Registers a surface `id` of `width` x `height` pixels.
    pub fn with_target(mut self, id: impl Into<String>, width: u32, height: u32) -> Self {
        self.targets
            .insert(id.into(), OffscreenTarget { width, height });
        self
    }

    /// Registers a text element `id`.
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.elements.insert(id.into());
        self
    }

    /// Current text of element `id`; `None` if it was never registered.
    pub fn text(&self, id: &str) -> Option<String> {
        self.elements
            .contains(id)
            .then(|| self.texts.borrow().get(id).cloned().unwrap_or_default())
    }
}

/// Runs `create` inside a validation error scope and returns what it caught.
///
/// Native wgpu validates synchronously, so the scope has settled by the time
/// `create` returns and blocking on it does not wait on the GPU.
fn scoped<T>(device: &wgpu::Device, create: impl FnOnce() -> T) -> Result<T, Fault> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    match pollster::block_on(scope.pop()) {
        Some(err) => Err(Fault::from_error(&err)),
        None => Ok(value),
    }
}

impl Page for OffscreenPlatform {
    fn set_text(&self, id: &str, text: &str) -> bool {
        if !self.elements.contains(id) {
            return false;
        }
        self.texts.borrow_mut().insert(id.to_string(), text.to_string());
        true
    }
}

impl Platform for OffscreenPlatform {
    type Surface = OffscreenTarget;
    type Adapter = wgpu::Adapter;
    type Device = OffscreenDevice;
    type Context = OffscreenContext;
    type Shader = wgpu::ShaderModule;
    type Pipeline = wgpu::RenderPipeline;

    fn find_surface(&self, id: &str) -> Option<OffscreenTarget> {
        self.targets.get(id).copied()
    }

    /// wgpu is linked in, so the entry point always exists; whether any
    /// hardware backs it is up to the adapter request.
    fn gpu_available(&self) -> Result<bool, Fault> {
        Ok(true)
    }

    fn request_adapter(
        &self,
        request: &AdapterRequest,
    ) -> impl Future<Output = Option<wgpu::Adapter>> {
        let options = wgpu::RequestAdapterOptions {
            power_preference: request.power_preference,
            force_fallback_adapter: false,
            compatible_surface: None,
        };
        async move {
            match self.instance.request_adapter(&options).await {
                Ok(adapter) => Some(adapter),
                Err(err) => {
                    log::warn!("adapter request failed: {err}");
                    None
                }
            }
        }
    }

    fn adapter_summary(&self, adapter: &wgpu::Adapter) -> AdapterSummary {
        let info = adapter.get_info();
        AdapterSummary::new(info.name, format!("{:?}", info.backend))
    }

    fn request_device(
        &self,
        adapter: &wgpu::Adapter,
        request: &DeviceRequest,
    ) -> impl Future<Output = Result<OffscreenDevice, Fault>> {
        async move {
            let (device, queue) = adapter
                .request_device(&request.descriptor())
                .await
                .map_err(|e| Fault::from_error(&e))?;
            Ok(OffscreenDevice { device, queue })
        }
    }

    fn acquire_context(&self, surface: &OffscreenTarget) -> Option<OffscreenContext> {
        Some(OffscreenContext {
            target: *surface,
            texture: RefCell::new(None),
        })
    }

    fn preferred_format(
        &self,
        _context: &OffscreenContext,
        _adapter: &wgpu::Adapter,
    ) -> Result<wgpu::TextureFormat, Fault> {
        Ok(OFFSCREEN_FORMAT)
    }

    /// Allocates the target texture. There is no compositor, so the alpha
    /// mode has nothing to apply to.
    fn configure(
        &self,
        context: &OffscreenContext,
        device: &OffscreenDevice,
        settings: &SurfaceSettings,
    ) -> Result<(), Fault> {
        let OffscreenTarget { width, height } = context.target;
        let texture = scoped(&device.device, || {
            device.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("webtri offscreen target"),
                size: SurfaceSettings::extent(width, height),
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: settings.format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            })
        })?;
        *context.texture.borrow_mut() = Some(texture);
        Ok(())
    }

    fn create_shader(
        &self,
        device: &OffscreenDevice,
        source: &ShaderSource,
    ) -> Result<wgpu::ShaderModule, Fault> {
        scoped(&device.device, || source.create(&device.device))
    }

    fn create_pipeline(
        &self,
        device: &OffscreenDevice,
        spec: &PipelineSpec<'_, wgpu::ShaderModule>,
    ) -> Result<wgpu::RenderPipeline, Fault> {
        scoped(&device.device, || spec.create(&device.device))
    }

    fn submit_pass(
        &self,
        device: &OffscreenDevice,
        context: &OffscreenContext,
        pass: &FramePass<'_, wgpu::RenderPipeline>,
    ) -> Result<(), Fault> {
        let target = context.texture.borrow();
        let texture = target.as_ref().ok_or_else(not_configured)?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        scoped(&device.device, || {
            let mut encoder = device
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("webtri offscreen encoder"),
                });
            pass.encode(&mut encoder, &view);
            device.queue.submit(std::iter::once(encoder.finish()));
        })
    }
}

fn not_configured() -> Fault {
    Fault::Message("offscreen target is not configured".into())
}

impl OffscreenContext {
    /// Copies the last rendered frame back, as tightly packed rows of
    /// four-byte texels, top row first.
    ///
    /// Blocks until the GPU has finished every submitted frame.
    pub fn read_pixels(&self, device: &OffscreenDevice) -> Result<Vec<u8>, Fault> {
        let target = self.texture.borrow();
        let texture = target.as_ref().ok_or_else(not_configured)?;
        let (width, height) = (texture.width(), texture.height());

        let unpadded = width * BYTES_PER_PIXEL;
        let padded = unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let buffer = device.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("webtri readback"),
            size: u64::from(padded) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("webtri readback encoder"),
            });
        encoder.copy_texture_to_buffer(
            texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: None,
                },
            },
            texture.size(),
        );
        device.queue.submit(std::iter::once(encoder.finish()));

        let (tx, rx) = mpsc::channel();
        buffer.map_async(wgpu::MapMode::Read, .., move |result| {
            // The receiver outlives the poll below.
            let _ = tx.send(result);
        });
        device
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| Fault::from_error(&e))?;
        rx.recv()
            .map_err(|e| Fault::from_error(&e))?
            .map_err(|e| Fault::from_error(&e))?;

        let mapped = buffer.get_mapped_range(..);
        let mut pixels = Vec::with_capacity((unpadded * height) as usize);
        for row in mapped.chunks(padded as usize) {
            pixels.extend_from_slice(&row[..unpadded as usize]);
        }
        drop(mapped);
        buffer.unmap();

        Ok(pixels)
    }
}

#[cfg(test)]
mod tests {
    use pollster::block_on;

    use super::*;
    use crate::device::{run, SessionInit};

    const SIZE: u32 = 64;

    fn platform() -> OffscreenPlatform {
        OffscreenPlatform::new()
            .with_target("canvas", SIZE, SIZE)
            .with_element("info")
            .with_element("error")
    }

    fn texel(pixels: &[u8], x: u32, y: u32) -> [u8; 4] {
        let at = ((y * SIZE + x) * BYTES_PER_PIXEL) as usize;
        [pixels[at], pixels[at + 1], pixels[at + 2], pixels[at + 3]]
    }

    fn close_to(actual: [u8; 4], expected: [u8; 4]) -> bool {
        actual
            .iter()
            .zip(expected)
            .all(|(&a, e)| a.abs_diff(e) <= 1)
    }

    #[test]
    fn missing_target_is_reported() {
        let platform = OffscreenPlatform::new().with_element("error");

        assert!(block_on(run(&platform, &SessionInit::default())).is_none());
        assert_eq!(
            platform.text("error").as_deref(),
            Some("Error: Canvas element not found")
        );
    }

    #[test]
    fn unregistered_elements_are_not_written() {
        let platform = OffscreenPlatform::new().with_element("info");

        assert!(platform.set_text("info", "hello"));
        assert!(!platform.set_text("error", "lost"));
        assert_eq!(platform.text("info").as_deref(), Some("hello"));
        assert_eq!(platform.text("error"), None);
    }

    #[test]
    fn renders_the_triangle_over_the_clear_color() {
        let platform = platform();
        let Some(session) = block_on(run(&platform, &SessionInit::default())) else {
            // Machines without any GPU backend stop at the adapter request.
            assert_eq!(
                platform.text("error").as_deref(),
                Some("Error: Failed to get GPU adapter.")
            );
            return;
        };

        assert_eq!(session.surface_format(), OFFSCREEN_FORMAT);
        assert!(platform
            .text("info")
            .is_some_and(|line| line.starts_with("WebGPU Demo - Adapter: ")));

        let pixels = session
            .context()
            .read_pixels(session.device())
            .expect("readback");
        assert_eq!(pixels.len(), (SIZE * SIZE * BYTES_PER_PIXEL) as usize);

        // 0.1 -> 26, and (0.2, 0.6, 1.0) -> (51, 153, 255) in an unorm target.
        assert!(close_to(texel(&pixels, 1, 1), [26, 26, 26, 255]));
        assert!(close_to(texel(&pixels, SIZE - 2, 1), [26, 26, 26, 255]));
        assert!(close_to(texel(&pixels, SIZE / 2, SIZE / 2), [51, 153, 255, 255]));
    }

    #[test]
    fn invalid_shader_is_returned_as_a_fault() {
        let platform = platform();
        let Some(adapter) = block_on(platform.request_adapter(&AdapterRequest {
            power_preference: wgpu::PowerPreference::None,
        })) else {
            return;
        };
        let device = block_on(platform.request_device(
            &adapter,
            &SessionInit::default().device_request(),
        ))
        .expect("device");

        let broken = ShaderSource {
            label: "Broken Shader",
            entry_point: "main",
            code: "@fragment fn main() -> @location(0) vec4f { return missing; }",
        };
        let err = platform
            .create_shader(&device, &broken)
            .expect_err("invalid WGSL must not yield a module");
        assert!(matches!(err, Fault::Message(_)));
        assert!(!err.description().is_empty());
    }
}
