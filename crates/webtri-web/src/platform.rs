use std::cell::OnceCell;
use std::future::Future;

use anyhow::Result;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Gpu, GpuAdapter, GpuCanvasConfiguration, GpuCanvasContext, GpuColorTargetState,
    GpuCommandEncoderDescriptor, GpuDevice, GpuDeviceDescriptor, GpuFragmentState, GpuLoadOp,
    GpuPrimitiveState, GpuQueue, GpuRenderPassColorAttachment, GpuRenderPassDescriptor,
    GpuRenderPipeline, GpuRenderPipelineDescriptor, GpuRequestAdapterOptions, GpuShaderModule,
    GpuShaderModuleDescriptor, GpuStoreOp, GpuUncapturedErrorEvent, GpuVertexState,
    HtmlCanvasElement, Navigator,
};
use webtri_engine::device::{AdapterRequest, DeviceRequest, Fault, Page, Platform, SurfaceSettings};
use webtri_engine::render::{FramePass, PassCommand, PipelineSpec, ShaderSource};
use webtri_engine::report::AdapterSummary;

use crate::request::{adapter_description, settle};
use crate::{convert, dom, fault};

/// Logical device plus its queue.
///
/// Errors the device raises outside any call (a shader that fails to
/// compile, a lost device) are logged by the handler kept here.
#[derive(Debug)]
pub struct WebDevice {
    pub device: GpuDevice,
    pub queue: GpuQueue,
    _on_uncaptured_error: Closure<dyn FnMut(GpuUncapturedErrorEvent)>,
}

impl WebDevice {
    fn new(device: GpuDevice) -> Self {
        let on_uncaptured_error: Closure<dyn FnMut(GpuUncapturedErrorEvent)> =
            Closure::new(|event: GpuUncapturedErrorEvent| {
                log::error!("uncaptured WebGPU error: {}", event.error().message());
            });
        device.set_onuncapturederror(Some(on_uncaptured_error.as_ref().unchecked_ref()));

        Self {
            queue: device.queue(),
            device,
            _on_uncaptured_error: on_uncaptured_error,
        }
    }
}

/// [`Platform`] backed by the page DOM and the browser's WebGPU.
pub struct WebPlatform {
    document: Document,
    navigator: Navigator,
    /// `navigator.gpu`, once the support check has found it.
    gpu: OnceCell<Gpu>,
}

impl WebPlatform {
    pub fn new() -> Result<Self> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        Ok(Self {
            document,
            navigator: window.navigator(),
            gpu: OnceCell::new(),
        })
    }

    fn gpu(&self) -> Result<&Gpu, Fault> {
        self.gpu
            .get()
            .ok_or_else(|| Fault::Message("navigator.gpu was not checked".into()))
    }
}

impl Page for WebPlatform {
    fn set_text(&self, id: &str, text: &str) -> bool {
        dom::set_text(&self.document, id, text)
    }
}

impl Platform for WebPlatform {
    type Surface = HtmlCanvasElement;
    type Adapter = GpuAdapter;
    type Device = WebDevice;
    type Context = GpuCanvasContext;
    type Shader = GpuShaderModule;
    type Pipeline = GpuRenderPipeline;

    fn find_surface(&self, id: &str) -> Option<HtmlCanvasElement> {
        dom::canvas(&self.document, id)
    }

    fn gpu_available(&self) -> Result<bool, Fault> {
        let gpu = Reflect::get(&self.navigator, &JsValue::from_str("gpu"))
            .map_err(|e| fault::from_js(&e))?;
        if gpu.is_undefined() || gpu.is_null() {
            return Ok(false);
        }

        self.gpu.get_or_init(|| gpu.unchecked_into());
        Ok(true)
    }

    fn request_adapter(&self, request: &AdapterRequest) -> impl Future<Output = Option<GpuAdapter>> {
        let options = GpuRequestAdapterOptions::new();
        if let Some(preference) = convert::power_preference(request.power_preference) {
            options.set_power_preference(preference);
        }

        async move {
            let gpu = self.gpu().ok()?;
            match settle(gpu.request_adapter_with_options(&options)).await {
                // Resolves to null when no adapter matches.
                Ok(adapter) if adapter.is_null() || adapter.is_undefined() => None,
                Ok(adapter) => Some(adapter.unchecked_into()),
                Err(fault) => {
                    log::warn!("adapter request failed: {fault}");
                    None
                }
            }
        }
    }

    fn adapter_summary(&self, adapter: &GpuAdapter) -> AdapterSummary {
        AdapterSummary::new(adapter_description(adapter), "WebGPU")
    }

    fn request_device(
        &self,
        adapter: &GpuAdapter,
        request: &DeviceRequest,
    ) -> impl Future<Output = Result<WebDevice, Fault>> {
        let descriptor = GpuDeviceDescriptor::new();
        descriptor.set_label(&request.label);
        let pending = adapter.request_device_with_descriptor(&descriptor);

        async move {
            let device = settle(pending).await?;
            Ok(WebDevice::new(device.unchecked_into()))
        }
    }

    fn acquire_context(&self, canvas: &HtmlCanvasElement) -> Option<GpuCanvasContext> {
        match canvas.get_context("webgpu") {
            Ok(context) => context.map(|context| context.unchecked_into()),
            Err(err) => {
                log::warn!("getContext(\"webgpu\") threw: {}", fault::from_js(&err));
                None
            }
        }
    }

    fn preferred_format(
        &self,
        _context: &GpuCanvasContext,
        _adapter: &GpuAdapter,
    ) -> Result<wgpu::TextureFormat, Fault> {
        convert::texture_format(self.gpu()?.get_preferred_canvas_format())
    }

    /// The browser sizes the drawing buffer from the canvas itself.
    fn configure(
        &self,
        context: &GpuCanvasContext,
        device: &WebDevice,
        settings: &SurfaceSettings,
    ) -> Result<(), Fault> {
        let config =
            GpuCanvasConfiguration::new(&device.device, convert::gpu_texture_format(settings.format)?);
        config.set_alpha_mode(convert::alpha_mode(settings.alpha_mode)?);
        context.configure(&config).map_err(|e| fault::from_js(&e))
    }

    /// Compilation errors are reported asynchronously by the browser; see the
    /// device's uncaptured-error handler.
    fn create_shader(
        &self,
        device: &WebDevice,
        source: &ShaderSource,
    ) -> Result<GpuShaderModule, Fault> {
        let descriptor = GpuShaderModuleDescriptor::new(source.code);
        descriptor.set_label(source.label);
        Ok(device.device.create_shader_module(&descriptor))
    }

    fn create_pipeline(
        &self,
        device: &WebDevice,
        spec: &PipelineSpec<'_, GpuShaderModule>,
    ) -> Result<GpuRenderPipeline, Fault> {
        let vertex = GpuVertexState::new(spec.vertex.module);
        vertex.set_entry_point(spec.vertex.entry_point);

        let targets = Array::new();
        for &format in &spec.fragment.targets {
            targets.push(&GpuColorTargetState::new(convert::gpu_texture_format(format)?));
        }
        let fragment = GpuFragmentState::new(spec.fragment.stage.module, &targets);
        fragment.set_entry_point(spec.fragment.stage.entry_point);

        let primitive = GpuPrimitiveState::new();
        primitive.set_topology(convert::topology(spec.topology));

        let descriptor = GpuRenderPipelineDescriptor::new(&JsValue::from_str("auto"), &vertex);
        descriptor.set_label(spec.label);
        descriptor.set_fragment(&fragment);
        descriptor.set_primitive(&primitive);

        device
            .device
            .create_render_pipeline(&descriptor)
            .map_err(|e| fault::from_js(&e))
    }

    /// The browser presents the canvas texture once the task returns.
    fn submit_pass(
        &self,
        device: &WebDevice,
        context: &GpuCanvasContext,
        pass: &FramePass<'_, GpuRenderPipeline>,
    ) -> Result<(), Fault> {
        let view = context
            .get_current_texture()
            .and_then(|texture| texture.create_view())
            .map_err(|e| fault::from_js(&e))?;

        let attachment = GpuRenderPassColorAttachment::new(GpuLoadOp::Clear, GpuStoreOp::Store, &view);
        attachment.set_clear_value(&convert::color(pass.clear));
        let descriptor = GpuRenderPassDescriptor::new(&Array::of1(&attachment));
        descriptor.set_label(pass.label);

        let encoder_descriptor = GpuCommandEncoderDescriptor::new();
        encoder_descriptor.set_label("webtri frame encoder");
        let encoder = device
            .device
            .create_command_encoder_with_descriptor(&encoder_descriptor);

        let rpass = encoder
            .begin_render_pass(&descriptor)
            .map_err(|e| fault::from_js(&e))?;
        for command in &pass.commands {
            match command {
                PassCommand::SetPipeline(pipeline) => rpass.set_pipeline(pipeline),
                PassCommand::Draw {
                    vertices,
                    instances,
                } => rpass.draw_with_instance_count_and_first_vertex_and_first_instance(
                    vertices.end - vertices.start,
                    instances.end - instances.start,
                    vertices.start,
                    instances.start,
                ),
            }
        }
        rpass.end();

        device.queue.submit(&Array::of1(&encoder.finish()));
        Ok(())
    }
}
