use std::fmt;
use std::future::Future;

use super::error::Fault;
use super::init::{AdapterRequest, DeviceRequest};
use super::surface::SurfaceSettings;
use crate::render::{FramePass, PipelineSpec, ShaderSource};
use crate::report::AdapterSummary;

/// Text sink backed by page elements.
pub trait Page {
    /// Replaces the text of the element with `id`.
    ///
    /// Returns `false` when no such element exists; that is not an error.
    fn set_text(&self, id: &str, text: &str) -> bool;
}

/// Graphics platform the session drives.
///
/// Each method is one step of the setup sequence and reports failure as a
/// value. The two hardware requests are asynchronous and are awaited one
/// after the other; no future is required to be `Send`.
///
/// # Creation errors
///
/// [`configure`](Platform::configure), [`create_shader`](Platform::create_shader)
/// and [`create_pipeline`](Platform::create_pipeline) return the errors the
/// platform can observe while the call runs. WebGPU validates shader modules
/// asynchronously, so in the browser `create_shader` always returns `Ok`; a
/// bad module fails the pipeline instead, and anything else the device
/// rejects later is logged by its uncaptured-error handler.
pub trait Platform: Page {
    /// Drawing target, looked up by element id.
    type Surface;
    type Adapter: fmt::Debug;
    type Device: fmt::Debug;
    /// Surface bound for presentation.
    type Context;
    type Shader;
    type Pipeline;

    fn find_surface(&self, id: &str) -> Option<Self::Surface>;

    /// Whether the graphics API entry point exists at all.
    fn gpu_available(&self) -> Result<bool, Fault>;

    fn request_adapter(
        &self,
        request: &AdapterRequest,
    ) -> impl Future<Output = Option<Self::Adapter>>;

    fn adapter_summary(&self, adapter: &Self::Adapter) -> AdapterSummary;

    fn request_device(
        &self,
        adapter: &Self::Adapter,
        request: &DeviceRequest,
    ) -> impl Future<Output = Result<Self::Device, Fault>>;

    fn acquire_context(&self, surface: &Self::Surface) -> Option<Self::Context>;

    /// The format the platform prefers for presenting to `context`.
    fn preferred_format(
        &self,
        context: &Self::Context,
        adapter: &Self::Adapter,
    ) -> Result<wgpu::TextureFormat, Fault>;

    fn configure(
        &self,
        context: &Self::Context,
        device: &Self::Device,
        settings: &SurfaceSettings,
    ) -> Result<(), Fault>;

    fn create_shader(
        &self,
        device: &Self::Device,
        source: &ShaderSource,
    ) -> Result<Self::Shader, Fault>;

    fn create_pipeline(
        &self,
        device: &Self::Device,
        spec: &PipelineSpec<'_, Self::Shader>,
    ) -> Result<Self::Pipeline, Fault>;

    /// Acquires the current texture of `context`, records `pass` into it and
    /// submits the commands to the device queue. Must not suspend.
    fn submit_pass(
        &self,
        device: &Self::Device,
        context: &Self::Context,
        pass: &FramePass<'_, Self::Pipeline>,
    ) -> Result<(), Fault>;
}
