use super::error::{Fault, InitError};
use super::init::SessionInit;
use super::platform::Platform;
use crate::render::{FramePass, PipelineSpec, FRAGMENT, VERTEX};
use crate::report::{AdapterSummary, Reporter};

/// Every handle produced by a successful initialization.
///
/// Nothing here is global: each session owns its handles outright, and
/// after setup they are only read by [`Session::render`]. The surface and
/// the shader modules are never read again; they live as long as the session.
pub struct Session<P: Platform> {
    _surface: P::Surface,
    adapter: P::Adapter,
    summary: AdapterSummary,
    device: P::Device,
    context: P::Context,
    format: wgpu::TextureFormat,
    _vertex: P::Shader,
    _fragment: P::Shader,
    pipeline: P::Pipeline,
    clear: wgpu::Color,
}

impl<P: Platform> Session<P> {
    /// Runs the setup sequence and renders the first frame.
    ///
    /// Steps run strictly in order and the first failure stops the sequence;
    /// nothing is retried.
    pub async fn initialize(platform: &P, init: &SessionInit) -> Result<Self, InitError> {
        let surface = platform
            .find_surface(&init.surface_id)
            .ok_or(InitError::MissingSurface)?;

        if !platform.gpu_available()? {
            return Err(InitError::UnsupportedPlatform);
        }

        let adapter = platform
            .request_adapter(&init.adapter_request())
            .await
            .ok_or(InitError::NoAdapter)?;
        let summary = platform.adapter_summary(&adapter);
        log::debug!("adapter acquired: {summary:?}");

        // Rejections here have no dedicated variant and surface as `Unhandled`.
        let device = platform
            .request_device(&adapter, &init.device_request())
            .await?;

        let context = platform
            .acquire_context(&surface)
            .ok_or(InitError::NoContext)?;

        let format = platform.preferred_format(&context, &adapter)?;
        platform.configure(&context, &device, &init.surface_settings(format))?;
        log::debug!("surface configured: {format:?}, {:?}", init.alpha_mode);

        let vertex = platform.create_shader(&device, &VERTEX)?;
        let fragment = platform.create_shader(&device, &FRAGMENT)?;
        let pipeline = platform.create_pipeline(
            &device,
            &PipelineSpec::triangle(&vertex, &fragment, format),
        )?;

        let session = Self {
            _surface: surface,
            adapter,
            summary,
            device,
            context,
            format,
            _vertex: vertex,
            _fragment: fragment,
            pipeline,
            clear: init.clear_color,
        };
        session.render(platform)?;

        Ok(session)
    }

    /// Clears the current frame, draws the triangle and submits.
    ///
    /// Reads the session's handles without changing any of them, so it can
    /// be called again at any point after setup.
    pub fn render(&self, platform: &P) -> Result<(), Fault> {
        let pass = FramePass::triangle(&self.pipeline, self.clear);
        platform.submit_pass(&self.device, &self.context, &pass)
    }

    pub fn adapter_summary(&self) -> &AdapterSummary {
        &self.summary
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn device(&self) -> &P::Device {
        &self.device
    }

    /// The configured drawing context the frames are rendered into.
    pub fn context(&self) -> &P::Context {
        &self.context
    }

    pub fn pipeline(&self) -> &P::Pipeline {
        &self.pipeline
    }
}

/// Top-level entry: initializes a session and reports the outcome.
///
/// Every failure, explicit check or not, is reported exactly once here.
pub async fn run<P: Platform>(platform: &P, init: &SessionInit) -> Option<Session<P>> {
    let reporter = Reporter::new(platform, &init.status_id, &init.error_id);

    match Session::initialize(platform, init).await {
        Ok(session) => {
            reporter.status(&session.summary, &session.adapter, &session.device);
            Some(session)
        }
        Err(err) => {
            reporter.error(&err.to_string());
            None
        }
    }
}
