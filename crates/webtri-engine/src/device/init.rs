use super::surface::SurfaceSettings;

/// Initialization parameters for a demo session.
///
/// Defaults reproduce the page contract: a `#canvas` surface, optional
/// `#info` and `#error` elements, default adapter/device options and an
/// opaque canvas cleared to dark gray.
#[derive(Debug, Clone)]
pub struct SessionInit {
    /// Id of the canvas element to draw into.
    pub surface_id: String,

    /// Id of the optional element receiving the status line.
    pub status_id: String,

    /// Id of the optional element receiving error messages.
    pub error_id: String,

    /// Adapter power preference. `None` leaves the choice to the browser.
    pub power_preference: wgpu::PowerPreference,

    pub device_label: String,

    /// Canvas compositing mode.
    pub alpha_mode: wgpu::CompositeAlphaMode,

    /// Color the frame is cleared to before the triangle is drawn.
    pub clear_color: wgpu::Color,
}

impl Default for SessionInit {
    fn default() -> Self {
        Self {
            surface_id: "canvas".into(),
            status_id: "info".into(),
            error_id: "error".into(),
            power_preference: wgpu::PowerPreference::None,
            device_label: "webtri device".into(),
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
        }
    }
}

/// Options for the adapter request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterRequest {
    pub power_preference: wgpu::PowerPreference,
}

/// Options for the device request.
///
/// Only the label is configurable: the page asks for a default device, with
/// no optional features and no raised limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRequest {
    pub label: String,
}

impl SessionInit {
    pub fn adapter_request(&self) -> AdapterRequest {
        AdapterRequest {
            power_preference: self.power_preference,
        }
    }

    pub fn device_request(&self) -> DeviceRequest {
        DeviceRequest {
            label: self.device_label.clone(),
        }
    }

    /// Surface settings for the given (platform-preferred) format.
    pub fn surface_settings(&self, format: wgpu::TextureFormat) -> SurfaceSettings {
        SurfaceSettings {
            format,
            alpha_mode: self.alpha_mode,
        }
    }
}

impl DeviceRequest {
    /// The wgpu form of the request.
    ///
    /// The triangle binds no resources, so the lowest limit tier every
    /// backend provides is enough.
    pub fn descriptor(&self) -> wgpu::DeviceDescriptor<'_> {
        wgpu::DeviceDescriptor {
            label: Some(&self.label),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }
    }
}
