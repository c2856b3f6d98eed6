//! In-memory platform that records every call, for session tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::{self, Future};
use std::ops::Range;

use super::error::Fault;
use super::init::{AdapterRequest, DeviceRequest};
use super::platform::{Page, Platform};
use super::surface::SurfaceSettings;
use crate::render::{FramePass, PassCommand, PipelineSpec, ShaderSource};
use crate::report::AdapterSummary;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    FindSurface(String),
    GpuAvailable,
    RequestAdapter,
    RequestDevice,
    AcquireContext,
    PreferredFormat,
    Configure(SurfaceSettings),
    CreateShader(&'static str),
    CreatePipeline {
        label: String,
        vertex: (&'static str, String),
        fragment: (&'static str, String),
        targets: Vec<wgpu::TextureFormat>,
        topology: wgpu::PrimitiveTopology,
    },
    SubmitPass {
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedPass {
    pub clear: wgpu::Color,
    pub pipeline_bound_before_draw: bool,
    pub draws: Vec<(Range<u32>, Range<u32>)>,
}

#[derive(Debug)]
pub(crate) struct FakeAdapter {
    description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FakeDevice {
    label: String,
}

pub(crate) struct FakeContext;

#[derive(Debug, PartialEq)]
pub(crate) struct FakeShader(&'static str);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FakePipeline {
    label: String,
}

/// Each field switches one step between success and failure.
pub(crate) struct FakePlatform {
    pub has_canvas: bool,
    pub has_gpu: bool,
    pub gpu_check: Option<Fault>,
    /// Adapter description; `None` means no adapter.
    pub adapter: Option<String>,
    pub device: Result<(), Fault>,
    pub has_context: bool,
    pub pipeline_fault: Option<Fault>,
    pub submit: Option<Fault>,
    /// Ids of elements present on the page.
    pub elements: Vec<&'static str>,

    pub(crate) log: RefCell<Vec<Call>>,
    pub(crate) passes: RefCell<Vec<RecordedPass>>,
    pub(crate) texts: RefCell<HashMap<String, String>>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            has_canvas: true,
            has_gpu: true,
            gpu_check: None,
            adapter: Some("Fake GPU".into()),
            device: Ok(()),
            has_context: true,
            pipeline_fault: None,
            submit: None,
            elements: vec!["info", "error"],
            log: RefCell::default(),
            passes: RefCell::default(),
            texts: RefCell::default(),
        }
    }
}

impl FakePlatform {
    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn passes(&self) -> Vec<RecordedPass> {
        self.passes.borrow().clone()
    }

    fn element_text(&self, id: &str) -> Option<String> {
        self.has_element(id)
            .then(|| self.texts.borrow().get(id).cloned().unwrap_or_default())
    }

    pub fn status_text(&self) -> Option<String> {
        self.element_text("info")
    }

    pub fn error_text(&self) -> Option<String> {
        self.element_text("error")
    }

    fn has_element(&self, id: &str) -> bool {
        self.elements.iter().any(|e| *e == id)
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl Page for FakePlatform {
    fn set_text(&self, id: &str, text: &str) -> bool {
        if !self.has_element(id) {
            return false;
        }
        self.texts.borrow_mut().insert(id.to_string(), text.to_string());
        true
    }
}

impl Platform for FakePlatform {
    type Surface = ();
    type Adapter = FakeAdapter;
    type Device = FakeDevice;
    type Context = FakeContext;
    type Shader = FakeShader;
    type Pipeline = FakePipeline;

    fn find_surface(&self, id: &str) -> Option<()> {
        self.record(Call::FindSurface(id.to_string()));
        self.has_canvas.then_some(())
    }

    fn gpu_available(&self) -> Result<bool, Fault> {
        self.record(Call::GpuAvailable);
        match &self.gpu_check {
            Some(fault) => Err(fault.clone()),
            None => Ok(self.has_gpu),
        }
    }

    fn request_adapter(
        &self,
        _request: &AdapterRequest,
    ) -> impl Future<Output = Option<FakeAdapter>> {
        self.record(Call::RequestAdapter);
        let adapter = self
            .adapter
            .clone()
            .map(|description| FakeAdapter { description });
        future::ready(adapter)
    }

    fn adapter_summary(&self, adapter: &FakeAdapter) -> AdapterSummary {
        AdapterSummary::new(adapter.description.clone(), "Fake")
    }

    fn request_device(
        &self,
        _adapter: &FakeAdapter,
        request: &DeviceRequest,
    ) -> impl Future<Output = Result<FakeDevice, Fault>> {
        self.record(Call::RequestDevice);
        let device = self.device.clone().map(|()| FakeDevice {
            label: request.label.clone(),
        });
        future::ready(device)
    }

    fn acquire_context(&self, _surface: &()) -> Option<FakeContext> {
        self.record(Call::AcquireContext);
        self.has_context.then_some(FakeContext)
    }

    fn preferred_format(
        &self,
        _context: &FakeContext,
        _adapter: &FakeAdapter,
    ) -> Result<wgpu::TextureFormat, Fault> {
        self.record(Call::PreferredFormat);
        Ok(wgpu::TextureFormat::Bgra8Unorm)
    }

    fn configure(
        &self,
        _context: &FakeContext,
        _device: &FakeDevice,
        settings: &SurfaceSettings,
    ) -> Result<(), Fault> {
        self.record(Call::Configure(*settings));
        Ok(())
    }

    fn create_shader(
        &self,
        _device: &FakeDevice,
        source: &ShaderSource,
    ) -> Result<FakeShader, Fault> {
        self.record(Call::CreateShader(source.label));
        Ok(FakeShader(source.label))
    }

    fn create_pipeline(
        &self,
        _device: &FakeDevice,
        spec: &PipelineSpec<'_, FakeShader>,
    ) -> Result<FakePipeline, Fault> {
        self.record(Call::CreatePipeline {
            label: spec.label.to_string(),
            vertex: (spec.vertex.module.0, spec.vertex.entry_point.to_string()),
            fragment: (
                spec.fragment.stage.module.0,
                spec.fragment.stage.entry_point.to_string(),
            ),
            targets: spec.fragment.targets.clone(),
            topology: spec.topology,
        });
        if let Some(fault) = &self.pipeline_fault {
            return Err(fault.clone());
        }
        Ok(FakePipeline {
            label: spec.label.to_string(),
        })
    }

    fn submit_pass(
        &self,
        _device: &FakeDevice,
        _context: &FakeContext,
        pass: &FramePass<'_, FakePipeline>,
    ) -> Result<(), Fault> {
        self.record(Call::SubmitPass {
            label: pass.label.to_string(),
        });
        if let Some(fault) = &self.submit {
            return Err(fault.clone());
        }

        let mut bound = false;
        let mut recorded = RecordedPass {
            clear: pass.clear,
            pipeline_bound_before_draw: true,
            draws: Vec::new(),
        };
        for command in &pass.commands {
            match command {
                PassCommand::SetPipeline(_) => bound = true,
                PassCommand::Draw {
                    vertices,
                    instances,
                } => {
                    recorded.pipeline_bound_before_draw &= bound;
                    recorded.draws.push((vertices.clone(), instances.clone()));
                }
            }
        }
        self.passes.borrow_mut().push(recorded);
        Ok(())
    }
}
