//! Rendering descriptions.
//!
//! The session speaks in these platform-neutral values; the wgpu-specific
//! `create`/`encode` helpers turn them into real GPU objects and commands.
//!
//! Convention:
//! - no vertex buffers; positions live in the vertex shader source
//! - one color target in the surface format, no blending

mod pass;
mod pipeline;
mod shaders;

pub use pass::{FramePass, PassCommand};
pub use pipeline::{FragmentSpec, PipelineSpec, StageSpec};
pub use shaders::{ShaderSource, FRAGMENT, VERTEX};
