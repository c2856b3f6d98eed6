//! Platform seam, configuration and the initialization session.
//!
//! This module is responsible for:
//! - the ordered setup sequence (surface, support check, adapter, device,
//!   context, shaders, pipeline)
//! - owning every handle the sequence produces
//! - the single render pass issued per frame
//! - a headless wgpu platform for native runs

mod error;
mod init;
#[cfg(not(target_arch = "wasm32"))]
mod offscreen;
mod platform;
mod session;
mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Fault, InitError};
pub use init::{AdapterRequest, DeviceRequest, SessionInit};
#[cfg(not(target_arch = "wasm32"))]
pub use offscreen::{
    OffscreenContext, OffscreenDevice, OffscreenPlatform, OffscreenTarget, OFFSCREEN_FORMAT,
};
pub use platform::{Page, Platform};
pub use session::{run, Session};
pub use surface::SurfaceSettings;
