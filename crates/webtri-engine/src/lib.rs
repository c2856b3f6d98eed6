//! webtri engine crate.
//!
//! Owns the platform-neutral half of the demo: the ordered initialization
//! sequence, the session that holds every GPU handle, the WGSL sources and
//! the pipeline/pass descriptions, plus status and error reporting.
//!
//! The browser half lives in `webtri-web`, which implements
//! [`device::Platform`] on top of `web-sys` and wgpu.

pub mod device;
pub mod logging;
pub mod render;
pub mod report;
