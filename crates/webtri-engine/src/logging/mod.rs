//! Logging utilities.
//!
//! Every module logs through the `log` facade. This module only picks the
//! sink: the browser console on wasm32, `env_logger` everywhere else.

mod init;

pub use init::{init_logging, LoggingConfig};
