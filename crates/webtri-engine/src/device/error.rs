use std::fmt;

use thiserror::Error;

/// Terminal failure of the initialization sequence.
///
/// None of these are retried. The `Display` text is exactly what ends up in
/// the error element (after the "Error: " prefix) and the console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("Canvas element not found")]
    MissingSurface,

    #[error("WebGPU is not supported in this browser.")]
    UnsupportedPlatform,

    #[error("Failed to get GPU adapter.")]
    NoAdapter,

    #[error("Failed to get WebGPU context.")]
    NoContext,

    /// Anything without a dedicated check: device request rejection,
    /// configuration, shader or pipeline creation, the first frame.
    #[error("Initialization failed: {0}")]
    Unhandled(#[from] Fault),
}

/// Description of a failure raised by the platform.
///
/// Mirrors the two shapes a rejection can take: an error object that
/// carries message text, or an arbitrary value that only has a string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    Message(String),
    Value(String),
}

impl Fault {
    /// Takes the message text of an error.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::Message(err.to_string())
    }

    /// Takes the string form of a non-error value.
    pub fn from_value(value: impl fmt::Display) -> Self {
        Self::Value(value.to_string())
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Message(text) | Self::Value(text) => text,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl std::error::Error for Fault {}
