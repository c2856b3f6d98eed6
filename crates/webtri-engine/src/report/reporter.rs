use std::fmt;

use crate::device::Page;

/// Shown in place of a missing adapter description.
pub const UNKNOWN_ADAPTER: &str = "Unknown";

/// What the status line and log say about the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterSummary {
    pub description: Option<String>,
    pub backend: String,
}

impl AdapterSummary {
    /// Builds a summary, treating an empty description as absent.
    pub fn new(description: impl Into<String>, backend: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            description: (!description.trim().is_empty()).then_some(description),
            backend: backend.into(),
        }
    }

    pub fn description_or_unknown(&self) -> &str {
        self.description.as_deref().unwrap_or(UNKNOWN_ADAPTER)
    }
}

/// Writes status and error messages to a [`Page`] and the log.
pub struct Reporter<'p, P: ?Sized> {
    page: &'p P,
    status_id: &'p str,
    error_id: &'p str,
}

impl<'p, P: Page + ?Sized> Reporter<'p, P> {
    pub fn new(page: &'p P, status_id: &'p str, error_id: &'p str) -> Self {
        Self {
            page,
            status_id,
            error_id,
        }
    }

    /// Shows `message` in the error element, if present, and logs it.
    pub fn error(&self, message: &str) {
        self.page.set_text(self.error_id, &format!("Error: {message}"));
        log::error!("{message}");
    }

    /// Shows the success line and logs the adapter and device handles.
    pub fn status(
        &self,
        summary: &AdapterSummary,
        adapter: &dyn fmt::Debug,
        device: &dyn fmt::Debug,
    ) {
        let line = format!(
            "WebGPU Demo - Adapter: {}",
            summary.description_or_unknown()
        );
        if !self.page.set_text(self.status_id, &line) {
            log::debug!("no #{} element; status not displayed", self.status_id);
        }

        log::info!("WebGPU initialized successfully!");
        log::info!("Adapter: {adapter:?} ({})", summary.backend);
        log::info!("Device: {device:?}");
    }
}
