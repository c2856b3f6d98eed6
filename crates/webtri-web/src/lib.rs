//! Browser entry point for webtri.
//!
//! Built with `wasm-pack build --target web crates/webtri-web` and loaded by
//! `www/index.html`, which provides the `#canvas`, `#info` and `#error`
//! elements.
//!
//! On non-wasm targets this crate is empty; the engine's logic is tested
//! natively in `webtri-engine`.

#[cfg(target_arch = "wasm32")]
mod convert;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fault;
#[cfg(target_arch = "wasm32")]
mod platform;
#[cfg(target_arch = "wasm32")]
mod request;

#[cfg(target_arch = "wasm32")]
pub use platform::{WebDevice, WebPlatform};

// The DOM tests need a document.
#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::*;

/// Installs the console sinks and starts the one initialization sequence
/// of this page load.
#[cfg(all(target_arch = "wasm32", not(test)))]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    use webtri_engine::device::{run, SessionInit};
    use webtri_engine::logging::{init_logging, LoggingConfig};

    console_error_panic_hook::set_once();
    init_logging(LoggingConfig::default());

    let platform = WebPlatform::new().map_err(|e| JsValue::from_str(&format!("{e:#}")))?;

    wasm_bindgen_futures::spawn_local(async move {
        let init = SessionInit::default();
        if run(&platform, &init).await.is_some() {
            log::debug!("first frame submitted");
        }
    });

    Ok(())
}
