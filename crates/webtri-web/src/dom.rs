use anyhow::{Context, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

pub(crate) fn window() -> Result<Window> {
    web_sys::window().context("no global `window` exists")
}

pub(crate) fn document(window: &Window) -> Result<Document> {
    window.document().context("window has no document")
}

/// Looks up a canvas by id. An element that is not a canvas counts as missing.
pub(crate) fn canvas(document: &Document, id: &str) -> Option<HtmlCanvasElement> {
    let element = document.get_element_by_id(id)?;
    match element.dyn_into::<HtmlCanvasElement>() {
        Ok(canvas) => Some(canvas),
        Err(other) => {
            log::warn!("#{id} is a <{}>, not a <canvas>", other.tag_name().to_lowercase());
            None
        }
    }
}

/// Replaces the text content of `#id`; `false` if there is no such element.
pub(crate) fn set_text(document: &Document, id: &str, text: &str) -> bool {
    match document.get_element_by_id(id) {
        Some(element) => {
            element.set_text_content(Some(text));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;
    use web_sys::Element;

    use super::*;

    fn page() -> Document {
        document(&window().expect("window")).expect("document")
    }

    /// Appends `<tag id="id">` to the body; the caller removes it.
    fn mount(document: &Document, tag: &str, id: &str) -> Element {
        let element = document.create_element(tag).expect("create element");
        element.set_id(id);
        document
            .body()
            .expect("body")
            .append_child(&element)
            .expect("append");
        element
    }

    #[wasm_bindgen_test]
    fn missing_element_has_no_canvas() {
        assert!(canvas(&page(), "webtri-absent").is_none());
    }

    #[wasm_bindgen_test]
    fn canvas_element_is_found() {
        let document = page();
        let element = mount(&document, "canvas", "webtri-canvas");

        assert!(canvas(&document, "webtri-canvas").is_some());
        element.remove();
    }

    #[wasm_bindgen_test]
    fn non_canvas_element_counts_as_missing() {
        let document = page();
        let element = mount(&document, "div", "webtri-div");

        assert!(canvas(&document, "webtri-div").is_none());
        element.remove();
    }

    #[wasm_bindgen_test]
    fn set_text_on_missing_element_is_false() {
        assert!(!set_text(&page(), "webtri-absent", "Error: anything"));
    }

    #[wasm_bindgen_test]
    fn set_text_replaces_content() {
        let document = page();
        let element = mount(&document, "p", "webtri-info");
        element.set_text_content(Some("old"));

        assert!(set_text(&document, "webtri-info", "WebGPU Demo - Adapter: Unknown"));
        assert_eq!(
            element.text_content().as_deref(),
            Some("WebGPU Demo - Adapter: Unknown")
        );
        element.remove();
    }
}
