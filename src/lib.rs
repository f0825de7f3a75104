//! Landing Interactions - client-side behavior for a course landing page
//!
//! Header scroll styling, a floating call-to-action box, fire-once entrance
//! animations with numeric count-ups, smooth anchor scrolling and a mobile
//! navigation toggle, compiled to WebAssembly and attached to existing markup.

pub mod core;
#[cfg(feature = "browser")]
pub mod ui;

#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    ui::mount();
}
