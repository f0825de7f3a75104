//! Browser wiring: builds the page controller over the live document and
//! registers the scroll, click and anchor listeners.

mod web_host;

pub use web_host::{WebHost, WebScheduler, WebWatch};

use tracing::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Window};

use crate::core::{PageConfig, PageController, PageError};
use web_host::js_error;

/// Id of the optional `<script type="application/json">` holding config overrides
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

type WebController = PageController<WebHost, WebScheduler>;

/// Attach all landing page behavior to the current document.
pub fn mount() {
    if let Err(err) = try_mount() {
        error!(%err, "landing page behavior not attached");
    }
}

fn try_mount() -> Result<(), PageError> {
    let host = WebHost::new()?;
    let window = host.window().clone();
    let document = host.document().clone();
    let config = load_config(&document);

    let controller = PageController::new(host, WebScheduler::new(window.clone()), config)?;

    listen_scroll(&window, &controller)?;
    listen_clicks(&document, &controller)?;
    listen_anchors(&document, &controller)?;

    controller.initialize();
    Ok(())
}

fn load_config(document: &Document) -> PageConfig {
    let Some(script) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return PageConfig::default();
    };

    let json = script.text_content().unwrap_or_default();
    match PageConfig::from_json(&json) {
        Ok(config) => {
            info!("page config overrides loaded");
            config
        }
        Err(err) => {
            warn!(%err, "ignoring invalid page config");
            PageConfig::default()
        }
    }
}

fn listen_scroll(window: &Window, controller: &WebController) -> Result<(), PageError> {
    let ctrl = controller.clone();
    let on_scroll = Closure::wrap(Box::new(move |_: web_sys::Event| {
        ctrl.handle_scroll();
    }) as Box<dyn FnMut(web_sys::Event)>);

    window
        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
        .map_err(js_error)?;

    // Listeners live as long as the page
    on_scroll.forget();
    Ok(())
}

fn listen_clicks(document: &Document, controller: &WebController) -> Result<(), PageError> {
    let ctrl = controller.clone();
    let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        if let Some(target) = target {
            ctrl.handle_click(&target);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(js_error)?;

    on_click.forget();
    Ok(())
}

fn listen_anchors(document: &Document, controller: &WebController) -> Result<(), PageError> {
    let anchors = document
        .query_selector_all(&controller.config().selectors.anchor_links)
        .map_err(js_error)?;

    for i in 0..anchors.length() {
        let Some(anchor) = anchors.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };

        let ctrl = controller.clone();
        let link = anchor.clone();
        let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let href = link.get_attribute("href").unwrap_or_default();
            if ctrl.handle_anchor_click(&href) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        anchor
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_click.forget();
    }

    info!(count = anchors.length(), "anchor links intercepted");
    Ok(())
}
