//! `web_sys` implementations of the page host and frame scheduler.

use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::core::{Display, FrameScheduler, PageError, PageHost, Rect, Viewport, WatchHandle};

pub(crate) fn js_error(err: JsValue) -> PageError {
    PageError::Host(format!("{err:?}"))
}

/// Log a failed browser call and continue without its result
fn logged<T>(result: Result<T, JsValue>, op: &'static str) -> Option<T> {
    result
        .map_err(|err| warn!(op, error = ?err, "browser call failed"))
        .ok()
}

/// The live document
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or_else(|| PageError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| PageError::Host("no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Intersection observer subscription. The JS callback itself is leaked, since
/// cancelling happens from inside it.
pub struct WebWatch {
    observer: Option<IntersectionObserver>,
}

impl WatchHandle for WebWatch {
    fn cancel(&self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

impl PageHost for WebHost {
    type Element = Element;
    type Watch = WebWatch;

    fn query(&self, selector: &str) -> Option<Element> {
        logged(self.document.query_selector(selector), "query_selector").flatten()
    }

    fn query_all_in(&self, parent: &Element, selector: &str) -> Vec<Element> {
        let Some(list) = logged(parent.query_selector_all(selector), "query_selector_all") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_in(&self, parent: &Element, selector: &str) -> Option<Element> {
        logged(parent.query_selector(selector), "query_selector").flatten()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_class(&self, element: &Element, class: &str, present: bool) {
        logged(
            element.class_list().toggle_with_force(class, present),
            "classList.toggle",
        );
    }

    fn set_display(&self, element: &Element, display: Display) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            logged(
                html.style().set_property("display", &display.to_string()),
                "style.setProperty",
            );
        }
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.top(), rect.bottom())
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn scroll_y(&self) -> f64 {
        match self.window.scroll_y() {
            Ok(offset) => offset,
            Err(_) => self
                .document
                .document_element()
                .map(|root| f64::from(root.scroll_top()))
                .unwrap_or_default(),
        }
    }

    fn viewport(&self) -> Viewport {
        let width = logged(self.window.inner_width(), "innerWidth").and_then(|v| v.as_f64());
        let height = logged(self.window.inner_height(), "innerHeight").and_then(|v| v.as_f64());
        Viewport::new(width.unwrap_or_default(), height.unwrap_or_default())
    }

    fn document_height(&self) -> f64 {
        self.document
            .document_element()
            .map(|root| f64::from(root.scroll_height()))
            .unwrap_or_default()
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn watch_intersection(
        &self,
        element: &Element,
        threshold: f64,
        mut on_enter: Box<dyn FnMut()>,
    ) -> WebWatch {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let entered = entries.iter().any(|entry| {
                entry
                    .dyn_into::<IntersectionObserverEntry>()
                    .map(|entry| entry.is_intersecting())
                    .unwrap_or(false)
            });
            if entered {
                on_enter();
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));

        let observer = logged(
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init),
            "new IntersectionObserver",
        );
        if let Some(observer) = &observer {
            observer.observe(element);
        }

        // Keep the closure alive
        callback.forget();
        WebWatch { observer }
    }
}

/// `requestAnimationFrame` and `setTimeout` on the live window
pub struct WebScheduler {
    window: Window,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for WebScheduler {
    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_default()
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Result<(), PageError> {
        let frame = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        self.window
            .request_animation_frame(frame.unchecked_ref())
            .map(drop)
            .map_err(js_error)
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        // Dropping a Timeout cancels it; these always run to completion
        let _ = Timeout::new(delay_ms, callback).forget();
    }
}
