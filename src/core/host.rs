//! DOM access seam.
//!
//! `PageHost` is the narrow slice of the browser the controller needs: element
//! lookup, class markers, text, geometry, smooth scrolling and viewport
//! intersection watches. The browser build implements it over `web_sys`; tests
//! use an in-memory fake.

/// Bounding rectangle of an element, relative to the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

/// Inner size of the browser window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Inline `display` override on an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Display {
    /// Inline value cleared; the stylesheet decides
    #[display("")]
    Unset,
    #[display("none")]
    None,
}

/// Subscription returned by `PageHost::watch_intersection`
pub trait WatchHandle {
    /// Stop delivering intersection callbacks. Idempotent.
    fn cancel(&self);
}

/// Access to the host page.
pub trait PageHost: 'static {
    type Element: Clone + PartialEq + 'static;
    type Watch: WatchHandle + 'static;

    /// First element matching `selector` anywhere in the document
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// All elements matching `selector` inside `parent`, in document order
    fn query_all_in(&self, parent: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// First element matching `selector` inside `parent`
    fn query_in(&self, parent: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Add (`present = true`) or remove a class marker
    fn set_class(&self, element: &Self::Element, class: &str, present: bool);

    fn set_display(&self, element: &Self::Element, display: Display);

    fn text(&self, element: &Self::Element) -> String;

    fn set_text(&self, element: &Self::Element, text: &str);

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Whether `node` is `ancestor` itself or one of its descendants
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    /// Absolute vertical scroll offset of the document
    fn scroll_y(&self) -> f64;

    fn viewport(&self) -> Viewport;

    /// Total scrollable height of the document
    fn document_height(&self) -> f64;

    fn smooth_scroll_to(&self, top: f64);

    /// Invoke `on_enter` each time at least `threshold` of `element` becomes
    /// visible, until the returned handle is cancelled.
    fn watch_intersection(
        &self,
        element: &Self::Element,
        threshold: f64,
        on_enter: Box<dyn FnMut()>,
    ) -> Self::Watch;
}
