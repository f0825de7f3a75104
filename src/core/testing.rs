//! In-memory host and scheduler used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use super::host::{Display, PageHost, Rect, Viewport, WatchHandle};
use super::scheduler::FrameScheduler;
use super::PageError;

struct Node {
    name: String,
    parent: Option<FakeElement>,
    classes: RefCell<BTreeSet<String>>,
    text: RefCell<String>,
    display: Cell<Option<Display>>,
    rect: Cell<Rect>,
}

/// Element handle with identity semantics
#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

impl FakeElement {
    pub fn new(name: &str) -> Self {
        Self::with_parent(name, None)
    }

    pub fn child(&self, name: &str) -> Self {
        Self::with_parent(name, Some(self.clone()))
    }

    fn with_parent(name: &str, parent: Option<FakeElement>) -> Self {
        Self(Rc::new(Node {
            name: name.to_string(),
            parent,
            classes: RefCell::default(),
            text: RefCell::default(),
            display: Cell::new(None),
            rect: Cell::default(),
        }))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().contains(class)
    }

    pub fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub fn set_text(&self, text: &str) {
        *self.0.text.borrow_mut() = text.to_string();
    }

    /// Inline display last written by the controller, if any
    pub fn display(&self) -> Option<Display> {
        self.0.display.get()
    }

    pub fn set_rect(&self, rect: Rect) {
        self.0.rect.set(rect);
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FakeElement({})", self.0.name)
    }
}

struct Watch {
    element: FakeElement,
    threshold: f64,
    callback: Rc<RefCell<Box<dyn FnMut()>>>,
    cancelled: Rc<Cell<bool>>,
}

pub struct FakeWatch {
    cancelled: Rc<Cell<bool>>,
}

impl WatchHandle for FakeWatch {
    fn cancel(&self) {
        self.cancelled.set(true);
    }
}

#[derive(Default)]
struct HostState {
    /// (scope, selector, element); `None` scope is the document
    selectors: RefCell<Vec<(Option<FakeElement>, String, FakeElement)>>,
    ids: RefCell<HashMap<String, FakeElement>>,
    scroll_y: Cell<f64>,
    viewport: Cell<Viewport>,
    document_height: Cell<f64>,
    scrolled_to: RefCell<Vec<f64>>,
    watches: RefCell<Vec<Watch>>,
}

/// Document stand-in. Clones share state so tests keep a handle after the
/// controller takes ownership.
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Rc<HostState>,
}

impl FakeHost {
    pub fn new() -> Self {
        let host = Self::default();
        host.set_viewport(Viewport::new(1200.0, 800.0));
        host.set_document_height(5000.0);
        host
    }

    /// Make `element` the match for `selector` at document level
    pub fn register(&self, selector: &str, element: &FakeElement) {
        self.state
            .selectors
            .borrow_mut()
            .push((None, selector.to_string(), element.clone()));
    }

    /// Make `element` a match for `selector` inside `scope`
    pub fn register_in(&self, scope: &FakeElement, selector: &str, element: &FakeElement) {
        self.state.selectors.borrow_mut().push((
            Some(scope.clone()),
            selector.to_string(),
            element.clone(),
        ));
    }

    pub fn register_id(&self, id: &str, element: &FakeElement) {
        self.state
            .ids
            .borrow_mut()
            .insert(id.to_string(), element.clone());
    }

    pub fn set_scroll_y(&self, offset: f64) {
        self.state.scroll_y.set(offset);
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.viewport.set(viewport);
    }

    pub fn set_document_height(&self, height: f64) {
        self.state.document_height.set(height);
    }

    pub fn scrolled_to(&self) -> Vec<f64> {
        self.state.scrolled_to.borrow().clone()
    }

    /// Number of live (not cancelled) watches on `element`
    pub fn active_watches(&self, element: &FakeElement) -> usize {
        self.state
            .watches
            .borrow()
            .iter()
            .filter(|w| &w.element == element && !w.cancelled.get())
            .count()
    }

    pub fn watch_threshold(&self, element: &FakeElement) -> Option<f64> {
        self.state
            .watches
            .borrow()
            .iter()
            .find(|w| &w.element == element)
            .map(|w| w.threshold)
    }

    /// Report `element` as intersecting to every live watch on it
    pub fn fire_intersection(&self, element: &FakeElement) {
        let callbacks: Vec<_> = self
            .state
            .watches
            .borrow()
            .iter()
            .filter(|w| &w.element == element)
            .map(|w| (Rc::clone(&w.callback), Rc::clone(&w.cancelled)))
            .collect();

        for (callback, cancelled) in callbacks {
            if !cancelled.get() {
                (&mut **callback.borrow_mut())();
            }
        }
    }

    fn matches(&self, scope: Option<&FakeElement>, selector: &str) -> Vec<FakeElement> {
        self.state
            .selectors
            .borrow()
            .iter()
            .filter(|(s, sel, _)| s.as_ref() == scope && sel == selector)
            .map(|(_, _, el)| el.clone())
            .collect()
    }
}

impl PageHost for FakeHost {
    type Element = FakeElement;
    type Watch = FakeWatch;

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.matches(None, selector).into_iter().next()
    }

    fn query_all_in(&self, parent: &FakeElement, selector: &str) -> Vec<FakeElement> {
        self.matches(Some(parent), selector)
    }

    fn query_in(&self, parent: &FakeElement, selector: &str) -> Option<FakeElement> {
        self.matches(Some(parent), selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.state.ids.borrow().get(id).cloned()
    }

    fn set_class(&self, element: &FakeElement, class: &str, present: bool) {
        let mut classes = element.0.classes.borrow_mut();
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn set_display(&self, element: &FakeElement, display: Display) {
        element.0.display.set(Some(display));
    }

    fn text(&self, element: &FakeElement) -> String {
        element.text()
    }

    fn set_text(&self, element: &FakeElement, text: &str) {
        element.set_text(text);
    }

    fn bounding_rect(&self, element: &FakeElement) -> Rect {
        element.0.rect.get()
    }

    fn contains(&self, ancestor: &FakeElement, node: &FakeElement) -> bool {
        let mut current = Some(node.clone());
        while let Some(el) = current {
            if &el == ancestor {
                return true;
            }
            current = el.0.parent.clone();
        }
        false
    }

    fn scroll_y(&self) -> f64 {
        self.state.scroll_y.get()
    }

    fn viewport(&self) -> Viewport {
        self.state.viewport.get()
    }

    fn document_height(&self) -> f64 {
        self.state.document_height.get()
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.state.scrolled_to.borrow_mut().push(top);
    }

    fn watch_intersection(
        &self,
        element: &FakeElement,
        threshold: f64,
        on_enter: Box<dyn FnMut()>,
    ) -> FakeWatch {
        let cancelled = Rc::new(Cell::new(false));
        self.state.watches.borrow_mut().push(Watch {
            element: element.clone(),
            threshold,
            callback: Rc::new(RefCell::new(on_enter)),
            cancelled: Rc::clone(&cancelled),
        });
        FakeWatch { cancelled }
    }
}

struct Timer {
    due: f64,
    seq: u64,
    delay_ms: u32,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct SchedulerState {
    now: Cell<f64>,
    seq: Cell<u64>,
    frames: RefCell<Vec<Box<dyn FnOnce(f64)>>>,
    timers: RefCell<Vec<Timer>>,
    refuse_frames: Cell<bool>,
}

/// Manually stepped clock, frame queue and timer queue
#[derive(Clone, Default)]
pub struct FakeScheduler {
    state: Rc<SchedulerState>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, `request_frame` fails and drops its callback
    pub fn refuse_frames(&self, refuse: bool) {
        self.state.refuse_frames.set(refuse);
    }

    pub fn pending_frames(&self) -> usize {
        self.state.frames.borrow().len()
    }

    /// Delays of the pending timers, in scheduling order
    pub fn pending_timer_delays(&self) -> Vec<u32> {
        let mut timers: Vec<_> = self
            .state
            .timers
            .borrow()
            .iter()
            .map(|t| (t.seq, t.delay_ms))
            .collect();
        timers.sort_unstable();
        timers.into_iter().map(|(_, delay)| delay).collect()
    }

    /// Move the clock forward by `ms`, running every timer that falls due.
    pub fn advance(&self, ms: f64) {
        let until = self.state.now.get() + ms;
        while let Some(timer) = self.take_due_timer(until) {
            self.state.now.set(timer.due.max(self.state.now.get()));
            (timer.callback)();
        }
        self.state.now.set(until);
    }

    /// Advance by `ms` and then run the frame callbacks queued so far.
    pub fn run_frame(&self, ms: f64) {
        self.advance(ms);
        let frames = std::mem::take(&mut *self.state.frames.borrow_mut());
        let now = self.state.now.get();
        for frame in frames {
            frame(now);
        }
    }

    fn take_due_timer(&self, until: f64) -> Option<Timer> {
        let mut timers = self.state.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;
        Some(timers.remove(index))
    }
}

impl FrameScheduler for FakeScheduler {
    fn now(&self) -> f64 {
        self.state.now.get()
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Result<(), PageError> {
        if self.state.refuse_frames.get() {
            return Err(PageError::Host("frame request refused".into()));
        }
        self.state.frames.borrow_mut().push(callback);
        Ok(())
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        let seq = self.state.seq.get();
        self.state.seq.set(seq + 1);
        self.state.timers.borrow_mut().push(Timer {
            due: self.state.now.get() + f64::from(delay_ms),
            seq,
            delay_ms,
            callback,
        });
    }
}
