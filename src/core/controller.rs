//! Page controller
//!
//! Owns the cached element handles and the small amount of runtime state the
//! landing page needs, and routes host events to the individual behaviors:
//! - scroll ticks (throttled to one per frame) update the header and CTA box
//! - intersection watches drive the fire-once entrance animations
//! - document clicks drive the mobile navigation menu
//! - anchor clicks scroll smoothly to their in-page target

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::anchor;
use super::config::{PageConfig, RevealConfig};
use super::count_up::{CountTarget, CountUp};
use super::cta::{CtaInputs, CtaPolicy};
use super::host::PageHost;
use super::nav::{NavClick, NavMenu, NavState};
use super::reveal::{OneShot, RevealGroup, stagger_delay};
use super::scheduler::FrameScheduler;
use super::scroll::{FrameThrottle, ScrollTracker};
use super::PageError;

/// Class markers the stylesheet reacts to
pub mod classes {
    pub const SCROLLED: &str = "scrolled";
    pub const NAV_HIDDEN: &str = "nav-hidden";
    pub const VISIBLE: &str = "visible";
    pub const ANIMATE: &str = "animate";
    pub const ACTIVE: &str = "active";
}

/// Element handles resolved once at construction
struct PageElements<E> {
    header: E,
    hero: Option<E>,
    nav_panel: Option<E>,
    nav_toggle: Option<E>,
    nav_links: Vec<E>,
    cta_box: Option<E>,
    cta_button: Option<E>,
}

struct Inner<H: PageHost, S: FrameScheduler> {
    host: H,
    scheduler: S,
    config: PageConfig,
    cta: CtaPolicy,
    elements: PageElements<H::Element>,
    tracker: RefCell<ScrollTracker>,
    throttle: FrameThrottle,
    nav: RefCell<NavMenu>,
}

/// Landing page behavior bound to one document.
///
/// Cloning is cheap and yields a handle to the same controller; event
/// callbacks each hold one.
pub struct PageController<H: PageHost, S: FrameScheduler> {
    inner: Rc<Inner<H, S>>,
}

impl<H: PageHost, S: FrameScheduler> Clone for PageController<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: PageHost, S: FrameScheduler> PageController<H, S> {
    /// Resolve element handles. Fails only when the header is missing.
    pub fn new(host: H, scheduler: S, config: PageConfig) -> Result<Self, PageError> {
        let selectors = &config.selectors;

        let header = host
            .query(&selectors.header)
            .ok_or_else(|| PageError::missing(&selectors.header))?;

        let nav_panel = host.query(&selectors.nav_panel);
        let nav_links = nav_panel
            .as_ref()
            .map(|panel| host.query_all_in(panel, &selectors.nav_link))
            .unwrap_or_default();

        let cta_box = host.query(&selectors.cta_box);
        let cta_button = cta_box
            .as_ref()
            .and_then(|cta| host.query_in(cta, &selectors.cta_button));

        let elements = PageElements {
            header,
            hero: host.query(&selectors.hero),
            nav_toggle: host.query(&selectors.nav_toggle),
            nav_panel,
            nav_links,
            cta_box,
            cta_button,
        };

        Ok(Self {
            inner: Rc::new(Inner {
                cta: CtaPolicy::new(config.mobile_breakpoint, config.bottom_slack),
                tracker: RefCell::new(ScrollTracker::new(config.scroll_threshold)),
                throttle: FrameThrottle::new(),
                nav: RefCell::new(NavMenu::new()),
                host,
                scheduler,
                config,
                elements,
            }),
        })
    }

    /// Apply the initial scroll state and arm the entrance animations.
    pub fn initialize(&self) {
        self.update_scroll();
        self.watch_stat_cards();
        self.watch_checklist();
        self.reveal_promo_card();

        info!(
            cta = self.inner.elements.cta_box.is_some(),
            nav = self.inner.elements.nav_toggle.is_some(),
            "landing page controller initialized"
        );
    }

    pub fn config(&self) -> &PageConfig {
        &self.inner.config
    }

    pub fn nav_state(&self) -> NavState {
        self.inner.nav.borrow().state()
    }

    /// Scroll event entry point. Coalesces bursts into one update per frame.
    pub fn handle_scroll(&self) {
        if !self.inner.throttle.try_begin() {
            return;
        }
        let this = self.clone();
        let scheduled = self.inner.scheduler.request_frame(Box::new(move |_: f64| {
            this.update_scroll();
            this.inner.throttle.finish();
        }));
        if let Err(err) = scheduled {
            // The frame will never run, so the next scroll event must retry
            self.inner.throttle.finish();
            warn!(error = %err, "could not schedule scroll update");
        }
    }

    fn update_scroll(&self) {
        let host = &self.inner.host;
        let offset = host.scroll_y();
        let state = self.inner.tracker.borrow_mut().update(offset);

        let header = &self.inner.elements.header;
        host.set_class(header, classes::SCROLLED, state.scrolled);
        host.set_class(header, classes::NAV_HIDDEN, state.nav_hidden);

        self.update_cta(offset);
    }

    fn update_cta(&self, scroll_y: f64) {
        let host = &self.inner.host;
        let elements = &self.inner.elements;
        let (Some(cta_box), Some(hero)) = (&elements.cta_box, &elements.hero) else {
            return;
        };

        let decision = self.inner.cta.decide(&CtaInputs {
            hero_bottom: host.bounding_rect(hero).bottom,
            scroll_y,
            viewport: host.viewport(),
            document_height: host.document_height(),
        });

        host.set_class(cta_box, classes::VISIBLE, decision.box_visible);
        if let (Some(button), Some(display)) = (&elements.cta_button, decision.button) {
            host.set_display(button, display);
        }
    }

    /// Document click entry point. Returns the new menu state if it changed.
    pub fn handle_click(&self, target: &H::Element) -> Option<NavState> {
        let elements = &self.inner.elements;
        let (Some(toggle), Some(panel)) = (&elements.nav_toggle, &elements.nav_panel) else {
            return None;
        };

        let click = self.classify_click(toggle, panel, target);
        let next = self.inner.nav.borrow_mut().click(click)?;

        let host = &self.inner.host;
        host.set_class(toggle, classes::ACTIVE, next.is_open());
        host.set_class(panel, classes::ACTIVE, next.is_open());
        debug!(state = %next, ?click, "navigation menu");
        Some(next)
    }

    fn classify_click(&self, toggle: &H::Element, panel: &H::Element, target: &H::Element) -> NavClick {
        let host = &self.inner.host;
        if host.contains(toggle, target) {
            NavClick::Toggle
        } else if self
            .inner
            .elements
            .nav_links
            .iter()
            .any(|link| host.contains(link, target))
        {
            NavClick::Link
        } else if host.contains(panel, target) {
            NavClick::Panel
        } else {
            NavClick::Outside
        }
    }

    /// Anchor click entry point. Returns `true` when the default navigation
    /// must be prevented.
    pub fn handle_anchor_click(&self, href: &str) -> bool {
        let Some(id) = anchor::fragment_target(href) else {
            return false;
        };

        let host = &self.inner.host;
        match host.element_by_id(id) {
            Some(target) => {
                let top = anchor::scroll_offset(
                    host.bounding_rect(&target).top,
                    host.scroll_y(),
                    self.inner.config.header_offset,
                );
                host.smooth_scroll_to(top);
            }
            None => debug!(id, "anchor target not found"),
        }
        true
    }

    fn watch_stat_cards(&self) {
        let selectors = &self.inner.config.selectors;
        let reveal = self.inner.config.stats;
        self.watch_group(
            RevealGroup::StatCards,
            &selectors.stats_container,
            &selectors.stat_card,
            reveal,
            |this, card| {
                let label = this
                    .inner
                    .host
                    .query_in(card, &this.inner.config.selectors.stat_number);
                if let Some(label) = label {
                    this.start_count_up(label);
                }
            },
        );
    }

    fn watch_checklist(&self) {
        let selectors = &self.inner.config.selectors;
        let reveal = self.inner.config.checklist;
        self.watch_group(
            RevealGroup::Checklist,
            &selectors.checklist_section,
            &selectors.checklist_item,
            reveal,
            |_, _| {},
        );
    }

    /// Watch `container_selector` and reveal its `item_selector` children with
    /// a stagger the first time it scrolls into view.
    fn watch_group<F>(
        &self,
        group: RevealGroup,
        container_selector: &str,
        item_selector: &str,
        reveal: RevealConfig,
        on_reveal: F,
    ) where
        F: Fn(&Self, &H::Element) + 'static,
    {
        let host = &self.inner.host;
        let Some(container) = host.query(container_selector) else {
            debug!(%group, "container not found, skipping");
            return;
        };
        let items = host.query_all_in(&container, item_selector);
        if items.is_empty() {
            debug!(%group, "no items, skipping");
            return;
        }

        let trigger = Rc::new(OneShot::new());
        let on_reveal = Rc::new(on_reveal);
        let this = self.clone();
        let fired = Rc::clone(&trigger);

        let watch = host.watch_intersection(
            &container,
            reveal.threshold,
            Box::new(move || {
                if !fired.fire() {
                    return;
                }
                debug!(%group, items = items.len(), "reveal triggered");

                for (index, item) in items.iter().enumerate() {
                    let this_item = this.clone();
                    let item = item.clone();
                    let on_reveal = Rc::clone(&on_reveal);
                    this.inner.scheduler.set_timeout(
                        stagger_delay(index, reveal.stagger_ms),
                        Box::new(move || {
                            this_item.inner.host.set_class(&item, classes::ANIMATE, true);
                            on_reveal(&this_item, &item);
                        }),
                    );
                }
            }),
        );
        trigger.attach(watch);
    }

    fn reveal_promo_card(&self) {
        let Some(card) = self.inner.host.query(&self.inner.config.selectors.promo_card) else {
            debug!(group = %RevealGroup::PromoCard, "element not found, skipping");
            return;
        };

        let this = self.clone();
        self.inner.scheduler.set_timeout(
            self.inner.config.promo_delay_ms,
            Box::new(move || this.inner.host.set_class(&card, classes::ANIMATE, true)),
        );
    }

    fn start_count_up(&self, label: H::Element) {
        let text = self.inner.host.text(&label);
        let Some(target) = CountTarget::parse(&text) else {
            debug!(text = %text.trim(), "stat label is not numeric");
            return;
        };

        let count = CountUp::new(
            target,
            self.inner.scheduler.now(),
            self.inner.config.count_up_duration_ms,
        );
        self.schedule_count_frame(label, count);
    }

    fn schedule_count_frame(&self, label: H::Element, count: CountUp) {
        let this = self.clone();
        let final_text = count.final_text();
        let fallback = label.clone();
        let scheduled = self.inner.scheduler.request_frame(Box::new(move |now: f64| {
            let frame = count.sample(now);
            this.inner.host.set_text(&label, &frame.text);
            if !frame.done {
                this.schedule_count_frame(label, count);
            }
        }));
        if let Err(err) = scheduled {
            // No further frames will come; show the final value
            self.inner.host.set_text(&fallback, &final_text);
            warn!(error = %err, "could not schedule count-up frame");
        }
    }
}
