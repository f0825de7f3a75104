//! Page behavior configuration.
//!
//! Every field has a default matching the stock landing page markup. Pages that
//! deviate ship a JSON object with only the fields they override and load it
//! with `PageConfig::from_json()`.

use serde::Deserialize;

use super::PageError;

/// Timing and visibility settings for one staggered reveal group
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the container that must be visible before the group fires
    pub threshold: f64,
    /// Delay added per item, in milliseconds
    pub stagger_ms: u32,
}

impl RevealConfig {
    pub const fn new(threshold: f64, stagger_ms: u32) -> Self {
        Self {
            threshold,
            stagger_ms,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::new(0.2, 200)
    }
}

/// CSS selectors for every DOM hook the controller touches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub header: String,
    pub hero: String,
    pub nav_panel: String,
    pub nav_toggle: String,
    /// Resolved inside the navigation panel
    pub nav_link: String,
    pub cta_box: String,
    /// Resolved inside the CTA box
    pub cta_button: String,
    pub stats_container: String,
    /// Resolved inside the stats container
    pub stat_card: String,
    /// Resolved inside each stat card
    pub stat_number: String,
    pub checklist_section: String,
    /// Resolved inside the checklist section
    pub checklist_item: String,
    pub promo_card: String,
    pub anchor_links: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: "#header".into(),
            hero: ".hero".into(),
            nav_panel: ".nav-menu".into(),
            nav_toggle: ".mobile-menu-toggle".into(),
            nav_link: "a".into(),
            cta_box: "#courseInfoCta".into(),
            cta_button: ".btn-outline".into(),
            stats_container: ".journey-stats-container".into(),
            stat_card: ".stat-card".into(),
            stat_number: ".stat-number".into(),
            checklist_section: ".requirements".into(),
            checklist_item: ".checklist-item".into(),
            promo_card: ".hero-promo-card".into(),
            anchor_links: "a[href^=\"#\"]".into(),
        }
    }
}

/// Page behavior configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Scroll offset above which the header switches to its scrolled style
    pub scroll_threshold: f64,
    /// Clearance kept above anchor targets for the fixed header
    pub header_offset: f64,
    /// Distance from the document end at which the CTA box hides again
    pub bottom_slack: f64,
    /// Viewport widths at or below this use the mobile CTA layout
    pub mobile_breakpoint: f64,
    pub count_up_duration_ms: f64,
    /// Delay before the hero promo card is revealed
    pub promo_delay_ms: u32,
    pub stats: RevealConfig,
    pub checklist: RevealConfig,
    pub selectors: Selectors,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            header_offset: 100.0,
            bottom_slack: 100.0,
            mobile_breakpoint: 960.0,
            count_up_duration_ms: 1500.0,
            promo_delay_ms: 300,
            stats: RevealConfig::new(0.2, 200),
            checklist: RevealConfig::new(0.3, 250),
            selectors: Selectors::default(),
        }
    }
}

impl PageConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }
}
