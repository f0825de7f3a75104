//! Floating call-to-action box visibility.

use super::host::{Display, Viewport};

/// Geometry sampled on one scroll tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtaInputs {
    /// Bottom edge of the hero region relative to the viewport top
    pub hero_bottom: f64,
    pub scroll_y: f64,
    pub viewport: Viewport,
    pub document_height: f64,
}

/// What to apply to the CTA box and its action button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtaDecision {
    pub box_visible: bool,
    /// `None` leaves the button's inline display untouched
    pub button: Option<Display>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtaPolicy {
    pub mobile_breakpoint: f64,
    pub bottom_slack: f64,
}

impl CtaPolicy {
    pub fn new(mobile_breakpoint: f64, bottom_slack: f64) -> Self {
        Self {
            mobile_breakpoint,
            bottom_slack,
        }
    }

    pub fn decide(&self, inputs: &CtaInputs) -> CtaDecision {
        let is_past_hero = inputs.hero_bottom <= 0.0;
        let is_not_at_bottom = inputs.scroll_y + inputs.viewport.height
            < inputs.document_height - self.bottom_slack;
        let in_between = is_past_hero && is_not_at_bottom;

        if inputs.viewport.width <= self.mobile_breakpoint {
            // The box stays docked on mobile; only its secondary button follows the hero
            CtaDecision {
                box_visible: true,
                button: Some(if in_between {
                    Display::Unset
                } else {
                    Display::None
                }),
            }
        } else if in_between {
            CtaDecision {
                box_visible: true,
                button: Some(Display::Unset),
            }
        } else {
            CtaDecision {
                box_visible: false,
                button: None,
            }
        }
    }
}
