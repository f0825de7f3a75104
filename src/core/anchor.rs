//! In-page anchor link targets.

/// Fragment id an in-page link points at, or `None` when the link should keep
/// its default behavior (`#`, empty, or not a fragment).
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Absolute scroll offset that puts a target `header_offset` pixels below the
/// viewport top.
pub fn scroll_offset(target_top: f64, current_scroll: f64, header_offset: f64) -> f64 {
    target_top + current_scroll - header_offset
}
