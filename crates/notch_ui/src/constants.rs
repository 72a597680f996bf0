//! Centralized constants for notch_ui
//!
//! Class names and attribute names shared between rendering and the
//! platform backends are defined here.

// =============================================================================
// Class names
// =============================================================================

/// CSS namespace used when the owner does not supply one
pub const DEFAULT_PREFIX_CLS: &str = "rc-slider";

/// Appended to the prefix for the click-focused modifier class
pub const CLICK_FOCUSED_SUFFIX: &str = "-handle-click-focused";

/// Modifier class marking a handle focused by a mouse interaction.
pub fn click_focused_class(prefix_cls: &str) -> String {
    format!("{prefix_cls}{CLICK_FOCUSED_SUFFIX}")
}

// =============================================================================
// Accessibility
// =============================================================================

/// Role every handle is rendered with
pub const ROLE_SLIDER: &str = "slider";

pub const ARIA_VALUEMIN: &str = "aria-valuemin";
pub const ARIA_VALUEMAX: &str = "aria-valuemax";
pub const ARIA_VALUENOW: &str = "aria-valuenow";
pub const ARIA_DISABLED: &str = "aria-disabled";
