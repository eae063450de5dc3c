use serde::{Deserialize, Serialize};

/// Bounding box of the element an overlay anchors to, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Visible viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Tuning knobs for overlay placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Viewports narrower than this get the mobile treatment (fixed width, centered).
    pub narrow_breakpoint: f64,

    /// Overlay width used on narrow viewports.
    pub narrow_width: f64,

    /// Minimum overlay width on wide viewports.
    pub min_width: f64,

    /// Hard cap on overlay height.
    pub max_height: f64,

    /// Below this much space under the trigger, the overlay flips above it.
    pub flip_threshold: f64,

    /// Vertical gap between the trigger and the overlay.
    pub gap: f64,

    /// Minimum distance kept from the viewport edges when re-aligning.
    pub viewport_margin: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint: 768.0,
            narrow_width: 340.0,
            min_width: 380.0,
            max_height: 350.0,
            flip_threshold: 150.0,
            gap: 4.0,
            viewport_margin: 16.0,
        }
    }
}

/// Computed overlay coordinates, ready to hand to whatever renders it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlacement {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub max_height: f64,
    pub flipped: bool,
}

/// Width for an overlay that tracks its trigger: the trigger's own width on
/// wide viewports (but never below the configured minimum), a fixed width on
/// narrow ones.
pub fn anchored_width(trigger: &Rect, viewport: &Viewport, config: &PlacementConfig) -> f64 {
    if viewport.width < config.narrow_breakpoint {
        config.narrow_width
    } else {
        trigger.width.max(config.min_width)
    }
}

/// Position an overlay of the given width relative to its trigger.
///
/// Flips above the trigger when the space below drops under the threshold and
/// there is more room above; height is clamped to whichever side the overlay
/// lands on. Horizontally the overlay hugs the trigger's left edge, falling
/// back to right-alignment against the viewport when it would overflow, and is
/// centered outright on narrow viewports.
pub fn compute_overlay_placement(
    trigger: &Rect,
    viewport: &Viewport,
    width: f64,
    config: &PlacementConfig,
) -> OverlayPlacement {
    let narrow = viewport.width < config.narrow_breakpoint;

    let space_below = viewport.height - trigger.bottom() - config.gap;
    let space_above = trigger.y - config.gap;

    let (top, max_height, flipped) =
        if space_below < config.flip_threshold && space_above > space_below {
            let max_height = space_above.min(config.max_height).max(0.0);
            (trigger.y - config.gap - max_height, max_height, true)
        } else {
            let max_height = space_below.min(config.max_height).max(0.0);
            (trigger.bottom() + config.gap, max_height, false)
        };

    let left = if narrow {
        (viewport.width - width) / 2.0
    } else if trigger.x + width > viewport.width - config.viewport_margin {
        (viewport.width - width - config.viewport_margin).max(config.viewport_margin)
    } else {
        trigger.x
    };

    OverlayPlacement {
        top,
        left,
        width,
        max_height,
        flipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlacementConfig {
        PlacementConfig::default()
    }

    #[test]
    fn test_opens_below_when_room() {
        let trigger = Rect::new(100.0, 80.0, 420.0, 48.0);
        let viewport = Viewport::new(1280.0, 800.0);
        let width = anchored_width(&trigger, &viewport, &config());

        let placement = compute_overlay_placement(&trigger, &viewport, width, &config());

        assert!(!placement.flipped);
        assert_eq!(placement.top, trigger.bottom() + 4.0);
        assert_eq!(placement.left, 100.0);
        assert_eq!(placement.width, 420.0);
        assert_eq!(placement.max_height, 350.0);
    }

    #[test]
    fn test_flips_up_when_cramped_below() {
        // space below = 800 - (660 + 48) - 4 = 88 (< 150); space above = 656
        let trigger = Rect::new(100.0, 660.0, 420.0, 48.0);
        let viewport = Viewport::new(1280.0, 800.0);

        let placement = compute_overlay_placement(&trigger, &viewport, 420.0, &config());

        assert!(placement.flipped);
        assert!(placement.top + placement.max_height <= trigger.y);
        assert!(placement.max_height <= trigger.y - 4.0);
    }

    #[test]
    fn test_no_flip_when_above_is_tighter() {
        // space below 88, but space above is only 26 - keep it below
        let trigger = Rect::new(100.0, 30.0, 420.0, 48.0);
        let viewport = Viewport::new(1280.0, 170.0);

        let placement = compute_overlay_placement(&trigger, &viewport, 420.0, &config());

        assert!(!placement.flipped);
        assert_eq!(placement.top, trigger.bottom() + 4.0);
    }

    #[test]
    fn test_clamped_height_when_flipped() {
        let trigger = Rect::new(100.0, 220.0, 420.0, 48.0);
        let viewport = Viewport::new(1280.0, 360.0);

        let placement = compute_overlay_placement(&trigger, &viewport, 420.0, &config());

        assert!(placement.flipped);
        // only 216px above the trigger, minus the gap
        assert_eq!(placement.max_height, 216.0);
    }

    #[test]
    fn test_min_width_applies_to_small_triggers() {
        let trigger = Rect::new(100.0, 80.0, 220.0, 48.0);
        let viewport = Viewport::new(1280.0, 800.0);

        let width = anchored_width(&trigger, &viewport, &config());

        assert_eq!(width, 380.0);
    }

    #[test]
    fn test_right_aligns_on_horizontal_overflow() {
        let trigger = Rect::new(1000.0, 80.0, 420.0, 48.0);
        let viewport = Viewport::new(1280.0, 800.0);

        let placement = compute_overlay_placement(&trigger, &viewport, 420.0, &config());

        assert_eq!(placement.left, 1280.0 - 420.0 - 16.0);
    }

    #[test]
    fn test_narrow_viewport_centers_fixed_width() {
        let trigger = Rect::new(10.0, 80.0, 355.0, 48.0);
        let viewport = Viewport::new(375.0, 700.0);
        let width = anchored_width(&trigger, &viewport, &config());

        let placement = compute_overlay_placement(&trigger, &viewport, width, &config());

        assert_eq!(width, 340.0);
        assert_eq!(placement.left, (375.0 - 340.0) / 2.0);
    }
}
