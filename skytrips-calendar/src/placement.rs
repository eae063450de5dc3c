use serde::{Deserialize, Serialize};
use skytrips_core::TripType;
use skytrips_shared::{compute_overlay_placement, OverlayPlacement, PlacementConfig, Rect, Viewport};

/// The calendar's intrinsic size is mode-dependent, not trigger-dependent:
/// one month for one-way, two side-by-side for round trips.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarWidths {
    pub one_way: f64,
    pub round_trip: f64,
}

impl Default for CalendarWidths {
    fn default() -> Self {
        Self {
            one_way: 340.0,
            round_trip: 660.0,
        }
    }
}

/// Candidate width for the calendar overlay, halved on narrow viewports.
pub fn calendar_width(
    trip_type: TripType,
    viewport: &Viewport,
    widths: &CalendarWidths,
    config: &PlacementConfig,
) -> f64 {
    let base = match trip_type {
        TripType::RoundTrip => widths.round_trip,
        TripType::OneWay | TripType::MultiCity => widths.one_way,
    };
    if viewport.width < config.narrow_breakpoint {
        base / 2.0
    } else {
        base
    }
}

/// Position the calendar overlay with the same viewport-aware algorithm as
/// the autocomplete fields, fed a fixed mode-dependent width.
pub fn calendar_placement(
    trigger: &Rect,
    viewport: &Viewport,
    trip_type: TripType,
    widths: &CalendarWidths,
    config: &PlacementConfig,
) -> OverlayPlacement {
    let width = calendar_width(trip_type, viewport, widths, config);
    compute_overlay_placement(trigger, viewport, width, config)
}
