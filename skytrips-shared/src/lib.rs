pub mod geometry;
pub mod throttle;

pub use geometry::{
    anchored_width, compute_overlay_placement, OverlayPlacement, PlacementConfig, Rect, Viewport,
};
pub use throttle::FrameThrottle;
