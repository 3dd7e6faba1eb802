//! Thumb geometry
//!
//! The thumb is a proxy for the viewport: its length is the visible fraction
//! of the content and its offset is the scroll position scaled to the track.

use latch_dom::{Axis, BoxMetrics};

/// Length and offset of a thumb along its track
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbGeometry {
    pub size: f32,
    pub offset: f32,
}

impl ThumbGeometry {
    /// Compute geometry from the viewport's current metrics.
    ///
    /// Without overflow the thumb fills the track. Otherwise its size is the
    /// visible fraction of the track, never below `min_size` and never beyond
    /// the track.
    pub fn compute(metrics: &BoxMetrics, axis: Axis, track: f32, min_size: f32) -> Self {
        let track = if track.is_finite() { track.max(0.0) } else { 0.0 };
        let client = metrics.client_size(axis);
        let content = metrics.scroll_size(axis);

        let size = if metrics.overflows(axis) && content > 0.0 {
            (track * client / content).max(min_size).min(track)
        } else {
            track
        };

        let range = metrics.scroll_range(axis);
        let offset = if range > 0.0 {
            (metrics.scroll_position(axis) / range).clamp(0.0, 1.0) * (track - size)
        } else {
            0.0
        };

        Self { size, offset }
    }

    /// Distance the thumb can travel along `track`
    pub fn travel(&self, track: f32) -> f32 {
        (track - self.size).max(0.0)
    }

    /// Scroll position for a thumb placed at `offset`, clamped to
    /// `[0, scroll_range]`. `None` when the thumb cannot move.
    pub fn scroll_position_for(&self, offset: f32, track: f32, scroll_range: f32) -> Option<f32> {
        let travel = self.travel(track);
        if travel <= 0.0 || scroll_range <= 0.0 {
            return None;
        }
        Some((offset * scroll_range / travel).clamp(0.0, scroll_range))
    }

    /// Inline style properties for a thumb on `axis`
    pub fn styles(&self, axis: Axis) -> [(&'static str, String); 2] {
        let offset = px(self.offset);
        match axis {
            Axis::Vertical => [
                ("height", format!("{}px", px(self.size))),
                ("transform", format!("translate3d(0px, {offset}px, 0px)")),
            ],
            Axis::Horizontal => [
                ("width", format!("{}px", px(self.size))),
                ("transform", format!("translate3d({offset}px, 0px, 0px)")),
            ],
        }
    }
}

/// Round to two decimals for inline styles
fn px(value: f32) -> f32 {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0px"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
