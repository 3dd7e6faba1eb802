//! Box metrics for scrollable elements

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomError;

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Top to bottom (scrollTop / scrollHeight / clientHeight)
    #[default]
    Vertical,
    /// Left to right (scrollLeft / scrollWidth / clientWidth)
    Horizontal,
}

impl Axis {
    /// Both axes, vertical first
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// Marker value used in markup
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        }
    }

    /// Pick the component of an `(x, y)` pair along this axis
    pub fn pick(&self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Vertical => y,
            Axis::Horizontal => x,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "vertical" => Ok(Axis::Vertical),
            "horizontal" => Ok(Axis::Horizontal),
            other => Err(DomError::InvalidAxis(other.to_string())),
        }
    }
}

/// Client size, scroll size and scroll position of an element.
///
/// Field names follow the platform properties they mirror
/// (`clientHeight`, `scrollHeight`, `scrollTop`, ...). The scroll position
/// is kept inside `[0, scroll_size - client_size]` on every mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxMetrics {
    pub client_width: f32,
    pub client_height: f32,
    pub scroll_width: f32,
    pub scroll_height: f32,
    pub scroll_left: f32,
    pub scroll_top: f32,
}

impl BoxMetrics {
    /// Visible length along an axis
    pub fn client_size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.client_height,
            Axis::Horizontal => self.client_width,
        }
    }

    /// Content length along an axis (never smaller than the client length)
    pub fn scroll_size(&self, axis: Axis) -> f32 {
        let raw = match axis {
            Axis::Vertical => self.scroll_height,
            Axis::Horizontal => self.scroll_width,
        };
        raw.max(self.client_size(axis))
    }

    /// Current scroll position along an axis
    pub fn scroll_position(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.scroll_top,
            Axis::Horizontal => self.scroll_left,
        }
    }

    /// Largest valid scroll position along an axis
    pub fn scroll_range(&self, axis: Axis) -> f32 {
        (self.scroll_size(axis) - self.client_size(axis)).max(0.0)
    }

    /// Whether content is longer than the visible region
    pub fn overflows(&self, axis: Axis) -> bool {
        self.scroll_size(axis) > self.client_size(axis)
    }

    /// Set the scroll position, clamped. Returns true if the position changed.
    pub(crate) fn set_scroll_position(&mut self, axis: Axis, value: f32) -> bool {
        let value = if value.is_finite() {
            value.clamp(0.0, self.scroll_range(axis))
        } else {
            0.0
        };
        let slot = match axis {
            Axis::Vertical => &mut self.scroll_top,
            Axis::Horizontal => &mut self.scroll_left,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Re-clamp both scroll positions after a size change
    pub(crate) fn clamp_scroll(&mut self) {
        for axis in Axis::ALL {
            let current = self.scroll_position(axis);
            self.set_scroll_position(axis, current);
        }
    }
}
