//! Scroll area configuration
//!
//! Defaults come from [`ScrollAreaConfig::default`] (or a config file through
//! serde); `data-*` attributes on the root element override them at attach.

use std::fmt;
use std::str::FromStr;

use latch_dom::{Document, ElementId};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::markup::attrs;

/// Scrollbar visibility policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollType {
    /// Visible only while content overflows on the scrollbar's axis
    Auto,
    /// Always visible
    Always,
    /// Visible while the pointer is over the scroll area
    #[default]
    Hover,
    /// Visible on scroll activity, hidden after a delay
    Scroll,
}

impl ScrollType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollType::Auto => "auto",
            ScrollType::Always => "always",
            ScrollType::Hover => "hover",
            ScrollType::Scroll => "scroll",
        }
    }
}

impl fmt::Display for ScrollType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrollType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(ScrollType::Auto),
            "always" => Ok(ScrollType::Always),
            "hover" => Ok(ScrollType::Hover),
            "scroll" => Ok(ScrollType::Scroll),
            other => Err(ConfigError::InvalidType(other.to_string())),
        }
    }
}

/// Scroll area configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollAreaConfig {
    /// Visibility policy
    #[serde(rename = "type")]
    pub scroll_type: ScrollType,
    /// Delay before a scrollbar hides after scroll activity (`scroll` policy)
    pub hide_delay_ms: f64,
    /// Lower bound for the thumb length
    pub min_thumb_size: f32,
}

impl Default for ScrollAreaConfig {
    fn default() -> Self {
        Self {
            scroll_type: ScrollType::default(),
            hide_delay_ms: 600.0,
            min_thumb_size: 18.0,
        }
    }
}

impl ScrollAreaConfig {
    pub fn new(scroll_type: ScrollType) -> Self {
        Self {
            scroll_type,
            ..Default::default()
        }
    }

    /// Set the visibility policy
    pub fn scroll_type(mut self, scroll_type: ScrollType) -> Self {
        self.scroll_type = scroll_type;
        self
    }

    /// Set the auto-hide delay
    pub fn hide_delay(mut self, ms: f64) -> Self {
        self.hide_delay_ms = ms;
        self
    }

    /// Set the minimum thumb length
    pub fn min_thumb_size(mut self, size: f32) -> Self {
        self.min_thumb_size = size;
        self
    }

    /// Apply `data-type` and `data-scroll-hide-delay` from the root element
    pub fn with_markup(mut self, doc: &Document, root: ElementId) -> Result<Self, ConfigError> {
        if let Some(value) = doc.attribute(root, attrs::TYPE) {
            self.scroll_type = value.parse()?;
        }
        if let Some(value) = doc.attribute(root, attrs::HIDE_DELAY) {
            self.hide_delay_ms = parse_delay(value)?;
        }
        Ok(self)
    }
}

fn parse_delay(value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(ms) if ms.is_finite() && ms >= 0.0 => Ok(ms),
        _ => Err(ConfigError::InvalidHideDelay(value.to_string())),
    }
}
