//! Scenario files (`*.toml`): markup plus a scripted list of interactions

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use latch_core::RuntimeConfig;
use latch_dom::{Axis, ElementSpec, PointerId};
use latch_scroll_area::{ScrollAreaConfig, ScrollType};
use serde::{Deserialize, Serialize};

/// Top-level scenario
#[derive(Debug, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// Defaults for the scroll area; markup attributes still win
    #[serde(default)]
    pub scroll_area: ScrollAreaConfig,
    pub markup: ElementSpec,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Pointer enters the scroll area root
    Enter,
    /// Pointer leaves the scroll area root
    Leave,
    /// Scroll the viewport to an absolute position
    Scroll {
        #[serde(default)]
        left: f32,
        #[serde(default)]
        top: f32,
    },
    /// Advance the clock
    Wait { ms: f64 },
    /// Pointer down on the thumb of the scrollbar with this orientation
    Down {
        #[serde(default)]
        axis: Axis,
        #[serde(default = "default_pointer")]
        pointer: PointerId,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Move {
        #[serde(default = "default_pointer")]
        pointer: PointerId,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Up {
        #[serde(default = "default_pointer")]
        pointer: PointerId,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Cancel {
        #[serde(default = "default_pointer")]
        pointer: PointerId,
    },
    /// Change the viewport's content size and optionally its visible size
    Resize {
        content: [f32; 2],
        #[serde(default)]
        client: Option<[f32; 2]>,
    },
    SetType {
        #[serde(rename = "type")]
        scroll_type: ScrollType,
    },
    SetHideDelay { ms: f64 },
}

/// Longest single `wait`, in milliseconds of scheduler time
pub const MAX_WAIT_MS: f64 = 3_600_000.0;

fn default_pointer() -> PointerId {
    1
}

impl Step {
    /// Action name as written in scenario files
    pub fn action(&self) -> &'static str {
        match self {
            Step::Enter => "enter",
            Step::Leave => "leave",
            Step::Scroll { .. } => "scroll",
            Step::Wait { .. } => "wait",
            Step::Down { .. } => "down",
            Step::Move { .. } => "move",
            Step::Up { .. } => "up",
            Step::Cancel { .. } => "cancel",
            Step::Resize { .. } => "resize",
            Step::SetType { .. } => "set-type",
            Step::SetHideDelay { .. } => "set-hide-delay",
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            if let Step::Wait { ms } = *step {
                if !ms.is_finite() || !(0.0..=MAX_WAIT_MS).contains(&ms) {
                    return Err(anyhow!(
                        "wait of {ms}ms is not between 0 and {MAX_WAIT_MS}ms"
                    ))
                    .with_context(|| format!("step {} ({})", index + 1, step.action()));
                }
            }
        }
        Ok(())
    }
}
