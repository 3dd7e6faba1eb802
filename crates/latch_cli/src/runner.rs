//! Runs a scenario through the runtime and snapshots observable state

use std::fmt;

use anyhow::{anyhow, Context as _, Result};
use latch_core::{ControllerId, Runtime};
use latch_dom::{Axis, Document, ElementId};
use latch_scroll_area::markup::{attrs, parts};
use latch_scroll_area::ScrollArea;
use serde::Serialize;

use crate::scenario::{Scenario, Step};

/// Observable state after one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub action: String,
    pub time_ms: f64,
    /// Animation frames run so far
    pub frames: u64,
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub overflow_x: Option<String>,
    pub overflow_y: Option<String>,
    pub dragging: bool,
    pub hide_timers: usize,
    pub scrollbars: Vec<ScrollbarSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollbarSnapshot {
    pub orientation: Axis,
    pub state: Option<String>,
    pub thumb_size: Option<String>,
    pub thumb_transform: Option<String>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>3}] {:<14} t={:<6} scroll=({}, {})",
            self.step, self.action, self.time_ms, self.scroll_left, self.scroll_top
        )?;
        if self.dragging {
            f.write_str(" dragging")?;
        }
        for bar in &self.scrollbars {
            write!(
                f,
                " | {}: {}",
                bar.orientation,
                bar.state.as_deref().unwrap_or("-")
            )?;
            if let Some(size) = &bar.thumb_size {
                write!(f, " {size}")?;
            }
            if let Some(transform) = &bar.thumb_transform {
                write!(f, " {transform}")?;
            }
        }
        Ok(())
    }
}

/// A connected scenario, ready to step
pub struct Session {
    runtime: Runtime,
    area: ControllerId,
    viewport: ElementId,
}

impl Session {
    /// Build the markup and attach a scroll area to its root
    pub fn start(scenario: &Scenario) -> Result<Self> {
        let mut doc = Document::new();
        let top = doc.build(&scenario.markup);
        let root = if doc.attribute(top, attrs::PART) == Some(parts::ROOT) {
            top
        } else {
            doc.find_by_attribute(top, attrs::PART, parts::ROOT)
                .unwrap_or(top)
        };

        let mut runtime = Runtime::with_config(doc, scenario.runtime);
        let config = scenario.scroll_area;
        let area = runtime
            .connect(|cx| ScrollArea::connect_with(cx, root, config))
            .context("Failed to attach scroll area")?;
        let viewport = runtime
            .controller::<ScrollArea>(area)
            .map(|a| a.viewport())
            .ok_or_else(|| anyhow!("scroll area vanished after attach"))?;

        tracing::info!("scenario attached to {:?}", root);
        Ok(Self {
            runtime,
            area,
            viewport,
        })
    }

    fn area(&self) -> Result<&ScrollArea> {
        self.runtime
            .controller::<ScrollArea>(self.area)
            .ok_or_else(|| anyhow!("scroll area is not connected"))
    }

    fn thumb(&self, axis: Axis) -> Result<ElementId> {
        self.area()?
            .scrollbars()
            .iter()
            .filter(|s| s.orientation() == axis)
            .find_map(|s| s.thumb())
            .ok_or_else(|| anyhow!("no {axis} scrollbar thumb in markup"))
    }

    pub fn apply(&mut self, step: &Step) -> Result<()> {
        let root = self.area()?.root();
        let viewport = self.viewport;
        match *step {
            Step::Enter => {
                self.runtime.pointer_enter(root);
            }
            Step::Leave => {
                self.runtime.pointer_leave(root);
            }
            Step::Scroll { left, top } => {
                self.runtime.scroll_to(viewport, left, top);
            }
            Step::Wait { ms } => self.runtime.advance(ms),
            Step::Down { axis, pointer, x, y } => {
                let thumb = self.thumb(axis)?;
                self.runtime.pointer_down(thumb, pointer, x, y);
            }
            Step::Move { pointer, x, y } => {
                self.runtime.pointer_move(viewport, pointer, x, y);
            }
            Step::Up { pointer, x, y } => {
                self.runtime.pointer_up(viewport, pointer, x, y);
            }
            Step::Cancel { pointer } => {
                self.runtime.pointer_cancel(viewport, pointer);
            }
            Step::Resize { content, client } => {
                let doc = self.runtime.document_mut();
                if let Some([width, height]) = client {
                    doc.set_client_size(viewport, width, height);
                }
                doc.set_scroll_size(viewport, content[0], content[1]);
            }
            Step::SetType { scroll_type } => {
                self.runtime
                    .with_controller::<ScrollArea, _, _>(self.area, |area, cx| {
                        area.set_scroll_type(cx, scroll_type)
                    })
                    .ok_or_else(|| anyhow!("scroll area is not connected"))?;
            }
            Step::SetHideDelay { ms } => {
                self.runtime
                    .with_controller::<ScrollArea, _, _>(self.area, |area, _| {
                        area.set_hide_delay(ms)
                    })
                    .ok_or_else(|| anyhow!("scroll area is not connected"))?;
            }
        }
        Ok(())
    }

    pub fn snapshot(&self, step: usize, action: &str) -> Result<Snapshot> {
        let area = self.area()?;
        let doc = self.runtime.document();
        let metrics = doc.metrics(self.viewport).unwrap_or_default();
        let owned = |value: Option<&str>| value.map(str::to_string);

        let scrollbars = area
            .scrollbars()
            .iter()
            .map(|bar| {
                let size_property = match bar.orientation() {
                    Axis::Vertical => "height",
                    Axis::Horizontal => "width",
                };
                ScrollbarSnapshot {
                    orientation: bar.orientation(),
                    state: owned(doc.attribute(bar.element(), attrs::STATE)),
                    thumb_size: bar.thumb().and_then(|t| owned(doc.style(t, size_property))),
                    thumb_transform: bar.thumb().and_then(|t| owned(doc.style(t, "transform"))),
                }
            })
            .collect();

        Ok(Snapshot {
            step,
            action: action.to_string(),
            time_ms: self.runtime.now(),
            frames: self.runtime.scheduler().frame_count(),
            scroll_left: metrics.scroll_left,
            scroll_top: metrics.scroll_top,
            overflow_x: owned(doc.style(self.viewport, "overflow-x")),
            overflow_y: owned(doc.style(self.viewport, "overflow-y")),
            dragging: area.is_dragging(),
            hide_timers: area.hide_timer_count(),
            scrollbars,
        })
    }

    /// Detach the scroll area
    pub fn finish(mut self) -> bool {
        self.runtime.disconnect(self.area)
    }
}

/// Run every step, snapshotting after attach and after each step
pub fn run(scenario: &Scenario) -> Result<Vec<Snapshot>> {
    let mut session = Session::start(scenario)?;
    let mut snapshots = Vec::with_capacity(scenario.steps.len() + 1);
    snapshots.push(session.snapshot(0, "attach")?);

    for (index, step) in scenario.steps.iter().enumerate() {
        session
            .apply(step)
            .with_context(|| format!("step {} ({})", index + 1, step.action()))?;
        snapshots.push(session.snapshot(index + 1, step.action())?);
    }

    session.finish();
    Ok(snapshots)
}
