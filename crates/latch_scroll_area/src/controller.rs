//! ScrollArea controller
//!
//! Custom scrollbars over a natively scrolling viewport. Thumbs follow the
//! viewport on every frame, dragging a thumb scrolls the viewport, and
//! [`ScrollType`] decides when each scrollbar shows.
//!
//! ```text
//! root [data-type]
//! ├── viewport
//! └── scrollbar [data-orientation] [data-state]
//!     └── thumb
//! ```

use std::any::Any;

use latch_core::{Context, Controller, ListenerId};
use latch_dom::{event_types, Axis, BoxMetrics, Document, ElementId, Event, PointerId};
use latch_scheduler::{FrameId, TimerId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::{ScrollAreaConfig, ScrollType};
use crate::error::{ConfigError, ScrollAreaError};
use crate::geometry::ThumbGeometry;
use crate::markup::{attrs, parts};
use crate::scrollbar::{Scrollbar, Visibility};

/// An in-progress thumb drag
#[derive(Debug, Clone, Copy)]
struct ThumbDrag {
    /// Index into `ScrollArea::scrollbars`
    scrollbar: usize,
    thumb: ElementId,
    pointer_id: PointerId,
    /// Pointer coordinate on the scrollbar's axis at pointer-down
    start_pointer: f32,
    /// Thumb offset at pointer-down
    start_offset: f32,
}

/// Custom scrollbar controller bound to one scroll area root
pub struct ScrollArea {
    root: ElementId,
    viewport: ElementId,
    scrollbars: SmallVec<[Scrollbar; 2]>,
    config: ScrollAreaConfig,
    hovered: bool,
    drag: Option<ThumbDrag>,
    /// Pending geometry refresh
    frame: Option<FrameId>,
    hide_timers: FxHashMap<Axis, TimerId>,
    listeners: SmallVec<[ListenerId; 8]>,
}

impl ScrollArea {
    /// Attach to `root` with the default configuration
    pub fn connect(cx: &mut Context<'_>, root: ElementId) -> Result<Self, ScrollAreaError> {
        Self::connect_with(cx, root, ScrollAreaConfig::default())
    }

    /// Attach to `root`. Markup attributes on the root override `config`.
    pub fn connect_with(
        cx: &mut Context<'_>,
        root: ElementId,
        config: ScrollAreaConfig,
    ) -> Result<Self, ScrollAreaError> {
        let doc = cx.document();
        if !doc.contains(root) {
            return Err(ScrollAreaError::UnknownRoot(root));
        }
        let config = config.with_markup(doc, root)?;
        let viewport = doc
            .find_by_attribute(root, attrs::PART, parts::VIEWPORT)
            .ok_or(ScrollAreaError::MissingViewport(root))?;
        let scrollbars = collect_scrollbars(doc, root)?;

        let mut area = Self {
            root,
            viewport,
            scrollbars,
            config,
            hovered: false,
            drag: None,
            frame: None,
            hide_timers: FxHashMap::default(),
            listeners: SmallVec::new(),
        };

        area.force_overflow(cx);
        area.bind(cx);
        for index in 0..area.scrollbars.len() {
            let state = area.baseline(None, area.scrollbars[index].orientation());
            area.write_state(cx, index, state);
        }
        area.frame = Some(cx.request_animation_frame());

        tracing::debug!(
            "scroll area {:?} attached: type={}, {} scrollbars",
            root,
            area.config.scroll_type,
            area.scrollbars.len()
        );
        Ok(area)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn viewport(&self) -> ElementId {
        self.viewport
    }

    pub fn config(&self) -> &ScrollAreaConfig {
        &self.config
    }

    pub fn scroll_type(&self) -> ScrollType {
        self.config.scroll_type
    }

    pub fn scrollbars(&self) -> &[Scrollbar] {
        &self.scrollbars
    }

    /// State of the first scrollbar with the given orientation
    pub fn scrollbar_state(&self, axis: Axis) -> Option<Visibility> {
        self.scrollbars
            .iter()
            .find(|s| s.orientation() == axis)
            .map(|s| s.state())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Handle of the pending geometry refresh, `None` once detached
    pub fn frame_handle(&self) -> Option<FrameId> {
        self.frame
    }

    pub fn hide_timer_count(&self) -> usize {
        self.hide_timers.len()
    }

    pub fn hide_timer(&self, axis: Axis) -> Option<TimerId> {
        self.hide_timers.get(&axis).copied()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Switch the visibility policy. Pending hide timers are cancelled and
    /// every scrollbar is reset to the new policy's baseline.
    pub fn set_scroll_type(&mut self, cx: &mut Context<'_>, scroll_type: ScrollType) {
        if self.config.scroll_type == scroll_type {
            return;
        }
        tracing::debug!(
            "scroll area {:?}: type {} -> {}",
            self.root,
            self.config.scroll_type,
            scroll_type
        );
        self.config.scroll_type = scroll_type;
        self.clear_hide_timers(cx);

        let metrics = cx.document().metrics(self.viewport);
        for index in 0..self.scrollbars.len() {
            let state = self.baseline(metrics.as_ref(), self.scrollbars[index].orientation());
            self.write_state(cx, index, state);
        }
    }

    /// Change the delay used by hide timers scheduled from now on
    pub fn set_hide_delay(&mut self, ms: f64) {
        self.config.hide_delay_ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
    }

    /// Recompute thumb geometry and `auto` visibility from current metrics
    pub fn refresh(&mut self, cx: &mut Context<'_>) {
        let Some(metrics) = cx.document().metrics(self.viewport) else {
            return;
        };

        for index in 0..self.scrollbars.len() {
            let scrollbar = self.scrollbars[index];
            let axis = scrollbar.orientation();

            if let Some(thumb) = scrollbar.thumb() {
                let track = track_length(cx.document(), &scrollbar, &metrics);
                let geometry =
                    ThumbGeometry::compute(&metrics, axis, track, self.config.min_thumb_size);
                let doc = cx.document_mut();
                for (property, value) in geometry.styles(axis) {
                    doc.set_style(thumb, property, &value);
                }
                tracing::trace!(
                    "{} thumb: track={} size={} offset={}",
                    axis,
                    track,
                    geometry.size,
                    geometry.offset
                );
            }

            if self.config.scroll_type == ScrollType::Auto {
                self.write_state(cx, index, Visibility::from_overflow(metrics.overflows(axis)));
            }
        }
    }

    // =========================================================================
    // Attach helpers
    // =========================================================================

    fn force_overflow(&self, cx: &mut Context<'_>) {
        for axis in Axis::ALL {
            if self.scrollbars.iter().any(|s| s.orientation() == axis) {
                let property = match axis {
                    Axis::Vertical => "overflow-y",
                    Axis::Horizontal => "overflow-x",
                };
                cx.document_mut().set_style(self.viewport, property, "scroll");
            }
        }
    }

    fn bind(&mut self, cx: &mut Context<'_>) {
        self.listeners
            .push(cx.add_event_listener(self.root, event_types::POINTER_ENTER));
        self.listeners
            .push(cx.add_event_listener(self.root, event_types::POINTER_LEAVE));
        self.listeners
            .push(cx.add_event_listener(self.viewport, event_types::SCROLL));

        for scrollbar in &self.scrollbars {
            let Some(thumb) = scrollbar.thumb() else {
                continue;
            };
            for event_type in [
                event_types::POINTER_DOWN,
                event_types::POINTER_MOVE,
                event_types::POINTER_UP,
                event_types::POINTER_CANCEL,
            ] {
                self.listeners.push(cx.add_event_listener(thumb, event_type));
            }
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Resting state for the current policy. `auto` needs metrics and falls
    /// back to hidden until the first frame supplies them.
    fn baseline(&self, metrics: Option<&BoxMetrics>, axis: Axis) -> Visibility {
        match self.config.scroll_type {
            ScrollType::Always => Visibility::Visible,
            ScrollType::Hover if self.hovered => Visibility::Visible,
            ScrollType::Hover | ScrollType::Scroll => Visibility::Hidden,
            ScrollType::Auto => metrics
                .map(|m| Visibility::from_overflow(m.overflows(axis)))
                .unwrap_or(Visibility::Hidden),
        }
    }

    fn write_state(&mut self, cx: &mut Context<'_>, index: usize, state: Visibility) {
        let always = self.config.scroll_type == ScrollType::Always;
        let Some(scrollbar) = self.scrollbars.get_mut(index) else {
            return;
        };
        let state = if always { Visibility::Visible } else { state };
        if scrollbar.state != state {
            tracing::debug!(
                "{} scrollbar {:?}: {} -> {}",
                scrollbar.orientation(),
                scrollbar.element(),
                scrollbar.state.as_str(),
                state.as_str()
            );
        }
        scrollbar.state = state;
        cx.document_mut()
            .set_attribute(scrollbar.element(), attrs::STATE, state.as_str());
    }

    fn set_all(&mut self, cx: &mut Context<'_>, state: Visibility) {
        for index in 0..self.scrollbars.len() {
            self.write_state(cx, index, state);
        }
    }

    /// Activity on a scrollbar: cancel its hide timer, show it, and under the
    /// `scroll` policy schedule the next hide.
    fn keep_visible(&mut self, cx: &mut Context<'_>, index: usize) {
        let Some(axis) = self.scrollbars.get(index).map(|s| s.orientation()) else {
            return;
        };
        if let Some(timer) = self.hide_timers.remove(&axis) {
            cx.clear_timeout(timer);
        }

        let state = match self.config.scroll_type {
            ScrollType::Auto => self.baseline(cx.document().metrics(self.viewport).as_ref(), axis),
            ScrollType::Hover => Visibility::from_bool(self.hovered || self.drag.is_some()),
            ScrollType::Always | ScrollType::Scroll => Visibility::Visible,
        };
        for i in 0..self.scrollbars.len() {
            if self.scrollbars[i].orientation() == axis {
                self.write_state(cx, i, state);
            }
        }

        if self.config.scroll_type == ScrollType::Scroll {
            let timer = cx.set_timeout(self.config.hide_delay_ms);
            self.hide_timers.insert(axis, timer);
        }
    }

    fn clear_hide_timers(&mut self, cx: &mut Context<'_>) {
        for (_, timer) in self.hide_timers.drain() {
            cx.clear_timeout(timer);
        }
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    fn on_pointer_enter(&mut self, cx: &mut Context<'_>) {
        self.hovered = true;
        if self.config.scroll_type == ScrollType::Hover {
            self.set_all(cx, Visibility::Visible);
        }
    }

    fn on_pointer_leave(&mut self, cx: &mut Context<'_>) {
        self.hovered = false;
        // While dragging, the hide waits for the drag to end
        if self.config.scroll_type == ScrollType::Hover && self.drag.is_none() {
            self.set_all(cx, Visibility::Hidden);
        }
    }

    fn on_scroll(&mut self, cx: &mut Context<'_>) {
        for index in 0..self.scrollbars.len() {
            self.keep_visible(cx, index);
        }
    }

    fn on_thumb_down(&mut self, cx: &mut Context<'_>, event: &mut Event, thumb: ElementId) {
        if self.drag.is_some() {
            return;
        }
        let Some(index) = self.scrollbars.iter().position(|s| s.thumb() == Some(thumb)) else {
            return;
        };
        let scrollbar = self.scrollbars[index];
        let axis = scrollbar.orientation();
        let (Some(pointer_id), Some(start_pointer)) = (event.pointer_id(), event.coordinate(axis))
        else {
            return;
        };
        let Some(metrics) = cx.document().metrics(self.viewport) else {
            return;
        };

        let track = track_length(cx.document(), &scrollbar, &metrics);
        let geometry = ThumbGeometry::compute(&metrics, axis, track, self.config.min_thumb_size);

        cx.document_mut().set_pointer_capture(thumb, pointer_id);
        self.drag = Some(ThumbDrag {
            scrollbar: index,
            thumb,
            pointer_id,
            start_pointer,
            start_offset: geometry.offset,
        });
        event.stop_propagation();

        tracing::debug!(
            "{} thumb drag start: pointer {} at {}",
            axis,
            pointer_id,
            start_pointer
        );
        self.keep_visible(cx, index);
    }

    fn on_thumb_move(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let Some(drag) = self.drag else {
            return;
        };
        if event.pointer_id() != Some(drag.pointer_id) {
            return;
        }
        let Some(scrollbar) = self.scrollbars.get(drag.scrollbar).copied() else {
            return;
        };
        let axis = scrollbar.orientation();
        let Some(pointer) = event.coordinate(axis) else {
            return;
        };
        let Some(metrics) = cx.document().metrics(self.viewport) else {
            return;
        };
        event.stop_propagation();

        let track = track_length(cx.document(), &scrollbar, &metrics);
        let geometry = ThumbGeometry::compute(&metrics, axis, track, self.config.min_thumb_size);
        let offset = drag.start_offset + (pointer - drag.start_pointer);
        if let Some(position) =
            geometry.scroll_position_for(offset, track, metrics.scroll_range(axis))
        {
            cx.document_mut()
                .set_scroll_position(self.viewport, axis, position);
        }

        self.keep_visible(cx, drag.scrollbar);
    }

    fn on_thumb_release(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let Some(drag) = self.drag else {
            return;
        };
        if event.pointer_id() != Some(drag.pointer_id) {
            return;
        }
        event.stop_propagation();
        self.end_drag(cx);

        self.keep_visible(cx, drag.scrollbar);
        if self.config.scroll_type == ScrollType::Hover && !self.hovered {
            self.set_all(cx, Visibility::Hidden);
        }
    }

    fn end_drag(&mut self, cx: &mut Context<'_>) {
        if let Some(drag) = self.drag.take() {
            cx.document_mut()
                .release_pointer_capture(drag.thumb, drag.pointer_id);
            tracing::debug!("thumb drag end: pointer {}", drag.pointer_id);
        }
    }
}

impl Controller for ScrollArea {
    fn name(&self) -> &'static str {
        "scroll-area"
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event, current_target: ElementId) {
        match event.event_type {
            event_types::POINTER_ENTER if current_target == self.root => self.on_pointer_enter(cx),
            event_types::POINTER_LEAVE if current_target == self.root => self.on_pointer_leave(cx),
            event_types::SCROLL if current_target == self.viewport => self.on_scroll(cx),
            event_types::POINTER_DOWN => self.on_thumb_down(cx, event, current_target),
            event_types::POINTER_MOVE => self.on_thumb_move(cx, event),
            event_types::POINTER_UP | event_types::POINTER_CANCEL => {
                self.on_thumb_release(cx, event)
            }
            _ => {}
        }
    }

    fn on_animation_frame(&mut self, cx: &mut Context<'_>, id: FrameId, _timestamp: f64) {
        if self.frame != Some(id) {
            return;
        }
        self.frame = None;
        self.refresh(cx);
        self.frame = Some(cx.request_animation_frame());
    }

    fn on_timeout(&mut self, cx: &mut Context<'_>, id: TimerId) {
        let Some(axis) = self
            .hide_timers
            .iter()
            .find(|(_, timer)| **timer == id)
            .map(|(axis, _)| *axis)
        else {
            return;
        };
        self.hide_timers.remove(&axis);

        let dragging = self
            .drag
            .and_then(|d| self.scrollbars.get(d.scrollbar))
            .is_some_and(|s| s.orientation() == axis);
        if dragging {
            let timer = cx.set_timeout(self.config.hide_delay_ms);
            self.hide_timers.insert(axis, timer);
            return;
        }

        if self.config.scroll_type == ScrollType::Scroll {
            for index in 0..self.scrollbars.len() {
                if self.scrollbars[index].orientation() == axis {
                    self.write_state(cx, index, Visibility::Hidden);
                }
            }
        }
    }

    fn disconnect(&mut self, cx: &mut Context<'_>) {
        if let Some(frame) = self.frame.take() {
            cx.cancel_animation_frame(frame);
        }
        self.clear_hide_timers(cx);
        self.end_drag(cx);
        for listener in self.listeners.drain(..) {
            cx.remove_event_listener(listener);
        }
        tracing::debug!("scroll area {:?} detached", self.root);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn collect_scrollbars(
    doc: &Document,
    root: ElementId,
) -> Result<SmallVec<[Scrollbar; 2]>, ConfigError> {
    let mut scrollbars = SmallVec::new();
    for element in doc.find_all_by_attribute(root, attrs::PART, parts::SCROLLBAR) {
        let orientation = match doc.attribute(element, attrs::ORIENTATION) {
            Some(value) => value.parse::<Axis>()?,
            None => Axis::Vertical,
        };
        let thumb = doc.find_by_attribute(element, attrs::PART, parts::THUMB);
        if thumb.is_none() {
            tracing::warn!("{} scrollbar {:?} has no thumb", orientation, element);
        }
        scrollbars.push(Scrollbar::new(element, thumb, orientation));
    }
    Ok(scrollbars)
}

/// The scrollbar's client length on its axis, or the viewport's when the
/// scrollbar has no laid-out size
fn track_length(doc: &Document, scrollbar: &Scrollbar, viewport: &BoxMetrics) -> f32 {
    let axis = scrollbar.orientation();
    let track = doc
        .metrics(scrollbar.element())
        .map(|m| m.client_size(axis))
        .unwrap_or(0.0);
    if track > 0.0 {
        track
    } else {
        viewport.client_size(axis)
    }
}
