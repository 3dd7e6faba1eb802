//! Runtime: owns the document and scheduler, routes events and scheduled
//! callbacks to connected controllers.

use latch_dom::{event_types, Document, ElementId, Event, PointerId};
use latch_scheduler::Scheduler;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::controller::{Context, Controller, ControllerId, Listener, ListenerId};

/// Runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Clock step between animation frames when advancing time
    pub frame_interval_ms: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16.0,
        }
    }
}

/// Single-threaded host loop for controllers
pub struct Runtime {
    config: RuntimeConfig,
    document: Document,
    scheduler: Scheduler<ControllerId>,
    /// `None` while a controller is being constructed
    controllers: SlotMap<ControllerId, Option<Box<dyn Controller>>>,
    listeners: SlotMap<ListenerId, Listener>,
    listener_seq: u64,
}

impl Runtime {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, RuntimeConfig::default())
    }

    pub fn with_config(document: Document, config: RuntimeConfig) -> Self {
        Self {
            config,
            document,
            scheduler: Scheduler::new(),
            controllers: SlotMap::with_key(),
            listeners: SlotMap::with_key(),
            listener_seq: 0,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn scheduler(&self) -> &Scheduler<ControllerId> {
        &self.scheduler
    }

    /// Scheduler clock in milliseconds
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Construct and connect a controller.
    ///
    /// `build` receives a context already bound to the new controller's id, so
    /// it can register listeners and schedule work. If it fails, anything it
    /// registered is dropped and the error is returned.
    pub fn connect<C, E, F>(&mut self, build: F) -> Result<ControllerId, E>
    where
        C: Controller,
        F: FnOnce(&mut Context<'_>) -> Result<C, E>,
    {
        let id = self.controllers.insert(None);
        let mut cx = Context::new(
            &mut self.document,
            &mut self.scheduler,
            &mut self.listeners,
            &mut self.listener_seq,
            id,
        );
        match build(&mut cx) {
            Ok(controller) => {
                tracing::debug!("connected {} as {:?}", controller.name(), id);
                if let Some(slot) = self.controllers.get_mut(id) {
                    *slot = Some(Box::new(controller));
                }
                Ok(id)
            }
            Err(err) => {
                self.controllers.remove(id);
                self.purge(id);
                Err(err)
            }
        }
    }

    /// Disconnect a controller. Returns false if `id` is not connected.
    ///
    /// Anything the controller left scheduled or registered is dropped here
    /// and reported, so nothing can call into it afterwards.
    pub fn disconnect(&mut self, id: ControllerId) -> bool {
        let Some(slot) = self.controllers.remove(id) else {
            return false;
        };
        let Some(mut controller) = slot else {
            return false;
        };

        let mut cx = Context::new(
            &mut self.document,
            &mut self.scheduler,
            &mut self.listeners,
            &mut self.listener_seq,
            id,
        );
        controller.disconnect(&mut cx);

        let leftover = self.purge(id);
        if leftover > 0 {
            tracing::warn!(
                "{} left {} listeners/callbacks behind at disconnect",
                controller.name(),
                leftover
            );
        } else {
            tracing::debug!("disconnected {} ({:?})", controller.name(), id);
        }
        true
    }

    /// Drop every listener and scheduled callback owned by `id`
    fn purge(&mut self, id: ControllerId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|_, l| l.owner != id);
        let listeners = before - self.listeners.len();
        listeners + self.scheduler.cancel_owned(id)
    }

    pub fn is_connected(&self, id: ControllerId) -> bool {
        matches!(self.controllers.get(id), Some(Some(_)))
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.values().filter(|c| c.is_some()).count()
    }

    /// Typed access to a connected controller
    pub fn controller<C: Controller>(&self, id: ControllerId) -> Option<&C> {
        self.controllers
            .get(id)?
            .as_ref()?
            .as_any()
            .downcast_ref::<C>()
    }

    /// Run `f` with a connected controller and a context bound to it
    pub fn with_controller<C, R, F>(&mut self, id: ControllerId, f: F) -> Option<R>
    where
        C: Controller,
        F: FnOnce(&mut C, &mut Context<'_>) -> R,
    {
        let controller = self
            .controllers
            .get_mut(id)?
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<C>()?;
        let mut cx = Context::new(
            &mut self.document,
            &mut self.scheduler,
            &mut self.listeners,
            &mut self.listener_seq,
            id,
        );
        Some(f(controller, &mut cx))
    }

    /// Number of listeners registered by `id`
    pub fn listener_count(&self, id: ControllerId) -> usize {
        self.listeners.values().filter(|l| l.owner == id).count()
    }

    // =========================================================================
    // Event dispatch
    // =========================================================================

    /// Deliver an event to matching listeners.
    ///
    /// Pointer events follow pointer capture. Bubbling events visit the target
    /// and then its ancestors; listeners on one element run in registration
    /// order. Listeners removed during dispatch are skipped. Returns the number
    /// of listeners that ran.
    pub fn dispatch(&mut self, mut event: Event) -> usize {
        event.timestamp = self.scheduler.now();

        if event_types::is_capturable(event.event_type) {
            if let Some(captured) = event
                .pointer_id()
                .and_then(|pid| self.document.pointer_capture(pid))
            {
                event.target = captured;
            }
        }
        if !self.document.contains(event.target) {
            return 0;
        }

        let mut path: SmallVec<[ElementId; 8]> = SmallVec::new();
        path.push(event.target);
        if event_types::bubbles(event.event_type) {
            path.extend(self.document.ancestors(event.target));
        }

        let mut delivered = 0;
        for current in path {
            let mut matched: SmallVec<[(u64, ListenerId); 4]> = self
                .listeners
                .iter()
                .filter(|(_, l)| l.element == current && l.event_type == event.event_type)
                .map(|(id, l)| (l.seq, id))
                .collect();
            matched.sort_unstable_by_key(|(seq, _)| *seq);

            for (_, listener_id) in matched {
                if event.propagation_stopped {
                    break;
                }
                let Some(owner) = self.listeners.get(listener_id).map(|l| l.owner) else {
                    continue;
                };
                let Some(Some(controller)) = self.controllers.get_mut(owner) else {
                    continue;
                };
                let mut cx = Context::new(
                    &mut self.document,
                    &mut self.scheduler,
                    &mut self.listeners,
                    &mut self.listener_seq,
                    owner,
                );
                controller.handle_event(&mut cx, &mut event, current);
                delivered += 1;
            }

            if event.propagation_stopped {
                break;
            }
        }

        tracing::trace!(
            "{} on {:?} reached {} listeners",
            event_types::name(event.event_type),
            event.target,
            delivered
        );
        delivered
    }

    pub fn pointer_enter(&mut self, target: ElementId) -> usize {
        self.dispatch(Event::new(
            event_types::POINTER_ENTER,
            target,
            latch_dom::EventData::None,
        ))
    }

    pub fn pointer_leave(&mut self, target: ElementId) -> usize {
        self.dispatch(Event::new(
            event_types::POINTER_LEAVE,
            target,
            latch_dom::EventData::None,
        ))
    }

    pub fn pointer_down(&mut self, target: ElementId, pointer_id: PointerId, x: f32, y: f32) -> usize {
        self.dispatch(Event::pointer(event_types::POINTER_DOWN, target, pointer_id, x, y))
    }

    pub fn pointer_move(&mut self, target: ElementId, pointer_id: PointerId, x: f32, y: f32) -> usize {
        self.dispatch(Event::pointer(event_types::POINTER_MOVE, target, pointer_id, x, y))
    }

    pub fn pointer_up(&mut self, target: ElementId, pointer_id: PointerId, x: f32, y: f32) -> usize {
        self.dispatch(Event::pointer(event_types::POINTER_UP, target, pointer_id, x, y))
    }

    pub fn pointer_cancel(&mut self, target: ElementId, pointer_id: PointerId) -> usize {
        self.dispatch(Event::pointer(event_types::POINTER_CANCEL, target, pointer_id, 0.0, 0.0))
    }

    /// Scroll an element and, if its position changed, dispatch `scroll` on it
    pub fn scroll_to(&mut self, target: ElementId, left: f32, top: f32) -> bool {
        if !self.document.scroll_to(target, left, top) {
            return false;
        }
        let Some(metrics) = self.document.metrics(target) else {
            return false;
        };
        self.dispatch(Event::scroll(target, metrics.scroll_left, metrics.scroll_top));
        true
    }

    // =========================================================================
    // Frames and timers
    // =========================================================================

    /// Run one animation frame. Returns the number of callbacks that ran.
    pub fn run_frame(&mut self) -> usize {
        let timestamp = self.scheduler.now();
        let mut ran = 0;
        for frame_id in self.scheduler.begin_frame() {
            let Some(owner) = self.scheduler.take_frame(frame_id) else {
                continue;
            };
            let Some(Some(controller)) = self.controllers.get_mut(owner) else {
                continue;
            };
            let mut cx = Context::new(
                &mut self.document,
                &mut self.scheduler,
                &mut self.listeners,
                &mut self.listener_seq,
                owner,
            );
            controller.on_animation_frame(&mut cx, frame_id, timestamp);
            ran += 1;
        }
        ran
    }

    /// Fire every timer due at the current time. Returns the number fired.
    pub fn fire_timers(&mut self) -> usize {
        let mut fired = 0;
        for timer_id in self.scheduler.due_timers() {
            let Some(owner) = self.scheduler.take_timer(timer_id) else {
                continue;
            };
            let Some(Some(controller)) = self.controllers.get_mut(owner) else {
                continue;
            };
            let mut cx = Context::new(
                &mut self.document,
                &mut self.scheduler,
                &mut self.listeners,
                &mut self.listener_seq,
                owner,
            );
            controller.on_timeout(&mut cx, timer_id);
            fired += 1;
        }
        fired
    }

    /// Advance the clock by `ms`, one frame interval at a time: each step
    /// fires due timers and then runs a frame. Negative and non-finite
    /// durations are ignored.
    pub fn advance(&mut self, ms: f64) {
        if !ms.is_finite() || ms <= 0.0 {
            return;
        }
        let step = self.config.frame_interval_ms.max(1.0);
        let mut remaining = ms;
        while remaining > 0.0 {
            let dt = remaining.min(step);
            self.scheduler.advance(dt);
            self.fire_timers();
            self.run_frame();
            remaining -= dt;
        }
    }
}
