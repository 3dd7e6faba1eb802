//! Controller trait and the per-call context handed to controllers

use std::any::Any;

use latch_dom::{event_types, Document, ElementId, Event, EventType};
use latch_scheduler::{FrameId, Scheduler, TimerId};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a connected controller instance
    pub struct ControllerId;
    /// Identifies an event listener registration
    pub struct ListenerId;
}

/// An explicit event listener registration
pub(crate) struct Listener {
    pub owner: ControllerId,
    pub element: ElementId,
    pub event_type: EventType,
    /// Registration order, listeners on one element run in this order
    pub seq: u64,
}

/// A behavior bound to one DOM subtree.
///
/// The runtime calls into a controller for every event delivered to one of
/// its listeners, for each animation frame and timeout it scheduled, and once
/// at disconnect. All calls happen on the runtime's thread, one at a time.
pub trait Controller: Any {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Handle an event delivered to a listener registered on `current_target`
    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event, current_target: ElementId);

    /// A frame requested through [`Context::request_animation_frame`] is running
    fn on_animation_frame(&mut self, _cx: &mut Context<'_>, _id: FrameId, _timestamp: f64) {}

    /// A timeout scheduled through [`Context::set_timeout`] fired
    fn on_timeout(&mut self, _cx: &mut Context<'_>, _id: TimerId) {}

    /// Release everything the controller acquired. Must be safe to call repeatedly.
    fn disconnect(&mut self, cx: &mut Context<'_>);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// What a controller can touch while handling a call: the document, the
/// scheduler (on its own behalf) and its own listener registrations.
pub struct Context<'a> {
    document: &'a mut Document,
    scheduler: &'a mut Scheduler<ControllerId>,
    listeners: &'a mut SlotMap<ListenerId, Listener>,
    listener_seq: &'a mut u64,
    owner: ControllerId,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        document: &'a mut Document,
        scheduler: &'a mut Scheduler<ControllerId>,
        listeners: &'a mut SlotMap<ListenerId, Listener>,
        listener_seq: &'a mut u64,
        owner: ControllerId,
    ) -> Self {
        Self {
            document,
            scheduler,
            listeners,
            listener_seq,
            owner,
        }
    }

    /// The controller this context acts for
    pub fn id(&self) -> ControllerId {
        self.owner
    }

    pub fn document(&self) -> &Document {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut *self.document
    }

    pub fn request_animation_frame(&mut self) -> FrameId {
        self.scheduler.request_animation_frame(self.owner)
    }

    pub fn cancel_animation_frame(&mut self, id: FrameId) -> bool {
        self.scheduler.cancel_animation_frame(id)
    }

    pub fn set_timeout(&mut self, delay_ms: f64) -> TimerId {
        self.scheduler.set_timeout(delay_ms, self.owner)
    }

    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.scheduler.clear_timeout(id)
    }

    /// Register a listener for `event_type` on `element`
    pub fn add_event_listener(&mut self, element: ElementId, event_type: EventType) -> ListenerId {
        let seq = *self.listener_seq;
        *self.listener_seq += 1;
        tracing::trace!(
            "listen {} on {:?}",
            event_types::name(event_type),
            element
        );
        self.listeners.insert(Listener {
            owner: self.owner,
            element,
            event_type,
            seq,
        })
    }

    /// Remove one of this controller's listeners. Returns false if it is not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.get(id) {
            Some(listener) if listener.owner == self.owner => {
                self.listeners.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Number of listeners this controller has registered
    pub fn listener_count(&self) -> usize {
        self.listeners
            .values()
            .filter(|l| l.owner == self.owner)
            .count()
    }
}
