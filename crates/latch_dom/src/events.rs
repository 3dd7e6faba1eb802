//! DOM events
//!
//! Event types and payloads delivered to controller listeners.

use crate::metrics::Axis;
use crate::tree::ElementId;

/// Event type identifier
pub type EventType = u32;

/// Pointer identifier (mouse, pen or touch contact)
pub type PointerId = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Pointer entered the element (does not bubble)
    pub const POINTER_ENTER: EventType = 4;
    /// Pointer left the element (does not bubble)
    pub const POINTER_LEAVE: EventType = 5;
    /// The platform aborted the pointer sequence
    pub const POINTER_CANCEL: EventType = 6;
    /// Element scroll position changed (does not bubble)
    pub const SCROLL: EventType = 30;

    /// Whether events of this type propagate to ancestors
    pub fn bubbles(event_type: EventType) -> bool {
        matches!(
            event_type,
            POINTER_DOWN | POINTER_UP | POINTER_MOVE | POINTER_CANCEL
        )
    }

    /// Whether events of this type follow pointer capture
    pub fn is_capturable(event_type: EventType) -> bool {
        matches!(
            event_type,
            POINTER_DOWN | POINTER_UP | POINTER_MOVE | POINTER_CANCEL
        )
    }

    /// Platform event name, for logs
    pub fn name(event_type: EventType) -> &'static str {
        match event_type {
            POINTER_DOWN => "pointerdown",
            POINTER_UP => "pointerup",
            POINTER_MOVE => "pointermove",
            POINTER_ENTER => "pointerenter",
            POINTER_LEAVE => "pointerleave",
            POINTER_CANCEL => "pointercancel",
            SCROLL => "scroll",
            _ => "unknown",
        }
    }
}

/// A DOM event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: ElementId,
    pub data: EventData,
    /// Milliseconds on the scheduler clock, stamped at dispatch
    pub timestamp: f64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        pointer_id: PointerId,
        /// Viewport-space coordinates
        x: f32,
        y: f32,
        button: u8,
    },
    Scroll {
        scroll_left: f32,
        scroll_top: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: ElementId, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0.0,
            propagation_stopped: false,
        }
    }

    /// Primary-button pointer event
    pub fn pointer(
        event_type: EventType,
        target: ElementId,
        pointer_id: PointerId,
        x: f32,
        y: f32,
    ) -> Self {
        Self::new(
            event_type,
            target,
            EventData::Pointer {
                pointer_id,
                x,
                y,
                button: 0,
            },
        )
    }

    pub fn scroll(target: ElementId, scroll_left: f32, scroll_top: f32) -> Self {
        Self::new(
            event_types::SCROLL,
            target,
            EventData::Scroll {
                scroll_left,
                scroll_top,
            },
        )
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn pointer_id(&self) -> Option<PointerId> {
        match self.data {
            EventData::Pointer { pointer_id, .. } => Some(pointer_id),
            _ => None,
        }
    }

    /// Pointer coordinate along an axis
    pub fn coordinate(&self, axis: Axis) -> Option<f32> {
        match self.data {
            EventData::Pointer { x, y, .. } => Some(axis.pick(x, y)),
            _ => None,
        }
    }
}
