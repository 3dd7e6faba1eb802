//! Per-scrollbar state

use latch_dom::{Axis, ElementId};

/// Scrollbar visibility, mirrored to `data-state`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }

    pub fn from_overflow(overflows: bool) -> Self {
        Self::from_bool(overflows)
    }

    pub fn from_bool(visible: bool) -> Self {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

/// A scrollbar found under the scroll area root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrollbar {
    element: ElementId,
    thumb: Option<ElementId>,
    orientation: Axis,
    pub(crate) state: Visibility,
}

impl Scrollbar {
    pub(crate) fn new(element: ElementId, thumb: Option<ElementId>, orientation: Axis) -> Self {
        Self {
            element,
            thumb,
            orientation,
            state: Visibility::Hidden,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn thumb(&self) -> Option<ElementId> {
        self.thumb
    }

    pub fn orientation(&self) -> Axis {
        self.orientation
    }

    pub fn state(&self) -> Visibility {
        self.state
    }
}
