//! Document errors

use thiserror::Error;

use crate::tree::ElementId;

/// Errors reported by structural document edits and markup parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The element id does not refer to a live element
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// The append would make an element its own ancestor
    #[error("appending {child:?} to {parent:?} would create a cycle")]
    CyclicAppend { parent: ElementId, child: ElementId },

    /// An orientation marker that is neither `vertical` nor `horizontal`
    #[error("invalid orientation {0:?}, expected \"vertical\" or \"horizontal\"")]
    InvalidAxis(String),
}
