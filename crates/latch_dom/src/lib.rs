//! Latch Document Model
//!
//! The DOM surface that Latch controllers attach to:
//!
//! - **Element arena**: tags, ordered attributes and inline styles, parent/child links
//! - **Box metrics**: client size, scroll size and clamped scroll position per element
//! - **Pointer capture**: which element receives a pointer's events while captured
//! - **Events**: DOM event types and payloads routed by the runtime
//! - **Markup**: serde-friendly element descriptions that build into a document
//!
//! # Example
//!
//! ```rust
//! use latch_dom::{Axis, Document, ElementSpec};
//!
//! let mut doc = Document::new();
//! let root = doc.build(
//!     &ElementSpec::new("div")
//!         .attr("data-part", "root")
//!         .child(
//!             ElementSpec::new("div")
//!                 .attr("data-part", "viewport")
//!                 .client_size(200.0, 100.0)
//!                 .scroll_size(200.0, 400.0),
//!         ),
//! );
//!
//! let viewport = doc.find_by_attribute(root, "data-part", "viewport").unwrap();
//! doc.set_scroll_position(viewport, Axis::Vertical, 1000.0);
//!
//! // Scroll positions are clamped to the scrollable range
//! assert_eq!(doc.scroll_position(viewport, Axis::Vertical), Some(300.0));
//! ```

pub mod error;
pub mod events;
pub mod markup;
pub mod metrics;
pub mod tree;

pub use error::DomError;
pub use events::{event_types, Event, EventData, EventType, PointerId};
pub use markup::ElementSpec;
pub use metrics::{Axis, BoxMetrics};
pub use tree::{Document, Element, ElementId};
