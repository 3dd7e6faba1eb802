//! Latch ScrollArea
//!
//! A custom scrollbar over a natively scrolling viewport. The controller
//! attaches to a root element marked up as
//!
//! ```text
//! root       data-type="auto|always|hover|scroll"  data-scroll-hide-delay="600"
//! viewport   data-part="viewport"
//! scrollbar  data-part="scrollbar"  data-orientation="vertical|horizontal"
//! thumb      data-part="thumb"
//! ```
//!
//! and keeps each scrollbar's `data-state`, each thumb's size and offset,
//! and the viewport's overflow styles in sync with the viewport.
//!
//! # Example
//!
//! ```rust
//! use latch_core::Runtime;
//! use latch_dom::{Axis, Document, ElementSpec};
//! use latch_scroll_area::{ScrollArea, Visibility};
//!
//! let mut doc = Document::new();
//! let root = doc.build(
//!     &ElementSpec::new("div")
//!         .attr("data-type", "hover")
//!         .child(
//!             ElementSpec::new("div")
//!                 .attr("data-part", "viewport")
//!                 .client_size(200.0, 100.0)
//!                 .scroll_size(200.0, 400.0),
//!         )
//!         .child(
//!             ElementSpec::new("div")
//!                 .attr("data-part", "scrollbar")
//!                 .attr("data-orientation", "vertical")
//!                 .child(ElementSpec::new("div").attr("data-part", "thumb")),
//!         ),
//! );
//!
//! let mut runtime = Runtime::new(doc);
//! let id = runtime.connect(|cx| ScrollArea::connect(cx, root)).unwrap();
//!
//! runtime.pointer_enter(root);
//! let area = runtime.controller::<ScrollArea>(id).unwrap();
//! assert_eq!(area.scrollbar_state(Axis::Vertical), Some(Visibility::Visible));
//!
//! runtime.disconnect(id);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod markup;
pub mod scrollbar;

pub use config::{ScrollAreaConfig, ScrollType};
pub use controller::ScrollArea;
pub use error::{ConfigError, ScrollAreaError};
pub use geometry::ThumbGeometry;
pub use scrollbar::{Scrollbar, Visibility};
