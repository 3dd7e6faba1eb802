//! Latch Core Runtime
//!
//! Connects controllers to a document and drives them:
//!
//! - **Controllers**: stateful behaviors bound to one DOM subtree
//! - **Explicit listeners**: registered at connect, removed at disconnect
//! - **Event dispatch**: pointer capture, bubbling, registration order
//! - **Frames and timers**: cooperative callbacks on the scheduler clock
//!
//! Everything runs on one thread; a controller is only ever called from the
//! runtime, one call at a time.

pub mod controller;
pub mod runtime;

pub use controller::{Context, Controller, ControllerId, ListenerId};
pub use runtime::{Runtime, RuntimeConfig};
