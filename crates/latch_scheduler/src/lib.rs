//! Latch Scheduler
//!
//! The cooperative primitives controllers schedule work with:
//!
//! - **Animation frames**: one callback per request, run at the next frame
//! - **Timeouts**: one-shot callbacks due after a delay
//! - **Virtual clock**: milliseconds advanced explicitly by the host loop
//!
//! The scheduler only keeps the bookkeeping. Each request carries an owner
//! token; the host loop takes due entries and invokes the owner.
//!
//! # Example
//!
//! ```rust
//! use latch_scheduler::Scheduler;
//!
//! let mut scheduler: Scheduler<u32> = Scheduler::new();
//! let timer = scheduler.set_timeout(100.0, 7);
//!
//! scheduler.advance(99.0);
//! assert!(scheduler.due_timers().is_empty());
//!
//! scheduler.advance(1.0);
//! assert_eq!(scheduler.due_timers(), vec![timer]);
//! assert_eq!(scheduler.take_timer(timer), Some(7));
//! ```

pub mod scheduler;

pub use scheduler::{FrameId, Scheduler, TimerId};
