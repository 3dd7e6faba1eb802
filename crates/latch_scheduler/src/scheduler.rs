//! Frame and timer scheduler
//!
//! Tracks pending animation-frame requests and timeouts against a virtual
//! millisecond clock.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct FrameId;
    pub struct TimerId;
}

struct FrameRequest<T> {
    owner: T,
    /// Frame batch the request was made in
    batch: u64,
    seq: u64,
}

struct Timer<T> {
    owner: T,
    /// Clock time (ms) at which the timer becomes due
    due: f64,
    seq: u64,
}

/// Pending frame requests and timeouts, keyed by handle
pub struct Scheduler<T> {
    now: f64,
    frames: SlotMap<FrameId, FrameRequest<T>>,
    timers: SlotMap<TimerId, Timer<T>>,
    batch: u64,
    next_seq: u64,
    frame_count: u64,
}

impl<T: Copy + PartialEq> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            frames: SlotMap::with_key(),
            timers: SlotMap::with_key(),
            batch: 0,
            next_seq: 0,
            frame_count: 0,
        }
    }

    /// Current clock time in milliseconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the clock forward. Negative and non-finite steps are ignored.
    pub fn advance(&mut self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.now += ms;
        }
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // =========================================================================
    // Animation frames
    // =========================================================================

    /// Request a callback at the next frame
    pub fn request_animation_frame(&mut self, owner: T) -> FrameId {
        let seq = self.next_seq();
        self.frames.insert(FrameRequest {
            owner,
            batch: self.batch,
            seq,
        })
    }

    /// Cancel a pending frame request. Returns false if it already ran or was cancelled.
    pub fn cancel_animation_frame(&mut self, id: FrameId) -> bool {
        self.frames.remove(id).is_some()
    }

    /// Start a frame: returns the requests made before this point, in request order.
    ///
    /// Requests made while the returned batch is being run belong to the next frame.
    pub fn begin_frame(&mut self) -> Vec<FrameId> {
        let cutoff = self.batch;
        self.batch += 1;
        self.frame_count += 1;

        let mut due: Vec<(u64, FrameId)> = self
            .frames
            .iter()
            .filter(|(_, req)| req.batch <= cutoff)
            .map(|(id, req)| (req.seq, id))
            .collect();
        due.sort_unstable_by_key(|(seq, _)| *seq);
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Remove a frame request for running. `None` if it was cancelled meanwhile.
    pub fn take_frame(&mut self, id: FrameId) -> Option<T> {
        self.frames.remove(id).map(|req| req.owner)
    }

    pub fn is_frame_pending(&self, id: FrameId) -> bool {
        self.frames.contains_key(id)
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frames started so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    // =========================================================================
    // Timeouts
    // =========================================================================

    /// Schedule a one-shot timeout `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: f64, owner: T) -> TimerId {
        let delay = if delay_ms.is_finite() {
            delay_ms.max(0.0)
        } else {
            0.0
        };
        let seq = self.next_seq();
        self.timers.insert(Timer {
            owner,
            due: self.now + delay,
            seq,
        })
    }

    /// Cancel a pending timeout. Returns false if it already fired or was cancelled.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    /// Timers due at the current time, earliest first (ties in scheduling order)
    pub fn due_timers(&self) -> Vec<TimerId> {
        let mut due: Vec<(f64, u64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= self.now)
            .map(|(id, timer)| (timer.due, timer.seq, id))
            .collect();
        due.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Remove a timer for firing. `None` if it was cleared meanwhile.
    pub fn take_timer(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|timer| timer.owner)
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // =========================================================================
    // Owners
    // =========================================================================

    /// Number of frame requests and timers held by `owner`
    pub fn owned_count(&self, owner: T) -> usize {
        let frames = self.frames.values().filter(|r| r.owner == owner).count();
        let timers = self.timers.values().filter(|t| t.owner == owner).count();
        frames + timers
    }

    /// Drop every frame request and timer held by `owner`, returning how many were dropped
    pub fn cancel_owned(&mut self, owner: T) -> usize {
        let before = self.frames.len() + self.timers.len();
        self.frames.retain(|_, req| req.owner != owner);
        self.timers.retain(|_, timer| timer.owner != owner);
        let dropped = before - (self.frames.len() + self.timers.len());
        if dropped > 0 {
            tracing::trace!("cancelled {} scheduled callbacks", dropped);
        }
        dropped
    }
}

impl<T: Copy + PartialEq> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
