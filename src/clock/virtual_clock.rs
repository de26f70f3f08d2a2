use crate::{
    clock::frame::{FrameHandle, FrameScheduler},
    foundation::core::Millis,
    foundation::error::{PentraceError, PentraceResult},
};

/// Manually advanced frame clock with a fixed refresh interval.
///
/// Time is derived from a tick count rather than summed per frame, so long runs do not drift.
#[derive(Clone, Debug)]
pub struct VirtualFrameClock {
    frame_interval: Millis,
    ticks: u64,
    idle: Millis,
    next_id: u64,
    pending: Option<FrameHandle>,
    fired: u64,
    requested: u64,
}

impl VirtualFrameClock {
    /// Clock that refreshes every `frame_interval` milliseconds.
    pub fn new(frame_interval: Millis) -> PentraceResult<Self> {
        if !frame_interval.is_finite() || frame_interval <= 0.0 {
            return Err(PentraceError::invalid_configuration(
                "frame interval must be > 0",
            ));
        }
        Ok(Self {
            frame_interval,
            ticks: 0,
            idle: 0.0,
            next_id: 1,
            pending: None,
            fired: 0,
            requested: 0,
        })
    }

    /// Clock that refreshes `fps` times per second.
    pub fn at_fps(fps: f64) -> PentraceResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(PentraceError::invalid_configuration("fps must be > 0"));
        }
        Self::new(1000.0 / fps)
    }

    /// Refresh interval.
    pub fn frame_interval(&self) -> Millis {
        self.frame_interval
    }

    /// Advance one refresh and fire the pending request, if any.
    pub fn advance(&mut self) -> Option<(FrameHandle, Millis)> {
        self.ticks += 1;
        let handle = self.pending.take()?;
        self.fired += 1;
        Some((handle, self.now()))
    }

    /// Let `ms` pass without a refresh (the host was busy, or nothing was scheduled).
    pub fn idle(&mut self, ms: Millis) {
        if ms.is_finite() && ms > 0.0 {
            self.idle += ms;
        }
    }

    /// A request is waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of requests delivered so far.
    pub fn frames_fired(&self) -> u64 {
        self.fired
    }

    /// Number of requests made so far.
    pub fn frames_requested(&self) -> u64 {
        self.requested
    }
}

impl FrameScheduler for VirtualFrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.requested += 1;
        if let Some(prev) = self.pending.replace(handle) {
            tracing::trace!(?prev, ?handle, "pending frame superseded");
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn now(&self) -> Millis {
        self.idle + (self.ticks as f64) * self.frame_interval
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/virtual_clock.rs"]
mod tests;
