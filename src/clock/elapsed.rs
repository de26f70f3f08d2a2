use crate::foundation::core::Millis;

/// Start-instant and elapsed-time bookkeeping for one playback session.
///
/// Elapsed time is always `tick_timestamp - start_instant`; nothing is accumulated across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElapsedClock {
    start_instant: Option<Millis>,
    elapsed: Option<Millis>,
}

impl ElapsedClock {
    /// Fresh clock with no start instant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `timestamp` and return the elapsed time.
    ///
    /// The first tick after construction or [`Self::reset`] becomes the start instant.
    pub fn tick(&mut self, timestamp: Millis) -> Millis {
        let start = *self.start_instant.get_or_insert(timestamp);
        let elapsed = (timestamp - start).max(0.0);
        self.elapsed = Some(elapsed);
        elapsed
    }

    /// Last computed elapsed time.
    pub fn elapsed(&self) -> Option<Millis> {
        self.elapsed
    }

    /// Instant the current session is measured from.
    pub fn start_instant(&self) -> Option<Millis> {
        self.start_instant
    }

    /// Move the start instant so that the frozen elapsed time continues from `now`.
    ///
    /// Before the first tick there is nothing to preserve and the start stays unset.
    pub fn rebase(&mut self, now: Millis) {
        if let Some(elapsed) = self.elapsed {
            self.start_instant = Some(now - elapsed);
        }
    }

    /// Forget the session.
    pub fn reset(&mut self) {
        self.start_instant = None;
        self.elapsed = None;
    }
}
