use crate::{
    clock::elapsed::ElapsedClock,
    clock::frame::{FrameHandle, FrameScheduler},
    foundation::core::{Millis, ensure_duration},
    foundation::error::{PentraceError, PentraceResult},
    geometry::measure::LengthMeasure,
    segment::model::SegmentDescriptor,
    timeline::reveal::{StrokeReveal, StrokeSink, visible_fraction},
    timeline::schedule::{DrawMode, Timeline, build_timeline},
};

/// Lifecycle position of a [`PlaybackController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Nothing scheduled.
    Idle,
    /// Painted, waiting for the initial delay to pass.
    Delayed,
    /// Started; the first frame has not arrived yet.
    Scheduled,
    /// Frames are being rendered.
    Running,
    /// Frame loop halted with elapsed time frozen.
    Paused,
    /// Every segment is fully drawn.
    Completed,
}

/// Scheduling parameters for a playback session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackOptions {
    /// Sequential or parallel placement.
    pub mode: DrawMode,
    /// Duration divisor (`2.0` plays twice as fast).
    pub speed_multiplier: f64,
    /// Global reverse flag.
    pub reverse: bool,
    /// Wait between `paint` and the start of drawing.
    pub delay: Millis,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            mode: DrawMode::Parallel,
            speed_multiplier: 1.0,
            reverse: false,
            delay: 0.0,
        }
    }
}

impl PlaybackOptions {
    /// Reject non-positive speeds and negative delays.
    pub fn validate(&self) -> PentraceResult<()> {
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(PentraceError::invalid_configuration(format!(
                "speed multiplier must be > 0 (got {})",
                self.speed_multiplier
            )));
        }
        ensure_duration("delay", self.delay)?;
        Ok(())
    }
}

type Hook = Box<dyn FnMut()>;

/// Start and completion notifications.
#[derive(Default)]
pub struct PlaybackHooks {
    on_start: Option<Hook>,
    on_complete: Option<Hook>,
}

impl PlaybackHooks {
    /// No hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per paint, right before the first animation frame is requested.
    pub fn on_start(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Called once when elapsed time reaches the timeline's total duration.
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    fn fire_start(&mut self) {
        if let Some(f) = self.on_start.as_mut() {
            f();
        }
    }

    fn fire_complete(&mut self) {
        if let Some(f) = self.on_complete.as_mut() {
            f();
        }
    }
}

impl std::fmt::Debug for PlaybackHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackHooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Result of delivering one frame to a controller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameOutcome {
    /// Stale or unexpected handle; nothing happened.
    Ignored,
    /// Still inside the initial delay.
    Waiting,
    /// Segments were updated; another frame is pending.
    Rendered {
        /// Timeline elapsed time for this frame.
        elapsed: Millis,
    },
    /// Final frame; no further frame was requested.
    Completed {
        /// Timeline elapsed time for this frame.
        elapsed: Millis,
    },
}

/// Drives one subject's timeline from host frame ticks.
///
/// The controller owns its frame scheduler and keeps at most one request pending. Ticks whose
/// handle is not the pending one are ignored, so a callback that was already in flight when
/// playback was paused, erased or restarted never renders.
pub struct PlaybackController<G, M, S> {
    segments: Vec<SegmentDescriptor<G>>,
    measure: M,
    scheduler: S,
    options: PlaybackOptions,
    hooks: PlaybackHooks,

    phase: PlaybackPhase,
    timeline: Option<Timeline>,
    clock: ElapsedClock,
    pending: Option<FrameHandle>,
    painted_at: Option<Millis>,
    // Delay already waited when paused before drawing started.
    delay_waited: Option<Millis>,
    settled: Vec<bool>,
}

impl<G, M, S> PlaybackController<G, M, S>
where
    M: LengthMeasure<G>,
    S: FrameScheduler,
{
    /// Controller for `segments`; nothing is scheduled until [`Self::paint`].
    pub fn new(
        segments: Vec<SegmentDescriptor<G>>,
        measure: M,
        scheduler: S,
        options: PlaybackOptions,
        hooks: PlaybackHooks,
    ) -> PentraceResult<Self> {
        options.validate()?;
        Ok(Self {
            segments,
            measure,
            scheduler,
            options,
            hooks,
            phase: PlaybackPhase::Idle,
            timeline: None,
            clock: ElapsedClock::new(),
            pending: None,
            painted_at: None,
            delay_waited: None,
            settled: Vec::new(),
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Timeline of the current session.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Last computed elapsed time of the current session.
    pub fn elapsed(&self) -> Option<Millis> {
        self.clock.elapsed()
    }

    /// Scheduling parameters.
    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    /// Segment descriptors this controller animates.
    pub fn segments(&self) -> &[SegmentDescriptor<G>] {
        &self.segments
    }

    /// Handle of the outstanding frame request.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frame scheduler (for hosts that pump it, such as [`crate::VirtualFrameClock`]).
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Build a fresh timeline and start playback.
    ///
    /// Any running session is discarded first. Configuration errors surface here, before a
    /// frame is requested. Every segment is reset to hidden (skipped segments to fully drawn).
    pub fn paint(&mut self, sink: &mut impl StrokeSink) -> PentraceResult<&Timeline> {
        let timeline = build_timeline(
            &self.segments,
            &self.measure,
            self.options.mode,
            self.options.speed_multiplier,
            self.options.reverse,
        )?;

        if self.phase != PlaybackPhase::Idle {
            tracing::debug!(phase = ?self.phase, "paint while active; restarting");
        }
        self.cancel_pending();
        self.clock.reset();
        self.delay_waited = None;

        self.settled = vec![false; timeline.len()];
        for seg in &timeline.segments {
            if seg.skipped {
                sink.apply(seg.index, &StrokeReveal::for_segment(seg, 1.0));
                self.settled[seg.index] = true;
            } else {
                sink.apply(seg.index, &StrokeReveal::for_segment(seg, 0.0));
            }
        }
        self.timeline = Some(timeline);
        self.painted_at = Some(self.scheduler.now());

        if self.options.delay > 0.0 {
            self.phase = PlaybackPhase::Delayed;
            self.pending = Some(self.scheduler.request_frame());
            tracing::debug!(delay = self.options.delay, "playback delayed");
        } else {
            self.begin();
        }

        self.timeline
            .as_ref()
            .ok_or_else(|| PentraceError::precondition("timeline missing after paint"))
    }

    fn begin(&mut self) {
        self.hooks.fire_start();
        self.phase = PlaybackPhase::Scheduled;
        self.pending = Some(self.scheduler.request_frame());
        tracing::debug!("playback started");
    }

    /// Deliver a frame tick.
    ///
    /// `timestamp` must not decrease across calls for one session.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp: Millis,
        sink: &mut impl StrokeSink,
    ) -> FrameOutcome {
        if self.pending != Some(handle) {
            tracing::trace!(?handle, pending = ?self.pending, "ignoring stale frame");
            return FrameOutcome::Ignored;
        }
        self.pending = None;

        match self.phase {
            PlaybackPhase::Delayed => {
                let painted_at = self.painted_at.unwrap_or(timestamp);
                if timestamp - painted_at >= self.options.delay {
                    self.begin();
                } else {
                    self.pending = Some(self.scheduler.request_frame());
                }
                FrameOutcome::Waiting
            }
            PlaybackPhase::Scheduled | PlaybackPhase::Running => {
                let elapsed = self.clock.tick(timestamp);
                self.phase = PlaybackPhase::Running;
                self.render(elapsed, sink)
            }
            PlaybackPhase::Idle | PlaybackPhase::Paused | PlaybackPhase::Completed => {
                FrameOutcome::Ignored
            }
        }
    }

    fn render(&mut self, elapsed: Millis, sink: &mut impl StrokeSink) -> FrameOutcome {
        let Some(timeline) = self.timeline.as_ref() else {
            return FrameOutcome::Ignored;
        };
        let complete = timeline.is_complete_at(elapsed);

        for seg in &timeline.segments {
            if self.settled[seg.index] {
                continue;
            }
            let fraction = if complete {
                1.0
            } else {
                visible_fraction(seg, elapsed, timeline.mode)
            };
            if fraction <= 0.0 {
                continue;
            }
            sink.apply(seg.index, &StrokeReveal::for_segment(seg, fraction));
            if fraction >= 1.0 {
                self.settled[seg.index] = true;
            }
        }

        if complete {
            self.phase = PlaybackPhase::Completed;
            tracing::debug!(elapsed, "playback complete");
            self.hooks.fire_complete();
            FrameOutcome::Completed { elapsed }
        } else {
            self.pending = Some(self.scheduler.request_frame());
            FrameOutcome::Rendered { elapsed }
        }
    }

    /// Halt the frame loop, keeping elapsed time (or the part of the delay already waited).
    pub fn pause(&mut self) -> PentraceResult<()> {
        match self.phase {
            PlaybackPhase::Delayed => {
                self.cancel_pending();
                let now = self.scheduler.now();
                let waited = (now - self.painted_at.unwrap_or(now)).max(0.0);
                self.delay_waited = Some(waited);
                self.phase = PlaybackPhase::Paused;
                tracing::debug!(waited, delay = self.options.delay, "paused during delay");
                Ok(())
            }
            PlaybackPhase::Scheduled | PlaybackPhase::Running => {
                self.cancel_pending();
                self.phase = PlaybackPhase::Paused;
                tracing::debug!(elapsed = ?self.clock.elapsed(), "playback paused");
                Ok(())
            }
            other => Err(self.reject("pause", other)),
        }
    }

    /// Continue from the frozen elapsed time.
    pub fn resume(&mut self) -> PentraceResult<()> {
        if self.phase != PlaybackPhase::Paused {
            return Err(self.reject("resume", self.phase));
        }
        let now = self.scheduler.now();
        if let Some(waited) = self.delay_waited.take() {
            self.painted_at = Some(now - waited);
            self.phase = PlaybackPhase::Delayed;
            self.pending = Some(self.scheduler.request_frame());
            tracing::debug!(waited, "delay resumed");
            return Ok(());
        }
        self.clock.rebase(now);
        self.phase = if self.clock.elapsed().is_some() {
            PlaybackPhase::Running
        } else {
            PlaybackPhase::Scheduled
        };
        self.pending = Some(self.scheduler.request_frame());
        tracing::debug!(elapsed = ?self.clock.elapsed(), "playback resumed");
        Ok(())
    }

    /// Pause when playing, resume when paused.
    pub fn pause_or_resume(&mut self) -> PentraceResult<()> {
        match self.phase {
            PlaybackPhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Stop playback and clear everything drawn. `paint` may be called again afterwards.
    pub fn erase(&mut self, sink: &mut impl StrokeSink) -> PentraceResult<()> {
        if self.phase == PlaybackPhase::Idle {
            return Err(self.reject("erase", self.phase));
        }
        self.cancel_pending();
        self.clock.reset();
        self.timeline = None;
        self.painted_at = None;
        self.delay_waited = None;
        self.settled.clear();
        self.phase = PlaybackPhase::Idle;
        sink.clear();
        tracing::debug!("playback erased");
        Ok(())
    }

    /// Withdraw the outstanding frame request without changing the phase.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn reject(&self, op: &str, phase: PlaybackPhase) -> PentraceError {
        tracing::debug!(op, ?phase, "control operation rejected");
        PentraceError::precondition(format!("cannot {op} while {phase:?}"))
    }
}

impl<G, M, S> std::fmt::Debug for PlaybackController<G, M, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("segments", &self.segments.len())
            .field("options", &self.options)
            .field("phase", &self.phase)
            .field("elapsed", &self.clock.elapsed())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
