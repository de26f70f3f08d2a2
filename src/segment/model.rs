use crate::{
    foundation::core::{Millis, ensure_duration},
    foundation::error::PentraceResult,
    segment::style::StrokeStyleOverrides,
};

/// One drawable unit: a geometry handle, how long it takes to draw, and optional overrides.
///
/// The geometry is opaque to the engine; it is only ever handed to a
/// [`crate::LengthMeasure`] and to the caller's render sink.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentDescriptor<G> {
    /// Geometry reference (for example raw SVG path data).
    pub geometry: G,
    /// Unscaled draw duration in milliseconds. `0` draws instantly.
    pub duration: Millis,
    /// Per-segment reverse. Absent means "follow the global flag".
    pub reverse: Option<bool>,
    /// Per-segment style overrides.
    pub style: StrokeStyleOverrides,
}

impl<G> SegmentDescriptor<G> {
    /// Segment with no overrides.
    pub fn new(geometry: G, duration: Millis) -> Self {
        Self {
            geometry,
            duration,
            reverse: None,
            style: StrokeStyleOverrides::default(),
        }
    }

    /// Set the per-segment reverse override.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    /// Set the per-segment style overrides.
    pub fn with_style(mut self, style: StrokeStyleOverrides) -> Self {
        self.style = style;
        self
    }

    /// Sweep direction after combining with the global flag.
    pub fn effective_reverse(&self, global_reverse: bool) -> bool {
        global_reverse || self.reverse.unwrap_or(false)
    }

    /// Reject negative or non-finite durations.
    pub fn validate(&self) -> PentraceResult<()> {
        ensure_duration("segment duration", self.duration)?;
        Ok(())
    }
}
