use crate::{
    foundation::core::{Millis, ensure_duration},
    foundation::error::{PentraceError, PentraceResult},
    geometry::measure::LengthMeasure,
    segment::model::SegmentDescriptor,
    timeline::reveal::{StrokeReveal, visible_fraction},
};

/// How segments are placed on the timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Segments draw one after another.
    Sequential,
    /// Every segment starts at 0 and draws over its own duration.
    #[default]
    Parallel,
}

impl DrawMode {
    /// Map the `drawSequential` option onto a mode.
    pub fn from_sequential_flag(sequential: bool) -> Self {
        if sequential {
            Self::Sequential
        } else {
            Self::Parallel
        }
    }
}

/// A segment placed on a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScheduledSegment {
    /// Position in the descriptor list.
    pub index: usize,
    /// Duration after the speed multiplier.
    pub duration_scaled: Millis,
    /// Timeline instant at which this segment starts revealing.
    pub start_offset: Millis,
    /// Measured stroke length (0 for skipped segments).
    pub measured_length: f64,
    /// Effective sweep direction.
    pub reverse: bool,
    /// Geometry could not be measured; rendered as already complete.
    pub skipped: bool,
}

impl ScheduledSegment {
    /// Timeline instant at which this segment is fully revealed.
    pub fn end_offset(&self) -> Millis {
        self.start_offset + self.duration_scaled
    }
}

/// A segment left out of the animation because its geometry could not be measured.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SkippedSegment {
    /// Position in the descriptor list.
    pub index: usize,
    /// Measurement failure message.
    pub reason: String,
}

/// Start offsets and total duration for one playback session.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    /// Scheduled segments in descriptor order.
    pub segments: Vec<ScheduledSegment>,
    /// Instant at which every segment is fully revealed.
    pub total_duration: Millis,
    /// Placement mode.
    pub mode: DrawMode,
    /// Playback speed applied to every duration.
    pub speed_multiplier: f64,
    /// Segments whose geometry failed to measure.
    pub missing: Vec<SkippedSegment>,
}

impl Timeline {
    /// Number of scheduled segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True once `elapsed` has reached the end of the timeline.
    pub fn is_complete_at(&self, elapsed: Millis) -> bool {
        elapsed >= self.total_duration
    }

    /// Visible fraction of every segment at `elapsed`.
    pub fn fractions_at(&self, elapsed: Millis) -> Vec<f64> {
        self.segments
            .iter()
            .map(|seg| visible_fraction(seg, elapsed, self.mode))
            .collect()
    }

    /// Dash parameters for segment `index` at `elapsed`.
    pub fn reveal_at(&self, index: usize, elapsed: Millis) -> Option<StrokeReveal> {
        let seg = self.segments.get(index)?;
        Some(StrokeReveal::for_segment(
            seg,
            visible_fraction(seg, elapsed, self.mode),
        ))
    }
}

/// Place `descriptors` on a timeline.
///
/// - `duration_scaled = duration / speed_multiplier` (2.0 plays twice as fast).
/// - Sequential placement runs back to front when `global_reverse` is set; per-segment reverse
///   overrides only change the sweep direction, never the placement.
/// - Parallel placement starts everything at 0.
///
/// Geometry that fails to measure keeps its slot and is reported in [`Timeline::missing`].
#[tracing::instrument(level = "debug", skip(descriptors, measure), fields(segments = descriptors.len()))]
pub fn build_timeline<G, M>(
    descriptors: &[SegmentDescriptor<G>],
    measure: &M,
    mode: DrawMode,
    speed_multiplier: f64,
    global_reverse: bool,
) -> PentraceResult<Timeline>
where
    M: LengthMeasure<G> + ?Sized,
{
    if !speed_multiplier.is_finite() || speed_multiplier <= 0.0 {
        return Err(PentraceError::invalid_configuration(format!(
            "speed multiplier must be > 0 (got {speed_multiplier})"
        )));
    }

    let mut segments = Vec::with_capacity(descriptors.len());
    let mut missing = Vec::new();
    for (index, desc) in descriptors.iter().enumerate() {
        ensure_duration(&format!("segment {index} duration"), desc.duration)?;

        let (measured_length, skipped) = match measure.measure(&desc.geometry) {
            Ok(len) if len.is_finite() && len >= 0.0 => (len, false),
            Ok(len) => {
                tracing::warn!(index, len, "segment length is invalid; skipping");
                missing.push(SkippedSegment {
                    index,
                    reason: format!("measured length {len} is invalid"),
                });
                (0.0, true)
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "segment geometry unavailable; skipping");
                missing.push(SkippedSegment {
                    index,
                    reason: e.to_string(),
                });
                (0.0, true)
            }
        };

        segments.push(ScheduledSegment {
            index,
            duration_scaled: desc.duration / speed_multiplier,
            start_offset: 0.0,
            measured_length,
            reverse: desc.effective_reverse(global_reverse),
            skipped,
        });
    }

    let total_duration: Millis = match mode {
        DrawMode::Sequential => segments.iter().map(|s| s.duration_scaled).sum(),
        DrawMode::Parallel => segments
            .iter()
            .map(|s| s.duration_scaled)
            .fold(0.0, f64::max),
    };

    if mode == DrawMode::Sequential {
        if global_reverse {
            let mut remaining = total_duration;
            for seg in &mut segments {
                remaining -= seg.duration_scaled;
                // Keep the last slot pinned at zero despite rounding.
                seg.start_offset = remaining.max(0.0);
            }
        } else {
            let mut cursor = 0.0;
            for seg in &mut segments {
                seg.start_offset = cursor;
                cursor += seg.duration_scaled;
            }
        }
    }

    tracing::debug!(
        total_duration,
        ?mode,
        skipped = missing.len(),
        "timeline built"
    );

    Ok(Timeline {
        segments,
        total_duration,
        mode,
        speed_multiplier,
        missing,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
