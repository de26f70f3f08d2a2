use crate::{
    foundation::core::Millis,
    timeline::schedule::{DrawMode, ScheduledSegment},
};

/// Fraction of `segment` revealed at `timeline_elapsed`, in `[0, 1]`.
///
/// Pure and linear in time: the same inputs always give the same result. Direction is not
/// applied here; see [`StrokeReveal`].
pub fn visible_fraction(segment: &ScheduledSegment, timeline_elapsed: Millis, mode: DrawMode) -> f64 {
    if segment.skipped {
        return 1.0;
    }
    if segment.duration_scaled <= 0.0 {
        return if timeline_elapsed >= segment.start_offset {
            1.0
        } else {
            0.0
        };
    }

    let local = match mode {
        DrawMode::Sequential => (timeline_elapsed - segment.start_offset).max(0.0),
        DrawMode::Parallel => timeline_elapsed,
    };

    if local.is_nan() || local <= 0.0 {
        0.0
    } else if local < segment.duration_scaled {
        (local / segment.duration_scaled).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Dash parameters that show `fraction` of a stroke of length `length`.
///
/// The stroke is dashed with a single dash as long as the path; shifting the dash offset by the
/// hidden length hides the tail. A negative offset hides from the other end, so reversed strokes
/// grow from the path's final point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StrokeReveal {
    /// Visible fraction in `[0, 1]`.
    pub fraction: f64,
    /// Full stroke length.
    pub length: f64,
    /// Sweep starts from the path's end point.
    pub reverse: bool,
}

impl StrokeReveal {
    /// Reveal for an arbitrary stroke.
    pub fn new(fraction: f64, length: f64, reverse: bool) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            length: length.max(0.0),
            reverse,
        }
    }

    /// Reveal for a scheduled segment at a given fraction.
    pub fn for_segment(segment: &ScheduledSegment, fraction: f64) -> Self {
        Self::new(fraction, segment.measured_length, segment.reverse)
    }

    /// `stroke-dasharray` value (dash and gap both span the whole path).
    pub fn dash_array(&self) -> f64 {
        self.length
    }

    /// `stroke-dashoffset` value.
    pub fn dash_offset(&self) -> f64 {
        let hidden = self.length * (1.0 - self.fraction);
        if self.reverse { -hidden } else { hidden }
    }

    /// Length currently drawn.
    pub fn visible_length(&self) -> f64 {
        self.length * self.fraction
    }

    /// Distance from the path start to the moving pen tip.
    pub fn tip_distance(&self) -> f64 {
        if self.reverse {
            self.length - self.visible_length()
        } else {
            self.visible_length()
        }
    }

    /// Nothing drawn.
    pub fn is_hidden(&self) -> bool {
        self.fraction <= 0.0
    }

    /// Fully drawn.
    pub fn is_complete(&self) -> bool {
        self.fraction >= 1.0
    }
}

/// Receives per-segment reveal updates.
///
/// Applying the same reveal twice must not change the rendered result.
pub trait StrokeSink {
    /// Show segment `index` as described by `reveal`.
    fn apply(&mut self, index: usize, reveal: &StrokeReveal);

    /// Remove everything previously drawn.
    fn clear(&mut self);
}

impl<T: StrokeSink + ?Sized> StrokeSink for &mut T {
    fn apply(&mut self, index: usize, reveal: &StrokeReveal) {
        (**self).apply(index, reveal);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Sink that keeps the latest reveal per segment and counts apply calls.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    latest: Vec<Option<StrokeReveal>>,
    applied: usize,
    clears: usize,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest reveal for `index`, if any since the last clear.
    pub fn get(&self, index: usize) -> Option<&StrokeReveal> {
        self.latest.get(index).and_then(Option::as_ref)
    }

    /// Latest fraction per segment (`0.0` for segments never applied).
    pub fn fractions(&self, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| self.get(i).map_or(0.0, |r| r.fraction))
            .collect()
    }

    /// Total number of `apply` calls.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Total number of `clear` calls.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl StrokeSink for RecordingSink {
    fn apply(&mut self, index: usize, reveal: &StrokeReveal) {
        if self.latest.len() <= index {
            self.latest.resize(index + 1, None);
        }
        self.latest[index] = Some(*reveal);
        self.applied += 1;
    }

    fn clear(&mut self) {
        self.latest.clear();
        self.clears += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/reveal.rs"]
mod tests;
