use crate::foundation::error::{PentraceError, PentraceResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Host timestamp or duration, in milliseconds.
pub type Millis = f64;

/// Intrinsic drawing-area size of a subject, in SVG user units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width of the drawing area.
    pub width: f64,
    /// Height of the drawing area.
    pub height: f64,
}

impl Dimensions {
    /// Build validated dimensions (both sides finite and > 0).
    pub fn new(width: f64, height: f64) -> PentraceResult<Self> {
        let dims = Self { width, height };
        dims.validate()?;
        Ok(dims)
    }

    /// Reject zero, negative and non-finite sides.
    pub fn validate(&self) -> PentraceResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(PentraceError::invalid_configuration(
                "dimensions width must be > 0",
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(PentraceError::invalid_configuration(
                "dimensions height must be > 0",
            ));
        }
        Ok(())
    }
}

pub(crate) fn ensure_duration(what: &str, ms: Millis) -> PentraceResult<Millis> {
    if !ms.is_finite() || ms < 0.0 {
        return Err(PentraceError::invalid_configuration(format!(
            "{what} must be a finite duration >= 0 (got {ms})"
        )));
    }
    Ok(ms)
}
