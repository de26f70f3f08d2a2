use kurbo::{ParamCurve, ParamCurveArclen};

use crate::{
    foundation::core::{BezPath, Point, Vec2},
    foundation::error::{PentraceError, PentraceResult},
};

/// Arc-length tolerance used when none is given.
pub const DEFAULT_ARCLEN_ACCURACY: f64 = 1e-3;

/// Caller-supplied length measurement for a geometry handle.
///
/// Returning [`PentraceError::MissingGeometry`] marks the segment as skipped instead of aborting
/// the whole timeline.
pub trait LengthMeasure<G: ?Sized> {
    /// Total traceable length of `geometry` (>= 0).
    fn measure(&self, geometry: &G) -> PentraceResult<f64>;
}

impl<G: ?Sized, F> LengthMeasure<G> for F
where
    F: Fn(&G) -> PentraceResult<f64>,
{
    fn measure(&self, geometry: &G) -> PentraceResult<f64> {
        self(geometry)
    }
}

/// A parsed path with arc-length queries.
#[derive(Clone, Debug)]
pub struct PathGeometry {
    path: BezPath,
}

impl PathGeometry {
    /// Parse SVG path data (`d` attribute syntax).
    pub fn parse(d: &str) -> PentraceResult<Self> {
        if d.trim().is_empty() {
            return Err(PentraceError::missing_geometry("path data is empty"));
        }
        let path = BezPath::from_svg(d)
            .map_err(|e| PentraceError::missing_geometry(format!("invalid path data: {e}")))?;
        Self::from_path(path)
    }

    /// Wrap an already-built path. Paths without any element are rejected.
    pub fn from_path(path: BezPath) -> PentraceResult<Self> {
        if path.elements().is_empty() {
            return Err(PentraceError::missing_geometry("path has no elements"));
        }
        Ok(Self { path })
    }

    /// Underlying kurbo path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Serialize back to SVG path data.
    pub fn to_svg(&self) -> String {
        self.path.to_svg()
    }

    /// Total arc length, summed over every drawable segment.
    pub fn length(&self, accuracy: f64) -> f64 {
        self.path.segments().map(|seg| seg.arclen(accuracy)).sum()
    }

    /// Point and unit tangent at `distance` along the path, clamped to the path's extent.
    ///
    /// Returns `None` for paths that have nothing to draw (for example a lone `M`).
    pub fn point_at_length(&self, distance: f64, accuracy: f64) -> Option<(Point, Vec2)> {
        let mut remaining = distance.max(0.0);
        let mut last = None;
        for seg in self.path.segments() {
            let len = seg.arclen(accuracy);
            if remaining <= len && len > 0.0 {
                let t = seg.inv_arclen(remaining, accuracy);
                return Some((seg.eval(t), tangent(&seg, t)));
            }
            remaining -= len;
            last = Some(seg);
        }
        let seg = last?;
        Some((seg.eval(1.0), tangent(&seg, 1.0)))
    }
}

fn tangent(seg: &kurbo::PathSeg, t: f64) -> Vec2 {
    const H: f64 = 1e-4;
    let a = seg.eval((t - H).max(0.0));
    let b = seg.eval((t + H).min(1.0));
    let d = b - a;
    let len = d.hypot();
    if len <= f64::EPSILON {
        return Vec2::new(1.0, 0.0);
    }
    d / len
}

/// Measures SVG path data and parsed paths with kurbo's arc-length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KurboMeasure {
    /// Arc-length tolerance.
    pub accuracy: f64,
}

impl Default for KurboMeasure {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ARCLEN_ACCURACY,
        }
    }
}

impl LengthMeasure<PathGeometry> for KurboMeasure {
    fn measure(&self, geometry: &PathGeometry) -> PentraceResult<f64> {
        let len = geometry.length(self.accuracy);
        if !len.is_finite() {
            return Err(PentraceError::missing_geometry("path length is not finite"));
        }
        Ok(len)
    }
}

impl LengthMeasure<str> for KurboMeasure {
    #[tracing::instrument(level = "trace", skip(self, geometry))]
    fn measure(&self, geometry: &str) -> PentraceResult<f64> {
        let parsed = PathGeometry::parse(geometry)?;
        <Self as LengthMeasure<PathGeometry>>::measure(self, &parsed)
    }
}

impl LengthMeasure<String> for KurboMeasure {
    fn measure(&self, geometry: &String) -> PentraceResult<f64> {
        <Self as LengthMeasure<str>>::measure(self, geometry.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/measure.rs"]
mod tests;
