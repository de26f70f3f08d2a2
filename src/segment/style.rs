use crate::foundation::error::{PentraceError, PentraceResult};

/// Shape drawn at the open ends of a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end flush with the path endpoint.
    Butt,
    /// Half-disc end.
    #[default]
    Round,
    /// Half-square end extending past the endpoint.
    Square,
}

impl LineCap {
    /// SVG `stroke-linecap` keyword.
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Shape drawn where two stroke pieces meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    #[default]
    Round,
    /// Cut-off corner.
    Bevel,
}

impl LineJoin {
    /// SVG `stroke-linejoin` keyword.
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// Fully resolved stroke appearance for one segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    /// Any CSS color accepted by the output backend.
    pub color: String,
    /// Stroke width in user units.
    pub width: f64,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f64,
    /// End cap.
    pub cap: LineCap,
    /// Corner join.
    pub join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#000".to_string(),
            width: 2.0,
            opacity: 1.0,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

impl StrokeStyle {
    /// Reject negative widths and opacities outside `[0, 1]`.
    pub fn validate(&self) -> PentraceResult<()> {
        if self.color.trim().is_empty() {
            return Err(PentraceError::invalid_configuration(
                "stroke color must be non-empty",
            ));
        }
        if !(self.width.is_finite() && self.width >= 0.0) {
            return Err(PentraceError::invalid_configuration(
                "stroke width must be a finite value >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PentraceError::invalid_configuration(
                "stroke opacity must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Per-segment style overrides. `None` means "inherit"; any present value wins, including `0`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyleOverrides {
    /// Overrides [`StrokeStyle::color`].
    #[serde(
        default,
        rename = "strokeColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<String>,
    /// Overrides [`StrokeStyle::width`].
    #[serde(
        default,
        rename = "strokeWidth",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<f64>,
    /// Overrides [`StrokeStyle::opacity`].
    #[serde(
        default,
        rename = "strokeOpacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub opacity: Option<f64>,
    /// Overrides [`StrokeStyle::cap`].
    #[serde(default, rename = "strokeCap", skip_serializing_if = "Option::is_none")]
    pub cap: Option<LineCap>,
    /// Overrides [`StrokeStyle::join`].
    #[serde(
        default,
        rename = "strokeJoin",
        skip_serializing_if = "Option::is_none"
    )]
    pub join: Option<LineJoin>,
}

impl StrokeStyleOverrides {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.width.is_none()
            && self.opacity.is_none()
            && self.cap.is_none()
            && self.join.is_none()
    }

    /// Layer these overrides on top of `base`.
    pub fn resolve(&self, base: &StrokeStyle) -> StrokeStyle {
        StrokeStyle {
            color: self.color.clone().unwrap_or_else(|| base.color.clone()),
            width: self.width.unwrap_or(base.width),
            opacity: self.opacity.unwrap_or(base.opacity),
            cap: self.cap.unwrap_or(base.cap),
            join: self.join.unwrap_or(base.join),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/style.rs"]
mod tests;
