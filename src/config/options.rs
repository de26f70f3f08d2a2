use std::io::Read;

use crate::{
    foundation::core::{Millis, ensure_duration},
    foundation::error::{PentraceError, PentraceResult},
    playback::controller::PlaybackOptions,
    segment::style::{LineCap, LineJoin, StrokeStyle},
    timeline::schedule::DrawMode,
};

/// Options recognized when initializing a subject.
///
/// Missing keys take the defaults below; unknown keys (such as `onStart` left over from a
/// browser configuration) are ignored. Start and completion callbacks are not data and are
/// passed separately as [`crate::PlaybackHooks`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PainterConfig {
    /// Default stroke width.
    pub stroke_width: f64,
    /// Default stroke color.
    pub stroke_color: String,
    /// Color of the animated stroke drawn over a static full-length base in `stroke_color`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_over_color: Option<String>,
    /// Default end cap.
    pub stroke_cap: LineCap,
    /// Default corner join.
    pub stroke_join: LineJoin,
    /// Default stroke opacity.
    pub stroke_opacity: f64,
    /// Draw an arrowhead at the moving pen tip.
    pub arrow_end: bool,
    /// Wait (ms) between play and the start of drawing.
    pub delay: Millis,
    /// Look up subject data under this key instead of the subject's own key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_key: Option<String>,
    /// Draw segments one after another instead of all at once.
    pub draw_sequential: bool,
    /// Playback speed (`2.0` is twice as fast).
    pub speed_multiplier: f64,
    /// Sweep every stroke from its far end.
    pub reverse: bool,
    /// Emit a `viewBox`-only document that scales with its container.
    pub responsive: bool,
    /// Output width; defaults to the subject's dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Output height; defaults to the subject's dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Default for PainterConfig {
    fn default() -> Self {
        let style = StrokeStyle::default();
        Self {
            stroke_width: style.width,
            stroke_color: style.color,
            stroke_over_color: None,
            stroke_cap: style.cap,
            stroke_join: style.join,
            stroke_opacity: style.opacity,
            arrow_end: false,
            delay: 0.0,
            override_key: None,
            draw_sequential: false,
            speed_multiplier: 1.0,
            reverse: false,
            responsive: false,
            width: None,
            height: None,
        }
    }
}

impl PainterConfig {
    /// Parse a JSON configuration.
    pub fn from_reader(r: impl Read) -> PentraceResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PentraceError::serde(format!("parse painter config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON configuration from a string.
    pub fn from_json_str(s: &str) -> PentraceResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Reject values the engine cannot play.
    pub fn validate(&self) -> PentraceResult<()> {
        self.base_style().validate()?;
        self.playback_options().validate()?;
        if let Some(color) = &self.stroke_over_color
            && color.trim().is_empty()
        {
            return Err(PentraceError::invalid_configuration(
                "strokeOverColor must be non-empty when set",
            ));
        }
        if let Some(key) = &self.override_key
            && key.trim().is_empty()
        {
            return Err(PentraceError::invalid_configuration(
                "overrideKey must be non-empty when set",
            ));
        }
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = v
                && !(v.is_finite() && v > 0.0)
            {
                return Err(PentraceError::invalid_configuration(format!(
                    "{name} must be > 0 when set"
                )));
            }
        }
        ensure_duration("delay", self.delay)?;
        Ok(())
    }

    /// Style that segments inherit unless they override it.
    pub fn base_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color.clone(),
            width: self.stroke_width,
            opacity: self.stroke_opacity,
            cap: self.stroke_cap,
            join: self.stroke_join,
        }
    }

    /// Scheduling parameters derived from this configuration.
    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            mode: DrawMode::from_sequential_flag(self.draw_sequential),
            speed_multiplier: self.speed_multiplier,
            reverse: self.reverse,
            delay: self.delay,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
