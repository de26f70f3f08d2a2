use std::fmt::Write as _;

use crate::{
    config::options::PainterConfig,
    config::subject::SubjectData,
    foundation::core::{Dimensions, Point, Vec2},
    foundation::error::PentraceResult,
    geometry::measure::{DEFAULT_ARCLEN_ACCURACY, PathGeometry},
    segment::style::StrokeStyle,
    timeline::reveal::{StrokeReveal, StrokeSink},
};

struct SvgSegment {
    d: String,
    // Path data failed to parse; the segment is never emitted.
    unparsable: bool,
    style: StrokeStyle,
    geometry: Option<PathGeometry>,
    reveal: Option<StrokeReveal>,
}

/// Render sink that keeps one SVG path element per segment.
///
/// Reveals are applied with `stroke-dasharray` / `stroke-dashoffset`. Segments that have not
/// been applied since construction or the last [`StrokeSink::clear`] are left out of the
/// document, and so are segments whose path data does not parse.
pub struct SvgFrame {
    dimensions: Dimensions,
    width: f64,
    height: f64,
    responsive: bool,
    over_color: Option<String>,
    arrow_end: bool,
    segments: Vec<SvgSegment>,
}

impl SvgFrame {
    /// Frame for `data` styled by `config`.
    pub fn new(data: &SubjectData, config: &PainterConfig) -> PentraceResult<Self> {
        data.dimensions.validate()?;
        let base = config.base_style();
        let segments = data
            .strokepath
            .iter()
            .map(|def| {
                let parsed = PathGeometry::parse(&def.path).ok();
                SvgSegment {
                    d: def.path.clone(),
                    unparsable: parsed.is_none(),
                    style: def.style.resolve(&base),
                    geometry: parsed.filter(|_| config.arrow_end),
                    reveal: None,
                }
            })
            .collect();
        Ok(Self {
            dimensions: data.dimensions,
            width: config.width.unwrap_or(data.dimensions.width),
            height: config.height.unwrap_or(data.dimensions.height),
            responsive: config.responsive,
            over_color: config.stroke_over_color.clone(),
            arrow_end: config.arrow_end,
            segments,
        })
    }

    /// Latest reveal applied to segment `index`.
    pub fn reveal(&self, index: usize) -> Option<&StrokeReveal> {
        self.segments.get(index).and_then(|s| s.reveal.as_ref())
    }

    /// Document honoring the `responsive` option.
    pub fn to_svg_string(&self) -> String {
        self.document(self.responsive)
    }

    /// Document with explicit pixel width and height (used for rasterization).
    pub fn to_fixed_svg_string(&self) -> String {
        self.document(false)
    }

    /// Output size in pixels.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn document(&self, responsive: bool) -> String {
        let mut out = String::new();
        let Dimensions { width, height } = self.dimensions;
        if responsive {
            let _ = write!(
                out,
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%" preserveAspectRatio="xMidYMid meet">"#,
                num(width),
                num(height)
            );
        } else {
            let _ = write!(
                out,
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
                num(width),
                num(height),
                num(self.width),
                num(self.height)
            );
        }
        out.push('\n');

        for seg in self.segments.iter().filter(|s| !s.unparsable) {
            let Some(reveal) = seg.reveal else {
                continue;
            };
            if let Some(over) = &self.over_color {
                write_path(&mut out, &seg.d, &seg.style, &seg.style.color, None);
                write_path(&mut out, &seg.d, &seg.style, over, Some(&reveal));
            } else {
                write_path(&mut out, &seg.d, &seg.style, &seg.style.color, Some(&reveal));
            }
            if self.arrow_end
                && !reveal.is_hidden()
                && let Some(geometry) = &seg.geometry
            {
                let color = self.over_color.as_deref().unwrap_or(&seg.style.color);
                write_arrow(&mut out, geometry, &reveal, &seg.style, color);
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

impl StrokeSink for SvgFrame {
    fn apply(&mut self, index: usize, reveal: &StrokeReveal) {
        if let Some(seg) = self.segments.get_mut(index) {
            seg.reveal = Some(*reveal);
        }
    }

    fn clear(&mut self) {
        for seg in &mut self.segments {
            seg.reveal = None;
        }
    }
}

fn write_path(
    out: &mut String,
    d: &str,
    style: &StrokeStyle,
    color: &str,
    reveal: Option<&StrokeReveal>,
) {
    let _ = write!(
        out,
        r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-linecap="{}" stroke-linejoin="{}""#,
        escape_attr(d),
        escape_attr(color),
        num(style.width),
        num(style.opacity),
        style.cap.as_svg(),
        style.join.as_svg(),
    );
    if let Some(r) = reveal {
        let dash = r.dash_array();
        let _ = write!(
            out,
            r#" stroke-dasharray="{} {}" stroke-dashoffset="{}""#,
            num(dash),
            num(dash),
            num(r.dash_offset())
        );
        if r.is_hidden() {
            out.push_str(r#" visibility="hidden""#);
        }
    }
    out.push_str("/>\n");
}

fn write_arrow(
    out: &mut String,
    geometry: &PathGeometry,
    reveal: &StrokeReveal,
    style: &StrokeStyle,
    color: &str,
) {
    let Some((tip, tangent)) = geometry.point_at_length(reveal.tip_distance(), DEFAULT_ARCLEN_ACCURACY)
    else {
        return;
    };
    let dir = if reveal.reverse { -tangent } else { tangent };
    let size = (style.width * 3.0).max(4.0);
    let back = tip - dir * size;
    let normal = Vec2::new(-dir.y, dir.x) * (size * 0.5);
    let pts: [Point; 3] = [tip, back + normal, back - normal];
    let _ = write!(
        out,
        r#"  <polygon points="{},{} {},{} {},{}" fill="{}" fill-opacity="{}"/>"#,
        num(pts[0].x),
        num(pts[0].y),
        num(pts[1].x),
        num(pts[1].y),
        num(pts[2].x),
        num(pts[2].y),
        escape_attr(color),
        num(style.opacity)
    );
    out.push('\n');
}

/// Compact decimal: at most 3 fractional digits, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/output/svg.rs"]
mod tests;
