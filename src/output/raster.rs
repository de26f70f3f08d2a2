use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{PentraceError, PentraceResult},
    output::svg::SvgFrame,
};

const MAX_DIM: u32 = 16_384;

/// Rasterize the frame at its pixel size into straight-alpha RGBA8.
pub fn render_rgba(frame: &SvgFrame) -> PentraceResult<image::RgbaImage> {
    let (w, h) = frame.pixel_size();
    let width = to_px(w)?;
    let height = to_px(h)?;

    let svg = frame.to_fixed_svg_string();
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).context("parse svg frame")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PentraceError::Other(anyhow::anyhow!("failed to allocate pixmap")))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut straight = pixmap.take();
    unpremultiply_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(width, height, straight)
        .ok_or_else(|| PentraceError::Other(anyhow::anyhow!("invalid rgba buffer size")))?;
    Ok(img)
}

/// Rasterize the frame and write it as PNG.
#[tracing::instrument(level = "debug", skip(frame))]
pub fn write_png(frame: &SvgFrame, path: &Path) -> PentraceResult<()> {
    let img = render_rgba(frame)?;
    img.save(path)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn to_px(v: f64) -> PentraceResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(PentraceError::invalid_configuration(
            "output width/height must be > 0",
        ));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(PentraceError::invalid_configuration(format!(
            "output size {px} exceeds {MAX_DIM}"
        )));
    }
    Ok(px)
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/raster.rs"]
mod tests;
