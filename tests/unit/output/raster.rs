use super::*;
use crate::{
    config::{options::PainterConfig, subject::load_subjects},
    timeline::reveal::{StrokeReveal, StrokeSink},
};

fn frame(fraction: f64) -> SvgFrame {
    let data = r##"{"bar": {"strokepath": [{"path": "M0,5 L20,5", "duration": 100}],
                  "dimensions": {"width": 20, "height": 10}}}"##;
    let subjects = load_subjects(data.as_bytes()).unwrap();
    let cfg = PainterConfig {
        stroke_width: 4.0,
        stroke_cap: crate::segment::style::LineCap::Butt,
        ..PainterConfig::default()
    };
    let mut f = SvgFrame::new(&subjects["bar"], &cfg).unwrap();
    f.apply(0, &StrokeReveal::new(fraction, 20.0, false));
    f
}

#[test]
fn half_revealed_stroke_covers_the_left_half() {
    let img = render_rgba(&frame(0.5)).unwrap();
    assert_eq!(img.dimensions(), (20, 10));
    assert_eq!(img.get_pixel(4, 5).0[3], 255);
    assert_eq!(img.get_pixel(15, 5).0[3], 0);
    assert_eq!(img.get_pixel(4, 0).0[3], 0);
}

#[test]
fn complete_stroke_spans_the_width() {
    let img = render_rgba(&frame(1.0)).unwrap();
    assert_eq!(img.get_pixel(1, 5).0[3], 255);
    assert_eq!(img.get_pixel(18, 5).0[3], 255);
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut px = [64u8, 0, 0, 128, 9, 9, 9, 0];
    unpremultiply_in_place(&mut px);
    assert_eq!(px, [128, 0, 0, 128, 0, 0, 0, 0]);
}

#[test]
fn rejects_zero_or_huge_sizes() {
    assert!(to_px(0.0).is_err());
    assert!(to_px(f64::NAN).is_err());
    assert!(to_px(20_000.0).is_err());
    assert_eq!(to_px(10.2).unwrap(), 11);
}
