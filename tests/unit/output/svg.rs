use super::*;
use crate::config::subject::load_subjects;

const DATA: &str = r##"{
    "logo": {
        "strokepath": [
            { "path": "M0,0 L100,0", "duration": 600 },
            { "path": "M0,10 L50,10", "duration": 300, "strokeColor": "#f00", "strokeWidth": 4 }
        ],
        "dimensions": { "width": 120, "height": 60 }
    }
}"##;

fn logo() -> SubjectData {
    load_subjects(DATA.as_bytes()).unwrap().remove("logo").unwrap()
}

#[test]
fn unapplied_segments_are_left_out() {
    let frame = SvgFrame::new(&logo(), &PainterConfig::default()).unwrap();
    let svg = frame.to_svg_string();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 120 60" width="120" height="60""#));
    assert!(!svg.contains("<path"));
}

#[test]
fn applied_reveal_sets_dash_attributes_and_resolved_style() {
    let mut frame = SvgFrame::new(&logo(), &PainterConfig::default()).unwrap();
    frame.apply(0, &StrokeReveal::new(0.25, 100.0, false));
    frame.apply(1, &StrokeReveal::new(1.0, 50.0, false));
    let svg = frame.to_svg_string();

    assert!(svg.contains(r#"stroke-dasharray="100 100" stroke-dashoffset="75""#));
    assert!(svg.contains(r##"stroke="#f00" stroke-width="4""##));
    assert!(svg.contains(r#"stroke-dasharray="50 50" stroke-dashoffset="0""#));
    assert_eq!(frame.reveal(0).map(|r| r.fraction), Some(0.25));
}

#[test]
fn reversed_reveal_uses_negative_offset_and_hidden_is_marked() {
    let mut frame = SvgFrame::new(&logo(), &PainterConfig::default()).unwrap();
    frame.apply(0, &StrokeReveal::new(0.5, 100.0, true));
    frame.apply(1, &StrokeReveal::new(0.0, 50.0, false));
    let svg = frame.to_svg_string();
    assert!(svg.contains(r#"stroke-dashoffset="-50""#));
    assert!(svg.contains(r#"visibility="hidden""#));
}

#[test]
fn clear_removes_everything() {
    let mut frame = SvgFrame::new(&logo(), &PainterConfig::default()).unwrap();
    frame.apply(0, &StrokeReveal::new(1.0, 100.0, false));
    frame.clear();
    assert!(frame.reveal(0).is_none());
    assert!(!frame.to_svg_string().contains("<path"));
}

#[test]
fn responsive_and_explicit_size() {
    let cfg = PainterConfig {
        responsive: true,
        width: Some(240.0),
        height: Some(120.0),
        ..PainterConfig::default()
    };
    let frame = SvgFrame::new(&logo(), &cfg).unwrap();
    assert!(frame.to_svg_string().contains(r#"width="100%""#));
    assert!(
        frame
            .to_fixed_svg_string()
            .contains(r#"width="240" height="120""#)
    );
    assert_eq!(frame.pixel_size(), (240.0, 120.0));
}

#[test]
fn over_color_draws_static_base_under_animated_stroke() {
    let cfg = PainterConfig {
        stroke_over_color: Some("#0af".to_string()),
        ..PainterConfig::default()
    };
    let mut frame = SvgFrame::new(&logo(), &cfg).unwrap();
    frame.apply(0, &StrokeReveal::new(0.5, 100.0, false));
    let svg = frame.to_svg_string();
    assert_eq!(svg.matches("<path").count(), 2);
    assert!(svg.contains(r##"stroke="#000""##));
    assert!(svg.contains(r##"stroke="#0af""##));
}

#[test]
fn arrow_sits_at_the_pen_tip() {
    let cfg = PainterConfig {
        arrow_end: true,
        ..PainterConfig::default()
    };
    let mut frame = SvgFrame::new(&logo(), &cfg).unwrap();
    frame.apply(0, &StrokeReveal::new(0.5, 100.0, false));
    let svg = frame.to_svg_string();
    // Default width 2 gives a 6px arrow pointing along +x.
    assert!(svg.contains(r#"<polygon points="50,0 44,3 44,-3""#));

    frame.apply(0, &StrokeReveal::new(0.0, 100.0, false));
    assert!(!frame.to_svg_string().contains("<polygon"));
}

#[test]
fn number_formatting_and_escaping() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(0.12345), "0.123");
    assert_eq!(num(-0.0001), "0");
    assert_eq!(escape_attr(r#"a"<&>"#), "a&quot;&lt;&amp;&gt;");
}

#[test]
fn unparsable_path_data_is_never_emitted() {
    let data = r##"{"x": {"strokepath": [
        { "path": "not a path", "duration": 100 },
        { "path": "M0,0 L10,0", "duration": 100 }
    ], "dimensions": { "width": 10, "height": 10 }}}"##;
    let subject = load_subjects(data.as_bytes()).unwrap().remove("x").unwrap();
    let cfg = PainterConfig {
        arrow_end: true,
        ..PainterConfig::default()
    };
    let mut frame = SvgFrame::new(&subject, &cfg).unwrap();
    // Skipped segments are reported complete with zero length.
    frame.apply(0, &StrokeReveal::new(1.0, 0.0, false));
    frame.apply(1, &StrokeReveal::new(1.0, 10.0, false));

    let svg = frame.to_svg_string();
    assert!(!svg.contains("not a path"));
    assert_eq!(svg.matches("<path").count(), 1);
    assert!(svg.contains(r#"d="M0,0 L10,0""#));
    assert_eq!(frame.reveal(0).map(|r| r.fraction), Some(1.0));
}
