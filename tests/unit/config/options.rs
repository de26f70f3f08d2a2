use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = PainterConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PainterConfig::default());
    assert_eq!(cfg.stroke_width, 2.0);
    assert_eq!(cfg.stroke_color, "#000");
    assert_eq!(cfg.speed_multiplier, 1.0);
    assert_eq!(cfg.playback_options().mode, DrawMode::Parallel);
}

#[test]
fn camel_case_keys_are_recognized() {
    let cfg = PainterConfig::from_json_str(
        r##"{
            "strokeWidth": 4,
            "strokeColor": "#e09b99",
            "strokeOverColor": "#ff0",
            "strokeCap": "square",
            "strokeJoin": "bevel",
            "strokeOpacity": 0.5,
            "arrowEnd": true,
            "delay": 250,
            "overrideKey": "logo",
            "drawSequential": true,
            "speedMultiplier": 2,
            "reverse": true,
            "responsive": true,
            "width": 320,
            "height": 200,
            "onComplete": "ignored"
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.stroke_over_color.as_deref(), Some("#ff0"));
    assert_eq!(cfg.override_key.as_deref(), Some("logo"));
    assert!(cfg.arrow_end && cfg.responsive);
    assert_eq!(cfg.width, Some(320.0));

    let style = cfg.base_style();
    assert_eq!(style.width, 4.0);
    assert_eq!(style.cap, LineCap::Square);
    assert_eq!(style.join, LineJoin::Bevel);

    let opts = cfg.playback_options();
    assert_eq!(opts.mode, DrawMode::Sequential);
    assert_eq!(opts.speed_multiplier, 2.0);
    assert!(opts.reverse);
    assert_eq!(opts.delay, 250.0);
}

#[test]
fn explicit_zero_width_is_kept() {
    let cfg = PainterConfig::from_json_str(r#"{"strokeWidth": 0}"#).unwrap();
    assert_eq!(cfg.base_style().width, 0.0);
}

#[test]
fn rejects_unplayable_values() {
    for json in [
        r#"{"speedMultiplier": 0}"#,
        r#"{"speedMultiplier": -2}"#,
        r#"{"delay": -1}"#,
        r#"{"strokeOpacity": 2}"#,
        r#"{"width": 0}"#,
        r#"{"overrideKey": ""}"#,
    ] {
        let err = PainterConfig::from_json_str(json).unwrap_err();
        assert!(
            matches!(err, PentraceError::InvalidConfiguration(_)),
            "{json}: {err}"
        );
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PainterConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, PentraceError::Serde(_)));
    let err = PainterConfig::from_json_str(r#"{"reverse": "yes"}"#).unwrap_err();
    assert!(matches!(err, PentraceError::Serde(_)));
}
