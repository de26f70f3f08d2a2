use super::*;
use crate::segment::style::LineCap;

const DATA: &str = r##"{
    "logo": {
        "strokepath": [
            { "path": "M0,0 L100,0", "duration": 600 },
            { "path": "M100,0 L100,50", "duration": 300, "reverse": true,
              "strokeColor": "#f00", "strokeWidth": 0, "strokeCap": "butt" }
        ],
        "dimensions": { "width": 120, "height": 60 }
    },
    "empty": {
        "strokepath": [],
        "dimensions": { "width": 1, "height": 1 }
    }
}"##;

#[test]
fn parses_subjects_with_per_segment_overrides() {
    let subjects = load_subjects(DATA.as_bytes()).unwrap();
    assert_eq!(subjects.len(), 2);

    let logo = &subjects["logo"];
    assert_eq!(logo.dimensions, Dimensions::new(120.0, 60.0).unwrap());
    assert_eq!(logo.strokepath.len(), 2);
    assert!(logo.strokepath[0].style.is_empty());

    let second = &logo.strokepath[1];
    assert_eq!(second.reverse, Some(true));
    assert_eq!(second.style.color.as_deref(), Some("#f00"));
    assert_eq!(second.style.width, Some(0.0));
    assert_eq!(second.style.cap, Some(LineCap::Butt));
}

#[test]
fn descriptors_carry_path_duration_and_overrides() {
    let subjects = load_subjects(DATA.as_bytes()).unwrap();
    let descs = subjects["logo"].descriptors();
    assert_eq!(descs.len(), 2);
    assert_eq!(descs[0].geometry, "M0,0 L100,0");
    assert_eq!(descs[0].duration, 600.0);
    assert_eq!(descs[0].reverse, None);
    assert_eq!(descs[1].reverse, Some(true));
    assert_eq!(descs[1].style.width, Some(0.0));
}

#[test]
fn rejects_negative_durations_and_bad_dimensions() {
    let neg = r#"{"a": {"strokepath": [{"path": "M0,0 L1,1", "duration": -1}],
                      "dimensions": {"width": 1, "height": 1}}}"#;
    let err = load_subjects(neg.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        PentraceError::InvalidConfiguration(ref m)
            if m.starts_with("subject 'a': strokepath[0] duration") && m.contains("(got -1)")
    ));

    let dims = r#"{"a": {"strokepath": [], "dimensions": {"width": 0, "height": 1}}}"#;
    assert!(matches!(
        load_subjects(dims.as_bytes()),
        Err(PentraceError::InvalidConfiguration(_))
    ));
}

#[test]
fn missing_fields_are_serde_errors() {
    let no_dims = r#"{"a": {"strokepath": []}}"#;
    assert!(matches!(
        load_subjects(no_dims.as_bytes()),
        Err(PentraceError::Serde(_))
    ));
}
