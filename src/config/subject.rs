use std::{collections::BTreeMap, io::Read};

use crate::{
    foundation::core::{Dimensions, Millis, ensure_duration},
    foundation::error::{PentraceError, PentraceResult},
    segment::model::SegmentDescriptor,
    segment::style::StrokeStyleOverrides,
};

/// Input data keyed by subject.
pub type SubjectMap = BTreeMap<String, SubjectData>;

/// Paths and drawing area of one animated subject.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubjectData {
    /// Segments in draw order.
    pub strokepath: Vec<StrokePathDef>,
    /// Intrinsic drawing-area size.
    pub dimensions: Dimensions,
}

/// One entry of a subject's `strokepath` list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokePathDef {
    /// SVG path data.
    pub path: String,
    /// Unscaled draw duration (ms).
    pub duration: Millis,
    /// Per-segment reverse override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    /// Per-segment style overrides.
    #[serde(flatten)]
    pub style: StrokeStyleOverrides,
}

impl SubjectData {
    /// Structural checks; geometry problems are reported later, per segment, at schedule time.
    pub fn validate(&self) -> PentraceResult<()> {
        self.dimensions.validate()?;
        for (i, def) in self.strokepath.iter().enumerate() {
            ensure_duration(&format!("strokepath[{i}] duration"), def.duration)?;
        }
        Ok(())
    }

    /// Segment descriptors whose geometry is the raw path data.
    pub fn descriptors(&self) -> Vec<SegmentDescriptor<String>> {
        self.strokepath
            .iter()
            .map(|def| SegmentDescriptor {
                geometry: def.path.clone(),
                duration: def.duration,
                reverse: def.reverse,
                style: def.style.clone(),
            })
            .collect()
    }
}

/// Parse a JSON subject map.
pub fn load_subjects(r: impl Read) -> PentraceResult<SubjectMap> {
    let subjects: SubjectMap = serde_json::from_reader(r)
        .map_err(|e| PentraceError::serde(format!("parse subject data: {e}")))?;
    for (key, data) in &subjects {
        data.validate().map_err(|e| match e {
            PentraceError::InvalidConfiguration(msg) => {
                PentraceError::invalid_configuration(format!("subject '{key}': {msg}"))
            }
            other => other,
        })?;
    }
    Ok(subjects)
}

#[cfg(test)]
#[path = "../../tests/unit/config/subject.rs"]
mod tests;
