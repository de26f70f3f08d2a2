//! Pentrace animates SVG-style paths as if a pen were drawing them.
//!
//! Each path segment is revealed progressively over a duration, either one after another
//! (sequential) or all at once (parallel), optionally reversed and sped up or slowed down.
//!
//! # Pipeline overview
//!
//! 1. **Schedule**: `[SegmentDescriptor] + LengthMeasure -> Timeline` (offsets, scaled durations,
//!    measured lengths)
//! 2. **Reveal**: `Timeline + elapsed -> StrokeReveal` per segment (pure, linear in time)
//! 3. **Drive**: [`PlaybackController`] turns host frame ticks into reveals pushed to a
//!    [`StrokeSink`], with pause/resume, delay, and start/completion hooks
//! 4. **Output** (optional): [`SvgFrame`] renders the current reveals as an SVG document,
//!    rasterized to PNG with [`render_rgba`] / [`write_png`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No ambient clock**: frames come from an injected [`FrameScheduler`]; tests and the CLI use
//!   [`VirtualFrameClock`].
//! - **Explicit state**: subjects live in a [`Painter`] registry owned by the caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod clock;
mod config;
mod foundation;
mod geometry;
mod output;
mod playback;
mod segment;
mod timeline;

pub use clock::elapsed::ElapsedClock;
pub use clock::frame::{FrameHandle, FrameScheduler};
pub use clock::virtual_clock::VirtualFrameClock;
pub use config::options::PainterConfig;
pub use config::subject::{StrokePathDef, SubjectData, SubjectMap, load_subjects};
pub use foundation::core::{BezPath, Dimensions, Millis, Point, Vec2};
pub use foundation::error::{PentraceError, PentraceResult};
pub use geometry::measure::{DEFAULT_ARCLEN_ACCURACY, KurboMeasure, LengthMeasure, PathGeometry};
pub use output::raster::{render_rgba, write_png};
pub use output::svg::SvgFrame;
pub use playback::controller::{
    FrameOutcome, PlaybackController, PlaybackHooks, PlaybackOptions, PlaybackPhase,
};
pub use playback::registry::{Painter, Subject, SubjectController};
pub use segment::model::SegmentDescriptor;
pub use segment::style::{LineCap, LineJoin, StrokeStyle, StrokeStyleOverrides};
pub use timeline::reveal::{RecordingSink, StrokeReveal, StrokeSink, visible_fraction};
pub use timeline::schedule::{
    DrawMode, ScheduledSegment, SkippedSegment, Timeline, build_timeline,
};
