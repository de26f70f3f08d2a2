use std::collections::BTreeMap;

use crate::{
    clock::frame::{FrameHandle, FrameScheduler},
    config::options::PainterConfig,
    config::subject::{SubjectData, SubjectMap},
    foundation::core::Millis,
    foundation::error::{PentraceError, PentraceResult},
    geometry::measure::KurboMeasure,
    playback::controller::{FrameOutcome, PlaybackController, PlaybackHooks},
    timeline::reveal::StrokeSink,
    timeline::schedule::Timeline,
};

/// Controller type used for subjects loaded from JSON path data.
pub type SubjectController<S> = PlaybackController<String, KurboMeasure, S>;

/// One initialized subject: its configuration, input data and playback state.
#[derive(Debug)]
pub struct Subject<S> {
    key: String,
    config: PainterConfig,
    data: SubjectData,
    controller: SubjectController<S>,
}

impl<S: FrameScheduler> Subject<S> {
    /// Subject key this entry was initialized under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Effective configuration.
    pub fn config(&self) -> &PainterConfig {
        &self.config
    }

    /// Input data (looked up by `overrideKey` when configured).
    pub fn data(&self) -> &SubjectData {
        &self.data
    }

    /// Playback state.
    pub fn controller(&self) -> &SubjectController<S> {
        &self.controller
    }

    /// Mutable playback state.
    pub fn controller_mut(&mut self) -> &mut SubjectController<S> {
        &mut self.controller
    }
}

/// Explicit map from subject key to owned playback state.
///
/// Each subject owns its own frame scheduler and timeline; operations on one subject never
/// touch another.
#[derive(Debug)]
pub struct Painter<S> {
    subjects: BTreeMap<String, Subject<S>>,
}

impl<S> Default for Painter<S> {
    fn default() -> Self {
        Self {
            subjects: BTreeMap::new(),
        }
    }
}

impl<S: FrameScheduler> Painter<S> {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) the playback state for `subject_key`.
    ///
    /// Input data is looked up under `config.override_key` when set, else under `subject_key`.
    #[tracing::instrument(level = "debug", skip(self, config, subjects, scheduler, hooks))]
    pub fn initialize(
        &mut self,
        subject_key: &str,
        config: PainterConfig,
        subjects: &SubjectMap,
        scheduler: S,
        hooks: PlaybackHooks,
    ) -> PentraceResult<()> {
        config.validate()?;
        let lookup = config.override_key.as_deref().unwrap_or(subject_key);
        let data = subjects.get(lookup).ok_or_else(|| {
            PentraceError::invalid_configuration(format!(
                "no subject data under key '{lookup}'"
            ))
        })?;
        data.validate()?;

        let controller = PlaybackController::new(
            data.descriptors(),
            KurboMeasure::default(),
            scheduler,
            config.playback_options(),
            hooks,
        )?;

        if let Some(mut old) = self.subjects.remove(subject_key) {
            tracing::debug!(subject_key, "replacing initialized subject");
            old.controller.cancel_pending();
        }
        self.subjects.insert(
            subject_key.to_string(),
            Subject {
                key: subject_key.to_string(),
                config,
                data: data.clone(),
                controller,
            },
        );
        Ok(())
    }

    /// Start (or restart) drawing.
    pub fn play(&mut self, subject_key: &str, sink: &mut impl StrokeSink) -> PentraceResult<&Timeline> {
        self.subject_mut(subject_key)?.controller.paint(sink)
    }

    /// Toggle pause.
    pub fn pause_or_resume(&mut self, subject_key: &str) -> PentraceResult<()> {
        self.subject_mut(subject_key)?.controller.pause_or_resume()
    }

    /// Stop and clear everything drawn.
    pub fn erase(&mut self, subject_key: &str, sink: &mut impl StrokeSink) -> PentraceResult<()> {
        self.subject_mut(subject_key)?.controller.erase(sink)
    }

    /// Route a frame tick to a subject.
    pub fn on_frame(
        &mut self,
        subject_key: &str,
        handle: FrameHandle,
        timestamp: Millis,
        sink: &mut impl StrokeSink,
    ) -> PentraceResult<FrameOutcome> {
        Ok(self
            .subject_mut(subject_key)?
            .controller
            .on_frame(handle, timestamp, sink))
    }

    /// Drop a subject, cancelling its pending frame.
    pub fn dispose(&mut self, subject_key: &str) -> PentraceResult<()> {
        let mut subject = self
            .subjects
            .remove(subject_key)
            .ok_or_else(|| unknown(subject_key))?;
        subject.controller.cancel_pending();
        tracing::debug!(subject_key, "subject disposed");
        Ok(())
    }

    /// Look up a subject.
    pub fn get(&self, subject_key: &str) -> Option<&Subject<S>> {
        self.subjects.get(subject_key)
    }

    /// Look up a subject mutably.
    pub fn get_mut(&mut self, subject_key: &str) -> Option<&mut Subject<S>> {
        self.subjects.get_mut(subject_key)
    }

    /// Initialized subject keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    /// Number of initialized subjects.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// True when nothing is initialized.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    fn subject_mut(&mut self, subject_key: &str) -> PentraceResult<&mut Subject<S>> {
        self.subjects
            .get_mut(subject_key)
            .ok_or_else(|| unknown(subject_key))
    }
}

fn unknown(subject_key: &str) -> PentraceError {
    tracing::debug!(subject_key, "control operation on uninitialized subject");
    PentraceError::precondition(format!("subject '{subject_key}' is not initialized"))
}

#[cfg(test)]
#[path = "../../tests/unit/playback/registry.rs"]
mod tests;
