//! Local progress snapshot reconciled against the course service

use super::{CompletionState, CourseProgress, mark_complete, select_chapter_state};
use crate::api::CourseService;

/// Progress-changed notification for an external aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub course_id: String,
    /// Completion ratio in `[0, 1]`
    pub progress: f64,
    /// Course name
    pub name: String,
    /// Number of chapter records the ratio was computed over
    pub total: usize,
}

/// Receiver of progress-changed notifications
pub trait ProgressNotifier {
    fn notify(&self, event: &ProgressEvent);
}

impl<F> ProgressNotifier for F
where
    F: Fn(&ProgressEvent),
{
    fn notify(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl ProgressNotifier for LogNotifier {
    fn notify(&self, event: &ProgressEvent) {
        tracing::info!(
            "Progress of {} ({}): {:.0}% of {} chapters",
            event.name,
            event.course_id,
            event.progress * 100.0,
            event.total
        );
    }
}

/// Fetch the current user's progress record for one course.
///
/// A failed fetch is logged and reads as no progress.
pub async fn load_progress<S: CourseService>(
    service: &S,
    course_id: &str,
) -> Option<CourseProgress> {
    match service.fetch_progress().await {
        Ok(records) => records
            .into_iter()
            .find(|p| p.course_id == course_id)
            .map(CourseProgress::normalized),
        Err(e) => {
            tracing::warn!("Failed to load progress, assuming none: {}", e);
            None
        }
    }
}

/// Owns the progress snapshot of one course for the lifetime of a screen
pub struct ProgressReconciler<N> {
    course_id: String,
    course_name: String,
    progress: Option<CourseProgress>,
    /// Set once a load has resolved, successfully or not
    loaded: bool,
    notifier: N,
}

impl<N: ProgressNotifier> ProgressReconciler<N> {
    pub fn new(course_id: impl Into<String>, course_name: impl Into<String>, notifier: N) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            progress: None,
            loaded: false,
            notifier,
        }
    }

    /// Replace the snapshot with the server's view
    pub async fn load<S: CourseService>(&mut self, service: &S) {
        self.progress = load_progress(service, &self.course_id).await;
        self.loaded = true;
        tracing::debug!(
            "Loaded progress for {}: {} chapter records",
            self.course_id,
            self.progress.as_ref().map(|p| p.chapters.len()).unwrap_or(0)
        );
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn progress(&self) -> Option<&CourseProgress> {
        self.progress.as_ref()
    }

    /// Current state of a chapter, `Unknown` until progress has loaded
    pub fn chapter_state(&self, chapter_id: &str) -> CompletionState {
        if !self.loaded {
            return CompletionState::Unknown;
        }
        select_chapter_state(self.progress.as_ref(), chapter_id).is_completed.into()
    }

    /// Completion ratio of the current snapshot
    pub fn ratio(&self) -> f64 {
        self.progress.as_ref().map(CourseProgress::ratio).unwrap_or(0.0)
    }

    /// Mark a chapter complete: apply locally, notify, then write remotely.
    ///
    /// The local snapshot is kept even if the remote write fails. Returns
    /// `None` when the chapter was already completed, in which case nothing
    /// is sent.
    pub async fn mark_complete<S: CourseService>(
        &mut self,
        service: &S,
        chapter_id: &str,
    ) -> Option<ProgressEvent> {
        if self.chapter_state(chapter_id).is_completed() {
            return None;
        }

        let event = self.apply_local(chapter_id);

        if let Err(e) = service.mark_chapter(&self.course_id, chapter_id).await {
            tracing::warn!(
                "Failed to record chapter {} as completed on the server, keeping local state: {}",
                chapter_id,
                e
            );
        }

        Some(event)
    }

    fn apply_local(&mut self, chapter_id: &str) -> ProgressEvent {
        let current = self.progress.take().unwrap_or_else(|| CourseProgress::new(&self.course_id));
        let next = mark_complete(&current, chapter_id);

        let event = ProgressEvent {
            course_id: self.course_id.clone(),
            progress: next.ratio(),
            name: self.course_name.clone(),
            total: next.chapters.len(),
        };

        self.progress = Some(next);
        self.loaded = true;
        self.notifier.notify(&event);
        event
    }
}
