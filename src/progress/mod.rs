//! Chapter completion tracking for a course
//!
//! The remote course service owns durable progress. This module holds the
//! local snapshot, the pure lookups over it, and the reconciler that applies
//! mark-complete actions ahead of server confirmation.

pub mod reconciler;

use serde::{Deserialize, Serialize};

pub use reconciler::{
    LogNotifier, ProgressEvent, ProgressNotifier, ProgressReconciler, load_progress,
};

/// Completion state of one chapter for the current user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterProgress {
    /// Content identifier of the chapter
    #[serde(default)]
    pub chapter_id: String,

    /// Has the user completed this chapter?
    #[serde(default)]
    pub is_completed: bool,
}

impl ChapterProgress {
    /// A chapter record marked as completed
    pub fn completed(chapter_id: impl Into<String>) -> Self {
        Self { chapter_id: chapter_id.into(), is_completed: true }
    }
}

/// Progress of one user on one course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    /// Course identifier
    #[serde(default)]
    pub course_id: String,

    /// Per-chapter records, unique by chapter id
    #[serde(default)]
    pub chapters: Vec<ChapterProgress>,
}

impl CourseProgress {
    /// Empty progress for a course
    pub fn new(course_id: impl Into<String>) -> Self {
        Self { course_id: course_id.into(), chapters: Vec::new() }
    }

    /// Collapse duplicate chapter records, keeping the first position.
    ///
    /// A chapter counts as completed if any of its duplicates was.
    pub fn normalized(mut self) -> Self {
        let mut chapters: Vec<ChapterProgress> = Vec::with_capacity(self.chapters.len());
        for chapter in self.chapters.drain(..) {
            match chapters.iter_mut().find(|c| c.chapter_id == chapter.chapter_id) {
                Some(existing) => existing.is_completed |= chapter.is_completed,
                None => chapters.push(chapter),
            }
        }
        self.chapters = chapters;
        self
    }

    /// Look up the record for a chapter
    pub fn chapter(&self, chapter_id: &str) -> Option<&ChapterProgress> {
        self.chapters.iter().find(|c| c.chapter_id == chapter_id)
    }

    /// Fraction of chapters completed
    pub fn ratio(&self) -> f64 {
        completion_ratio(&self.chapters)
    }
}

/// Result of looking up a chapter in a progress snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterState {
    pub chapter_id: String,
    pub is_completed: bool,
}

/// Completion state machine of a single chapter
///
/// `Unknown` lasts until progress has been loaded. The only transition after
/// that is `NotCompleted -> Completed`, and `Completed` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionState {
    #[default]
    Unknown,
    NotCompleted,
    Completed,
}

impl CompletionState {
    /// Whether the chapter is known to be complete
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

impl From<bool> for CompletionState {
    fn from(is_completed: bool) -> Self {
        if is_completed { Self::Completed } else { Self::NotCompleted }
    }
}

/// Look up a chapter's completion. Absence means not completed.
pub fn select_chapter_state(progress: Option<&CourseProgress>, chapter_id: &str) -> ChapterState {
    let is_completed =
        progress.and_then(|p| p.chapter(chapter_id)).map(|c| c.is_completed).unwrap_or(false);
    ChapterState { chapter_id: chapter_id.to_string(), is_completed }
}

/// Return a copy of `progress` with `chapter_id` marked completed.
///
/// An existing record is replaced in place, a missing one is appended.
/// Applying this twice yields the same snapshot as applying it once.
pub fn mark_complete(progress: &CourseProgress, chapter_id: &str) -> CourseProgress {
    let mut next = progress.clone();
    match next.chapters.iter_mut().find(|c| c.chapter_id == chapter_id) {
        Some(chapter) => chapter.is_completed = true,
        None => next.chapters.push(ChapterProgress::completed(chapter_id)),
    }
    next
}

/// Completed chapters over total chapters, `0.0` for an empty list
pub fn completion_ratio(chapters: &[ChapterProgress]) -> f64 {
    if chapters.is_empty() {
        return 0.0;
    }
    let completed = chapters.iter().filter(|c| c.is_completed).count();
    completed as f64 / chapters.len() as f64
}
