//! Course service integration module
//!
//! Provides the request/response contracts of the remote course service and
//! an HTTP client implementing them.

pub mod client;
pub mod error;
pub mod models;

use crate::progress::CourseProgress;

// Re-export commonly used types
pub use client::CourseClient;
pub use error::CourseApiError;
pub use models::{
    AddQuestionRequest, AddReviewRequest, CourseContentItem, CourseSummary, QuestionThread,
    ReferenceLink, Review, User, VideoSource,
};

/// Operations offered by the remote course service
///
/// The service owns all durable data. Callers hold transient copies only.
#[allow(async_fn_in_trait)]
pub trait CourseService {
    /// All progress records of the current user
    async fn fetch_progress(&self) -> Result<Vec<CourseProgress>, CourseApiError>;

    /// Ordered lessons of a course
    async fn fetch_course_content(
        &self,
        course_id: &str,
    ) -> Result<Vec<CourseContentItem>, CourseApiError>;

    /// Post a question on a lesson
    async fn add_question(&self, request: &AddQuestionRequest) -> Result<(), CourseApiError>;

    /// Post a rating and comment for a course
    async fn add_review(
        &self,
        course_id: &str,
        request: &AddReviewRequest,
    ) -> Result<(), CourseApiError>;

    /// Record a chapter as completed
    async fn mark_chapter(&self, course_id: &str, chapter_id: &str) -> Result<(), CourseApiError>;

    /// Resolve a lesson's video reference to a playable source
    async fn fetch_video_source(&self, video_ref: &str) -> Result<VideoSource, CourseApiError>;

    /// The account the tokens belong to
    async fn fetch_current_user(&self) -> Result<User, CourseApiError>;
}
