//! Wire types for the course service

use serde::{Deserialize, Serialize};

use crate::progress::CourseProgress;

/// A learner or instructor account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// External reading attached to a lesson
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLink {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// A reply in a question thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub answer: String,
}

/// A learner question and its replies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionThread {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub question_replies: Vec<Reply>,
}

/// One playable lesson of a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContentItem {
    /// Content identifier, also the chapter id used for progress
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Media reference resolved through the media host
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: Vec<ReferenceLink>,
    #[serde(default)]
    pub questions: Vec<QuestionThread>,
}

/// A learner's rating and comment for a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Course data handed to the lesson screen on entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl CourseSummary {
    /// Find a review written by the given user
    pub fn review_by(&self, user_id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| !r.user.id.is_empty() && r.user.id == user_id)
    }
}

/// Body of `PUT /add-question`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    pub question: String,
    pub course_id: String,
    pub content_id: String,
}

/// Body of `PUT /add-review/{courseId}`
#[derive(Debug, Clone, Serialize)]
pub struct AddReviewRequest {
    pub review: String,
    pub rating: u8,
}

/// Response of `GET /user/progress`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressResponse {
    #[serde(default)]
    pub response: Option<ProgressBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressBody {
    #[serde(default)]
    pub progress: Vec<CourseProgress>,
}

impl ProgressResponse {
    /// All progress records, empty when the envelope is missing
    pub fn into_records(self) -> Vec<CourseProgress> {
        self.response.map(|body| body.progress).unwrap_or_default()
    }
}

/// Response of `GET /get-course-content/{courseId}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub content: Vec<CourseContentItem>,
}

/// Response of `GET /api/files/{videoUrl}` on the media host
#[derive(Debug, Clone, Deserialize)]
pub struct SignedVideoResponse {
    pub url: String,
}

/// A playable video: resolved URI plus the headers the media host expects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSource {
    pub uri: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response of `GET /me`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub user: User,
}
