//! Question and review input forms

use thiserror::Error;

/// Lowest selectable rating
pub const MIN_RATING: u8 = 1;
/// Highest selectable rating
pub const MAX_RATING: u8 = 5;

/// Reasons a submission is refused before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Question text is empty")]
    EmptyQuestion,

    #[error("Review comment is empty")]
    EmptyComment,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("You have already reviewed this course")]
    AlreadyReviewed,

    #[error("No lesson is selected")]
    NoActiveLesson,
}

/// Draft of a question on the active lesson
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub text: String,
}

impl QuestionDraft {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Text to send, or why it cannot be sent
    pub fn validate(&self) -> Result<&str, FormError> {
        if self.text.trim().is_empty() {
            return Err(FormError::EmptyQuestion);
        }
        Ok(&self.text)
    }

    /// Whether the submit control is enabled
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Rating and comment for the course
#[derive(Debug, Clone)]
pub struct ReviewForm {
    pub rating: u8,
    pub comment: String,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self { rating: MIN_RATING, comment: String::new() }
    }
}

impl ReviewForm {
    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating;
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Back to one star and an empty comment
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(FormError::InvalidRating(self.rating));
        }
        if self.comment.trim().is_empty() {
            return Err(FormError::EmptyComment);
        }
        Ok(())
    }

    /// Whether the submit control is enabled
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Filled state of each star, left to right
    pub fn stars(&self) -> [bool; MAX_RATING as usize] {
        std::array::from_fn(|i| (i as u8) < self.rating)
    }
}
