//! course-access - lesson player client for a remote course service
//!
//! Tracks per-chapter completion against the server's progress records,
//! resolves lesson videos, and posts questions and reviews, all through
//! authenticated requests carrying the learner's access and refresh tokens.

pub mod api;
pub mod config;
pub mod progress;
pub mod screen;

pub use api::{CourseClient, CourseService};
pub use config::Config;
pub use progress::{CourseProgress, ProgressReconciler};
pub use screen::CourseAccess;
