//! Course access screen
//!
//! Headless controller behind the lesson player: it owns the transient UI
//! state (active lesson, tab, form contents) and keeps it in step with the
//! course service. Remote failures are logged and absorbed into default
//! state; the only one that surfaces is a failed content fetch, which sends
//! the learner back to the course details page.

pub mod forms;
pub mod state;

use crate::api::{
    AddQuestionRequest, AddReviewRequest, CourseContentItem, CourseService, CourseSummary,
    QuestionThread, ReferenceLink, Review, User, VideoSource,
};
use crate::progress::{CompletionState, ProgressEvent, ProgressNotifier, ProgressReconciler};

pub use forms::{FormError, QuestionDraft, ReviewForm};
pub use state::{LessonMarker, LessonRow, Navigation, ScreenState, Tab};

/// Outcome of a validated submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The service accepted it
    Sent,
    /// The request failed; the failure was logged and local state kept
    Failed,
}

/// The lesson screen for one course
pub struct CourseAccess<S, N> {
    service: S,
    course: CourseSummary,
    current_user: Option<User>,
    content: Vec<CourseContentItem>,
    reviews: Vec<Review>,
    state: ScreenState,
    question: QuestionDraft,
    review_form: ReviewForm,
    /// Set once the current user has a review on this course
    review_available: bool,
    video: Option<VideoSource>,
    reconciler: ProgressReconciler<N>,
}

impl<S: CourseService, N: ProgressNotifier> CourseAccess<S, N> {
    /// Create the screen for a course. Nothing is fetched until [`enter`](Self::enter).
    pub fn new(service: S, course: CourseSummary, notifier: N) -> Self {
        let reconciler = ProgressReconciler::new(&course.id, &course.name, notifier);
        Self {
            service,
            reviews: course.reviews.clone(),
            course,
            current_user: None,
            content: Vec::new(),
            state: ScreenState::default(),
            question: QuestionDraft::default(),
            review_form: ReviewForm::default(),
            review_available: false,
            video: None,
            reconciler,
        }
    }

    /// Use a known account instead of asking the service on entry
    pub fn with_current_user(mut self, user: User) -> Self {
        self.current_user = Some(user);
        self
    }

    /// Load progress and content, then the active lesson's video.
    ///
    /// Returns a navigation target when the course cannot be opened.
    pub async fn enter(&mut self) -> Option<Navigation> {
        self.state.is_loading = true;

        let course_id = self.course.id.clone();
        let known_user = self.current_user.is_some();
        let service = &self.service;
        let fetch_user = async move {
            if known_user {
                return None;
            }
            match service.fetch_current_user().await {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Failed to fetch current user: {}", e);
                    None
                }
            }
        };

        let (_, content, user) = tokio::join!(
            self.reconciler.load(service),
            service.fetch_course_content(&course_id),
            fetch_user
        );

        if user.is_some() {
            self.current_user = user;
        }
        self.state.is_loading = false;

        match content {
            Ok(items) => {
                tracing::debug!("Loaded {} lessons for course {}", items.len(), course_id);
                self.content = items;
                self.state.clamp_lesson(self.content.len());
            }
            Err(e) => {
                if e.requires_reauth() {
                    tracing::warn!("Tokens were rejected, run `login` again: {}", e);
                } else if e.is_access_denied() {
                    tracing::warn!("Course {} is not accessible: {}", course_id, e);
                } else {
                    tracing::warn!("Failed to load course {}: {}", course_id, e);
                }
                return Some(Navigation::CourseDetails { course_id });
            }
        }

        self.review_available = self.has_own_review();
        self.load_video().await;
        None
    }

    fn has_own_review(&self) -> bool {
        match &self.current_user {
            Some(user) if !user.id.is_empty() => {
                self.reviews.iter().any(|r| r.user.id == user.id)
            }
            _ => false,
        }
    }

    /// Fetch the playable source of the active lesson
    pub async fn load_video(&mut self) {
        let Some(video_ref) = self.current_lesson().map(|l| l.video_url.clone()) else {
            self.video = None;
            return;
        };

        self.video = match self.service.fetch_video_source(&video_ref).await {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::warn!("Failed to load video {}: {}", video_ref, e);
                None
            }
        };
    }

    pub fn course(&self) -> &CourseSummary {
        &self.course
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn lessons(&self) -> &[CourseContentItem] {
        &self.content
    }

    pub fn current_lesson(&self) -> Option<&CourseContentItem> {
        self.content.get(self.state.active_lesson)
    }

    pub fn video(&self) -> Option<&VideoSource> {
        self.video.as_ref()
    }

    pub fn progress(&self) -> &ProgressReconciler<N> {
        &self.reconciler
    }

    /// Switch to another lesson; closes the picker and reloads the video
    pub async fn select_lesson(&mut self, index: usize) -> bool {
        if index >= self.content.len() {
            return false;
        }
        self.state.active_lesson = index;
        self.state.lesson_list_visible = false;
        self.load_video().await;
        true
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.active_lesson > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.state.active_lesson + 1 < self.content.len()
    }

    pub async fn previous_lesson(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.select_lesson(self.state.active_lesson - 1).await
    }

    pub async fn next_lesson(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.select_lesson(self.state.active_lesson + 1).await
    }

    pub fn show_lesson_list(&mut self) {
        self.state.lesson_list_visible = true;
    }

    pub fn hide_lesson_list(&mut self) {
        self.state.lesson_list_visible = false;
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.state.tab = tab;
    }

    /// Rows for the lesson picker, in server order
    pub fn lesson_rows(&self) -> Vec<LessonRow> {
        self.content
            .iter()
            .enumerate()
            .map(|(index, lesson)| LessonRow {
                index,
                title: lesson.title.clone(),
                is_active: index == self.state.active_lesson,
                is_completed: self.reconciler.chapter_state(&lesson.id).is_completed(),
            })
            .collect()
    }

    /// Completion state of the active lesson
    pub fn current_state(&self) -> CompletionState {
        self.current_lesson()
            .map(|lesson| self.reconciler.chapter_state(&lesson.id))
            .unwrap_or_default()
    }

    /// Completion control for the active lesson
    pub fn current_marker(&self) -> Option<LessonMarker> {
        self.current_lesson()?;
        Some(if self.current_state().is_completed() {
            LessonMarker::Completed
        } else {
            LessonMarker::MarkComplete
        })
    }

    /// Mark the active lesson complete
    pub async fn mark_current_complete(&mut self) -> Option<ProgressEvent> {
        let chapter_id = self.current_lesson()?.id.clone();
        self.reconciler.mark_complete(&self.service, &chapter_id).await
    }

    /// Reference links of the active lesson that can be opened
    pub fn reference_links(&self) -> Vec<&ReferenceLink> {
        self.current_lesson()
            .map(|lesson| lesson.links.iter().filter(|link| !link.url.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Question threads of the active lesson, newest first
    pub fn questions_newest_first(&self) -> Vec<&QuestionThread> {
        self.current_lesson()
            .map(|lesson| lesson.questions.iter().rev().collect())
            .unwrap_or_default()
    }

    pub fn question_draft(&self) -> &QuestionDraft {
        &self.question
    }

    pub fn question_draft_mut(&mut self) -> &mut QuestionDraft {
        &mut self.question
    }

    /// Post the drafted question, then refresh the lesson content
    pub async fn submit_question(&mut self) -> Result<Submission, FormError> {
        let question = self.question.validate()?.to_string();
        let content_id = self.current_lesson().ok_or(FormError::NoActiveLesson)?.id.clone();

        let request =
            AddQuestionRequest { question, course_id: self.course.id.clone(), content_id };

        if let Err(e) = self.service.add_question(&request).await {
            tracing::warn!("Failed to post question: {}", e);
            return Ok(Submission::Failed);
        }

        self.question.clear();
        tracing::info!("Question posted on lesson {}", request.content_id);
        self.refresh_content().await;
        Ok(Submission::Sent)
    }

    /// Re-fetch lesson content; on failure the previous copy stays.
    ///
    /// The player follows the active lesson if the refresh moved or changed it.
    pub async fn refresh_content(&mut self) {
        let playing = self.current_lesson().map(|l| l.video_url.clone());

        match self.service.fetch_course_content(&self.course.id).await {
            Ok(items) => {
                self.content = items;
                self.state.clamp_lesson(self.content.len());
            }
            Err(e) => {
                tracing::warn!("Failed to refresh course content: {}", e);
                return;
            }
        }

        if self.current_lesson().map(|l| l.video_url.clone()) != playing {
            self.load_video().await;
        }
    }

    /// Course reviews, newest first
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Whether the current user already has a review, hiding the form
    pub fn review_available(&self) -> bool {
        self.review_available
    }

    pub fn review_form(&self) -> &ReviewForm {
        &self.review_form
    }

    pub fn review_form_mut(&mut self) -> &mut ReviewForm {
        &mut self.review_form
    }

    /// Post the review form. On success it is shown at the top of the list.
    pub async fn submit_review(&mut self) -> Result<Submission, FormError> {
        if self.review_available {
            return Err(FormError::AlreadyReviewed);
        }
        self.review_form.validate()?;

        let request = AddReviewRequest {
            review: self.review_form.comment.clone(),
            rating: self.review_form.rating,
        };

        if let Err(e) = self.service.add_review(&self.course.id, &request).await {
            tracing::warn!("Failed to post review: {}", e);
            return Ok(Submission::Failed);
        }

        let review = Review {
            user: self.current_user.clone().unwrap_or_default(),
            rating: request.rating,
            comment: request.review,
        };
        self.reviews.insert(0, review);
        self.review_form.reset();
        self.review_available = true;
        tracing::info!("Review posted for course {}", self.course.id);
        Ok(Submission::Sent)
    }

    /// Quiz for the active lesson
    pub fn open_quiz(&self) -> Navigation {
        let lesson_index = self.state.active_lesson;
        Navigation::Quiz { course_id: self.course.id.clone(), lesson_index }
    }

    /// Notes for the active lesson
    pub fn open_notes(&self) -> Option<Navigation> {
        let lesson = self.current_lesson()?;
        Some(Navigation::LessonNotes {
            course_id: self.course.id.clone(),
            chapter_id: lesson.id.clone(),
            course_name: self.course.name.clone(),
            lesson_title: lesson.title.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CourseApiError;
    use crate::progress::{ChapterProgress, CourseProgress};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// In-memory course service
    #[derive(Default)]
    struct FakeService {
        progress: Option<Vec<CourseProgress>>,
        content: Option<Vec<CourseContentItem>>,
        /// Served instead of `content` once the first fetch is done
        refreshed_content: Option<Vec<CourseContentItem>>,
        /// Status of the content failure, 403 when unset
        content_status: Option<u16>,
        user: Option<User>,
        fail_writes: bool,
        questions: RefCell<Vec<AddQuestionRequest>>,
        reviews: RefCell<Vec<(String, u8, String)>>,
        marks: RefCell<Vec<String>>,
        content_fetches: RefCell<usize>,
    }

    fn down() -> CourseApiError {
        CourseApiError::ApiError { status: 500, message: "down".into() }
    }

    impl CourseService for FakeService {
        async fn fetch_progress(&self) -> Result<Vec<CourseProgress>, CourseApiError> {
            self.progress.clone().ok_or_else(down)
        }

        async fn fetch_course_content(
            &self,
            _course_id: &str,
        ) -> Result<Vec<CourseContentItem>, CourseApiError> {
            let earlier = *self.content_fetches.borrow();
            *self.content_fetches.borrow_mut() += 1;
            let content = match &self.refreshed_content {
                Some(refreshed) if earlier > 0 => Some(refreshed.clone()),
                _ => self.content.clone(),
            };
            content.ok_or(CourseApiError::ApiError {
                status: self.content_status.unwrap_or(403),
                message: "not purchased".into(),
            })
        }

        async fn add_question(&self, request: &AddQuestionRequest) -> Result<(), CourseApiError> {
            if self.fail_writes {
                return Err(down());
            }
            self.questions.borrow_mut().push(request.clone());
            Ok(())
        }

        async fn add_review(
            &self,
            course_id: &str,
            request: &AddReviewRequest,
        ) -> Result<(), CourseApiError> {
            if self.fail_writes {
                return Err(down());
            }
            let review = (course_id.into(), request.rating, request.review.clone());
            self.reviews.borrow_mut().push(review);
            Ok(())
        }

        async fn mark_chapter(
            &self,
            _course_id: &str,
            chapter_id: &str,
        ) -> Result<(), CourseApiError> {
            self.marks.borrow_mut().push(chapter_id.into());
            if self.fail_writes {
                return Err(down());
            }
            Ok(())
        }

        async fn fetch_video_source(&self, video_ref: &str) -> Result<VideoSource, CourseApiError> {
            Ok(VideoSource {
                uri: format!("https://media.test/{}", video_ref),
                ..Default::default()
            })
        }

        async fn fetch_current_user(&self) -> Result<User, CourseApiError> {
            self.user.clone().ok_or_else(down)
        }
    }

    fn user(id: &str) -> User {
        User { id: id.into(), name: id.to_uppercase(), email: None }
    }

    fn lesson(id: &str, questions: &[&str]) -> CourseContentItem {
        CourseContentItem {
            id: id.into(),
            title: format!("Lesson {}", id),
            video_url: format!("{}.mp4", id),
            questions: questions
                .iter()
                .map(|q| QuestionThread { question: (*q).into(), ..Default::default() })
                .collect(),
            ..Default::default()
        }
    }

    fn summary(reviews: Vec<Review>) -> CourseSummary {
        CourseSummary { id: "c1".into(), name: "Rust Basics".into(), reviews }
    }

    fn service() -> FakeService {
        FakeService {
            progress: Some(vec![CourseProgress {
                course_id: "c1".into(),
                chapters: vec![
                    ChapterProgress { chapter_id: "l1".into(), is_completed: true },
                    ChapterProgress { chapter_id: "l2".into(), is_completed: false },
                ],
            }]),
            content: Some(vec![
                lesson("l1", &["first", "second"]),
                lesson("l2", &[]),
                lesson("l3", &[]),
            ]),
            user: Some(user("u1")),
            ..Default::default()
        }
    }

    fn quiet(_: &ProgressEvent) {}

    #[tokio::test]
    async fn enter_loads_progress_content_and_video() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        assert!(screen.enter().await.is_none());

        assert_eq!(screen.lessons().len(), 3);
        assert!(!screen.state().is_loading);
        assert_eq!(screen.current_user(), Some(&user("u1")));
        assert_eq!(screen.video().unwrap().uri, "https://media.test/l1.mp4");
        assert_eq!(screen.current_marker(), Some(LessonMarker::Completed));
    }

    #[tokio::test]
    async fn inaccessible_course_navigates_back() {
        let fake = FakeService { content: None, ..service() };
        let mut screen = CourseAccess::new(fake, summary(Vec::new()), quiet);

        let back = Some(Navigation::CourseDetails { course_id: "c1".into() });
        assert_eq!(screen.enter().await, back);
        assert!(screen.lessons().is_empty());
        assert!(screen.video().is_none());
    }

    #[tokio::test]
    async fn rejected_tokens_also_navigate_back() {
        let fake = FakeService { content: None, content_status: Some(401), ..service() };
        let mut screen = CourseAccess::new(fake, summary(Vec::new()), quiet);

        let back = Some(Navigation::CourseDetails { course_id: "c1".into() });
        assert_eq!(screen.enter().await, back);
        assert!(screen.video().is_none());
    }

    #[tokio::test]
    async fn progress_failure_reads_as_nothing_completed() {
        let fake = FakeService { progress: None, ..service() };
        let mut screen = CourseAccess::new(fake, summary(Vec::new()), quiet);
        screen.enter().await;

        assert_eq!(screen.current_state(), CompletionState::NotCompleted);
        assert!(screen.lesson_rows().iter().all(|row| !row.is_completed));
        assert_eq!(screen.progress().ratio(), 0.0);
    }

    #[tokio::test]
    async fn lesson_navigation_is_bounded() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        screen.enter().await;

        assert!(!screen.can_go_previous());
        assert!(!screen.previous_lesson().await);
        assert!(screen.next_lesson().await);
        assert!(screen.next_lesson().await);
        assert!(!screen.can_go_next());
        assert!(!screen.next_lesson().await);
        assert_eq!(screen.state().active_lesson, 2);
        assert_eq!(screen.video().unwrap().uri, "https://media.test/l3.mp4");
    }

    #[tokio::test]
    async fn selecting_from_list_closes_it() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        screen.enter().await;

        screen.show_lesson_list();
        assert!(screen.state().lesson_list_visible);
        assert!(screen.select_lesson(1).await);
        assert!(!screen.state().lesson_list_visible);
        assert!(!screen.select_lesson(7).await);

        let rows = screen.lesson_rows();
        assert_eq!(
            rows.iter().map(|r| (r.number(), r.is_active, r.is_completed)).collect::<Vec<_>>(),
            vec![(1, false, true), (2, true, false), (3, false, false)]
        );
    }

    #[tokio::test]
    async fn mark_complete_flips_marker_for_good() {
        let events = RefCell::new(Vec::new());
        let mut screen = CourseAccess::new(
            service(),
            summary(Vec::new()),
            |e: &ProgressEvent| events.borrow_mut().push(e.clone()),
        );
        screen.enter().await;
        screen.select_lesson(1).await;
        assert_eq!(screen.current_marker(), Some(LessonMarker::MarkComplete));

        let event = screen.mark_current_complete().await.unwrap();
        assert_eq!(event.course_id, "c1");
        assert_eq!(event.name, "Rust Basics");
        assert_eq!(event.progress, 1.0);
        assert_eq!(event.total, 2);
        assert_eq!(screen.current_marker(), Some(LessonMarker::Completed));

        // Re-rendering from the same data keeps the completed indicator
        screen.select_lesson(0).await;
        screen.select_lesson(1).await;
        assert_eq!(screen.current_marker(), Some(LessonMarker::Completed));
        assert!(screen.mark_current_complete().await.is_none());
        drop(screen);
        assert_eq!(events.into_inner().len(), 1);
    }

    #[tokio::test]
    async fn failed_mark_write_keeps_completed_locally() {
        let fake = FakeService { fail_writes: true, ..service() };
        let mut screen = CourseAccess::new(fake, summary(Vec::new()), quiet);
        screen.enter().await;
        screen.select_lesson(2).await;

        assert!(screen.mark_current_complete().await.is_some());
        assert_eq!(screen.current_marker(), Some(LessonMarker::Completed));
        assert!((screen.progress().ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn empty_question_is_not_sent() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        screen.enter().await;

        assert_eq!(screen.submit_question().await, Err(FormError::EmptyQuestion));
        assert!(screen.service.questions.borrow().is_empty());
    }

    #[tokio::test]
    async fn question_is_posted_and_content_refetched() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        screen.enter().await;
        screen.set_tab(Tab::Questions);
        screen.question_draft_mut().set("Why borrow?");

        assert_eq!(screen.submit_question().await, Ok(Submission::Sent));
        assert!(screen.question_draft().text.is_empty());
        assert_eq!(*screen.service.content_fetches.borrow(), 2);

        let sent = screen.service.questions.borrow();
        assert_eq!(sent[0].question, "Why borrow?");
        assert_eq!(sent[0].course_id, "c1");
        assert_eq!(sent[0].content_id, "l1");
    }

    #[tokio::test]
    async fn shrunk_refresh_moves_player_to_clamped_lesson() {
        let fake = FakeService { refreshed_content: Some(vec![lesson("l1", &[])]), ..service() };
        let mut screen = CourseAccess::new(fake, summary(Vec::new()), quiet);
        screen.enter().await;
        screen.select_lesson(2).await;
        assert_eq!(screen.video().unwrap().uri, "https://media.test/l3.mp4");

        screen.question_draft_mut().set("Where did it go?");
        assert_eq!(screen.submit_question().await, Ok(Submission::Sent));

        assert_eq!(screen.state().active_lesson, 0);
        assert_eq!(screen.lessons().len(), 1);
        assert_eq!(screen.video().unwrap().uri, "https://media.test/l1.mp4");
    }

    #[tokio::test]
    async fn failed_question_keeps_draft() {
        let fake = FakeService { fail_writes: true, ..service() };
        let mut screen = CourseAccess::new(fake, summary(Vec::new()), quiet);
        screen.enter().await;
        screen.question_draft_mut().set("Still there?");

        assert_eq!(screen.submit_question().await, Ok(Submission::Failed));
        assert_eq!(screen.question_draft().text, "Still there?");
    }

    #[tokio::test]
    async fn questions_are_listed_newest_first() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        screen.enter().await;

        let questions: Vec<_> =
            screen.questions_newest_first().iter().map(|q| q.question.clone()).collect();
        assert_eq!(questions, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn review_rejected_before_sending() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        screen.enter().await;

        screen.review_form_mut().set_rating(0);
        screen.review_form_mut().set_comment("Nice");
        assert_eq!(screen.submit_review().await, Err(FormError::InvalidRating(0)));

        screen.review_form_mut().set_rating(3);
        screen.review_form_mut().set_comment("");
        assert_eq!(screen.submit_review().await, Err(FormError::EmptyComment));
        assert!(screen.service.reviews.borrow().is_empty());
    }

    #[tokio::test]
    async fn review_is_prepended_and_form_hidden() {
        let existing = Review { user: user("u2"), rating: 4, comment: "good".into() };
        let mut screen = CourseAccess::new(service(), summary(vec![existing]), quiet);
        screen.enter().await;
        assert!(!screen.review_available());

        screen.review_form_mut().set_rating(5);
        screen.review_form_mut().set_comment("Loved it");
        assert_eq!(screen.submit_review().await, Ok(Submission::Sent));

        let posted = Review { user: user("u1"), rating: 5, comment: "Loved it".into() };
        assert_eq!(screen.reviews()[0], posted);
        assert_eq!(screen.reviews().len(), 2);
        assert_eq!(screen.review_form().rating, 1);
        assert!(screen.review_form().comment.is_empty());
        assert!(screen.review_available());
        let sent = vec![("c1".to_string(), 5, "Loved it".to_string())];
        assert_eq!(*screen.service.reviews.borrow(), sent);
    }

    #[tokio::test]
    async fn existing_review_suppresses_form() {
        let mine = Review { user: user("u1"), rating: 2, comment: "meh".into() };
        let mut screen = CourseAccess::new(service(), summary(vec![mine]), quiet);
        screen.enter().await;

        assert!(screen.review_available());
        screen.review_form_mut().set_comment("second try");
        assert_eq!(screen.submit_review().await, Err(FormError::AlreadyReviewed));
    }

    #[tokio::test]
    async fn known_user_skips_user_fetch() {
        let fake = FakeService { user: None, ..service() };
        let mine = Review { user: user("u9"), rating: 5, comment: "top".into() };
        let mut screen =
            CourseAccess::new(fake, summary(vec![mine]), quiet).with_current_user(user("u9"));
        screen.enter().await;

        assert_eq!(screen.current_user(), Some(&user("u9")));
        assert!(screen.review_available());
    }

    #[tokio::test]
    async fn navigation_targets_use_active_lesson() {
        let mut screen = CourseAccess::new(service(), summary(Vec::new()), quiet);
        screen.enter().await;
        screen.select_lesson(1).await;

        let quiz = Navigation::Quiz { course_id: "c1".into(), lesson_index: 1 };
        assert_eq!(screen.open_quiz(), quiz);
        assert_eq!(
            screen.open_notes(),
            Some(Navigation::LessonNotes {
                course_id: "c1".into(),
                chapter_id: "l2".into(),
                course_name: "Rust Basics".into(),
                lesson_title: "Lesson l2".into(),
            })
        );
    }

    #[tokio::test]
    async fn reference_links_skip_empty_urls() {
        let mut fake = service();
        if let Some(content) = fake.content.as_mut() {
            content[0].links = vec![
                ReferenceLink {
                    title: "Book".into(),
                    url: "https://doc.rust-lang.org/book".into(),
                },
                ReferenceLink { title: "Broken".into(), url: String::new() },
            ];
        }
        let mut screen = CourseAccess::new(fake, summary(Vec::new()), quiet);
        screen.enter().await;

        let titles: Vec<_> = screen.reference_links().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Book"]);
    }
}
