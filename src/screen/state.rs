//! Lesson screen state definitions

/// Which content tab is shown under the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    /// Lesson details, reference links, completion control
    #[default]
    About,
    /// Question threads of the active lesson
    Questions,
    /// Course reviews and the review form
    Reviews,
}

impl Tab {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Questions => "Q&A",
            Self::Reviews => "Reviews",
        }
    }

    /// List all tabs in display order
    pub fn all() -> &'static [Tab] {
        &[Self::About, Self::Questions, Self::Reviews]
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "about" | "details" => Ok(Self::About),
            "q&a" | "qa" | "questions" => Ok(Self::Questions),
            "reviews" => Ok(Self::Reviews),
            _ => Err(format!("Unknown tab: {}. Options: about, qa, reviews", s)),
        }
    }
}

/// Transient UI state of the lesson screen
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    /// Index of the lesson in the player
    pub active_lesson: usize,
    /// Selected content tab
    pub tab: Tab,
    /// Whether the lesson picker is open
    pub lesson_list_visible: bool,
    /// Set while the entry fetches are in flight
    pub is_loading: bool,
}

impl ScreenState {
    /// Keep the active lesson inside a list of `len` lessons
    pub fn clamp_lesson(&mut self, len: usize) {
        if self.active_lesson >= len {
            self.active_lesson = len.saturating_sub(1);
        }
    }
}

/// Completion control shown for a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonMarker {
    /// Lesson can be marked complete
    MarkComplete,
    /// Lesson is done; no control offered
    Completed,
}

/// One row of the lesson picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRow {
    pub index: usize,
    pub title: String,
    pub is_active: bool,
    pub is_completed: bool,
}

impl LessonRow {
    /// 1-based lesson number for display
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Screens reachable from the lesson screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Course could not be opened; back to its details page
    CourseDetails { course_id: String },
    /// Quiz for the active lesson
    Quiz { course_id: String, lesson_index: usize },
    /// Personal notes for the active lesson
    LessonNotes {
        course_id: String,
        chapter_id: String,
        course_name: String,
        lesson_title: String,
    },
}
