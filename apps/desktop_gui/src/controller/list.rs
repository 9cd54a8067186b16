//! Student list view state: wholesale refresh, an error banner that keeps
//! the stale set visible, and the empty-state notice.

use shared::domain::Student;

pub const EMPTY_NOTICE: &str = "No students found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug)]
pub struct StudentListView {
    students: Vec<Student>,
    error: Option<String>,
    phase: ListPhase,
}

impl Default for StudentListView {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentListView {
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            error: None,
            phase: ListPhase::Idle,
        }
    }

    /// Re-entrant: refreshing while a fetch is outstanding simply issues
    /// another one.
    pub fn begin_refresh(&mut self) {
        self.phase = ListPhase::Loading;
    }

    /// The full result replaces the rendered set; no incremental merge.
    pub fn apply_success(&mut self, students: Vec<Student>) {
        self.students = students;
        self.error = None;
        self.phase = ListPhase::Loaded;
    }

    /// The previously rendered set stays visible next to the error.
    pub fn apply_failure(&mut self, message: String) {
        self.error = Some(message);
        self.phase = ListPhase::Failed;
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// The empty notice and an active error are mutually exclusive, and the
    /// notice never coexists with rendered rows.
    pub fn shows_empty_notice(&self) -> bool {
        self.students.is_empty() && self.error.is_none()
    }
}
