//! Events the backend worker posts back to the UI thread. Each one maps to
//! exactly one controller transition.

use shared::domain::Student;

#[derive(Debug, Clone)]
pub enum UiEvent {
    StudentCreated(Student),
    CreateFailed(String),
    StudentDeleted { message: String },
    DeleteFailed(String),
    StudentsLoaded(Vec<Student>),
    ListFailed(String),
    BackendUnavailable(String),
}
