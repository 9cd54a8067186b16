use shared::protocol::{DeleteStudent, NewStudent};

/// Commands the UI queues for the backend worker. One command maps to one
/// registry round-trip.
pub enum BackendCommand {
    CreateStudent(NewStudent),
    DeleteStudent(DeleteStudent),
    ListStudents,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::CreateStudent(_) => "create_student",
            BackendCommand::DeleteStudent(_) => "delete_student",
            BackendCommand::ListStudents => "list_students",
        }
    }
}
