//! Create-student form: draft fields, submission state, and the success
//! modal flag.

use shared::domain::Student;
use shared::protocol::NewStudent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    FirstName,
    LastName,
    Email,
    Dob,
}

impl CreateField {
    pub fn label(self) -> &'static str {
        match self {
            CreateField::FirstName => "First Name",
            CreateField::LastName => "Last Name",
            CreateField::Email => "Email",
            CreateField::Dob => "Date of Birth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Editing,
    Submitting,
}

#[derive(Debug)]
pub struct CreateStudentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dob: String,
    phase: Phase,
    message: Option<String>,
    modal_open: bool,
}

impl Default for CreateStudentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateStudentForm {
    pub fn new() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            dob: String::new(),
            phase: Phase::Editing,
            message: None,
            modal_open: false,
        }
    }

    /// Field presence gates the transition out of editing: an empty field
    /// is reported back and nothing reaches the client.
    pub fn begin_submit(&mut self) -> Result<NewStudent, CreateField> {
        let fields = [
            (CreateField::FirstName, &self.first_name),
            (CreateField::LastName, &self.last_name),
            (CreateField::Email, &self.email),
            (CreateField::Dob, &self.dob),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(*field);
        }

        self.phase = Phase::Submitting;
        self.message = None;
        Ok(NewStudent {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            dob: self.dob.trim().to_string(),
        })
    }

    /// All four draft fields reset, confirmation interpolates the names the
    /// service returned, and the modal opens.
    pub fn apply_success(&mut self, student: &Student) {
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
        self.dob.clear();
        self.message = Some(format!("Student created: {}", student.full_name()));
        self.modal_open = true;
        self.phase = Phase::Editing;
    }

    /// Draft fields and modal visibility stay untouched on failure.
    pub fn apply_failure(&mut self, message: String) {
        self.message = Some(message);
        self.phase = Phase::Editing;
    }

    /// Independent transition; only meaningful while the modal is visible.
    pub fn dismiss_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::StudentId;

    fn filled_form() -> CreateStudentForm {
        let mut form = CreateStudentForm::new();
        form.first_name = "Ada".to_string();
        form.last_name = "Lovelace".to_string();
        form.email = "ada@x.com".to_string();
        form.dob = "1815-12-10".to_string();
        form
    }

    fn ada_with_id() -> Student {
        Student {
            id: StudentId(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            dob: "1815-12-10".to_string(),
        }
    }

    #[test]
    fn successful_creation_clears_draft_and_opens_modal() {
        let mut form = filled_form();
        let request = form.begin_submit().expect("all fields present");
        assert_eq!(request.first_name, "Ada");
        assert!(form.is_submitting());

        form.apply_success(&ada_with_id());
        assert_eq!(form.first_name, "");
        assert_eq!(form.last_name, "");
        assert_eq!(form.email, "");
        assert_eq!(form.dob, "");
        assert_eq!(form.message(), Some("Student created: Ada Lovelace"));
        assert!(form.modal_open());
        assert!(!form.is_submitting());
    }

    #[test]
    fn failed_creation_keeps_draft_and_modal_closed() {
        let mut form = filled_form();
        form.begin_submit().expect("all fields present");

        form.apply_failure("duplicate email".to_string());
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.dob, "1815-12-10");
        assert_eq!(form.message(), Some("duplicate email"));
        assert!(!form.modal_open());
        assert!(!form.is_submitting());
    }

    #[test]
    fn an_empty_field_blocks_submission() {
        let mut form = filled_form();
        form.email = "   ".to_string();

        assert_eq!(form.begin_submit(), Err(CreateField::Email));
        assert!(!form.is_submitting());
        assert_eq!(form.first_name, "Ada");
    }

    #[test]
    fn submission_clears_the_previous_message() {
        let mut form = filled_form();
        form.apply_failure("duplicate email".to_string());

        form.begin_submit().expect("all fields present");
        assert_eq!(form.message(), None);
    }

    #[test]
    fn dismissing_the_modal_touches_nothing_else() {
        let mut form = filled_form();
        form.begin_submit().expect("all fields present");
        form.apply_success(&ada_with_id());

        form.dismiss_modal();
        assert!(!form.modal_open());
        assert_eq!(form.message(), Some("Student created: Ada Lovelace"));
        assert_eq!(form.first_name, "");

        // Dismissal with the modal already closed stays a no-op.
        form.dismiss_modal();
        assert!(!form.modal_open());
    }
}
