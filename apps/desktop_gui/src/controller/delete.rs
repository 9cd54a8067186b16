//! Delete-student form: the create flow's shape without a modal. Failure
//! retains the submitted pair for correction.

use shared::protocol::DeleteStudent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteField {
    Email,
    FirstName,
}

impl DeleteField {
    pub fn label(self) -> &'static str {
        match self {
            DeleteField::Email => "Email",
            DeleteField::FirstName => "First Name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Editing,
    Submitting,
}

#[derive(Debug)]
pub struct DeleteStudentForm {
    pub email: String,
    pub first_name: String,
    phase: Phase,
    message: Option<String>,
}

impl Default for DeleteStudentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteStudentForm {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            phase: Phase::Editing,
            message: None,
        }
    }

    pub fn begin_submit(&mut self) -> Result<DeleteStudent, DeleteField> {
        let fields = [
            (DeleteField::Email, &self.email),
            (DeleteField::FirstName, &self.first_name),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(*field);
        }

        self.phase = Phase::Submitting;
        self.message = None;
        Ok(DeleteStudent {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
        })
    }

    /// Shows the service-provided status text and resets both fields.
    pub fn apply_success(&mut self, message: String) {
        self.email.clear();
        self.first_name.clear();
        self.message = Some(message);
        self.phase = Phase::Editing;
    }

    /// Fields are retained so the user can correct and resubmit.
    pub fn apply_failure(&mut self, message: String) {
        self.message = Some(message);
        self.phase = Phase::Editing;
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> DeleteStudentForm {
        let mut form = DeleteStudentForm::new();
        form.email = "ada@x.com".to_string();
        form.first_name = "Ada".to_string();
        form
    }

    #[test]
    fn successful_deletion_shows_status_and_clears_fields() {
        let mut form = filled_form();
        let request = form.begin_submit().expect("both fields present");
        assert_eq!(request.email, "ada@x.com");
        assert_eq!(request.first_name, "Ada");

        form.apply_success("1 user(s) deleted successfully".to_string());
        assert_eq!(form.email, "");
        assert_eq!(form.first_name, "");
        assert_eq!(form.message(), Some("1 user(s) deleted successfully"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn failed_deletion_retains_the_submitted_pair() {
        let mut form = filled_form();
        form.begin_submit().expect("both fields present");

        form.apply_failure("not found".to_string());
        assert_eq!(form.email, "ada@x.com");
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.message(), Some("not found"));
    }

    #[test]
    fn an_empty_field_blocks_submission() {
        let mut form = filled_form();
        form.email.clear();
        assert_eq!(form.begin_submit(), Err(DeleteField::Email));

        let mut form = filled_form();
        form.first_name = " ".to_string();
        assert_eq!(form.begin_submit(), Err(DeleteField::FirstName));
    }
}
