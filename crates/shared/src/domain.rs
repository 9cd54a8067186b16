use serde::{Deserialize, Serialize};

/// Identifier assigned by the registry service. The client never sets or
/// interprets it; it is passed through and used only as a rendering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Date of birth as the service formats it: `YYYY-MM-DD`.
    pub dob: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_uses_service_field_names_on_the_wire() {
        let student: Student = serde_json::from_str(
            r#"{"id":1,"firstName":"Ada","lastName":"Lovelace","email":"ada@x.com","dob":"1815-12-10"}"#,
        )
        .expect("service payload decodes");
        assert_eq!(student.id, StudentId(1));
        assert_eq!(student.full_name(), "Ada Lovelace");
        assert_eq!(student.dob, "1815-12-10");
    }
}
