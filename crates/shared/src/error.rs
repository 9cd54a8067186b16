use serde::{Deserialize, Serialize};

/// Failure body shared by every registry operation: `{"error": "..."}`.
/// The field is optional so a malformed or empty body still decodes and
/// falls back to a caller-supplied default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn message_or(self, fallback: &str) -> String {
        match self.error {
            Some(message) if !message.trim().is_empty() => message,
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_service_detail_when_present() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"not found"}"#).expect("decodes");
        assert_eq!(body.message_or("Error fetching students"), "not found");
    }

    #[test]
    fn falls_back_when_detail_is_absent_or_blank() {
        let missing: ErrorBody = serde_json::from_str(r#"{}"#).expect("decodes");
        assert_eq!(missing.message_or("Error creating student"), "Error creating student");

        let blank: ErrorBody = serde_json::from_str(r#"{"error":"  "}"#).expect("decodes");
        assert_eq!(blank.message_or("Error creating student"), "Error creating student");
    }
}
