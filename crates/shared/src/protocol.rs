use serde::{Deserialize, Serialize};

/// Body of `POST /register`. The service answers with the created
/// [`Student`](crate::domain::Student), id included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dob: String,
}

/// Body of `DELETE /deleteUser`. Matching semantics for the
/// `(email, firstName)` pair are the service's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStudent {
    pub email: String,
    pub first_name: String,
}

/// Success body of `DELETE /deleteUser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub message: String,
}
