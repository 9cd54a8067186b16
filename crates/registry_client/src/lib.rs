//! Typed client for the student-registry HTTP service.
//!
//! Each operation performs exactly one round-trip against a fixed base
//! endpoint and normalizes the outcome into `Result<T, RegistryError>`:
//! service-supplied error text where the response carries one, a generic
//! per-operation message where it does not. No retries, no caching, no
//! deduplication of concurrent calls.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::Student,
    error::ErrorBody,
    protocol::{DeleteOutcome, DeleteStudent, NewStudent},
};
use thiserror::Error;
use tracing::{debug, info_span, Instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3002";

// Fallback texts for responses that carry no structured detail.
const CREATE_SERVICE_FALLBACK: &str = "Error creating student";
const CREATE_TRANSPORT_MESSAGE: &str = "An error occurred while creating student";
const DELETE_SERVICE_FALLBACK: &str = "Error deleting student";
const DELETE_TRANSPORT_MESSAGE: &str = "An error occurred while deleting the student";
const LIST_SERVICE_FALLBACK: &str = "Error fetching students";
const LIST_TRANSPORT_MESSAGE: &str = "An error occurred while fetching students";

/// Terminal, per-attempt failure of one registry operation. `Display` is
/// the user-facing message; callers never need to unwrap further detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Service { message: String },
    /// The request never completed (DNS, refused connection, timeout) or
    /// the success body was unreadable.
    #[error("{message}")]
    Transport { message: String },
}

impl RegistryError {
    pub fn message(&self) -> &str {
        match self {
            RegistryError::Service { message } | RegistryError::Transport { message } => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RegistryError::Transport { .. })
    }
}

#[derive(Debug, Error)]
#[error("invalid registry base url '{url}': {source}")]
pub struct InvalidBaseUrl {
    url: String,
    source: url::ParseError,
}

/// Seam between the registry and everything that drives it; lets the
/// backend worker run against a test double.
#[async_trait]
pub trait StudentRegistry: Send + Sync {
    async fn create_student(&self, request: NewStudent) -> Result<Student, RegistryError>;
    async fn delete_student(&self, request: DeleteStudent) -> Result<String, RegistryError>;
    async fn list_students(&self) -> Result<Vec<Student>, RegistryError>;
}

#[derive(Debug)]
pub struct RegistryClient {
    http: Client,
    base_url: String,
}

impl RegistryClient {
    /// Validates the base endpoint up front; operations then only ever
    /// fail with a [`RegistryError`].
    pub fn new(base_url: &str) -> Result<Self, InvalidBaseUrl> {
        Url::parse(base_url).map_err(|source| InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create_student_impl(&self, request: NewStudent) -> Result<Student, RegistryError> {
        let response = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|err| transport_failure(CREATE_TRANSPORT_MESSAGE, &err))?;
        let student: Student =
            decode_response(response, CREATE_SERVICE_FALLBACK, CREATE_TRANSPORT_MESSAGE).await?;
        debug!(student_id = student.id.0, "registry: student created");
        Ok(student)
    }

    async fn delete_student_impl(&self, request: DeleteStudent) -> Result<String, RegistryError> {
        let response = self
            .http
            .delete(format!("{}/deleteUser", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|err| transport_failure(DELETE_TRANSPORT_MESSAGE, &err))?;
        let outcome: DeleteOutcome =
            decode_response(response, DELETE_SERVICE_FALLBACK, DELETE_TRANSPORT_MESSAGE).await?;
        Ok(outcome.message)
    }

    async fn list_students_impl(&self) -> Result<Vec<Student>, RegistryError> {
        let response = self
            .http
            .get(format!("{}/students", self.base_url))
            .send()
            .await
            .map_err(|err| transport_failure(LIST_TRANSPORT_MESSAGE, &err))?;
        // Service order is preserved as-is; the client never sorts.
        decode_response(response, LIST_SERVICE_FALLBACK, LIST_TRANSPORT_MESSAGE).await
    }
}

#[async_trait]
impl StudentRegistry for RegistryClient {
    async fn create_student(&self, request: NewStudent) -> Result<Student, RegistryError> {
        let span = info_span!("POST /register", email = %request.email);
        self.create_student_impl(request).instrument(span).await
    }

    async fn delete_student(&self, request: DeleteStudent) -> Result<String, RegistryError> {
        let span = info_span!("DELETE /deleteUser", email = %request.email);
        self.delete_student_impl(request).instrument(span).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, RegistryError> {
        let span = info_span!("GET /students");
        self.list_students_impl().instrument(span).await
    }
}

fn transport_failure(message: &str, err: &reqwest::Error) -> RegistryError {
    debug!("registry: transport failure: {err}");
    RegistryError::Transport {
        message: message.to_string(),
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
    service_fallback: &str,
    transport_message: &str,
) -> Result<T, RegistryError> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message_or(service_fallback),
            Err(_) => service_fallback.to_string(),
        };
        debug!(status = status.as_u16(), "registry: service reported failure");
        return Err(RegistryError::Service { message });
    }
    response.json::<T>().await.map_err(|err| {
        debug!("registry: unreadable success body: {err}");
        RegistryError::Transport {
            message: transport_message.to_string(),
        }
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
