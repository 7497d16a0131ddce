use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::StudentEnrollmentRecord,
    error::ErrorCode,
    protocol::{parse_error_body, CreateStudentRequest},
};
use tracing::{info, warn};
use url::Url;

pub mod error;

pub use error::ClientError;

pub const DEFAULT_CREATE_STUDENT_PATH: &str = "api/trpc/student.createStudent";

/// Remote side of the registration form: accepts one validated enrollment per call.
#[async_trait]
pub trait StudentService: Send + Sync {
    async fn create_student(&self, record: &StudentEnrollmentRecord) -> Result<(), ClientError>;
}

pub struct MissingStudentService;

#[async_trait]
impl StudentService for MissingStudentService {
    async fn create_student(&self, _record: &StudentEnrollmentRecord) -> Result<(), ClientError> {
        Err(ClientError::Unavailable(
            "no student service configured".to_string(),
        ))
    }
}

#[async_trait]
impl<T> StudentService for std::sync::Arc<T>
where
    T: StudentService + ?Sized,
{
    async fn create_student(&self, record: &StudentEnrollmentRecord) -> Result<(), ClientError> {
        (**self).create_student(record).await
    }
}

/// Joins the service base url and the procedure path, keeping any base path prefix.
pub fn endpoint_url(server_url: &str, procedure_path: &str) -> Result<Url, ClientError> {
    let base = format!("{}/", server_url.trim().trim_end_matches('/'));
    let invalid = |source| ClientError::InvalidEndpoint {
        url: server_url.to_string(),
        source,
    };
    Url::parse(&base)
        .and_then(|base| base.join(procedure_path.trim().trim_start_matches('/')))
        .map_err(invalid)
}

#[derive(Debug, Clone)]
pub struct HttpStudentClient {
    http: Client,
    endpoint: Url,
}

impl HttpStudentClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Builder)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl StudentService for HttpStudentClient {
    async fn create_student(&self, record: &StudentEnrollmentRecord) -> Result<(), ClientError> {
        info!(
            endpoint = %self.endpoint,
            admission_number = %record.admission_number,
            "posting create-student request"
        );
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&CreateStudentRequest::new(record.clone()))
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        let body = res.text().await.unwrap_or_default();
        let (code, message) = match parse_error_body(&body) {
            Some(api_error) => (api_error.code(), api_error.message),
            None => (
                ErrorCode::Unknown,
                status.canonical_reason().unwrap_or_default().to_string(),
            ),
        };
        warn!(
            status = status.as_u16(),
            ?code,
            message = %message,
            "create-student request rejected"
        );
        Err(ClientError::Rejected {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
