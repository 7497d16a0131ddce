use serde::{Deserialize, Serialize};

use crate::{domain::StudentEnrollmentRecord, error::ApiError};

/// Envelope the remote procedure endpoint expects around its input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcInput<T> {
    pub json: T,
}

pub type CreateStudentRequest = RpcInput<StudentEnrollmentRecord>;

impl CreateStudentRequest {
    pub fn new(record: StudentEnrollmentRecord) -> Self {
        Self { json: record }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcErrorSlot {
    Wrapped { json: ApiError },
    Bare(ApiError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorResponse {
    pub error: RpcErrorSlot,
}

impl RpcErrorResponse {
    pub fn into_api_error(self) -> ApiError {
        match self.error {
            RpcErrorSlot::Wrapped { json } => json,
            RpcErrorSlot::Bare(error) => error,
        }
    }
}

/// Extracts the server-reported error from a failed response body.
///
/// Accepts `{"error":{"json":{..}}}`, `{"error":{..}}` and a bare
/// `{"message":..}` object.
pub fn parse_error_body(body: &str) -> Option<ApiError> {
    if let Ok(response) = serde_json::from_str::<RpcErrorResponse>(body) {
        return Some(response.into_api_error());
    }
    serde_json::from_str::<ApiError>(body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn parses_wrapped_rpc_error() {
        let body = concat!(
            r#"{"error":{"json":{"message":"Admission number taken","code":-32600,"#,
            r#""data":{"code":"CONFLICT","httpStatus":409,"path":"student.createStudent"}}}}"#
        );
        let error = parse_error_body(body).expect("rpc error");
        assert_eq!(error.message, "Admission number taken");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[test]
    fn parses_bare_message() {
        let error = parse_error_body(r#"{"message":"nope"}"#).expect("bare error");
        assert_eq!(error.message, "nope");
        assert_eq!(error.code(), ErrorCode::Unknown);
    }

    #[test]
    fn unrecognized_body_yields_none() {
        assert!(parse_error_body("<html>bad gateway</html>").is_none());
        assert!(parse_error_body(r#"{"status":"down"}"#).is_none());
    }
}
