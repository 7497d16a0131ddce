//! Backend events and the mutation result model consumed by the controller.

use client_core::ClientError;
use shared::domain::FormId;

/// Outcome of the asynchronous create-request, as seen by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResult<T = ()> {
    Pending,
    Ok(T),
    Err(RemoteError),
}

impl<T> RemoteResult<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RemoteResult::Pending)
    }
}

impl<T> From<Result<T, ClientError>> for RemoteResult<T> {
    fn from(value: Result<T, ClientError>) -> Self {
        match value {
            Ok(value) => RemoteResult::Ok(value),
            Err(err) => RemoteResult::Err(RemoteError::from(err)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Server-reported reason; may be empty.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ClientError> for RemoteError {
    fn from(value: ClientError) -> Self {
        Self::new(value.user_message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    StudentCreateSettled {
        form_id: FormId,
        result: RemoteResult,
    },
    BackendStopped {
        reason: String,
    },
}
