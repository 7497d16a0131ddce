use shared::domain::UnknownField;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error("request queue is full; please retry")]
    QueueFull,
    #[error("registration backend is not running; restart the form and retry")]
    BackendDisconnected,
}
