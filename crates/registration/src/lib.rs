//! Student registration form: draft state, schema validation, submission
//! lifecycle and the small pieces of navigation state around it.

pub mod backend_bridge;
pub mod controller;
pub mod draft;
pub mod error;
pub mod menu;
pub mod notify;
pub mod schema;
pub mod sections;

pub use controller::{
    events::{RemoteError, RemoteResult, UiEvent},
    form::{RegistrationController, SubmitOutcome},
};
pub use draft::{FieldValue, StudentDraft};
pub use error::FormError;
pub use schema::{validate, FieldErrors};
pub use shared::domain::{Field, Section};

#[cfg(test)]
pub(crate) mod test_support;
