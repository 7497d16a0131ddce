//! Registration form controller: owns the draft and drives one create-request at a time.

use shared::domain::{Field, FormId, Section};
use tracing::{debug, info, warn};

use crate::{
    controller::{
        events::{RemoteError, RemoteResult, UiEvent},
        orchestration::RequestDispatcher,
    },
    draft::{FieldValue, StudentDraft},
    error::FormError,
    notify::{Notification, Notifier},
    schema::{self, FieldErrors},
    sections::SectionState,
};

pub const SUCCESS_DESCRIPTION: &str = "Student registered successfully";
pub const FALLBACK_ERROR_DESCRIPTION: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Dispatched,
    AlreadyPending,
    Invalid(FieldErrors),
    DispatchFailed(String),
}

pub struct RegistrationController<D, N> {
    form_id: FormId,
    draft: StudentDraft,
    errors: FieldErrors,
    sections: SectionState,
    /// `None` until the first request is issued.
    mutation: Option<RemoteResult>,
    dispatcher: D,
    notifier: N,
}

impl<D, N> RegistrationController<D, N>
where
    D: RequestDispatcher,
    N: Notifier,
{
    pub fn new(dispatcher: D, notifier: N) -> Self {
        Self {
            form_id: FormId::new(),
            draft: StudentDraft::default(),
            errors: FieldErrors::default(),
            sections: SectionState::default(),
            mutation: None,
            dispatcher,
            notifier,
        }
    }

    pub fn with_draft(mut self, draft: StudentDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Message from the last validation run for `field`, if it failed.
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn sections(&self) -> &SectionState {
        &self.sections
    }

    pub fn toggle_section(&mut self, section: Section) {
        self.sections.toggle(section);
    }

    pub fn is_pending(&self) -> bool {
        self.mutation
            .as_ref()
            .is_some_and(RemoteResult::is_pending)
    }

    pub fn mutation(&self) -> Option<&RemoteResult> {
        self.mutation.as_ref()
    }

    pub fn update_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let field: Field = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<FieldValue>) {
        self.draft.set(field, value.into());
    }

    /// Re-checks one input and updates only its message.
    pub fn validate_field(&mut self, field: Field) -> Option<&str> {
        self.errors
            .replace(field, schema::check_field(&self.draft, field));
        self.errors.get(field)
    }

    /// Validates the current draft and records the per-field messages.
    pub fn validate(&mut self) -> bool {
        match schema::validate(&self.draft) {
            Ok(_) => {
                self.errors = FieldErrors::default();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_pending() {
            debug!(form_id = %self.form_id, "submit ignored while a request is in flight");
            return SubmitOutcome::AlreadyPending;
        }

        let record = match schema::validate(&self.draft) {
            Ok(record) => record,
            Err(errors) => {
                debug!(form_id = %self.form_id, %errors, "registration draft rejected");
                self.errors = errors.clone();
                return SubmitOutcome::Invalid(errors);
            }
        };
        self.errors = FieldErrors::default();

        if let Err(err) = self.dispatcher.dispatch(self.form_id, record) {
            let description = err.to_string();
            self.notifier.notify(Notification::error(description.clone()));
            return SubmitOutcome::DispatchFailed(description);
        }

        info!(form_id = %self.form_id, "create-student request dispatched");
        self.mutation = Some(RemoteResult::Pending);
        SubmitOutcome::Dispatched
    }

    /// Applies the create-request lifecycle. Results that arrive while nothing is
    /// pending are dropped.
    pub fn apply(&mut self, result: RemoteResult) {
        if result.is_pending() {
            return;
        }
        if !self.is_pending() {
            warn!(
                form_id = %self.form_id,
                ?result,
                "dropping create-student result with no request in flight"
            );
            return;
        }

        match &result {
            RemoteResult::Ok(()) => {
                info!(form_id = %self.form_id, "student registered");
                self.notifier
                    .notify(Notification::success(SUCCESS_DESCRIPTION));
                self.reset();
            }
            RemoteResult::Err(err) => {
                warn!(
                    form_id = %self.form_id,
                    message = err.message(),
                    "student registration failed"
                );
                let description = if err.message().trim().is_empty() {
                    FALLBACK_ERROR_DESCRIPTION.to_string()
                } else {
                    err.message().to_string()
                };
                self.notifier.notify(Notification::error(description));
            }
            RemoteResult::Pending => {}
        }
        self.mutation = Some(result);
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::StudentCreateSettled { form_id, result } if form_id == self.form_id => {
                self.apply(result);
            }
            UiEvent::StudentCreateSettled { form_id, .. } => {
                debug!(
                    form_id = %self.form_id,
                    other = %form_id,
                    "ignoring result for another form"
                );
            }
            UiEvent::BackendStopped { reason } => {
                if self.is_pending() {
                    self.apply(RemoteResult::Err(RemoteError::new(reason)));
                }
            }
        }
    }

    fn reset(&mut self) {
        self.draft = StudentDraft::default();
        self.errors = FieldErrors::default();
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
