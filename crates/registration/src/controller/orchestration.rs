//! Hand-off from the form controller to the backend command queue.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::domain::{FormId, StudentEnrollmentRecord};

use crate::{
    backend_bridge::commands::BackendCommand, controller::events::UiEvent,
    controller::form::RegistrationController, error::FormError, notify::Notifier,
};

/// Issues create-requests on behalf of a form. Must not block.
pub trait RequestDispatcher {
    fn dispatch(
        &mut self,
        form_id: FormId,
        record: StudentEnrollmentRecord,
    ) -> Result<(), FormError>;
}

#[derive(Debug, Clone)]
pub struct BackendDispatcher {
    cmd_tx: Sender<BackendCommand>,
}

impl BackendDispatcher {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self { cmd_tx }
    }
}

impl RequestDispatcher for BackendDispatcher {
    fn dispatch(
        &mut self,
        form_id: FormId,
        record: StudentEnrollmentRecord,
    ) -> Result<(), FormError> {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::CreateStudent { form_id, record })
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), FormError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued form->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            Err(FormError::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(FormError::BackendDisconnected)
        }
    }
}

/// Feeds every event already waiting on `ui_rx` into `controller`; returns how many were applied.
pub fn drain_ui_events<D, N>(
    ui_rx: &Receiver<UiEvent>,
    controller: &mut RegistrationController<D, N>,
) -> usize
where
    D: RequestDispatcher,
    N: Notifier,
{
    let mut applied = 0;
    for event in ui_rx.try_iter() {
        controller.handle_event(event);
        applied += 1;
    }
    applied
}
