//! Backend worker: executes queued create-requests on its own thread and
//! reports each outcome back as a [`UiEvent`].

use std::thread::JoinHandle;

use anyhow::Context;
use client_core::StudentService;
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{RemoteResult, UiEvent},
        orchestration::BackendDispatcher,
    },
};

pub fn launch<S>(
    service: S,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> anyhow::Result<JoinHandle<()>>
where
    S: StudentService + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build backend runtime")?;

    std::thread::Builder::new()
        .name("registration-backend".to_string())
        .spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::CreateStudent { form_id, record } => {
                        let result: RemoteResult =
                            runtime.block_on(service.create_student(&record)).into();
                        match &result {
                            RemoteResult::Ok(()) => {
                                info!(%form_id, "create-student request accepted")
                            }
                            RemoteResult::Err(err) => warn!(
                                %form_id,
                                message = err.message(),
                                "create-student request failed"
                            ),
                            RemoteResult::Pending => {}
                        }
                        if ui_tx
                            .send(UiEvent::StudentCreateSettled { form_id, result })
                            .is_err()
                        {
                            debug!("ui event receiver dropped; stopping backend worker");
                            return;
                        }
                    }
                    BackendCommand::Shutdown => break,
                }
            }
            let _ = ui_tx.send(UiEvent::BackendStopped {
                reason: "registration backend stopped".to_string(),
            });
        })
        .context("failed to spawn backend worker thread")
}

/// A running backend worker plus both ends the form side needs.
pub struct BackendHandle {
    dispatcher: BackendDispatcher,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    worker: Option<JoinHandle<()>>,
}

impl BackendHandle {
    pub fn start<S>(service: S, queue_capacity: usize) -> anyhow::Result<Self>
    where
        S: StudentService + 'static,
    {
        let (cmd_tx, cmd_rx) = bounded(queue_capacity.max(1));
        let (ui_tx, ui_rx) = crossbeam_channel::unbounded();
        let worker = launch(service, cmd_rx, ui_tx)?;
        Ok(Self {
            dispatcher: BackendDispatcher::new(cmd_tx.clone()),
            cmd_tx,
            ui_rx,
            worker: Some(worker),
        })
    }

    pub fn dispatcher(&self) -> BackendDispatcher {
        self.dispatcher.clone()
    }

    pub fn events(&self) -> &Receiver<UiEvent> {
        &self.ui_rx
    }

    /// Asks the worker to stop after the requests already queued, then waits for it.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            // Blocking send: the worker drains the queue, so space frees up.
            let _ = self.cmd_tx.send(BackendCommand::Shutdown);
            if worker.join().is_err() {
                warn!("backend worker panicked");
            }
        }
    }
}

impl Drop for BackendHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
