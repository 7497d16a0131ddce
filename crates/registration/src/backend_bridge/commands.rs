//! Commands queued from the form controller to the backend worker.

use shared::domain::{FormId, StudentEnrollmentRecord};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    CreateStudent {
        form_id: FormId,
        record: StudentEnrollmentRecord,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::CreateStudent { .. } => "create_student",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
