use super::*;
use crate::{notify::NotificationVariant, test_support::valid_draft};
use shared::domain::{FormId, Gender, StudentEnrollmentRecord};
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Default)]
struct RecordingDispatcher {
    sent: Rc<RefCell<Vec<(FormId, StudentEnrollmentRecord)>>>,
    queue_full: bool,
}

impl RequestDispatcher for RecordingDispatcher {
    fn dispatch(
        &mut self,
        form_id: FormId,
        record: StudentEnrollmentRecord,
    ) -> Result<(), FormError> {
        if self.queue_full {
            return Err(FormError::QueueFull);
        }
        self.sent.borrow_mut().push((form_id, record));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}

fn controller_with(
    draft: StudentDraft,
    notifier: &RecordingNotifier,
) -> (
    RegistrationController<RecordingDispatcher, &RecordingNotifier>,
    RecordingDispatcher,
) {
    let dispatcher = RecordingDispatcher::default();
    let controller =
        RegistrationController::new(dispatcher.clone(), notifier).with_draft(draft);
    (controller, dispatcher)
}

#[test]
fn valid_submit_dispatches_exactly_one_request() {
    let notifier = RecordingNotifier::default();
    let (mut controller, dispatcher) = controller_with(valid_draft(), &notifier);

    assert_eq!(controller.submit(), SubmitOutcome::Dispatched);
    assert!(controller.is_pending());
    assert_eq!(controller.submit(), SubmitOutcome::AlreadyPending);
    assert_eq!(controller.submit(), SubmitOutcome::AlreadyPending);

    let sent = dispatcher.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, controller.form_id());
    assert_eq!(sent[0].1.admission_number, "ADM-2024-017");
    assert!(notifier.seen.borrow().is_empty());
}

#[test]
fn invalid_submit_never_dispatches() {
    let notifier = RecordingNotifier::default();
    let (mut controller, dispatcher) = controller_with(valid_draft(), &notifier);
    controller
        .update_field("studentMobile", "0312345")
        .expect("known field");

    let SubmitOutcome::Invalid(errors) = controller.submit() else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::StudentMobile]);
    assert_eq!(
        controller.field_error(Field::StudentMobile),
        Some("Invalid mobile number")
    );
    assert!(!controller.is_pending());
    assert!(dispatcher.sent.borrow().is_empty());
    assert!(notifier.seen.borrow().is_empty());
}

#[test]
fn remote_success_resets_draft_and_notifies() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(valid_draft(), &notifier);
    controller.toggle_section(Section::Personal);

    assert_eq!(controller.submit(), SubmitOutcome::Dispatched);
    controller.apply(RemoteResult::Pending);
    assert!(controller.is_pending());
    controller.apply(RemoteResult::Ok(()));

    assert!(!controller.is_pending());
    assert_eq!(controller.draft(), &StudentDraft::default());
    assert_eq!(controller.draft().gender, Gender::Custom.as_str());
    assert_eq!(controller.draft().discount, Some(0.0));
    assert_eq!(controller.draft().discount_by_percent, Some(0.0));
    assert!(controller.field_errors().is_empty());
    assert!(controller.sections().is_expanded(Section::Personal));

    let seen = notifier.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].title, "Success");
    assert_eq!(seen[0].description, "Student registered successfully");
    assert_eq!(seen[0].variant, NotificationVariant::Default);
}

#[test]
fn remote_failure_keeps_draft_and_shows_message() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(valid_draft(), &notifier);
    let before = controller.draft().clone();

    controller.submit();
    controller.apply(RemoteResult::Err(RemoteError::new(
        "Admission number already registered",
    )));

    assert!(!controller.is_pending());
    assert_eq!(controller.draft(), &before);
    let seen = notifier.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].title, "Error");
    assert_eq!(seen[0].description, "Admission number already registered");
    assert!(seen[0].is_destructive());
}

#[test]
fn remote_failure_without_message_uses_fallback() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(valid_draft(), &notifier);

    controller.submit();
    controller.apply(RemoteResult::Err(RemoteError::new("")));

    assert_eq!(notifier.seen.borrow()[0].description, "An error occurred");
}

#[test]
fn failed_request_can_be_resubmitted() {
    let notifier = RecordingNotifier::default();
    let (mut controller, dispatcher) = controller_with(valid_draft(), &notifier);

    controller.submit();
    controller.apply(RemoteResult::Err(RemoteError::new("timeout")));
    controller
        .update_field("admissionNumber", "ADM-2024-018")
        .expect("known field");
    assert_eq!(controller.submit(), SubmitOutcome::Dispatched);

    let sent = dispatcher.sent.borrow();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].1.admission_number, "ADM-2024-018");
}

#[test]
fn stray_result_is_ignored() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(valid_draft(), &notifier);
    let before = controller.draft().clone();

    controller.apply(RemoteResult::Ok(()));

    assert_eq!(controller.draft(), &before);
    assert!(notifier.seen.borrow().is_empty());
    assert!(controller.mutation().is_none());
}

#[test]
fn events_for_other_forms_are_ignored() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(valid_draft(), &notifier);
    controller.submit();

    controller.handle_event(UiEvent::StudentCreateSettled {
        form_id: FormId::new(),
        result: RemoteResult::Ok(()),
    });
    assert!(controller.is_pending());

    controller.handle_event(UiEvent::StudentCreateSettled {
        form_id: controller.form_id(),
        result: RemoteResult::Ok(()),
    });
    assert!(!controller.is_pending());
}

#[test]
fn backend_stop_fails_pending_request() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(valid_draft(), &notifier);
    controller.submit();

    controller.handle_event(UiEvent::BackendStopped {
        reason: "registration backend stopped".to_string(),
    });

    assert!(!controller.is_pending());
    assert_eq!(
        notifier.seen.borrow()[0].description,
        "registration backend stopped"
    );
}

#[test]
fn dispatch_failure_leaves_form_editable() {
    let notifier = RecordingNotifier::default();
    let dispatcher = RecordingDispatcher {
        queue_full: true,
        ..RecordingDispatcher::default()
    };
    let mut controller =
        RegistrationController::new(dispatcher, &notifier).with_draft(valid_draft());

    assert!(matches!(controller.submit(), SubmitOutcome::DispatchFailed(_)));
    assert!(!controller.is_pending());
    assert!(notifier.seen.borrow()[0].is_destructive());
}

#[test]
fn unknown_field_name_is_rejected() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(StudentDraft::default(), &notifier);

    let err = controller
        .update_field("favouriteColour", "green")
        .expect_err("unknown field");
    assert!(matches!(err, FormError::UnknownField(_)));
    assert_eq!(controller.draft(), &StudentDraft::default());
}

#[test]
fn updating_a_field_keeps_last_validation_message() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(StudentDraft::default(), &notifier);

    assert!(!controller.validate());
    assert_eq!(
        controller.field_error(Field::Caste),
        Some("Caste is required")
    );

    controller.update_field("caste", "Arain").expect("known field");
    assert_eq!(
        controller.field_error(Field::Caste),
        Some("Caste is required")
    );

    assert_eq!(controller.validate_field(Field::Caste), None);
    assert_eq!(
        controller.field_error(Field::AdmissionNumber),
        Some("Admission Number is required")
    );
}

#[test]
fn numeric_updates_accept_text_and_numbers() {
    let notifier = RecordingNotifier::default();
    let (mut controller, _dispatcher) = controller_with(valid_draft(), &notifier);

    controller.update_field("discount", "25").expect("known field");
    controller
        .update_field("discountbypercent", 100.0)
        .expect("known field");

    assert_eq!(controller.draft().discount, Some(25.0));
    assert_eq!(controller.draft().discount_by_percent, Some(100.0));
    assert!(controller.validate());
}
