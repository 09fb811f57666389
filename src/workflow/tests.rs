use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::executor::block_on;
use pretty_assertions::assert_eq;

use super::*;
use crate::contact::{ContactForm, ContactWorkflow};
use crate::feedback::NotificationPhase;
use crate::form::{FieldRuleError, SubmitState};
use crate::motion::{MotionConfig, MotionLevel};
use crate::submission::{BoxedSubmissionFuture, SimulatedEndpoint};

#[derive(Clone, Copy)]
enum Reply {
    Accept,
    Reject,
    PanicBeforeFuture,
    PanicWhilePolling,
    Hang,
}

#[derive(Clone)]
struct CountingEndpoint {
    calls: Arc<AtomicUsize>,
    reply: Reply,
    delay: Duration,
}

impl CountingEndpoint {
    fn new(reply: Reply) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            reply,
            delay: Duration::from_millis(5),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SubmissionEndpoint for CountingEndpoint {
    fn submit<'a>(&'a self, _payload: &'a SubmissionPayload) -> BoxedSubmissionFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Reply::PanicBeforeFuture = self.reply {
            panic!("endpoint refused to start");
        }
        Box::pin(async move {
            Delay::new(self.delay).await;
            match self.reply {
                Reply::Accept => Ok(()),
                Reply::Reject => Err(SubmissionError::Rejected("Submission failed".to_string())),
                Reply::PanicWhilePolling => panic!("endpoint blew up"),
                Reply::Hang => futures::future::pending().await,
                Reply::PanicBeforeFuture => Ok(()),
            }
        })
    }
}

/// Runs each detached future to completion on its own thread.
fn thread_spawner() -> Spawner {
    Arc::new(|future| {
        std::thread::spawn(move || block_on(future));
    })
}

fn workflow(endpoint: CountingEndpoint) -> ContactWorkflow {
    ContactForm::workflow(endpoint, thread_spawner())
        .expect("contact workflow")
        .with_i18n(I18nManager::new().with_locale("en"))
}

fn fill(workflow: &ContactWorkflow) {
    let fields = ContactForm::fields();
    workflow
        .handle_input(fields.name(), "Sara Ahmadi".into())
        .expect("name");
    workflow
        .handle_input(fields.email(), "sara@arbe.ir".into())
        .expect("email");
    workflow
        .handle_input(fields.phone(), "+98 912 345 6789".into())
        .expect("phone");
    workflow
        .handle_input(fields.message(), "We'd like a quote for a villa.".into())
        .expect("message");
}

fn current_message(workflow: &ContactWorkflow) -> Option<(Severity, String)> {
    workflow
        .notifications()
        .current()
        .map(|entry| (entry.severity, entry.message.to_string()))
}

#[test_log::test]
fn valid_submission_notifies_success_and_clears_fields() {
    let endpoint = CountingEndpoint::new(Reply::Accept);
    let workflow = workflow(endpoint.clone());
    fill(&workflow);

    let outcome = block_on(workflow.submit()).expect("submit");

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(endpoint.calls(), 1);
    assert_eq!(
        current_message(&workflow),
        Some((Severity::Success, "Your message was sent successfully".to_string()))
    );
    assert_eq!(workflow.form().model().expect("model"), ContactForm::default());
    assert_eq!(
        workflow.form().submit_state().expect("state"),
        SubmitState::Succeeded
    );
    assert!(!workflow.control().is_disabled());
}

#[test_log::test]
fn empty_required_field_blocks_the_endpoint() {
    let endpoint = CountingEndpoint::new(Reply::Accept);
    let workflow = workflow(endpoint.clone());
    fill(&workflow);
    let fields = ContactForm::fields();
    workflow
        .handle_input(fields.phone(), "".into())
        .expect("clear phone");

    let outcome = block_on(workflow.submit()).expect("submit");

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(endpoint.calls(), 0);
    let phone = workflow
        .form()
        .field_meta(fields.phone())
        .expect("meta")
        .expect("phone is registered");
    assert_eq!(phone.errors, vec![FieldRuleError::Required]);
    assert_eq!(
        workflow
            .form()
            .field_error_for_display(fields.phone(), workflow.i18n())
            .expect("display error"),
        Some("This field is required".into())
    );
    assert_eq!(
        current_message(&workflow).map(|(severity, _)| severity),
        Some(Severity::Error)
    );
    assert_eq!(
        workflow.form().model().expect("model").name.to_string(),
        "Sara Ahmadi"
    );
    assert!(!workflow.control().is_disabled());
}

#[test_log::test]
fn failed_submission_keeps_values_and_reports_error() {
    let endpoint = CountingEndpoint::new(Reply::Reject);
    let workflow = workflow(endpoint.clone());
    fill(&workflow);

    let outcome = block_on(workflow.submit()).expect("submit");

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(SubmissionError::Rejected("Submission failed".to_string()))
    );
    assert_eq!(
        workflow.form().submit_state().expect("state"),
        SubmitState::Failed
    );
    assert_eq!(
        workflow.form().model().expect("model").email.to_string(),
        "sara@arbe.ir"
    );
    assert_eq!(
        current_message(&workflow).map(|(severity, _)| severity),
        Some(Severity::Error)
    );
    assert!(!workflow.control().is_disabled());

    // A failed attempt can be retried by hand.
    let retry = block_on(workflow.submit()).expect("retry");
    assert!(matches!(retry, SubmitOutcome::Failed(_)));
    assert_eq!(endpoint.calls(), 2);
}

#[test_log::test]
fn overlapping_submits_reach_the_endpoint_once() {
    let endpoint = CountingEndpoint::new(Reply::Accept);
    let workflow = workflow(endpoint.clone());
    fill(&workflow);

    let (first, second) = block_on(async { futures::join!(workflow.submit(), workflow.submit()) });

    assert_eq!(first.expect("first"), SubmitOutcome::Sent);
    assert_eq!(second.expect("second"), SubmitOutcome::Busy);
    assert_eq!(endpoint.calls(), 1);
}

#[test_log::test]
fn control_is_disabled_only_while_in_flight() {
    let endpoint = CountingEndpoint::new(Reply::Accept);
    let workflow = workflow(endpoint);
    fill(&workflow);
    assert_eq!(workflow.control().label().to_string(), "Send message");

    let observer = workflow.clone();
    let watch = async move {
        futures::pending!();
        (observer.control().is_disabled(), observer.control().label())
    };
    // `watch` is polled first, so its second poll sees the submission still in flight.
    let ((disabled, label), outcome) = block_on(async { futures::join!(watch, workflow.submit()) });

    assert_eq!(outcome.expect("submit"), SubmitOutcome::Sent);
    assert!(disabled);
    assert_eq!(label.to_string(), "Sending...");
    assert!(!workflow.control().is_disabled());
}

#[test_log::test]
fn endpoint_panics_become_failures() {
    for reply in [Reply::PanicBeforeFuture, Reply::PanicWhilePolling] {
        let endpoint = CountingEndpoint::new(reply);
        let workflow = workflow(endpoint.clone());
        fill(&workflow);

        let outcome = block_on(workflow.submit()).expect("submit");

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmissionError::Panicked(_))
        ));
        assert_eq!(endpoint.calls(), 1);
        assert!(!workflow.control().is_disabled());
        assert_eq!(
            workflow.form().submit_state().expect("state"),
            SubmitState::Failed
        );
    }
}

#[test_log::test]
fn hanging_endpoint_times_out() {
    let endpoint = CountingEndpoint::new(Reply::Hang);
    let workflow = workflow(endpoint)
        .with_options(WorkflowOptions::default().submit_timeout(Some(Duration::from_millis(20))));
    fill(&workflow);

    let outcome = block_on(workflow.submit()).expect("submit");

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(SubmissionError::TimedOut(Duration::from_millis(20)))
    );
    assert!(!workflow.control().is_disabled());
}

#[test_log::test]
fn notifications_expire_through_the_spawner() {
    let spawned: Arc<Mutex<Vec<BoxFuture<'static, ()>>>> = Arc::default();
    let sink = spawned.clone();
    let spawner: Spawner = Arc::new(move |future| {
        sink.lock().expect("spawn queue").push(future);
    });
    let notifications =
        NotificationCenter::new().with_motion(MotionConfig::new().level(MotionLevel::None));
    let workflow = ContactForm::workflow(CountingEndpoint::new(Reply::Accept), spawner)
        .expect("contact workflow")
        .with_notifications(notifications)
        .with_options(WorkflowOptions::default().notification_ms(10));
    fill(&workflow);

    block_on(workflow.submit()).expect("submit");
    let current = workflow.notifications().current().expect("success notice");
    assert_eq!(current.severity, Severity::Success);
    assert_eq!(current.phase, NotificationPhase::Visible);
    assert_eq!(current.auto_close_ms, Some(10));

    let pending = std::mem::take(&mut *spawned.lock().expect("spawn queue"));
    assert_eq!(pending.len(), 1);
    for future in pending {
        block_on(future);
    }
    assert!(workflow.notifications().current().is_none());
}

#[test_log::test]
fn newer_notification_replaces_the_previous_one() {
    let workflow = workflow(CountingEndpoint::new(Reply::Accept));

    let first = workflow.notify(Severity::Error, "notify.review");
    let second = workflow.notify(Severity::Success, "notify.sent");

    assert_ne!(first, second);
    let current = workflow.notifications().current().expect("notification");
    assert_eq!(current.id, Some(second));
    assert!(!workflow.notifications().dismiss(first));
    assert!(workflow.notifications().dismiss(second));
}

#[test_log::test]
fn simulated_endpoint_drives_the_contact_form() {
    let workflow = ContactForm::workflow(
        SimulatedEndpoint::new()
            .delay(Duration::from_millis(1))
            .success_rate(1.0),
        thread_spawner(),
    )
    .expect("workflow");
    fill(&workflow);

    assert_eq!(block_on(workflow.submit()).expect("submit"), SubmitOutcome::Sent);
    assert_eq!(workflow.options(), WorkflowOptions::default());
    assert!(workflow.form().model().expect("model").message.is_empty());
}

#[test_log::test]
fn dropped_submission_does_not_wedge_the_form() {
    let endpoint = CountingEndpoint::new(Reply::Accept);
    let workflow = workflow(endpoint.clone());
    fill(&workflow);

    block_on(async {
        let mut first = Box::pin(workflow.submit());
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(workflow.control().is_disabled());
    });

    assert!(!workflow.control().is_disabled());
    assert_eq!(
        workflow.form().submit_state().expect("state"),
        SubmitState::Failed
    );

    let outcome = block_on(workflow.submit()).expect("resubmit");
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(endpoint.calls(), 2);
}

#[test_log::test]
fn notifications_close_on_their_own() {
    let workflow = workflow(CountingEndpoint::new(Reply::Accept))
        .with_notifications(
            NotificationCenter::new().with_motion(MotionConfig::new().level(MotionLevel::Reduced)),
        )
        .with_options(WorkflowOptions::default().notification_ms(10));

    workflow.notify(Severity::Info, "notify.review");
    assert!(workflow.notifications().is_visible());

    let mut waited = Duration::ZERO;
    while workflow.notifications().is_visible() && waited < Duration::from_secs(2) {
        std::thread::sleep(Duration::from_millis(10));
        waited += Duration::from_millis(10);
    }
    assert!(!workflow.notifications().is_visible());
}
