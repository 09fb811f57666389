//! Validate, send once, report: the submit path of a form.

mod control;

#[cfg(test)]
mod tests;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Either, select};
use futures_timer::Delay;

use crate::feedback::{DEFAULT_AUTO_CLOSE_MS, Notification, NotificationCenter, NotificationId, Severity};
use crate::form::{FieldLens, FormController, FormError, FormModel, FormResult, ValidationError};
use crate::i18n::I18nManager;
use crate::submission::{SubmissionEndpoint, SubmissionError, SubmissionPayload, SubmissionResult};

pub use control::{SubmitControl, SubmitGuard};

/// Runs detached futures, such as notification expiry timers.
pub type Spawner = Arc<dyn Fn(BoxFuture<'static, ()>) + Send + Sync>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WorkflowOptions {
    pub notification_ms: u32,
    pub submit_timeout: Option<Duration>,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            notification_ms: DEFAULT_AUTO_CLOSE_MS,
            submit_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl WorkflowOptions {
    pub fn notification_ms(mut self, value: u32) -> Self {
        self.notification_ms = value;
        self
    }

    pub fn submit_timeout(mut self, value: Option<Duration>) -> Self {
        self.submit_timeout = value;
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was still in flight; nothing happened.
    Busy,
    /// At least one field failed validation; the endpoint was not called.
    Invalid,
    Sent,
    Failed(SubmissionError),
}

/// Owns everything one form's submit path touches: the form state, the
/// endpoint, the submit control and the notification slot.
#[derive(Clone)]
pub struct FormWorkflow<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    form: FormController<T, E>,
    endpoint: Arc<dyn SubmissionEndpoint>,
    notifications: NotificationCenter,
    control: SubmitControl,
    i18n: I18nManager,
    options: WorkflowOptions,
    spawner: Spawner,
}

impl<T, E> FormWorkflow<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    /// `spawner` runs notification expiry timers; without it notifications
    /// would never close on their own.
    pub fn new(
        form: FormController<T, E>,
        endpoint: impl SubmissionEndpoint + 'static,
        spawner: Spawner,
    ) -> Self {
        let i18n = I18nManager::new();
        let control = SubmitControl::new(i18n.t("submit.idle"), i18n.t("submit.loading"));
        Self {
            form,
            endpoint: Arc::new(endpoint),
            notifications: NotificationCenter::new(),
            control,
            i18n,
            options: WorkflowOptions::default(),
            spawner,
        }
    }

    pub fn with_notifications(mut self, notifications: NotificationCenter) -> Self {
        self.notifications = notifications;
        self
    }

    /// Switches message language; submit labels are re-read from it.
    pub fn with_i18n(mut self, i18n: I18nManager) -> Self {
        self.control
            .set_labels(i18n.t("submit.idle"), i18n.t("submit.loading"));
        self.i18n = i18n;
        self
    }

    pub fn with_options(mut self, options: WorkflowOptions) -> Self {
        self.options = options;
        self
    }

    pub fn form(&self) -> &FormController<T, E> {
        &self.form
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn i18n(&self) -> &I18nManager {
        &self.i18n
    }

    pub fn options(&self) -> WorkflowOptions {
        self.options
    }

    pub fn handle_blur<L>(&self, lens: L) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        self.form.touch(lens)
    }

    pub fn handle_input<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        self.form.set(lens, value)
    }

    /// Shows `message_key` translated, replacing whatever notification is
    /// on screen, and schedules its expiry.
    pub fn notify(&self, severity: Severity, message_key: &str) -> NotificationId {
        let entry = Notification::new(self.i18n.t(message_key))
            .severity(severity)
            .auto_close_ms(Some(self.options.notification_ms));
        let id = self.notifications.show(entry);
        let center = self.notifications.clone();
        (self.spawner)(Box::pin(async move { center.expire(id).await }));
        id
    }

    /// Validates the whole form and, if valid, sends it once.
    ///
    /// Submission failures are reported through the notification slot and
    /// the returned outcome, never as `Err`; only broken internal state
    /// surfaces as [`FormError`]. The submit control is re-enabled on every
    /// path out of this function.
    pub async fn submit(&self) -> FormResult<SubmitOutcome> {
        let Some(_guard) = self.control.try_begin() else {
            log::debug!("submit ignored: a submission is already in flight");
            return Ok(SubmitOutcome::Busy);
        };

        let model = match self.form.begin_submit() {
            Ok(Some(model)) => model,
            Ok(None) => {
                self.notify(Severity::Error, "notify.review");
                return Ok(SubmitOutcome::Invalid);
            }
            Err(FormError::AlreadySubmitting) => return Ok(SubmitOutcome::Busy),
            Err(error) => return Err(error),
        };

        let in_flight = InFlight {
            form: &self.form,
            settled: false,
        };
        let payload = SubmissionPayload::from_model(&model);
        let result = self.send(&payload).await;
        in_flight.finish(result.is_ok())?;

        match result {
            Ok(()) => {
                log::info!("contact message sent ({} fields)", payload.len());
                self.form.reset_to_initial()?;
                self.notify(Severity::Success, "notify.sent");
                Ok(SubmitOutcome::Sent)
            }
            Err(error) => {
                log::error!("form submission error: {error}");
                self.notify(Severity::Error, "notify.failed");
                Ok(SubmitOutcome::Failed(error))
            }
        }
    }

    async fn send(&self, payload: &SubmissionPayload) -> SubmissionResult {
        let started = std::panic::catch_unwind(AssertUnwindSafe(|| self.endpoint.submit(payload)));
        let call = match started {
            Ok(call) => call,
            Err(panic) => return Err(SubmissionError::Panicked(panic_message(panic.as_ref()))),
        };

        let guarded = AssertUnwindSafe(call).catch_unwind().map(|result| match result {
            Ok(result) => result,
            Err(panic) => Err(SubmissionError::Panicked(panic_message(panic.as_ref()))),
        });

        let Some(timeout) = self.options.submit_timeout else {
            return guarded.await;
        };
        match select(pin!(guarded), Delay::new(timeout)).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(SubmissionError::TimedOut(timeout)),
        }
    }
}

/// Settles the form's submit state as failed when an attempt is abandoned
/// mid-flight, for example because the `submit` future was dropped.
struct InFlight<'a, T, E>
where
    T: FormModel,
    E: ValidationError,
{
    form: &'a FormController<T, E>,
    settled: bool,
}

impl<T, E> InFlight<'_, T, E>
where
    T: FormModel,
    E: ValidationError,
{
    fn finish(mut self, succeeded: bool) -> FormResult<()> {
        self.settled = true;
        self.form.finish_submit(succeeded)
    }
}

impl<T, E> Drop for InFlight<'_, T, E>
where
    T: FormModel,
    E: ValidationError,
{
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        log::warn!("submission abandoned before the endpoint answered");
        if let Err(error) = self.form.finish_submit(false) {
            log::error!("could not settle abandoned submission: {error}");
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
