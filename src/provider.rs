use std::sync::Arc;

use crate::contact::{ContactForm, ContactWorkflow};
use crate::feedback::NotificationCenter;
use crate::form::FormResult;
use crate::i18n::{I18nManager, Locale};
use crate::motion::MotionConfig;
use crate::submission::SubmissionEndpoint;
use crate::workflow::{Spawner, WorkflowOptions};

/// App-wide services for the site, installed once as a gpui global.
#[derive(Default)]
pub struct SiteProvider {
    notifications: NotificationCenter,
    i18n: I18nManager,
    motion: MotionConfig,
    workflow_options: WorkflowOptions,
}

impl gpui::Global for SiteProvider {}

impl SiteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_locale(self, locale: impl Into<Locale>) -> Self {
        self.i18n.set_locale(locale);
        self
    }

    pub fn set_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    pub fn set_workflow_options(mut self, options: WorkflowOptions) -> Self {
        self.workflow_options = options;
        self
    }

    pub fn init(mut self, cx: &mut gpui::App) {
        self.notifications = self.notifications.with_motion(self.motion);
        log::debug!(
            "site provider installed (locale {})",
            self.i18n.resolved_locale()
        );
        cx.set_global(self);
    }

    pub fn notifications(cx: &gpui::App) -> NotificationCenter {
        cx.global::<SiteProvider>().notifications.clone()
    }

    pub fn i18n(cx: &gpui::App) -> I18nManager {
        cx.global::<SiteProvider>().i18n.clone()
    }

    pub fn motion(cx: &gpui::App) -> MotionConfig {
        cx.global::<SiteProvider>().motion
    }

    pub fn workflow_options(cx: &gpui::App) -> WorkflowOptions {
        cx.global::<SiteProvider>().workflow_options
    }

    /// Runs detached futures on gpui's background executor.
    pub fn spawner(cx: &gpui::App) -> Spawner {
        let executor = cx.background_executor().clone();
        Arc::new(move |future| executor.spawn(future).detach())
    }

    /// A contact form wired to the shared notification slot, locale and
    /// executor.
    pub fn contact_workflow(
        cx: &gpui::App,
        endpoint: impl SubmissionEndpoint + 'static,
    ) -> FormResult<ContactWorkflow> {
        Ok(ContactForm::workflow(endpoint, Self::spawner(cx))?
            .with_notifications(Self::notifications(cx))
            .with_i18n(Self::i18n(cx))
            .with_options(Self::workflow_options(cx)))
    }
}
