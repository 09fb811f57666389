pub use crate::SiteProvider;
pub use crate::contact::{ContactController, ContactForm, ContactWorkflow};
pub use crate::feedback::{Notification, NotificationCenter, NotificationId, Severity};
pub use crate::form::{
    FieldKey, FieldLens, FieldSpec, FormController, FormModel, FormOptions, RevalidateMode,
    ValidationMode,
};
pub use crate::i18n::{I18nManager, Locale};
pub use crate::motion::{MotionConfig, MotionLevel};
pub use crate::submission::{SimulatedEndpoint, SubmissionEndpoint, SubmissionError};
pub use crate::view::{FieldErrorText, NotificationBanner, SubmitButton};
pub use crate::workflow::{FormWorkflow, SubmitControl, SubmitOutcome, WorkflowOptions};
