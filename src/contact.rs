//! The ARBE site's contact form.

use gpui::SharedString;

use crate::form::{FieldRuleError, FieldSpec, FormController, FormModel, FormOptions, FormResult};
use crate::submission::SubmissionEndpoint;
use crate::workflow::{FormWorkflow, Spawner};

#[derive(Clone, Debug, Default, Eq, PartialEq, FormModel)]
pub struct ContactForm {
    pub name: SharedString,
    pub email: SharedString,
    pub phone: SharedString,
    pub subject: SharedString,
    pub message: SharedString,
}

pub type ContactController = FormController<ContactForm, FieldRuleError>;
pub type ContactWorkflow = FormWorkflow<ContactForm, FieldRuleError>;

impl ContactForm {
    /// An empty form with name, email, phone and message required.
    pub fn controller(options: FormOptions) -> FormResult<ContactController> {
        let controller = ContactController::new(ContactForm::default(), options);
        let fields = ContactForm::fields();
        controller.register_field(fields.name(), FieldSpec::text().required())?;
        controller.register_field(fields.email(), FieldSpec::email().required())?;
        controller.register_field(fields.phone(), FieldSpec::tel().required())?;
        controller.register_field(fields.subject(), FieldSpec::text())?;
        controller.register_field(fields.message(), FieldSpec::text().required())?;
        Ok(controller)
    }

    pub fn workflow(
        endpoint: impl SubmissionEndpoint + 'static,
        spawner: Spawner,
    ) -> FormResult<ContactWorkflow> {
        Ok(FormWorkflow::new(
            Self::controller(FormOptions::default())?,
            endpoint,
            spawner,
        ))
    }
}
