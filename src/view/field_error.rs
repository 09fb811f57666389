use gpui::{IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div, rgb};

use crate::form::{FieldLens, FormController, FormModel, FormResult, ValidationError};
use crate::i18n::I18nManager;

/// The message shown under an input. Renders empty when there is none.
#[derive(IntoElement)]
pub struct FieldErrorText {
    message: Option<SharedString>,
}

impl FieldErrorText {
    pub fn new(message: Option<SharedString>) -> Self {
        Self { message }
    }

    pub fn for_field<T, E, L>(
        form: &FormController<T, E>,
        lens: L,
        i18n: &I18nManager,
    ) -> FormResult<Self>
    where
        T: FormModel,
        E: ValidationError,
        L: FieldLens<T>,
    {
        Ok(Self::new(form.field_error_for_display(lens, i18n)?))
    }

    pub fn message(&self) -> Option<&SharedString> {
        self.message.as_ref()
    }
}

impl RenderOnce for FieldErrorText {
    fn render(self, _window: &mut Window, _cx: &mut gpui::App) -> impl IntoElement {
        div()
            .text_sm()
            .mt_1()
            .text_color(rgb(0xef4444))
            .children(self.message)
    }
}
