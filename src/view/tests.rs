use gpui::{AnyElement, IntoElement, Styled};

use super::*;
use crate::contact::ContactForm;
use crate::feedback::{Notification, NotificationCenter, Severity};
use crate::form::{FieldLens, FormModel, FormOptions};
use crate::i18n::I18nManager;
use crate::workflow::SubmitControl;

fn into_any(element: impl IntoElement) -> AnyElement {
    element.into_any_element()
}

#[test]
fn smoke_feedback_views_render_into_any_element() {
    let center = NotificationCenter::new();
    let i18n = I18nManager::new();
    let _ = into_any(NotificationBanner::new(center.clone(), &i18n));
    center.show(Notification::error("Please review your information"));
    let _ = into_any(NotificationBanner::new(center, &i18n).close_label("×").w_full());

    let control = SubmitControl::new("Send message", "Sending...");
    let _ = into_any(SubmitButton::new(control.clone()).on_submit(|_, _, _| {}));
    let _guard = control.try_begin();
    let _ = into_any(SubmitButton::new(control).with_id("contact-submit"));

    let _ = into_any(FieldErrorText::new(None));
    let _ = into_any(FieldErrorText::new(Some("This field is required".into())));
}

#[test]
fn close_label_comes_from_the_locale() {
    let center = NotificationCenter::new();
    let english = NotificationBanner::new(center.clone(), &I18nManager::new().with_locale("en"));
    assert_eq!(english.close_label.to_string(), "Close");
    let persian = NotificationBanner::new(center, &I18nManager::new().with_locale("fa"));
    assert_eq!(persian.close_label.to_string(), "بستن");
}

#[test]
fn every_severity_has_its_own_color() {
    let colors = [
        Severity::Info,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
    ]
    .map(NotificationBanner::background);
    for (index, color) in colors.iter().enumerate() {
        assert!(colors[index + 1..].iter().all(|other| other != color));
    }
}

#[test]
fn field_error_text_follows_display_rules() {
    let form = ContactForm::controller(FormOptions::default()).expect("controller");
    let fields = ContactForm::fields();
    let i18n = I18nManager::new().with_locale("en");

    let hidden = FieldErrorText::for_field(&form, fields.email(), &i18n).expect("error text");
    assert_eq!(hidden.message(), None);

    form.set(fields.email(), "nope".into()).expect("edit");
    form.touch(fields.email()).expect("blur");
    let shown = FieldErrorText::for_field(&form, fields.email(), &i18n).expect("error text");
    assert_eq!(
        shown.message().map(ToString::to_string).as_deref(),
        Some("Invalid email format")
    );
    assert_eq!(fields.email().key().as_str(), "email");
}
