//! gpui elements for the contact form's feedback surfaces.

mod banner;
mod field_error;
mod submit_button;

#[cfg(test)]
mod tests;

pub use banner::NotificationBanner;
pub use field_error::FieldErrorText;
pub use submit_button::SubmitButton;
