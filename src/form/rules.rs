use std::fmt::{Display, Formatter};

use gpui::SharedString;

use super::validation::ValidationError;
use crate::i18n::I18nManager;

/// Shortest accepted telephone number, counted in characters after trimming.
pub const MIN_PHONE_LEN: usize = 10;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    pub const fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    pub const fn email() -> Self {
        Self::new(FieldKind::Email)
    }

    pub const fn tel() -> Self {
        Self::new(FieldKind::Tel)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validate(self, value: &str) -> Result<(), FieldRuleError> {
        validate_value(self, value)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FieldRuleError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl FieldRuleError {
    pub const fn i18n_key(self) -> &'static str {
        match self {
            FieldRuleError::Required => "form.required",
            FieldRuleError::InvalidEmail => "form.invalid_email",
            FieldRuleError::InvalidPhone => "form.invalid_phone",
        }
    }
}

impl Display for FieldRuleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRuleError::Required => f.write_str("required"),
            FieldRuleError::InvalidEmail => f.write_str("invalid email"),
            FieldRuleError::InvalidPhone => f.write_str("invalid phone"),
        }
    }
}

impl std::error::Error for FieldRuleError {}

impl ValidationError for FieldRuleError {
    fn message(&self) -> SharedString {
        self.to_string().into()
    }

    fn localized(&self, i18n: &I18nManager) -> SharedString {
        i18n.t(self.i18n_key())
    }
}

/// Checks one raw input value against its spec. The value is trimmed
/// first; kind checks only apply to non-empty values.
pub fn validate_value(spec: FieldSpec, value: &str) -> Result<(), FieldRuleError> {
    let value = value.trim();
    if value.is_empty() {
        return if spec.required {
            Err(FieldRuleError::Required)
        } else {
            Ok(())
        };
    }

    match spec.kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email if is_valid_email(value) => Ok(()),
        FieldKind::Email => Err(FieldRuleError::InvalidEmail),
        FieldKind::Tel if is_valid_phone(value) => Ok(()),
        FieldKind::Tel => Err(FieldRuleError::InvalidPhone),
    }
}

/// `local@domain.tld` shape: one `@`, no whitespace, and a dot in the
/// domain with at least one character on each side.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

/// Digits, `+`, `-`, whitespace and parentheses only, at least
/// [`MIN_PHONE_LEN`] characters long.
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().count() >= MIN_PHONE_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_reject_blank_values() {
        let spec = FieldSpec::text().required();
        assert_eq!(spec.validate(""), Err(FieldRuleError::Required));
        assert_eq!(spec.validate("   \t"), Err(FieldRuleError::Required));
        assert_eq!(spec.validate("Sara"), Ok(()));
    }

    #[test]
    fn optional_fields_accept_blank_values_of_any_kind() {
        assert_eq!(FieldSpec::email().validate(""), Ok(()));
        assert_eq!(FieldSpec::tel().validate("  "), Ok(()));
    }

    #[test]
    fn email_shape() {
        for valid in ["a@b.co", "first.last@mail.example.ir", "x@y..z", "  a@b.co  "] {
            assert_eq!(FieldSpec::email().validate(valid), Ok(()), "{valid}");
        }
        for invalid in ["abc", "a@b", "a@.b", "a@b.", "@b.co", "a@@b.co", "a b@c.de", "a@b@c.de"] {
            assert_eq!(
                FieldSpec::email().validate(invalid),
                Err(FieldRuleError::InvalidEmail),
                "{invalid}"
            );
        }
    }

    #[test]
    fn phone_shape() {
        for valid in ["+98 912 345 6789", "(021) 8888-7777", "09123456789"] {
            assert!(is_valid_phone(valid), "{valid}");
        }
        assert_eq!(
            FieldSpec::tel().validate("123"),
            Err(FieldRuleError::InvalidPhone)
        );
        assert_eq!(
            FieldSpec::tel().validate("0912345678x"),
            Err(FieldRuleError::InvalidPhone)
        );
        assert!(!is_valid_phone("۰۹۱۲۳۴۵۶۷۸۹"));
    }

    #[test]
    fn phone_length_is_measured_after_trimming() {
        assert_eq!(
            FieldSpec::tel().validate("   123456789   "),
            Err(FieldRuleError::InvalidPhone)
        );
        assert_eq!(FieldSpec::tel().validate("  1234567890  "), Ok(()));
    }

    #[test]
    fn required_check_wins_over_kind_checks() {
        assert_eq!(
            FieldSpec::email().required().validate(""),
            Err(FieldRuleError::Required)
        );
    }
}
