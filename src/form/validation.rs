use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use gpui::SharedString;

use super::controller::{
    FieldKey, FormController, FormResult, RevalidateMode, SyncFieldValidatorFn,
    SyncFormValidatorFn, ValidationMode, first_error_key, read_lock, write_lock,
};
use super::rules::{FieldRuleError, FieldSpec};
use crate::i18n::I18nManager;

pub trait ValidationError: Clone + Send + Sync + 'static {
    fn message(&self) -> SharedString;

    fn localized(&self, i18n: &I18nManager) -> SharedString {
        let _ = i18n;
        self.message()
    }
}

pub trait FieldLens<T>: Copy + Send + Sync + 'static {
    type Value: Clone + PartialEq + Send + Sync + 'static;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

pub trait FormModel: Clone + Send + Sync + 'static {
    type Fields;

    fn fields() -> Self::Fields;

    /// Every field rendered as text, in declaration order.
    fn field_values(&self) -> Vec<(FieldKey, String)>;
}

pub trait FieldValidator<T, L, E>: Send + Sync
where
    L: FieldLens<T>,
    E: ValidationError,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E>;
}

impl<T, L, E, F> FieldValidator<T, L, E> for F
where
    L: FieldLens<T>,
    E: ValidationError,
    F: for<'a> Fn(&'a T, &'a L::Value) -> Result<(), E> + Send + Sync,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E> {
        (self)(model, value)
    }
}

pub trait FormValidator<T, E>: Send + Sync
where
    E: ValidationError,
{
    fn validate(&self, model: &T) -> Vec<(FieldKey, E)>;
}

impl<T, E, F> FormValidator<T, E> for F
where
    E: ValidationError,
    F: Fn(&T) -> Vec<(FieldKey, E)> + Send + Sync,
{
    fn validate(&self, model: &T) -> Vec<(FieldKey, E)> {
        (self)(model)
    }
}

impl<T, E> FormController<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: ValidationError,
{
    /// Declares a field's kind and whether it is required. The matching
    /// built-in rule runs before any custom validators of the field.
    pub fn register_field<L>(&self, lens: L, spec: FieldSpec) -> FormResult<()>
    where
        L: FieldLens<T>,
        L::Value: AsRef<str>,
        E: From<FieldRuleError>,
    {
        let key = lens.key();
        let rule: SyncFieldValidatorFn<T, E> = Arc::new(move |model: &T| {
            spec
                .validate(AsRef::<str>::as_ref(lens.get(model)))
                .map_err(E::from)
        });
        write_lock(&self.field_specs, "registering field spec")?.insert(key, spec);
        let mut validators = write_lock(&self.sync_field_validators, "registering field rule")?;
        validators.entry(key).or_default().insert(0, rule);
        drop(validators);
        write_lock(&self.state, "registering field meta")?.ensure_meta(key);
        Ok(())
    }

    pub fn register_field_validator<L, V>(&self, lens: L, validator: V) -> FormResult<()>
    where
        L: FieldLens<T>,
        V: FieldValidator<T, L, E> + 'static,
    {
        let key = lens.key();
        let validator = Arc::new(validator);
        let wrapped: SyncFieldValidatorFn<T, E> =
            Arc::new(move |model: &T| validator.validate(model, lens.get(model)));
        let mut validators =
            write_lock(&self.sync_field_validators, "registering field validator")?;
        validators.entry(key).or_default().push(wrapped);
        Ok(())
    }

    pub fn register_form_validator<V>(&self, validator: V) -> FormResult<()>
    where
        V: FormValidator<T, E> + 'static,
    {
        let validator = Arc::new(validator);
        let wrapped: SyncFormValidatorFn<T, E> = Arc::new(move |model: &T| validator.validate(model));
        let mut validators = write_lock(&self.form_validators, "registering form validator")?;
        validators.push(wrapped);
        Ok(())
    }

    /// Applies an edit. Depending on the options the field is validated,
    /// revalidated, or has its errors cleared.
    pub fn set<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        let validated = {
            let mut state = write_lock(&self.state, "writing form model")?;
            lens.set(&mut state.model, value);
            let is_dirty = lens.get(&state.model) != lens.get(&state.initial_model);
            if is_dirty {
                state.dirty_fields.insert(key);
            } else {
                state.dirty_fields.remove(&key);
            }
            let meta = state.ensure_meta(key);
            meta.dirty = is_dirty;
            meta.validated
        };

        if self.options.validate_mode == ValidationMode::OnChange {
            let _ = self.validate_field_by_key(key)?;
        } else if validated {
            match self.options.revalidate_mode {
                RevalidateMode::OnChange => {
                    let _ = self.validate_field_by_key(key)?;
                }
                RevalidateMode::ClearOnChange => self.clear_field_errors_by_key(key)?,
                RevalidateMode::OnSubmit => {}
            }
        }
        Ok(())
    }

    /// Marks a field as blurred.
    pub fn touch<L>(&self, lens: L) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = write_lock(&self.state, "touching field")?;
            state.ensure_meta(key).touched = true;
        }

        if self.options.validate_mode != ValidationMode::OnSubmit {
            let _ = self.validate_field_by_key(key)?;
        }
        Ok(())
    }

    pub fn validate_field<L>(&self, lens: L) -> FormResult<bool>
    where
        L: FieldLens<T>,
    {
        self.validate_field_by_key(lens.key())
    }

    /// Runs every field and form validator and records all errors at once.
    pub fn validate_form(&self) -> FormResult<bool> {
        let model = read_lock(&self.state, "reading model for form validation")?
            .model
            .clone();
        let field_validators = read_lock(
            &self.sync_field_validators,
            "reading field validators for form validation",
        )?
        .clone();
        let form_validators = read_lock(
            &self.form_validators,
            "reading form validators for form validation",
        )?
        .clone();

        let mut field_errors = BTreeMap::<FieldKey, Vec<E>>::new();
        for (key, validators) in field_validators {
            let errors = self.run_validators(&model, &validators);
            field_errors.insert(key, errors);
        }

        for validator in form_validators {
            for (key, error) in validator(&model) {
                field_errors.entry(key).or_default().push(error);
            }
        }

        let mut state = write_lock(&self.state, "applying form validation result")?;
        let mut keys = state
            .field_meta
            .keys()
            .copied()
            .collect::<BTreeSet<FieldKey>>();
        keys.extend(field_errors.keys().copied());
        for key in keys {
            let meta = state.ensure_meta(key);
            meta.validated = true;
            meta.errors = field_errors.remove(&key).unwrap_or_default();
        }
        state.first_error = first_error_key(&state.field_meta);
        let is_valid = state.first_error.is_none();
        if !is_valid {
            log::debug!(
                "form validation failed; first invalid field: {:?}",
                state.first_error.map(FieldKey::as_str)
            );
        }
        Ok(is_valid)
    }

    pub(super) fn validate_field_by_key(&self, key: FieldKey) -> FormResult<bool> {
        let model = read_lock(&self.state, "reading model for field validation")?
            .model
            .clone();
        let validators = read_lock(
            &self.sync_field_validators,
            "reading field validators for key validation",
        )?
        .get(&key)
        .cloned()
        .unwrap_or_default();

        let errors = self.run_validators(&model, &validators);

        let mut state = write_lock(&self.state, "writing field validation result")?;
        let meta = state.ensure_meta(key);
        meta.validated = true;
        meta.errors = errors;
        let is_valid = meta.is_valid();
        state.first_error = first_error_key(&state.field_meta);
        Ok(is_valid)
    }

    fn run_validators(&self, model: &T, validators: &[SyncFieldValidatorFn<T, E>]) -> Vec<E> {
        let mut errors = Vec::new();
        for validator in validators {
            if let Err(error) = validator(model) {
                errors.push(error);
                if self.options.validate_first_error_only {
                    break;
                }
            }
        }
        errors
    }
}
