mod controller;
mod rules;
mod validation;


pub use arbe_form_derive::FormModel;
pub use controller::{
    FieldKey, FieldMeta, FormController, FormError, FormOptions, FormResult, FormSnapshot,
    RevalidateMode, SubmitState, ValidationMode,
};
pub use rules::{
    FieldKind, FieldRuleError, FieldSpec, MIN_PHONE_LEN, is_valid_email, is_valid_phone,
    validate_value,
};
pub use validation::{FieldLens, FieldValidator, FormModel, FormValidator, ValidationError};
