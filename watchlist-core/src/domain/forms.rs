use std::collections::BTreeMap;
use std::fmt;

use secrecy::Secret;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{Email, EmailError, Password, PasswordPolicy};

/// Length of the email verification code sent during sign-up.
pub const VERIFICATION_CODE_LENGTH: usize = 6;

// Key validator uses for struct-level (schema) errors.
const SCHEMA_ERRORS_KEY: &str = "__all__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    Email,
    Password,
    ConfirmPassword,
    Code,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "first_name" => Some(Field::FirstName),
            "email" => Some(Field::Email),
            "password" => Some(Field::Password),
            "confirm_password" | SCHEMA_ERRORS_KEY => Some(Field::ConfirmPassword),
            "code" => Some(Field::Code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Password must contain uppercase, lowercase, and number")]
    PasswordWeak,
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Verification code is required")]
    CodeRequired,
    #[error("Please enter the complete 6-digit code")]
    CodeIncomplete,
}

impl FieldError {
    fn code(&self) -> &'static str {
        match self {
            FieldError::FirstNameRequired => "first_name_required",
            FieldError::EmailRequired => "email_required",
            FieldError::EmailInvalid => "email_invalid",
            FieldError::PasswordRequired => "password_required",
            FieldError::PasswordTooShort { .. } => "password_too_short",
            FieldError::PasswordWeak => "password_weak",
            FieldError::ConfirmPasswordRequired => "confirm_password_required",
            FieldError::PasswordMismatch => "password_mismatch",
            FieldError::CodeRequired => "code_required",
            FieldError::CodeIncomplete => "code_incomplete",
        }
    }

    fn from_validation_error(error: &ValidationError) -> Option<Self> {
        let parsed = match &*error.code {
            "first_name_required" => FieldError::FirstNameRequired,
            "email_required" => FieldError::EmailRequired,
            "email_invalid" => FieldError::EmailInvalid,
            "password_required" => FieldError::PasswordRequired,
            "password_too_short" => FieldError::PasswordTooShort {
                min: error
                    .params
                    .get("min")
                    .and_then(|min| min.as_u64())
                    .map(|min| min as usize)?,
            },
            "password_weak" => FieldError::PasswordWeak,
            "confirm_password_required" => FieldError::ConfirmPasswordRequired,
            "password_mismatch" => FieldError::PasswordMismatch,
            "code_required" => FieldError::CodeRequired,
            "code_incomplete" => FieldError::CodeIncomplete,
            _ => return None,
        };
        Some(parsed)
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        let mut validation_error = ValidationError::new(error.code());
        if let FieldError::PasswordTooShort { min } = error {
            validation_error.add_param("min".into(), &min);
        }
        validation_error
    }
}

/// Field-level errors of one form submission. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, FieldError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        for (name, field_errors) in errors.field_errors() {
            let Some(field) = Field::from_name(&name) else {
                continue;
            };
            if let Some(error) = field_errors
                .iter()
                .find_map(FieldError::from_validation_error)
            {
                form_errors.insert(field, error);
            }
        }
        form_errors
    }
}

/// Run every rule of `form` and collect the failures.
pub fn validate_form<F: Validate>(form: &F) -> FormErrors {
    match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(errors) => FormErrors::from(&errors),
    }
}

/// The error state shown next to a screen's inputs.
#[derive(Debug, Default)]
pub struct FormState {
    errors: FormErrors,
}

impl FormState {
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Editing a field hides its error until the next submit.
    pub fn clear_field(&mut self, field: Field) {
        self.errors.remove(field);
    }

    /// Re-validate in full, replacing every previous error. Returns whether the form is valid.
    pub fn submit<F: Validate>(&mut self, form: &F) -> bool {
        self.errors = validate_form(form);
        self.errors.is_empty()
    }

    /// Show an error reported by the auth provider after a submit went through.
    pub fn reject(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn reset(&mut self) {
        self.errors = FormErrors::default();
    }
}

fn email_rules(value: &str) -> Result<(), ValidationError> {
    match Email::parse(value) {
        Ok(_) => Ok(()),
        Err(EmailError::Empty) => Err(FieldError::EmailRequired.into()),
        Err(EmailError::InvalidEmail) => Err(FieldError::EmailInvalid.into()),
    }
}

fn sign_in_password_rules(value: &str) -> Result<(), ValidationError> {
    PasswordPolicy::SignIn
        .check(value)
        .map_err(ValidationError::from)
}

fn sign_up_password_rules(value: &str) -> Result<(), ValidationError> {
    PasswordPolicy::SignUp
        .check(value)
        .map_err(ValidationError::from)
}

fn first_name_rules(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(FieldError::FirstNameRequired.into());
    }
    Ok(())
}

fn confirm_password_rules(form: &SignUpForm) -> Result<(), ValidationError> {
    if form.confirm_password.is_empty() {
        return Err(FieldError::ConfirmPasswordRequired.into());
    }
    if form.confirm_password != form.password {
        return Err(FieldError::PasswordMismatch.into());
    }
    Ok(())
}

// Digit filtering happens at input time, so the rule only looks at presence and length.
fn code_rules(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(FieldError::CodeRequired.into());
    }
    if value.chars().count() != VERIFICATION_CODE_LENGTH {
        return Err(FieldError::CodeIncomplete.into());
    }
    Ok(())
}

/// Keep only digits, capped at the code length.
pub fn sanitize_code_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(VERIFICATION_CODE_LENGTH)
        .collect()
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

const REDACTED: &str = "[REDACTED]";

/// Raw sign-in input as typed. The password only becomes a [`Password`] in
/// [`SignInForm::credentials`].
#[derive(Clone, Validate)]
pub struct SignInForm {
    #[validate(custom(function = "email_rules"))]
    pub email: String,
    #[validate(custom(function = "sign_in_password_rules"))]
    pub password: String,
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl SignInForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    pub fn credentials(&self) -> Result<Credentials, FormErrors> {
        let errors = validate_form(self);
        if !errors.is_empty() {
            return Err(errors);
        }
        let to_errors = |field, error| {
            let mut errors = FormErrors::default();
            errors.insert(field, error);
            errors
        };
        Ok(Credentials {
            email: Email::parse(&self.email)
                .map_err(|_| to_errors(Field::Email, FieldError::EmailInvalid))?,
            password: Password::parse(
                Secret::new(self.password.clone()),
                PasswordPolicy::SignIn,
            )
            .map_err(|e| to_errors(Field::Password, e))?,
        })
    }
}

#[derive(Clone, Validate)]
#[validate(schema(function = "confirm_password_rules", skip_on_field_errors = false))]
pub struct SignUpForm {
    #[validate(custom(function = "first_name_rules"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(custom(function = "email_rules"))]
    pub email: String,
    #[validate(custom(function = "sign_up_password_rules"))]
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("confirm_password", &REDACTED)
            .finish()
    }
}

impl SignUpForm {
    pub fn new(first_name: &str, email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: String::new(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct VerificationForm {
    #[validate(custom(function = "code_rules"))]
    pub code: String,
}

impl VerificationForm {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }
}
