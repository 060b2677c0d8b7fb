//! Form state for the session settings panel

use crate::session::SessionConfig;
use crate::validation::{coerce_number, validate_session, FieldError, FieldErrors, SessionField};
use std::collections::{BTreeMap, BTreeSet};

/// When field errors are recomputed after the first submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Only on the next submit
    #[default]
    OnSubmit,
    /// On every edit of the field
    OnChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormOptions {
    pub re_validate_mode: ValidationMode,
}

/// Everything an input needs to bind to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistration {
    pub name: &'static str,
    pub value: String,
    pub error: Option<String>,
}

/// Form controller for the two session expiration fields
///
/// Values are kept as the raw strings typed by the user. The baseline is the
/// last committed [`SessionConfig`]; a field is dirty while its raw value does
/// not coerce to the baseline number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionForm {
    options: FormOptions,
    defaults: SessionConfig,
    values: BTreeMap<SessionField, String>,
    errors: FieldErrors,
    is_submitting: bool,
    is_submitted: bool,
    submit_count: u32,
}

fn render_values(config: &SessionConfig) -> BTreeMap<SessionField, String> {
    SessionField::ALL
        .into_iter()
        .map(|field| (field, field.get(config).to_string()))
        .collect()
}

impl SessionForm {
    pub fn new(defaults: SessionConfig, options: FormOptions) -> Self {
        Self {
            options,
            defaults,
            values: render_values(&defaults),
            errors: FieldErrors::new(),
            is_submitting: false,
            is_submitted: false,
            submit_count: 0,
        }
    }

    pub fn register(&self, field: SessionField) -> FieldRegistration {
        FieldRegistration {
            name: field.name(),
            value: self.value(field).to_string(),
            error: self.error(field).map(|e| e.message.clone()),
        }
    }

    pub fn value(&self, field: SessionField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<SessionField, String> {
        &self.values
    }

    pub fn defaults(&self) -> SessionConfig {
        self.defaults
    }

    pub fn set_value(&mut self, field: SessionField, raw: impl Into<String>) {
        let raw = raw.into();

        if self.is_submitted && self.options.re_validate_mode == ValidationMode::OnChange {
            match field.schema().validate(&raw) {
                Ok(_) => {
                    self.errors.remove(&field);
                }
                Err(error) => {
                    self.errors.insert(field, error);
                }
            }
        }

        self.values.insert(field, raw);
    }

    pub fn is_field_dirty(&self, field: SessionField) -> bool {
        coerce_number(self.value(field)) != Some(field.get(&self.defaults))
    }

    pub fn dirty_fields(&self) -> BTreeSet<SessionField> {
        SessionField::ALL
            .into_iter()
            .filter(|field| self.is_field_dirty(*field))
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        SessionField::ALL
            .into_iter()
            .any(|field| self.is_field_dirty(field))
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: SessionField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Validate all fields and enter the submitting state when they pass
    pub fn handle_submit(&mut self) -> Result<SessionConfig, FieldErrors> {
        self.submit_count += 1;
        self.is_submitted = true;

        match validate_session(&self.values) {
            Ok(values) => {
                self.errors.clear();
                self.is_submitting = true;
                Ok(values)
            }
            Err(errors) => {
                self.errors.clone_from(&errors);
                Err(errors)
            }
        }
    }

    pub fn finish_submit(&mut self) {
        self.is_submitting = false;
    }

    /// Commit `values` as the new baseline, discarding edits and errors
    pub fn reset(&mut self, values: SessionConfig) {
        self.defaults = values;
        self.values = render_values(&values);
        self.errors.clear();
        self.is_submitted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldErrorKind;

    fn form() -> SessionForm {
        SessionForm::new(SessionConfig::new(900, 43_200), FormOptions::default())
    }

    #[test]
    fn test_initial_values_render_defaults() {
        let form = form();
        assert_eq!(form.value(SessionField::AccessTokenExpiresIn), "900");
        assert_eq!(form.value(SessionField::RefreshTokenExpiresIn), "43200");
        assert!(!form.is_dirty());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut form = form();

        form.set_value(SessionField::AccessTokenExpiresIn, "1800");
        assert!(form.is_dirty());
        assert_eq!(
            form.dirty_fields(),
            BTreeSet::from([SessionField::AccessTokenExpiresIn])
        );

        // Typing the original value back clears the flag
        form.set_value(SessionField::AccessTokenExpiresIn, " 900");
        assert!(!form.is_dirty());
    }

    #[test]
    fn test_invalid_submit_records_errors() {
        let mut form = form();
        form.set_value(SessionField::RefreshTokenExpiresIn, "forever");

        let errors = form.handle_submit().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(!form.is_submitting());
        assert_eq!(
            form.register(SessionField::RefreshTokenExpiresIn).error.as_deref(),
            Some("Refresh token expiration must be a number")
        );
    }

    #[test]
    fn test_errors_not_revalidated_on_change_in_submit_mode() {
        let mut form = form();
        form.set_value(SessionField::AccessTokenExpiresIn, "");
        assert!(form.handle_submit().is_err());

        form.set_value(SessionField::AccessTokenExpiresIn, "60");
        assert_eq!(
            form.error(SessionField::AccessTokenExpiresIn).map(|e| e.kind),
            Some(FieldErrorKind::Required)
        );

        assert_eq!(form.handle_submit(), Ok(SessionConfig::new(60, 43_200)));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_on_change_mode_revalidates_after_first_submit() {
        let mut form = SessionForm::new(
            SessionConfig::default(),
            FormOptions {
                re_validate_mode: ValidationMode::OnChange,
            },
        );

        // Not validated before the first submit
        form.set_value(SessionField::AccessTokenExpiresIn, "x");
        assert!(form.errors().is_empty());

        assert!(form.handle_submit().is_err());
        form.set_value(SessionField::AccessTokenExpiresIn, "60");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_reset_moves_baseline() {
        let mut form = form();
        form.set_value(SessionField::AccessTokenExpiresIn, "120");
        form.set_value(SessionField::RefreshTokenExpiresIn, "3600");

        let submitted = form.handle_submit().unwrap();
        assert!(form.is_submitting());

        form.reset(submitted);
        form.finish_submit();

        assert!(!form.is_dirty());
        assert!(!form.is_submitting());
        assert!(!form.is_submitted());
        assert_eq!(form.submit_count(), 1);
        assert_eq!(form.defaults(), SessionConfig::new(120, 3600));
    }
}
