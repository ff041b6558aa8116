//! Editable field state.
//!
//! A [`Field`] pairs one string value with its validation outcome and the
//! interaction flags the view layer keys on. Error visibility is gated on
//! `touched`: an untouched field never displays errors, however invalid its
//! value is.

use std::fmt;

use crate::domain::validation::{ValidationErrorKind, validate};

/// Identifies one of the four registration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    /// Account handle chosen by the user.
    Username,
    /// Contact address for the account.
    Email,
    /// Requested account role.
    AccountType,
    /// Account secret.
    Password,
}

impl FieldName {
    /// Every field, in form order.
    pub const ALL: [Self; 4] = [Self::Username, Self::Email, Self::AccountType, Self::Password];

    /// Stable wire name used in payloads and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::AccountType => "type",
            Self::Password => "password",
        }
    }

    /// Human label used to build display messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::AccountType => "Type",
            Self::Password => "Password",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editable form value plus its validation state.
///
/// ## Invariants
/// - `errors` always reflects `value` under the field's rule set; every
///   mutation re-runs validation.
/// - `errors` is duplicate-free and ordered by rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: FieldName,
    value: String,
    touched: bool,
    dirty: bool,
    errors: Vec<ValidationErrorKind>,
}

impl Field {
    pub(crate) fn new(name: FieldName) -> Self {
        Self {
            name,
            value: String::new(),
            touched: false,
            dirty: false,
            errors: validate(name, ""),
        }
    }

    /// Which field this is.
    #[must_use]
    pub const fn name(&self) -> FieldName {
        self.name
    }

    /// Current raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Whether the user has interacted with (blurred) the field.
    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    /// Whether the value has been edited since construction or reset.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// All failing rule tags for the current value.
    #[must_use]
    pub fn errors(&self) -> &[ValidationErrorKind] {
        self.errors.as_slice()
    }

    /// Whether the current value passes every rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error tags the view should display: nothing until the field has been
    /// touched.
    #[must_use]
    pub fn visible_errors(&self) -> &[ValidationErrorKind] {
        if self.touched {
            self.errors.as_slice()
        } else {
            &[]
        }
    }

    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
        self.errors = validate(self.name, &self.value);
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub(crate) fn reset(&mut self) {
        self.value.clear();
        self.touched = false;
        self.dirty = false;
        self.errors = validate(self.name, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_field_is_invalid_but_shows_nothing() {
        let field = Field::new(FieldName::Username);
        assert!(!field.is_valid());
        assert!(!field.is_touched());
        assert!(!field.is_dirty());
        assert!(field.visible_errors().is_empty());
    }

    #[rstest]
    fn touched_field_exposes_its_errors() {
        let mut field = Field::new(FieldName::Username);
        field.set_value("ab");
        field.mark_touched();

        let codes: Vec<_> = field
            .visible_errors()
            .iter()
            .map(ValidationErrorKind::code)
            .collect();
        assert_eq!(codes, ["minLength"]);
    }

    #[rstest]
    fn edits_revalidate_immediately() {
        let mut field = Field::new(FieldName::Email);
        field.set_value("not-an-email");
        assert_eq!(field.errors(), [ValidationErrorKind::EmailFormat]);

        field.set_value("ada@example.com");
        assert!(field.is_valid());
        assert!(field.is_dirty());
    }

    #[rstest]
    fn reset_restores_pristine_state() {
        let mut field = Field::new(FieldName::Password);
        field.set_value("Passw0rd!");
        field.mark_touched();
        field.reset();

        assert_eq!(field.value(), "");
        assert!(!field.is_touched());
        assert!(!field.is_dirty());
        assert!(!field.is_valid(), "an empty password fails validation");
    }
}
