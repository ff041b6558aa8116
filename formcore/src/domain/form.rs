//! Registration form aggregate.
//!
//! Owns the four fields, the form-wide lock, and the rules for extracting a
//! submittable snapshot. The lock mirrors disabled inputs in a view: while
//! engaged, edits are ignored rather than rejected loudly.

use tracing::debug;

use crate::domain::field::{Field, FieldName};
use crate::domain::user::UserRecord;

/// The four-field registration form.
///
/// ## Invariants
/// - Every field's error list always reflects its current value.
/// - While locked, `set_value` is a no-op; no field accepts new input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    username: Field,
    email: Field,
    account_type: Field,
    password: Field,
    locked: bool,
}

impl RegistrationForm {
    /// Build a pristine form: empty values, untouched, unlocked. The empty
    /// values already fail the required rules, so a fresh form is invalid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            username: Field::new(FieldName::Username),
            email: Field::new(FieldName::Email),
            account_type: Field::new(FieldName::AccountType),
            password: Field::new(FieldName::Password),
            locked: false,
        }
    }

    /// Borrow one field's state.
    #[must_use]
    pub const fn field(&self, name: FieldName) -> &Field {
        match name {
            FieldName::Username => &self.username,
            FieldName::Email => &self.email,
            FieldName::AccountType => &self.account_type,
            FieldName::Password => &self.password,
        }
    }

    /// Iterate the fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        FieldName::ALL.into_iter().map(|name| self.field(name))
    }

    /// Replace `name`'s value and re-run its rules. Ignored while the form
    /// is locked.
    pub fn set_value(&mut self, name: FieldName, value: impl Into<String>) {
        if self.locked {
            debug!(field = %name, "edit ignored; form is locked");
            return;
        }
        self.field_mut(name).set_value(value);
    }

    /// Record that the user has interacted with (blurred) `name`.
    pub fn mark_touched(&mut self, name: FieldName) {
        self.field_mut(name).mark_touched();
    }

    /// Engage the form-wide lock.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Release the form-wide lock.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Whether the form is currently rejecting edits.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether every field passes its rules.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields().all(Field::is_valid)
    }

    /// Clear values, touched flags, and dirty flags back to the pristine
    /// state. The lock is left as-is; the workflow manages it separately.
    pub fn reset(&mut self) {
        self.username.reset();
        self.email.reset();
        self.account_type.reset();
        self.password.reset();
    }

    /// Extract a submittable snapshot, or `None` while any field is
    /// invalid.
    #[must_use]
    pub fn draft(&self) -> Option<UserRecord> {
        if !self.is_valid() {
            return None;
        }
        let account_type = self.account_type.value().parse().ok()?;
        Some(UserRecord::new(
            self.username.value(),
            self.email.value(),
            account_type,
            self.password.value(),
        ))
    }

    fn field_mut(&mut self, name: FieldName) -> &mut Field {
        match name {
            FieldName::Username => &mut self.username,
            FieldName::Email => &mut self.email,
            FieldName::AccountType => &mut self.account_type,
            FieldName::Password => &mut self.password,
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::AccountType;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_value(FieldName::Username, "ada");
        form.set_value(FieldName::Email, "ada@example.com");
        form.set_value(FieldName::AccountType, "user");
        form.set_value(FieldName::Password, "Passw0rd!");
        form
    }

    #[rstest]
    fn fresh_form_is_invalid(valid_form: RegistrationForm) {
        assert!(!RegistrationForm::new().is_valid());
        assert!(valid_form.is_valid());
    }

    #[rstest]
    fn locked_form_ignores_edits(mut valid_form: RegistrationForm) {
        valid_form.lock();
        valid_form.set_value(FieldName::Username, "trudy");

        assert_eq!(valid_form.field(FieldName::Username).value(), "ada");

        valid_form.unlock();
        valid_form.set_value(FieldName::Username, "trudy");
        assert_eq!(valid_form.field(FieldName::Username).value(), "trudy");
    }

    #[rstest]
    fn draft_snapshots_a_valid_form(valid_form: RegistrationForm) {
        let record = valid_form.draft().expect("valid form yields a record");
        assert_eq!(record.username(), "ada");
        assert_eq!(record.email(), "ada@example.com");
        assert_eq!(record.account_type(), AccountType::User);
        assert_eq!(record.password(), "Passw0rd!");
    }

    #[rstest]
    fn draft_refuses_an_invalid_form(mut valid_form: RegistrationForm) {
        valid_form.set_value(FieldName::Email, "not-an-email");
        assert_eq!(valid_form.draft(), None);
    }

    #[rstest]
    fn reset_clears_values_and_flags(mut valid_form: RegistrationForm) {
        valid_form.mark_touched(FieldName::Username);
        valid_form.reset();

        for field in valid_form.fields() {
            assert_eq!(field.value(), "");
            assert!(!field.is_touched());
            assert!(!field.is_dirty());
        }
        assert!(
            !valid_form.is_valid(),
            "required rules fail on the cleared values"
        );
    }

    #[rstest]
    fn untouched_invalid_field_displays_nothing(mut valid_form: RegistrationForm) {
        valid_form.set_value(FieldName::Username, "ab");
        assert!(
            valid_form
                .field(FieldName::Username)
                .visible_errors()
                .is_empty()
        );

        valid_form.mark_touched(FieldName::Username);
        assert!(
            !valid_form
                .field(FieldName::Username)
                .visible_errors()
                .is_empty()
        );
    }
}
