//! Pure validation rules for registration fields.
//!
//! Each rule maps a field's current string value to an ordered,
//! duplicate-free list of [`ValidationErrorKind`] tags. Rules are data
//! producers only: nothing here raises an error or touches the view layer,
//! and the same rules back both the form aggregate and the display lines.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::field::FieldName;
use crate::domain::user::AccountType;

/// Minimum allowed username length in characters.
pub const USERNAME_MIN_LENGTH: usize = 3;
/// Maximum allowed username length in characters.
pub const USERNAME_MAX_LENGTH: usize = 24;
/// Minimum allowed password length in characters.
pub const PASSWORD_MIN_LENGTH: usize = 5;
/// Maximum allowed password length in characters.
pub const PASSWORD_MAX_LENGTH: usize = 24;
/// Characters accepted as the password's required special character.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Tag identifying why a field value failed one rule.
///
/// Tags are data consumed by the view layer, not errors to be thrown. The
/// length variants carry the limit that was violated so display lines can
/// quote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    /// The field is empty (or, for the account type, not a known choice).
    Required,
    /// The value is shorter than the field's minimum length.
    MinLength {
        /// Minimum length in characters.
        min: usize,
    },
    /// The value is longer than the field's maximum length.
    MaxLength {
        /// Maximum length in characters.
        max: usize,
    },
    /// The value is not a syntactically plausible email address.
    EmailFormat,
    /// The password has no lowercase letter.
    LowerCaseLetterRequired,
    /// The password has no uppercase letter.
    UpperCaseLetterRequired,
    /// The password has no character from [`SPECIAL_CHARACTERS`].
    SpecialCharactersRequired,
}

impl ValidationErrorKind {
    /// Stable machine-readable tag, matching the wire names the rest of the
    /// system (and its tests) key on.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength { .. } => "minLength",
            Self::MaxLength { .. } => "maxLength",
            Self::EmailFormat => "emailFormat",
            Self::LowerCaseLetterRequired => "lowerCaseLetterRequired",
            Self::UpperCaseLetterRequired => "upperCaseLetterRequired",
            Self::SpecialCharactersRequired => "specialCharactersRequired",
        }
    }

    /// Display line for this tag on `field`, shared by every view layer.
    #[must_use]
    pub fn message(&self, field: FieldName) -> String {
        let label = field.label();
        match self {
            Self::Required => format!("{label} is required."),
            Self::MinLength { min } => {
                format!("{label} must be at least {min} characters.")
            }
            Self::MaxLength { max } => format!("{label} cannot exceed {max} characters."),
            Self::EmailFormat => "Enter a valid email address.".to_owned(),
            Self::LowerCaseLetterRequired => {
                format!("{label} must contain at least one lowercase letter.")
            }
            Self::UpperCaseLetterRequired => {
                format!("{label} must contain at least one uppercase letter.")
            }
            Self::SpecialCharactersRequired => {
                format!("{label} must contain at least one special character.")
            }
        }
    }
}

/// Run the rule set registered for `field` against `value`.
#[must_use]
pub fn validate(field: FieldName, value: &str) -> Vec<ValidationErrorKind> {
    match field {
        FieldName::Username => validate_username(value),
        FieldName::Email => validate_email(value),
        FieldName::AccountType => validate_account_type(value),
        FieldName::Password => validate_password(value),
    }
}

/// Username rules: required, then 3–24 characters.
///
/// Length rules skip empty input; an empty username reports `required`
/// alone.
#[must_use]
pub fn validate_username(value: &str) -> Vec<ValidationErrorKind> {
    if value.is_empty() {
        return vec![ValidationErrorKind::Required];
    }

    let length = value.chars().count();
    let mut errors = Vec::new();
    if length < USERNAME_MIN_LENGTH {
        errors.push(ValidationErrorKind::MinLength {
            min: USERNAME_MIN_LENGTH,
        });
    }
    if length > USERNAME_MAX_LENGTH {
        errors.push(ValidationErrorKind::MaxLength {
            max: USERNAME_MAX_LENGTH,
        });
    }
    errors
}

/// Email rules: required, then `local@domain` with a dotted domain.
#[must_use]
pub fn validate_email(value: &str) -> Vec<ValidationErrorKind> {
    if value.is_empty() {
        vec![ValidationErrorKind::Required]
    } else if email_regex().is_match(value) {
        Vec::new()
    } else {
        vec![ValidationErrorKind::EmailFormat]
    }
}

/// Account type rule: the value must name a known [`AccountType`].
#[must_use]
pub fn validate_account_type(value: &str) -> Vec<ValidationErrorKind> {
    if value.parse::<AccountType>().is_ok() {
        Vec::new()
    } else {
        vec![ValidationErrorKind::Required]
    }
}

/// Password rules: required, 5–24 characters, and one character from each
/// of three classes (lowercase, uppercase, special).
///
/// Only the first missing class is reported, checked in lowercase,
/// uppercase, special order. The class check also runs on empty input, so an
/// empty password carries the `required` tag and a class tag.
#[must_use]
pub fn validate_password(value: &str) -> Vec<ValidationErrorKind> {
    let mut errors = Vec::new();
    if value.is_empty() {
        errors.push(ValidationErrorKind::Required);
    } else {
        let length = value.chars().count();
        if length < PASSWORD_MIN_LENGTH {
            errors.push(ValidationErrorKind::MinLength {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        if length > PASSWORD_MAX_LENGTH {
            errors.push(ValidationErrorKind::MaxLength {
                max: PASSWORD_MAX_LENGTH,
            });
        }
    }
    if let Some(kind) = first_missing_character_class(value) {
        errors.push(kind);
    }
    errors
}

fn first_missing_character_class(value: &str) -> Option<ValidationErrorKind> {
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        return Some(ValidationErrorKind::LowerCaseLetterRequired);
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some(ValidationErrorKind::UpperCaseLetterRequired);
    }
    if !value.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Some(ValidationErrorKind::SpecialCharactersRequired);
    }
    None
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One '@', a whitespace-free local part, and a domain containing at
        // least one dot with characters either side.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}
