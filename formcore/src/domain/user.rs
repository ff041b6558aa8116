//! Registration payloads exchanged with the gateway.
//!
//! [`UserRecord`] is the validated snapshot a submission sends out;
//! [`RegistrationReceipt`] is the echo a successful call returns. The record
//! keeps the password out of serialised output and zeroises it on drop.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Role requested for the new account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Ordinary account.
    User,
    /// Administrative account.
    Admin,
}

impl AccountType {
    /// Wire string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown account type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("account type must be \"user\" or \"admin\"")]
pub struct AccountTypeParseError;

impl FromStr for AccountType {
    type Err = AccountTypeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(AccountTypeParseError),
        }
    }
}

/// Validated snapshot submitted to the registration gateway.
///
/// ## Invariants
/// - Only constructed from values that pass the field rules (the form hands
///   one out exclusively while valid).
/// - Immutable once built; discarded after the gateway call.
/// - The password is zeroised on drop and never echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    username: String,
    email: String,
    account_type: AccountType,
    password: Zeroizing<String>,
}

impl UserRecord {
    /// Assemble a record from already-validated parts.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        account_type: AccountType,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            account_type,
            password: Zeroizing::new(password.into()),
        }
    }

    /// Account handle.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Requested role.
    #[must_use]
    pub const fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Account secret supplied by the user.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Echo returned by the gateway after a successful registration.
///
/// Carries only the fields safe to reflect back; the password never appears
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    /// Account handle as registered.
    pub username: String,
    /// Contact address as registered.
    pub email: String,
    /// Granted role.
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl From<&UserRecord> for RegistrationReceipt {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username().to_owned(),
            email: record.email().to_owned(),
            account_type: record.account_type(),
        }
    }
}
