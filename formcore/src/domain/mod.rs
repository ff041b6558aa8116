//! Domain model for the registration flow.
//!
//! Purpose: define the field/form aggregates, the pure validation rules, the
//! gateway port, and the submission workflow that orchestrates them. Types
//! here are transport and view agnostic; adapters live under
//! [`crate::outbound`].
//!
//! Public surface:
//! - `Field` / `FieldName` — one editable value plus its validation state.
//! - `ValidationErrorKind` — tags explaining why a field is invalid.
//! - `RegistrationForm` — the four-field aggregate with lock state.
//! - `UserRecord` / `RegistrationReceipt` — the submitted snapshot and echo.
//! - `RegistrationGateway` / `GatewayError` — the backend port.
//! - `SubmissionWorkflow` — the submit state machine.

pub mod field;
pub mod form;
pub mod ports;
pub mod submission;
pub mod user;
pub mod validation;

pub use self::field::{Field, FieldName};
pub use self::form::RegistrationForm;
pub use self::ports::{GatewayError, RegistrationGateway};
pub use self::submission::{SubmissionOutcome, SubmissionPhase, SubmissionWorkflow};
pub use self::user::{AccountType, RegistrationReceipt, UserRecord};
pub use self::validation::ValidationErrorKind;
