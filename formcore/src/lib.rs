//! Headless user-registration form core.
//!
//! The crate models a registration form without any view layer: pure
//! validation rules, a form aggregate with touched/lock state, and an async
//! submission workflow that drives an injectable registration gateway and a
//! shared notification channel. A UI host renders [`domain::field::Field`]
//! and [`Notification`] state and feeds edits back in; everything observable
//! about the flow lives here.

pub mod domain;
pub mod outbound;

pub use domain::field::FieldName;
pub use domain::form::RegistrationForm;
pub use domain::submission::SubmissionWorkflow;
pub use notifications::{MessageChannel, Notification, Severity};
