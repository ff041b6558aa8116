//! Domain ports defining the edges of the hexagon.
//!
//! The registration flow drives exactly one driven adapter: the backend that
//! accepts a validated [`UserRecord`]. The port exposes a strongly typed
//! error so adapters map their failures into predictable variants instead of
//! an opaque catch-all.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::user::{RegistrationReceipt, UserRecord};

/// Failures surfaced by a registration gateway.
///
/// Gateway errors are recoverable by submitting again; the workflow converts
/// them into an error notification and never lets them propagate further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend did not answer within its deadline.
    #[error("Network timeout!")]
    NetworkTimeout,
}

/// Backend port accepting validated registrations.
///
/// The reference adapter is [`crate::outbound::simulated::SimulatedGateway`];
/// a production implementation would put a real network client behind the
/// same signature.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// Register the user, returning the echo payload on success.
    async fn create_user(&self, record: &UserRecord) -> Result<RegistrationReceipt, GatewayError>;
}
